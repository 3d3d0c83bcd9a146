pub mod baseline;
pub mod snapshot_model;
