pub mod advisor;
pub mod candidates;
pub mod locator_model;
