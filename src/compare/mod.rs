pub mod compare_model;
pub mod comparator;
