pub mod dom_model;
pub mod parser;
