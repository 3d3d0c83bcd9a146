pub mod fingerprinter;
pub mod identity;
pub mod xpath;
