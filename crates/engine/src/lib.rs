pub mod dataset;
pub mod expand;
pub mod instruction;
pub mod splitter;
