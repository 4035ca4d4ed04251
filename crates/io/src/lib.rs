// File I/O operations

pub mod csv;
pub mod xlsx;
