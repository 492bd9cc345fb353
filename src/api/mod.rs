pub mod assembler;
pub mod employee;
pub mod error;
