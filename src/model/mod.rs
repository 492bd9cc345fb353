pub mod employee;
pub mod status;
