pub mod field_ops;
pub mod spans;
pub mod validation;
