pub mod bitfield;
pub mod checksum;
pub mod fixed_point;
pub mod linear;
