pub mod read;
pub mod shape;
pub mod unwrap;
