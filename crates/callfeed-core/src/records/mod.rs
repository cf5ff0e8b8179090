pub mod fields;
pub mod model;
pub mod normalize;
