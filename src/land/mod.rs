pub mod catalog;
pub mod types;

pub use types::{BasicLandType, Land, LandKind, ALL_BASIC_LAND_TYPES};
