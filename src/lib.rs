pub mod bbox;
pub mod numeric;
pub mod interval;
pub mod framing;
pub mod transforms;
pub mod json_structs;
pub mod json_parser;

pub mod prelude;

pub use crate::bbox::{BoundingBox, Centering};
