//! The canonical in-memory class model: one `Class` per (loader, type)
//! pair, with lazily computed and indefinitely cached hierarchy facts.

mod class;
mod member;

pub use class::*;
pub use member::*;
