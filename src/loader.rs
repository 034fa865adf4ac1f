//! The delegating loader hierarchy: per-loader namespaces populated by a
//! one-time module scan, the array pseudo-loader, and the memoizing
//! factory that builds the chain parent-first.

mod arrays;
mod class_loader;
mod factory;

pub use arrays::*;
pub use class_loader::*;
pub use factory::*;
