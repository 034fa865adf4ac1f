//! Boundary traits for the two external collaborators: the module/archive
//! layer that yields binary and source entries, and the binary reader that
//! decodes a classfile's tables. The engine never touches archives or raw
//! classfile bytes through anything but these traits.

mod modules;
mod reader;

pub use modules::*;
pub use reader::*;
