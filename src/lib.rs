//! Lazy, cached, multi-loader class-resolution engine for static program
//! analysis over binary classes.
//!
//! Binary class artifacts arrive through the [`input`] boundary traits; the
//! [`loader::LoaderFactory`] builds a parent-first delegation chain of
//! [`loader::ClassLoader`]s, each of which scans its modules once into a
//! namespace of canonical [`model::Class`] objects. Every hierarchy fact a
//! consumer can ask for (superclass, interface closure, inherited methods
//! and fields, the array pseudo-hierarchy) is computed on first use and
//! cached for the rest of the run. Recoverable problems degrade to `None`
//! plus an entry in the [`warnings::WarningSink`]; only a missing declared
//! superclass and call-boundary precondition violations raise.

pub mod config;
pub mod consts;
pub mod descriptor;
pub mod error;
pub mod ids;
pub mod input;
pub mod loader;
pub mod model;
pub mod testing;
pub mod warnings;

pub use config::{IgnoreSet, LoaderSpec, Scope};
pub use error::{HierarchyError, Result};
pub use ids::{LoaderId, Selector, TypeRef};
pub use loader::{ArrayRegistry, ClassLoader, LoaderArgs, LoaderCtor, LoaderFactory, SourceRef};
pub use model::{ArrayComponent, Class, Field, Method};
pub use warnings::{Warning, WarningSink};
