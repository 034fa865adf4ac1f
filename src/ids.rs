use std::fmt;
use std::sync::Arc;

use crate::descriptor::MethodDescriptor;

/// Opaque key naming one point in the loader delegation chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoaderId(Arc<str>);

impl LoaderId {
    pub fn new(id: impl AsRef<str>) -> Self {
        LoaderId(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LoaderId {
    fn from(id: &str) -> Self {
        LoaderId::new(id)
    }
}

/// Canonical identity of a class: its internal name qualified by the loader
/// expected to define it. Two classes with the same name under different
/// loaders are distinct types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub loader: LoaderId,
    pub name: Arc<str>,
}

impl TypeRef {
    pub fn new(loader: LoaderId, name: impl Into<Arc<str>>) -> Self {
        TypeRef {
            loader,
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.loader, self.name)
    }
}

/// Method lookup key: simple name plus parsed descriptor. Descriptors
/// distinguish overloads, so no ambiguity exists for methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub name: Arc<str>,
    pub descriptor: MethodDescriptor,
}

impl Selector {
    pub fn new(name: impl Into<Arc<str>>, descriptor: MethodDescriptor) -> Self {
        Selector {
            name: name.into(),
            descriptor,
        }
    }

    /// Parse a selector from a raw `(name, descriptor-string)` pair.
    pub fn parse(name: impl Into<Arc<str>>, descriptor: &str) -> Option<Self> {
        let (_, descriptor) = crate::descriptor::parse_method_descriptor(descriptor).ok()?;
        Some(Selector {
            name: name.into(),
            descriptor,
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for parameter in &self.descriptor.parameters {
            f.write_str(&parameter.to_descriptor())?;
        }
        write!(f, ")")
    }
}
