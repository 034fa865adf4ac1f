use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::consts::{CLASS_INITIALIZER_NAME, CONSTRUCTOR_NAME, FieldAccessFlag, MethodAccessFlag};
use crate::descriptor::{FieldType, parse_field_descriptor};
use crate::ids::{Selector, TypeRef};
use crate::input::RawField;

/// One declared field. Identity is (declaring class, name, type); the
/// declaring class is carried as a lookup key, never as a back-pointer.
#[derive(Debug, Clone)]
pub struct Field {
    declared_in: TypeRef,
    name: Arc<str>,
    field_type: FieldType,
    access_flags: FieldAccessFlag,
}

impl Field {
    /// Decode a raw field-table row. `None` when the descriptor is
    /// malformed, which callers treat as an unreadable class file.
    pub fn from_raw(declared_in: TypeRef, raw: &RawField) -> Option<Field> {
        let (_, descriptor) = parse_field_descriptor(&raw.descriptor).ok()?;
        Some(Field {
            declared_in,
            name: Arc::clone(&raw.name),
            field_type: descriptor.0,
            access_flags: raw.access_flags,
        })
    }

    pub fn declared_in(&self) -> &TypeRef {
        &self.declared_in
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn access_flags(&self) -> FieldAccessFlag {
        self.access_flags
    }

    pub fn is_static(&self) -> bool {
        self.access_flags.contains(FieldAccessFlag::STATIC)
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.declared_in == other.declared_in
            && self.name == other.name
            && self.field_type == other.field_type
    }
}

impl Eq for Field {}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declared_in.hash(state);
        self.name.hash(state);
        self.field_type.hash(state);
    }
}

/// One declared method. Identity is (declaring class, selector).
#[derive(Debug, Clone)]
pub struct Method {
    declared_in: TypeRef,
    selector: Selector,
    access_flags: MethodAccessFlag,
}

impl Method {
    pub fn new(declared_in: TypeRef, selector: Selector, access_flags: MethodAccessFlag) -> Method {
        Method {
            declared_in,
            selector,
            access_flags,
        }
    }

    pub fn declared_in(&self) -> &TypeRef {
        &self.declared_in
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn name(&self) -> &Arc<str> {
        &self.selector.name
    }

    pub fn access_flags(&self) -> MethodAccessFlag {
        self.access_flags
    }

    pub fn is_static(&self) -> bool {
        self.access_flags.contains(MethodAccessFlag::STATIC)
    }

    pub fn is_abstract(&self) -> bool {
        self.access_flags.contains(MethodAccessFlag::ABSTRACT)
    }

    pub fn is_constructor(&self) -> bool {
        &*self.selector.name == CONSTRUCTOR_NAME
    }

    pub fn is_class_initializer(&self) -> bool {
        &*self.selector.name == CLASS_INITIALIZER_NAME
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.declared_in == other.declared_in && self.selector == other.selector
    }
}

impl Eq for Method {}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declared_in.hash(state);
        self.selector.hash(state);
    }
}
