use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use once_cell::sync::OnceCell;

use crate::consts::{
    ARRAY_INTERFACES, CLASS_INITIALIZER_NAME, CONSTRUCTOR_NAME, ClassAccessFlag, ROOT_CLASS_NAME,
};
use crate::descriptor::{FieldType, MethodDescriptor};
use crate::error::{HierarchyError, Result};
use crate::ids::{LoaderId, Selector, TypeRef};
use crate::input::{ClassReader, ReadError};
use crate::loader::ClassLoader;
use crate::model::{Field, Method};
use crate::warnings::{Warning, WarningSink};

/// Component of an array class: either a primitive element type or the
/// class one dimension down (which may itself be an array class).
#[derive(Debug, Clone)]
pub enum ArrayComponent {
    Primitive(FieldType),
    Reference(Arc<Class>),
}

/// The canonical representation of one class. Exactly one instance exists
/// per (owning loader, type) pair for the lifetime of a run; consumers
/// compare by that identity.
///
/// The header, field tables and raw superclass/interface names are captured
/// eagerly at construction. Everything derived from other classes is
/// computed on first use and cached for the rest of the run: the first
/// caller that finds a cell empty computes inside an exclusive section,
/// every later caller reads the published value without synchronization.
#[derive(Debug)]
pub struct Class {
    type_ref: TypeRef,
    access_flags: ClassAccessFlag,
    loader: Weak<ClassLoader>,
    super_name: Option<Arc<str>>,
    interface_names: Vec<Arc<str>>,
    instance_fields: Vec<Arc<Field>>,
    static_fields: Vec<Arc<Field>>,
    // retained for the one-time lazy method-table decode; None for arrays
    reader: Option<Box<dyn ClassReader>>,
    array: Option<ArrayComponent>,
    warnings: WarningSink,

    super_class: OnceCell<Option<Arc<Class>>>,
    direct_interfaces: OnceCell<Vec<Arc<Class>>>,
    all_interfaces: OnceCell<Vec<Arc<Class>>>,
    declared_methods: OnceCell<HashMap<Selector, Arc<Method>>>,
    inherited_methods: DashMap<Selector, Option<Arc<Method>>>,
    field_cache: DashMap<Arc<str>, Arc<Field>>,
}

impl Class {
    /// Ingest a binary class into its eager shape. The reader's header and
    /// field table are consumed here, before the underlying bytes may be
    /// discarded; the method table stays undecoded until first queried.
    pub(crate) fn from_reader(
        owner: &ClassLoader,
        reader: Box<dyn ClassReader>,
    ) -> std::result::Result<Class, ReadError> {
        let name = reader.class_name();
        let type_ref = TypeRef::new(owner.id().clone(), Arc::clone(&name));

        let mut instance_fields = Vec::new();
        let mut static_fields = Vec::new();
        for raw in reader.fields()? {
            let field = Field::from_raw(type_ref.clone(), &raw).ok_or_else(|| {
                ReadError::new(format!(
                    "bad descriptor {} for field {}.{}",
                    raw.descriptor, name, raw.name
                ))
            })?;
            if field.is_static() {
                static_fields.push(Arc::new(field));
            } else {
                instance_fields.push(Arc::new(field));
            }
        }

        Ok(Class {
            access_flags: reader.access_flags(),
            loader: owner.weak_handle(),
            super_name: reader.super_name(),
            interface_names: reader.interface_names(),
            instance_fields,
            static_fields,
            reader: Some(reader),
            array: None,
            warnings: owner.warnings().clone(),
            type_ref,
            super_class: OnceCell::new(),
            direct_interfaces: OnceCell::new(),
            all_interfaces: OnceCell::new(),
            declared_methods: OnceCell::new(),
            inherited_methods: DashMap::new(),
            field_cache: DashMap::new(),
        })
    }

    /// Synthesize an array class. It declares no members of its own and
    /// implements the two fixed marker interfaces.
    pub(crate) fn array(
        type_ref: TypeRef,
        owner: Weak<ClassLoader>,
        component: ArrayComponent,
        warnings: WarningSink,
    ) -> Class {
        Class {
            access_flags: ClassAccessFlag::PUBLIC | ClassAccessFlag::FINAL | ClassAccessFlag::ABSTRACT,
            loader: owner,
            super_name: None,
            interface_names: ARRAY_INTERFACES.iter().map(|name| Arc::from(*name)).collect(),
            instance_fields: Vec::new(),
            static_fields: Vec::new(),
            reader: None,
            array: Some(component),
            warnings,
            type_ref,
            super_class: OnceCell::new(),
            direct_interfaces: OnceCell::new(),
            all_interfaces: OnceCell::new(),
            declared_methods: OnceCell::new(),
            inherited_methods: DashMap::new(),
            field_cache: DashMap::new(),
        }
    }

    pub fn name(&self) -> &Arc<str> {
        &self.type_ref.name
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn loader_id(&self) -> &LoaderId {
        &self.type_ref.loader
    }

    /// The owning loader, while it is still alive. Classes hold their
    /// loader weakly so an evicted loader graph is not pinned.
    pub fn loader(&self) -> Option<Arc<ClassLoader>> {
        self.loader.upgrade()
    }

    pub fn access_flags(&self) -> ClassAccessFlag {
        self.access_flags
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags.contains(ClassAccessFlag::INTERFACE)
    }

    pub fn is_abstract(&self) -> bool {
        self.access_flags.contains(ClassAccessFlag::ABSTRACT)
    }

    pub fn is_array(&self) -> bool {
        self.array.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.type_ref.name.as_ref() == ROOT_CLASS_NAME
    }

    pub fn array_component(&self) -> Option<&ArrayComponent> {
        self.array.as_ref()
    }

    /// Internal name of the array type with this class as element.
    pub fn array_type_name(&self) -> String {
        if self.is_array() {
            format!("[{}", self.type_ref.name)
        } else {
            format!("[L{};", self.type_ref.name)
        }
    }

    pub fn package_name(&self) -> &str {
        match self.type_ref.name.rsplit_once('/') {
            Some((package, _)) => package,
            None => "",
        }
    }

    pub fn instance_fields(&self) -> &[Arc<Field>] {
        &self.instance_fields
    }

    pub fn static_fields(&self) -> &[Arc<Field>] {
        &self.static_fields
    }

    fn lookup(&self, name: &str) -> Option<Arc<Class>> {
        self.loader.upgrade()?.lookup_class(name)
    }

    /// Resolved superclass, or `None` only for the root type.
    ///
    /// A declared superclass that resolves nowhere in the chain is the one
    /// fatal lookup in the engine: every other closure assumes a complete
    /// superclass chain. The failure is not cached, so a later call
    /// re-attempts; everything already computed on this class stays valid.
    pub fn superclass(&self) -> Result<Option<Arc<Class>>> {
        self.super_class
            .get_or_try_init(|| self.resolve_superclass())
            .map(Clone::clone)
    }

    fn resolve_superclass(&self) -> Result<Option<Arc<Class>>> {
        if let Some(component) = &self.array {
            return self.resolve_array_superclass(component).map(Some);
        }
        if self.is_root() {
            return Ok(None);
        }
        // a missing superclass entry means the root type
        let super_name = match &self.super_name {
            Some(name) => Arc::clone(name),
            None => Arc::from(ROOT_CLASS_NAME),
        };
        match self.lookup(&super_name) {
            Some(class) => Ok(Some(class)),
            None => Err(HierarchyError::MissingSuperclass {
                class: Arc::clone(self.name()),
                super_name,
            }),
        }
    }

    // int[] extends Object; String[] extends Object[]; Object[] extends Object.
    fn resolve_array_superclass(&self, component: &ArrayComponent) -> Result<Arc<Class>> {
        let super_name: Arc<str> = match component {
            ArrayComponent::Primitive(_) => Arc::from(ROOT_CLASS_NAME),
            ArrayComponent::Reference(element) => match element.superclass()? {
                Some(element_super) => Arc::from(element_super.array_type_name()),
                None => Arc::from(ROOT_CLASS_NAME),
            },
        };
        match self.lookup(&super_name) {
            Some(class) => Ok(class),
            None => Err(HierarchyError::MissingSuperclass {
                class: Arc::clone(self.name()),
                super_name,
            }),
        }
    }

    /// Directly declared interfaces. Names that resolve nowhere are dropped
    /// with a warning; interface resolution degrades, it does not abort.
    pub fn direct_interfaces(&self) -> &[Arc<Class>] {
        self.direct_interfaces.get_or_init(|| {
            self.interface_names
                .iter()
                .filter_map(|name| match self.lookup(name) {
                    Some(class) => Some(class),
                    None => {
                        self.warnings.report(Warning::ClassNotFound {
                            name: Arc::clone(name),
                            referenced_by: Arc::clone(self.name()),
                        });
                        None
                    }
                })
                .collect()
        })
    }

    /// Transitive closure of implemented/extended interfaces, including
    /// those inherited through the superclass chain.
    pub fn all_interfaces(&self) -> Result<&[Arc<Class>]> {
        let closure = self.all_interfaces.get_or_try_init(|| {
            let mut seen: HashSet<TypeRef> = HashSet::new();
            let mut closure: Vec<Arc<Class>> = Vec::new();
            let mut worklist: Vec<Arc<Class>> = Vec::new();

            for candidate in self.direct_interfaces() {
                admit_interface(candidate, self.name(), &self.warnings, &mut worklist);
            }
            // iterate to a fixpoint; the seen set keeps mutually-extending
            // interface graphs from looping
            while let Some(interface) = worklist.pop() {
                if !seen.insert(interface.type_ref().clone()) {
                    continue;
                }
                for extended in interface.direct_interfaces() {
                    admit_interface(extended, interface.name(), &self.warnings, &mut worklist);
                }
                closure.push(interface);
            }
            // interfaces are inherited down the class chain
            if let Some(super_class) = self.superclass()? {
                for interface in super_class.all_interfaces()? {
                    if seen.insert(interface.type_ref().clone()) {
                        closure.push(Arc::clone(interface));
                    }
                }
            }
            Ok(closure)
        })?;
        Ok(closure)
    }

    fn declared_method_map(&self) -> &HashMap<Selector, Arc<Method>> {
        self.declared_methods
            .get_or_init(|| match self.decode_method_table() {
                Ok(map) => map,
                Err(err) => {
                    self.warnings.report(Warning::MethodTableUnreadable {
                        class: Arc::clone(self.name()),
                        detail: err.detail().to_string(),
                    });
                    HashMap::new()
                }
            })
    }

    fn decode_method_table(&self) -> std::result::Result<HashMap<Selector, Arc<Method>>, ReadError> {
        let Some(reader) = &self.reader else {
            return Ok(HashMap::new());
        };
        let mut map = HashMap::new();
        for raw in reader.methods()? {
            let selector =
                Selector::parse(Arc::clone(&raw.name), &raw.descriptor).ok_or_else(|| {
                    ReadError::new(format!(
                        "bad descriptor {} for method {}.{}",
                        raw.descriptor,
                        self.name(),
                        raw.name
                    ))
                })?;
            if !map.contains_key(&selector) {
                let method = Arc::new(Method::new(
                    self.type_ref.clone(),
                    selector.clone(),
                    raw.access_flags,
                ));
                map.insert(selector, method);
            }
        }
        Ok(map)
    }

    pub fn declared_methods(&self) -> Vec<Arc<Method>> {
        self.declared_method_map().values().cloned().collect()
    }

    pub fn declared_method(&self, selector: &Selector) -> Option<Arc<Method>> {
        self.declared_method_map().get(selector).cloned()
    }

    /// Resolve a method the way binary compatibility does: declared methods
    /// first, then the superclass chain, then a default implementation from
    /// the interface closure. Inherited resolutions, including "known not
    /// to exist", are cached per selector.
    pub fn method(&self, selector: &Selector) -> Result<Option<Arc<Method>>> {
        if let Some(declared) = self.declared_method_map().get(selector) {
            return Ok(Some(Arc::clone(declared)));
        }
        if let Some(cached) = self.inherited_methods.get(selector) {
            // a cached None is a meaningful hit: the walk already failed once
            return Ok(cached.value().clone());
        }
        let resolved = self.resolve_inherited_method(selector)?;
        self.inherited_methods
            .entry(selector.clone())
            .or_insert_with(|| resolved.clone());
        Ok(resolved)
    }

    fn resolve_inherited_method(&self, selector: &Selector) -> Result<Option<Arc<Method>>> {
        // constructors and class initializers never inherit
        let name = selector.name.as_ref();
        if name == CONSTRUCTOR_NAME || name == CLASS_INITIALIZER_NAME {
            return Ok(None);
        }
        if let Some(super_class) = self.superclass()? {
            if let Some(method) = super_class.method(selector)? {
                return Ok(Some(method));
            }
        }
        // at most one default implementation exists; first match wins
        for interface in self.all_interfaces()? {
            if let Some(method) = interface.declared_method_map().get(selector) {
                if !method.is_abstract() && !method.is_static() {
                    return Ok(Some(Arc::clone(method)));
                }
            }
        }
        Ok(None)
    }

    pub fn class_initializer(&self) -> Option<Arc<Method>> {
        let selector = Selector::new(
            CLASS_INITIALIZER_NAME,
            MethodDescriptor {
                parameters: Vec::new(),
                return_type: None,
            },
        );
        self.declared_method(&selector)
    }

    /// Resolve a field by simple name. Two declared fields may legally
    /// share a name at the binary level; that query is ambiguous and must
    /// go through [`Class::field_typed`] instead. Ambiguous answers are
    /// caller-dependent and never cached.
    pub fn field(&self, name: &str) -> Result<Option<Arc<Field>>> {
        if let Some(cached) = self.field_cache.get(name) {
            return Ok(Some(Arc::clone(cached.value())));
        }
        let mut found = self.declared_field_by_name(name)?;
        if found.is_none() {
            if let Some(super_class) = self.superclass()? {
                found = super_class.field(name)?;
            }
        }
        if found.is_none() {
            // interface fields are implicit constants and inherit too
            for interface in self.all_interfaces()? {
                if let Some(field) = interface.declared_field_by_name(name)? {
                    found = Some(field);
                    break;
                }
            }
        }
        if let Some(field) = &found {
            self.field_cache
                .entry(Arc::from(name))
                .or_insert_with(|| Arc::clone(field));
        }
        Ok(found)
    }

    fn declared_field_by_name(&self, name: &str) -> Result<Option<Arc<Field>>> {
        let mut matches = self
            .instance_fields
            .iter()
            .chain(&self.static_fields)
            .filter(|field| field.name().as_ref() == name);
        let first = matches.next();
        if matches.next().is_some() {
            return Err(HierarchyError::AmbiguousField {
                class: Arc::clone(self.name()),
                field: Arc::from(name),
            });
        }
        Ok(first.map(Arc::clone))
    }

    /// Typed overload of [`Class::field`]: name plus declared type is
    /// unambiguous at the binary level.
    pub fn field_typed(&self, name: &str, field_type: &FieldType) -> Result<Option<Arc<Field>>> {
        if let Some(field) = self.declared_field_typed(name, field_type) {
            return Ok(Some(field));
        }
        if let Some(super_class) = self.superclass()? {
            if let Some(field) = super_class.field_typed(name, field_type)? {
                return Ok(Some(field));
            }
        }
        for interface in self.all_interfaces()? {
            if let Some(field) = interface.declared_field_typed(name, field_type) {
                return Ok(Some(field));
            }
        }
        Ok(None)
    }

    fn declared_field_typed(&self, name: &str, field_type: &FieldType) -> Option<Arc<Field>> {
        self.instance_fields
            .iter()
            .chain(&self.static_fields)
            .find(|field| field.name().as_ref() == name && field.field_type() == field_type)
            .map(Arc::clone)
    }

    /// Identity-based subtype walk up the superclass chain.
    pub fn is_subclass_of(&self, other: &Class) -> Result<bool> {
        if self.type_ref == *other.type_ref() {
            return Ok(true);
        }
        let mut current = self.superclass()?;
        while let Some(class) = current {
            if class.type_ref() == other.type_ref() {
                return Ok(true);
            }
            current = class.superclass()?;
        }
        Ok(false)
    }

    pub fn implements_interface(&self, interface: &Class) -> Result<bool> {
        Ok(self
            .all_interfaces()?
            .iter()
            .any(|implemented| implemented.type_ref() == interface.type_ref()))
    }
}

fn admit_interface(
    candidate: &Arc<Class>,
    declared_on: &Arc<str>,
    warnings: &WarningSink,
    worklist: &mut Vec<Arc<Class>>,
) {
    if candidate.is_interface() {
        worklist.push(Arc::clone(candidate));
    } else {
        warnings.report(Warning::NotAnInterface {
            name: Arc::clone(candidate.name()),
            on: Arc::clone(declared_on),
        });
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.type_ref == other.type_ref
    }
}

impl Eq for Class {}
