use std::sync::Arc;

use dashmap::DashMap;

use crate::descriptor::{FieldDescriptor, FieldType, parse_field_descriptor};
use crate::ids::TypeRef;
use crate::loader::ClassLoader;
use crate::model::{ArrayComponent, Class};
use crate::warnings::WarningSink;

/// The pseudo-loader for array types. Array classes live in their own
/// registry, keyed by loader-qualified type reference, independent of any
/// per-loader namespace; the registry grows monotonically for the run and
/// is never invalidated.
#[derive(Debug)]
pub struct ArrayRegistry {
    classes: DashMap<TypeRef, Arc<Class>>,
    warnings: WarningSink,
}

impl ArrayRegistry {
    pub fn new(warnings: WarningSink) -> ArrayRegistry {
        ArrayRegistry {
            classes: DashMap::new(),
            warnings,
        }
    }

    /// Resolve an array type name (`[I`, `[Ljava/lang/String;`, `[[...`)
    /// on behalf of `requesting`. `None` means the element class could not
    /// be resolved; callers treat that as "class not found".
    pub fn resolve(&self, name: &str, requesting: &ClassLoader) -> Option<Arc<Class>> {
        let (_, FieldDescriptor(field_type)) = parse_field_descriptor(name).ok()?;
        let FieldType::Array(component) = field_type else {
            return None;
        };
        match *component {
            FieldType::Object(element_name) => {
                let element = requesting.lookup_class(&element_name)?;
                let class = self.canonicalize_reference(&element)?;
                self.register_requested(name, requesting, &class);
                Some(class)
            }
            FieldType::Array(_) => {
                // peel one dimension: the component is an array class itself
                let component_class = self.resolve(&component.to_descriptor(), requesting)?;
                let class = self.canonicalize_reference(&component_class)?;
                self.register_requested(name, requesting, &class);
                Some(class)
            }
            primitive => Some(self.canonicalize_primitive(primitive, requesting, name)),
        }
    }

    /// Reference-element arrays are keyed by the element class's own
    /// loader and name: two namespaces that resolve the same element name
    /// to different classes must get distinct array classes.
    fn canonicalize_reference(&self, element: &Arc<Class>) -> Option<Arc<Class>> {
        let owner = element.loader()?;
        let key = TypeRef::new(owner.id().clone(), element.array_type_name());
        let class = self.classes.entry(key.clone()).or_insert_with(|| {
            Arc::new(Class::array(
                key,
                owner.weak_handle(),
                ArrayComponent::Reference(Arc::clone(element)),
                self.warnings.clone(),
            ))
        });
        Some(Arc::clone(class.value()))
    }

    /// Primitive-element arrays belong to the root of the requesting
    /// chain, never to an intermediate loader.
    fn canonicalize_primitive(
        &self,
        element: FieldType,
        requesting: &ClassLoader,
        name: &str,
    ) -> Arc<Class> {
        let root = requesting.root();
        let key = TypeRef::new(root.id().clone(), name);
        let class = self.classes.entry(key.clone()).or_insert_with(|| {
            Arc::new(Class::array(
                key,
                root.weak_handle(),
                ArrayComponent::Primitive(element),
                self.warnings.clone(),
            ))
        });
        Arc::clone(class.value())
    }

    // Re-register under the originally requested reference so repeated
    // lookups through either namespace hit the cache.
    fn register_requested(&self, name: &str, requesting: &ClassLoader, class: &Arc<Class>) {
        let requested = TypeRef::new(requesting.id().clone(), name);
        self.classes
            .entry(requested)
            .or_insert_with(|| Arc::clone(class));
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
