use std::sync::Arc;

use classmodel::testing::{FakeModule, StubClass, StubReaderFactory};
use classmodel::{
    ArrayComponent, ClassLoader, HierarchyError, LoaderFactory, LoaderId, LoaderSpec, Scope,
    Selector, Warning, WarningSink,
};

fn platform_module(readers: &mut StubReaderFactory) -> FakeModule {
    readers.define(StubClass::new("java/lang/Object").with_method("toString", "()Ljava/lang/String;"));
    readers.define(StubClass::interface("java/lang/Cloneable"));
    readers.define(StubClass::interface("java/io/Serializable"));
    readers.define(StubClass::new("java/lang/String").with_field("hash", "I"));
    FakeModule::new("platform")
        .with_class("java/lang/Object.class", "java/lang/Object")
        .with_class("java/lang/Cloneable.class", "java/lang/Cloneable")
        .with_class("java/io/Serializable.class", "java/io/Serializable")
        .with_class("java/lang/String.class", "java/lang/String")
}

fn chain(
    readers: StubReaderFactory,
    platform: FakeModule,
    application: FakeModule,
) -> (LoaderFactory, WarningSink) {
    let warnings = WarningSink::new();
    let scope = Scope::new(Arc::new(readers))
        .with_loader(LoaderSpec {
            id: LoaderId::new("platform"),
            parent: None,
            implementation: None,
            modules: vec![platform.boxed()],
        })
        .with_loader(LoaderSpec {
            id: LoaderId::new("application"),
            parent: Some(LoaderId::new("platform")),
            implementation: None,
            modules: vec![application.boxed()],
        });
    (LoaderFactory::new(scope, warnings.clone()), warnings)
}

fn application_loader(factory: &LoaderFactory) -> Arc<ClassLoader> {
    factory.get_loader(&LoaderId::new("application")).unwrap()
}

fn selector(name: &str, descriptor: &str) -> Selector {
    Selector::parse(name, descriptor).unwrap()
}

#[test]
fn lookups_are_canonical() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("app/Main"));
    let application = FakeModule::new("application").with_class("app/Main.class", "app/Main");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);

    let first = loader.lookup_class("app/Main").unwrap();
    let second = loader.lookup_class("app/Main").unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // factory memoizes the loader itself too
    let again = application_loader(&factory);
    assert!(Arc::ptr_eq(&loader, &again));
}

#[test]
fn parent_definitions_shadow_child_definitions() {
    let mut readers = StubReaderFactory::new();
    readers.define(StubClass::new("dup/Widget").with_field("fromPlatform", "I"));
    readers.define_as(
        "dup/Widget#app",
        StubClass::new("dup/Widget").with_field("fromApp", "I"),
    );
    let platform = platform_module(&mut readers).with_class("dup/Widget.class", "dup/Widget");
    let application =
        FakeModule::new("application").with_class("dup/Widget.class", "dup/Widget#app");
    let (factory, warnings) = chain(readers, platform, application);
    let loader = application_loader(&factory);

    let widget = loader.lookup_class("dup/Widget").unwrap();
    assert_eq!(widget.loader_id(), &LoaderId::new("platform"));
    assert_eq!(widget.instance_fields()[0].name().as_ref(), "fromPlatform");
    assert!(
        warnings
            .snapshot()
            .iter()
            .any(|w| matches!(w, Warning::MultipleImplementations { class, .. } if class.as_ref() == "dup/Widget"))
    );
}

#[test]
fn first_module_wins_across_nested_archives() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("lib/Thing").with_field("first", "I"));
    readers.define_as(
        "lib/Thing#shadowed",
        StubClass::new("lib/Thing").with_field("second", "I"),
    );
    let nested = FakeModule::new("inner").with_class("lib/Thing.class", "lib/Thing");
    let first = FakeModule::new("first").with_nested(nested);
    let second = FakeModule::new("second").with_class("lib/Thing.class", "lib/Thing#shadowed");

    let warnings = WarningSink::new();
    let scope = Scope::new(Arc::new(readers))
        .with_loader(LoaderSpec {
            id: LoaderId::new("platform"),
            parent: None,
            implementation: None,
            modules: vec![platform.boxed()],
        })
        .with_loader(LoaderSpec {
            id: LoaderId::new("application"),
            parent: Some(LoaderId::new("platform")),
            implementation: None,
            modules: vec![first.boxed(), second.boxed()],
        });
    let factory = LoaderFactory::new(scope, warnings.clone());
    let loader = application_loader(&factory);

    let thing = loader.lookup_class("lib/Thing").unwrap();
    assert_eq!(thing.instance_fields()[0].name().as_ref(), "first");
    // the shadowed entry was never ingested, so no duplicate warning either
    assert!(
        !warnings
            .snapshot()
            .iter()
            .any(|w| matches!(w, Warning::MultipleImplementations { .. }))
    );
}

#[test]
fn interface_closure_reaches_fixpoint_over_extends_chains() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::interface("app/C"));
    readers.define(StubClass::interface("app/B").with_interface("app/C"));
    readers.define(StubClass::interface("app/A").with_interface("app/B"));
    readers.define(StubClass::new("app/Impl").with_interface("app/A"));
    let application = FakeModule::new("application")
        .with_class("app/A.class", "app/A")
        .with_class("app/B.class", "app/B")
        .with_class("app/C.class", "app/C")
        .with_class("app/Impl.class", "app/Impl");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);

    let a = loader.lookup_class("app/A").unwrap();
    let closure: Vec<_> = a
        .all_interfaces()
        .unwrap()
        .iter()
        .map(|i| i.name().to_string())
        .collect();
    assert!(closure.contains(&"app/B".to_string()));
    assert!(closure.contains(&"app/C".to_string()));

    // idempotent across repeated calls
    let again = a.all_interfaces().unwrap();
    assert_eq!(again.len(), closure.len());

    // the closure is inherited down the class chain
    let implementor = loader.lookup_class("app/Impl").unwrap();
    let b = loader.lookup_class("app/B").unwrap();
    assert!(implementor.implements_interface(&b).unwrap());
}

#[test]
fn missing_method_is_negative_cached() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("app/Base").with_method("run", "()V"));
    readers.define(StubClass::new("app/Derived").with_super("app/Base"));
    let application = FakeModule::new("application")
        .with_class("app/Base.class", "app/Base")
        .with_class("app/Derived.class", "app/Derived");
    let readers = Arc::new(readers);
    let warnings = WarningSink::new();
    let scope = Scope::new(readers.clone())
        .with_loader(LoaderSpec {
            id: LoaderId::new("platform"),
            parent: None,
            implementation: None,
            modules: vec![platform.boxed()],
        })
        .with_loader(LoaderSpec {
            id: LoaderId::new("application"),
            parent: Some(LoaderId::new("platform")),
            implementation: None,
            modules: vec![application.boxed()],
        });
    let factory = LoaderFactory::new(scope, warnings);
    let loader = application_loader(&factory);
    let derived = loader.lookup_class("app/Derived").unwrap();

    let missing = selector("missing", "()V");
    assert!(derived.method(&missing).unwrap().is_none());
    assert!(derived.method(&missing).unwrap().is_none());
    // the ancestor walk decoded each method table exactly once
    assert_eq!(readers.method_decodes("app/Derived"), 1);
    assert_eq!(readers.method_decodes("app/Base"), 1);

    // while an inherited method resolves to the ancestor's declaration
    let run = selector("run", "()V");
    let resolved = derived.method(&run).unwrap().unwrap();
    assert_eq!(resolved.declared_in().name.as_ref(), "app/Base");
}

#[test]
fn constructors_and_initializers_never_inherit() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(
        StubClass::new("app/Base")
            .with_method("<init>", "(I)V")
            .with_static_method("<clinit>", "()V"),
    );
    readers.define(StubClass::new("app/Derived").with_super("app/Base"));
    let application = FakeModule::new("application")
        .with_class("app/Base.class", "app/Base")
        .with_class("app/Derived.class", "app/Derived");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);

    let base = loader.lookup_class("app/Base").unwrap();
    let derived = loader.lookup_class("app/Derived").unwrap();
    let ctor = selector("<init>", "(I)V");
    assert!(base.method(&ctor).unwrap().is_some());
    assert!(derived.method(&ctor).unwrap().is_none());
    assert!(base.class_initializer().is_some());
    assert!(derived.class_initializer().is_none());
}

#[test]
fn default_methods_resolve_from_the_interface_closure() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(
        StubClass::interface("app/WithDefault")
            .with_method("greet", "()V")
            .with_abstract_method("mustImplement", "()V"),
    );
    readers.define(StubClass::new("app/Impl").with_interface("app/WithDefault"));
    let application = FakeModule::new("application")
        .with_class("app/WithDefault.class", "app/WithDefault")
        .with_class("app/Impl.class", "app/Impl");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);

    let implementor = loader.lookup_class("app/Impl").unwrap();
    let greet = implementor.method(&selector("greet", "()V")).unwrap().unwrap();
    assert_eq!(greet.declared_in().name.as_ref(), "app/WithDefault");
    // abstract interface methods are not implementations
    assert!(
        implementor
            .method(&selector("mustImplement", "()V"))
            .unwrap()
            .is_none()
    );
}

#[test]
fn array_pseudo_hierarchy() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("app/Main"));
    let application = FakeModule::new("application").with_class("app/Main.class", "app/Main");
    let (factory, _) = chain(readers, platform, application);
    let application = application_loader(&factory);
    let platform = factory.get_loader(&LoaderId::new("platform")).unwrap();

    let object = platform.lookup_class("java/lang/Object").unwrap();

    // int[] extends Object, owned by the chain root
    let int_array = application.lookup_class("[I").unwrap();
    assert_eq!(int_array.loader_id(), &LoaderId::new("platform"));
    let int_array_super = int_array.superclass().unwrap().unwrap();
    assert!(Arc::ptr_eq(&int_array_super, &object));
    assert!(matches!(
        int_array.array_component(),
        Some(ArrayComponent::Primitive(_))
    ));

    // String[] extends Object[] extends Object
    let string_array = application.lookup_class("[Ljava/lang/String;").unwrap();
    let object_array = string_array.superclass().unwrap().unwrap();
    assert_eq!(object_array.name().as_ref(), "[Ljava/lang/Object;");
    let object_array_super = object_array.superclass().unwrap().unwrap();
    assert!(Arc::ptr_eq(&object_array_super, &object));

    // both namespaces resolve String to the same element, so the array
    // class is shared
    let via_platform = platform.lookup_class("[Ljava/lang/String;").unwrap();
    assert!(Arc::ptr_eq(&string_array, &via_platform));

    // arrays implement exactly the two marker interfaces
    let markers: Vec<_> = string_array
        .direct_interfaces()
        .iter()
        .map(|i| i.name().to_string())
        .collect();
    assert_eq!(markers.len(), 2);
    assert!(markers.contains(&"java/lang/Cloneable".to_string()));
    assert!(markers.contains(&"java/io/Serializable".to_string()));

    // multi-dimensional arrays peel one dimension at a time
    let matrix = application.lookup_class("[[Ljava/lang/String;").unwrap();
    let matrix_super = matrix.superclass().unwrap().unwrap();
    assert_eq!(matrix_super.name().as_ref(), "[[Ljava/lang/Object;");
}

#[test]
fn array_of_unresolvable_element_is_not_found() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    let application = FakeModule::new("application");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);
    assert!(loader.lookup_class("[Lno/such/Type;").is_none());
}

#[test]
fn ambiguous_field_requires_the_typed_overload() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(
        StubClass::new("app/Odd")
            .with_field("value", "I")
            .with_static_field("value", "J"),
    );
    let application = FakeModule::new("application").with_class("app/Odd.class", "app/Odd");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);
    let odd = loader.lookup_class("app/Odd").unwrap();

    assert!(matches!(
        odd.field("value"),
        Err(HierarchyError::AmbiguousField { .. })
    ));
    let int_field = odd
        .field_typed("value", &classmodel::descriptor::FieldType::Int)
        .unwrap()
        .unwrap();
    assert!(!int_field.is_static());
    let long_field = odd
        .field_typed("value", &classmodel::descriptor::FieldType::Long)
        .unwrap()
        .unwrap();
    assert!(long_field.is_static());
}

#[test]
fn fields_resolve_through_superclasses_and_interfaces() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::interface("app/Limits").with_static_field("MAX", "I"));
    readers.define(StubClass::new("app/Base").with_field("base", "I"));
    readers.define(
        StubClass::new("app/Derived")
            .with_super("app/Base")
            .with_interface("app/Limits"),
    );
    let application = FakeModule::new("application")
        .with_class("app/Limits.class", "app/Limits")
        .with_class("app/Base.class", "app/Base")
        .with_class("app/Derived.class", "app/Derived");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);
    let derived = loader.lookup_class("app/Derived").unwrap();

    let inherited = derived.field("base").unwrap().unwrap();
    assert_eq!(inherited.declared_in().name.as_ref(), "app/Base");
    // cached at the querying class: the second answer is the same object
    let cached = derived.field("base").unwrap().unwrap();
    assert!(Arc::ptr_eq(&inherited, &cached));

    let constant = derived.field("MAX").unwrap().unwrap();
    assert_eq!(constant.declared_in().name.as_ref(), "app/Limits");
    assert!(derived.field("absent").unwrap().is_none());
}

#[test]
fn unresolvable_interface_degrades_with_one_warning() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("app/Partial").with_interface("no/such/Interface"));
    let application = FakeModule::new("application").with_class("app/Partial.class", "app/Partial");
    let (factory, warnings) = chain(readers, platform, application);
    let loader = application_loader(&factory);
    let partial = loader.lookup_class("app/Partial").unwrap();

    assert!(partial.direct_interfaces().is_empty());
    assert!(partial.direct_interfaces().is_empty());
    let not_found = warnings
        .snapshot()
        .iter()
        .filter(|w| matches!(w, Warning::ClassNotFound { name, .. } if name.as_ref() == "no/such/Interface"))
        .count();
    assert_eq!(not_found, 1);
}

#[test]
fn non_interface_in_interface_list_is_dropped_with_warning() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("app/NotAnInterface"));
    readers.define(StubClass::new("app/Confused").with_interface("app/NotAnInterface"));
    let application = FakeModule::new("application")
        .with_class("app/NotAnInterface.class", "app/NotAnInterface")
        .with_class("app/Confused.class", "app/Confused");
    let (factory, warnings) = chain(readers, platform, application);
    let loader = application_loader(&factory);
    let confused = loader.lookup_class("app/Confused").unwrap();

    assert!(confused.all_interfaces().unwrap().is_empty());
    assert!(
        warnings
            .snapshot()
            .iter()
            .any(|w| matches!(w, Warning::NotAnInterface { name, .. } if name.as_ref() == "app/NotAnInterface"))
    );
}

#[test]
fn missing_superclass_is_fatal_but_contained() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(
        StubClass::new("app/Orphan")
            .with_super("no/such/Base")
            .with_field("kept", "I"),
    );
    let application = FakeModule::new("application").with_class("app/Orphan.class", "app/Orphan");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);
    let orphan = loader.lookup_class("app/Orphan").unwrap();

    assert!(matches!(
        orphan.superclass(),
        Err(HierarchyError::MissingSuperclass { super_name, .. }) if super_name.as_ref() == "no/such/Base"
    ));
    // already-ingested facts stay queryable
    assert_eq!(orphan.instance_fields()[0].name().as_ref(), "kept");
    assert!(orphan.declared_method(&selector("nope", "()V")).is_none());
}

#[test]
fn unreadable_method_table_means_no_declared_methods() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("app/Base").with_method("run", "()V"));
    readers.define(
        StubClass::new("app/Broken")
            .with_super("app/Base")
            .with_method("own", "()V")
            .with_broken_method_table(),
    );
    let application = FakeModule::new("application")
        .with_class("app/Base.class", "app/Base")
        .with_class("app/Broken.class", "app/Broken");
    let (factory, warnings) = chain(readers, platform, application);
    let loader = application_loader(&factory);
    let broken = loader.lookup_class("app/Broken").unwrap();

    assert!(broken.declared_methods().is_empty());
    assert!(
        warnings
            .snapshot()
            .iter()
            .any(|w| matches!(w, Warning::MethodTableUnreadable { class, .. } if class.as_ref() == "app/Broken"))
    );
    // inheritance still works past the broken table
    let run = broken.method(&selector("run", "()V")).unwrap().unwrap();
    assert_eq!(run.declared_in().name.as_ref(), "app/Base");
}

#[test]
fn malformed_and_mismatched_entries_are_skipped() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("app/Good"));
    readers.define_as("app/Mismatch", StubClass::new("app/SomethingElse"));
    readers.define_invalid("app/Bad");
    let application = FakeModule::new("application")
        .with_class("app/Good.class", "app/Good")
        .with_class("app/Mismatch.class", "app/Mismatch")
        .with_class("app/Bad.class", "app/Bad")
        .with_unreadable_class("app/Unreadable.class");
    let (factory, warnings) = chain(readers, platform, application);
    let loader = application_loader(&factory);

    assert!(loader.lookup_class("app/Good").is_some());
    assert!(loader.lookup_class("app/SomethingElse").is_none());
    assert!(loader.lookup_class("app/Mismatch").is_none());
    assert!(loader.lookup_class("app/Bad").is_none());

    let snapshot = warnings.snapshot();
    assert!(
        snapshot
            .iter()
            .any(|w| matches!(w, Warning::NameMismatch { declared, .. } if declared.as_ref() == "app/SomethingElse"))
    );
    let invalid = snapshot
        .iter()
        .filter(|w| matches!(w, Warning::InvalidClassFile { .. }))
        .count();
    assert_eq!(invalid, 2);
}

#[test]
fn ignored_classes_are_skipped_silently() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("sun/internal/Secret"));
    readers.define(StubClass::new("app/Visible"));
    let application = FakeModule::new("application")
        .with_class("sun/internal/Secret.class", "sun/internal/Secret")
        .with_class("app/Visible.class", "app/Visible");

    let warnings = WarningSink::new();
    let scope = Scope::new(Arc::new(readers))
        .with_ignored_prefix("sun/")
        .with_loader(LoaderSpec {
            id: LoaderId::new("platform"),
            parent: None,
            implementation: None,
            modules: vec![platform.boxed()],
        })
        .with_loader(LoaderSpec {
            id: LoaderId::new("application"),
            parent: Some(LoaderId::new("platform")),
            implementation: None,
            modules: vec![application.boxed()],
        });
    let factory = LoaderFactory::new(scope, warnings.clone());
    let loader = application_loader(&factory);

    assert!(loader.lookup_class("app/Visible").is_some());
    assert!(loader.lookup_class("sun/internal/Secret").is_none());
    assert!(warnings.is_empty());
}

#[test]
fn eviction_clears_class_and_source_maps() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("app/Gone"));
    readers.define(StubClass::new("app/Kept"));
    let application = FakeModule::new("application")
        .with_class("app/Gone.class", "app/Gone")
        .with_class("app/Kept.class", "app/Kept")
        .with_source("app/Gone.java")
        .with_source("app/Kept.java");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);

    let gone = loader.lookup_class("app/Gone").unwrap();
    assert!(loader.source_of("app/Gone").is_some());

    loader.remove_all(&[gone]);
    assert!(loader.lookup_class("app/Gone").is_none());
    assert!(loader.source_of("app/Gone").is_none());
    assert!(loader.lookup_class("app/Kept").is_some());
    assert!(loader.source_of("app/Kept").is_some());
}

#[test]
fn init_is_one_shot() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    let application = FakeModule::new("application");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);

    assert!(matches!(
        loader.init(&[]),
        Err(HierarchyError::LoaderState { .. })
    ));
}

#[test]
fn unknown_loader_id_is_a_precondition_failure() {
    let readers = StubReaderFactory::new();
    let scope = Scope::new(Arc::new(readers));
    let factory = LoaderFactory::new(scope, WarningSink::new());
    assert!(matches!(
        factory.get_loader(&LoaderId::new("nowhere")),
        Err(HierarchyError::UnknownLoader { .. })
    ));
}

#[test]
fn unregistered_loader_implementation_falls_back_to_default() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("app/Main"));
    let application = FakeModule::new("application").with_class("app/Main.class", "app/Main");

    let warnings = WarningSink::new();
    let scope = Scope::new(Arc::new(readers))
        .with_loader(LoaderSpec {
            id: LoaderId::new("platform"),
            parent: None,
            implementation: None,
            modules: vec![platform.boxed()],
        })
        .with_loader(LoaderSpec {
            id: LoaderId::new("application"),
            parent: Some(LoaderId::new("platform")),
            implementation: Some("exotic".to_string()),
            modules: vec![application.boxed()],
        });
    let factory = LoaderFactory::new(scope, warnings.clone());

    // construction still succeeds, with a warning, and the loader works
    let loader = application_loader(&factory);
    assert!(loader.lookup_class("app/Main").is_some());
    assert!(
        warnings
            .snapshot()
            .iter()
            .any(|w| matches!(w, Warning::LoaderConstruction { implementation, .. } if implementation == "exotic"))
    );
}

#[test]
fn failing_registered_constructor_falls_back_too() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    let warnings = WarningSink::new();
    let scope = Scope::new(Arc::new(readers)).with_loader(LoaderSpec {
        id: LoaderId::new("platform"),
        parent: None,
        implementation: Some("flaky".to_string()),
        modules: vec![platform.boxed()],
    });
    let mut factory = LoaderFactory::new(scope, warnings.clone());
    factory.register_implementation(
        "flaky",
        Arc::new(|_args| Err("constructor exploded".to_string())),
    );

    let loader = factory.get_loader(&LoaderId::new("platform")).unwrap();
    assert!(loader.lookup_class("java/lang/Object").is_some());
    assert!(
        warnings
            .snapshot()
            .iter()
            .any(|w| matches!(w, Warning::LoaderConstruction { detail, .. } if detail.contains("exploded")))
    );
}

#[test]
fn subclass_and_interface_queries() {
    let mut readers = StubReaderFactory::new();
    let platform = platform_module(&mut readers);
    readers.define(StubClass::new("app/Base"));
    readers.define(StubClass::new("app/Derived").with_super("app/Base"));
    let application = FakeModule::new("application")
        .with_class("app/Base.class", "app/Base")
        .with_class("app/Derived.class", "app/Derived");
    let (factory, _) = chain(readers, platform, application);
    let loader = application_loader(&factory);

    let object = loader.lookup_class("java/lang/Object").unwrap();
    let base = loader.lookup_class("app/Base").unwrap();
    let derived = loader.lookup_class("app/Derived").unwrap();
    assert!(derived.is_subclass_of(&base).unwrap());
    assert!(derived.is_subclass_of(&object).unwrap());
    assert!(!base.is_subclass_of(&derived).unwrap());

    let source = loader.source_of("app/Base");
    assert!(source.is_none());
}
