use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use once_cell::sync::OnceCell;

use crate::config::IgnoreSet;
use crate::error::{HierarchyError, Result};
use crate::ids::LoaderId;
use crate::input::{ClassReaderFactory, Module, ModuleEntry, entry_class_name};
use crate::loader::{ArrayRegistry, LoaderArgs};
use crate::model::Class;
use crate::warnings::{Warning, WarningSink};

/// Where a class's source entry was found during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub module: Arc<str>,
    pub entry: Arc<str>,
}

/// One namespace in the delegation chain. Populated exactly once by
/// [`ClassLoader::init`], queried many times, mutated afterwards only by
/// explicit eviction between analysis phases.
pub struct ClassLoader {
    id: LoaderId,
    parent: Option<Arc<ClassLoader>>,
    this: Weak<ClassLoader>,
    classes: DashMap<Arc<str>, Arc<Class>>,
    sources: DashMap<Arc<str>, SourceRef>,
    arrays: Arc<ArrayRegistry>,
    reader: Arc<dyn ClassReaderFactory>,
    ignored: IgnoreSet,
    warnings: WarningSink,
    initialized: OnceCell<()>,
}

impl ClassLoader {
    pub(crate) fn create(args: &LoaderArgs) -> Arc<ClassLoader> {
        Arc::new_cyclic(|this| ClassLoader {
            id: args.id.clone(),
            parent: args.parent.clone(),
            this: this.clone(),
            classes: DashMap::new(),
            sources: DashMap::new(),
            arrays: Arc::clone(&args.arrays),
            reader: Arc::clone(&args.reader),
            ignored: args.ignored.clone(),
            warnings: args.warnings.clone(),
            initialized: OnceCell::new(),
        })
    }

    pub fn id(&self) -> &LoaderId {
        &self.id
    }

    pub fn parent(&self) -> Option<&Arc<ClassLoader>> {
        self.parent.as_ref()
    }

    /// Topmost loader in this chain.
    pub fn root(&self) -> &ClassLoader {
        let mut current = self;
        while let Some(parent) = &current.parent {
            current = parent;
        }
        current
    }

    pub(crate) fn weak_handle(&self) -> Weak<ClassLoader> {
        self.this.clone()
    }

    pub(crate) fn warnings(&self) -> &WarningSink {
        &self.warnings
    }

    /// Scan the given search path, highest priority first, into this
    /// loader's namespace. Consumed exactly once; must complete before any
    /// lookup is issued against this loader.
    pub fn init(&self, modules: &[Box<dyn Module>]) -> Result<()> {
        if self.initialized.set(()).is_err() {
            return Err(HierarchyError::LoaderState {
                loader: self.id.clone(),
                detail: "init may only be called once",
            });
        }

        let mut seen = HashSet::new();
        let mut class_entries = Vec::new();
        let mut source_entries = Vec::new();
        for module in modules {
            collect_entries(&**module, &mut seen, &mut class_entries, &mut source_entries);
        }

        for entry in class_entries {
            self.ingest_class(&*entry);
        }
        for (module, entry) in source_entries {
            if let Some(name) = entry_class_name(entry.name()) {
                self.sources.entry(Arc::from(name)).or_insert_with(|| SourceRef {
                    module,
                    entry: Arc::from(entry.name()),
                });
            }
        }

        log::debug!(
            "loader {} initialized: {} classes, {} source entries",
            self.id,
            self.classes.len(),
            self.sources.len()
        );
        Ok(())
    }

    fn ingest_class(&self, entry: &dyn ModuleEntry) {
        let entry_name: Arc<str> = Arc::from(entry.name());
        let bytes = match entry.bytes() {
            Ok(bytes) => bytes,
            Err(err) => {
                self.warnings.report(Warning::InvalidClassFile {
                    loader: self.id.clone(),
                    entry: entry_name,
                    detail: err.to_string(),
                });
                return;
            }
        };
        let reader = match self.reader.read(&bytes) {
            Ok(reader) => reader,
            Err(err) => {
                self.warnings.report(Warning::InvalidClassFile {
                    loader: self.id.clone(),
                    entry: entry_name,
                    detail: err.detail().to_string(),
                });
                return;
            }
        };

        // the binary content names the class, not the entry path
        let name = reader.class_name();
        if self.ignored.matches(&name) {
            return;
        }
        if let Some(expected) = entry_class_name(entry.name()) {
            if expected != name.as_ref() {
                self.warnings.report(Warning::NameMismatch {
                    loader: self.id.clone(),
                    entry: entry_name,
                    declared: name,
                });
                return;
            }
        }
        if self.classes.contains_key(name.as_ref()) || self.parent_resolves(&name) {
            self.warnings.report(Warning::MultipleImplementations {
                loader: self.id.clone(),
                class: name,
                entry: entry_name,
            });
            return;
        }

        match Class::from_reader(self, reader) {
            Ok(class) => {
                self.classes.insert(name, Arc::new(class));
            }
            Err(err) => {
                self.warnings.report(Warning::InvalidClassFile {
                    loader: self.id.clone(),
                    entry: entry_name,
                    detail: err.detail().to_string(),
                });
            }
        }
    }

    fn parent_resolves(&self, name: &str) -> bool {
        self.parent
            .as_ref()
            .is_some_and(|parent| parent.lookup_class(name).is_some())
    }

    /// Resolve a name through the chain: arrays go to the pseudo-loader,
    /// everything else delegates parent-first so a more fundamental
    /// loader's classes always shadow this loader's. `None` means
    /// "unresolved", never an error.
    pub fn lookup_class(&self, name: &str) -> Option<Arc<Class>> {
        if name.starts_with('[') {
            return self.arrays.resolve(name, self);
        }
        if let Some(parent) = &self.parent {
            if let Some(class) = parent.lookup_class(name) {
                return Some(class);
            }
        }
        self.classes.get(name).map(|class| Arc::clone(class.value()))
    }

    /// Source entry recorded for a class name during the scan, if any.
    pub fn source_of(&self, name: &str) -> Option<SourceRef> {
        self.sources.get(name).map(|source| source.value().clone())
    }

    /// Evict classes from this namespace and the source map. Does not
    /// cascade: a surviving class that already resolved a reference to an
    /// evicted one keeps it, so eviction is only sound between analysis
    /// phases, before dependents have resolved into the evicted set.
    pub fn remove_all(&self, classes: &[Arc<Class>]) {
        for class in classes {
            let name = class.name();
            self.classes
                .remove_if(name.as_ref(), |_, existing| Arc::ptr_eq(existing, class));
            self.sources.remove(name.as_ref());
        }
    }

    /// Number of classes currently defined by this loader itself.
    pub fn defined_count(&self) -> usize {
        self.classes.len()
    }
}

fn collect_entries(
    module: &dyn Module,
    seen: &mut HashSet<String>,
    class_entries: &mut Vec<Box<dyn ModuleEntry>>,
    source_entries: &mut Vec<(Arc<str>, Box<dyn ModuleEntry>)>,
) {
    let module_name: Arc<str> = Arc::from(module.name());
    for entry in module.entries() {
        if entry.is_class() {
            // first-seen-wins: an earlier module on the search path
            // shadows later entries with the same implied name
            let key = entry_class_name(entry.name())
                .unwrap_or_else(|| entry.name())
                .to_string();
            if seen.insert(key) {
                class_entries.push(entry);
            }
        } else if entry.is_source() {
            source_entries.push((Arc::clone(&module_name), entry));
        } else if let Some(nested) = entry.as_module() {
            collect_entries(&*nested, seen, class_entries, source_entries);
        }
    }
}

impl fmt::Debug for ClassLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassLoader")
            .field("id", &self.id)
            .field("parent", &self.parent.as_ref().map(|parent| parent.id()))
            .field("classes", &self.classes.len())
            .finish()
    }
}
