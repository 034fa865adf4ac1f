use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{HierarchyError, Result};
use crate::ids::LoaderId;
use crate::input::{ClassReaderFactory, Module};

/// Class names excluded from ingestion, either exactly or by package
/// prefix (`com/sun/` style).
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    exact: HashSet<String>,
    prefixes: Vec<String>,
}

impl IgnoreSet {
    pub fn add_class(&mut self, name: impl Into<String>) {
        self.exact.insert(name.into());
    }

    pub fn add_prefix(&mut self, prefix: impl Into<String>) {
        self.prefixes.push(prefix.into());
    }

    pub fn matches(&self, name: &str) -> bool {
        self.exact.contains(name) || self.prefixes.iter().any(|prefix| name.starts_with(prefix))
    }
}

/// Description of one loader in the delegation chain.
pub struct LoaderSpec {
    pub id: LoaderId,
    pub parent: Option<LoaderId>,
    /// Name of a registered loader implementation; the default is used
    /// when absent (or when construction under this name fails).
    pub implementation: Option<String>,
    /// Search path for this loader, highest priority first.
    pub modules: Vec<Box<dyn Module>>,
}

struct ScopeEntry {
    parent: Option<LoaderId>,
    implementation: Option<String>,
    // consumed exactly once, by the loader's init
    modules: Mutex<Option<Vec<Box<dyn Module>>>>,
}

/// The whole analysis scope: every loader definition, the shared ignore
/// set, and the binary-reader collaborator.
pub struct Scope {
    entries: HashMap<LoaderId, ScopeEntry>,
    ignored: IgnoreSet,
    reader: Arc<dyn ClassReaderFactory>,
}

impl Scope {
    pub fn new(reader: Arc<dyn ClassReaderFactory>) -> Scope {
        Scope {
            entries: HashMap::new(),
            ignored: IgnoreSet::default(),
            reader,
        }
    }

    pub fn with_loader(mut self, spec: LoaderSpec) -> Scope {
        self.entries.insert(
            spec.id,
            ScopeEntry {
                parent: spec.parent,
                implementation: spec.implementation,
                modules: Mutex::new(Some(spec.modules)),
            },
        );
        self
    }

    pub fn with_ignored_class(mut self, name: impl Into<String>) -> Scope {
        self.ignored.add_class(name);
        self
    }

    pub fn with_ignored_prefix(mut self, prefix: impl Into<String>) -> Scope {
        self.ignored.add_prefix(prefix);
        self
    }

    pub fn ignored(&self) -> &IgnoreSet {
        &self.ignored
    }

    pub fn reader(&self) -> Arc<dyn ClassReaderFactory> {
        Arc::clone(&self.reader)
    }

    pub(crate) fn parent_of(&self, id: &LoaderId) -> Result<Option<LoaderId>> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| HierarchyError::UnknownLoader { loader: id.clone() })?;
        Ok(entry.parent.clone())
    }

    pub(crate) fn implementation_of(&self, id: &LoaderId) -> Option<&str> {
        self.entries.get(id)?.implementation.as_deref()
    }

    pub(crate) fn take_modules(&self, id: &LoaderId) -> Vec<Box<dyn Module>> {
        self.entries
            .get(id)
            .and_then(|entry| entry.modules.lock().take())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_set_matches_exact_and_prefix() {
        let mut ignored = IgnoreSet::default();
        ignored.add_class("a/B");
        ignored.add_prefix("com/sun/");
        assert!(ignored.matches("a/B"));
        assert!(ignored.matches("com/sun/Internal"));
        assert!(!ignored.matches("a/C"));
        assert!(!ignored.matches("org/com/sun/X"));
    }
}
