use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::ids::LoaderId;

/// Every recoverable condition the engine absorbs instead of raising.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A class name resolved both in this loader's modules and somewhere
    /// earlier in the chain (or twice in the same loader); first wins.
    MultipleImplementations {
        loader: LoaderId,
        class: Arc<str>,
        entry: Arc<str>,
    },
    /// A class-format entry could not be decoded; it was skipped.
    InvalidClassFile {
        loader: LoaderId,
        entry: Arc<str>,
        detail: String,
    },
    /// The binary-declared name disagrees with the name the entry path
    /// implies; the entry was skipped.
    NameMismatch {
        loader: LoaderId,
        entry: Arc<str>,
        declared: Arc<str>,
    },
    /// A referenced class (interface, field type, array element) could not
    /// be resolved anywhere in the chain.
    ClassNotFound {
        name: Arc<str>,
        referenced_by: Arc<str>,
    },
    /// A declared "interface" resolved to a non-interface class and was
    /// dropped from the closure.
    NotAnInterface { name: Arc<str>, on: Arc<str> },
    /// The method table of a class could not be decoded; the class is
    /// treated as having no declared methods.
    MethodTableUnreadable { class: Arc<str>, detail: String },
    /// A configured loader implementation could not be constructed; the
    /// default implementation was used instead.
    LoaderConstruction {
        loader: LoaderId,
        implementation: String,
        detail: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MultipleImplementations {
                loader,
                class,
                entry,
            } => write!(
                f,
                "multiple implementations of {class} (loader {loader}, ignored entry {entry})"
            ),
            Warning::InvalidClassFile {
                loader,
                entry,
                detail,
            } => write!(f, "invalid class file {entry} in loader {loader}: {detail}"),
            Warning::NameMismatch {
                loader,
                entry,
                declared,
            } => write!(
                f,
                "entry {entry} in loader {loader} declares mismatching class name {declared}"
            ),
            Warning::ClassNotFound {
                name,
                referenced_by,
            } => write!(f, "class {name} referenced by {referenced_by} not found"),
            Warning::NotAnInterface { name, on } => {
                write!(f, "{name} declared as interface of {on} is not an interface")
            }
            Warning::MethodTableUnreadable { class, detail } => {
                write!(f, "cannot decode method table of {class}: {detail}")
            }
            Warning::LoaderConstruction {
                loader,
                implementation,
                detail,
            } => write!(
                f,
                "cannot construct loader {loader} as {implementation}, using default: {detail}"
            ),
        }
    }
}

/// Shared collector threaded through every public entry point. Clones share
/// the same buffer, so one sink observes a whole loader chain.
#[derive(Debug, Clone, Default)]
pub struct WarningSink {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl WarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.lock().push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.lock().len()
    }

    /// Copy of everything reported so far.
    pub fn snapshot(&self) -> Vec<Warning> {
        self.warnings.lock().clone()
    }

    /// Take and clear the buffer, e.g. at the end of an analysis phase.
    pub fn drain(&self) -> Vec<Warning> {
        std::mem::take(&mut *self.warnings.lock())
    }
}
