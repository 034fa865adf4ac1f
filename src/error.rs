use std::fmt;
use std::sync::Arc;

use crate::ids::LoaderId;

pub type Result<T> = std::result::Result<T, HierarchyError>;

/// The few conditions that propagate to the caller instead of degrading to
/// `None` plus a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// A class's explicitly-declared superclass cannot be resolved anywhere
    /// in the loader chain. Fatal: a broken superclass chain poisons every
    /// other closure on the class.
    MissingSuperclass {
        class: Arc<str>,
        super_name: Arc<str>,
    },
    /// A simple-name field query matched several declared fields; the typed
    /// overload disambiguates.
    AmbiguousField { class: Arc<str>, field: Arc<str> },
    /// A loader lifecycle precondition was violated, e.g. `init` twice.
    LoaderState { loader: LoaderId, detail: &'static str },
    /// The scope configuration is missing a required loader definition.
    UnknownLoader { loader: LoaderId },
}

impl fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HierarchyError::MissingSuperclass { class, super_name } => {
                write!(f, "superclass {super_name} of {class} cannot be resolved")
            }
            HierarchyError::AmbiguousField { class, field } => write!(
                f,
                "field name {field} is ambiguous on {class}; query with a declared type"
            ),
            HierarchyError::LoaderState { loader, detail } => {
                write!(f, "loader {loader}: {detail}")
            }
            HierarchyError::UnknownLoader { loader } => {
                write!(f, "no loader definition for {loader}")
            }
        }
    }
}

impl std::error::Error for HierarchyError {}
