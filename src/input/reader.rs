use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::consts::{ClassAccessFlag, FieldAccessFlag, MethodAccessFlag};

/// Undecoded field-table row, exactly as the binary reader exposes it.
#[derive(Debug, Clone)]
pub struct RawField {
    pub access_flags: FieldAccessFlag,
    pub name: Arc<str>,
    pub descriptor: Arc<str>,
}

/// Undecoded method-table row.
#[derive(Debug, Clone)]
pub struct RawMethod {
    pub access_flags: MethodAccessFlag,
    pub name: Arc<str>,
    pub descriptor: Arc<str>,
}

/// Decoded view of one binary class. The header accessors are cheap and may
/// be called repeatedly; `fields`/`methods` re-derive their tables on every
/// call, so callers cache at their own discretion.
pub trait ClassReader: Debug + Send + Sync {
    /// The binary-declared internal name, not the entry's file name.
    fn class_name(&self) -> Arc<str>;
    fn access_flags(&self) -> ClassAccessFlag;
    /// `None` only for the root type.
    fn super_name(&self) -> Option<Arc<str>>;
    fn interface_names(&self) -> Vec<Arc<str>>;
    fn fields(&self) -> Result<Vec<RawField>, ReadError>;
    fn methods(&self) -> Result<Vec<RawMethod>, ReadError>;
}

/// Entry point of the binary-reader collaborator: bytes in, reader out.
pub trait ClassReaderFactory: Send + Sync {
    fn read(&self, bytes: &[u8]) -> Result<Box<dyn ClassReader>, ReadError>;
}

/// A malformed or truncated binary entry. Always recoverable at the engine
/// level: the entry (or the method table) is skipped with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    detail: String,
}

impl ReadError {
    pub fn new(detail: impl Into<String>) -> Self {
        ReadError {
            detail: detail.into(),
        }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid class file: {}", self.detail)
    }
}

impl std::error::Error for ReadError {}
