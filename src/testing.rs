//! In-memory fakes for the two collaborator boundaries, for use in unit
//! and integration tests. A "class file" here is just a UTF-8 key that the
//! stub reader factory maps back to a registered [`StubClass`].

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::consts::{ClassAccessFlag, FieldAccessFlag, MethodAccessFlag, ROOT_CLASS_NAME};
use crate::input::{
    ClassReader, ClassReaderFactory, Module, ModuleEntry, RawField, RawMethod, ReadError,
};

/// Bytes for a fake class entry referring to a registered stub.
pub fn class_bytes(key: &str) -> Vec<u8> {
    key.as_bytes().to_vec()
}

#[derive(Debug, Clone)]
pub struct FakeModule {
    name: Arc<str>,
    entries: Vec<FakeEntry>,
}

impl FakeModule {
    pub fn new(name: &str) -> FakeModule {
        FakeModule {
            name: Arc::from(name),
            entries: Vec::new(),
        }
    }

    /// A class entry at `path` whose bytes name the stub registered under
    /// `key` (usually the class name itself).
    pub fn with_class(mut self, path: &str, key: &str) -> FakeModule {
        self.entries.push(FakeEntry {
            name: Arc::from(path),
            kind: FakeEntryKind::Class(class_bytes(key)),
        });
        self
    }

    /// A class entry whose bytes cannot be produced at all.
    pub fn with_unreadable_class(mut self, path: &str) -> FakeModule {
        self.entries.push(FakeEntry {
            name: Arc::from(path),
            kind: FakeEntryKind::Unreadable,
        });
        self
    }

    pub fn with_source(mut self, path: &str) -> FakeModule {
        self.entries.push(FakeEntry {
            name: Arc::from(path),
            kind: FakeEntryKind::Source,
        });
        self
    }

    /// A nested-archive entry that yields a whole module of its own.
    pub fn with_nested(mut self, nested: FakeModule) -> FakeModule {
        let name = format!("{}.jar", nested.name);
        self.entries.push(FakeEntry {
            name: Arc::from(name.as_str()),
            kind: FakeEntryKind::Nested(nested),
        });
        self
    }

    pub fn boxed(self) -> Box<dyn Module> {
        Box::new(self)
    }
}

impl Module for FakeModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Vec<Box<dyn ModuleEntry>> {
        self.entries
            .iter()
            .cloned()
            .map(|entry| Box::new(entry) as Box<dyn ModuleEntry>)
            .collect()
    }
}

#[derive(Debug, Clone)]
enum FakeEntryKind {
    Class(Vec<u8>),
    Unreadable,
    Source,
    Nested(FakeModule),
}

#[derive(Debug, Clone)]
pub struct FakeEntry {
    name: Arc<str>,
    kind: FakeEntryKind,
}

impl ModuleEntry for FakeEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_class(&self) -> bool {
        matches!(self.kind, FakeEntryKind::Class(_) | FakeEntryKind::Unreadable)
    }

    fn is_source(&self) -> bool {
        matches!(self.kind, FakeEntryKind::Source)
    }

    fn bytes(&self) -> io::Result<Vec<u8>> {
        match &self.kind {
            FakeEntryKind::Class(bytes) => Ok(bytes.clone()),
            FakeEntryKind::Unreadable => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "entry cannot be read",
            )),
            FakeEntryKind::Source => Ok(Vec::new()),
            FakeEntryKind::Nested(_) => Ok(Vec::new()),
        }
    }

    fn as_module(&self) -> Option<Box<dyn Module>> {
        match &self.kind {
            FakeEntryKind::Nested(module) => Some(Box::new(module.clone())),
            _ => None,
        }
    }
}

/// Declarative description of one fake binary class.
#[derive(Debug, Clone)]
pub struct StubClass {
    pub name: Arc<str>,
    pub access_flags: ClassAccessFlag,
    pub super_name: Option<Arc<str>>,
    pub interfaces: Vec<Arc<str>>,
    pub fields: Vec<RawField>,
    pub methods: Vec<RawMethod>,
    pub method_table_broken: bool,
}

impl StubClass {
    pub fn new(name: &str) -> StubClass {
        let super_name = if name == ROOT_CLASS_NAME {
            None
        } else {
            Some(Arc::from(ROOT_CLASS_NAME))
        };
        StubClass {
            name: Arc::from(name),
            access_flags: ClassAccessFlag::PUBLIC,
            super_name,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            method_table_broken: false,
        }
    }

    pub fn interface(name: &str) -> StubClass {
        let mut stub = StubClass::new(name);
        stub.access_flags =
            ClassAccessFlag::PUBLIC | ClassAccessFlag::INTERFACE | ClassAccessFlag::ABSTRACT;
        stub
    }

    pub fn with_super(mut self, name: &str) -> StubClass {
        self.super_name = Some(Arc::from(name));
        self
    }

    pub fn without_super(mut self) -> StubClass {
        self.super_name = None;
        self
    }

    pub fn with_interface(mut self, name: &str) -> StubClass {
        self.interfaces.push(Arc::from(name));
        self
    }

    pub fn with_field(self, name: &str, descriptor: &str) -> StubClass {
        self.raw_field(name, descriptor, FieldAccessFlag::PUBLIC)
    }

    pub fn with_static_field(self, name: &str, descriptor: &str) -> StubClass {
        self.raw_field(name, descriptor, FieldAccessFlag::PUBLIC | FieldAccessFlag::STATIC)
    }

    fn raw_field(mut self, name: &str, descriptor: &str, access_flags: FieldAccessFlag) -> StubClass {
        self.fields.push(RawField {
            access_flags,
            name: Arc::from(name),
            descriptor: Arc::from(descriptor),
        });
        self
    }

    pub fn with_method(self, name: &str, descriptor: &str) -> StubClass {
        self.raw_method(name, descriptor, MethodAccessFlag::PUBLIC)
    }

    pub fn with_abstract_method(self, name: &str, descriptor: &str) -> StubClass {
        self.raw_method(
            name,
            descriptor,
            MethodAccessFlag::PUBLIC | MethodAccessFlag::ABSTRACT,
        )
    }

    pub fn with_static_method(self, name: &str, descriptor: &str) -> StubClass {
        self.raw_method(
            name,
            descriptor,
            MethodAccessFlag::PUBLIC | MethodAccessFlag::STATIC,
        )
    }

    fn raw_method(
        mut self,
        name: &str,
        descriptor: &str,
        access_flags: MethodAccessFlag,
    ) -> StubClass {
        self.methods.push(RawMethod {
            access_flags,
            name: Arc::from(name),
            descriptor: Arc::from(descriptor),
        });
        self
    }

    pub fn with_broken_method_table(mut self) -> StubClass {
        self.method_table_broken = true;
        self
    }
}

#[derive(Debug)]
struct StubReader {
    stub: StubClass,
    method_decodes: Arc<AtomicUsize>,
}

impl ClassReader for StubReader {
    fn class_name(&self) -> Arc<str> {
        Arc::clone(&self.stub.name)
    }

    fn access_flags(&self) -> ClassAccessFlag {
        self.stub.access_flags
    }

    fn super_name(&self) -> Option<Arc<str>> {
        self.stub.super_name.clone()
    }

    fn interface_names(&self) -> Vec<Arc<str>> {
        self.stub.interfaces.clone()
    }

    fn fields(&self) -> Result<Vec<RawField>, ReadError> {
        Ok(self.stub.fields.clone())
    }

    fn methods(&self) -> Result<Vec<RawMethod>, ReadError> {
        self.method_decodes.fetch_add(1, Ordering::SeqCst);
        if self.stub.method_table_broken {
            return Err(ReadError::new("truncated method table"));
        }
        Ok(self.stub.methods.clone())
    }
}

/// Maps fake class bytes back to registered stubs. Also counts method-table
/// decodes per class, so tests can observe that lazy decodes and ancestor
/// walks happen exactly once.
#[derive(Debug, Default)]
pub struct StubReaderFactory {
    classes: HashMap<String, StubClass>,
    invalid: HashSet<String>,
    method_decodes: Mutex<HashMap<String, Arc<AtomicUsize>>>,
}

impl StubReaderFactory {
    pub fn new() -> StubReaderFactory {
        StubReaderFactory::default()
    }

    /// Register a stub under its own class name.
    pub fn define(&mut self, stub: StubClass) {
        let key = stub.name.to_string();
        self.classes.insert(key, stub);
    }

    /// Register a stub under a different key, e.g. to feed an entry whose
    /// binary-declared name disagrees with its path.
    pub fn define_as(&mut self, key: &str, stub: StubClass) {
        self.classes.insert(key.to_string(), stub);
    }

    /// Make `read` fail for this key, simulating an unparsable entry.
    pub fn define_invalid(&mut self, key: &str) {
        self.invalid.insert(key.to_string());
    }

    /// How many times a class's method table has been decoded.
    pub fn method_decodes(&self, name: &str) -> usize {
        self.method_decodes
            .lock()
            .get(name)
            .map(|counter| counter.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    fn decode_counter(&self, name: &str) -> Arc<AtomicUsize> {
        Arc::clone(
            self.method_decodes
                .lock()
                .entry(name.to_string())
                .or_default(),
        )
    }
}

impl ClassReaderFactory for StubReaderFactory {
    fn read(&self, bytes: &[u8]) -> Result<Box<dyn ClassReader>, ReadError> {
        let key = std::str::from_utf8(bytes)
            .map_err(|_| ReadError::new("class bytes are not a stub key"))?;
        if self.invalid.contains(key) {
            return Err(ReadError::new(format!("bad magic in {key}")));
        }
        let stub = self
            .classes
            .get(key)
            .cloned()
            .ok_or_else(|| ReadError::new(format!("no stub registered under {key}")))?;
        let method_decodes = self.decode_counter(&stub.name);
        Ok(Box::new(StubReader {
            stub,
            method_decodes,
        }))
    }
}
