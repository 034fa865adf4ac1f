use std::fmt::Debug;
use std::io;

/// One archive/directory handed to a loader. Entries are enumerated in a
/// stable order; an entry may itself be a nested module (jar-in-jar).
pub trait Module: Debug + Send + Sync {
    fn name(&self) -> &str;
    fn entries(&self) -> Vec<Box<dyn ModuleEntry>>;
}

pub trait ModuleEntry: Debug + Send + Sync {
    /// Path of the entry inside its module, e.g. `com/foo/Bar.class`.
    fn name(&self) -> &str;
    fn is_class(&self) -> bool;
    fn is_source(&self) -> bool;
    fn bytes(&self) -> io::Result<Vec<u8>>;
    /// View a nested-archive entry as a module of its own.
    fn as_module(&self) -> Option<Box<dyn Module>>;
}

/// Strip a class-entry or source-entry suffix and normalize separators to
/// the internal (`/`-separated) class name the entry implies.
pub fn entry_class_name(entry_name: &str) -> Option<&str> {
    let stem = entry_name
        .strip_suffix(".class")
        .or_else(|| entry_name.strip_suffix(".java"))?;
    Some(stem.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_names_normalize_to_class_names() {
        assert_eq!(entry_class_name("com/foo/Bar.class"), Some("com/foo/Bar"));
        assert_eq!(entry_class_name("/com/foo/Bar.java"), Some("com/foo/Bar"));
        assert_eq!(entry_class_name("META-INF/MANIFEST.MF"), None);
    }
}
