use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::error::PackageError;

/// Metadata of every installed module, keyed by module name and stored as a
/// JSON object.
///
/// # Example
/// ```
/// use epl::package::registry::Registry;
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("epl_modules.json");
///
/// let mut registry = Registry::load(&path).unwrap();
/// registry.record("turtle", json!({ "version": "1.0" }));
/// registry.save().unwrap();
///
/// let reloaded = Registry::load(&path).unwrap();
/// assert_eq!(reloaded.get("turtle"), Some(&json!({ "version": "1.0" })));
/// ```
#[derive(Debug)]
pub struct Registry {
    path:    PathBuf,
    modules: Map<String, Value>,
}

impl Registry {
    /// Loads the registry at `path`. A missing or empty file is an empty
    /// registry.
    ///
    /// # Errors
    /// Fails if the file cannot be read or is not a JSON object.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PackageError> {
        let path = path.into();
        let modules = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, modules })
    }

    /// Where the registry is stored.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The metadata recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.modules.get(name)
    }

    /// Records `metadata` for `name`, replacing what was there.
    pub fn record(&mut self, name: impl Into<String>, metadata: Value) {
        self.modules.insert(name.into(), metadata);
    }

    /// Forgets `name`, returning its metadata.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.modules.remove(name)
    }

    /// Writes the registry back to disk.
    ///
    /// # Errors
    /// Fails if the file cannot be written.
    pub fn save(&self) -> Result<(), PackageError> {
        let text = serde_json::to_string_pretty(&self.modules)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_and_empty_files_are_empty_registries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("epl_modules.json");
        assert!(Registry::load(&path).unwrap().get("x").is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(Registry::load(&path).unwrap().get("x").is_none());
    }

    #[test]
    fn invalid_json_is_a_registry_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("epl_modules.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(Registry::load(&path), Err(PackageError::Registry(_))));
    }

    #[test]
    fn removal_is_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("epl_modules.json");

        let mut registry = Registry::load(&path).unwrap();
        registry.record("a", json!(1));
        registry.record("b", json!(2));
        assert_eq!(registry.remove("a"), Some(json!(1)));
        registry.save().unwrap();

        let reloaded = Registry::load(&path).unwrap();
        assert!(reloaded.get("a").is_none());
        assert_eq!(reloaded.get("b"), Some(&json!(2)));
    }
}
