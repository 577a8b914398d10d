use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use monobuild::discovery::{DependencyLocation, DirectoryLoadResult, DirectoryLoader};
use monobuild::errors::{MonobuildError, Result};
use monobuild::glob::Glob;
use monobuild::target::{AbsoluteTarget, RepositoryTarget};

/// A directory loader that:
/// - serves canned declarations keyed by directory (case-insensitive)
/// - records which directories were loaded, in order
/// - reports `NotFound` for anything it was not given.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLoader {
    directories: Arc<Mutex<HashMap<String, DirectoryLoadResult>>>,
    loaded: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `directory` with dependency locations (as written in its
    /// declaration files) and raw ignore lines.
    pub fn with_dir(self, directory: &str, dependencies: &[&str], ignores: &[&str]) -> Self {
        let result = DirectoryLoadResult {
            ignore_globs: ignores.iter().map(|g| Glob::new(g)).collect(),
            dependencies: dependencies
                .iter()
                .map(|d| DependencyLocation::new(*d))
                .collect(),
        };
        self.directories
            .lock()
            .unwrap()
            .insert(RepositoryTarget::new(directory).key().to_string(), result);
        self
    }

    /// Directories loaded so far, in load order.
    pub fn loaded(&self) -> Vec<String> {
        self.loaded.lock().unwrap().clone()
    }
}

impl DirectoryLoader for ScriptedLoader {
    fn load<'a>(
        &'a self,
        target: &'a AbsoluteTarget,
    ) -> Pin<Box<dyn Future<Output = Result<DirectoryLoadResult>> + Send + 'a>> {
        let directories = Arc::clone(&self.directories);
        let loaded = Arc::clone(&self.loaded);

        Box::pin(async move {
            let key = target.directory().key().to_string();
            {
                let mut guard = loaded.lock().unwrap();
                guard.push(key.clone());
            }

            directories
                .lock()
                .unwrap()
                .get(&key)
                .cloned()
                .ok_or_else(|| MonobuildError::NotFound(format!("the path {} does not exist", target.directory())))
        })
    }
}
