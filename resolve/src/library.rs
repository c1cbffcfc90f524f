use std::collections::HashMap;
use std::sync::Arc;

use memory::Function;
use types::{TypeError, TypeRegistry};

use crate::error::ResolveError;

/// Capability implemented by a native module to publish typed functions.
///
/// `init` runs lazily, once per compile session that includes the module. It
/// must build every published function's type through the passed registry,
/// so each signature is canonical in that session.
pub trait Library: Send + Sync {
    fn init(&self, types: &mut TypeRegistry) -> Result<HashMap<String, Function>, TypeError>;
}

/// Host-owned table of installed libraries.
///
/// The host decides the scope (usually one per process); sessions borrow it
/// to resolve includes. Registration is explicit; there is no global side
/// table, so independent hosts in one process cannot couple through it.
#[derive(Default)]
pub struct LibraryRegistry {
    libs: HashMap<String, Arc<dyn Library>>,
}

impl LibraryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a library singleton under `name`.
    ///
    /// Duplicate names are rejected; the first registration stays effective.
    pub fn register(&mut self, name: &str, lib: Arc<dyn Library>) -> Result<(), ResolveError> {
        if self.libs.contains_key(name) {
            return Err(ResolveError::DuplicateRegistration(name.to_string()));
        }
        self.libs.insert(name.to_string(), lib);
        log::debug!("library registered: {name}");
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Library>> {
        self.libs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.libs.keys().map(String::as_str)
    }
}
