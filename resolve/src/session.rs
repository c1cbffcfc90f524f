use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use memory::Function;
use types::{TypeId, TypeRegistry};

use crate::error::{Loc, ResolveError};
use crate::library::LibraryRegistry;

/// One compilation's mutable view of type and library metadata.
///
/// A session walks `Declared -> Interned -> Resolved -> Locked`: types are
/// declared and includes resolved here, call sites are checked here, and
/// `lock` consumes the session; after that, no path to mutation exists.
pub struct Session {
    types: TypeRegistry,
    /// Libraries whose `init` already ran this session.
    included: HashSet<String>,
    /// Lexical scope: published and compiled functions by name.
    scope: HashMap<String, Arc<Function>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            types: TypeRegistry::new(),
            included: HashSet::new(),
            scope: HashMap::new(),
        }
    }

    /// Read view of the session's registry.
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Mutable registry access for the compiler's declare/resolve work.
    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    /// Resolve an `include` directive.
    ///
    /// The library's `init` runs at most once per session; the functions it
    /// returns are merged into scope under their published names. Later
    /// bindings shadow earlier ones.
    pub fn include(&mut self, libs: &LibraryRegistry, name: &str) -> Result<(), ResolveError> {
        if self.included.contains(name) {
            return Ok(());
        }
        let lib = libs
            .lookup(name)
            .ok_or_else(|| ResolveError::UnknownLibrary(name.to_string()))?;
        let funcs = lib.init(&mut self.types)?;
        log::debug!("library initialized: {name} ({} functions)", funcs.len());
        for (fname, func) in funcs {
            self.scope.insert(fname, Arc::new(func));
        }
        self.included.insert(name.to_string());
        Ok(())
    }

    /// Bind a compiled (or host-built) function into scope.
    pub fn bind(&mut self, name: &str, func: Function) -> Arc<Function> {
        let func = Arc::new(func);
        self.scope.insert(name.to_string(), Arc::clone(&func));
        func
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<Function>> {
        self.scope.get(name)
    }

    /// Compile-time call-site check: the argument handles against the
    /// callee's declared signature. Returns the result handles on success.
    ///
    /// Comparison is handle identity: nested types were canonicalized when
    /// they were interned, so no structural walk happens here.
    pub fn check_call(
        &self,
        callee: TypeId,
        args: &[TypeId],
        at: Loc,
    ) -> Result<Vec<TypeId>, ResolveError> {
        let (ins, outs) = self
            .types
            .func_sig(callee)
            .ok_or_else(|| ResolveError::NotCallable {
                at,
                found: self.types.type_name(callee),
            })?;
        if ins.len() != args.len() {
            return Err(ResolveError::ArityMismatch {
                at,
                expected: ins.len(),
                found: args.len(),
            });
        }
        for (index, (want, got)) in ins.iter().zip(args).enumerate() {
            if want != got {
                return Err(ResolveError::TypeMismatch {
                    at,
                    index,
                    expected: self.types.type_name(*want),
                    found: self.types.type_name(*got),
                });
            }
        }
        Ok(outs.to_vec())
    }

    /// Freeze the session. Execution sees only the returned immutable
    /// metadata; the registries cannot be touched past this point.
    pub fn lock(self) -> Compiled {
        log::debug!(
            "session locked ({} types, {} bindings)",
            self.types.len(),
            self.scope.len()
        );
        Compiled {
            types: Arc::new(self.types),
            scope: self.scope,
        }
    }
}

/// Immutable compile output, shared by every execution of the program.
///
/// `Compiled` is `Send + Sync`; concurrent executions instantiate one value
/// store each and read this metadata without synchronization.
pub struct Compiled {
    types: Arc<TypeRegistry>,
    scope: HashMap<String, Arc<Function>>,
}

impl Compiled {
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn function(&self, name: &str) -> Option<Arc<Function>> {
        self.scope.get(name).cloned()
    }
}
