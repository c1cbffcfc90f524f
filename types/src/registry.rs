use std::collections::HashMap;

use crate::descriptor::{FuncMeta, TypeDescriptor, TypeId};
use crate::error::TypeError;

/// Primitive type names pre-registered by `TypeRegistry::new`.
pub const BASIC_TYPES: &[&str] = &[
    "int8", "int16", "int32", "int64", "uint8", "uint16", "uint32", "uint64", "float32",
    "float64", "bool", "string", "bytes",
];

/// Key for the structural interning table.
///
/// Child handles are already canonical, so hashing/equality over them is
/// equivalent to deep structural comparison of the descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum StructKey {
    Slice(TypeId),
    Map(TypeId, TypeId),
    Func(Vec<TypeId>, Vec<TypeId>),
}

/// Owner and canonicalizer of all type descriptors in a compile session.
///
/// Created once per session and mutated only during the compile/setup phase;
/// `resolve::Session::lock` freezes it behind an `Arc` for execution.
pub struct TypeRegistry {
    types: Vec<TypeDescriptor>,
    /// Name table for basics and nominal (Message/Enum) types.
    named: HashMap<String, TypeId>,
    /// Interning table for Slice/Map/Function descriptors.
    structural: HashMap<StructKey, TypeId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry with the basic types pre-registered.
    pub fn new() -> Self {
        let mut tr = Self {
            types: Vec::with_capacity(BASIC_TYPES.len()),
            named: HashMap::new(),
            structural: HashMap::new(),
        };
        for name in BASIC_TYPES {
            let id = tr.alloc(TypeDescriptor::Basic((*name).to_string()));
            tr.named.insert((*name).to_string(), id);
        }
        tr
    }

    fn alloc(&mut self, desc: TypeDescriptor) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(desc);
        id
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeDescriptor {
        &self.types[id.index()]
    }

    /// Look up a pre-declared basic or named type.
    pub fn find_type(&self, name: &str) -> Result<TypeId, TypeError> {
        self.named
            .get(name)
            .copied()
            .ok_or_else(|| TypeError::UnknownType(name.to_string()))
    }

    /// Intern the slice type over an already-resolved element handle.
    pub fn slice_of(&mut self, elem: TypeId) -> TypeId {
        let key = StructKey::Slice(elem);
        if let Some(&id) = self.structural.get(&key) {
            return id;
        }
        let id = self.alloc(TypeDescriptor::Slice { elem });
        self.structural.insert(key, id);
        id
    }

    /// Intern the map type over already-resolved key/value handles.
    pub fn map_of(&mut self, key: TypeId, val: TypeId) -> TypeId {
        let skey = StructKey::Map(key, val);
        if let Some(&id) = self.structural.get(&skey) {
            return id;
        }
        let id = self.alloc(TypeDescriptor::Map { key, val });
        self.structural.insert(skey, id);
        id
    }

    /// Resolve `elem_name` and return the (possibly new) slice descriptor.
    pub fn find_slice_type(&mut self, elem_name: &str) -> Result<TypeId, TypeError> {
        let elem = self.find_type(elem_name)?;
        Ok(self.slice_of(elem))
    }

    /// Resolve key/value names and return the (possibly new) map descriptor.
    pub fn find_map_type(&mut self, key_name: &str, val_name: &str) -> Result<TypeId, TypeError> {
        let key = self.find_type(key_name)?;
        let val = self.find_type(val_name)?;
        Ok(self.map_of(key, val))
    }

    /// Canonicalize a function signature.
    ///
    /// Structurally identical signatures always resolve to the identical
    /// handle, which makes signature equality an O(arity) handle comparison
    /// at every downstream call site.
    pub fn find_func_type(&mut self, meta: &FuncMeta) -> TypeId {
        let key = StructKey::Func(meta.ins.clone(), meta.outs.clone());
        if let Some(&id) = self.structural.get(&key) {
            return id;
        }
        let id = self.alloc(TypeDescriptor::Function {
            ins: meta.ins.clone(),
            outs: meta.outs.clone(),
        });
        self.structural.insert(key, id);
        id
    }

    /// One-time nominal registration of a message type.
    pub fn add_message(
        &mut self,
        name: &str,
        fields: Vec<(String, TypeId)>,
    ) -> Result<TypeId, TypeError> {
        if self.named.contains_key(name) {
            return Err(TypeError::DuplicateRegistration(name.to_string()));
        }
        let id = self.alloc(TypeDescriptor::Message {
            name: name.to_string(),
            fields,
        });
        self.named.insert(name.to_string(), id);
        log::trace!("registered message type {name}");
        Ok(id)
    }

    /// One-time nominal registration of an enum type.
    pub fn add_enum(
        &mut self,
        name: &str,
        variants: Vec<(String, i32)>,
    ) -> Result<TypeId, TypeError> {
        if self.named.contains_key(name) {
            return Err(TypeError::DuplicateRegistration(name.to_string()));
        }
        let id = self.alloc(TypeDescriptor::Enum {
            name: name.to_string(),
            variants,
        });
        self.named.insert(name.to_string(), id);
        log::trace!("registered enum type {name}");
        Ok(id)
    }

    /// Input/output handles of a Function-kind descriptor.
    pub fn func_sig(&self, id: TypeId) -> Option<(&[TypeId], &[TypeId])> {
        match self.get(id) {
            TypeDescriptor::Function { ins, outs } => Some((ins, outs)),
            _ => None,
        }
    }

    /// Rendered type name for diagnostics.
    pub fn type_name(&self, id: TypeId) -> String {
        match self.get(id) {
            TypeDescriptor::Basic(name) => name.clone(),
            TypeDescriptor::Slice { elem } => format!("[]{}", self.type_name(*elem)),
            TypeDescriptor::Map { key, val } => {
                format!("map[{}]{}", self.type_name(*key), self.type_name(*val))
            }
            TypeDescriptor::Message { name, .. } => name.clone(),
            TypeDescriptor::Enum { name, .. } => name.clone(),
            TypeDescriptor::Function { ins, outs } => {
                let ins: Vec<String> = ins.iter().map(|t| self.type_name(*t)).collect();
                let outs: Vec<String> = outs.iter().map(|t| self.type_name(*t)).collect();
                format!("func({})({})", ins.join(","), outs.join(","))
            }
        }
    }

    /// Number of interned descriptors (basics included).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
