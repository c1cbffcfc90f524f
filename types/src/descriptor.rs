use std::fmt;

/// Handle to an interned type descriptor.
///
/// A handle is an index into the owning registry's arena. Every descriptor is
/// canonicalized on creation, so two types are equal exactly when their
/// handles are equal; nothing downstream of the registry ever compares
/// descriptors structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A type, as stored in the registry.
///
/// Slice/Map/Function are structural: identity follows from the child
/// handles. Message/Enum are nominal: identity is the registered name, and
/// the layout is never re-compared after first declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Basic(String),
    Slice {
        elem: TypeId,
    },
    Map {
        key: TypeId,
        val: TypeId,
    },
    /// Nominal record type with ordered fields.
    Message {
        name: String,
        fields: Vec<(String, TypeId)>,
    },
    Function {
        ins: Vec<TypeId>,
        outs: Vec<TypeId>,
    },
    /// Nominal name -> int32 mapping.
    Enum {
        name: String,
        variants: Vec<(String, i32)>,
    },
}

/// Signature request for `TypeRegistry::find_func_type`.
///
/// Both lists hold already-canonical handles, so canonicalizing the signature
/// itself is a positional handle comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncMeta {
    pub ins: Vec<TypeId>,
    pub outs: Vec<TypeId>,
}
