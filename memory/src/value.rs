use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use types::TypeId;

use crate::func::FuncValue;

/// A single value-store slot.
///
/// Scalars are stored inline and copy on assignment. `Str` and `Bytes` are
/// immutable shared buffers, so cloning them still behaves like a value copy.
/// Slice/Map/Message clone as shared references: mutation through one alias
/// is visible through every other alias, closure captures included.
#[derive(Clone)]
pub enum Value {
    Nil,
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Str(Rc<str>),
    Bytes(Rc<[u8]>),
    Slice(Rc<RefCell<Vec<Value>>>),
    Map(Rc<RefCell<HashMap<MapKey, Value>>>),
    Message(Rc<RefCell<MessageVal>>),
    Func(FuncValue),
}

/// Map keys are restricted to hashable scalars.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Int(i64),
    Uint(u64),
    Bool(bool),
    Str(Rc<str>),
}

impl MapKey {
    pub fn from_value(val: &Value) -> Option<MapKey> {
        match val {
            Value::Int(i) => Some(MapKey::Int(*i)),
            Value::Uint(u) => Some(MapKey::Uint(*u)),
            Value::Bool(b) => Some(MapKey::Bool(*b)),
            Value::Str(s) => Some(MapKey::Str(Rc::clone(s))),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            MapKey::Int(i) => Value::Int(*i),
            MapKey::Uint(u) => Value::Uint(*u),
            MapKey::Bool(b) => Value::Bool(*b),
            MapKey::Str(s) => Value::Str(Rc::clone(s)),
        }
    }
}

/// Heap payload of a message value.
///
/// Field positions match the registered descriptor's field order.
#[derive(Debug, Clone)]
pub struct MessageVal {
    pub typ: TypeId,
    pub fields: Vec<Value>,
}

impl Value {
    // --- Constructors ---

    pub fn str(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn bytes(b: &[u8]) -> Self {
        Value::Bytes(Rc::from(b))
    }

    pub fn slice(items: Vec<Value>) -> Self {
        Value::Slice(Rc::new(RefCell::new(items)))
    }

    pub fn map(entries: HashMap<MapKey, Value>) -> Self {
        Value::Map(Rc::new(RefCell::new(entries)))
    }

    pub fn message(msg: MessageVal) -> Self {
        Value::Message(Rc::new(RefCell::new(msg)))
    }

    // --- Checkers ---

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    // --- Accessors ---

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(u) => Some(*u),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> Option<&Rc<RefCell<Vec<Value>>>> {
        match self {
            Value::Slice(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&Rc<RefCell<HashMap<MapKey, Value>>>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    #[inline]
    pub fn as_message(&self) -> Option<&Rc<RefCell<MessageVal>>> {
        match self {
            Value::Message(m) => Some(m),
            _ => None,
        }
    }

    #[inline]
    pub fn as_func(&self) -> Option<&FuncValue> {
        match self {
            Value::Func(f) => Some(f),
            _ => None,
        }
    }

    /// Kind label for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Slice(_) => "slice",
            Value::Map(_) => "map",
            Value::Message(_) => "message",
            Value::Func(_) => "func",
        }
    }
}

impl PartialEq for Value {
    /// Scalars and immutable buffers compare by content; mutable composites
    /// compare by reference identity; function values by descriptor identity
    /// plus captured environment.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Slice(a), Value::Slice(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Message(a), Value::Message(b)) => Rc::ptr_eq(a, b),
            (Value::Func(a), Value::Func(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}u"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Bytes(b) => write!(f, "bytes[{}]", b.len()),
            Value::Slice(s) => write!(f, "slice[{}]", s.borrow().len()),
            Value::Map(m) => write!(f, "map[{}]", m.borrow().len()),
            Value::Message(m) => write!(f, "message({})", m.borrow().typ),
            Value::Func(fv) => write!(f, "{fv:?}"),
        }
    }
}
