//! Checked slot access shared by the native implementations.
//!
//! A wrong kind here means the compiled register layout disagrees with the
//! declared signature, which is a compiler defect; the error exists so the
//! defect surfaces as a failed execution instead of a host crash.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use memory::{MapKey, RuntimeError, Value};

fn mismatch(want: &str, got: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch(format!("expected {want}, got {}", got.kind_name()))
}

pub(crate) fn want_int(val: &Value) -> Result<i64, RuntimeError> {
    val.as_int().ok_or_else(|| mismatch("int", val))
}

pub(crate) fn want_str(val: &Value) -> Result<Rc<str>, RuntimeError> {
    match val {
        Value::Str(s) => Ok(Rc::clone(s)),
        other => Err(mismatch("string", other)),
    }
}

pub(crate) fn want_bytes(val: &Value) -> Result<Rc<[u8]>, RuntimeError> {
    match val {
        Value::Bytes(b) => Ok(Rc::clone(b)),
        other => Err(mismatch("bytes", other)),
    }
}

pub(crate) fn want_slice(val: &Value) -> Result<Rc<RefCell<Vec<Value>>>, RuntimeError> {
    match val {
        Value::Slice(s) => Ok(Rc::clone(s)),
        other => Err(mismatch("slice", other)),
    }
}

pub(crate) fn want_map(val: &Value) -> Result<Rc<RefCell<HashMap<MapKey, Value>>>, RuntimeError> {
    match val {
        Value::Map(m) => Ok(Rc::clone(m)),
        other => Err(mismatch("map", other)),
    }
}
