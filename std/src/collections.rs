//! Slice and map helpers.
//!
//! `AppendStr` returns a fresh slice rather than mutating its input;
//! `Keys` returns keys in sorted order so results are deterministic.

use std::collections::HashMap;
use std::sync::Arc;

use memory::{Frame, Function, MapKey, RuntimeError, Value, ValueStore};
use resolve::Library;
use types::{FuncMeta, TypeError, TypeRegistry};

use crate::util::{want_map, want_slice, want_str};

pub struct CollectionsLib;

impl Library for CollectionsLib {
    fn init(&self, tr: &mut TypeRegistry) -> Result<HashMap<String, Function>, TypeError> {
        let int64 = tr.find_type("int64")?;
        let string = tr.find_type("string")?;
        let boolean = tr.find_type("bool")?;
        let string_slice = tr.find_slice_type("string")?;
        let str_map = tr.find_map_type("string", "string")?;

        let mut funcs = HashMap::new();

        let len = FuncMeta {
            ins: vec![string_slice],
            outs: vec![int64],
        };
        let len_ty = tr.find_func_type(&len);
        funcs.insert(
            "LenStr".to_string(),
            Function::native(len_ty, &len, Arc::new(len_slice)),
        );

        let append = FuncMeta {
            ins: vec![string_slice, string],
            outs: vec![string_slice],
        };
        let append_ty = tr.find_func_type(&append);
        funcs.insert(
            "AppendStr".to_string(),
            Function::native(append_ty, &append, Arc::new(append_slice)),
        );

        let keys = FuncMeta {
            ins: vec![str_map],
            outs: vec![string_slice],
        };
        let keys_ty = tr.find_func_type(&keys);
        funcs.insert(
            "Keys".to_string(),
            Function::native(keys_ty, &keys, Arc::new(map_keys)),
        );

        let has = FuncMeta {
            ins: vec![str_map, string],
            outs: vec![boolean],
        };
        let has_ty = tr.find_func_type(&has);
        funcs.insert(
            "HasKey".to_string(),
            Function::native(has_ty, &has, Arc::new(has_key)),
        );

        Ok(funcs)
    }
}

fn len_slice(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let items = want_slice(mem.get(fr.arg(0)))?;
    let len = items.borrow().len() as i64;
    mem.set(fr.ret(0), Value::Int(len));
    Ok(())
}

fn append_slice(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let items = want_slice(mem.get(fr.arg(0)))?;
    let extra = mem.get(fr.arg(1)).clone();
    let mut grown = items.borrow().clone();
    grown.push(extra);
    mem.set(fr.ret(0), Value::slice(grown));
    Ok(())
}

fn map_keys(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let entries = want_map(mem.get(fr.arg(0)))?;
    let mut keys: Vec<String> = entries
        .borrow()
        .keys()
        .map(|k| match k {
            MapKey::Str(s) => s.to_string(),
            MapKey::Int(i) => i.to_string(),
            MapKey::Uint(u) => u.to_string(),
            MapKey::Bool(b) => b.to_string(),
        })
        .collect();
    keys.sort();
    mem.set(
        fr.ret(0),
        Value::slice(keys.iter().map(|k| Value::str(k)).collect()),
    );
    Ok(())
}

fn has_key(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let entries = want_map(mem.get(fr.arg(0)))?;
    let key = want_str(mem.get(fr.arg(1)))?;
    let present = entries.borrow().contains_key(&MapKey::Str(key));
    mem.set(fr.ret(0), Value::Bool(present));
    Ok(())
}
