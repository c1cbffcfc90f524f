//! String helpers: case mapping, trimming, search, splitting.

use std::collections::HashMap;
use std::sync::Arc;

use memory::{Frame, Function, RuntimeError, Value, ValueStore};
use resolve::Library;
use types::{FuncMeta, TypeError, TypeRegistry};

use crate::util::want_str;

pub struct StringsLib;

impl Library for StringsLib {
    fn init(&self, tr: &mut TypeRegistry) -> Result<HashMap<String, Function>, TypeError> {
        let string = tr.find_type("string")?;
        let boolean = tr.find_type("bool")?;
        let string_slice = tr.find_slice_type("string")?;

        let mut funcs = HashMap::new();

        let unary = FuncMeta {
            ins: vec![string],
            outs: vec![string],
        };
        let unary_ty = tr.find_func_type(&unary);
        funcs.insert(
            "ToUpper".to_string(),
            Function::native(unary_ty, &unary, Arc::new(to_upper)),
        );
        funcs.insert(
            "ToLower".to_string(),
            Function::native(unary_ty, &unary, Arc::new(to_lower)),
        );
        funcs.insert(
            "Trim".to_string(),
            Function::native(unary_ty, &unary, Arc::new(trim)),
        );

        let pred = FuncMeta {
            ins: vec![string, string],
            outs: vec![boolean],
        };
        let pred_ty = tr.find_func_type(&pred);
        funcs.insert(
            "Contains".to_string(),
            Function::native(pred_ty, &pred, Arc::new(contains)),
        );

        let split = FuncMeta {
            ins: vec![string, string],
            outs: vec![string_slice],
        };
        let split_ty = tr.find_func_type(&split);
        funcs.insert(
            "Split".to_string(),
            Function::native(split_ty, &split, Arc::new(split_str)),
        );

        Ok(funcs)
    }
}

fn to_upper(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let s = want_str(mem.get(fr.arg(0)))?;
    mem.set(fr.ret(0), Value::str(&s.to_uppercase()));
    Ok(())
}

fn to_lower(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let s = want_str(mem.get(fr.arg(0)))?;
    mem.set(fr.ret(0), Value::str(&s.to_lowercase()));
    Ok(())
}

fn trim(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let s = want_str(mem.get(fr.arg(0)))?;
    mem.set(fr.ret(0), Value::str(s.trim()));
    Ok(())
}

fn contains(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let hay = want_str(mem.get(fr.arg(0)))?;
    let needle = want_str(mem.get(fr.arg(1)))?;
    mem.set(fr.ret(0), Value::Bool(hay.contains(&*needle)));
    Ok(())
}

fn split_str(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let s = want_str(mem.get(fr.arg(0)))?;
    let sep = want_str(mem.get(fr.arg(1)))?;
    let parts: Vec<Value> = if sep.is_empty() {
        s.chars().map(|c| Value::str(&c.to_string())).collect()
    } else {
        s.split(&*sep).map(Value::str).collect()
    };
    mem.set(fr.ret(0), Value::slice(parts));
    Ok(())
}
