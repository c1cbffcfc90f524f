//! JSON bridge over `serde_json`.
//!
//! The declared signatures use `map[string]string`, the narrowest concrete
//! type this layer can publish; the implementations convert whatever value
//! actually sits in the slot, so the declared types can widen later without
//! touching the conversion.

use std::collections::HashMap;
use std::sync::Arc;

use memory::{Frame, Function, MapKey, RuntimeError, Value, ValueStore};
use resolve::Library;
use types::{FuncMeta, TypeError, TypeRegistry};

use crate::util::want_str;

pub struct JsonLib;

impl Library for JsonLib {
    fn init(&self, tr: &mut TypeRegistry) -> Result<HashMap<String, Function>, TypeError> {
        let string = tr.find_type("string")?;
        let str_map = tr.find_map_type("string", "string")?;

        let mut funcs = HashMap::new();

        let enc = FuncMeta {
            ins: vec![str_map],
            outs: vec![string],
        };
        let enc_ty = tr.find_func_type(&enc);
        funcs.insert(
            "EncodeJson".to_string(),
            Function::native(enc_ty, &enc, Arc::new(encode_json)),
        );

        let dec = FuncMeta {
            ins: vec![string],
            outs: vec![str_map],
        };
        let dec_ty = tr.find_func_type(&dec);
        funcs.insert(
            "DecodeJson".to_string(),
            Function::native(dec_ty, &dec, Arc::new(decode_json)),
        );

        Ok(funcs)
    }
}

fn encode_json(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let json = to_json(mem.get(fr.arg(0)))?;
    let text = serde_json::to_string(&json)
        .map_err(|e| RuntimeError::NativeCallFailure(format!("json: encode failed: {e}")))?;
    mem.set(fr.ret(0), Value::str(&text));
    Ok(())
}

fn decode_json(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let text = want_str(mem.get(fr.arg(0)))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| RuntimeError::NativeCallFailure(format!("json: decode failed: {e}")))?;
    mem.set(fr.ret(0), from_json(json));
    Ok(())
}

fn to_json(val: &Value) -> Result<serde_json::Value, RuntimeError> {
    use serde_json::Value as Json;
    Ok(match val {
        Value::Nil => Json::Null,
        Value::Int(i) => Json::from(*i),
        Value::Uint(u) => Json::from(*u),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .ok_or_else(|| {
                RuntimeError::NativeCallFailure(format!("json: non-finite float {f}"))
            })?,
        Value::Bool(b) => Json::Bool(*b),
        Value::Str(s) => Json::String(s.to_string()),
        Value::Slice(items) => {
            let items = items.borrow();
            let mut arr = Vec::with_capacity(items.len());
            for item in items.iter() {
                arr.push(to_json(item)?);
            }
            Json::Array(arr)
        }
        Value::Map(entries) => {
            let entries = entries.borrow();
            let mut obj = serde_json::Map::with_capacity(entries.len());
            for (key, item) in entries.iter() {
                let key = match key {
                    MapKey::Str(s) => s.to_string(),
                    MapKey::Int(i) => i.to_string(),
                    MapKey::Uint(u) => u.to_string(),
                    MapKey::Bool(b) => b.to_string(),
                };
                obj.insert(key, to_json(item)?);
            }
            Json::Object(obj)
        }
        other => {
            return Err(RuntimeError::NativeCallFailure(format!(
                "json: cannot encode {}",
                other.kind_name()
            )))
        }
    })
}

fn from_json(json: serde_json::Value) -> Value {
    use serde_json::Value as Json;
    match json {
        Json::Null => Value::Nil,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::Uint(u)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) => Value::str(&s),
        Json::Array(arr) => Value::slice(arr.into_iter().map(from_json).collect()),
        Json::Object(obj) => {
            let entries = obj
                .into_iter()
                .map(|(k, v)| (MapKey::Str(k.as_str().into()), from_json(v)))
                .collect();
            Value::map(entries)
        }
    }
}
