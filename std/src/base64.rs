//! Byte-encoding library: standard-alphabet base64 with `=` padding.
//!
//! Decode rejects any input outside the alphabet/padding shape with a
//! `NativeCallFailure`; decode of an encode is the identity for every byte
//! sequence, the empty one included.

use std::collections::HashMap;
use std::sync::Arc;

use memory::{Frame, Function, RuntimeError, Value, ValueStore};
use resolve::Library;
use types::{FuncMeta, TypeError, TypeRegistry};

use crate::util::{want_bytes, want_str};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

pub struct Base64Lib;

impl Library for Base64Lib {
    fn init(&self, tr: &mut TypeRegistry) -> Result<HashMap<String, Function>, TypeError> {
        let bytes = tr.find_type("bytes")?;
        let string = tr.find_type("string")?;

        let mut funcs = HashMap::new();

        let enc = FuncMeta {
            ins: vec![bytes],
            outs: vec![string],
        };
        let enc_ty = tr.find_func_type(&enc);
        funcs.insert(
            "EncodeBase64".to_string(),
            Function::native(enc_ty, &enc, Arc::new(encode_base64)),
        );

        let dec = FuncMeta {
            ins: vec![string],
            outs: vec![bytes],
        };
        let dec_ty = tr.find_func_type(&dec);
        funcs.insert(
            "DecodeBase64".to_string(),
            Function::native(dec_ty, &dec, Arc::new(decode_base64)),
        );

        Ok(funcs)
    }
}

fn encode_base64(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let data = want_bytes(mem.get(fr.arg(0)))?;
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let n = (b0 << 16) | (b1 << 8) | b2;
        out.push(ALPHABET[(n >> 18) as usize & 63] as char);
        out.push(ALPHABET[(n >> 12) as usize & 63] as char);
        out.push(if chunk.len() > 1 {
            ALPHABET[(n >> 6) as usize & 63] as char
        } else {
            '='
        });
        out.push(if chunk.len() > 2 {
            ALPHABET[n as usize & 63] as char
        } else {
            '='
        });
    }
    mem.set(fr.ret(0), Value::str(&out));
    Ok(())
}

fn decode_base64(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let text = want_str(mem.get(fr.arg(0)))?;
    let decoded = decode_text(&text)?;
    mem.set(fr.ret(0), Value::bytes(&decoded));
    Ok(())
}

fn sextet(c: u8) -> Option<u32> {
    match c {
        b'A'..=b'Z' => Some((c - b'A') as u32),
        b'a'..=b'z' => Some((c - b'a' + 26) as u32),
        b'0'..=b'9' => Some((c - b'0' + 52) as u32),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

fn bad(input: &str) -> RuntimeError {
    RuntimeError::NativeCallFailure(format!("base64: malformed input: {input:?}"))
}

fn decode_text(text: &str) -> Result<Vec<u8>, RuntimeError> {
    let raw = text.as_bytes();
    if raw.len() % 4 != 0 {
        return Err(bad(text));
    }
    let quads = raw.len() / 4;
    let mut out = Vec::with_capacity(quads * 3);
    for (i, quad) in raw.chunks(4).enumerate() {
        // Padding may only appear in the last quad, positions 2 and 3.
        if quad[0] == b'=' || quad[1] == b'=' {
            return Err(bad(text));
        }
        let pad = if quad[3] == b'=' {
            if quad[2] == b'=' {
                2
            } else {
                1
            }
        } else {
            0
        };
        if pad > 0 && i != quads - 1 {
            return Err(bad(text));
        }

        let s0 = sextet(quad[0]).ok_or_else(|| bad(text))?;
        let s1 = sextet(quad[1]).ok_or_else(|| bad(text))?;
        let s2 = if pad == 2 {
            0
        } else {
            sextet(quad[2]).ok_or_else(|| bad(text))?
        };
        let s3 = if pad >= 1 {
            0
        } else {
            sextet(quad[3]).ok_or_else(|| bad(text))?
        };

        let n = (s0 << 18) | (s1 << 12) | (s2 << 6) | s3;
        out.push((n >> 16) as u8);
        if pad < 2 {
            out.push((n >> 8) as u8);
        }
        if pad < 1 {
            out.push(n as u8);
        }
    }
    Ok(out)
}
