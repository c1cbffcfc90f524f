//! Date/time helpers over `chrono`. Timestamps are unix seconds, UTC.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{NaiveDateTime, TimeZone, Utc};
use memory::{Frame, Function, RuntimeError, Value, ValueStore};
use resolve::Library;
use types::{FuncMeta, TypeError, TypeRegistry};

use crate::util::{want_int, want_str};

pub struct DateTimeLib;

impl Library for DateTimeLib {
    fn init(&self, tr: &mut TypeRegistry) -> Result<HashMap<String, Function>, TypeError> {
        let int64 = tr.find_type("int64")?;
        let string = tr.find_type("string")?;

        let mut funcs = HashMap::new();

        let now = FuncMeta {
            ins: vec![],
            outs: vec![int64],
        };
        let now_ty = tr.find_func_type(&now);
        funcs.insert(
            "Now".to_string(),
            Function::native(now_ty, &now, Arc::new(now_unix)),
        );

        let format = FuncMeta {
            ins: vec![int64, string],
            outs: vec![string],
        };
        let format_ty = tr.find_func_type(&format);
        funcs.insert(
            "FormatTime".to_string(),
            Function::native(format_ty, &format, Arc::new(format_time)),
        );

        let parse = FuncMeta {
            ins: vec![string, string],
            outs: vec![int64],
        };
        let parse_ty = tr.find_func_type(&parse);
        funcs.insert(
            "ParseTime".to_string(),
            Function::native(parse_ty, &parse, Arc::new(parse_time)),
        );

        Ok(funcs)
    }
}

fn now_unix(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    mem.set(fr.ret(0), Value::Int(Utc::now().timestamp()));
    Ok(())
}

fn format_time(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let ts = want_int(mem.get(fr.arg(0)))?;
    let fmt = want_str(mem.get(fr.arg(1)))?;
    let when = Utc
        .timestamp_opt(ts, 0)
        .single()
        .ok_or_else(|| RuntimeError::NativeCallFailure(format!("datetime: timestamp {ts} out of range")))?;
    // Formatting through write! turns an invalid strftime string into a
    // failure result instead of a panic.
    let mut out = String::new();
    write!(&mut out, "{}", when.format(&fmt))
        .map_err(|_| RuntimeError::NativeCallFailure(format!("datetime: invalid format {fmt:?}")))?;
    mem.set(fr.ret(0), Value::str(&out));
    Ok(())
}

fn parse_time(mem: &mut ValueStore, fr: Frame) -> Result<(), RuntimeError> {
    let text = want_str(mem.get(fr.arg(0)))?;
    let fmt = want_str(mem.get(fr.arg(1)))?;
    let naive = NaiveDateTime::parse_from_str(&text, &fmt).map_err(|e| {
        RuntimeError::NativeCallFailure(format!("datetime: cannot parse {text:?}: {e}"))
    })?;
    let ts = Utc.from_utc_datetime(&naive).timestamp();
    mem.set(fr.ret(0), Value::Int(ts));
    Ok(())
}
