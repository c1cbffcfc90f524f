use std::sync::Arc;

use memory::{CallOps, Frame, FuncValue, Function, RuntimeError, Value, ValueStore};
use types::{FuncMeta, TypeRegistry};

/// The closure body a compiler would emit for `func() int64 { return a + b }`
/// where `a` and `b` are captured from the enclosing invocation.
fn adder_body(tr: &mut TypeRegistry) -> Arc<Function> {
    let int64 = tr.find_type("int64").unwrap();
    let typ = tr.find_func_type(&FuncMeta {
        ins: vec![],
        outs: vec![int64],
    });
    Arc::new(Function {
        typ,
        caps: 2,
        ins: 0,
        outs: 1,
        frame_slots: 3,
        imp: Arc::new(|mem: &mut ValueStore, fr: Frame| {
            let a = mem
                .get(fr.cap(0))
                .as_int()
                .ok_or_else(|| RuntimeError::TypeMismatch("expected int".into()))?;
            let b = mem
                .get(fr.cap(1))
                .as_int()
                .ok_or_else(|| RuntimeError::TypeMismatch("expected int".into()))?;
            mem.set(fr.ret(0), Value::Int(a + b));
            Ok(())
        }),
    })
}

/// Factory `func(a, b int64) func() int64`: snapshots its two arguments
/// into a fresh closure value.
fn adder_factory(tr: &mut TypeRegistry, body: Arc<Function>) -> Arc<Function> {
    let int64 = tr.find_type("int64").unwrap();
    let closure_ty = tr.find_func_type(&FuncMeta {
        ins: vec![],
        outs: vec![int64],
    });
    let typ = tr.find_func_type(&FuncMeta {
        ins: vec![int64, int64],
        outs: vec![closure_ty],
    });
    Arc::new(Function {
        typ,
        caps: 0,
        ins: 2,
        outs: 1,
        frame_slots: 3,
        imp: Arc::new(move |mem: &mut ValueStore, fr: Frame| {
            let a = mem.get(fr.arg(0)).clone();
            let b = mem.get(fr.arg(1)).clone();
            let closure = FuncValue::close(Arc::clone(&body), vec![a, b]);
            mem.set(fr.ret(0), Value::Func(closure));
            Ok(())
        }),
    })
}

fn make_closure(mem: &mut ValueStore, factory: &FuncValue, base: usize, a: i64, b: i64) -> FuncValue {
    mem.set(base, Value::Int(a));
    mem.set(base + 1, Value::Int(b));
    mem.call(factory, base, base + 2).unwrap();
    mem.get(base + 2).as_func().unwrap().clone()
}

fn invoke_adder(mem: &mut ValueStore, adder: &FuncValue, base: usize) -> i64 {
    mem.call(adder, base, base + 3).unwrap();
    mem.get(base + 3).as_int().unwrap()
}

#[test]
fn closures_with_distinct_captures_are_independent() {
    let mut tr = TypeRegistry::new();
    let body = adder_body(&mut tr);
    let factory = adder_factory(&mut tr, body);
    let factory = FuncValue::plain(factory);

    let mut mem = ValueStore::new(64);
    let base = mem.reserve(4).unwrap();

    let small = make_closure(&mut mem, &factory, base, 1, 2);
    let large = make_closure(&mut mem, &factory, base, 3, 4);

    // Any interleaving: neither invocation may perturb the other's captures.
    assert_eq!(invoke_adder(&mut mem, &large, base), 7);
    assert_eq!(invoke_adder(&mut mem, &small, base), 3);
    assert_eq!(invoke_adder(&mut mem, &large, base), 7);
    assert_eq!(invoke_adder(&mut mem, &small, base), 3);
}

#[test]
fn scalar_captures_are_snapshots() {
    let mut tr = TypeRegistry::new();
    let body = adder_body(&mut tr);
    let factory = adder_factory(&mut tr, body);
    let factory = FuncValue::plain(factory);

    let mut mem = ValueStore::new(64);
    let base = mem.reserve(4).unwrap();

    let adder = make_closure(&mut mem, &factory, base, 10, 20);
    // Overwrite the registers the factory read from; the snapshot must not
    // notice.
    mem.set(base, Value::Int(-1));
    mem.set(base + 1, Value::Int(-1));
    assert_eq!(invoke_adder(&mut mem, &adder, base), 30);
}

#[test]
fn reference_captures_share_the_object() {
    let mut tr = TypeRegistry::new();
    let int64 = tr.find_type("int64").unwrap();
    let typ = tr.find_func_type(&FuncMeta {
        ins: vec![],
        outs: vec![int64],
    });
    // Closure over a slice reference: returns the current length.
    let body = Arc::new(Function {
        typ,
        caps: 1,
        ins: 0,
        outs: 1,
        frame_slots: 2,
        imp: Arc::new(|mem: &mut ValueStore, fr: Frame| {
            let items = mem
                .get(fr.cap(0))
                .as_slice()
                .cloned()
                .ok_or_else(|| RuntimeError::TypeMismatch("expected slice".into()))?;
            let len = items.borrow().len() as i64;
            mem.set(fr.ret(0), Value::Int(len));
            Ok(())
        }),
    });

    let shared = Value::slice(vec![Value::Int(1)]);
    let closure = FuncValue::close(body, vec![shared.clone()]);

    let mut mem = ValueStore::new(16);
    let base = mem.reserve(1).unwrap();

    mem.call(&closure, base, base).unwrap();
    assert_eq!(mem.get(base).as_int(), Some(1));

    // Mutation through the original alias is visible through the capture.
    shared.as_slice().unwrap().borrow_mut().push(Value::Int(2));
    mem.call(&closure, base, base).unwrap();
    assert_eq!(mem.get(base).as_int(), Some(2));
}
