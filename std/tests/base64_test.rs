use memory::{CallOps, FuncValue, RuntimeError, Value, ValueStore};
use proptest::prelude::*;
use resolve::{Compiled, LibraryRegistry, Session};

fn compile_base64() -> Compiled {
    let mut libs = LibraryRegistry::new();
    skiff_std::install(&mut libs).unwrap();
    let mut session = Session::new();
    session.include(&libs, "base64").unwrap();
    session.lock()
}

fn encode(prog: &Compiled, data: &[u8]) -> Result<String, RuntimeError> {
    let func = prog.function("EncodeBase64").expect("EncodeBase64 missing");
    let mut mem = ValueStore::new(8);
    let base = mem.reserve(2).unwrap();
    mem.set(base, Value::bytes(data));
    mem.call(&FuncValue::plain(func), base, base + 1)?;
    Ok(mem.get(base + 1).as_str().unwrap().to_string())
}

fn decode(prog: &Compiled, text: &str) -> Result<Vec<u8>, RuntimeError> {
    let func = prog.function("DecodeBase64").expect("DecodeBase64 missing");
    let mut mem = ValueStore::new(8);
    let base = mem.reserve(2).unwrap();
    mem.set(base, Value::str(text));
    mem.call(&FuncValue::plain(func), base, base + 1)?;
    Ok(mem.get(base + 1).as_bytes().unwrap().to_vec())
}

#[test]
fn known_vectors() {
    let prog = compile_base64();
    for (plain, encoded) in [
        (&b""[..], ""),
        (&b"f"[..], "Zg=="),
        (&b"fo"[..], "Zm8="),
        (&b"foo"[..], "Zm9v"),
        (&b"foob"[..], "Zm9vYg=="),
        (&b"fooba"[..], "Zm9vYmE="),
        (&b"foobar"[..], "Zm9vYmFy"),
        (&b"hello"[..], "aGVsbG8="),
    ] {
        assert_eq!(encode(&prog, plain).unwrap(), encoded);
        assert_eq!(decode(&prog, encoded).unwrap(), plain);
    }
}

#[test]
fn all_byte_values_round_trip() {
    let prog = compile_base64();
    let data: Vec<u8> = (0..=255).collect();
    let text = encode(&prog, &data).unwrap();
    assert_eq!(decode(&prog, &text).unwrap(), data);
}

#[test]
fn malformed_input_fails_without_crashing_the_host() {
    let prog = compile_base64();
    for input in [
        "a",        // not a multiple of 4
        "aGVsbG8",  // truncated
        "aG!sbG8=", // outside the alphabet
        "=AAA",     // padding in the wrong position
        "A=AA",
        "AA=A",
        "====",
        "AAA=AAAA", // padding before the final quad
        "AAAA====",
    ] {
        match decode(&prog, input) {
            Err(RuntimeError::NativeCallFailure(_)) => {}
            other => panic!("decode({input:?}) should fail with NativeCallFailure, got {other:?}"),
        }
    }

    // The failure unwound one call only: the same program keeps working.
    assert_eq!(decode(&prog, "aGVsbG8=").unwrap(), b"hello");
}

proptest! {
    #[test]
    fn arbitrary_bytes_round_trip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let prog = compile_base64();
        let text = encode(&prog, &data).unwrap();
        prop_assert_eq!(decode(&prog, &text).unwrap(), data);
    }
}
