use types::{FuncMeta, TypeDescriptor, TypeError, TypeRegistry, BASIC_TYPES};

#[test]
fn basics_are_preregistered() {
    let tr = TypeRegistry::new();
    for name in BASIC_TYPES {
        let id = tr.find_type(name).expect("basic type missing");
        match tr.get(id) {
            TypeDescriptor::Basic(n) => assert_eq!(n, name),
            other => panic!("expected basic descriptor, got {other:?}"),
        }
    }
}

#[test]
fn unknown_names_are_rejected() {
    let tr = TypeRegistry::new();
    for name in ["int", "varint", "blob", ""] {
        assert_eq!(
            tr.find_type(name),
            Err(TypeError::UnknownType(name.to_string()))
        );
    }
}

#[test]
fn func_types_intern_to_one_handle() {
    let mut tr = TypeRegistry::new();
    let bytes = tr.find_type("bytes").unwrap();
    let string = tr.find_type("string").unwrap();

    let first = tr.find_func_type(&FuncMeta {
        ins: vec![bytes],
        outs: vec![string],
    });
    let second = tr.find_func_type(&FuncMeta {
        ins: vec![bytes],
        outs: vec![string],
    });
    assert_eq!(first, second);

    // Flipping direction is a different signature.
    let flipped = tr.find_func_type(&FuncMeta {
        ins: vec![string],
        outs: vec![bytes],
    });
    assert_ne!(first, flipped);

    // So is adding an output.
    let wider = tr.find_func_type(&FuncMeta {
        ins: vec![bytes],
        outs: vec![string, string],
    });
    assert_ne!(first, wider);
}

#[test]
fn composites_intern_recursively() {
    let mut tr = TypeRegistry::new();
    let strings = tr.find_slice_type("string").unwrap();
    assert_eq!(strings, tr.find_slice_type("string").unwrap());

    let int64 = tr.find_type("int64").unwrap();
    let by_name = tr.find_map_type("string", "int64").unwrap();
    let string = tr.find_type("string").unwrap();
    assert_eq!(by_name, tr.map_of(string, int64));

    // Nested composite: map[string][]string built from resolved handles.
    let nested = tr.map_of(string, strings);
    assert_eq!(nested, tr.map_of(string, strings));
    assert_ne!(nested, by_name);
}

#[test]
fn nominal_types_register_once() {
    let mut tr = TypeRegistry::new();
    let string = tr.find_type("string").unwrap();
    let int64 = tr.find_type("int64").unwrap();

    let person = tr
        .add_message(
            "Person",
            vec![("name".to_string(), string), ("age".to_string(), int64)],
        )
        .unwrap();
    assert_eq!(tr.find_type("Person").unwrap(), person);

    // Same layout, different name: a distinct nominal type.
    let robot = tr
        .add_message(
            "Robot",
            vec![("name".to_string(), string), ("age".to_string(), int64)],
        )
        .unwrap();
    assert_ne!(person, robot);

    assert_eq!(
        tr.add_message("Person", vec![]),
        Err(TypeError::DuplicateRegistration("Person".to_string()))
    );
    // Nominal names share one namespace with basics and enums.
    assert_eq!(
        tr.add_enum("Person", vec![]),
        Err(TypeError::DuplicateRegistration("Person".to_string()))
    );
    assert_eq!(
        tr.add_message("string", vec![]),
        Err(TypeError::DuplicateRegistration("string".to_string()))
    );
}

#[test]
fn enums_map_names_to_int32() {
    let mut tr = TypeRegistry::new();
    let color = tr
        .add_enum(
            "Color",
            vec![("RED".to_string(), 0), ("BLUE".to_string(), 5)],
        )
        .unwrap();
    match tr.get(color) {
        TypeDescriptor::Enum { name, variants } => {
            assert_eq!(name, "Color");
            assert_eq!(variants[1], ("BLUE".to_string(), 5));
        }
        other => panic!("expected enum descriptor, got {other:?}"),
    }
    assert_eq!(tr.find_type("Color").unwrap(), color);
}

#[test]
fn signatures_over_nominals_compare_by_handle() {
    let mut tr = TypeRegistry::new();
    let person = tr.add_message("Person", vec![]).unwrap();
    let robot = tr.add_message("Robot", vec![]).unwrap();
    let string = tr.find_type("string").unwrap();

    let greet_person = tr.find_func_type(&FuncMeta {
        ins: vec![person],
        outs: vec![string],
    });
    let greet_robot = tr.find_func_type(&FuncMeta {
        ins: vec![robot],
        outs: vec![string],
    });
    assert_ne!(greet_person, greet_robot);
    assert_eq!(
        greet_person,
        tr.find_func_type(&FuncMeta {
            ins: vec![person],
            outs: vec![string],
        })
    );
}

#[test]
fn type_names_render_for_diagnostics() {
    let mut tr = TypeRegistry::new();
    let strings = tr.find_slice_type("string").unwrap();
    assert_eq!(tr.type_name(strings), "[]string");

    let by_name = tr.find_map_type("string", "int64").unwrap();
    assert_eq!(tr.type_name(by_name), "map[string]int64");

    let bytes = tr.find_type("bytes").unwrap();
    let string = tr.find_type("string").unwrap();
    let decode = tr.find_func_type(&FuncMeta {
        ins: vec![string],
        outs: vec![bytes],
    });
    assert_eq!(tr.type_name(decode), "func(string)(bytes)");
}
