use jdi_signature::{render_generic_name, type_name_from_descriptor, type_parameters};

#[test]
fn test_type_arguments_of_a_type_signature() {
    let name = render_generic_name(
        "Ljava/util/List;",
        Some("Ljava/util/List<Ljava/lang/String;>;"),
    )
    .expect("valid signatures");
    assert_eq!(name, "java.util.List<java.lang.String>");
}

#[test]
fn test_type_parameters_of_a_class_signature() {
    let name = render_generic_name(
        "Ljava/util/HashMap;",
        Some("<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/util/AbstractMap<TK;TV;>;Ljava/util/Map<TK;TV;>;Ljava/lang/Cloneable;Ljava/io/Serializable;"),
    )
    .expect("valid signatures");
    assert_eq!(name, "java.util.HashMap<K,V>");
}

#[test]
fn test_nested_bounds_do_not_split_parameters() {
    let generic = "<K:Ljava/util/Map<Ljava/lang/String;Ljava/util/List<Ljava/lang/Integer;>;>;V:Ljava/lang/Object;>Ljava/lang/Object;";
    let parameters = type_parameters(generic).expect("valid class signature");
    let names: Vec<_> = parameters.iter().map(|p| p.name()).collect();
    assert_eq!(names, ["K", "V"]);
    assert_eq!(
        parameters[0]
            .class_bound()
            .expect("K has a class bound")
            .to_string(),
        "java.util.Map<java.lang.String,java.util.List<java.lang.Integer>>"
    );

    let name = render_generic_name("Lcom/acme/Cache;", Some(generic)).expect("valid signatures");
    assert_eq!(name, "com.acme.Cache<K,V>");
}

#[test]
fn test_absent_generic_signature_matches_erased_name() {
    for descriptor in [
        "Ljava/lang/String;",
        "[[Ljava/lang/String;",
        "Ljava/util/Map$Entry;",
        "[I",
        "J",
    ] {
        let erased = type_name_from_descriptor(descriptor).expect("valid descriptor");
        assert_eq!(
            render_generic_name(descriptor, None).expect("valid descriptor"),
            erased
        );
        assert_eq!(
            render_generic_name(descriptor, Some("")).expect("valid descriptor"),
            erased
        );
    }
}

#[test]
fn test_arrays_ignore_the_generic_signature() {
    let name = render_generic_name("[[Ljava/util/List;", Some("<E:Ljava/lang/Object;>Ljava/lang/Object;"))
        .expect("valid signatures");
    assert_eq!(name, "java.util.List[][]");
}

#[test]
fn test_class_signature_without_type_parameters() {
    let name = render_generic_name(
        "Lcom/acme/Names;",
        Some("Ljava/util/ArrayList<Ljava/lang/String;>;Ljava/io/Serializable;"),
    )
    .expect("valid signatures");
    assert_eq!(name, "com.acme.Names");

    let name = render_generic_name(
        "Lcom/acme/Names;",
        Some("Ljava/util/ArrayList<Ljava/lang/String;>;"),
    )
    .expect("valid signatures");
    assert_eq!(name, "com.acme.Names");
}

#[test]
fn test_malformed_input_is_reported() {
    let err = render_generic_name("Ljava/lang/String", None).expect_err("missing terminator");
    assert_eq!(err.signature(), "Ljava/lang/String");
    render_generic_name("Ljava/util/List;", Some("<E:>"))
        .expect_err("type parameter list without a class");
}

#[test]
fn test_inner_class_type_signature() {
    let name = render_generic_name(
        "Lcom/acme/Outer$Inner;",
        Some("Lcom/acme/Outer<TK;>.Inner<TV;>;"),
    )
    .expect("valid signatures");
    assert_eq!(name, "com.acme.Outer$Inner<V>");

    let name = render_generic_name("Lcom/acme/Outer$Inner;", Some("Lcom/acme/Outer<TK;>.Inner;"))
        .expect("valid signatures");
    assert_eq!(name, "com.acme.Outer$Inner");

    let name = render_generic_name("Lcom/acme/Outer;", Some("Lcom/acme/Outer<TK;>.Inner<TV;>;"))
        .expect("valid signatures");
    assert_eq!(name, "com.acme.Outer");
}

#[test]
fn test_too_many_array_dimensions() {
    let descriptor = format!("{}I", "[".repeat(100_000));
    render_generic_name(&descriptor, None).expect_err("too many dimensions");
    type_name_from_descriptor(&descriptor).expect_err("too many dimensions");
}
