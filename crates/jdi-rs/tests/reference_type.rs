use jdi_rs::jdwp_types::{ErrorConstant, FieldId, Modifiers};
use jdi_rs::{Field, JdiError, ReferenceType, RemoteError};
use jdi_test_fixtures::{MockReferenceType, Query};
use test_log::test;

const LIST_SIGNATURE: &str =
    "<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Collection<TE;>;";

fn list() -> MockReferenceType {
    MockReferenceType::interface(2, "Ljava/util/List;").generic_signature(LIST_SIGNATURE)
}

#[test(tokio::test)]
async fn test_generic_name_of_generic_class() -> eyre::Result<()> {
    let hash_map = ReferenceType::new(
        MockReferenceType::class(1, "Ljava/util/HashMap;").generic_signature(
            "<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/util/AbstractMap<TK;TV;>;Ljava/util/Map<TK;TV;>;",
        ),
    );
    assert_eq!(hash_map.generic_name().await?, "java.util.HashMap<K,V>");
    assert_eq!(hash_map.name()?, "java.util.HashMap");
    Ok(())
}

#[test(tokio::test)]
async fn test_generic_name_of_plain_class() -> eyre::Result<()> {
    let string = ReferenceType::new(MockReferenceType::class(1, "Ljava/lang/String;"));
    assert_eq!(string.generic_name().await?, "java.lang.String");
    assert_eq!(string.generic_signature().await?, None);

    let entry = ReferenceType::new(MockReferenceType::class(3, "Ljava/util/Map$Entry;"));
    assert_eq!(entry.generic_name().await?, "java.util.Map$Entry");
    Ok(())
}

#[test(tokio::test)]
async fn test_generic_name_of_arrays_uses_component() -> eyre::Result<()> {
    let array = ReferenceType::new(MockReferenceType::array(10, "[Ljava/util/List;").component(list()));
    assert_eq!(array.generic_name().await?, "java.util.List<E>[]");

    let matrix = ReferenceType::new(
        MockReferenceType::array(11, "[[Ljava/util/List;")
            .component(MockReferenceType::array(10, "[Ljava/util/List;").component(list())),
    );
    assert_eq!(matrix.generic_name().await?, "java.util.List<E>[][]");
    assert_eq!(matrix.name()?, "java.util.List[][]");
    Ok(())
}

#[test(tokio::test)]
async fn test_generic_name_of_primitive_arrays() -> eyre::Result<()> {
    let ints = ReferenceType::new(
        MockReferenceType::array(20, "[[I")
            .component(MockReferenceType::array(21, "[I").primitive_component("I")),
    );
    assert_eq!(ints.generic_name().await?, "int[][]");
    Ok(())
}

#[test(tokio::test)]
async fn test_generic_name_falls_back_when_component_not_loaded() -> eyre::Result<()> {
    let array = ReferenceType::new(
        MockReferenceType::array(30, "[[Lcom/acme/Missing;")
            .component(
                MockReferenceType::array(31, "[Lcom/acme/Missing;")
                    .unloaded_component("Lcom/acme/Missing;"),
            ),
    );
    assert_eq!(array.generic_name().await?, "com.acme.Missing[][]");
    Ok(())
}

#[test(tokio::test)]
async fn test_generic_name_propagates_other_component_failures() {
    let array = ReferenceType::new(
        MockReferenceType::array(40, "[Ljava/util/List;")
            .component(list())
            .fail(Query::ComponentType, ErrorConstant::VmDead),
    );
    let err = array.generic_name().await.expect_err("the VM is dead");
    assert!(matches!(
        err,
        JdiError::RemoteQueryFailed {
            operation: "component type",
            source: RemoteError::Jdwp(ErrorConstant::VmDead),
        }
    ));
}

#[test(tokio::test)]
async fn test_generic_name_of_malformed_signature() {
    let broken = ReferenceType::new(MockReferenceType::class(50, "Ljava/lang/String"));
    let err = broken.generic_name().await.expect_err("missing terminator");
    assert!(matches!(err, JdiError::MalformedSignature(_)));
    assert!(err.remote_error().is_none());
}

#[test(tokio::test)]
async fn test_name_of_too_many_array_dimensions() {
    let signature = format!("{}I", "[".repeat(100_000));
    let deep = ReferenceType::new(MockReferenceType::array(51, signature).primitive_component("I"));
    let err = deep.name().expect_err("too many dimensions");
    assert!(matches!(err, JdiError::MalformedSignature(_)));
}

#[test(tokio::test)]
async fn test_field_only_returns_static_fields() -> eyre::Result<()> {
    let remote = MockReferenceType::class(60, "Lcom/acme/Counter;")
        .field(Field::new(
            FieldId::new(1),
            "MAX",
            "I",
            Modifiers::from_bits(Modifiers::STATIC | Modifiers::FINAL),
        ))
        .field(Field::new(FieldId::new(2), "count", "I", Modifiers::default()));
    let counter = ReferenceType::new(remote.clone());

    let max = counter.field("MAX").await.expect("MAX is static");
    assert_eq!(max.id(), FieldId::new(1));
    assert!(counter.field("count").await.is_none());
    assert!(counter.field("missing").await.is_none());
    assert_eq!(remote.query_count(Query::FieldByName), 3);
    Ok(())
}

#[test(tokio::test)]
async fn test_failed_field_lookup_is_not_found() {
    let counter = ReferenceType::new(
        MockReferenceType::class(61, "Lcom/acme/Counter;")
            .field(Field::new(
                FieldId::new(1),
                "MAX",
                "I",
                Modifiers::from_bits(Modifiers::STATIC),
            ))
            .fail(Query::FieldByName, ErrorConstant::InvalidObject),
    );
    assert!(counter.field("MAX").await.is_none());
}

#[test(tokio::test)]
async fn test_class_object_and_loader() -> eyre::Result<()> {
    let bootstrap = ReferenceType::new(MockReferenceType::class(70, "Ljava/lang/Object;").class_object(7));
    assert_eq!(bootstrap.class_object().await?.get(), 7);
    assert_eq!(bootstrap.class_loader().await?, None);

    let loaded = ReferenceType::new(MockReferenceType::class(71, "Lcom/acme/App;").class_loader(42));
    assert_eq!(loaded.class_loader().await?.map(|loader| loader.get()), Some(42));
    Ok(())
}

#[test(tokio::test)]
async fn test_class_object_and_loader_failures_propagate() {
    let dead = ReferenceType::new(
        MockReferenceType::class(72, "Lcom/acme/App;")
            .fail(Query::ClassObject, ErrorConstant::VmDead)
            .fail(Query::ClassLoader, ErrorConstant::InvalidClassLoader),
    );
    let err = dead.class_object().await.expect_err("the VM is dead");
    assert!(matches!(
        err,
        JdiError::RemoteQueryFailed {
            operation: "class object",
            ..
        }
    ));
    let err = dead.class_loader().await.expect_err("invalid loader");
    assert!(matches!(
        err.remote_error(),
        Some(RemoteError::Jdwp(ErrorConstant::InvalidClassLoader))
    ));
}

#[test(tokio::test)]
async fn test_source_paths() -> eyre::Result<()> {
    let remote = MockReferenceType::class(80, "Lcom/acme/Page;")
        .stratum("Java", ["com/acme/Page.java"])
        .stratum("JSP", ["page.jsp", "header.jsp"])
        .default_stratum("JSP");
    let page = ReferenceType::new(remote);

    assert_eq!(page.source_paths("Java").await, ["com/acme/Page.java"]);
    assert_eq!(page.source_paths("JSP").await, ["page.jsp", "header.jsp"]);
    assert!(page.source_paths("Groovy").await.is_empty());
    assert_eq!(page.available_strata().await?, ["Java", "JSP"]);
    assert_eq!(page.default_stratum().await?, "JSP");
    Ok(())
}

#[test(tokio::test)]
async fn test_failed_source_paths_are_empty() {
    let page = ReferenceType::new(
        MockReferenceType::class(81, "Lcom/acme/Page;")
            .stratum("Java", ["com/acme/Page.java"])
            .fail(Query::SourcePaths, ErrorConstant::InvalidObject),
    );
    assert!(page.source_paths("Java").await.is_empty());
}

#[test(tokio::test)]
async fn test_strata_are_not_cached() -> eyre::Result<()> {
    let remote = MockReferenceType::class(82, "Lcom/acme/Page;").stratum("Java", ["Page.java"]);
    let page = ReferenceType::new(remote.clone());
    page.available_strata().await?;
    page.available_strata().await?;
    assert_eq!(remote.query_count(Query::AvailableStrata), 2);
    Ok(())
}

#[test(tokio::test)]
async fn test_disconnected_queries() {
    let remote = MockReferenceType::class(90, "Lcom/acme/App;")
        .stratum("Java", ["App.java"])
        .disconnect(Query::ClassObject)
        .disconnect(Query::SourcePaths)
        .disconnect(Query::FieldByName);
    let app = ReferenceType::new(remote.clone());

    let err = app.class_object().await.expect_err("the connection is closed");
    match err.remote_error() {
        Some(RemoteError::Io(io)) => assert_eq!(io.kind(), std::io::ErrorKind::BrokenPipe),
        other => panic!("expected a transport failure, got {other:?}"),
    }
    assert!(matches!(
        err,
        JdiError::RemoteQueryFailed {
            operation: "class object",
            ..
        }
    ));

    assert!(app.source_paths("Java").await.is_empty());
    assert!(app.field("MAX").await.is_none());
    assert_eq!(remote.query_count(Query::SourcePaths), 1);
}
