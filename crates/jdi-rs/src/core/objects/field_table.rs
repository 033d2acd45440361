use std::future::Future;

use tokio::sync::OnceCell;
use tracing::trace;

use crate::{Field, JdiError, RemoteError};

/// The field names of one reference type, each table queried at most once.
///
/// Concurrent callers of an empty table wait for the first query instead of issuing their own. A failed
/// query leaves the table empty, so a later call queries again.
#[derive(Debug, Default)]
pub struct FieldTable {
    declared: OnceCell<Vec<String>>,
    all: OnceCell<Vec<String>>,
}

impl FieldTable {
    /// Creates empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the declared field names, running `query` if they are not known yet
    pub async fn declared<F, Fut>(&self, query: F) -> Result<&[String], JdiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Field>, RemoteError>>,
    {
        populate(&self.declared, "declared fields", query).await
    }

    /// Gets the names of all fields, inherited ones included, running `query` if they are not known yet
    pub async fn all<F, Fut>(&self, query: F) -> Result<&[String], JdiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Field>, RemoteError>>,
    {
        populate(&self.all, "all fields", query).await
    }

    /// The declared field names, if already queried
    pub fn cached_declared(&self) -> Option<&[String]> {
        self.declared.get().map(Vec::as_slice)
    }

    /// The names of all fields, if already queried
    pub fn cached_all(&self) -> Option<&[String]> {
        self.all.get().map(Vec::as_slice)
    }
}

async fn populate<'a, F, Fut>(
    slot: &'a OnceCell<Vec<String>>,
    operation: &'static str,
    query: F,
) -> Result<&'a [String], JdiError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<Field>, RemoteError>>,
{
    if let Some(names) = slot.get() {
        trace!(operation, "field table already populated");
        return Ok(names.as_slice());
    }
    let names = slot
        .get_or_try_init(|| async move {
            trace!(operation, "querying target VM");
            let fields = query().await.map_err(JdiError::remote(operation))?;
            Ok::<_, JdiError>(fields.into_iter().map(Field::into_name).collect())
        })
        .await?;
    Ok(names.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdwp_types::{ErrorConstant, FieldId, Modifiers};

    fn field(name: &str) -> Field {
        Field::new(FieldId::new(1), name, "I", Modifiers::default())
    }

    #[tokio::test]
    async fn test_populated_once() {
        let table = FieldTable::new();
        assert!(table.cached_declared().is_none());

        let names = table
            .declared(|| async { Ok::<_, RemoteError>(vec![field("a"), field("b")]) })
            .await
            .expect("query succeeds");
        assert_eq!(names, ["a", "b"]);

        let names = table
            .declared(|| async { Err::<Vec<Field>, _>(RemoteError::from(ErrorConstant::Internal)) })
            .await
            .expect("served from the table");
        assert_eq!(names, ["a", "b"]);
        assert!(table.cached_all().is_none());
    }

    #[tokio::test]
    async fn test_failed_query_is_retried() {
        let table = FieldTable::new();
        let err = table
            .all(|| async { Err::<Vec<Field>, _>(RemoteError::from(ErrorConstant::VmDead)) })
            .await
            .expect_err("query fails");
        assert!(matches!(
            err,
            JdiError::RemoteQueryFailed {
                operation: "all fields",
                source: RemoteError::Jdwp(ErrorConstant::VmDead)
            }
        ));

        let names = table
            .all(|| async { Ok::<_, RemoteError>(vec![field("a"), field("a")]) })
            .await
            .expect("query succeeds");
        assert_eq!(names, ["a", "a"]);
    }
}
