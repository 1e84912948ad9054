//! SQLite-backed content store

use async_trait::async_trait;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, OpenFlags, ToSql};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{ContentStore, Param, Query, Row, StoreError};

/// Content store over a SQLite database file.
///
/// Each query opens its own connection on the blocking pool, so the
/// independent queries of one handler run concurrently instead of queueing
/// behind a shared connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open an existing database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(StoreError::Missing(path.display().to_string()));
        }
        Ok(Self { path })
    }

    async fn with_connection<T, F>(&self, read_only: bool, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let flags = if read_only {
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
            } else {
                OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
            };
            let conn = Connection::open_with_flags(&path, flags)?;
            conn.busy_timeout(Duration::from_secs(5))?;
            f(&conn).map_err(StoreError::from)
        })
        .await?
    }
}

impl ToSql for Param {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Param::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Param::Int(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            Param::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn first(&self, query: Query) -> Result<Option<Row>, StoreError> {
        tracing::debug!(sql = query.sql, "first");
        self.with_connection(true, move |conn| {
            let mut rows = select(conn, &query)?;
            Ok(if rows.is_empty() {
                None
            } else {
                Some(rows.swap_remove(0))
            })
        })
        .await
    }

    async fn all(&self, query: Query) -> Result<Vec<Row>, StoreError> {
        tracing::debug!(sql = query.sql, "all");
        self.with_connection(true, move |conn| select(conn, &query))
            .await
    }

    async fn run(&self, query: Query) -> Result<usize, StoreError> {
        tracing::debug!(sql = query.sql, "run");
        self.with_connection(false, move |conn| {
            conn.execute(query.sql, params_from_iter(query.params.iter()))
        })
        .await
    }
}

fn select(conn: &Connection, query: &Query) -> Result<Vec<Row>, rusqlite::Error> {
    let mut stmt = conn.prepare(query.sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let rows = stmt.query_map(params_from_iter(query.params.iter()), |row| {
        let mut object = Row::new();
        for (i, name) in columns.iter().enumerate() {
            object.insert(name.clone(), column_value(row.get_ref(i)?));
        }
        Ok(object)
    })?;

    rows.collect()
}

/// Convert a SQLite value into its JSON representation
fn column_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::queries;
    use crate::store::testing::{broken_store, seeded_store};

    #[tokio::test]
    async fn test_first_returns_row_as_object() {
        let (_dir, store) = seeded_store();
        let site = store
            .first(Query::new(queries::SITE_INFO))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(site["id"], 1);
        assert_eq!(site["name"], "Austin Pro Plumbing");
        assert!(site["logo_url"].is_null());
    }

    #[tokio::test]
    async fn test_first_missing_row() {
        let (_dir, store) = seeded_store();
        let row = store
            .first(Query::new(queries::SERVICE_BY_SLUG).bind("no-such-service"))
            .await
            .unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_columns_keep_select_order() {
        let (_dir, store) = seeded_store();
        let row = store
            .first(Query::new(queries::SITE_CONTACT))
            .await
            .unwrap()
            .unwrap();
        let keys: Vec<_> = row.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "phone", "email"]);
    }

    #[tokio::test]
    async fn test_run_inserts_row() {
        let (_dir, store) = seeded_store();
        let changed = store
            .run(
                Query::new(queries::INSERT_CONTACT)
                    .bind("Ann")
                    .bind("ann@example.com")
                    .bind(None::<String>)
                    .bind(None::<String>)
                    .bind(None::<String>),
            )
            .await
            .unwrap();
        assert_eq!(changed, 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let (_dir, store) = broken_store();
        assert!(store.all(Query::new(queries::PUBLISHED_SERVICES)).await.is_err());
    }

    #[test]
    fn test_open_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SqliteStore::open(dir.path().join("missing.db")).unwrap_err();
        assert!(matches!(err, StoreError::Missing(_)));
    }
}
