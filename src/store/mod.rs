//! Content store - parameterized read queries (and one insert) against the
//! relational site database.
//!
//! Rows are passed through untouched: every row comes back as a JSON object
//! keyed by column name, and handlers splice those objects straight into
//! their responses.

pub mod queries;
pub mod schema;
mod sqlite;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use sqlite::SqliteStore;

/// A database row as a JSON object, keyed by column name
pub type Row = serde_json::Map<String, Value>;

/// Content store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Database not found: {0}")]
    Missing(String),
}

/// A bound query parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Int(i64),
    Text(String),
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Param::Null)
    }
}

impl From<&Value> for Param {
    /// Row values used as parameters of follow-up queries (e.g. a row id)
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Param::Null,
            Value::Number(n) => n.as_i64().map(Param::Int).unwrap_or(Param::Null),
            Value::String(s) => Param::Text(s.clone()),
            other => Param::Text(other.to_string()),
        }
    }
}

/// A SQL statement with its positional parameters
#[derive(Debug, Clone)]
pub struct Query {
    pub sql: &'static str,
    pub params: Vec<Param>,
}

impl Query {
    pub fn new(sql: &'static str) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    /// Bind the next positional parameter
    pub fn bind(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }
}

/// Read/insert access to the content database
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// First row of the result, if any
    async fn first(&self, query: Query) -> Result<Option<Row>, StoreError>;

    /// All rows in the order the query declares
    async fn all(&self, query: Query) -> Result<Vec<Row>, StoreError>;

    /// Execute a write statement, returning the number of affected rows
    async fn run(&self, query: Query) -> Result<usize, StoreError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_bind_order() {
        let query = Query::new("SELECT ?, ?, ?")
            .bind("drain-cleaning")
            .bind(3i64)
            .bind(None::<String>);
        assert_eq!(
            query.params,
            vec![
                Param::Text("drain-cleaning".to_string()),
                Param::Int(3),
                Param::Null
            ]
        );
    }

    #[test]
    fn test_param_from_row_value() {
        assert_eq!(Param::from(&serde_json::json!(7)), Param::Int(7));
        assert_eq!(Param::from(&Value::Null), Param::Null);
        assert_eq!(
            Param::from(&serde_json::json!("x")),
            Param::Text("x".to_string())
        );
    }
}
