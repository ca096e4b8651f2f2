use std::fmt;

use crate::types::SqlValue;

/// Which execution path a compiled statement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Procedure,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
            StatementKind::Procedure => "procedure",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder values of a compiled statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Bindings {
    #[default]
    Empty,
    /// Values for `?` placeholders, in order.
    Positional(Vec<SqlValue>),
    /// Values for `:name` placeholders. Names are stored without the colon.
    Named(Vec<(String, SqlValue)>),
}

impl Bindings {
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        Bindings::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn named<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        Bindings::Named(
            values
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            Bindings::Empty => 0,
            Bindings::Positional(values) => values.len(),
            Bindings::Named(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a named binding.
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        match self {
            Bindings::Named(values) => values.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<&Bindings> for mysql_async::Params {
    fn from(bindings: &Bindings) -> Self {
        match bindings {
            Bindings::Empty => mysql_async::Params::Empty,
            Bindings::Positional(values) => {
                mysql_async::Params::Positional(values.iter().map(Into::into).collect())
            }
            Bindings::Named(values) => mysql_async::Params::from(
                values
                    .iter()
                    .map(|(name, value)| (name.clone(), mysql_async::Value::from(value)))
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

/// SQL text with its bindings and the kind of statement that produced it.
/// Built by a query compiler; the driver only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStatement {
    sql: String,
    bindings: Bindings,
    kind: StatementKind,
}

impl CompiledStatement {
    pub fn new(kind: StatementKind, sql: impl Into<String>, bindings: Bindings) -> Self {
        Self {
            sql: sql.into(),
            bindings,
            kind,
        }
    }

    pub fn select(sql: impl Into<String>) -> Self {
        Self::new(StatementKind::Select, sql, Bindings::Empty)
    }

    pub fn insert(sql: impl Into<String>) -> Self {
        Self::new(StatementKind::Insert, sql, Bindings::Empty)
    }

    pub fn update(sql: impl Into<String>) -> Self {
        Self::new(StatementKind::Update, sql, Bindings::Empty)
    }

    pub fn delete(sql: impl Into<String>) -> Self {
        Self::new(StatementKind::Delete, sql, Bindings::Empty)
    }

    pub fn procedure(sql: impl Into<String>) -> Self {
        Self::new(StatementKind::Procedure, sql, Bindings::Empty)
    }

    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_bindings() {
        let bindings = Bindings::named([("v1", "2022-06-04 17:40:34")]);
        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings.get("v1"),
            Some(&SqlValue::Text("2022-06-04 17:40:34".to_string()))
        );
        assert_eq!(bindings.get("v2"), None);
    }

    #[test]
    fn test_statement_constructors() {
        let stmt = CompiledStatement::insert("INSERT INTO `users` (`name`) VALUES (?)")
            .with_bindings(Bindings::positional(["Alice"]));

        assert_eq!(stmt.kind(), StatementKind::Insert);
        assert_eq!(stmt.sql(), "INSERT INTO `users` (`name`) VALUES (?)");
        assert_eq!(stmt.bindings().len(), 1);
        assert!(CompiledStatement::select("SELECT 1").bindings().is_empty());
    }

    #[test]
    fn test_to_mysql_params() {
        let params = mysql_async::Params::from(&Bindings::positional([1, 2]));
        assert_eq!(
            params,
            mysql_async::Params::Positional(vec![
                mysql_async::Value::Int(1),
                mysql_async::Value::Int(2)
            ])
        );
        assert_eq!(
            mysql_async::Params::from(&Bindings::Empty),
            mysql_async::Params::Empty
        );
    }
}
