//! SQL dialect formatting hooks.
//!
//! A query compiler asks the dialect how to spell identifiers, join keywords
//! and date-time literals. The default methods of [`Dialect`] implement the
//! base rules from [`generic`]; a dialect overrides only what differs.

pub mod generic;
mod mysql;

use chrono::NaiveDateTime;

pub use self::generic::GenericDialect;
pub use self::mysql::MySqlDialect;

/// Join kinds a compiler can ask the dialect to spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Join,
    InnerJoin,
    CrossJoin,
    LeftJoin,
    RightJoin,
    LeftOuterJoin,
    RightOuterJoin,
    FullOuterJoin,
}

/// Formatting rules for one database product.
///
/// All methods are pure. Inputs are assumed to be valid identifiers.
pub trait Dialect {
    fn name(&self) -> &'static str;

    /// Quoting used by every identifier hook unless overridden.
    fn quote_identifier(&self, name: &str) -> String {
        generic::quote_identifier(name)
    }

    fn quote_table_alias(&self, alias: &str) -> String {
        self.quote_identifier(alias)
    }

    fn quote_table_name(&self, name: &str) -> String {
        self.quote_identifier(name)
    }

    fn quote_database_name(&self, database: &str) -> String {
        self.quote_identifier(database)
    }

    fn quote_column_name(&self, name: &str) -> String {
        self.quote_identifier(name)
    }

    fn quote_column_alias(&self, alias: &str) -> String {
        self.quote_identifier(alias)
    }

    /// Quotes the table qualifier of a column reference (`t1` in `t1.col`).
    fn quote_column_table(&self, table: &str) -> String {
        self.quote_identifier(table)
    }

    /// Keyword placed between two joined tables, surrounding spaces included.
    fn format_join_type(&self, join: JoinType) -> &'static str {
        generic::format_join_type(join)
    }

    fn format_datetime(&self, value: &NaiveDateTime) -> String {
        generic::format_datetime(value)
    }

    /// `[database.]table[ AS alias]`
    fn format_table_ref(&self, database: Option<&str>, table: &str, alias: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(database) = database {
            out.push_str(&self.quote_database_name(database));
            out.push('.');
        }
        out.push_str(&self.quote_table_name(table));
        if let Some(alias) = alias {
            out.push_str(" AS ");
            out.push_str(&self.quote_table_alias(alias));
        }
        out
    }

    /// `[table.]column[ AS alias]`
    fn format_column_ref(&self, table: Option<&str>, column: &str, alias: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(table) = table {
            out.push_str(&self.quote_column_table(table));
            out.push('.');
        }
        out.push_str(&self.quote_column_name(column));
        if let Some(alias) = alias {
            out.push_str(" AS ");
            out.push_str(&self.quote_column_alias(alias));
        }
        out
    }
}
