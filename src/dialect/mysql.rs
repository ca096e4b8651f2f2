//! MySQL dialect: backtick identifiers, explicit `CROSS JOIN`,
//! `YYYY-MM-DD HH:MM:SS` date-time literals.

use chrono::NaiveDateTime;

use super::{generic, Dialect, JoinType};

/// MySQL/MariaDB dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    // Embedded backticks are passed through unescaped.
    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name)
    }

    fn format_join_type(&self, join: JoinType) -> &'static str {
        match join {
            JoinType::CrossJoin => " CROSS JOIN ",
            other => generic::format_join_type(other),
        }
    }

    fn format_datetime(&self, value: &NaiveDateTime) -> String {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_quotes_with_backticks() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.quote_table_alias("t1"), "`t1`");
        assert_eq!(dialect.quote_table_name("table"), "`table`");
        assert_eq!(dialect.quote_database_name("db"), "`db`");
        assert_eq!(dialect.quote_column_name("firstCol"), "`firstCol`");
        assert_eq!(dialect.quote_column_alias("a"), "`a`");
        assert_eq!(dialect.quote_column_table("t1"), "`t1`");
    }

    #[test]
    fn test_embedded_backtick_is_not_escaped() {
        assert_eq!(MySqlDialect.quote_column_name("we`ird"), "`we`ird`");
    }

    #[test]
    fn test_cross_join() {
        assert_eq!(MySqlDialect.format_join_type(JoinType::CrossJoin), " CROSS JOIN ");
        assert_eq!(MySqlDialect.format_join_type(JoinType::InnerJoin), " INNER JOIN ");
    }

    #[test]
    fn test_datetime_drops_fraction() {
        let value = NaiveDate::from_ymd_opt(2022, 6, 4)
            .unwrap()
            .and_hms_micro_opt(17, 40, 34, 250_000)
            .unwrap();
        assert_eq!(MySqlDialect.format_datetime(&value), "2022-06-04 17:40:34");
    }
}
