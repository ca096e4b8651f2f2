//! Base formatting rules shared by every dialect.
//!
//! [`Dialect`](super::Dialect) uses these as its default methods. Dialects
//! that override a hook can still call them for the cases they do not change.

use chrono::NaiveDateTime;

use super::{Dialect, JoinType};

/// Identifiers are emitted as given.
pub fn quote_identifier(name: &str) -> String {
    name.to_string()
}

pub fn format_join_type(join: JoinType) -> &'static str {
    match join {
        JoinType::Join => " JOIN ",
        JoinType::InnerJoin => " INNER JOIN ",
        JoinType::CrossJoin => ", ",
        JoinType::LeftJoin => " LEFT JOIN ",
        JoinType::RightJoin => " RIGHT JOIN ",
        JoinType::LeftOuterJoin => " LEFT OUTER JOIN ",
        JoinType::RightOuterJoin => " RIGHT OUTER JOIN ",
        JoinType::FullOuterJoin => " FULL OUTER JOIN ",
    }
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Dialect that applies the base rules unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_generic_passthrough() {
        let dialect = GenericDialect;
        assert_eq!(dialect.quote_table_name("users"), "users");
        assert_eq!(dialect.format_join_type(JoinType::CrossJoin), ", ");
        assert_eq!(dialect.format_join_type(JoinType::LeftJoin), " LEFT JOIN ");
        assert_eq!(
            dialect.format_table_ref(Some("db"), "table", Some("t1")),
            "db.table AS t1"
        );
    }

    #[test]
    fn test_generic_datetime() {
        let value = NaiveDate::from_ymd_opt(2022, 6, 4)
            .unwrap()
            .and_hms_opt(17, 40, 34)
            .unwrap();
        assert_eq!(GenericDialect.format_datetime(&value), "2022-06-04T17:40:34");
    }
}
