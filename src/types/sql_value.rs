use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Represents a SQL parameter or column value in a driver-agnostic way.
/// Drivers are responsible for converting these to their native types.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Int32(i32),
    Int64(i64),
    UInt64(u64),
    Float64(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    DateTime(NaiveDateTime),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Returns the value as text when it is textual.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a signed integer when it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int32(i) => Some(i64::from(*i)),
            SqlValue::Int64(i) => Some(*i),
            SqlValue::UInt64(u) => i64::try_from(*u).ok(),
            SqlValue::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// JSON view of the value, used to hydrate caller record types.
    pub(crate) fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            SqlValue::Null => Value::Null,
            SqlValue::Text(s) => Value::String(s.clone()),
            SqlValue::Int32(i) => Value::from(*i),
            SqlValue::Int64(i) => Value::from(*i),
            SqlValue::UInt64(u) => Value::from(*u),
            SqlValue::Float64(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            SqlValue::Bool(b) => Value::Bool(*b),
            SqlValue::Bytes(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
            SqlValue::DateTime(dt) => Value::String(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int32(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int64(value)
    }
}

impl From<u64> for SqlValue {
    fn from(value: u64) -> Self {
        SqlValue::UInt64(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float64(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Bytes(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        SqlValue::DateTime(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

impl From<&SqlValue> for mysql_async::Value {
    fn from(value: &SqlValue) -> Self {
        match value {
            SqlValue::Null => mysql_async::Value::NULL,
            SqlValue::Text(s) => mysql_async::Value::Bytes(s.as_bytes().to_vec()),
            SqlValue::Int32(i) => mysql_async::Value::Int(i64::from(*i)),
            SqlValue::Int64(i) => mysql_async::Value::Int(*i),
            SqlValue::UInt64(u) => mysql_async::Value::UInt(*u),
            SqlValue::Float64(f) => mysql_async::Value::Double(*f),
            SqlValue::Bool(b) => mysql_async::Value::Int(i64::from(*b)),
            SqlValue::Bytes(b) => mysql_async::Value::Bytes(b.clone()),
            SqlValue::DateTime(dt) => match u16::try_from(dt.year()) {
                // month, day and time fields are bounded well below u8::MAX
                Ok(year) => mysql_async::Value::Date(
                    year,
                    dt.month() as u8,
                    dt.day() as u8,
                    dt.hour() as u8,
                    dt.minute() as u8,
                    dt.second() as u8,
                    dt.nanosecond() / 1_000,
                ),
                // Out of range for the binary protocol; the server rejects the text
                Err(_) => mysql_async::Value::Bytes(
                    dt.format("%Y-%m-%d %H:%M:%S%.f").to_string().into_bytes(),
                ),
            },
        }
    }
}

impl From<mysql_async::Value> for SqlValue {
    fn from(value: mysql_async::Value) -> Self {
        match value {
            mysql_async::Value::NULL => SqlValue::Null,
            mysql_async::Value::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(s) => SqlValue::Text(s),
                Err(e) => SqlValue::Bytes(e.into_bytes()),
            },
            mysql_async::Value::Int(i) => SqlValue::Int64(i),
            mysql_async::Value::UInt(u) => SqlValue::UInt64(u),
            mysql_async::Value::Float(f) => SqlValue::Float64(f64::from(f)),
            mysql_async::Value::Double(d) => SqlValue::Float64(d),
            mysql_async::Value::Date(year, month, day, hour, minute, second, micros) => {
                NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
                    .and_then(|date| {
                        date.and_hms_micro_opt(
                            u32::from(hour),
                            u32::from(minute),
                            u32::from(second),
                            micros,
                        )
                    })
                    .map(SqlValue::DateTime)
                    // Zero dates have no chrono representation
                    .unwrap_or_else(|| {
                        SqlValue::Text(format!(
                            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                            year, month, day, hour, minute, second
                        ))
                    })
            }
            mysql_async::Value::Time(negative, days, hours, minutes, seconds, micros) => {
                let sign = if negative { "-" } else { "" };
                let total_hours = days * 24 + u32::from(hours);
                let mut text = format!("{}{:02}:{:02}:{:02}", sign, total_hours, minutes, seconds);
                if micros > 0 {
                    text.push_str(&format!(".{:06}", micros));
                }
                SqlValue::Text(text)
            }
        }
    }
}
