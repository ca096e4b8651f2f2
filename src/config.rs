use std::fmt;

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_PASSWORD: &str = "";
pub const DEFAULT_ENCODING: &str = "utf8";

/// Parameters used to open a MySQL connection.
///
/// Deserializes from any serde source; missing fields take the defaults.
///
/// # Example
/// ```
/// use mysqlrs::ConnectParams;
///
/// let params = ConnectParams::new("db.internal").port(3307).database("shop");
/// assert_eq!(
///     params.dsn().to_string(),
///     "host=db.internal;charset=utf8;port=3307;dbname=shop"
/// );
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectParams {
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    pub database: Option<String>,
    pub encoding: Option<String>,
}

impl ConnectParams {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Builds the connection string for these parameters.
    pub fn dsn(&self) -> Dsn {
        Dsn {
            host: self.host.clone(),
            charset: self
                .encoding
                .clone()
                .unwrap_or_else(|| DEFAULT_ENCODING.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            dbname: self.database.clone(),
        }
    }
}

impl Default for ConnectParams {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: None,
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            database: None,
            encoding: None,
        }
    }
}

impl fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Connection string: `host=<host>;charset=<encoding>;port=<port>[;dbname=<database>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    pub host: String,
    pub charset: String,
    pub port: u16,
    pub dbname: Option<String>,
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host={};charset={};port={}", self.host, self.charset, self.port)?;
        if let Some(dbname) = &self.dbname {
            write!(f, ";dbname={}", dbname)?;
        }
        Ok(())
    }
}
