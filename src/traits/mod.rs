mod connection;

pub use connection::{ClientResult, Connection, Connector};
