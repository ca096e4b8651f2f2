mod mysql_async;

pub use self::in_memory_test::{
    InMemoryTestConnection, InMemoryTestConnector, InMemoryTestResponse,
    InMemoryTestResponseBuilder, RecordedConnect, RecordedStatement,
};
pub use self::mysql_async::{AsyncMysqlConnection, AsyncMysqlConnector};
