#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Get failed: {0}")]
    GetFailed(String),

    #[error("Set failed: {0}")]
    SetFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}
