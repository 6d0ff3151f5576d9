#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Player pool is empty")]
    EmptyPool,

    #[error("Malformed player entry: missing {field}")]
    MalformedEntry { field: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),
}
