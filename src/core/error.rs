use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Invalid index: {0}")]
    InvalidIndex(i64),

    #[error("Invalid edit format, expected <index>:<new title>")]
    EditFormat,

    #[error("Invalid edit index: {0:?}")]
    EditIndex(String),

    #[error("Invalid sorting criteria: {0}")]
    InvalidCriteria(String),

    #[error("Invalid deadline offset: {0:?}")]
    InvalidOffset(String),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TodoResult<T> = Result<T, TodoError>;
