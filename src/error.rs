use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure of a single store call, classified by what the caller can recover from.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no movie matches the given id")]
    NotFound,
    #[error("unique constraint violated on column(s): {}", .columns.join(", "))]
    UniqueViolation { columns: Vec<String> },
    #[error("{counter} counter is at its maximum")]
    CounterSaturated { counter: &'static str },
    #[error(transparent)]
    Db(DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// True when the violation is on exactly `column` and nothing else.
    pub fn is_unique_violation_on(&self, column: &str) -> bool {
        matches!(self, StoreError::UniqueViolation { columns } if columns.len() == 1 && columns[0] == column)
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => return StoreError::NotFound,
            _ => {}
        }

        let message = match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
            _ => {
                let text = err.to_string();
                text.contains(SQLITE_UNIQUE_PREFIX).then_some(text)
            }
        };

        match message {
            Some(message) => StoreError::UniqueViolation { columns: unique_columns(&message) },
            None => StoreError::Db(err),
        }
    }
}

const SQLITE_UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

/// Extracts column names from `UNIQUE constraint failed: movie.id, movie.title`.
fn unique_columns(message: &str) -> Vec<String> {
    let Some((_, tail)) = message.split_once(SQLITE_UNIQUE_PREFIX) else {
        return Vec::new();
    };

    tail.split(',')
        .map(|part| {
            let qualified = part.trim();
            let qualified = qualified.split_whitespace().next().unwrap_or(qualified);
            qualified.rsplit('.').next().unwrap_or(qualified).to_string()
        })
        .filter(|c| !c.is_empty())
        .collect()
}
