use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API 境界でクライアントに見せるエラーの分類。
/// HTTP ステータスとデフォルトのエラーコードはこの分類から決まる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Conflict,
    ValidationFailed,
    PermissionDenied,
    Unauthenticated,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyExists | ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn default_code(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::Conflict => "conflict",
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::Unauthenticated => "not_authenticated",
            ErrorKind::Internal => "unknown_server_error",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    UnprocessableEntity(String),
    // ドメインルールによる拒否。code はクライアントが分岐に使う固定文字列
    #[error("{message}")]
    Rejected {
        kind: ErrorKind,
        code: &'static str,
        message: String,
    },
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("認可情報が誤っています")]
    UnauthorizedError,
    #[error("許可されていない操作です")]
    ForbiddenOperation,
}

impl AppError {
    pub fn rejected(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self::Rejected {
            kind,
            code,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::EntityNotFound(_) => ErrorKind::NotFound,
            AppError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::UnprocessableEntity(_) | AppError::ValidationError(_) => {
                ErrorKind::ValidationFailed
            }
            AppError::Rejected { kind, .. } => *kind,
            AppError::UnauthorizedError => ErrorKind::Unauthenticated,
            AppError::ForbiddenOperation => ErrorKind::PermissionDenied,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::ConvertToUuidError(_)
            | AppError::ConversionEntityError(_) => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Rejected { code, .. } => *code,
            AppError::ValidationError(_) => "invalid_parameter_format",
            other => other.kind().default_code(),
        }
    }

    /// SERIALIZABLE トランザクションの直列化失敗・デッドロック検出かどうか。
    /// これらはトランザクションをやり直せば成功しうる。
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::TransactionError(e) | AppError::SpecificOperationError(e) => {
                is_serialization_failure(e)
            }
            _ => false,
        }
    }

    /// 一意制約違反かどうか
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::TransactionError(sqlx::Error::Database(db))
            | AppError::SpecificOperationError(sqlx::Error::Database(db)) => {
                db.is_unique_violation()
            }
            _ => false,
        }
    }
}

fn is_serialization_failure(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => matches!(db.code().as_deref(), Some("40001" | "40P01")),
        _ => false,
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let message = match kind {
            ErrorKind::Internal => {
                tracing::error!(
                    error.cause_chain = ?self,
                    error.message = %self,
                    "Unexpected error happened"
                );
                "Unknown server error.".to_string()
            }
            _ => self.to_string(),
        };
        let body = ErrorResponse {
            code: self.code(),
            message,
        };
        (kind.status_code(), Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::EntityNotFound("missing".into()), StatusCode::NOT_FOUND, "not_found")]
    #[case(AppError::AlreadyExists("dup".into()), StatusCode::CONFLICT, "already_exists")]
    #[case(AppError::Conflict("busy".into()), StatusCode::CONFLICT, "conflict")]
    #[case(AppError::ForbiddenOperation, StatusCode::FORBIDDEN, "permission_denied")]
    #[case(AppError::UnauthorizedError, StatusCode::UNAUTHORIZED, "not_authenticated")]
    #[case(
        AppError::NoRowsAffectedError("nothing".into()),
        StatusCode::INTERNAL_SERVER_ERROR,
        "unknown_server_error"
    )]
    fn kinds_map_to_status_and_code(
        #[case] err: AppError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        assert_eq!(err.kind().status_code(), status);
        assert_eq!(err.code(), code);
    }

    #[test]
    fn rejected_keeps_its_own_code() {
        let err = AppError::rejected(
            ErrorKind::Conflict,
            "customer_pet_over_daily_limit",
            "Daily pet limit reached.",
        );
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.code(), "customer_pet_over_daily_limit");
        assert_eq!(err.to_string(), "Daily pet limit reached.");
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn response_body_carries_code_and_message() -> anyhow::Result<()> {
        let res = AppError::AlreadyExists("User already has a pet kindergarden.".into())
            .into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        let body: serde_json::Value = serde_json::from_slice(&bytes)?;
        assert_eq!(body["code"], "already_exists");
        assert_eq!(body["message"], "User already has a pet kindergarden.");
        Ok(())
    }

    #[tokio::test]
    async fn internal_errors_hide_details() -> anyhow::Result<()> {
        let res = AppError::ConversionEntityError("bad ticket_type 'X'".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        let body: serde_json::Value = serde_json::from_slice(&bytes)?;
        assert_eq!(body["message"], "Unknown server error.");
        Ok(())
    }
}
