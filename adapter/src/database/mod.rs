use std::future::Future;

use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::{postgres::PgConnectOptions, PgPool, Postgres, Transaction};

pub mod model;

// 直列化失敗時にやり直す回数
pub const SERIALIZABLE_RETRY_LIMIT: usize = 3;

fn make_pg_connect_options(cfg: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.username)
        .password(&cfg.password)
        .database(&cfg.database)
}

#[derive(Clone)]
pub struct ConnectionPool(PgPool);

impl ConnectionPool {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &PgPool {
        &self.0
    }

    pub async fn begin(&self) -> AppResult<Transaction<'_, Postgres>> {
        self.0.begin().await.map_err(AppError::TransactionError)
    }

    // トランザクション分離レベルを SERIALIZABLE にして開始する
    pub async fn begin_serializable(&self) -> AppResult<Transaction<'_, Postgres>> {
        let mut tx = self.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(tx)
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> ConnectionPool {
    ConnectionPool(PgPool::connect_lazy_with(make_pg_connect_options(cfg)))
}

/// 直列化失敗・デッドロックのときだけ処理をやり直す。
/// やり直しても成功しなければ Conflict を返す
pub async fn retry_on_serialization_failure<T, F, Fut>(operation: &str, f: F) -> AppResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut retries = 0;
    loop {
        match f().await {
            Err(e) if e.is_retryable() && retries < SERIALIZABLE_RETRY_LIMIT => {
                retries += 1;
                tracing::warn!(operation, retries, "serialization failure, retrying");
            }
            Err(e) if e.is_retryable() => {
                tracing::warn!(operation, error.message = %e, "giving up after retries");
                return Err(AppError::Conflict(format!(
                    "{operation} conflicted with a concurrent request. Please retry."
                )));
            }
            other => return other,
        }
    }
}
