use ::redis::{AsyncCommands, Client};
use shared::{
    config::RedisConfig,
    error::{AppError, AppResult},
};

pub mod model;

use model::RedisKey;

pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    pub fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(format!("redis://{}:{}", config.host, config.port))?;
        Ok(Self { client })
    }

    pub async fn get<T: RedisKey>(&self, key: &T) -> AppResult<Option<T::Value>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let result: Option<String> = conn.get(key.inner()).await?;
        result.map(T::Value::try_from).transpose()
    }

    // 有効期限を延長する。キーが存在しなければ false
    pub async fn expire<T: RedisKey>(&self, key: &T, ttl: u64) -> AppResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let seconds = i64::try_from(ttl)
            .map_err(|_| AppError::ConversionEntityError(format!("ttl {ttl} is too large")))?;
        Ok(conn.expire(key.inner(), seconds).await?)
    }
}
