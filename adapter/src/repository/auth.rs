use crate::redis::{model::AuthorizationKey, RedisClient};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{auth::AccessToken, id::UserId},
    repository::auth::AuthRepository,
};
use shared::error::AppResult;
use std::sync::Arc;

#[derive(new)]
pub struct AuthRepositoryImpl {
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = access_token.into();
        let Some(user_id) = self.kv.get(&key).await? else {
            return Ok(None);
        };
        // 使われたトークンは有効期限を延ばす
        self.kv.expire(&key, self.ttl).await?;
        Ok(Some(user_id.into_inner()))
    }
}
