use crate::database::{model::pet_kindergarden::PetKindergardenRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{PetKindergardenId, UserId},
        pet_kindergarden::{event::CreatePetKindergarden, PetKindergarden},
    },
    repository::pet_kindergarden::PetKindergardenRepository,
};
use shared::error::{AppError, AppResult};

const ALREADY_OWNS: &str = "User already has a pet kindergarden.";

#[derive(new)]
pub struct PetKindergardenRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PetKindergardenRepository for PetKindergardenRepositoryImpl {
    async fn create(&self, event: CreatePetKindergarden) -> AppResult<PetKindergarden> {
        if self.find_by_owner_id(event.owner_id).await?.is_some() {
            return Err(AppError::AlreadyExists(ALREADY_OWNS.into()));
        }

        // 同時に作成された場合は owner_id の一意制約で弾く
        let row = sqlx::query_as::<_, PetKindergardenRow>(
            r#"
                INSERT INTO pet_kindergardens (
                    pet_kindergarden_id, owner_id, name, phone_number, address,
                    guide_message, business_hours, daily_pet_limit,
                    reservation_availability_option, reservation_change_option,
                    closed_on_special_days
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING
                    pet_kindergarden_id, owner_id, name, phone_number, address,
                    guide_message, business_hours, daily_pet_limit,
                    reservation_availability_option, reservation_change_option,
                    closed_on_special_days
            "#,
        )
        .bind(PetKindergardenId::new())
        .bind(event.owner_id)
        .bind(&event.name)
        .bind(&event.phone_number)
        .bind(&event.address)
        .bind(&event.guide_message)
        .bind(event.business_hours.to_string())
        .bind(event.daily_pet_limit)
        .bind(event.reservation_availability_option.as_ref())
        .bind(event.reservation_change_option.as_ref())
        .bind(event.closed_on_special_days)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::AlreadyExists(ALREADY_OWNS.into())
            } else {
                e
            }
        })?;

        row.try_into()
    }

    async fn find_by_id(
        &self,
        pet_kindergarden_id: PetKindergardenId,
    ) -> AppResult<Option<PetKindergarden>> {
        sqlx::query_as::<_, PetKindergardenRow>(
            r#"
                SELECT
                    pet_kindergarden_id, owner_id, name, phone_number, address,
                    guide_message, business_hours, daily_pet_limit,
                    reservation_availability_option, reservation_change_option,
                    closed_on_special_days
                FROM pet_kindergardens
                WHERE pet_kindergarden_id = $1
            "#,
        )
        .bind(pet_kindergarden_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(PetKindergarden::try_from)
        .transpose()
    }

    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Option<PetKindergarden>> {
        sqlx::query_as::<_, PetKindergardenRow>(
            r#"
                SELECT
                    pet_kindergarden_id, owner_id, name, phone_number, address,
                    guide_message, business_hours, daily_pet_limit,
                    reservation_availability_option, reservation_change_option,
                    closed_on_special_days
                FROM pet_kindergardens
                WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(PetKindergarden::try_from)
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use kernel::model::pet_kindergarden::ReservationWindow;
    use shared::error::ErrorKind;

    #[sqlx::test]
    async fn one_pet_kindergarden_per_owner(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let owner = fixtures::user(&db, "owner@example.com").await?;
        let repo = PetKindergardenRepositoryImpl::new(db);

        let created = repo
            .create(fixtures::create_pet_kindergarden(owner.user_id, 5))
            .await?;
        assert_eq!(created.owner_id, owner.user_id);
        assert_eq!(created.business_hours.to_string(), "09:00-18:00");
        assert_eq!(
            created.reservation_change_option,
            ReservationWindow::OneDayBefore
        );

        let err = repo
            .create(fixtures::create_pet_kindergarden(owner.user_id, 5))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(err.to_string(), ALREADY_OWNS);

        let mine = repo.find_by_owner_id(owner.user_id).await?;
        assert_eq!(
            mine.map(|kg| kg.pet_kindergarden_id),
            Some(created.pet_kindergarden_id)
        );
        assert!(repo.find_by_id(PetKindergardenId::new()).await?.is_none());
        Ok(())
    }
}
