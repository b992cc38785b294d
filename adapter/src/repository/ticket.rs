use crate::database::{model::ticket::TicketRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{PetKindergardenId, TicketId},
        ticket::{
            event::{CreateTicket, DeleteTicket},
            Ticket,
        },
    },
    repository::ticket::TicketRepository,
};
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct TicketRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl TicketRepository for TicketRepositoryImpl {
    async fn create(&self, event: CreateTicket) -> AppResult<Ticket> {
        let row = sqlx::query_as::<_, TicketRow>(
            r#"
                INSERT INTO tickets (
                    ticket_id, pet_kindergarden_id, ticket_type, usage_count,
                    usage_time_count, usage_period_in_days_count, price
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING
                    ticket_id, pet_kindergarden_id, ticket_type, usage_count,
                    usage_time_count, usage_period_in_days_count, price,
                    deleted_at, created_at
            "#,
        )
        .bind(TicketId::new())
        .bind(event.pet_kindergarden_id)
        .bind(event.ticket_type.as_ref())
        .bind(event.usage_count)
        .bind(event.usage_time_count)
        .bind(event.usage_period_in_days_count)
        .bind(event.price)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.try_into()
    }

    async fn find_active_by_pet_kindergarden_id(
        &self,
        pet_kindergarden_id: PetKindergardenId,
    ) -> AppResult<Vec<Ticket>> {
        sqlx::query_as::<_, TicketRow>(
            r#"
                SELECT
                    ticket_id, pet_kindergarden_id, ticket_type, usage_count,
                    usage_time_count, usage_period_in_days_count, price,
                    deleted_at, created_at
                FROM tickets
                WHERE pet_kindergarden_id = $1 AND deleted_at IS NULL
                ORDER BY created_at ASC
            "#,
        )
        .bind(pet_kindergarden_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Ticket::try_from)
        .collect()
    }

    async fn delete(&self, event: DeleteTicket) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE tickets
                SET deleted_at = CURRENT_TIMESTAMP(3)
                WHERE ticket_id = $1 AND pet_kindergarden_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(event.ticket_id)
        .bind(event.pet_kindergarden_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "The specified ticket was not found.".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use kernel::model::ticket::TicketType;
    use shared::error::ErrorKind;

    #[sqlx::test]
    async fn deleted_tickets_drop_out_of_the_list(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let kg = fixtures::pet_kindergarden(&db, 5).await?;
        let repo = TicketRepositoryImpl::new(db);

        let time = repo
            .create(CreateTicket::new(kg.pet_kindergarden_id, TicketType::Time, 10, 4, 30, 50000))
            .await?;
        let all_day = repo
            .create(CreateTicket::new(kg.pet_kindergarden_id, TicketType::AllDay, 5, 0, 30, 80000))
            .await?;
        assert!(time.lifecycle.is_active());

        repo.delete(DeleteTicket::new(kg.pet_kindergarden_id, time.ticket_id))
            .await?;

        let active = repo
            .find_active_by_pet_kindergarden_id(kg.pet_kindergarden_id)
            .await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].ticket_id, all_day.ticket_id);

        // 二度目の削除は対象なし
        let err = repo
            .delete(DeleteTicket::new(kg.pet_kindergarden_id, time.ticket_id))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }
}
