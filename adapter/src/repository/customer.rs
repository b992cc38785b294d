use crate::database::{
    model::{
        customer::{CustomerPetRow, CustomerRow, CustomerTicketRow},
        ticket::TicketRow,
    },
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{Days, Utc};
use derive_new::new;
use kernel::{
    model::{
        customer::{
            event::{CreateCustomer, IssueCustomerTicket},
            Customer, CustomerPet, CustomerTicket,
        },
        id::{CustomerId, CustomerPetId, CustomerTicketId, PetKindergardenId},
        ticket::Ticket,
    },
    repository::customer::CustomerRepository,
};
use shared::error::{AppError, AppResult, ErrorKind};
use std::collections::HashMap;

#[derive(new)]
pub struct CustomerRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CustomerRepository for CustomerRepositoryImpl {
    async fn create(&self, event: CreateCustomer) -> AppResult<Customer> {
        let mut tx = self.db.begin().await?;

        let customer = sqlx::query_as::<_, CustomerRow>(
            r#"
                INSERT INTO customers (customer_id, pet_kindergarden_id, name, phone_number)
                VALUES ($1, $2, $3, $4)
                RETURNING customer_id, pet_kindergarden_id, name, phone_number
            "#,
        )
        .bind(CustomerId::new())
        .bind(event.pet_kindergarden_id)
        .bind(&event.name)
        .bind(&event.phone_number)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let mut pets = Vec::with_capacity(event.pets.len());
        for pet in event.pets {
            let row = sqlx::query_as::<_, CustomerPetRow>(
                r#"
                    INSERT INTO customer_pets (customer_pet_id, customer_id, name, breed)
                    VALUES ($1, $2, $3, $4)
                    RETURNING customer_pet_id, customer_id, name, breed
                "#,
            )
            .bind(CustomerPetId::new())
            .bind(customer.customer_id)
            .bind(&pet.name)
            .bind(&pet.breed)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
            pets.push(CustomerPet::from(row));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(customer.into_customer(pets))
    }

    async fn find_all(&self, pet_kindergarden_id: PetKindergardenId) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, CustomerRow>(
            r#"
                SELECT customer_id, pet_kindergarden_id, name, phone_number
                FROM customers
                WHERE pet_kindergarden_id = $1
                ORDER BY name ASC, created_at ASC
            "#,
        )
        .bind(pet_kindergarden_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let customer_ids = customers
            .iter()
            .map(|c| c.customer_id.raw())
            .collect::<Vec<_>>();
        let mut pets_by_customer: HashMap<CustomerId, Vec<CustomerPet>> = HashMap::new();
        for pet in self.find_pets(&customer_ids).await? {
            pets_by_customer.entry(pet.customer_id).or_default().push(pet);
        }

        Ok(customers
            .into_iter()
            .map(|c| {
                let pets = pets_by_customer.remove(&c.customer_id).unwrap_or_default();
                c.into_customer(pets)
            })
            .collect())
    }

    async fn find_by_id(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        customer_id: CustomerId,
    ) -> AppResult<Option<Customer>> {
        let Some(customer) = sqlx::query_as::<_, CustomerRow>(
            r#"
                SELECT customer_id, pet_kindergarden_id, name, phone_number
                FROM customers
                WHERE customer_id = $1 AND pet_kindergarden_id = $2
            "#,
        )
        .bind(customer_id)
        .bind(pet_kindergarden_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        else {
            return Ok(None);
        };

        let pets = self.find_pets(&[customer_id.raw()]).await?;
        Ok(Some(customer.into_customer(pets)))
    }

    async fn issue_ticket(&self, event: IssueCustomerTicket) -> AppResult<CustomerTicket> {
        let mut tx = self.db.begin().await?;

        let customer_exists: bool = sqlx::query_scalar(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM customers
                    WHERE customer_id = $1 AND pet_kindergarden_id = $2
                )
            "#,
        )
        .bind(event.customer_id)
        .bind(event.pet_kindergarden_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if !customer_exists {
            return Err(AppError::EntityNotFound(
                "The specified customer was not found.".into(),
            ));
        }

        let ticket: Ticket = sqlx::query_as::<_, TicketRow>(
            r#"
                SELECT
                    ticket_id, pet_kindergarden_id, ticket_type, usage_count,
                    usage_time_count, usage_period_in_days_count, price,
                    deleted_at, created_at
                FROM tickets
                WHERE ticket_id = $1 AND pet_kindergarden_id = $2
            "#,
        )
        .bind(event.ticket_id)
        .bind(event.pet_kindergarden_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("The specified ticket was not found.".into()))?
        .try_into()?;

        if !ticket.lifecycle.is_active() {
            return Err(AppError::rejected(
                ErrorKind::ValidationFailed,
                "ticket_deleted",
                "A deleted ticket cannot be issued.",
            ));
        }

        // 有効期限は発行日時から利用期間（日数）後
        let issued_at = event.issued_at.with_timezone(&Utc);
        let period = u64::try_from(ticket.usage_period_in_days_count).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "invalid usage_period_in_days_count {}",
                ticket.usage_period_in_days_count
            ))
        })?;
        let expired_at = issued_at.checked_add_days(Days::new(period)).ok_or_else(|| {
            AppError::ConversionEntityError("ticket expiry is out of range".into())
        })?;

        let customer_ticket_id = CustomerTicketId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO customer_tickets (
                    customer_ticket_id, customer_id, ticket_id,
                    total_count, used_count, expired_at, created_at
                )
                VALUES ($1, $2, $3, $4, 0, $5, $6)
            "#,
        )
        .bind(customer_ticket_id)
        .bind(event.customer_id)
        .bind(ticket.ticket_id)
        .bind(ticket.usage_count)
        .bind(expired_at)
        .bind(issued_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No customer ticket record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(CustomerTicket {
            customer_ticket_id,
            customer_id: event.customer_id,
            ticket_id: ticket.ticket_id,
            ticket_type: ticket.ticket_type,
            usage_time_count: ticket.usage_time_count,
            ticket_lifecycle: ticket.lifecycle,
            total_count: ticket.usage_count,
            used_count: 0,
            expired_at,
            created_at: issued_at,
        })
    }

    async fn find_tickets(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        customer_id: CustomerId,
    ) -> AppResult<Vec<CustomerTicket>> {
        sqlx::query_as::<_, CustomerTicketRow>(
            r#"
                SELECT
                    ct.customer_ticket_id, ct.customer_id, ct.ticket_id,
                    t.ticket_type, t.usage_time_count, t.deleted_at,
                    ct.total_count, ct.used_count, ct.expired_at, ct.created_at
                FROM customer_tickets AS ct
                INNER JOIN tickets AS t ON ct.ticket_id = t.ticket_id
                WHERE ct.customer_id = $1 AND t.pet_kindergarden_id = $2
                ORDER BY ct.expired_at ASC
            "#,
        )
        .bind(customer_id)
        .bind(pet_kindergarden_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(CustomerTicket::try_from)
        .collect()
    }
}

impl CustomerRepositoryImpl {
    async fn find_pets(&self, customer_ids: &[uuid::Uuid]) -> AppResult<Vec<CustomerPet>> {
        let rows = sqlx::query_as::<_, CustomerPetRow>(
            r#"
                SELECT customer_pet_id, customer_id, name, breed
                FROM customer_pets
                WHERE customer_id = ANY($1)
                ORDER BY created_at ASC
            "#,
        )
        .bind(customer_ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(CustomerPet::from).collect())
    }
}
