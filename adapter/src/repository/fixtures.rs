use crate::{
    database::ConnectionPool,
    repository::{
        customer::CustomerRepositoryImpl, pet_kindergarden::PetKindergardenRepositoryImpl,
        ticket::TicketRepositoryImpl, user::UserRepositoryImpl,
    },
};
use chrono::Local;
use kernel::{
    model::{
        customer::{
            event::{CreateCustomer, CreateCustomerPet, IssueCustomerTicket},
            Customer, CustomerTicket,
        },
        id::{CustomerId, PetKindergardenId, TicketId, UserId},
        pet_kindergarden::{event::CreatePetKindergarden, PetKindergarden, ReservationWindow},
        ticket::{event::CreateTicket, Ticket, TicketType},
        user::{event::CreateSocialUser, SocialProvider, User},
    },
    repository::{
        customer::CustomerRepository, pet_kindergarden::PetKindergardenRepository,
        ticket::TicketRepository, user::UserRepository,
    },
};
use shared::error::AppResult;

pub async fn user(db: &ConnectionPool, email: &str) -> AppResult<User> {
    UserRepositoryImpl::new(db.clone())
        .create_social_user(CreateSocialUser::new(
            email.into(),
            "Owner".into(),
            "010-0000-0000".into(),
            format!("social-{email}"),
            SocialProvider::Google,
        ))
        .await
}

// 09:00-18:00 営業、当日まで受付、前日まで変更可、特別日は休業
pub fn create_pet_kindergarden(owner_id: UserId, daily_pet_limit: i32) -> CreatePetKindergarden {
    CreatePetKindergarden {
        owner_id,
        name: "Mung Mung".into(),
        phone_number: "02-123-4567".into(),
        address: "Seoul".into(),
        guide_message: None,
        business_hours: "09:00-18:00".parse().unwrap(),
        daily_pet_limit,
        reservation_availability_option: ReservationWindow::Today,
        reservation_change_option: ReservationWindow::OneDayBefore,
        closed_on_special_days: true,
    }
}

pub async fn pet_kindergarden(
    db: &ConnectionPool,
    daily_pet_limit: i32,
) -> AppResult<PetKindergarden> {
    let owner = user(db, &format!("{}@example.com", UserId::new())).await?;
    PetKindergardenRepositoryImpl::new(db.clone())
        .create(create_pet_kindergarden(owner.user_id, daily_pet_limit))
        .await
}

// ペットを 1 匹連れた顧客
pub async fn customer(
    db: &ConnectionPool,
    pet_kindergarden_id: PetKindergardenId,
) -> AppResult<Customer> {
    CustomerRepositoryImpl::new(db.clone())
        .create(CreateCustomer::new(
            pet_kindergarden_id,
            "Kim".into(),
            "010-1234-5678".into(),
            vec![CreateCustomerPet::new("Choco".into(), None)],
        ))
        .await
}

// 10 回・1 回 4 時間・30 日間
pub async fn ticket(
    db: &ConnectionPool,
    pet_kindergarden_id: PetKindergardenId,
    ticket_type: TicketType,
) -> AppResult<Ticket> {
    TicketRepositoryImpl::new(db.clone())
        .create(CreateTicket::new(
            pet_kindergarden_id,
            ticket_type,
            10,
            4,
            30,
            100000,
        ))
        .await
}

pub async fn customer_ticket(
    db: &ConnectionPool,
    pet_kindergarden_id: PetKindergardenId,
    customer_id: CustomerId,
    ticket_id: TicketId,
) -> AppResult<CustomerTicket> {
    CustomerRepositoryImpl::new(db.clone())
        .issue_ticket(IssueCustomerTicket::new(
            pet_kindergarden_id,
            customer_id,
            ticket_id,
            Local::now(),
        ))
        .await
}
