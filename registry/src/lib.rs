use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    redis::RedisClient,
    repository::{
        auth::AuthRepositoryImpl, customer::CustomerRepositoryImpl,
        daily_reservation::DailyReservationRepositoryImpl, day_off::DayOffRepositoryImpl,
        health::HealthCheckRepositoryImpl, pet_kindergarden::PetKindergardenRepositoryImpl,
        reservation::ReservationRepositoryImpl, special_day::SpecialDayRepositoryImpl,
        ticket::TicketRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::repository::{
    auth::AuthRepository, customer::CustomerRepository,
    daily_reservation::DailyReservationRepository, day_off::DayOffRepository,
    health::HealthCheckRepository, pet_kindergarden::PetKindergardenRepository,
    reservation::ReservationRepository, special_day::SpecialDayRepository, ticket::TicketRepository,
    user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    pet_kindergarden_repository: Arc<dyn PetKindergardenRepository>,
    ticket_repository: Arc<dyn TicketRepository>,
    customer_repository: Arc<dyn CustomerRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    daily_reservation_repository: Arc<dyn DailyReservationRepository>,
    day_off_repository: Arc<dyn DayOffRepository>,
    special_day_repository: Arc<dyn SpecialDayRepository>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        app_config: AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let pet_kindergarden_repository =
            Arc::new(PetKindergardenRepositoryImpl::new(pool.clone()));
        let ticket_repository = Arc::new(TicketRepositoryImpl::new(pool.clone()));
        let customer_repository = Arc::new(CustomerRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let daily_reservation_repository =
            Arc::new(DailyReservationRepositoryImpl::new(pool.clone()));
        let day_off_repository = Arc::new(DayOffRepositoryImpl::new(pool.clone()));
        let special_day_repository = Arc::new(SpecialDayRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            pet_kindergarden_repository,
            ticket_repository,
            customer_repository,
            reservation_repository,
            daily_reservation_repository,
            day_off_repository,
            special_day_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn pet_kindergarden_repository(&self) -> Arc<dyn PetKindergardenRepository> {
        self.pet_kindergarden_repository.clone()
    }

    pub fn ticket_repository(&self) -> Arc<dyn TicketRepository> {
        self.ticket_repository.clone()
    }

    pub fn customer_repository(&self) -> Arc<dyn CustomerRepository> {
        self.customer_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn daily_reservation_repository(&self) -> Arc<dyn DailyReservationRepository> {
        self.daily_reservation_repository.clone()
    }

    pub fn day_off_repository(&self) -> Arc<dyn DayOffRepository> {
        self.day_off_repository.clone()
    }

    pub fn special_day_repository(&self) -> Arc<dyn SpecialDayRepository> {
        self.special_day_repository.clone()
    }
}
