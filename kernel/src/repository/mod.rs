pub mod auth;
pub mod customer;
pub mod daily_reservation;
pub mod day_off;
pub mod health;
pub mod pet_kindergarden;
pub mod reservation;
pub mod special_day;
pub mod ticket;
pub mod user;
