pub mod customer;
pub mod day_off;
pub mod health;
pub mod pet_kindergarden;
pub mod reservation;
pub mod ticket;
pub mod user;
