pub mod docs;
pub mod health;
pub mod pet_kindergarden;
pub mod user;
pub mod v1;
