use crate::model::{
    calendar::Visit,
    id::{CustomerId, CustomerPetId, CustomerTicketId, PetKindergardenId, ReservationId},
    reservation::Attendance,
};
use chrono::{DateTime, Local};
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateReservation {
    pub pet_kindergarden_id: PetKindergardenId,
    pub customer_id: CustomerId,
    pub customer_pet_id: CustomerPetId,
    pub customer_ticket_id: CustomerTicketId,
    pub visit: Visit,
    pub requested_at: DateTime<Local>,
}

#[derive(new, Debug)]
pub struct CancelReservation {
    pub pet_kindergarden_id: PetKindergardenId,
    pub reservation_id: ReservationId,
    pub requested_at: DateTime<Local>,
}

// attendance が None の場合は現在の状態から順に切り替える
#[derive(new, Debug)]
pub struct ToggleAttendance {
    pub pet_kindergarden_id: PetKindergardenId,
    pub reservation_id: ReservationId,
    pub attendance: Option<Attendance>,
    pub requested_at: DateTime<Local>,
}
