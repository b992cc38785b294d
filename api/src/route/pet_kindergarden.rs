use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    customer::{
        issue_customer_ticket, register_customer, show_customer_list, show_customer_pets,
        show_customer_reservations, show_customer_tickets,
    },
    day_off::{delete_day_off, register_day_off},
    pet_kindergarden::{register_pet_kindergarden, show_my_pet_kindergarden, show_pet_kindergarden},
    reservation::{
        cancel_reservation, create_reservation, show_calendar, show_reservations_of_day,
        toggle_attendance,
    },
    ticket::{delete_ticket, register_ticket, show_ticket_list},
};

pub fn build_pet_kindergarden_routers() -> Router<AppRegistry> {
    let ticket_routers = Router::new()
        .route("/", post(register_ticket).get(show_ticket_list))
        .route("/:ticket_id", delete(delete_ticket));

    let customer_routers = Router::new()
        .route("/", post(register_customer).get(show_customer_list))
        .route("/:customer_id/pets", get(show_customer_pets))
        .route(
            "/:customer_id/tickets",
            post(issue_customer_ticket).get(show_customer_tickets),
        )
        .route("/:customer_id/reservations", get(show_customer_reservations));

    let reservation_routers = Router::new()
        .route("/", post(create_reservation).get(show_reservations_of_day))
        .route("/calendar", get(show_calendar))
        .route("/:reservation_id", delete(cancel_reservation))
        .route("/:reservation_id/attendance", patch(toggle_attendance));

    let day_off_routers = Router::new()
        .route("/", post(register_day_off))
        .route("/:day_off_id", delete(delete_day_off));

    // 園ごとのルートは所有者のみが操作できる
    let facility_routers = Router::new()
        .route("/", get(show_pet_kindergarden))
        .nest("/tickets", ticket_routers)
        .nest("/customers", customer_routers)
        .nest("/reservations", reservation_routers)
        .nest("/day-offs", day_off_routers);

    let routers = Router::new()
        .route("/", post(register_pet_kindergarden))
        .route("/me", get(show_my_pet_kindergarden))
        .nest("/:pet_kindergarden_id", facility_routers);

    Router::new().nest("/pet-kindergardens", routers)
}
