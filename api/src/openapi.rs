use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use crate::{handler, model::ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    info(title = "Mung Manager API", description = "ペット幼稚園の予約・チケット管理 API"),
    modifiers(&SecurityAddon),
    paths(
        handler::health::health_check,
        handler::health::health_check_db,
        handler::user::create_social_user,
        handler::user::get_current_user,
        handler::user::update_current_user,
        handler::pet_kindergarden::register_pet_kindergarden,
        handler::pet_kindergarden::show_my_pet_kindergarden,
        handler::pet_kindergarden::show_pet_kindergarden,
        handler::ticket::register_ticket,
        handler::ticket::show_ticket_list,
        handler::ticket::delete_ticket,
        handler::customer::register_customer,
        handler::customer::show_customer_list,
        handler::customer::show_customer_pets,
        handler::customer::issue_customer_ticket,
        handler::customer::show_customer_tickets,
        handler::customer::show_customer_reservations,
        handler::reservation::create_reservation,
        handler::reservation::show_reservations_of_day,
        handler::reservation::show_calendar,
        handler::reservation::cancel_reservation,
        handler::reservation::toggle_attendance,
        handler::day_off::register_day_off,
        handler::day_off::delete_day_off,
    ),
    components(schemas(ErrorResponse)),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "pet-kindergardens"),
        (name = "tickets"),
        (name = "customers"),
        (name = "reservations"),
        (name = "day-offs")
    )
)]
pub struct ApiDoc;

/// Authorization: Bearer のアクセストークン
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_reservation_paths_and_bearer_scheme() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/api/v1/health",
            "/api/v1/users/me",
            "/api/v1/pet-kindergardens/{pet_kindergarden_id}/reservations",
            "/api/v1/pet-kindergardens/{pet_kindergarden_id}/reservations/calendar",
            "/api/v1/pet-kindergardens/{pet_kindergarden_id}/reservations/{reservation_id}/attendance",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
        assert!(doc["components"]["schemas"]["CreateReservationRequest"].is_object());
    }
}
