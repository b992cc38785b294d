use crate::{
    extractor::AuthorizedUser,
    model::{
        ticket::{CreateTicketRequest, CreateTicketRequestWithIds, TicketResponse, TicketsResponse},
        ErrorResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::{PetKindergardenId, TicketId},
    ticket::event::{CreateTicket, DeleteTicket},
};
use registry::AppRegistry;
use shared::error::AppResult;

#[utoipa::path(
    post,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/tickets",
    params(("pet_kindergarden_id" = PetKindergardenId, Path)),
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = TicketResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "tickets"
)]
pub async fn register_ticket(
    user: AuthorizedUser,
    Path(pet_kindergarden_id): Path<PetKindergardenId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateTicketRequest>,
) -> AppResult<(StatusCode, Json<TicketResponse>)> {
    req.validate()?;
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    let event: CreateTicket =
        CreateTicketRequestWithIds::new(pet_kindergarden_id, req).try_into()?;
    registry
        .ticket_repository()
        .create(event)
        .await
        .map(|ticket| (StatusCode::CREATED, Json(ticket.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/tickets",
    params(("pet_kindergarden_id" = PetKindergardenId, Path)),
    responses(
        (status = 200, description = "Active tickets", body = TicketsResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "tickets"
)]
pub async fn show_ticket_list(
    user: AuthorizedUser,
    Path(pet_kindergarden_id): Path<PetKindergardenId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<TicketsResponse>> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    registry
        .ticket_repository()
        .find_active_by_pet_kindergarden_id(pet_kindergarden_id)
        .await
        .map(TicketsResponse::from)
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/tickets/{ticket_id}",
    params(
        ("pet_kindergarden_id" = PetKindergardenId, Path),
        ("ticket_id" = TicketId, Path)
    ),
    responses(
        (status = 204, description = "Ticket deleted"),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "tickets"
)]
pub async fn delete_ticket(
    user: AuthorizedUser,
    Path((pet_kindergarden_id, ticket_id)): Path<(PetKindergardenId, TicketId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    registry
        .ticket_repository()
        .delete(DeleteTicket::new(pet_kindergarden_id, ticket_id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
