use crate::{
    extractor::AuthorizedUser,
    model::{
        customer::{
            CreateCustomerRequest, CreateCustomerRequestWithIds, CustomerPetsResponse,
            CustomerResponse, CustomerTicketResponse, CustomerTicketsResponse, CustomersResponse,
            IssueCustomerTicketRequest,
        },
        reservation::ReservationsResponse,
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
    customer::{event::IssueCustomerTicket, Customer},
    id::{CustomerId, PetKindergardenId},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

async fn find_customer(
    registry: &AppRegistry,
    pet_kindergarden_id: PetKindergardenId,
    customer_id: CustomerId,
) -> AppResult<Customer> {
    registry
        .customer_repository()
        .find_by_id(pet_kindergarden_id, customer_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("Customer ({customer_id}) not found.")))
}

#[utoipa::path(
    post,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/customers",
    params(("pet_kindergarden_id" = PetKindergardenId, Path)),
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer registered", body = CustomerResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn register_customer(
    user: AuthorizedUser,
    Path(pet_kindergarden_id): Path<PetKindergardenId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateCustomerRequest>,
) -> AppResult<(StatusCode, Json<CustomerResponse>)> {
    req.validate()?;
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    registry
        .customer_repository()
        .create(CreateCustomerRequestWithIds::new(pet_kindergarden_id, req).into())
        .await
        .map(|customer| (StatusCode::CREATED, Json(customer.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/customers",
    params(("pet_kindergarden_id" = PetKindergardenId, Path)),
    responses(
        (status = 200, description = "Customers with their pets", body = CustomersResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn show_customer_list(
    user: AuthorizedUser,
    Path(pet_kindergarden_id): Path<PetKindergardenId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CustomersResponse>> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    registry
        .customer_repository()
        .find_all(pet_kindergarden_id)
        .await
        .map(CustomersResponse::from)
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/customers/{customer_id}/pets",
    params(
        ("pet_kindergarden_id" = PetKindergardenId, Path),
        ("customer_id" = CustomerId, Path)
    ),
    responses(
        (status = 200, description = "Pets of the customer", body = CustomerPetsResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn show_customer_pets(
    user: AuthorizedUser,
    Path((pet_kindergarden_id, customer_id)): Path<(PetKindergardenId, CustomerId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CustomerPetsResponse>> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    let customer = find_customer(&registry, pet_kindergarden_id, customer_id).await?;
    Ok(Json(customer.pets.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/customers/{customer_id}/tickets",
    params(
        ("pet_kindergarden_id" = PetKindergardenId, Path),
        ("customer_id" = CustomerId, Path)
    ),
    request_body = IssueCustomerTicketRequest,
    responses(
        (status = 201, description = "Ticket issued to the customer", body = CustomerTicketResponse),
        (status = 400, description = "Ticket has been deleted", body = ErrorResponse),
        (status = 404, description = "Customer or ticket not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn issue_customer_ticket(
    user: AuthorizedUser,
    Path((pet_kindergarden_id, customer_id)): Path<(PetKindergardenId, CustomerId)>,
    State(registry): State<AppRegistry>,
    Json(req): Json<IssueCustomerTicketRequest>,
) -> AppResult<(StatusCode, Json<CustomerTicketResponse>)> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    let event = IssueCustomerTicket::new(
        pet_kindergarden_id,
        customer_id,
        req.ticket_id,
        chrono::Local::now(),
    );
    registry
        .customer_repository()
        .issue_ticket(event)
        .await
        .map(|ticket| (StatusCode::CREATED, Json(ticket.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/customers/{customer_id}/tickets",
    params(
        ("pet_kindergarden_id" = PetKindergardenId, Path),
        ("customer_id" = CustomerId, Path)
    ),
    responses(
        (status = 200, description = "Tickets issued to the customer", body = CustomerTicketsResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn show_customer_tickets(
    user: AuthorizedUser,
    Path((pet_kindergarden_id, customer_id)): Path<(PetKindergardenId, CustomerId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CustomerTicketsResponse>> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;
    find_customer(&registry, pet_kindergarden_id, customer_id).await?;

    registry
        .customer_repository()
        .find_tickets(pet_kindergarden_id, customer_id)
        .await
        .map(CustomerTicketsResponse::from)
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/customers/{customer_id}/reservations",
    params(
        ("pet_kindergarden_id" = PetKindergardenId, Path),
        ("customer_id" = CustomerId, Path)
    ),
    responses(
        (status = 200, description = "Reservations of the customer", body = ReservationsResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn show_customer_reservations(
    user: AuthorizedUser,
    Path((pet_kindergarden_id, customer_id)): Path<(PetKindergardenId, CustomerId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;
    find_customer(&registry, pet_kindergarden_id, customer_id).await?;

    registry
        .reservation_repository()
        .find_by_customer_id(pet_kindergarden_id, customer_id)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}
