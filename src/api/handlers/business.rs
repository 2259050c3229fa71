//! Business CRUD handlers: register, list, lookup, profile, update, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{BusinessDetailResponse, ListParams, LookupParams};
use crate::app_state::AppState;
use crate::domain::business::{Business, BusinessDraft, BusinessUpdate};
use crate::domain::business_id::BusinessId;
use crate::domain::listing::BusinessListing;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /businesses`: register a new listing.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when a required field is
/// blank, or [`GatewayError::EmailInUse`] when the email is taken.
#[utoipa::path(
    post,
    path = "/api/v1/businesses",
    tag = "Businesses",
    summary = "Register a business",
    description = "Creates a listing from the submitted draft. Name and email are required; everything else defaults to empty. The contact email must not already be registered.",
    request_body = BusinessDraft,
    responses(
        (status = 201, description = "Business created", body = Business),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    )
)]
pub async fn create_business(
    State(state): State<AppState>,
    Json(draft): Json<BusinessDraft>,
) -> Result<impl IntoResponse, GatewayError> {
    validate_required(&draft.name, "name")?;
    validate_required(&draft.email, "email")?;

    if state
        .business_service
        .get_by_email(&draft.email)
        .await
        .is_some()
    {
        return Err(GatewayError::EmailInUse(draft.email));
    }

    let business = state.business_service.create(draft).await;
    Ok((StatusCode::CREATED, Json(business)))
}

/// `GET /businesses`: browse the directory.
#[utoipa::path(
    get,
    path = "/api/v1/businesses",
    tag = "Businesses",
    summary = "List businesses",
    description = "Returns the directory, optionally filtered by category. With a `page` parameter the response is a pagination envelope; without one it is a bare list capped at 1000 records.",
    params(ListParams),
    responses(
        (status = 200, description = "Directory contents", body = BusinessListing),
    )
)]
pub async fn list_businesses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let options = params.into_options();
    Json(state.business_service.list(&options).await)
}

/// `GET /businesses/lookup`: find a listing by contact email.
///
/// # Errors
///
/// Returns [`GatewayError::EmailNotFound`] when no listing carries the
/// email.
#[utoipa::path(
    get,
    path = "/api/v1/businesses/lookup",
    tag = "Businesses",
    summary = "Look up a business by email",
    description = "Returns the listing registered under the given contact email, matched case-insensitively.",
    params(LookupParams),
    responses(
        (status = 200, description = "Matching business", body = Business),
        (status = 404, description = "No business under that email", body = ErrorResponse),
    )
)]
pub async fn lookup_business(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let business = state
        .business_service
        .get_by_email(&params.email)
        .await
        .ok_or_else(|| GatewayError::EmailNotFound(params.email.clone()))?;
    Ok(Json(business))
}

/// `GET /businesses/owner/{owner_id}`: find the listing claimed by an
/// account.
///
/// # Errors
///
/// Returns [`GatewayError::OwnerNotFound`] when the account owns no
/// listing.
#[utoipa::path(
    get,
    path = "/api/v1/businesses/owner/{owner_id}",
    tag = "Businesses",
    summary = "Get a business by owner",
    description = "Returns the listing owned by the given identity-provider account, as used by the owner dashboard.",
    params(
        ("owner_id" = String, Path, description = "Identity-provider account id"),
    ),
    responses(
        (status = 200, description = "Owned business", body = Business),
        (status = 404, description = "Account owns no business", body = ErrorResponse),
    )
)]
pub async fn get_business_by_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let business = state
        .business_service
        .get_by_owner(&owner_id)
        .await
        .ok_or_else(|| GatewayError::OwnerNotFound(owner_id.clone()))?;
    Ok(Json(business))
}

/// `GET /businesses/{id}`: public profile payload.
///
/// # Errors
///
/// Returns [`GatewayError::BusinessNotFound`] if the id does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{id}",
    tag = "Businesses",
    summary = "Get business details",
    description = "Returns the stored record together with its open/closed status resolved against the server's local clock.",
    params(
        ("id" = String, Path, description = "Business id"),
    ),
    responses(
        (status = 200, description = "Business details with status", body = BusinessDetailResponse),
        (status = 404, description = "Business not found", body = ErrorResponse),
    )
)]
pub async fn get_business(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let id = BusinessId::from(id);
    let business = state
        .business_service
        .get_by_id(&id)
        .await
        .ok_or_else(|| GatewayError::BusinessNotFound(id.clone()))?;

    let status = business.schedule_status(chrono::Local::now().naive_local());
    Ok(Json(BusinessDetailResponse { business, status }))
}

/// `PATCH /businesses/{id}`: update a listing.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when a present field is
/// blank, or [`GatewayError::BusinessNotFound`] if the id does not
/// exist.
#[utoipa::path(
    patch,
    path = "/api/v1/businesses/{id}",
    tag = "Businesses",
    summary = "Update a business",
    description = "Applies a partial patch. Absent fields are left untouched; the manual override is cleared by sending its `unset` value.",
    params(
        ("id" = String, Path, description = "Business id"),
    ),
    request_body = BusinessUpdate,
    responses(
        (status = 200, description = "Updated business", body = Business),
        (status = 400, description = "Blank required field", body = ErrorResponse),
        (status = 404, description = "Business not found", body = ErrorResponse),
    )
)]
pub async fn update_business(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<BusinessUpdate>,
) -> Result<impl IntoResponse, GatewayError> {
    if let Some(name) = &patch.name {
        validate_required(name, "name")?;
    }
    if let Some(email) = &patch.email {
        validate_required(email, "email")?;
    }

    let id = BusinessId::from(id);
    let business = state
        .business_service
        .update(&id, &patch)
        .await
        .ok_or_else(|| GatewayError::BusinessNotFound(id.clone()))?;
    Ok(Json(business))
}

/// `DELETE /businesses/{id}`: remove a listing.
///
/// # Errors
///
/// Returns [`GatewayError::BusinessNotFound`] if the id does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/businesses/{id}",
    tag = "Businesses",
    summary = "Delete a business",
    description = "Removes the listing from the active store.",
    params(
        ("id" = String, Path, description = "Business id"),
    ),
    responses(
        (status = 204, description = "Business deleted"),
        (status = 404, description = "Business not found", body = ErrorResponse),
    )
)]
pub async fn delete_business(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let id = BusinessId::from(id);
    state
        .business_service
        .delete(&id)
        .await
        .ok_or_else(|| GatewayError::BusinessNotFound(id.clone()))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Business management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/businesses", post(create_business).get(list_businesses))
        .route("/businesses/lookup", get(lookup_business))
        .route("/businesses/owner/{owner_id}", get(get_business_by_owner))
        .route(
            "/businesses/{id}",
            get(get_business)
                .patch(update_business)
                .delete(delete_business),
        )
}

// ── Validation Helpers ──────────────────────────────────────────────────

/// Rejects blank values for fields the directory requires.
fn validate_required(value: &str, field: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::persistence::MemoryBusinessStore;
    use crate::service::BusinessService;

    fn app() -> Router {
        let service = BusinessService::new(None, MemoryBusinessStore::seeded());
        let state = AppState {
            business_service: Arc::new(service),
        };
        routes().with_state(state)
    }

    async fn send(app: Router, request: Request<Body>) -> Response {
        let Ok(response) = app.oneshot(request).await;
        response
    }

    fn request(method: &str, uri: &str) -> Request<Body> {
        let Ok(request) = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
        else {
            panic!("request should build");
        };
        request
    }

    fn get_request(uri: &str) -> Request<Body> {
        request("GET", uri)
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        let Ok(request) = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("request should build");
        };
        request
    }

    async fn body_json(response: Response) -> Value {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should collect");
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("body should be JSON");
        };
        value
    }

    #[tokio::test]
    async fn create_returns_created_record() {
        let request = json_request(
            "POST",
            "/businesses",
            &json!({ "name": "Copper Kettle Cafe", "email": "brew@copperkettle.example" }),
        );
        let response = send(app(), request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body.pointer("/name"), Some(&json!("Copper Kettle Cafe")));
        let id = body.pointer("/id").and_then(Value::as_str);
        assert!(id.is_some_and(|id| id.starts_with("mem-")));
    }

    #[tokio::test]
    async fn create_with_blank_name_is_rejected() {
        let request = json_request(
            "POST",
            "/businesses",
            &json!({ "name": "   ", "email": "brew@copperkettle.example" }),
        );
        let response = send(app(), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body.pointer("/error/code"), Some(&json!(1001)));
    }

    #[tokio::test]
    async fn create_with_taken_email_conflicts() {
        let request = json_request(
            "POST",
            "/businesses",
            &json!({ "name": "Impostor Bakery", "email": "hello@juniperandrye.example" }),
        );
        let response = send(app(), request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body.pointer("/error/code"), Some(&json!(2002)));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let response = send(app(), get_request("/businesses/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body.pointer("/error/code"), Some(&json!(2001)));
    }

    #[tokio::test]
    async fn profile_includes_resolved_status() {
        // seed-0003 is overridden closed, so the badge is deterministic.
        let response = send(app(), get_request("/businesses/seed-0003")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body.pointer("/business/name"),
            Some(&json!("Cadence Cycle Repair"))
        );
        assert_eq!(body.pointer("/status/isOpen"), Some(&json!(false)));
        assert_eq!(
            body.pointer("/status/message"),
            Some(&json!("Closed (Owner set)"))
        );
    }

    #[tokio::test]
    async fn paged_listing_is_an_envelope() {
        let response = send(app(), get_request("/businesses?page=1")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let Some(object) = body.as_object() else {
            panic!("paged response should be an object");
        };
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["businesses", "page", "total", "totalPages"]);
    }

    #[tokio::test]
    async fn unpaged_listing_is_a_bare_array() {
        let response = send(app(), get_request("/businesses")).await;
        let body = body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn category_filter_narrows_the_directory() {
        let response = send(app(), get_request("/businesses?category=books")).await;
        let body = body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(
            body.pointer("/0/name"),
            Some(&json!("Paper Lantern Books"))
        );
    }

    #[tokio::test]
    async fn update_patches_only_sent_fields() {
        let request = json_request(
            "PATCH",
            "/businesses/seed-0002",
            &json!({ "phone": "555-0102" }),
        );
        let response = send(app(), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body.pointer("/phone"), Some(&json!("555-0102")));
        assert_eq!(body.pointer("/name"), Some(&json!("Paper Lantern Books")));
    }

    #[tokio::test]
    async fn delete_removes_and_later_reads_miss() {
        let app = app();

        let response = send(app.clone(), request("DELETE", "/businesses/seed-0001")).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(app, get_request("/businesses/seed-0001")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn owner_route_finds_claimed_listing() {
        let app = app();

        let claim = json_request(
            "PATCH",
            "/businesses/seed-0002",
            &json!({ "ownerId": "user-42" }),
        );
        let response = send(app.clone(), claim).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(app.clone(), get_request("/businesses/owner/user-42")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.pointer("/id"), Some(&json!("seed-0002")));

        let response = send(app, get_request("/businesses/owner/user-99")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn email_lookup_matches_case_insensitively() {
        let app = app();

        let response = send(
            app.clone(),
            get_request("/businesses/lookup?email=SHOP@paperlantern.example"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.pointer("/id"), Some(&json!("seed-0002")));

        let response = send(
            app,
            get_request("/businesses/lookup?email=ghost@example.com"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
