//! Visitor-submitted forms: whistleblower tips and the mailing list.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use crate::app::AppState;
use crate::entities::{subscriber, whistleblower_tip};
use crate::errors::ApiError;
use crate::models::{SubscribeRequest, SubscribeResponse, TipReceipt, TipRequest};
use crate::validation::{
    Validatable, ValidationErrors,
    validators::{validate_email, validate_length, validate_required},
};

const TIP_MESSAGE_MIN: usize = 10;
const TIP_MESSAGE_MAX: usize = 5000;
const TIP_DEPARTMENT_MAX: usize = 200;
const TIP_CONTACT_MAX: usize = 320;

/// Trim an optional form field, treating blank as absent.
fn optional_field(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

impl TipRequest {
    /// Trim every field so validation and storage see the same text.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            message: self.message.trim().to_string(),
            department: optional_field(self.department.as_deref()),
            contact: optional_field(self.contact.as_deref()),
        }
    }
}

impl Validatable for TipRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.message.trim().is_empty() {
            errors.check(validate_required("message", &self.message));
        } else {
            errors.check(validate_length(
                "message",
                self.message.trim(),
                Some(TIP_MESSAGE_MIN),
                Some(TIP_MESSAGE_MAX),
            ));
        }
        if let Some(department) = &self.department {
            errors.check(validate_length(
                "department",
                department,
                None,
                Some(TIP_DEPARTMENT_MAX),
            ));
        }
        if let Some(contact) = &self.contact {
            errors.check(validate_length("contact", contact, None, Some(TIP_CONTACT_MAX)));
        }

        errors.result()
    }
}

impl SubscribeRequest {
    /// Trimmed, lower-cased address.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
        }
    }
}

impl Validatable for SubscribeRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.email.trim().is_empty() {
            errors.check(validate_required("email", &self.email));
        } else {
            errors.check(validate_email("email", &self.email));
        }
        errors.result()
    }
}

/// Store an anonymous whistleblower tip.
///
/// # Errors
///
/// 422 when the form is invalid, 500 when the insert fails.
#[utoipa::path(
    post,
    path = "/api/tips",
    request_body = TipRequest,
    responses(
        (status = 201, description = "Tip received", body = TipReceipt),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Database error")
    ),
    tag = "forms"
)]
pub async fn submit_tip(
    State(state): State<AppState>,
    Json(request): Json<TipRequest>,
) -> Result<(StatusCode, Json<TipReceipt>), ApiError> {
    let request = request.normalized();
    request.validate()?;

    let tip = whistleblower_tip::ActiveModel {
        id: Set(Uuid::new_v4()),
        message: Set(request.message),
        department: Set(request.department),
        contact: Set(request.contact),
        created_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await
    .map_err(ApiError::database)?;

    tracing::info!(tip_id = %tip.id, "Whistleblower tip received");

    Ok((
        StatusCode::CREATED,
        Json(TipReceipt {
            id: tip.id,
            received_at: tip.created_at,
        }),
    ))
}

/// Add an address to the mailing list.
///
/// # Errors
///
/// 422 for a malformed address, 409 when it is already subscribed, 500 when
/// the insert fails.
#[utoipa::path(
    post,
    path = "/api/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = SubscribeResponse),
        (status = 409, description = "Email is already subscribed"),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Database error")
    ),
    tag = "forms"
)]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<SubscribeResponse>), ApiError> {
    let request = request.normalized();
    request.validate()?;

    let subscriber = subscriber::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(request.email),
        created_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await
    .map_err(|err| match ApiError::from(err) {
        ApiError::Conflict { .. } => ApiError::conflict("Email is already subscribed"),
        other => other,
    })?;

    tracing::info!(subscriber_id = %subscriber.id, "New subscriber");

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse {
            id: subscriber.id,
            email: subscriber.email,
        }),
    ))
}
