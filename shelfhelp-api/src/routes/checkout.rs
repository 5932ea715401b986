/// Checkout endpoint
///
/// Aggregates the caller's cart into a text grocery list, emails it, and
/// clears the cart.
///
/// # Endpoint
///
/// ```text
/// POST /checkout
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Checkout complete! Check your email for the grocery list.",
///   "emailPreview": "Hello Jane,\n\nHere is your grocery list from ShelfHelp:\n..."
/// }
/// ```
///
/// # Semantics
///
/// Delivery is best-effort: an SMTP failure is logged and the response
/// still succeeds with the rendered list, and the cart is cleared either
/// way. The one hard failure is an empty cart, rejected before any email
/// is attempted.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::Serialize;
use shelfhelp_shared::{
    auth::middleware::AuthContext,
    grocery::render_grocery_list,
    models::{cart_entry::CartEntry, user::User},
};

/// Checkout response
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Human-readable result
    pub message: String,

    /// The full rendered grocery list, for client-side display
    #[serde(rename = "emailPreview")]
    pub email_preview: String,
}

/// Checkout handler
///
/// # Errors
///
/// - `400 Bad Request`: Cart is empty
/// - `401 Unauthorized`: Missing or invalid token, or the account no longer
///   exists
/// - `500 Internal Server Error`: Database or rendering failure
pub async fn checkout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<CheckoutResponse>> {
    // The token outlives account deletion; re-check the user for the
    // greeting name and current email address
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

    let entries = CartEntry::list_resolved(&state.db, auth.user_id).await?;

    // Empty cart fails before any email is attempted
    let list = render_grocery_list(user.greeting_name(), &entries)?;

    let delivered = match state.mailer.send_grocery_list(&user.email, &list).await {
        Ok(()) => true,
        Err(e) => {
            // Best-effort: the user still gets their list in the response
            tracing::warn!(
                user_id = %user.id,
                error = %e,
                "Grocery list email delivery failed"
            );
            false
        }
    };

    // Cleared regardless of delivery outcome
    let removed = CartEntry::clear(&state.db, auth.user_id).await?;

    tracing::info!(
        user_id = %user.id,
        entries = removed,
        delivered,
        "Checkout complete"
    );

    let message = if delivered {
        "Checkout complete! Check your email for the grocery list.".to_string()
    } else {
        "Checkout complete! Email delivery failed, your list is included below.".to_string()
    };

    Ok(Json(CheckoutResponse {
        message,
        email_preview: list,
    }))
}
