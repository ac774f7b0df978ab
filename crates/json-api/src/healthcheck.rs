//! Bookstore JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Healthcheck handler
///
/// Ready only while the primary database answers, since orders cannot be
/// placed without it.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = 200, description = "Primary database reachable"),
        (status_code = 503, description = "Primary database unreachable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state.app.database.ping().await.map_err(|error| {
        error!("primary database ping failed: {error}");

        StatusError::service_unavailable().brief("Database unavailable")
    })?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
