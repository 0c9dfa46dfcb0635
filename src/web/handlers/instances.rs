//! # Instance Lifecycle Handlers
//!
//! HTTP entry points for provisioning and tearing down tenant instances.
//! Validation happens here, before any transaction is opened; everything
//! transactional is delegated to [`crate::lifecycle`].

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::web::response_types::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Placeholder response for the collection root. Listing instances is out of
/// scope; this keeps clients from hanging on the bare path.
#[derive(Debug, Serialize)]
pub struct InstancesRootResponse {
    pub ok: bool,
    pub message: String,
}

/// Response for a successful create
#[derive(Debug, Serialize)]
pub struct CreateInstanceResponse {
    pub ok: bool,
    /// Physical schema identifier of the new instance
    pub schema: String,
}

/// Response for a successful delete
#[derive(Debug, Serialize)]
pub struct DeleteInstanceResponse {
    pub ok: bool,
    pub deleted: String,
}

/// GET /instances
pub async fn instances_root(State(_state): State<AppState>) -> Json<InstancesRootResponse> {
    Json(InstancesRootResponse {
        ok: true,
        message: "instances root".to_string(),
    })
}

/// Create a new instance: POST /instances/create
///
/// No request body: the trigger is the request itself. Identity is generated
/// server-side and returned to the caller.
pub async fn create_instance(
    State(state): State<AppState>,
) -> ApiResult<Json<CreateInstanceResponse>> {
    let created = state.lifecycle.create_instance().await?;

    info!(schema_name = %created.schema_name, "instance create request succeeded");

    Ok(Json(CreateInstanceResponse {
        ok: true,
        schema: created.schema_name,
    }))
}

/// Tear down an instance: DELETE /instances/:schema
pub async fn delete_instance(
    State(state): State<AppState>,
    Path(schema): Path<String>,
) -> ApiResult<Json<DeleteInstanceResponse>> {
    if schema.trim().is_empty() {
        return Err(ApiError::bad_request("schema identifier is required"));
    }

    let instance = state.lifecycle.delete_instance(&schema).await?;

    info!(schema_name = %instance.schema_name, "instance delete request succeeded");

    Ok(Json(DeleteInstanceResponse {
        ok: true,
        deleted: instance.schema_name,
    }))
}
