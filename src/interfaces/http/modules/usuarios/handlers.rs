//! Usuario CRUD handlers
//!
//! Each handler validates its input through the extractors, makes at most
//! one store call through `UsuarioService`, and maps the outcome to a
//! status + JSON body.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

use super::dto::{
    CreatedUsuarioResponse, UsuarioDto, UsuarioMutationResponse, UsuarioRequest, UsuarioResponse,
};
use crate::application::UsuarioService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    api_error, ApiError, ErrorBody, UsuarioIdPath, ValidatedJson, MSG_ALREADY_REGISTERED,
    MSG_CREATED, MSG_DELETED, MSG_NOT_REGISTERED, MSG_UPDATED,
};

#[derive(Clone)]
pub struct UsuarioHandlerState {
    pub service: Arc<UsuarioService>,
}

fn not_registered() -> ApiError {
    api_error(StatusCode::NOT_FOUND, ErrorBody::failure(MSG_NOT_REGISTERED))
}

/// Store failure on the by-id operations.
fn store_failure(e: DomainError) -> ApiError {
    error!(error = %e, "Usuario store call failed");
    api_error(StatusCode::BAD_REQUEST, ErrorBody::failure(e.to_string()))
}

#[utoipa::path(
    post,
    path = "/api/v1/usuarios",
    tag = "Usuarios",
    request_body = UsuarioRequest,
    responses(
        (status = 200, description = "User created", body = CreatedUsuarioResponse),
        (status = 400, description = "Insufficient fields", body = ErrorBody),
        (status = 422, description = "Already registered or store error", body = ErrorBody)
    )
)]
pub async fn create_usuario(
    State(state): State<UsuarioHandlerState>,
    ValidatedJson(request): ValidatedJson<UsuarioRequest>,
) -> Result<Json<CreatedUsuarioResponse>, ApiError> {
    match state.service.create(request.into()).await {
        Ok(usuario) => Ok(Json(CreatedUsuarioResponse {
            message: MSG_CREATED.to_string(),
            usuario: UsuarioDto::from(usuario),
        })),
        Err(e) if e.is_conflict() => Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorBody::failure(MSG_ALREADY_REGISTERED),
        )),
        Err(e) => {
            error!(error = %e, "Usuario creation failed");
            Err(api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody::failure(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/usuarios",
    tag = "Usuarios",
    responses(
        (status = 200, description = "Every registered user", body = Vec<UsuarioDto>),
        (status = 500, description = "Store error", body = ErrorBody)
    )
)]
pub async fn list_usuarios(
    State(state): State<UsuarioHandlerState>,
) -> Result<Json<Vec<UsuarioDto>>, ApiError> {
    match state.service.find_all().await {
        Ok(usuarios) => Ok(Json(usuarios.into_iter().map(UsuarioDto::from).collect())),
        Err(e) => {
            error!(error = %e, "Listing usuarios failed");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::failure(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/usuarios/{id}",
    tag = "Usuarios",
    params(("id" = String, Path, description = "24-character hexadecimal id")),
    responses(
        (status = 200, description = "User details", body = UsuarioResponse),
        (status = 400, description = "Malformed id or store error", body = ErrorBody),
        (status = 404, description = "Not registered", body = ErrorBody)
    )
)]
pub async fn get_usuario(
    State(state): State<UsuarioHandlerState>,
    UsuarioIdPath(id): UsuarioIdPath,
) -> Result<Json<UsuarioResponse>, ApiError> {
    match state.service.find_by_id(&id).await {
        Ok(Some(usuario)) => Ok(Json(UsuarioResponse {
            success: true,
            usuario: UsuarioDto::from(usuario),
        })),
        Ok(None) => Err(not_registered()),
        Err(e) => Err(store_failure(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/usuarios/{id}",
    tag = "Usuarios",
    params(("id" = String, Path, description = "24-character hexadecimal id")),
    request_body = UsuarioRequest,
    responses(
        (status = 200, description = "User replaced; body carries the record as it was before", body = UsuarioMutationResponse),
        (status = 400, description = "Malformed id, insufficient fields or store error", body = ErrorBody),
        (status = 404, description = "Not registered", body = ErrorBody)
    )
)]
pub async fn update_usuario(
    State(state): State<UsuarioHandlerState>,
    UsuarioIdPath(id): UsuarioIdPath,
    ValidatedJson(request): ValidatedJson<UsuarioRequest>,
) -> Result<Json<UsuarioMutationResponse>, ApiError> {
    match state.service.update(&id, request.into()).await {
        Ok(Some(usuario)) => Ok(Json(UsuarioMutationResponse {
            success: true,
            message: MSG_UPDATED.to_string(),
            usuario: UsuarioDto::from(usuario),
        })),
        Ok(None) => Err(not_registered()),
        Err(e) => Err(store_failure(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/usuarios/{id}",
    tag = "Usuarios",
    params(("id" = String, Path, description = "24-character hexadecimal id")),
    responses(
        (status = 200, description = "User deleted", body = UsuarioMutationResponse),
        (status = 400, description = "Malformed id or store error", body = ErrorBody),
        (status = 404, description = "Not registered", body = ErrorBody)
    )
)]
pub async fn delete_usuario(
    State(state): State<UsuarioHandlerState>,
    UsuarioIdPath(id): UsuarioIdPath,
) -> Result<Json<UsuarioMutationResponse>, ApiError> {
    match state.service.delete(&id).await {
        Ok(Some(usuario)) => Ok(Json(UsuarioMutationResponse {
            success: true,
            message: MSG_DELETED.to_string(),
            usuario: UsuarioDto::from(usuario),
        })),
        Ok(None) => Err(not_registered()),
        Err(e) => Err(store_failure(e)),
    }
}
