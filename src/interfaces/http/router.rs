//! API Router with Swagger UI

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::UsuarioService;
use crate::interfaces::http::common::ErrorBody;
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{self, MetricsState};
use crate::interfaces::http::modules::usuarios::{self, UsuarioHandlerState};

/// Mount point of the usuario resource
pub const USUARIOS_PATH: &str = "/api/v1/usuarios";

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Usuarios
        usuarios::create_usuario,
        usuarios::list_usuarios,
        usuarios::get_usuario,
        usuarios::update_usuario,
        usuarios::delete_usuario,
    ),
    components(
        schemas(
            ErrorBody,
            health::HealthResponse,
            usuarios::UsuarioDto,
            usuarios::UsuarioRequest,
            usuarios::CreatedUsuarioResponse,
            usuarios::UsuarioResponse,
            usuarios::UsuarioMutationResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Usuarios", description = "Usuario CRUD")
    ),
    info(
        title = "Usuarios API",
        description = "CRUD over usuario records with bcrypt-hashed passwords"
    )
)]
pub struct ApiDoc;

/// Build the full HTTP router.
///
/// `prometheus` is `None` when no recorder was installed (tests, embedding);
/// `/metrics` is then not mounted.
pub fn create_api_router(service: Arc<UsuarioService>, prometheus: Option<PrometheusHandle>) -> Router {
    // The collection answers with and without a trailing slash.
    let collection = get(usuarios::list_usuarios).post(usuarios::create_usuario);
    let usuario_routes = Router::new()
        .route(USUARIOS_PATH, collection.clone())
        .route(&format!("{}/", USUARIOS_PATH), collection)
        .route(
            &format!("{}/{{id}}", USUARIOS_PATH),
            get(usuarios::get_usuario)
                .put(usuarios::update_usuario)
                .delete(usuarios::delete_usuario),
        )
        .with_state(UsuarioHandlerState { service });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState::new());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(usuario_routes);

    if let Some(handle) = prometheus {
        metrics::describe_http_metrics();
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_usuario_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/usuarios"));
        assert!(doc.paths.paths.contains_key("/api/v1/usuarios/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
