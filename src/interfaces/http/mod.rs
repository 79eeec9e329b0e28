//! HTTP REST API interfaces
//!
//! - `common`: Extractors (validated JSON body, usuario id) and error bodies
//! - `modules`: Handlers grouped by resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, USUARIOS_PATH};
