//! Usuario DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::UsuarioInput;
use crate::domain::Usuario;

/// Usuario API representation. `senha` is the stored bcrypt hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioDto {
    /// 24-character hexadecimal id
    #[schema(example = "5d1e2b3c4a5f6e7d8c9b0a1f")]
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub senha: String,
}

impl From<Usuario> for UsuarioDto {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id.to_string(),
            display_name: u.display_name,
            email: u.email,
            senha: u.senha,
        }
    }
}

/// Create / replace request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "displayName": "Glaucia",
    "email": "glaucia@example.com",
    "senha": "minhasenha123"
}))]
pub struct UsuarioRequest {
    #[validate(length(min = 1))]
    pub display_name: String,
    #[validate(length(min = 1))]
    pub email: String,
    /// Plaintext, 8 to 32 characters
    #[validate(length(min = 8, max = 32))]
    pub senha: String,
}

impl From<UsuarioRequest> for UsuarioInput {
    fn from(r: UsuarioRequest) -> Self {
        Self {
            display_name: r.display_name,
            email: r.email,
            senha: r.senha,
        }
    }
}

/// `POST` success body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedUsuarioResponse {
    pub message: String,
    pub usuario: UsuarioDto,
}

/// `GET /{id}` success body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsuarioResponse {
    pub success: bool,
    pub usuario: UsuarioDto,
}

/// `PUT` / `DELETE` success body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsuarioMutationResponse {
    pub success: bool,
    pub message: String,
    pub usuario: UsuarioDto,
}
