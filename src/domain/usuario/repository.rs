use async_trait::async_trait;

use super::{SaveUsuarioDto, Usuario, UsuarioId};
use crate::domain::DomainResult;

/// Persistence port for [`Usuario`] records.
///
/// Implementations enforce email uniqueness and report a collision as
/// [`DomainError::Conflict`](crate::domain::DomainError::Conflict).
#[async_trait]
pub trait UsuarioRepositoryInterface: Send + Sync {
    /// Insert a new record; the store assigns the id.
    async fn create(&self, dto: SaveUsuarioDto) -> DomainResult<Usuario>;

    async fn find_all(&self) -> DomainResult<Vec<Usuario>>;
    async fn find_by_id(&self, id: &UsuarioId) -> DomainResult<Option<Usuario>>;

    /// Replace all fields of the record; returns the record as it was before.
    async fn update_by_id(&self, id: &UsuarioId, dto: SaveUsuarioDto) -> DomainResult<Option<Usuario>>;
    /// Remove the record; returns what was removed.
    async fn delete_by_id(&self, id: &UsuarioId) -> DomainResult<Option<Usuario>>;
}
