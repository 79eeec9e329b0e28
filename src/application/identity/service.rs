//! Usuario management service — application-layer orchestration
//!
//! HTTP handlers stay thin: they validate the request shape and map the
//! outcome to a response, everything in between lives here.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    DomainError, DomainResult, SaveUsuarioDto, Usuario, UsuarioId, UsuarioRepositoryInterface,
};
use crate::infrastructure::crypto::PasswordHasher;

/// Plaintext fields as received from a client, already schema-validated.
#[derive(Debug, Clone)]
pub struct UsuarioInput {
    pub display_name: String,
    pub email: String,
    pub senha: String,
}

/// Orchestrates the usuario CRUD use-cases over any repository backend.
pub struct UsuarioService {
    repo: Arc<dyn UsuarioRepositoryInterface>,
    hasher: PasswordHasher,
}

impl UsuarioService {
    pub fn new(repo: Arc<dyn UsuarioRepositoryInterface>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    /// Replace the plaintext secret with its hash.
    fn seal(&self, input: UsuarioInput) -> DomainResult<SaveUsuarioDto> {
        let senha = self
            .hasher
            .hash(&input.senha)
            .map_err(|e| DomainError::Hashing(e.to_string()))?;
        Ok(SaveUsuarioDto {
            display_name: input.display_name,
            email: input.email,
            senha,
        })
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn create(&self, input: UsuarioInput) -> DomainResult<Usuario> {
        let dto = self.seal(input)?;
        match self.repo.create(dto).await {
            Ok(usuario) => {
                info!(usuario_id = %usuario.id, "Usuario created");
                Ok(usuario)
            }
            Err(e) => {
                warn!(error = %e, "Usuario creation rejected");
                Err(e)
            }
        }
    }

    /// Whole-document replace; `senha` is re-hashed even when unchanged.
    /// Returns the record as it was before the replace.
    pub async fn update(&self, id: &UsuarioId, input: UsuarioInput) -> DomainResult<Option<Usuario>> {
        let dto = self.seal(input)?;
        let previous = self.repo.update_by_id(id, dto).await?;
        if previous.is_some() {
            info!(usuario_id = %id, "Usuario updated");
        }
        Ok(previous)
    }

    pub async fn delete(&self, id: &UsuarioId) -> DomainResult<Option<Usuario>> {
        let deleted = self.repo.delete_by_id(id).await?;
        if deleted.is_some() {
            info!(usuario_id = %id, "Usuario deleted");
        }
        Ok(deleted)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn find_all(&self) -> DomainResult<Vec<Usuario>> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: &UsuarioId) -> DomainResult<Option<Usuario>> {
        self.repo.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::verify_password;
    use crate::infrastructure::storage::InMemoryUsuarioRepository;

    fn service() -> UsuarioService {
        UsuarioService::new(
            Arc::new(InMemoryUsuarioRepository::new()),
            PasswordHasher::new(4),
        )
    }

    fn input(name: &str, email: &str, senha: &str) -> UsuarioInput {
        UsuarioInput {
            display_name: name.to_string(),
            email: email.to_string(),
            senha: senha.to_string(),
        }
    }

    #[tokio::test]
    async fn create_stores_hash_not_plaintext() {
        let svc = service();
        let created = svc
            .create(input("Ana", "ana@example.com", "segredo123"))
            .await
            .unwrap();

        assert_ne!(created.senha, "segredo123");
        assert!(verify_password("segredo123", &created.senha).unwrap());

        let fetched = svc.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_conflict() {
        let svc = service();
        svc.create(input("Ana", "ana@example.com", "segredo123"))
            .await
            .unwrap();

        let err = svc
            .create(input("Ana 2", "ana@example.com", "outrasenha"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn update_rehashes_unchanged_secret() {
        let svc = service();
        let created = svc
            .create(input("Ana", "ana@example.com", "segredo123"))
            .await
            .unwrap();

        let previous = svc
            .update(&created.id, input("Ana Maria", "ana@example.com", "segredo123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(previous, created);

        let stored = svc.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.display_name, "Ana Maria");
        assert_ne!(stored.senha, created.senha);
        assert!(verify_password("segredo123", &stored.senha).unwrap());
    }

    #[tokio::test]
    async fn delete_then_lookup_is_none() {
        let svc = service();
        let created = svc
            .create(input("Ana", "ana@example.com", "segredo123"))
            .await
            .unwrap();

        assert!(svc.delete(&created.id).await.unwrap().is_some());
        assert!(svc.find_by_id(&created.id).await.unwrap().is_none());
        assert!(svc.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn hashing_failure_skips_the_store() {
        let repo = Arc::new(InMemoryUsuarioRepository::new());
        let svc = UsuarioService::new(repo.clone(), PasswordHasher::new(1));

        let err = svc
            .create(input("Ana", "ana@example.com", "segredo123"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Hashing(_)));
        assert!(repo.is_empty());
    }
}
