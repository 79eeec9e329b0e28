//! In-memory storage implementation

use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::oid::ObjectId;

use crate::domain::{
    DomainError, DomainResult, SaveUsuarioDto, Usuario, UsuarioId, UsuarioRepositoryInterface,
};

/// In-memory usuario store for development and testing.
///
/// Mirrors the MongoDB store's contract: ObjectId-shaped ids and a unique
/// `email`. Writes touching the email index are serialized through
/// `write_lock` so two concurrent inserts cannot both claim the same email.
pub struct InMemoryUsuarioRepository {
    usuarios: DashMap<UsuarioId, Usuario>,
    write_lock: Mutex<()>,
}

impl InMemoryUsuarioRepository {
    pub fn new() -> Self {
        Self {
            usuarios: DashMap::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn len(&self) -> usize {
        self.usuarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usuarios.is_empty()
    }

    fn email_taken(&self, email: &str, except: Option<&UsuarioId>) -> bool {
        self.usuarios
            .iter()
            .any(|e| e.value().email == email && Some(e.key()) != except)
    }

    fn lock(&self) -> DomainResult<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| DomainError::Storage("in-memory store lock poisoned".into()))
    }
}

impl Default for InMemoryUsuarioRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate_email(email: &str) -> DomainError {
    DomainError::Conflict(format!("email '{}' is already registered", email))
}

#[async_trait]
impl UsuarioRepositoryInterface for InMemoryUsuarioRepository {
    async fn create(&self, dto: SaveUsuarioDto) -> DomainResult<Usuario> {
        let _guard = self.lock()?;
        if self.email_taken(&dto.email, None) {
            return Err(duplicate_email(&dto.email));
        }

        let id = UsuarioId::parse(&ObjectId::new().to_hex())?;
        let usuario = Usuario {
            id: id.clone(),
            display_name: dto.display_name,
            email: dto.email,
            senha: dto.senha,
        };
        self.usuarios.insert(id, usuario.clone());
        Ok(usuario)
    }

    async fn find_all(&self) -> DomainResult<Vec<Usuario>> {
        let mut all: Vec<Usuario> = self.usuarios.iter().map(|e| e.value().clone()).collect();
        // ObjectIds start with a timestamp, so this approximates insertion order
        all.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(all)
    }

    async fn find_by_id(&self, id: &UsuarioId) -> DomainResult<Option<Usuario>> {
        Ok(self.usuarios.get(id).map(|u| u.clone()))
    }

    async fn update_by_id(&self, id: &UsuarioId, dto: SaveUsuarioDto) -> DomainResult<Option<Usuario>> {
        let _guard = self.lock()?;
        if !self.usuarios.contains_key(id) {
            return Ok(None);
        }
        if self.email_taken(&dto.email, Some(id)) {
            return Err(duplicate_email(&dto.email));
        }

        let replacement = Usuario {
            id: id.clone(),
            display_name: dto.display_name,
            email: dto.email,
            senha: dto.senha,
        };
        Ok(self.usuarios.insert(id.clone(), replacement))
    }

    async fn delete_by_id(&self, id: &UsuarioId) -> DomainResult<Option<Usuario>> {
        let _guard = self.lock()?;
        Ok(self.usuarios.remove(id).map(|(_, u)| u))
    }
}
