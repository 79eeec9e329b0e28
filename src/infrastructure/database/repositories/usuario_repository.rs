//! MongoDB implementation of UsuarioRepositoryInterface

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    DomainError, DomainResult, SaveUsuarioDto, Usuario, UsuarioId, UsuarioRepositoryInterface,
};

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Document shape stored in the `usuarios` collection.
#[derive(Debug, Serialize, Deserialize)]
struct UsuarioDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(rename = "displayName")]
    display_name: String,
    email: String,
    senha: String,
}

impl From<SaveUsuarioDto> for UsuarioDocument {
    fn from(dto: SaveUsuarioDto) -> Self {
        Self {
            id: None,
            display_name: dto.display_name,
            email: dto.email,
            senha: dto.senha,
        }
    }
}

impl TryFrom<UsuarioDocument> for Usuario {
    type Error = DomainError;

    fn try_from(d: UsuarioDocument) -> Result<Self, Self::Error> {
        let id = d
            .id
            .ok_or_else(|| DomainError::Storage("document without _id".into()))?;
        Ok(Usuario {
            id: UsuarioId::parse(&id.to_hex())?,
            display_name: d.display_name,
            email: d.email,
            senha: d.senha,
        })
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

fn map_mongo_error(err: MongoError) -> DomainError {
    if is_duplicate_key(&err) {
        DomainError::Conflict("email is already registered".into())
    } else {
        DomainError::Storage(err.to_string())
    }
}

fn id_filter(id: &UsuarioId) -> DomainResult<Document> {
    let oid = ObjectId::parse_str(id.as_str())
        .map_err(|e| DomainError::Validation(format!("malformed id '{}': {}", id, e)))?;
    Ok(doc! { "_id": oid })
}

/// MongoDB-backed usuario repository
pub struct MongoUsuarioRepository {
    collection: Collection<UsuarioDocument>,
}

impl MongoUsuarioRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<UsuarioDocument>(collection_name),
        }
    }

    /// Create the unique index on `email`. Idempotent.
    pub async fn ensure_indexes(&self) -> DomainResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection
            .create_index(index)
            .await
            .map_err(map_mongo_error)?;
        tracing::info!(collection = %self.collection.name(), "Unique email index ensured");
        Ok(())
    }
}

#[async_trait]
impl UsuarioRepositoryInterface for MongoUsuarioRepository {
    #[instrument(skip(self, dto), fields(email = %dto.email))]
    async fn create(&self, dto: SaveUsuarioDto) -> DomainResult<Usuario> {
        let mut document = UsuarioDocument::from(dto);
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(map_mongo_error)?;

        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| DomainError::Storage("inserted _id is not an ObjectId".into()))?;
        document.id = Some(oid);

        Usuario::try_from(document)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> DomainResult<Vec<Usuario>> {
        let cursor = self.collection.find(doc! {}).await.map_err(map_mongo_error)?;
        let documents: Vec<UsuarioDocument> = cursor.try_collect().await.map_err(map_mongo_error)?;
        documents.into_iter().map(Usuario::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &UsuarioId) -> DomainResult<Option<Usuario>> {
        self.collection
            .find_one(id_filter(id)?)
            .await
            .map_err(map_mongo_error)?
            .map(Usuario::try_from)
            .transpose()
    }

    #[instrument(skip(self, dto))]
    async fn update_by_id(&self, id: &UsuarioId, dto: SaveUsuarioDto) -> DomainResult<Option<Usuario>> {
        self.collection
            .find_one_and_replace(id_filter(id)?, UsuarioDocument::from(dto))
            .return_document(ReturnDocument::Before)
            .await
            .map_err(map_mongo_error)?
            .map(Usuario::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &UsuarioId) -> DomainResult<Option<Usuario>> {
        self.collection
            .find_one_and_delete(id_filter(id)?)
            .await
            .map_err(map_mongo_error)?
            .map(Usuario::try_from)
            .transpose()
    }
}
