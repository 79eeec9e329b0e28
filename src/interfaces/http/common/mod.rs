//! Extractors and response bodies shared across HTTP modules

pub mod responses;
pub mod usuario_id_path;
pub mod validated_json;

pub use responses::*;
pub use usuario_id_path::UsuarioIdPath;
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
