/// Fields written by both create and update (whole-document replace).
///
/// `senha` is the already hashed secret.
#[derive(Debug, Clone)]
pub struct SaveUsuarioDto {
    pub display_name: String,
    pub email: String,
    pub senha: String,
}
