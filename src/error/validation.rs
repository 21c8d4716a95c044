//! Form-level validation errors.
//!
//! These are produced before any remote call and carry the text shown inline
//! next to the offending form, so `Display` is the user-facing message.

use thiserror::Error;

/// Input rejected by a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Debes iniciar sesión para {action}")]
    SignInRequired { action: &'static str },

    #[error("Todos los campos son obligatorios")]
    MissingFields,

    #[error("El nombre debe tener al menos {min} caracteres")]
    NameTooShort { min: usize },

    #[error("El nombre no puede superar {max} caracteres")]
    NameTooLong { max: usize },

    #[error("Subclase desconocida: {0}")]
    UnknownSubclass(String),

    #[error("Has alcanzado el límite máximo de {limit} personajes")]
    CharacterLimitReached { limit: usize },

    #[error("El comentario no puede estar vacío")]
    EmptyComment,

    #[error("El comentario debe ser menor a {max} caracteres")]
    CommentTooLong { max: usize },

    #[error("La descripción debe ser menor a {max} caracteres")]
    DescriptionTooLong { max: usize },

    #[error("Por favor selecciona una imagen")]
    NoImageSelected,

    #[error("Por favor selecciona un archivo de imagen válido")]
    NotAnImage,

    #[error("La imagen debe ser menor a {max_mb}MB")]
    FileTooLarge { max_mb: u64 },

    #[error("Este personaje ya está etiquetado")]
    DuplicateCharacterTag,

    #[error("Ya existe un tag con ese nombre")]
    DuplicateTagName,

    #[error("Correo y contraseña son obligatorios")]
    MissingCredentials,

    #[error("La contraseña debe tener al menos {min} caracteres")]
    PasswordTooShort { min: usize },

    #[error("Confirmación incorrecta")]
    ConfirmationMismatch,
}
