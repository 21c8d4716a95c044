//! User-facing strings.

pub const BRAND: &str = "Mala Junta";

pub const LIKE_FAILED: &str = "Error al procesar el like";
pub const COMMENTS_LOAD_FAILED: &str = "Error al cargar los comentarios";
pub const COMMENT_CREATE_FAILED: &str = "Error al crear el comentario";
pub const COMMENT_DELETE_FAILED: &str = "Error al eliminar el comentario";
pub const POST_DELETE_FAILED: &str = "Error al eliminar la publicación";
pub const DOWNLOAD_FAILED: &str = "Error al descargar la imagen";
pub const POSTS_LOAD_FAILED: &str = "Error al cargar las publicaciones";
pub const UPLOAD_FAILED: &str = "Error al subir la publicación";
pub const SEARCH_FAILED: &str = "Error al buscar personajes";
pub const CHARACTER_SAVE_FAILED: &str = "Error al crear/actualizar el personaje. Inténtalo de nuevo.";
pub const CHARACTER_DELETE_FAILED: &str = "Error al eliminar el personaje. Inténtalo de nuevo.";
pub const CHARACTERS_LOAD_FAILED: &str = "Error al cargar los personajes";
pub const PROFILE_UPDATE_FAILED: &str = "Error al actualizar el perfil";
pub const AVATAR_UPLOAD_FAILED: &str = "Error al subir el avatar";
pub const AVATAR_DELETE_FAILED: &str = "Error al eliminar el avatar";
pub const PROFILE_CREATE_FAILED: &str = "Error al crear el perfil";
pub const ACCOUNT_DELETE_FAILED: &str = "Error eliminando la cuenta";
pub const SIGN_IN_FAILED: &str = "Correo o contraseña incorrectos";
pub const SIGN_UP_FAILED: &str = "No se pudo crear la cuenta";
pub const RESET_FAILED: &str = "No se pudo enviar el correo de recuperación";

pub const PROFILE_UPDATED: &str = "Perfil actualizado correctamente";
pub const AVATAR_UPDATED: &str = "Avatar actualizado correctamente";
pub const AVATAR_DELETED: &str = "Avatar eliminado correctamente";
pub const ACCOUNT_DELETED: &str = "Tu cuenta ha sido eliminada exitosamente.";
pub const CONFIRM_EMAIL: &str = "Revisa tu correo para confirmar la cuenta";
pub const POST_PUBLISHED: &str = "Publicación subida";
pub const IMAGE_SAVED: &str = "Imagen guardada en";
pub const SIGNED_OUT: &str = "Sesión cerrada";
pub const RESET_SENT: &str = "Te enviamos un correo para restablecer la contraseña";

pub const CONFIRM_DELETE_POST: &str = "¿Estás seguro de que quieres eliminar esta publicación?";
pub const CONFIRM_DELETE_COMMENT: &str = "¿Estás seguro de que quieres eliminar este comentario?";
pub const CONFIRM_DELETE_CHARACTER: &str = "¿Estás seguro de que quieres eliminar este personaje?";
pub const CONFIRM_DELETE_ACCOUNT: &str =
    "Esta acción NO se puede deshacer. Escribe \"ELIMINAR\" para confirmar:";

pub const LOADING_PROFILE: &str = "Cargando perfil...";
pub const REDIRECTING: &str = "Redirigiendo...";
pub const NO_CHARACTERS: &str = "Aún no agregaste personajes";
pub const NO_POSTS: &str = "Todavía no hay publicaciones";
pub const NO_COMMENTS: &str = "Sé el primero en comentar";
pub const COMING_SOON: &str = "Próximamente";
pub const CONFIRM_DELETE_AVATAR: &str = "¿Estás seguro de que quieres eliminar tu foto de perfil?";
