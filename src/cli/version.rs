//! `--version` and `--help` output.

use crate::config::{ANON_KEY_VAR, REDIRECT_URL_VAR, URL_VAR};

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("malajunta {}", VERSION)
}

pub fn help_text() -> String {
    format!(
        "{version}
Cliente de terminal de Mala Junta.

USO:
    malajunta [OPCIONES]

OPCIONES:
    -h, --help       Muestra esta ayuda
    -V, --version    Muestra la versión
        --check      Valida la configuración y la tabla de perfiles

ENTORNO:
    {url}          URL del proyecto (o VITE_{url})
    {key}     Clave pública anon (o VITE_{key})
    {redirect} Destino del correo de recuperación (opcional)
    MALAJUNTA_LOG         Filtro de logs (por defecto malajunta=info)

Se carga un archivo .env del directorio actual si existe.",
        version = version_line(),
        url = URL_VAR,
        key = ANON_KEY_VAR,
        redirect = REDIRECT_URL_VAR,
    )
}
