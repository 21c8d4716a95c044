//! `--check`: validate the configuration and check the backend.

use color_eyre::Result;

use crate::config::BackendConfig;
use crate::gateway::{Gateway, SchemaStatus, SCHEMA_SQL};

/// Print what was found; a missing table prints the SQL that creates it.
pub async fn run_check(config: BackendConfig) -> Result<SchemaStatus> {
    println!("Backend: {}", config.url);
    let gateway = Gateway::connect(config);
    let status = gateway.check_profiles_table().await?;
    match status {
        SchemaStatus::Ready => println!("✓ La tabla profiles está lista"),
        SchemaStatus::Missing => {
            println!("✗ Falta la tabla profiles. Ejecuta este SQL en el editor del proyecto:\n");
            println!("{}", SCHEMA_SQL);
        }
    }
    Ok(status)
}
