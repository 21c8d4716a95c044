//! The "Options" profile tab.

use super::messages;
use crate::context::AppContext;
use crate::error::AppResult;

/// Preferences listed on the tab, none available yet.
pub const PREFERENCES: [&str; 6] = [
    "Tema Oscuro",
    "Notificaciones",
    "Idioma",
    "Cambiar Contraseña",
    "Autenticación 2FA",
    "Exportar Datos",
];

#[derive(Debug, Clone, Default)]
pub struct OptionsView {
    /// Typed confirmation word.
    pub confirmation: String,
    pub confirming: bool,
    pub deleting: bool,
    pub deleted: bool,
    pub error: Option<String>,
}

impl OptionsView {
    pub fn start_delete(&mut self) {
        self.confirming = true;
        self.confirmation.clear();
        self.error = None;
    }

    pub fn cancel_delete(&mut self) {
        self.confirming = false;
        self.confirmation.clear();
    }

    /// Delete the account if the typed word matches.
    pub async fn delete_account(&mut self, ctx: &AppContext) -> AppResult<()> {
        self.deleting = true;
        self.error = None;
        let result = ctx.identity.delete_account(&self.confirmation).await;
        self.deleting = false;
        match result {
            Ok(()) => {
                self.confirming = false;
                self.deleted = true;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message(messages::ACCOUNT_DELETE_FAILED));
                Err(e)
            }
        }
    }
}
