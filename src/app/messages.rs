//! AppMessage enum for async communication within the application.

use crate::identity::IdentityNotice;

/// Messages received from spawned tasks.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// The identity snapshot changed (session or profile).
    Identity(IdentityNotice),
    /// Session restore at startup finished.
    SessionRestored { error: Option<String> },
}
