//! The `/login` form.

use super::messages;
use crate::context::AppContext;
use crate::error::{AppResult, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

/// Focusable inputs, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    FullName,
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginView {
    pub mode: LoginMode,
    pub focus: LoginField,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub loading: bool,
    pub error: Option<String>,
    /// Non-error notice (confirmation e-mail sent, reset e-mail sent).
    pub info: Option<String>,
}

impl LoginView {
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
        self.focus = match self.mode {
            LoginMode::SignIn => LoginField::Email,
            LoginMode::SignUp => LoginField::FullName,
        };
        self.error = None;
        self.info = None;
    }

    pub fn fields(&self) -> &'static [LoginField] {
        match self.mode {
            LoginMode::SignIn => &[LoginField::Email, LoginField::Password],
            LoginMode::SignUp => &[LoginField::FullName, LoginField::Email, LoginField::Password],
        }
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + 1) % fields.len()];
    }

    pub fn focused_input(&mut self) -> &mut String {
        match self.focus {
            LoginField::FullName => &mut self.full_name,
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    /// Sign in or up. Returns `true` when a session was obtained and the
    /// caller should navigate home.
    pub async fn submit(&mut self, ctx: &AppContext) -> AppResult<bool> {
        self.loading = true;
        self.error = None;
        self.info = None;
        let result = match self.mode {
            LoginMode::SignIn => ctx
                .identity
                .sign_in(&self.email, &self.password)
                .await
                .map(|()| true),
            LoginMode::SignUp => ctx
                .identity
                .sign_up(&self.email, &self.password, &self.full_name)
                .await
                .map(|needs_confirmation| !needs_confirmation),
        };
        self.loading = false;

        match &result {
            Ok(true) => self.password.clear(),
            Ok(false) => self.info = Some(messages::CONFIRM_EMAIL.to_string()),
            Err(e) => {
                let fallback = match self.mode {
                    LoginMode::SignIn => messages::SIGN_IN_FAILED,
                    LoginMode::SignUp => messages::SIGN_UP_FAILED,
                };
                self.error = Some(e.display_message(fallback));
            }
        }
        result
    }

    /// Send a password-reset e-mail to the typed address.
    pub async fn reset_password(&mut self, ctx: &AppContext) -> AppResult<()> {
        self.error = None;
        self.info = None;
        if self.email.trim().is_empty() {
            let err = ValidationError::MissingCredentials;
            self.error = Some(err.to_string());
            return Err(err.into());
        }
        match ctx.gateway.reset_password(&self.email).await {
            Ok(()) => {
                self.info = Some(messages::RESET_SENT.to_string());
                Ok(())
            }
            Err(e) => {
                self.error = Some(messages::RESET_FAILED.to_string());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycle() {
        let mut view = LoginView::default();
        assert_eq!(view.focus, LoginField::Email);
        view.next_field();
        assert_eq!(view.focus, LoginField::Password);
        view.next_field();
        assert_eq!(view.focus, LoginField::Email);

        view.toggle_mode();
        assert_eq!(view.focus, LoginField::FullName);
        view.focused_input().push_str("Ana");
        assert_eq!(view.full_name, "Ana");
    }
}
