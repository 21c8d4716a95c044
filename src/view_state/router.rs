//! Routes and the guards in front of them.

use std::time::{Duration, Instant};

use crate::identity::{Identity, IdentityState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Media,
    Profile,
    Login,
}

impl Route {
    /// Links shown in the navbar, in order.
    pub const NAV: [Route; 2] = [Route::Home, Route::Media];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Media => "/media",
            Route::Profile => "/profile",
            Route::Login => "/login",
        }
    }

    /// Parse a path; unknown paths land on home.
    pub fn parse(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "/media" => Route::Media,
            "/profile" => Route::Profile,
            "/login" => Route::Login,
            _ => Route::Home,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Inicio",
            Route::Media => "Media",
            Route::Profile => "Perfil",
            Route::Login => "Ingresar",
        }
    }
}

/// What the screen should show for the requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Show(Route),
    /// Waiting for the identity to settle.
    Loading,
    Redirect(Route),
}

/// Current route plus the profile-loading fallback timer.
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    fallback: Duration,
    waiting_since: Option<Instant>,
    fallback_logged: bool,
}

impl Router {
    pub fn new(fallback: Duration) -> Self {
        Self {
            current: Route::Home,
            fallback,
            waiting_since: None,
            fallback_logged: false,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigating to {}", route.path());
        self.current = route;
        self.waiting_since = None;
        self.fallback_logged = false;
    }

    /// Apply the guards for the current route and follow any redirect.
    ///
    /// `/login` bounces a signed-in user home. `/profile` starts the
    /// fallback timer on entry. A signed-in user sees Loading while the
    /// identity settles, and the profile as it stands once the fallback has
    /// elapsed. Without a user the route keeps showing Loading until the
    /// fallback has elapsed and the session is no longer loading, then
    /// redirects to `/`.
    pub fn resolve(&mut self, identity: &Identity, now: Instant) -> Resolution {
        let resolution = match self.current {
            Route::Login if identity.is_signed_in() => Resolution::Redirect(Route::Home),
            Route::Profile => self.guard_profile(identity, now),
            route => Resolution::Show(route),
        };
        if let Resolution::Redirect(to) = resolution {
            self.navigate(to);
        }
        resolution
    }

    fn guard_profile(&mut self, identity: &Identity, now: Instant) -> Resolution {
        let since = *self.waiting_since.get_or_insert(now);
        let timed_out = now.duration_since(since) >= self.fallback;

        if identity.is_signed_in() {
            let waiting = identity.loading || identity.state() == IdentityState::LoadingProfile;
            if waiting && !timed_out {
                return Resolution::Loading;
            }
            if waiting && !self.fallback_logged {
                tracing::warn!("Profile still loading after {:?}", self.fallback);
                self.fallback_logged = true;
            }
            return Resolution::Show(Route::Profile);
        }

        if timed_out && !identity.loading {
            tracing::info!("Not signed in, leaving {}", Route::Profile.path());
            return Resolution::Redirect(Route::Home);
        }
        Resolution::Loading
    }
}
