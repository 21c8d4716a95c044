use super::format::initials;
use super::messages::BRAND;
use super::router::Route;
use crate::identity::Identity;

/// Data for the top bar.
#[derive(Debug, Clone, PartialEq)]
pub struct NavbarView {
    pub brand: &'static str,
    pub links: Vec<(Route, bool)>,
    /// Display name and initials when signed in.
    pub user: Option<(String, String)>,
    pub has_avatar: bool,
}

impl NavbarView {
    pub fn build(identity: &Identity, current: Route) -> Self {
        let links = Route::NAV.iter().map(|r| (*r, *r == current)).collect();
        let user = identity.user.as_ref().map(|user| {
            let name = identity.display_name().unwrap_or_default();
            let profile_name = identity.profile.as_ref().and_then(|p| p.full_name.as_deref());
            // Navbar shows a single initial
            let initial: String = initials(profile_name, user.email.as_deref())
                .chars()
                .take(1)
                .collect();
            (name, initial)
        });
        Self {
            brand: BRAND,
            links,
            user,
            has_avatar: identity.avatar_url().is_some(),
        }
    }
}
