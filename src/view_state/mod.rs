//! Headless view state.
//!
//! Each screen and widget keeps its own state here and exposes the actions a
//! user can take as async methods over an [`AppContext`](crate::context::AppContext).
//! The ratatui front-end in `ui` only reads these structs; `app` maps keys to
//! the actions.
//!
//! ## Components
//!
//! - [`Router`]: current route and its guards
//! - [`FeedView`] / [`UploadForm`]: the media feed and the new-post modal
//! - [`PostView`] / [`CommentsPanel`] / [`CommentView`]: a post and its comments
//! - [`ProfileView`]: the Info, Chars and Options tabs
//! - [`LoginView`], [`NavbarView`]

mod characters;
mod comment;
mod feed;
pub mod format;
mod like;
mod login;
pub mod messages;
mod navbar;
mod options;
mod post;
mod profile;
mod profile_info;
mod router;
mod upload;

pub use characters::{CharacterForm, CharactersView};
pub use comment::{CommentView, CommentsPanel};
pub use feed::FeedView;
pub use like::LikeState;
pub use login::{LoginField, LoginMode, LoginView};
pub use navbar::NavbarView;
pub use options::{OptionsView, PREFERENCES};
pub use post::PostView;
pub use profile::{ProfileTab, ProfileView};
pub use profile_info::{ProfileInfoView, Toast};
pub use router::{Resolution, Route, Router};
pub use upload::UploadForm;
