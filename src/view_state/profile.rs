//! The `/profile` page and its tabs.

use super::characters::CharactersView;
use super::options::OptionsView;
use super::profile_info::ProfileInfoView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Info,
    Chars,
    Options,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [ProfileTab::Info, ProfileTab::Chars, ProfileTab::Options];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileTab::Info => "Informacion",
            ProfileTab::Chars => "Personajes",
            ProfileTab::Options => "Opciones",
        }
    }

    pub fn next(&self) -> ProfileTab {
        match self {
            ProfileTab::Info => ProfileTab::Chars,
            ProfileTab::Chars => ProfileTab::Options,
            ProfileTab::Options => ProfileTab::Info,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileView {
    pub tab: ProfileTab,
    pub info: ProfileInfoView,
    pub characters: CharactersView,
    pub options: OptionsView,
}
