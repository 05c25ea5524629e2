#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadArticles,
    SavePreferences(crate::Preferences),
}
