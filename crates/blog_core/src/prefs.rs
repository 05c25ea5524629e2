use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything but `dark` is the light theme.
    pub fn from_key(key: &str) -> Self {
        if key == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl From<String> for Theme {
    fn from(key: String) -> Self {
        Theme::from_key(&key)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.as_key().to_string()
    }
}

/// Reading fonts; keys match the `data-font` attribute values of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Font {
    #[default]
    Serif,
    Naskh,
    Sans,
    Tajawal,
}

impl Font {
    /// Cycle order.
    pub const ALL: [Font; 4] = [Font::Serif, Font::Naskh, Font::Sans, Font::Tajawal];

    /// Unknown keys fall back to [`Font::Serif`].
    pub fn from_key(key: &str) -> Self {
        Font::ALL
            .into_iter()
            .find(|font| font.as_key() == key)
            .unwrap_or_default()
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Font::Serif => "serif",
            Font::Naskh => "naskh",
            Font::Sans => "sans",
            Font::Tajawal => "tajawal",
        }
    }

    /// The next font in [`Font::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let index = Font::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Font::ALL[(index + 1) % Font::ALL.len()]
    }
}

impl From<String> for Font {
    fn from(key: String) -> Self {
        Font::from_key(&key)
    }
}

impl From<Font> for String {
    fn from(font: Font) -> Self {
        font.as_key().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub font: Font,
}
