//! Styling options for a headshot transform.

use crate::error::{ProPhotoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of the instruction text and user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Korean.
    Ko,
}

impl FromStr for Locale {
    type Err = ProPhotoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "ko" | "kr" | "korean" => Ok(Self::Ko),
            _ => Err(invalid(OptionKey::Locale, s)),
        }
    }
}

/// Steers how the subject is described to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderHint {
    /// Male-styled suit and description.
    Male,
    /// Female-styled suit and description.
    Female,
    /// Let the model infer; the subject is called a person.
    #[default]
    Unspecified,
}

impl GenderHint {
    /// Returns the canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unspecified => "unspecified",
        }
    }
}

impl FromStr for GenderHint {
    type Err = ProPhotoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "man" | "m" => Ok(Self::Male),
            "female" | "woman" | "f" => Ok(Self::Female),
            "unspecified" | "auto" | "none" => Ok(Self::Unspecified),
            _ => Err(invalid(OptionKey::Gender, s)),
        }
    }
}

impl fmt::Display for GenderHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Studio backdrop tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundTone {
    /// Soft grey studio backdrop.
    #[default]
    Grey,
    /// Clean white backdrop.
    White,
}

impl BackgroundTone {
    /// Returns the canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grey => "grey",
            Self::White => "white",
        }
    }
}

impl FromStr for BackgroundTone {
    type Err = ProPhotoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grey" | "gray" => Ok(Self::Grey),
            "white" => Ok(Self::White),
            _ => Err(invalid(OptionKey::Background, s)),
        }
    }
}

impl fmt::Display for BackgroundTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suit color label. Presets are localized; anything else is passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuitColor(String);

impl SuitColor {
    /// Classic navy.
    pub const NAVY: &'static str = "navy";
    /// Plain black.
    pub const BLACK: &'static str = "black";
    /// Calm dark grey.
    pub const DARK_GREY: &'static str = "dark-grey";
    /// Light-colored suit.
    pub const LIGHT: &'static str = "light";

    /// The preset labels offered to users.
    pub const PRESETS: [&'static str; 4] = [Self::NAVY, Self::BLACK, Self::DARK_GREY, Self::LIGHT];

    /// Creates a suit color from a non-blank label.
    pub fn new(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(invalid(OptionKey::SuitColor, &label));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the label as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the wording used inside an instruction.
    pub fn describe(&self, locale: Locale) -> &str {
        let preset = match self.0.to_ascii_lowercase().as_str() {
            Self::NAVY => Some(("navy", "네이비")),
            Self::BLACK => Some(("black", "블랙")),
            Self::DARK_GREY | "dark-gray" | "dark grey" | "dark gray" => {
                Some(("dark grey", "다크 그레이"))
            }
            Self::LIGHT => Some(("light-colored", "밝은 색")),
            _ => None,
        };
        match (preset, locale) {
            (Some((en, _)), Locale::En) => en,
            (Some((_, ko)), Locale::Ko) => ko,
            (None, _) => &self.0,
        }
    }
}

impl Default for SuitColor {
    fn default() -> Self {
        Self(Self::NAVY.to_string())
    }
}

impl fmt::Display for SuitColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SuitColor {
    type Error = ProPhotoError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SuitColor> for String {
    fn from(color: SuitColor) -> Self {
        color.0
    }
}

/// Names a single option field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    /// [`TransformOptions::gender`].
    Gender,
    /// [`TransformOptions::suit_color`].
    SuitColor,
    /// [`TransformOptions::background`].
    Background,
    /// [`TransformOptions::locale`].
    Locale,
}

impl OptionKey {
    /// Returns the option's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::SuitColor => "suit_color",
            Self::Background => "background",
            Self::Locale => "locale",
        }
    }
}

fn invalid(key: OptionKey, value: &str) -> ProPhotoError {
    ProPhotoError::InvalidOption {
        key: key.as_str(),
        value: value.to_string(),
    }
}

/// Options for one transform request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Subject description hint.
    pub gender: GenderHint,
    /// Suit color label.
    pub suit_color: SuitColor,
    /// Backdrop tone.
    pub background: BackgroundTone,
    /// Instruction language.
    #[serde(default)]
    pub locale: Locale,
}

impl TransformOptions {
    /// Creates options with the defaults (unspecified, navy, grey).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gender hint.
    pub fn with_gender(mut self, gender: GenderHint) -> Self {
        self.gender = gender;
        self
    }

    /// Sets the suit color.
    pub fn with_suit_color(mut self, color: SuitColor) -> Self {
        self.suit_color = color;
        self
    }

    /// Sets the background tone.
    pub fn with_background(mut self, background: BackgroundTone) -> Self {
        self.background = background;
        self
    }

    /// Sets the instruction language.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Returns a copy with one field replaced from its text form.
    ///
    /// Unrecognised spellings are rejected and `self` is left as is.
    pub fn with_option(&self, key: OptionKey, value: &str) -> Result<Self> {
        let mut next = self.clone();
        match key {
            OptionKey::Gender => next.gender = value.parse()?,
            OptionKey::SuitColor => next.suit_color = SuitColor::new(value)?,
            OptionKey::Background => next.background = value.parse()?,
            OptionKey::Locale => next.locale = value.parse()?,
        }
        Ok(next)
    }
}
