//! Display state of a password field.
//!
//! The field is either masked (`type="password"`) or revealed
//! (`type="text"`), and the toggle control carries exactly one icon class
//! matching that state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `type` attribute value of a masked field
pub const INPUT_TYPE_PASSWORD: &str = "password";
/// `type` attribute value of a revealed field
pub const INPUT_TYPE_TEXT: &str = "text";

/// Icon class shown while the password is revealed
pub const ICON_EYE: &str = "bi-eye";
/// Icon class shown while the password is masked
pub const ICON_EYE_SLASH: &str = "bi-eye-slash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Masked,
    Revealed,
}

impl Visibility {
    /// Reads the state from a field's `type` attribute.
    ///
    /// Only `"password"` counts as masked; a missing or unknown type is
    /// treated as plain text, so the next toggle masks it.
    pub fn from_input_type(input_type: Option<&str>) -> Self {
        match input_type {
            Some(INPUT_TYPE_PASSWORD) => Visibility::Masked,
            _ => Visibility::Revealed,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Visibility::Masked => Visibility::Revealed,
            Visibility::Revealed => Visibility::Masked,
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            Visibility::Masked => INPUT_TYPE_PASSWORD,
            Visibility::Revealed => INPUT_TYPE_TEXT,
        }
    }

    /// The icon class that is active in this state
    pub fn icon_class(self, icons: &IconClasses) -> &str {
        match self {
            Visibility::Masked => &icons.masked,
            Visibility::Revealed => &icons.revealed,
        }
    }

    /// The icon class that must be absent in this state
    pub fn inactive_icon_class(self, icons: &IconClasses) -> &str {
        self.toggled().icon_class(icons)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Masked => write!(f, "masked"),
            Visibility::Revealed => write!(f, "revealed"),
        }
    }
}

/// The pair of mutually exclusive icon classes on the toggle control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconClasses {
    pub revealed: String,
    pub masked: String,
}

impl Default for IconClasses {
    fn default() -> Self {
        Self {
            revealed: ICON_EYE.to_string(),
            masked: ICON_EYE_SLASH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_type() {
        assert_eq!(Visibility::from_input_type(Some("password")), Visibility::Masked);
        assert_eq!(Visibility::from_input_type(Some("text")), Visibility::Revealed);
        assert_eq!(Visibility::from_input_type(None), Visibility::Revealed);
        // Matching is exact, like the attribute comparison in the browser
        assert_eq!(Visibility::from_input_type(Some("Password")), Visibility::Revealed);
        assert_eq!(Visibility::from_input_type(Some("email")), Visibility::Revealed);
    }

    #[test]
    fn test_toggled_is_an_involution() {
        for state in [Visibility::Masked, Visibility::Revealed] {
            assert_ne!(state.toggled(), state);
            assert_eq!(state.toggled().toggled(), state);
        }
    }

    #[test]
    fn test_input_type_round_trips() {
        for state in [Visibility::Masked, Visibility::Revealed] {
            assert_eq!(Visibility::from_input_type(Some(state.input_type())), state);
        }
    }

    #[test]
    fn test_icon_classes() {
        let icons = IconClasses::default();

        assert_eq!(Visibility::Masked.icon_class(&icons), "bi-eye-slash");
        assert_eq!(Visibility::Revealed.icon_class(&icons), "bi-eye");
        assert_eq!(Visibility::Masked.inactive_icon_class(&icons), "bi-eye");
        assert_eq!(Visibility::Revealed.inactive_icon_class(&icons), "bi-eye-slash");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Visibility::Revealed).unwrap();
        assert_eq!(json, "\"revealed\"");

        let parsed: Visibility = serde_json::from_str("\"masked\"").unwrap();
        assert_eq!(parsed, Visibility::Masked);
    }
}
