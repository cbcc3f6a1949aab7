//! Bilingual (IT/EN) static copy.
//!
//! Translation storage is the backend's concern for dynamic content
//! (barber descriptions travel in both languages); this module only picks
//! which side of the static tables to render.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Output language for service names, roles, and field labels.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    /// Italian -- the shop's default.
    #[default]
    It,
    /// English.
    En,
}

impl Locale {
    /// Label for the "no preference" barber choice.
    pub fn any_barber(self) -> &'static str {
        match self {
            Self::It => "Qualsiasi",
            Self::En => "Any barber",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Locale::from_str("IT").ok(), Some(Locale::It));
        assert_eq!(Locale::from_str("en").ok(), Some(Locale::En));
        assert!(Locale::from_str("de").is_err());
    }
}
