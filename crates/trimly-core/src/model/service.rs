// ── Service price table ──
//
// Static enumeration; prices are fixed here, never fetched. A booking's
// price is looked up from this table at submission time and stored with
// the booking -- later table changes never touch existing bookings.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::locale::Locale;

/// An offered service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Cut,
    Beard,
    Combo,
    Kid,
}

impl Service {
    pub const ALL: [Self; 4] = [Self::Cut, Self::Beard, Self::Combo, Self::Kid];

    /// Wire identifier, as stored in bookings.
    pub fn id(self) -> &'static str {
        match self {
            Self::Cut => "cut",
            Self::Beard => "beard",
            Self::Combo => "combo",
            Self::Kid => "kid",
        }
    }

    /// Fixed price in euro.
    pub fn price(self) -> f64 {
        match self {
            Self::Cut => 30.0,
            Self::Beard => 20.0,
            Self::Combo => 45.0,
            Self::Kid => 25.0,
        }
    }

    /// Localized display name.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Cut, Locale::It) => "Taglio Uomo",
            (Self::Cut, Locale::En) => "Men's Cut",
            (Self::Beard, Locale::It) => "Rasatura Barba",
            (Self::Beard, Locale::En) => "Beard Shave",
            (Self::Combo, Locale::It) => "Taglio + Barba",
            (Self::Combo, Locale::En) => "Cut + Beard",
            (Self::Kid, Locale::It) => "Taglio Bambino",
            (Self::Kid, Locale::En) => "Kids' Cut",
        }
    }

    /// Look a service up by its wire identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Display name for a raw service id; unknown ids degrade to the id
    /// itself rather than failing.
    pub fn display_name(id: &str, locale: Locale) -> String {
        Self::from_id(id).map_or_else(|| id.to_owned(), |s| s.label(locale).to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_table_is_fixed() {
        assert_eq!(Service::Cut.price(), 30.0);
        assert_eq!(Service::Beard.price(), 20.0);
        assert_eq!(Service::Combo.price(), 45.0);
        assert_eq!(Service::Kid.price(), 25.0);
    }

    #[test]
    fn id_round_trip() {
        for service in Service::ALL {
            assert_eq!(Service::from_id(service.id()), Some(service));
        }
        assert_eq!(Service::from_id("perm"), None);
    }

    #[test]
    fn unknown_service_degrades_to_raw_id() {
        assert_eq!(Service::display_name("cut", Locale::It), "Taglio Uomo");
        assert_eq!(Service::display_name("perm", Locale::En), "perm");
    }
}
