// ── Barber domain types ──

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use trimly_api::BarberRecord;

/// A member of the shop's team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barber {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Image URL or inline data URI (admin-created barbers upload inline).
    pub img: String,
    pub description_it: String,
    pub description_en: String,
}

impl Barber {
    /// Localized description.
    pub fn description(&self, locale: Locale) -> &str {
        match locale {
            Locale::It => &self.description_it,
            Locale::En => &self.description_en,
        }
    }
}

impl From<BarberRecord> for Barber {
    fn from(rec: BarberRecord) -> Self {
        Self {
            id: rec.id,
            name: rec.name,
            role: Role::from_key(&rec.role_key),
            img: rec.img,
            description_it: rec.description_it,
            description_en: rec.description_en,
        }
    }
}

/// A barber's role. The backend stores role *keys* (e.g.
/// `"team.roles.head_barber"`); unknown keys are carried through verbatim
/// so new roles never break decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    HeadBarber,
    Stylist,
    Barber,
    Junior,
    Other(String),
}

impl Role {
    pub const KNOWN: [Self; 4] = [Self::HeadBarber, Self::Stylist, Self::Barber, Self::Junior];

    /// Parse a backend role key.
    pub fn from_key(key: &str) -> Self {
        match key {
            "team.roles.head_barber" => Self::HeadBarber,
            "team.roles.stylist" => Self::Stylist,
            "team.roles.barber" => Self::Barber,
            "team.roles.junior" => Self::Junior,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The wire key for this role.
    pub fn key(&self) -> String {
        match self {
            Self::HeadBarber => "team.roles.head_barber".to_owned(),
            Self::Stylist => "team.roles.stylist".to_owned(),
            Self::Barber => "team.roles.barber".to_owned(),
            Self::Junior => "team.roles.junior".to_owned(),
            Self::Other(key) => key.clone(),
        }
    }

    /// Localized display name; unknown keys degrade to the raw key.
    pub fn label(&self, locale: Locale) -> String {
        let fixed = match (self, locale) {
            (Self::HeadBarber, Locale::It) => "Capo Barbiere",
            (Self::HeadBarber, Locale::En) => "Head Barber",
            (Self::Stylist, Locale::It) => "Stilista",
            (Self::Stylist, Locale::En) => "Stylist",
            (Self::Barber, Locale::It) => "Barbiere",
            (Self::Barber, Locale::En) => "Barber",
            (Self::Junior, Locale::It) => "Barbiere Junior",
            (Self::Junior, Locale::En) => "Junior Barber",
            (Self::Other(key), _) => return key.clone(),
        };
        fixed.to_owned()
    }
}

impl From<String> for Role {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.key()
    }
}
