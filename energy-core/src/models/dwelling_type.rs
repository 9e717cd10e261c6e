use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DwellingType {
    #[serde(alias = "enebolig")]
    Detached,
    #[serde(alias = "rekkehus")]
    Terraced,
    #[serde(alias = "leilighet")]
    Apartment,
}

impl DwellingType {
    pub fn all() -> &'static [DwellingType] {
        &[Self::Detached, Self::Terraced, Self::Apartment]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detached => "detached",
            Self::Terraced => "terraced",
            Self::Apartment => "apartment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Detached => "Detached house",
            Self::Terraced => "Terraced house",
            Self::Apartment => "Apartment",
        }
    }

    /// Parses a select-box code. Norwegian codes
    /// (`enebolig`, `rekkehus`, `leilighet`) are accepted as aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "detached" | "enebolig" => Some(Self::Detached),
            "terraced" | "rekkehus" => Some(Self::Terraced),
            "apartment" | "leilighet" => Some(Self::Apartment),
            _ => None,
        }
    }
}
