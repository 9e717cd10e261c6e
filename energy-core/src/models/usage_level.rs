use serde::{Deserialize, Serialize};

/// Self-reported level of household electricity use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectricityUsageLevel {
    #[serde(alias = "lav")]
    Low,
    #[serde(alias = "middels")]
    Medium,
    #[serde(alias = "hoy", alias = "høy")]
    High,
}

impl ElectricityUsageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" | "lav" => Some(Self::Low),
            "medium" | "middels" => Some(Self::Medium),
            "high" | "hoy" | "høy" => Some(Self::High),
            _ => None,
        }
    }
}
