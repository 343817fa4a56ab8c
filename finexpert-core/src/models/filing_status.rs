use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingStatus {
    Single,
    Married,
    HeadOfHousehold,
}

impl FilingStatus {
    pub fn all() -> &'static [FilingStatus] {
        &[Self::Single, Self::Married, Self::HeadOfHousehold]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::Married => "MFJ",
            Self::HeadOfHousehold => "HOH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "S" => Some(Self::Single),
            "MFJ" => Some(Self::Married),
            "HOH" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Married => "Married Filing Jointly",
            Self::HeadOfHousehold => "Head of Household",
        }
    }
}
