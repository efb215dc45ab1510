//! The category labels the extraction prompt asks the model to use.
//!
//! Parsing accepts any label; this enum only recognizes the well-known ones.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum KnownCategory {
    Food,
    Shopping,
    Travel,
    Utilities,
    Rent,
    Salary,
    Transfer,
    #[serde(rename = "ATM")]
    Atm,
    #[serde(rename = "EMI")]
    Emi,
    Fees,
    Investment,
    Other,
}

impl KnownCategory {
    pub const ALL: [KnownCategory; 12] = [
        KnownCategory::Food,
        KnownCategory::Shopping,
        KnownCategory::Travel,
        KnownCategory::Utilities,
        KnownCategory::Rent,
        KnownCategory::Salary,
        KnownCategory::Transfer,
        KnownCategory::Atm,
        KnownCategory::Emi,
        KnownCategory::Fees,
        KnownCategory::Investment,
        KnownCategory::Other,
    ];

    /// Label as it appears in the CSV
    pub fn label(&self) -> &'static str {
        match self {
            KnownCategory::Food => "Food",
            KnownCategory::Shopping => "Shopping",
            KnownCategory::Travel => "Travel",
            KnownCategory::Utilities => "Utilities",
            KnownCategory::Rent => "Rent",
            KnownCategory::Salary => "Salary",
            KnownCategory::Transfer => "Transfer",
            KnownCategory::Atm => "ATM",
            KnownCategory::Emi => "EMI",
            KnownCategory::Fees => "Fees",
            KnownCategory::Investment => "Investment",
            KnownCategory::Other => "Other",
        }
    }

    /// Exact, case-sensitive match against the known labels.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for c in KnownCategory::ALL {
            assert_eq!(KnownCategory::from_label(c.label()), Some(c));
        }
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(KnownCategory::from_label("atm"), None);
        assert_eq!(KnownCategory::from_label("ATM"), Some(KnownCategory::Atm));
    }

    #[test]
    fn test_unknown_label_has_no_match() {
        assert_eq!(KnownCategory::from_label("Groceries"), None);
        assert_eq!(KnownCategory::from_label("Salary"), Some(KnownCategory::Salary));
    }

    #[test]
    fn test_serde_uses_csv_labels() {
        let json = serde_json::to_string(&KnownCategory::Emi).unwrap();
        assert_eq!(json, "\"EMI\"");
    }
}
