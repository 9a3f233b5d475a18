use serde::{Deserialize, Serialize};

/// Binary classification outcome. Class index 0 is `Scam`, class index 1 is `Safe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Scam,
    Safe,
}

impl Label {
    /// Map a classifier class index to a label.
    pub fn from_class_index(index: usize) -> Self {
        if index == 0 {
            Label::Scam
        } else {
            Label::Safe
        }
    }

    pub fn class_index(self) -> usize {
        match self {
            Label::Scam => 0,
            Label::Safe => 1,
        }
    }

    pub fn is_scam(self) -> bool {
        self == Label::Scam
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Scam => write!(f, "SCAM"),
            Label::Safe => write!(f, "SAFE"),
        }
    }
}

/// Coarse severity bucket derived from a verdict. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Result of analyzing one transcript. Built once by the detector and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_scam: bool,
    pub confidence: f64,
    pub label: Label,
    pub risk_level: RiskLevel,
    pub original_text: String,
    pub processed_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_class_index_convention() {
        assert_eq!(Label::from_class_index(0), Label::Scam);
        assert_eq!(Label::from_class_index(1), Label::Safe);
        assert_eq!(Label::Scam.class_index(), 0);
        assert!(Label::Scam.is_scam());
        assert!(!Label::Safe.is_scam());
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_verdict_json_shape() {
        let verdict = Verdict {
            is_scam: true,
            confidence: 0.9,
            label: Label::Scam,
            risk_level: RiskLevel::High,
            original_text: "Pay now!".to_string(),
            processed_text: "Pay now".to_string(),
        };

        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["label"], "SCAM");
        assert_eq!(value["risk_level"], "HIGH");
        assert_eq!(value["is_scam"], true);
        assert_eq!(value["processed_text"], "Pay now");
    }
}
