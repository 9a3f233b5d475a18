use crate::models::RiskLevel;

/// Confidence at or above which a scam verdict is [`RiskLevel::High`].
pub const HIGH_THRESHOLD: f64 = 0.8;

/// Confidence at or above which a scam verdict is at least [`RiskLevel::Medium`].
pub const MEDIUM_THRESHOLD: f64 = 0.6;

/// Bucket a verdict into a risk level.
///
/// Safe verdicts are always `Low`. Scam verdicts are `High` from 0.8, `Medium`
/// from 0.6, and `Low` below that. Both boundaries are inclusive.
pub fn risk_level(confidence: f64, is_scam: bool) -> RiskLevel {
    if !is_scam {
        return RiskLevel::Low;
    }
    if confidence >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if confidence >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
