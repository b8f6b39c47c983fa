use super::super::domain::CredibilityStatus;

/// Neutral starting point before any signal is applied.
pub const BASE_SCORE: i32 = 50;

/// Lowest credibility still classified as `Real`.
pub const REAL_FLOOR: u8 = 75;

/// Highest credibility still classified as `Fake`.
pub const FAKE_CEILING: u8 = 40;

pub(crate) fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

pub fn classify(credibility: u8) -> CredibilityStatus {
    if credibility >= REAL_FLOOR {
        CredibilityStatus::Real
    } else if credibility <= FAKE_CEILING {
        CredibilityStatus::Fake
    } else {
        CredibilityStatus::Suspicious
    }
}
