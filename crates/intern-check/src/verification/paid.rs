use super::domain::PaidStatus;

const UNPAID_SIGNALS: [&str; 3] = ["unpaid", "volunteer", "no stipend"];

const PAID_SIGNALS: [&str; 8] = [
    "stipend",
    "per month",
    "salary",
    "ctc",
    "paid internship",
    "₹",
    "rs.",
    "package",
];

/// Infers payment terms from posting text. An explicit unpaid phrase wins over any paid
/// marker elsewhere in the text.
pub fn detect_paid_status(text: &str) -> PaidStatus {
    if text.trim().is_empty() {
        return PaidStatus::Unknown;
    }

    let text = text.to_lowercase();
    if UNPAID_SIGNALS.iter().any(|signal| text.contains(signal)) {
        return PaidStatus::Unpaid;
    }
    if PAID_SIGNALS.iter().any(|signal| text.contains(signal)) {
        return PaidStatus::Paid;
    }

    PaidStatus::Unknown
}
