//! Provider status vocabulary → canonical [`PaymentStatus`].

use crate::payment::PaymentStatus;

/// Base table shared by every gateway
pub const STATUS_TABLE: &[(&str, PaymentStatus)] = &[
    ("PENDING", PaymentStatus::Pending),
    ("PROCESSING", PaymentStatus::Pending),
    ("PAID", PaymentStatus::Completed),
    ("APPROVED", PaymentStatus::Completed),
    ("COMPLETED", PaymentStatus::Completed),
    ("EXPIRED", PaymentStatus::Failed),
    ("FAILED", PaymentStatus::Failed),
    ("CANCELED", PaymentStatus::Cancelled),
    ("CANCELLED", PaymentStatus::Cancelled),
];

/// Map a provider status. Unknown values are `Pending`.
pub fn map_status(raw: &str) -> PaymentStatus {
    map_status_with(raw, &[])
}

/// Map a provider status, consulting `extra` aliases after the base table.
pub fn map_status_with(raw: &str, extra: &[(&str, PaymentStatus)]) -> PaymentStatus {
    let key = raw.trim().to_ascii_uppercase();
    let base: &[(&str, PaymentStatus)] = STATUS_TABLE;
    base.iter()
        .chain(extra.iter())
        .find(|(name, _)| *name == key)
        .map(|(_, status)| *status)
        .unwrap_or(PaymentStatus::Pending)
}
