//! Payment status and currency conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// ISO currency code every gateway order is raised in.
pub const CURRENCY: &str = "INR";

/// Gateway amounts are expressed in minor units (paise).
pub const MINOR_UNITS_PER_WHOLE: i64 = 100;

/// Lifecycle of a gateway payment.
///
/// `pending` moves exactly once, to `completed` (verified callback) or
/// `failed` (explicit failure callback). Both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert whole currency units to gateway minor units.
///
/// Returns `None` on overflow.
pub fn to_minor_units(amount: i64) -> Option<i64> {
    amount.checked_mul(MINOR_UNITS_PER_WHOLE)
}

/// Format a whole-unit amount for notification copy, e.g. `₹6,499`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let len = digits.len();
    // Indian grouping: last three digits, then pairs.
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        let remaining = len - i;
        if i > 0 && remaining >= 3 && (remaining - 3) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}₹{out}")
}
