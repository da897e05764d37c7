//! Booking types, status transitions, and input validation rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::phone;
use crate::validation::FieldErrors;

// ---------------------------------------------------------------------------
// Booking type
// ---------------------------------------------------------------------------

/// What the customer is booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    /// Free introductory call; no payment.
    DiscoveryCall,
    /// Paid program tied to a package price.
    Investment,
}

impl BookingType {
    pub const ALL: [BookingType; 2] = [BookingType::DiscoveryCall, BookingType::Investment];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingType::DiscoveryCall => "discovery_call",
            BookingType::Investment => "investment",
        }
    }

    /// Human-readable label used in notification copy.
    pub fn label(self) -> &'static str {
        match self {
            BookingType::DiscoveryCall => "Discovery Call",
            BookingType::Investment => "Program Investment",
        }
    }
}

// ---------------------------------------------------------------------------
// Booking status
// ---------------------------------------------------------------------------

/// Lifecycle of a booking.
///
/// `pending` may move to any status. `contacted` may move to `completed` or
/// `cancelled`. `completed` and `cancelled` are terminal; re-applying the
/// current status is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Contacted,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Contacted,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Contacted => "contacted",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            BookingStatus::Pending => true,
            BookingStatus::Contacted => next.is_terminal(),
            BookingStatus::Completed | BookingStatus::Cancelled => false,
        }
    }
}

/// Check an admin-requested status change.
pub fn validate_status_transition(
    current: BookingStatus,
    next: BookingStatus,
) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "booking status cannot change from '{current}' to '{next}'"
        )))
    }
}

// ---------------------------------------------------------------------------
// Career stage
// ---------------------------------------------------------------------------

/// Customer career-stage segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareerStage {
    Student,
    Fresher,
    EarlyCareer,
    MidCareer,
    Senior,
    CareerChange,
}

impl CareerStage {
    pub const ALL: [CareerStage; 6] = [
        CareerStage::Student,
        CareerStage::Fresher,
        CareerStage::EarlyCareer,
        CareerStage::MidCareer,
        CareerStage::Senior,
        CareerStage::CareerChange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CareerStage::Student => "student",
            CareerStage::Fresher => "fresher",
            CareerStage::EarlyCareer => "earlycareer",
            CareerStage::MidCareer => "midcareer",
            CareerStage::Senior => "senior",
            CareerStage::CareerChange => "careerchange",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CareerStage::Student => "Student",
            CareerStage::Fresher => "Fresh Graduate",
            CareerStage::EarlyCareer => "Early Career (0-5 years)",
            CareerStage::MidCareer => "Mid Career (5-12 years)",
            CareerStage::Senior => "Senior Professional (12+ years)",
            CareerStage::CareerChange => "Career Changer",
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing / display
// ---------------------------------------------------------------------------

macro_rules! str_enum {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s.trim())
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = $ty::ALL.iter().map(|v| v.as_str()).collect();
                        CoreError::Validation(format!(
                            "unknown {} '{}', expected one of: {}",
                            $what,
                            s,
                            allowed.join(", ")
                        ))
                    })
            }
        }
    };
}

str_enum!(BookingType, "booking type");
str_enum!(BookingStatus, "booking status");
str_enum!(CareerStage, "career stage");

// ---------------------------------------------------------------------------
// Submission validation
// ---------------------------------------------------------------------------

/// Raw booking form fields as the public site submits them.
#[derive(Debug, Clone, Copy)]
pub struct BookingFields<'a> {
    pub full_name: &'a str,
    pub mobile: &'a str,
    pub email: Option<&'a str>,
    pub current_stage: &'a str,
    pub package_id: &'a str,
    pub package_name: &'a str,
    pub booking_type: &'a str,
    pub amount: Option<i64>,
}

/// A booking submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBooking {
    pub full_name: String,
    /// Ten normalised digits.
    pub mobile: String,
    pub email: Option<String>,
    pub current_stage: CareerStage,
    pub package_id: String,
    pub package_name: String,
    pub booking_type: BookingType,
    /// Present iff `booking_type` is [`BookingType::Investment`].
    pub amount: Option<i64>,
}

/// Validate a booking submission.
///
/// A mobile number that is present but does not reduce to ten digits is
/// reported as [`CoreError::InvalidPhoneFormat`], but only when every other
/// field is valid; otherwise all problems are combined into one
/// [`CoreError::Validation`].
pub fn validate_booking(fields: &BookingFields<'_>) -> Result<ValidBooking, CoreError> {
    let mut errors = FieldErrors::new();

    errors.require("fullName", fields.full_name);
    errors.require("packageId", fields.package_id);
    errors.require("packageName", fields.package_name);

    let mut phone_error = None;
    let mobile = if fields.mobile.trim().is_empty() {
        errors.add("mobile", "is required");
        None
    } else {
        match phone::normalize_mobile(fields.mobile) {
            Ok(digits) => Some(digits),
            Err(e) => {
                phone_error = Some(e);
                None
            }
        }
    };

    let email = fields
        .email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string);
    if let Some(ref e) = email {
        errors.email("email", e);
    }

    let current_stage = match fields.current_stage.parse::<CareerStage>() {
        Ok(stage) => Some(stage),
        Err(_) => {
            errors.add("currentStage", "is not a known career stage");
            None
        }
    };

    let booking_type = match fields.booking_type.parse::<BookingType>() {
        Ok(t) => Some(t),
        Err(_) => {
            errors.add("bookingType", "must be 'discovery_call' or 'investment'");
            None
        }
    };

    match (booking_type, fields.amount) {
        (Some(BookingType::Investment), None) => {
            errors.add("amount", "is required for investment bookings")
        }
        (Some(BookingType::Investment), Some(a)) if a <= 0 => {
            errors.add("amount", "must be positive")
        }
        (Some(BookingType::DiscoveryCall), Some(_)) => {
            errors.add("amount", "must not be set for discovery calls")
        }
        _ => {}
    }

    if errors.is_empty() {
        if let Some(e) = phone_error {
            return Err(e);
        }
    } else if phone_error.is_some() {
        errors.add("mobile", "must contain exactly 10 digits");
    }
    errors.into_result()?;

    // Every `None` above recorded an error, so these are all present here.
    match (mobile, current_stage, booking_type) {
        (Some(mobile), Some(current_stage), Some(booking_type)) => Ok(ValidBooking {
            full_name: fields.full_name.trim().to_string(),
            mobile,
            email,
            current_stage,
            package_id: fields.package_id.trim().to_string(),
            package_name: fields.package_name.trim().to_string(),
            booking_type,
            amount: fields.amount.filter(|_| booking_type == BookingType::Investment),
        }),
        _ => Err(CoreError::Internal(
            "booking validation accepted incomplete input".into(),
        )),
    }
}
