//! Booking and payment services.
//!
//! [`BookingOrchestrator`] owns the booking flow (validation, persistence,
//! gateway order, notification). [`PaymentVerifier`] owns the gateway
//! callbacks. Both are held in [`AppState`](crate::state::AppState).

pub mod orchestrator;
pub mod verification;

pub use orchestrator::{BookingOrchestrator, BookingOutcome, CreateBookingInput, NextStep, OrderInput};
pub use verification::{PaymentFailedInput, PaymentVerifier, VerificationOutcome, VerifyPaymentInput};
