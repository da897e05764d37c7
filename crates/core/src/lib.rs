//! Domain rules for the Ascend back office.
//!
//! Pure types and functions with no I/O: booking and payment state
//! machines, input validation, phone normalisation, and gateway signature
//! checks. Every other crate in the workspace builds on these.

pub mod booking;
pub mod error;
pub mod notification;
pub mod payment;
pub mod phone;
pub mod signature;
pub mod types;
pub mod validation;
