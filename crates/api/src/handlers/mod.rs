pub mod booking;
pub mod contact;
pub mod content;
pub mod notification;
pub mod package;
pub mod payment;
pub mod sms;
