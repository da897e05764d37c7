//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct as the store returns it
//! - A `New*` DTO the store consumes on create
//! - An `Update*` DTO (all `Option` fields) where the entity is editable

pub mod booking;
pub mod contact;
pub mod content;
pub mod notification;
pub mod package;
pub mod payment;
pub mod user;
