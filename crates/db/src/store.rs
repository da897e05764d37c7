//! Storage interfaces.
//!
//! One async trait per entity family. Services depend on `Arc<dyn Store>`
//! and never on a concrete backend; [`MemoryStore`](crate::memory::MemoryStore)
//! is the implementation shipped with this workspace.
//!
//! Lookups return `Ok(None)` for a missing id; `Err` is reserved for backend
//! faults.

use ascend_core::booking::BookingStatus;
use ascend_core::payment::PaymentStatus;
use async_trait::async_trait;

use crate::models::booking::{Booking, NewBooking};
use crate::models::contact::{ContactSubmission, NewContactSubmission};
use crate::models::content::{BlogPost, NewBlogPost, NewResource, Resource, UpdateBlogPost};
use crate::models::notification::{NewNotification, Notification};
use crate::models::package::{NewPackage, Package};
use crate::models::payment::{NewPayment, OrderSettlement, Payment};
use crate::models::user::{NewUser, User};

/// Error type for storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not complete the operation (I/O, connection, etc.).
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A create collided with an existing unique key.
    #[error("Duplicate {entity} key: {key}")]
    Duplicate { entity: &'static str, key: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait PackageStore: Send + Sync {
    /// Insert a package under its caller-chosen slug.
    async fn create_package(&self, input: NewPackage) -> StoreResult<Package>;
    async fn find_package(&self, id: &str) -> StoreResult<Option<Package>>;
    async fn list_packages(&self) -> StoreResult<Vec<Package>>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert a booking with status `pending`. Investment bookings start
    /// with payment status `pending`.
    async fn create_booking(&self, input: NewBooking) -> StoreResult<Booking>;
    async fn find_booking(&self, id: &str) -> StoreResult<Option<Booking>>;
    async fn list_bookings(&self) -> StoreResult<Vec<Booking>>;
    /// Set `status` and advance `updated_at`.
    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> StoreResult<Option<Booking>>;
    /// Record the gateway order raised for this booking.
    async fn attach_booking_order(&self, id: &str, order_id: &str)
        -> StoreResult<Option<Booking>>;
    async fn find_booking_by_order(&self, order_id: &str) -> StoreResult<Option<Booking>>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Insert a payment with status `pending`.
    async fn create_payment(&self, input: NewPayment) -> StoreResult<Payment>;
    async fn find_payment(&self, id: &str) -> StoreResult<Option<Payment>>;
    async fn find_payment_by_order(&self, order_id: &str) -> StoreResult<Option<Payment>>;
    async fn list_payments(&self) -> StoreResult<Vec<Payment>>;
    /// Set `status` and advance `updated_at`.
    async fn update_payment_status(
        &self,
        id: &str,
        status: PaymentStatus,
    ) -> StoreResult<Option<Payment>>;
    /// Mark a verified order paid: the payment becomes `completed` and the
    /// booking joined by `order_id` becomes `completed` with payment status
    /// `completed`. Both writes happen as one unit.
    async fn complete_order(&self, order_id: &str, payment_id: &str)
        -> StoreResult<OrderSettlement>;
    /// Mark an order failed: a `pending` payment becomes `failed` and the
    /// joined booking's payment status follows. Booking status is untouched.
    async fn fail_order(&self, order_id: &str) -> StoreResult<OrderSettlement>;
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn create_contact(&self, input: NewContactSubmission) -> StoreResult<ContactSubmission>;
    async fn find_contact(&self, id: &str) -> StoreResult<Option<ContactSubmission>>;
    async fn list_contacts(&self) -> StoreResult<Vec<ContactSubmission>>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create_notification(&self, input: NewNotification) -> StoreResult<Notification>;
    async fn find_notification(&self, id: &str) -> StoreResult<Option<Notification>>;
    async fn list_notifications(&self) -> StoreResult<Vec<Notification>>;
    /// Notifications addressed to `recipient`, newest first.
    async fn list_notifications_for(&self, recipient: &str) -> StoreResult<Vec<Notification>>;
    async fn mark_notification_read(&self, id: &str) -> StoreResult<Option<Notification>>;
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn create_resource(&self, input: NewResource) -> StoreResult<Resource>;
    async fn find_resource(&self, id: &str) -> StoreResult<Option<Resource>>;
    async fn list_resources(&self) -> StoreResult<Vec<Resource>>;
    /// Increment the download counter.
    async fn record_resource_download(&self, id: &str) -> StoreResult<Option<Resource>>;

    async fn create_blog_post(&self, input: NewBlogPost) -> StoreResult<BlogPost>;
    async fn find_blog_post(&self, id: &str) -> StoreResult<Option<BlogPost>>;
    async fn list_blog_posts(&self) -> StoreResult<Vec<BlogPost>>;
    async fn update_blog_post(&self, id: &str, input: UpdateBlogPost)
        -> StoreResult<Option<BlogPost>>;
    /// Returns `true` if a post was removed.
    async fn delete_blog_post(&self, id: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, input: NewUser) -> StoreResult<User>;
    async fn find_user(&self, id: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
}

/// Every storage capability the application needs.
pub trait Store:
    PackageStore
    + BookingStore
    + PaymentStore
    + ContactStore
    + NotificationStore
    + ContentStore
    + UserStore
{
}

impl<T> Store for T where
    T: PackageStore
        + BookingStore
        + PaymentStore
        + ContactStore
        + NotificationStore
        + ContentStore
        + UserStore
{
}
