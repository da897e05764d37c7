//! Process-local storage backend.
//!
//! All tables sit behind a single `tokio::sync::RwLock`, so every trait
//! method is one atomic read or read-modify-write. Concurrent status updates
//! to the same record resolve last-write-wins. Collections keep insertion
//! order, which is the listing order.

use std::collections::HashMap;

use ascend_core::booking::{BookingStatus, BookingType};
use ascend_core::payment::PaymentStatus;
use ascend_core::types::{new_entity_id, EntityId, Timestamp};
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::models::booking::{Booking, NewBooking};
use crate::models::contact::{ContactSubmission, NewContactSubmission};
use crate::models::content::{BlogPost, NewBlogPost, NewResource, Resource, UpdateBlogPost};
use crate::models::notification::{NewNotification, Notification};
use crate::models::package::{NewPackage, Package};
use crate::models::payment::{NewPayment, OrderSettlement, Payment};
use crate::models::user::{NewUser, User};
use crate::store::{
    BookingStore, ContactStore, ContentStore, NotificationStore, PackageStore, PaymentStore,
    StoreError, StoreResult, UserStore,
};

#[derive(Default)]
struct Tables {
    packages: IndexMap<EntityId, Package>,
    bookings: IndexMap<EntityId, Booking>,
    payments: IndexMap<EntityId, Payment>,
    contacts: IndexMap<EntityId, ContactSubmission>,
    notifications: IndexMap<EntityId, Notification>,
    resources: IndexMap<EntityId, Resource>,
    blog_posts: IndexMap<EntityId, BlogPost>,
    users: IndexMap<EntityId, User>,
    /// Gateway order id -> booking id.
    booking_by_order: HashMap<String, EntityId>,
    /// Gateway order id -> payment id.
    payment_by_order: HashMap<String, EntityId>,
}

/// In-memory implementation of every storage trait.
///
/// Designed to be wrapped in `Arc` and shared across request handlers.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A fresh `updated_at` that is strictly later than `previous`.
fn advance(previous: Timestamp) -> Timestamp {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

impl Tables {
    fn settle_booking(
        &mut self,
        order_id: &str,
        payment_id: Option<&str>,
        payment_status: PaymentStatus,
    ) -> (Option<Booking>, bool) {
        let Some(booking) = self
            .booking_by_order
            .get(order_id)
            .and_then(|id| self.bookings.get_mut(id))
        else {
            return (None, false);
        };

        // A booking the admin already closed keeps its status; the payment
        // outcome is still recorded on it.
        let target_status = if payment_status == PaymentStatus::Completed
            && !booking.status.is_terminal()
        {
            BookingStatus::Completed
        } else {
            booking.status
        };
        let unchanged = booking.payment_status == Some(payment_status)
            && booking.status == target_status;
        if unchanged {
            return (Some(booking.clone()), false);
        }

        booking.status = target_status;
        booking.payment_status = Some(payment_status);
        if let Some(pid) = payment_id {
            booking.external_payment_id = Some(pid.to_string());
        }
        booking.updated_at = advance(booking.updated_at);
        (Some(booking.clone()), true)
    }
}

// ---------------------------------------------------------------------------
// Packages
// ---------------------------------------------------------------------------

#[async_trait]
impl PackageStore for MemoryStore {
    async fn create_package(&self, input: NewPackage) -> StoreResult<Package> {
        let mut tables = self.tables.write().await;
        if tables.packages.contains_key(&input.id) {
            return Err(StoreError::Duplicate {
                entity: "Package",
                key: input.id,
            });
        }
        let package = Package::from(input);
        tables.packages.insert(package.id.clone(), package.clone());
        Ok(package)
    }

    async fn find_package(&self, id: &str) -> StoreResult<Option<Package>> {
        Ok(self.tables.read().await.packages.get(id).cloned())
    }

    async fn list_packages(&self) -> StoreResult<Vec<Package>> {
        Ok(self.tables.read().await.packages.values().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

#[async_trait]
impl BookingStore for MemoryStore {
    async fn create_booking(&self, input: NewBooking) -> StoreResult<Booking> {
        let now = Utc::now();
        let is_investment = input.booking_type == BookingType::Investment;
        let booking = Booking {
            id: new_entity_id(),
            full_name: input.full_name,
            mobile: input.mobile,
            email: input.email,
            current_stage: input.current_stage,
            package_id: input.package_id,
            package_name: input.package_name,
            booking_type: input.booking_type,
            status: BookingStatus::Pending,
            amount: input.amount.filter(|_| is_investment),
            payment_status: is_investment.then_some(PaymentStatus::Pending),
            external_order_id: None,
            external_payment_id: None,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .bookings
            .insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    async fn find_booking(&self, id: &str) -> StoreResult<Option<Booking>> {
        Ok(self.tables.read().await.bookings.get(id).cloned())
    }

    async fn list_bookings(&self) -> StoreResult<Vec<Booking>> {
        Ok(self.tables.read().await.bookings.values().cloned().collect())
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> StoreResult<Option<Booking>> {
        let mut tables = self.tables.write().await;
        Ok(tables.bookings.get_mut(id).map(|booking| {
            booking.status = status;
            booking.updated_at = advance(booking.updated_at);
            booking.clone()
        }))
    }

    async fn attach_booking_order(
        &self,
        id: &str,
        order_id: &str,
    ) -> StoreResult<Option<Booking>> {
        let mut tables = self.tables.write().await;
        let Some(booking) = tables.bookings.get_mut(id) else {
            return Ok(None);
        };
        let previous = booking.external_order_id.replace(order_id.to_string());
        booking.updated_at = advance(booking.updated_at);
        let booking = booking.clone();

        if let Some(previous) = previous {
            tables.booking_by_order.remove(&previous);
        }
        tables
            .booking_by_order
            .insert(order_id.to_string(), booking.id.clone());
        Ok(Some(booking))
    }

    async fn find_booking_by_order(&self, order_id: &str) -> StoreResult<Option<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables
            .booking_by_order
            .get(order_id)
            .and_then(|id| tables.bookings.get(id))
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn create_payment(&self, input: NewPayment) -> StoreResult<Payment> {
        let mut tables = self.tables.write().await;
        if tables.payment_by_order.contains_key(&input.external_order_id) {
            return Err(StoreError::Duplicate {
                entity: "Payment",
                key: input.external_order_id,
            });
        }
        let now = Utc::now();
        let payment = Payment {
            id: new_entity_id(),
            package_id: input.package_id,
            customer_email: input.customer_email,
            customer_name: input.customer_name,
            amount: input.amount,
            external_order_id: input.external_order_id,
            external_payment_id: None,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables
            .payment_by_order
            .insert(payment.external_order_id.clone(), payment.id.clone());
        tables.payments.insert(payment.id.clone(), payment.clone());
        Ok(payment)
    }

    async fn find_payment(&self, id: &str) -> StoreResult<Option<Payment>> {
        Ok(self.tables.read().await.payments.get(id).cloned())
    }

    async fn find_payment_by_order(&self, order_id: &str) -> StoreResult<Option<Payment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .payment_by_order
            .get(order_id)
            .and_then(|id| tables.payments.get(id))
            .cloned())
    }

    async fn list_payments(&self) -> StoreResult<Vec<Payment>> {
        Ok(self.tables.read().await.payments.values().cloned().collect())
    }

    async fn update_payment_status(
        &self,
        id: &str,
        status: PaymentStatus,
    ) -> StoreResult<Option<Payment>> {
        let mut tables = self.tables.write().await;
        Ok(tables.payments.get_mut(id).map(|payment| {
            payment.status = status;
            payment.updated_at = advance(payment.updated_at);
            payment.clone()
        }))
    }

    async fn complete_order(
        &self,
        order_id: &str,
        payment_id: &str,
    ) -> StoreResult<OrderSettlement> {
        let mut tables = self.tables.write().await;
        let tables = &mut *tables;

        let mut payment_changed = false;
        let payment = match tables
            .payment_by_order
            .get(order_id)
            .and_then(|id| tables.payments.get_mut(id))
        {
            // Failed is terminal: neither the payment nor its booking moves.
            Some(payment) if payment.status == PaymentStatus::Failed => {
                let payment = Some(payment.clone());
                let booking = tables
                    .booking_by_order
                    .get(order_id)
                    .and_then(|id| tables.bookings.get(id))
                    .cloned();
                return Ok(OrderSettlement {
                    payment,
                    booking,
                    changed: false,
                });
            }
            Some(payment) => {
                if payment.status == PaymentStatus::Pending {
                    payment.status = PaymentStatus::Completed;
                    payment.external_payment_id = Some(payment_id.to_string());
                    payment.updated_at = advance(payment.updated_at);
                    payment_changed = true;
                }
                Some(payment.clone())
            }
            None => None,
        };

        let (booking, booking_changed) =
            tables.settle_booking(order_id, Some(payment_id), PaymentStatus::Completed);

        Ok(OrderSettlement {
            payment,
            booking,
            changed: payment_changed || booking_changed,
        })
    }

    async fn fail_order(&self, order_id: &str) -> StoreResult<OrderSettlement> {
        let mut tables = self.tables.write().await;
        let tables = &mut *tables;

        let Some(payment) = tables
            .payment_by_order
            .get(order_id)
            .and_then(|id| tables.payments.get_mut(id))
        else {
            return Ok(OrderSettlement::default());
        };

        if payment.status != PaymentStatus::Pending {
            let payment = Some(payment.clone());
            let booking = tables
                .booking_by_order
                .get(order_id)
                .and_then(|id| tables.bookings.get(id))
                .cloned();
            return Ok(OrderSettlement {
                payment,
                booking,
                changed: false,
            });
        }

        payment.status = PaymentStatus::Failed;
        payment.updated_at = advance(payment.updated_at);
        let payment = Some(payment.clone());

        let (booking, _) = tables.settle_booking(order_id, None, PaymentStatus::Failed);

        Ok(OrderSettlement {
            payment,
            booking,
            changed: true,
        })
    }
}

// ---------------------------------------------------------------------------
// Contact submissions
// ---------------------------------------------------------------------------

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create_contact(&self, input: NewContactSubmission) -> StoreResult<ContactSubmission> {
        let submission = ContactSubmission {
            id: new_entity_id(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            service_interest: input.service_interest,
            message: input.message,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .contacts
            .insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    async fn find_contact(&self, id: &str) -> StoreResult<Option<ContactSubmission>> {
        Ok(self.tables.read().await.contacts.get(id).cloned())
    }

    async fn list_contacts(&self) -> StoreResult<Vec<ContactSubmission>> {
        Ok(self.tables.read().await.contacts.values().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create_notification(&self, input: NewNotification) -> StoreResult<Notification> {
        let notification = Notification {
            id: new_entity_id(),
            notification_type: input.notification_type,
            recipient: input.recipient,
            subject: input.subject,
            text_content: input.text_content,
            html_content: input.html_content,
            metadata: input.metadata,
            is_read: false,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .notifications
            .insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    async fn find_notification(&self, id: &str) -> StoreResult<Option<Notification>> {
        Ok(self.tables.read().await.notifications.get(id).cloned())
    }

    async fn list_notifications(&self) -> StoreResult<Vec<Notification>> {
        Ok(self
            .tables
            .read()
            .await
            .notifications
            .values()
            .cloned()
            .collect())
    }

    async fn list_notifications_for(&self, recipient: &str) -> StoreResult<Vec<Notification>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .values()
            .rev()
            .filter(|n| n.recipient.eq_ignore_ascii_case(recipient))
            .cloned()
            .collect())
    }

    async fn mark_notification_read(&self, id: &str) -> StoreResult<Option<Notification>> {
        let mut tables = self.tables.write().await;
        Ok(tables.notifications.get_mut(id).map(|n| {
            n.is_read = true;
            n.clone()
        }))
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[async_trait]
impl ContentStore for MemoryStore {
    async fn create_resource(&self, input: NewResource) -> StoreResult<Resource> {
        let resource = Resource {
            id: new_entity_id(),
            title: input.title,
            description: input.description,
            category: input.category,
            resource_type: input.resource_type,
            media_url: input.media_url,
            download_count: 0,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .resources
            .insert(resource.id.clone(), resource.clone());
        Ok(resource)
    }

    async fn find_resource(&self, id: &str) -> StoreResult<Option<Resource>> {
        Ok(self.tables.read().await.resources.get(id).cloned())
    }

    async fn list_resources(&self) -> StoreResult<Vec<Resource>> {
        Ok(self.tables.read().await.resources.values().cloned().collect())
    }

    async fn record_resource_download(&self, id: &str) -> StoreResult<Option<Resource>> {
        let mut tables = self.tables.write().await;
        Ok(tables.resources.get_mut(id).map(|r| {
            r.download_count += 1;
            r.clone()
        }))
    }

    async fn create_blog_post(&self, input: NewBlogPost) -> StoreResult<BlogPost> {
        let now = Utc::now();
        let post = BlogPost {
            id: new_entity_id(),
            title: input.title,
            slug: input.slug,
            excerpt: input.excerpt,
            content: input.content,
            category: input.category,
            image_url: input.image_url,
            is_published: input.is_published,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .blog_posts
            .insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn find_blog_post(&self, id: &str) -> StoreResult<Option<BlogPost>> {
        Ok(self.tables.read().await.blog_posts.get(id).cloned())
    }

    async fn list_blog_posts(&self) -> StoreResult<Vec<BlogPost>> {
        Ok(self.tables.read().await.blog_posts.values().cloned().collect())
    }

    async fn update_blog_post(
        &self,
        id: &str,
        input: UpdateBlogPost,
    ) -> StoreResult<Option<BlogPost>> {
        let mut tables = self.tables.write().await;
        Ok(tables.blog_posts.get_mut(id).map(|post| {
            post.apply(input);
            post.updated_at = advance(post.updated_at);
            post.clone()
        }))
    }

    async fn delete_blog_post(&self, id: &str) -> StoreResult<bool> {
        Ok(self
            .tables
            .write()
            .await
            .blog_posts
            .shift_remove(id)
            .is_some())
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&input.username))
        {
            return Err(StoreError::Duplicate {
                entity: "User",
                key: input.username,
            });
        }
        let user = User {
            id: new_entity_id(),
            username: input.username,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }
}
