//! Entity store for the Ascend back office.
//!
//! - [`store`]: storage traits the services depend on.
//! - [`memory::MemoryStore`]: the process-local backend.
//! - [`seed`]: the start-up catalogue.

use std::sync::Arc;

pub mod memory;
pub mod models;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use store::{
    BookingStore, ContactStore, ContentStore, NotificationStore, PackageStore, PaymentStore,
    Store, StoreError, StoreResult, UserStore,
};

/// Shared handle the services hold.
pub type DynStore = Arc<dyn Store>;

/// Create an in-memory store pre-loaded with the catalogue.
pub async fn create_seeded_store() -> StoreResult<DynStore> {
    let store: DynStore = Arc::new(MemoryStore::new());
    seed::seed(store.as_ref()).await?;
    Ok(store)
}
