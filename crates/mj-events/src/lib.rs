pub mod codec;
pub mod error;
pub mod locks;
pub mod store;
pub mod tenant;
pub mod types;

pub use crate::error::EventError;
pub use crate::store::EventStore;
pub use crate::tenant::TenantKey;
pub use crate::types::EventRecord;
