//! HTTP boundary for the plantlink backend.
//!
//! One generic client serves all three entity collections through the
//! [`Resource`] descriptor trait; the raw wire shapes stay behind this crate
//! and views only ever see canonical types.

pub mod client;
pub mod collection;
pub mod error;
pub mod resource;
pub mod summary;

pub use client::ApiClient;
pub use collection::Collection;
pub use error::{ApiError, BackendError};
pub use resource::{Assets, Devices, Resource, Signals};
pub use summary::{EntityCounts, SummaryService};
