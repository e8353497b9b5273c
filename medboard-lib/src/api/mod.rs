//! REST API endpoints
//!
//! One unit struct per resource builds typed [`Endpoint`] descriptors. Send
//! them with [`MedboardClient::send`](crate::MedboardClient::send) for a
//! plain request, or through [`AppStore`](crate::store::AppStore) to get
//! caching and tag invalidation.
//!
//! ```ignore
//! use medboard_lib::api::{ListParams, Patients};
//!
//! let page = store.query(&Patients::list(&ListParams::new().page(2))).await?;
//! ```

mod appointments;
mod chat;
mod doctors;
mod endpoint;
mod execute;
mod hospitals;
mod kyc;
mod meet;
mod params;
mod patients;
mod reviews;
mod stats;

pub use appointments::*;
pub use chat::*;
pub use doctors::*;
pub use endpoint::CacheClass;
pub use endpoint::Endpoint;
pub use endpoint::PageMerge;
pub use endpoint::Tag;
pub use endpoint::TagKind;
pub use hospitals::*;
pub use kyc::*;
pub use meet::*;
pub use params::*;
pub use patients::*;
pub use reviews::*;
pub use stats::*;

pub(crate) use execute::decode;
