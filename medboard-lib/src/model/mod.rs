//! Typed models for backend payloads
//!
//! Field sets follow the JSON the backend returns. Optional or nullable
//! fields are `Option`; fields the backend may omit on older records carry
//! `#[serde(default)]`.

mod appointment;
mod calendar;
mod chat;
mod common;
mod dashboard;
mod doctor;
mod hospital;
mod kyc;
mod meet;
mod page;
mod patient;
mod review;
mod specialty;
mod stats;

pub use appointment::*;
pub use calendar::*;
pub use chat::*;
pub use common::*;
pub use dashboard::*;
pub use doctor::*;
pub use hospital::*;
pub use kyc::*;
pub use meet::*;
pub use page::*;
pub use patient::*;
pub use review::*;
pub use specialty::*;
pub use stats::*;
