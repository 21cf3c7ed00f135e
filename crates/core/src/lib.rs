//! `marketplace-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO beyond reading the
//! system date through [`SystemClock`]).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, VendorId};
pub use value_object::ValueObject;
