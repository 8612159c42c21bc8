//! Domain types, storage backends and services for the LifeFlow workspace backend.
//!
//! Three resource groups live here, each split the same way:
//! a model (strict entity plus a tolerant inbound representation),
//! a store trait, and a service holding the operation semantics.

pub mod error;
pub mod feed;
pub mod id;
pub mod page;
pub mod store;
pub mod user;
pub mod validate;

pub use error::{CoreError, CoreResult};
