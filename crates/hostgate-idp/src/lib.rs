//! Identity providers for hostgate.
//!
//! An identity provider is the authority on which hosts a user may reach
//! through the gateway. This crate defines the [`IdentityProvider`] trait,
//! ships a few backends and a name-keyed [`IdpFactory`] to select one from
//! configuration.
//!
//! # Example
//!
//! ```
//! use hostgate_core::HostRecord;
//! use hostgate_idp::{IdentityProvider, MemoryIdp};
//!
//! # async fn example() -> Result<(), hostgate_idp::IdpError> {
//! let idp = MemoryIdp::new([HostRecord::new("db-1.example.com")]);
//! let hosts = idp.list_allowed().await?;
//! assert_eq!(hosts.len(), 1);
//! # Ok(())
//! # }
//! ```

mod error;
mod factory;
mod json;
mod memory;
mod traits;

#[cfg(feature = "http")]
pub mod http;

pub use error::IdpError;
pub use factory::{IdpConstructor, IdpFactory};
pub use json::JsonIdp;
pub use memory::MemoryIdp;
pub use traits::IdentityProvider;
