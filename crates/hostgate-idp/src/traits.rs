//! Identity provider trait.

use std::sync::Arc;

use async_trait::async_trait;
use hostgate_core::HostRecord;

use crate::error::IdpError;

/// Source of truth for the hosts one user may reach.
///
/// A provider is bound to a user (and optionally a gateway hostgroup) when
/// it is constructed. Returned hosts carry no categories.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// List the hosts the bound user is allowed to reach.
    async fn list_allowed(&self) -> Result<Vec<HostRecord>, IdpError>;

    /// Provider name, used in logs.
    fn name(&self) -> &str;
}

/// Blanket implementation for `Arc<P>` where `P: IdentityProvider`.
#[async_trait]
impl<P: IdentityProvider + ?Sized> IdentityProvider for Arc<P> {
    #[inline]
    async fn list_allowed(&self) -> Result<Vec<HostRecord>, IdpError> {
        (**self).list_allowed().await
    }

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Blanket implementation for `Box<P>` where `P: IdentityProvider`.
#[async_trait]
impl<P: IdentityProvider + ?Sized> IdentityProvider for Box<P> {
    #[inline]
    async fn list_allowed(&self) -> Result<Vec<HostRecord>, IdpError> {
        (**self).list_allowed().await
    }

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }
}
