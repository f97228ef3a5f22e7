//! # API Module
//!
//! This module contains all the business logic for the booking core.
//! Each submodule handles a specific domain of functionality.
//!
//! ## Modules
//!
//! - [`booking`] - Booking lifecycle engine (create, cancel, list, get)
//! - [`catalog`] - Provider and service discovery queries
//! - [`pet`] - Pet management operations
//! - [`user`] - Profile management and phone-based identity

pub mod booking;
pub mod catalog;
pub mod pet;
pub mod user;

use crate::errors;
use uuid::Uuid;

/// Resolves the acting user or rejects the call.
///
/// Every mutating operation requires an owning user context; a `None`
/// actor means the session never authenticated.
pub(crate) fn require_actor(actor: Option<Uuid>) -> errors::Result<Uuid> {
    actor.ok_or(errors::Error::NotAuthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_require_actor() {
        let user_id = Uuid::new_v4();
        assert_eq!(require_actor(Some(user_id)).unwrap(), user_id);
        assert!(matches!(require_actor(None), Err(Error::NotAuthenticated)));
    }
}
