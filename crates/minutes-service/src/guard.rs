//! Owner-only authorization predicate.
//!
//! Applied before every mutation: title update, access reconciliation, and
//! deletion. Read paths (details, listing) are deliberately not gated on
//! the access list; any authenticated identity may read session details.
//! Tightening that is a product decision, not something to do here.

use crate::error::ServiceError;
use minutes_core::{Session, UserId};

/// Succeeds iff `requestor` is the session's owner.
pub fn ensure_owner(session: &Session, requestor: UserId) -> Result<(), ServiceError> {
    if session.owner_id == requestor {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minutes_core::{BlobLocator, SessionId};

    #[test]
    fn test_owner_passes_others_fail() {
        let owner = UserId::generate();
        let session = Session::new(
            SessionId::generate(),
            "standup",
            owner,
            BlobLocator::new("recordings", "k"),
        );

        assert!(ensure_owner(&session, owner).is_ok());
        assert_eq!(
            ensure_owner(&session, UserId::generate()),
            Err(ServiceError::Forbidden)
        );
    }
}
