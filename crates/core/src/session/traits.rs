use super::model::RequestStamp;
use crate::errors::Result;

/// Verifies that an incoming request carries an authentic, fresh HMAC stamp
/// (spec §2.2, §6.3). This is the wallet service's half of the session/auth
/// contract: the auth service issues stamps, this trait only checks them.
/// A passing `verify` means the caller's claimed `session_id` is trustworthy;
/// mapping it to a `user_id` remains the auth service's job.
pub trait SessionGate: Send + Sync {
    fn verify(&self, stamp: &RequestStamp<'_>) -> Result<()>;
}
