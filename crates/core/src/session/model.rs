/// The material an HMAC request stamp is computed over (spec §2.2, grounded
/// on `session/userauth/hmac_token.py`'s `calculate_token`): the session id,
/// method, path and a Unix timestamp, joined positionally and fed through
/// the session secret. The wallet service never computes a stamp itself,
/// only verifies one handed to it by the caller.
#[derive(Debug, Clone)]
pub struct RequestStamp<'a> {
    pub session_id: &'a str,
    pub method: &'a str,
    pub path: &'a str,
    pub timestamp: i64,
    pub provided_hmac: &'a str,
}

impl<'a> RequestStamp<'a> {
    pub(super) fn canonical_message(&self) -> String {
        format!("{}{}{}{}", self.session_id, self.method, self.path, self.timestamp)
    }

    pub(super) fn age_secs(&self, now: i64) -> i64 {
        now - self.timestamp
    }
}
