use ldap3_proto::LdapResultCode;

use crate::core::{
    envelope::{Envelope, MessageId, MessageType, Response, ResultResponse},
    outcome::LdapOutcome,
    render::HEADER_INDENT,
};

/// The message ending a search, carrying its outcome.
#[derive(Debug, Clone)]
pub struct SearchResultDone {
    envelope: Envelope,
    result: LdapOutcome,
}

impl SearchResultDone {
    pub fn new() -> Self {
        Self::with_id(MessageId::UNSET)
    }

    pub fn with_id(message_id: impl Into<MessageId>) -> Self {
        Self::from_result(message_id, LdapOutcome::default())
    }

    pub fn from_result(message_id: impl Into<MessageId>, result: LdapOutcome) -> Self {
        Self {
            envelope: Envelope::with_id(MessageType::SearchResultDone, message_id),
            result,
        }
    }

    pub fn success(message_id: impl Into<MessageId>) -> Self {
        Self::from_result(message_id, LdapOutcome::success())
    }

    pub fn error(
        message_id: impl Into<MessageId>,
        code: LdapResultCode,
        message: impl Into<String>,
    ) -> Self {
        Self::from_result(message_id, LdapOutcome::error(code, message))
    }

    pub fn into_parts(self) -> (Envelope, LdapOutcome) {
        (self.envelope, self.result)
    }
}

impl Default for SearchResultDone {
    fn default() -> Self {
        Self::new()
    }
}

// The envelope doesn't know about the outcome: both must be compared.
impl PartialEq for SearchResultDone {
    fn eq(&self, other: &Self) -> bool {
        self.envelope == other.envelope && self.result == other.result
    }
}

impl Eq for SearchResultDone {}

impl std::hash::Hash for SearchResultDone {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.envelope.hash(state);
        self.result.hash(state);
    }
}

impl Response for SearchResultDone {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}

impl ResultResponse for SearchResultDone {
    fn ldap_result(&self) -> &LdapOutcome {
        &self.result
    }

    fn ldap_result_mut(&mut self) -> &mut LdapOutcome {
        &mut self.result
    }
}

impl std::fmt::Display for SearchResultDone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{HEADER_INDENT}Search Result Done")?;
        write!(f, "{}{}", self.result, self.envelope)
    }
}
