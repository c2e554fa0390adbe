use crate::core::{
    envelope::{Envelope, MessageId, MessageType, Response},
    render::{write_quoted_lines, HEADER_INDENT, LINE_INDENT, PAYLOAD_INDENT},
    types::Referral,
};

/// A continuation reference returned by a search, pointing at other servers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchResultReference {
    envelope: Envelope,
    referral: Option<Referral>,
}

impl SearchResultReference {
    pub fn new() -> Self {
        Self::with_id(MessageId::UNSET)
    }

    pub fn with_id(message_id: impl Into<MessageId>) -> Self {
        Self::from_referral(message_id, Referral::default())
    }

    pub fn from_referral(message_id: impl Into<MessageId>, referral: Referral) -> Self {
        Self {
            envelope: Envelope::with_id(MessageType::SearchResultReference, message_id),
            referral: Some(referral),
        }
    }

    pub fn referral(&self) -> Option<&Referral> {
        self.referral.as_ref()
    }

    pub fn referral_mut(&mut self) -> Option<&mut Referral> {
        self.referral.as_mut()
    }

    pub fn set_referral(&mut self, referral: Option<Referral>) {
        self.referral = referral;
    }

    pub fn take_referral(&mut self) -> Option<Referral> {
        self.referral.take()
    }

    pub fn into_parts(self) -> (Envelope, Option<Referral>) {
        (self.envelope, self.referral)
    }
}

impl Default for SearchResultReference {
    fn default() -> Self {
        Self::new()
    }
}

impl Response for SearchResultReference {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}

impl std::fmt::Display for SearchResultReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{HEADER_INDENT}Search Result Reference")?;
        match self.referral.as_ref().filter(|r| !r.is_empty()) {
            Some(referral) => {
                writeln!(f, "{PAYLOAD_INDENT}References")?;
                write_quoted_lines(f, LINE_INDENT, referral.urls())?;
            }
            None => writeln!(f, "{PAYLOAD_INDENT}No Reference")?,
        }
        write!(f, "{}", self.envelope)
    }
}
