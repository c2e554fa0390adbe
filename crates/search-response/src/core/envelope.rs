use strum::{Display, IntoStaticStr};

use crate::core::{
    outcome::LdapOutcome,
    render::{HEADER_INDENT, PAYLOAD_INDENT},
    types::Control,
};

/// Identifier correlating a response with its request.
///
/// Valid ids are non-negative, or [`MessageId::UNSET`]. Other negative values
/// can still be built, but such a response is rejected when encoding it, and
/// decoding never produces one.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Debug, derive_more::Display,
)]
#[debug("{_0}")]
#[display("{_0}")]
pub struct MessageId(i32);

impl MessageId {
    /// Sentinel for messages that were generated internally.
    pub const UNSET: MessageId = MessageId(-1);

    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn is_set(self) -> bool {
        self.0 >= 0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::UNSET
    }
}

impl From<i32> for MessageId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum MessageType {
    SearchResultEntry,
    SearchResultReference,
    SearchResultDone,
}

/// Fields shared by every response: message id, message type and controls.
///
/// The id and the type are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Envelope {
    message_id: MessageId,
    message_type: MessageType,
    controls: Vec<Control>,
}

impl Envelope {
    pub fn new(message_type: MessageType) -> Self {
        Self::with_id(message_type, MessageId::UNSET)
    }

    pub fn with_id(message_type: MessageType, message_id: impl Into<MessageId>) -> Self {
        Self {
            message_id: message_id.into(),
            message_type,
            controls: Vec::new(),
        }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn has_controls(&self) -> bool {
        !self.controls.is_empty()
    }

    pub fn add_control(&mut self, control: Control) {
        self.controls.push(control);
    }

    pub fn add_controls(&mut self, controls: impl IntoIterator<Item = Control>) {
        self.controls.extend(controls);
    }

    pub fn remove_control(&mut self, control: &Control) -> bool {
        match self.controls.iter().position(|c| c == control) {
            Some(index) => {
                self.controls.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn take_controls(&mut self) -> Vec<Control> {
        std::mem::take(&mut self.controls)
    }
}

impl std::fmt::Display for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message_id == MessageId::UNSET {
            writeln!(f, "{HEADER_INDENT}Message ID : {} (unset)", self.message_id)?;
        } else {
            writeln!(f, "{HEADER_INDENT}Message ID : {}", self.message_id)?;
        }
        writeln!(f, "{HEADER_INDENT}Message type : {}", self.message_type)?;
        if self.has_controls() {
            writeln!(f, "{HEADER_INDENT}Controls :")?;
            for control in &self.controls {
                writeln!(f, "{PAYLOAD_INDENT}{control}")?;
            }
        }
        Ok(())
    }
}

/// Common access to the envelope of a response, whatever its payload.
pub trait Response {
    fn envelope(&self) -> &Envelope;

    fn envelope_mut(&mut self) -> &mut Envelope;

    fn message_id(&self) -> MessageId {
        self.envelope().message_id()
    }

    fn message_type(&self) -> MessageType {
        self.envelope().message_type()
    }

    fn controls(&self) -> &[Control] {
        self.envelope().controls()
    }

    fn add_control(&mut self, control: Control) {
        self.envelope_mut().add_control(control)
    }
}

/// A response that carries an [`LdapOutcome`].
pub trait ResultResponse: Response {
    fn ldap_result(&self) -> &LdapOutcome;

    fn ldap_result_mut(&mut self) -> &mut LdapOutcome;

    fn set_ldap_result(&mut self, result: LdapOutcome) {
        *self.ldap_result_mut() = result;
    }
}
