use tracing::debug;

use crate::core::{
    envelope::{Envelope, MessageId, MessageType, Response},
    render::{HEADER_INDENT, LINE_INDENT},
    types::{Dn, Entry},
};

/// One entry returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchResultEntry {
    envelope: Envelope,
    entry: Option<Entry>,
}

impl SearchResultEntry {
    pub fn new() -> Self {
        Self::with_id(MessageId::UNSET)
    }

    pub fn with_id(message_id: impl Into<MessageId>) -> Self {
        Self::from_entry(message_id, Entry::default())
    }

    pub fn from_entry(message_id: impl Into<MessageId>, entry: Entry) -> Self {
        Self {
            envelope: Envelope::with_id(MessageType::SearchResultEntry, message_id),
            entry: Some(entry),
        }
    }

    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    pub fn entry_mut(&mut self) -> Option<&mut Entry> {
        self.entry.as_mut()
    }

    pub fn set_entry(&mut self, entry: Option<Entry>) {
        self.entry = entry;
    }

    pub fn take_entry(&mut self) -> Option<Entry> {
        self.entry.take()
    }

    /// The name of the entry, if there is one.
    pub fn object_name(&self) -> Option<&Dn> {
        self.entry.as_ref().map(Entry::name)
    }

    /// Renames the entry. Does nothing when there is no entry.
    pub fn set_object_name(&mut self, name: Dn) {
        match self.entry.as_mut() {
            Some(entry) => entry.set_name(name),
            None => debug!(%name, "No entry to rename, ignoring"),
        }
    }

    pub fn into_parts(self) -> (Envelope, Option<Entry>) {
        (self.envelope, self.entry)
    }
}

impl Default for SearchResultEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl Response for SearchResultEntry {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}

impl std::fmt::Display for SearchResultEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{HEADER_INDENT}Search Result Entry")?;
        match &self.entry {
            Some(entry) => write!(f, "{entry}")?,
            None => writeln!(f, "{LINE_INDENT}No entry")?,
        }
        write!(f, "{}", self.envelope)
    }
}
