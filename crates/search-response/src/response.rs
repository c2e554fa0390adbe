use crate::{
    core::envelope::{Envelope, Response},
    done::SearchResultDone,
    entry::SearchResultEntry,
    reference::SearchResultReference,
};

/// Any of the messages a server sends back for a search request.
///
/// Responses of different kinds never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::From)]
pub enum SearchResponse {
    Entry(SearchResultEntry),
    Reference(SearchResultReference),
    Done(SearchResultDone),
}

impl SearchResponse {
    /// Whether this is the last message of the search.
    pub fn is_done(&self) -> bool {
        matches!(self, SearchResponse::Done(_))
    }

    pub fn as_entry(&self) -> Option<&SearchResultEntry> {
        match self {
            SearchResponse::Entry(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&SearchResultReference> {
        match self {
            SearchResponse::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_done(&self) -> Option<&SearchResultDone> {
        match self {
            SearchResponse::Done(done) => Some(done),
            _ => None,
        }
    }
}

impl Response for SearchResponse {
    fn envelope(&self) -> &Envelope {
        match self {
            SearchResponse::Entry(entry) => entry.envelope(),
            SearchResponse::Reference(reference) => reference.envelope(),
            SearchResponse::Done(done) => done.envelope(),
        }
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        match self {
            SearchResponse::Entry(entry) => entry.envelope_mut(),
            SearchResponse::Reference(reference) => reference.envelope_mut(),
            SearchResponse::Done(done) => done.envelope_mut(),
        }
    }
}

impl std::fmt::Display for SearchResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchResponse::Entry(entry) => write!(f, "{entry}"),
            SearchResponse::Reference(reference) => write!(f, "{reference}"),
            SearchResponse::Done(done) => write!(f, "{done}"),
        }
    }
}
