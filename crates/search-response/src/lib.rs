pub(crate) mod core;
pub(crate) mod done;
pub(crate) mod entry;
pub(crate) mod reference;
pub(crate) mod response;
pub(crate) mod wire;

pub use crate::core::{
    envelope::{Envelope, MessageId, MessageType, Response, ResultResponse},
    error::{ResponseError, ResponseResult},
    outcome::LdapOutcome,
    types::{Attribute, AttributeName, Control, Dn, Entry, Referral},
};
pub use done::SearchResultDone;
pub use entry::SearchResultEntry;
pub use reference::SearchResultReference;
pub use response::SearchResponse;

pub use ldap3_proto::LdapResultCode;
