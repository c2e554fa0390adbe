use ldap3_proto::{
    control::LdapControl,
    proto::{LdapMsg, LdapOp, LdapResult as LdapResultOp, LdapSearchResultReference},
    LdapPartialAttribute, LdapSearchResultEntry,
};
use tracing::{debug, instrument, warn};

use crate::{
    core::{
        envelope::{Envelope, MessageId, MessageType, Response},
        error::{ResponseError, ResponseResult},
        outcome::LdapOutcome,
        types::{Control, Entry, Referral},
    },
    done::SearchResultDone,
    entry::SearchResultEntry,
    reference::SearchResultReference,
    response::SearchResponse,
};

impl From<Entry> for LdapSearchResultEntry {
    fn from(entry: Entry) -> Self {
        let (name, attributes) = entry.into_parts();
        LdapSearchResultEntry {
            dn: name.into_string(),
            attributes: attributes
                .into_iter()
                .map(|a| LdapPartialAttribute {
                    atype: a.name.into_string(),
                    vals: a.values,
                })
                .collect(),
        }
    }
}

impl From<LdapSearchResultEntry> for Entry {
    fn from(entry: LdapSearchResultEntry) -> Self {
        let mut result = Entry::new(entry.dn);
        for attribute in entry.attributes {
            result.add_attribute(attribute.atype, attribute.vals);
        }
        result
    }
}

impl From<Referral> for LdapSearchResultReference {
    fn from(referral: Referral) -> Self {
        LdapSearchResultReference {
            uris: referral.into_urls(),
        }
    }
}

impl From<LdapSearchResultReference> for Referral {
    fn from(reference: LdapSearchResultReference) -> Self {
        Referral::from(reference.uris)
    }
}

impl From<LdapOutcome> for LdapResultOp {
    fn from(outcome: LdapOutcome) -> Self {
        LdapResultOp {
            code: outcome.code,
            matcheddn: outcome.matched_dn.into_string(),
            message: outcome.message,
            referral: outcome
                .referral
                .map(Referral::into_urls)
                .unwrap_or_default(),
        }
    }
}

impl From<LdapResultOp> for LdapOutcome {
    fn from(result: LdapResultOp) -> Self {
        LdapOutcome {
            code: result.code,
            matched_dn: result.matcheddn.into(),
            message: result.message,
            // An empty referral list is how an absent referral goes over the wire.
            referral: if result.referral.is_empty() {
                None
            } else {
                Some(Referral::from(result.referral))
            },
        }
    }
}

fn split_response(response: SearchResponse) -> ResponseResult<(Envelope, LdapOp)> {
    Ok(match response {
        SearchResponse::Entry(entry) => {
            let (envelope, entry) = entry.into_parts();
            let entry = entry.ok_or(ResponseError::MissingPayload(
                MessageType::SearchResultEntry,
            ))?;
            (envelope, LdapOp::SearchResultEntry(entry.into()))
        }
        SearchResponse::Reference(reference) => {
            let (envelope, referral) = reference.into_parts();
            // A reference needs at least one URL.
            let referral = referral
                .filter(|r| !r.is_empty())
                .ok_or(ResponseError::MissingPayload(
                    MessageType::SearchResultReference,
                ))?;
            (envelope, LdapOp::SearchResultReference(referral.into()))
        }
        SearchResponse::Done(done) => {
            let (envelope, result) = done.into_parts();
            (envelope, LdapOp::SearchResultDone(result.into()))
        }
    })
}

impl SearchResponse {
    /// The protocol operation for this response, without the envelope.
    pub fn into_ldap_op(self) -> ResponseResult<LdapOp> {
        split_response(self).map(|(_, op)| op)
    }
}

impl TryFrom<SearchResponse> for LdapMsg {
    type Error = ResponseError;

    #[instrument(skip_all, level = "debug", fields(msgid = %response.message_id()))]
    fn try_from(response: SearchResponse) -> ResponseResult<Self> {
        let message_id = response.message_id();
        if message_id == MessageId::UNSET {
            warn!("Refusing to encode a response without a message id");
            return Err(ResponseError::UnsetMessageId);
        }
        if !message_id.is_set() {
            warn!("Refusing to encode a response with a negative message id");
            return Err(ResponseError::InvalidMessageId(message_id.get()));
        }
        let (mut envelope, op) = split_response(response).inspect_err(|e| warn!("{e}"))?;
        let msg = LdapMsg {
            msgid: message_id.get(),
            op,
            ctrl: envelope
                .take_controls()
                .into_iter()
                .map(LdapControl::from)
                .collect(),
        };
        debug!(?msg);
        Ok(msg)
    }
}

impl TryFrom<LdapMsg> for SearchResponse {
    type Error = ResponseError;

    #[instrument(skip_all, level = "debug", fields(msgid = msg.msgid))]
    fn try_from(msg: LdapMsg) -> ResponseResult<Self> {
        debug!(?msg);
        if msg.msgid < 0 {
            warn!("Received a negative message id");
            return Err(ResponseError::InvalidMessageId(msg.msgid));
        }
        for control in msg.ctrl.iter() {
            if let LdapControl::Unknown { oid, .. } = control {
                debug!("Received unknown control: {}, keeping it", oid);
            }
        }
        let mut response: SearchResponse = match msg.op {
            LdapOp::SearchResultEntry(entry) => {
                SearchResultEntry::from_entry(msg.msgid, entry.into()).into()
            }
            LdapOp::SearchResultReference(reference) => {
                SearchResultReference::from_referral(msg.msgid, reference.into()).into()
            }
            LdapOp::SearchResultDone(result) => {
                SearchResultDone::from_result(msg.msgid, result.into()).into()
            }
            op => {
                warn!("Not a search response: {:?}", op);
                return Err(ResponseError::UnexpectedOperation(format!("{op:?}")));
            }
        };
        response
            .envelope_mut()
            .add_controls(msg.ctrl.into_iter().map(Control::from));
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::envelope::ResultResponse;
    use ldap3_proto::LdapResultCode;
    use pretty_assertions::assert_eq;

    fn make_ldap_entry() -> LdapSearchResultEntry {
        LdapSearchResultEntry {
            dn: "uid=bob,ou=people,dc=example,dc=com".to_string(),
            attributes: vec![
                LdapPartialAttribute {
                    atype: "objectClass".to_string(),
                    vals: vec![b"inetOrgPerson".to_vec(), b"person".to_vec()],
                },
                LdapPartialAttribute {
                    atype: "uid".to_string(),
                    vals: vec![b"bob".to_vec()],
                },
            ],
        }
    }

    #[test]
    fn test_decode_entry() {
        let response = SearchResponse::try_from(LdapMsg {
            msgid: 3,
            op: LdapOp::SearchResultEntry(make_ldap_entry()),
            ctrl: vec![],
        })
        .unwrap();
        let expected = Entry::new("uid=bob,ou=people,dc=example,dc=com")
            .with_attribute("objectClass", ["inetOrgPerson", "person"])
            .with_attribute("uid", ["bob"]);
        assert_eq!(
            response,
            SearchResponse::from(SearchResultEntry::from_entry(3, expected))
        );
    }

    #[test]
    fn test_decode_entry_merges_duplicate_attributes() {
        let entry = Entry::from(LdapSearchResultEntry {
            dn: "cn=test".to_string(),
            attributes: vec![
                LdapPartialAttribute {
                    atype: "mail".to_string(),
                    vals: vec![b"a@example.com".to_vec()],
                },
                LdapPartialAttribute {
                    atype: "Mail".to_string(),
                    vals: vec![b"b@example.com".to_vec()],
                },
            ],
        });
        assert_eq!(entry.attributes().len(), 1);
        assert_eq!(entry.attributes()[0].values.len(), 2);
    }

    #[test]
    fn test_entry_round_trip() {
        let msg = LdapMsg {
            msgid: 3,
            op: LdapOp::SearchResultEntry(make_ldap_entry()),
            ctrl: vec![],
        };
        let response = SearchResponse::try_from(msg.clone()).unwrap();
        assert_eq!(LdapMsg::try_from(response), Ok(msg));
    }

    #[test]
    fn test_reference_round_trip() {
        let msg = LdapMsg {
            msgid: 8,
            op: LdapOp::SearchResultReference(LdapSearchResultReference {
                uris: vec!["ldap://a".to_string(), "ldap://b".to_string()],
            }),
            ctrl: vec![],
        };
        let response = SearchResponse::try_from(msg.clone()).unwrap();
        assert_eq!(
            response
                .as_reference()
                .and_then(SearchResultReference::referral)
                .map(Referral::urls),
            Some(&["ldap://a".to_string(), "ldap://b".to_string()][..])
        );
        assert_eq!(LdapMsg::try_from(response), Ok(msg));
    }

    #[test]
    fn test_done_round_trip() {
        let msg = LdapMsg {
            msgid: 12,
            op: LdapOp::SearchResultDone(LdapResultOp {
                code: LdapResultCode::NoSuchObject,
                matcheddn: "dc=example,dc=com".to_string(),
                message: "not found".to_string(),
                referral: vec!["ldap://other".to_string()],
            }),
            ctrl: vec![LdapControl::Unknown {
                oid: "1.2.3.4".to_string(),
            }],
        };
        let response = SearchResponse::try_from(msg.clone()).unwrap();
        let done = response.as_done().unwrap();
        assert_eq!(done.ldap_result().message, "not found");
        assert_eq!(done.controls(), &[Control::new("1.2.3.4")]);
        assert_eq!(LdapMsg::try_from(response), Ok(msg));
    }

    #[test]
    fn test_empty_referral_list_is_absent() {
        let outcome = LdapOutcome::from(LdapResultOp {
            code: LdapResultCode::Success,
            matcheddn: "".to_string(),
            message: "".to_string(),
            referral: vec![],
        });
        assert_eq!(outcome, LdapOutcome::success());
    }

    #[test]
    fn test_encode_unset_message_id() {
        let response = SearchResponse::from(SearchResultDone::new());
        assert_eq!(
            LdapMsg::try_from(response),
            Err(ResponseError::UnsetMessageId)
        );
    }

    #[test]
    fn test_encode_negative_message_id() {
        let response = SearchResponse::from(SearchResultDone::success(-4));
        assert_eq!(
            LdapMsg::try_from(response),
            Err(ResponseError::InvalidMessageId(-4))
        );
    }

    #[test]
    fn test_encode_missing_entry() {
        let mut entry = SearchResultEntry::with_id(1);
        entry.set_entry(None);
        assert_eq!(
            SearchResponse::from(entry).into_ldap_op(),
            Err(ResponseError::MissingPayload(MessageType::SearchResultEntry))
        );
    }

    #[test]
    fn test_encode_empty_reference() {
        assert_eq!(
            SearchResponse::from(SearchResultReference::with_id(1)).into_ldap_op(),
            Err(ResponseError::MissingPayload(
                MessageType::SearchResultReference
            ))
        );
    }

    #[test]
    fn test_encode_done() {
        assert_eq!(
            SearchResponse::from(SearchResultDone::error(
                2,
                LdapResultCode::Other,
                "oops"
            ))
            .into_ldap_op(),
            Ok(LdapOp::SearchResultDone(LdapResultOp {
                code: LdapResultCode::Other,
                matcheddn: "".to_string(),
                message: "oops".to_string(),
                referral: vec![],
            }))
        );
    }

    #[test]
    fn test_decode_other_operation() {
        let result = SearchResponse::try_from(LdapMsg {
            msgid: 1,
            op: LdapOp::AddResponse(LdapResultOp {
                code: LdapResultCode::Success,
                matcheddn: "".to_string(),
                message: "".to_string(),
                referral: vec![],
            }),
            ctrl: vec![],
        });
        assert!(matches!(
            result,
            Err(ResponseError::UnexpectedOperation(_))
        ));
    }

    #[test]
    fn test_decode_negative_message_id() {
        let result = SearchResponse::try_from(LdapMsg {
            msgid: -2,
            op: LdapOp::SearchResultEntry(make_ldap_entry()),
            ctrl: vec![],
        });
        assert_eq!(result, Err(ResponseError::InvalidMessageId(-2)));
    }
}
