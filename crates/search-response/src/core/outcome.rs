use ldap3_proto::LdapResultCode;

use crate::core::{
    render::{write_quoted_lines, LINE_INDENT, PAYLOAD_INDENT},
    types::{Dn, Referral},
};

/// The outcome of an operation: result code, matched DN, diagnostic message and
/// an optional referral.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LdapOutcome {
    pub code: LdapResultCode,
    pub matched_dn: Dn,
    pub message: String,
    pub referral: Option<Referral>,
}

impl LdapOutcome {
    pub fn success() -> Self {
        Self::error(LdapResultCode::Success, "")
    }

    pub fn error(code: LdapResultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            matched_dn: Dn::default(),
            message: message.into(),
            referral: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == LdapResultCode::Success
    }
}

impl Default for LdapOutcome {
    fn default() -> Self {
        Self::success()
    }
}

impl std::fmt::Display for LdapOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{PAYLOAD_INDENT}Ldap Result")?;
        writeln!(f, "{LINE_INDENT}Result code : {:?}", self.code)?;
        writeln!(f, "{LINE_INDENT}Matched Dn : '{}'", self.matched_dn)?;
        writeln!(f, "{LINE_INDENT}Diagnostic message : '{}'", self.message)?;
        match &self.referral {
            Some(referral) if !referral.is_empty() => {
                writeln!(f, "{LINE_INDENT}Referrals :")?;
                write_quoted_lines(f, &format!("{LINE_INDENT}    "), referral.urls())
            }
            _ => Ok(()),
        }
    }
}
