use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use ldap3_proto::control::LdapControl;

use crate::core::render::{write_attribute_value, LINE_INDENT, PAYLOAD_INDENT};

fn compare_str_case_insensitive(s1: &str, s2: &str) -> Ordering {
    let mut it_1 = s1.chars().flat_map(|c| c.to_lowercase());
    let mut it_2 = s2.chars().flat_map(|c| c.to_lowercase());
    loop {
        match (it_1.next(), it_2.next()) {
            (Some(c1), Some(c2)) => {
                let o = c1.cmp(&c2);
                if o != Ordering::Equal {
                    return o;
                }
            }
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

macro_rules! make_case_insensitive_comparable_string {
    ($c:ident) => {
        #[derive(Clone, Default, derive_more::Debug, derive_more::Display)]
        #[debug(r#""{_0}""#)]
        #[display("{_0}")]
        pub struct $c(String);

        impl PartialEq for $c {
            fn eq(&self, other: &Self) -> bool {
                compare_str_case_insensitive(&self.0, &other.0) == Ordering::Equal
            }
        }

        impl Eq for $c {}

        impl PartialOrd for $c {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $c {
            fn cmp(&self, other: &Self) -> Ordering {
                compare_str_case_insensitive(&self.0, &other.0)
            }
        }

        // Must hash the same character stream that `cmp` compares.
        impl Hash for $c {
            fn hash<H: Hasher>(&self, state: &mut H) {
                for c in self.0.chars().flat_map(|c| c.to_lowercase()) {
                    c.hash(state);
                }
            }
        }

        impl $c {
            pub fn new(raw: &str) -> Self {
                Self(raw.to_owned())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            pub fn into_string(self) -> String {
                self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<String> for $c {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $c {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

// Distinguished names are carried verbatim; parsing them is left to the caller.
make_case_insensitive_comparable_string!(Dn);
make_case_insensitive_comparable_string!(AttributeName);

#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct Attribute {
    pub name: AttributeName,
    pub values: Vec<Vec<u8>>,
}

/// A directory object: a name and its attributes.
///
/// Attribute names are unique within an entry, and the order in which the
/// attributes were added is kept for encoding but ignored by comparisons.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    name: Dn,
    attributes: Vec<Attribute>,
}

impl Entry {
    pub fn new(name: impl Into<Dn>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn name(&self) -> &Dn {
        &self.name
    }

    pub fn set_name(&mut self, name: Dn) {
        self.name = name;
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get(&self, name: &AttributeName) -> Option<&Attribute> {
        self.attributes.iter().find(|a| &a.name == name)
    }

    /// Adds values to the attribute, creating it if needed.
    pub fn add_attribute<N, I, V>(&mut self, name: N, values: I)
    where
        N: Into<AttributeName>,
        I: IntoIterator<Item = V>,
        V: Into<Vec<u8>>,
    {
        let name = name.into();
        let values = values.into_iter().map(Into::into);
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attribute) => attribute.values.extend(values),
            None => self.attributes.push(Attribute {
                name,
                values: values.collect(),
            }),
        }
    }

    pub fn with_attribute<N, I, V>(mut self, name: N, values: I) -> Self
    where
        N: Into<AttributeName>,
        I: IntoIterator<Item = V>,
        V: Into<Vec<u8>>,
    {
        self.add_attribute(name, values);
        self
    }

    pub fn remove_attribute(&mut self, name: &AttributeName) -> Option<Attribute> {
        let index = self.attributes.iter().position(|a| &a.name == name)?;
        Some(self.attributes.remove(index))
    }

    pub fn into_parts(self) -> (Dn, Vec<Attribute>) {
        (self.name, self.attributes)
    }

    #[cfg(any(feature = "test", test))]
    pub fn for_tests(name: &str) -> Self {
        Entry::new(name)
            .with_attribute("objectClass", ["top", "person"])
            .with_attribute("cn", ["test"])
            .with_attribute("sn", ["Test"])
    }

    fn sorted_attributes(&self) -> Vec<&Attribute> {
        let mut attributes: Vec<_> = self.attributes.iter().collect();
        attributes.sort_by(|a, b| a.name.cmp(&b.name));
        attributes
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .all(|a| other.get(&a.name) == Some(a))
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sorted_attributes().hash(state);
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{PAYLOAD_INDENT}Entry")?;
        writeln!(f, "{LINE_INDENT}dn: {}", self.name)?;
        for attribute in &self.attributes {
            for value in &attribute.values {
                write_attribute_value(f, LINE_INDENT, attribute.name.as_str(), value)?;
            }
        }
        Ok(())
    }
}

/// Ordered list of URLs where an operation can be continued.
#[derive(PartialEq, Eq, Debug, Clone, Default, Hash)]
pub struct Referral {
    urls: Vec<String>,
}

impl Referral {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn add_url(&mut self, url: impl Into<String>) {
        self.urls.push(url.into());
    }

    /// Removes every occurrence of the URL, returning whether one was found.
    pub fn remove_url(&mut self, url: &str) -> bool {
        let len = self.urls.len();
        self.urls.retain(|u| u != url);
        self.urls.len() != len
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

impl From<Vec<String>> for Referral {
    fn from(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

impl<S: Into<String>> FromIterator<S> for Referral {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            urls: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A protocol control attached to a message. Its content is not interpreted.
///
/// Controls that `ldap3_proto` doesn't know only keep their OID: their
/// criticality and value are dropped when decoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Control(LdapControl);

impl Control {
    pub fn new(oid: impl Into<String>) -> Self {
        Self(LdapControl::Unknown { oid: oid.into() })
    }

    /// The OID of a control that `ldap3_proto` doesn't decode itself.
    pub fn oid(&self) -> Option<&str> {
        match &self.0 {
            LdapControl::Unknown { oid, .. } => Some(oid.as_str()),
            _ => None,
        }
    }

    pub fn as_ldap_control(&self) -> &LdapControl {
        &self.0
    }
}

impl From<LdapControl> for Control {
    fn from(control: LdapControl) -> Self {
        Self(control)
    }
}

impl From<Control> for LdapControl {
    fn from(control: Control) -> Self {
        control.0
    }
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            LdapControl::Unknown { oid } => write!(f, "{oid}"),
            control => write!(f, "{control:?}"),
        }
    }
}
