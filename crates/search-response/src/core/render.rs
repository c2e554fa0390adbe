use base64::Engine;
use std::fmt::{Formatter, Result};

pub(crate) const HEADER_INDENT: &str = "    ";
pub(crate) const PAYLOAD_INDENT: &str = "        ";
pub(crate) const LINE_INDENT: &str = "            ";

/// Writes one `name: value` line, LDIF style: values that are not valid UTF-8
/// are base64 encoded and separated with a double colon.
pub(crate) fn write_attribute_value(
    f: &mut Formatter<'_>,
    indent: &str,
    name: &str,
    value: &[u8],
) -> Result {
    match std::str::from_utf8(value) {
        Ok(s) => writeln!(f, "{indent}{name}: {s}"),
        Err(_) => writeln!(
            f,
            "{indent}{name}:: {}",
            base64::engine::general_purpose::STANDARD.encode(value)
        ),
    }
}

pub(crate) fn write_quoted_lines<'a, I>(f: &mut Formatter<'_>, indent: &str, lines: I) -> Result
where
    I: IntoIterator<Item = &'a String>,
{
    for line in lines {
        writeln!(f, "{indent}'{line}'")?;
    }
    Ok(())
}
