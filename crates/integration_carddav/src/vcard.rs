//! Lenient vCard parsing
//!
//! Reads the handful of properties a birthday calendar needs (`UID`, `FN`,
//! `N`, `BDAY`) out of a single vCard block. Structural problems reject the
//! block; an unreadable `BDAY` only leaves the birthday empty.

use domain::{ContactRecord, PartialDate, StructuredName};
use tracing::debug;

use crate::client::CardDavError;

const BEGIN_LINE: &str = "BEGIN:VCARD";
const END_LINE: &str = "END:VCARD";

/// Parse one vCard block into a [`ContactRecord`]
pub fn parse_vcard(vcard_data: &str) -> Result<ContactRecord, CardDavError> {
    let lines = unfold_vcard_lines(vcard_data);
    let lines: Vec<&str> = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return Err(CardDavError::ParseError("empty vCard".to_string()));
    };
    if !first.eq_ignore_ascii_case(BEGIN_LINE) {
        return Err(CardDavError::ParseError(format!(
            "expected {BEGIN_LINE}, found {first:?}"
        )));
    }
    if lines.len() < 2 || !last.eq_ignore_ascii_case(END_LINE) {
        return Err(CardDavError::ParseError(format!(
            "expected {END_LINE}, found {last:?}"
        )));
    }

    let mut record = ContactRecord::new();

    for line in &lines[1..lines.len() - 1] {
        if line.eq_ignore_ascii_case(BEGIN_LINE) {
            return Err(CardDavError::ParseError("nested vCard".to_string()));
        }

        let Some((prop_with_params, value)) = line.split_once(':') else {
            return Err(CardDavError::ParseError(format!(
                "content line without value: {line:?}"
            )));
        };

        match property_name(prop_with_params).as_str() {
            "UID" => {
                record.uid.get_or_insert_with(|| unescape_text(value));
            },
            "FN" => {
                record.display_name.get_or_insert_with(|| unescape_text(value));
            },
            "N" => {
                record.structured_name.get_or_insert_with(|| {
                    StructuredName::from_components(
                        split_components(value).iter().map(|c| unescape_text(c)),
                    )
                });
            },
            "BDAY" if record.birth_date.is_none() => match value.parse::<PartialDate>() {
                Ok(date) => record.birth_date = Some(date),
                Err(e) => debug!(value, error = %e, "Ignoring unreadable BDAY"),
            },
            _ => {},
        }
    }

    Ok(record)
}

/// Upper-cased property name without parameters or group prefix
fn property_name(prop_with_params: &str) -> String {
    let name = prop_with_params
        .split_once(';')
        .map_or(prop_with_params, |(name, _)| name);
    let name = name.rsplit_once('.').map_or(name, |(_, name)| name);
    name.trim().to_ascii_uppercase()
}

/// Unfold continuation lines in vCard data
///
/// Handles RFC 2425 folding (leading space or tab) and vCard 2.1
/// quoted-printable soft line breaks (a trailing `=`).
fn unfold_vcard_lines(data: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for line in data.lines() {
        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            current.push_str(continuation);
        } else if ends_with_soft_break(&current) {
            current.pop();
            current.push_str(line);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = line.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Whether `line` is a quoted-printable value continued on the next line
fn ends_with_soft_break(line: &str) -> bool {
    line.ends_with('=')
        && line.split_once(':').is_some_and(|(prop_with_params, _)| {
            prop_with_params
                .to_ascii_uppercase()
                .contains("QUOTED-PRINTABLE")
        })
}

/// Split a compound value on unescaped semicolons
fn split_components(value: &str) -> Vec<&str> {
    let mut components = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (idx, ch) in value.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ';' => {
                components.push(&value[start..idx]);
                start = idx + 1;
            },
            _ => {},
        }
    }
    components.push(&value[start..]);
    components
}

/// Resolve vCard text escapes (`\n`, `\,`, `\;`, `\\`)
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
