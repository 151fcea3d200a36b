//! Contact record extraction from multistatus responses
//!
//! A plain text scan, not an XML parser: every span from a literal
//! `BEGIN:VCARD` to the next literal `END:VCARD` is taken as one vCard,
//! whatever markup surrounds it. A `BEGIN:VCARD` inside a property value
//! (e.g. a note) therefore corrupts the scan of that response.

use std::{borrow::Cow, iter::FusedIterator};

use domain::ContactRecord;
use tracing::debug;

use crate::vcard::parse_vcard;

/// Start marker of an embedded vCard (case-sensitive)
pub const VCARD_BEGIN: &str = "BEGIN:VCARD";
/// End marker of an embedded vCard (case-sensitive)
pub const VCARD_END: &str = "END:VCARD";

/// Lazy iterator over raw vCard blocks in document order
///
/// Blocks are the shortest non-overlapping spans from a start marker to the
/// next end marker, markers included. A start marker without a following
/// end marker ends the iteration.
#[derive(Debug, Clone)]
pub struct VCardBlocks<'a> {
    remaining: &'a str,
}

impl<'a> VCardBlocks<'a> {
    /// Scan `text` for vCard blocks
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { remaining: text }
    }
}

impl<'a> Iterator for VCardBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(begin) = self.remaining.find(VCARD_BEGIN) else {
            self.remaining = "";
            return None;
        };
        let from_begin = &self.remaining[begin..];

        let Some(end) = from_begin[VCARD_BEGIN.len()..].find(VCARD_END) else {
            self.remaining = "";
            return None;
        };
        let block_len = VCARD_BEGIN.len() + end + VCARD_END.len();

        let (block, rest) = from_begin.split_at(block_len);
        self.remaining = rest;
        Some(block)
    }
}

impl FusedIterator for VCardBlocks<'_> {}

/// Undo the XML escaping of `<`, `>` and `&`
///
/// Applied in that order, matching how servers embed vCards in
/// `address-data` elements. Carriage returns escaped as `&#13;` or `&#xD;`
/// (sabre-based servers such as Baïkal and Nextcloud) are decoded before
/// `&amp;`, so they end lines like a raw CRLF would.
pub fn unescape_xml_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&#13;", "\r")
            .replace("&#xD;", "\r")
            .replace("&#xd;", "\r")
            .replace("&amp;", "&"),
    )
}

/// Lazily parse every well-formed contact embedded in `text`
///
/// Blocks that fail to parse are skipped.
pub fn records(text: &str) -> impl Iterator<Item = ContactRecord> + '_ {
    VCardBlocks::new(text).filter_map(|block| {
        match parse_vcard(&unescape_xml_entities(block)) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "Skipping malformed vCard");
                None
            },
        }
    })
}

/// Parse every well-formed contact embedded in `text`
pub fn extract_records(text: &str) -> Vec<ContactRecord> {
    records(text).collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use domain::PartialDate;

    use super::*;

    const VCARD_DATA: &str = "
BEGIN:VCARD
VERSION:3.0
FN:John Doe
N:Doe;John;;;
BDAY:1990-05-10
END:VCARD
BEGIN:VCARD
VERSION:3.0
FN:Jane Doe
N:Doe;Jane;;;
BDAY:1985-02-28
END:VCARD
";

    fn multistatus(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<d:multistatus xmlns:d="DAV:" xmlns:c="urn:ietf:params:xml:ns:carddav">
    <d:response>
        <d:propstat>
            <d:prop>
                <c:address-data>{inner}</c:address-data>
            </d:prop>
        </d:propstat>
    </d:response>
</d:multistatus>"#
        )
    }

    // === Block Scanner Tests ===

    #[test]
    fn blocks_are_found_in_document_order() {
        let text = "xx BEGIN:VCARD\nFN:A\nEND:VCARD yy BEGIN:VCARD\nFN:B\nEND:VCARD zz";
        let blocks: Vec<_> = VCardBlocks::new(text).collect();
        assert_eq!(
            blocks,
            vec!["BEGIN:VCARD\nFN:A\nEND:VCARD", "BEGIN:VCARD\nFN:B\nEND:VCARD"]
        );
    }

    #[test]
    fn blocks_are_non_greedy() {
        let text = "BEGIN:VCARD\nFN:A\nEND:VCARD\nBEGIN:VCARD\nFN:B\nEND:VCARD";
        let first = VCardBlocks::new(text).next().expect("block");
        assert_eq!(first, "BEGIN:VCARD\nFN:A\nEND:VCARD");
    }

    #[test]
    fn markers_are_case_sensitive() {
        let text = "begin:vcard\nFN:A\nend:vcard";
        assert_eq!(VCardBlocks::new(text).count(), 0);
    }

    #[test]
    fn unterminated_block_is_ignored() {
        let text = "BEGIN:VCARD\nFN:A\nEND:VCARD\nBEGIN:VCARD\nFN:Truncated";
        let mut blocks = VCardBlocks::new(text);
        assert!(blocks.next().is_some());
        assert!(blocks.next().is_none());
        assert!(blocks.next().is_none());
    }

    #[test]
    fn adjacent_markers_form_a_block() {
        let blocks: Vec<_> = VCardBlocks::new("BEGIN:VCARDEND:VCARD").collect();
        assert_eq!(blocks, vec!["BEGIN:VCARDEND:VCARD"]);
    }

    #[test]
    fn no_markers_no_blocks() {
        assert_eq!(VCardBlocks::new("").count(), 0);
        assert_eq!(VCardBlocks::new("<d:multistatus/>").count(), 0);
    }

    // === Entity Tests ===

    #[test]
    fn unescapes_the_three_entities() {
        assert_eq!(unescape_xml_entities("&lt;a&gt; &amp; b"), "<a> & b");
    }

    #[test]
    fn unescape_without_entities_borrows() {
        assert!(matches!(unescape_xml_entities("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn unescape_order_is_lt_gt_amp() {
        assert_eq!(unescape_xml_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn escaped_carriage_returns_become_cr() {
        assert_eq!(unescape_xml_entities("A&#13;\nB&#xD;\nC&#xd;"), "A\r\nB\r\nC\r");
        assert_eq!(unescape_xml_entities("&amp;#13;"), "&#13;");
    }

    // === Record Extraction Tests ===

    #[test]
    fn extracts_records_from_multistatus() {
        let records = extract_records(&multistatus(VCARD_DATA));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].display_name.as_deref(), Some("John Doe"));
        assert_eq!(records[1].display_name.as_deref(), Some("Jane Doe"));
        assert_eq!(
            records[1].birth_date,
            Some(PartialDate::from(NaiveDate::from_ymd_opt(1985, 2, 28).unwrap()))
        );
    }

    #[test]
    fn escaped_values_are_unescaped_before_parsing() {
        let text = multistatus("BEGIN:VCARD\nFN:Tom &amp; Jerry &lt;TJ&gt;\nBDAY:--01-01\nEND:VCARD");
        let records = extract_records(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display_name.as_deref(), Some("Tom & Jerry <TJ>"));
    }

    #[test]
    fn sabre_style_escaped_crlf_is_accepted() {
        let text = multistatus(
            "BEGIN:VCARD&#13;\nVERSION:3.0&#13;\nFN:Baikal User&#13;\nBDAY:1990-05-10&#13;\nEND:VCARD&#13;\n",
        );
        let records = extract_records(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display_name.as_deref(), Some("Baikal User"));
        assert_eq!(records[0].birth_date, Some(PartialDate::ymd(1990, 5, 10).unwrap()));
    }

    #[test]
    fn malformed_block_does_not_abort_extraction() {
        let text = multistatus(
            "BEGIN:VCARD\nFN:Broken\nno colon here\nEND:VCARD\nBEGIN:VCARD\nFN:Good\nBDAY:1990-05-10\nEND:VCARD\nBEGIN:VCARD\nFN:Truncated",
        );
        let records = extract_records(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display_name.as_deref(), Some("Good"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = multistatus(VCARD_DATA);
        assert_eq!(extract_records(&text), extract_records(&text));
    }

    #[test]
    fn records_is_lazy_and_restartable() {
        let text = multistatus(VCARD_DATA);
        let first = records(&text).next().expect("record");
        assert_eq!(first.display_name.as_deref(), Some("John Doe"));
        assert_eq!(records(&text).count(), 2);
    }

    #[test]
    fn empty_response_yields_nothing() {
        assert!(extract_records("").is_empty());
        assert!(extract_records(&multistatus("")).is_empty());
    }
}
