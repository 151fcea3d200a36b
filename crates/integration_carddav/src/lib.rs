#![forbid(unsafe_code)]
//! CardDAV integration
//!
//! Fetches address data from CardDAV servers (Baïkal, Radicale, Nextcloud)
//! and extracts the contacts embedded in the multistatus response.

pub mod client;
pub mod extractor;
pub mod vcard;

pub use client::{CardDavClient, CardDavConfig, CardDavError, HttpCardDavClient, PROPFIND_BODY};
pub use extractor::{VCardBlocks, extract_records, records, unescape_xml_entities};
pub use vcard::parse_vcard;
