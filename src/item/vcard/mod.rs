//! vCard support for reading contact records.
//!
//! The reader recognises a deliberately small subset of the format: the
//! `BEGIN:VCARD` / `END:VCARD` block markers and the `FN:`, `TEL` and
//! `EMAIL` line prefixes. Phone and email values are taken from whatever
//! follows a `pref:` marker on the line; lines without one contribute nothing.
//!
//! # Examples
//!
//! ```
//! use vcf_to_csv::core::item::ItemReader;
//! use vcf_to_csv::item::vcard::vcard_reader::VcardItemReaderBuilder;
//!
//! let vcf = "\
//! BEGIN:VCARD
//! FN:Alice
//! TEL;TYPE=CELL;pref:5551234
//! EMAIL;pref:alice@example.com
//! END:VCARD
//! BEGIN:VCARD
//! FN:Bob
//! END:VCARD
//! ";
//!
//! let reader = VcardItemReaderBuilder::new().from_reader(vcf.as_bytes());
//!
//! let mut names = Vec::new();
//! while let Some(contact) = reader.read().unwrap() {
//!     names.push(contact.full_name.unwrap_or_default());
//! }
//!
//! assert_eq!(names, vec!["Alice", "Bob"]);
//! ```

/// A module providing facilities for reading vCard contact records.
pub mod vcard_reader;
