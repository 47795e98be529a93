/// This module provides a CSV item writer for contacts.
pub mod csv;

/// This module provides a vCard item reader for contacts.
pub mod vcard;
