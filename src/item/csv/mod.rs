//! CSV support for writing contacts.
//!
//! Each contact becomes one row of three columns, `FullName`,
//! `PhoneNumbers` and `Emails`, with multi-valued fields joined by `;`.
//! Every data field is wrapped in double quotes unconditionally and embedded
//! quotes are doubled, so a name such as `Jane "J" Doe, Jr.` is written as
//! `"Jane ""J"" Doe, Jr."`. The header row is left unquoted.
//!
//! # Ownership and Borrowing Considerations
//!
//! Writers own their destination until dropped or until `into_inner` is
//! called. To inspect an in-memory buffer after writing, recover it with
//! `into_inner`, which also flushes.

/// A module providing facilities for writing contacts as CSV rows.
pub mod csv_writer;
