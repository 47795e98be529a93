#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # vcf-to-csv

 Converts contact files in the vCard format into comma-separated files, and
 prints those files back as aligned console tables.

 ## Core Concepts

- **Contact:** the record rebuilt from one `BEGIN:VCARD` / `END:VCARD` block:
  a full name, phone numbers and email addresses.
- **ItemReader:** the retrieval of input for a `Step`, one item at a time. The
  vCard reader yields one contact per closed block.
- **ItemWriter:** the output of a `Step`. The CSV writer turns each contact
  into a row with every field quoted.
- **Step:** reads every item, then writes them all at once.

 ## Getting Started

```rust
# use vcf_to_csv::{
#     core::step::StepBuilder,
#     item::{csv::csv_writer::CsvItemWriterBuilder, vcard::vcard_reader::VcardItemReaderBuilder},
#     table::render_table,
#     BatchError,
# };
fn main() -> Result<(), BatchError> {
    let vcf = "\
BEGIN:VCARD
FN:Alice
TEL;TYPE=CELL;pref:5551234
EMAIL;pref:a@b.com
END:VCARD
";

    let reader = VcardItemReaderBuilder::new().from_reader(vcf.as_bytes());
    let writer = CsvItemWriterBuilder::new().from_writer(Vec::new());

    let execution = StepBuilder::new(&reader, &writer).build().execute()?;
    assert_eq!(execution.write_count, 1);

    let csv = String::from_utf8(writer.into_inner()?).unwrap();
    assert_eq!(csv, "FullName,PhoneNumbers,Emails\n\"Alice\",\"5551234\",\"a@b.com\"\n");

    print!("{}", render_table(&csv));
    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// The contact record
pub mod contact;

/// Conversion entry points and the top-level failure boundary
pub mod converter;

/// Core module for item reading, writing and steps
pub mod core;

/// Error types
pub mod error;

#[doc(inline)]
pub use error::*;

/// Item readers / writers (vCard reader, CSV writer)
pub mod item;

/// Console table rendering of CSV files
pub mod table;
