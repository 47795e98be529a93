use std::{
    cell::{RefCell, RefMut},
    io::{self, Write},
};

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use log::debug;
use serde::Serialize;

use crate::{
    contact::Contact,
    core::item::{ItemWriter, ItemWriterResult},
    BatchError,
};

/// Column names of the header row, in field order.
pub const CSV_HEADERS: [&str; 3] = ["FullName", "PhoneNumbers", "Emails"];

/// Separator used to join multi-valued fields into a single cell.
pub const VALUE_SEPARATOR: &str = ";";

/// Flat row shape of a contact as written to CSV.
#[derive(Serialize, Debug, PartialEq)]
struct ContactRow<'a> {
    full_name: &'a str,
    phone_numbers: String,
    emails: String,
}

impl<'a> From<&'a Contact> for ContactRow<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            full_name: contact.full_name.as_deref().unwrap_or_default(),
            phone_numbers: contact.phone_numbers.join(VALUE_SEPARATOR),
            emails: contact.emails.join(VALUE_SEPARATOR),
        }
    }
}

fn writer_error(error: impl ToString) -> BatchError {
    BatchError::ItemWriter(error.to_string())
}

/// An `ItemWriter` serializing contacts as CSV rows.
///
/// Every field is quoted, whatever its content, and embedded double quotes
/// are doubled. The header row, when enabled, is written unquoted by `open`
/// straight to the sink; the csv writer only wraps the sink at the first row.
pub struct CsvItemWriter<T: Write> {
    sink: RefCell<Option<T>>,
    wrapper: RefCell<Option<Writer<T>>>,
    has_headers: bool,
}

impl<T: Write> CsvItemWriter<T> {
    fn new(sink: T, has_headers: bool) -> Self {
        Self {
            sink: RefCell::new(Some(sink)),
            wrapper: RefCell::new(None),
            has_headers,
        }
    }

    /// Wraps the raw sink on first use and returns the csv writer.
    fn csv_writer(&self) -> Result<RefMut<'_, Writer<T>>, BatchError> {
        let mut wrapper = self.wrapper.borrow_mut();

        if wrapper.is_none() {
            let sink = self
                .sink
                .borrow_mut()
                .take()
                .ok_or_else(|| writer_error("CSV sink is no longer available"))?;
            *wrapper = Some(CsvItemWriterBuilder::csv_builder().from_writer(sink));
        }

        RefMut::filter_map(wrapper, Option::as_mut)
            .map_err(|_| writer_error("CSV sink is no longer available"))
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<T, BatchError> {
        match self.wrapper.into_inner() {
            Some(wtr) => wtr.into_inner().map_err(writer_error),
            None => self
                .sink
                .into_inner()
                .ok_or_else(|| writer_error("CSV sink is no longer available")),
        }
    }
}

impl<T: Write> ItemWriter<Contact> for CsvItemWriter<T> {
    fn write(&self, items: &[Contact]) -> ItemWriterResult {
        let mut wtr = self.csv_writer()?;
        for contact in items {
            wtr.serialize(ContactRow::from(contact))
                .map_err(writer_error)?;
        }
        debug!("Serialized {} contacts", items.len());
        Ok(())
    }

    /// Flush the contents of the internal buffer to the underlying writer.
    ///
    /// Note that this also flushes the underlying writer.
    fn flush(&self) -> ItemWriterResult {
        if let Some(wtr) = self.wrapper.borrow_mut().as_mut() {
            return wtr.flush().map_err(writer_error);
        }

        match self.sink.borrow_mut().as_mut() {
            Some(sink) => sink.flush().map_err(writer_error),
            None => Ok(()),
        }
    }

    /// Writes the header row straight to the underlying writer.
    ///
    /// # Errors
    /// Fails if rows were already written, since the header must come first.
    fn open(&self) -> ItemWriterResult {
        if !self.has_headers {
            return Ok(());
        }

        let mut sink = self.sink.borrow_mut();
        let sink = sink
            .as_mut()
            .ok_or_else(|| writer_error("header must be written before the first row"))?;

        writeln!(sink, "{}", CSV_HEADERS.join(",")).map_err(writer_error)
    }
}

/// A builder for [`CsvItemWriter`].
///
/// Headers are enabled by default.
pub struct CsvItemWriterBuilder {
    has_headers: bool,
}

impl Default for CsvItemWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvItemWriterBuilder {
    pub fn new() -> CsvItemWriterBuilder {
        CsvItemWriterBuilder { has_headers: true }
    }

    pub fn has_headers(mut self, yes: bool) -> CsvItemWriterBuilder {
        self.has_headers = yes;
        self
    }

    fn csv_builder() -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .has_headers(false)
            .flexible(false)
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'));
        builder
    }

    /// Creates a writer over any `Write` sink.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcf_to_csv::contact::Contact;
    /// use vcf_to_csv::core::item::ItemWriter;
    /// use vcf_to_csv::item::csv::csv_writer::CsvItemWriterBuilder;
    ///
    /// let contact = Contact {
    ///     full_name: Some("Jane \"J\" Doe, Jr.".to_string()),
    ///     phone_numbers: vec!["5551234".to_string(), "5555678".to_string()],
    ///     emails: vec![],
    /// };
    ///
    /// let wtr = CsvItemWriterBuilder::new().from_writer(vec![]);
    /// wtr.open().unwrap();
    /// wtr.write(&[contact]).unwrap();
    ///
    /// let data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
    /// assert_eq!(
    ///     data,
    ///     "FullName,PhoneNumbers,Emails\n\"Jane \"\"J\"\" Doe, Jr.\",\"5551234;5555678\",\"\"\n"
    /// );
    /// ```
    pub fn from_writer<W: io::Write>(self, wtr: W) -> CsvItemWriter<W> {
        CsvItemWriter::new(wtr, self.has_headers)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use crate::{
        contact::Contact,
        error::BatchError,
        core::item::ItemWriter,
        item::csv::csv_writer::{ContactRow, CsvItemWriterBuilder},
    };

    fn contact(name: Option<&str>, phones: &[&str], emails: &[&str]) -> Contact {
        Contact {
            full_name: name.map(str::to_string),
            phone_numbers: phones.iter().map(|s| s.to_string()).collect(),
            emails: emails.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn row_should_join_multi_values_with_semicolons() {
        let contact = contact(Some("Ada"), &["1", "2", "2"], &["a@b.com", "c@d.com"]);

        assert_eq!(
            ContactRow::from(&contact),
            ContactRow {
                full_name: "Ada",
                phone_numbers: "1;2;2".to_string(),
                emails: "a@b.com;c@d.com".to_string(),
            }
        );
    }

    #[test]
    fn every_field_should_be_quoted() -> Result<(), Box<dyn Error>> {
        let wtr = CsvItemWriterBuilder::new().from_writer(vec![]);

        wtr.open()?;
        wtr.write(&[
            contact(Some("Alice"), &["5551234"], &["a@b.com"]),
            contact(None, &[], &[]),
        ])?;

        let data = String::from_utf8(wtr.into_inner()?)?;
        assert_eq!(
            data,
            "FullName,PhoneNumbers,Emails
\"Alice\",\"5551234\",\"a@b.com\"
\"\",\"\",\"\"
"
        );

        Ok(())
    }

    #[test]
    fn embedded_quotes_should_be_doubled() -> Result<(), Box<dyn Error>> {
        let wtr = CsvItemWriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);

        wtr.write(&[contact(Some("Jane \"J\" Doe, Jr."), &[], &["say \"hi\""])])?;

        let data = String::from_utf8(wtr.into_inner()?)?;
        assert_eq!(data, "\"Jane \"\"J\"\" Doe, Jr.\",\"\",\"say \"\"hi\"\"\"\n");

        Ok(())
    }

    #[test]
    fn header_only_when_no_contacts() -> Result<(), Box<dyn Error>> {
        let wtr = CsvItemWriterBuilder::new().from_writer(vec![]);

        wtr.open()?;
        wtr.write(&[])?;

        let data = String::from_utf8(wtr.into_inner()?)?;
        assert_eq!(data, "FullName,PhoneNumbers,Emails\n");

        Ok(())
    }

    #[test]
    fn header_should_stay_unquoted_ahead_of_rows() -> Result<(), Box<dyn Error>> {
        let wtr = CsvItemWriterBuilder::new().from_writer(vec![]);

        wtr.open()?;
        ItemWriter::<Contact>::flush(&wtr)?;
        wtr.write(&[contact(Some("Bob"), &[], &[])])?;
        ItemWriter::<Contact>::flush(&wtr)?;

        let data = String::from_utf8(wtr.into_inner()?)?;
        assert_eq!(data, "FullName,PhoneNumbers,Emails\n\"Bob\",\"\",\"\"\n");

        Ok(())
    }

    #[test]
    fn open_after_first_row_should_be_rejected() -> Result<(), Box<dyn Error>> {
        let wtr = CsvItemWriterBuilder::new().from_writer(vec![]);

        wtr.write(&[contact(Some("Bob"), &[], &[])])?;

        assert!(matches!(wtr.open(), Err(BatchError::ItemWriter(_))));

        Ok(())
    }
}
