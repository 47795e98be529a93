use std::{
    cell::RefCell,
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};

use log::{debug, warn};

use crate::{
    contact::Contact,
    core::item::{ItemReader, ItemReaderResult},
    error::BatchError,
};

const BEGIN_MARKER: &str = "BEGIN:VCARD";
const END_MARKER: &str = "END:VCARD";
const FULL_NAME_PREFIX: &str = "FN:";
const PHONE_PREFIX: &str = "TEL";
const EMAIL_PREFIX: &str = "EMAIL";
const PREF_MARKER: &str = "pref:";
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Returns everything after the first case-insensitive occurrence of `pref:`.
///
/// This is a plain substring search: the marker is found wherever it appears
/// on the line, including inside the value itself.
///
/// # Examples
///
/// ```
/// use vcf_to_csv::item::vcard::vcard_reader::extract_pref_value;
///
/// assert_eq!(extract_pref_value("TEL;TYPE=CELL;PREF:5551234"), Some("5551234"));
/// assert_eq!(extract_pref_value("TEL;TYPE=CELL:5551234"), None);
/// ```
pub fn extract_pref_value(line: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets aligned with `line`.
    let index = line.to_ascii_lowercase().find(PREF_MARKER)?;
    Some(&line[index + PREF_MARKER.len()..])
}

/// Line-driven state machine rebuilding contacts from vCard blocks.
///
/// Holds at most one open contact. A begin marker seen while a contact is
/// open abandons it; a contact still open when input ends is never emitted.
#[derive(Debug, Default)]
pub struct VcardParser {
    current: Option<Contact>,
}

impl VcardParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a block has been opened and not yet closed.
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Applies one line and returns the contact it finalised, if any.
    pub fn feed(&mut self, line: &str) -> Option<Contact> {
        if line.starts_with(BEGIN_MARKER) {
            if self.current.replace(Contact::new()).is_some() {
                warn!("Discarding unterminated vCard block");
            }
            return None;
        }

        if line.starts_with(END_MARKER) {
            return self.current.take();
        }

        let contact = self.current.as_mut()?;

        if let Some(full_name) = line.strip_prefix(FULL_NAME_PREFIX) {
            contact.full_name = Some(full_name.to_string());
        } else if line.starts_with(PHONE_PREFIX) {
            if let Some(phone) = non_empty_pref_value(line) {
                contact.phone_numbers.push(phone.to_string());
            }
        } else if line.starts_with(EMAIL_PREFIX) {
            if let Some(email) = non_empty_pref_value(line) {
                contact.emails.push(email.to_string());
            }
        }

        None
    }

    /// Parses a whole sequence of lines into the contacts it closes, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcf_to_csv::item::vcard::vcard_reader::VcardParser;
    ///
    /// let contacts = VcardParser::parse_lines(["BEGIN:VCARD", "FN:Ada", "END:VCARD"]);
    ///
    /// assert_eq!(contacts.len(), 1);
    /// assert_eq!(contacts[0].full_name.as_deref(), Some("Ada"));
    /// ```
    pub fn parse_lines<I, S>(lines: I) -> Vec<Contact>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = Self::new();
        lines
            .into_iter()
            .filter_map(|line| parser.feed(line.as_ref()))
            .collect()
    }
}

fn non_empty_pref_value(line: &str) -> Option<&str> {
    extract_pref_value(line).filter(|value| !value.is_empty())
}

/// Splits a byte source into text lines.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD instead of failing the read, and a byte
/// order mark at the very start of the input is dropped.
struct LossyLines<B> {
    source: B,
    buffer: Vec<u8>,
    at_start: bool,
}

impl<B: BufRead> LossyLines<B> {
    fn new(source: B) -> Self {
        Self {
            source,
            buffer: Vec::new(),
            at_start: true,
        }
    }

    /// Fills `buffer` with the next line, without its terminator.
    ///
    /// Returns `false` once the source is exhausted.
    fn read_raw_line(&mut self) -> io::Result<bool> {
        self.buffer.clear();

        loop {
            let available = self.source.fill_buf()?;
            if available.is_empty() {
                return Ok(!self.buffer.is_empty());
            }

            let Some(index) = available.iter().position(|&b| matches!(b, b'\n' | b'\r')) else {
                let len = available.len();
                self.buffer.extend_from_slice(available);
                self.source.consume(len);
                continue;
            };

            let terminator = available[index];
            self.buffer.extend_from_slice(&available[..index]);
            self.source.consume(index + 1);

            if terminator == b'\r' && self.source.fill_buf()?.first() == Some(&b'\n') {
                self.source.consume(1);
            }

            return Ok(true);
        }
    }
}

impl<B: BufRead> Iterator for LossyLines<B> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_raw_line() {
            Ok(false) => None,
            Ok(true) => {
                let mut line = String::from_utf8_lossy(&self.buffer).into_owned();
                if std::mem::take(&mut self.at_start) && line.starts_with(BYTE_ORDER_MARK) {
                    line.remove(0);
                }
                Some(Ok(line))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

/// An `ItemReader` yielding one [`Contact`] per closed vCard block.
///
/// Lines are pulled lazily from the underlying source; each call to `read`
/// consumes input until a block closes or the source is exhausted.
pub struct VcardItemReader<R> {
    lines: RefCell<LossyLines<BufReader<R>>>,
    parser: RefCell<VcardParser>,
}

impl<R: Read> ItemReader<Contact> for VcardItemReader<R> {
    /// Reads the next finalised contact.
    ///
    /// # Returns
    /// - `Ok(Some(contact))` when a block closes
    /// - `Ok(None)` at end of input, dropping any block still open
    /// - `Err(BatchError::ItemReader(_))` if the source fails to read
    fn read(&self) -> ItemReaderResult<Contact> {
        let mut lines = self.lines.borrow_mut();
        let mut parser = self.parser.borrow_mut();

        for line in lines.by_ref() {
            let line = line.map_err(|error| BatchError::ItemReader(error.to_string()))?;

            if let Some(contact) = parser.feed(&line) {
                debug!("Read contact: {:?}", contact.full_name);
                return Ok(Some(contact));
            }
        }

        if parser.is_open() {
            warn!("Dropping vCard block left open at end of input");
            *parser = VcardParser::new();
        }

        Ok(None)
    }
}

/// A builder for [`VcardItemReader`].
#[derive(Default)]
pub struct VcardItemReaderBuilder {}

impl VcardItemReaderBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// Creates a reader over any `Read` source.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcf_to_csv::core::item::ItemReader;
    /// use vcf_to_csv::item::vcard::vcard_reader::VcardItemReaderBuilder;
    ///
    /// let vcf = "BEGIN:VCARD\nFN:Ada Lovelace\nTEL;pref:5551234\nEND:VCARD\n";
    /// let reader = VcardItemReaderBuilder::new().from_reader(vcf.as_bytes());
    ///
    /// let contact = reader.read().unwrap().unwrap();
    /// assert_eq!(contact.full_name.as_deref(), Some("Ada Lovelace"));
    /// assert_eq!(contact.phone_numbers, vec!["5551234"]);
    /// assert!(reader.read().unwrap().is_none());
    /// ```
    pub fn from_reader<R: Read>(self, rdr: R) -> VcardItemReader<R> {
        VcardItemReader {
            lines: RefCell::new(LossyLines::new(BufReader::new(rdr))),
            parser: RefCell::new(VcardParser::new()),
        }
    }

    /// Creates a reader over the file at `path`.
    ///
    /// # Errors
    /// Returns `BatchError::ItemReader` if the file cannot be opened.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<VcardItemReader<File>, BatchError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| {
            BatchError::ItemReader(format!("{}: {}", path.display(), error))
        })?;

        Ok(self.from_reader(file))
    }
}
