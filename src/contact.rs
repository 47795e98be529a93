/// A contact reconstructed from one `BEGIN:VCARD` / `END:VCARD` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    /// Value of the last `FN:` line of the block, if any.
    pub full_name: Option<String>,
    /// `TEL` values in source order, duplicates kept.
    pub phone_numbers: Vec<String>,
    /// `EMAIL` values in source order, duplicates kept.
    pub emails: Vec<String>,
}

impl Contact {
    pub fn new() -> Self {
        Self::default()
    }
}
