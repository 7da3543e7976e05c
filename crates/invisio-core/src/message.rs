use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::media::payload::PayloadEntry;
use crate::result::Result;
use crate::InvisioError;

/// name under which a plain text message is hidden
pub const TEXT_MESSAGE_FILE_NAME: &str = "secret-message.txt";

/// The ordered set of files that is hidden in one carrier
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Message {
    pub files: Vec<PayloadEntry>,
}

impl Message {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a new message with the given files.
    pub fn from_files<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
        let mut m = Self::empty();

        for f in files.iter() {
            m.add_file(f)?;
        }

        Ok(m)
    }

    pub fn add_file<P: AsRef<Path> + ?Sized>(&mut self, file: &P) -> Result<&mut Self> {
        let mut fd = File::open(file).map_err(|source| InvisioError::ReadError { source })?;
        let mut fb: Vec<u8> = Vec::new();

        fd.read_to_end(&mut fb)
            .map_err(|source| InvisioError::ReadError { source })?;
        self.add_file_data(file, fb)?;

        Ok(self)
    }

    /// adds content under the final path component of `file`
    pub fn add_file_data<P: AsRef<Path> + ?Sized>(
        &mut self,
        file: &P,
        data: Vec<u8>,
    ) -> Result<&mut Self> {
        let file = file
            .as_ref()
            .file_name()
            .ok_or(InvisioError::InvalidFileName)?
            .to_str()
            .ok_or(InvisioError::InvalidFileName)?;

        self.files.push(PayloadEntry::new(file, data)?);

        Ok(self)
    }

    pub fn add_text(&mut self, text: &str) -> Result<&mut Self> {
        self.files.push(PayloadEntry::new(
            TEXT_MESSAGE_FILE_NAME,
            text.as_bytes().to_vec(),
        )?);

        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
