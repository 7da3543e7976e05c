//! Serialization of one or many files into a single checksummed byte stream.
//!
//! ```text
//! [u32 BE] entry count
//! [u32 BE] total length of the packed payload, this header included
//! for each entry:
//!   [u16 BE] name length
//!   [N bytes] name, UTF-8
//!   [u32 BE] content length
//!   [N bytes] content
//!   [u32 BE] CRC-32 of the content
//! ```

use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::result::Result;
use crate::InvisioError;

/// entry count and total length
pub const PACKED_HEADER_LEN: usize = 4 + 4;
/// name length, content length and checksum of one entry
pub const ENTRY_OVERHEAD: usize = 2 + 4 + 4;

/// One hidden file, immutable once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadEntry {
    name: String,
    content: Vec<u8>,
    checksum: u32,
}

impl PayloadEntry {
    pub fn new<S: Into<String>>(name: S, content: Vec<u8>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.len() > u16::MAX as usize {
            return Err(InvisioError::InvalidFileName);
        }
        let checksum = crc32fast::hash(&content);

        Ok(Self {
            name,
            content,
            checksum,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.name, self.content)
    }

    fn packed_len(&self) -> usize {
        ENTRY_OVERHEAD + self.name.len() + self.content.len()
    }
}

/// bytes the given entries occupy once packed
pub fn packed_len(entries: &[PayloadEntry]) -> usize {
    PACKED_HEADER_LEN + entries.iter().map(PayloadEntry::packed_len).sum::<usize>()
}

pub fn pack(entries: &[PayloadEntry]) -> Result<Vec<u8>> {
    let total_len = packed_len(entries);
    let too_large = |required: usize| InvisioError::InsufficientCapacity {
        required_bits: required as u64 * 8,
        available_bits: u32::MAX as u64 * 8,
    };
    let total = u32::try_from(total_len).map_err(|_| too_large(total_len))?;
    let count = u32::try_from(entries.len()).map_err(|_| too_large(total_len))?;

    let mut buf = Vec::with_capacity(total_len);
    buf.write_u32::<BigEndian>(count)?;
    buf.write_u32::<BigEndian>(total)?;
    for entry in entries {
        buf.write_u16::<BigEndian>(entry.name.len() as u16)?;
        buf.extend_from_slice(entry.name.as_bytes());
        buf.write_u32::<BigEndian>(entry.content.len() as u32)?;
        buf.extend_from_slice(&entry.content);
        buf.write_u32::<BigEndian>(entry.checksum)?;
    }
    debug_assert_eq!(buf.len(), total_len);

    Ok(buf)
}

/// parses a packed payload, every length and checksum is verified
pub fn unpack(data: &[u8]) -> Result<Vec<PayloadEntry>> {
    if data.len() < PACKED_HEADER_LEN {
        return Err(corrupt("packed payload is shorter than its header"));
    }
    let mut cursor = Cursor::new(data);
    let count = cursor.read_u32::<BigEndian>()? as usize;
    let total = cursor.read_u32::<BigEndian>()? as usize;
    if total != data.len() {
        return Err(corrupt("declared total length does not match"));
    }
    if count > (data.len() - PACKED_HEADER_LEN) / (ENTRY_OVERHEAD + 1) {
        return Err(corrupt("declared entry count cannot fit into the payload"));
    }

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        entries.push(read_entry(&mut cursor)?);
    }

    if cursor.position() as usize != data.len() {
        return Err(corrupt("trailing bytes after the last entry"));
    }

    Ok(entries)
}

fn read_entry(cursor: &mut Cursor<&[u8]>) -> Result<PayloadEntry> {
    let name_len = cursor
        .read_u16::<BigEndian>()
        .map_err(|_| corrupt("entry name length is truncated"))? as usize;
    let name = read_exactly(cursor, name_len)?;
    let name = String::from_utf8(name).map_err(|_| corrupt("entry name is not UTF-8"))?;

    let content_len = cursor
        .read_u32::<BigEndian>()
        .map_err(|_| corrupt("entry content length is truncated"))? as usize;
    let content = read_exactly(cursor, content_len)?;

    let checksum = cursor
        .read_u32::<BigEndian>()
        .map_err(|_| corrupt("entry checksum is truncated"))?;
    if crc32fast::hash(&content) != checksum {
        return Err(corrupt("entry checksum mismatch"));
    }

    PayloadEntry::new(name, content).map_err(|_| corrupt("entry name is empty"))
}

fn read_exactly(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<Vec<u8>> {
    let remaining = cursor.get_ref().len() - cursor.position() as usize;
    if len > remaining {
        return Err(corrupt("entry exceeds the payload"));
    }
    let mut buf = vec![0; len];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| corrupt("entry exceeds the payload"))?;

    Ok(buf)
}

fn corrupt(reason: &str) -> InvisioError {
    log::debug!("rejecting payload: {reason}");
    InvisioError::CorruptPayload
}
