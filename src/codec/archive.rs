//! the on-disk container: header, frequency table, then the raw bitstream.
//!
//! layout, all multi-byte integers big-endian:
//!
//! | field | size |
//! |---|---|
//! | magic tag | 4 bytes |
//! | group size | 4 bytes |
//! | original code-point count | 8 bytes |
//! | file name | 2-byte length + UTF-8 bytes |
//! | distinct-token count k | 4 bytes |
//! | k entries | token length (4) + token bytes + frequency (4) |
//! | bit-packed code stream | remainder of file |

use std::collections::HashMap;
use std::io::Read;

use crate::codec::ArchiveError;

/// Identifies the archive format ("HUF1").
pub const MAGIC: [u8; 4] = *b"HUF1";

/// Upper bound on a declared token byte length. Rejects corrupt or
/// adversarial headers before any allocation happens.
pub const MAX_TOKEN_BYTES: u32 = 50_000_000;

/// Everything the archive stores ahead of the bit stream. The coding tree
/// and code table are deliberately absent; both sides regenerate them from
/// the frequency table.
#[derive(Debug, Clone)]
pub struct ArchiveHeader {
    pub group_size: u32,
    pub code_point_count: u64,
    pub file_name: String,
    pub frequencies: HashMap<String, u32>,
}

trait ReadBe: Read {
    fn read_array<const K: usize>(&mut self) -> Result<[u8; K], ArchiveError> {
        let mut buf = [0u8; K];
        self.read_exact(&mut buf).map_err(|_| ArchiveError::TruncatedHeader)?;
        Ok(buf)
    }

    fn read_u16_be(&mut self) -> Result<u16, ArchiveError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    fn read_u32_be(&mut self) -> Result<u32, ArchiveError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    fn read_u64_be(&mut self) -> Result<u64, ArchiveError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }
}

impl<T: Read> ReadBe for T {}

impl ArchiveHeader {
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), ArchiveError> {
        let name = self.file_name.as_bytes();
        if name.len() > u16::MAX as usize {
            return Err(ArchiveError::FileNameTooLong(name.len()));
        }

        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.group_size.to_be_bytes());
        out.extend_from_slice(&self.code_point_count.to_be_bytes());
        out.extend_from_slice(&(name.len() as u16).to_be_bytes());
        out.extend_from_slice(name);

        out.extend_from_slice(&(self.frequencies.len() as u32).to_be_bytes());
        for (token, &count) in &self.frequencies {
            let bytes = token.as_bytes();
            out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
            out.extend_from_slice(bytes);
            out.extend_from_slice(&count.to_be_bytes());
        }

        Ok(())
    }

    pub fn read_from<R: Read>(input: &mut R) -> Result<Self, ArchiveError> {
        let magic: [u8; 4] = input.read_array()?;
        if magic != MAGIC {
            return Err(ArchiveError::BadMagic);
        }

        let group_size = input.read_u32_be()?;
        if group_size == 0 {
            return Err(ArchiveError::InvalidGroupSize(0));
        }

        let code_point_count = input.read_u64_be()?;

        let name_len = input.read_u16_be()? as usize;
        let mut name_buf = vec![0u8; name_len];
        input.read_exact(&mut name_buf).map_err(|_| ArchiveError::TruncatedHeader)?;
        let file_name = String::from_utf8(name_buf).map_err(|_| ArchiveError::NameNotUtf8)?;

        let entry_count = input.read_u32_be()?;
        // the count is untrusted; cap the preallocation and let the loop
        // grow the map if the archive really is that large
        let mut frequencies = HashMap::with_capacity(entry_count.min(1 << 16) as usize);
        for _ in 0..entry_count {
            let len = input.read_u32_be()?;
            if len > MAX_TOKEN_BYTES {
                return Err(ArchiveError::TokenTooLong(len));
            }
            let mut token_buf = vec![0u8; len as usize];
            input.read_exact(&mut token_buf).map_err(|_| ArchiveError::TruncatedHeader)?;
            let token = String::from_utf8(token_buf).map_err(|_| ArchiveError::TokenNotUtf8)?;

            let count = input.read_u32_be()?;
            if count == 0 {
                return Err(ArchiveError::ZeroFrequency);
            }

            frequencies.insert(token, count);
        }

        Ok(ArchiveHeader {
            group_size,
            code_point_count,
            file_name,
            frequencies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_header() -> ArchiveHeader {
        let mut frequencies = HashMap::new();
        frequencies.insert("aa".to_string(), 3);
        frequencies.insert("b\n".to_string(), 1);
        frequencies.insert("é🚀".to_string(), 2);

        ArchiveHeader {
            group_size: 2,
            code_point_count: 12,
            file_name: "LOTR.txt".to_string(),
            frequencies,
        }
    }

    #[test]
    fn header_roundtrips() {
        let header = sample_header();
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();

        let read = ArchiveHeader::read_from(&mut Cursor::new(&buf[..])).unwrap();
        assert_eq!(read.group_size, header.group_size);
        assert_eq!(read.code_point_count, header.code_point_count);
        assert_eq!(read.file_name, header.file_name);
        assert_eq!(read.frequencies, header.frequencies);
    }

    #[test]
    fn reader_stops_exactly_at_the_bitstream() {
        let header = sample_header();
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        let header_len = buf.len();
        buf.extend_from_slice(&[0xAB, 0xCD]);

        let mut cursor = Cursor::new(&buf[..]);
        ArchiveHeader::read_from(&mut cursor).unwrap();
        assert_eq!(cursor.position() as usize, header_len);
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut buf = Vec::new();
        sample_header().write_to(&mut buf).unwrap();
        buf[3] = b'2';

        assert!(matches!(
            ArchiveHeader::read_from(&mut Cursor::new(&buf[..])),
            Err(ArchiveError::BadMagic)
        ));
    }

    #[test]
    fn oversized_token_length_is_rejected_before_allocation() {
        let mut buf = Vec::new();
        let mut header = sample_header();
        header.frequencies.clear();
        header.frequencies.insert("a".to_string(), 1);
        header.write_to(&mut buf).unwrap();

        // the single entry starts right after the 4-byte entry count;
        // overwrite its length field with something absurd
        let entry_len_offset = buf.len() - (4 + 1 + 4);
        buf[entry_len_offset..entry_len_offset + 4].copy_from_slice(&u32::MAX.to_be_bytes());

        assert!(matches!(
            ArchiveHeader::read_from(&mut Cursor::new(&buf[..])),
            Err(ArchiveError::TokenTooLong(_))
        ));
    }

    #[test]
    fn zero_frequency_is_rejected() {
        let mut buf = Vec::new();
        let mut header = sample_header();
        header.frequencies.clear();
        header.frequencies.insert("a".to_string(), 1);
        header.write_to(&mut buf).unwrap();

        // the frequency is the trailing 4 bytes of the single entry
        let freq_offset = buf.len() - 4;
        buf[freq_offset..].copy_from_slice(&0u32.to_be_bytes());

        assert!(matches!(
            ArchiveHeader::read_from(&mut Cursor::new(&buf[..])),
            Err(ArchiveError::ZeroFrequency)
        ));
    }

    #[test]
    fn zero_stored_group_size_is_rejected() {
        let mut buf = Vec::new();
        sample_header().write_to(&mut buf).unwrap();
        buf[4..8].copy_from_slice(&0u32.to_be_bytes());

        assert!(matches!(
            ArchiveHeader::read_from(&mut Cursor::new(&buf[..])),
            Err(ArchiveError::InvalidGroupSize(0))
        ));
    }

    #[test]
    fn truncation_anywhere_in_the_header_is_detected() {
        let mut buf = Vec::new();
        sample_header().write_to(&mut buf).unwrap();

        for cut in [2, 6, 14, 18, buf.len() - 3] {
            assert!(
                matches!(
                    ArchiveHeader::read_from(&mut Cursor::new(&buf[..cut])),
                    Err(ArchiveError::TruncatedHeader)
                ),
                "cut at {cut} went undetected"
            );
        }
    }
}
