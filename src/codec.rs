//! code-point grouping huffman codec.
//!
//! the container stores the frequency table, never the codes: both sides
//! rebuild the same tree from the frequencies alone, so the deterministic
//! tie-break in [`tree`] is part of the wire contract, not an internal
//! detail.

use std::io::Cursor;

use thiserror::Error;

pub mod archive;
pub mod bitio;
pub mod decode;
pub mod token;
pub mod tree;

use archive::ArchiveHeader;
use bitio::{BitReader, BitWriter};

/// Represents an error emitted while reading or writing an archive.
///
/// Every variant aborts the operation that raised it; no partial output is
/// ever produced from a failed encode or decode.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The input did not start with the archive magic tag.
    #[error("not a huf archive (bad magic)")]
    BadMagic,

    /// A group size of zero was supplied or stored.
    #[error("invalid group size: {0} (must be at least 1)")]
    InvalidGroupSize(u32),

    /// The caller asked to decode with a different group size than the
    /// archive was created with.
    #[error("group size mismatch: archive was created with n={archive}, but n={requested} was requested")]
    GroupSizeMismatch { archive: u32, requested: u32 },

    /// A declared token length exceeded the sanity ceiling.
    #[error("declared token length {0} exceeds the sanity limit")]
    TokenTooLong(u32),

    /// Token bytes in the header were not valid UTF-8.
    #[error("token bytes are not valid UTF-8")]
    TokenNotUtf8,

    /// File name bytes in the header were not valid UTF-8.
    #[error("file name bytes are not valid UTF-8")]
    NameNotUtf8,

    /// A frequency-table entry declared a count of zero.
    #[error("invalid token frequency: 0 (must be positive)")]
    ZeroFrequency,

    /// The file name does not fit the header's length prefix.
    #[error("file name too long for the archive header ({0} bytes)")]
    FileNameTooLong(usize),

    /// The archive ended while header bytes were still expected.
    #[error("unexpected end of archive while reading the header")]
    TruncatedHeader,

    /// The bit stream ended while the decoder was still mid-traversal.
    #[error("unexpected end of bitstream while decoding")]
    TruncatedBitstream,

    /// A single-leaf archive carries an empty token yet claims a non-empty
    /// original; repeating it would never terminate.
    #[error("corrupted archive: zero-length token for non-empty text")]
    ZeroLengthToken,

    /// An internal coder error. This should (practically) never happen.
    #[error("internal coder error")]
    Internal,
}

/// The outcome of decoding an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Base file name stored at encode time.
    pub file_name: String,
    /// The reconstructed text.
    pub text: String,
}

/// Encodes `text` into a self-describing archive, grouping `group_size`
/// code points per token. `file_name` should be a bare name; it is stored
/// verbatim in the header.
pub fn encode_text(text: &str, group_size: u32, file_name: &str) -> Result<Vec<u8>, ArchiveError> {
    if group_size == 0 {
        return Err(ArchiveError::InvalidGroupSize(0));
    }

    if_tracing! {
        tracing::debug!(target = "codec", input_len = text.len(), group_size, "encode start");
    }

    let cps: Vec<char> = text.chars().collect();
    let tokens = token::tokenize(&cps, group_size as usize);
    let frequencies = token::count_frequencies(&tokens);

    let root = tree::build_tree(frequencies.iter().map(|(t, &c)| (t.clone(), c)));
    let codes = tree::assign_codes(&root);

    let header = ArchiveHeader {
        group_size,
        code_point_count: cps.len() as u64,
        file_name: file_name.to_string(),
        frequencies,
    };

    let mut out = Vec::new();
    header.write_to(&mut out)?;

    let mut writer = BitWriter::new(&mut out);
    for t in &tokens {
        let code = codes.get(t).ok_or(ArchiveError::Internal)?;
        for &bit in code {
            writer.write_bit(bit);
        }
    }
    writer.finish();

    if_tracing! {
        tracing::info!(target = "codec", input_len = text.len(), output_len = out.len(), group_size, "encode complete");
    }

    Ok(out)
}

/// Decodes an archive produced by [`encode_text`]. The caller must supply
/// the same group size the archive was created with; a mismatch is a hard
/// error rather than a silent fallback to the stored value.
pub fn decode_archive(data: &[u8], group_size: u32) -> Result<Decoded, ArchiveError> {
    if group_size == 0 {
        return Err(ArchiveError::InvalidGroupSize(0));
    }

    if_tracing! {
        tracing::debug!(target = "codec", input_len = data.len(), group_size, "decode start");
    }

    let mut cursor = Cursor::new(data);
    let header = ArchiveHeader::read_from(&mut cursor)?;

    if header.group_size != group_size {
        return Err(ArchiveError::GroupSizeMismatch {
            archive: header.group_size,
            requested: group_size,
        });
    }

    // an empty original never touches the bit stream
    if header.code_point_count == 0 {
        return Ok(Decoded {
            file_name: header.file_name,
            text: String::new(),
        });
    }

    let root = tree::build_tree(header.frequencies.iter().map(|(t, &c)| (t.clone(), c)));

    let payload = &data[cursor.position() as usize..];
    let mut reader = BitReader::new(payload);
    let text = decode::decode_stream(&root, &mut reader, header.code_point_count)?;

    if_tracing! {
        tracing::info!(target = "codec", input_len = data.len(), output_len = text.len(), group_size, "decode complete");
    }

    Ok(Decoded {
        file_name: header.file_name,
        text,
    })
}
