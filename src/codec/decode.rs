//! walks the rebuilt tree against the bit stream to recover the text.

use crate::codec::ArchiveError;
use crate::codec::bitio::BitReader;
use crate::codec::token;
use crate::codec::tree::HuffNode;

/// Decodes tokens until `target` code points have been produced, then trims
/// any overshoot from the final token.
///
/// A single-leaf tree consumes no bits at all: its one token simply
/// repeats. A general tree is walked root-to-leaf, one bit per step,
/// 0 going left and 1 going right; running out of bits mid-walk means the
/// archive is corrupt.
pub fn decode_stream(root: &HuffNode, bits: &mut BitReader<'_>, target: u64) -> Result<String, ArchiveError> {
    let mut out = String::new();
    let mut produced: u64 = 0;

    match root {
        HuffNode::Leaf { token, .. } => {
            let token_cps = token.chars().count() as u64;
            if target > 0 && token_cps == 0 {
                return Err(ArchiveError::ZeroLengthToken);
            }
            while produced < target {
                out.push_str(token);
                produced += token_cps;
            }
        }
        HuffNode::Internal { .. } => {
            while produced < target {
                let mut cur = root;
                while let HuffNode::Internal { left, right, .. } = cur {
                    let bit = bits.read_bit().ok_or(ArchiveError::TruncatedBitstream)?;
                    cur = if bit == 0 { left } else { right };
                }
                if let HuffNode::Leaf { token, .. } = cur {
                    out.push_str(token);
                    produced += token.chars().count() as u64;
                }
            }
        }
    }

    token::truncate_code_points(&mut out, target);
    Ok(out)
}
