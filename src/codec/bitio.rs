//! bit-level packing, most significant bit first.
//!
//! neither side tracks a bit count: the stream ends zero-padded to a byte
//! boundary, and the consumer knows from the header how many code points to
//! stop at, so padding bits are never mistaken for data.

/// Accumulates single bits into bytes, MSB first, appending to a borrowed
/// byte buffer.
pub struct BitWriter<'a> {
    out: &'a mut Vec<u8>,
    current: u8,
    filled: u8,
}

impl<'a> BitWriter<'a> {
    pub fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            current: 0,
            filled: 0,
        }
    }

    pub fn write_bit(&mut self, bit: u8) {
        debug_assert!(bit <= 1, "bit must be 0 or 1");
        self.current = (self.current << 1) | (bit & 1);
        self.filled += 1;
        if self.filled == 8 {
            self.out.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
    }

    /// Flushes a pending partial byte, left-aligned and zero-padded.
    pub fn finish(self) {
        if self.filled > 0 {
            self.out.push(self.current << (8 - self.filled));
        }
    }
}

/// Hands out bits MSB first; `None` once the byte source is exhausted.
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    bit: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, bit: 0 }
    }

    pub fn read_bit(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        let bit = (byte >> (7 - self.bit)) & 1;
        self.bit += 1;
        if self.bit == 8 {
            self.bit = 0;
            self.pos += 1;
        }
        Some(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_byte_is_left_aligned_and_zero_padded() {
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        for bit in [1, 0, 1] {
            writer.write_bit(bit);
        }
        writer.finish();

        assert_eq!(out, vec![0b1010_0000]);
    }

    #[test]
    fn full_bytes_flush_without_finish() {
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        for bit in [1, 1, 1, 1, 0, 0, 0, 0, 1] {
            writer.write_bit(bit);
        }
        assert_eq!(*writer.out, vec![0b1111_0000]);
        writer.finish();
        assert_eq!(out, vec![0b1111_0000, 0b1000_0000]);
    }

    #[test]
    fn finish_without_pending_bits_writes_nothing() {
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        for _ in 0..8 {
            writer.write_bit(1);
        }
        writer.finish();
        assert_eq!(out, vec![0xff]);
    }

    #[test]
    fn reader_yields_msb_first_then_end_of_stream() {
        let data = [0b1010_0000];
        let mut reader = BitReader::new(&data);

        let bits: Vec<u8> = std::iter::from_fn(|| reader.read_bit()).collect();
        assert_eq!(bits, vec![1, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(reader.read_bit(), None);
    }

    #[test]
    fn writer_and_reader_agree() {
        let pattern: Vec<u8> = (0..37).map(|i| (i * 7 % 3 == 0) as u8).collect();

        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        for &bit in &pattern {
            writer.write_bit(bit);
        }
        writer.finish();

        let mut reader = BitReader::new(&out);
        let read: Vec<u8> = (0..pattern.len()).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(read, pattern);
    }
}
