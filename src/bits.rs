// ABOUTME: MSB-first bit cursor used by every Bearer Data sub-parameter codec
// ABOUTME: Reads and writes fields of 1 to 32 bits at arbitrary bit offsets

use crate::codec::CodecError;
use bytes::{BufMut, Bytes, BytesMut};

/// Sequential reader over an octet slice.
///
/// Bits within each octet are consumed from bit 7 (most significant) down to
/// bit 0, and multi-bit fields are assembled most significant bit first.
/// A reader is usually scoped to exactly one sub-parameter span so that a
/// routine can never read into its neighbour.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Total bits not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    fn ensure(&self, bits: usize) -> Result<(), CodecError> {
        if bits > self.remaining() {
            return Err(CodecError::Underflow {
                wanted: bits,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Reads the next `bits` bits (1..=32) as an unsigned value.
    pub fn read(&mut self, bits: u32) -> Result<u32, CodecError> {
        debug_assert!((1..=32).contains(&bits), "bit width must be 1..=32");
        self.ensure(bits as usize)?;

        let mut value: u64 = 0;
        let mut left = bits;
        while left > 0 {
            let byte = self.data[self.pos / 8];
            let used = (self.pos % 8) as u32;
            let avail = 8 - used;
            let take = avail.min(left);
            let chunk = (byte >> (avail - take)) & (0xFF >> (8 - take));
            value = (value << take) | u64::from(chunk);
            self.pos += take as usize;
            left -= take;
        }
        Ok(value as u32)
    }

    pub fn read_u8(&mut self, bits: u32) -> Result<u8, CodecError> {
        debug_assert!(bits <= 8);
        Ok(self.read(bits)? as u8)
    }

    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        Ok(self.read(1)? == 1)
    }

    /// Reads `bits` bits into a fresh octet vector, left aligned; the unused
    /// low bits of a trailing partial octet are zero.
    pub fn read_bytes(&mut self, bits: usize) -> Result<Vec<u8>, CodecError> {
        self.ensure(bits)?;
        let mut out = Vec::with_capacity(bits.div_ceil(8));
        let mut left = bits;
        while left >= 8 {
            out.push(self.read(8)? as u8);
            left -= 8;
        }
        if left > 0 {
            let tail = self.read(left as u32)? as u8;
            out.push(tail << (8 - left));
        }
        Ok(out)
    }

    pub fn skip(&mut self, bits: usize) -> Result<(), CodecError> {
        self.ensure(bits)?;
        self.pos += bits;
        Ok(())
    }

    /// Advances to the next octet boundary; a no-op when already aligned.
    pub fn skip_to_byte_boundary(&mut self) {
        self.pos = self.pos.div_ceil(8) * 8;
    }
}

/// Growable MSB-first bit writer. Writing never fails.
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: BytesMut,
    accum: u64,
    accum_bits: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush_full_octets(&mut self) {
        while self.accum_bits >= 8 {
            self.accum_bits -= 8;
            self.buf.put_u8((self.accum >> self.accum_bits) as u8);
        }
        self.accum &= (1u64 << self.accum_bits) - 1;
    }

    /// Appends the low `bits` bits (1..=32) of `value`.
    pub fn write(&mut self, value: u32, bits: u32) {
        debug_assert!((1..=32).contains(&bits), "bit width must be 1..=32");
        let masked = u64::from(value) & ((1u64 << bits) - 1);
        self.accum = (self.accum << bits) | masked;
        self.accum_bits += bits;
        self.flush_full_octets();
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write(u32::from(value), 1);
    }

    /// Appends the first `bits` bits of `bytes`, MSB first.
    pub fn write_bytes(&mut self, bytes: &[u8], bits: usize) {
        debug_assert!(bits <= bytes.len() * 8);
        if self.accum_bits == 0 && bits % 8 == 0 {
            self.buf.put_slice(&bytes[..bits / 8]);
            return;
        }
        let mut left = bits;
        for &byte in bytes {
            if left == 0 {
                break;
            }
            let take = left.min(8) as u32;
            self.write(u32::from(byte >> (8 - take)), take);
            left -= take as usize;
        }
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.buf.len() * 8 + self.accum_bits as usize
    }

    pub fn pad_to_byte_boundary(&mut self) {
        if self.accum_bits > 0 {
            let pad = 8 - self.accum_bits;
            self.write(0, pad);
        }
    }

    /// Finishes the stream, zero padding any trailing partial octet.
    pub fn into_bytes(mut self) -> Bytes {
        self.pad_to_byte_boundary();
        self.buf.freeze()
    }
}
