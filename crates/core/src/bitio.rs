//! Bit-level I/O utilities for reading and writing individual bits.
//!
//! [`BitWriter`] and [`BitReader`] operate MSB-first: the first bit written
//! lands in the most significant bit of the first byte. The container header,
//! the serialized tree and the content codes all go through these two types.
//!
//! # Padding Rules
//! - `BitWriter::align` pads the current partial byte with zeros and reports
//!   how many padding bits it added
//! - `BitReader` cannot tell padding from data; the container header records
//!   how many trailing bits to ignore
//!
//! # Example
//! ```
//! use symhuff_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bit(true);
//! assert_eq!(writer.align(), 4);
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_0000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert!(reader.read_bit().unwrap());
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a growing byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - unused low bits of `bit_buffer` are zero
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            let room = 8 - self.bit_count as usize;
            let take = remaining.min(room);
            let shift = remaining - take;
            let chunk = ((value >> shift) & ((1u64 << take) - 1)) as u8;

            self.bit_buffer |= chunk << (room - take);
            self.bit_count += take as u8;
            if self.bit_count == 8 {
                self.flush_byte();
            }

            remaining = shift;
        }

        Ok(())
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.flush_byte();
        }
    }

    /// Write whole bytes at the current bit position (which need not be aligned).
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.bit_count == 0 {
            self.bytes.extend_from_slice(bytes);
            return;
        }
        for &byte in bytes {
            // Cannot fail: count is 8
            let _ = self.write_bits(u64::from(byte), 8);
        }
    }

    /// Zero-pad up to the next byte boundary and return the number of padding
    /// bits added (0-7).
    pub fn align(&mut self) -> u8 {
        if self.bit_count == 0 {
            return 0;
        }
        let padding = 8 - self.bit_count;
        self.flush_byte();
        padding
    }

    /// Consume the writer and return the bytes, zero-padding a final partial byte.
    pub fn finish(mut self) -> Vec<u8> {
        self.align();
        self.bytes
    }

    /// Number of complete bytes written so far.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Total number of bits written, including the partial byte.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    fn flush_byte(&mut self) {
        self.bytes.push(self.bit_buffer);
        self.bit_buffer = 0;
        self.bit_count = 0;
    }
}

/// Reads bits MSB-first from a byte slice.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read `count` bits (0-64) as an unsigned integer, first bit most significant.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut remaining = count;
        while remaining > 0 {
            let offset = self.bit_position % 8;
            let available = 8 - offset;
            let take = remaining.min(available);

            let byte = self.data[self.bit_position / 8];
            let mask = ((1u16 << take) - 1) as u8;
            let bits = (byte >> (available - take)) & mask;

            result = (result << take) | u64::from(bits);
            self.bit_position += take;
            remaining -= take;
        }

        Ok(result)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = self
            .data
            .get(self.bit_position / 8)
            .ok_or(BitIoError::UnexpectedEof)?;
        let bit = byte & (0x80 >> (self.bit_position % 8)) != 0;
        self.bit_position += 1;
        Ok(bit)
    }

    /// Read `count` whole bytes starting at the current (possibly unaligned) position.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        if count * 8 > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.read_bits(8)? as u8);
        }
        Ok(out)
    }

    /// Move the cursor to an absolute bit position.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.bit_len() {
            return Err(BitIoError::SeekOutOfRange {
                position,
                len: self.bit_len(),
            }
            .into());
        }
        self.bit_position = position;
        Ok(())
    }

    /// Total number of bits in the underlying buffer.
    pub fn bit_len(&self) -> usize {
        self.data.len() * 8
    }

    pub fn bits_remaining(&self) -> usize {
        self.bit_len() - self.bit_position
    }

    pub fn position(&self) -> usize {
        self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len()
    }
}
