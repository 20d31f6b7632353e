//! Bit cursors over caller-owned byte buffers.
//!
//! Positions are absolute bit counts from the start of the buffer, so a caller can stop after any
//! bit and continue later with a fresh cursor at the same position.
//!
//! ## Bit ordering
//! Bit position `p` lives in byte `p / 8` and has the value `1 << (p % 8)` there. The first bit of
//! a byte is its least significant bit.

/// Read cursor over a byte slice.
#[derive(Clone, Copy, Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Absolute bit position, never greater than `data.len() * 8`.
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader starting at bit `offset`. Offsets past the end are clamped to the end.
    pub fn new(data: &'a [u8], offset: usize) -> Self {
        let mut reader = Self { data, position: 0 };
        reader.advance(offset);
        reader
    }

    /// Total number of bits in the underlying slice.
    #[inline]
    pub fn total_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// Current absolute bit position.
    #[inline]
    pub fn bits_processed(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.total_bits() - self.position
    }

    /// Whether every bit has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position >= self.total_bits()
    }

    /// The next (up to) 8 bits without consuming them.
    ///
    /// Bit 0 of the result is the next bit to be read. Bits past the end of the slice are 0.
    pub fn peek(&self) -> u8 {
        if self.is_empty() {
            return 0;
        }

        let index = self.position / 8;
        let shift = self.position % 8;

        let mut value = self.data[index] >> shift;
        if shift > 0 {
            if let Some(&next) = self.data.get(index + 1) {
                value |= next << (8 - shift);
            }
        }
        value
    }

    /// Reads one bit, or `None` once the reader is empty.
    #[inline]
    pub fn next_bit(&mut self) -> Option<bool> {
        if self.is_empty() {
            return None;
        }

        let bit = self.peek() & 1 == 1;
        self.position += 1;
        Some(bit)
    }

    /// Skips `bits` bits. Stops at the end of the slice instead of running past it.
    #[inline]
    pub fn advance(&mut self, bits: usize) {
        self.position = self.position.saturating_add(bits).min(self.total_bits());
    }
}

/// Write cursor over a mutable byte slice.
///
/// The first time a byte is written to, its bits from the write position upward are cleared, so
/// stale buffer contents never leak into the output. When the cursor starts in the middle of a
/// byte, the bits below the starting position are kept: they belong to an earlier call.
#[derive(Debug)]
pub struct BitWriter<'a> {
    data: &'a mut [u8],
    start: usize,
    position: usize,
}

impl<'a> BitWriter<'a> {
    pub fn new(data: &'a mut [u8], offset: usize) -> Self {
        Self {
            data,
            start: offset,
            position: offset,
        }
    }

    #[inline]
    pub fn capacity_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// Current absolute bit position.
    #[inline]
    pub fn bits_written(&self) -> usize {
        self.position
    }

    /// Number of bits that still fit.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity_bits().saturating_sub(self.position)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Appends one bit. Returns `false` without writing anything if the buffer is full.
    pub fn push_bit(&mut self, bit: bool) -> bool {
        if self.is_full() {
            return false;
        }

        let index = self.position / 8;
        let shift = self.position % 8;

        if shift == 0 || self.position == self.start {
            self.data[index] &= (1u8 << shift) - 1;
        }
        if bit {
            self.data[index] |= 1 << shift;
        }

        self.position += 1;
        true
    }

    /// Appends all of `bits`, or nothing at all if they do not fit.
    pub fn push_bits(&mut self, bits: &[bool]) -> bool {
        if bits.len() > self.remaining() {
            return false;
        }

        for &bit in bits {
            self.push_bit(bit);
        }
        true
    }
}
