/*
 * @file ring_buffer.rs
 * @brief Fixed-capacity drop-oldest byte ring buffer
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! FILE: ring_buffer.rs
//!
//! DESCRIPTION:
//! Fixed-capacity byte ring buffer with drop-oldest overflow.
//!
//! BRIEF:
//! Stores bytes between the UART interrupt and the main loop.
//! A push into a full buffer overwrites the oldest byte instead of failing.
//! The buffer does no locking of its own; callers wrap it in a critical section.

/// Outcome of [`RingBuffer::put`].
///
/// # Variants
/// * `Stored` - Byte appended, nothing lost
/// * `Overwrote` - Byte appended, the oldest byte was dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PutStatus {
    Stored,
    Overwrote,
}

/// Fixed-size FIFO used between the interrupt and main loop.
///
/// # Fields
/// * `buf` - Backing storage of `N` bytes
/// * `read` - Index of the oldest stored byte
/// * `write` - Index the next byte lands on
/// * `count` - Number of stored bytes, `0..=N`
pub struct RingBuffer<const N: usize> {
    buf: [u8; N],
    read: usize,
    write: usize,
    count: usize,
}

impl<const N: usize> RingBuffer<N> {
    /// Creates an empty ring buffer.
    ///
    /// # Details
    /// Rejects a zero capacity at compile time.
    pub const fn new() -> Self {
        const { assert!(N > 0, "ring buffer capacity must be non-zero") };
        Self {
            buf: [0; N],
            read: 0,
            write: 0,
            count: 0,
        }
    }

    /// Appends one byte, dropping the oldest byte when full.
    ///
    /// # Arguments
    /// * `byte` - The byte to enqueue
    ///
    /// # Returns
    /// * `PutStatus` - `Overwrote` if the oldest byte was discarded
    pub fn put(&mut self, byte: u8) -> PutStatus {
        self.buf[self.write] = byte;
        self.write = Self::advance(self.write);
        if self.count < N {
            self.count += 1;
            PutStatus::Stored
        } else {
            self.read = Self::advance(self.read);
            PutStatus::Overwrote
        }
    }

    /// Pops the oldest byte from the buffer, if any.
    ///
    /// # Returns
    /// * `Option<u8>` - `Some` byte when data exists, otherwise `None`
    pub fn get(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.buf[self.read];
        self.read = Self::advance(self.read);
        self.count -= 1;
        Some(byte)
    }

    pub fn is_full(&self) -> bool {
        self.count == N
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Discards every stored byte.
    pub fn clear(&mut self) {
        self.read = 0;
        self.write = 0;
        self.count = 0;
    }

    /// Next index modulo the capacity.
    const fn advance(idx: usize) -> usize {
        let next = idx + 1;
        if next == N { 0 } else { next }
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drain_all<const N: usize>(rb: &mut RingBuffer<N>) -> Vec<u8> {
        core::iter::from_fn(|| rb.get()).collect()
    }

    #[test]
    fn test_new_is_empty() {
        let rb = RingBuffer::<16>::new();
        assert!(rb.is_empty());
        assert!(!rb.is_full());
        assert_eq!(rb.len(), 0);
        assert_eq!(rb.capacity(), 16);
    }

    #[test]
    fn test_put_then_get() {
        let mut rb = RingBuffer::<16>::new();
        assert_eq!(rb.put(b'A'), PutStatus::Stored);
        assert_eq!(rb.get(), Some(b'A'));
        assert_eq!(rb.get(), None);
    }

    #[test]
    fn test_get_empty() {
        let mut rb = RingBuffer::<4>::new();
        assert_eq!(rb.get(), None);
        assert!(rb.is_empty());
    }

    #[test]
    fn test_fill_to_capacity() {
        let mut rb = RingBuffer::<4>::new();
        for byte in 1..=4 {
            assert_eq!(rb.put(byte), PutStatus::Stored);
        }
        assert!(rb.is_full());
        assert_eq!(rb.len(), 4);
    }

    #[test]
    fn test_overwrite_oldest() {
        let mut rb = RingBuffer::<4>::new();
        for byte in 1..=4 {
            rb.put(byte);
        }
        assert_eq!(rb.put(5), PutStatus::Overwrote);
        assert!(rb.is_full());
        assert_eq!(drain_all(&mut rb), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_wraps_after_partial_drain() {
        let mut rb = RingBuffer::<3>::new();
        rb.put(1);
        rb.put(2);
        assert_eq!(rb.get(), Some(1));
        rb.put(3);
        rb.put(4);
        assert!(rb.is_full());
        assert_eq!(drain_all(&mut rb), vec![2, 3, 4]);
    }

    #[test]
    fn test_capacity_one() {
        let mut rb = RingBuffer::<1>::new();
        assert_eq!(rb.put(7), PutStatus::Stored);
        assert_eq!(rb.put(8), PutStatus::Overwrote);
        assert_eq!(rb.get(), Some(8));
        assert!(rb.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut rb = RingBuffer::<4>::new();
        rb.put(1);
        rb.put(2);
        rb.clear();
        assert!(rb.is_empty());
        assert_eq!(rb.get(), None);
    }

    proptest! {
        #[test]
        fn keeps_most_recent_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut rb = RingBuffer::<16>::new();
            for &byte in &bytes {
                rb.put(byte);
            }
            let keep = bytes.len().min(16);
            prop_assert_eq!(rb.len(), keep);
            prop_assert_eq!(drain_all(&mut rb), bytes[bytes.len() - keep..].to_vec());
        }

        #[test]
        fn reports_overwrite_only_when_full(bytes in proptest::collection::vec(any::<u8>(), 1..40)) {
            let mut rb = RingBuffer::<8>::new();
            for (i, &byte) in bytes.iter().enumerate() {
                let expected = if i < 8 { PutStatus::Stored } else { PutStatus::Overwrote };
                prop_assert_eq!(rb.put(byte), expected);
            }
        }
    }
}
