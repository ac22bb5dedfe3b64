/*
 * @file transport.rs
 * @brief Interrupt-driven serial transport
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

//! FILE: transport.rs
//!
//! DESCRIPTION:
//! Interrupt-driven serial transport.
//!
//! BRIEF:
//! Owns the inbound and outbound ring buffers shared with the UART
//! interrupt and provides the blocking transmit path. Every access to the
//! shared buffers happens inside a critical section, on both the interrupt
//! side and the main-loop side.

use crate::error::Error;
use crate::ring_buffer::{PutStatus, RingBuffer};
use core::cell::{Cell, RefCell};
use critical_section::Mutex;
use embedded_hal_nb::nb;
use embedded_hal_nb::serial::Write;

/// Ring buffers and flags shared between the RX interrupt and the main loop.
///
/// # Details
/// Meant to live in a single `static` so the interrupt handler can reach it.
/// The outbound buffer is allocated for symmetry but transmit bypasses it.
///
/// # Fields
/// * `inbound` - Bytes received by the interrupt, waiting for the main loop
/// * `outbound` - Reserved transmit queue, currently without a producer
/// * `overrun` - Set when the interrupt dropped an unread byte
pub struct SerialTransport<const N: usize> {
    inbound: Mutex<RefCell<RingBuffer<N>>>,
    outbound: Mutex<RefCell<RingBuffer<N>>>,
    overrun: Mutex<Cell<bool>>,
}

impl<const N: usize> SerialTransport<N> {
    /// Creates a transport with two empty ring buffers.
    pub const fn new() -> Self {
        Self {
            inbound: Mutex::new(RefCell::new(RingBuffer::new())),
            outbound: Mutex::new(RefCell::new(RingBuffer::new())),
            overrun: Mutex::new(Cell::new(false)),
        }
    }

    /// Stores a byte received in interrupt context.
    ///
    /// # Details
    /// O(1) and non-blocking apart from the critical section itself.
    /// A full buffer drops its oldest byte and latches the overrun flag.
    ///
    /// # Arguments
    /// * `byte` - The byte read from the UART data register
    ///
    /// # Returns
    /// * `PutStatus` - Whether an older byte was lost
    pub fn on_receive(&self, byte: u8) -> PutStatus {
        critical_section::with(|cs| {
            let status = self.inbound.borrow_ref_mut(cs).put(byte);
            if status == PutStatus::Overwrote {
                self.overrun.borrow(cs).set(true);
            }
            status
        })
    }

    /// Moves buffered bytes into `dest` in arrival order.
    ///
    /// # Details
    /// The whole drain runs in one critical section, so a byte arriving
    /// meanwhile is stored only after the drain has finished.
    ///
    /// # Arguments
    /// * `dest` - Destination slice; at most `dest.len()` bytes are read
    ///
    /// # Returns
    /// * `usize` - Number of bytes written into `dest`
    pub fn drain(&self, dest: &mut [u8]) -> usize {
        critical_section::with(|cs| {
            let mut inbound = self.inbound.borrow_ref_mut(cs);
            let mut read = 0;
            for slot in dest.iter_mut() {
                match inbound.get() {
                    Some(byte) => {
                        *slot = byte;
                        read += 1;
                    }
                    None => break,
                }
            }
            read
        })
    }

    /// Returns and clears the overrun flag.
    pub fn take_overrun(&self) -> bool {
        critical_section::with(|cs| self.overrun.borrow(cs).replace(false))
    }

    pub fn inbound_len(&self) -> usize {
        critical_section::with(|cs| self.inbound.borrow_ref(cs).len())
    }

    pub fn outbound_is_empty(&self) -> bool {
        critical_section::with(|cs| self.outbound.borrow_ref(cs).is_empty())
    }
}

impl<const N: usize> Default for SerialTransport<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking transmitter over any `embedded-hal-nb` serial writer.
pub struct SerialTx<W> {
    writer: W,
}

impl<W: Write<u8>> SerialTx<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Busy-waits until the transmitter accepts `byte`.
    ///
    /// # Details
    /// There is no timeout; a transmitter that never becomes ready hangs here.
    pub fn write_byte(&mut self, byte: u8) -> Result<(), Error<W::Error>> {
        nb::block!(self.writer.write(byte)).map_err(Error::Serial)
    }

    /// Writes every byte of `bytes`.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error<W::Error>> {
        bytes.iter().try_for_each(|&byte| self.write_byte(byte))
    }

    /// Writes `text` up to its first NUL byte with interrupts masked.
    ///
    /// # Arguments
    /// * `text` - Byte string, optionally NUL-terminated
    pub fn write_text(&mut self, text: &[u8]) -> Result<(), Error<W::Error>> {
        critical_section::with(|_| {
            text.iter()
                .take_while(|&&byte| byte != 0)
                .try_for_each(|&byte| self.write_byte(byte))
        })
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockUart;
    use super::*;
    use embedded_hal_nb::serial::ErrorKind;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_receive_then_drain() {
        let transport = SerialTransport::<16>::new();
        for &byte in b":P01\n" {
            assert_eq!(transport.on_receive(byte), PutStatus::Stored);
        }
        let mut dest = [0u8; 8];
        assert_eq!(transport.drain(&mut dest), 5);
        assert_eq!(&dest[..5], b":P01\n");
        assert_eq!(transport.inbound_len(), 0);
    }

    #[test]
    fn test_drain_empty_is_noop() {
        let transport = SerialTransport::<16>::new();
        let mut dest = [0xAAu8; 4];
        assert_eq!(transport.drain(&mut dest), 0);
        assert_eq!(dest, [0xAA; 4]);
        // Critical section released: a later receive still lands.
        transport.on_receive(b'x');
        assert_eq!(transport.inbound_len(), 1);
    }

    #[test]
    fn test_drain_respects_dest_len() {
        let transport = SerialTransport::<16>::new();
        for byte in 0..6 {
            transport.on_receive(byte);
        }
        let mut dest = [0u8; 4];
        assert_eq!(transport.drain(&mut dest), 4);
        assert_eq!(dest, [0, 1, 2, 3]);
        assert_eq!(transport.drain(&mut dest), 2);
        assert_eq!(&dest[..2], &[4, 5]);
    }

    #[test]
    fn test_overrun_drops_oldest_and_latches() {
        let transport = SerialTransport::<4>::new();
        for byte in 1..=4 {
            transport.on_receive(byte);
        }
        assert!(!transport.take_overrun());
        assert_eq!(transport.on_receive(5), PutStatus::Overwrote);
        assert!(transport.take_overrun());
        assert!(!transport.take_overrun());
        let mut dest = [0u8; 4];
        transport.drain(&mut dest);
        assert_eq!(dest, [2, 3, 4, 5]);
    }

    #[test]
    fn test_outbound_stays_idle() {
        let transport = SerialTransport::<16>::new();
        transport.on_receive(b'a');
        assert!(transport.outbound_is_empty());
    }

    #[test]
    fn test_receive_during_drain_is_deferred() {
        static SHARED: SerialTransport<4> = SerialTransport::new();
        let delivered = AtomicBool::new(false);

        thread::scope(|s| {
            let producer = critical_section::with(|_| {
                let handle = s.spawn(|| {
                    SHARED.on_receive(b'P');
                    delivered.store(true, Ordering::SeqCst);
                });
                thread::sleep(Duration::from_millis(50));
                assert!(!delivered.load(Ordering::SeqCst));
                let mut dest = [0u8; 4];
                assert_eq!(SHARED.drain(&mut dest), 0);
                handle
            });
            producer.join().unwrap();
        });

        assert!(delivered.load(Ordering::SeqCst));
        let mut dest = [0u8; 4];
        assert_eq!(SHARED.drain(&mut dest), 1);
        assert_eq!(dest[0], b'P');
    }

    #[test]
    fn test_write_byte_waits_for_ready() {
        let mut tx = SerialTx::new(MockUart {
            stalls_per_byte: 3,
            ..Default::default()
        });
        tx.write_byte(b'Z').unwrap();
        assert_eq!(tx.writer().sent, b"Z");
        assert_eq!(tx.writer().polls, 4);
    }

    #[test]
    fn test_write_text_stops_at_nul() {
        let mut tx = SerialTx::new(MockUart::default());
        tx.write_text(b":P01\0ignored").unwrap();
        assert_eq!(tx.writer().sent, b":P01");
    }

    #[test]
    fn test_write_text_without_terminator() {
        let mut tx = SerialTx::new(MockUart::default());
        tx.write_text(b"512").unwrap();
        assert_eq!(tx.writer().sent, b"512");
    }

    #[test]
    fn test_write_error_propagates() {
        let mut tx = SerialTx::new(MockUart {
            fail_after: Some(2),
            ..Default::default()
        });
        assert_eq!(
            tx.write_all(b"abcd"),
            Err(Error::Serial(ErrorKind::Other))
        );
        assert_eq!(tx.writer().sent, b"ab");
    }
}
