/*
 * @file pipeline.rs
 * @brief Main-loop command pipeline
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

//! FILE: pipeline.rs
//!
//! DESCRIPTION:
//! Main-loop driver tying transport, frame reader and sampler together.
//!
//! BRIEF:
//! Drains received bytes in order, feeds them to the frame reader and
//! analyzes a completed frame in the same step, then reports finished
//! conversions back over the serial line.

use crate::error::Error;
use crate::frame::{Command, Feed, FrameReader};
use crate::sampler::{ConversionSlot, Converter, Sampler};
use crate::transport::{SerialTransport, SerialTx};
use embedded_hal_nb::serial::Write;

/// Main-loop state: the frame in progress and the sampler it drives.
pub struct Pipeline<C> {
    reader: FrameReader,
    sampler: Sampler<C>,
}

impl<C: Converter> Pipeline<C> {
    pub fn new(converter: C) -> Self {
        Self {
            reader: FrameReader::new(),
            sampler: Sampler::new(converter),
        }
    }

    /// Feeds one byte and, on a complete frame, analyzes it immediately.
    ///
    /// # Returns
    /// * `Option<Command>` - The command that triggered a conversion, if any
    pub fn accept(&mut self, byte: u8) -> Option<Command> {
        if self.reader.feed(byte) != Feed::Complete {
            return None;
        }
        let command = self.reader.analyze()?;
        match command {
            Command::ReadPotentiometer => self.sampler.trigger(),
        }
        Some(command)
    }

    /// Drains the transport once and processes every byte.
    ///
    /// # Arguments
    /// * `transport` - Shared receive buffers
    /// * `scratch` - Destination for one drain
    ///
    /// # Returns
    /// * `usize` - Number of conversions triggered
    pub fn poll<const N: usize>(
        &mut self,
        transport: &SerialTransport<N>,
        scratch: &mut [u8],
    ) -> usize {
        let read = transport.drain(scratch);
        scratch[..read]
            .iter()
            .filter_map(|&byte| self.accept(byte))
            .count()
    }

    /// Sends the reply for a reading posted by the conversion interrupt.
    ///
    /// # Returns
    /// * `Result<Option<u16>, Error<W::Error>>` - The reading that was reported
    pub fn deliver<W: Write<u8>>(
        &mut self,
        slot: &ConversionSlot,
        tx: &mut SerialTx<W>,
    ) -> Result<Option<u16>, Error<W::Error>> {
        let Some(raw) = slot.take() else {
            return Ok(None);
        };
        self.sampler.complete(raw, tx)?;
        Ok(Some(raw))
    }

    pub fn reader(&self) -> &FrameReader {
        &self.reader
    }

    pub fn sampler(&self) -> &Sampler<C> {
        &self.sampler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DRAIN_CHUNK, RING_CAPACITY};
    use crate::sampler::mock::MockAdc;
    use crate::transport::mock::MockUart;

    fn receive(transport: &SerialTransport<RING_CAPACITY>, bytes: &[u8]) {
        for &byte in bytes {
            transport.on_receive(byte);
        }
    }

    fn run_until_idle(
        pipeline: &mut Pipeline<MockAdc>,
        transport: &SerialTransport<RING_CAPACITY>,
    ) -> usize {
        let mut scratch = [0u8; DRAIN_CHUNK];
        let mut triggered = 0;
        while transport.inbound_len() > 0 {
            triggered += pipeline.poll(transport, &mut scratch);
        }
        triggered
    }

    #[test]
    fn test_accept_triggers_once() {
        let mut pipeline = Pipeline::new(MockAdc::default());
        let commands: Vec<_> = b":P01\n".iter().filter_map(|&b| pipeline.accept(b)).collect();
        assert_eq!(commands, [Command::ReadPotentiometer]);
        assert_eq!(pipeline.sampler().converter().starts, 1);
        assert!(pipeline.reader().is_idle());
    }

    #[test]
    fn test_poll_across_chunks() {
        let transport = SerialTransport::<RING_CAPACITY>::new();
        let mut pipeline = Pipeline::new(MockAdc::default());
        receive(&transport, b"ab:P01\n");
        assert_eq!(run_until_idle(&mut pipeline, &transport), 1);
        assert_eq!(pipeline.sampler().converter().starts, 1);
    }

    #[test]
    fn test_poll_back_to_back_frames() {
        let transport = SerialTransport::<RING_CAPACITY>::new();
        let mut pipeline = Pipeline::new(MockAdc::default());
        receive(&transport, b":P01\n:P01\n");
        assert_eq!(run_until_idle(&mut pipeline, &transport), 2);
    }

    #[test]
    fn test_wrong_command_never_triggers() {
        let transport = SerialTransport::<RING_CAPACITY>::new();
        let mut pipeline = Pipeline::new(MockAdc::default());
        receive(&transport, b":P02\n");
        assert_eq!(run_until_idle(&mut pipeline, &transport), 0);
        assert_eq!(pipeline.sampler().converter().starts, 0);
        assert!(pipeline.reader().is_idle());
    }

    #[test]
    fn test_recovers_after_bad_frame() {
        let transport = SerialTransport::<RING_CAPACITY>::new();
        let mut pipeline = Pipeline::new(MockAdc::default());
        receive(&transport, b":P01X:P01\n");
        assert_eq!(run_until_idle(&mut pipeline, &transport), 1);
    }

    #[test]
    fn test_overrun_loses_oldest_frame() {
        let transport = SerialTransport::<RING_CAPACITY>::new();
        let mut pipeline = Pipeline::new(MockAdc::default());
        // 20 bytes into a 16 byte buffer: the first frame loses its head.
        receive(&transport, b":P01\n:P01\n:P01\n:P01\n");
        assert!(transport.take_overrun());
        assert_eq!(run_until_idle(&mut pipeline, &transport), 3);
    }

    #[test]
    fn test_deliver_sends_reply() {
        let mut pipeline = Pipeline::new(MockAdc::default());
        let slot = ConversionSlot::new();
        let mut tx = SerialTx::new(MockUart::default());
        assert_eq!(pipeline.deliver(&slot, &mut tx), Ok(None));
        assert!(tx.writer().sent.is_empty());

        for &byte in b":P01\n" {
            pipeline.accept(byte);
        }
        slot.post(1023);
        assert_eq!(pipeline.deliver(&slot, &mut tx), Ok(Some(1023)));
        assert_eq!(tx.writer().sent, b":P011023\n");
        assert!(!pipeline.sampler().in_flight());
    }
}
