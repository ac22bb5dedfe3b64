/*
 * @file sampler.rs
 * @brief Analog sampler and reply formatting
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

//! FILE: sampler.rs
//!
//! DESCRIPTION:
//! Analog sampler and reply formatting.
//!
//! BRIEF:
//! Starts single conversions on command and turns finished readings into
//! `:P01<digits>\n` reply frames. The ADC interrupt only posts the raw value
//! into a [`ConversionSlot`]; formatting and transmission happen in the main loop.

use crate::config::{FRAME_END, REPLY_CAP, REPLY_PREFIX};
use crate::error::Error;
use crate::transport::SerialTx;
use core::cell::Cell;
use core::fmt::Write as _;
use critical_section::Mutex;
use embedded_hal_nb::serial::Write;
use heapless::String;

/// An analog converter that can start one asynchronous conversion.
pub trait Converter {
    /// Starts a single conversion and returns immediately.
    fn start(&mut self);
}

/// Reply frame text.
pub type Reply = String<REPLY_CAP>;

/// Renders a reading as `:P01<digits>\n`.
///
/// # Details
/// Decimal, no padding, no leading zeros.
///
/// # Arguments
/// * `raw` - Converter reading
///
/// # Returns
/// * `Result<Reply, Error<E>>` - The reply text
pub fn format_reply<E>(raw: u16) -> Result<Reply, Error<E>> {
    let mut reply = Reply::new();
    write!(reply, "{REPLY_PREFIX}{raw}").map_err(|_| Error::ReplyOverflow)?;
    reply
        .push(char::from(FRAME_END))
        .map_err(|_| Error::ReplyOverflow)?;
    Ok(reply)
}

/// Rescales a reading from `native_bits` to `target_bits` of resolution.
///
/// # Details
/// Drops low-order bits when narrowing and shifts left when widening.
pub const fn to_resolution(raw: u16, native_bits: u32, target_bits: u32) -> u16 {
    if native_bits >= target_bits {
        raw >> (native_bits - target_bits)
    } else {
        raw << (target_bits - native_bits)
    }
}

/// Drives one converter on behalf of the command protocol.
///
/// # Fields
/// * `converter` - The ADC front end
/// * `in_flight` - A conversion was started and has not been reported yet
pub struct Sampler<C> {
    converter: C,
    in_flight: bool,
}

impl<C: Converter> Sampler<C> {
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            in_flight: false,
        }
    }

    /// Starts a conversion; the result arrives through the completion path.
    pub fn trigger(&mut self) {
        self.converter.start();
        self.in_flight = true;
    }

    /// Transmits the reply for a finished conversion.
    ///
    /// # Arguments
    /// * `raw` - Reading at wire resolution
    /// * `tx` - Blocking transmitter for the reply
    ///
    /// # Returns
    /// * `Result<(), Error<W::Error>>` - Transmit outcome
    pub fn complete<W: Write<u8>>(
        &mut self,
        raw: u16,
        tx: &mut SerialTx<W>,
    ) -> Result<(), Error<W::Error>> {
        self.in_flight = false;
        let reply = format_reply(raw)?;
        tx.write_text(reply.as_bytes())
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }
}

/// Single-entry mailbox the conversion interrupt posts readings into.
pub struct ConversionSlot {
    value: Mutex<Cell<Option<u16>>>,
}

impl ConversionSlot {
    pub const fn new() -> Self {
        Self {
            value: Mutex::new(Cell::new(None)),
        }
    }

    /// Stores a finished reading, replacing any unread one.
    pub fn post(&self, raw: u16) {
        critical_section::with(|cs| self.value.borrow(cs).set(Some(raw)));
    }

    /// Returns and clears the pending reading.
    pub fn take(&self) -> Option<u16> {
        critical_section::with(|cs| self.value.borrow(cs).take())
    }
}

impl Default for ConversionSlot {
    fn default() -> Self {
        Self::new()
    }
}
