/*
 * @file frame.rs
 * @brief Command frame reader state machine
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

//! FILE: frame.rs
//!
//! DESCRIPTION:
//! Command frame reader.
//!
//! BRIEF:
//! Assembles the fixed `:P01\n` command one byte at a time.
//! Any unexpected byte clears the frame and drops back to waiting for `:`.
//! The mismatching byte is discarded, never reconsidered as a new start.

use crate::config::{COMMAND_FRAME, FRAME_BUF_LEN, FRAME_END, FRAME_START};

/// Position of the reader inside the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameState {
    AwaitingStart,
    ExpectP,
    Expect0,
    Expect1,
    ExpectTerminator,
    Analyzing,
}

impl FrameState {
    /// Byte that moves the reader out of this state, if any.
    fn expected(self) -> Option<u8> {
        match self {
            FrameState::AwaitingStart => Some(FRAME_START),
            FrameState::ExpectP => Some(b'P'),
            FrameState::Expect0 => Some(b'0'),
            FrameState::Expect1 => Some(b'1'),
            FrameState::ExpectTerminator => Some(FRAME_END),
            FrameState::Analyzing => None,
        }
    }

    fn next(self) -> FrameState {
        match self {
            FrameState::AwaitingStart => FrameState::ExpectP,
            FrameState::ExpectP => FrameState::Expect0,
            FrameState::Expect0 => FrameState::Expect1,
            FrameState::Expect1 => FrameState::ExpectTerminator,
            FrameState::ExpectTerminator | FrameState::Analyzing => FrameState::Analyzing,
        }
    }
}

/// Result of feeding one byte.
///
/// # Variants
/// * `Pending` - Byte accepted, frame still incomplete
/// * `Rejected` - Byte did not fit; the frame was discarded
/// * `Complete` - A full frame is waiting; call [`FrameReader::analyze`] now
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    Pending,
    Rejected,
    Complete,
}

/// Commands recognized on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `:P01\n`, sample the potentiometer on channel 0.
    ReadPotentiometer,
}

/// Byte-at-a-time state machine for the command frame.
///
/// # Fields
/// * `state` - Current automaton state
/// * `buf` - Assembled frame bytes, zero-filled past `cursor`
/// * `cursor` - Next write position in `buf`
pub struct FrameReader {
    state: FrameState,
    buf: [u8; FRAME_BUF_LEN],
    cursor: usize,
}

impl FrameReader {
    pub const fn new() -> Self {
        Self {
            state: FrameState::AwaitingStart,
            buf: [0; FRAME_BUF_LEN],
            cursor: 0,
        }
    }

    /// Advances the automaton with one received byte.
    ///
    /// # Details
    /// While a finished frame is pending analysis the byte is dropped and
    /// `Complete` is reported again.
    ///
    /// # Arguments
    /// * `byte` - Next byte from the transport
    ///
    /// # Returns
    /// * `Feed` - What the byte did to the frame
    pub fn feed(&mut self, byte: u8) -> Feed {
        let Some(expected) = self.state.expected() else {
            return Feed::Complete;
        };
        if byte != expected {
            self.reset();
            return Feed::Rejected;
        }
        if self.state == FrameState::AwaitingStart {
            self.cursor = 0;
        }
        self.buf[self.cursor] = byte;
        self.cursor += 1;
        self.state = self.state.next();
        if self.state == FrameState::Analyzing {
            Feed::Complete
        } else {
            Feed::Pending
        }
    }

    /// Checks the completed frame and returns to `AwaitingStart`.
    ///
    /// # Details
    /// Outside `Analyzing` this only discards whatever was assembled.
    ///
    /// # Returns
    /// * `Option<Command>` - The recognized command, if the frame matched
    pub fn analyze(&mut self) -> Option<Command> {
        let command = (self.state == FrameState::Analyzing && self.assembled() == COMMAND_FRAME)
            .then_some(Command::ReadPotentiometer);
        self.reset();
        command
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Bytes of the frame assembled so far.
    pub fn assembled(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    pub fn is_idle(&self) -> bool {
        self.state == FrameState::AwaitingStart && self.buf.iter().all(|&b| b == 0)
    }

    fn reset(&mut self) {
        self.buf.fill(0);
        self.cursor = 0;
        self.state = FrameState::AwaitingStart;
    }
}

impl Default for FrameReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(reader: &mut FrameReader, bytes: &[u8]) -> Vec<Feed> {
        bytes.iter().map(|&b| reader.feed(b)).collect()
    }

    #[test]
    fn test_new_reader_is_idle() {
        let reader = FrameReader::new();
        assert_eq!(reader.state(), FrameState::AwaitingStart);
        assert!(reader.is_idle());
        assert!(reader.assembled().is_empty());
    }

    #[test]
    fn test_walks_every_state() {
        let mut reader = FrameReader::new();
        let expected = [
            FrameState::ExpectP,
            FrameState::Expect0,
            FrameState::Expect1,
            FrameState::ExpectTerminator,
            FrameState::Analyzing,
        ];
        for (&byte, state) in COMMAND_FRAME.iter().zip(expected) {
            reader.feed(byte);
            assert_eq!(reader.state(), state);
        }
    }

    #[test]
    fn test_valid_frame_yields_command() {
        let mut reader = FrameReader::new();
        let feeds = feed_all(&mut reader, b":P01\n");
        assert_eq!(
            feeds,
            [Feed::Pending, Feed::Pending, Feed::Pending, Feed::Pending, Feed::Complete]
        );
        assert_eq!(reader.assembled(), b":P01\n");
        assert_eq!(reader.analyze(), Some(Command::ReadPotentiometer));
        assert!(reader.is_idle());
    }

    #[test]
    fn test_wrong_digit_resets() {
        let mut reader = FrameReader::new();
        let feeds = feed_all(&mut reader, b":P02");
        assert_eq!(feeds[3], Feed::Rejected);
        assert!(reader.is_idle());
        assert_eq!(reader.feed(b'\n'), Feed::Rejected);
        assert!(reader.is_idle());
    }

    #[test]
    fn test_bad_terminator_then_retry() {
        let mut reader = FrameReader::new();
        let feeds = feed_all(&mut reader, b":P01X");
        assert_eq!(feeds[4], Feed::Rejected);
        assert!(reader.is_idle());
        let feeds = feed_all(&mut reader, b":P01\n");
        assert_eq!(feeds[4], Feed::Complete);
        assert_eq!(reader.analyze(), Some(Command::ReadPotentiometer));
    }

    #[test]
    fn test_mismatching_start_byte_is_not_reused() {
        let mut reader = FrameReader::new();
        feed_all(&mut reader, b":P");
        assert_eq!(reader.feed(b':'), Feed::Rejected);
        assert_eq!(reader.state(), FrameState::AwaitingStart);
        assert_eq!(reader.feed(b'P'), Feed::Rejected);
    }

    #[test]
    fn test_noise_before_start_is_ignored() {
        let mut reader = FrameReader::new();
        feed_all(&mut reader, b"xyz\n\0");
        assert!(reader.is_idle());
        let feeds = feed_all(&mut reader, b":P01\n");
        assert_eq!(feeds.last(), Some(&Feed::Complete));
    }

    #[test]
    fn test_byte_during_analysis_is_dropped() {
        let mut reader = FrameReader::new();
        feed_all(&mut reader, b":P01\n");
        assert_eq!(reader.feed(b':'), Feed::Complete);
        assert_eq!(reader.assembled(), b":P01\n");
        assert_eq!(reader.analyze(), Some(Command::ReadPotentiometer));
        assert_eq!(reader.state(), FrameState::AwaitingStart);
    }

    #[test]
    fn test_analyze_without_frame_clears() {
        let mut reader = FrameReader::new();
        feed_all(&mut reader, b":P0");
        assert_eq!(reader.analyze(), None);
        assert!(reader.is_idle());
    }

    #[test]
    fn test_lowercase_p_rejected() {
        let mut reader = FrameReader::new();
        let feeds = feed_all(&mut reader, b":p01\n");
        assert_eq!(feeds[1], Feed::Rejected);
        assert!(reader.is_idle());
    }
}
