/*
 * @file config.rs
 * @brief Compile-time configuration constants
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

//! Compile-time configuration for the potentiometer reader.

pub const XTAL_FREQ_HZ: u32 = 12_000_000;
pub const UART_BAUD: u32 = 9_600;
pub const RING_CAPACITY: usize = 16;
pub const DRAIN_CHUNK: usize = 4;

pub const FRAME_START: u8 = b':';
pub const FRAME_END: u8 = b'\n';
pub const FRAME_BUF_LEN: usize = 10;
pub const COMMAND_FRAME: &[u8] = b":P01\n";
pub const REPLY_PREFIX: &str = ":P01";

/// Longest reply: prefix, five digits of a `u16`, terminator.
pub const REPLY_CAP: usize = 12;

pub const ADC_CHANNEL: u8 = 0;
pub const ADC_NATIVE_BITS: u32 = 12;
pub const REPLY_RESOLUTION_BITS: u32 = 10;

pub const READY_MSG: &[u8] = b"\r\n[MCU] Potentiometer reader ready\r\n";
