/*
 * @file lib.rs
 * @brief UART ADC potentiometer reader library root
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

//! Interrupt-driven serial command pipeline for a potentiometer reader.
//!
//! The UART receive interrupt pushes bytes into a [`transport::SerialTransport`],
//! the main loop drains them through a [`pipeline::Pipeline`] that recognizes the
//! `:P01\n` command frame and starts an analog conversion, and the finished
//! reading goes back out as `:P01<value>\n`.
//!
//! Everything here is hardware independent; the firmware binary supplies the
//! UART writer and the ADC [`sampler::Converter`].

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod ring_buffer;
pub mod sampler;
pub mod transport;

pub use error::Error;
