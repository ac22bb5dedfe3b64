/*
 * @file types.rs
 * @brief Board peripheral type aliases
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

//! Concrete peripheral types for the RP2350 board wiring.

use crate::hal;
use hal::gpio::bank0::{Gpio0, Gpio1, Gpio26};
use hal::gpio::{FunctionNull, FunctionUart, Pin, PullDown};
use hal::uart::{Enabled, UartPeripheral};
use uart_adc_pot::transport::SerialTx;

/// UART0 TX on GPIO0, RX on GPIO1.
pub type AppUartPins = (
    Pin<Gpio0, FunctionUart, PullDown>,
    Pin<Gpio1, FunctionUart, PullDown>,
);

pub type AppUart = UartPeripheral<Enabled, hal::pac::UART0, AppUartPins>;

pub type AppTx = SerialTx<AppUart>;

/// Potentiometer wiper on GPIO26 (ADC channel 0).
pub type PotPin = hal::adc::AdcPin<Pin<Gpio26, FunctionNull, PullDown>>;
