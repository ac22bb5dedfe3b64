/*
 * @file irq.rs
 * @brief UART and ADC interrupt handlers
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

use crate::globals;
use crate::hal;
use crate::hal::pac::interrupt;
use crate::hardware::adc_regs;
use uart_adc_pot::config::{ADC_NATIVE_BITS, REPLY_RESOLUTION_BITS};
use uart_adc_pot::sampler::to_resolution;

/// UART0 interrupt handler that moves received bytes into the transport.
///
/// # Safety
/// Must be registered exactly once by the startup code.
#[interrupt]
unsafe fn UART0_IRQ() {
    let uart = uart_regs();
    drain_fifo(uart);
    clear_interrupts(uart);
}

/// ADC FIFO interrupt handler that posts the finished conversion.
///
/// # Details
/// Only reads and scales the sample; the reply is sent from the main loop.
#[interrupt]
fn ADC_IRQ_FIFO() {
    let adc = adc_regs();
    while adc.fcs().read().level().bits() > 0 {
        let raw = adc.fifo().read().val().bits();
        globals::CONVERSION.post(to_resolution(raw, ADC_NATIVE_BITS, REPLY_RESOLUTION_BITS));
    }
}

/// Unmasks the UART0 and ADC interrupts in the NVIC.
pub fn enable_interrupts() {
    unsafe {
        cortex_m::peripheral::NVIC::unmask(hal::pac::Interrupt::UART0_IRQ);
        cortex_m::peripheral::NVIC::unmask(hal::pac::Interrupt::ADC_IRQ_FIFO);
    }
}

/// Moves pending RX bytes into the shared transport.
///
/// # Details
/// A full ring buffer drops its oldest byte; the main loop reports it.
///
/// # Parameters
/// * `uart` - Pointer to the UART register block.
fn drain_fifo(uart: &hal::pac::uart0::RegisterBlock) {
    while uart.uartfr().read().rxfe().bit_is_clear() {
        let byte = uart.uartdr().read().data().bits();
        globals::TRANSPORT.on_receive(byte);
    }
}

/// Clears the interrupt status bits that triggered this handler.
fn clear_interrupts(uart: &hal::pac::uart0::RegisterBlock) {
    uart.uarticr().write(|w| {
        w.rxic().bit(true);
        w.rtic().bit(true);
        w
    });
}

/// Returns a shared reference to the UART0 register block.
fn uart_regs() -> &'static hal::pac::uart0::RegisterBlock {
    unsafe { &*hal::pac::UART0::ptr() }
}
