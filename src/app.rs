/*
 * @file app.rs
 * @brief Main loop command processing
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
use crate::hardware::{PotAdc, Runtime};
use crate::types::AppTx;
use core::hint::spin_loop;
use defmt::{Debug2Format, debug, error, info, warn};
use uart_adc_pot::config::{DRAIN_CHUNK, READY_MSG};
use uart_adc_pot::pipeline::Pipeline;

/// Sends the ready banner so the host knows the MCU is alive.
///
/// # Parameters
/// * `tx` - The transmitter used to send the message.
pub fn send_ready(tx: &mut AppTx) {
    if let Err(err) = tx.write_all(READY_MSG) {
        error!("ready banner failed: {}", Debug2Format(&err));
    }
}

/// Runs the infinite command processing loop.
///
/// # Parameters
/// * `runtime` - Peripherals handed over after bring-up.
///
/// # Returns
/// `!` because bare-metal firmware never exits.
pub fn run(runtime: Runtime) -> ! {
    let Runtime { mut tx, adc } = runtime;
    let mut pipeline = Pipeline::new(adc);
    let mut scratch = [0u8; DRAIN_CHUNK];
    loop {
        process_bytes(&mut pipeline, &mut scratch);
        report_reading(&mut pipeline, &mut tx);
        report_overrun();
        spin_loop();
    }
}

/// Pulls bytes from the shared transport and starts requested conversions.
fn process_bytes(pipeline: &mut Pipeline<PotAdc>, scratch: &mut [u8]) {
    let started = pipeline.poll(&globals::TRANSPORT, scratch);
    if started > 0 {
        info!("command :P01 received, {=usize} conversion(s) started", started);
    }
}

/// Replies with the reading posted by the ADC interrupt, if any.
fn report_reading(pipeline: &mut Pipeline<PotAdc>, tx: &mut AppTx) {
    match pipeline.deliver(&globals::CONVERSION, tx) {
        Ok(Some(raw)) => debug!("reported reading {=u16}", raw),
        Ok(None) => {}
        Err(err) => error!("reply transmit failed: {}", Debug2Format(&err)),
    }
}

/// Emits a log warning if the receive buffer overflowed.
fn report_overrun() {
    if globals::TRANSPORT.take_overrun() {
        warn!("RX buffer was full, dropped oldest bytes");
    }
}
