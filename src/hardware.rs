/*
 * @file hardware.rs
 * @brief RP2350 clock, UART and ADC bring-up
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

use crate::hal::{self, Clock};
use crate::types::{AppTx, AppUart, AppUartPins, PotPin};
use fugit::RateExtU32;
use hal::gpio::Pins;
use hal::uart::{DataBits, StopBits, UartConfig, UartPeripheral};
use uart_adc_pot::config::{self, ADC_CHANNEL};
use uart_adc_pot::sampler::Converter;
use uart_adc_pot::transport::SerialTx;

/// Aggregates the peripherals needed by the application loop.
pub struct Runtime {
    pub tx: AppTx,
    pub adc: PotAdc,
}

/// ADC front end wired to the potentiometer.
///
/// # Details
/// Holds the HAL handles so the block stays powered and the pin stays in
/// analog mode. Conversions are started and read through raw registers.
pub struct PotAdc {
    _adc: hal::Adc,
    _pin: PotPin,
}

impl Converter for PotAdc {
    fn start(&mut self) {
        adc_regs().cs().modify(|_, w| w.start_once().set_bit());
    }
}

/// Consumes the PAC and constructs the runtime peripherals.
///
/// # Returns
/// A fully initialized [`Runtime`] with UART, ADC, clocks, and watchdog configured.
pub fn build_runtime() -> Runtime {
    let mut pac = take_peripherals();
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);
    let clocks = init_system_clocks(
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    );
    let pins = init_pins(pac.SIO, pac.IO_BANK0, pac.PADS_BANK0, &mut pac.RESETS);
    let uart_pins = (
        pins.gpio0.into_function::<hal::gpio::FunctionUart>(),
        pins.gpio1.into_function::<hal::gpio::FunctionUart>(),
    );
    let uart = configure_uart(pac.UART0, &mut pac.RESETS, &clocks, uart_pins);
    let adc = hal::Adc::new(pac.ADC, &mut pac.RESETS);
    let pin = hal::adc::AdcPin::new(pins.gpio26).unwrap();
    Runtime {
        tx: SerialTx::new(uart),
        adc: configure_adc(adc, pin),
    }
}

/// Takes ownership of the RP235x PAC peripherals.
fn take_peripherals() -> hal::pac::Peripherals {
    hal::pac::Peripherals::take().unwrap()
}

/// Sets up the system clocks from the external crystal.
fn init_system_clocks(
    xosc: hal::pac::XOSC,
    clocks: hal::pac::CLOCKS,
    pll_sys: hal::pac::PLL_SYS,
    pll_usb: hal::pac::PLL_USB,
    resets: &mut hal::pac::RESETS,
    watchdog: &mut hal::Watchdog,
) -> hal::clocks::ClocksManager {
    hal::clocks::init_clocks_and_plls(
        config::XTAL_FREQ_HZ,
        xosc,
        clocks,
        pll_sys,
        pll_usb,
        resets,
        watchdog,
    )
    .unwrap()
}

/// Configures the SIO block and splits the GPIO pins.
fn init_pins(
    sio_device: hal::pac::SIO,
    io: hal::pac::IO_BANK0,
    pads: hal::pac::PADS_BANK0,
    resets: &mut hal::pac::RESETS,
) -> Pins {
    let sio = hal::Sio::new(sio_device);
    Pins::new(io, pads, sio.gpio_bank0, resets)
}

/// Enables UART0 at 9600 8-N-1 with a per-byte receive interrupt.
///
/// # Details
/// The FIFOs stay disabled so every received byte raises `UART0_IRQ`
/// instead of waiting for a watermark or the receive timeout.
///
/// # Parameters
/// * `uart` - Raw UART0 peripheral.
/// * `resets` - Reset controller for enabling the block.
/// * `clocks` - Clock manager that yields the peripheral clock rate.
/// * `pins` - UART TX/RX pin pair already switched into UART function.
///
/// # Returns
/// A fully configured [`AppUart`].
fn configure_uart(
    uart: hal::pac::UART0,
    resets: &mut hal::pac::RESETS,
    clocks: &hal::clocks::ClocksManager,
    pins: AppUartPins,
) -> AppUart {
    let mut uart = UartPeripheral::new(uart, pins, resets)
        .enable(
            UartConfig::new(config::UART_BAUD.Hz(), DataBits::Eight, None, StopBits::One),
            clocks.peripheral_clock.freq(),
        )
        .unwrap();
    uart.set_fifos(false);
    uart.enable_rx_interrupt();
    uart
}

/// Puts the ADC in single-shot mode on the potentiometer channel.
///
/// # Details
/// Results land in the FIFO with a threshold of one sample, which raises
/// `ADC_IRQ_FIFO` as soon as a conversion finishes. The reference is the
/// board's ADC_VREF pin.
///
/// # Parameters
/// * `adc` - Enabled HAL ADC handle.
/// * `pin` - GPIO26 switched to analog input.
///
/// # Returns
/// The [`PotAdc`] converter used by the sampler.
fn configure_adc(adc: hal::Adc, pin: PotPin) -> PotAdc {
    let regs = adc_regs();
    regs.fcs().modify(|_, w| unsafe {
        w.en().set_bit();
        w.thresh().bits(1);
        w.dreq_en().clear_bit()
    });
    regs.inte().modify(|_, w| w.fifo().set_bit());
    regs.cs().modify(|_, w| unsafe {
        w.ainsel().bits(ADC_CHANNEL);
        w.en().set_bit();
        w.start_many().clear_bit()
    });
    PotAdc {
        _adc: adc,
        _pin: pin,
    }
}

/// Returns a shared reference to the ADC register block.
pub fn adc_regs() -> &'static hal::pac::adc::RegisterBlock {
    unsafe { &*hal::pac::ADC::ptr() }
}
