//! Firmware for the Pops macro board: a Seeed XIAO RP2040 with five switches
//! and an SSD1306 on I2C, enumerating as a USB NKRO keyboard.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt_rtt as _;
use embedded_alloc::Heap;
use embedded_hal::{blocking::delay::DelayMs, timer::CountDown};
use fugit::ExtU32;
use panic_probe as _;
use popspad::{
    activity,
    config::{self, CHANNELS},
    hid::{PendingReport, ReportSink},
    pad::MacroPad,
};
use ssd1306::{prelude::*, I2CDisplayInterface, Ssd1306};
use usb_device::{class_prelude::UsbBusAllocator, prelude::*};
use usbd_human_interface_device::{
    device::keyboard::NKROBootKeyboardConfig, page::Keyboard, prelude::*,
};

use rp_pico as bsp;

use bsp::{
    hal::{
        clocks::{init_clocks_and_plls, Clock},
        gpio::{DynPin, FunctionI2C},
        rom_data::reset_to_usb_boot,
        sio::Sio,
        usb::UsbBus,
        watchdog::Watchdog,
        Timer, I2C,
    },
    pac::Peripherals,
    Pins,
};

#[global_allocator]
static HEAP: Heap = Heap::empty();

/// Blocks for the requested time while `service` keeps the USB stack alive.
struct ServicedDelay<'t, S>
where
    S: FnMut(),
{
    timer: &'t Timer,
    service: S,
}

impl<'t, S> DelayMs<u32> for ServicedDelay<'t, S>
where
    S: FnMut(),
{
    fn delay_ms(&mut self, ms: u32) {
        let mut count_down = self.timer.count_down();
        count_down.start(ms.millis());
        while count_down.wait().is_err() {
            (self.service)();
        }
    }
}

fn halt() -> ! {
    loop {
        cortex_m::asm::nop();
    }
}

#[bsp::entry]
fn main() -> ! {
    {
        use core::mem::MaybeUninit;
        static mut HEAP_MEM: [MaybeUninit<u8>; config::HEAP_SIZE] =
            [MaybeUninit::uninit(); config::HEAP_SIZE];
        unsafe { HEAP.init(core::ptr::addr_of_mut!(HEAP_MEM) as usize, config::HEAP_SIZE) }
    }

    let Some(mut pac) = Peripherals::take() else {
        halt()
    };
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    let Ok(clocks) = init_clocks_and_plls(
        bsp::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    ) else {
        popspad::error!("clock setup failed");
        halt()
    };

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS);

    let sio = Sio::new(pac.SIO);

    let pins = Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // XIAO pads D3, D7, D8, D9, D10
    let mut switches: [DynPin; CHANNELS] = [
        DynPin::from(pins.voltage_monitor),
        DynPin::from(pins.gpio1),
        DynPin::from(pins.gpio2),
        DynPin::from(pins.gpio4),
        DynPin::from(pins.gpio3),
    ];
    switches.iter_mut().for_each(|p| p.into_pull_up_input());

    // D4 / D5
    let i2c = I2C::i2c1(
        pac.I2C1,
        pins.gpio6.into_mode::<FunctionI2C>(),
        pins.gpio7.into_mode::<FunctionI2C>(),
        config::DISPLAY_BUS_RATE,
        &mut pac.RESETS,
        clocks.system_clock.freq(),
    );
    let interface = I2CDisplayInterface::new_custom_address(i2c, config::DISPLAY_ADDRESS);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        popspad::error!("SSD1306 init failed");
        halt();
    }

    let usb_bus = UsbBusAllocator::new(UsbBus::new(
        pac.USBCTRL_REGS,
        pac.USBCTRL_DPRAM,
        clocks.usb_clock,
        true,
        &mut pac.RESETS,
    ));
    let keyboard = UsbHidClassBuilder::new()
        .add_device(NKROBootKeyboardConfig::default())
        .build(&usb_bus);
    let usb_dev = UsbDeviceBuilder::new(&usb_bus, UsbVidPid(config::USB_VID, config::USB_PID))
        .manufacturer(config::USB_MANUFACTURER)
        .product(config::USB_PRODUCT)
        .serial_number(config::USB_SERIAL)
        .build();

    let link = RefCell::new((usb_dev, keyboard, PendingReport::new()));
    let usb = &link;

    // Reports the endpoint refuses stay pending; the delay below keeps
    // offering them while the pad waits.
    let report = |keys: &[Keyboard]| {
        let mut usb = usb.borrow_mut();
        let (_, keyboard, pending) = &mut *usb;
        pending.replace(keys);
        if pending
            .deliver(|keys| keyboard.device().write_report(keys.iter().copied()))
            .is_err()
        {
            popspad::error!("failed to write keyboard report");
        }
    };

    let mut tick_count_down = timer.count_down();
    tick_count_down.start(1.millis());
    let mut delay = ServicedDelay {
        timer: &timer,
        service: move || {
            let mut usb = usb.borrow_mut();
            let (usb_dev, keyboard, pending) = &mut *usb;

            if tick_count_down.wait().is_ok() {
                match keyboard.tick() {
                    Err(UsbHidError::WouldBlock) => {}
                    Ok(_) => {}
                    Err(_) => {
                        popspad::error!("keyboard tick failed");
                    }
                }
            }

            if usb_dev.poll(&mut [&mut *keyboard]) {
                match keyboard.device().read_report() {
                    Err(UsbError::WouldBlock) => {}
                    Err(_) => {
                        popspad::error!("failed to read keyboard LEDs");
                    }
                    Ok(_leds) => {}
                }
            }

            if pending
                .deliver(|keys| keyboard.device().write_report(keys.iter().copied()))
                .is_err()
            {
                popspad::error!("failed to write keyboard report");
            }
        },
    };

    let mut pad = MacroPad::new(switches, ReportSink::new(report), display);

    if let Ok(raw) = pad.sample() {
        if activity::chord_held(&raw, &config::BOOTLOADER_CHORD) {
            popspad::info!("bootloader chord held, rebooting to USB boot");
            reset_to_usb_boot(0, 0);
        }
    }

    if pad.start().is_err() {
        popspad::warn!("initial draw failed");
    }

    loop {
        if let Err(e) = pad.cycle(&mut delay) {
            popspad::warn!("cycle: {}", e.describe());
        }
    }
}
