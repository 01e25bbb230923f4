//! PCF8563 bring-up firmware
//! ========================================
//! needs to be run in WSL2 terminal
//! source ~/export-esp.sh
//! cargo run --release --features firmware --bin pcf8563_demo
//! ========================================
//!
//! Probes the RTC, seeds it when the time is unreliable, then prints the
//! time once a second and blinks CLKOUT at 1 Hz.
//!
//! Optional build-time seed (same layout as C's __DATE__/__TIME__):
//! PCF8563_BUILD_DATE="Apr  1 2019" PCF8563_BUILD_TIME="12:33:59"

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

// Define the application description, which is placed in a special section of the binary.
// This is used by the bootloader to verify the application.
// The macro automatically fills in the fields.
esp_bootloader_esp_idf::esp_app_desc!();

use esp_backtrace as _;

// ESP-HAL imports
use esp_hal::{
    delay::Delay,
    i2c::master::{Config as I2cConfig, I2c},
    main,
    time::Rate,
    Config,
};

// Println macro
use esp_println::println;

use pcf8563_rtc::{CalendarDate, ClkoutFrequency, Pcf8563, TimeFormat};

// Fallback seed when no build stamp is provided.
const DEFAULT_SEED: CalendarDate = CalendarDate::new(2019, 4, 1, 12, 33, 59);

fn build_seed() -> Option<CalendarDate> {
    let date = option_env!("PCF8563_BUILD_DATE")?;
    let time = option_env!("PCF8563_BUILD_TIME")?;
    CalendarDate::from_build_strings(date, time)
}

fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}

#[main]
fn main() -> ! {
    // Initialize peripherals
    let peripherals = esp_hal::init(Config::default());
    let delay = Delay::new();

    // RTC shares the touch/IMU I2C bus on the Waveshare 1.43" board (SDA 47, SCL 48)
    let cfg = I2cConfig::default().with_frequency(Rate::from_khz(400));
    let i2c = match I2c::new(peripherals.I2C0, cfg) {
        Ok(i2c) => i2c.with_sda(peripherals.GPIO47).with_scl(peripherals.GPIO48),
        Err(e) => {
            println!("[RTC] I2C init failed: {:?}", e);
            halt();
        }
    };

    let mut rtc = Pcf8563::new(i2c);

    if let Err(e) = rtc.probe() {
        println!("[RTC] no ACK at 0x{:02X}: {:?}", pcf8563_rtc::DEFAULT_I2C_ADDR, e);
        halt();
    }

    match rtc.is_valid() {
        Ok(true) => {
            // Keep the chip time, but never let it lag behind the build stamp
            if let Some(seed) = build_seed() {
                match rtc.set_if_behind(&seed) {
                    Ok(true) => println!("[RTC] advanced to build time"),
                    Ok(false) => {}
                    Err(e) => println!("[RTC] build time check failed: {:?}", e),
                }
            }
        }
        Ok(false) => {
            let seed = build_seed().unwrap_or(DEFAULT_SEED);
            println!("[RTC] VL=1, seeding {}", seed.format(TimeFormat::Full));
            if let Err(e) = rtc.set_datetime(&seed) {
                println!("[RTC] seed failed: {:?}", e);
            }
        }
        Err(e) => println!("[RTC] validity read failed: {:?}", e),
    }

    if let Err(e) = rtc.enable_clkout(ClkoutFrequency::Hz1) {
        println!("[RTC] CLKOUT enable failed: {:?}", e);
    }

    loop {
        match rtc.read_datetime() {
            Ok((dt, vl)) => println!(
                "[RTC] {} weekday={} unix={} vl={}",
                dt.format(TimeFormat::Full),
                dt.weekday(),
                dt.to_unix(),
                vl
            ),
            Err(e) => println!("[RTC] read failed: {:?}", e),
        }
        delay.delay_millis(1000);
    }
}
