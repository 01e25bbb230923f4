#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod alarm;
pub mod bcd;
pub mod calendar;
pub mod error;
pub mod format;
pub mod host;
pub mod pcf8563;
pub mod registers;
pub mod timer;

pub use alarm::{AlarmField, AlarmSpec};
pub use calendar::{day_of_week, CalendarDate};
pub use error::Error;
pub use format::TimeFormat;
pub use host::{HostClock, SystemClock, TimeZone};
pub use pcf8563::Pcf8563;
pub use registers::DEFAULT_I2C_ADDR;
pub use timer::{ClkoutFrequency, InvalidFrequency, TimerFrequency, TimerSpec};

#[cfg(feature = "std")]
pub use host::ChronoClock;
