//! Host wall-clock access used to synchronise the PCF8563 with the system it sits in.
//!
//! `HostClock` is all that is needed to copy host time into the chip. Copying chip
//! time back into the host needs `SystemClock`, which only platforms that can set
//! their own clock implement; without it, `Pcf8563::sync_to_system` is unavailable.

use crate::calendar::CalendarDate;

/// Upper bound (exclusive) of a believable UTC epoch: 2100-01-01T00:00:00Z.
pub const MAX_SANE_EPOCH: i64 = 4_102_444_800;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TimeZone {
    #[default]
    Local,
    Utc,
}

pub trait HostClock {
    /// Seconds since 1970-01-01T00:00:00Z as the host currently believes it.
    fn utc_timestamp(&self) -> i64;

    /// Current local wall-clock time.
    fn local_now(&self) -> CalendarDate;
}

pub trait SystemClock: HostClock {
    type Error: core::fmt::Debug;

    /// Sets the host wall clock from a local calendar time.
    fn set_local(&mut self, date: &CalendarDate) -> Result<(), Self::Error>;
}

// Epoch 0 or anything past 2099 means the host never got a real time.
pub(crate) fn epoch_is_sane(ts: i64) -> bool {
    ts > 0 && ts < MAX_SANE_EPOCH
}

#[cfg(feature = "std")]
pub use self::chrono_clock::ChronoClock;

#[cfg(feature = "std")]
mod chrono_clock {
    use chrono::{Datelike, Local, Timelike, Utc};

    use super::HostClock;
    use crate::calendar::CalendarDate;

    /// Host clock backed by `chrono`. Read-only: it does not implement `SystemClock`.
    #[derive(Copy, Clone, Debug, Default)]
    pub struct ChronoClock;

    impl HostClock for ChronoClock {
        fn utc_timestamp(&self) -> i64 {
            Utc::now().timestamp()
        }

        fn local_now(&self) -> CalendarDate {
            let now = Local::now();
            CalendarDate::new(
                now.year().clamp(0, u16::MAX as i32) as u16,
                now.month() as u8,
                now.day() as u8,
                now.hour() as u8,
                now.minute() as u8,
                now.second().min(59) as u8,
            )
        }
    }
}
