//! Alarm configuration for registers 0x09..=0x0C (minute, hour, day, weekday).
//!
//! Each register carries an active-low enable bit (AE, bit 7). A field with AE set
//! is ignored when the chip compares the alarm against the current time; the alarm
//! fires once every enabled field matches.

use crate::bcd::{bcd_to_dec, dec_to_bcd};
use crate::registers::{ALARM_DISABLE, DAYS_MASK, HOURS_MASK, MINUTES_MASK, WEEKDAY_MASK};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AlarmField {
    #[default]
    Disabled,
    At(u8),
}

impl AlarmField {
    // Out-of-range values are clamped into [min, max] rather than rejected.
    fn encode(self, min: u8, max: u8) -> u8 {
        match self {
            AlarmField::Disabled => ALARM_DISABLE,
            AlarmField::At(v) => dec_to_bcd(v.clamp(min, max)) & !ALARM_DISABLE,
        }
    }

    fn decode(raw: u8, mask: u8) -> Self {
        if raw & ALARM_DISABLE != 0 {
            AlarmField::Disabled
        } else {
            AlarmField::At(bcd_to_dec(raw & mask))
        }
    }

    pub fn value(self) -> Option<u8> {
        match self {
            AlarmField::Disabled => None,
            AlarmField::At(v) => Some(v),
        }
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, AlarmField::At(_))
    }
}

impl From<Option<u8>> for AlarmField {
    fn from(v: Option<u8>) -> Self {
        v.map_or(AlarmField::Disabled, AlarmField::At)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AlarmSpec {
    pub minute: AlarmField,  // 0-59
    pub hour: AlarmField,    // 0-23
    pub day: AlarmField,     // 1-31
    pub weekday: AlarmField, // 0-6
}

impl AlarmSpec {
    /// Every field disabled; the alarm never matches.
    pub const DISABLED: Self = Self::new(
        AlarmField::Disabled,
        AlarmField::Disabled,
        AlarmField::Disabled,
        AlarmField::Disabled,
    );

    pub const fn new(
        minute: AlarmField,
        hour: AlarmField,
        day: AlarmField,
        weekday: AlarmField,
    ) -> Self {
        Self {
            minute,
            hour,
            day,
            weekday,
        }
    }

    pub const fn at_minute(minute: u8) -> Self {
        Self {
            minute: AlarmField::At(minute),
            ..Self::DISABLED
        }
    }

    pub const fn at_hour(hour: u8) -> Self {
        Self {
            hour: AlarmField::At(hour),
            ..Self::DISABLED
        }
    }

    pub const fn at_day(day: u8) -> Self {
        Self {
            day: AlarmField::At(day),
            ..Self::DISABLED
        }
    }

    pub const fn at_weekday(weekday: u8) -> Self {
        Self {
            weekday: AlarmField::At(weekday),
            ..Self::DISABLED
        }
    }

    pub(crate) fn to_registers(&self) -> [u8; 4] {
        [
            self.minute.encode(0, 59),
            self.hour.encode(0, 23),
            self.day.encode(1, 31),
            self.weekday.encode(0, 6),
        ]
    }

    pub(crate) fn from_registers(buf: &[u8; 4]) -> Self {
        Self {
            minute: AlarmField::decode(buf[0], MINUTES_MASK),
            hour: AlarmField::decode(buf[1], HOURS_MASK),
            day: AlarmField::decode(buf[2], DAYS_MASK),
            weekday: AlarmField::decode(buf[3], WEEKDAY_MASK),
        }
    }
}
