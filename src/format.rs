//! Fixed text layouts for a `CalendarDate`.
//!
//! Fields are plain decimal without zero padding, so 2019-04-01 12:33:59 renders
//! as `2019-4-1/12:33:59` in the `Full` layout.

use core::fmt::Write;
use heapless::String;

use crate::calendar::CalendarDate;

/// Longest layout is `Full`: "2099-12-31/23:59:59" (19 chars).
pub const FORMAT_CAPACITY: usize = 32;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TimeFormat {
    #[default]
    HourMinute, // h:m
    HourMinuteSecond, // h:m:s
    YearMonthDay,     // Y-M-D
    MonthDayYear,     // M-D-Y
    DayMonthYear,     // D-M-Y
    Full,             // Y-M-D/h:m:s
}

impl TimeFormat {
    pub const ALL: [TimeFormat; 6] = [
        TimeFormat::HourMinute,
        TimeFormat::HourMinuteSecond,
        TimeFormat::YearMonthDay,
        TimeFormat::MonthDayYear,
        TimeFormat::DayMonthYear,
        TimeFormat::Full,
    ];

    pub fn as_u8(self) -> u8 {
        match self {
            TimeFormat::HourMinute => 0,
            TimeFormat::HourMinuteSecond => 1,
            TimeFormat::YearMonthDay => 2,
            TimeFormat::MonthDayYear => 3,
            TimeFormat::DayMonthYear => 4,
            TimeFormat::Full => 5,
        }
    }

    // Unknown selectors fall back to hour:minute
    pub fn from_u8(n: u8) -> Self {
        match n {
            1 => TimeFormat::HourMinuteSecond,
            2 => TimeFormat::YearMonthDay,
            3 => TimeFormat::MonthDayYear,
            4 => TimeFormat::DayMonthYear,
            5 => TimeFormat::Full,
            _ => TimeFormat::HourMinute,
        }
    }
}

impl CalendarDate {
    pub fn format(&self, style: TimeFormat) -> String<FORMAT_CAPACITY> {
        let mut out = String::new();
        let t = self;
        // Cannot overflow: every layout fits in FORMAT_CAPACITY for u16/u8 fields.
        let _ = match style {
            TimeFormat::HourMinute => write!(out, "{}:{}", t.hour, t.minute),
            TimeFormat::HourMinuteSecond => {
                write!(out, "{}:{}:{}", t.hour, t.minute, t.second)
            }
            TimeFormat::YearMonthDay => write!(out, "{}-{}-{}", t.year, t.month, t.day),
            TimeFormat::MonthDayYear => write!(out, "{}-{}-{}", t.month, t.day, t.year),
            TimeFormat::DayMonthYear => write!(out, "{}-{}-{}", t.day, t.month, t.year),
            TimeFormat::Full => write!(
                out,
                "{}-{}-{}/{}:{}:{}",
                t.year, t.month, t.day, t.hour, t.minute, t.second
            ),
        };
        out
    }
}
