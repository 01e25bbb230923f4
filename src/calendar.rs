// Calendar value type stored in the PCF8563 time registers, plus the date arithmetic around it.

use crate::bcd::{bcd_to_dec, dec_to_bcd};
use crate::registers::{
    CENTURY, DAYS_MASK, HOURS_MASK, MINUTES_MASK, MONTHS_MASK, SECONDS_MASK, VOLTAGE_LOW,
};

#[derive(Copy, Clone, Debug, Default)]
pub struct CalendarDate {
    pub year: u16,  // full year, 1900..=2099
    pub month: u8,  // 1-12
    pub day: u8,    // 1-31
    pub hour: u8,   // 0-23
    pub minute: u8, // 0-59
    pub second: u8, // 0-59
}

// Seconds are left out so a value read back a moment after writing still compares equal.
impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year
            && self.month == other.month
            && self.day == other.day
            && self.hour == other.hour
            && self.minute == other.minute
    }
}

impl Eq for CalendarDate {}

impl CalendarDate {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Day of the week, 0 = Sunday .. 6 = Saturday.
    pub fn weekday(&self) -> u8 {
        day_of_week(self.day as u32, self.month as u32, self.year as u32) as u8
    }

    /// Basic range check on every field, including the chip's 1900..=2099 year window.
    pub fn is_plausible(&self) -> bool {
        (1900..=2099).contains(&self.year)
            && (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Packs the date into registers 0x02..=0x08: seconds, minutes, hours, days,
    /// weekdays, century|months, years. The VL flag is written cleared.
    pub(crate) fn to_registers(&self) -> [u8; 7] {
        let mut month = dec_to_bcd(self.month);
        if self.year < 2000 {
            month |= CENTURY;
        } else {
            month &= !CENTURY;
        }
        [
            dec_to_bcd(self.second) & !VOLTAGE_LOW,
            dec_to_bcd(self.minute),
            dec_to_bcd(self.hour),
            dec_to_bcd(self.day),
            self.weekday(),
            month,
            dec_to_bcd((self.year % 100) as u8),
        ]
    }

    // Returns (date, vl_flag) where vl_flag == true means the oscillator lost power.
    pub(crate) fn from_registers(buf: &[u8; 7]) -> (Self, bool) {
        let vl = (buf[0] & VOLTAGE_LOW) != 0;
        let month_raw = buf[5];
        let year = if (month_raw & CENTURY) != 0 {
            1900u16 + bcd_to_dec(buf[6]) as u16
        } else {
            2000u16 + bcd_to_dec(buf[6]) as u16
        };
        (
            Self {
                year,
                month: bcd_to_dec(month_raw & MONTHS_MASK),
                day: bcd_to_dec(buf[3] & DAYS_MASK),
                hour: bcd_to_dec(buf[2] & HOURS_MASK),
                minute: bcd_to_dec(buf[1] & MINUTES_MASK),
                second: bcd_to_dec(buf[0] & SECONDS_MASK),
            },
            vl,
        )
    }

    // True when this date's calendar day comes strictly before `other`'s.
    pub(crate) fn day_before(&self, other: &Self) -> bool {
        (self.year, self.month, self.day) < (other.year, other.month, other.day)
    }

    /// Parses compiler-style build stamps: `date` like `"Dec 26 2009"` (day may be
    /// space padded, `"Apr  1 2019"`) and `time` like `"12:34:56"`.
    pub fn from_build_strings(date: &str, time: &str) -> Option<Self> {
        let mut parts = date.split_whitespace();
        let month = month_from_abbrev(parts.next()?)?;
        let day: u8 = parts.next()?.parse().ok()?;
        let year: u16 = parts.next()?.parse().ok()?;

        let mut hms = time.split(':');
        let hour: u8 = hms.next()?.trim().parse().ok()?;
        let minute: u8 = hms.next()?.trim().parse().ok()?;
        let second: u8 = hms.next()?.trim().parse().ok()?;

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.is_plausible().then_some(dt)
    }

    /// Seconds since 1970-01-01, saturating at `u32::MAX`.
    pub fn to_unix(&self) -> u32 {
        let days = days_since_unix(self.year, self.month, self.day) as u64;
        let secs = days
            .saturating_mul(86_400)
            .saturating_add((self.hour as u64) * 3600)
            .saturating_add((self.minute as u64) * 60)
            .saturating_add(self.second as u64);
        secs.min(u32::MAX as u64) as u32
    }

    /// Converts seconds since 1970-01-01 back to a calendar date (valid until 2099).
    pub fn from_unix(mut ts: u32) -> Self {
        let days = ts / 86400;
        ts %= 86400;
        let hour = (ts / 3600) as u8;
        ts %= 3600;
        let minute = (ts / 60) as u8;
        let second = (ts % 60) as u8;

        let z = days as i32 + 719_468; // days from 0000-03-01 to 1970-01-01
        let era = z / 146_097; // days in 400 years; z is never negative here
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let y = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153; // March = 0
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = mp + if mp < 10 { 3 } else { -9 };
        let year = y + if month <= 2 { 1 } else { 0 };

        Self {
            year: year as u16,
            month: month as u8,
            day: day as u8,
            hour,
            minute,
            second,
        }
    }
}

/// Weekday index 0..=6 (0 = Sunday) for a Gregorian date.
pub fn day_of_week(day: u32, mut month: u32, mut year: u32) -> u32 {
    if month < 3 {
        month += 12;
        year -= 1;
    }

    let mut val =
        (day + ((month + 1) * 26) / 10 + year + year / 4 + 6 * (year / 100) + year / 400) % 7;
    if val == 0 {
        val = 7;
    }

    val - 1
}

// Days since 1970-01-01 (handles leap years through 2099).
fn days_since_unix(year: u16, month: u8, day: u8) -> u32 {
    let y = year as i32;
    let m = month as i32;
    let d = day as i32;
    let (y1, m1) = if m <= 2 { (y - 1, m + 12) } else { (y, m) };
    let era = y1 / 400;
    let yoe = y1 - era * 400; // year of era
    let doy = 153 * (m1 + 1) / 5 + d - 123; // days since March 1
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    (era * 146_097 + doe - 719_468).max(0) as u32
}

fn month_from_abbrev(s: &str) -> Option<u8> {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(s))
        .map(|i| i as u8 + 1)
}
