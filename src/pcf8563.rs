// RTC driver for the NXP PCF8563 real-time clock.
// Datasheet: https://www.nxp.com/docs/en/data-sheet/PCF8563.pdf

use embedded_hal::i2c::I2c;

use crate::alarm::AlarmSpec;
use crate::calendar::CalendarDate;
use crate::error::Error;
use crate::format::{TimeFormat, FORMAT_CAPACITY};
use crate::host::{epoch_is_sane, HostClock, SystemClock, TimeZone};
use crate::registers::*;
use crate::timer::{ClkoutFrequency, TimerSpec};

pub struct Pcf8563<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Pcf8563<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    // Consume the driver and return the underlying I2C bus
    pub fn into_inner(self) -> I2C {
        self.i2c
    }

    /// Zero-length write to the device address; `Ok` when the chip acknowledges.
    pub fn probe(&mut self) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, &[]).map_err(Error::I2c)
    }

    // ---------------------------------------------------------------- calendar

    /// Writes the full date and time. The weekday register is derived from the date,
    /// the century bit marks years before 2000 and the VL flag is cleared.
    pub fn set_datetime(&mut self, dt: &CalendarDate) -> Result<(), Error<I2C::Error>> {
        let r = dt.to_registers();
        let data = [REG_SECONDS, r[0], r[1], r[2], r[3], r[4], r[5], r[6]];
        log::debug!(
            "pcf8563: set {}-{}-{} {}:{}:{}",
            dt.year,
            dt.month,
            dt.day,
            dt.hour,
            dt.minute,
            dt.second
        );
        self.i2c.write(self.address, &data).map_err(Error::I2c)
    }

    /// Reads date and time. Returns (dt, vl_flag) where vl_flag == true means the
    /// oscillator lost power and the time is unreliable.
    pub fn read_datetime(&mut self) -> Result<(CalendarDate, bool), Error<I2C::Error>> {
        let buf: [u8; 7] = self.read_block(REG_SECONDS)?;
        let (dt, vl) = CalendarDate::from_registers(&buf);
        if vl {
            log::warn!("pcf8563: voltage-low flag set, time is not reliable");
        }
        Ok((dt, vl))
    }

    pub fn datetime(&mut self) -> Result<CalendarDate, Error<I2C::Error>> {
        self.read_datetime().map(|(dt, _)| dt)
    }

    /// True when the oscillator has run without a voltage drop since the time was set.
    pub fn is_valid(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_reg(REG_SECONDS)? & VOLTAGE_LOW == 0)
    }

    /// Writes `reference` when the chip's calendar day is earlier than it, e.g. to
    /// bring a fresh chip up to the firmware build date. Returns whether it wrote.
    pub fn set_if_behind(&mut self, reference: &CalendarDate) -> Result<bool, Error<I2C::Error>> {
        let now = self.datetime()?;
        if now.day_before(reference) {
            self.set_datetime(reference)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn format_datetime(
        &mut self,
        style: TimeFormat,
    ) -> Result<heapless::String<FORMAT_CAPACITY>, Error<I2C::Error>> {
        Ok(self.datetime()?.format(style))
    }

    // ---------------------------------------------------------------- alarm

    pub fn set_alarm(&mut self, alarm: &AlarmSpec) -> Result<(), Error<I2C::Error>> {
        let r = alarm.to_registers();
        let data = [REG_ALARM_MINUTE, r[0], r[1], r[2], r[3]];
        self.i2c.write(self.address, &data).map_err(Error::I2c)
    }

    pub fn set_alarm_by_minutes(&mut self, minute: u8) -> Result<(), Error<I2C::Error>> {
        self.set_alarm(&AlarmSpec::at_minute(minute))
    }

    pub fn set_alarm_by_hours(&mut self, hour: u8) -> Result<(), Error<I2C::Error>> {
        self.set_alarm(&AlarmSpec::at_hour(hour))
    }

    pub fn set_alarm_by_days(&mut self, day: u8) -> Result<(), Error<I2C::Error>> {
        self.set_alarm(&AlarmSpec::at_day(day))
    }

    pub fn set_alarm_by_weekday(&mut self, weekday: u8) -> Result<(), Error<I2C::Error>> {
        self.set_alarm(&AlarmSpec::at_weekday(weekday))
    }

    pub fn alarm(&mut self) -> Result<AlarmSpec, Error<I2C::Error>> {
        let buf: [u8; 4] = self.read_block(REG_ALARM_MINUTE)?;
        Ok(AlarmSpec::from_registers(&buf))
    }

    // Clear a pending alarm and route future matches to the INT pin
    pub fn enable_alarm(&mut self) -> Result<(), Error<I2C::Error>> {
        self.update_status2(STATUS2_AF, STATUS2_AIE)
    }

    pub fn disable_alarm(&mut self) -> Result<(), Error<I2C::Error>> {
        self.update_status2(STATUS2_AF | STATUS2_AIE, 0)
    }

    pub fn reset_alarm(&mut self) -> Result<(), Error<I2C::Error>> {
        self.update_status2(STATUS2_AF, 0)
    }

    pub fn alarm_active(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.status2()? & STATUS2_AF != 0)
    }

    // ---------------------------------------------------------------- timer

    /// Programs frequency, countdown value and interrupt routing. Does not start the
    /// timer; see `enable_timer`.
    pub fn set_timer(&mut self, timer: &TimerSpec) -> Result<(), Error<I2C::Error>> {
        if timer.interrupt {
            self.update_status2(0, STATUS2_TIE)?;
        } else {
            self.update_status2(STATUS2_TIE, 0)?;
        }

        let ctrl = self.read_reg(REG_TIMER_CTRL)?;
        self.write_reg(
            REG_TIMER_CTRL,
            (ctrl & !TIMER_FREQ_MASK) | timer.frequency.bits(),
        )?;
        self.write_reg(REG_TIMER, timer.value)
    }

    pub fn enable_timer(&mut self) -> Result<(), Error<I2C::Error>> {
        self.update_status2(STATUS2_TF, STATUS2_TIE)?;
        let ctrl = self.read_reg(REG_TIMER_CTRL)?;
        self.write_reg(REG_TIMER_CTRL, ctrl | TIMER_ENABLE)
    }

    pub fn disable_timer(&mut self) -> Result<(), Error<I2C::Error>> {
        self.update_status2(STATUS2_TF, 0)?;
        let ctrl = self.read_reg(REG_TIMER_CTRL)?;
        self.write_reg(REG_TIMER_CTRL, ctrl & !TIMER_ENABLE)
    }

    /// Stops the timer, drops its flag and interrupt, and zeroes control and countdown.
    pub fn clear_timer(&mut self) -> Result<(), Error<I2C::Error>> {
        self.update_status2(STATUS2_TF | STATUS2_TIE, 0)?;
        self.write_reg(REG_TIMER_CTRL, 0x00)?;
        self.write_reg(REG_TIMER, 0x00)
    }

    pub fn is_timer_enabled(&mut self) -> Result<bool, Error<I2C::Error>> {
        let status = self.status2()?;
        let ctrl = self.read_reg(REG_TIMER_CTRL)?;
        Ok(status & STATUS2_TIE != 0 && ctrl & TIMER_ENABLE != 0)
    }

    pub fn is_timer_active(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.status2()? & STATUS2_TF != 0)
    }

    // ---------------------------------------------------------------- clkout

    pub fn enable_clkout(&mut self, freq: ClkoutFrequency) -> Result<(), Error<I2C::Error>> {
        self.write_reg(REG_CLKOUT, freq.bits() | CLKOUT_ENABLE)
    }

    pub fn disable_clkout(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_reg(REG_CLKOUT, 0x00)
    }

    // ---------------------------------------------------------------- host sync

    /// Copies host time into the chip. Returns `Ok(false)` without touching the chip
    /// when `zone` is `Utc` and the host epoch is outside 1970..2100 (clock never set).
    pub fn sync_to_rtc<C>(&mut self, clock: &C, zone: TimeZone) -> Result<bool, Error<I2C::Error>>
    where
        C: HostClock + ?Sized,
    {
        let now = match zone {
            TimeZone::Local => clock.local_now(),
            TimeZone::Utc => {
                let ts = clock.utc_timestamp();
                if !epoch_is_sane(ts) {
                    log::error!("pcf8563: host epoch {} is not valid, RTC time not set", ts);
                    return Ok(false);
                }
                CalendarDate::from_unix(ts as u32)
            }
        };
        self.set_datetime(&now)?;
        Ok(true)
    }

    /// Copies chip time into the host clock. Returns `Ok(false)` without touching the
    /// host when the chip reports a voltage drop.
    pub fn sync_to_system<C>(&mut self, clock: &mut C) -> Result<bool, Error<I2C::Error>>
    where
        C: SystemClock + ?Sized,
    {
        if !self.is_valid()? {
            log::error!("pcf8563: RTC time is not valid, system clock not set");
            return Ok(false);
        }

        let dt = self.datetime()?;
        clock.set_local(&dt).map_err(|e| {
            log::error!("pcf8563: system clock rejected time: {:?}", e);
            Error::SystemClock
        })?;
        Ok(true)
    }

    // ---------------------------------------------------------------- raw access

    /// Raw control/status 2 register: TI_TP, AF, TF, AIE, TIE.
    pub fn status2(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_reg(REG_STATUS2)
    }

    // Read-modify-write of control/status 2. Flags not named in `clear` are written
    // back as 1 so the chip leaves them as they are.
    fn update_status2(&mut self, clear: u8, set: u8) -> Result<(), Error<I2C::Error>> {
        let current = self.status2()?;
        let value = (current & !clear) | (STATUS2_FLAGS & !clear) | set;
        self.write_reg(REG_STATUS2, value)
    }

    // Write an 8-bit register
    fn write_reg(&mut self, reg: u8, val: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, val])
            .map_err(Error::I2c)
    }

    // Read an 8-bit register
    fn read_reg(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let [out] = self.read_block::<1>(reg)?;
        Ok(out)
    }

    // Read N consecutive registers starting at `reg`
    fn read_block<const N: usize>(&mut self, reg: u8) -> Result<[u8; N], Error<I2C::Error>> {
        let mut buf = [0u8; N];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf)
    }
}
