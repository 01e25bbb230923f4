// Bus-level tests: every driver call is checked against the exact I2C transactions it issues.

use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

use pcf8563_rtc::{
    AlarmField, AlarmSpec, CalendarDate, ClkoutFrequency, Error, HostClock, Pcf8563, SystemClock,
    TimeFormat, TimeZone, TimerFrequency, TimerSpec,
};

const ADDR: u8 = 0x51;

// 2019-04-01 12:33:59, a Monday
const APRIL_2019: [u8; 7] = [0x59, 0x33, 0x12, 0x01, 0x01, 0x04, 0x19];

fn rtc(expectations: &[I2cTransaction]) -> Pcf8563<I2cMock> {
    Pcf8563::new(I2cMock::new(expectations))
}

fn finish(rtc: Pcf8563<I2cMock>) {
    let mut i2c = rtc.into_inner();
    i2c.done();
}

fn write_block(reg: u8, data: &[u8]) -> I2cTransaction {
    let mut bytes = vec![reg];
    bytes.extend_from_slice(data);
    I2cTransaction::write(ADDR, bytes)
}

fn read_block(reg: u8, response: &[u8]) -> I2cTransaction {
    I2cTransaction::write_read(ADDR, vec![reg], response.to_vec())
}

struct FakeClock {
    epoch: i64,
    local: CalendarDate,
    applied: Option<CalendarDate>,
    refuse: bool,
}

impl FakeClock {
    fn new(epoch: i64, local: CalendarDate) -> Self {
        Self {
            epoch,
            local,
            applied: None,
            refuse: false,
        }
    }
}

impl HostClock for FakeClock {
    fn utc_timestamp(&self) -> i64 {
        self.epoch
    }

    fn local_now(&self) -> CalendarDate {
        self.local
    }
}

impl SystemClock for FakeClock {
    type Error = &'static str;

    fn set_local(&mut self, date: &CalendarDate) -> Result<(), Self::Error> {
        if self.refuse {
            return Err("permission denied");
        }
        self.applied = Some(*date);
        Ok(())
    }
}

#[test]
fn probe_acknowledged() {
    let mut rtc = rtc(&[I2cTransaction::write(ADDR, vec![])]);
    assert_eq!(rtc.probe(), Ok(()));
    finish(rtc);
}

#[test]
fn probe_reports_bus_error() {
    let mut rtc = rtc(&[I2cTransaction::write(ADDR, vec![]).with_error(ErrorKind::Other)]);
    assert_eq!(rtc.probe(), Err(Error::I2c(ErrorKind::Other)));
    finish(rtc);
}

#[test]
fn custom_address_is_used() {
    let mut rtc = Pcf8563::with_address(I2cMock::new(&[I2cTransaction::write(0x30, vec![])]), 0x30);
    assert_eq!(rtc.probe(), Ok(()));
    finish(rtc);
}

#[test]
fn set_datetime_writes_one_calendar_block() {
    let mut rtc = rtc(&[write_block(0x02, &APRIL_2019)]);
    rtc.set_datetime(&CalendarDate::new(2019, 4, 1, 12, 33, 59))
        .unwrap();
    finish(rtc);
}

#[test]
fn set_datetime_marks_1900s_with_century_bit() {
    let mut rtc = rtc(&[
        write_block(0x02, &[0x59, 0x59, 0x23, 0x31, 0x05, 0x80 | 0x12, 0x99]),
        write_block(0x02, &[0x00, 0x00, 0x00, 0x01, 0x06, 0x01, 0x00]),
    ]);
    rtc.set_datetime(&CalendarDate::new(1999, 12, 31, 23, 59, 59))
        .unwrap();
    rtc.set_datetime(&CalendarDate::new(2000, 1, 1, 0, 0, 0)).unwrap();
    finish(rtc);
}

#[test]
fn read_datetime_decodes_calendar_block() {
    let mut rtc = rtc(&[read_block(0x02, &APRIL_2019)]);
    let (dt, vl) = rtc.read_datetime().unwrap();
    assert!(!vl);
    assert_eq!(dt, CalendarDate::new(2019, 4, 1, 12, 33, 59));
    assert_eq!(dt.second, 59);
    finish(rtc);
}

#[test]
fn written_block_reads_back_as_the_same_date() {
    let dt = CalendarDate::new(1999, 12, 31, 23, 59, 59);
    let bytes = [0x59, 0x59, 0x23, 0x31, 0x05, 0x92, 0x99];
    let mut rtc = rtc(&[write_block(0x02, &bytes), read_block(0x02, &bytes)]);
    rtc.set_datetime(&dt).unwrap();
    let back = rtc.datetime().unwrap();
    assert_eq!(back, dt);
    assert_eq!(back.year, 1999);
    assert_eq!(back.second, 59);
    finish(rtc);
}

#[test]
fn read_datetime_reports_voltage_low() {
    let mut block = APRIL_2019;
    block[0] |= 0x80;
    let mut rtc = rtc(&[read_block(0x02, &block)]);
    let (dt, vl) = rtc.read_datetime().unwrap();
    assert!(vl);
    assert_eq!(dt.second, 59);
    finish(rtc);
}

#[test]
fn read_datetime_propagates_bus_error() {
    let mut rtc = rtc(&[read_block(0x02, &[0; 7]).with_error(ErrorKind::Other)]);
    assert_eq!(rtc.read_datetime(), Err(Error::I2c(ErrorKind::Other)));
    finish(rtc);
}

#[test]
fn validity_follows_vl_bit() {
    let mut rtc = rtc(&[read_block(0x02, &[0x25]), read_block(0x02, &[0x80 | 0x25])]);
    assert_eq!(rtc.is_valid(), Ok(true));
    assert_eq!(rtc.is_valid(), Ok(false));
    finish(rtc);
}

#[test]
fn format_datetime_reads_and_formats() {
    let mut rtc = rtc(&[
        read_block(0x02, &APRIL_2019),
        read_block(0x02, &[0x58, 0x32, 0x11, 0x02, 0x06, 0x05, 0x20]),
        read_block(0x02, &[0x58, 0x32, 0x11, 0x02, 0x06, 0x05, 0x20]),
    ]);
    assert_eq!(
        rtc.format_datetime(TimeFormat::Full).unwrap().as_str(),
        "2019-4-1/12:33:59"
    );
    assert_eq!(
        rtc.format_datetime(TimeFormat::Full).unwrap().as_str(),
        "2020-5-2/11:32:58"
    );
    assert_eq!(
        rtc.format_datetime(TimeFormat::from_u8(42)).unwrap().as_str(),
        "11:32"
    );
    finish(rtc);
}

#[test]
fn set_if_behind_only_moves_forward() {
    let reference = CalendarDate::new(2020, 5, 2, 11, 32, 58);
    let mut rtc = rtc(&[
        read_block(0x02, &APRIL_2019),
        write_block(0x02, &[0x58, 0x32, 0x11, 0x02, 0x06, 0x05, 0x20]),
        read_block(0x02, &[0x00, 0x00, 0x00, 0x01, 0x05, 0x01, 0x21]),
    ]);
    assert_eq!(rtc.set_if_behind(&reference), Ok(true));
    assert_eq!(rtc.set_if_behind(&reference), Ok(false));
    finish(rtc);
}

#[test]
fn alarm_hour_is_clamped() {
    let mut rtc = rtc(&[write_block(0x09, &[0x80, 0x23, 0x80, 0x80])]);
    rtc.set_alarm_by_hours(99).unwrap();
    finish(rtc);
}

#[test]
fn single_field_alarm_helpers() {
    let mut rtc = rtc(&[
        write_block(0x09, &[0x15, 0x80, 0x80, 0x80]),
        write_block(0x09, &[0x80, 0x80, 0x31, 0x80]),
        write_block(0x09, &[0x80, 0x80, 0x80, 0x00]),
    ]);
    rtc.set_alarm_by_minutes(15).unwrap();
    rtc.set_alarm_by_days(40).unwrap();
    rtc.set_alarm_by_weekday(0).unwrap();
    finish(rtc);
}

#[test]
fn alarm_round_trip() {
    let spec = AlarmSpec::new(
        AlarmField::At(30),
        AlarmField::At(6),
        AlarmField::Disabled,
        AlarmField::Disabled,
    );
    let bytes = [0x30, 0x06, 0x80, 0x80];
    let mut rtc = rtc(&[write_block(0x09, &bytes), read_block(0x09, &bytes)]);
    rtc.set_alarm(&spec).unwrap();
    let back = rtc.alarm().unwrap();
    assert_eq!(back, spec);
    assert_eq!(back.day, AlarmField::Disabled);
    finish(rtc);
}

#[test]
fn enable_alarm_clears_flag_and_sets_interrupt() {
    // AF pending -> AF cleared, TF written as 1 (unchanged), AIE set
    let mut rtc = rtc(&[read_block(0x01, &[0x08]), write_block(0x01, &[0x06])]);
    rtc.enable_alarm().unwrap();
    finish(rtc);
}

#[test]
fn disable_alarm_keeps_timer_bits() {
    let mut rtc = rtc(&[read_block(0x01, &[0x0F]), write_block(0x01, &[0x05])]);
    rtc.disable_alarm().unwrap();
    finish(rtc);
}

#[test]
fn reset_alarm_keeps_interrupt_enable() {
    let mut rtc = rtc(&[read_block(0x01, &[0x0A]), write_block(0x01, &[0x06])]);
    rtc.reset_alarm().unwrap();
    finish(rtc);
}

#[test]
fn alarm_active_reads_af() {
    let mut rtc = rtc(&[read_block(0x01, &[0x08]), read_block(0x01, &[0x04])]);
    assert_eq!(rtc.alarm_active(), Ok(true));
    assert_eq!(rtc.alarm_active(), Ok(false));
    finish(rtc);
}

#[test]
fn set_timer_with_interrupt() {
    let mut rtc = rtc(&[
        read_block(0x01, &[0x00]),
        write_block(0x01, &[0x0D]),
        read_block(0x0E, &[0x83]),
        write_block(0x0E, &[0x82]),
        write_block(0x0F, &[10]),
    ]);
    rtc.set_timer(&TimerSpec::new(10, TimerFrequency::Hz1, true))
        .unwrap();
    finish(rtc);
}

#[test]
fn set_timer_without_interrupt() {
    let mut rtc = rtc(&[
        read_block(0x01, &[0x13]),
        write_block(0x01, &[0x1E]),
        read_block(0x0E, &[0x00]),
        write_block(0x0E, &[0x03]),
        write_block(0x0F, &[255]),
    ]);
    rtc.set_timer(&TimerSpec::new(255, TimerFrequency::PerMinute, false))
        .unwrap();
    finish(rtc);
}

#[test]
fn enable_and_disable_timer() {
    let mut rtc = rtc(&[
        read_block(0x01, &[0x04]),
        write_block(0x01, &[0x09]),
        read_block(0x0E, &[0x02]),
        write_block(0x0E, &[0x82]),
        read_block(0x01, &[0x05]),
        write_block(0x01, &[0x09]),
        read_block(0x0E, &[0x82]),
        write_block(0x0E, &[0x02]),
    ]);
    rtc.enable_timer().unwrap();
    rtc.disable_timer().unwrap();
    finish(rtc);
}

#[test]
fn clear_timer_zeroes_control_and_countdown() {
    let mut rtc = rtc(&[
        read_block(0x01, &[0x0D]),
        write_block(0x01, &[0x08]),
        write_block(0x0E, &[0x00]),
        write_block(0x0F, &[0x00]),
    ]);
    rtc.clear_timer().unwrap();
    finish(rtc);
}

#[test]
fn timer_state_checks() {
    let mut rtc = rtc(&[
        read_block(0x01, &[0x01]),
        read_block(0x0E, &[0x80]),
        read_block(0x01, &[0x01]),
        read_block(0x0E, &[0x02]),
        read_block(0x01, &[0x04]),
        read_block(0x01, &[0x08]),
    ]);
    assert_eq!(rtc.is_timer_enabled(), Ok(true));
    assert_eq!(rtc.is_timer_enabled(), Ok(false));
    assert_eq!(rtc.is_timer_active(), Ok(true));
    assert_eq!(rtc.is_timer_active(), Ok(false));
    finish(rtc);
}

#[test]
fn clkout_enable_and_disable() {
    let mut rtc = rtc(&[
        write_block(0x0D, &[0x83]),
        write_block(0x0D, &[0x80]),
        write_block(0x0D, &[0x00]),
    ]);
    rtc.enable_clkout(ClkoutFrequency::Hz1).unwrap();
    rtc.enable_clkout(ClkoutFrequency::Hz32768).unwrap();
    rtc.disable_clkout().unwrap();
    finish(rtc);
}

#[test]
fn status2_is_raw() {
    let mut rtc = rtc(&[read_block(0x01, &[0x1F])]);
    assert_eq!(rtc.status2(), Ok(0x1F));
    finish(rtc);
}

#[test]
fn sync_to_rtc_from_utc() {
    let clock = FakeClock::new(1_554_122_039, CalendarDate::default());
    let mut rtc = rtc(&[write_block(0x02, &APRIL_2019)]);
    assert_eq!(rtc.sync_to_rtc(&clock, TimeZone::Utc), Ok(true));
    finish(rtc);
}

#[test]
fn sync_to_rtc_refuses_unset_host_clock() {
    let mut rtc = rtc(&[]);
    for epoch in [0, -5, 4_102_444_800] {
        let clock = FakeClock::new(epoch, CalendarDate::default());
        assert_eq!(rtc.sync_to_rtc(&clock, TimeZone::Utc), Ok(false));
    }
    finish(rtc);
}

#[test]
fn sync_to_rtc_from_local_time() {
    // Local path has no epoch check.
    let clock = FakeClock::new(0, CalendarDate::new(2021, 3, 9, 7, 5, 4));
    let mut rtc = rtc(&[write_block(
        0x02,
        &[0x04, 0x05, 0x07, 0x09, 0x02, 0x03, 0x21],
    )]);
    assert_eq!(rtc.sync_to_rtc(&clock, TimeZone::Local), Ok(true));
    finish(rtc);
}

#[test]
fn sync_to_system_applies_chip_time() {
    let mut clock = FakeClock::new(0, CalendarDate::default());
    let mut rtc = rtc(&[read_block(0x02, &[0x59]), read_block(0x02, &APRIL_2019)]);
    assert_eq!(rtc.sync_to_system(&mut clock), Ok(true));
    let applied = clock.applied.unwrap();
    assert_eq!(applied, CalendarDate::new(2019, 4, 1, 12, 33, 59));
    assert_eq!(applied.second, 59);
    finish(rtc);
}

#[test]
fn sync_to_system_skips_invalid_chip_time() {
    let mut clock = FakeClock::new(0, CalendarDate::default());
    let mut rtc = rtc(&[read_block(0x02, &[0x80 | 0x59])]);
    assert_eq!(rtc.sync_to_system(&mut clock), Ok(false));
    assert!(clock.applied.is_none());
    finish(rtc);
}

#[test]
fn sync_to_system_reports_refusal() {
    let mut clock = FakeClock::new(0, CalendarDate::default());
    clock.refuse = true;
    let mut rtc = rtc(&[read_block(0x02, &[0x59]), read_block(0x02, &APRIL_2019)]);
    assert_eq!(rtc.sync_to_system(&mut clock), Err(Error::SystemClock));
    finish(rtc);
}
