//! PCF8563 register map and bit masks.
//! Datasheet: https://www.nxp.com/docs/en/data-sheet/PCF8563.pdf (section 8)

/// Fixed 7-bit I2C address of the PCF8563.
pub const DEFAULT_I2C_ADDR: u8 = 0x51;

pub const REG_STATUS1: u8 = 0x00; // control/status 1: TEST1, STOP, TESTC
pub const REG_STATUS2: u8 = 0x01; // control/status 2: TI_TP, AF, TF, AIE, TIE
pub const REG_SECONDS: u8 = 0x02; // VL | seconds, start of the 7-byte calendar block
pub const REG_ALARM_MINUTE: u8 = 0x09; // start of the 4-byte alarm block
pub const REG_CLKOUT: u8 = 0x0D;
pub const REG_TIMER_CTRL: u8 = 0x0E; // TE | TD1..TD0
pub const REG_TIMER: u8 = 0x0F; // countdown value

// Calendar field masks
pub const VOLTAGE_LOW: u8 = 0x80;
pub const SECONDS_MASK: u8 = 0x7F;
pub const MINUTES_MASK: u8 = 0x7F;
pub const HOURS_MASK: u8 = 0x3F;
pub const DAYS_MASK: u8 = 0x3F;
pub const WEEKDAY_MASK: u8 = 0x07;
pub const MONTHS_MASK: u8 = 0x1F;
pub const CENTURY: u8 = 0x80;

// Control/status 2 bits
pub const STATUS2_AF: u8 = 0x08; // alarm flag
pub const STATUS2_TF: u8 = 0x04; // timer flag
pub const STATUS2_AIE: u8 = 0x02; // alarm interrupt enable
pub const STATUS2_TIE: u8 = 0x01; // timer interrupt enable

// Writing 1 to a flag leaves it untouched, writing 0 clears it.
pub const STATUS2_FLAGS: u8 = STATUS2_AF | STATUS2_TF;

/// Bit 7 of every alarm register: set means the field takes no part in the match.
pub const ALARM_DISABLE: u8 = 0x80;

pub const CLKOUT_ENABLE: u8 = 0x80;
pub const TIMER_ENABLE: u8 = 0x80;
pub const TIMER_FREQ_MASK: u8 = 0x03;
