// Countdown timer and CLKOUT frequency selectors.

/// A frequency code outside 0..=3.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidFrequency(pub u8);

/// Source clock of the countdown timer (TD1..TD0 in register 0x0E).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TimerFrequency {
    Hz4096 = 0b00,
    Hz64 = 0b01,
    Hz1 = 0b10,
    PerMinute = 0b11, // 1/60 Hz
}

impl TimerFrequency {
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TimerFrequency {
    type Error = InvalidFrequency;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TimerFrequency::Hz4096),
            1 => Ok(TimerFrequency::Hz64),
            2 => Ok(TimerFrequency::Hz1),
            3 => Ok(TimerFrequency::PerMinute),
            other => Err(InvalidFrequency(other)),
        }
    }
}

/// Square wave on the CLKOUT pin (FD1..FD0 in register 0x0D).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ClkoutFrequency {
    Hz32768 = 0b00,
    Hz1024 = 0b01,
    Hz32 = 0b10,
    Hz1 = 0b11,
}

impl ClkoutFrequency {
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ClkoutFrequency {
    type Error = InvalidFrequency;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ClkoutFrequency::Hz32768),
            1 => Ok(ClkoutFrequency::Hz1024),
            2 => Ok(ClkoutFrequency::Hz32),
            3 => Ok(ClkoutFrequency::Hz1),
            other => Err(InvalidFrequency(other)),
        }
    }
}

/// Countdown timer setup: counts `value` ticks of `frequency`, then raises TF.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimerSpec {
    pub value: u8,
    pub frequency: TimerFrequency,
    pub interrupt: bool, // drive INT low while TF is set
}

impl TimerSpec {
    pub const fn new(value: u8, frequency: TimerFrequency, interrupt: bool) -> Self {
        Self {
            value,
            frequency,
            interrupt,
        }
    }
}
