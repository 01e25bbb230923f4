// BCD encode/decode helpers. Valid for 0..=99; anything else is garbage in, garbage out.

/// Decimal to packed BCD, e.g. 59 -> 0x59.
#[inline]
pub const fn dec_to_bcd(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}

/// Packed BCD to decimal, e.g. 0x59 -> 59.
#[inline]
pub const fn bcd_to_dec(v: u8) -> u8 {
    (v >> 4) * 10 + (v & 0x0F)
}
