// Driver error type, generic over the I2C bus error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// A bus transaction failed (NACK, arbitration loss, timeout...).
    I2c(E),
    /// The host refused to apply the time read from the chip.
    SystemClock,
}
