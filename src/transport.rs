use embedded_hal::i2c::I2c;

/// Bus access the driver needs from the embedding application.
///
/// Addresses are passed in the 8-bit convention (7-bit address shifted left
/// by one). `write` and `read` each form one complete bus transfer.
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Brings the bus up. Called once from [`crate::Sen5x::init`].
    fn open(&mut self) -> Result<(), Self::Error>;

    /// Releases the bus. Called from [`crate::Sen5x::deinit`].
    fn close(&mut self) -> Result<(), Self::Error>;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Fills `buffer` completely from the device at `address`.
    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;
}

/// [`Transport`] on top of any embedded-hal I²C bus.
///
/// The bus is expected to be configured already, so opening and closing do
/// nothing.
#[derive(Debug)]
pub struct I2cTransport<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> I2cTransport<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Gives back the wrapped bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    type Error = I2C::Error;

    fn open(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address >> 1, bytes)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(address >> 1, buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::{I2cTransport, Transport};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[test]
    fn shifts_address_to_seven_bits() {
        let expectations = [
            Transaction::write(0x69, vec![0xd3, 0x04]),
            Transaction::read(0x69, vec![0x01, 0x02, 0x03]),
        ];
        let mut transport = I2cTransport::new(I2cMock::new(&expectations));

        transport.open().unwrap();
        transport.write(0xd2, &[0xd3, 0x04]).unwrap();
        let mut buffer = [0u8; 3];
        transport.read(0xd2, &mut buffer).unwrap();
        transport.close().unwrap();

        assert_eq!(buffer, [0x01, 0x02, 0x03]);
        transport.release().done();
    }
}
