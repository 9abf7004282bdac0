//! Command vocabulary of the DAC8x68 shift register.

use crate::{Channel, Resolution};

/// A single device command together with exactly the fields it uses.
///
/// Data values are left-aligned 16 bit codes. The driver aligns them to the
/// part's resolution with [`Command::aligned`] before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Write the input register of one channel, the output does not change.
    WriteInput {
        /// Target channel
        channel: Channel,
        /// Left-aligned code
        value: u16,
    },
    /// Copy the input register to the DAC register of one or all channels.
    UpdateDac(Channel),
    /// Write all input registers with one code and update all DAC registers.
    WriteInputUpdateAll(u16),
    /// Write one input register and update its DAC register.
    WriteInputUpdateOne {
        /// Target channel, [`Channel::AllDacs`] writes and updates all
        /// channels with the same code.
        channel: Channel,
        /// Left-aligned code
        value: u16,
    },
    /// Power up or power down one or all channels.
    SetPowerMode {
        /// Target channel
        channel: Channel,
        /// Requested mode
        mode: PowerMode,
    },
    /// Select the code loaded on a clear.
    SetClearCode(ClearCode),
    /// Write the LDAC register, one bit per channel (bit 0 = A).
    SetLdac(u8),
    /// Reset every register to its power-on default.
    SoftwareReset,
    /// Configure the internal 2.5V reference.
    InternalReference(ReferenceMode),
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::WriteInput { .. } => 0b0000,
            Command::UpdateDac(_) => 0b0001,
            Command::WriteInputUpdateAll(_) => 0b0010,
            Command::WriteInputUpdateOne { .. } => 0b0011,
            Command::SetPowerMode { .. } => 0b0100,
            Command::SetClearCode(_) => 0b0101,
            Command::SetLdac(_) => 0b0110,
            Command::SoftwareReset => 0b0111,
            Command::InternalReference(_) => 0b1000,
        }
    }
}

impl Command {
    /// Clear the data bits `resolution` does not convert. Commands without a
    /// data value are returned unchanged.
    pub fn aligned(self, resolution: Resolution) -> Self {
        match self {
            Command::WriteInput { channel, value } => Command::WriteInput {
                channel,
                value: resolution.align(value),
            },
            Command::WriteInputUpdateOne { channel, value } => Command::WriteInputUpdateOne {
                channel,
                value: resolution.align(value),
            },
            Command::WriteInputUpdateAll(value) => {
                Command::WriteInputUpdateAll(resolution.align(value))
            }
            other => other,
        }
    }
}

/// Channel power modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PowerMode {
    /// Normal operation
    PowerUp = 0b00,
    /// Powered down, output tied to GND through 1kOhm
    PowerDown1k = 0b01,
    /// Powered down, output tied to GND through 100kOhm
    PowerDown100k = 0b10,
    /// Powered down, output high impedance
    PowerDownHiZ = 0b11,
}

/// Code the DAC registers are loaded with on a clear (~CLR pin).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClearCode {
    /// Clear to 0x0000
    ZeroScale = 0b00,
    /// Clear to 0x8000
    MidScale = 0b01,
    /// Clear to 0xFFFF
    FullScale = 0b10,
    /// Ignore the clear pin
    NoOperation = 0b11,
}

/// Internal reference configuration
///
/// The `FlexAlways*` modes only have an effect after
/// [`ReferenceMode::FlexModeEnabled`] was sent. This is not tracked by the
/// driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReferenceMode {
    /// Static mode, reference powered down
    Disabled,
    /// Static mode, reference powered up
    Enabled,
    /// Switch to flexible mode, reference follows the channels' power state
    FlexModeEnabled,
    /// Flexible mode, reference always powered up
    FlexAlwaysOn,
    /// Flexible mode, reference always powered down
    FlexAlwaysOff,
}

impl ReferenceMode {
    /// Flexible mode sub-selection, `None` for the static modes.
    pub(crate) fn flex_select(self) -> Option<u8> {
        match self {
            ReferenceMode::Disabled | ReferenceMode::Enabled => None,
            ReferenceMode::FlexModeEnabled => Some(0b00),
            ReferenceMode::FlexAlwaysOn => Some(0b01),
            ReferenceMode::FlexAlwaysOff => Some(0b10),
        }
    }
}
