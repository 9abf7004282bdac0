//! Driver for Texas Instruments DAC7568/DAC8168/DAC8568 octal 12/14/16bit DACs
//!
//! All three parts share one 32 bit SPI wire protocol. Lower resolution
//! parts use a left-aligned data format, so values are always passed as
//! 16 bit codes and the unused low bits are cleared before sending.
//!
//! ```
//! # use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
//! # use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
//! # use dac8x68::{Channel, Dac8x68};
//! # let spi = SpiMock::new(&[
//! #     SpiTransaction::write_vec(vec![0x03, 0x05, 0xFF, 0xF0]),
//! #     SpiTransaction::flush(),
//! # ]);
//! # let sync = PinMock::new(&[
//! #     PinTransaction::set(State::Low),
//! #     PinTransaction::set(State::High),
//! # ]);
//! let mut dac = Dac8x68::new_dac8568(spi, sync);
//! dac.write_and_update(Channel::DacA, 0x5FFF).unwrap();
//! # let (mut spi, mut sync) = dac.destroy();
//! # spi.done();
//! # sync.done();
//! ```

#![deny(unsafe_code, missing_docs)]
#![cfg_attr(not(test), no_std)]

pub mod asynch;
mod command;
mod dac;
mod frame;
mod transaction;

pub use command::{ClearCode, Command, PowerMode, ReferenceMode};
pub use frame::Frame;

/// Minimum quiet time after a software reset before the next command.
pub const POST_RESET_SETTLE_US: u32 = 1_000;

/// Worst case output settling time after a DAC register update.
pub const SETTLING_TIME_US: u32 = 10;

/// DAC7568/DAC8168/DAC8568 on an exclusively owned SPI bus, framed by the
/// ~SYNC pin.
pub struct Dac8x68<SPI, SYNC> {
    spi: SPI,
    sync: SYNC,
    resolution: Resolution,
}

/// Errors for this crate
///
/// Both variants are transport failures; they only differ in which of the
/// two host peripherals reported it.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<S, P> {
    /// SPI communication error
    Spi(S),
    /// ~SYNC pin error
    Pin(P),
}

/// Dac Channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    /// DAC Channel A
    DacA = 0b0000,
    /// DAC Channel B
    DacB = 0b0001,
    /// DAC Channel C
    DacC = 0b0010,
    /// DAC Channel D
    DacD = 0b0011,
    /// DAC Channel E
    DacE = 0b0100,
    /// DAC Channel F
    DacF = 0b0101,
    /// DAC Channel G
    DacG = 0b0110,
    /// DAC Channel H
    DacH = 0b0111,
    /// All DAC Channels (broadcast)
    AllDacs = 0b1111,
}

impl Channel {
    /// The eight physical channels in ascending order.
    pub const ALL: [Channel; 8] = [
        Channel::DacA,
        Channel::DacB,
        Channel::DacC,
        Channel::DacD,
        Channel::DacE,
        Channel::DacF,
        Channel::DacG,
        Channel::DacH,
    ];
}

impl From<Channel> for u8 {
    fn from(chan: Channel) -> Self {
        chan as u8
    }
}

/// Output resolution of the connected part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// DAC7568
    Bits12,
    /// DAC8168
    Bits14,
    /// DAC8568
    Bits16,
}

impl Resolution {
    /// Number of significant bits.
    pub const fn bits(self) -> u8 {
        match self {
            Resolution::Bits12 => 12,
            Resolution::Bits14 => 14,
            Resolution::Bits16 => 16,
        }
    }

    /// Mask of the bits the part actually converts in a left-aligned code.
    pub const fn mask(self) -> u16 {
        u16::MAX << (16 - self.bits())
    }

    /// Clear the bits a lower resolution part ignores.
    ///
    /// > Nothing is reported when set bits are dropped here, a right-aligned
    /// > code passed by mistake will silently lose its low bits.
    pub const fn align(self, val: u16) -> u16 {
        val & self.mask()
    }

    /// Convert a right-aligned native code (e.g. `0..=0xFFF` on a DAC7568)
    /// into the left-aligned form expected by the driver. Bits above the
    /// native width are shifted out.
    pub const fn left_justify(self, code: u16) -> u16 {
        code << (16 - self.bits())
    }
}
