//! 32 bit input shift register frame
use bitfield_struct::bitfield;

use crate::{Channel, Command, ReferenceMode};

/// Address nibble selecting the flexible reference mode register.
const FLEX_ADDRESS: u8 = 0b0001;
/// DB19, marks a flexible reference mode frame.
const FLEX_FLAG: u16 = 1 << 15;

/// One frame as shifted into the device, MSB first.
///
/// | 31..28 | 27..24  | 23..20  | 19..4 | 3..0    |
/// |--------|---------|---------|-------|---------|
/// | 0000   | command | address | data  | feature |
///
/// Bit positions are fixed for every command, a command that does not use a
/// field sends it as zero.
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct Frame {
    /// Feature bits (DB3..DB0)
    #[bits(4)]
    pub feature: u8,
    /// Data bits (DB19..DB4)
    #[bits(16)]
    pub data: u16,
    /// Address bits (DB23..DB20)
    #[bits(4)]
    pub address: u8,
    /// Command bits (DB27..DB24)
    #[bits(4)]
    pub command: u8,
    /// Prefix bits, always zero
    #[bits(4)]
    _prefix: u8,
}

impl Frame {
    /// Pack the four fields without any interpretation. Only the low nibble of
    /// `cmd`, `addr` and `feature` is used.
    pub fn raw(cmd: u8, addr: u8, data: u16, feature: u8) -> Self {
        Self::new()
            .with_command(cmd & 0x0F)
            .with_address(addr & 0x0F)
            .with_data(data)
            .with_feature(feature & 0x0F)
    }

    /// The four bytes in transmission order.
    pub fn to_bytes(self) -> [u8; 4] {
        u32::from(self).to_be_bytes()
    }
}

impl From<Command> for Frame {
    fn from(cmd: Command) -> Self {
        let code = u8::from(cmd);
        match cmd {
            Command::WriteInput { channel, value }
            | Command::WriteInputUpdateOne { channel, value } => {
                Frame::raw(code, channel.into(), value, 0)
            }
            Command::UpdateDac(channel) => Frame::raw(code, channel.into(), 0, 0),
            Command::WriteInputUpdateAll(value) => {
                Frame::raw(code, Channel::AllDacs.into(), value, 0)
            }
            // PD1..PD0 sit at DB9..DB8
            Command::SetPowerMode { channel, mode } => {
                Frame::raw(code, channel.into(), (mode as u16) << 4, 0)
            }
            Command::SetClearCode(clear) => Frame::raw(code, 0, 0, (clear as u8) << 2),
            // DB7..DB0, one bit per channel
            Command::SetLdac(mask) => Frame::raw(code, 0, u16::from(mask >> 4), mask & 0x0F),
            Command::SoftwareReset => Frame::raw(code, 0, 0, 0),
            Command::InternalReference(mode) => match mode.flex_select() {
                // Flag at DB19, selection at DB18..DB17
                Some(select) => Frame::raw(
                    code,
                    FLEX_ADDRESS,
                    FLEX_FLAG | (u16::from(select) << 13),
                    0,
                ),
                None => Frame::raw(code, 0, 0, (mode == ReferenceMode::Enabled) as u8),
            },
        }
    }
}
