use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::transaction::execute;
use crate::{
    Channel, ClearCode, Command, Dac8x68, Error, Frame, PowerMode, ReferenceMode, Resolution,
    POST_RESET_SETTLE_US,
};

impl<SPI, SYNC, S, P> Dac8x68<SPI, SYNC>
where
    SPI: SpiBus<Error = S>,
    SYNC: OutputPin<Error = P>,
{
    /// Create a new driver, `resolution` decides how many data bits are sent.
    ///
    /// ~SYNC is expected to be idle (high) already, see [`Dac8x68::init`].
    pub fn new(spi: SPI, sync: SYNC, resolution: Resolution) -> Self {
        Self {
            spi,
            sync,
            resolution,
        }
    }
    /// Create a new 12 bit DAC7568 driver
    pub fn new_dac7568(spi: SPI, sync: SYNC) -> Self {
        Self::new(spi, sync, Resolution::Bits12)
    }
    /// Create a new 14 bit DAC8168 driver
    pub fn new_dac8168(spi: SPI, sync: SYNC) -> Self {
        Self::new(spi, sync, Resolution::Bits14)
    }
    /// Create a new 16 bit DAC8568 driver
    pub fn new_dac8568(spi: SPI, sync: SYNC) -> Self {
        Self::new(spi, sync, Resolution::Bits16)
    }

    /// Release the SPI bus and the ~SYNC pin
    pub fn destroy(self) -> (SPI, SYNC) {
        (self.spi, self.sync)
    }

    /// Resolution this driver was created for
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Drive ~SYNC idle, reset the device and wait until it accepts commands
    /// again.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<S, P>> {
        self.sync.set_high().map_err(Error::Pin)?;
        self.software_reset()?;
        delay.delay_us(POST_RESET_SETTLE_US);
        Ok(())
    }

    /// Write a 16 bit value to the input register of `chan`, the output is
    /// not changed.
    /// > Note that the devices with a bit depth smaller than 16 use a
    /// > left-aligned data format, the unused low bits are cleared.
    ///
    /// ```ignore
    /// dac.write_input(Channel::DacA, 0x8000)?;
    /// ```
    pub fn write_input(&mut self, chan: Channel, val: u16) -> Result<(), Error<S, P>> {
        self.send(Command::WriteInput {
            channel: chan,
            value: val,
        })
    }

    /// Load the input register of `chan` (or of all channels) into the DAC
    /// register, changing the output.
    ///
    /// The output settles within [`SETTLING_TIME_US`](crate::SETTLING_TIME_US)
    /// after the frame.
    pub fn update(&mut self, chan: Channel) -> Result<(), Error<S, P>> {
        self.send(Command::UpdateDac(chan))
    }

    /// Write and load `chan` in a single frame.
    pub fn write_and_update(&mut self, chan: Channel, val: u16) -> Result<(), Error<S, P>> {
        self.send(Command::WriteInputUpdateOne {
            channel: chan,
            value: val,
        })
    }

    /// Write all input registers and load all DAC registers with `val`.
    pub fn write_and_update_all(&mut self, val: u16) -> Result<(), Error<S, P>> {
        self.send(Command::WriteInputUpdateAll(val))
    }

    /// Write the input registers of channel A to H in order, one frame each.
    ///
    /// This is not atomic. If a transfer fails the channels before it have
    /// already been written and the remaining ones are skipped.
    pub fn write_all_channels(&mut self, vals: [u16; 8]) -> Result<(), Error<S, P>> {
        for (chan, val) in Channel::ALL.into_iter().zip(vals) {
            self.write_input(chan, val)?;
        }
        Ok(())
    }

    /// Load all DAC registers at once.
    pub fn update_all_channels(&mut self) -> Result<(), Error<S, P>> {
        self.update(Channel::AllDacs)
    }

    /// Power up or down a single or all DAC channels
    pub fn set_power_mode(&mut self, chan: Channel, mode: PowerMode) -> Result<(), Error<S, P>> {
        self.send(Command::SetPowerMode {
            channel: chan,
            mode,
        })
    }

    /// Configure the internal reference.
    ///
    /// [`ReferenceMode::FlexAlwaysOn`] and [`ReferenceMode::FlexAlwaysOff`]
    /// require [`ReferenceMode::FlexModeEnabled`] to be sent first, this is
    /// not checked.
    pub fn set_reference_mode(&mut self, mode: ReferenceMode) -> Result<(), Error<S, P>> {
        self.send(Command::InternalReference(mode))
    }

    /// Select the code loaded on a clear
    pub fn set_clear_code(&mut self, code: ClearCode) -> Result<(), Error<S, P>> {
        self.send(Command::SetClearCode(code))
    }

    /// Set the LDAC register. Channels with their bit set (bit 0 = A) are
    /// updated on every write and ignore the ~LDAC pin.
    pub fn set_ldac_mask(&mut self, mask: u8) -> Result<(), Error<S, P>> {
        self.send(Command::SetLdac(mask))
    }

    /// Reset all registers to their power-on defaults.
    ///
    /// The device needs [`POST_RESET_SETTLE_US`] before the next command.
    /// This function returns right after the frame, waiting is up to the
    /// caller.
    pub fn software_reset(&mut self) -> Result<(), Error<S, P>> {
        self.send(Command::SoftwareReset)
    }

    /// Send a frame built from raw fields, nothing is validated or aligned.
    pub fn send_raw_frame(
        &mut self,
        cmd: u8,
        addr: u8,
        data: u16,
        feature: u8,
    ) -> Result<(), Error<S, P>> {
        self.send_raw_bytes(Frame::raw(cmd, addr, data, feature).to_bytes())
    }

    /// Send four bytes as they are.
    pub fn send_raw_bytes(&mut self, bytes: [u8; 4]) -> Result<(), Error<S, P>> {
        execute(&mut self.spi, &mut self.sync, &bytes)
    }

    /// Align to the part's resolution, encode and send one command.
    pub fn send(&mut self, cmd: Command) -> Result<(), Error<S, P>> {
        self.send_raw_bytes(Frame::from(cmd.aligned(self.resolution)).to_bytes())
    }
}
