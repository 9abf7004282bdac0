//! Async driver
//!
//! Same command set as [`crate::Dac8x68`], the SPI transfer is awaited
//! instead of blocking. ~SYNC stays a plain output pin.
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;

use crate::transaction::execute_async;
use crate::{
    Channel, ClearCode, Command, Error, Frame, PowerMode, ReferenceMode, Resolution,
    POST_RESET_SETTLE_US,
};

/// DAC7568/DAC8168/DAC8568 on an async SPI bus
pub struct Dac8x68<SPI, SYNC> {
    spi: SPI,
    sync: SYNC,
    resolution: Resolution,
}

impl<SPI, SYNC, S, P> Dac8x68<SPI, SYNC>
where
    SPI: SpiBus<Error = S>,
    SYNC: OutputPin<Error = P>,
{
    /// Create a new driver, `resolution` decides how many data bits are sent.
    pub fn new(spi: SPI, sync: SYNC, resolution: Resolution) -> Self {
        Self {
            spi,
            sync,
            resolution,
        }
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
    pub async fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<S, P>> {
        self.sync.set_high().map_err(Error::Pin)?;
        self.software_reset().await?;
        delay.delay_us(POST_RESET_SETTLE_US).await;
        Ok(())
    }

    /// Write a left-aligned value to the input register of `chan`.
    pub async fn write_input(&mut self, chan: Channel, val: u16) -> Result<(), Error<S, P>> {
        self.send(Command::WriteInput {
            channel: chan,
            value: val,
        })
        .await
    }

    /// Load the input register of `chan` into its DAC register. The output
    /// settles within [`SETTLING_TIME_US`](crate::SETTLING_TIME_US).
    pub async fn update(&mut self, chan: Channel) -> Result<(), Error<S, P>> {
        self.send(Command::UpdateDac(chan)).await
    }

    /// Write and load `chan` in a single frame.
    pub async fn write_and_update(&mut self, chan: Channel, val: u16) -> Result<(), Error<S, P>> {
        self.send(Command::WriteInputUpdateOne {
            channel: chan,
            value: val,
        })
        .await
    }

    /// Write all input registers and load all DAC registers with `val`.
    pub async fn write_and_update_all(&mut self, val: u16) -> Result<(), Error<S, P>> {
        self.send(Command::WriteInputUpdateAll(val)).await
    }

    /// Write channel A to H in order. Not atomic, stops at the first error.
    pub async fn write_all_channels(&mut self, vals: [u16; 8]) -> Result<(), Error<S, P>> {
        for (chan, val) in Channel::ALL.into_iter().zip(vals) {
            self.write_input(chan, val).await?;
        }
        Ok(())
    }

    /// Load all DAC registers at once.
    pub async fn update_all_channels(&mut self) -> Result<(), Error<S, P>> {
        self.update(Channel::AllDacs).await
    }

    /// Power up or down a single or all DAC channels
    pub async fn set_power_mode(
        &mut self,
        chan: Channel,
        mode: PowerMode,
    ) -> Result<(), Error<S, P>> {
        self.send(Command::SetPowerMode {
            channel: chan,
            mode,
        })
        .await
    }

    /// Configure the internal reference, flex sub-modes are not checked.
    pub async fn set_reference_mode(&mut self, mode: ReferenceMode) -> Result<(), Error<S, P>> {
        self.send(Command::InternalReference(mode)).await
    }

    /// Select the code loaded on a clear
    pub async fn set_clear_code(&mut self, code: ClearCode) -> Result<(), Error<S, P>> {
        self.send(Command::SetClearCode(code)).await
    }

    /// Set the LDAC register (bit 0 = A)
    pub async fn set_ldac_mask(&mut self, mask: u8) -> Result<(), Error<S, P>> {
        self.send(Command::SetLdac(mask)).await
    }

    /// Reset all registers. Does not wait for [`POST_RESET_SETTLE_US`].
    pub async fn software_reset(&mut self) -> Result<(), Error<S, P>> {
        self.send(Command::SoftwareReset).await
    }

    /// Send a frame built from raw fields, nothing is validated or aligned.
    pub async fn send_raw_frame(
        &mut self,
        cmd: u8,
        addr: u8,
        data: u16,
        feature: u8,
    ) -> Result<(), Error<S, P>> {
        self.send_raw_bytes(Frame::raw(cmd, addr, data, feature).to_bytes())
            .await
    }

    /// Send four bytes as they are.
    pub async fn send_raw_bytes(&mut self, bytes: [u8; 4]) -> Result<(), Error<S, P>> {
        execute_async(&mut self.spi, &mut self.sync, &bytes).await
    }

    /// Align to the part's resolution, encode and send one command.
    pub async fn send(&mut self, cmd: Command) -> Result<(), Error<S, P>> {
        let frame = Frame::from(cmd.aligned(self.resolution));
        self.send_raw_bytes(frame.to_bytes()).await
    }
}
