//! Framed SPI transfers
//!
//! ~SYNC is pulled low for the duration of one frame and is always released
//! again, even when the bus reports an error. The device discards a frame
//! that ends early, so nothing is retried here.
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use embedded_hal_async::spi::SpiBus as AsyncSpiBus;

use crate::Error;

/// ~SYNC held low. Dropping the guard without [`SyncLow::release`] still
/// drives the pin high, the error is lost in that case.
pub(crate) struct SyncLow<'a, P: OutputPin> {
    sync: &'a mut P,
    released: bool,
}

impl<'a, P: OutputPin> SyncLow<'a, P> {
    pub(crate) fn assert(sync: &'a mut P) -> Result<Self, P::Error> {
        sync.set_low()?;
        Ok(Self {
            sync,
            released: false,
        })
    }

    pub(crate) fn release(mut self) -> Result<(), P::Error> {
        self.released = true;
        self.sync.set_high()
    }
}

impl<P: OutputPin> Drop for SyncLow<'_, P> {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.sync.set_high();
        }
    }
}

/// Combine the outcome of the transfer with the outcome of releasing ~SYNC.
/// A bus error takes precedence over a pin error.
fn finish<S, P>(sent: Result<(), S>, released: Result<(), P>) -> Result<(), Error<S, P>> {
    match (sent, released) {
        (Err(e), _) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("spi transfer failed");
            Err(Error::Spi(e))
        }
        (Ok(()), Err(e)) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("~SYNC release failed");
            Err(Error::Pin(e))
        }
        (Ok(()), Ok(())) => Ok(()),
    }
}

/// Shift `payload` out inside one ~SYNC frame and wait for the bus to idle.
pub(crate) fn execute<SPI, SYNC>(
    spi: &mut SPI,
    sync: &mut SYNC,
    payload: &[u8],
) -> Result<(), Error<SPI::Error, SYNC::Error>>
where
    SPI: SpiBus,
    SYNC: OutputPin,
{
    #[cfg(feature = "defmt")]
    defmt::trace!("frame {=[u8]:x}", payload);
    let frame = SyncLow::assert(sync).map_err(Error::Pin)?;
    let sent = spi.write(payload).and_then(|()| spi.flush());
    finish(sent, frame.release())
}

/// Async counterpart of [`execute`].
pub(crate) async fn execute_async<SPI, SYNC>(
    spi: &mut SPI,
    sync: &mut SYNC,
    payload: &[u8],
) -> Result<(), Error<SPI::Error, SYNC::Error>>
where
    SPI: AsyncSpiBus,
    SYNC: OutputPin,
{
    #[cfg(feature = "defmt")]
    defmt::trace!("frame {=[u8]:x}", payload);
    let frame = SyncLow::assert(sync).map_err(Error::Pin)?;
    let sent = match spi.write(payload).await {
        Ok(()) => spi.flush().await,
        Err(e) => Err(e),
    };
    finish(sent, frame.release())
}
