//! The SPI bus shared by the LCD and the touch controller.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::{
    delay::DelayNs,
    spi::{
        Error as _,
        ErrorKind,
        ErrorType,
        Operation,
        SpiBus,
        SpiDevice,
    },
};
use esp_hal::{
    Async,
    delay::Delay,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
        OutputPin,
    },
    spi::master::{
        Config,
        Spi,
        SpiDmaBus,
    },
    time::Rate,
};

use super::SpiResources;
use crate::config::DRAW_BUF_LINES;

/// One draw buffer of the widest panel.
const DMA_BUFFER: usize = 320 * DRAW_BUF_LINES * 2;

pub type SharedBus<'a> = Mutex<RefCell<SpiDmaBus<'a, Async>>>;

/// Set up SPI2 with DMA. Each device applies its own clock per transaction.
pub fn shared_bus(res: SpiResources<'static>) -> &'static SharedBus<'static> {
    let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(DMA_BUFFER);
    let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).unwrap();
    let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).unwrap();

    let spi = Spi::new(res.spi, Config::default())
        .unwrap()
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_miso(res.miso)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

    crate::mk_static!(SharedBus<'static>, Mutex::new(RefCell::new(spi)))
}

#[derive(Debug)]
pub enum BusError {
    /// The device's clock could not be applied to the bus.
    Config,
    Spi(esp_hal::spi::Error),
}

impl embedded_hal::spi::Error for BusError {
    fn kind(&self) -> ErrorKind {
        match self {
            BusError::Config => ErrorKind::Other,
            BusError::Spi(e) => e.kind(),
        }
    }
}

/// A chip on the shared bus with its own chip select and SPI clock.
pub struct BusDevice<'a> {
    bus: &'a SharedBus<'a>,
    cs: Output<'a>,
    config: Config,
    delay: Delay,
}

impl<'a> BusDevice<'a> {
    pub fn new(bus: &'a SharedBus<'a>, cs: impl OutputPin + 'a, clock_hz: u32) -> Self {
        Self {
            bus,
            cs: Output::new(cs, Level::High, OutputConfig::default()),
            config: Config::default().with_frequency(Rate::from_hz(clock_hz)),
            delay: Delay::new(),
        }
    }
}

impl ErrorType for BusDevice<'_> {
    type Error = BusError;
}

impl SpiDevice for BusDevice<'_> {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), BusError> {
        critical_section::with(|cs| {
            let mut bus = self.bus.borrow_ref_mut(cs);
            bus.apply_config(&self.config)
                .map_err(|_| BusError::Config)?;

            self.cs.set_low();
            let result = run(&mut *bus, &mut self.delay, operations);
            let flushed = SpiBus::flush(&mut *bus).map_err(BusError::Spi);
            self.cs.set_high();
            result.and(flushed)
        })
    }
}

fn run(
    bus: &mut SpiDmaBus<'_, Async>,
    delay: &mut Delay,
    operations: &mut [Operation<'_, u8>],
) -> Result<(), BusError> {
    for op in operations {
        match op {
            Operation::Read(words) => SpiBus::read(bus, words),
            Operation::Write(words) => SpiBus::write(bus, words),
            Operation::Transfer(read, write) => SpiBus::transfer(bus, read, write),
            Operation::TransferInPlace(words) => SpiBus::transfer_in_place(bus, words),
            Operation::DelayNs(ns) => SpiBus::flush(bus).map(|()| delay.delay_ns(*ns)),
        }
        .map_err(BusError::Spi)?;
    }
    Ok(())
}
