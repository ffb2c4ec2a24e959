//! ESP32-S3 board bring-up: pin map, clocks, SPI bus, panel, backlight, touch
//! and buttons.
//!
//! ```rust,ignore
//! let peripherals = lcd_clock::board::init();
//! let resources = lcd_clock::split_resources!(peripherals);
//! let config = lcd_clock::config::BoardConfig::resolve().unwrap();
//! let board = lcd_clock::board::Board::new(resources, &config);
//! ```

mod backlight;
mod bus;
mod buttons;
mod input;
mod panel;

pub use backlight::Backlight;
pub use bus::{
    BusDevice,
    BusError,
    SharedBus,
};
pub use buttons::Buttons;
use embedded_graphics::prelude::OriginDimensions;
use esp_hal::{
    assign_resources,
    clock::{
        Clock,
        CpuClock,
    },
    rom,
};
pub use input::{
    BoardInput,
    Touch,
};
pub use panel::Panel;

use crate::{
    config::BoardConfig,
    touch::Xpt2046,
};

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        spi: SpiResources<'d> {
            sck: GPIO6,
            miso: GPIO2,
            mosi: GPIO7,
            spi: SPI2,
            dma: DMA_CH0,
        },
        display: DisplayResources<'d> {
            dc: GPIO5,
            rst: GPIO3,
            cs: GPIO4,
        },
        touch: TouchResources<'d> {
            cs: GPIO20,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        buttons: ButtonResources<'d> {
            up: GPIO10,
            down: GPIO11,
            left: GPIO12,
            right: GPIO13,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Minimal CPU clock switcher for ESP32-S3.
///
/// Steps through an intermediate frequency before reaching the target,
/// which is required by the hardware.
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(match cpu_clock_speed {
                CpuClock::_80MHz => 0,
                CpuClock::_160MHz => 1,
                CpuClock::_240MHz => 2,
                _ => panic!("Unsupported CPU clock speed"),
            })
        });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Initialise the board and return the raw peripheral set.
///
/// Call this once at the top of `main`, then use [`split_resources!`] to
/// break the peripherals into typed resource groups.
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}

/// Everything the firmware programs draw on and read from.
pub struct Board {
    pub panel: Panel<'static>,
    pub backlight: Backlight,
    pub input: BoardInput,
}

impl Board {
    /// Bring up the panel with the backlight off, then the touch controller
    /// and buttons the configuration asks for.
    pub fn new(resources: Resources<'static>, config: &BoardConfig) -> Self {
        info!("Turn off LCD backlight");
        let backlight = Backlight::new(resources.backlight, config.backlight_on_high);

        info!("Initialize SPI bus");
        let bus = bus::shared_bus(resources.spi);

        info!("Install {} panel driver", config.panel.as_str());
        let panel = Panel::new(resources.display, bus, config);

        let touch = config.touch.map(|touch| {
            info!("Initialize touch controller XPT2046");
            let device = BusDevice::new(bus, resources.touch.cs, touch.clock_hz);
            Xpt2046::new(device, touch, panel.size())
        });
        let buttons = config.nav_buttons.then(|| Buttons::from(resources.buttons));

        Self {
            panel,
            backlight,
            input: BoardInput::new(touch, buttons),
        }
    }
}
