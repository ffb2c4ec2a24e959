//! Board and timing configuration.
//!
//! Everything the firmware variants used to pick at compile time (panel
//! model, mirroring, backlight polarity, input) lives in [`BoardConfig`],
//! resolved once at startup.

use crate::error::{
    ConfigError,
    Error,
};

// ── Timing ──────────────────────────────────────────────────────────────────

/// Period of the UI tick source.
pub const TICK_PERIOD_MS: u32 = 2;

/// Longest the render loop may sleep, so external state changes are picked up
/// at least this often.
pub const MAX_DELAY_MS: u32 = 500;

/// Shortest the render loop may sleep: one scheduler tick, never below 1 ms.
pub const MIN_DELAY_MS: u32 = {
    let ms = 1000 / embassy_time::TICK_HZ;
    if ms == 0 { 1 } else { ms as u32 }
};

/// Minimum spacing between two redraws of the screen.
pub const REFRESH_PERIOD_MS: u32 = 33;

/// Input devices are polled this often.
pub const INPUT_PERIOD_MS: u32 = 33;

/// Drag distance after which a press becomes a gesture.
pub const GESTURE_LIMIT_PX: u32 = 50;

/// How long a task may wait for the shared UI lock before giving up.
pub const LOCK_TIMEOUT_MS: u64 = 2000;

/// Period of the clock producer.
pub const CLOCK_PERIOD_MS: u64 = 1000;

/// SPI clock for the LCD.
pub const PIXEL_CLOCK_HZ: u32 = 20_000_000;

/// SPI clock for the touch controller, which shares the LCD's bus.
pub const TOUCH_CLOCK_HZ: u32 = 2_000_000;

/// Touch pressure below which the panel counts as released.
pub const TOUCH_PRESSURE_THRESHOLD: u16 = 400;

/// Lines of the panel covered by one DMA transfer buffer.
pub const DRAW_BUF_LINES: usize = 20;

// ── Panel selection ─────────────────────────────────────────────────────────

/// The LCD controllers the board can be fitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelModel {
    /// 240×320 TFT, BGR.
    Ili9341,
    /// 240×240 round TFT, inverted colours.
    Gc9a01,
    /// 320×170 TFT, inverted colours, mounted landscape.
    St7789,
}

impl PanelModel {
    pub const fn as_str(self) -> &'static str {
        match self {
            PanelModel::Ili9341 => "ili9341",
            PanelModel::Gc9a01 => "gc9a01",
            PanelModel::St7789 => "st7789",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        [PanelModel::Ili9341, PanelModel::Gc9a01, PanelModel::St7789]
            .into_iter()
            .find(|model| s.eq_ignore_ascii_case(model.as_str()))
    }

    /// Visible resolution as `(width, height)` after rotation.
    pub const fn resolution(self) -> (u16, u16) {
        match self {
            PanelModel::Ili9341 => (240, 320),
            PanelModel::Gc9a01 => (240, 240),
            PanelModel::St7789 => (320, 170),
        }
    }

    pub const fn invert_colors(self) -> bool {
        matches!(self, PanelModel::Gc9a01 | PanelModel::St7789)
    }

    pub const fn bgr(self) -> bool {
        matches!(self, PanelModel::Ili9341 | PanelModel::Gc9a01)
    }

    /// Size of one DMA draw buffer in bytes (RGB565).
    pub const fn draw_buffer_bytes(self) -> usize {
        self.resolution().0 as usize * DRAW_BUF_LINES * 2
    }
}

// ── Runtime configuration ───────────────────────────────────────────────────

/// Timing of the UI runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiConfig {
    pub refresh_period_ms: u32,
    pub input_period_ms: u32,
    pub gesture_limit_px: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_period_ms: REFRESH_PERIOD_MS,
            input_period_ms: INPUT_PERIOD_MS,
            gesture_limit_px: GESTURE_LIMIT_PX,
        }
    }
}

/// Bounds applied to the delay the UI runtime asks for.
///
/// Always `1 <= min_delay_ms <= max_delay_ms`, so the render loop sleeps
/// for at least a millisecond on every iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerConfig {
    min_delay_ms: u32,
    max_delay_ms: u32,
}

impl SchedulerConfig {
    pub const fn new(min_delay_ms: u32, max_delay_ms: u32) -> Result<Self, Error> {
        if min_delay_ms == 0 || min_delay_ms > max_delay_ms {
            return Err(Error::Config(ConfigError::DelayBand));
        }
        Ok(Self {
            min_delay_ms,
            max_delay_ms,
        })
    }

    pub const fn min_delay_ms(&self) -> u32 {
        self.min_delay_ms
    }

    pub const fn max_delay_ms(&self) -> u32 {
        self.max_delay_ms
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: MIN_DELAY_MS,
            max_delay_ms: MAX_DELAY_MS,
        }
    }
}

/// How raw touch controller readings map onto the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    pub clock_hz: u32,
    pub pressure_threshold: u16,
    pub swap_xy: bool,
    pub mirror_x: bool,
    pub mirror_y: bool,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            clock_hz: TOUCH_CLOCK_HZ,
            pressure_threshold: TOUCH_PRESSURE_THRESHOLD,
            swap_xy: false,
            mirror_x: false,
            mirror_y: false,
        }
    }
}

/// Everything a firmware program needs to know about the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub panel: PanelModel,
    pub pixel_clock_hz: u32,
    pub mirror_x: bool,
    pub backlight_on_high: bool,
    /// Use the 4-way navigation buttons as a UI input device.
    pub nav_buttons: bool,
    /// XPT2046 touch controller on the LCD's SPI bus, if fitted.
    pub touch: Option<TouchConfig>,
    pub lock_timeout_ms: u64,
    pub clock_period_ms: u64,
    pub ui: UiConfig,
    pub scheduler: SchedulerConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            panel: PanelModel::Ili9341,
            pixel_clock_hz: PIXEL_CLOCK_HZ,
            mirror_x: true,
            backlight_on_high: true,
            nav_buttons: true,
            touch: None,
            lock_timeout_ms: LOCK_TIMEOUT_MS,
            clock_period_ms: CLOCK_PERIOD_MS,
            ui: UiConfig::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Resolve the configuration for this build.
    ///
    /// The panel model comes from the `LCD_PANEL` environment variable at
    /// build time (`ili9341`, `gc9a01` or `st7789`), the touch controller from
    /// `LCD_TOUCH` (`xpt2046` or `none`).
    pub fn resolve() -> Result<Self, Error> {
        Self::with_names(option_env!("LCD_PANEL"), option_env!("LCD_TOUCH"))
    }

    pub fn with_panel_name(name: Option<&str>) -> Result<Self, Error> {
        Self::with_names(name, None)
    }

    pub fn with_names(panel: Option<&str>, touch: Option<&str>) -> Result<Self, Error> {
        let mut config = Self::default();
        if let Some(name) = panel {
            config.panel = PanelModel::parse(name).ok_or(ConfigError::UnknownPanel)?;
        }
        if let Some(name) = touch.map(str::trim) {
            config.touch = if name.eq_ignore_ascii_case("xpt2046") {
                Some(TouchConfig::default())
            } else if name.is_empty() || name.eq_ignore_ascii_case("none") {
                None
            } else {
                return Err(ConfigError::UnknownTouch.into());
            };
        }
        info!(
            "Board config: panel={} clock={}Hz touch={}",
            config.panel.as_str(),
            config.pixel_clock_hz,
            config.touch.is_some()
        );
        Ok(config)
    }
}
