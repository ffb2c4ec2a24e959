//! SPI LCD panels supported by the board.

use embedded_graphics::{
    Pixel,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};
use esp_hal::gpio::{
    Level,
    Output,
    OutputConfig,
};
use mipidsi::{
    models::{
        GC9A01,
        ILI9341Rgb565,
        ST7789,
    },
    options::{
        ColorInversion,
        ColorOrder,
        Orientation,
        Rotation,
    },
};

use super::{
    BusDevice,
    DisplayResources,
    SharedBus,
};
use crate::config::{
    BoardConfig,
    DRAW_BUF_LINES,
    PanelModel,
};

type SpiInterface<'a> = mipidsi::interface::SpiInterface<'a, BusDevice<'a>, Output<'a>>;

type Driver<'a, M> = mipidsi::Display<SpiInterface<'a>, M, Output<'a>>;

/// Largest draw buffer any supported panel needs (widest panel).
const MAX_DRAW_BUFFER: usize = 320 * DRAW_BUF_LINES * 2;

/// The panel fitted to this board, selected at startup.
pub enum Panel<'a> {
    Ili9341(Driver<'a, ILI9341Rgb565>),
    Gc9a01(Driver<'a, GC9A01>),
    St7789(Driver<'a, ST7789>),
}

/// Controller-native size, rotation and RAM offset for each model.
const fn native_geometry(model: PanelModel) -> ((u16, u16), Rotation, (u16, u16)) {
    match model {
        PanelModel::Ili9341 => ((240, 320), Rotation::Deg0, (0, 0)),
        PanelModel::Gc9a01 => ((240, 240), Rotation::Deg0, (0, 0)),
        PanelModel::St7789 => ((170, 320), Rotation::Deg90, (35, 0)),
    }
}

macro_rules! build_panel {
    ($model:expr, $di:expr, $rst:expr, $panel:expr, $mirror_x:expr, $delay:expr) => {{
        let ((w, h), rotation, (ox, oy)) = native_geometry($panel);
        let mut orientation = Orientation::new().rotate(rotation);
        if $mirror_x {
            orientation = orientation.flip_horizontal();
        }
        mipidsi::Builder::new($model, $di)
            .reset_pin($rst)
            .display_size(w, h)
            .display_offset(ox, oy)
            .orientation(orientation)
            .invert_colors(if $panel.invert_colors() {
                ColorInversion::Inverted
            } else {
                ColorInversion::Normal
            })
            .color_order(if $panel.bgr() {
                ColorOrder::Bgr
            } else {
                ColorOrder::Rgb
            })
            .init($delay)
            .unwrap()
    }};
}

impl<'a> Panel<'a> {
    /// Reset and initialise the configured panel on its slot of `bus`.
    pub fn new(res: DisplayResources<'a>, bus: &'a SharedBus<'a>, config: &BoardConfig) -> Self {
        let mut delay = esp_hal::delay::Delay::new();

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
        rst.set_high();

        let spi_device = BusDevice::new(bus, res.cs, config.pixel_clock_hz);

        let buffer = crate::mk_static!([u8; MAX_DRAW_BUFFER], [0_u8; MAX_DRAW_BUFFER]);
        let buffer = &mut buffer[..config.panel.draw_buffer_bytes()];
        let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

        let panel = config.panel;
        match panel {
            PanelModel::Ili9341 => Panel::Ili9341(build_panel!(
                ILI9341Rgb565,
                di,
                rst,
                panel,
                config.mirror_x,
                &mut delay
            )),
            PanelModel::Gc9a01 => Panel::Gc9a01(build_panel!(
                GC9A01,
                di,
                rst,
                panel,
                config.mirror_x,
                &mut delay
            )),
            PanelModel::St7789 => Panel::St7789(build_panel!(
                ST7789,
                di,
                rst,
                panel,
                config.mirror_x,
                &mut delay
            )),
        }
    }
}

impl OriginDimensions for Panel<'_> {
    fn size(&self) -> Size {
        match self {
            Panel::Ili9341(d) => d.size(),
            Panel::Gc9a01(d) => d.size(),
            Panel::St7789(d) => d.size(),
        }
    }
}

impl<'a> DrawTarget for Panel<'a> {
    type Color = Rgb565;
    // All models share the SPI interface and so its error type.
    type Error = <Driver<'a, ST7789> as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        match self {
            Panel::Ili9341(d) => d.draw_iter(pixels),
            Panel::Gc9a01(d) => d.draw_iter(pixels),
            Panel::St7789(d) => d.draw_iter(pixels),
        }
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        match self {
            Panel::Ili9341(d) => d.fill_contiguous(area, colors),
            Panel::Gc9a01(d) => d.fill_contiguous(area, colors),
            Panel::St7789(d) => d.fill_contiguous(area, colors),
        }
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        match self {
            Panel::Ili9341(d) => d.fill_solid(area, color),
            Panel::Gc9a01(d) => d.fill_solid(area, color),
            Panel::St7789(d) => d.fill_solid(area, color),
        }
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        match self {
            Panel::Ili9341(d) => d.clear(color),
            Panel::Gc9a01(d) => d.clear(color),
            Panel::St7789(d) => d.clear(color),
        }
    }
}
