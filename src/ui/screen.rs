//! The screen: background, labels and an optional input device.

use embedded_graphics::{
    mono_font::{
        MonoFont,
        MonoTextStyle,
        ascii::FONT_10X20,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::{
        Alignment,
        Baseline,
        Text,
        TextStyle,
        TextStyleBuilder,
    },
};
use heapless::{
    String,
    Vec,
};

use super::{
    FlushReady,
    NO_TIMER_READY,
    UiRuntime,
    UiTicks,
    gesture::GestureRecognizer,
    input::{
        Direction,
        InputDevice,
        InputSample,
        NoInput,
    },
};
use crate::{
    config::UiConfig,
    error::{
        Error,
        UiFault,
    },
};

/// Labels per screen.
pub const MAX_LABELS: usize = 8;

/// Bytes of text per label.
pub const LABEL_CAPACITY: usize = 32;

const FONT: &MonoFont<'static> = &FONT_10X20;

/// Distance between an edge-aligned label's centre line and the screen edge.
const EDGE_INSET: i32 = 20;

/// Handle to a label on a [`Screen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LabelId(u8);

/// Where a label is anchored before its offset is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    Center,
    TopMid,
    BottomMid,
}

/// Called from [`Screen::process_pending`] when a gesture is recognised,
/// with the label registered alongside it.
pub type GestureHandler<'a, D, I> =
    fn(&mut Screen<'a, D, I>, LabelId, Direction) -> Result<(), Error>;

struct Label {
    text: String<LABEL_CAPACITY>,
    color: Rgb565,
    align: Align,
    offset: Point,
    /// Area covered the last time this label was drawn.
    drawn: Option<Rectangle>,
    dirty: bool,
}

impl Label {
    fn layout(&self, bounds: Rectangle) -> Text<'_, MonoTextStyle<'static, Rgb565>> {
        let center = bounds.center();
        let anchor = match self.align {
            Align::Center => center,
            Align::TopMid => Point::new(center.x, bounds.top_left.y + EDGE_INSET),
            Align::BottomMid => Point::new(
                center.x,
                bounds.top_left.y + bounds.size.height as i32 - EDGE_INSET,
            ),
        };
        Text::with_text_style(
            &self.text,
            anchor + self.offset,
            MonoTextStyle::new(FONT, self.color),
            text_style(),
        )
    }
}

fn text_style() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build()
}

fn overlaps(a: &Rectangle, b: &Rectangle) -> bool {
    let i = a.intersection(b);
    i.size.width > 0 && i.size.height > 0
}

/// A retained-mode screen drawn onto `D`.
///
/// Label changes only mark the label dirty; pixels are pushed from
/// [`process_pending`](UiRuntime::process_pending), at most once per refresh
/// period.
pub struct Screen<'a, D, I = NoInput> {
    target: D,
    background: Rgb565,
    labels: Vec<Label, MAX_LABELS>,
    ticks: &'a UiTicks,
    flush_ready: &'a FlushReady,
    config: UiConfig,
    input: Option<I>,
    gestures: GestureRecognizer,
    on_gesture: Option<(GestureHandler<'a, D, I>, LabelId)>,
    full_redraw: bool,
    last_refresh: u32,
    last_input: u32,
    frames: u32,
}

impl<'a, D> Screen<'a, D, NoInput>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Create a screen covering the whole of `target`.
    pub fn new(
        target: D,
        background: Rgb565,
        ticks: &'a UiTicks,
        flush_ready: &'a FlushReady,
        config: UiConfig,
    ) -> Self {
        let size = target.bounding_box().size;
        info!("Screen {}x{} created", size.width, size.height);

        let now = ticks.now();
        Self {
            target,
            background,
            labels: Vec::new(),
            ticks,
            flush_ready,
            config,
            input: None,
            gestures: GestureRecognizer::new(config.gesture_limit_px),
            on_gesture: None,
            full_redraw: true,
            // Due immediately.
            last_refresh: now.wrapping_sub(config.refresh_period_ms),
            last_input: now.wrapping_sub(config.input_period_ms),
            frames: 0,
        }
    }
}

impl<'a, D, I> Screen<'a, D, I>
where
    D: DrawTarget<Color = Rgb565>,
    I: InputDevice,
{
    /// Attach an input device. Any gesture handler is dropped.
    pub fn with_input<J: InputDevice>(self, input: J) -> Screen<'a, D, J> {
        Screen {
            target: self.target,
            background: self.background,
            labels: self.labels,
            ticks: self.ticks,
            flush_ready: self.flush_ready,
            config: self.config,
            input: Some(input),
            gestures: self.gestures,
            on_gesture: None,
            full_redraw: self.full_redraw,
            last_refresh: self.last_refresh,
            last_input: self.last_input,
            frames: self.frames,
        }
    }

    pub fn add_label(
        &mut self,
        text: &str,
        color: Rgb565,
        align: Align,
        offset: Point,
    ) -> Result<LabelId, Error> {
        let id = LabelId(self.labels.len() as u8);
        let label = Label {
            text: String::try_from(text).map_err(|_| UiFault::TextTooLong)?,
            color,
            align,
            offset,
            drawn: None,
            dirty: true,
        };
        self.labels
            .push(label)
            .map_err(|_| UiFault::WidgetLimit)?;
        Ok(id)
    }

    pub fn label_text(&self, label: LabelId) -> Option<&str> {
        self.labels
            .get(usize::from(label.0))
            .map(|l| l.text.as_str())
    }

    /// Call `handler` with `label` whenever the input device produces a
    /// gesture.
    pub fn on_gesture(&mut self, label: LabelId, handler: GestureHandler<'a, D, I>) {
        self.on_gesture = Some((handler, label));
    }

    /// Number of frames flushed so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    fn dirty(&self) -> bool {
        self.full_redraw || self.labels.iter().any(|l| l.dirty)
    }

    fn poll_input(&mut self) -> Result<(), Error> {
        let Some(input) = self.input.as_mut() else {
            return Ok(());
        };
        if self.ticks.elapsed(self.last_input) < self.config.input_period_ms {
            return Ok(());
        }
        self.last_input = self.ticks.now();

        let gesture = match input.read() {
            InputSample::Released => {
                self.gestures.released();
                None
            }
            InputSample::Pressed(at) => self.gestures.pressed(at),
            InputSample::Key(direction) => Some(direction),
        };

        if let Some(direction) = gesture {
            debug!("Gesture {}", direction.as_str());
            if let Some((handler, label)) = self.on_gesture {
                handler(self, label, direction)?;
            }
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), Error> {
        let bounds = self.target.bounding_box();

        if self.full_redraw {
            self.target
                .clear(self.background)
                .map_err(|_| UiFault::Draw)?;
            for label in self.labels.iter_mut() {
                label.drawn = None;
                label.dirty = true;
            }
            self.full_redraw = false;
        }

        // At most one entry per label.
        let mut erased: Vec<Rectangle, MAX_LABELS> = Vec::new();
        for label in self.labels.iter_mut().filter(|l| l.dirty) {
            if let Some(old) = label.drawn.take() {
                self.target
                    .fill_solid(&old, self.background)
                    .map_err(|_| UiFault::Draw)?;
                let _ = erased.push(old);
            }
        }

        for label in self.labels.iter_mut() {
            let damaged = label
                .drawn
                .is_some_and(|area| erased.iter().any(|e| overlaps(e, &area)));
            if !label.dirty && !damaged {
                continue;
            }
            let text = label.layout(bounds);
            text.draw(&mut self.target).map_err(|_| UiFault::Draw)?;
            let area = text.bounding_box();
            label.drawn = Some(area);
            label.dirty = false;
        }
        Ok(())
    }
}

impl<D, I> UiRuntime for Screen<'_, D, I>
where
    D: DrawTarget<Color = Rgb565>,
    I: InputDevice,
{
    fn process_pending(&mut self) -> Result<u32, Error> {
        self.poll_input()?;

        let refresh = self.config.refresh_period_ms;
        if self.dirty() && self.ticks.elapsed(self.last_refresh) >= refresh {
            self.redraw()?;
            self.last_refresh = self.ticks.now();
            self.frames = self.frames.wrapping_add(1);
            self.flush_ready.signal(self.frames);
            trace!("Frame {} flushed", self.frames);
        }

        let mut next = NO_TIMER_READY;
        if self.dirty() {
            next = next.min(refresh.saturating_sub(self.ticks.elapsed(self.last_refresh)));
        }
        if self.input.is_some() {
            let input = self.config.input_period_ms;
            next = next.min(input.saturating_sub(self.ticks.elapsed(self.last_input)));
        }
        Ok(next)
    }

    fn set_label_text(&mut self, label: LabelId, text: &str) -> Result<(), Error> {
        let label = self
            .labels
            .get_mut(usize::from(label.0))
            .ok_or(UiFault::UnknownLabel)?;
        if label.text.as_str() == text {
            return Ok(());
        }
        label.text = String::try_from(text).map_err(|_| UiFault::TextTooLong)?;
        label.dirty = true;
        Ok(())
    }
}
