mod common;

use common::{
    BACKGROUND,
    Canvas,
    FOREGROUND,
    HEIGHT,
    Script,
    TestScreen,
    WIDTH,
};
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};
use lcd_clock::{
    Error,
    config::{
        INPUT_PERIOD_MS,
        REFRESH_PERIOD_MS,
        UiConfig,
    },
    error::UiFault,
    ui::{
        Align,
        Direction,
        FlushReady,
        InputSample,
        LABEL_CAPACITY,
        LabelId,
        MAX_LABELS,
        NO_TIMER_READY,
        Screen,
        UiRuntime,
        UiTicks,
    },
};

fn center() -> Point {
    Point::new(WIDTH as i32 / 2, HEIGHT as i32 / 2)
}

#[test]
fn first_frame_clears_and_draws_labels() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut screen = common::screen(&ticks, &flushed);
    screen
        .add_label("12:30:45", FOREGROUND, Align::Center, Point::zero())
        .unwrap();

    assert_eq!(screen.target().count(BACKGROUND), 0);
    assert_eq!(screen.process_pending(), Ok(NO_TIMER_READY));

    assert_eq!(screen.frames(), 1);
    assert_eq!(flushed.try_take(), Some(1));
    let canvas = screen.target();
    assert_eq!(canvas.pixel(Point::zero()), Some(BACKGROUND));
    assert_eq!(canvas.pixel(Point::new(0, HEIGHT as i32 - 1)), Some(BACKGROUND));
    assert!(canvas.count(FOREGROUND) > 0);
    assert_eq!(
        canvas.count(BACKGROUND) + canvas.count(FOREGROUND),
        (WIDTH * HEIGHT) as usize
    );
}

#[test]
fn redraw_waits_for_refresh_period() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut screen = common::screen(&ticks, &flushed);
    let label = screen
        .add_label("12:30:45", FOREGROUND, Align::Center, Point::zero())
        .unwrap();
    screen.process_pending().unwrap();

    screen.set_label_text(label, "12:30:46").unwrap();
    assert_eq!(screen.process_pending(), Ok(REFRESH_PERIOD_MS));
    assert_eq!(screen.frames(), 1);

    ticks.inc(REFRESH_PERIOD_MS - 1);
    assert_eq!(screen.process_pending(), Ok(1));
    assert_eq!(screen.frames(), 1);

    ticks.inc(1);
    assert_eq!(screen.process_pending(), Ok(NO_TIMER_READY));
    assert_eq!(screen.frames(), 2);
    assert_eq!(flushed.try_take(), Some(2));
}

#[test]
fn unchanged_text_does_not_redraw() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut screen = common::screen(&ticks, &flushed);
    let label = screen
        .add_label("12:30:45", FOREGROUND, Align::Center, Point::zero())
        .unwrap();
    screen.process_pending().unwrap();

    screen.set_label_text(label, "12:30:45").unwrap();
    ticks.inc(REFRESH_PERIOD_MS);
    assert_eq!(screen.process_pending(), Ok(NO_TIMER_READY));
    assert_eq!(screen.frames(), 1);
}

#[test]
fn old_text_is_erased() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut screen = common::screen(&ticks, &flushed);
    let label = screen
        .add_label("WWWWWW", FOREGROUND, Align::Center, Point::zero())
        .unwrap();
    screen.process_pending().unwrap();
    assert!(screen.target().count(FOREGROUND) > 0);

    screen.set_label_text(label, "").unwrap();
    ticks.inc(REFRESH_PERIOD_MS);
    screen.process_pending().unwrap();

    assert_eq!(screen.target().count(FOREGROUND), 0);
    assert_eq!(screen.target().pixel(center()), Some(BACKGROUND));
}

#[test]
fn overlapping_label_survives_neighbour_erase() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut screen = common::screen(&ticks, &flushed);
    let wide = screen
        .add_label("################", FOREGROUND, Align::Center, Point::zero())
        .unwrap();
    screen
        .add_label("++", Rgb565::RED, Align::Center, Point::zero())
        .unwrap();
    screen.process_pending().unwrap();
    let red = screen.target().count(Rgb565::RED);
    assert!(red > 0);

    screen.set_label_text(wide, "").unwrap();
    ticks.inc(REFRESH_PERIOD_MS);
    screen.process_pending().unwrap();

    assert_eq!(screen.target().count(FOREGROUND), 0);
    assert_eq!(screen.target().count(Rgb565::RED), red);
}

#[test]
fn edge_aligned_labels_stay_on_their_edge() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut screen = common::screen(&ticks, &flushed);
    screen
        .add_label("top", Rgb565::RED, Align::TopMid, Point::zero())
        .unwrap();
    screen
        .add_label("bottom", Rgb565::GREEN, Align::BottomMid, Point::zero())
        .unwrap();
    screen.process_pending().unwrap();

    let canvas = screen.target();
    let rows_with = |color: Rgb565| {
        (0..HEIGHT as i32).filter(move |&y| {
            (0..WIDTH as i32).any(|x| canvas.pixel(Point::new(x, y)) == Some(color))
        })
    };
    assert!(rows_with(Rgb565::RED).all(|y| y < HEIGHT as i32 / 4));
    assert!(rows_with(Rgb565::GREEN).all(|y| y > HEIGHT as i32 * 3 / 4));
}

#[test]
fn label_limits() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut screen = common::screen(&ticks, &flushed);

    let too_long = "x".repeat(LABEL_CAPACITY + 1);
    assert_eq!(
        screen.add_label(&too_long, FOREGROUND, Align::Center, Point::zero()),
        Err(Error::DisplayLibrary(UiFault::TextTooLong))
    );

    let labels: Vec<LabelId> = (0..MAX_LABELS)
        .map(|_| {
            screen
                .add_label("", FOREGROUND, Align::Center, Point::zero())
                .unwrap()
        })
        .collect();
    assert_eq!(
        screen.add_label("", FOREGROUND, Align::Center, Point::zero()),
        Err(Error::DisplayLibrary(UiFault::WidgetLimit))
    );

    let first = labels[0];
    screen.set_label_text(first, "kept").unwrap();
    assert_eq!(
        screen.set_label_text(first, &too_long),
        Err(Error::DisplayLibrary(UiFault::TextTooLong))
    );
    assert_eq!(screen.label_text(first), Some("kept"));
}

#[test]
fn foreign_label_is_rejected() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut big = common::screen(&ticks, &flushed);
    big.add_label("a", FOREGROUND, Align::Center, Point::zero())
        .unwrap();
    let second = big
        .add_label("b", FOREGROUND, Align::Center, Point::zero())
        .unwrap();

    let mut small = common::screen(&ticks, &flushed);
    assert_eq!(
        small.set_label_text(second, "x"),
        Err(Error::DisplayLibrary(UiFault::UnknownLabel))
    );
    assert_eq!(small.label_text(second), None);
}

#[test]
fn draw_errors_are_reported() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    canvas.broken = true;
    let mut screen = Screen::new(canvas, BACKGROUND, &ticks, &flushed, UiConfig::default());

    assert_eq!(
        screen.process_pending(),
        Err(Error::DisplayLibrary(UiFault::Draw))
    );
    assert_eq!(screen.frames(), 0);
    assert_eq!(flushed.try_take(), None);
}

fn echo(screen: &mut TestScreen<'_, Script>, label: LabelId, direction: Direction) -> Result<(), Error> {
    screen.set_label_text(label, direction.as_str())
}

#[test]
fn swipe_runs_the_gesture_handler() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut screen = common::screen(&ticks, &flushed).with_input(Script::new([
        InputSample::Pressed(Point::new(100, 100)),
        InputSample::Pressed(Point::new(130, 100)),
        InputSample::Pressed(Point::new(170, 100)),
        InputSample::Pressed(Point::new(230, 100)),
        InputSample::Released,
    ]));
    let label = screen
        .add_label("Hello - Swipe me!", FOREGROUND, Align::Center, Point::zero())
        .unwrap();
    screen.on_gesture(label, echo);

    // Input is polled only once per input period.
    assert_eq!(screen.process_pending(), Ok(INPUT_PERIOD_MS));
    assert_eq!(screen.process_pending(), Ok(INPUT_PERIOD_MS));
    assert_eq!(screen.label_text(label), Some("Hello - Swipe me!"));

    ticks.inc(INPUT_PERIOD_MS);
    screen.process_pending().unwrap();
    assert_eq!(screen.label_text(label), Some("Hello - Swipe me!"));

    ticks.inc(INPUT_PERIOD_MS);
    screen.process_pending().unwrap();
    assert_eq!(screen.label_text(label), Some("RIGHT"));
    assert_eq!(screen.frames(), 2);

    // Still the same press: no second gesture.
    screen.set_label_text(label, "again").unwrap();
    ticks.inc(INPUT_PERIOD_MS);
    screen.process_pending().unwrap();
    assert_eq!(screen.label_text(label), Some("again"));
}

#[test]
fn navigation_keys_are_gestures() {
    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut screen = common::screen(&ticks, &flushed).with_input(Script::new([
        InputSample::Key(Direction::Up),
        InputSample::Released,
        InputSample::Key(Direction::Left),
    ]));
    let label = screen
        .add_label("", FOREGROUND, Align::Center, Point::zero())
        .unwrap();
    screen.on_gesture(label, echo);

    screen.process_pending().unwrap();
    assert_eq!(screen.label_text(label), Some("UP"));

    ticks.inc(INPUT_PERIOD_MS);
    screen.process_pending().unwrap();
    ticks.inc(INPUT_PERIOD_MS);
    screen.process_pending().unwrap();
    assert_eq!(screen.label_text(label), Some("LEFT"));
}

#[test]
fn handler_errors_propagate() {
    fn fail(_: &mut TestScreen<'_, Script>, _: LabelId, _: Direction) -> Result<(), Error> {
        Err(UiFault::TextTooLong.into())
    }

    let (ticks, flushed) = (UiTicks::new(), FlushReady::new());
    let mut screen = common::screen(&ticks, &flushed)
        .with_input(Script::new([InputSample::Key(Direction::Down)]));
    let label = screen
        .add_label("", FOREGROUND, Align::Center, Point::zero())
        .unwrap();
    screen.on_gesture(label, fail);

    assert_eq!(
        screen.process_pending(),
        Err(Error::DisplayLibrary(UiFault::TextTooLong))
    );
}
