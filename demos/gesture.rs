//! Echoes touch swipes and navigation-button presses into a label.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{
    Duration,
    Timer,
};
use embedded_graphics::{
    pixelcolor::{
        Rgb565,
        Rgb888,
    },
    prelude::*,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use lcd_clock::{
    Error,
    board::{
        self,
        Board,
        BoardInput,
        Panel,
    },
    config::{
        BoardConfig,
        TICK_PERIOD_MS,
    },
    mk_static,
    scheduler::RenderScheduler,
    shared::SharedUi,
    split_resources,
    ui::{
        Align,
        Direction,
        FlushReady,
        LabelId,
        Screen,
        UiRuntime,
        UiTicks,
        run_tick_source,
    },
};

esp_bootloader_esp_idf::esp_app_desc!();

type GestureScreen = Screen<'static, Panel<'static>, BoardInput>;
type GestureUi = SharedUi<CriticalSectionRawMutex, GestureScreen>;

static TICKS: UiTicks = UiTicks::new();
static FLUSHED: FlushReady = FlushReady::new();

fn echo_gesture(screen: &mut GestureScreen, label: LabelId, direction: Direction) -> Result<(), Error> {
    info!("Swiped {}", direction.as_str());
    let text = match direction {
        Direction::Left => "Swiped LEFT",
        Direction::Right => "Swiped RIGHT",
        Direction::Up => "Swiped UP",
        Direction::Down => "Swiped DOWN",
    };
    screen.set_label_text(label, text)
}

#[embassy_executor::task]
async fn ui_tick_task() {
    run_tick_source(&TICKS, TICK_PERIOD_MS).await
}

#[embassy_executor::task]
async fn render_task(scheduler: RenderScheduler<'static, CriticalSectionRawMutex, GestureScreen>) {
    if let Err(e) = scheduler.run().await {
        panic!("render task halted: {}", e);
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = board::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let config = BoardConfig::resolve().unwrap();
    let Board {
        panel,
        mut backlight,
        input,
    } = Board::new(resources, &config);
    let hint = if input.has_touch() {
        "swipe the screen"
    } else {
        "use the arrow keys"
    };

    let blue = Rgb565::from(Rgb888::new(0x21, 0x96, 0xf3));
    let mut screen = Screen::new(panel, blue, &TICKS, &FLUSHED, config.ui).with_input(input);
    let label = screen
        .add_label("Hello - Swipe me!", Rgb565::WHITE, Align::Center, Point::zero())
        .unwrap();
    screen
        .add_label(hint, Rgb565::CSS_LIGHT_GRAY, Align::BottomMid, Point::zero())
        .unwrap();
    screen.on_gesture(label, echo_gesture);

    let ui = mk_static!(
        GestureUi,
        SharedUi::new(screen, Duration::from_millis(config.lock_timeout_ms))
    );

    spawner.must_spawn(ui_tick_task());
    spawner.must_spawn(render_task(RenderScheduler::new(ui, config.scheduler)));

    FLUSHED.wait().await;
    backlight.on();
    info!("Waiting for swipes");

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
