//! A 24-hour clock, starting at 12:30:45 and ticking once per second.
//!
//! Three tasks share the screen: the render loop, the clock producer and the
//! UI tick source. The backlight stays off until the first frame is on the
//! panel.

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
    board::{
        self,
        Board,
        Panel,
    },
    clock::{
        ClockState,
        TimeOfDay,
        run_ticker,
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
        FlushReady,
        Screen,
        UiTicks,
        run_tick_source,
    },
};

esp_bootloader_esp_idf::esp_app_desc!();

type ClockScreen = Screen<'static, Panel<'static>>;
type ClockUi = SharedUi<CriticalSectionRawMutex, ClockScreen>;

static TICKS: UiTicks = UiTicks::new();
static FLUSHED: FlushReady = FlushReady::new();

#[embassy_executor::task]
async fn ui_tick_task() {
    run_tick_source(&TICKS, TICK_PERIOD_MS).await
}

#[embassy_executor::task]
async fn render_task(scheduler: RenderScheduler<'static, CriticalSectionRawMutex, ClockScreen>) {
    if let Err(e) = scheduler.run().await {
        panic!("render task halted: {}", e);
    }
}

#[embassy_executor::task]
async fn clock_task(ui: &'static ClockUi, mut clock: ClockState, period: Duration) {
    if let Err(e) = run_ticker(ui, &mut clock, period, None).await {
        panic!("clock task halted: {}", e);
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
        ..
    } = Board::new(resources, &config);

    let background = Rgb565::from(Rgb888::new(0x00, 0x3a, 0x57));
    let mut screen = Screen::new(panel, background, &TICKS, &FLUSHED, config.ui);
    let label = screen
        .add_label("", Rgb565::WHITE, Align::Center, Point::zero())
        .unwrap();

    let mut clock = ClockState::new(label, TimeOfDay::new(12, 30, 45).unwrap());
    clock.render(&mut screen).unwrap();

    let ui = mk_static!(
        ClockUi,
        SharedUi::new(screen, Duration::from_millis(config.lock_timeout_ms))
    );

    info!("Create UI tasks");
    spawner.must_spawn(ui_tick_task());
    spawner.must_spawn(render_task(RenderScheduler::new(ui, config.scheduler)));

    let frame = FLUSHED.wait().await;
    info!("Frame {} on the panel, turn on backlight", frame);
    backlight.on();

    spawner.must_spawn(clock_task(
        ui,
        clock,
        Duration::from_millis(config.clock_period_ms),
    ));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
