use arcgauge::{Color, Gauge, GaugeCommand, GaugeConfig, MAX_LEVEL};
use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use rand::Rng;
use std::env;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

const FRAME_WIDTH: u32 = 240;
const FRAME_HEIGHT: u32 = 160;
const WINDOW_SCALE: f64 = 3.0;
const TARGET_FPS: f64 = 60.0;

const SWEEP_STEP: u8 = 4;
const SWEEP_INTERVAL: Duration = Duration::from_millis(100);
const ALARM_LEVEL: u8 = 80;

type Update = (usize, GaugeCommand);

/// Where level changes come from
enum Driver {
    Sweep(Sweep),
    Commands(Receiver<Update>),
}

/// Ping-pong between 0 and 100 on the last two gauges
struct Sweep {
    level: u8,
    rising: bool,
    last_step: Instant,
}

impl Sweep {
    fn new() -> Self {
        Self {
            level: 0,
            rising: true,
            last_step: Instant::now(),
        }
    }

    fn step(&mut self) -> Option<u8> {
        if self.last_step.elapsed() < SWEEP_INTERVAL {
            return None;
        }
        self.last_step = Instant::now();

        if self.rising {
            if self.level >= MAX_LEVEL - SWEEP_STEP {
                self.level = MAX_LEVEL;
                self.rising = false;
            } else {
                self.level += SWEEP_STEP;
            }
        } else if self.level <= SWEEP_STEP {
            self.level = 0;
            self.rising = true;
        } else {
            self.level -= SWEEP_STEP;
        }
        Some(self.level)
    }
}

fn alarm_color(level: u8) -> Color {
    if level >= ALARM_LEVEL {
        Color::RED
    } else {
        Color::GREEN
    }
}

fn build_gauges() -> Result<Vec<Gauge>, arcgauge::GaugeError> {
    let layout = [
        // x, y, radius, thickness, level, foreground
        (30, 30, 27, 3, 10, Color::GREEN),
        (90, 30, 27, 8, 30, Color::GREEN),
        (150, 30, 27, 10, 60, Color::RED),
        (210, 30, 28, 12, 0, Color::RED),
        (120, 100, 50, 20, 0, Color::GREEN),
    ];

    layout
        .into_iter()
        .map(|(x, y, radius, thickness, level, foreground)| {
            Gauge::new(
                GaugeConfig::builder()
                    .center_x(x)
                    .center_y(y)
                    .radius(radius)
                    .thickness(thickness)
                    .level(level)
                    .foreground_color(foreground)
                    .build(),
            )
        })
        .collect()
}

fn spawn_random_commands(count: usize, sender: Sender<Update>) {
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let index = rng.random_range(0..count);
            let level = rng.random_range(0..=MAX_LEVEL);
            let commands = [
                (index, GaugeCommand::SetLevel(level)),
                (index, GaugeCommand::SetForeground(alarm_color(level))),
            ];

            // Receiver gone means the window closed
            if commands.iter().any(|update| sender.send(*update).is_err()) {
                break;
            }
            thread::sleep(SWEEP_INTERVAL);
        }
    });
}

/// Reads `<gauge> <level>` lines from stdin
fn spawn_stdin_commands(sender: Sender<Update>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            let mut fields = line.split_whitespace();
            let parsed = match (fields.next(), fields.next()) {
                (Some(index), Some(level)) => index.parse::<usize>().ok().zip(level.parse::<u8>().ok()),
                _ => None,
            };
            let Some((index, level)) = parsed else {
                warn!("ignoring input line {:?}", line);
                continue;
            };
            let commands = [
                (index, GaugeCommand::SetLevel(level)),
                (index, GaugeCommand::SetForeground(alarm_color(level))),
            ];
            if commands.iter().any(|update| sender.send(*update).is_err()) {
                break;
            }
        }
    });
}

fn apply(gauges: &mut [Gauge], (index, command): Update) {
    let Some(gauge) = gauges.get_mut(index) else {
        warn!("no gauge {}", index);
        return;
    };
    if let Err(err) = gauge.apply(command) {
        warn!("gauge {}: {}", index, err);
    }
}

fn update(gauges: &mut [Gauge], driver: &mut Driver) {
    match driver {
        Driver::Sweep(sweep) => {
            if let Some(level) = sweep.step() {
                let count = gauges.len();
                for index in count.saturating_sub(2)..count {
                    apply(gauges, (index, GaugeCommand::SetForeground(alarm_color(level))));
                    apply(gauges, (index, GaugeCommand::SetLevel(level)));
                }
            }
        }
        Driver::Commands(receiver) => {
            while let Ok(update) = receiver.try_recv() {
                apply(gauges, update);
            }
        }
    }
}

fn render(frame: &mut [u8], gauges: &[Gauge]) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&Color::BLACK.as_rgba());
    }
    for gauge in gauges {
        gauge.render_into(frame, FRAME_WIDTH as usize);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut window_title = "Gauges".to_string();
    let mut random = false;
    let mut from_stdin = false;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--random" => random = true,
            "--stdin" => from_stdin = true,
            "--title" => {
                if let Some(title) = args.next() {
                    window_title = title;
                }
            }
            other => warn!("unknown argument {}", other),
        }
    }

    let mut gauges = build_gauges()?;
    info!("{} gauges ready", gauges.len());

    let mut driver = if random || from_stdin {
        let (sender, receiver) = mpsc::channel();
        if random {
            spawn_random_commands(gauges.len(), sender.clone());
        }
        if from_stdin {
            spawn_stdin_commands(sender);
        }
        Driver::Commands(receiver)
    } else {
        Driver::Sweep(Sweep::new())
    };

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&window_title)
        .with_inner_size(LogicalSize::new(
            f64::from(FRAME_WIDTH) * WINDOW_SCALE,
            f64::from(FRAME_HEIGHT) * WINDOW_SCALE,
        ))
        .with_resizable(false)
        .build(&event_loop)?;

    let window = std::sync::Arc::new(window);
    let window_clone = window.clone();

    let size = window.inner_size();
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(FRAME_WIDTH, FRAME_HEIGHT, surface_texture)?;

    let frame_duration = Duration::from_secs_f64(1.0 / TARGET_FPS);
    let mut last_frame = Instant::now();

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        error!("resize failed: {}", err);
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    update(&mut gauges, &mut driver);
                    render(pixels.frame_mut(), &gauges);
                    if let Err(err) = pixels.render() {
                        error!("render failed: {}", err);
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if last_frame.elapsed() >= frame_duration {
                    window_clone.request_redraw();
                    last_frame = Instant::now();
                }
            }
            _ => {}
        }
    })?;

    Ok(())
}
