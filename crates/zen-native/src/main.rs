//! Headless native driver: runs a session against the simulated tracker and
//! a scripted control surface, logging a status line every second.

use anyhow::Context;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;
use zen_core::{Color, Command, SessionConfig, SessionState, ShapeKind};
use zen_particles::{CancelToken, RunConfig, Scheduler, SimulatedTracker, StatsSink};

#[derive(Clone, Debug)]
struct CliOptions {
    session: SessionConfig,
    run_seconds: f64,
    cycle_seconds: f64,
    tracker_available: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            run_seconds: 10.0,
            cycle_seconds: 3.0,
            tracker_available: true,
        }
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<CliOptions> {
    let mut opts = CliOptions::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .with_context(|| format!("{} expects a value", name))
        };
        match flag.as_str() {
            "--particles" => {
                let v = value("--particles")?;
                opts.session.particle_count =
                    v.parse().with_context(|| format!("bad particle count {:?}", v))?;
            }
            "--seed" => {
                let v = value("--seed")?;
                opts.session.seed = Some(v.parse().with_context(|| format!("bad seed {:?}", v))?);
            }
            "--seconds" => {
                let v = value("--seconds")?;
                opts.run_seconds = positive_secs(&v)?;
            }
            "--cycle" => {
                let v = value("--cycle")?;
                opts.cycle_seconds = positive_secs(&v)?;
            }
            "--shape" => {
                opts.session.initial_shape = ShapeKind::from_name(&value("--shape")?);
            }
            "--color" => {
                opts.session.initial_color = value("--color")?.parse()?;
            }
            "--no-tracker" => opts.tracker_available = false,
            other => anyhow::bail!("unknown argument {:?}", other),
        }
    }
    Ok(opts)
}

fn positive_secs(v: &str) -> anyhow::Result<f64> {
    let secs: f64 = v.parse().with_context(|| format!("bad duration {:?}", v))?;
    if !(secs.is_finite() && secs > 0.0) {
        anyhow::bail!("duration must be positive, got {}", secs);
    }
    Ok(secs)
}

/// Plays the part of the control surface: steps through every shape and
/// palette color, resetting once per lap.
fn spawn_control_surface(
    commands: Sender<Command>,
    cycle: Duration,
    cancel: CancelToken,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("control-surface".into())
        .spawn(move || {
            let palette = Color::palette();
            let mut shape = ShapeKind::Sphere;
            let mut step = 0usize;
            while !cancel.is_cancelled() {
                thread::sleep(cycle);
                if cancel.is_cancelled() {
                    break;
                }
                step += 1;
                shape = shape.next();
                let command = if shape == ShapeKind::Sphere {
                    Command::Reset
                } else {
                    Command::SelectShape(shape)
                };
                if commands.send(command).is_err() {
                    break;
                }
                if let Some(color) = palette.get(step % palette.len().max(1)) {
                    if commands.send(Command::SelectColor(*color)).is_err() {
                        break;
                    }
                }
            }
        })
}

fn spawn_stop_timer(after: Duration, cancel: CancelToken) -> std::io::Result<()> {
    thread::Builder::new()
        .name("stop-timer".into())
        .spawn(move || {
            thread::sleep(after);
            cancel.cancel();
        })
        .map(|_| ())
}

fn run(opts: CliOptions) -> anyhow::Result<()> {
    let session = SessionState::new(&opts.session).context("session setup")?;
    let tracker = if opts.tracker_available {
        SimulatedTracker::new()
    } else {
        SimulatedTracker::unavailable()
    };
    let cancel = CancelToken::new();
    let mut scheduler = Scheduler::new(
        session,
        tracker,
        StatsSink::default(),
        &RunConfig::default(),
        cancel.clone(),
    )?;

    let surface = spawn_control_surface(
        scheduler.commands(),
        Duration::from_secs_f64(opts.cycle_seconds),
        cancel.clone(),
    )
    .context("spawn control surface")?;
    spawn_stop_timer(Duration::from_secs_f64(opts.run_seconds), cancel.clone())
        .context("spawn stop timer")?;

    let summary = scheduler.run();
    let stats = scheduler.sink();
    log::info!(
        "[native] {} frames ({:.1} fps), {} particles, mean radius {:.2}, max radius {:.2}, rotation {:.3} rad",
        summary.frames,
        summary.frames as f64 / summary.elapsed_sec.max(f64::EPSILON),
        stats.particles,
        stats.mean_radius,
        stats.max_radius,
        stats.rotation
    );
    if stats.non_finite > 0 {
        log::error!("[native] {} non-finite positions presented", stats.non_finite);
    }
    if surface.join().is_err() {
        log::error!("[native] control surface thread panicked");
    }
    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    std::process::exit(exit_code(&start(std::env::args().skip(1))));
}

fn start<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<()> {
    let opts = parse_args(args).context("invalid arguments")?;
    run(opts)
}

fn exit_code(result: &anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{:#}", e);
            1
        }
    }
}
