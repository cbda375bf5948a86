use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use clap::Parser;
use rand::Rng;
use storage_gauge::{DialStyle, Gauge, GaugeCommand, PointerMode, Result, Settings};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Animated storage gauge. Integers piped on stdin, one per line, retarget it.
#[derive(Parser, Debug)]
#[command(name = "storage-gauge")]
#[command(version)]
struct Args {
    /// Initial value shown by the gauge.
    #[arg(long)]
    value: Option<i32>,

    /// Full-scale value (defaults to 160 for bezel, 100 for guides).
    #[arg(long)]
    max: Option<i32>,

    #[arg(long, value_enum)]
    style: Option<DialStyle>,

    #[arg(long, value_enum)]
    pointer: Option<PointerMode>,

    /// Length of every transition in milliseconds.
    #[arg(long)]
    duration_ms: Option<u64>,

    /// TrueType/OpenType font for the labels.
    #[arg(long)]
    font: Option<PathBuf>,

    /// TOML settings file; flags take precedence over its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drive the gauge with random values.
    #[arg(long)]
    random: bool,

    #[arg(long)]
    title: Option<String>,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        settings.value = self.value.or(settings.value);
        settings.max_value = self.max.or(settings.max_value);
        settings.style = self.style.or(settings.style);
        settings.pointer = self.pointer.or(settings.pointer);
        settings.animation_ms = self.duration_ms.or(settings.animation_ms);
        settings.font = self.font.clone().or(settings.font);
        settings.title = self.title.clone().or(settings.title);
        Ok(settings)
    }
}

fn spawn_stdin_reader(sender: Sender<GaugeCommand>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(|line| line.ok()) {
            match line.trim().parse::<i32>() {
                Ok(value) => {
                    if sender.send(GaugeCommand::SetValue(value)).is_err() {
                        break;
                    }
                }
                Err(err) => warn!(line = line.trim(), %err, "skipping stdin line"),
            }
        }
        debug!("stdin closed");
    });
}

/// Mostly small steps; occasionally a jump that overshoots either end so
/// clamping is visible.
fn random_command(rng: &mut impl Rng, max: i32) -> GaugeCommand {
    if rng.random_range(0.0..1.0) < 0.2 {
        GaugeCommand::SetValue(rng.random_range(-max / 4..=max.saturating_add(max / 4)))
    } else {
        GaugeCommand::Step(rng.random_range(-max / 8..=max / 8))
    }
}

fn spawn_random_driver(sender: Sender<GaugeCommand>, max: i32) {
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let command = random_command(&mut rng, max);
            if sender.send(command).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(1500));
        }
    });
}

fn run(args: Args) -> Result<()> {
    let config = args.settings()?.into_config()?;
    let max = config.max_value();
    let mut gauge = Gauge::new(config)?;
    info!(style = ?gauge.config().style, max, "starting gauge");

    let (sender, receiver) = mpsc::channel();
    if !io::stdin().is_terminal() {
        spawn_stdin_reader(sender.clone());
    }
    if args.random {
        spawn_random_driver(sender, max);
    }

    gauge.show_with_commands(receiver)
}

fn main() -> ExitCode {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {err}");
    }

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "storage-gauge failed");
            ExitCode::FAILURE
        }
    }
}
