//! Terminal front end for the Gridbot simulator.
//!
//! Reads command lines from stdin and feeds them to a [`SessionDriver`].
//! Each applied command prints its two log lines, tagged with their kind;
//! notifications print as one-line banners and again when they expire.
//! Blank lines are skipped. Lines starting with `:`
//! are front-end controls:
//!
//! - `:reset` clears the world, the log and the notifications
//! - `:dismiss ID` removes an active notification
//! - `:quit` exits (so does end of input)
//!
//! `--record PATH` writes a replay of the session; `--verify PATH` checks
//! one against a fresh session instead of reading stdin.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossbeam_channel::{select, Receiver, Sender};
use gridbot_core::{Notification, SimulationState, GRID_SIZE};
use gridbot_engine::{
    DriverConfig, DriverRequest, NotificationId, Session, SessionConfig, SessionDriver,
    SessionEvent, SubmitError,
};
use gridbot_replay::{
    config_hash, verify_session, BuildMetadata, DivergenceKind, InitDescriptor, ReplayReader,
    ReplayWriter,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "gridbot",
    version,
    about = "Drive a robot around a wrap-around grid from the terminal"
)]
struct Cli {
    /// Side length of the square grid.
    #[arg(long, default_value_t = GRID_SIZE)]
    grid_size: u32,

    /// Write a replay of every applied command and reset to this file.
    #[arg(long, value_name = "PATH", conflicts_with = "verify")]
    record: Option<PathBuf>,

    /// Replay a recording through a fresh session and report the first divergence.
    #[arg(long, value_name = "PATH")]
    verify: Option<PathBuf>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.verify {
        Some(path) => run_verify(path),
        None => run_interactive(&cli),
    }
}

// ── Input ───────────────────────────────────────────────────────

/// What one line of stdin asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Request(DriverRequest),
    /// Blank input. It would apply nothing and produce no event.
    Skip,
    Quit,
    Rejected(String),
}

fn classify(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Skip;
    }
    let Some(control) = trimmed.strip_prefix(':') else {
        return Input::Request(DriverRequest::Command(line.to_string()));
    };

    let mut parts = control.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("reset"), None, None) => Input::Request(DriverRequest::Reset),
        (Some("quit"), None, None) => Input::Quit,
        (Some("dismiss"), Some(id), None) => match id.parse::<u64>() {
            Ok(id) => Input::Request(DriverRequest::Dismiss(NotificationId(id))),
            Err(_) => Input::Rejected(format!("not a notification id: {id}")),
        },
        _ => Input::Rejected(format!("unknown control: {trimmed}")),
    }
}

fn spawn_stdin_reader() -> Result<Receiver<String>> {
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::Builder::new()
        .name("gridbot-stdin".into())
        .spawn(move || forward_lines(io::stdin().lock(), &tx))
        .context("failed to spawn stdin reader")?;
    Ok(rx)
}

/// Send each line of `input` to `tx` until input ends or the receiver
/// goes away. Lines that are not valid UTF-8 are skipped.
fn forward_lines(input: impl BufRead, tx: &Sender<String>) {
    for line in input.lines() {
        match line {
            Ok(line) => {
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(error = %e, "skipping input line that is not valid UTF-8");
            }
            Err(e) => {
                warn!(error = %e, "failed to read stdin");
                break;
            }
        }
    }
}

// ── Output ──────────────────────────────────────────────────────

fn banner(id: NotificationId, notification: &Notification) -> String {
    format!(
        "[{}] {}: {} (#{id})",
        notification.severity, notification.title, notification.message
    )
}

fn render(out: &mut dyn Write, event: &SessionEvent) -> io::Result<()> {
    match event {
        SessionEvent::Applied {
            outcome,
            notification,
            ..
        } => {
            for line in &outcome.log_lines {
                writeln!(out, "{:<7} {}", line.kind.as_str(), line.text)?;
            }
            if let (Some(n), Some(id)) = (&outcome.notification, notification) {
                writeln!(out, "{}", banner(*id, n))?;
            }
        }
        SessionEvent::Reset { notification } => {
            writeln!(out, "[info] SYSTEM_RESET: State cleared. (#{notification})")?;
        }
        SessionEvent::Dismissed { id, removed: true } => writeln!(out, "(#{id} dismissed)")?,
        SessionEvent::Dismissed { id, removed: false } => writeln!(out, "(#{id} not active)")?,
        SessionEvent::Expired { ids } => {
            let ids: Vec<String> = ids.iter().map(|id| format!("#{id}")).collect();
            writeln!(out, "({} expired)", ids.join(", "))?;
        }
    }
    Ok(())
}

// ── Recording ───────────────────────────────────────────────────

struct Recorder {
    writer: ReplayWriter<BufWriter<File>>,
    cleared: SimulationState,
}

impl Recorder {
    fn create(path: &Path, config: &SessionConfig) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create replay file {}", path.display()))?;
        let init = InitDescriptor {
            grid_size: config.grid_size,
            config_hash: config_hash(config),
        };
        let writer = ReplayWriter::new(BufWriter::new(file), &BuildMetadata::current(), &init)?;
        info!(path = %path.display(), "recording replay");
        Ok(Self {
            writer,
            cleared: SimulationState::new(config.grid_size)?,
        })
    }

    fn observe(&mut self, event: &SessionEvent) -> Result<()> {
        match event {
            SessionEvent::Applied {
                raw,
                outcome,
                state,
                ..
            } => self.writer.write_command(raw, outcome.status, state)?,
            SessionEvent::Reset { .. } => self.writer.write_reset(&self.cleared)?,
            SessionEvent::Dismissed { .. } | SessionEvent::Expired { .. } => {}
        }
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        info!(frames = self.writer.frames_written(), "replay saved");
        Ok(())
    }
}

fn handle_event(
    out: &mut dyn Write,
    event: &SessionEvent,
    recorder: Option<&mut Recorder>,
) -> Result<()> {
    render(out, event)?;
    if let Some(recorder) = recorder {
        recorder.observe(event)?;
    }
    Ok(())
}

// ── Modes ───────────────────────────────────────────────────────

enum Wake {
    Line(Option<String>),
    Event(Option<SessionEvent>),
}

fn run_interactive(cli: &Cli) -> Result<()> {
    let config = SessionConfig {
        grid_size: cli.grid_size,
        ..SessionConfig::default()
    };
    let session = Session::new(config.clone()).context("invalid session configuration")?;
    let mut recorder = match &cli.record {
        Some(path) => Some(Recorder::create(path, &config)?),
        None => None,
    };

    let mut driver = SessionDriver::spawn(session, DriverConfig::default())?;
    let events = driver.events().clone();
    let lines = spawn_stdin_reader()?;
    info!(grid_size = config.grid_size, "gridbot ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        let wake = select! {
            recv(lines) -> line => Wake::Line(line.ok()),
            recv(events) -> event => Wake::Event(event.ok()),
        };
        let line = match wake {
            Wake::Event(Some(event)) => {
                handle_event(&mut out, &event, recorder.as_mut())?;
                continue;
            }
            Wake::Event(None) => bail!("session driver stopped unexpectedly"),
            Wake::Line(Some(line)) => line,
            // End of input.
            Wake::Line(None) => break,
        };

        let request = match classify(&line) {
            Input::Request(request) => request,
            Input::Skip => continue,
            Input::Quit => break,
            Input::Rejected(reason) => {
                writeln!(out, "{reason}")?;
                continue;
            }
        };

        // Back-pressure: drain events until the driver has room. Blank
        // lines are filtered above, so every queued request yields an event.
        loop {
            match driver.send(request.clone()) {
                Ok(()) => break,
                Err(SubmitError::ChannelFull) => {
                    let event = events
                        .recv()
                        .context("session driver stopped unexpectedly")?;
                    handle_event(&mut out, &event, recorder.as_mut())?;
                }
                Err(e @ SubmitError::Shutdown) => return Err(e.into()),
            }
        }
    }

    // Shutdown drains every queued request before the thread exits.
    match driver.shutdown() {
        Some(session) => info!(
            commands = session.metrics().commands_applied,
            resets = session.metrics().resets,
            "session finished"
        ),
        None => warn!("session driver ended abnormally"),
    }
    for event in events.try_iter() {
        handle_event(&mut out, &event, recorder.as_mut())?;
    }
    out.flush()?;

    if let Some(recorder) = recorder {
        recorder.finish()?;
    }
    Ok(())
}

fn run_verify(path: &Path) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("failed to open replay file {}", path.display()))?;
    let reader = ReplayReader::open(BufReader::new(file))?;
    let config = SessionConfig {
        grid_size: reader.init_descriptor().grid_size,
        ..SessionConfig::default()
    };
    info!(
        path = %path.display(),
        recorded_by = %reader.metadata().gridbot_version,
        grid_size = config.grid_size,
        "verifying replay"
    );

    let mut session = Session::new(config)?;
    let Some(report) = verify_session(reader, &mut session)? else {
        println!(
            "replay verified: {} commands, {} resets",
            session.metrics().commands_applied,
            session.metrics().resets
        );
        return Ok(());
    };

    match report.kind {
        DivergenceKind::Status { recorded, replayed } => bail!(
            "divergence at frame {}: recorded {recorded}, replayed {}",
            report.seq,
            replayed.map_or("no outcome", |s| s.as_str())
        ),
        DivergenceKind::StateHash { recorded, replayed } => bail!(
            "divergence at frame {}: state hash recorded={recorded:#018x}, replayed={replayed:#018x}",
            report.seq
        ),
    }
}
