use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::info;
use pointer_gestures::{
    EventBus, GestureConfig, GestureEngine, GestureEvent, LoggingListener, RawSample,
    RawTransition, ScreenPoint, SourceId,
};

#[cfg(test)]
mod tests;

const TRACE_HEADER: &str = "ms,hint,x,y,transition";

#[derive(Debug, Parser)]
#[command(name = "gesture_replay")]
#[command(about = "Replay a recorded pointer trace through the gesture engine")]
struct Cli {
    /// CSV trace with `ms,hint,x,y,transition` rows.
    trace: PathBuf,
    /// Gesture thresholds; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// File with one expected event kind per line.
    #[arg(long)]
    expect: Option<PathBuf>,
    /// Empty frames appended after the trace so pending taps can resolve.
    #[arg(long = "tail-ms", default_value_t = 1_000)]
    tail_ms: u64,
    #[arg(long = "frame-ms", default_value_t = 16)]
    frame_ms: u64,
}

/// All samples a trace reports for one timestamp.
#[derive(Debug, PartialEq)]
struct TraceFrame {
    ms: u64,
    samples: Vec<RawSample>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GestureConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GestureConfig::default(),
    };
    let frames = parse_trace(&cli.trace)?;
    info!(
        "replaying {} frames from {}",
        frames.len(),
        cli.trace.display()
    );

    let events = replay(config, &frames, cli.tail_ms, cli.frame_ms)?;

    println!("event,ms,kind,id,x,y,press_ms,tap_count,secondary_id");
    for event in &events {
        println!("{}", event_row(event));
    }

    if let Some(expect_path) = &cli.expect {
        let expected = parse_expected_kinds(expect_path)?;
        let actual: Vec<&'static str> = events.iter().map(|e| e.kind.label()).collect();
        if actual != expected {
            eprintln!("expected kinds: {}", expected.join(","));
            eprintln!("actual kinds:   {}", actual.join(","));
            bail!("event sequence mismatch");
        }
    }

    Ok(())
}

fn replay(
    config: GestureConfig,
    frames: &[TraceFrame],
    tail_ms: u64,
    frame_ms: u64,
) -> Result<Vec<GestureEvent>> {
    let mut engine = GestureEngine::without_hit_testing(config, SourceId(0))?;
    attach_logging(engine.bus_mut());

    let mut events = Vec::new();
    for frame in frames {
        events.extend_from_slice(engine.tick(frame.ms, &frame.samples));
    }

    // Traces usually stop right after the last release; keep ticking so the
    // release finalizes and tap sequences resolve.
    if let Some(last_ms) = frames.last().map(|f| f.ms) {
        let step = frame_ms.max(1);
        let mut now_ms = last_ms;
        while now_ms < last_ms.saturating_add(tail_ms) {
            now_ms += step;
            events.extend_from_slice(engine.tick(now_ms, &[]));
        }
    }

    Ok(events)
}

fn attach_logging(bus: &mut EventBus) {
    if log::log_enabled!(log::Level::Debug) {
        bus.subscribe(LoggingListener);
    }
}

fn event_row(event: &GestureEvent) -> String {
    let p = &event.primary;
    format!(
        "event,{},{},{},{},{},{},{},{}",
        event.t_ms,
        event.kind.label(),
        p.id.index(),
        p.screen_position.x,
        p.screen_position.y,
        p.press_ms(),
        p.tap_count,
        event
            .secondary
            .map(|s| s.id.index().to_string())
            .unwrap_or_default()
    )
}

fn parse_trace(path: &Path) -> Result<Vec<TraceFrame>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut frames: Vec<TraceFrame> = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line =
            line_result.with_context(|| format!("failed to read {}:{}", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == TRACE_HEADER {
            continue;
        }

        let (ms, sample) = parse_row(trimmed)
            .with_context(|| format!("{}:{} invalid trace line", path.display(), line_no))?;
        match frames.last_mut() {
            Some(frame) if frame.ms == ms => frame.samples.push(sample),
            Some(frame) if frame.ms > ms => {
                bail!(
                    "{}:{} timestamp {} goes backwards (previous {})",
                    path.display(),
                    line_no,
                    ms,
                    frame.ms
                )
            }
            _ => frames.push(TraceFrame {
                ms,
                samples: vec![sample],
            }),
        }
    }

    Ok(frames)
}

fn parse_row(row: &str) -> Result<(u64, RawSample)> {
    let parts: Vec<&str> = row.split(',').map(str::trim).collect();
    if parts.len() < 4 {
        bail!("expected at least 4 columns, got {}", parts.len());
    }

    let ms = parts[0]
        .parse::<u64>()
        .with_context(|| format!("invalid ms '{}'", parts[0]))?;
    let hint = parts[1]
        .parse::<u32>()
        .with_context(|| format!("invalid hint '{}'", parts[1]))?;
    let x = parts[2]
        .parse::<f32>()
        .with_context(|| format!("invalid x '{}'", parts[2]))?;
    let y = parts[3]
        .parse::<f32>()
        .with_context(|| format!("invalid y '{}'", parts[3]))?;
    let transition = parse_transition(parts.get(4).copied().unwrap_or(""))?;

    let position = ScreenPoint::new(x, y);
    let sample = match transition {
        Some(RawTransition::Began) => RawSample::began(hint, position),
        Some(RawTransition::Ended) => RawSample::ended(hint, position),
        None => RawSample::held(hint, position),
    };
    Ok((ms, sample))
}

fn parse_transition(raw: &str) -> Result<Option<RawTransition>> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "held" | "move" => Ok(None),
        "began" | "down" => Ok(Some(RawTransition::Began)),
        "ended" | "up" => Ok(Some(RawTransition::Ended)),
        other => Err(anyhow!("invalid transition '{other}'")),
    }
}

fn parse_expected_kinds(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut kinds = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line =
            line_result.with_context(|| format!("failed to read {}:{}", path.display(), line_no + 1))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        kinds.push(token.to_ascii_lowercase());
    }

    Ok(kinds)
}
