use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cueplay::{
    Clock, Command as EngineCommand, EngineOpts, FrameCatalog, LoadOutcome, MediaResolver,
    OverlayIndex, PlaybackSession, RecordingSurface, Section,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cueplay", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the active overlays, next trigger and frame config at a given time.
    Inspect(InspectArgs),
    /// Play a section against in-memory surfaces, printing one JSON line per tick.
    Simulate(SimulateArgs),
    /// Resolve a media reference against a content-delivery base URL.
    Resolve(ResolveArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input section JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Time in seconds.
    #[arg(long)]
    at: f64,

    /// Engine options JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input section JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tick length in seconds.
    #[arg(long, default_value_t = 0.25)]
    step: f64,

    /// Stop at this time instead of the section end.
    #[arg(long)]
    until: Option<f64>,

    /// Override the media base URL from the options file.
    #[arg(long)]
    media_base: Option<String>,

    /// Disable firing actions of overlays crossed between two ticks.
    #[arg(long, default_value_t = false)]
    no_crossed_triggers: bool,

    /// Stop when an overlay pauses playback instead of pressing play again.
    #[arg(long, default_value_t = false)]
    stop_on_pause: bool,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Content-delivery base URL.
    #[arg(long)]
    base: Option<String>,

    /// Media reference (absolute URL or storage key).
    reference: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Resolve(args) => cmd_resolve(args),
    }
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<EngineOpts> {
    match path {
        Some(p) => EngineOpts::from_path(p)
            .with_context(|| format!("load engine options '{}'", p.display())),
        None => Ok(EngineOpts::default()),
    }
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.config.as_deref())?;
    let section = Section::from_path(&args.in_path)
        .with_context(|| format!("load section '{}'", args.in_path.display()))?;
    let snap = section.snapshot()?;
    let index = OverlayIndex::build(&snap.overlays, snap.duration, opts.supersession);
    let catalog = FrameCatalog::new(
        &snap.frame_configs,
        &snap.global_frame_configs,
        opts.default_easing,
    );

    let active: Vec<_> = index
        .active_at(args.at)
        .into_iter()
        .map(|o| {
            serde_json::json!({
                "id": o.id,
                "type": o.kind,
                "position": o.position,
                "window": index.window(o.id),
            })
        })
        .collect();
    let next = index
        .next_trigger_after(args.at)
        .map(|o| serde_json::json!({ "id": o.id, "timeStamp": o.time_stamp }));
    let out = serde_json::json!({
        "section": snap.id,
        "at": args.at,
        "active": active,
        "nextTrigger": next,
        "frameConfig": catalog.config_at(args.at, &index).map(|c| c.id),
        "diagnostics": snap.report.diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step.is_finite() && args.step > 0.0, "--step must be > 0");
    let mut opts = load_opts(args.config.as_deref())?;
    if let Some(base) = args.media_base {
        opts.media_base_url = Some(base);
    }
    if args.no_crossed_triggers {
        opts.fire_crossed_triggers = false;
    }

    let section = Section::from_path(&args.in_path)
        .with_context(|| format!("load section '{}'", args.in_path.display()))?;
    let mut sess = PlaybackSession::new(opts, RecordingSurface::new(), RecordingSurface::new())?;
    if let LoadOutcome::Kept = sess.load(section) {
        let msg = sess
            .notices()
            .last()
            .map(|n| n.message.clone())
            .unwrap_or_default();
        anyhow::bail!("section rejected: {msg}");
    }
    for n in sess.take_notices() {
        eprintln!("notice: {:?}: {}", n.kind, n.message);
    }

    let until = args
        .until
        .unwrap_or(sess.controller().duration())
        .min(sess.controller().duration());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    sess.play();
    let mut cmds = step(&mut sess, 0.0);
    loop {
        write_tick(&mut out, &sess, &cmds)?;
        let now = sess.controller().current_time();
        if now >= until {
            break;
        }
        if !sess.controller().is_playing() {
            if args.stop_on_pause {
                break;
            }
            sess.play();
        }
        cmds = step(&mut sess, args.step.min(until - now));
    }
    sess.teardown();
    Ok(())
}

type SimSession = PlaybackSession<RecordingSurface, RecordingSurface>;

fn step(sess: &mut SimSession, dt: f64) -> Vec<EngineCommand> {
    match sess.clock() {
        Clock::Source => {
            let t = sess.controller().current_time() + dt;
            sess.on_source_time_update(t)
        }
        Clock::Simulated => sess.advance_simulated(dt),
    }
}

fn write_tick(
    out: &mut impl std::io::Write,
    sess: &SimSession,
    cmds: &[EngineCommand],
) -> anyhow::Result<()> {
    let line = serde_json::json!({
        "state": sess.state(),
        "commands": cmds,
        "visible": sess.render_view().overlays,
    });
    serde_json::to_writer(&mut *out, &line)?;
    writeln!(out).context("write tick line")?;
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let resolver = MediaResolver::new(args.base);
    let url = resolver
        .resolve(&args.reference)
        .with_context(|| format!("resolve '{}'", args.reference))?;
    println!("{url}");
    Ok(())
}
