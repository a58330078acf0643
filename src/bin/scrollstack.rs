use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrollstack::{
    Choreography, MemoryStage, ScrollBinder, SequencerConfig, Stage, Timeline, ViewportMetrics,
};

#[derive(Parser, Debug)]
#[command(
    name = "scrollstack",
    version,
    about = "Plan and simulate a scroll-driven card stack"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved animation table and timeline as JSON.
    Plan(PlanArgs),
    /// Print every card's placement at one timeline position.
    Scrub(ScrubArgs),
    /// Scroll a headless stage and print where the cards end up.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct StackArgs {
    /// Number of cards (ignored when --choreography is given).
    #[arg(long, default_value_t = 6)]
    cards: usize,

    /// Viewport width in px.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in px.
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Measured card height in px.
    #[arg(long, default_value_t = 600.0)]
    card_height: f64,

    /// Document offset of the stack wrapper.
    #[arg(long, default_value_t = 0.0)]
    wrapper_top: f64,

    /// Sequencer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Choreography JSON. Defaults to the built-in portfolio preset.
    #[arg(long)]
    choreography: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    stack: StackArgs,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    #[command(flatten)]
    stack: StackArgs,

    /// Timeline position to sample.
    #[arg(long)]
    position: f64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    stack: StackArgs,

    /// Scroll offset to move to after the stack is bound.
    #[arg(long)]
    scroll_to: f64,

    /// Frames to tick after scrolling.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

struct Loaded {
    config: SequencerConfig,
    choreography: Choreography,
    stage: MemoryStage,
}

impl StackArgs {
    fn load(&self) -> anyhow::Result<Loaded> {
        let config = match &self.config {
            Some(p) => SequencerConfig::from_path(p)
                .with_context(|| format!("load config '{}'", p.display()))?,
            None => SequencerConfig::default(),
        };
        let choreography = match &self.choreography {
            Some(p) => Choreography::from_path(p)
                .with_context(|| format!("load choreography '{}'", p.display()))?,
            None => Choreography::portfolio(self.cards),
        };
        let mut stage = MemoryStage::with_cards(
            ViewportMetrics::new(self.width, self.height),
            choreography.len(),
            self.card_height,
        );
        stage.set_wrapper_top(self.wrapper_top);
        Ok(Loaded {
            config,
            choreography,
            stage,
        })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("SCROLLSTACK_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Scrub(args) => cmd_scrub(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let Loaded {
        config,
        choreography,
        stage,
    } = args.stack.load()?;
    let binder = ScrollBinder::new(&choreography, config)?;
    let mut timeline = Timeline::new();
    let outcome = binder
        .builder()
        .build(&mut timeline, &stage, &stage.cards());

    let out = serde_json::json!({
        "table": binder.builder().table(),
        "build": outcome,
        "timeline": timeline,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    let Loaded {
        config,
        choreography,
        mut stage,
    } = args.stack.load()?;
    let mut binder = ScrollBinder::new(&choreography, config)?;
    let cards = stage.cards();
    binder.build(&mut stage, &cards, Duration::ZERO);
    if let Some(report) = binder.last_report().copied() {
        tracing::info!(motions = report.motions, "stack bound");
    } else {
        anyhow::bail!("layout not measurable: check --width, --height and --card-height");
    }

    binder.scrub_to(&mut stage, args.position);
    let out = serde_json::json!({
        "position": binder.position(),
        "duration": binder.timeline().duration(),
        "placements": binder.timeline().seek(binder.position()),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let Loaded {
        config,
        choreography,
        mut stage,
    } = args.stack.load()?;
    let mut binder = ScrollBinder::new(&choreography, config)?;
    let cards = stage.cards();
    binder.build(&mut stage, &cards, Duration::ZERO);

    binder.on_scroll(&mut stage, args.scroll_to);
    let frame = Duration::from_millis(args.frame_ms);
    let mut now = Duration::ZERO;
    for _ in 0..args.frames {
        now += frame;
        binder.tick(&mut stage, now);
    }

    let out = serde_json::json!({
        "state": binder.state(),
        "binding": binder.binding(),
        "position": binder.position(),
        "target": binder.target(),
        "pinned": binder.is_pinned(),
        "viewport": stage.viewport(),
        "placements": stage.placements(),
    });
    binder.teardown(&mut stage);
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

