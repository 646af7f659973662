//! Command-line driver for the spiral callbacks.
//!
//! ```text
//! spiralfunc eval curvex 0 1.5 3.14   # value, d1, d2 per argument
//! spiralfunc plot --x x.dat --y y.dat --out spiral.svg
//! ```
//!
//! Logging goes through `tracing`; override the filter with `RUST_LOG`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueHint};
use spiralfunc::callback::{ArgList, FunctionTable};
use spiralfunc::data::load_column;
use spiralfunc::geometry::{Spiral, SpiralConfig};
use spiralfunc::plot::Overlay;
use spiralfunc::tessellation::{SampleParams, TessellateCurve};

#[derive(Parser)]
#[command(author, version, about = "Spiral curve callbacks and solution plotter")]
struct Cli {
    /// Trace every callback evaluation with its argument
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a callback by name at one or more parameters
    Eval {
        /// Callback name (`curvex` or `curvey`)
        name: String,

        /// Parameter values
        #[arg(required = true, allow_negative_numbers = true)]
        t: Vec<f64>,
    },

    /// Overlay solver output on the reference spiral
    Plot(PlotArgs),
}

#[derive(clap::Args)]
struct PlotArgs {
    /// Solver x samples, one number per line
    #[arg(long, default_value = "x.dat", value_hint = ValueHint::FilePath)]
    x: PathBuf,

    /// Solver y samples, one number per line
    #[arg(long, default_value = "y.dat", value_hint = ValueHint::FilePath)]
    y: PathBuf,

    /// Output SVG file
    #[arg(long, default_value = "spiral.svg", value_hint = ValueHint::FilePath)]
    out: PathBuf,

    /// Number of reference curve samples
    #[arg(long, default_value_t = SampleParams::default().samples)]
    samples: usize,

    /// First reference curve parameter
    #[arg(long, default_value_t = SampleParams::default().t_min, allow_negative_numbers = true)]
    t_min: f64,

    /// Last reference curve parameter
    #[arg(long, default_value_t = SampleParams::default().t_max, allow_negative_numbers = true)]
    t_max: f64,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default: WARN for everything, INFO for spiralfunc (TRACE with --trace).
    let crate_level = if cli.trace { "spiralfunc=trace" } else { "spiralfunc=info" };
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive(crate_level.parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let spiral = Spiral::new(SpiralConfig { trace: cli.trace });
    match cli.command {
        Command::Eval { name, t } => eval(spiral, &name, &t),
        Command::Plot(args) => plot(spiral, &args),
    }
}

fn eval(spiral: Spiral, name: &str, ts: &[f64]) -> Result<()> {
    let mut table = FunctionTable::new();
    spiral.register(&mut table)?;

    for &t in ts {
        let line = eval_line(&table, name, t).with_context(|| format!("evaluating {name}({t})"))?;
        println!("{line}");
    }
    Ok(())
}

/// One tab-separated output row: `t`, value, first and second derivative.
fn eval_line(table: &FunctionTable, name: &str, t: f64) -> spiralfunc::Result<String> {
    let mut args = ArgList::new(vec![t]).with_derivs().with_hessian();
    let value = table.call(name, &mut args)?;
    let d1 = args.derivs.as_deref().and_then(<[f64]>::first).copied().unwrap_or_default();
    let d2 = args.hes.as_deref().and_then(<[f64]>::first).copied().unwrap_or_default();
    Ok(format!("{t}\t{value}\t{d1}\t{d2}"))
}

fn plot(spiral: Spiral, args: &PlotArgs) -> Result<()> {
    let x = load_column(&args.x).context("reading solver x samples")?;
    let y = load_column(&args.y).context("reading solver y samples")?;

    let reference = TessellateCurve::new(SampleParams::new(args.t_min, args.t_max, args.samples))
        .execute(&spiral)
        .context("sampling reference curve")?;

    Overlay::new(&reference, &x, &y)?
        .with_size(args.width, args.height)
        .render_to_file(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    Ok(())
}
