use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use traitsmith::{
    AssetConfig, BatchOptions, CompiledConfig, ItemSpec, LayerSelection, RuleCategory,
    generate_batch, generate_item,
};

#[derive(Parser, Debug)]
#[command(name = "traitsmith", version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and compile a config, then print a summary of its rules.
    Check(CheckArgs),
    /// Generate metadata for one item and print it to stdout.
    Preview(PreviewArgs),
    /// Generate `<serial>.json` for every item of a batch file.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Config JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Item serial.
    #[arg(long)]
    serial: u64,

    /// Layer selection as `Layer=Name`; repeat once per layer.
    #[arg(long = "layer", value_parser = parse_layer)]
    layers: Vec<LayerSelection>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Config JSON.
    #[arg(long)]
    config: PathBuf,

    /// JSON array of `{ "serial": n, "layers": [{ "layer": .., "name": .. }] }`.
    #[arg(long)]
    items: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Generate items in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Generate(args) => cmd_generate(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_layer(s: &str) -> Result<LayerSelection, String> {
    let (layer, name) = s
        .split_once('=')
        .ok_or_else(|| format!("expected Layer=Name, got '{s}'"))?;
    if layer.is_empty() {
        return Err(format!("layer name is empty in '{s}'"));
    }
    Ok(LayerSelection::new(layer, name))
}

fn load_config(path: &std::path::Path) -> anyhow::Result<CompiledConfig> {
    let cfg = AssetConfig::from_path(path)?
        .compile()
        .with_context(|| format!("compile config '{}'", path.display()))?;
    Ok(cfg)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;

    for category in RuleCategory::ALL {
        let n = cfg.rules().category(category).len();
        if n > 0 {
            println!("{:<18} {n}", category.config_key());
        }
    }
    match cfg.trait_order() {
        Some(order) => println!("trait order        {}", order.traits().join(", ")),
        None => println!("trait order        (alphabetical)"),
    }
    let doc = cfg.document();
    println!("image url          {}", doc.image_url.source());
    if let Some(ext) = &doc.external_url {
        println!("external url       {}", ext.source());
    }
    println!("background color   {}", doc.background_color.as_str());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let item = ItemSpec {
        serial: args.serial,
        layers: args.layers,
    };
    let doc = generate_item(&cfg, &item)
        .with_context(|| format!("generate metadata for item #{}", item.serial))?;
    println!("{}", doc.to_json_pretty()?);
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let items = ItemSpec::batch_from_path(&args.items)?;

    let opts = BatchOptions {
        parallel: args.parallel,
        threads: args.threads,
    };
    let report = generate_batch(&cfg, &items, &args.out, &opts)?;

    for (serial, err) in report.failures() {
        eprintln!("item #{serial}: {err}");
    }
    eprintln!(
        "wrote {}, failed {} ({})",
        report.succeeded(),
        report.failed(),
        args.out.display()
    );

    if report.failed() > 0 {
        anyhow::bail!("{} of {} items failed", report.failed(), items.len());
    }
    Ok(())
}
