use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ogweave", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every configured page image.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Site config JSON.
    #[arg(long, default_value = "ogweave.json")]
    config: PathBuf,

    /// Override the configured output directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = ogweave::SiteConfig::from_path(&args.config)?;
    if let Some(out) = args.out {
        // The override obeys the same relative-path rule as the JSON field.
        config.output_dir = out.to_string_lossy().into_owned();
        config.validate()?;
    }

    let root = args
        .config
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."))
        .to_path_buf();

    // Missing fonts abort here with a non-zero exit and zero output files;
    // individual page failures below do not change the exit code.
    let mut pipeline = ogweave::BatchPipeline::new(config, root)?;
    let summary = pipeline.run()?;

    eprintln!(
        "generated {}/{} images",
        summary.succeeded(),
        summary.total
    );
    for file in summary.written() {
        eprintln!("  {file}");
    }
    Ok(())
}
