use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use vizlegend::format::{format_grouped, format_legend_line};
use vizlegend::models::parse_chart_payload;
use vizlegend::viz::{self, DEFAULT_LOCALE, GUARDRAIL, LegendConfig};
use vizlegend::storage;

#[derive(Parser, Debug)]
#[command(
    name = "vizlegend",
    version,
    about = "Derive render-ready chart specs and legends from backend chart descriptions"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive the render spec and legend for a chart (or a chat response carrying one).
    Derive(DeriveArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct DeriveArgs {
    /// JSON file with a chart spec (`{data, layout}`) or a chat response with `visualization`.
    #[arg(short, long)]
    input: PathBuf,
    /// Locale for legend values (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,
    /// Maximum number of categories that get a custom legend.
    #[arg(long, default_value_t = GUARDRAIL)]
    guardrail: usize,
    /// Write the plot payload (traces, display layout, config) to this JSON file.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Save the legend to file (format inferred by --format or extension).
    #[arg(long)]
    legend_out: Option<PathBuf>,
    /// Legend file format (csv or json). If omitted, inferred from --legend-out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print full values with thousands separators next to each legend line.
    #[arg(long, default_value_t = false)]
    exact: bool,
    /// Do not print legend lines to stdout.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Derive(args) => cmd_derive(args),
    }
}

fn cmd_derive(args: DeriveArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;
    let Some(spec) = parse_chart_payload(&text)? else {
        println!("No visualization in payload.");
        return Ok(());
    };

    let config = LegendConfig::default()
        .with_guardrail(args.guardrail)
        .with_locale(args.locale.as_str());
    let Some(derived) = viz::derive_chart(&spec, &config) else {
        println!("No visualization: chart has no traces.");
        return Ok(());
    };

    if !args.quiet {
        if derived.legend.is_empty() {
            println!(
                "Native legend ({:?} trace #{})",
                derived.primary_kind, derived.primary_index
            );
        }
        for entry in &derived.legend {
            let line = format_legend_line(entry, &config.locale);
            if args.exact {
                println!(
                    "{}  {}  [{}]",
                    entry.color,
                    line,
                    format_grouped(entry.value, &config.locale)
                );
            } else {
                println!("{}  {}", entry.color, line);
            }
        }
    }

    if let Some(path) = args.out.as_ref() {
        let payload = viz::plot_payload(&derived);
        let s = serde_json::to_string_pretty(&payload)?;
        fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        eprintln!("Wrote plot payload to {}", path.display());
    }

    if let Some(path) = args.legend_out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_legend_csv(&derived.legend, path, &config.locale)?,
            "json" => storage::save_legend_json(&derived.legend, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!(
            "Saved {} legend entries to {}",
            derived.legend.len(),
            path.display()
        );
    }

    Ok(())
}
