//! mbeanfmt command-line interface

use clap::Parser;
use mbeanfmt::cli::{output, render};
use mbeanfmt::render::DATE_FORMAT;
use std::path::PathBuf;

/// Render a JMX attribute value document as console text
#[derive(Parser)]
#[command(name = "mbeanfmt")]
#[command(author, version, about = "Render JMX attribute values as text", long_about = None)]
struct Cli {
    /// Value document (JSON); reads stdin when absent or `-`
    input: Option<PathBuf>,

    /// Date pattern, e.g. "yyyy-MM-dd HH:mm"
    ///
    /// Overrides `-e DATE_FORMAT=...`, which overrides the DATE_FORMAT
    /// environment variable.
    #[arg(long)]
    date_format: Option<String>,

    /// Context settings (name=value)
    #[arg(short = 'e', long = "env")]
    settings: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    human_panic::setup_panic!();
    env_logger::init();

    let cli = Cli::parse();

    let result = render::render(render::RenderConfig {
        input: cli.input,
        date_format: cli.date_format,
        inherited_date_format: std::env::var(DATE_FORMAT).ok(),
        settings: cli.settings,
        output_file: cli.output,
    });

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
