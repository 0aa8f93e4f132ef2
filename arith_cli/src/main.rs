//! # arithc
//!
//! Command-line front end for the arithmetic expression compiler: lexes and
//! parses an expression given inline or in a file, then prints the tree, the
//! tokens, the value or a JSON document.

use arith_compiler::config::RuntimeConfig;
use arith_compiler::file_processor;
use arith_compiler::logging;
use arith_compiler::pipeline::{Frontend, PipelineError, PipelineOutput, PipelineResult};
use arith_compiler::utils::SourceMap;
use clap::Parser as ClapParser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ClapParser, Debug)]
#[command(name = "arithc", version, about, long_about = None)]
struct Args {
    /// Expression to compile, e.g. "(1 + 2) * 3"
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    expression: Option<String>,

    /// Read the expression from a file
    #[arg(short, long)]
    file: Option<String>,

    /// Print the significant tokens
    #[arg(long)]
    tokens: bool,

    /// Print tokens, tree and value as JSON
    #[arg(long)]
    json: bool,

    /// Print the value of the expression
    #[arg(long)]
    eval: bool,

    /// Log every token before parsing
    #[arg(long)]
    debug: bool,

    /// Runtime preferences (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::config::init_runtime_preferences(config.logging.clone())
        .and_then(|_| logging::init_global_logging())
    {
        log::warn!("logging setup failed: {}", e);
    }
    if args.debug {
        log::debug!("{}", logging::config::get_config_summary());
    }

    match execute(&args, &config) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(diagnostic) => {
            eprint!("{}", diagnostic);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<RuntimeConfig, String> {
    match &args.config {
        Some(path) => {
            log::info!("loading runtime preferences from {}", path.display());
            RuntimeConfig::load(path).map_err(|e| e.to_string())
        }
        None => Ok(RuntimeConfig::default()),
    }
}

/// Compile the requested source and render the output, or a diagnostic on failure
fn execute(args: &Args, config: &RuntimeConfig) -> Result<String, String> {
    let frontend = Frontend::with_config(config)
        .map_err(|e| format!("error: {}\n", e))?
        .with_debug(args.debug);

    let (source, source_name) = read_source(args)?;
    log::info!("compiling {} ({} bytes)", source_name, source.len());

    let result = frontend
        .run(&source)
        .map_err(|error| render_error(&source, &source_name, &error))?;
    result.log_success(&source_name);

    render_output(args, &result)
}

fn read_source(args: &Args) -> Result<(String, String), String> {
    match (&args.file, &args.expression) {
        (Some(path), _) => file_processor::process_file(path)
            .map(|processed| (processed.source, path.clone()))
            .map_err(|e| format!("error: {}\n", e)),
        (None, Some(expression)) => Ok((expression.clone(), "<input>".to_string())),
        (None, None) => Err("error: no expression or --file given\n".to_string()),
    }
}

fn render_error(source: &str, source_name: &str, error: &PipelineError) -> String {
    let message = format!("[{}] {}", error.error_code(), error.detail());
    match error.span() {
        Some(span) => {
            let rendered = SourceMap::new(source.to_string()).format_error(&span, &message);
            format!("{} ({})\n", rendered.trim_end(), source_name)
        }
        None => format!("error: {}\n", message),
    }
}

fn render_output(args: &Args, result: &PipelineResult) -> Result<String, String> {
    if args.json {
        return PipelineOutput::from(result)
            .to_json_pretty()
            .map(|json| format!("{}\n", json))
            .map_err(|e| format!("error: {}\n", e));
    }

    let mut output = String::new();

    if args.tokens {
        for token in &result.tokens {
            output.push_str(&format!("{}\n", token));
        }
    }

    output.push_str(&format!("{}\n", result.ast));

    if args.eval {
        output.push_str(&format!("= {}\n", result.value()));
    }

    Ok(output)
}
