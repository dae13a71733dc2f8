use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use promptline::config::AppConfig;
use promptline::styles::{Stylesheet, Theme};
use promptline::validation::{self, StringValidator};
use promptline::{DisplayCase, Outcome, TextPrompt, TextPromptArgs};

const DEFAULT_STYLES: &str = include_str!("../styles/default.css");
const LOG_ENV: &str = "PROMPTLINE_LOG";
const LOG_FILE_ENV: &str = "PROMPTLINE_LOG_FILE";

/// Ask for one line of text and print it once the terminal is restored.
#[derive(Parser, Debug)]
#[command(name = "promptline", version, about)]
struct Args {
    /// Identifier reported with the answer
    #[arg(long, default_value = "answer")]
    id: String,

    /// Question shown next to the tag
    #[arg(long, default_value = "What should we call you?")]
    prompt: String,

    /// Short badge in front of the prompt
    #[arg(long, default_value = "input")]
    tag: String,

    /// Shown while empty and used when confirming an empty field
    #[arg(long, default_value = "")]
    placeholder: String,

    /// Reject answers longer than this many characters
    #[arg(long)]
    max_len: Option<usize>,

    /// Reject empty answers
    #[arg(long)]
    required: bool,

    /// Stylesheet overriding the default look
    #[arg(long)]
    styles: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let mut config = AppConfig::from_env().context("read PROMPTLINE_* environment")?;
    if args.styles.is_some() {
        config.stylesheet = args.styles.clone();
    }
    let stylesheet = load_stylesheet(&config)?;
    let theme = Theme::from_stylesheet(&stylesheet, Some(args.id.as_str()));

    let mut prompt = TextPrompt::new(
        args.id.clone(),
        TextPromptArgs {
            placeholder: args.placeholder.clone(),
            prompt: args.prompt.clone(),
            tag: args.tag.clone(),
            validator: final_validator(&args),
            in_flight_validator: in_flight_validator(&args),
            ..TextPromptArgs::default()
        },
    )
    .with_blink_interval(config.blink_interval);
    let _ = prompt.focus();

    let outcome = DisplayCase::new(prompt)
        .with_config(config)
        .with_theme(theme)
        .run()
        .await?;

    match outcome {
        Outcome::Completed(completion) => {
            info!(id = %completion.id, "answer received");
            println!("{}", completion.value);
        }
        Outcome::Quit => info!("quit without answering"),
    }
    Ok(())
}

/// Logs go to `PROMPTLINE_LOG_FILE` when set; stdout belongs to the UI.
fn init_tracing() -> anyhow::Result<()> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("create log file {}", PathBuf::from(&path).display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .with(filter)
        .init();
    Ok(())
}

fn load_stylesheet(config: &AppConfig) -> anyhow::Result<Stylesheet> {
    if let Some(path) = &config.stylesheet {
        match Stylesheet::from_file(path) {
            Ok(sheet) => return Ok(sheet),
            Err(err) => warn!(
                path = %path.display(),
                error = %err,
                "unable to read stylesheet, falling back to embedded styles",
            ),
        }
    }
    Stylesheet::parse(DEFAULT_STYLES).context("parse embedded stylesheet")
}

fn final_validator(args: &Args) -> StringValidator {
    let mut checks = Vec::new();
    if args.required {
        checks.push(validation::not_empty("an answer is required"));
    }
    if let Some(max) = args.max_len {
        checks.push(validation::max_len(
            max,
            format!("at most {max} characters"),
        ));
    }
    validation::all(checks)
}

fn in_flight_validator(args: &Args) -> StringValidator {
    match args.max_len {
        Some(max) => validation::max_len(max, format!("at most {max} characters")),
        None => validation::none(),
    }
}
