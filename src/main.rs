// src/main.rs

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use syntax_shift::analysis::indent;
use syntax_shift::client::HttpTransport;
use syntax_shift::config::CONFIG;
use syntax_shift::controller::OperationController;
use syntax_shift::session::{FileScratchStore, KEY_LAST_CODE, KEY_LAST_LANGUAGE, ScratchStore};
use syntax_shift::types::{Language, OperationKind, OperationRequest};

/// Send source code to the Syntax Shift service and print the outcome.
#[derive(Parser, Debug)]
#[command(name = "syntax-shift", version, about)]
struct Cli {
    /// Operation to request
    #[arg(long, short = 'o', value_enum, default_value_t = OperationKind::Transform)]
    operation: OperationKind,

    /// Language of the input code
    #[arg(long, short = 's', value_enum, default_value_t = Language::Python)]
    source_language: Language,

    /// Target language (convert only)
    #[arg(long, short = 't', value_enum)]
    target_language: Option<Language>,

    /// Read code from this file instead of stdin
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Re-indent the transformed code locally before printing
    #[arg(long)]
    reindent: bool,

    /// Print the full outcome as JSON
    #[arg(long)]
    json: bool,

    /// Ping the service health endpoint and exit
    #[arg(long)]
    check: bool,

    /// Skip autosaving the input for the next run
    #[arg(long)]
    no_save: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level: Level = CONFIG.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.check {
        let transport = HttpTransport::from_config(&CONFIG);
        return Ok(match transport.health().await {
            Ok(()) => {
                println!("service at {} is healthy", CONFIG.endpoint);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("service at {} is unreachable: {}", CONFIG.endpoint, e);
                ExitCode::FAILURE
            }
        });
    }

    let code = read_code(&cli)?;

    if !cli.no_save {
        autosave(&code, cli.source_language);
    }

    info!(
        operation = %cli.operation,
        source = %cli.source_language,
        endpoint = %CONFIG.endpoint,
        "submitting operation"
    );

    let controller = OperationController::from_config(&CONFIG);
    let request = OperationRequest {
        source_code: code,
        source_language: cli.source_language,
        target_language: cli.target_language,
        kind: cli.operation,
    };

    let mut outcome = controller.execute(request).await;

    if cli.reindent
        && outcome.success
        && let Some(transformed) = outcome.transformed_code.take()
    {
        // Convert results are in the target language's syntax.
        let output_language = match cli.operation {
            OperationKind::Convert => cli.target_language.unwrap_or(cli.source_language),
            _ => cli.source_language,
        };
        outcome.transformed_code = Some(indent::reformat(&transformed, output_language));
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(if outcome.success { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    if outcome.success {
        if let Some(transformed) = &outcome.transformed_code {
            println!("{}", transformed);
        }
        for explanation in &outcome.explanations {
            eprintln!("note: {}", explanation);
        }
        for suggestion in &outcome.suggestions {
            eprintln!("suggestion: {}", suggestion);
        }
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "error: {}",
            outcome.error_message.as_deref().unwrap_or("operation failed")
        );
        Ok(ExitCode::FAILURE)
    }
}

fn read_code(cli: &Cli) -> anyhow::Result<String> {
    match &cli.input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut code = String::new();
            std::io::stdin().read_to_string(&mut code)?;
            Ok(code)
        }
    }
}

/// Best-effort scratch save of the input; failures are logged, never fatal.
fn autosave(code: &str, language: Language) {
    let Some(path) = FileScratchStore::default_path() else {
        return;
    };
    match FileScratchStore::open(&path) {
        Ok(mut store) => {
            if let Err(e) = store
                .set(KEY_LAST_CODE, code)
                .and_then(|_| store.set(KEY_LAST_LANGUAGE, language.wire_name()))
            {
                warn!(error = %e, "autosave failed");
            }
        }
        Err(e) => warn!(error = %e, "could not open scratch store"),
    }
}
