use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use command::{CommandAction, CommandHandler, CommandRequest, CommandResponse};
use engage_protocol::{serialize_json, ActorPayload, AuthorizePayload, ScorePayload};
use engage_sentiment::SentimentLabel;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

mod command;
mod config;

#[derive(Parser)]
#[command(name = "engage")]
#[command(about = "Review sentiment scoring and access checks for the community platform", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (overrides ENGAGE_CONFIG and ./engage.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the sentiment of review text
    Score(ScoreArgs),

    /// Check whether an actor may perform an operation (exit 1 on deny)
    Authorize(AuthorizeArgs),

    /// List the operation catalog with its access policies
    Operations(OperationsArgs),

    /// Execute a JSON Command API request
    Command(CommandArgs),
}

#[derive(Args)]
struct ScoreArgs {
    /// Text to score (reads --file or stdin when omitted)
    #[arg(conflicts_with = "file")]
    text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Include matched tokens and modifiers
    #[arg(long)]
    explain: bool,

    /// Output the full JSON response
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AuthorizeArgs {
    /// Operation name, e.g. create_review
    #[arg(long)]
    operation: String,

    /// Acting user id (omit for an anonymous caller)
    #[arg(long, requires = "role")]
    actor_id: Option<String>,

    /// Acting user role: resident, business_owner or community_organizer
    #[arg(long, requires = "actor_id")]
    role: Option<String>,

    /// Owner id of the targeted resource
    #[arg(long)]
    owner: Option<String>,

    /// Output the full JSON response
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct OperationsArgs {
    /// Output the full JSON response
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON request (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing the JSON request
    #[arg(long)]
    file: Option<PathBuf>,

    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON consumers
    let json_output = match &cli.command {
        Commands::Score(args) => args.json,
        Commands::Authorize(args) => args.json,
        Commands::Operations(args) => args.json,
        Commands::Command(_) => true,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let loaded = config::load(cli.config.as_deref())?;
    let handler = CommandHandler::new(loaded).context("Invalid sentiment configuration")?;

    match cli.command {
        Commands::Score(args) => run_score(args, &handler)?,
        Commands::Authorize(args) => run_authorize(args, &handler)?,
        Commands::Operations(args) => run_operations(args, &handler)?,
        Commands::Command(args) => run_command(args, &handler)?,
    }

    Ok(())
}

fn run_score(args: ScoreArgs, handler: &CommandHandler) -> Result<()> {
    let text = match (args.text, &args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read text from {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };
    let payload = ScorePayload {
        text,
        explain: args.explain,
    };
    let response = handler.execute(CommandRequest {
        action: CommandAction::Score,
        payload: serde_json::to_value(payload)?,
        config: None,
    });

    if args.json {
        println!("{}", serialize_json(&response, true)?);
    } else {
        exit_on_error(&response);
        let data = &response.data;
        let label: SentimentLabel = serde_json::from_value(data["label"].clone())?;
        println!("{} ({label})", data["score"].as_f64().unwrap_or_default());
        println!("This review {}", label.feedback());
        if args.explain {
            print_explanation(data);
        }
    }

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_explanation(data: &Value) {
    if let Some(matches) = data["matches"].as_array() {
        for hit in matches {
            println!(
                "  {:>3}  {}",
                hit["weight"].as_i64().unwrap_or_default(),
                hit["token"].as_str().unwrap_or_default()
            );
        }
    }
    for (key, tag) in [("boosted", "boost"), ("penalized", "penalty")] {
        for word in data[key].as_array().into_iter().flatten() {
            println!("  {tag}: {}", word.as_str().unwrap_or_default());
        }
    }
    println!(
        "lexicon {} raw {}",
        data["lexicon_score"].as_i64().unwrap_or_default(),
        data["raw_score"].as_f64().unwrap_or_default()
    );
}

fn run_authorize(args: AuthorizeArgs, handler: &CommandHandler) -> Result<()> {
    let actor = match (args.actor_id, args.role) {
        (Some(id), Some(role)) => Some(ActorPayload { id, role }),
        _ => None,
    };
    let payload = AuthorizePayload {
        operation: args.operation,
        actor,
        resource_owner: args.owner,
    };
    let response = handler.execute(CommandRequest {
        action: CommandAction::Authorize,
        payload: serde_json::to_value(payload)?,
        config: None,
    });

    if args.json {
        println!("{}", serialize_json(&response, true)?);
    } else {
        exit_on_error(&response);
        for hint in &response.hints {
            eprintln!("Warning: {}", hint.text);
        }
        let data = &response.data;
        let operation = data["operation"].as_str().unwrap_or_default();
        if data["allowed"].as_bool() == Some(true) {
            println!("allowed: {operation}");
        } else {
            println!(
                "denied: {operation} ({}): {}",
                data["reason"].as_str().unwrap_or_default(),
                data["message"].as_str().unwrap_or_default()
            );
        }
    }

    if response.is_error() || response.data["allowed"].as_bool() != Some(true) {
        std::process::exit(1);
    }
    Ok(())
}

fn run_operations(args: OperationsArgs, handler: &CommandHandler) -> Result<()> {
    let response = handler.execute(CommandRequest {
        action: CommandAction::Capabilities,
        payload: Value::Object(Default::default()),
        config: None,
    });
    exit_on_error(&response);

    let operations = &response.data["operations"];
    if args.json {
        println!("{}", serialize_json(operations, true)?);
        return Ok(());
    }

    for op in operations.as_array().into_iter().flatten() {
        let field = |key: &str| op[key].as_str().unwrap_or("-").to_string();
        println!(
            "{:<28} {:<10} {:<9} {:<20} {}",
            field("name"),
            field("subgraph"),
            field("authentication"),
            field("required_role"),
            field("owner_rule")
        );
    }
    Ok(())
}

fn run_command(args: CommandArgs, handler: &CommandHandler) -> Result<()> {
    let raw = read_request(&args)?;
    let request: CommandRequest =
        serde_json::from_str(&raw).context("Invalid JSON passed to --json/--file")?;

    let response = handler.execute(request);
    println!("{}", serialize_json(&response, args.pretty)?);

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_request(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Command request is empty. Provide --json, --file, or pipe JSON via stdin.");
    }

    Ok(buffer)
}

fn exit_on_error(response: &CommandResponse) {
    if response.is_error() {
        eprintln!(
            "Error: {}",
            response.message.as_deref().unwrap_or("Unknown error")
        );
        if let Some(hint) = response.error.as_ref().and_then(|e| e.hint.as_deref()) {
            eprintln!("Hint: {hint}");
        }
        std::process::exit(1);
    }
}
