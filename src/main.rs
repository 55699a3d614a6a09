mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use snipscope::config::Config;
use snipscope::diagnostics;
use snipscope::error::Error;
use snipscope::{DeclarationKind, Scope};

/// Exit code for errors that stop a command (unreadable file, bad config).
const EXIT_FATAL: u8 = 3;

#[derive(Parser)]
#[command(name = "snipscope", version, about = "Find the one place an edit belongs in a Python file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Config file (default: .snipscope.toml in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log resolution details to stderr (filter with RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the unique line containing a snippet (exit 0 unique, 1 ambiguous, 2 not found)
    Find {
        /// Python source file
        file: PathBuf,
        /// Literal text to look for
        text: String,
        /// Only search inside this function or method
        #[arg(long, conflicts_with = "class")]
        function: Option<String>,
        /// Only search inside this class
        #[arg(long)]
        class: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the line range of a function or class
    Locate {
        /// Python source file
        file: PathBuf,
        /// Function or class name
        name: String,
        /// Look for a class instead of a function
        #[arg(long)]
        class: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether replacing old text with new text is safe
    Safety {
        /// Python source file
        file: PathBuf,
        /// Text to be replaced
        #[arg(long, required_unless_present = "old_file", conflicts_with = "old_file")]
        old: Option<String>,
        /// Read the text to be replaced from a file
        #[arg(long)]
        old_file: Option<PathBuf>,
        /// Replacement text
        #[arg(long, required_unless_present = "new_file", conflicts_with = "new_file")]
        new: Option<String>,
        /// Read the replacement text from a file
        #[arg(long)]
        new_file: Option<PathBuf>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Show context around every occurrence of a snippet
    Suggest {
        /// Python source file
        file: PathBuf,
        /// Literal text to look for
        text: String,
    },
    /// List every function and class with its line range
    Symbols {
        /// Python source file
        file: PathBuf,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("snipscope=debug"))
            .init();
    }

    return match run(cli) {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(EXIT_FATAL)
        },
    };
}

/// Load config, then dispatch to the command.
///
/// # Errors
///
/// Returns config errors and the errors of the dispatched command.
fn run(cli: Cli) -> Result<ExitCode, Error> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(&PathBuf::from("."))?,
    };

    return match cli.command {
        Commands::Locate { file, name, class, json } => {
            let kind = if class { DeclarationKind::Class } else { DeclarationKind::Function };
            commands::locate(&config, &file, &name, kind, json)
        },
        Commands::Find { file, text, function, class, json } => {
            let scope = function.map(Scope::Function).or_else(|| return class.map(Scope::Class));
            commands::find(&config, &file, &text, scope.as_ref(), json)
        },
        Commands::Suggest { file, text } => commands::suggest(&config, &file, &text),
        Commands::Safety { file, old, old_file, new, new_file, json } => {
            let texts = commands::EditTexts {
                new: new.as_deref(),
                new_file: new_file.as_deref(),
                old: old.as_deref(),
                old_file: old_file.as_deref(),
            };
            commands::safety(&config, &file, &texts, json)
        },
        Commands::Symbols { file, json } => commands::symbols(&config, &file, json),
    };
}
