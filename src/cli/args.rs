//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;
use crate::domain;

/// Render locale-tagged translation trees with fallback and cross-entry substitution
#[derive(Parser, Debug)]
#[command(name = "tie")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Settings file (default: global and document-local config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a single entry
    Render {
        /// Translation file (YAML or JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Dotted path of the entry, e.g. `menu.title`
        path: String,
        #[command(flatten)]
        locale: LocaleArgs,
        #[command(flatten)]
        args: RenderArgs,
    },

    /// List the children of a section with their rendered text
    List {
        /// Translation file (YAML or JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Dotted path of the section (default: root)
        path: Option<String>,
        #[command(flatten)]
        locale: LocaleArgs,
        #[command(flatten)]
        args: RenderArgs,
    },

    /// Render a whole (sub)tree
    Tree {
        /// Translation file (YAML or JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Dotted path of the section to start from (default: root)
        #[arg(long)]
        at: Option<String>,
        /// Output format (default: from settings)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        #[command(flatten)]
        locale: LocaleArgs,
        #[command(flatten)]
        args: RenderArgs,
    },

    /// Show locales, globals and metadata of a document
    Info {
        /// Translation file (YAML or JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show {
        /// Directory whose `.tie.toml` should be layered in
        #[arg(value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },
    /// Print config file locations
    Path,
}

/// Locale selection shared by rendering commands.
#[derive(Args, Debug, Clone, Default)]
pub struct LocaleArgs {
    /// Locale to render in (default: the default locale)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Override the document's default locale
    #[arg(short = 'D', long)]
    pub default_locale: Option<String>,
}

/// Substitution arguments shared by rendering commands.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Named argument (repeatable)
    #[arg(short = 'a', long = "arg", value_name = "NAME=VALUE", value_parser = parse_named_arg)]
    pub named: Vec<(String, String)>,

    /// Value for the next `{}` slot (repeatable)
    #[arg(short = 'p', long = "positional", value_name = "VALUE")]
    pub positional: Vec<String>,
}

impl RenderArgs {
    pub fn to_args(&self) -> domain::Args {
        let args = self
            .positional
            .iter()
            .fold(domain::Args::new(), |args, value| args.arg(value));
        self.named
            .iter()
            .fold(args, |args, (name, value)| args.with(name.as_str(), value))
    }
}

fn parse_named_arg(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}
