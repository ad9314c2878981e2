//! Command dispatch: loads settings, wires services and prints results.

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::Tie;
use crate::cli::args::{Cli, Commands, ConfigCommands, LocaleArgs, RenderArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, OutputFormat, Settings};
use crate::domain::locale;
use crate::domain::walker::Child;
use crate::domain::RenderedNode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Render {
            file,
            path,
            locale,
            args,
        }) => cmd_render(cli, file, path, locale, args),
        Some(Commands::List {
            file,
            path,
            locale,
            args,
        }) => cmd_list(cli, file, path.as_deref(), locale, args),
        Some(Commands::Tree {
            file,
            at,
            format,
            locale,
            args,
        }) => cmd_tree(cli, file, at.as_deref(), *format, locale, args),
        Some(Commands::Info { file }) => cmd_info(cli, file),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            cmd_completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `tie --help`".to_string(),
        )),
    }
}

/// Settings from `--config` when given, else layered around `dir`.
fn load_settings(cli: &Cli, dir: Option<&Path>) -> CliResult<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::load_file(path)?,
        None => Settings::load(dir)?,
    };
    debug!(?settings, "settings loaded");
    Ok(settings)
}

fn document_dir(file: &Path) -> Option<&Path> {
    file.parent().filter(|dir| !dir.as_os_str().is_empty())
}

fn create_container(cli: &Cli, file: &Path) -> CliResult<ServiceContainer> {
    let settings = load_settings(cli, document_dir(file).or(Some(Path::new("."))))?;
    Ok(ServiceContainer::new(settings))
}

fn load_tie(container: &ServiceContainer, file: &Path, locale: &LocaleArgs) -> CliResult<Tie> {
    check_locale_args(locale)?;
    Ok(container.catalog.load(
        file,
        locale.default_locale.as_deref(),
        locale.locale.as_deref(),
    )?)
}

/// Rejects `-l`/`-D` values that are not locale tags before any file is read.
fn check_locale_args(locale: &LocaleArgs) -> CliResult<()> {
    let given = [
        ("--locale", locale.locale.as_deref()),
        ("--default-locale", locale.default_locale.as_deref()),
    ];
    for (flag, tag) in given {
        if let Some(tag) = tag.filter(|tag| !locale::is_valid_tag(tag)) {
            return Err(CliError::InvalidArgs(format!(
                "{flag} '{tag}' is not a locale tag (expected e.g. 'en' or 'en-US')"
            )));
        }
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_render(
    cli: &Cli,
    file: &Path,
    path: &str,
    locale: &LocaleArgs,
    args: &RenderArgs,
) -> CliResult<()> {
    let container = create_container(cli, file)?;
    let tie = load_tie(&container, file, locale)?;
    let text = tie.render(path, None, &args.to_args())?;
    output::info(&text);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_list(
    cli: &Cli,
    file: &Path,
    path: Option<&str>,
    locale: &LocaleArgs,
    args: &RenderArgs,
) -> CliResult<()> {
    let container = create_container(cli, file)?;
    let tie = load_tie(&container, file, locale)?;
    let args = args.to_args();

    let mut count = 0;
    for (index, child) in tie.iterate(path.unwrap_or(""), None)? {
        match child {
            Child::Entry(renderable) => {
                let text = renderable.render(&args)?;
                output::entry(index, renderable.key(), &text);
            }
            Child::Section(view) => output::section(index, view.key()),
        }
        count += 1;
    }
    if count == 0 {
        output::warning(&format!("section '{}' has no entries", path.unwrap_or("")));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_tree(
    cli: &Cli,
    file: &Path,
    at: Option<&str>,
    format: Option<OutputFormat>,
    locale: &LocaleArgs,
    args: &RenderArgs,
) -> CliResult<()> {
    let container = create_container(cli, file)?;
    let tie = load_tie(&container, file, locale)?;
    let rendered = tie.render_tree_at(at.unwrap_or(""), &args.to_args())?;

    let format = format.unwrap_or(container.settings.output_format);
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&rendered)
            .map_err(|e| InfraError::serialize("json", e))?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(&rendered).map_err(|e| InfraError::serialize("yaml", e))?
        }
        OutputFormat::Outline => {
            let label = at
                .filter(|path| !path.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| file.display().to_string());
            outline(label, &rendered).to_string()
        }
    };
    writeln!(io::stdout().lock(), "{}", text.trim_end())
        .map_err(|e| InfraError::io("write rendered tree", e))?;
    Ok(())
}

fn outline(label: String, node: &RenderedNode) -> termtree::Tree<String> {
    match node {
        RenderedNode::Text(text) => termtree::Tree::new(format!("{label}: {text}")),
        RenderedNode::Section(children) => termtree::Tree::new(label).with_leaves(
            children
                .iter()
                .map(|(key, child)| outline(key.clone(), child)),
        ),
    }
}

#[instrument(skip(cli))]
fn cmd_info(cli: &Cli, file: &Path) -> CliResult<()> {
    let container = create_container(cli, file)?;
    let tie = load_tie(&container, file, &LocaleArgs::default())?;
    let tree = tie.tree();

    output::header(&file.display());
    output::field(
        "version",
        tree.metadata().version.as_deref().unwrap_or("(unspecified)"),
    );
    output::field("default locale", tie.default_locale());
    output::field("locales", &tie.available_locales().iter().join(", "));
    output::field("globals", &tree.globals().names().iter().join(", "));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show { dir } => {
            let settings = load_settings(cli, dir.as_deref())?;
            output::info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(path) => output::field("global", &path.display()),
                None => output::field("global", "(no home directory)"),
            }
            output::field("local", &config::local_config_path(Path::new(".")).display());
            if let Some(path) = &cli.config {
                output::field("explicit", &path.display());
            }
        }
    }
    Ok(())
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_rendered_tree_when_building_outline_then_keys_and_texts_nested() {
        let rendered = RenderedNode::Section(vec![
            ("title".into(), RenderedNode::Text("Hello".into())),
            (
                "menu".into(),
                RenderedNode::Section(vec![("open".into(), RenderedNode::Text("Open".into()))]),
            ),
        ]);

        let text = outline("t.yaml".into(), &rendered).to_string();

        assert!(text.starts_with("t.yaml\n"));
        assert!(text.contains("title: Hello"));
        assert!(text.contains("menu"));
        assert!(text.contains("open: Open"));
    }

    #[test]
    fn given_non_tag_locale_when_checking_args_then_invalid_args() {
        let bad = LocaleArgs {
            locale: Some("English".into()),
            default_locale: None,
        };
        let good = LocaleArgs {
            locale: Some("en-US".into()),
            default_locale: Some("ru".into()),
        };

        let result = check_locale_args(&bad);

        match result {
            Err(CliError::InvalidArgs(msg)) => assert!(msg.contains("--locale 'English'")),
            other => panic!("expected InvalidArgs, got {other:?}"),
        }
        assert!(check_locale_args(&good).is_ok());
        assert!(check_locale_args(&LocaleArgs::default()).is_ok());
    }

    #[test]
    fn given_bare_file_name_when_taking_document_dir_then_none() {
        assert_eq!(document_dir(Path::new("t.yaml")), None);
        assert_eq!(document_dir(Path::new("i18n/t.yaml")), Some(Path::new("i18n")));
    }
}
