//! Command dispatch end to end, through parsed arguments

use std::fs;

use clap::Parser;
use tempfile::TempDir;

use tie::cli::commands::execute_command;
use tie::cli::Cli;
use tie::exitcode;

fn run(args: &[&str]) -> Result<(), i32> {
    let cli = Cli::parse_from(std::iter::once("tie").chain(args.iter().copied()));
    execute_command(&cli).map_err(|e| e.exit_code())
}

fn catalog(dir: &TempDir) -> String {
    let path = dir.path().join("app.yaml");
    fs::write(
        &path,
        "$brand: Tie\n+menu:\n  open:\n    en: Open {brand}\n    fr: Ouvrir {brand}\n  save:\n    en: Save {}\n",
    )
    .unwrap();
    path.display().to_string()
}

#[test]
fn given_catalog_when_rendering_entry_then_succeeds() {
    let dir = TempDir::new().unwrap();
    let file = catalog(&dir);

    assert_eq!(run(&["render", &file, "menu.open", "-l", "fr"]), Ok(()));
    assert_eq!(run(&["render", &file, "menu.save", "-p", "draft"]), Ok(()));
}

#[test]
fn given_catalog_when_listing_and_printing_tree_then_succeeds() {
    let dir = TempDir::new().unwrap();
    let file = catalog(&dir);

    assert_eq!(run(&["list", &file, "menu", "-p", "x"]), Ok(()));
    assert_eq!(run(&["tree", &file, "-f", "outline", "-p", "x"]), Ok(()));
    assert_eq!(run(&["tree", &file, "--at", "menu", "-f", "yaml", "-p", "x"]), Ok(()));
    assert_eq!(run(&["info", &file]), Ok(()));
}

#[test]
fn given_missing_file_when_rendering_then_noinput() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("absent.yaml").display().to_string();

    assert_eq!(run(&["render", &file, "title"]), Err(exitcode::NOINPUT));
}

#[test]
fn given_bad_path_when_rendering_then_software_error() {
    let dir = TempDir::new().unwrap();
    let file = catalog(&dir);

    assert_eq!(run(&["render", &file, "menu.nope"]), Err(exitcode::SOFTWARE));
}

#[test]
fn given_malformed_document_when_rendering_then_dataerr() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "title:\n  English: Title\n").unwrap();

    let file = path.display().to_string();
    assert_eq!(run(&["render", &file, "title"]), Err(exitcode::DATAERR));
}

#[test]
fn given_repeated_keys_when_rendering_then_dataerr() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dup.yaml");
    fs::write(&path, "title:\n  en: first\ntitle:\n  en: second\n").unwrap();

    let file = path.display().to_string();
    assert_eq!(run(&["render", &file, "title"]), Err(exitcode::DATAERR));
}

#[test]
fn given_non_tag_locale_flag_when_rendering_then_usage() {
    let dir = TempDir::new().unwrap();
    let file = catalog(&dir);

    assert_eq!(run(&["render", &file, "menu.open", "-l", "English"]), Err(exitcode::USAGE));
    assert_eq!(run(&["list", &file, "-D", "en_US"]), Err(exitcode::USAGE));
}

#[test]
fn given_no_subcommand_when_dispatching_then_usage() {
    assert_eq!(run(&[]), Err(exitcode::USAGE));
}
