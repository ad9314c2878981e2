//! Tests for CatalogService and the service container

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use tie::application::services::CatalogService;
use tie::application::ApplicationError;
use tie::config::Settings;
use tie::domain::DocumentError;
use tie::infrastructure::di::ServiceContainer;
use tie::infrastructure::traits::{MemoryFileSystem, RealFileSystem};
use tie::Args;

/// Helper to create translation files for testing
fn create_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write translation file");
    path
}

fn memory_catalog(path: &str, content: &str, settings: Settings) -> CatalogService {
    let fs = MemoryFileSystem::new().with_file(path, content);
    CatalogService::new(Arc::new(fs), Arc::new(settings))
}

#[test]
fn given_yaml_file_when_loading_then_renders_in_document_default() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let file = create_file(
        &temp,
        "app.yaml",
        "tie:\n  default_locale: fr\ntitle:\n  en: Title\n  fr: Titre\n",
    );
    let service = CatalogService::new(Arc::new(RealFileSystem), Arc::new(Settings::default()));

    // Act
    let tie = service.load(&file, None, None).unwrap();

    // Assert
    assert_eq!(tie.default_locale(), "fr");
    assert_eq!(tie.render("title", None, &Args::new()).unwrap(), "Titre");
}

#[test]
fn given_json_file_when_loading_then_parsed_by_extension() {
    let temp = TempDir::new().unwrap();
    let file = create_file(
        &temp,
        "app.json",
        r#"{"+menu": {"open": {"en": "Open", "de": "Öffnen"}}}"#,
    );
    let container = ServiceContainer::new(Settings::default());

    let tie = container.catalog.load(&file, None, Some("de-DE")).unwrap();

    assert_eq!(tie.render("menu.open", None, &Args::new()).unwrap(), "Öffnen");
}

#[test]
fn given_missing_file_when_loading_then_operation_failed() {
    let container = ServiceContainer::with_deps(
        Settings::default(),
        Arc::new(MemoryFileSystem::new()),
    );

    let err = container
        .catalog
        .load(Path::new("/nowhere/app.yaml"), None, None)
        .unwrap_err();

    match err {
        ApplicationError::OperationFailed { context, .. } => {
            assert!(context.contains("/nowhere/app.yaml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_invalid_yaml_when_loading_then_context_names_file() {
    let service = memory_catalog("/i18n/bad.yaml", "title: [unclosed", Settings::default());

    let err = service.load(Path::new("/i18n/bad.yaml"), None, None).unwrap_err();

    assert!(err.to_string().contains("/i18n/bad.yaml"), "got: {err}");
}

#[test]
fn given_document_error_when_loading_then_domain_error_preserved() {
    let service = memory_catalog(
        "/i18n/app.yaml",
        "title:\n  English: Title\n",
        Settings::default(),
    );

    let err = service.load(Path::new("/i18n/app.yaml"), None, None).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Document(DocumentError::InvalidLocale { .. })
    ));
}

#[test]
fn given_settings_when_loading_then_fallback_and_locale_applied() {
    // Arrange
    let settings = Settings {
        default_locale: "ja".to_string(),
        locale: Some("ko".to_string()),
        ..Settings::default()
    };
    let service = memory_catalog(
        "/i18n/app.yaml",
        "title:\n  ja: タイトル\n  ko: 제목\n",
        settings,
    );

    // Act
    let tie = service.load(Path::new("/i18n/app.yaml"), None, None).unwrap();

    // Assert
    assert_eq!(tie.default_locale(), "ja");
    assert_eq!(tie.locale(), "ko");
    assert_eq!(tie.render("title", None, &Args::new()).unwrap(), "제목");
}

#[test]
fn given_explicit_default_locale_when_loading_then_overrides_document_and_settings() {
    let service = memory_catalog(
        "/i18n/app.yaml",
        "tie:\n  default_locale: en\ntitle:\n  en: Title\n  de: Titel\n",
        Settings::default(),
    );

    let tie = service
        .load(Path::new("/i18n/app.yaml"), Some("de"), None)
        .unwrap();

    assert_eq!(tie.default_locale(), "de");
    assert_eq!(tie.render("title", Some("it"), &Args::new()).unwrap(), "Titel");
}

#[test]
fn given_version_check_disabled_in_settings_when_loading_newer_document_then_accepted() {
    let settings = Settings {
        check_version: false,
        ..Settings::default()
    };
    let service = memory_catalog(
        "/i18n/app.yaml",
        "tie:\n  version: \"42.0\"\ntitle: x\n",
        settings,
    );

    assert!(service.load(Path::new("/i18n/app.yaml"), None, None).is_ok());
}
