//! Translation catalog service
//!
//! Reads a translation file through the filesystem boundary, parses it and
//! builds a [`Tie`] honouring the loaded settings.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, ResultExt, Tie};
use crate::config::Settings;
use crate::domain::Document;
use crate::infrastructure::parser::{self, DocumentFormat};
use crate::infrastructure::traits::FileSystem;

/// Service loading translation documents into [`Tie`] instances.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read and parse a translation file; the format follows the extension.
    #[instrument(level = "debug", skip(self))]
    pub fn read_document(&self, path: &Path) -> ApplicationResult<Document> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("translation file not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read translations", path)?;
        let format = DocumentFormat::from_path(path);
        debug!(?format, bytes = content.len(), "read_document");

        parser::parse_str(&content, format).map_err(|e| match e {
            ApplicationError::OperationFailed { context, source } => {
                ApplicationError::OperationFailed {
                    context: format!("{context}: {}", path.display()),
                    source,
                }
            }
            other => other,
        })
    }

    /// Load a translation file into a ready-to-render [`Tie`].
    ///
    /// `default_locale` overrides the document's own default; `locale` selects
    /// the initial current locale.
    pub fn load(
        &self,
        path: &Path,
        default_locale: Option<&str>,
        locale: Option<&str>,
    ) -> ApplicationResult<Tie> {
        let document = self.read_document(path)?;
        let options = self.settings.tie_options(default_locale, locale);
        let tie = Tie::with_options(&document, &options)?;
        debug!(
            path = %path.display(),
            default = tie.default_locale(),
            locale = tie.locale(),
            "catalog loaded"
        );
        Ok(tie)
    }
}
