use std::sync::{Arc, PoisonError, RwLock};

use log::{info, warn};

use super::document::DocumentModel;
use crate::error::BuildError;
use crate::parse::spec::OpenApiDocument;
use crate::transform::builder::{BuildOptions, build_with_options};
use crate::validate::ValidationIssue;

/// Holds the current [`DocumentModel`] for concurrent readers.
///
/// Readers take a snapshot and keep using it for as long as they like. A
/// reload builds the new model off to the side and only swaps it in once the
/// build succeeded, so a broken document never replaces a working one.
#[derive(Debug)]
pub struct DocumentStore {
    current: RwLock<Arc<DocumentModel>>,
    options: BuildOptions,
}

impl DocumentStore {
    pub fn new(model: DocumentModel, options: BuildOptions) -> Self {
        Self {
            current: RwLock::new(Arc::new(model)),
            options,
        }
    }

    /// Build the first model from `spec`.
    pub fn open(
        spec: &OpenApiDocument,
        options: BuildOptions,
    ) -> Result<(Self, Vec<ValidationIssue>), BuildError> {
        let build = build_with_options(spec, &options)?;
        Ok((Self::new(build.model, options), build.issues))
    }

    /// The model as of now. Later reloads do not affect the returned value.
    pub fn snapshot(&self) -> Arc<DocumentModel> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Rebuild from `spec` and publish the result. On error the previous
    /// model stays current.
    pub fn reload(&self, spec: &OpenApiDocument) -> Result<Vec<ValidationIssue>, BuildError> {
        let build = match build_with_options(spec, &self.options) {
            Ok(build) => build,
            Err(e) => {
                warn!("reload rejected, keeping previous model: {}", e);
                return Err(e);
            }
        };

        let next = Arc::new(build.model);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
        info!("reloaded `{}`", spec.info.title);
        Ok(build.issues)
    }
}
