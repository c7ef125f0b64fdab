//! The depot provider contract.
//!
//! Every registrar backend implements [`DepotProvider`], so CLI
//! orchestration never branches on registrar kind. Remote-service outcomes
//! are modeled as return values; only malformed static configuration is an
//! error (see [`crate::error`]).

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{MasonError, Result};

use super::diagnostics::DiagnosticSink;
use super::github::GithubReleasesProvider;
use super::progress::ProgressObserver;
use super::storage::TemplateStore;
use super::{DepotConfig, Identifier, TemplateType};

/// Everything currently retrievable from a depot, grouped by template type.
///
/// A type with no discovered identifiers is absent from the map; duplicate
/// `(name, version)` pairs across releases collapse via set semantics.
pub type Listing = BTreeMap<TemplateType, BTreeSet<Identifier>>;

/// The result of a single download attempt.
///
/// Remote failures are values, not errors, so a caller iterating many
/// identifiers can skip or retry without unwinding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The template was fetched and extracted into `path`.
    Completed { path: PathBuf },
    /// The tagged release exists but carries no matching template asset.
    AssetMissing,
    /// The depot could not be reached or answered with a non-success status.
    Unavailable { status: Option<u16> },
}

impl DownloadOutcome {
    /// Whether the template is now fully materialized on disk.
    pub fn succeeded(&self) -> bool {
        matches!(self, DownloadOutcome::Completed { .. })
    }
}

/// Uniform surface over registrar backends.
pub trait DepotProvider {
    /// The depot configuration this provider was built from.
    fn config(&self) -> &DepotConfig;

    /// Validate location and registrar options syntactically.
    ///
    /// Side-effect free and idempotent; never performs network I/O.
    fn verify_configuration(&self) -> Result<()>;

    /// Enumerate retrievable templates, restricted to `types`.
    ///
    /// Transport failures do not error: a diagnostic is emitted and an empty
    /// listing returned. `Err` is reserved for configuration problems.
    fn list_all(&self, types: &[TemplateType]) -> Result<Listing>;

    /// Fetch and materialize exactly one template version.
    ///
    /// Idempotent end state: any prior content at the target directory is
    /// replaced wholesale. `Err` is reserved for configuration problems.
    fn download(
        &self,
        identifier: &Identifier,
        observer: &mut dyn ProgressObserver,
    ) -> Result<DownloadOutcome>;
}

impl std::fmt::Debug for dyn DepotProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepotProvider")
            .field("config", self.config())
            .finish_non_exhaustive()
    }
}

/// Construct the provider selected by a depot's registrar discriminator.
///
/// Registrar options are parsed into the provider's typed options struct
/// here, so malformed options fail before any network call.
pub fn provider_for(
    config: DepotConfig,
    store: TemplateStore,
    sink: Arc<dyn DiagnosticSink>,
) -> Result<Box<dyn DepotProvider>> {
    match config.registrar.as_str() {
        GithubReleasesProvider::REGISTRAR => Ok(Box::new(GithubReleasesProvider::new(
            config, store, sink,
        )?)),
        other => Err(MasonError::UnknownRegistrar {
            registrar: other.to_string(),
        }),
    }
}
