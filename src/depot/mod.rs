//! Template depots.
//!
//! A depot is a configured remote source of versioned templates. This module
//! defines the provider contract every registrar backend satisfies and the
//! machinery around it:
//!
//! - [`identifier`] - Template names, versions, and types
//! - [`config`] - Depot configuration and typed registrar options
//! - [`provider`] - The [`DepotProvider`] contract and registrar dispatch
//! - [`github`] - The `github-releases` registrar backend
//! - [`storage`] - Local template store path resolution
//! - [`wizard`] - Interactive registrar option collection
//! - [`diagnostics`] - Injected diagnostic sink
//! - [`progress`] - Download and extraction progress observers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mason::depot::{provider_for, DepotConfig, TemplateStore, TracingSink, TemplateType};
//!
//! let config = DepotConfig::new("mainline", "purduesigbots/pros", "github-releases");
//! let provider = provider_for(config, TemplateStore::new(), Arc::new(TracingSink)).unwrap();
//! let listing = provider.list_all(&TemplateType::ALL).unwrap();
//! ```

pub mod config;
pub mod diagnostics;
pub mod github;
pub mod identifier;
pub mod progress;
pub mod provider;
pub mod storage;
pub mod wizard;

// Re-exports
pub use config::{DepotConfig, GithubReleasesOptions};
pub use diagnostics::{CapturedSink, DiagnosticSink, TracingSink};
pub use github::GithubReleasesProvider;
pub use identifier::{Identifier, TemplateType};
pub use progress::{ProgressObserver, SilentObserver, TerminalObserver};
pub use provider::{provider_for, DepotProvider, DownloadOutcome, Listing};
pub use storage::TemplateStore;
