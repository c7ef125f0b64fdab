//! Mason - Project management CLI with versioned template depots.
//!
//! Mason acquires distributable project templates (a kernel template and any
//! number of library templates) from configured remote depots and unpacks
//! them into a local template store keyed by name and version.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Depot configuration file loading and saving
//! - [`depot`] - Depot providers, listing, and download machinery
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use mason::depot::{Identifier, TemplateType};
//!
//! let id = Identifier::new("kernel", "v2.10.1").unwrap();
//! assert_eq!(id.name(), "kernel");
//! assert_eq!(TemplateType::for_asset_name("kernel-template.zip"), Some(TemplateType::Kernel));
//! ```

pub mod cli;
pub mod config;
pub mod depot;
pub mod error;

pub use error::{MasonError, Result};
