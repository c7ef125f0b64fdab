//! Command-line interface.
//!
//! Defines the argument surface with clap's derive macros and dispatches
//! subcommands onto the depot layer. Orchestration here never branches on
//! registrar kind; everything goes through the [`DepotProvider`] contract.
//!
//! [`DepotProvider`]: crate::depot::DepotProvider

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use console::{style, Term};

use crate::config::DepotFile;
use crate::depot::{
    provider_for, wizard, DepotConfig, DiagnosticSink, DownloadOutcome, Identifier,
    ProgressObserver, SilentObserver, TemplateStore, TemplateType, TerminalObserver,
};
use crate::error::Result;

/// Mason - Project management with versioned template depots.
#[derive(Debug, Parser)]
#[command(name = "mason")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the depot config file (overrides ~/.mason/depots.yml)
    #[arg(long, global = true)]
    pub depots: Option<PathBuf>,

    /// Path to the template store root (overrides the platform data dir)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage template depots
    #[command(subcommand)]
    Depot(DepotCommands),
}

/// Depot management subcommands.
#[derive(Debug, Subcommand)]
pub enum DepotCommands {
    /// Configure a new depot (interactive)
    Add(AddArgs),

    /// Remove a configured depot
    Remove(RemoveArgs),

    /// List templates available across configured depots
    List(ListArgs),

    /// Download one template version into the local store
    Download(DownloadArgs),
}

/// Arguments for `depot add`.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Depot name
    pub name: String,

    /// Depot location (for github-releases: owner/repo)
    pub location: String,

    /// Registrar kind
    #[arg(long, default_value = "github-releases")]
    pub registrar: String,
}

/// Arguments for `depot remove`.
#[derive(Debug, Clone, Args)]
pub struct RemoveArgs {
    /// Depot name
    pub name: String,
}

/// Arguments for `depot list`.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Restrict to one depot
    #[arg(long)]
    pub depot: Option<String>,

    /// List kernel templates only
    #[arg(long, conflicts_with = "library")]
    pub kernel: bool,

    /// List library templates only
    #[arg(long, conflicts_with = "kernel")]
    pub library: bool,
}

/// Arguments for `depot download`.
#[derive(Debug, Clone, Args)]
#[command(disable_version_flag = true)]
pub struct DownloadArgs {
    /// Depot to download from
    pub depot: String,

    /// Template name (e.g. kernel)
    pub name: String,

    /// Template version (release tag)
    pub version: String,
}

/// Diagnostic sink for the terminal: notices to stderr, detail to tracing.
#[derive(Debug, Default)]
struct CliSink;

impl DiagnosticSink for CliSink {
    fn notice(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}

/// Dispatches parsed arguments onto the depot layer.
pub struct CommandDispatcher {
    depot_file: DepotFile,
    store: TemplateStore,
    quiet: bool,
}

impl CommandDispatcher {
    /// Build a dispatcher from the global CLI flags.
    pub fn new(cli: &Cli) -> Self {
        let depot_file = match &cli.depots {
            Some(path) => DepotFile::at(path),
            None => DepotFile::new(),
        };
        let store = match &cli.store {
            Some(root) => TemplateStore::with_root(root),
            None => TemplateStore::new(),
        };
        Self {
            depot_file,
            store,
            quiet: cli.quiet,
        }
    }

    /// Run the selected command, returning the process exit code.
    pub fn dispatch(&self, command: &Commands) -> Result<i32> {
        match command {
            Commands::Depot(DepotCommands::Add(args)) => self.add(args),
            Commands::Depot(DepotCommands::Remove(args)) => self.remove(args),
            Commands::Depot(DepotCommands::List(args)) => self.list(args),
            Commands::Depot(DepotCommands::Download(args)) => self.download(args),
        }
    }

    fn add(&self, args: &AddArgs) -> Result<i32> {
        let term = Term::stdout();
        let options = wizard::registrar_options_for(&args.registrar, &term)?;
        let config = DepotConfig::new(&args.name, &args.location, &args.registrar)
            .with_options(options);

        // Reject a malformed location before persisting anything.
        let provider = provider_for(config.clone(), self.store.clone(), Arc::new(CliSink))?;
        provider.verify_configuration()?;

        self.depot_file.upsert(config)?;
        if !self.quiet {
            println!(
                "{} Added depot {} ({})",
                style("✓").green(),
                args.name,
                args.location
            );
        }
        Ok(0)
    }

    fn remove(&self, args: &RemoveArgs) -> Result<i32> {
        if self.depot_file.remove(&args.name)? {
            if !self.quiet {
                println!("{} Removed depot {}", style("✓").green(), args.name);
            }
            Ok(0)
        } else {
            eprintln!("No depot named {}", args.name);
            Ok(1)
        }
    }

    fn list(&self, args: &ListArgs) -> Result<i32> {
        let types: &[TemplateType] = if args.kernel {
            &[TemplateType::Kernel]
        } else if args.library {
            &[TemplateType::Library]
        } else {
            &TemplateType::ALL
        };

        let depots = match &args.depot {
            Some(name) => vec![self.depot_file.get(name)?],
            None => self.depot_file.load()?.into_values().collect(),
        };
        if depots.is_empty() {
            eprintln!("No depots configured. Add one with `mason depot add`.");
            return Ok(1);
        }

        for config in depots {
            let depot_name = config.name.clone();
            let provider = provider_for(config, self.store.clone(), Arc::new(CliSink))?;
            let listing = provider.list_all(types)?;
            for (template_type, identifiers) in &listing {
                for identifier in identifiers {
                    println!(
                        "{:<12} {:<24} {} ({})",
                        depot_name,
                        identifier.name(),
                        identifier.version(),
                        template_type
                    );
                }
            }
        }
        Ok(0)
    }

    fn download(&self, args: &DownloadArgs) -> Result<i32> {
        let config = self.depot_file.get(&args.depot)?;
        let provider = provider_for(config, self.store.clone(), Arc::new(CliSink))?;
        let identifier = Identifier::new(&args.name, &args.version)?;

        let mut terminal = TerminalObserver::new();
        let mut silent = SilentObserver;
        let observer: &mut dyn ProgressObserver = if self.quiet {
            &mut silent
        } else {
            &mut terminal
        };

        match provider.download(&identifier, observer)? {
            DownloadOutcome::Completed { path } => {
                if !self.quiet {
                    println!(
                        "{} Downloaded {} to {}",
                        style("✓").green(),
                        identifier,
                        path.display()
                    );
                }
                Ok(0)
            }
            DownloadOutcome::AssetMissing | DownloadOutcome::Unavailable { .. } => Ok(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_download_command() {
        let cli = Cli::parse_from([
            "mason", "depot", "download", "mainline", "kernel", "v1.0",
        ]);
        match cli.command {
            Commands::Depot(DepotCommands::Download(args)) => {
                assert_eq!(args.depot, "mainline");
                assert_eq!(args.name, "kernel");
                assert_eq!(args.version, "v1.0");
            }
            _ => panic!("Expected download command"),
        }
    }

    #[test]
    fn parses_list_type_filters() {
        let cli = Cli::parse_from(["mason", "depot", "list", "--kernel"]);
        match cli.command {
            Commands::Depot(DepotCommands::List(args)) => {
                assert!(args.kernel);
                assert!(!args.library);
            }
            _ => panic!("Expected list command"),
        }
    }

    #[test]
    fn kernel_and_library_filters_conflict() {
        let result = Cli::try_parse_from(["mason", "depot", "list", "--kernel", "--library"]);
        assert!(result.is_err());
    }

    #[test]
    fn add_defaults_to_github_releases_registrar() {
        let cli = Cli::parse_from(["mason", "depot", "add", "mainline", "purduesigbots/pros"]);
        match cli.command {
            Commands::Depot(DepotCommands::Add(args)) => {
                assert_eq!(args.registrar, "github-releases");
            }
            _ => panic!("Expected add command"),
        }
    }

    #[test]
    fn global_flags_apply_to_subcommands() {
        let cli = Cli::parse_from([
            "mason",
            "depot",
            "list",
            "--depots",
            "/tmp/depots.yml",
            "--store",
            "/tmp/store",
            "--quiet",
        ]);
        assert_eq!(cli.depots, Some(PathBuf::from("/tmp/depots.yml")));
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/store")));
        assert!(cli.quiet);
    }
}
