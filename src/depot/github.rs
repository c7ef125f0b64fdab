//! GitHub Releases depot provider.
//!
//! Retrieves templates published as release assets on a GitHub repository.
//! Listing and tag lookup go through the releases API; asset bodies are
//! streamed to a scoped temporary file and extracted into the template
//! store.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{MasonError, Result};

use super::config::{DepotConfig, GithubReleasesOptions};
use super::diagnostics::DiagnosticSink;
use super::identifier::{Identifier, TemplateType};
use super::progress::ProgressObserver;
use super::provider::{DepotProvider, DownloadOutcome, Listing};
use super::storage::TemplateStore;

/// Accept value for JSON API responses.
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// Accept value for raw asset bodies.
const ACCEPT_BINARY: &str = "application/octet-stream";

/// Fixed client identifier sent on every request.
const USER_AGENT: &str = "mason-cli";

/// Copy granularity for streamed asset bodies.
const CHUNK_SIZE: usize = 8192;

/// `owner/repo`: owner ≤39 chars of alnum with single interior hyphens,
/// repo 1–93 chars of alnum, `.`, `_`, `-`.
fn location_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9](?:-?[A-Za-z0-9]){0,38}/[0-9A-Za-z_.\-]{1,93}$")
            .expect("location pattern is valid")
    })
}

/// One release as returned by the releases API.
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    prerelease: bool,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

/// One downloadable asset attached to a release.
#[derive(Debug, Deserialize)]
struct ReleaseAsset {
    name: String,
    url: String,
    #[serde(default)]
    size: u64,
}

/// Depot provider backed by GitHub release assets.
pub struct GithubReleasesProvider {
    config: DepotConfig,
    options: GithubReleasesOptions,
    store: TemplateStore,
    sink: Arc<dyn DiagnosticSink>,
    client: Client,
    api_base: String,
}

impl GithubReleasesProvider {
    /// Registrar discriminator selecting this provider.
    pub const REGISTRAR: &'static str = "github-releases";

    /// Build a provider from a depot config.
    ///
    /// Parses the registrar options into [`GithubReleasesOptions`]; malformed
    /// options fail here, before any network call.
    pub fn new(
        config: DepotConfig,
        store: TemplateStore,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self> {
        Self::with_timeout(config, store, sink, Duration::from_secs(30))
    }

    /// Build a provider with an explicit request timeout.
    pub fn with_timeout(
        config: DepotConfig,
        store: TemplateStore,
        sink: Arc<dyn DiagnosticSink>,
        timeout: Duration,
    ) -> Result<Self> {
        let options = GithubReleasesOptions::from_config(&config)?;
        Ok(Self {
            config,
            options,
            store,
            sink,
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_base: "https://api.github.com".to_string(),
        })
    }

    /// Point API requests at a different base URL (mock servers in tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// The typed registrar options this provider was built with.
    pub fn options(&self) -> &GithubReleasesOptions {
        &self.options
    }

    /// Start a request carrying the fixed headers and optional token.
    fn request(&self, url: &str, accept: &str) -> reqwest::blocking::RequestBuilder {
        let mut request = self.client.get(url).header("Accept", accept);
        if let Some(token) = &self.options.oauth_token {
            request = request.header("Authorization", format!("token {}", token));
        }
        request
    }

    /// Whether a release survives the prerelease/draft filters.
    fn release_visible(&self, release: &Release) -> bool {
        (!release.prerelease || self.options.include_prerelease)
            && (!release.draft || self.options.include_draft)
    }

    /// Stream an asset body into `file`, reporting byte progress.
    ///
    /// Returns `Ok(false)` when the stream breaks mid-transfer.
    fn stream_asset(
        &self,
        asset: &ReleaseAsset,
        version: &str,
        file: &mut fs::File,
        observer: &mut dyn ProgressObserver,
    ) -> Result<bool> {
        let response = match self.request(&asset.url, ACCEPT_BINARY).send() {
            Ok(response) => response,
            Err(e) => {
                self.sink.notice(&format!(
                    "Unable to download {} from {}: {}",
                    asset.name, self.config.location, e
                ));
                return Ok(false);
            }
        };
        // 200 and 302 both open the stream; reqwest follows the redirect.
        if !response.status().is_success() {
            self.sink.notice(&format!(
                "Unable to download {} from {} (status {})",
                asset.name,
                self.config.location,
                response.status()
            ));
            return Ok(false);
        }

        observer.start_download(
            &format!("Downloading {} (v: {})", asset.name, version),
            asset.size,
        );
        let mut response = response;
        let mut buffer = [0u8; CHUNK_SIZE];
        loop {
            let read = match response.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    observer.finish();
                    self.sink.notice(&format!(
                        "Download of {} from {} failed mid-transfer: {}",
                        asset.name, self.config.location, e
                    ));
                    return Ok(false);
                }
            };
            file.write_all(&buffer[..read])?;
            observer.download_advanced(read as u64);
        }
        observer.finish();
        file.flush()?;
        Ok(true)
    }

    /// Extract every archive entry under `target`, reporting entry progress.
    ///
    /// Returns `Ok(false)` (with `target` removed) when the downloaded file
    /// is not a readable zip archive. Entries that would escape `target` are
    /// refused.
    fn extract_archive(
        &self,
        archive_path: &Path,
        target: &Path,
        label: &str,
        observer: &mut dyn ProgressObserver,
    ) -> Result<bool> {
        let file = fs::File::open(archive_path)?;
        let mut archive = match zip::ZipArchive::new(file) {
            Ok(archive) => archive,
            Err(e) => {
                self.sink.notice(&format!(
                    "{} from {} is not a valid template archive: {}",
                    label, self.config.location, e
                ));
                return Ok(false);
            }
        };

        fs::create_dir_all(target)?;
        observer.start_extraction(&format!("Extracting {}", label), archive.len() as u64);
        for index in 0..archive.len() {
            let mut entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(e) => {
                    observer.finish();
                    self.sink
                        .notice(&format!("Failed to read archive entry: {}", e));
                    fs::remove_dir_all(target)?;
                    return Ok(false);
                }
            };
            let Some(relative) = entry.enclosed_name() else {
                self.sink.debug(&format!(
                    "Refusing archive entry outside target: {}",
                    entry.name()
                ));
                observer.entry_extracted();
                continue;
            };
            let destination = target.join(relative);
            if entry.is_dir() {
                fs::create_dir_all(&destination)?;
            } else {
                if let Some(parent) = destination.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut output = fs::File::create(&destination)?;
                std::io::copy(&mut entry, &mut output)?;
            }
            observer.entry_extracted();
        }
        observer.finish();
        Ok(true)
    }
}

impl DepotProvider for GithubReleasesProvider {
    fn config(&self) -> &DepotConfig {
        &self.config
    }

    fn verify_configuration(&self) -> Result<()> {
        if location_pattern().is_match(&self.config.location) {
            Ok(())
        } else {
            Err(MasonError::invalid_identifier(format!(
                "{} is an invalid GitHub repository",
                self.config.location
            )))
        }
    }

    fn list_all(&self, types: &[TemplateType]) -> Result<Listing> {
        self.verify_configuration()?;
        self.sink.debug(&format!(
            "Fetching listing for {} at {} using {}",
            self.config.name,
            self.config.location,
            Self::REGISTRAR
        ));

        let url = format!("{}/repos/{}/releases", self.api_base, self.config.location);
        let response = match self.request(&url, ACCEPT_JSON).send() {
            Ok(response) => response,
            Err(e) => {
                self.sink.notice(&format!(
                    "Unable to get listing for {} at {}: {}",
                    self.config.name, self.config.location, e
                ));
                return Ok(Listing::new());
            }
        };
        if response.status() != reqwest::StatusCode::OK {
            self.sink.notice(&format!(
                "Unable to get listing for {} at {} (status {})",
                self.config.name,
                self.config.location,
                response.status()
            ));
            self.sink
                .debug(&response.text().unwrap_or_else(|e| e.to_string()));
            return Ok(Listing::new());
        }
        let releases: Vec<Release> = match response.json() {
            Ok(releases) => releases,
            Err(e) => {
                self.sink.notice(&format!(
                    "Unable to get listing for {} at {}: {}",
                    self.config.name, self.config.location, e
                ));
                return Ok(Listing::new());
            }
        };

        let mut listing = Listing::new();
        for release in releases.iter().filter(|r| self.release_visible(r)) {
            for asset in &release.assets {
                match TemplateType::for_asset_name(&asset.name) {
                    Some(TemplateType::Kernel) if types.contains(&TemplateType::Kernel) => {
                        listing
                            .entry(TemplateType::Kernel)
                            .or_default()
                            .insert(Identifier::new("kernel", &release.tag_name)?);
                    }
                    Some(TemplateType::Library) if types.contains(&TemplateType::Library) => {
                        // for_asset_name guarantees the suffix is present
                        if let Some(name) = Identifier::library_name(&asset.name) {
                            listing
                                .entry(TemplateType::Library)
                                .or_default()
                                .insert(Identifier::new(name, &release.tag_name)?);
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(listing)
    }

    fn download(
        &self,
        identifier: &Identifier,
        observer: &mut dyn ProgressObserver,
    ) -> Result<DownloadOutcome> {
        self.verify_configuration()?;
        let target = self.store.template_dir(&self.config.name, identifier);

        // A download always starts from a clean slate.
        if target.is_dir() {
            fs::remove_dir_all(&target)?;
        } else if target.is_file() {
            fs::remove_file(&target)?;
        }

        self.sink.notice(&format!(
            "Fetching release on {} with tag {}",
            self.config.location,
            identifier.version()
        ));
        let url = format!(
            "{}/repos/{}/releases/tags/{}",
            self.api_base,
            self.config.location,
            identifier.version()
        );
        let response = match self.request(&url, ACCEPT_JSON).send() {
            Ok(response) => response,
            Err(e) => {
                self.sink.notice(&format!(
                    "Unable to find {} on {}: {}",
                    identifier.version(),
                    self.config.name,
                    e
                ));
                return Ok(DownloadOutcome::Unavailable { status: None });
            }
        };
        if response.status() != reqwest::StatusCode::OK {
            let status = response.status();
            self.sink.notice(&format!(
                "Unable to find {} on {} (status {})",
                identifier.version(),
                self.config.name,
                status
            ));
            self.sink
                .debug(&response.text().unwrap_or_else(|e| e.to_string()));
            return Ok(DownloadOutcome::Unavailable {
                status: Some(status.as_u16()),
            });
        }
        let release: Release = match response.json() {
            Ok(release) => release,
            Err(e) => {
                self.sink.notice(&format!(
                    "Unable to read release {} on {}: {}",
                    identifier.version(),
                    self.config.name,
                    e
                ));
                return Ok(DownloadOutcome::Unavailable { status: None });
            }
        };

        let wanted = identifier.asset_name();
        let Some(asset) = release.assets.iter().find(|a| a.name == wanted) else {
            self.sink.notice(&format!(
                "No asset named {} on release {} of {}",
                wanted,
                identifier.version(),
                self.config.name
            ));
            return Ok(DownloadOutcome::AssetMissing);
        };
        self.sink.debug(&format!("Found {}", asset.url));

        // Scoped temporary file: removed on every exit path when dropped.
        let mut temp = tempfile::NamedTempFile::new()?;
        if !self.stream_asset(asset, identifier.version(), temp.as_file_mut(), observer)? {
            return Ok(DownloadOutcome::Unavailable { status: None });
        }
        if !self.extract_archive(temp.path(), &target, &asset.name, observer)? {
            return Ok(DownloadOutcome::Unavailable { status: None });
        }

        self.sink
            .notice(&format!("Template downloaded to {}", target.display()));
        Ok(DownloadOutcome::Completed { path: target })
    }
}
