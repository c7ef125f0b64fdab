//! Interactive registrar option collection.
//!
//! Walks the operator through the options a registrar understands and
//! produces the `registrar_options` mapping stored on a [`DepotConfig`].
//! Pure input collection; never contacts the network.
//!
//! [`DepotConfig`]: super::DepotConfig

use console::Term;
use dialoguer::{Confirm, Input};
use serde_json::{Map, Value};

use crate::error::{MasonError, Result};

use super::config::GithubReleasesOptions;
use super::github::GithubReleasesProvider;

/// Convert dialoguer errors to MasonError.
fn map_dialoguer_err(e: dialoguer::Error) -> MasonError {
    MasonError::Io(e.into())
}

/// Collect registrar options for the named registrar.
///
/// Unknown registrars fail before any prompt is shown.
pub fn registrar_options_for(registrar: &str, term: &Term) -> Result<Map<String, Value>> {
    match registrar {
        GithubReleasesProvider::REGISTRAR => {
            Ok(github_releases_options(term)?.to_map())
        }
        other => Err(MasonError::UnknownRegistrar {
            registrar: other.to_string(),
        }),
    }
}

/// Collect options for the `github-releases` registrar.
pub fn github_releases_options(term: &Term) -> Result<GithubReleasesOptions> {
    let include_prerelease = Confirm::new()
        .with_prompt("Include pre-releases?")
        .default(false)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    let include_draft = Confirm::new()
        .with_prompt("Include drafts (requires authentication)?")
        .default(false)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    let oauth_token = if Confirm::new()
        .with_prompt("Do you want to set up OAuth authentication with GitHub?")
        .default(false)
        .interact_on(term)
        .map_err(map_dialoguer_err)?
    {
        let token: String = Input::new()
            .with_prompt("OAuth2 Token")
            .interact_on(term)
            .map_err(map_dialoguer_err)?;
        Some(token)
    } else {
        None
    };

    Ok(GithubReleasesOptions {
        include_prerelease,
        include_draft,
        oauth_token,
    })
}
