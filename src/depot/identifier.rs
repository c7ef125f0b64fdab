//! Template identifiers and types.
//!
//! An [`Identifier`] names one template instance by `(name, version)` and is
//! used as a set member when listings are deduplicated across releases.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MasonError, Result};

/// Release asset suffix that marks an asset as a template archive.
pub const TEMPLATE_SUFFIX: &str = "-template.zip";

/// Asset name of the singular kernel template (compared case-insensitively).
pub const KERNEL_ASSET: &str = "kernel-template.zip";

/// The kind of template a depot can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    /// The singular kernel template of a release.
    Kernel,
    /// Any other template published alongside a release.
    Library,
}

impl TemplateType {
    /// Both template types, in listing order.
    pub const ALL: [TemplateType; 2] = [TemplateType::Kernel, TemplateType::Library];

    /// Classify a release asset filename.
    ///
    /// Returns `None` for assets that are not template archives. Matching is
    /// case-insensitive; exactly `kernel-template.zip` is the kernel, every
    /// other `*-template.zip` is a library.
    pub fn for_asset_name(asset_name: &str) -> Option<TemplateType> {
        if asset_name.eq_ignore_ascii_case(KERNEL_ASSET) {
            Some(TemplateType::Kernel)
        } else if has_template_suffix(asset_name) {
            Some(TemplateType::Library)
        } else {
            None
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateType::Kernel => write!(f, "kernel"),
            TemplateType::Library => write!(f, "library"),
        }
    }
}

/// Names one template instance by `(name, version)`.
///
/// Immutable once constructed; equality, ordering, and hashing cover both
/// fields so identifiers behave as set members.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identifier {
    name: String,
    version: String,
}

impl Identifier {
    /// Create an identifier. Empty names and versions are rejected.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let version = version.into();
        if name.is_empty() {
            return Err(MasonError::invalid_identifier(
                "template name must not be empty",
            ));
        }
        if version.is_empty() {
            return Err(MasonError::invalid_identifier(
                "template version must not be empty",
            ));
        }
        Ok(Self { name, version })
    }

    /// The template's name (e.g. `kernel` or a library name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The template's version, taken from the release tag.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The release asset filename this identifier maps to.
    pub fn asset_name(&self) -> String {
        format!("{}{}", self.name, TEMPLATE_SUFFIX)
    }

    /// Derive the library name for a template asset filename.
    ///
    /// Strips the `-template.zip` suffix from the original-case filename.
    /// Returns `None` when the filename is not a template archive.
    pub fn library_name(asset_name: &str) -> Option<&str> {
        if has_template_suffix(asset_name) {
            Some(&asset_name[..asset_name.len() - TEMPLATE_SUFFIX.len()])
        } else {
            None
        }
    }
}

/// Case-insensitive check for the `-template.zip` suffix.
///
/// Compares raw bytes so library names containing multibyte characters
/// cannot shift the suffix boundary.
fn has_template_suffix(asset_name: &str) -> bool {
    let bytes = asset_name.as_bytes();
    bytes.len() >= TEMPLATE_SUFFIX.len()
        && bytes[bytes.len() - TEMPLATE_SUFFIX.len()..].eq_ignore_ascii_case(TEMPLATE_SUFFIX.as_bytes())
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn identifier_holds_name_and_version() {
        let id = Identifier::new("mylib", "v1.0").unwrap();
        assert_eq!(id.name(), "mylib");
        assert_eq!(id.version(), "v1.0");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(Identifier::new("", "v1.0").is_err());
    }

    #[test]
    fn empty_version_is_rejected() {
        assert!(Identifier::new("kernel", "").is_err());
    }

    #[test]
    fn equal_identifiers_deduplicate_in_sets() {
        let mut set = BTreeSet::new();
        set.insert(Identifier::new("kernel", "v1.0").unwrap());
        set.insert(Identifier::new("kernel", "v1.0").unwrap());
        set.insert(Identifier::new("kernel", "v1.1").unwrap());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn identifiers_differ_by_either_field() {
        let a = Identifier::new("kernel", "v1.0").unwrap();
        let b = Identifier::new("kernel", "v2.0").unwrap();
        let c = Identifier::new("mylib", "v1.0").unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn asset_name_appends_suffix() {
        let id = Identifier::new("mylib", "v1.0").unwrap();
        assert_eq!(id.asset_name(), "mylib-template.zip");
    }

    #[test]
    fn kernel_asset_is_classified_as_kernel() {
        assert_eq!(
            TemplateType::for_asset_name("kernel-template.zip"),
            Some(TemplateType::Kernel)
        );
        assert_eq!(
            TemplateType::for_asset_name("Kernel-Template.ZIP"),
            Some(TemplateType::Kernel)
        );
    }

    #[test]
    fn other_template_assets_are_libraries() {
        assert_eq!(
            TemplateType::for_asset_name("mylib-template.zip"),
            Some(TemplateType::Library)
        );
    }

    #[test]
    fn non_template_assets_are_ignored() {
        assert_eq!(TemplateType::for_asset_name("firmware.bin"), None);
        assert_eq!(TemplateType::for_asset_name("template.zip"), None);
    }

    #[test]
    fn library_name_strips_suffix_preserving_case() {
        assert_eq!(
            Identifier::library_name("MyLib-Template.zip"),
            Some("MyLib")
        );
        assert_eq!(Identifier::library_name("notes.txt"), None);
    }

    #[test]
    fn display_formats_name_and_version() {
        let id = Identifier::new("kernel", "v1.0").unwrap();
        assert_eq!(id.to_string(), "kernel (v1.0)");
    }
}
