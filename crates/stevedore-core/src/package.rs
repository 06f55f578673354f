//! Dotted package name parsing.
//!
//! A package name is a dotted, case-sensitive path such as
//! `tld.domain.Widget`. The final segment names the unit implementing the
//! package; the preceding segments form its directory path. A trailing `*`
//! segment (`tld.domain.*`) marks a superpackage: the whole subtree below
//! the base package is expanded and loaded as a group.
//!
//! The lowercase form of a name is used only for loaded-package registry
//! membership; filesystem lookups preserve the case as given.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{LoaderError, LoaderResult};

/// A validated dotted package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    raw: String,
    /// Base segments; a trailing `*` is recorded in `wildcard` instead.
    segments: Vec<String>,
    wildcard: bool,
}

impl PackageName {
    /// Parse and validate a dotted package name.
    ///
    /// # Examples
    ///
    /// ```
    /// use stevedore_core::PackageName;
    ///
    /// let name = PackageName::parse("tld.domain.Widget").unwrap();
    /// assert!(!name.is_wildcard());
    /// assert_eq!(name.unit_name(), "Widget");
    ///
    /// let name = PackageName::parse("tld.domain.*").unwrap();
    /// assert!(name.is_wildcard());
    /// assert_eq!(name.base(), "tld.domain");
    ///
    /// assert!(PackageName::parse("tld..Widget").is_err());
    /// ```
    pub fn parse(name: &str) -> LoaderResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid(name, "empty name"));
        }

        let raw_segments: Vec<&str> = name.split('.').collect();
        let last = raw_segments.len() - 1;
        let mut segments = Vec::with_capacity(raw_segments.len());
        let mut wildcard = false;

        for (index, segment) in raw_segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(invalid(name, "empty segment"));
            }
            if *segment == "*" {
                if index != last {
                    return Err(invalid(name, "wildcard must be the final segment"));
                }
                if index == 0 {
                    return Err(invalid(name, "wildcard requires a base package"));
                }
                wildcard = true;
                continue;
            }
            if segment.contains('*') {
                return Err(invalid(name, "`*` is only valid as a whole segment"));
            }
            if segment.contains('/') || segment.contains('\\') {
                return Err(invalid(name, "path separators are not allowed"));
            }
            segments.push((*segment).to_string());
        }

        Ok(Self {
            raw: name.to_string(),
            segments,
            wildcard,
        })
    }

    /// The name exactly as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lowercase form used for loaded-package registry membership.
    pub fn key(&self) -> String {
        self.raw.to_ascii_lowercase()
    }

    /// Whether this is a superpackage (`pkg.*`) name.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// The dotted base without a trailing `.*`; the whole name for plain
    /// names.
    pub fn base(&self) -> &str {
        if self.wildcard {
            &self.raw[..self.raw.len() - 2]
        } else {
            &self.raw
        }
    }

    /// Base segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment: the unit implementing the package.
    pub fn unit_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Directory holding the unit directory: every segment but the last.
    pub fn parent_dir(&self) -> PathBuf {
        self.segments[..self.segments.len() - 1].iter().collect()
    }

    /// Directory form of the full base: every segment.
    pub fn base_dir(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

fn invalid(name: &str, reason: &str) -> LoaderError {
    LoaderError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PackageName {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse_plain_name() {
        let name = PackageName::parse("tld.domain.Widget").unwrap();
        assert!(!name.is_wildcard());
        assert_eq!(name.as_str(), "tld.domain.Widget");
        assert_eq!(name.unit_name(), "Widget");
        assert_eq!(name.base(), "tld.domain.Widget");
        assert_eq!(name.parent_dir(), Path::new("tld/domain"));
        assert_eq!(name.base_dir(), Path::new("tld/domain/Widget"));
        assert_eq!(name.key(), "tld.domain.widget");
    }

    #[test]
    fn test_parse_single_segment() {
        let name = PackageName::parse("Widget").unwrap();
        assert_eq!(name.unit_name(), "Widget");
        assert_eq!(name.parent_dir(), Path::new(""));
        assert_eq!(name.base_dir(), Path::new("Widget"));
    }

    #[test]
    fn test_parse_wildcard() {
        let name = PackageName::parse("tld.domain.*").unwrap();
        assert!(name.is_wildcard());
        assert_eq!(name.base(), "tld.domain");
        assert_eq!(name.base_dir(), Path::new("tld/domain"));
        assert_eq!(name.segments(), ["tld", "domain"]);
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for bad in ["", " ", "tld..Widget", ".tld.Widget", "tld.Widget.", "*", "tld.*.Widget", "tld.Wid*get", "tld.dom/ain.Widget"] {
            assert!(
                matches!(PackageName::parse(bad), Err(LoaderError::InvalidName { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_key_is_lowercase_only() {
        let name = PackageName::parse("Tld.Domain.Widget").unwrap();
        assert_eq!(name.key(), "tld.domain.widget");
        // The filesystem form keeps the original case.
        assert_eq!(name.base_dir(), Path::new("Tld/Domain/Widget"));
    }

    #[test]
    fn test_from_str() {
        let name: PackageName = "tld.domain.*".parse().unwrap();
        assert!(name.is_wildcard());
        assert_eq!(name.to_string(), "tld.domain.*");
    }
}
