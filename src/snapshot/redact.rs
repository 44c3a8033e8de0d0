// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hiding sensitive environment variable values.
//!
//! Patterns are `wax` globs matched against the upper-cased variable name,
//! so `*token*` and `*TOKEN*` are equivalent.

use wax::{Glob, Program as _};

use crate::error::ConfigError;

/// Replacement for hidden values.
pub const HIDDEN: &str = "[hidden]";

/// Patterns hidden unless the configuration says otherwise.
pub const DEFAULT_PATTERNS: &[&str] = &["*TOKEN*", "*SECRET*", "*PASSWORD*", "*KEY*"];

/// Compiled set of sensitive-name patterns.
pub struct Redaction {
    patterns: Vec<String>,
    globs: Vec<Glob<'static>>,
}

impl Redaction {
    /// Compiles the given glob patterns.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first pattern that is not a
    /// valid glob.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns: Vec<String> = patterns
            .iter()
            .map(|p| p.as_ref().to_ascii_uppercase())
            .collect();

        let globs = patterns
            .iter()
            .map(|pattern| {
                Glob::new(pattern)
                    .map(Glob::into_owned)
                    .map_err(|e| ConfigError::InvalidValue {
                        section: "display".to_string(),
                        key: "redact".to_string(),
                        message: format!("invalid pattern '{pattern}': {e}"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns, globs })
    }

    /// A redaction that hides nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            patterns: Vec::new(),
            globs: Vec::new(),
        }
    }

    /// Returns true if values of `name` must be hidden.
    #[must_use]
    pub fn is_sensitive(&self, name: &str) -> bool {
        if self.globs.is_empty() {
            return false;
        }
        let upper = name.to_ascii_uppercase();
        self.globs.iter().any(|glob| glob.is_match(upper.as_str()))
    }

    /// The normalized (upper-cased) patterns.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for Redaction {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS).unwrap_or_else(|_| Self::none())
    }
}

impl std::fmt::Debug for Redaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redaction")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}
