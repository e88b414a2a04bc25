//! # Validator Configuration
//!
//! Settings that shape how a request path is interpreted before it reaches the
//! resolver.
//!
//! ## Sources
//!
//! - [`ValidatorConfig::default`]: no prefix, no version, template binding
//! - [`ValidatorConfig::from_env`]:
//!   - `OARV_PATH_PREFIX` (e.g. `/api`)
//!   - `OARV_API_VERSION` (e.g. `v1`)
//!   - `OARV_PATH_BINDING` (`template` or `third_segment`)
//! - [`ValidatorConfig::from_file`]: TOML (`.toml`) or YAML (anything else)
//!
//! ```toml
//! path_prefix = "/api"
//! version = "v1"
//! path_binding = "third_segment"
//! ```
//!
//! ## Path binding
//!
//! A declared path parameter needs a concrete value to type-check. Two modes:
//!
//! - [`PathBinding::Template`] binds each `{name}` in the matched template to the
//!   request segment at the same position, so `/users/{id}/orders/{orderId}`
//!   checks both parameters against the right segments.
//! - [`PathBinding::ThirdSegment`] uses the third segment of the request path
//!   (`/users/<here>/...`) for every path parameter. Only correct for templates
//!   with a single parameter right after the resource; kept for compatibility
//!   with validators that behave this way.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// How declared path parameters get their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathBinding {
    #[default]
    Template,
    ThirdSegment,
}

impl PathBinding {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "template" => Some(PathBinding::Template),
            "third_segment" | "positional" => Some(PathBinding::ThirdSegment),
            _ => None,
        }
    }
}

/// Request-path interpretation settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Leading path shared by every route, e.g. `/api`
    pub path_prefix: String,
    /// API version segment following the prefix, e.g. `v1`
    pub version: String,
    pub path_binding: PathBinding,
}

impl ValidatorConfig {
    pub fn new(path_prefix: impl Into<String>, version: impl Into<String>) -> Self {
        ValidatorConfig {
            path_prefix: path_prefix.into(),
            version: version.into(),
            path_binding: PathBinding::default(),
        }
    }

    #[must_use]
    pub fn with_path_binding(mut self, path_binding: PathBinding) -> Self {
        self.path_binding = path_binding;
        self
    }

    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let path_binding = match env::var("OARV_PATH_BINDING") {
            Ok(val) => PathBinding::parse(&val).unwrap_or_else(|| {
                tracing::warn!(value = %val, "Unknown OARV_PATH_BINDING, using template");
                PathBinding::Template
            }),
            Err(_) => PathBinding::Template,
        };
        ValidatorConfig {
            path_prefix: env::var("OARV_PATH_PREFIX").unwrap_or_default(),
            version: env::var("OARV_API_VERSION").unwrap_or_default(),
            path_binding,
        }
    }

    /// Load configuration from a TOML or YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read validator config: {}", path.display()))?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let config: Self = if is_toml {
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse validator config: {}", path.display()))?
        } else {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse validator config: {}", path.display()))?
        };
        Ok(config)
    }

    /// The `"/{prefix}/{version}"` stripped from request paths.
    ///
    /// Surrounding slashes are normalized and empty parts skipped, so `api`
    /// and `/api/` give the same base, and an empty prefix and version give `""`.
    #[must_use]
    pub fn base_path(&self) -> String {
        let prefix = self.path_prefix.trim_matches('/');
        let version = self.version.trim_matches('/');
        match (prefix.is_empty(), version.is_empty()) {
            (true, true) => String::new(),
            (false, true) => format!("/{prefix}"),
            (true, false) => format!("/{version}"),
            (false, false) => format!("/{prefix}/{version}"),
        }
    }

    /// Remove the base path from the front of `path`.
    ///
    /// Stripping only happens at a segment boundary: with base `/api/v1`,
    /// `/api/v1/users` becomes `/users` and `/api/v1` becomes `/`, while
    /// `/api/v10/users` is left as is. No URL decoding is done.
    #[must_use]
    pub fn strip_base<'p>(&self, path: &'p str) -> &'p str {
        let base = self.base_path();
        if base.is_empty() {
            return path;
        }
        match path.strip_prefix(base.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_base_path() {
        assert_eq!(ValidatorConfig::new("/api", "v1").base_path(), "/api/v1");
        assert_eq!(ValidatorConfig::new("/api/", "/v1/").base_path(), "/api/v1");
        assert_eq!(ValidatorConfig::new("/api", "").base_path(), "/api");
        assert_eq!(ValidatorConfig::new("", "v2").base_path(), "/v2");
        assert_eq!(ValidatorConfig::default().base_path(), "");
        assert_eq!(ValidatorConfig::new("api", "v1").base_path(), "/api/v1");
        assert_eq!(ValidatorConfig::new("api", "").base_path(), "/api");
        assert_eq!(ValidatorConfig::new("/", "v1").base_path(), "/v1");
    }

    #[test]
    fn test_strip_base() {
        let config = ValidatorConfig::new("/api", "v1");
        assert_eq!(config.strip_base("/api/v1/users/42"), "/users/42");
        assert_eq!(config.strip_base("/api/v1"), "/");
        assert_eq!(config.strip_base("/api/v1/"), "/");
        assert_eq!(config.strip_base("/api/v10/users"), "/api/v10/users");
        assert_eq!(config.strip_base("/other/users"), "/other/users");
        assert_eq!(ValidatorConfig::default().strip_base("/users"), "/users");

        let bare = ValidatorConfig::new("api", "v1");
        assert_eq!(bare.strip_base("/api/v1/users/42"), "/users/42");
    }

    #[test]
    fn test_path_binding_parse() {
        assert_eq!(PathBinding::parse("template"), Some(PathBinding::Template));
        assert_eq!(PathBinding::parse("third-segment"), Some(PathBinding::ThirdSegment));
        assert_eq!(PathBinding::parse("THIRD_SEGMENT"), Some(PathBinding::ThirdSegment));
        assert_eq!(PathBinding::parse("nope"), None);
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "path_prefix = \"/api\"\nversion = \"v1\"\npath_binding = \"third_segment\"").unwrap();
        let config = ValidatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_path(), "/api/v1");
        assert_eq!(config.path_binding, PathBinding::ThirdSegment);
    }

    #[test]
    fn test_from_yaml_file_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "path_prefix: /api").unwrap();
        let config = ValidatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.path_prefix, "/api");
        assert_eq!(config.version, "");
        assert_eq!(config.path_binding, PathBinding::Template);
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "path_prefix = [").unwrap();
        let err = ValidatorConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse validator config"));
    }
}
