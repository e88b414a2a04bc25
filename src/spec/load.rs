use super::document::SpecDocument;
use super::lint::{format_issues, lint_spec};
use anyhow::Context;
use std::path::Path;

/// Text format of a specification file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Yaml,
    Json,
}

impl SpecFormat {
    /// Pick the format from a file extension; anything but `.json` is YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SpecFormat::Json,
            _ => SpecFormat::Yaml,
        }
    }
}

/// Parse specification text into a [`SpecDocument`] without linting it.
///
/// # Errors
///
/// Returns an error if the text does not parse or the tree has no `paths` mapping.
pub fn parse_spec_str(content: &str, format: SpecFormat) -> anyhow::Result<SpecDocument> {
    let value: serde_json::Value = match format {
        SpecFormat::Yaml => serde_yaml::from_str(content).context("invalid YAML specification")?,
        SpecFormat::Json => serde_json::from_str(content).context("invalid JSON specification")?,
    };
    Ok(SpecDocument::from_value(value)?)
}

/// Read and parse a specification file without linting it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_spec(path: impl AsRef<Path>) -> anyhow::Result<SpecDocument> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read specification: {}", path.display()))?;
    parse_spec_str(&content, SpecFormat::from_path(path))
        .with_context(|| format!("Failed to parse specification: {}", path.display()))
}

/// Read, parse and lint a specification file.
///
/// Intended to run once at startup; the resulting document is immutable and can
/// be shared across threads (see [`super::SpecStore`]).
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if linting finds
/// issues (dangling `$ref`s, malformed operations). The error message lists every
/// issue found.
pub fn load_spec(path: impl AsRef<Path>) -> anyhow::Result<SpecDocument> {
    let path = path.as_ref();
    let spec = read_spec(path)?;

    let issues = lint_spec(&spec);
    if !issues.is_empty() {
        anyhow::bail!(
            "specification {} has {} issue(s):\n{}",
            path.display(),
            issues.len(),
            format_issues(&issues)
        );
    }

    tracing::info!(
        spec = %path.display(),
        paths_count = spec.paths().len(),
        definitions_count = spec.definitions().len(),
        "Specification loaded"
    );
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SpecFormat::from_path(Path::new("a.json")), SpecFormat::Json);
        assert_eq!(SpecFormat::from_path(Path::new("a.JSON")), SpecFormat::Json);
        assert_eq!(SpecFormat::from_path(Path::new("a.yaml")), SpecFormat::Yaml);
        assert_eq!(SpecFormat::from_path(Path::new("swagger")), SpecFormat::Yaml);
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = "swagger: '2.0'\npaths:\n  /pets:\n    get: {}\n";
        let doc = parse_spec_str(yaml, SpecFormat::Yaml).unwrap();
        assert_eq!(doc.path_templates().collect::<Vec<_>>(), vec!["/pets"]);

        let json = r#"{"swagger": "2.0", "paths": {"/pets": {"get": {}}}}"#;
        let doc = parse_spec_str(json, SpecFormat::Json).unwrap();
        assert!(doc.path_item("/pets").is_ok());
    }

    #[test]
    fn test_parse_rejects_missing_paths() {
        let err = parse_spec_str("swagger: '2.0'\n", SpecFormat::Yaml).unwrap_err();
        assert!(err.to_string().contains("paths"));
    }
}
