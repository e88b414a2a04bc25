//! Path resolver: request path → one documented path template → operation.

use crate::error::{Rejection, SpecFault, ValidationError};
use crate::spec::{SpecDocument, METHODS};
use http::Method;
use regex::Regex;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

/// Path parameters stored inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 4;

/// `{name}` → concrete segment bindings, in template order.
pub type ParamVec = SmallVec<[(String, String); MAX_INLINE_PARAMS]>;

/// Trim trailing slashes, keeping a lone `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Bind each `{name}` segment of `template` to the segment at the same position
/// in `path`. Positions missing from `path` stay unbound.
#[must_use]
pub fn bind_template(template: &str, path: &str) -> ParamVec {
    template
        .split('/')
        .zip(path.split('/'))
        .filter_map(|(tpl, seg)| {
            tpl.strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
                .map(|name| (name.to_string(), seg.to_string()))
        })
        .collect()
}

/// The loose template matcher built from one request path.
///
/// Only the first segment (the resource) and whether anything follows it are
/// taken into account:
///
/// * `/users` matches single-segment templates starting with `/users`
///   (`/users`, `/users_admin`, `/users.json`)
/// * `/users/42`, `/users/42/orders` match templates starting with `/users/`
/// * `/` matches only `/`
#[derive(Debug, Clone)]
pub struct MatchRule {
    regex: Regex,
    resource: String,
    nested: bool,
}

impl MatchRule {
    /// Build the rule for a normalized request path.
    ///
    /// # Errors
    ///
    /// Fails only if the pattern exceeds the regex size limit (absurdly long
    /// resource segment).
    pub fn for_path(path: &str) -> Result<Self, regex::Error> {
        let mut segments = path.split('/');
        segments.next();
        let resource = segments.next().unwrap_or_default();
        let nested = segments.next().is_some();

        let mut pattern = String::with_capacity(resource.len() + 8);
        pattern.push_str("^/");
        pattern.push_str(&regex::escape(resource));
        if nested {
            pattern.push_str("/.*");
        } else if !resource.is_empty() {
            pattern.push_str("[^/]*");
        }
        pattern.push('$');

        Ok(MatchRule {
            regex: Regex::new(&pattern)?,
            resource: resource.to_string(),
            nested,
        })
    }

    #[must_use]
    pub fn is_match(&self, template: &str) -> bool {
        self.regex.is_match(template)
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Whether the request path has segments after the resource.
    #[must_use]
    pub fn nested(&self) -> bool {
        self.nested
    }
}

/// A request path resolved to its documented operation.
#[derive(Debug, Clone)]
pub struct ResolvedRoute<'a> {
    /// The matched key of `paths`
    pub template: &'a str,
    /// Lower-cased HTTP method, as used for the operation key
    pub method: String,
    pub path_item: &'a Map<String, Value>,
    pub operation: &'a Map<String, Value>,
    /// Bindings derived from the template's `{name}` segments
    pub path_params: ParamVec,
    /// The request path's third segment (`/resource/<this>/...`)
    pub third_segment: Option<String>,
}

impl ResolvedRoute<'_> {
    /// Value bound to `{name}` in the template, if any.
    ///
    /// Uses "last write wins" if a name appears twice in the template.
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Resolves request paths against one specification document.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    spec: &'a SpecDocument,
}

impl<'a> PathResolver<'a> {
    #[must_use]
    pub fn new(spec: &'a SpecDocument) -> Self {
        PathResolver { spec }
    }

    /// Find the single template matching `path`.
    ///
    /// `path` must already be stripped of the API prefix and version.
    ///
    /// # Errors
    ///
    /// `BAD_URL` with `Url not found` for no match, `Url conflict` for several.
    pub fn resolve_template(&self, path: &str) -> Result<&'a str, ValidationError> {
        let path = normalize_path(path);
        if !path.starts_with('/') {
            return Err(ValidationError::bad_url("Url not found"));
        }
        let rule = MatchRule::for_path(path).map_err(|err| {
            warn!(path = %path, error = %err, "Request path cannot form a match rule");
            ValidationError::bad_url("Url not found")
        })?;

        let mut matches = self.spec.path_templates().filter(|t| rule.is_match(t));
        match (matches.next(), matches.next()) {
            (Some(template), None) => Ok(template),
            (None, _) => {
                warn!(path = %path, resource = %rule.resource(), "No route matched");
                Err(ValidationError::bad_url("Url not found"))
            }
            (Some(first), Some(second)) => {
                warn!(
                    path = %path,
                    resource = %rule.resource(),
                    first = %first,
                    second = %second,
                    "Ambiguous route: several templates match"
                );
                Err(ValidationError::bad_url("Url conflict"))
            }
        }
    }

    /// Resolve `method` + `path` to the documented operation.
    ///
    /// # Errors
    ///
    /// * [`Rejection::Invalid`] with `BAD_URL` or `BAD_METHOD`
    /// * [`Rejection::Fault`] if the matched path item or operation is not a mapping
    pub fn resolve(&self, method: &Method, path: &str) -> Result<ResolvedRoute<'a>, Rejection> {
        debug!(method = %method, path = %path, "Route match attempt");

        let template = self.resolve_template(path)?;
        let path = normalize_path(path);
        let method_key = method.as_str().to_ascii_lowercase();

        let path_item = self.spec.path_item(template)?;
        let operation = match path_item.get(method_key.as_str()) {
            Some(Value::Object(op)) if METHODS.contains(&method_key.as_str()) => op,
            Some(_) if METHODS.contains(&method_key.as_str()) => {
                return Err(SpecFault::MalformedNode {
                    location: format!("#/paths/{template}/{method_key}"),
                    expected: "a mapping",
                }
                .into())
            }
            _ => {
                warn!(method = %method, template = %template, "Method not documented for path");
                return Err(ValidationError::bad_method("Method not allowed").into());
            }
        };

        let route = ResolvedRoute {
            template,
            method: method_key,
            path_item,
            operation,
            path_params: bind_template(template, path),
            third_segment: path.split('/').nth(2).map(str::to_string),
        };

        info!(
            method = %method,
            path = %path,
            template = %route.template,
            path_params = ?route.path_params,
            "Route matched"
        );
        Ok(route)
    }
}
