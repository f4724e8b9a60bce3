//! API catalogue and HTTP route migration.
//!
//! A `Document` lists the operations of an already-compiled API. Migration
//! turns each operation into a `Route` whose accessor mirrors the generated
//! SDK (`api.functional.shoppings.customers.sales.create`). Routes are keyed by
//! `Endpoint`, compared by value.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dedup::DeduplicationFilter;

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Value-equality key of an operation: method plus path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid endpoint '{input}': expected \"METHOD /path\"")]
pub struct ParseEndpointError {
    pub input: String,
}

impl FromStr for Endpoint {
    type Err = ParseEndpointError;

    /// Parse `"GET /path"` (method is case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseEndpointError { input: s.to_string() };
        let (method, path) = s.trim().split_once(char::is_whitespace).ok_or_else(err)?;
        let method = match method.to_ascii_lowercase().as_str() {
            "get" => HttpMethod::Get,
            "post" => HttpMethod::Post,
            "put" => HttpMethod::Put,
            "patch" => HttpMethod::Patch,
            "delete" => HttpMethod::Delete,
            _ => return Err(err()),
        };
        let path = path.trim();
        if !path.starts_with('/') {
            return Err(err());
        }
        Ok(Endpoint {
            method,
            path: path.to_string(),
        })
    }
}

/// Path parameter of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default = "default_parameter_type", rename = "type")]
    pub type_name: String,
}

fn default_parameter_type() -> String {
    "string".to_string()
}

/// One API operation with its DTO type names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub method: HttpMethod,
    pub path: String,
    /// Explicit accessor name; derived from the method when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request body type name, e.g. `IShoppingSale.ICreate`
    #[serde(default)]
    pub request_body: Option<String>,
    /// Response body type name, e.g. `IShoppingSale`
    #[serde(default)]
    pub response_body: Option<String>,
}

impl Operation {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint {
            method: self.method,
            path: self.path.clone(),
        }
    }
}

/// Compiled API catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub operations: Vec<Operation>,
}

/// An operation bound to its SDK accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub endpoint: Endpoint,
    /// Accessor segments below `api.functional`, e.g. `["shoppings", "sales", "at"]`
    pub accessor: Vec<String>,
    pub operation: Operation,
}

impl Route {
    /// Dotted accessor rooted at `root`, e.g. `api.functional.shoppings.sales.at`.
    pub fn accessor_path(&self, root: &str) -> String {
        let mut parts = vec![root.to_string(), "functional".to_string()];
        parts.extend(self.accessor.iter().cloned());
        parts.join(".")
    }
}

/// Convert every operation into a routable accessor.
///
/// Accessors colliding with an earlier route get a numeric suffix on their
/// final segment, so the result is deterministic in operation order.
pub fn migrate_routes(document: &Document) -> Vec<Route> {
    let mut taken = DeduplicationFilter::new();
    document
        .operations
        .iter()
        .map(|operation| {
            let mut accessor = accessor_segments(&operation.endpoint(), operation.name.as_deref());
            if !taken.should_process(accessor.clone()) {
                let base = accessor.pop().unwrap_or_default();
                let mut n = 1;
                loop {
                    let mut candidate = accessor.clone();
                    candidate.push(format!("{}{}", base, n));
                    if taken.should_process(candidate.clone()) {
                        accessor = candidate;
                        break;
                    }
                    n += 1;
                }
            }
            Route {
                endpoint: operation.endpoint(),
                accessor,
                operation: operation.clone(),
            }
        })
        .collect()
}

/// Build the `Endpoint -> Route` association map.
pub fn accessor_map(routes: Vec<Route>) -> HashMap<Endpoint, Route> {
    routes
        .into_iter()
        .map(|route| (route.endpoint.clone(), route))
        .collect()
}

/// Accessor segments for an endpoint: namespaces from the static path
/// segments, then a function name chosen by method.
pub fn accessor_segments(endpoint: &Endpoint, explicit_name: Option<&str>) -> Vec<String> {
    let segments: Vec<&str> = endpoint.path.split('/').filter(|s| !s.is_empty()).collect();
    let last_is_parameter = segments.last().is_some_and(|s| is_parameter(s));

    let mut accessor: Vec<String> = segments
        .iter()
        .filter(|s| !is_parameter(s))
        .map(|s| identifier(s))
        .collect();

    let name = match explicit_name {
        Some(name) => identifier(name),
        None => match endpoint.method {
            HttpMethod::Get if last_is_parameter => "at".to_string(),
            HttpMethod::Get => "get".to_string(),
            HttpMethod::Post => "create".to_string(),
            HttpMethod::Put => "update".to_string(),
            HttpMethod::Patch => "index".to_string(),
            HttpMethod::Delete => "erase".to_string(),
        },
    };
    accessor.push(name);
    accessor
}

fn is_parameter(segment: &str) -> bool {
    segment.starts_with(':') || (segment.starts_with('{') && segment.ends_with('}'))
}

const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "default", "delete", "do", "else",
    "enum", "export", "extends", "false", "finally", "for", "function", "if", "import", "in",
    "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
];

// Path segment to a property-safe identifier.
fn identifier(segment: &str) -> String {
    let mut ident: String = segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}
