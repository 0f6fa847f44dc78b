// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.


//! Request-scoped trace identifiers and log metadata.
//!
//! A service attaches a trace id to every incoming request and logs errors together with it, so
//! that the log lines of one request can be correlated.  The id is taken from the request
//! header if the caller sent one, otherwise from the current context, and a new one is generated
//! as the last resort.
//!
//! ```
//! use bh_errorx::{trace, Error};
//!
//! let trace_id = trace::resolve(None, None);
//! let metadata = trace::Metadata::new()
//!     .with("service", "api")
//!     .with_trace_id("trace_id", &trace_id);
//!
//! let error = Error::new("storage.failure", "could not load user");
//! assert_eq!(
//!     trace::render(&metadata, &error),
//!     format!("service=api trace_id={trace_id} [storage.failure] could not load user")
//! );
//! trace::log_error_with(&metadata, &error);
//! ```

use std::collections::BTreeMap;

use crate::Error;

/// Opaque identifier of a request, shared by all of its log lines.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TraceId(String);

impl TraceId {
    /// Generates a new random trace id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the trace id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TraceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Picks the trace id of a request.
///
/// The id received in the request `header` wins over the one found in the `current` context.
/// Empty ids are ignored, and a new id is generated if neither is usable.
pub fn resolve(header: Option<&str>, current: Option<&TraceId>) -> TraceId {
    match (header, current) {
        (Some(id), _) if !id.is_empty() => TraceId(id.to_owned()),
        (_, Some(id)) if !id.0.is_empty() => id.clone(),
        _ => TraceId::generate(),
    }
}

/// Key-value pairs logged along with an error, e.g. the service name and the trace id.
///
/// Keys are rendered in lexicographic order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Sets `key` to `value` and returns the metadata.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` to the trace id and returns the metadata.
    pub fn with_trace_id(self, key: impl Into<String>, trace_id: &TraceId) -> Self {
        self.with(key, trace_id.as_str())
    }

    /// Returns the value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterates over the pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl std::fmt::Display for Metadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Renders the log line of `error` prefixed with the `metadata`.
pub fn render(metadata: &Metadata, error: &Error) -> String {
    if metadata.0.is_empty() {
        error.log_error()
    } else {
        format!("{} {}", metadata, error.log_text())
    }
}

/// Logs `error` at the error level together with the `metadata`.
///
/// The log target is the location where the error was constructed.
pub fn log_error_with(metadata: &Metadata, error: &Error) {
    log::error!(target: &error.location().to_string(), "{}", render(metadata, error));
}
