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

/// A single structured complaint about an input field, e.g. a failed validation.
///
/// Details are attached to an [`Error`][crate::Error] in insertion order and are safe to return
/// to the client alongside the error message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detail {
    /// Name of the offending field.
    pub field: String,
    /// Explanation of what is wrong with the field.
    pub message: String,
}

impl Detail {
    /// Creates a new [`Detail`].
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "field": self.field,
            "message": self.message,
        })
    }
}
