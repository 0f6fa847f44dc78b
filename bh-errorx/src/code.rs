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

use std::borrow::Cow;

/// Prefix of the reserved namespace for generic error kinds.
const COMMON_NAMESPACE: &str = "common.";

/// Identifier classifying the kind of an [`Error`][crate::Error].
///
/// Codes are opaque, dot-namespaced strings.  The `common.*` namespace is reserved for generic
/// kinds, which are available as associated constants (e.g. [`Code::INTERNAL`]).  Any other
/// string can be minted by the code owning a domain, there is no central registry and the format
/// is never validated.
///
/// Two codes are equal iff their strings are equal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code(Cow<'static, str>);

impl Code {
    /// Generic internal failure.  Used for errors normalized by
    /// [`parse_and_wrap`][crate::parse_and_wrap].
    pub const INTERNAL: Code = Code::from_static("common.internal");
    /// The requested entity does not exist.
    pub const NOT_FOUND: Code = Code::from_static("common.not-found");
    /// The caller supplied an invalid argument.
    pub const INVALID_ARGUMENT: Code = Code::from_static("common.invalid-argument");
    /// The caller is not authenticated.
    pub const UNAUTHORIZED: Code = Code::from_static("common.unauthorized");
    /// The caller is authenticated, but not allowed to perform the operation.
    pub const FORBIDDEN: Code = Code::from_static("common.forbidden");
    /// The entity the caller tried to create already exists.
    pub const ALREADY_EXISTS: Code = Code::from_static("common.already-exists");
    /// A dependency is temporarily unavailable.
    pub const UNAVAILABLE: Code = Code::from_static("common.unavailable");
    /// The operation did not complete in time.
    pub const TIMEOUT: Code = Code::from_static("common.timeout");

    /// Creates a code from a string literal.  Usable in `const` context.
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code belongs to the reserved `common.*` namespace.
    pub fn is_common(&self) -> bool {
        self.0.starts_with(COMMON_NAMESPACE)
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&'static str> for Code {
    fn from(code: &'static str) -> Self {
        Self::from_static(code)
    }
}

impl From<String> for Code {
    fn from(code: String) -> Self {
        Self(Cow::Owned(code))
    }
}

impl PartialEq<str> for Code {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Code {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
