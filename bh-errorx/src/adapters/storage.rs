// Copyright (C) 2020-2025  The Blockhouse Technology Limited (TBTL).
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


//! Helpers for storage adapters, e.g. caches and databases.
//!
//! Storage clients usually report a missing entry as an error or an empty value of their own.
//! Adapters translate it into an [`Error`] with the [`Code::NOT_FOUND`] code, so that the callers
//! can react to a miss without knowing the client.

use crate::{Cause, Code, Error};

/// Wraps the "not found" condition reported by a storage client.
#[track_caller]
pub fn not_found(cause: impl Into<Cause>, message: impl Into<String>) -> Error {
    Error::wrap(cause, Code::NOT_FOUND, message)
}

/// Maps a missing value of a storage lookup to an [`Error`] with the [`Code::NOT_FOUND`] code.
///
/// ```
/// use bh_errorx::{adapters::storage::require_found, Code};
///
/// let cached: Option<String> = None;
/// let error = require_found(cached, "user 42 is not cached").unwrap_err();
/// assert_eq!(error.code(), &Code::NOT_FOUND);
/// ```
#[track_caller]
pub fn require_found<T>(value: Option<T>, message: impl Into<String>) -> crate::Result<T> {
    match value {
        Some(value) => Ok(value),
        None => Err(Error::new(Code::NOT_FOUND, message)),
    }
}

/// Whether the error reports a missing entry.
pub fn is_not_found(error: &Error) -> bool {
    error.code() == &Code::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Nil;

    impl std::fmt::Display for Nil {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "redis: nil")
        }
    }

    impl std::error::Error for Nil {}

    #[test]
    fn test_not_found() {
        let error = not_found(Nil, "redis key not found");

        assert!(is_not_found(&error));
        assert_eq!(
            error.log_error(),
            "[common.not-found] redis key not found: redis: nil"
        );
    }

    #[test]
    fn test_require_found() {
        assert_eq!(require_found(Some(1), "missing").unwrap(), 1);

        let error = require_found::<u8>(None, "missing").unwrap_err();
        assert!(is_not_found(&error));
        assert_eq!(error.to_string(), "missing");
        assert!(!is_not_found(&Error::new(Code::INTERNAL, "boom")));
    }
}
