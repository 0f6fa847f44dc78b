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

use crate::{Code, Error};

/// Trait for wrapping errors of a [`std::result::Result`] into a new [`crate::Error`].
///
/// The received error becomes the cause of the new [`crate::Error`].  It can be any
/// [`std::error::Error`], including a [`crate::Error`] itself, which is recognised as a
/// structured cause.
///
/// The location recorded in the new error is the one of the caller.
pub trait WrapError<T> {
    /// Maps a `Result<T, S>` to `crate::Result<T>`.
    ///
    /// The [Ok] variant is left untouched.
    ///
    /// The [Err] value is wrapped with the given code and message, like [`Error::wrap`] does.
    fn wrap_err(self, code: impl Into<Code>, message: impl Into<String>) -> crate::Result<T>;

    /// Maps a `Result<T, S>` to `crate::Result<T>`.
    ///
    /// Same as [`WrapError::wrap_err`], but the message is lazily evaluated.
    fn wrap_err_with<M, F>(self, code: impl Into<Code>, f: F) -> crate::Result<T>
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// Maps a `Result<T, S>` to `crate::Result<T>`.
    ///
    /// Same as [`WrapError::wrap_err`], with an explicit log message like
    /// [`Error::wrap_with_log`] does.
    fn wrap_err_with_log(
        self,
        code: impl Into<Code>,
        message: impl Into<String>,
        log_message: impl Into<String>,
    ) -> crate::Result<T>;
}

impl<T, S> WrapError<T> for std::result::Result<T, S>
where
    S: std::error::Error + Send + Sync + 'static,
{
    #[track_caller]
    fn wrap_err(self, code: impl Into<Code>, message: impl Into<String>) -> crate::Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(source) => Err(Error::wrap(source, code, message)),
        }
    }

    #[track_caller]
    fn wrap_err_with<M, F>(self, code: impl Into<Code>, f: F) -> crate::Result<T>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        match self {
            Ok(value) => Ok(value),
            Err(source) => Err(Error::wrap(source, code, f())),
        }
    }

    #[track_caller]
    fn wrap_err_with_log(
        self,
        code: impl Into<Code>,
        message: impl Into<String>,
        log_message: impl Into<String>,
    ) -> crate::Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(source) => Err(Error::wrap_with_log(source, code, message, log_message)),
        }
    }
}
