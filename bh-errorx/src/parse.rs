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

//! Classification of arbitrary errors.
//!
//! Only the error itself is inspected.  An [`Error`] hidden behind the
//! [`source`][std::error::Error::source] of a foreign error is not found.

use crate::{Cause, Code, Error};

/// Returns the [`Error`] if `error` is one, `None` otherwise.
///
/// The returned reference points to the very same value, no copy is made.
pub fn parse<'a>(error: &'a (dyn std::error::Error + 'static)) -> Option<&'a Error> {
    error.downcast_ref::<Error>()
}

/// Same as [`parse`], for an error which might be missing.
pub fn parse_opt<'a>(error: Option<&'a (dyn std::error::Error + 'static)>) -> Option<&'a Error> {
    error.and_then(parse)
}

/// Owned version of [`parse`].
///
/// The error is given back unchanged in the [`Err`] variant if it is not an [`Error`].
pub fn parse_boxed(
    error: Box<dyn std::error::Error + Send + Sync>,
) -> std::result::Result<Error, Box<dyn std::error::Error + Send + Sync>> {
    error.downcast::<Error>().map(|error| *error)
}

/// Makes sure that `error` is an [`Error`].
///
/// An [`Error`] is returned as is, with its code, messages and details untouched.  Any other error
/// is wrapped into a new [`Error`] with the [`Code::INTERNAL`] code and `default_message`, keeping
/// the original error as the cause so that its text shows up in the log.
///
/// Call this once at the outermost layer, e.g. in an RPC handler or an HTTP middleware, so that
/// every outgoing error is structured without wrapping structured errors twice.
#[track_caller]
pub fn parse_and_wrap(error: impl Into<Cause>, default_message: impl Into<String>) -> Error {
    match error.into() {
        Cause::Structured(error) => *error,
        foreign @ Cause::Foreign(_) => Error::wrap(foreign, Code::INTERNAL, default_message),
    }
}
