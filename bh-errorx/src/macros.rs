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

/// Creates a root [`Error`][crate::Error] with a formatted message.
///
/// ```
/// let error = bh_errorx::newf!("order.too-large", "order of {} items exceeds {}", 12, 10);
/// assert_eq!(error.to_string(), "order of 12 items exceeds 10");
/// ```
#[macro_export]
macro_rules! newf {
    ($code:expr, $($arg:tt)+) => {
        $crate::Error::new($code, ::std::format!($($arg)+))
    };
}

/// Creates a root [`Error`][crate::Error] with a formatted message and an explicit log message.
///
/// The log message comes before the format string.
#[macro_export]
macro_rules! newf_with_log {
    ($code:expr, $log_message:expr, $($arg:tt)+) => {
        $crate::Error::with_log($code, ::std::format!($($arg)+), $log_message)
    };
}

/// Wraps a cause into a new [`Error`][crate::Error] with a formatted message.
///
/// ```
/// let cause = "x".parse::<i32>().unwrap_err();
/// let error = bh_errorx::wrapf!(cause, "input.invalid", "field {} is not a number", "age");
/// assert_eq!(error.to_string(), "field age is not a number");
/// assert_eq!(
///     error.log_error(),
///     "[input.invalid] field age is not a number: invalid digit found in string"
/// );
/// ```
#[macro_export]
macro_rules! wrapf {
    ($cause:expr, $code:expr, $($arg:tt)+) => {
        $crate::Error::wrap($cause, $code, ::std::format!($($arg)+))
    };
}

/// Wraps a cause into a new [`Error`][crate::Error] with a formatted message and an explicit log
/// message.
///
/// The log message comes before the format string.
#[macro_export]
macro_rules! wrapf_with_log {
    ($cause:expr, $code:expr, $log_message:expr, $($arg:tt)+) => {
        $crate::Error::wrap_with_log($cause, $code, ::std::format!($($arg)+), $log_message)
    };
}
