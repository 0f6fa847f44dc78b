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

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! This crate provides a structured error value used across services, from business logic over
//! storage adapters up to the RPC/HTTP boundary.
//!
//! # Details
//!
//! Every [`Error`] carries:
//!
//! * a [`Code`], an open-ended, dot-namespaced string used for programmatic dispatch (status
//!   mapping, retry decisions).  The `common.*` namespace is reserved for generic kinds;
//! * a safe message, the only text which may be shown to an end user.  It is what the
//!   [`std::fmt::Display`] implementation writes;
//! * an optional log message, overriding the header of the operator-facing log text;
//! * an optional [`Cause`], which is either another [`Error`] or a "foreign" error, i.e. any
//!   other [`std::error::Error`];
//! * an append-only list of [`Detail`]s, describing field-level validation failures;
//! * a [`StackTrace`] captured at construction.
//!
//! Use `std::result::Result<T, bh_errorx::Error>`, or equivalently `bh_errorx::Result<T>` as the
//! return type for functions which may return an error.
//!
//! Root errors are constructed via [`Error::new`] or [`Error::with_log`], and the [`newf!`] and
//! [`newf_with_log!`] macros for formatted messages.  Errors are propagated with additional
//! context via [`Error::wrap`] and friends (or the [`wrapf!`] macros), which always build a new
//! error and keep the wrapped one as its cause.  The [`WrapError`][traits::WrapError] trait does
//! the same directly on a [`Result`].
//!
//! [`Error::log_error`] renders the whole cause chain for the logs, while [`parse`] and
//! [`parse_and_wrap`] classify arbitrary errors at a trust boundary.
//!
//! Each constructed error is logged at the debug level with the construction site as the log
//! target.
//!
//! # Examples
//!
//! ```
//! use bh_errorx::{parse_and_wrap, traits::WrapError, Code, Detail, Error};
//!
//! #[derive(Debug)]
//! struct DbDown;
//!
//! impl std::fmt::Display for DbDown {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "db down")
//!     }
//! }
//!
//! impl std::error::Error for DbDown {}
//!
//! fn load_user(id: i64) -> bh_errorx::Result<String> {
//!     if id < 0 {
//!         let mut error = Error::new(Code::INVALID_ARGUMENT, "invalid user id");
//!         error.add_details(Detail::new("id", "must not be negative"));
//!         return Err(error);
//!     }
//!     Err::<String, _>(DbDown).wrap_err("storage.failure", "could not load user")
//! }
//!
//! let error = load_user(1).unwrap_err();
//! assert_eq!(error.to_string(), "could not load user");
//! assert_eq!(error.log_error(), "[storage.failure] could not load user: db down");
//!
//! // At the boundary, structured errors pass through unchanged.
//! let error = parse_and_wrap(error, "something went wrong");
//! assert_eq!(error.code(), &"storage.failure");
//!
//! let error = load_user(-1).unwrap_err();
//! assert_eq!(error.details(), &[Detail::new("id", "must not be negative")]);
//! ```

use std::panic::Location;

pub mod adapters;
mod code;
mod detail;
mod display;
mod macros;
mod parse;
mod stack;
pub mod trace;
pub mod traits;

pub use code::Code;
pub use detail::Detail;
pub use display::LogText;
pub use parse::{parse, parse_and_wrap, parse_boxed, parse_opt};
pub use stack::StackTrace;

/// The error wrapped by an [`Error`].
///
/// Whether the wrapped error is structured is decided once, when the cause is created.
pub enum Cause {
    /// The cause is another [`Error`].
    Structured(Box<Error>),
    /// The cause is a foreign error, only its [`std::fmt::Display`] output is known.
    Foreign(Box<dyn std::error::Error + Send + Sync>),
}

impl Cause {
    /// Classifies an already boxed error.
    pub fn boxed(source: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match source.downcast::<Error>() {
            Ok(error) => Self::Structured(error),
            Err(source) => Self::Foreign(source),
        }
    }

    /// Returns the cause as a [`std::error::Error`] trait object.
    pub fn as_error(&self) -> &(dyn std::error::Error + 'static) {
        match self {
            Self::Structured(error) => &**error,
            // "as _" here denotes casting to the output type, i.e. from
            // (Error + Send + Sync) to (Error + 'static).
            Self::Foreign(error) => error.as_ref() as _,
        }
    }
}

impl<E> From<E> for Cause
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(source: E) -> Self {
        Self::boxed(Box::new(source))
    }
}

impl std::fmt::Debug for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structured(error) => f.debug_tuple("Structured").field(error).finish(),
            Self::Foreign(error) => f.debug_tuple("Foreign").field(error).finish(),
        }
    }
}

/// A struct that should be used for all errors crossing layers of a service.
///
/// The code, both messages and the cause are set at construction and never change afterwards.
/// Wrapping an error creates a new [`Error`] owning the previous one.  The only mutation
/// permitted later on is appending [`Detail`]s.
///
/// [`std::fmt::Display`] writes the safe message only; use [`Error::log_error`] for the full
/// operator-facing text.
pub struct Error {
    code: Code,
    message: String,
    log_message: Option<String>,
    cause: Option<Cause>,
    details: Vec<Detail>,
    stack: StackTrace,
    location: &'static Location<'static>,
}

/// The [`std::result::Result`] alias with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a root error, i.e. one without a cause.
    ///
    /// Use [`newf!`] for a formatted message.
    #[track_caller]
    pub fn new(code: impl Into<Code>, message: impl Into<String>) -> Self {
        Self::build(code.into(), message.into(), None, None, Location::caller())
    }

    /// Creates a root error whose log text header is `log_message` instead of the one derived
    /// from the code and message.
    ///
    /// Use [`newf_with_log!`] for a formatted message.
    #[track_caller]
    pub fn with_log(
        code: impl Into<Code>,
        message: impl Into<String>,
        log_message: impl Into<String>,
    ) -> Self {
        Self::build(
            code.into(),
            message.into(),
            Some(log_message.into()),
            None,
            Location::caller(),
        )
    }

    /// Creates an error caused by `cause`.
    ///
    /// The `cause` can be another [`Error`] or any other [`std::error::Error`].  Do *not* create
    /// a root error when handling another error, because the whole error chain will be lost.
    ///
    /// Use [`wrapf!`] for a formatted message.
    #[track_caller]
    pub fn wrap(
        cause: impl Into<Cause>,
        code: impl Into<Code>,
        message: impl Into<String>,
    ) -> Self {
        Self::build(
            code.into(),
            message.into(),
            None,
            Some(cause.into()),
            Location::caller(),
        )
    }

    /// Creates an error caused by `cause` with an explicit log message.
    ///
    /// Use [`wrapf_with_log!`] for a formatted message.
    #[track_caller]
    pub fn wrap_with_log(
        cause: impl Into<Cause>,
        code: impl Into<Code>,
        message: impl Into<String>,
        log_message: impl Into<String>,
    ) -> Self {
        Self::build(
            code.into(),
            message.into(),
            Some(log_message.into()),
            Some(cause.into()),
            Location::caller(),
        )
    }

    /// Same as [`Error::wrap`], but the cause may be missing, in which case a root error is
    /// created.
    #[track_caller]
    pub fn wrap_opt(
        cause: Option<Cause>,
        code: impl Into<Code>,
        message: impl Into<String>,
    ) -> Self {
        Self::build(code.into(), message.into(), None, cause, Location::caller())
    }

    /// Same as [`Error::wrap_with_log`], but the cause may be missing, in which case a root
    /// error is created.
    #[track_caller]
    pub fn wrap_opt_with_log(
        cause: Option<Cause>,
        code: impl Into<Code>,
        message: impl Into<String>,
        log_message: impl Into<String>,
    ) -> Self {
        Self::build(
            code.into(),
            message.into(),
            Some(log_message.into()),
            cause,
            Location::caller(),
        )
    }

    fn build(
        code: Code,
        message: String,
        log_message: Option<String>,
        cause: Option<Cause>,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            code,
            message,
            log_message,
            cause,
            details: Vec::new(),
            stack: StackTrace::capture(),
            location,
        }
        .log_constructed()
    }

    /// The code of the error.
    pub fn code(&self) -> &Code {
        &self.code
    }

    /// The safe message of the error, same as the [`std::fmt::Display`] output.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The explicit log message, if one was given at construction.
    pub fn log_message(&self) -> Option<&str> {
        self.log_message.as_deref()
    }

    /// The direct cause of the error.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Iterates over the cause chain, starting with the direct cause.
    ///
    /// The iteration stops at the first foreign cause.
    pub fn causes(&self) -> impl Iterator<Item = &Cause> {
        std::iter::successors(self.cause.as_ref(), |&cause| match cause {
            Cause::Structured(error) => error.cause.as_ref(),
            Cause::Foreign(_) => None,
        })
    }

    /// The innermost error of the chain, following [`std::error::Error::source`] links.
    ///
    /// Returns `self` when there is no cause.
    pub fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
        let mut current: &(dyn std::error::Error + 'static) = self;
        while let Some(source) = current.source() {
            current = source;
        }
        current
    }

    /// Appends a detail to the error.
    ///
    /// Details are kept in insertion order and duplicates are allowed.  An [`Error`] is meant to
    /// be owned by a single operation; sharing it between threads which add details requires
    /// external synchronization.
    pub fn add_details(&mut self, detail: Detail) {
        self.details.push(detail);
    }

    /// Appends a detail to the error and returns it.
    ///
    /// The method takes ownership of `self` so that the method can be chained.
    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.add_details(detail);
        self
    }

    /// The details attached to the error, in insertion order.
    pub fn details(&self) -> &[Detail] {
        &self.details
    }

    /// The call stack captured at construction.
    pub fn stack_trace(&self) -> &StackTrace {
        &self.stack
    }

    /// The source location where the error was constructed.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Prints the captured call stack to the standard error.
    ///
    /// Never fails; write errors are ignored and a placeholder is printed if no frames were
    /// captured.
    pub fn print_stack_trace(&self) {
        let _ = self.write_stack_trace(&mut std::io::stderr().lock());
    }

    /// Writes the captured call stack to `out`.
    pub fn write_stack_trace<W>(&self, out: &mut W) -> std::io::Result<()>
    where
        W: std::io::Write + ?Sized,
    {
        writeln!(out, "{} (at {})", self.log_text(), self.location)?;
        self.stack.write_to(out)
    }
}

// Make the Error a std::error::Error type.
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(Cause::as_error)
    }
}
