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

use crate::{Cause, Error};

// Writes only the safe message.
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Lazily rendered log text of an [`Error`], see [`Error::log_error`].
///
/// Useful for passing to logging macros without allocating the text up front.
#[derive(Clone, Copy)]
pub struct LogText<'a>(&'a Error);

impl Error {
    /// Renders the operator-facing text of the error, including the whole cause chain.
    ///
    /// The header of each structured link is its log message if one was given, otherwise
    /// `[<code>] <message>`.  Links are joined with `": "`, and a foreign cause contributes its
    /// [`std::fmt::Display`] output.  For example:
    ///
    /// ```text
    /// [storage.failure] could not load user: [db.query] query failed: connection refused
    /// ```
    ///
    /// The text may contain internal details and must never be returned to a client.
    pub fn log_error(&self) -> String {
        self.log_text().to_string()
    }

    /// Same as [`Error::log_error`], but rendered only once formatted.
    pub fn log_text(&self) -> LogText<'_> {
        LogText(self)
    }

    fn write_log_header(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.log_message {
            Some(log_message) => f.write_str(log_message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

impl std::fmt::Display for LogText<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.write_log_header(f)?;

        // Chains of any depth are rendered without recursion.
        for cause in self.0.causes() {
            f.write_str(": ")?;
            match cause {
                Cause::Structured(error) => error.write_log_header(f)?,
                Cause::Foreign(error) => write!(f, "{}", error)?,
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for LogText<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.to_string())
    }
}

// Goes through the whole error chain and writes all the errors.
impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;

        write!(f, "\"code\":{}", json_escape(self.code.as_str()))?;
        write!(f, ",\"message\":{}", json_escape(&self.message))?;

        if let Some(log_message) = &self.log_message {
            write!(f, ",\"log_message\":{}", json_escape(log_message))?;
        }

        // Write the details if present
        if !self.details.is_empty() {
            let details: Vec<_> = self.details.iter().map(|detail| detail.to_json()).collect();
            write!(f, ",\"details\":{}", serde_json::Value::Array(details))?;
        }

        // Write the source of the error
        if let Some(cause) = &self.cause {
            write!(f, ",\"source\":")?;

            match cause {
                // If it is a structured source, use its Debug output
                Cause::Structured(error) => {
                    write!(f, "{:?}", error)?;
                }
                // If it is a foreign error, use the recursive helper function
                Cause::Foreign(error) => {
                    debug_foreign_error(error.as_ref(), f)?;
                }
            }
        }

        write!(f, "}}")
    }
}

fn debug_foreign_error(
    error: &dyn std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    write!(f, "{{")?;

    let error_esc = json_escape(&format!(r"{:?}", error));
    write!(f, "\"error\":{}", error_esc)?;

    if let Some(source) = error.source() {
        write!(f, ",\"source\":")?;

        debug_foreign_error(source, f)?;
    }

    write!(f, "}}")
}

pub(crate) fn json_escape(value: &str) -> String {
    serde_json::json!(value).to_string()
}

#[cfg(test)]
mod tests {
    use crate::{display::json_escape, newf, newf_with_log, wrapf, wrapf_with_log, Code, Detail};

    macro_rules! foreign_error {
        ($name:ident -> $($variant:ident),*) => {
            #[allow(dead_code)]
            #[derive(Debug)]
            enum $name {
                $($variant(Box<dyn std::error::Error + Send + Sync>),)*
                NoSource,
            }

            impl std::fmt::Display for $name
            {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    match self {
                        $(Self::$variant(_) => write!(f, "{}", stringify!($variant)),)*
                        Self::NoSource => write!(f, "NoSource")
                    }
                }
            }

            impl std::error::Error for $name {
                fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                    match self {
                        $(Self::$variant(source) => Some(source.as_ref() as _),)*
                        Self::NoSource => None
                    }
                }
            }
        };
    }

    foreign_error!(ForeignErrorFirst -> ForeignErrorFirstVariant);
    foreign_error!(ForeignErrorSecond -> ForeignErrorSecondVariant);

    #[derive(Debug)]
    struct OriginalError;

    impl std::fmt::Display for OriginalError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "original error")
        }
    }

    impl std::error::Error for OriginalError {}

    #[test]
    fn test_json_escape() {
        assert_eq!(json_escape("Some string"), r#""Some string""#);
        assert_eq!(
            json_escape("String with \"quotes\""),
            r#""String with \"quotes\"""#
        );
        assert_eq!(
            json_escape("{\"key\":\"value\"}"),
            r#""{\"key\":\"value\"}""#
        );
    }

    #[test]
    fn test_display() {
        let err = crate::Error::new("some_code", "some_string");
        assert_eq!(err.to_string(), "some_string");

        let err = crate::Error::wrap(OriginalError, "upper.code", "upper error message");
        assert_eq!(err.to_string(), "upper error message");

        let err = crate::Error::wrap_with_log(err, "top.code", "top message", "top log");
        assert_eq!(err.to_string(), "top message");
    }

    #[test]
    fn test_newf() {
        let err = newf!("some_code", "{} {}", 1, 2);

        assert_eq!(err.code(), &"some_code");
        assert_eq!(err.to_string(), "1 2");
        assert_eq!(err.log_error(), "[some_code] 1 2");
    }

    #[test]
    fn test_newf_with_log() {
        let err = newf_with_log!(
            Code::INTERNAL,
            "some custom log message with more information",
            "{} {}",
            1,
            2
        );

        assert_eq!(err.code(), &Code::INTERNAL);
        assert_eq!(err.to_string(), "1 2");
        assert_eq!(
            err.log_error(),
            "some custom log message with more information"
        );
    }

    #[test]
    fn test_wrapf() {
        let err = wrapf!(OriginalError, "upper error", "upper error message {}", 1);
        assert_eq!(
            err.log_error(),
            "[upper error] upper error message 1: original error"
        );
    }

    #[test]
    fn test_wrapf_with_log() {
        let err = wrapf_with_log!(
            OriginalError,
            "upper error",
            "some log",
            "upper error message {}",
            1
        );
        assert_eq!(err.to_string(), "upper error message 1");
        assert_eq!(err.log_error(), "some log: original error");
    }

    #[test]
    fn test_log_error_without_cause() {
        let err = crate::Error::new("some_code", "some_string");
        assert_eq!(err.log_error(), "[some_code] some_string");

        let err = crate::Error::with_log("some_code", "some_string", "only this");
        assert_eq!(err.log_error(), "only this");
    }

    #[test]
    fn test_log_error_with_foreign_cause() {
        let err = crate::Error::wrap(OriginalError, "upper error", "upper error message");
        assert_eq!(
            err.log_error(),
            "[upper error] upper error message: original error"
        );

        // Only the Display output of a foreign cause is used, its own sources are not.
        let cause = ForeignErrorSecond::ForeignErrorSecondVariant(Box::new(
            ForeignErrorFirst::NoSource,
        ));
        let err = crate::Error::wrap(cause, "upper error", "upper error message");
        assert_eq!(
            err.log_error(),
            "[upper error] upper error message: ForeignErrorSecondVariant"
        );
    }

    #[test]
    fn test_log_error_with_structured_cause() {
        let cause = crate::Error::new("some_code", "some_string");
        let err = crate::Error::wrap(cause, "upper error", "upper error message");
        assert_eq!(
            err.log_error(),
            "[upper error] upper error message: [some_code] some_string"
        );

        let cause = crate::Error::new("some_code", "some_string");
        let err = crate::Error::wrap_with_log(
            cause,
            "upper error",
            "upper error message",
            "some_log_message",
        );
        assert_eq!(err.log_error(), "some_log_message: [some_code] some_string");
        assert_eq!(err.to_string(), "upper error message");
    }

    #[test]
    fn test_log_error_deep_chain() {
        let err = crate::Error::wrap(OriginalError, "db.query", "query failed");
        let err = crate::Error::wrap_with_log(err, "db.pool", "pool failed", "pool log");
        let err = crate::Error::wrap(err, "user.load", "could not load user");
        let err = crate::Error::wrap(err, "api.handler", "request failed");

        assert_eq!(
            err.log_error(),
            "[api.handler] request failed: [user.load] could not load user: pool log: \
             [db.query] query failed: original error"
        );
        assert_eq!(err.to_string(), "request failed");
        assert_eq!(format!("{}", err.log_text()), err.log_error());
    }

    #[test]
    fn test_log_error_very_deep_chain() {
        let mut err = crate::Error::new("level.0", "0");
        for level in 1..500 {
            err = wrapf!(err, format!("level.{level}"), "{level}");
        }

        let text = err.log_error();
        assert!(text.starts_with("[level.499] 499: [level.498] 498"));
        assert!(text.ends_with("[level.1] 1: [level.0] 0"));
    }

    #[test]
    fn test_end_to_end() {
        #[derive(Debug)]
        struct DbDown;

        impl std::fmt::Display for DbDown {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "db down")
            }
        }

        impl std::error::Error for DbDown {}

        let e = crate::Error::wrap(DbDown, "storage.failure", "could not load user");
        assert_eq!(e.to_string(), "could not load user");
        assert_eq!(
            e.log_error(),
            "[storage.failure] could not load user: db down"
        );
    }

    #[test]
    fn test_debug() {
        let err = crate::Error::wrap(
            ForeignErrorSecond::ForeignErrorSecondVariant(Box::new(ForeignErrorFirst::NoSource)),
            "first.code",
            "first",
        );
        let err = crate::Error::wrap_with_log(err, "second.code", "second", "second log")
            .with_detail(Detail::new("name", "Name is \"empty\""));

        assert_eq!(
            format!("{err:?}"),
            r#"{"code":"second.code","message":"second","log_message":"second log","details":[{"field":"name","message":"Name is \"empty\""}],"source":{"code":"first.code","message":"first","source":{"error":"ForeignErrorSecondVariant(NoSource)","source":{"error":"NoSource"}}}}"#
        );
    }
}
