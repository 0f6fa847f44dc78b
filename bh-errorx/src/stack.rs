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

use std::backtrace::{Backtrace, BacktraceStatus};

/// Printed in place of the frames when none could be captured.
const UNAVAILABLE: &str = "<stack trace unavailable>";

/// Call stack captured when an [`Error`][crate::Error] is constructed.
///
/// The frames are recorded eagerly, but symbol resolution happens only once the trace is
/// rendered for the first time.
pub struct StackTrace {
    backtrace: Backtrace,
}

impl StackTrace {
    /// Captures the current call stack, regardless of the `RUST_BACKTRACE` setting.
    pub(crate) fn capture() -> Self {
        Self {
            backtrace: Backtrace::force_capture(),
        }
    }

    /// Whether any frames were recorded.
    ///
    /// Returns `false` on platforms without unwinding information.
    pub fn is_captured(&self) -> bool {
        self.backtrace.status() == BacktraceStatus::Captured
    }

    /// Renders the trace into `out`.
    pub(crate) fn write_to<W>(&self, out: &mut W) -> std::io::Result<()>
    where
        W: std::io::Write + ?Sized,
    {
        writeln!(out, "{}", self)
    }
}

impl std::fmt::Display for StackTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_captured() {
            write!(f, "{}", self.backtrace)
        } else {
            f.write_str(UNAVAILABLE)
        }
    }
}

impl std::fmt::Debug for StackTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackTrace")
            .field("status", &self.backtrace.status())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_placeholder() {
        let trace = StackTrace {
            backtrace: Backtrace::disabled(),
        };

        assert!(!trace.is_captured());
        assert_eq!(trace.to_string(), UNAVAILABLE);

        let mut out = Vec::new();
        trace.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{UNAVAILABLE}\n"));
    }

    #[test]
    fn test_capture_renders() {
        let trace = StackTrace::capture();
        // Whether frames are available depends on the platform, but rendering never fails.
        assert!(!trace.to_string().is_empty());
    }
}
