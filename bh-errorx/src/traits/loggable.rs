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

use crate::Error;

/// Trait making a [`crate::Result`] error variant loggable.
pub trait Loggable<T> {
    /// Logs the log text of the error, if it occured, at the error level.
    ///
    /// The log target is the caller's location.
    fn log_err(self) -> Self;
}

impl<T> Loggable<T> for crate::Result<T> {
    #[track_caller]
    fn log_err(self) -> Self {
        let location = std::panic::Location::caller();

        self.map_err(|error| {
            log::error!(target: &location.to_string(), "{}", error.log_text());
            error
        })
    }
}

impl Error {
    /// Logs the freshly constructed error at the debug level, targeted at its construction site.
    pub(crate) fn log_constructed(self) -> Self {
        log::debug!(target: &self.location.to_string(), "{}", self.log_text());
        self
    }
}
