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

use crate::Detail;

/// Extension trait for attaching [`Detail`]s to errors within [`crate::Result`].
///
/// The errors stay the same, but are enriched with field-level complaints.
pub trait ErrorDetails<T> {
    /// A detail is appended to the [Err] variant, while the rest remains untouched.
    ///
    /// The detail is lazily evaluated.
    fn detail<F>(self, f: F) -> crate::Result<T>
    where
        F: FnOnce() -> Detail;
}

impl<T> ErrorDetails<T> for crate::Result<T> {
    fn detail<F>(self, f: F) -> crate::Result<T>
    where
        F: FnOnce() -> Detail,
    {
        self.map_err(|error| error.with_detail(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorDetails as _;
    use crate::{Code, Detail};

    fn non_failing_function() -> crate::Result<()> {
        Ok(())
    }

    fn failing_function() -> crate::Result<()> {
        Err(crate::Error::new(Code::INVALID_ARGUMENT, "invalid request"))
    }

    #[test]
    fn test_detail() {
        assert!(non_failing_function()
            .detail(|| unreachable!("not evaluated on success"))
            .is_ok());

        let error = failing_function()
            .detail(|| Detail::new("name", "Name is empty"))
            .detail(|| Detail::new("age", "Age is negative"))
            .unwrap_err();

        assert_eq!(
            error.details(),
            &[
                Detail::new("name", "Name is empty"),
                Detail::new("age", "Age is negative"),
            ]
        );
    }
}
