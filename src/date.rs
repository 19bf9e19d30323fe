// This file is part of chess-tournament.
//
// chess-tournament is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// chess-tournament is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Dates are exchanged as `DD/MM/YYYY` strings. A string that doesn't parse
//! becomes a null date instead of an error.

use chrono::NaiveDate;
use log::error;

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const INVALID_DATE: &str = "Invalid date";

/// Parses a `DD/MM/YYYY` date, logging and returning `None` on failure.
#[must_use]
pub fn parse_date(string: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(string.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            error!("date format error: '{string}', expected DD/MM/YYYY: {err}");
            None
        }
    }
}

#[must_use]
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Serde adapter storing an `Option<NaiveDate>` as `DD/MM/YYYY` or
/// `Invalid date`.
pub mod serde_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{INVALID_DATE, format_date, parse_date};

    /// # Errors
    ///
    /// If the serializer fails.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date(*date))
    }

    /// # Errors
    ///
    /// If the value is not a string.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let string = String::deserialize(deserializer)?;

        if string == INVALID_DATE {
            Ok(None)
        } else {
            Ok(parse_date(&string))
        }
    }
}
