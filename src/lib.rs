//! A manager for chess tournaments: players, rounds, pairings and results.
//!
//! ## Feature Flags
//!
//! * bench - enable the criterion benchmarks
//!
//! ## Command Protocol
//!
//! The `chess-tournament` binary reads one [command] per line and answers
//! with `= status` on success or `? error` on failure.
//!
//! [command]: command::Command

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

#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

pub mod command;
pub mod date;
pub mod error;
pub mod manager;
pub mod matches;
pub mod player;
pub mod round;
pub mod store;
pub mod tournament;
pub mod utils;

pub const HOME: &str = "chess-tournament";

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 Developers of the chess-tournament project

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2026 Developers of the chess-tournament project
Licensed under the AGPLv3"
);

/// Generates a fresh identifier: eight lowercase hex digits.
#[must_use]
pub fn generate_id() -> String {
    format!("{:08x}", rand::random::<u32>())
}
