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

use std::fmt;

use chrono::{Local, NaiveDateTime};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{error::TournamentError, matches::Match};

const TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Round {
    pub name: String,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_complete: bool,
    /// The player left without an opponent.
    #[serde(default)]
    pub bye: Option<String>,
}

impl Round {
    #[must_use]
    pub fn new(name: &str, start_time: Option<NaiveDateTime>) -> Self {
        Self {
            name: name.to_string(),
            matches: Vec::new(),
            start_time,
            end_time: None,
            is_complete: false,
            bye: None,
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// # Errors
    ///
    /// If the round has already started.
    pub fn start(&mut self) -> Result<(), TournamentError> {
        if self.is_started() {
            return Err(TournamentError::RoundAlreadyStarted(self.name.clone()));
        }

        self.start_time = Some(Local::now().naive_local());
        info!("round '{}' has started", self.name);
        Ok(())
    }

    /// # Errors
    ///
    /// If the round has already been completed.
    pub fn end(&mut self) -> Result<(), TournamentError> {
        if self.is_complete {
            return Err(TournamentError::RoundAlreadyComplete(self.name.clone()));
        }

        self.end_time = Some(Local::now().naive_local());
        self.is_complete = true;
        info!("round '{}' has ended", self.name);
        Ok(())
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;

        match (self.start_time, self.end_time) {
            (_, Some(end_time)) if self.is_complete => {
                writeln!(f, " (complete {})", end_time.format(TIME_FORMAT))?;
            }
            (Some(start_time), _) => writeln!(f, " (started {})", start_time.format(TIME_FORMAT))?,
            _ => writeln!(f, " (not started)")?,
        }

        for (index, game) in self.matches.iter().enumerate() {
            writeln!(f, "  {index}: {game}")?;
        }

        if let Some(bye) = &self.bye {
            writeln!(f, "  bye: {bye}")?;
        }

        Ok(())
    }
}
