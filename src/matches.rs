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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::TournamentError, player::Player};

/// Two players paired for a game, referred to by id.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Match {
    pub players: (String, String),
    #[serde(default)]
    pub result: Option<MatchResult>,
}

impl Match {
    /// # Errors
    ///
    /// If both players have the same id.
    pub fn new(first: &Player, second: &Player) -> Result<Self, TournamentError> {
        if first.unique_id == second.unique_id {
            return Err(TournamentError::SamePlayer(first.unique_id.clone()));
        }

        Ok(Self {
            players: (first.unique_id.clone(), second.unique_id.clone()),
            result: None,
        })
    }

    /// Stores the result, replacing any earlier one.
    pub fn set_results(&mut self, result: MatchResult) {
        self.result = Some(result);
    }

    #[must_use]
    pub fn involves(&self, unique_id: &str) -> bool {
        self.players.0 == unique_id || self.players.1 == unique_id
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Some(result) => write!(f, "{} vs {}: {result}", self.players.0, self.players.1),
            None => write!(f, "{} vs {}: -", self.players.0, self.players.1),
        }
    }
}

/// The scores of the first and second player.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct MatchResult {
    pub first: f64,
    pub second: f64,
}

impl MatchResult {
    pub const FIRST_WINS: Self = Self {
        first: 1.0,
        second: 0.0,
    };
    pub const SECOND_WINS: Self = Self {
        first: 0.0,
        second: 1.0,
    };
    pub const DRAW: Self = Self {
        first: 0.5,
        second: 0.5,
    };

    #[must_use]
    pub fn new(first: f64, second: f64) -> Self {
        Self { first, second }
    }
}

impl From<(f64, f64)> for MatchResult {
    fn from((first, second): (f64, f64)) -> Self {
        Self { first, second }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

impl FromStr for MatchResult {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string.trim() {
            "1-0" => Ok(Self::FIRST_WINS),
            "0-1" => Ok(Self::SECOND_WINS),
            "0.5-0.5" | "1/2-1/2" | "½-½" => Ok(Self::DRAW),
            _ => Err(anyhow::Error::msg(format!(
                "invalid result code '{string}', expected 1-0, 0-1 or 0.5-0.5"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn player(unique_id: &str) -> Player {
        Player {
            unique_id: unique_id.to_string(),
            name: unique_id.to_uppercase(),
            firstname: unique_id.to_string(),
            birthdate: None,
            past_opponents: BTreeSet::new(),
        }
    }

    #[test]
    fn same_player_twice_fails() {
        let alice = player("alice");
        assert_eq!(
            Match::new(&alice, &alice),
            Err(TournamentError::SamePlayer("alice".to_string()))
        );
    }

    #[test]
    fn setting_results_overwrites() -> anyhow::Result<()> {
        let mut game = Match::new(&player("alice"), &player("bob"))?;
        assert_eq!(game.to_string(), "alice vs bob: -");

        game.set_results(MatchResult::FIRST_WINS);
        game.set_results((0.5, 0.5).into());

        assert_eq!(game.result, Some(MatchResult::DRAW));
        assert_eq!(game.to_string(), "alice vs bob: 0.5-0.5");
        assert!(game.involves("bob"));
        assert!(!game.involves("carol"));

        Ok(())
    }

    #[test]
    fn result_codes() -> anyhow::Result<()> {
        assert_eq!("1-0".parse::<MatchResult>()?, MatchResult::FIRST_WINS);
        assert_eq!("0-1".parse::<MatchResult>()?, MatchResult::SECOND_WINS);
        assert_eq!("1/2-1/2".parse::<MatchResult>()?, MatchResult::DRAW);
        assert!("2-0".parse::<MatchResult>().is_err());
        assert_eq!(MatchResult::SECOND_WINS.to_string(), "0-1");

        Ok(())
    }
}
