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

use std::{collections::BTreeSet, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    date::{format_date, parse_date, serde_date},
    error::{TournamentError, ValidationError},
    generate_id,
};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Player {
    pub unique_id: String,
    pub name: String,
    pub firstname: String,
    #[serde(with = "serde_date")]
    pub birthdate: Option<NaiveDate>,
    /// Ids of the players already faced in the current tournament.
    #[serde(default)]
    pub past_opponents: BTreeSet<String>,
}

impl Player {
    /// # Errors
    ///
    /// If the name or first name is blank.
    pub fn new(request: PlayerRequest) -> Result<Self, ValidationError> {
        Self::try_from(request)
    }

    #[must_use]
    pub fn has_played(&self, opponent_id: &str) -> bool {
        self.past_opponents.contains(opponent_id)
    }

    pub fn add_opponent(&mut self, opponent_id: &str) {
        self.past_opponents.insert(opponent_id.to_string());
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.name)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.unique_id,
            self.firstname,
            self.name,
            format_date(self.birthdate)
        )
    }
}

/// The raw fields collected when creating a player.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlayerRequest {
    pub name: String,
    pub firstname: String,
    pub birthdate: String,
    pub unique_id: Option<String>,
}

impl TryFrom<PlayerRequest> for Player {
    type Error = ValidationError;

    fn try_from(request: PlayerRequest) -> Result<Self, Self::Error> {
        let name = request.name.trim();
        let firstname = request.firstname.trim();

        if name.is_empty() {
            return Err(ValidationError::Empty("name"));
        }
        if firstname.is_empty() {
            return Err(ValidationError::Empty("firstname"));
        }

        let unique_id = match request.unique_id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => generate_id(),
        };

        Ok(Self {
            unique_id,
            name: name.to_string(),
            firstname: firstname.to_string(),
            birthdate: parse_date(&request.birthdate),
            past_opponents: BTreeSet::new(),
        })
    }
}

/// The player registry.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Players(pub Vec<Player>);

impl Players {
    #[must_use]
    pub fn get(&self, unique_id: &str) -> Option<&Player> {
        self.0.iter().find(|player| player.unique_id == unique_id)
    }

    /// # Errors
    ///
    /// If a player with the same id is already in the registry.
    pub fn insert(&mut self, player: Player) -> Result<(), TournamentError> {
        if self.get(&player.unique_id).is_some() {
            return Err(TournamentError::DuplicatePlayer(player.unique_id));
        }

        self.0.push(player);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Players {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let players: Vec<_> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", players.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(unique_id: Option<&str>) -> PlayerRequest {
        PlayerRequest {
            name: "Polgar".to_string(),
            firstname: "Judit".to_string(),
            birthdate: "23/07/1976".to_string(),
            unique_id: unique_id.map(ToString::to_string),
        }
    }

    #[test]
    fn new_player_keeps_supplied_id() -> anyhow::Result<()> {
        let player = Player::new(request(Some("AB12345")))?;

        assert_eq!(player.unique_id, "AB12345");
        assert_eq!(player.birthdate, NaiveDate::from_ymd_opt(1976, 7, 23));
        assert!(player.past_opponents.is_empty());

        Ok(())
    }

    #[test]
    fn blank_id_is_generated() -> anyhow::Result<()> {
        let player = Player::new(request(Some("  ")))?;
        assert_eq!(player.unique_id.len(), 8);

        let player = Player::new(request(None))?;
        assert_eq!(player.unique_id.len(), 8);

        Ok(())
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut blank_name = request(None);
        blank_name.name = " ".to_string();
        assert_eq!(Player::new(blank_name), Err(ValidationError::Empty("name")));

        let mut blank_firstname = request(None);
        blank_firstname.firstname = String::new();
        assert_eq!(
            Player::new(blank_firstname),
            Err(ValidationError::Empty("firstname"))
        );
    }

    #[test]
    fn invalid_birthdate_is_null() -> anyhow::Result<()> {
        let mut bad_date = request(None);
        bad_date.birthdate = "1976-07-23".to_string();

        let player = Player::new(bad_date)?;
        assert_eq!(player.birthdate, None);
        assert!(player.to_string().ends_with("Invalid date"));

        Ok(())
    }

    #[test]
    fn registry_rejects_duplicate_ids() -> anyhow::Result<()> {
        let mut players = Players::default();
        players.insert(Player::new(request(Some("p1")))?)?;

        assert_eq!(
            players.insert(Player::new(request(Some("p1")))?),
            Err(TournamentError::DuplicatePlayer("p1".to_string()))
        );
        assert_eq!(players.len(), 1);

        Ok(())
    }
}
