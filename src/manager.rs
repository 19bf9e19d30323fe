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

use std::str::FromStr;

use log::{info, warn};

use crate::{
    command::{COMMANDS, Command},
    date::format_date,
    error::TournamentError,
    player::{Player, Players},
    store::Store,
    tournament::{Tournament, TournamentField, Tournaments},
};

/// Owns the player and tournament registries and runs commands against them.
#[derive(Debug)]
pub struct Manager<S: Store> {
    pub players: Players,
    pub tournaments: Tournaments,
    pub skip_the_data_files: bool,
    store: S,
}

impl<S: Store> Manager<S> {
    /// Starts with empty registries.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            players: Players::default(),
            tournaments: Tournaments::default(),
            skip_the_data_files: false,
            store,
        }
    }

    /// # Errors
    ///
    /// If the store fails to load.
    pub fn load(store: S) -> anyhow::Result<Self> {
        let players = store.load_players()?;
        let tournaments = store.load_tournaments()?;
        info!(
            "loaded {} players and {} tournaments",
            players.len(),
            tournaments.len()
        );

        Ok(Self {
            players,
            tournaments,
            skip_the_data_files: false,
            store,
        })
    }

    /// # Errors
    ///
    /// If the store fails to save.
    pub fn save(&self) -> anyhow::Result<()> {
        if self.skip_the_data_files {
            return Ok(());
        }

        self.store.save_tournaments(&self.tournaments)?;
        self.store.save_players(&self.players)
    }

    /// # Errors
    ///
    /// If the line isn't a valid command or the command fails.
    pub fn read_line(&mut self, buffer: &str) -> anyhow::Result<Option<String>> {
        self.update(Command::from_str(buffer)?)
    }

    /// Runs a command, returning the status to show the user.
    ///
    /// # Errors
    ///
    /// If the command is refused or saving fails.
    #[allow(clippy::too_many_lines)]
    pub fn update(&mut self, command: Command) -> anyhow::Result<Option<String>> {
        match command {
            Command::Empty => Ok(None),
            Command::ListCommands => Ok(Some(COMMANDS.join("\n"))),
            Command::PlayerCreate(request) => {
                let player = Player::new(request)?;
                let mut message = format!(
                    "player {} created: {}",
                    player.unique_id,
                    player.full_name()
                );
                if player.birthdate.is_none() {
                    message.push_str(", warning: invalid birthdate, expected DD/MM/YYYY");
                }

                self.players.insert(player)?;
                self.save()?;
                Ok(Some(message))
            }
            Command::Players => Ok(Some(self.players.to_string())),
            Command::Register {
                tournament_id,
                player_id,
            } => {
                let player = self
                    .players
                    .get(&player_id)
                    .ok_or_else(|| TournamentError::PlayerNotFound(player_id.clone()))?;
                let tournament = self.tournaments.get_mut(&tournament_id)?;
                tournament.register_player(player)?;

                let message = format!(
                    "{} registered in '{}'",
                    player.full_name(),
                    tournament.name
                );
                self.save()?;
                Ok(Some(message))
            }
            Command::RoundAdd {
                tournament_id,
                round,
            } => {
                self.tournaments
                    .get_mut(&tournament_id)?
                    .add_round(&round, None)?;
                self.save()?;
                Ok(Some(format!("round '{round}' added")))
            }
            Command::RoundEnd {
                tournament_id,
                round,
            } => {
                self.tournaments.get_mut(&tournament_id)?.end_round(&round)?;
                self.save()?;
                Ok(Some(format!("round '{round}' has ended")))
            }
            Command::RoundStart {
                tournament_id,
                round,
            } => {
                self.tournaments
                    .get_mut(&tournament_id)?
                    .start_round(&round)?;
                self.save()?;
                Ok(Some(format!("round '{round}' has started")))
            }
            Command::Save => {
                self.save()?;
                Ok(Some("saved".to_string()))
            }
            Command::Score {
                tournament_id,
                round_index,
                match_index,
                result,
            } => {
                self.tournaments
                    .get_mut(&tournament_id)?
                    .update_result(round_index, match_index, result)?;
                self.save()?;
                Ok(Some(format!(
                    "round {round_index} match {match_index}: {result}"
                )))
            }
            Command::Tournament(tournament_id) => {
                let tournament = self
                    .tournaments
                    .get(&tournament_id)
                    .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
                Ok(Some(tournament.to_string()))
            }
            Command::TournamentCreate(request) => {
                let tournament = Tournament::new(request)?;
                let message = created_message(&tournament);

                info!("tournament '{}' created", tournament.name);
                self.tournaments.push(tournament);
                self.save()?;
                Ok(Some(message))
            }
            Command::TournamentStart(tournament_id) => {
                let tournament = self.tournaments.get_mut(&tournament_id)?;
                tournament.start_tournament()?;

                let message = format!(
                    "tournament '{}' started with {} players and {} rounds",
                    tournament.name,
                    tournament.registered_players.len(),
                    tournament.rounds.len()
                );
                self.save()?;
                Ok(Some(message))
            }
            Command::TournamentUpdate {
                tournament_id,
                field,
            } => {
                let dates = matches!(
                    field,
                    TournamentField::StartDate(_) | TournamentField::EndDate(_)
                );
                let tournament = self.tournaments.get_mut(&tournament_id)?;
                tournament.update(field)?;

                let message = if dates {
                    format!(
                        "tournament updated, dates: {} - {}",
                        format_date(tournament.start_date),
                        format_date(tournament.end_date)
                    )
                } else {
                    "tournament updated".to_string()
                };

                self.save()?;
                Ok(Some(message))
            }
            Command::Tournaments => Ok(Some(self.tournaments.to_string())),
            Command::Quit => {
                self.save()?;
                Ok(Some("bye".to_string()))
            }
        }
    }
}

fn created_message(tournament: &Tournament) -> String {
    let mut message = format!(
        "tournament '{}' created with id {}",
        tournament.name, tournament.id
    );

    if tournament.start_date.is_none() {
        warn!("{}: invalid start date", tournament.id);
        message.push_str(", warning: invalid start date, expected DD/MM/YYYY");
    }
    if tournament.end_date.is_none() {
        warn!("{}: invalid end date", tournament.id);
        message.push_str(", warning: invalid end date, expected DD/MM/YYYY");
    }

    message
}
