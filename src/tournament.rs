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

use std::{collections::VecDeque, fmt};

use chrono::{Local, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::{
    date::{format_date, parse_date, serde_date},
    error::{TournamentError, ValidationError},
    generate_id,
    matches::{Match, MatchResult},
    player::Player,
    round::Round,
};

pub const DEFAULT_TOTAL_ROUND: usize = 4;
const MIN_PLAYERS: usize = 2;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    #[serde(with = "serde_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(with = "serde_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub current_round: usize,
    pub total_round: usize,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub registered_players: Vec<Player>,
}

/// The raw fields collected when creating a tournament.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TournamentRequest {
    pub id: Option<String>,
    pub name: String,
    pub location: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub total_round: Option<usize>,
}

impl TryFrom<TournamentRequest> for Tournament {
    type Error = ValidationError;

    fn try_from(request: TournamentRequest) -> Result<Self, Self::Error> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty("name"));
        }

        let total_round = request.total_round.unwrap_or(DEFAULT_TOTAL_ROUND);
        if total_round == 0 {
            return Err(ValidationError::TotalRound);
        }

        let id = match request.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => generate_id(),
        };

        Ok(Self {
            id,
            name: name.to_string(),
            location: request.location.trim().to_string(),
            description: request.description.trim().to_string(),
            start_date: parse_date(&request.start_date),
            end_date: parse_date(&request.end_date),
            current_round: 0,
            total_round,
            rounds: Vec::new(),
            registered_players: Vec::new(),
        })
    }
}

/// An edit of one descriptive field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentField {
    Name(String),
    Location(String),
    Description(String),
    StartDate(String),
    EndDate(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TournamentStatus {
    NotStarted,
    Active,
    Completed,
    Expired,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

impl Tournament {
    /// # Errors
    ///
    /// If the name is blank or `total_round` is zero.
    pub fn new(request: TournamentRequest) -> Result<Self, ValidationError> {
        Self::try_from(request)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active_on(Local::now().date_naive())
    }

    fn is_active_on(&self, today: NaiveDate) -> bool {
        self.current_round < self.total_round && self.end_date.is_some_and(|end| end > today)
    }

    #[must_use]
    pub fn status(&self) -> TournamentStatus {
        if self.current_round >= self.total_round && !self.rounds.is_empty() {
            TournamentStatus::Completed
        } else if !self.is_active() {
            TournamentStatus::Expired
        } else if self.rounds.is_empty() {
            TournamentStatus::NotStarted
        } else {
            TournamentStatus::Active
        }
    }

    #[must_use]
    pub fn player(&self, unique_id: &str) -> Option<&Player> {
        self.registered_players
            .iter()
            .find(|player| player.unique_id == unique_id)
    }

    #[must_use]
    pub fn round(&self, name: &str) -> Option<&Round> {
        self.rounds.iter().find(|round| round.name == name)
    }

    /// Replaces the rounds with one round per potential opponent: `P - 1`
    /// rounds for an even number of players, `P` for an odd number.
    pub fn initialize_rounds(&mut self) {
        let players = self.registered_players.len();
        let number_of_rounds = if players % 2 == 0 {
            players.saturating_sub(1)
        } else {
            players
        };

        self.rounds = (1..=number_of_rounds)
            .map(|number| Round::new(&format!("Round {number}"), None))
            .collect();
        self.total_round = number_of_rounds;
    }

    pub fn generate_matches(&mut self) {
        self.generate_matches_with(&mut rand::rng());
    }

    /// Pairs the registered players for every round, avoiding rematches.
    pub fn generate_matches_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for round in &mut self.rounds {
            let (matches, bye) = pair_round(&mut self.registered_players, rng);

            for game in &matches {
                debug!("{}: {} vs {}", round.name, game.players.0, game.players.1);
            }
            if let Some(bye) = &bye {
                info!("{bye} has a bye in '{}'", round.name);
            }

            round.matches.extend(matches);
            round.bye = bye;
        }
    }

    /// # Errors
    ///
    /// If fewer than two players are registered.
    pub fn start_tournament(&mut self) -> Result<(), TournamentError> {
        self.start_tournament_with(&mut rand::rng())
    }

    /// Creates every round, pairs all of them upfront and starts the first.
    /// Starting again replaces the rounds and every opponent history.
    ///
    /// # Errors
    ///
    /// If fewer than two players are registered.
    pub fn start_tournament_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), TournamentError> {
        let players = self.registered_players.len();
        if players < MIN_PLAYERS {
            warn!("{}: not enough players to start", self.id);
            return Err(TournamentError::NotEnoughPlayers(players));
        }

        if !self.rounds.is_empty() {
            warn!("{}: restarting, the previous rounds are discarded", self.id);
        }
        for player in &mut self.registered_players {
            player.past_opponents.clear();
        }

        self.initialize_rounds();
        self.current_round = 0;
        self.generate_matches_with(rng);

        if let Some(round) = self.rounds.first_mut() {
            round.start_time = Some(Local::now().naive_local());
        }

        info!(
            "tournament '{}' started with {players} players and {} rounds",
            self.name,
            self.rounds.len()
        );
        Ok(())
    }

    /// Adds a copy of the player with a fresh opponent history.
    ///
    /// # Errors
    ///
    /// If the tournament is not active or the player is already registered.
    pub fn register_player(&mut self, player: &Player) -> Result<(), TournamentError> {
        self.check_active()?;

        if self.player(&player.unique_id).is_some() {
            warn!("{}: {} is already registered", self.id, player.unique_id);
            return Err(TournamentError::AlreadyRegistered(player.full_name()));
        }

        let mut player = player.clone();
        player.past_opponents.clear();
        info!("{} joined tournament '{}'", player.full_name(), self.name);
        self.registered_players.push(player);

        Ok(())
    }

    /// # Errors
    ///
    /// If the tournament is not active or a round with that name exists.
    pub fn add_round(
        &mut self,
        name: &str,
        start_time: Option<NaiveDateTime>,
    ) -> Result<(), TournamentError> {
        self.check_active()?;

        if self.round(name).is_some() {
            return Err(TournamentError::DuplicateRound(name.to_string()));
        }

        self.rounds.push(Round::new(name, start_time));
        info!("round '{name}' added to tournament '{}'", self.name);
        Ok(())
    }

    /// # Errors
    ///
    /// If the tournament is not active, the round doesn't exist, the round
    /// before it isn't complete, or it has already started.
    pub fn start_round(&mut self, name: &str) -> Result<(), TournamentError> {
        self.check_active()?;

        let index = self.round_index(name)?;

        if let Some(previous) = index.checked_sub(1).and_then(|i| self.rounds.get(i))
            && !previous.is_complete
        {
            warn!("{}: cannot start '{name}', previous round not completed", self.id);
            return Err(TournamentError::PreviousRoundIncomplete(name.to_string()));
        }

        self.rounds
            .get_mut(index)
            .ok_or_else(|| TournamentError::RoundNotFound(name.to_string()))?
            .start()
    }

    /// Ends the round. The current round becomes the first one not yet
    /// complete.
    ///
    /// # Errors
    ///
    /// If the round doesn't exist or is already complete.
    pub fn end_round(&mut self, name: &str) -> Result<(), TournamentError> {
        let index = self.round_index(name)?;

        self.rounds
            .get_mut(index)
            .ok_or_else(|| TournamentError::RoundNotFound(name.to_string()))?
            .end()?;

        self.current_round = self
            .rounds
            .iter()
            .take_while(|round| round.is_complete)
            .count();

        Ok(())
    }

    /// # Errors
    ///
    /// If either index is out of range.
    pub fn update_scores(
        &mut self,
        round_index: usize,
        match_index: usize,
        score1: f64,
        score2: f64,
    ) -> Result<(), TournamentError> {
        self.update_result(round_index, match_index, MatchResult::new(score1, score2))
    }

    /// # Errors
    ///
    /// If either index is out of range.
    pub fn update_result(
        &mut self,
        round_index: usize,
        match_index: usize,
        result: MatchResult,
    ) -> Result<(), TournamentError> {
        let round = self
            .rounds
            .get_mut(round_index)
            .ok_or(TournamentError::RoundIndex(round_index))?;

        let game = round
            .matches
            .get_mut(match_index)
            .ok_or(TournamentError::MatchIndex {
                round_index,
                match_index,
            })?;

        game.set_results(result);
        info!("{}: {} result {game}", self.id, round.name);
        Ok(())
    }

    /// # Errors
    ///
    /// If the new name is blank.
    pub fn update(&mut self, field: TournamentField) -> Result<(), ValidationError> {
        match field {
            TournamentField::Name(name) => {
                if name.trim().is_empty() {
                    return Err(ValidationError::Empty("name"));
                }
                self.name = name.trim().to_string();
            }
            TournamentField::Location(location) => self.location = location.trim().to_string(),
            TournamentField::Description(description) => {
                self.description = description.trim().to_string();
            }
            TournamentField::StartDate(date) => self.start_date = parse_date(&date),
            TournamentField::EndDate(date) => self.end_date = parse_date(&date),
        }

        Ok(())
    }

    fn check_active(&self) -> Result<(), TournamentError> {
        if self.is_active() {
            Ok(())
        } else {
            warn!("{}: the tournament '{}' is not active", self.id, self.name);
            Err(TournamentError::NotActive(self.name.clone()))
        }
    }

    fn round_index(&self, name: &str) -> Result<usize, TournamentError> {
        self.rounds
            .iter()
            .position(|round| round.name == name)
            .ok_or_else(|| TournamentError::RoundNotFound(name.to_string()))
    }
}

/// Greedily pairs a shuffled copy of the pool.
///
/// A player with no legal opponent left goes to the back of the pool. When a
/// whole pass over the pool pairs nobody, the first two players are paired
/// even though they already met.
fn pair_round<R: Rng + ?Sized>(
    players: &mut [Player],
    rng: &mut R,
) -> (Vec<Match>, Option<String>) {
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.shuffle(rng);

    let mut pool = VecDeque::from(order);
    let mut matches = Vec::new();
    let mut requeued = 0;

    while pool.len() > 1 {
        let Some(first) = pool.pop_front() else {
            break;
        };

        let opponent = pool
            .iter()
            .position(|&second| !have_played(players, first, second));

        let second = match opponent {
            Some(position) => pool.remove(position),
            None if requeued < pool.len() => {
                pool.push_back(first);
                requeued += 1;
                continue;
            }
            None => {
                let second = pool.pop_front();
                if let Some(second) = second {
                    warn!(
                        "no new opponent left, forcing a rematch: {} vs {}",
                        unique_id(players, first),
                        unique_id(players, second)
                    );
                }
                second
            }
        };

        requeued = 0;
        if let Some(second) = second
            && let Some(game) = record_pairing(players, first, second)
        {
            matches.push(game);
        }
    }

    let bye = pool
        .pop_front()
        .and_then(|index| players.get(index))
        .map(|player| player.unique_id.clone());

    (matches, bye)
}

fn have_played(players: &[Player], first: usize, second: usize) -> bool {
    match (players.get(first), players.get(second)) {
        (Some(first), Some(second)) => first.has_played(&second.unique_id),
        _ => false,
    }
}

fn unique_id(players: &[Player], index: usize) -> &str {
    players
        .get(index)
        .map_or("?", |player| player.unique_id.as_str())
}

fn record_pairing(players: &mut [Player], first: usize, second: usize) -> Option<Match> {
    let game = match Match::new(players.get(first)?, players.get(second)?) {
        Ok(game) => game,
        Err(err) => {
            warn!("dropping a pairing: {err}");
            return None;
        }
    };

    players.get_mut(first)?.add_opponent(&game.players.1);
    players.get_mut(second)?.add_opponent(&game.players.0);

    Some(game)
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.id, self.name)?;
        writeln!(f, "location: {}", self.location)?;
        writeln!(f, "description: {}", self.description)?;
        writeln!(
            f,
            "dates: {} - {}",
            format_date(self.start_date),
            format_date(self.end_date)
        )?;
        writeln!(f, "status: {}", self.status())?;
        writeln!(f, "round: {}/{}", self.current_round, self.total_round)?;

        writeln!(f, "players: {}", self.registered_players.len())?;
        for player in &self.registered_players {
            writeln!(f, "  {player}")?;
        }

        for round in &self.rounds {
            write!(f, "{round}")?;
        }

        Ok(())
    }
}

/// The tournament registry.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Tournaments(pub Vec<Tournament>);

impl Tournaments {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Tournament> {
        self.0.iter().find(|tournament| tournament.id == id)
    }

    /// # Errors
    ///
    /// If no tournament has that id.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut Tournament, TournamentError> {
        self.0
            .iter_mut()
            .find(|tournament| tournament.id == id)
            .ok_or_else(|| TournamentError::TournamentNotFound(id.to_string()))
    }

    pub fn push(&mut self, tournament: Tournament) {
        self.0.push(tournament);
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

impl fmt::Display for Tournaments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tournaments = Vec::new();
        for tournament in &self.0 {
            tournaments.push(format!(
                "{} {} | {} | {} - {} | {} | {} players",
                tournament.id,
                tournament.name,
                tournament.location,
                format_date(tournament.start_date),
                format_date(tournament.end_date),
                tournament.status(),
                tournament.registered_players.len(),
            ));
        }

        write!(f, "{}", tournaments.join("\n"))
    }
}
