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

use thiserror::Error;

/// A refused operation. The state it was called on is left unchanged.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TournamentError {
    #[error("the tournament '{0}' is not active or has already ended")]
    NotActive(String),
    #[error("not enough players to start the tournament: {0} registered, at least 2 needed")]
    NotEnoughPlayers(usize),
    #[error("cannot start '{0}': the previous round is not completed")]
    PreviousRoundIncomplete(String),
    #[error("no round named '{0}' found")]
    RoundNotFound(String),
    #[error("a round named '{0}' already exists")]
    DuplicateRound(String),
    #[error("round '{0}' has already started")]
    RoundAlreadyStarted(String),
    #[error("round '{0}' has already been completed")]
    RoundAlreadyComplete(String),
    #[error("{0} is already registered in this tournament")]
    AlreadyRegistered(String),
    #[error("a match needs two different players, got '{0}' twice")]
    SamePlayer(String),
    #[error("no tournament with id '{0}'")]
    TournamentNotFound(String),
    #[error("no player with id '{0}'")]
    PlayerNotFound(String),
    #[error("a player with id '{0}' already exists")]
    DuplicatePlayer(String),
    /// The caller looked up a round that doesn't exist.
    #[error("round index {0} is out of range")]
    RoundIndex(usize),
    /// The caller looked up a match that doesn't exist.
    #[error("match index {match_index} is out of range for round {round_index}")]
    MatchIndex {
        round_index: usize,
        match_index: usize,
    },
}

/// A construction request that can't produce a valid entity.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("total_round must be at least 1")]
    TotalRound,
}
