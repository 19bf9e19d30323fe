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

use std::{borrow::Cow, str::FromStr};

use anyhow::Context;

use crate::{
    matches::MatchResult,
    player::PlayerRequest,
    tournament::{TournamentField, TournamentRequest},
};

pub const COMMANDS: [&str; 15] = [
    "list_commands",
    "player_create",
    "players",
    "register",
    "round_add",
    "round_end",
    "round_start",
    "save",
    "score",
    "tournament",
    "tournament_create",
    "tournament_start",
    "tournament_update",
    "tournaments",
    "quit",
];

/// One line of input.
///
/// ```sh
/// player_create Polgar | Judit | 23/07/1976 | AB12345
/// tournament_create Spring Open | Lyon | rapid | 01/04/2030 | 05/04/2030
/// register 1a2b3c4d AB12345
/// tournament_start 1a2b3c4d
/// score 1a2b3c4d 0 0 1-0
/// round_end 1a2b3c4d Round 1
/// round_start 1a2b3c4d Round 2
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Empty,
    ListCommands,
    PlayerCreate(PlayerRequest),
    Players,
    Register {
        tournament_id: String,
        player_id: String,
    },
    RoundAdd {
        tournament_id: String,
        round: String,
    },
    RoundEnd {
        tournament_id: String,
        round: String,
    },
    RoundStart {
        tournament_id: String,
        round: String,
    },
    Save,
    Score {
        tournament_id: String,
        round_index: usize,
        match_index: usize,
        result: MatchResult,
    },
    Tournament(String),
    TournamentCreate(TournamentRequest),
    TournamentStart(String),
    TournamentUpdate {
        tournament_id: String,
        field: TournamentField,
    },
    Tournaments,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        let mut string = Cow::from(string);
        if let Some(comment_offset) = string.find('#') {
            string.to_mut().replace_range(comment_offset.., "");
        }

        let string = string.trim();
        let (command, the_rest) = string
            .split_once(char::is_whitespace)
            .map_or((string, ""), |(command, the_rest)| (command, the_rest.trim()));

        match command {
            "" => Ok(Self::Empty),
            "list_commands" => Ok(Self::ListCommands),
            "player_create" => player_create(the_rest),
            "players" => Ok(Self::Players),
            "register" => {
                let (tournament_id, player_id) = id_and_rest(command, the_rest)?;
                Ok(Self::Register {
                    tournament_id,
                    player_id,
                })
            }
            "round_add" => {
                let (tournament_id, round) = id_and_rest(command, the_rest)?;
                Ok(Self::RoundAdd {
                    tournament_id,
                    round,
                })
            }
            "round_end" => {
                let (tournament_id, round) = id_and_rest(command, the_rest)?;
                Ok(Self::RoundEnd {
                    tournament_id,
                    round,
                })
            }
            "round_start" => {
                let (tournament_id, round) = id_and_rest(command, the_rest)?;
                Ok(Self::RoundStart {
                    tournament_id,
                    round,
                })
            }
            "save" => Ok(Self::Save),
            "score" => score(the_rest),
            "tournament" => Ok(Self::Tournament(id(command, the_rest)?)),
            "tournament_create" => tournament_create(the_rest),
            "tournament_start" => Ok(Self::TournamentStart(id(command, the_rest)?)),
            "tournament_update" => tournament_update(the_rest),
            "tournaments" => Ok(Self::Tournaments),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(anyhow::Error::msg(format!("unknown command: {command}"))),
        }
    }
}

fn fields(the_rest: &str) -> Vec<&str> {
    the_rest.split('|').map(str::trim).collect()
}

fn id(command: &str, the_rest: &str) -> anyhow::Result<String> {
    match the_rest.split_ascii_whitespace().next() {
        Some(id) => Ok(id.to_string()),
        None => Err(anyhow::Error::msg(format!("{command}: expected a tournament id"))),
    }
}

fn id_and_rest(command: &str, the_rest: &str) -> anyhow::Result<(String, String)> {
    match the_rest.split_once(char::is_whitespace) {
        Some((id, rest)) if !rest.trim().is_empty() => Ok((id.to_string(), rest.trim().to_string())),
        _ => Err(anyhow::Error::msg(format!(
            "{command}: expected a tournament id and a name"
        ))),
    }
}

fn player_create(the_rest: &str) -> anyhow::Result<Command> {
    let fields = fields(the_rest);
    let err_msg = "expected: 'player_create NAME | FIRSTNAME | BIRTHDATE [| UNIQUE_ID]'";

    match fields.as_slice() {
        [name, firstname, birthdate] | [name, firstname, birthdate, ""] => {
            Ok(Command::PlayerCreate(PlayerRequest {
                name: (*name).to_string(),
                firstname: (*firstname).to_string(),
                birthdate: (*birthdate).to_string(),
                unique_id: None,
            }))
        }
        [name, firstname, birthdate, unique_id] => Ok(Command::PlayerCreate(PlayerRequest {
            name: (*name).to_string(),
            firstname: (*firstname).to_string(),
            birthdate: (*birthdate).to_string(),
            unique_id: Some((*unique_id).to_string()),
        })),
        _ => Err(anyhow::Error::msg(err_msg)),
    }
}

fn tournament_create(the_rest: &str) -> anyhow::Result<Command> {
    let fields = fields(the_rest);
    let err_msg = "expected: 'tournament_create NAME | LOCATION | DESCRIPTION | START | END [| TOTAL_ROUND]'";

    let (request, total_round) = match fields.as_slice() {
        [name, location, description, start_date, end_date] => (
            (name, location, description, start_date, end_date),
            None,
        ),
        [name, location, description, start_date, end_date, total_round] => (
            (name, location, description, start_date, end_date),
            Some(
                total_round
                    .parse::<usize>()
                    .context("tournament_create: TOTAL_ROUND is not an integer")?,
            ),
        ),
        _ => return Err(anyhow::Error::msg(err_msg)),
    };

    let (name, location, description, start_date, end_date) = request;
    Ok(Command::TournamentCreate(TournamentRequest {
        id: None,
        name: (*name).to_string(),
        location: (*location).to_string(),
        description: (*description).to_string(),
        start_date: (*start_date).to_string(),
        end_date: (*end_date).to_string(),
        total_round,
    }))
}

fn tournament_update(the_rest: &str) -> anyhow::Result<Command> {
    let err_msg =
        "expected: 'tournament_update ID name|location|description|start_date|end_date VALUE'";

    let (tournament_id, the_rest) = the_rest
        .split_once(char::is_whitespace)
        .ok_or(anyhow::Error::msg(err_msg))?;
    let the_rest = the_rest.trim();
    let (field, value) = the_rest
        .split_once(char::is_whitespace)
        .map_or((the_rest, ""), |(field, value)| (field, value.trim()));
    let value = value.to_string();

    let field = match field {
        "name" => TournamentField::Name(value),
        "location" => TournamentField::Location(value),
        "description" => TournamentField::Description(value),
        "start_date" => TournamentField::StartDate(value),
        "end_date" => TournamentField::EndDate(value),
        _ => return Err(anyhow::Error::msg(err_msg)),
    };

    Ok(Command::TournamentUpdate {
        tournament_id: tournament_id.to_string(),
        field,
    })
}

fn score(the_rest: &str) -> anyhow::Result<Command> {
    let err_msg = "expected: 'score ID ROUND_INDEX MATCH_INDEX (SCORE1 SCORE2 | 1-0 | 0-1 | 0.5-0.5)'";
    let args: Vec<_> = the_rest.split_ascii_whitespace().collect();

    let (tournament_id, round_index, match_index, result) = match args.as_slice() {
        [tournament_id, round_index, match_index, code] => (
            tournament_id,
            round_index,
            match_index,
            code.parse::<MatchResult>()?,
        ),
        [tournament_id, round_index, match_index, score1, score2] => (
            tournament_id,
            round_index,
            match_index,
            MatchResult::new(
                score1.parse().context("score: SCORE1 is not a number")?,
                score2.parse().context("score: SCORE2 is not a number")?,
            ),
        ),
        _ => return Err(anyhow::Error::msg(err_msg)),
    };

    Ok(Command::Score {
        tournament_id: (*tournament_id).to_string(),
        round_index: round_index
            .parse()
            .context("score: ROUND_INDEX is not an integer")?,
        match_index: match_index
            .parse()
            .context("score: MATCH_INDEX is not an integer")?,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines() -> anyhow::Result<()> {
        assert_eq!(Command::from_str("")?, Command::Empty);
        assert_eq!(Command::from_str("   # nothing here")?, Command::Empty);
        assert_eq!(Command::from_str("players # list them")?, Command::Players);

        Ok(())
    }

    #[test]
    fn player_create_fields() -> anyhow::Result<()> {
        assert_eq!(
            Command::from_str("player_create Polgar | Judit | 23/07/1976 | AB12345")?,
            Command::PlayerCreate(PlayerRequest {
                name: "Polgar".to_string(),
                firstname: "Judit".to_string(),
                birthdate: "23/07/1976".to_string(),
                unique_id: Some("AB12345".to_string()),
            })
        );

        assert!(matches!(
            Command::from_str("player_create Polgar | Judit | 23/07/1976")?,
            Command::PlayerCreate(PlayerRequest {
                unique_id: None,
                ..
            })
        ));
        assert!(Command::from_str("player_create Polgar").is_err());

        Ok(())
    }

    #[test]
    fn tournament_create_fields() -> anyhow::Result<()> {
        let command =
            Command::from_str("tournament_create Spring Open | Lyon | two days | 01/04/2030 | 02/04/2030 | 5")?;

        assert_eq!(
            command,
            Command::TournamentCreate(TournamentRequest {
                id: None,
                name: "Spring Open".to_string(),
                location: "Lyon".to_string(),
                description: "two days".to_string(),
                start_date: "01/04/2030".to_string(),
                end_date: "02/04/2030".to_string(),
                total_round: Some(5),
            })
        );
        assert!(
            Command::from_str("tournament_create a | b | c | 01/04/2030 | 02/04/2030 | x").is_err()
        );

        Ok(())
    }

    #[test]
    fn round_names_keep_spaces() -> anyhow::Result<()> {
        assert_eq!(
            Command::from_str("round_start t1 Round 2")?,
            Command::RoundStart {
                tournament_id: "t1".to_string(),
                round: "Round 2".to_string(),
            }
        );
        assert!(Command::from_str("round_end t1").is_err());

        Ok(())
    }

    #[test]
    fn scores_and_codes() -> anyhow::Result<()> {
        assert_eq!(
            Command::from_str("score t1 0 1 0.5 0.5")?,
            Command::Score {
                tournament_id: "t1".to_string(),
                round_index: 0,
                match_index: 1,
                result: MatchResult::DRAW,
            }
        );
        assert_eq!(
            Command::from_str("score t1 2 0 0-1")?,
            Command::Score {
                tournament_id: "t1".to_string(),
                round_index: 2,
                match_index: 0,
                result: MatchResult::SECOND_WINS,
            }
        );
        assert!(Command::from_str("score t1 x 0 1-0").is_err());
        assert!(Command::from_str("score t1 0 0").is_err());

        Ok(())
    }

    #[test]
    fn tournament_update_fields() -> anyhow::Result<()> {
        assert_eq!(
            Command::from_str("tournament_update t1 location Paris, France")?,
            Command::TournamentUpdate {
                tournament_id: "t1".to_string(),
                field: TournamentField::Location("Paris, France".to_string()),
            }
        );
        assert!(Command::from_str("tournament_update t1 rounds 3").is_err());

        Ok(())
    }

    #[test]
    fn unknown_commands() {
        assert!(Command::from_str("resign").is_err());
        assert!(Command::from_str("tournament").is_err());
    }
}
