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

#![allow(clippy::indexing_slicing)]

use std::collections::BTreeSet;

use chess_tournament::{
    HOME, generate_id,
    manager::Manager,
    matches::MatchResult,
    player::{Player, PlayerRequest, Players},
    store::{RonStore, Store},
    tournament::{Tournament, TournamentRequest, Tournaments},
};
use rand::{SeedableRng, rngs::StdRng};

fn store() -> anyhow::Result<RonStore> {
    let store = RonStore::new(std::env::temp_dir().join(format!("{HOME}-it-{}", generate_id())));
    store.create_data_folder()?;
    Ok(store)
}

fn players() -> anyhow::Result<Vec<Player>> {
    let mut players = Vec::new();
    for (name, firstname, birthdate, id) in [
        ("Carlsen", "Magnus", "30/11/1990", "NO001"),
        ("Hou", "Yifan", "27/02/1994", "CN002"),
        ("Vachier-Lagrave", "Maxime", "21/10/1990", "FR003"),
        ("Polgar", "Judit", "23/07/1976", "HU004"),
    ] {
        players.push(Player::new(PlayerRequest {
            name: name.to_string(),
            firstname: firstname.to_string(),
            birthdate: birthdate.to_string(),
            unique_id: Some(id.to_string()),
        })?);
    }

    Ok(players)
}

fn open_tournament() -> anyhow::Result<Tournament> {
    Ok(Tournament::new(TournamentRequest {
        id: None,
        name: "Grand Prix".to_string(),
        location: "Paris".to_string(),
        description: "classical".to_string(),
        start_date: "01/01/2026".to_string(),
        end_date: "31/12/2099".to_string(),
        total_round: None,
    })?)
}

#[test]
fn four_player_tournament() -> anyhow::Result<()> {
    let mut tournament = open_tournament()?;
    for player in &players()? {
        tournament.register_player(player)?;
    }

    tournament.start_tournament_with(&mut StdRng::seed_from_u64(2026))?;

    assert_eq!(tournament.rounds.len(), 3);
    let first = &tournament.rounds[0];
    assert!(first.start_time.is_some());
    assert_eq!(first.matches.len(), 2);

    for player in &tournament.registered_players {
        let appearances = first
            .matches
            .iter()
            .filter(|game| game.involves(&player.unique_id))
            .count();
        assert_eq!(appearances, 1, "{}", player.unique_id);
    }

    Ok(())
}

#[test]
fn tournament_round_trip() -> anyhow::Result<()> {
    let store = store()?;

    let mut tournament = open_tournament()?;
    for player in &players()? {
        tournament.register_player(player)?;
    }
    tournament.add_round("Round 1", None)?;
    tournament.add_round("Round 2", None)?;
    tournament.generate_matches_with(&mut StdRng::seed_from_u64(4));
    tournament.start_round("Round 1")?;
    tournament.update_scores(0, 0, 1.0, 0.0)?;
    tournament.update_scores(0, 1, 0.5, 0.5)?;
    tournament.end_round("Round 1")?;

    let tournaments = Tournaments(vec![tournament]);
    store.save_tournaments(&tournaments)?;
    let loaded = store.load_tournaments()?;

    assert_eq!(loaded, tournaments);

    let loaded = &loaded.0[0];
    assert_eq!(loaded.rounds[0].matches[1].result, Some(MatchResult::DRAW));
    assert!(loaded.rounds[0].is_complete);
    assert_eq!(loaded.current_round, 1);
    assert_eq!(
        loaded.start_date.map(|date| date.to_string()),
        Some("2026-01-01".to_string())
    );
    assert!(
        loaded
            .registered_players
            .iter()
            .all(|player| player.past_opponents.len() == 2)
    );

    Ok(())
}

#[test]
fn invalid_dates_survive_a_round_trip() -> anyhow::Result<()> {
    let store = store()?;

    let tournament = Tournament::new(TournamentRequest {
        name: "Undated".to_string(),
        start_date: "soon".to_string(),
        end_date: "later".to_string(),
        ..TournamentRequest::default()
    })?;
    let tournaments = Tournaments(vec![tournament]);

    store.save_tournaments(&tournaments)?;
    assert_eq!(store.load_tournaments()?, tournaments);

    Ok(())
}

#[test]
fn registry_players_keep_their_history() -> anyhow::Result<()> {
    let mut players = Players::default();
    for player in players_with_history()? {
        players.insert(player)?;
    }

    let mut tournament = open_tournament()?;
    for player in &players.0 {
        tournament.register_player(player)?;
    }

    assert!(
        tournament
            .registered_players
            .iter()
            .all(|player| player.past_opponents.is_empty())
    );
    assert!(players.0.iter().all(|player| !player.past_opponents.is_empty()));

    Ok(())
}

fn players_with_history() -> anyhow::Result<Vec<Player>> {
    let mut players = players()?;
    for player in &mut players {
        player.past_opponents = BTreeSet::from(["XX999".to_string()]);
    }
    Ok(players)
}

#[test]
fn commands_persist_between_sessions() -> anyhow::Result<()> {
    let store = store()?;
    let mut manager = Manager::load(store.clone())?;

    manager.read_line("player_create Carlsen | Magnus | 30/11/1990 | NO001")?;
    manager.read_line("player_create Hou | Yifan | 27/02/1994 | CN002")?;
    manager.read_line("player_create Polgar | Judit | 23/07/1976 | HU004")?;
    manager.read_line("tournament_create Blitz | Oslo | evening | 01/01/2026 | 31/12/2099")?;

    let id = manager.tournaments.0[0].id.clone();
    for player in ["NO001", "CN002", "HU004"] {
        manager.read_line(&format!("register {id} {player}"))?;
    }
    manager.read_line(&format!("tournament_start {id}"))?;
    manager.read_line(&format!("score {id} 0 0 0-1"))?;
    manager.read_line(&format!("tournament_update {id} name Night Blitz"))?;
    manager.read_line("quit")?;

    let reloaded = Manager::load(store)?;
    let tournament = reloaded
        .tournaments
        .get(&id)
        .ok_or(anyhow::Error::msg("tournament not saved"))?;

    assert_eq!(reloaded.players.len(), 3);
    assert_eq!(tournament.name, "Night Blitz");
    assert_eq!(tournament.rounds.len(), 3);
    assert_eq!(
        tournament.rounds[0].matches[0].result,
        Some(MatchResult::SECOND_WINS)
    );
    assert!(tournament.rounds.iter().all(|round| round.bye.is_some()));

    Ok(())
}
