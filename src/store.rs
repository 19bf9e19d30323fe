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

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::debug;
use ron::ser::PrettyConfig;
use serde::{Serialize, de::DeserializeOwned};

use crate::{HOME, player::Players, tournament::Tournaments};

pub const PLAYERS_FILE: &str = "players.ron";
pub const TOURNAMENTS_FILE: &str = "tournaments.ron";

/// Loads and saves whole collections.
pub trait Store {
    /// # Errors
    ///
    /// If the tournaments can't be read or parsed.
    fn load_tournaments(&self) -> anyhow::Result<Tournaments>;

    /// # Errors
    ///
    /// If the tournaments can't be written.
    fn save_tournaments(&self, tournaments: &Tournaments) -> anyhow::Result<()>;

    /// # Errors
    ///
    /// If the players can't be read or parsed.
    fn load_players(&self) -> anyhow::Result<Players>;

    /// # Errors
    ///
    /// If the players can't be written.
    fn save_players(&self, players: &Players) -> anyhow::Result<()>;
}

/// Keeps `players.ron` and `tournaments.ron` in a data folder.
#[derive(Clone, Debug)]
pub struct RonStore {
    data_folder: PathBuf,
}

impl RonStore {
    #[must_use]
    pub fn new(data_folder: PathBuf) -> Self {
        Self { data_folder }
    }

    #[must_use]
    pub fn data_file(&self, file: &str) -> PathBuf {
        self.data_folder.join(file)
    }

    /// # Errors
    ///
    /// If the folder can't be created.
    pub fn create_data_folder(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.data_folder)
            .with_context(|| format!("create_dir_all: {}", self.data_folder.display()))
    }
}

impl Default for RonStore {
    fn default() -> Self {
        Self::new(default_data_folder())
    }
}

impl Store for RonStore {
    fn load_tournaments(&self) -> anyhow::Result<Tournaments> {
        load(&self.data_file(TOURNAMENTS_FILE))
    }

    fn save_tournaments(&self, tournaments: &Tournaments) -> anyhow::Result<()> {
        save(&self.data_file(TOURNAMENTS_FILE), tournaments)
    }

    fn load_players(&self) -> anyhow::Result<Players> {
        load(&self.data_file(PLAYERS_FILE))
    }

    fn save_players(&self, players: &Players) -> anyhow::Result<()> {
        save(&self.data_file(PLAYERS_FILE), players)
    }
}

/// The platform data directory, or the working directory if there is none.
#[must_use]
pub fn default_data_folder() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("."), |folder| folder.join(HOME))
}

fn load<T: DeserializeOwned + Default>(path: &Path) -> anyhow::Result<T> {
    match fs::read_to_string(path) {
        Ok(string) => {
            debug!("loading {}", path.display());
            ron::from_str(&string).with_context(|| format!("RON: {}", path.display()))
        }
        Err(err) => match err.kind() {
            ErrorKind::NotFound => Ok(T::default()),
            _ => Err(anyhow::Error::new(err).context(format!("read: {}", path.display()))),
        },
    }
}

fn save<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let string = ron::ser::to_string_pretty(value, PrettyConfig::default())?;
    fs::write(path, string).with_context(|| format!("write: {}", path.display()))?;
    debug!("saved {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::{generate_id, player::Player};

    use super::*;

    fn store() -> anyhow::Result<RonStore> {
        let store = RonStore::new(std::env::temp_dir().join(format!("{HOME}-{}", generate_id())));
        store.create_data_folder()?;
        Ok(store)
    }

    #[test]
    fn missing_files_load_empty() -> anyhow::Result<()> {
        let store = store()?;

        assert!(store.load_players()?.is_empty());
        assert!(store.load_tournaments()?.is_empty());

        Ok(())
    }

    #[test]
    fn malformed_files_name_the_file() -> anyhow::Result<()> {
        let store = store()?;
        fs::write(store.data_file(PLAYERS_FILE), "not ron at all (")?;

        let result = store.load_players();
        assert!(result.is_err());
        if let Err(err) = result {
            assert!(err.to_string().contains(PLAYERS_FILE));
        }

        Ok(())
    }

    #[test]
    fn players_round_trip() -> anyhow::Result<()> {
        let store = store()?;
        let players = Players(vec![Player {
            unique_id: "AB12345".to_string(),
            name: "Polgar".to_string(),
            firstname: "Judit".to_string(),
            birthdate: crate::date::parse_date("23/07/1976"),
            past_opponents: BTreeSet::from(["CD67890".to_string()]),
        }]);

        store.save_players(&players)?;
        assert_eq!(store.load_players()?, players);

        Ok(())
    }
}
