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

use std::{io::Write as _, path::PathBuf};

use chess_tournament::{COPYRIGHT, LONG_VERSION};
use clap::{CommandFactory, Parser};

/// Chess Tournament Manager
///
/// Reads one command per line on stdin. Enter 'list_commands' for a list of
/// commands.
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Chess Tournament Manager")]
pub(crate) struct Args {
    /// Where players.ron and tournaments.ron are kept
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Whether to log on the debug level
    #[arg(long)]
    pub debug: bool,

    /// Whether to skip the data files: start empty and never save
    #[arg(long)]
    pub skip_the_data_file: bool,

    /// Build the manpage
    #[arg(long)]
    pub man: bool,
}

impl Args {
    pub(crate) fn generate_man_page() -> anyhow::Result<()> {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Self::command()
            .name("chess-tournament")
            .long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-19");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("chess-tournament.1", buffer)?;
        Ok(())
    }
}
