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

#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

mod command_line;

use std::{io, str::FromStr};

use chess_tournament::{
    command::Command,
    manager::Manager,
    store::{RonStore, default_data_folder},
    utils,
};
use clap::Parser;
use log::{error, info};

use crate::command_line::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    utils::init_logger(args.debug);

    if args.man {
        return Args::generate_man_page();
    }

    let store = RonStore::new(args.data_dir.unwrap_or_else(default_data_folder));

    let mut manager = if args.skip_the_data_file {
        let mut manager = Manager::new(store);
        manager.skip_the_data_files = true;
        manager
    } else {
        store.create_data_folder()?;
        Manager::load(store)?
    };

    println!("Enter 'list_commands' for a list of commands.");

    let stdin = io::stdin();
    let mut buffer = String::new();

    loop {
        buffer.clear();

        match stdin.read_line(&mut buffer) {
            Ok(0) => {
                info!("end of input, saving...");
                return manager.save();
            }
            Ok(_) => {}
            Err(err) => {
                error!("stdin: {err}");
                return manager.save();
            }
        }

        let command = match Command::from_str(&buffer) {
            Ok(command) => command,
            Err(err) => {
                println!("? {err}\n");
                continue;
            }
        };
        let quit = command == Command::Quit;

        match manager.update(command) {
            Ok(message) => {
                if let Some(message) = message {
                    println!("= {message}\n");
                }
                if quit {
                    return Ok(());
                }
            }
            Err(err) => println!("? {err}\n"),
        }
    }
}
