// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use clap::Subcommand;

use crate::cmd::cards::reset_cards;
use crate::cmd::cards::use_card;
use crate::cmd::serve::server::start_server;
use crate::cmd::status::StatusFormat;
use crate::cmd::status::print_status;
use crate::cmd::week::print_week;
use crate::error::Fallible;
use crate::types::card::Card;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the data directory. Defaults to the current directory.
    #[arg(long, global = true)]
    directory: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show which cards have been used this week.
    Status {
        /// Output format.
        #[arg(long, default_value_t = StatusFormat::Text)]
        format: StatusFormat,
    },
    /// Mark a card as used for this week.
    Use {
        /// The card to use.
        card: Card,
    },
    /// Clear every card.
    Reset,
    /// Print the Jalali date and week number of a date.
    Week {
        /// A Gregorian date as YYYY-MM-DD, or a Jalali date as YYYY/MM/DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Serve the cards screen in the browser.
    Serve {
        /// Port to listen on. Overrides the config file.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open a browser tab.
        #[arg(long)]
        no_open: bool,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let directory = cli.directory;
    match cli.command {
        Command::Status { format } => print_status(directory, format),
        Command::Use { card } => use_card(directory, card).map(|_| ()),
        Command::Reset => reset_cards(directory),
        Command::Week { date } => print_week(date),
        Command::Serve { port, no_open } => start_server(directory, port, no_open).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_use() {
        let cli = Cli::try_parse_from(["poolcards", "--directory", "/tmp", "use", "maman"]).unwrap();
        assert_eq!(cli.directory, Some("/tmp".to_string()));
        match cli.command {
            Command::Use { card } => assert_eq!(card, Card::Maman),
            _ => panic!("expected the use command"),
        }
    }

    #[test]
    fn test_parse_unknown_card() {
        assert!(Cli::try_parse_from(["poolcards", "use", "grandpa"]).is_err());
    }
}
