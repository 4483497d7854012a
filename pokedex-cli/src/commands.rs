//! REPL command table and line parsing.

use pokedex_core::error::{PokedexError, Result};

/// One parsed REPL command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
    Cache,
}

/// Help-table row.
pub struct CommandInfo {
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        usage: "help",
        description: "Displays this help message",
    },
    CommandInfo {
        usage: "exit",
        description: "Close the Pokedex",
    },
    CommandInfo {
        usage: "map",
        description: "Show the next page of location areas",
    },
    CommandInfo {
        usage: "mapb",
        description: "Show the previous page of location areas",
    },
    CommandInfo {
        usage: "explore <area>",
        description: "List the Pokemon found in a location area",
    },
    CommandInfo {
        usage: "catch <pokemon>",
        description: "Throw a Pokeball at a Pokemon",
    },
    CommandInfo {
        usage: "inspect <pokemon>",
        description: "Show details of a Pokemon you have caught",
    },
    CommandInfo {
        usage: "pokedex",
        description: "List every Pokemon you have caught",
    },
    CommandInfo {
        usage: "cache",
        description: "Show response cache statistics",
    },
];

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    ///
    /// Names and arguments are case-insensitive; words past the first argument are ignored.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let name = name.to_lowercase();
        let arg = words.next().map(str::to_lowercase);

        let require = |command: &'static str, argument: &'static str| {
            arg.clone()
                .ok_or(PokedexError::MissingArgument { command, argument })
        };

        let command = match name.as_str() {
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "explore" => Command::Explore(require("explore", "area")?),
            "catch" => Command::Catch(require("catch", "pokemon")?),
            "inspect" => Command::Inspect(require("inspect", "pokemon")?),
            "pokedex" => Command::Pokedex,
            "cache" => Command::Cache,
            _ => return Err(PokedexError::UnknownCommand(name)),
        };
        Ok(Some(command))
    }

    /// Returns true if running this command may hit the network.
    pub fn needs_network(&self) -> bool {
        matches!(
            self,
            Command::Map | Command::MapBack | Command::Explore(_) | Command::Catch(_)
        )
    }
}
