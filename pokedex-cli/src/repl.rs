//! Read-eval-print loop and command output.

use std::io::{self, Write};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use pokedex_core::error::Result;
use pokedex_core::types::{CaughtPokemon, LocationArea, LocationAreaPage, Pokedex};

use crate::commands::{Command, COMMANDS};
use crate::session::{CatchAttempt, Session};

const PROMPT: &str = "Pokedex > ";

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Reads commands from stdin until `exit` or end of input.
pub async fn run(session: &mut Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", PROMPT.bold());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match run_line(session, &line).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) if e.is_usage_error() => println!("{}", e.to_string().yellow()),
            Err(e) => println!("{} {}", "✗".red(), e),
        }
    }

    session.close();
    println!("{}", "Closing Pokedex... See you later!".cyan());
    Ok(())
}

/// Parses and executes one line.
pub async fn run_line(session: &mut Session, line: &str) -> Result<Flow> {
    let Some(command) = Command::parse(line)? else {
        return Ok(Flow::Continue);
    };
    debug!(?command, "Dispatching");

    let spinner = command.needs_network().then(spinner);
    let result = execute(session, command).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result
}

async fn execute(session: &mut Session, command: Command) -> Result<Flow> {
    let mut out = io::stdout();
    match command {
        Command::Help => print_help(&mut out)?,
        Command::Exit => return Ok(Flow::Exit),
        Command::Map => {
            let page = session.map().await?;
            print_page(&mut out, &page)?;
        }
        Command::MapBack => {
            let page = session.map_back().await?;
            print_page(&mut out, &page)?;
        }
        Command::Explore(area) => {
            writeln!(out, "Exploring {}...", area.bold())?;
            let area = session.explore(&area).await?;
            print_area(&mut out, &area)?;
        }
        Command::Catch(name) => {
            let attempt = session.catch(&name).await?;
            print_catch(&mut out, &attempt)?;
        }
        Command::Inspect(name) => match session.inspect(&name) {
            Some(caught) => print_inspect(&mut out, caught)?,
            None => writeln!(out, "{} not caught yet!", name)?,
        },
        Command::Pokedex => print_pokedex(&mut out, session.pokedex())?,
        Command::Cache => match session.cache_stats() {
            Some(stats) => {
                writeln!(out, "{}", "Response cache".yellow().bold())?;
                writeln!(out, "   Entries:   {}", stats.entries)?;
                writeln!(out, "   Hits:      {}", stats.hits)?;
                writeln!(out, "   Misses:    {}", stats.misses)?;
                writeln!(out, "   Evictions: {}", stats.evictions)?;
                writeln!(out, "   Hit rate:  {:.1}%", stats.hit_rate() * 100.0)?;
                writeln!(out, "   TTL:       {:?}", stats.interval)?;
            }
            None => writeln!(out, "Response cache is disabled")?,
        },
    }
    Ok(Flow::Continue)
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Contacting PokeAPI...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Welcome to the Pokedex!".green().bold())?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;
    for info in COMMANDS {
        writeln!(out, "  {:<18} {}", info.usage, info.description)?;
    }
    writeln!(out)
}

fn print_page(out: &mut impl Write, page: &LocationAreaPage) -> io::Result<()> {
    for name in page.names() {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

fn print_area(out: &mut impl Write, area: &LocationArea) -> io::Result<()> {
    if area.pokemon_encounters.is_empty() {
        return writeln!(out, "No Pokemon found");
    }
    writeln!(out, "Found Pokemon:")?;
    for name in area.pokemon_names() {
        writeln!(out, " - {}", name)?;
    }
    Ok(())
}

fn print_catch(out: &mut impl Write, attempt: &CatchAttempt) -> io::Result<()> {
    let name = &attempt.pokemon.name;
    writeln!(
        out,
        "Throwing a Pokeball at {} ({})... {:.0}% chance",
        name,
        attempt.pokemon.base_experience(),
        attempt.probability * 100.0
    )?;
    if attempt.caught {
        writeln!(out, "{}", format!("{} was caught!", name).green())?;
        if attempt.first_catch {
            writeln!(out, "You may now inspect it with the inspect command.")?;
        }
    } else {
        writeln!(out, "{}", format!("{} escaped!", name).red())?;
    }
    Ok(())
}

fn print_inspect(out: &mut impl Write, caught: &CaughtPokemon) -> io::Result<()> {
    let pokemon = &caught.pokemon;
    writeln!(out, "Name: {}", pokemon.name)?;
    writeln!(out, "Height: {}", pokemon.height)?;
    writeln!(out, "Weight: {}", pokemon.weight)?;
    writeln!(out, "Stats:")?;
    for stat in &pokemon.stats {
        writeln!(out, " - {}: {}", stat.stat.name, stat.base_stat)?;
    }
    writeln!(out, "Types:")?;
    for name in pokemon.type_names() {
        writeln!(out, " - {}", name)?;
    }
    writeln!(out, "Caught: {}", caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC"))
}

fn print_pokedex(out: &mut impl Write, pokedex: &Pokedex) -> io::Result<()> {
    if pokedex.is_empty() {
        return writeln!(out, "Your Pokedex is empty");
    }
    writeln!(out, "Your Pokedex:")?;
    for name in pokedex.names() {
        writeln!(out, " - {}", name)?;
    }
    Ok(())
}
