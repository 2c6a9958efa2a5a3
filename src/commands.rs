use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::bet::Selection;
use crate::config::TableConfig;
use crate::presenter::{format_money, Presenter, TerminalPresenter};
use crate::rng::{table_rng, FairRng};
use crate::roulette::Color;
use crate::scheduler::{run_spin, FrameSource, IntervalFrames};
use crate::table::{Table, TablePhase, Transition};

/// One line typed at the table prompt.
#[derive(Debug, Parser)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Put chips down for the next spin
    Bet {
        #[command(subcommand)]
        on: BetOn,
    },
    /// Spin the wheel
    Spin,
    /// Show the balance and any bet on the table
    Balance,
    /// Add funds to the balance
    Topup,
    /// Leave the table
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum BetOn {
    /// A single number, pays 100x
    Number {
        number: u8,
        #[arg(allow_hyphen_values = true)]
        stake: String,
    },
    /// Red, black or green, pays 2x
    Color {
        color: Color,
        #[arg(allow_hyphen_values = true)]
        stake: String,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, clap::Error> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    Line::try_parse_from(line.split_whitespace()).map(|line| Some(line.command))
}

pub async fn handle<R, F, P>(
    command: Command,
    table: &mut Table<R>,
    frames: &mut F,
    presenter: &mut P,
) -> Flow
where
    R: FairRng,
    F: FrameSource,
    P: Presenter,
{
    match command {
        Command::Bet { on } => {
            let (selection, stake) = match on {
                BetOn::Number { number, stake } => (Selection::Number(number), stake),
                BetOn::Color { color, stake } => (Selection::Color(color), stake),
            };
            match table.submit_bet(selection, &stake) {
                Ok(Transition::Applied) => {
                    println!("Bet placed. Balance: {}", format_money(table.balance()))
                }
                Ok(Transition::Ignored) => println!("A bet is already on the table."),
                Err(why) => println!("Please enter a valid bet: {}", why),
            }
        }
        Command::Spin => {
            if run_spin(table, frames, presenter).await.is_none() {
                println!("Place a bet before spinning.");
            }
        }
        Command::Balance => {
            println!("Balance: {}", format_money(table.balance()));
            if let Some(bet) = table.active_bet() {
                println!("On the table: {} for {}", bet.selection, format_money(bet.stake));
            }
        }
        Command::Topup => {
            let balance = table.top_up();
            println!("Balance: {}", format_money(balance));
        }
        Command::Quit => {
            if table.phase() != TablePhase::Idle {
                println!("Your bet stays on the table.");
            }
            return Flow::Quit;
        }
    }
    Flow::Continue
}

pub async fn start(config: TableConfig) -> Result<()> {
    let rng = table_rng(config.seed);
    if let Some(seed) = config.seed {
        info!("replaying with seed {}", seed);
    }
    let mut frames = IntervalFrames::new(config.frame_interval_ms);
    let mut table = Table::new(config, rng);
    let mut presenter = TerminalPresenter::new(std::io::stdout());

    println!(
        "Welcome to the table. Balance: {}. Type 'help' for commands.",
        format_money(table.balance())
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                err.print().context("printing usage")?;
                continue;
            }
        };
        if handle(command, &mut table, &mut frames, &mut presenter).await == Flow::Quit {
            break;
        }
    }
    println!("Final balance: {}", format_money(table.balance()));
    Ok(())
}
