//! Command loop.
//!
//! Each input line is either a shop, day or binding command or a run of key
//! characters. The farm is redrawn after every line.

use anyhow::Result;
use homestead_gameplay::{Action, FarmController, KeyBinding};
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::DisplayConfig;
use crate::render::render_text;

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A shop command was given without an item name
    #[error("`{0}` needs an item name")]
    MissingItem(&'static str),
    /// A command that takes no arguments was given some
    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),
    /// `bind` was not given an action and a single key
    #[error("usage: bind <action> <key>")]
    BindUsage,
    /// `bind` named an action that doesn't exist
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select an item for planting
    Select(String),
    /// Buy one unit of an item
    Buy(String),
    /// Sell one unit of an item
    Sell(String),
    /// Sleep until the next day
    Next,
    /// Bind a key to an action
    Bind {
        /// Action to rebind
        action: Action,
        /// Its new key
        key: char,
    },
    /// End the session
    Quit,
    /// Key presses, handled in order
    Keys(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let item = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingItem(name))
            } else {
                Ok(rest.to_string())
            }
        };

        let bare = |name: &'static str, command: Self| {
            if rest.is_empty() {
                Ok(command)
            } else {
                Err(CommandError::UnexpectedArgument(name))
            }
        };

        match word {
            "select" => item("select").map(Self::Select),
            "buy" => item("buy").map(Self::Buy),
            "sell" => item("sell").map(Self::Sell),
            "next" => bare("next", Self::Next),
            "quit" => bare("quit", Self::Quit),
            "exit" => bare("exit", Self::Quit),
            "bind" => parse_bind(rest),
            _ => Ok(Self::Keys(line.chars().filter(|c| !c.is_whitespace()).collect())),
        }
    }
}

fn parse_bind(args: &str) -> Result<Command, CommandError> {
    let mut parts = args.split_whitespace();
    let (Some(name), Some(key), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::BindUsage);
    };
    let mut chars = key.chars();
    let (Some(key), None) = (chars.next(), chars.next()) else {
        return Err(CommandError::BindUsage);
    };
    let action =
        Action::from_name(name).ok_or_else(|| CommandError::UnknownAction(name.to_string()))?;
    Ok(Command::Bind { action, key })
}

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop
    Quit,
}

/// A running session and how it is displayed.
#[derive(Debug)]
pub struct App {
    controller: FarmController,
    display: DisplayConfig,
}

impl App {
    /// Creates an app around a ready controller.
    pub fn new(controller: FarmController, display: DisplayConfig) -> Self {
        Self {
            controller,
            display,
        }
    }

    /// Returns the controller.
    pub const fn controller(&self) -> &FarmController {
        &self.controller
    }

    /// Applies one command.
    pub fn apply(&mut self, command: Command) -> Result<Flow> {
        let c = &mut self.controller;
        match command {
            Command::Select(item) => {
                c.select_item(&item);
            },
            Command::Buy(item) => {
                c.buy_item(&item);
            },
            Command::Sell(item) => {
                c.sell_item(&item);
            },
            Command::Next => c.next_day(),
            Command::Bind { action, key } => {
                match c.bindings_mut().rebind(action, KeyBinding::new(key)) {
                    Ok(()) => info!("Bound {key:?} to {}", action.name()),
                    Err(e) => warn!("Cannot bind {key:?}: {e}"),
                }
            },
            Command::Quit => return Ok(Flow::Quit),
            Command::Keys(keys) => {
                for key in keys.chars() {
                    if !c.handle_key(key)? {
                        debug!("Key {key:?} had no effect");
                    }
                }
            },
        }
        Ok(Flow::Continue)
    }

    /// Writes the current state in the configured format.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let snapshot = self.controller.snapshot();
        if self.display.json {
            serde_json::to_writer(&mut *out, &snapshot)?;
            writeln!(out)?;
        } else {
            write!(out, "{}", render_text(&snapshot, &self.display))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Runs until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.render(out)?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    warn!("{e}");
                    continue;
                },
            };
            if self.apply(command)? == Flow::Quit {
                break;
            }
            self.render(out)?;
        }
        Ok(())
    }
}
