//! Interactive session state
//!
//! A session keeps the loaded table, the chosen row bounds and the two filter
//! toggles between commands. Every command that changes what is shown re-runs
//! the whole pipeline from the cached table.

use crate::filter::FilterToggles;
use crate::notice::Notice;
use crate::{CardRenderer, Frame, LoadedTable};
use std::path::{Path, PathBuf};
use tracing::info;

/// How a toggle command changes its flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
    Flip,
}

impl Switch {
    fn apply(self, current: bool) -> bool {
        match self {
            Switch::On => true,
            Switch::Off => false,
            Switch::Flip => !current,
        }
    }
}

/// A parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Render the current range again
    Show,
    /// Change both bounds and render
    Range { start: usize, end: usize },
    /// Show or hide rows containing a "done" cell
    Done(Switch),
    /// Restrict to rows with a blank "Contact by" cell
    Contact(Switch),
    /// Read the file again and render
    Reload,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Command::Show);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb.to_lowercase().as_str(), args.as_slice()) {
            ("show" | "s", []) => Command::Show,
            ("range" | "r", [start, end]) => Command::Range {
                start: parse_row(start)?,
                end: parse_row(end)?,
            },
            ("done" | "d", args) => Command::Done(parse_switch(args)?),
            ("contact" | "c", args) => Command::Contact(parse_switch(args)?),
            ("reload", []) => Command::Reload,
            ("status", []) => Command::Status,
            ("help" | "h" | "?", []) => Command::Help,
            ("quit" | "q" | "exit", []) => Command::Quit,
            ("range" | "r", _) => return Err("usage: range <start> <end>".to_string()),
            _ => return Err(format!("unknown command '{}', type 'help'", line.trim())),
        };
        Ok(command)
    }
}

fn parse_row(word: &str) -> Result<usize, String> {
    word.parse()
        .map_err(|_| format!("'{}' is not a row number", word))
}

fn parse_switch(args: &[&str]) -> Result<Switch, String> {
    match args {
        [] | ["toggle"] => Ok(Switch::Flip),
        ["on"] => Ok(Switch::On),
        ["off"] => Ok(Switch::Off),
        _ => Err("expected 'on', 'off' or 'toggle'".to_string()),
    }
}

pub const HELP: &str = "Commands:
  show                  render the current range again
  range <start> <end>   select rows (1 is the first data row)
  done [on|off|toggle]  show rows where a cell reads \"done\"
  contact [on|off|toggle]
                        only show rows with a blank \"Contact by\"
  reload                read the file again
  status                print the current settings
  help                  print this help
  quit                  leave the session";

/// What the caller should present after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Frame(Frame),
    Notices(Vec<Notice>),
    Help,
    Quit,
}

/// Toggles and bounds that survive between render passes
pub struct Session {
    renderer: CardRenderer,
    path: PathBuf,
    loaded: Option<LoadedTable>,
    load_error: Option<Notice>,
    start: Option<usize>,
    end: Option<usize>,
    toggles: FilterToggles,
}

impl Session {
    /// Open a session on `path`; a failed load is reported by the first frame
    pub fn open<P: AsRef<Path>>(
        renderer: CardRenderer,
        path: P,
        start: Option<usize>,
        end: Option<usize>,
        toggles: FilterToggles,
    ) -> Self {
        let mut session = Self {
            renderer,
            path: path.as_ref().to_path_buf(),
            loaded: None,
            load_error: None,
            start,
            end,
            toggles,
        };
        session.reload();
        session
    }

    pub fn toggles(&self) -> FilterToggles {
        self.toggles
    }

    pub fn bounds(&self) -> (Option<usize>, Option<usize>) {
        (self.start, self.end)
    }

    /// Render the current state
    pub fn frame(&self) -> Frame {
        match (&self.loaded, &self.load_error) {
            (Some(loaded), _) => self.renderer.frame(loaded, self.start, self.end, self.toggles),
            (None, Some(error)) => Frame {
                notices: vec![error.clone()],
                cards: Vec::new(),
            },
            (None, None) => Frame::default(),
        }
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Show => {}
            Command::Range { start, end } => {
                self.start = Some(start);
                self.end = Some(end);
            }
            Command::Done(switch) => {
                self.toggles.show_done_payments = switch.apply(self.toggles.show_done_payments);
            }
            Command::Contact(switch) => {
                self.toggles.show_only_blank_contact =
                    switch.apply(self.toggles.show_only_blank_contact);
            }
            Command::Reload => self.reload(),
            Command::Status => return Outcome::Notices(self.status()),
            Command::Help => return Outcome::Help,
            Command::Quit => return Outcome::Quit,
        }
        Outcome::Frame(self.frame())
    }

    fn reload(&mut self) {
        match self.renderer.load(&self.path) {
            Ok(loaded) => {
                self.loaded = Some(loaded);
                self.load_error = None;
            }
            Err(err) => {
                info!(path = %self.path.display(), error = %err, "load failed");
                self.loaded = None;
                self.load_error = Some(Notice::from(&err));
            }
        }
    }

    fn status(&self) -> Vec<Notice> {
        let rows = match &self.loaded {
            Some(loaded) => format!("{} data rows", loaded.table.row_count()),
            None => "no table loaded".to_string(),
        };
        let bound = |b: Option<usize>| b.map_or("default".to_string(), |n| n.to_string());
        vec![
            Notice::info(format!("File: {} ({})", self.path.display(), rows)),
            Notice::info(format!(
                "Range: start {}, end {}",
                bound(self.start),
                bound(self.end)
            )),
            Notice::info(format!(
                "Show done payments: {}",
                on_off(self.toggles.show_done_payments)
            )),
            Notice::info(format!(
                "Only blank contact: {}",
                on_off(self.toggles.show_only_blank_contact)
            )),
        ]
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
