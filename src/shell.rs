//! Line-oriented interactive driver for `BoundedHashMap`.
//!
//! The shell is generic over its input and output so sessions can be
//! scripted. The chosen value type and capacity live in a [`ShellConfig`]
//! that is passed explicitly into the session.

use crate::bounded_hash_map::BoundedHashMap;
use crate::error::{InsertError, ShellError};
use log::{debug, info};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Value type stored by the session's map.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ValueKind {
    Text,
    Integer,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ShellConfig {
    pub value_kind: ValueKind,
    pub capacity: usize,
}

/// Values the shell can read from a line and print back.
pub trait ShellValue: FromStr + Display {
    const TYPE_NAME: &'static str;
}

impl ShellValue for String {
    const TYPE_NAME: &'static str = "String";
}

impl ShellValue for i64 {
    const TYPE_NAME: &'static str = "Integer";
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Command {
    Set,
    Get,
    Delete,
    Load,
    Exit,
}

impl Command {
    fn from_choice(n: u32) -> Option<Self> {
        Some(match n {
            1 => Command::Set,
            2 => Command::Get,
            3 => Command::Delete,
            4 => Command::Load,
            5 => Command::Exit,
            _ => return None,
        })
    }
}

pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next input line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.output, "{msg}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt until a line parses and passes `accept`.
    fn prompt_parsed<T, F>(
        &mut self,
        msg: &str,
        not_parsed: &str,
        rejected: &str,
        accept: F,
    ) -> io::Result<Option<T>>
    where
        T: FromStr,
        F: Fn(&T) -> bool,
    {
        loop {
            let Some(line) = self.prompt(msg)? else {
                return Ok(None);
            };
            match line.trim().parse::<T>() {
                Ok(v) if accept(&v) => return Ok(Some(v)),
                Ok(_) => writeln!(self.output, "{rejected}")?,
                Err(_) => writeln!(self.output, "{not_parsed}")?,
            }
        }
    }

    /// Ask for the value type and the map size. `None` if input ends
    /// first.
    pub fn configure(&mut self) -> io::Result<Option<ShellConfig>> {
        writeln!(self.output, "1. String")?;
        writeln!(self.output, "2. Integer")?;
        writeln!(self.output)?;
        let Some(kind) = self.prompt_parsed::<u32, _>(
            "To get started, choose a value object type (1 or 2): ",
            "You must enter either 1 or 2!",
            "Invalid choice...try again.",
            |&n| n == 1 || n == 2,
        )?
        else {
            return Ok(None);
        };
        let value_kind = if kind == 1 {
            ValueKind::Text
        } else {
            ValueKind::Integer
        };

        let Some(capacity) = self.prompt_parsed::<usize, _>(
            "Please enter the size of your hashmap (greater than 0): ",
            "You must enter a valid integer size!",
            "Invalid size...try again.",
            |&n| n > 0,
        )?
        else {
            return Ok(None);
        };

        let config = ShellConfig {
            value_kind,
            capacity,
        };
        debug!("shell configured: {config:?}");
        Ok(Some(config))
    }

    /// Build the map described by `config` and run the menu loop until
    /// the user exits or input ends.
    pub fn run(&mut self, config: &ShellConfig) -> Result<(), ShellError> {
        match config.value_kind {
            ValueKind::Text => {
                let map = BoundedHashMap::<String>::with_capacity(config.capacity)?;
                self.session(map)?;
            }
            ValueKind::Integer => {
                let map = BoundedHashMap::<i64>::with_capacity(config.capacity)?;
                self.session(map)?;
            }
        }
        Ok(())
    }

    fn session<V: ShellValue>(&mut self, mut map: BoundedHashMap<V>) -> io::Result<()> {
        info!(
            "session started: {} values, capacity {}",
            V::TYPE_NAME,
            map.capacity()
        );
        loop {
            writeln!(self.output)?;
            for (i, name) in ["Set", "Get", "Delete", "Load", "Exit"].iter().enumerate() {
                writeln!(self.output, "{}. {name}", i + 1)?;
            }
            writeln!(self.output)?;
            let Some(command) = self.prompt_parsed::<u32, _>(
                "What will you do (1-5)? : ",
                "You must enter a valid integer choice (1-5)!",
                "Invalid choice...try again.",
                |&n| Command::from_choice(n).is_some(),
            )?
            .and_then(Command::from_choice) else {
                break;
            };

            let keep_going = match command {
                Command::Set => self.do_set(&mut map)?,
                Command::Get => self.do_get(&map)?,
                Command::Delete => self.do_delete(&mut map)?,
                Command::Load => {
                    writeln!(
                        self.output,
                        "Load factor: {:.2} ({} of {} keys used)",
                        map.load(),
                        map.occupancy(),
                        map.capacity()
                    )?;
                    true
                }
                Command::Exit => false,
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.output, "Thanks for using the hashmap!")?;
        Ok(())
    }

    // Each action returns `false` when input ran out mid-prompt.

    fn do_set<V: ShellValue>(&mut self, map: &mut BoundedHashMap<V>) -> io::Result<bool> {
        let Some(key) = self.prompt("Key: ")? else {
            return Ok(false);
        };
        let msg = format!("Value ({}): ", V::TYPE_NAME);
        let not_parsed = format!("You must enter a valid {} value!", V::TYPE_NAME);
        let Some(value) = self.prompt_parsed::<V, _>(&msg, &not_parsed, "", |_| true)? else {
            return Ok(false);
        };
        let shown = value.to_string();
        match map.insert(key.as_str(), value) {
            Ok(None) => writeln!(self.output, "Set {key:?} -> {shown}")?,
            Ok(Some(old)) => writeln!(self.output, "Updated {key:?}: {old} -> {shown}")?,
            Err(InsertError::CapacityExhausted { capacity }) => writeln!(
                self.output,
                "Map is full! ({capacity} of {capacity} keys used); {key:?} was not set."
            )?,
            Err(InsertError::Uninitialized) => {
                writeln!(self.output, "Map has no storage; {key:?} was not set.")?
            }
        }
        Ok(true)
    }

    fn do_get<V: ShellValue>(&mut self, map: &BoundedHashMap<V>) -> io::Result<bool> {
        let Some(key) = self.prompt("Key: ")? else {
            return Ok(false);
        };
        match map.get(&key) {
            Some(v) => writeln!(self.output, "{key:?} -> {v}")?,
            None => writeln!(self.output, "Key {key:?} not found.")?,
        }
        Ok(true)
    }

    fn do_delete<V: ShellValue>(&mut self, map: &mut BoundedHashMap<V>) -> io::Result<bool> {
        let Some(key) = self.prompt("Key: ")? else {
            return Ok(false);
        };
        match map.delete(&key) {
            Some(v) => writeln!(self.output, "Deleted {key:?} (was {v})")?,
            None => writeln!(self.output, "Key {key:?} not found.")?,
        }
        Ok(true)
    }
}
