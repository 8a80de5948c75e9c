use crate::sim::PlayerAction;
use anyhow::{bail, Result};
use std::io::{BufRead, Write};

pub const MENU_MIN: i32 = 1;
pub const MENU_MAX: i32 = 8;

/// One entry of the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Action(PlayerAction),
    ViewStatus,
    Exit,
}

impl MenuChoice {
    pub fn from_number(n: i32) -> Option<Self> {
        let choice = match n {
            1 => MenuChoice::Action(PlayerAction::Feed),
            2 => MenuChoice::Action(PlayerAction::Play),
            3 => MenuChoice::Action(PlayerAction::Sleep),
            4 => MenuChoice::Action(PlayerAction::Clean),
            5 => MenuChoice::Action(PlayerAction::Interact),
            6 => MenuChoice::Action(PlayerAction::UseSpecialAbility),
            7 => MenuChoice::ViewStatus,
            8 => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

/// Validated player input. Implementations retry until the input is
/// well-formed; callers never see a bad value.
pub trait Input {
    /// A non-empty, letters-only word.
    fn read_string(&mut self) -> Result<String>;

    /// Letters and spaces, or nothing at all.
    fn read_optional_string(&mut self) -> Result<Option<String>>;

    fn read_int_in_range(&mut self, min: i32, max: i32) -> Result<i32>;

    fn read_yes_no(&mut self) -> Result<bool>;

    fn wait_for_enter(&mut self) -> Result<()>;
}

/// Line-oriented input over any reader, with retry prompts on `out`.
pub struct ConsoleInput<R, W> {
    reader: R,
    out: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }

    fn next_raw(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            bail!("input stream closed");
        }
        Ok(buf)
    }

    /// Next trimmed line. Lines that are not UTF-8 are re-asked here.
    fn next_line(&mut self) -> Result<String> {
        loop {
            match String::from_utf8(self.next_raw()?) {
                Ok(line) => return Ok(line.trim().to_string()),
                Err(_) => self.retry("Unreadable input. Please try again: ")?,
            }
        }
    }

    fn retry(&mut self, msg: &str) -> Result<()> {
        write!(self.out, "{msg}")?;
        self.out.flush()?;
        Ok(())
    }
}

fn is_letters_only(s: &str) -> bool {
    s.chars().all(char::is_alphabetic)
}

impl<R: BufRead, W: Write> Input for ConsoleInput<R, W> {
    fn read_string(&mut self) -> Result<String> {
        loop {
            let line = self.next_line()?;
            if line.is_empty() {
                self.retry("Input cannot be empty. Please try again: ")?;
                continue;
            }
            if !is_letters_only(&line) {
                self.retry("Name must contain only letters. Please try again: ")?;
                continue;
            }
            return Ok(line);
        }
    }

    fn read_optional_string(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.next_line()?;
            if line.is_empty() {
                return Ok(None);
            }
            if !line.split_whitespace().all(is_letters_only) {
                self.retry("Use letters only, or press Enter to skip: ")?;
                continue;
            }
            let joined = line.split_whitespace().collect::<Vec<_>>().join(" ");
            return Ok(Some(joined));
        }
    }

    fn read_int_in_range(&mut self, min: i32, max: i32) -> Result<i32> {
        loop {
            let line = self.next_line()?;
            match line.parse::<i32>() {
                Ok(v) if (min..=max).contains(&v) => return Ok(v),
                Ok(_) => self.retry(&format!("Please enter a number between {min} and {max}: "))?,
                Err(_) => self.retry("Invalid input. Please enter a number: ")?,
            }
        }
    }

    fn read_yes_no(&mut self) -> Result<bool> {
        loop {
            let line = self.next_line()?.to_lowercase();
            match line.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.retry("Please answer y or n: ")?,
            }
        }
    }

    fn wait_for_enter(&mut self) -> Result<()> {
        self.next_raw()?;
        Ok(())
    }
}
