use crate::config::Settings;
use crate::model::{Status, MAX_STAT};
use crate::species::SpeciesKind;
use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// Everything the game loop shows the player. The loop hands over
/// read-only snapshots and never looks at what was drawn.
pub trait Presenter {
    fn display_welcome(&mut self) -> Result<()>;
    fn display_pet_selection(&mut self) -> Result<()>;
    fn display_main_menu(&mut self) -> Result<()>;
    fn display_status(&mut self, status: &Status) -> Result<()>;
    fn display_warnings(&mut self, status: &Status) -> Result<()>;
    fn display_message(&mut self, text: &str) -> Result<()>;
    /// Like a message, but leaves the cursor on the same line.
    fn display_prompt(&mut self, text: &str) -> Result<()>;
    fn display_game_over(&mut self, status: &Status) -> Result<()>;
    fn clear_screen(&mut self) -> Result<()>;
}

const BOX_WIDTH: usize = 44;
const BAR_WIDTH: usize = 10;

/// Ten-cell meter for a 0..=100 stat.
pub(crate) fn bar(value: i32) -> String {
    let v = value.clamp(0, MAX_STAT) as usize;
    let fill = v * BAR_WIDTH / MAX_STAT as usize;
    let mut s = String::with_capacity(BAR_WIDTH * 3 + 2);
    s.push('[');
    for i in 0..BAR_WIDTH {
        s.push(if i < fill { '█' } else { '░' });
    }
    s.push(']');
    s
}

fn boxed(title: &str) -> [String; 3] {
    let inner = BOX_WIDTH;
    let len = title.chars().count().min(inner);
    let left = (inner - len) / 2;
    let right = inner - len - left;
    [
        format!("╔{}╗", "═".repeat(inner)),
        format!("║{}{}{}║", " ".repeat(left), title, " ".repeat(right)),
        format!("╚{}╝", "═".repeat(inner)),
    ]
}

fn stat_color(value: i32) -> Color {
    if value < 20 {
        Color::Red
    } else if value < 50 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Plain console renderer over any writer, using crossterm for colour and
/// screen clearing.
pub struct ConsoleUi<W: Write> {
    out: W,
    enable_color: bool,
    clear_screen: bool,
}

impl<W: Write> ConsoleUi<W> {
    pub fn new(out: W, settings: &Settings) -> Self {
        Self {
            out,
            enable_color: settings.enable_color,
            clear_screen: settings.clear_screen,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s), Print("\n"))?;
        Ok(())
    }

    fn colored(&mut self, s: &str, color: Color) -> Result<()> {
        if self.enable_color {
            queue!(self.out, SetForegroundColor(color), Print(s), ResetColor)?;
        } else {
            queue!(self.out, Print(s))?;
        }
        Ok(())
    }

    fn header(&mut self, title: &str, color: Color) -> Result<()> {
        for row in boxed(title) {
            self.colored(&row, color)?;
            self.line("")?;
        }
        Ok(())
    }

    fn stat_row(&mut self, label: &str, value: i32) -> Result<()> {
        queue!(self.out, Print(format!("{label:<13}{value:>3}/100 ")))?;
        self.colored(&bar(value), stat_color(value))?;
        self.line("")
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Presenter for ConsoleUi<W> {
    fn display_welcome(&mut self) -> Result<()> {
        self.header("WELCOME TO VIRTUAL PET SIMULATOR", Color::Cyan)?;
        self.flush()
    }

    fn display_pet_selection(&mut self) -> Result<()> {
        self.line("")?;
        self.header("CHOOSE YOUR PET TYPE", Color::Cyan)?;
        for (i, kind) in SpeciesKind::ALL.iter().enumerate() {
            self.line(&format!("{}. {:<5} - {}", i + 1, kind.to_string(), kind.blurb()))?;
        }
        queue!(self.out, Print("\nSelect pet type (1-3): "))?;
        self.flush()
    }

    fn display_main_menu(&mut self) -> Result<()> {
        self.line("")?;
        self.header("WHAT WILL YOU DO?", Color::Cyan)?;
        for item in [
            "1. Feed",
            "2. Play",
            "3. Sleep",
            "4. Clean",
            "5. Interact (Make Sound)",
            "6. Use Special Ability",
            "7. View Status",
            "8. Exit Game",
        ] {
            self.line(item)?;
        }
        queue!(self.out, Print("\nChoose an action: "))?;
        self.flush()
    }

    fn display_status(&mut self, status: &Status) -> Result<()> {
        let title = format!("\n=== {}'s Status ===", status.name);
        if self.enable_color {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
            self.line(&title)?;
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        } else {
            self.line(&title)?;
        }
        match &status.variant {
            Some(v) => self.line(&format!("Type: {} ({v})", status.species))?,
            None => self.line(&format!("Type: {}", status.species))?,
        }
        self.line(&format!(
            "Age: {:.2} minutes ({})",
            status.age_minutes, status.age_stage
        ))?;
        self.stat_row("Health:", status.health)?;
        self.stat_row("Hunger:", status.hunger)?;
        self.stat_row("Happiness:", status.happiness)?;
        self.stat_row("Cleanliness:", status.cleanliness)?;

        if status.is_ill {
            self.line("")?;
            self.colored(
                &format!("ILLNESS: {} is sick with {}!", status.name, status.illness_name),
                Color::Red,
            )?;
            self.line("")?;
        }

        self.line(&format!(
            "\nSpecial Ability: {} {}",
            status.special_ability, status.ability_status
        ))?;
        self.line(&format!("Status: {}", status.status_message))?;
        self.line("===================")?;
        self.flush()
    }

    fn display_warnings(&mut self, status: &Status) -> Result<()> {
        let warnings = status.warnings();
        if warnings.is_empty() {
            return Ok(());
        }
        self.line("")?;
        for w in warnings {
            self.colored(&format!("(!) {w}"), Color::Yellow)?;
            self.line("")?;
        }
        self.flush()
    }

    fn display_message(&mut self, text: &str) -> Result<()> {
        for l in text.lines() {
            self.line(l)?;
        }
        self.flush()
    }

    fn display_prompt(&mut self, text: &str) -> Result<()> {
        queue!(self.out, Print(text))?;
        self.flush()
    }

    fn display_game_over(&mut self, status: &Status) -> Result<()> {
        self.line("")?;
        self.header("GAME OVER", Color::Red)?;
        self.line(&format!(
            "{} the {} has died after {:.1} minutes... Game Over.",
            status.name, status.species, status.age_minutes
        ))?;
        self.flush()
    }

    fn clear_screen(&mut self) -> Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        }
        self.flush()
    }
}
