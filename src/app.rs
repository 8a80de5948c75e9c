use crate::clock::{Clock, SystemClock};
use crate::config::Settings;
use crate::input::{ConsoleInput, Input, MenuChoice, MENU_MAX, MENU_MIN};
use crate::model::Pet;
use crate::render::{ConsoleUi, Presenter};
use crate::species::SpeciesKind;
use anyhow::{Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::io;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Playing,
    GameOver,
    Exited,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Exited)
    }
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    GameOver,
    Exited,
}

/// The game loop. Owns its collaborators; the pet itself is owned by the
/// caller and lent to each turn.
pub struct Session<P, I, C, R> {
    ui: P,
    input: I,
    clock: C,
    rng: R,
    phase: Phase,
}

impl<P, I, C, R> Session<P, I, C, R>
where
    P: Presenter,
    I: Input,
    C: Clock,
    R: Rng,
{
    pub fn new(ui: P, input: I, clock: C, rng: R) -> Self {
        Self {
            ui,
            input,
            clock,
            rng,
            phase: Phase::Setup,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ui(&self) -> &P {
        &self.ui
    }

    /// Runs setup and then plays until the pet dies or the player leaves.
    pub fn run(&mut self) -> Result<(Pet, Outcome)> {
        self.ui.display_welcome()?;
        let mut pet = self.adopt()?;
        let outcome = self.play(&mut pet)?;
        Ok((pet, outcome))
    }

    /// Setup phase: asks for species, name and variant, then creates the pet.
    pub fn adopt(&mut self) -> Result<Pet> {
        self.ui.display_pet_selection()?;
        let n = self.input.read_int_in_range(1, SpeciesKind::ALL.len() as i32)?;
        let kind = SpeciesKind::from_menu(n).context("species choice out of range")?;

        self.ui.display_prompt("\nEnter your pet's name: ")?;
        let name = self.input.read_string()?;

        self.ui.display_prompt(&format!(
            "Enter your {}'s {} (optional, Enter to skip): ",
            kind.to_string().to_lowercase(),
            kind.variant_label()
        ))?;
        let variant = self.input.read_optional_string()?;

        let now = self.clock.now();
        let pet = Pet::new(&name, variant.as_deref(), kind, now);
        info!(pet = %pet.name(), species = %kind, variant = ?pet.variant(), "pet adopted");

        self.ui.clear_screen()?;
        self.ui
            .display_message(&format!("\nYou've adopted a {kind} named {}!", pet.name()))?;
        self.ui
            .display_message(&format!("{} says {}", pet.name(), pet.make_sound()))?;
        self.pause()?;

        self.phase = Phase::Playing;
        Ok(pet)
    }

    /// Plays turns until a terminal phase is reached.
    pub fn play(&mut self, pet: &mut Pet) -> Result<Outcome> {
        self.phase = Phase::Playing;
        loop {
            match self.step(pet)? {
                Phase::GameOver => return Ok(Outcome::GameOver),
                Phase::Exited => return Ok(Outcome::Exited),
                _ => {}
            }
        }
    }

    /// One turn: age the pet, show it, take one menu choice.
    pub fn step(&mut self, pet: &mut Pet) -> Result<Phase> {
        if self.phase.is_terminal() {
            return Ok(self.phase);
        }
        self.ui.clear_screen()?;

        let now = self.clock.now();
        let dt = pet.seconds_since_update(now);
        let report = pet.update(dt, now, &mut self.rng);

        if !pet.is_alive() {
            let status = pet.status(now);
            info!(pet = %pet.name(), age_minutes = status.age_minutes, "game over");
            self.ui.display_game_over(&status)?;
            self.phase = Phase::GameOver;
            return Ok(self.phase);
        }

        for notice in report.notices(pet.name()) {
            self.ui.display_message(&format!("* {notice}"))?;
        }

        let status = pet.status(now);
        self.ui.display_status(&status)?;
        self.ui.display_warnings(&status)?;
        self.ui.display_main_menu()?;

        let n = self.input.read_int_in_range(MENU_MIN, MENU_MAX)?;
        match MenuChoice::from_number(n).context("menu choice out of range")? {
            MenuChoice::Action(action) => {
                let msg = pet.apply(action, self.clock.now());
                self.ui.display_message("")?;
                self.ui.display_message(&msg)?;
            }
            MenuChoice::ViewStatus => {
                self.ui.display_status(&pet.status(self.clock.now()))?;
            }
            MenuChoice::Exit => {
                self.ui.display_prompt("\nAre you sure you want to exit? (y/n) ")?;
                if self.input.read_yes_no()? {
                    info!(pet = %pet.name(), "player exited");
                    self.ui.display_message(&format!(
                        "\nGoodbye! Thanks for caring for {}!",
                        pet.name()
                    ))?;
                    self.phase = Phase::Exited;
                    return Ok(self.phase);
                }
            }
        }

        self.pause()?;
        Ok(self.phase)
    }

    fn pause(&mut self) -> Result<()> {
        self.ui.display_prompt("\nPress Enter to continue...")?;
        self.input.wait_for_enter()
    }
}

/// Binary entry: wires the console collaborators together and plays one game.
pub fn run(settings: &Settings) -> Result<Outcome> {
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let stdin = io::stdin();
    let input = ConsoleInput::new(stdin.lock(), io::stdout());
    let ui = ConsoleUi::new(io::stdout(), settings);

    let mut session = Session::new(ui, input, SystemClock, rng);
    let (_pet, outcome) = session.run()?;
    Ok(outcome)
}
