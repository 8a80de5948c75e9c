//! Scripted runs of the game loop with fake collaborators.

use anyhow::{bail, Result};
use chrono::{TimeZone, Utc};
use pawprint::input::Input;
use pawprint::render::Presenter;
use pawprint::{ManualClock, Outcome, Phase, Session, SpeciesKind, Stat, Status};
use rand::rngs::mock::StepRng;
use std::collections::VecDeque;

#[derive(Debug)]
enum Answer {
    Int(i32),
    Text(&'static str),
    Skip,
    Yes(bool),
    Enter,
}

#[derive(Default)]
struct ScriptedInput {
    answers: VecDeque<Answer>,
}

impl ScriptedInput {
    fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
        }
    }

    fn next(&mut self) -> Result<Answer> {
        match self.answers.pop_front() {
            Some(a) => Ok(a),
            None => bail!("script exhausted"),
        }
    }
}

impl Input for ScriptedInput {
    fn read_string(&mut self) -> Result<String> {
        match self.next()? {
            Answer::Text(s) => Ok(s.to_string()),
            other => bail!("expected text, got {other:?}"),
        }
    }

    fn read_optional_string(&mut self) -> Result<Option<String>> {
        match self.next()? {
            Answer::Text(s) => Ok(Some(s.to_string())),
            Answer::Skip => Ok(None),
            other => bail!("expected optional text, got {other:?}"),
        }
    }

    fn read_int_in_range(&mut self, min: i32, max: i32) -> Result<i32> {
        match self.next()? {
            Answer::Int(n) if (min..=max).contains(&n) => Ok(n),
            other => bail!("expected int in {min}..={max}, got {other:?}"),
        }
    }

    fn read_yes_no(&mut self) -> Result<bool> {
        match self.next()? {
            Answer::Yes(b) => Ok(b),
            other => bail!("expected y/n, got {other:?}"),
        }
    }

    fn wait_for_enter(&mut self) -> Result<()> {
        match self.next()? {
            Answer::Enter => Ok(()),
            other => bail!("expected enter, got {other:?}"),
        }
    }
}

#[derive(Default)]
struct RecordingUi {
    messages: Vec<String>,
    statuses: Vec<Status>,
    menus: usize,
    game_over: Option<Status>,
}

impl RecordingUi {
    fn said(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl Presenter for RecordingUi {
    fn display_welcome(&mut self) -> Result<()> {
        Ok(())
    }

    fn display_pet_selection(&mut self) -> Result<()> {
        Ok(())
    }

    fn display_main_menu(&mut self) -> Result<()> {
        self.menus += 1;
        Ok(())
    }

    fn display_status(&mut self, status: &Status) -> Result<()> {
        self.statuses.push(status.clone());
        Ok(())
    }

    fn display_warnings(&mut self, _status: &Status) -> Result<()> {
        Ok(())
    }

    fn display_message(&mut self, text: &str) -> Result<()> {
        self.messages.push(text.to_string());
        Ok(())
    }

    fn display_prompt(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn display_game_over(&mut self, status: &Status) -> Result<()> {
        self.game_over = Some(status.clone());
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        Ok(())
    }
}

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap())
}

fn never_ill() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

#[test]
fn dog_session_until_exit() {
    use Answer::*;
    let script = vec![
        Int(1),
        Text("Rex"),
        Text("Beagle"),
        Enter,
        // feed
        Int(1),
        Enter,
        // loyalty
        Int(6),
        Enter,
        // loyalty again, refused
        Int(6),
        Enter,
        // change of heart on exit
        Int(8),
        Yes(false),
        Enter,
        Int(8),
        Yes(true),
    ];
    let clock = clock();
    let mut session = Session::new(
        RecordingUi::default(),
        ScriptedInput::new(script),
        &clock,
        never_ill(),
    );
    assert_eq!(session.phase(), Phase::Setup);

    let (pet, outcome) = session.run().unwrap();
    assert_eq!(outcome, Outcome::Exited);
    assert_eq!(session.phase(), Phase::Exited);
    assert_eq!(pet.name(), "Rex");
    assert_eq!(pet.kind(), SpeciesKind::Dog);
    assert_eq!(pet.variant(), Some("Beagle"));
    assert!(pet.species().loyalty_active());

    let ui = session.ui();
    assert_eq!(ui.menus, 5);
    assert!(ui.said("You've adopted a Dog named Rex!"));
    assert!(ui.said("Rex says Woof! Woof!"));
    assert!(ui.said("enjoyed the meal"));
    assert!(ui.said("extra loyal"));
    assert!(ui.said("Special ability is not available right now!"));
    assert!(ui.said("Thanks for caring for Rex"));
    assert!(ui.game_over.is_none());
}

#[test]
fn elapsed_time_is_applied_each_turn() {
    use Answer::*;
    let clock = clock();
    let mut session = Session::new(
        RecordingUi::default(),
        ScriptedInput::new(vec![Int(2), Text("Tom"), Skip, Enter, Int(7), Enter]),
        &clock,
        never_ill(),
    );
    let mut tom = session.adopt().unwrap();
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(tom.variant(), None);

    clock.advance_secs(10.0);
    assert_eq!(session.step(&mut tom).unwrap(), Phase::Playing);

    // baby decay: 2.0 * 10 * 1.3
    assert_eq!(tom.stats().hunger(), 74);
    assert_eq!(tom.last_update(), pawprint::Clock::now(&clock));
    let shown = session.ui().statuses.last().unwrap();
    assert_eq!(shown.hunger, 74);
    assert_eq!(shown.species, SpeciesKind::Cat);
}

#[test]
fn dead_bird_ends_the_game() {
    use Answer::*;
    let clock = clock();
    let mut session = Session::new(
        RecordingUi::default(),
        ScriptedInput::new(vec![Int(3), Text("Tweety"), Text("Yellow"), Enter]),
        &clock,
        never_ill(),
    );
    let mut tweety = session.adopt().unwrap();
    tweety.stats_mut().set(Stat::Health, 0);
    clock.advance_secs(1.0);

    let outcome = session.play(&mut tweety).unwrap();
    assert_eq!(outcome, Outcome::GameOver);
    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.ui().menus, 0);
    let last = session.ui().game_over.as_ref().unwrap();
    assert_eq!(last.name, "Tweety");
    assert!(!last.is_alive);

    // terminal phases stay put
    assert_eq!(session.step(&mut tweety).unwrap(), Phase::GameOver);
}

#[test]
fn cat_life_notice_is_shown() {
    use Answer::*;
    let clock = clock();
    let mut session = Session::new(
        RecordingUi::default(),
        ScriptedInput::new(vec![Int(2), Text("Tom"), Skip, Enter, Int(7), Enter]),
        &clock,
        never_ill(),
    );
    let mut tom = session.adopt().unwrap();
    tom.stats_mut().set(Stat::Health, 0);
    clock.advance_secs(0.1);

    assert_eq!(session.step(&mut tom).unwrap(), Phase::Playing);
    assert!(tom.is_alive());
    assert!(session.ui().said("Tom used a life! 8 lives remaining."));
}
