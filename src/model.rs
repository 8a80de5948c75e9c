use crate::species::{Species, SpeciesKind};
use chrono::{DateTime, Utc};
use std::fmt;

pub const MIN_STAT: i32 = 0;
pub const MAX_STAT: i32 = 100;

// Age stage thresholds, in minutes since birth.
pub const BABY_MAX_AGE_MINUTES: f64 = 5.0;
pub const ADULT_MAX_AGE_MINUTES: f64 = 15.0;

pub const BABY_DECAY_MULTIPLIER: f64 = 1.3;
pub const ADULT_DECAY_MULTIPLIER: f64 = 1.0;
pub const ELDERLY_DECAY_MULTIPLIER: f64 = 0.7;

// Points per second, before the age multiplier.
pub const HUNGER_DECAY_RATE: f64 = 2.0;
pub const CLEANLINESS_DECAY_RATE: f64 = 1.0;
pub const HAPPINESS_DECAY_RATE: f64 = 1.0;
pub const HEALTH_DECAY_RATE: f64 = 0.5;

/// Below this, hunger or cleanliness start draining happiness.
pub const CRITICAL_STAT_THRESHOLD: i32 = 30;
/// Two or more stats below this drain health.
pub const LOW_STAT_THRESHOLD: i32 = 20;
/// Warnings are shown for any stat under this.
pub const WARNING_THRESHOLD: i32 = 30;

pub const FEED_HUNGER: i32 = 20;
pub const FEED_HAPPINESS: i32 = 5;
pub const PLAY_HAPPINESS: i32 = 20;
pub const PLAY_HUNGER: i32 = -10;
pub const SLEEP_HEALTH: i32 = 20;
pub const SLEEP_HUNGER: i32 = -5;
pub const CLEAN_CLEANLINESS: i32 = 40;
pub const CLEAN_HAPPINESS: i32 = 10;

pub const ILLNESS_CURE_THRESHOLD: i32 = 60;
pub const ILLNESS_HEALTH_MULTIPLIER: f64 = 2.5;
pub const ILLNESS_LOW_CLEANLINESS: i32 = 30;
pub const ILLNESS_CRITICAL_CLEANLINESS: i32 = 10;
pub const ILLNESS_CHANCE_LOW: f64 = 0.075;
pub const ILLNESS_CHANCE_CRITICAL: f64 = 0.175;

pub const LOYALTY_DURATION_SECS: i64 = 60;
pub const LOYALTY_HAPPINESS_MODIFIER: f64 = 0.5;

pub const MAX_LIVES: u32 = 9;

pub const SONG_COOLDOWN_SECS: f64 = 120.0;
pub const SONG_HUNGER_BOOST: i32 = 20;
pub const SONG_HAPPINESS_BOOST: i32 = 25;
pub const SONG_HEALTH_BOOST: i32 = 15;
pub const SONG_CLEANLINESS_BOOST: i32 = 20;

/// Pins any value into the stat range.
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(MIN_STAT, MAX_STAT)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stat {
    Health,
    Hunger,
    Happiness,
    Cleanliness,
}

/// The four bounded stats. Every write goes through [`clamp_stat`], so a
/// value outside `0..=100` can never be read back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    health: i32,
    hunger: i32,
    happiness: i32,
    cleanliness: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            health: MAX_STAT,
            hunger: MAX_STAT,
            happiness: MAX_STAT,
            cleanliness: MAX_STAT,
        }
    }
}

impl Stats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Health => self.health,
            Stat::Hunger => self.hunger,
            Stat::Happiness => self.happiness,
            Stat::Cleanliness => self.cleanliness,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        let value = clamp_stat(value);
        match stat {
            Stat::Health => self.health = value,
            Stat::Hunger => self.hunger = value,
            Stat::Happiness => self.happiness = value,
            Stat::Cleanliness => self.cleanliness = value,
        }
    }

    pub fn adjust(&mut self, stat: Stat, delta: i32) {
        self.set(stat, self.get(stat).saturating_add(delta));
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn hunger(&self) -> i32 {
        self.hunger
    }

    pub fn happiness(&self) -> i32 {
        self.happiness
    }

    pub fn cleanliness(&self) -> i32 {
        self.cleanliness
    }

    /// Hunger, cleanliness and happiness under [`LOW_STAT_THRESHOLD`].
    /// Health is not counted.
    pub fn low_stat_count(&self) -> usize {
        [self.hunger, self.cleanliness, self.happiness]
            .iter()
            .filter(|v| **v < LOW_STAT_THRESHOLD)
            .count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgeStage {
    Baby,
    Adult,
    Elderly,
}

impl AgeStage {
    pub fn from_minutes(minutes: f64) -> Self {
        if minutes < BABY_MAX_AGE_MINUTES {
            AgeStage::Baby
        } else if minutes < ADULT_MAX_AGE_MINUTES {
            AgeStage::Adult
        } else {
            AgeStage::Elderly
        }
    }

    pub fn decay_multiplier(self) -> f64 {
        match self {
            AgeStage::Baby => BABY_DECAY_MULTIPLIER,
            AgeStage::Adult => ADULT_DECAY_MULTIPLIER,
            AgeStage::Elderly => ELDERLY_DECAY_MULTIPLIER,
        }
    }
}

impl fmt::Display for AgeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgeStage::Baby => "Baby",
            AgeStage::Adult => "Adult",
            AgeStage::Elderly => "Elderly",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Illness {
    #[default]
    Healthy,
    Ill(&'static str),
}

impl Illness {
    pub fn is_ill(&self) -> bool {
        matches!(self, Illness::Ill(_))
    }

    /// Empty while healthy.
    pub fn label(&self) -> &'static str {
        match self {
            Illness::Healthy => "",
            Illness::Ill(label) => label,
        }
    }
}

/// Read-only snapshot of a pet for display.
#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub name: String,
    pub species: SpeciesKind,
    pub variant: Option<String>,
    pub age_minutes: f64,
    pub age_stage: AgeStage,

    pub health: i32,
    pub hunger: i32,
    pub happiness: i32,
    pub cleanliness: i32,

    pub special_ability: &'static str,
    pub ability_status: String,
    pub ability_ready: bool,

    pub status_message: &'static str,
    pub is_alive: bool,
    pub is_ill: bool,
    pub illness_name: &'static str,
}

impl Status {
    /// Stat warnings a caretaker should see, empty when all is well.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.is_alive {
            out.push("WARNING: Your pet's health is critical!".to_string());
            return out;
        }
        if self.is_ill {
            out.push(format!("{} is sick with {}! Clean to cure.", self.name, self.illness_name));
        }
        if self.hunger < WARNING_THRESHOLD {
            out.push(format!("{} is very hungry!", self.name));
        }
        if self.happiness < WARNING_THRESHOLD {
            out.push(format!("{} is feeling sad!", self.name));
        }
        if self.health < WARNING_THRESHOLD {
            out.push(format!("{}'s health is low!", self.name));
        }
        if self.cleanliness < WARNING_THRESHOLD {
            out.push(format!("{} is getting dirty!", self.name));
        }
        out
    }
}

#[derive(Clone, Debug)]
pub struct Pet {
    pub(crate) name: String,
    pub(crate) variant: Option<String>,
    pub(crate) species: Species,
    pub(crate) stats: Stats,
    pub(crate) illness: Illness,
    pub(crate) born_at: DateTime<Utc>,
    pub(crate) last_update: DateTime<Utc>,
}

impl Pet {
    /// A fresh pet with full stats, born at `now`.
    pub fn new(name: &str, variant: Option<&str>, kind: SpeciesKind, now: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            variant: variant
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            species: Species::new(kind),
            stats: Stats::default(),
            illness: Illness::Healthy,
            born_at: now,
            last_update: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    pub fn kind(&self) -> SpeciesKind {
        self.species.kind()
    }

    pub fn species(&self) -> &Species {
        &self.species
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Direct stat access. Writes are still clamped.
    pub fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    pub fn illness(&self) -> Illness {
        self.illness
    }

    pub fn is_ill(&self) -> bool {
        self.illness.is_ill()
    }

    pub fn is_alive(&self) -> bool {
        self.stats.health() > 0
    }

    pub fn born_at(&self) -> DateTime<Utc> {
        self.born_at
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    pub fn age_minutes(&self, now: DateTime<Utc>) -> f64 {
        let secs = (now - self.born_at).num_milliseconds() as f64 / 1000.0;
        secs.max(0.0) / 60.0
    }

    pub fn age_stage(&self, now: DateTime<Utc>) -> AgeStage {
        AgeStage::from_minutes(self.age_minutes(now))
    }

    /// Seconds since the last tick; never negative even if the clock stepped back.
    pub fn seconds_since_update(&self, now: DateTime<Utc>) -> f64 {
        let secs = (now - self.last_update).num_milliseconds() as f64 / 1000.0;
        secs.max(0.0)
    }

    pub fn make_sound(&self) -> &'static str {
        self.species.sound()
    }

    pub fn can_use_ability(&self) -> bool {
        self.species.can_use_ability()
    }

    fn status_message(&self) -> &'static str {
        if !self.is_alive() {
            return "Dead...";
        }
        if self.is_ill() {
            return "ILL! Health decaying fast - needs cleaning!";
        }
        match self.stats.low_stat_count() {
            0 => "Alive and well!",
            1 => "Doing okay, but could use some care.",
            2 => "Needs attention!",
            _ => "Critical condition! Needs immediate care!",
        }
    }

    pub fn status(&self, now: DateTime<Utc>) -> Status {
        Status {
            name: self.name.clone(),
            species: self.kind(),
            variant: self.variant.clone(),
            age_minutes: self.age_minutes(now),
            age_stage: self.age_stage(now),
            health: self.stats.health(),
            hunger: self.stats.hunger(),
            happiness: self.stats.happiness(),
            cleanliness: self.stats.cleanliness(),
            special_ability: self.species.ability_summary(),
            ability_status: self.species.ability_status(),
            ability_ready: self.species.can_use_ability(),
            status_message: self.status_message(),
            is_alive: self.is_alive(),
            is_ill: self.is_ill(),
            illness_name: self.illness.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_clamp_stat_pins_far_out_of_range_values() {
        for v in [i32::MIN, -1_000_000, -1, 0, 50, 100, 101, 9_999, i32::MAX] {
            let c = clamp_stat(v);
            assert!((MIN_STAT..=MAX_STAT).contains(&c), "{v} -> {c}");
        }
        assert_eq!(clamp_stat(-5), 0);
        assert_eq!(clamp_stat(42), 42);
        assert_eq!(clamp_stat(250), 100);
    }

    #[test]
    fn test_stats_adjust_saturates_at_bounds() {
        let mut s = Stats::default();
        s.adjust(Stat::Hunger, i32::MIN);
        assert_eq!(s.hunger(), 0);
        s.adjust(Stat::Hunger, i32::MAX);
        assert_eq!(s.hunger(), 100);
        s.set(Stat::Cleanliness, -40);
        assert_eq!(s.cleanliness(), 0);
    }

    #[test]
    fn test_low_stat_count_ignores_health() {
        let mut s = Stats::default();
        s.set(Stat::Health, 1);
        assert_eq!(s.low_stat_count(), 0);
        s.set(Stat::Hunger, 19);
        s.set(Stat::Happiness, 20);
        assert_eq!(s.low_stat_count(), 1);
        s.set(Stat::Cleanliness, 0);
        assert_eq!(s.low_stat_count(), 2);
    }

    #[test]
    fn test_age_stage_boundaries() {
        assert_eq!(AgeStage::from_minutes(0.0), AgeStage::Baby);
        assert_eq!(AgeStage::from_minutes(4.99), AgeStage::Baby);
        assert_eq!(AgeStage::from_minutes(5.0), AgeStage::Adult);
        assert_eq!(AgeStage::from_minutes(14.99), AgeStage::Adult);
        assert_eq!(AgeStage::from_minutes(15.0), AgeStage::Elderly);
        assert_eq!(AgeStage::from_minutes(600.0), AgeStage::Elderly);

        assert_eq!(AgeStage::Baby.decay_multiplier(), 1.3);
        assert_eq!(AgeStage::Adult.decay_multiplier(), 1.0);
        assert_eq!(AgeStage::Elderly.decay_multiplier(), 0.7);
    }

    #[test]
    fn test_pet_age_follows_clock() {
        let pet = Pet::new("Rex", None, SpeciesKind::Dog, t0());
        assert_eq!(pet.age_stage(t0()), AgeStage::Baby);
        assert_eq!(pet.age_stage(t0() + Duration::minutes(7)), AgeStage::Adult);
        assert_eq!(pet.age_stage(t0() + Duration::minutes(20)), AgeStage::Elderly);
        // a clock that runs backwards never yields a negative age
        assert_eq!(pet.age_minutes(t0() - Duration::minutes(3)), 0.0);
        assert_eq!(pet.seconds_since_update(t0() - Duration::seconds(10)), 0.0);
    }

    #[test]
    fn test_blank_variant_is_dropped() {
        let pet = Pet::new("Tom", Some("  "), SpeciesKind::Cat, t0());
        assert_eq!(pet.variant(), None);
        let pet = Pet::new("Tom", Some("Tabby"), SpeciesKind::Cat, t0());
        assert_eq!(pet.variant(), Some("Tabby"));
    }

    #[test]
    fn test_status_message_ladder() {
        let mut pet = Pet::new("Rex", None, SpeciesKind::Dog, t0());
        assert_eq!(pet.status(t0()).status_message, "Alive and well!");
        pet.stats.set(Stat::Hunger, 10);
        assert_eq!(pet.status(t0()).status_message, "Doing okay, but could use some care.");
        pet.stats.set(Stat::Cleanliness, 10);
        assert_eq!(pet.status(t0()).status_message, "Needs attention!");
        pet.stats.set(Stat::Happiness, 10);
        assert_eq!(
            pet.status(t0()).status_message,
            "Critical condition! Needs immediate care!"
        );
        pet.illness = Illness::Ill("Flu");
        let status = pet.status(t0());
        assert_eq!(status.status_message, "ILL! Health decaying fast - needs cleaning!");
        assert!(status.is_ill);
        assert_eq!(status.illness_name, "Flu");
        pet.stats.set(Stat::Health, 0);
        assert_eq!(pet.status(t0()).status_message, "Dead...");
    }

    #[test]
    fn test_warnings_list_low_stats() {
        let mut pet = Pet::new("Rex", None, SpeciesKind::Dog, t0());
        assert!(pet.status(t0()).warnings().is_empty());
        pet.stats.set(Stat::Hunger, 5);
        pet.stats.set(Stat::Cleanliness, 29);
        let w = pet.status(t0()).warnings();
        assert_eq!(w.len(), 2);
        assert!(w[0].contains("hungry"));
        assert!(w[1].contains("dirty"));
    }
}
