use crate::model::{
    Illness, Pet, Stat, CLEANLINESS_DECAY_RATE, CLEAN_CLEANLINESS, CLEAN_HAPPINESS,
    CRITICAL_STAT_THRESHOLD, FEED_HAPPINESS, FEED_HUNGER, HAPPINESS_DECAY_RATE, HEALTH_DECAY_RATE,
    HUNGER_DECAY_RATE, ILLNESS_CHANCE_CRITICAL, ILLNESS_CHANCE_LOW, ILLNESS_CRITICAL_CLEANLINESS,
    ILLNESS_CURE_THRESHOLD, ILLNESS_HEALTH_MULTIPLIER, ILLNESS_LOW_CLEANLINESS,
    SLEEP_HEALTH, SLEEP_HUNGER,
};
use crate::species::SpeciesEvent;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    Feed,
    Play,
    Sleep,
    Clean,
    Interact,
    UseSpecialAbility,
}

/// What happened during one [`Pet::update`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub hunger_lost: i32,
    pub cleanliness_lost: i32,
    pub happiness_lost: i32,
    pub health_lost: i32,
    pub fell_ill: Option<&'static str>,
    pub loyalty_expired: bool,
    pub life_used: Option<u32>,
}

impl TickReport {
    /// Player-facing notices for the things worth interrupting for.
    pub fn notices(&self, name: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(label) = self.fell_ill {
            out.push(format!(
                "{name} has become ill with {label}! Health will decay faster until cleaned."
            ));
        }
        if let Some(remaining) = self.life_used {
            out.push(format!("{name} used a life! {remaining} lives remaining."));
        }
        if self.loyalty_expired {
            out.push(format!("{name}'s loyalty has worn off."));
        }
        out
    }
}

/// Truncated decay for one tick. Inputs are non-negative so truncation is floor.
fn decay_points(rate: f64, delta_secs: f64, multiplier: f64) -> i32 {
    let points = rate * delta_secs * multiplier;
    if points.is_finite() {
        points.max(0.0).min(i32::MAX as f64) as i32
    } else {
        i32::MAX
    }
}

/// Chance a healthy pet falls ill on one tick. Non-increasing in cleanliness.
pub fn illness_chance(cleanliness: i32) -> f64 {
    if cleanliness < ILLNESS_CRITICAL_CLEANLINESS {
        ILLNESS_CHANCE_CRITICAL
    } else if cleanliness < ILLNESS_LOW_CLEANLINESS {
        ILLNESS_CHANCE_LOW
    } else {
        0.0
    }
}

impl Pet {
    /// Advances the pet by `delta_secs` of elapsed time.
    ///
    /// Negative or NaN deltas are treated as zero, and a zero delta performs
    /// no decay and no illness roll. Species upkeep (loyalty expiry, cat
    /// revival, song cooldown) runs on every call.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        delta_secs: f64,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> TickReport {
        let dt = if delta_secs.is_nan() { 0.0 } else { delta_secs.max(0.0) };
        let mut report = TickReport::default();

        if dt > 0.0 {
            let m = self.age_stage(now).decay_multiplier();
            let before = self.stats;

            self.stats
                .adjust(Stat::Hunger, -decay_points(HUNGER_DECAY_RATE, dt, m));
            self.stats
                .adjust(Stat::Cleanliness, -decay_points(CLEANLINESS_DECAY_RATE, dt, m));

            if self.stats.hunger() < CRITICAL_STAT_THRESHOLD
                || self.stats.cleanliness() < CRITICAL_STAT_THRESHOLD
            {
                let modifier = self.species.happiness_decay_modifier();
                self.stats.adjust(
                    Stat::Happiness,
                    -decay_points(HAPPINESS_DECAY_RATE, dt, m * modifier),
                );
            }

            if !self.is_ill() && self.stats.low_stat_count() >= 2 {
                self.stats
                    .adjust(Stat::Health, -decay_points(HEALTH_DECAY_RATE, dt, m));
            }

            if !self.is_ill() {
                report.fell_ill = self.roll_illness(rng);
            }

            if self.is_ill() {
                self.stats.adjust(
                    Stat::Health,
                    -decay_points(HEALTH_DECAY_RATE, dt, m * ILLNESS_HEALTH_MULTIPLIER),
                );
            }

            report.hunger_lost = before.hunger() - self.stats.hunger();
            report.cleanliness_lost = before.cleanliness() - self.stats.cleanliness();
            report.happiness_lost = before.happiness() - self.stats.happiness();
            report.health_lost = before.health() - self.stats.health();
            trace!(
                pet = %self.name,
                dt,
                multiplier = m,
                hunger = report.hunger_lost,
                cleanliness = report.cleanliness_lost,
                happiness = report.happiness_lost,
                health = report.health_lost,
                "decay tick"
            );
        }

        match self.species.upkeep(&mut self.stats, dt, now) {
            Some(SpeciesEvent::LoyaltyExpired) => {
                debug!(pet = %self.name, "loyalty expired");
                report.loyalty_expired = true;
            }
            Some(SpeciesEvent::LifeUsed { remaining }) => {
                info!(pet = %self.name, remaining, "cat revived with a spare life");
                report.life_used = Some(remaining);
            }
            None => {}
        }

        self.last_update = now;
        report
    }

    fn roll_illness<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&'static str> {
        let chance = illness_chance(self.stats.cleanliness());
        if !rng.gen_bool(chance) {
            return None;
        }
        let labels = self.kind().illness_labels();
        let label = labels.choose(rng).copied().unwrap_or("Flu");
        self.illness = Illness::Ill(label);
        info!(
            pet = %self.name,
            illness = label,
            cleanliness = self.stats.cleanliness(),
            "pet fell ill"
        );
        Some(label)
    }

    pub fn feed(&mut self) -> String {
        self.stats.adjust(Stat::Hunger, FEED_HUNGER);
        self.stats.adjust(Stat::Happiness, FEED_HAPPINESS);
        format!("{} enjoyed the meal! Hunger restored.", self.name)
    }

    pub fn play(&mut self) -> String {
        let effect = self.species.play_effect();
        self.stats.adjust(Stat::Happiness, effect.happiness);
        self.stats.adjust(Stat::Hunger, effect.hunger);
        self.species.play_message(&self.name)
    }

    pub fn sleep(&mut self) -> String {
        self.stats.adjust(Stat::Health, SLEEP_HEALTH);
        self.stats.adjust(Stat::Hunger, SLEEP_HUNGER);
        format!("{} took a nice nap! Health restored.", self.name)
    }

    /// The only way to cure an illness: cleanliness must end up above the
    /// cure threshold.
    pub fn clean(&mut self) -> String {
        self.stats.adjust(Stat::Cleanliness, CLEAN_CLEANLINESS);
        self.stats.adjust(Stat::Happiness, CLEAN_HAPPINESS);

        if let Illness::Ill(label) = self.illness {
            if self.stats.cleanliness() > ILLNESS_CURE_THRESHOLD {
                self.illness = Illness::Healthy;
                info!(pet = %self.name, illness = label, "illness cured by cleaning");
                return format!(
                    "{} is now clean and fresh! The {label} has been cured!",
                    self.name
                );
            }
            return format!(
                "{} is cleaner, but still sick with {label}. Keep cleaning!",
                self.name
            );
        }
        format!("{} is now clean and fresh! Feels much better.", self.name)
    }

    pub fn interact(&mut self) -> String {
        self.stats
            .adjust(Stat::Happiness, self.species.interact_happiness());
        format!("{} says {}", self.name, self.species.sound())
    }

    /// Refused without any state change while the ability is unavailable.
    pub fn use_special_ability(&mut self, now: DateTime<Utc>) -> String {
        if !self.species.can_use_ability() {
            debug!(pet = %self.name, ability = self.species.ability_name(), "ability refused");
            return "Special ability is not available right now!".to_string();
        }
        info!(pet = %self.name, ability = self.species.ability_name(), "ability used");
        self.species.activate(&mut self.stats, &self.name, now)
    }

    pub fn apply(&mut self, action: PlayerAction, now: DateTime<Utc>) -> String {
        match action {
            PlayerAction::Feed => self.feed(),
            PlayerAction::Play => self.play(),
            PlayerAction::Sleep => self.sleep(),
            PlayerAction::Clean => self.clean(),
            PlayerAction::Interact => self.interact(),
            PlayerAction::UseSpecialAbility => self.use_special_ability(now),
        }
    }
}
