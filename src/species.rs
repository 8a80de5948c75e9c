use crate::model::{
    Stat, Stats, LOYALTY_DURATION_SECS, LOYALTY_HAPPINESS_MODIFIER, MAX_LIVES, MAX_STAT,
    PLAY_HAPPINESS, PLAY_HUNGER, SONG_CLEANLINESS_BOOST, SONG_COOLDOWN_SECS, SONG_HAPPINESS_BOOST,
    SONG_HEALTH_BOOST, SONG_HUNGER_BOOST,
};
use chrono::{DateTime, Duration, Utc};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeciesKind {
    Dog,
    Cat,
    Bird,
}

impl SpeciesKind {
    pub const ALL: [SpeciesKind; 3] = [SpeciesKind::Dog, SpeciesKind::Cat, SpeciesKind::Bird];

    /// Species for a 1-based selection menu entry.
    pub fn from_menu(choice: i32) -> Option<Self> {
        match choice {
            1 => Some(SpeciesKind::Dog),
            2 => Some(SpeciesKind::Cat),
            3 => Some(SpeciesKind::Bird),
            _ => None,
        }
    }

    /// What the free-form variant string means for this species.
    pub fn variant_label(self) -> &'static str {
        match self {
            SpeciesKind::Dog => "breed",
            SpeciesKind::Cat => "fur color",
            SpeciesKind::Bird => "feather color",
        }
    }

    /// Illnesses this species can catch.
    pub fn illness_labels(self) -> &'static [&'static str] {
        match self {
            SpeciesKind::Dog => &["Flu", "Fleas", "Tummy Ache", "Kennel Cough"],
            SpeciesKind::Cat => &["Flu", "Fleas", "Tummy Ache", "Hairball Fever"],
            SpeciesKind::Bird => &["Flu", "Tummy Ache", "Feather Mites"],
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            SpeciesKind::Dog => "Loyal companion with happiness boost",
            SpeciesKind::Cat => "Independent pet with 9 lives",
            SpeciesKind::Bird => "Cheerful singer with stat boosts",
        }
    }
}

impl fmt::Display for SpeciesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpeciesKind::Dog => "Dog",
            SpeciesKind::Cat => "Cat",
            SpeciesKind::Bird => "Bird",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dog {
    /// `Some` while loyalty is active.
    pub(crate) loyalty_until: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cat {
    pub(crate) lives_remaining: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bird {
    pub(crate) song_cooldown: f64,
    pub(crate) songs_performed: u32,
}

/// Per-species ability state. Only the owning variant's ability and its own
/// upkeep ever touch it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Species {
    Dog(Dog),
    Cat(Cat),
    Bird(Bird),
}

/// Net stat change of one play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayEffect {
    pub happiness: i32,
    pub hunger: i32,
}

/// Things species upkeep did during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeciesEvent {
    LoyaltyExpired,
    LifeUsed { remaining: u32 },
}

impl Species {
    pub fn new(kind: SpeciesKind) -> Self {
        match kind {
            SpeciesKind::Dog => Species::Dog(Dog::default()),
            SpeciesKind::Cat => Species::Cat(Cat {
                lives_remaining: MAX_LIVES,
            }),
            SpeciesKind::Bird => Species::Bird(Bird::default()),
        }
    }

    pub fn kind(&self) -> SpeciesKind {
        match self {
            Species::Dog(_) => SpeciesKind::Dog,
            Species::Cat(_) => SpeciesKind::Cat,
            Species::Bird(_) => SpeciesKind::Bird,
        }
    }

    pub fn sound(&self) -> &'static str {
        match self {
            Species::Dog(_) => "Woof! Woof!",
            Species::Cat(_) => "Meow~",
            Species::Bird(_) => "Chirp chirp",
        }
    }

    /// Scales happiness decay. Loyalty halves it.
    pub fn happiness_decay_modifier(&self) -> f64 {
        match self {
            Species::Dog(d) if d.loyalty_until.is_some() => LOYALTY_HAPPINESS_MODIFIER,
            _ => 1.0,
        }
    }

    pub fn play_effect(&self) -> PlayEffect {
        match self {
            Species::Dog(_) => PlayEffect {
                happiness: PLAY_HAPPINESS,
                hunger: PLAY_HUNGER,
            },
            Species::Cat(_) => PlayEffect {
                happiness: 18,
                hunger: 5,
            },
            // flying costs less than the base play
            Species::Bird(_) => PlayEffect {
                happiness: PLAY_HAPPINESS,
                hunger: PLAY_HUNGER + 2,
            },
        }
    }

    pub fn play_message(&self, name: &str) -> String {
        match self {
            Species::Dog(_) => {
                format!("{name} loves playing fetch! Brings the ball back with tail wagging.")
            }
            Species::Cat(_) => {
                format!("{name} plays independently with a toy mouse! Purrs contentedly.")
            }
            Species::Bird(_) => format!("{name} performs aerial acrobatics! Happiness increased."),
        }
    }

    pub fn interact_happiness(&self) -> i32 {
        match self {
            Species::Dog(_) => 5,
            Species::Cat(_) => 3,
            Species::Bird(_) => 4,
        }
    }

    pub fn ability_name(&self) -> &'static str {
        match self {
            Species::Dog(_) => "Loyalty",
            Species::Cat(_) => "Nine Lives",
            Species::Bird(_) => "Song",
        }
    }

    pub fn ability_summary(&self) -> &'static str {
        match self {
            Species::Dog(_) => "Loyalty - Maintains happiness longer!",
            Species::Cat(_) => "Nine Lives - Can regenerate health!",
            Species::Bird(_) => "Song - Boosts all stats!",
        }
    }

    pub fn ability_status(&self) -> String {
        match self {
            Species::Dog(d) => {
                if d.loyalty_until.is_some() {
                    "(Active)".to_string()
                } else {
                    "(Ready)".to_string()
                }
            }
            Species::Cat(c) => format!("({} lives remaining)", c.lives_remaining),
            Species::Bird(b) => {
                if b.song_cooldown > 0.0 {
                    format!("(Cooldown: {:.0}s)", b.song_cooldown.ceil())
                } else {
                    "(Ready!)".to_string()
                }
            }
        }
    }

    pub fn can_use_ability(&self) -> bool {
        match self {
            Species::Dog(d) => d.loyalty_until.is_none(),
            Species::Cat(c) => c.lives_remaining > 0,
            Species::Bird(b) => b.song_cooldown <= 0.0,
        }
    }

    pub fn loyalty_active(&self) -> bool {
        matches!(self, Species::Dog(Dog { loyalty_until: Some(_) }))
    }

    pub fn lives_remaining(&self) -> Option<u32> {
        match self {
            Species::Cat(c) => Some(c.lives_remaining),
            _ => None,
        }
    }

    pub fn song_cooldown(&self) -> Option<f64> {
        match self {
            Species::Bird(b) => Some(b.song_cooldown),
            _ => None,
        }
    }

    pub fn songs_performed(&self) -> Option<u32> {
        match self {
            Species::Bird(b) => Some(b.songs_performed),
            _ => None,
        }
    }

    /// Fires the ability. Callers check [`Species::can_use_ability`] first.
    /// Never touches illness.
    pub(crate) fn activate(
        &mut self,
        stats: &mut Stats,
        name: &str,
        now: DateTime<Utc>,
    ) -> String {
        match self {
            Species::Dog(d) => {
                d.loyalty_until = Some(now + Duration::seconds(LOYALTY_DURATION_SECS));
                format!(
                    "{name} is feeling extra loyal! \
                     Happiness will decay slower for the next {LOYALTY_DURATION_SECS} seconds."
                )
            }
            Species::Cat(c) => {
                stats.set(Stat::Health, MAX_STAT);
                c.lives_remaining = c.lives_remaining.saturating_sub(1);
                format!(
                    "{name} used Nine Lives! Health restored to 100. ({} lives remaining)",
                    c.lives_remaining
                )
            }
            Species::Bird(b) => {
                stats.adjust(Stat::Hunger, SONG_HUNGER_BOOST);
                stats.adjust(Stat::Happiness, SONG_HAPPINESS_BOOST);
                stats.adjust(Stat::Health, SONG_HEALTH_BOOST);
                stats.adjust(Stat::Cleanliness, SONG_CLEANLINESS_BOOST);
                b.song_cooldown = SONG_COOLDOWN_SECS;
                b.songs_performed += 1;
                format!("{name} sings a beautiful song! All stats boosted!")
            }
        }
    }

    /// Per-tick species bookkeeping, run after decay.
    pub(crate) fn upkeep(
        &mut self,
        stats: &mut Stats,
        delta_secs: f64,
        now: DateTime<Utc>,
    ) -> Option<SpeciesEvent> {
        match self {
            Species::Dog(d) => match d.loyalty_until {
                Some(until) if now >= until => {
                    d.loyalty_until = None;
                    Some(SpeciesEvent::LoyaltyExpired)
                }
                _ => None,
            },
            Species::Cat(c) => {
                if stats.health() <= 0 && c.lives_remaining > 0 {
                    stats.set(Stat::Health, MAX_STAT);
                    c.lives_remaining -= 1;
                    Some(SpeciesEvent::LifeUsed {
                        remaining: c.lives_remaining,
                    })
                } else {
                    None
                }
            }
            Species::Bird(b) => {
                if b.song_cooldown > 0.0 {
                    b.song_cooldown = (b.song_cooldown - delta_secs).max(0.0);
                }
                None
            }
        }
    }
}
