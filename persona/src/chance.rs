//! Random source for the stochastic personality stages.
//!
//! Each [`Slot`] draws from its own stream so adding a draw to one stage
//! never shifts the outcomes of another.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, VecDeque};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    MoodLine,
    FetishTease,
    Intensity,
    IntensityPlacement,
    TrailingEmote,
    CannedReply,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::MoodLine,
        Slot::FetishTease,
        Slot::Intensity,
        Slot::IntensityPlacement,
        Slot::TrailingEmote,
        Slot::CannedReply,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

pub trait Chance: Send {
    /// Uniform draw in `[0, 1)`.
    fn roll(&mut self, slot: Slot) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, slot: Slot, len: usize) -> usize;
}

/// Pick a random element of `items`, or `None` when it is empty.
pub fn choose<'a, T>(chance: &mut dyn Chance, slot: Slot, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = chance.pick(slot, items.len()).min(items.len() - 1);
    items.get(idx)
}

/// Production source: one [`StdRng`] per slot.
pub struct RandomChance {
    streams: Vec<StdRng>,
}

impl RandomChance {
    pub fn from_entropy() -> Self {
        Self::seeded(rand::thread_rng().gen())
    }

    pub fn seeded(seed: u64) -> Self {
        let streams = Slot::ALL
            .iter()
            .map(|slot| {
                let salt = (slot.index() as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                StdRng::seed_from_u64(seed ^ salt)
            })
            .collect();
        Self { streams }
    }
}

impl Chance for RandomChance {
    fn roll(&mut self, slot: Slot) -> f64 {
        self.streams[slot.index()].gen()
    }

    fn pick(&mut self, slot: Slot, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.streams[slot.index()].gen_range(0..len)
    }
}

/// Deterministic source for tests: queued answers per slot.
///
/// Rolls fall back to `idle_roll` (by default just under 1, so no gate
/// opens) and picks fall back to 0 once a slot's queue is exhausted.
pub struct ScriptedChance {
    rolls: HashMap<Slot, VecDeque<f64>>,
    picks: HashMap<Slot, VecDeque<usize>>,
    idle_roll: f64,
    draws: HashMap<Slot, usize>,
}

impl Default for ScriptedChance {
    fn default() -> Self {
        Self {
            rolls: HashMap::new(),
            picks: HashMap::new(),
            idle_roll: 0.999,
            draws: HashMap::new(),
        }
    }
}

impl ScriptedChance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every gate opens: all rolls default to 0.
    pub fn always() -> Self {
        Self {
            idle_roll: 0.0,
            ..Self::default()
        }
    }

    pub fn roll_then(mut self, slot: Slot, value: f64) -> Self {
        self.rolls.entry(slot).or_default().push_back(value);
        self
    }

    pub fn pick_then(mut self, slot: Slot, index: usize) -> Self {
        self.picks.entry(slot).or_default().push_back(index);
        self
    }

    /// How many rolls and picks `slot` has served.
    pub fn draws(&self, slot: Slot) -> usize {
        self.draws.get(&slot).copied().unwrap_or(0)
    }
}

impl Chance for ScriptedChance {
    fn roll(&mut self, slot: Slot) -> f64 {
        *self.draws.entry(slot).or_default() += 1;
        self.rolls
            .get_mut(&slot)
            .and_then(VecDeque::pop_front)
            .unwrap_or(self.idle_roll)
    }

    fn pick(&mut self, slot: Slot, len: usize) -> usize {
        *self.draws.entry(slot).or_default() += 1;
        let idx = self
            .picks
            .get_mut(&slot)
            .and_then(VecDeque::pop_front)
            .unwrap_or(0);
        idx.min(len.saturating_sub(1))
    }
}
