//! Style catalog for Burst FX
//! Enumerates the fourteen burst styles and maps each one to its
//! particle-count bucket and its (init, update, draw) behavior record.

use egui::{Color32, Painter};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::compositor;
use crate::particle::{self, Particle, SpawnParams};

/// Visual style of a burst. Governs spawn distribution, physics and draw shape.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstStyle {
    Neon,
    Gold,
    Butterfly,
    Quantum,
    Heart,
    Galaxy,
    Frozen,
    Phoenix,
    Matrix,
    Dna,
    Lightning,
    Void,
    Confetti,
    Chaos,
}

/// All styles, in catalog order. Random picks draw uniformly from this set.
pub const ALL_STYLES: [BurstStyle; 14] = [
    BurstStyle::Neon,
    BurstStyle::Gold,
    BurstStyle::Butterfly,
    BurstStyle::Quantum,
    BurstStyle::Heart,
    BurstStyle::Galaxy,
    BurstStyle::Frozen,
    BurstStyle::Phoenix,
    BurstStyle::Matrix,
    BurstStyle::Dna,
    BurstStyle::Lightning,
    BurstStyle::Void,
    BurstStyle::Confetti,
    BurstStyle::Chaos,
];

/// Per-style behavior record: spawn-time initialisation, per-tick physics,
/// and the draw routine. Keeping these as plain function pointers lets each
/// style be exercised in isolation without a monolithic conditional chain.
pub struct StyleBehavior {
    pub init: fn(&mut Particle, &SpawnParams, &mut dyn RngCore),
    pub update: fn(&mut Particle, &mut dyn RngCore) -> bool,
    pub draw: fn(&Particle, &Painter, Color32),
}

static DEFAULT_BEHAVIOR: StyleBehavior = StyleBehavior {
    init: particle::init_default,
    update: particle::update_default,
    draw: compositor::draw_circle,
};

static GOLD: StyleBehavior = StyleBehavior {
    init: particle::init_default,
    update: particle::update_default,
    draw: compositor::draw_streak,
};

static QUANTUM: StyleBehavior = StyleBehavior {
    init: particle::init_default,
    update: particle::update_default,
    draw: compositor::draw_shrinking_square,
};

static BUTTERFLY: StyleBehavior = StyleBehavior {
    init: particle::init_butterfly,
    update: particle::update_butterfly,
    draw: compositor::draw_butterfly,
};

static MATRIX: StyleBehavior = StyleBehavior {
    init: particle::init_matrix,
    update: particle::update_matrix,
    draw: compositor::draw_glyph,
};

static DNA: StyleBehavior = StyleBehavior {
    init: particle::init_dna,
    update: particle::update_dna,
    draw: compositor::draw_circle,
};

static LIGHTNING: StyleBehavior = StyleBehavior {
    init: particle::init_lightning,
    update: particle::update_lightning,
    draw: compositor::draw_bolt,
};

static CONFETTI: StyleBehavior = StyleBehavior {
    init: particle::init_confetti,
    update: particle::update_confetti,
    draw: compositor::draw_confetti,
};

static VOID: StyleBehavior = StyleBehavior {
    init: particle::init_void,
    update: particle::update_void,
    draw: compositor::draw_circle,
};

static HEART: StyleBehavior = StyleBehavior {
    init: particle::init_heart,
    update: particle::update_default,
    draw: compositor::draw_circle,
};

static GALAXY: StyleBehavior = StyleBehavior {
    init: particle::init_galaxy,
    update: particle::update_default,
    draw: compositor::draw_circle,
};

static FROZEN: StyleBehavior = StyleBehavior {
    init: particle::init_frozen,
    update: particle::update_default,
    draw: compositor::draw_circle,
};

static PHOENIX: StyleBehavior = StyleBehavior {
    init: particle::init_phoenix,
    update: particle::update_phoenix,
    draw: compositor::draw_circle,
};

static CHAOS: StyleBehavior = StyleBehavior {
    init: particle::init_chaos,
    update: particle::update_default,
    draw: compositor::draw_circle,
};

impl BurstStyle {
    /// Number of particles one burst of this style spawns.
    pub fn particle_count(self) -> usize {
        match self {
            Self::Matrix => 15,
            Self::Dna | Self::Lightning | Self::Butterfly => 30,
            Self::Heart | Self::Galaxy => 60,
            _ => 40,
        }
    }

    /// The (init, update, draw) record for this style.
    pub fn behavior(self) -> &'static StyleBehavior {
        match self {
            Self::Neon => &DEFAULT_BEHAVIOR,
            Self::Gold => &GOLD,
            Self::Quantum => &QUANTUM,
            Self::Butterfly => &BUTTERFLY,
            Self::Matrix => &MATRIX,
            Self::Dna => &DNA,
            Self::Lightning => &LIGHTNING,
            Self::Confetti => &CONFETTI,
            Self::Void => &VOID,
            Self::Heart => &HEART,
            Self::Galaxy => &GALAXY,
            Self::Frozen => &FROZEN,
            Self::Phoenix => &PHOENIX,
            Self::Chaos => &CHAOS,
        }
    }

    /// Uniform random pick over the whole catalog.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        use rand::Rng;
        ALL_STYLES[rng.gen_range(0..ALL_STYLES.len())]
    }

    /// Lenient name lookup for trigger hints. Unknown names fall back to the
    /// default (neon) style rather than failing the burst.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::Neon)
    }

    /// Strict name lookup.
    pub fn parse(name: &str) -> Option<Self> {
        let style = match name.trim().to_ascii_lowercase().as_str() {
            "neon" => Self::Neon,
            "gold" => Self::Gold,
            "butterfly" => Self::Butterfly,
            "quantum" => Self::Quantum,
            "heart" => Self::Heart,
            "galaxy" => Self::Galaxy,
            "frozen" => Self::Frozen,
            "phoenix" => Self::Phoenix,
            "matrix" => Self::Matrix,
            "dna" => Self::Dna,
            "lightning" => Self::Lightning,
            "void" => Self::Void,
            "confetti" => Self::Confetti,
            "chaos" => Self::Chaos,
            _ => return None,
        };
        Some(style)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Neon => "neon",
            Self::Gold => "gold",
            Self::Butterfly => "butterfly",
            Self::Quantum => "quantum",
            Self::Heart => "heart",
            Self::Galaxy => "galaxy",
            Self::Frozen => "frozen",
            Self::Phoenix => "phoenix",
            Self::Matrix => "matrix",
            Self::Dna => "dna",
            Self::Lightning => "lightning",
            Self::Void => "void",
            Self::Confetti => "confetti",
            Self::Chaos => "chaos",
        }
    }
}
