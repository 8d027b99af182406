use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::{PaletteEngine, PaletteRequest};
use crate::model::PaletteMode;
use crate::palette::Palette;

/// Stateful front over [`PaletteEngine`] that owns its random source and
/// remembers the most recent palette.
#[derive(Debug, Clone)]
pub struct PaletteGenerator<R = StdRng> {
    engine: PaletteEngine,
    rng: R,
    current: Palette,
}

impl PaletteGenerator<StdRng> {
    pub fn seeded(engine: PaletteEngine, seed: u64) -> Self {
        Self::new(engine, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(engine: PaletteEngine) -> Self {
        Self::new(engine, StdRng::from_entropy())
    }
}

impl<R: Rng> PaletteGenerator<R> {
    pub fn new(engine: PaletteEngine, rng: R) -> Self {
        Self {
            engine,
            rng,
            current: Palette::empty(PaletteMode::Random),
        }
    }

    /// Generate a palette and make it the current one.
    pub fn generate(&mut self, request: &PaletteRequest) -> &Palette {
        self.current = self.engine.generate(request, &mut self.rng);
        &self.current
    }

    /// The last generated palette; empty before the first call.
    pub fn current(&self) -> &Palette {
        &self.current
    }
}
