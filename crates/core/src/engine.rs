//! Palette selection strategies over an immutable [`Catalog`].
//!
//! Every operation is a pure function of the catalog, its explicit
//! arguments and the injected random source. Indices are reduced modulo the
//! catalog length, so no base index or size can make a strategy fail.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::catalog::Catalog;
use crate::derive::{derive_shade, find_complementary_color};
use crate::model::{AnalogousPolicy, PaletteMode, ShadePolicy};
use crate::palette::{Palette, PaletteColor};

pub const DEFAULT_PALETTE_SIZE: usize = 5;
pub const DEFAULT_COMBINATION_LIMIT: usize = 4;

/// Knobs selecting between the strategy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyOptions {
    pub analogous: AnalogousPolicy,
    pub shade: ShadePolicy,
    /// Maximum number of curator combinations appended to a traditional palette.
    pub combination_limit: usize,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            analogous: AnalogousPolicy::default(),
            shade: ShadePolicy::default(),
            combination_limit: DEFAULT_COMBINATION_LIMIT,
        }
    }
}

/// Parameters of a single generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteRequest {
    pub mode: PaletteMode,
    /// Anchor color. Drawn uniformly at random when absent.
    pub base: Option<usize>,
    /// Ignored by fixed-arity modes and by `traditional`.
    pub size: usize,
}

impl PaletteRequest {
    pub fn new(mode: PaletteMode) -> Self {
        Self {
            mode,
            base: None,
            size: DEFAULT_PALETTE_SIZE,
        }
    }

    pub fn with_base(mut self, base: usize) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }
}

impl Default for PaletteRequest {
    fn default() -> Self {
        Self::new(PaletteMode::Random)
    }
}

#[derive(Debug, Clone)]
pub struct PaletteEngine {
    catalog: Catalog,
    options: StrategyOptions,
}

impl PaletteEngine {
    pub fn new(catalog: Catalog, options: StrategyOptions) -> Self {
        Self { catalog, options }
    }

    /// Run the strategy named by `request.mode`.
    pub fn generate<R>(&self, request: &PaletteRequest, rng: &mut R) -> Palette
    where
        R: Rng + ?Sized,
    {
        let palette = match request.mode {
            PaletteMode::Random => self.random(request.size, rng),
            PaletteMode::Traditional => self.combination(request.base, rng),
            PaletteMode::Analogous => self.analogous(request.base, request.size, rng),
            PaletteMode::Complementary => self.complementary(request.base, rng),
            PaletteMode::Triadic => self.triadic(request.base, rng),
            PaletteMode::Tetradic => self.tetradic(request.base, rng),
            PaletteMode::Monochromatic => self.monochromatic(request.base, request.size, rng),
        };
        debug!(
            mode = %request.mode,
            base = ?request.base,
            size = request.size,
            colors = palette.len(),
            derived = palette.iter().filter(|color| color.is_derived()).count(),
            "generated palette"
        );
        palette
    }

    /// Distinct entries in shuffled order, at most the whole catalog.
    pub fn random<R>(&self, size: usize, rng: &mut R) -> Palette
    where
        R: Rng + ?Sized,
    {
        let size = self.clamp_to_catalog(size);
        let mut indices: Vec<usize> = (0..self.catalog.len()).collect();
        let (picked, _) = indices.partial_shuffle(rng, size);
        let colors = picked.iter().map(|&index| self.original(index)).collect();
        Palette::new(PaletteMode::Random, colors)
    }

    /// Neighbouring catalog entries around the base, per [`AnalogousPolicy`].
    pub fn analogous<R>(&self, base: Option<usize>, size: usize, rng: &mut R) -> Palette
    where
        R: Rng + ?Sized,
    {
        let base = self.pick_base(base, rng);
        let size = self.clamp_to_catalog(size);
        let start = match self.options.analogous {
            AnalogousPolicy::Centered => self.catalog.offset(base, -((size / 2) as isize)),
            AnalogousPolicy::Forward => base,
        };
        let colors = (0..size)
            .map(|step| self.original(self.catalog.offset(start, step as isize)))
            .collect();
        Palette::new(PaletteMode::Analogous, colors)
    }

    /// The base entry followed by `size - 1` progressively darker shades,
    /// stopping at the first all-black step of the shade policy.
    pub fn monochromatic<R>(&self, base: Option<usize>, size: usize, rng: &mut R) -> Palette
    where
        R: Rng + ?Sized,
    {
        let base = self.pick_base(base, rng);
        let entry = self.catalog.wrapped(base).1;
        let policy = self.options.shade;
        let size = size.clamp(1, policy.last_step() + 1);

        let mut colors = Vec::with_capacity(size);
        colors.push(self.original(base));
        for step in 1..size {
            colors.push(derive_shade(entry, step, |i| policy.factor(i)));
        }
        Palette::new(PaletteMode::Monochromatic, colors)
    }

    pub fn complementary<R>(&self, base: Option<usize>, rng: &mut R) -> Palette
    where
        R: Rng + ?Sized,
    {
        let base = self.original(self.pick_base(base, rng));
        let complement = find_complementary_color(&base);
        Palette::new(PaletteMode::Complementary, vec![base, complement])
    }

    pub fn triadic<R>(&self, base: Option<usize>, rng: &mut R) -> Palette
    where
        R: Rng + ?Sized,
    {
        let base = self.pick_base(base, rng);
        Palette::new(PaletteMode::Triadic, self.evenly_spaced(base, 3))
    }

    pub fn tetradic<R>(&self, base: Option<usize>, rng: &mut R) -> Palette
    where
        R: Rng + ?Sized,
    {
        let base = self.pick_base(base, rng);
        Palette::new(PaletteMode::Tetradic, self.evenly_spaced(base, 4))
    }

    /// The base entry plus its curator combinations, skipping dangling indices.
    pub fn combination<R>(&self, base: Option<usize>, rng: &mut R) -> Palette
    where
        R: Rng + ?Sized,
    {
        let base = self.pick_base(base, rng);
        let entry = self.catalog.wrapped(base).1;

        let mut colors = vec![self.original(base)];
        colors.extend(
            entry
                .combinations
                .iter()
                .filter_map(|&index| self.catalog.resolve(index))
                .take(self.options.combination_limit)
                .map(|index| self.original(index)),
        );
        Palette::new(PaletteMode::Traditional, colors)
    }

    /// `base` plus `parts - 1` entries stepped by `floor(len / parts)`.
    fn evenly_spaced(&self, base: usize, parts: usize) -> Vec<PaletteColor> {
        let stride = self.catalog.len() / parts;
        (0..parts)
            .map(|k| self.original(base + k * stride))
            .collect()
    }

    fn pick_base<R>(&self, base: Option<usize>, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        match base {
            Some(index) => self.catalog.wrap(index),
            None => rng.gen_range(0..self.catalog.len()),
        }
    }

    fn clamp_to_catalog(&self, size: usize) -> usize {
        size.clamp(1, self.catalog.len())
    }

    fn original(&self, index: usize) -> PaletteColor {
        let (index, entry) = self.catalog.wrapped(index);
        PaletteColor::original(index, entry.clone())
    }
}
