mod palettes;

pub use palettes::{PalettesService, SavedSummary};
