use thiserror::Error;

/// Configuration errors raised by the palette engine.
///
/// Everything else the engine encounters (out of range indices, oversized
/// palettes, dangling combination entries) is resolved by wrapping or
/// clamping and never surfaces as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("Color catalog is empty")]
    EmptyCatalog,
    #[error(
        "Unknown palette mode '{0}': expected random|traditional|analogous|complementary|triadic|tetradic|monochromatic"
    )]
    UnknownMode(String),
}
