//! Channel transformations that synthesize new colors from catalog entries.

use std::sync::Arc;

use crate::model::ColorEntry;
use crate::palette::{DerivedColor, PaletteColor};

/// Invert every channel of `color` (`255 - c`) and tag the name with
/// `" Complement"`. The result keeps the catalog entry `color` came from as
/// its base.
pub fn find_complementary_color(color: &PaletteColor) -> PaletteColor {
    let rgb = color.rgb().inverted();
    let name = format!("{} Complement", color.name());
    PaletteColor::Derived(DerivedColor::new(color.base_entry().clone(), name, rgb))
}

/// Produce shade number `step` of `base` using the supplied lightness factor.
///
/// Channels become `clamp(floor(c * factor(step)), 0, 255)`, so factors below
/// zero yield black rather than wrapping.
pub fn derive_shade<F>(base: &Arc<ColorEntry>, step: usize, factor: F) -> PaletteColor
where
    F: Fn(usize) -> f64,
{
    let rgb = base.rgb.scaled(factor(step));
    let name = format!("{} Shade {}", base.name, step);
    PaletteColor::Derived(DerivedColor::new(base.clone(), name, rgb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rgb, ShadePolicy};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn entry(rgb: Rgb) -> Arc<ColorEntry> {
        Arc::new(ColorEntry::new("Base", rgb))
    }

    #[test]
    fn complement_inverts_each_channel() {
        let base = PaletteColor::original(2, entry(Rgb::new(128, 64, 32)));
        let complement = find_complementary_color(&base);

        assert_eq!(complement.rgb(), Rgb::new(127, 191, 223));
        assert_eq!(complement.hex(), "#7fbfdf");
        assert_eq!(complement.name(), "Base Complement");
        assert!(complement.is_derived());
    }

    #[test]
    fn complement_twice_restores_channels() {
        let base = PaletteColor::original(0, entry(Rgb::new(3, 250, 77)));
        let twice = find_complementary_color(&find_complementary_color(&base));
        assert_eq!(twice.rgb(), base.rgb());
    }

    #[rstest]
    #[case(ShadePolicy::Variation)]
    #[case(ShadePolicy::Step)]
    fn shades_never_brighten(#[case] policy: ShadePolicy) {
        let base = entry(Rgb::new(255, 128, 1));
        let mut previous = base.rgb.channels();
        for step in 1..12 {
            let shade = derive_shade(&base, step, |i| policy.factor(i));
            let channels = shade.rgb().channels();
            for (now, before) in channels.iter().zip(previous.iter()) {
                assert!(now <= before, "step {step} brightened {before} -> {now}");
            }
            previous = channels;
        }
        assert_eq!(previous, [0, 0, 0]);
    }

    #[test]
    fn shade_names_and_values() {
        let base = entry(Rgb::new(200, 100, 50));
        let shade = derive_shade(&base, 2, |i| ShadePolicy::Step.factor(i));
        assert_eq!(shade.name(), "Base Shade 2");
        assert_eq!(shade.rgb(), Rgb::new(140, 70, 35));

        let variation = derive_shade(&base, 1, |i| ShadePolicy::Variation.factor(i));
        assert_eq!(variation.rgb(), Rgb::new(130, 65, 32));
    }

    #[test]
    fn custom_factor_functions_are_clamped() {
        let base = entry(Rgb::new(200, 100, 50));
        assert_eq!(derive_shade(&base, 3, |_| 4.0).rgb(), Rgb::new(255, 255, 200));
        assert_eq!(derive_shade(&base, 3, |_| -1.0).rgb(), Rgb::new(0, 0, 0));
    }
}
