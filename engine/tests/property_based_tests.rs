use engine::color::{Hsl, Rgb, hex_to_hsl, hsl_to_hex, set_lightness};
use engine::colorizer::{ResolvedColorMap, apply_color_map};
use engine::roles::ColorRole;
use proptest::prelude::*;

fn channel_distance(a: Rgb, b: Rgb) -> u8 {
    [a.0.abs_diff(b.0), a.1.abs_diff(b.1), a.2.abs_diff(b.2)]
        .into_iter()
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod color_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_hsl_round_trip_within_one_unit(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let original = Rgb(r, g, b);
            let hex = original.to_hex();

            let hsl = hex_to_hsl(&hex).unwrap();
            let back = Rgb::from_hex(&hsl_to_hex(hsl)).unwrap();

            // Property: HSL round trip reproduces every channel within rounding
            prop_assert!(channel_distance(original, back) <= 1, "{} -> {}", hex, back.to_hex());
        }

        #[test]
        fn test_hsl_components_in_range(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let Hsl { hue, saturation, lightness } = Rgb(r, g, b).to_hsl();

            prop_assert!((0.0..360.0).contains(&hue));
            prop_assert!((0.0..=100.0).contains(&saturation));
            prop_assert!((0.0..=100.0).contains(&lightness));
        }

        #[test]
        fn test_set_lightness_hits_target(
            r in 0u8..=255,
            g in 0u8..=255,
            b in 0u8..=255,
            target in 5.0f64..95.0
        ) {
            let hex = Rgb(r, g, b).to_hex();
            let adjusted = set_lightness(&hex, target).unwrap();
            let lightness = hex_to_hsl(&adjusted).unwrap().lightness;

            // Property: one 8-bit step is ~0.4% lightness, allow a little slack
            prop_assert!((lightness - target).abs() < 1.0, "{} at {} -> {}", hex, target, lightness);
        }

        #[test]
        fn test_hex_output_is_lowercase(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let hex = hsl_to_hex(Rgb(r, g, b).to_hsl());
            prop_assert_eq!(hex.len(), 7);
            prop_assert_eq!(hex.clone(), hex.to_lowercase());
        }
    }
}

#[cfg(test)]
mod substitution_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_every_occurrence_replaced(
            occurrences in prop::collection::vec((any::<bool>(), prop::option::of(0u8..=255)), 1..20)
        ) {
            let mut map = ResolvedColorMap::new();
            map.insert(ColorRole::EditorBackground, "#122236", "#351C08");

            let values: Vec<String> = occurrences
                .iter()
                .map(|(upper, alpha)| {
                    let base = if *upper { "#122236".to_uppercase() } else { "#122236".to_string() };
                    match alpha {
                        Some(a) => format!("\"{base}{a:02X}\""),
                        None => format!("\"{base}\""),
                    }
                })
                .collect();
            let template = format!("[{}]", values.join(", "));

            let out = apply_color_map(&template, &map).unwrap();

            // Property: no source occurrence survives, alpha suffixes survive lowercased
            prop_assert!(!out.to_lowercase().contains("#122236"));
            for (_, alpha) in &occurrences {
                let expected = match alpha {
                    Some(a) => format!("\"#351c08{a:02x}\""),
                    None => "\"#351c08\"".to_string(),
                };
                prop_assert!(out.contains(&expected));
            }
        }
    }
}
