//! Standard size presets.

use std::fmt::Write;

use facade_shop_core::pricing::SIZE_PRESETS;

/// One line per preset: name, size and area.
#[must_use]
pub fn list() -> String {
    let mut out = String::new();
    for preset in &SIZE_PRESETS {
        let dimensions = preset.dimensions();
        let _ = writeln!(
            out,
            "{:<12} {:<14} {} м²",
            preset.name,
            dimensions.to_string(),
            dimensions.area_sqm()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_preset() {
        let out = list();
        assert_eq!(out.lines().count(), SIZE_PRESETS.len());
        assert!(out.contains("Стандарт"));
        assert!(out.contains("400×700 мм"));
        assert!(out.contains("0.28 м²"));
    }
}
