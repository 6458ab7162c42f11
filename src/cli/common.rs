//! Shared rendering helpers for CLI commands.

use crate::aggregate::CombinedPokemon;

/// Zero-padded display id, e.g. `#0025`.
#[must_use]
pub fn display_id(id: u32) -> String {
    format!("#{id:04}")
}

/// Height in meters with one decimal; the API reports decimeters.
#[must_use]
pub fn format_height(height: Option<u32>) -> String {
    height.map_or_else(|| "?".to_string(), |h| format!("{:.1} m", f64::from(h) / 10.0))
}

/// Weight in kilograms with one decimal; the API reports hectograms.
#[must_use]
pub fn format_weight(weight: Option<u32>) -> String {
    weight.map_or_else(|| "?".to_string(), |w| format!("{:.1} kg", f64::from(w) / 10.0))
}

/// Special-status label for display.
///
/// When multiple flags are set the display priority is
/// legendary > mythical > baby. This is a presentation policy, not a data
/// invariant; the underlying record keeps all three flags.
#[must_use]
pub fn status_label(record: &CombinedPokemon) -> Option<&'static str> {
    if record.is_legendary {
        Some("legendary")
    } else if record.is_mythical {
        Some("mythical")
    } else if record.is_baby {
        Some("baby")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_flags(legendary: bool, mythical: bool, baby: bool) -> CombinedPokemon {
        CombinedPokemon {
            id: 1,
            name: "test".to_string(),
            height: None,
            weight: None,
            sprite_url: None,
            abilities: Vec::new(),
            types: Vec::new(),
            flavor_text: String::new(),
            evolutions: Vec::new(),
            stats: Vec::new(),
            is_legendary: legendary,
            is_mythical: mythical,
            is_baby: baby,
            generation: "unknown".to_string(),
        }
    }

    #[test]
    fn display_id_is_zero_padded() {
        assert_eq!(display_id(1), "#0001");
        assert_eq!(display_id(151), "#0151");
        assert_eq!(display_id(1010), "#1010");
    }

    #[test]
    fn units_are_converted_for_display() {
        assert_eq!(format_height(Some(7)), "0.7 m");
        assert_eq!(format_weight(Some(69)), "6.9 kg");
        assert_eq!(format_height(None), "?");
    }

    #[test]
    fn status_label_priority_is_legendary_first() {
        assert_eq!(status_label(&record_with_flags(true, true, true)), Some("legendary"));
        assert_eq!(status_label(&record_with_flags(false, true, true)), Some("mythical"));
        assert_eq!(status_label(&record_with_flags(false, false, true)), Some("baby"));
        assert_eq!(status_label(&record_with_flags(false, false, false)), None);
    }
}
