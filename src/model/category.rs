use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Chart color for any category that is not one of the [`KnownCategory`] values.
pub const FALLBACK_COLOR: &str = "#6B7280";

/// The expense categories offered by the entry form. Expenses may still carry any free-text
/// category; these are the ones with a dedicated chart color.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum KnownCategory {
    Food,
    Transport,
    Books,
    Entertainment,
    Miscellaneous,
}

serde_plain::derive_display_from_serialize!(KnownCategory);
serde_plain::derive_fromstr_from_deserialize!(KnownCategory);

impl KnownCategory {
    pub const ALL: [KnownCategory; 5] = [
        KnownCategory::Food,
        KnownCategory::Transport,
        KnownCategory::Books,
        KnownCategory::Entertainment,
        KnownCategory::Miscellaneous,
    ];

    pub fn color(&self) -> &'static str {
        match self {
            KnownCategory::Food => "#3B82F6",
            KnownCategory::Transport => "#10B981",
            KnownCategory::Books => "#F59E0B",
            KnownCategory::Entertainment => "#EF4444",
            KnownCategory::Miscellaneous => "#8B5CF6",
        }
    }
}

/// Returns the chart color for a category name. Matching is exact and case-sensitive.
pub fn category_color(category: &str) -> &'static str {
    KnownCategory::from_str(category)
        .map(|known| known.color())
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_colors() {
        assert_eq!(category_color("Food"), "#3B82F6");
        assert_eq!(category_color("Transport"), "#10B981");
        assert_eq!(category_color("Books"), "#F59E0B");
        assert_eq!(category_color("Entertainment"), "#EF4444");
        assert_eq!(category_color("Miscellaneous"), "#8B5CF6");
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(category_color("Education"), FALLBACK_COLOR);
        assert_eq!(category_color(""), FALLBACK_COLOR);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(category_color("food"), FALLBACK_COLOR);
        assert_eq!(category_color("FOOD"), FALLBACK_COLOR);
    }

    #[test]
    fn test_all_distinct_from_fallback() {
        for known in KnownCategory::ALL {
            assert_ne!(known.color(), FALLBACK_COLOR, "{known}");
            assert_eq!(category_color(&known.to_string()), known.color());
        }
    }
}
