/// The closed set of crops the scorer ranks, in declaration order.
///
/// The order is significant: crops with equal scores are ranked by their
/// position in this list.
pub const CROP_UNIVERSE: [&str; 38] = [
    "Peas",
    "Fava Beans",
    "Onions",
    "Leeks",
    "Garlic",
    "Greens (Collards, Kale, Mustard)",
    "Turnips",
    "White Potatoes",
    "Cabbage",
    "Lettuce",
    "Radishes",
    "Beets",
    "Carrots",
    "Shallots",
    "Spinach",
    "Bok Choy",
    "Parsley",
    "Swiss Chard",
    "Celery",
    "Watermelons",
    "Winter Squash",
    "Melons",
    "Summer Squash",
    "Cucumbers",
    "Pumpkins",
    "Sweet Potatoes",
    "Okra",
    "Chinese Cabbage",
    "Sweet Corn",
    "Peanuts",
    "Lima Beans",
    "Beans (Bush, Pole, Shell, Dried)",
    "Black-Eyed Peas",
    "Eggplant",
    "Peppers",
    "Tomato",
    "Basil",
    "Gandules (Pigeon Peas)",
];

/// Most crops a single ranking returns.
pub const MAX_SUGGESTIONS: usize = 7;

/// Position of `name` in the crop universe. Exact, case-sensitive match.
pub fn crop_index(name: &str) -> Option<usize> {
    CROP_UNIVERSE.iter().position(|c| *c == name)
}

pub fn is_known_crop(name: &str) -> bool {
    crop_index(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn universe_has_no_duplicates() {
        let unique: HashSet<&str> = CROP_UNIVERSE.iter().copied().collect();
        assert_eq!(unique.len(), CROP_UNIVERSE.len());
    }

    #[test]
    fn crop_index_follows_declaration_order() {
        assert_eq!(crop_index("Peas"), Some(0));
        assert_eq!(crop_index("Fava Beans"), Some(1));
        assert_eq!(crop_index("Gandules (Pigeon Peas)"), Some(37));
    }

    #[test]
    fn unknown_crops_are_rejected() {
        assert!(!is_known_crop("Wheat"));
        assert!(!is_known_crop("peas"));
        assert!(is_known_crop("Tomato"));
    }
}
