//! Interest categories: the ordered set a user picks before asking for suggestions.

/// Categories offered to every user. A request may add one free-text category on top.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Sports", "Arts & Theatre", "Family", "Nature"];

/// Separator used when categories are spliced into a prompt.
pub const CATEGORY_SEPARATOR: &str = ", ";

/// Trims, drops empty items and removes duplicates (first occurrence wins).
/// The optional extra category is appended last. An item holding the
/// separator is split into its parts, so the result always survives
/// [`join_categories`] followed by [`split_categories`].
pub fn normalize_categories(selected: &[String], extra: Option<&str>) -> Vec<String> {
    let mut categories: Vec<String> = Vec::with_capacity(selected.len() + 1);
    let candidates = selected
        .iter()
        .map(String::as_str)
        .chain(extra)
        .flat_map(|raw| raw.split(CATEGORY_SEPARATOR));

    for raw in candidates {
        let category = raw.trim();
        if category.is_empty() || categories.iter().any(|c| c == category) {
            continue;
        }
        categories.push(category.to_string());
    }

    categories
}

pub fn join_categories(categories: &[String]) -> String {
    categories.join(CATEGORY_SEPARATOR)
}

pub fn split_categories(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined
        .split(CATEGORY_SEPARATOR)
        .map(str::to_string)
        .collect()
}
