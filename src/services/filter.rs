use crate::catalog::{GameModule, ALL_CATEGORY_ID};

/// Derives the visible subset of the catalog from a category selection and a
/// free-text search term.
///
/// Category selection is an exact token match, with `"all"` passing every
/// record. The search term matches case-insensitively against title or
/// description, with no trimming; whitespace is matched literally. Output
/// order is the input order, always.
pub fn visible<'a>(
    games: &'a [GameModule],
    category_selection: &str,
    search_term: &str,
) -> Vec<&'a GameModule> {
    let needle = search_term.to_lowercase();

    games
        .iter()
        .filter(|game| {
            let matches_category =
                category_selection == ALL_CATEGORY_ID || game.category == category_selection;
            let matches_search = game.title.to_lowercase().contains(&needle)
                || game.description.to_lowercase().contains(&needle);
            matches_category && matches_search
        })
        .collect()
}
