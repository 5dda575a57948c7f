//! Natural-language rendering of the competitor list

use crate::types::CandidateName;
use std::collections::HashSet;

/// Render the competitor sentence for `company`.
///
/// Null and empty candidates are dropped, then duplicates are removed
/// keeping first-seen order. Two or more names are joined with `", "` and
/// the last one is always introduced by `", and "`.
pub fn format_competitors(candidates: &[CandidateName], company: &str) -> String {
    let names = distinct_names(candidates);
    match names.as_slice() {
        [] => format!("There are no competitors found for {company}."),
        [only] => format!("The competitor of {company} is {only}."),
        [init @ .., last] => format!(
            "The competitors of {company} are {}, and {last}.",
            init.join(", ")
        ),
    }
}

fn distinct_names(candidates: &[CandidateName]) -> Vec<&str> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter_map(Option::as_deref)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<CandidateName> {
        items.iter().map(|s| Some((*s).to_string())).collect()
    }

    #[test]
    fn test_no_competitors() {
        assert_eq!(
            format_competitors(&[], "Acme"),
            "There are no competitors found for Acme."
        );
    }

    #[test]
    fn test_single_competitor() {
        assert_eq!(
            format_competitors(&names(&["X"]), "Acme"),
            "The competitor of Acme is X."
        );
    }

    #[test]
    fn test_two_competitors_keep_leading_comma() {
        assert_eq!(
            format_competitors(&names(&["X", "Y"]), "Acme"),
            "The competitors of Acme are X, and Y."
        );
    }

    #[test]
    fn test_three_competitors() {
        assert_eq!(
            format_competitors(&names(&["X", "Y", "Z"]), "Acme"),
            "The competitors of Acme are X, Y, and Z."
        );
    }

    #[test]
    fn test_duplicates_removed_in_first_seen_order() {
        assert_eq!(
            format_competitors(&names(&["X", "X", "Y"]), "Acme"),
            format_competitors(&names(&["X", "Y"]), "Acme")
        );
        assert_eq!(
            format_competitors(&names(&["Y", "X", "Y", "X"]), "Acme"),
            "The competitors of Acme are Y, and X."
        );
    }

    #[test]
    fn test_null_and_empty_dropped_before_counting() {
        let candidates = vec![Some("X".to_string()), None, Some(String::new())];
        assert_eq!(
            format_competitors(&candidates, "Acme"),
            format_competitors(&names(&["X"]), "Acme")
        );
        assert_eq!(
            format_competitors(&[None, Some(String::new())], "Acme"),
            "There are no competitors found for Acme."
        );
    }
}
