use crate::models::{Category, CategoryId, RelatedCategoryPair};
use std::collections::HashSet;

/// Find categories related to the preferred ones by subject-name overlap.
///
/// Two categories are related when a subject name of one contains a subject
/// name of the other, compared case-insensitively. Every match is emitted in
/// both directions so the result is a symmetric closure.
pub fn discover_related_pairs(
    categories: &[Category],
    preferred: &HashSet<CategoryId>,
) -> Vec<RelatedCategoryPair> {
    if preferred.is_empty() {
        return Vec::new();
    }

    let names: Vec<(CategoryId, Vec<String>)> = categories
        .iter()
        .map(|category| (category.id, normalized_names(category)))
        .collect();

    let mut seen: HashSet<RelatedCategoryPair> = HashSet::new();
    let mut pairs = Vec::new();

    for (source_id, source_names) in names.iter().filter(|(id, _)| preferred.contains(id)) {
        for (other_id, other_names) in &names {
            if other_id == source_id || !names_overlap(source_names, other_names) {
                continue;
            }

            let pair = RelatedCategoryPair::new(*source_id, *other_id);
            for directed in [pair, pair.reversed()] {
                if seen.insert(directed) {
                    pairs.push(directed);
                }
            }
        }
    }

    pairs
}

fn normalized_names(category: &Category) -> Vec<String> {
    category
        .subjects
        .iter()
        .map(|subject| subject.name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

fn names_overlap(left: &[String], right: &[String]) -> bool {
    left.iter()
        .any(|a| right.iter().any(|b| a.contains(b.as_str()) || b.contains(a.as_str())))
}
