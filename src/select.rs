//! Per-category candidate selection.
//!
//! For each of the eight fixed categories, in order, the highest-scoring
//! unused candidate is accepted if it clears the relevance threshold;
//! otherwise the slot is filled by fallback synthesis. An accepted or
//! synthesized item's link goes into the per-run `used_links` set so later
//! categories can't resurface it.

use crate::classify::{CATEGORIES, Taxonomy};
use crate::fallback;
use crate::flavor;
use crate::models::{Candidate, FactItem};
use crate::wiki::WikiClient;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Minimum relevance score for a candidate to claim a category slot.
/// Empirically tuned upstream; in practice it demands at least two
/// keyword hits.
pub const RELEVANCE_THRESHOLD: i32 = 4;

/// Find the best unused candidate for a category.
///
/// Scan order is stable and the comparison is strict, so the
/// first-encountered candidate wins exact ties. Returns the candidate
/// index and its score; the threshold is the caller's business.
fn pick_best(
    candidates: &[Candidate],
    category: &str,
    used_links: &HashSet<String>,
    taxonomy: &Taxonomy,
) -> Option<(usize, i32)> {
    let mut best: Option<(usize, i32)> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        if used_links.contains(&candidate.link) {
            continue;
        }
        let score = taxonomy.relevance_score(category, &candidate.title, &candidate.summary);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((idx, score));
        }
    }
    best
}

/// The per-category decision: `Some(index)` when the best unused candidate
/// clears [`RELEVANCE_THRESHOLD`], `None` when the slot falls back.
fn decide(
    candidates: &[Candidate],
    category: &str,
    used_links: &HashSet<String>,
    taxonomy: &Taxonomy,
) -> Option<usize> {
    match pick_best(candidates, category, used_links, taxonomy) {
        Some((idx, score)) if score >= RELEVANCE_THRESHOLD => {
            debug!(category, score, title = %candidates[idx].title, "Candidate accepted");
            Some(idx)
        }
        Some((_, score)) => {
            debug!(category, best_score = score, "No candidate above threshold");
            None
        }
        None => {
            debug!(category, "No unused candidates left");
            None
        }
    }
}

/// Accept a candidate into a category slot: the category is forced to the
/// target and the flavor hook/question are regenerated for it.
fn accept(candidate: Candidate, category: &str, rng: &mut impl Rng) -> FactItem {
    let hook = flavor::hook_for(category, rng);
    let question = flavor::question_for(category, rng);
    candidate.into_item(category, hook, question)
}

/// Produce one item per fixed category, in fixed order.
///
/// Accepted feed items get a best-effort `wiki_url` from opensearch;
/// lookup failure leaves the field empty. Fallback slots are synthesized
/// by [`fallback::fallback_fact`] and can't fail.
#[instrument(level = "info", skip_all, fields(candidates = candidates.len()))]
pub async fn select_daily(
    candidates: Vec<Candidate>,
    taxonomy: &Taxonomy,
    wiki: &WikiClient,
    rng: &mut impl Rng,
) -> Vec<FactItem> {
    let mut used_links: HashSet<String> = HashSet::new();
    let mut items = Vec::with_capacity(CATEGORIES.len());

    for category in CATEGORIES {
        let item = match decide(&candidates, category, &used_links, taxonomy) {
            Some(idx) => {
                let candidate = candidates[idx].clone();
                used_links.insert(candidate.link.clone());
                let mut item = accept(candidate, category, rng);
                match wiki.search(&item.title).await {
                    Ok(Some(page)) => item.wiki_url = page.url,
                    Ok(None) => debug!(category, title = %item.title, "No wiki match"),
                    Err(e) => debug!(category, error = %e, "Wiki lookup skipped"),
                }
                info!(category, title = %item.title, "Selected feed item");
                item
            }
            None => {
                let item = fallback::fallback_fact(wiki, category, rng).await;
                if !item.link.is_empty() {
                    used_links.insert(item.link.clone());
                }
                info!(category, title = %item.title, "Filled slot with fallback fact");
                item
            }
        };
        items.push(item);
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn candidate(title: &str, link: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            summary: String::new(),
            link: link.to_string(),
            category: "Science".to_string(),
            hook: "h".to_string(),
            question: "q".to_string(),
        }
    }

    #[test]
    fn test_pick_best_prefers_higher_score() {
        let taxonomy = Taxonomy::new();
        let candidates = vec![
            candidate("Quiet day in the lab", "https://a/1"),
            candidate("New machine learning model beats benchmark", "https://a/2"),
        ];
        let (idx, score) = pick_best(&candidates, "AI", &HashSet::new(), &taxonomy).unwrap();
        assert_eq!(idx, 1);
        assert!(score >= RELEVANCE_THRESHOLD);
    }

    #[test]
    fn test_pick_best_tie_goes_to_first_scanned() {
        let taxonomy = Taxonomy::new();
        // Identical titles score identically; the earlier index must win.
        let candidates = vec![
            candidate("NASA rocket reaches orbit", "https://a/first"),
            candidate("NASA rocket reaches orbit", "https://a/second"),
        ];
        let (idx, _) = pick_best(&candidates, "Space", &HashSet::new(), &taxonomy).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_pick_best_skips_used_links() {
        let taxonomy = Taxonomy::new();
        let candidates = vec![
            candidate("NASA rocket reaches orbit", "https://a/first"),
            candidate("NASA rocket reaches orbit", "https://a/second"),
        ];
        let mut used = HashSet::new();
        used.insert("https://a/first".to_string());
        let (idx, _) = pick_best(&candidates, "Space", &used, &taxonomy).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_pick_best_all_used_returns_none() {
        let taxonomy = Taxonomy::new();
        let candidates = vec![candidate("NASA rocket", "https://a/1")];
        let mut used = HashSet::new();
        used.insert("https://a/1".to_string());
        assert!(pick_best(&candidates, "Space", &used, &taxonomy).is_none());
    }

    #[test]
    fn test_decide_rejects_below_threshold() {
        let taxonomy = Taxonomy::new();
        // One keyword hit plus agreement bonus is 3 — under the threshold.
        let candidates = vec![candidate("Chatbot helps users", "https://a/1")];
        assert!(decide(&candidates, "AI", &HashSet::new(), &taxonomy).is_none());
    }

    #[test]
    fn test_decide_accepts_at_threshold() {
        let taxonomy = Taxonomy::new();
        let candidates = vec![candidate(
            "New machine learning model beats benchmark",
            "https://a/1",
        )];
        assert_eq!(decide(&candidates, "AI", &HashSet::new(), &taxonomy), Some(0));
    }

    #[test]
    fn test_accept_forces_category_and_regenerates_flavor() {
        let mut rng = StdRng::seed_from_u64(5);
        let c = candidate("New machine learning model beats benchmark", "https://a/1");
        let item = accept(c, "AI", &mut rng);
        assert_eq!(item.category, "AI");
        // Flavor was regenerated for the target category, not carried over.
        assert_ne!(item.hook, "h");
        assert_ne!(item.question, "q");
    }
}
