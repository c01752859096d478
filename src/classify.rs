//! Keyword-based categorization and relevance scoring.
//!
//! Two layers of keyword matching drive the pipeline:
//!
//! 1. A quick one-shot categorizer: ordered keyword groups, first matching
//!    group wins, `"Science"` when nothing matches. Group order doubles as
//!    the tie-break policy — AI is checked before Physics, Physics before
//!    Entrepreneurship, and so on.
//! 2. A per-category relevance scorer used during selection: 2 points per
//!    hit from a larger, more specific keyword list, plus 1 point when the
//!    one-shot categorizer independently agrees.
//!
//! All keyword tables live in an immutable [`Taxonomy`] value that is
//! passed explicitly wherever classification happens.

use crate::flavor;
use crate::models::{Candidate, FeedEntry};
use crate::utils::{clean_html, first_two_sentences};
use itertools::Itertools;
use rand::Rng;
use tracing::debug;

/// The fixed output categories, in selection order.
pub const CATEGORIES: [&str; 8] = [
    "AI",
    "Physics",
    "Entrepreneurship",
    "Space",
    "Biology",
    "Health",
    "Environment",
    "Science",
];

/// Category assigned when no keyword group matches.
pub const DEFAULT_CATEGORY: &str = "Science";

/// Points per relevance-keyword hit.
const KEYWORD_HIT_POINTS: i32 = 2;
/// Bonus when the one-shot categorizer agrees with the target category.
const AGREEMENT_BONUS: i32 = 1;

/// Immutable keyword tables for categorization and scoring.
pub struct Taxonomy {
    /// Ordered one-shot groups. First match wins.
    groups: Vec<(&'static str, Vec<&'static str>)>,
    /// Larger per-category lists used for relevance scoring.
    relevance: Vec<(&'static str, Vec<&'static str>)>,
}

impl Taxonomy {
    pub fn new() -> Self {
        let groups = vec![
            (
                "AI",
                vec![
                    "artificial intelligence",
                    "machine learning",
                    "neural",
                    "deep learning",
                    "chatbot",
                    "language model",
                    "robot",
                    "algorithm",
                ],
            ),
            (
                "Physics",
                vec![
                    "quantum",
                    "particle",
                    "physics",
                    "relativity",
                    "photon",
                    "electron",
                    "magnet",
                    "gravitational wave",
                ],
            ),
            (
                "Entrepreneurship",
                vec![
                    "startup",
                    "founder",
                    "venture",
                    "entrepreneur",
                    "funding",
                    "investor",
                    "business",
                ],
            ),
            (
                "Space",
                vec![
                    "space", "nasa", "planet", "galaxy", "asteroid", "mars", "orbit",
                    "telescope", "rocket", "astronom",
                ],
            ),
            (
                "Biology",
                vec![
                    "dna", "gene", "cell", "protein", "species", "evolution", "bacteria",
                    "organism", "neuron",
                ],
            ),
            (
                "Health",
                vec![
                    "health", "disease", "cancer", "vaccine", "brain", "diet", "drug",
                    "patient", "immune",
                ],
            ),
            (
                "Environment",
                vec![
                    "climate",
                    "environment",
                    "carbon",
                    "ocean",
                    "pollution",
                    "wildlife",
                    "renewable",
                    "ecosystem",
                    "forest",
                ],
            ),
        ];

        let relevance = vec![
            (
                "AI",
                vec![
                    "artificial intelligence",
                    "machine learning",
                    "neural network",
                    "deep learning",
                    "language model",
                    "chatbot",
                    "robot",
                    "algorithm",
                    "automation",
                    "computer vision",
                    "training data",
                    "transformer",
                    "model",
                    "generative",
                    "reinforcement learning",
                    "speech recognition",
                ],
            ),
            (
                "Physics",
                vec![
                    "quantum",
                    "particle",
                    "photon",
                    "electron",
                    "relativity",
                    "gravitational",
                    "magnetic",
                    "superconduct",
                    "collider",
                    "boson",
                    "entanglement",
                    "thermodynamic",
                    "laser",
                    "dark matter",
                    "physicist",
                    "atom",
                ],
            ),
            (
                "Entrepreneurship",
                vec![
                    "startup",
                    "founder",
                    "venture capital",
                    "entrepreneur",
                    "funding round",
                    "investor",
                    "business model",
                    "seed round",
                    "valuation",
                    "incubator",
                    "accelerator",
                    "revenue",
                    "spinoff",
                    "commercializ",
                    "patent",
                ],
            ),
            (
                "Space",
                vec![
                    "nasa",
                    "spacecraft",
                    "planet",
                    "galaxy",
                    "asteroid",
                    "mars",
                    "orbit",
                    "telescope",
                    "astronomer",
                    "rocket",
                    "lunar",
                    "satellite",
                    "exoplanet",
                    "cosmic",
                    "supernova",
                    "astronaut",
                    "comet",
                ],
            ),
            (
                "Biology",
                vec![
                    "dna",
                    "gene",
                    "protein",
                    "cell",
                    "species",
                    "evolution",
                    "bacteria",
                    "organism",
                    "genome",
                    "enzyme",
                    "microbe",
                    "fossil",
                    "chromosome",
                    "neuron",
                    "stem cell",
                ],
            ),
            (
                "Health",
                vec![
                    "health",
                    "disease",
                    "cancer",
                    "vaccine",
                    "brain",
                    "diet",
                    "clinical trial",
                    "patient",
                    "immune",
                    "drug",
                    "therapy",
                    "infection",
                    "obesity",
                    "mental health",
                    "cardiovascular",
                    "diabetes",
                ],
            ),
            (
                "Environment",
                vec![
                    "climate",
                    "carbon",
                    "emission",
                    "ocean",
                    "pollution",
                    "wildlife",
                    "renewable",
                    "ecosystem",
                    "warming",
                    "forest",
                    "conservation",
                    "biodiversity",
                    "drought",
                    "glacier",
                    "sustainab",
                    "coral",
                ],
            ),
            (
                "Science",
                vec![
                    "research",
                    "study",
                    "scientist",
                    "discovery",
                    "experiment",
                    "laboratory",
                    "breakthrough",
                    "evidence",
                    "analysis",
                    "peer-reviewed",
                    "university",
                    "finding",
                    "theory",
                    "measurement",
                    "hypothesis",
                ],
            ),
        ];

        Taxonomy { groups, relevance }
    }

    /// Assign a category via ordered keyword matching.
    ///
    /// The first group with any keyword present in the lowercased
    /// title+summary wins; [`DEFAULT_CATEGORY`] otherwise.
    pub fn categorize(&self, title: &str, summary: &str) -> &'static str {
        let haystack = format!("{} {}", title, summary).to_lowercase();
        for (category, keywords) in &self.groups {
            if keywords.iter().any(|kw| haystack.contains(kw)) {
                return category;
            }
        }
        DEFAULT_CATEGORY
    }

    /// Score an entry against a target category.
    ///
    /// Each relevance keyword present in the text is worth
    /// [`KEYWORD_HIT_POINTS`] (presence, not occurrence count), with an
    /// [`AGREEMENT_BONUS`] when the one-shot categorizer picks the same
    /// category. Unknown categories score 0.
    pub fn relevance_score(&self, category: &str, title: &str, summary: &str) -> i32 {
        let haystack = format!("{} {}", title, summary).to_lowercase();
        let Some((_, keywords)) = self.relevance.iter().find(|(c, _)| *c == category) else {
            return 0;
        };

        let mut score = keywords
            .iter()
            .filter(|kw| haystack.contains(*kw))
            .count() as i32
            * KEYWORD_HIT_POINTS;

        if self.categorize(title, summary) == category {
            score += AGREEMENT_BONUS;
        }
        score
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn raw feed entries into candidates.
///
/// Cleans summaries down to two sentences, discards malformed entries
/// (empty title, link, or cleaned summary), deduplicates by link (first
/// occurrence wins), assigns the one-shot category, and attaches flavor
/// hook/question for that category.
pub fn build_candidates(
    entries: Vec<FeedEntry>,
    taxonomy: &Taxonomy,
    rng: &mut impl Rng,
) -> Vec<Candidate> {
    let candidates: Vec<Candidate> = entries
        .into_iter()
        .filter(|e| !e.title.trim().is_empty() && !e.link.trim().is_empty())
        .map(|e| {
            let title = e.title.trim().to_string();
            let link = e.link.trim().to_string();
            let summary = first_two_sentences(&clean_html(&e.summary));
            let category = taxonomy.categorize(&title, &summary);
            let hook = flavor::hook_for(category, rng);
            let question = flavor::question_for(category, rng);
            Candidate {
                title,
                summary,
                link,
                category: category.to_string(),
                hook,
                question,
            }
        })
        .filter(|c| !c.summary.is_empty())
        .unique_by(|c| c.link.clone())
        .collect();

    debug!(count = candidates.len(), "Built candidates from feed entries");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn entry(title: &str, link: &str, summary: &str) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: link.to_string(),
            summary: summary.to_string(),
        }
    }

    #[test]
    fn test_categorize_ai() {
        let taxonomy = Taxonomy::new();
        assert_eq!(
            taxonomy.categorize("New machine learning model beats benchmark", ""),
            "AI"
        );
    }

    #[test]
    fn test_categorize_default_science() {
        let taxonomy = Taxonomy::new();
        assert_eq!(
            taxonomy.categorize("Interesting new result announced", "Nothing topical here"),
            "Science"
        );
    }

    #[test]
    fn test_categorize_order_breaks_ties() {
        let taxonomy = Taxonomy::new();
        // Matches both the AI group ("neural") and the Physics group
        // ("quantum"); AI is checked first and must win.
        assert_eq!(
            taxonomy.categorize("Neural networks simulate quantum systems", ""),
            "AI"
        );
    }

    #[test]
    fn test_relevance_score_machine_learning_example() {
        let taxonomy = Taxonomy::new();
        let score =
            taxonomy.relevance_score("AI", "New machine learning model beats benchmark", "");
        assert!(score >= 4, "expected >= 4, got {}", score);
    }

    #[test]
    fn test_relevance_score_counts_presence_not_occurrences() {
        let taxonomy = Taxonomy::new();
        let once = taxonomy.relevance_score("Space", "NASA update", "");
        let thrice = taxonomy.relevance_score("Space", "NASA NASA NASA update", "");
        assert_eq!(once, thrice);
    }

    #[test]
    fn test_relevance_score_agreement_bonus() {
        let taxonomy = Taxonomy::new();
        // Exactly one relevance hit ("chatbot", 2 points) plus the
        // categorizer-agreement bonus (1 point).
        assert_eq!(taxonomy.relevance_score("AI", "Chatbot helps users", ""), 3);
    }

    #[test]
    fn test_relevance_score_unknown_category() {
        let taxonomy = Taxonomy::new();
        assert_eq!(taxonomy.relevance_score("Gardening", "quantum physics", ""), 0);
    }

    #[test]
    fn test_relevance_score_can_be_nonzero_for_multiple_categories() {
        let taxonomy = Taxonomy::new();
        let title = "Gene therapy trial shows promise for cancer patients";
        assert!(taxonomy.relevance_score("Biology", title, "") > 0);
        assert!(taxonomy.relevance_score("Health", title, "") > 0);
    }

    #[test]
    fn test_build_candidates_drops_empty_title_or_link() {
        let taxonomy = Taxonomy::new();
        let mut rng = StdRng::seed_from_u64(7);
        let entries = vec![
            entry("", "https://example.com/a", "Summary."),
            entry("Title", "", "Summary."),
            entry("Kept", "https://example.com/b", "Summary."),
        ];
        let candidates = build_candidates(entries, &taxonomy, &mut rng);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Kept");
    }

    #[test]
    fn test_build_candidates_drops_empty_summary() {
        let taxonomy = Taxonomy::new();
        let mut rng = StdRng::seed_from_u64(7);
        let entries = vec![entry("Title", "https://example.com/a", "<p>   </p>")];
        assert!(build_candidates(entries, &taxonomy, &mut rng).is_empty());
    }

    #[test]
    fn test_build_candidates_dedupes_by_link() {
        let taxonomy = Taxonomy::new();
        let mut rng = StdRng::seed_from_u64(7);
        let entries = vec![
            entry("First", "https://example.com/same", "One."),
            entry("Second", "https://example.com/same", "Two."),
        ];
        let candidates = build_candidates(entries, &taxonomy, &mut rng);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "First");
    }

    #[test]
    fn test_build_candidates_cleans_and_truncates_summary() {
        let taxonomy = Taxonomy::new();
        let mut rng = StdRng::seed_from_u64(7);
        let entries = vec![entry(
            "Neurons",
            "https://example.com/n",
            "<p>Neurons fire via action potentials. This is important. Also other stuff.</p>",
        )];
        let candidates = build_candidates(entries, &taxonomy, &mut rng);
        assert_eq!(
            candidates[0].summary,
            "Neurons fire via action potentials. This is important."
        );
    }

    #[test]
    fn test_build_candidates_attaches_flavor_for_guessed_category() {
        let taxonomy = Taxonomy::new();
        let mut rng = StdRng::seed_from_u64(7);
        let entries = vec![entry(
            "Quantum computers reach new milestone",
            "https://example.com/q",
            "A particle experiment.",
        )];
        let candidates = build_candidates(entries, &taxonomy, &mut rng);
        assert_eq!(candidates[0].category, "Physics");
        assert!(!candidates[0].hook.is_empty());
        assert!(!candidates[0].question.is_empty());
    }
}
