//! Fallback "quick fact" synthesis for categories with no good candidate.
//!
//! When no feed entry clears the relevance threshold for a category, the
//! digest slot is filled with a short fact instead: a pseudo-randomly chosen
//! Wikipedia page from a per-category pool, summarized to two sentences. If
//! Wikipedia is unreachable (or keeps returning empty/disambiguation pages),
//! a literal fact from a fixed offline pool fills the slot. The offline path
//! performs no network I/O and cannot fail, so every run always produces a
//! full set of category items.

use crate::flavor;
use crate::models::FactItem;
use crate::utils::first_two_sentences;
use crate::wiki::{PageSummary, WikiClient, WikiError};
use rand::Rng;
use tracing::{debug, info, warn};

fn page_pool(category: &str) -> &'static [&'static str] {
    match category {
        "AI" => &[
            "Artificial intelligence",
            "Machine learning",
            "Neural network",
            "Turing test",
            "Deep learning",
        ],
        "Physics" => &[
            "Quantum entanglement",
            "General relativity",
            "Higgs boson",
            "Superconductivity",
            "Double-slit experiment",
        ],
        "Entrepreneurship" => &[
            "Startup company",
            "Venture capital",
            "Entrepreneurship",
            "Silicon Valley",
            "Business incubator",
        ],
        "Space" => &[
            "James Webb Space Telescope",
            "Mars",
            "Black hole",
            "International Space Station",
            "Exoplanet",
        ],
        "Biology" => &[
            "DNA",
            "CRISPR gene editing",
            "Tardigrade",
            "Photosynthesis",
            "Mitochondrion",
        ],
        "Health" => &[
            "Immune system",
            "Vaccine",
            "Human brain",
            "Antibiotic",
            "Circadian rhythm",
        ],
        "Environment" => &[
            "Climate change",
            "Coral reef",
            "Carbon cycle",
            "Amazon rainforest",
            "Ocean acidification",
        ],
        _ => &[
            "Scientific method",
            "Periodic table",
            "Speed of light",
            "Evolution",
            "Plate tectonics",
        ],
    }
}

fn offline_pool(category: &str) -> &'static [&'static str] {
    match category {
        "AI" => &[
            "The term 'artificial intelligence' was coined for the Dartmouth workshop in 1956.",
            "The perceptron, one of the first trainable neural networks, was built in 1958.",
            "Deep Blue beat world chess champion Garry Kasparov in 1997.",
        ],
        "Physics" => &[
            "Light takes about eight minutes and twenty seconds to travel from the Sun to Earth.",
            "Helium was discovered in the Sun's spectrum before it was found on Earth.",
            "A teaspoon of neutron star material would weigh billions of tonnes.",
        ],
        "Entrepreneurship" => &[
            "Several major technology companies, including HP and Amazon, started in garages.",
            "The first recorded venture capital firm, ARDC, was founded in 1946.",
            "Post-it Notes came from a failed attempt to invent a super-strong adhesive.",
        ],
        "Space" => &[
            "A day on Venus is longer than its year.",
            "Neutron stars can spin several hundred times per second.",
            "The footprints on the Moon will likely remain for millions of years.",
        ],
        "Biology" => &[
            "Stretched out, the DNA in a single human cell would be about two meters long.",
            "Tardigrades can survive the vacuum of space.",
            "Octopuses have three hearts and blue blood.",
        ],
        "Health" => &[
            "The human brain uses roughly twenty percent of the body's energy.",
            "Your body replaces most of its red blood cells every few months.",
            "Gut bacteria outnumber human cells in your body.",
        ],
        "Environment" => &[
            "The Amazon rainforest produces a significant share of the oxygen made on land.",
            "Phytoplankton in the oceans generate about half of Earth's oxygen.",
            "A single mature tree can absorb tens of kilograms of CO2 per year.",
        ],
        _ => &[
            "Honey found in ancient Egyptian tombs was still edible after thousands of years.",
            "Water can boil and freeze at the same time at its triple point.",
            "Bananas are mildly radioactive thanks to their potassium content.",
        ],
    }
}

/// Build a digest item from a fetched page summary.
fn online_fact(category: &str, summary: &PageSummary, rng: &mut impl Rng) -> FactItem {
    // Image lookup is disabled; the thumbnail only shows up in traces.
    if let Some(thumb) = &summary.thumbnail {
        debug!(thumbnail = %thumb.source, "Ignoring page thumbnail");
    }
    let url = summary.page_url();
    let mut item = FactItem::bare(
        summary.title.clone(),
        format!("Did you know? {}", first_two_sentences(&summary.extract)),
        url.clone(),
        category.to_string(),
    );
    item.wiki_url = url;
    item.hook = flavor::hook_for(category, rng);
    item.question = flavor::question_for(category, rng);
    item
}

/// Build a digest item from the offline fact pool.
///
/// No network, no failure modes. Offline facts have nothing to link to, so
/// `link` and `wiki_url` stay empty.
pub fn offline_fact(category: &str, rng: &mut impl Rng) -> FactItem {
    let pool = offline_pool(category);
    let fact = pool[rng.random_range(0..pool.len())];
    let mut item = FactItem::bare(
        format!("Quick fact: {}", category),
        format!("Did you know? {}", fact),
        String::new(),
        category.to_string(),
    );
    item.hook = flavor::hook_for(category, rng);
    item.question = flavor::question_for(category, rng);
    item
}

/// Synthesize a fallback fact for a category. Never fails.
///
/// Tries one pseudo-random page from the category pool; on an empty extract
/// or a disambiguation page, re-rolls once with a different pool member.
/// Every other failure (and a failed re-roll) lands on the offline pool.
pub async fn fallback_fact(wiki: &WikiClient, category: &str, rng: &mut impl Rng) -> FactItem {
    let pool = page_pool(category);
    let first = pool[rng.random_range(0..pool.len())];

    match wiki.summary(first).await {
        Ok(summary) => {
            debug!(category, page = first, "Fallback fact from Wikipedia");
            return online_fact(category, &summary, rng);
        }
        Err(e @ (WikiError::EmptyExtract(_) | WikiError::Disambiguation(_))) => {
            warn!(category, page = first, error = %e, "Unusable page; re-rolling once");
            let second = pool[rng.random_range(0..pool.len())];
            let second = if second == first && pool.len() > 1 {
                pool[(pool.iter().position(|p| *p == first).unwrap_or(0) + 1) % pool.len()]
            } else {
                second
            };
            if let Ok(summary) = wiki.summary(second).await {
                debug!(category, page = second, "Fallback fact from second pick");
                return online_fact(category, &summary, rng);
            }
        }
        Err(e) => {
            warn!(category, page = first, error = %e, "Summary fetch failed");
        }
    }

    info!(category, "Using offline fact");
    offline_fact(category, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::CATEGORIES;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_offline_fact_never_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        for category in CATEGORIES {
            let item = offline_fact(category, &mut rng);
            assert_eq!(item.category, category);
            assert!(item.summary.starts_with("Did you know? "));
            assert!(!item.hook.is_empty());
            assert!(!item.question.is_empty());
        }
    }

    #[test]
    fn test_offline_fact_has_no_links_or_media() {
        let mut rng = StdRng::seed_from_u64(3);
        let item = offline_fact("Space", &mut rng);
        assert_eq!(item.link, "");
        assert_eq!(item.wiki_url, "");
        assert_eq!(item.image, "");
        assert!(item.images.is_empty());
        assert!(item.audio.is_none());
    }

    #[test]
    fn test_online_fact_truncates_extract_and_links_page() {
        let mut rng = StdRng::seed_from_u64(3);
        let summary: PageSummary = serde_json::from_str(
            r#"{
                "title": "Tardigrade",
                "extract": "Tardigrades are micro-animals. They survive extremes. They are everywhere.",
                "content_urls": {"desktop": {"page": "https://en.wikipedia.org/wiki/Tardigrade"}}
            }"#,
        )
        .unwrap();
        let item = online_fact("Biology", &summary, &mut rng);
        assert_eq!(
            item.summary,
            "Did you know? Tardigrades are micro-animals. They survive extremes."
        );
        assert_eq!(item.link, "https://en.wikipedia.org/wiki/Tardigrade");
        assert_eq!(item.wiki_url, "https://en.wikipedia.org/wiki/Tardigrade");
        assert_eq!(item.category, "Biology");
        assert_eq!(item.image, "");
    }

    #[test]
    fn test_every_category_has_pools() {
        for category in CATEGORIES {
            assert!(!page_pool(category).is_empty());
            assert!(!offline_pool(category).is_empty());
        }
    }
}
