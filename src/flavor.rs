//! Flavor text attached to every digest item.
//!
//! Each category has a small pool of "hooks" (one-line teasers shown above
//! the card) and "questions" (a prompt shown below it). One of each is
//! picked pseudo-randomly per item. The RNG is injected by the caller so
//! runs can be pinned with a seed; production passes an OS-seeded one.

use rand::Rng;

const GENERIC_HOOKS: [&str; 3] = [
    "Science never sleeps.",
    "A little knowledge goes a long way.",
    "Today's world, explained by research.",
];

const GENERIC_QUESTIONS: [&str; 3] = [
    "What would you ask the researchers behind this?",
    "How might this change everyday life?",
    "What should scientists look at next?",
];

fn hooks_for(category: &str) -> &'static [&'static str] {
    match category {
        "AI" => &[
            "Machines are learning faster than ever.",
            "The algorithms are watching — and improving.",
            "Another step toward thinking machines.",
        ],
        "Physics" => &[
            "The universe runs on rules stranger than fiction.",
            "Reality is weirder the closer you look.",
            "From quarks to quasars, physics explains it.",
        ],
        "Entrepreneurship" => &[
            "Big ideas start small.",
            "Someone turned a lab result into a company.",
            "Innovation is a business, too.",
        ],
        "Space" => &[
            "The cosmos has news for you.",
            "Look up — something's happening out there.",
            "Another postcard from the universe.",
        ],
        "Biology" => &[
            "Life finds a way, and scientists find out how.",
            "Every cell has a story.",
            "Nature's machinery, decoded.",
        ],
        "Health" => &[
            "Your body is more surprising than you think.",
            "Medicine moves forward one study at a time.",
            "Small habits, big science.",
        ],
        "Environment" => &[
            "The planet is talking. Researchers are listening.",
            "Earth's systems, measured and mapped.",
            "Climate science, fresh from the field.",
        ],
        _ => &GENERIC_HOOKS,
    }
}

fn questions_for(category: &str) -> &'static [&'static str] {
    match category {
        "AI" => &[
            "Could an algorithm do your job better than you?",
            "Where should machines never make the call?",
            "What would you teach an AI first?",
        ],
        "Physics" => &[
            "If you could run one impossible experiment, what would it be?",
            "What everyday thing do you think physics can't explain?",
            "Does the quantum world change how you see reality?",
        ],
        "Entrepreneurship" => &[
            "What discovery would you build a company around?",
            "What problem deserves a startup that doesn't have one?",
            "Would you bet your savings on this idea?",
        ],
        "Space" => &[
            "Would you take a one-way trip to Mars?",
            "What do you hope we find out there?",
            "Which planet deserves its own mission next?",
        ],
        "Biology" => &[
            "What would you edit if you could edit genes?",
            "Which species do you think holds the next big secret?",
            "How much of you is really you, and not your microbes?",
        ],
        "Health" => &[
            "What health advice do you wish had more evidence?",
            "Would you try a treatment tested only on mice?",
            "What should medicine cure first?",
        ],
        "Environment" => &[
            "What would you give up to cut your footprint in half?",
            "Which ecosystem would you protect first?",
            "Is technology the fix or the problem here?",
        ],
        _ => &GENERIC_QUESTIONS,
    }
}

/// Pick a hook for a category.
pub fn hook_for(category: &str, rng: &mut impl Rng) -> String {
    let pool = hooks_for(category);
    pool[rng.random_range(0..pool.len())].to_string()
}

/// Pick a question for a category.
pub fn question_for(category: &str, rng: &mut impl Rng) -> String {
    let pool = questions_for(category);
    pool[rng.random_range(0..pool.len())].to_string()
}
