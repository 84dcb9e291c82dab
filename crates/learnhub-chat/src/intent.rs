//! Keyword rules for the offline assistant.
//!
//! Input is normalized (lowercased, a fixed punctuation set stripped) and
//! tested against each [`Intent`] in priority order. Matching is plain
//! substring containment: the first intent with any keyword present wins.

use std::sync::LazyLock;

use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,/#!$%^&*;:{}=\-_`~()]").expect("Invalid punctuation regex"));

/// Encouragement replies used when no intent matches.
pub const DEFAULT_RESPONSES: [&str; 7] = [
    "That's a great question! Based on your progress, I recommend focusing on the machine learning module next.",
    "I've analyzed your learning pattern and suggest reviewing the recent quiz on data structures.",
    "You're making excellent progress! Would you like me to recommend some advanced exercises?",
    "According to your learning history, you might enjoy our new course on AI ethics.",
    "Have you considered exploring the practical applications of what you've learned so far? I can suggest some projects.",
    "Based on your interests, I think you might find the new workshop on neural networks valuable.",
    "Your consistent study habits are impressive! Research shows that spaced repetition like you're doing leads to better retention.",
];

/// Lowercase the input and strip the punctuation the rules ignore.
///
/// `?` and `'` are kept.
pub fn normalize_input(input: &str) -> String {
    PUNCTUATION_RE
        .replace_all(&input.to_lowercase(), "")
        .into_owned()
}

/// Category of a user message, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    LearningPath,
    Recommendation,
    Progress,
    Assessment,
    Help,
    Gratitude,
    Greeting,
}

impl Intent {
    /// Every intent, highest priority first.
    pub const PRIORITY: [Intent; 7] = [
        Intent::LearningPath,
        Intent::Recommendation,
        Intent::Progress,
        Intent::Assessment,
        Intent::Help,
        Intent::Gratitude,
        Intent::Greeting,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::LearningPath => &["learning path", "roadmap"],
            Intent::Recommendation => &["recommend", "suggestion", "course"],
            Intent::Progress => &["progress", "how am i doing"],
            Intent::Assessment => &["quiz", "test", "assessment"],
            Intent::Help => &["help", "confused", "understand"],
            Intent::Gratitude => &["thank", "thanks"],
            Intent::Greeting => &["hello", "hi", "hey"],
        }
    }

    pub fn response(self) -> &'static str {
        match self {
            Intent::LearningPath => "Based on your profile and progress, I recommend starting with the fundamentals of AI and machine learning before moving to more advanced topics. Would you like me to create a personalized learning path for you?",
            Intent::Recommendation => "I can recommend courses based on your interests. Our \"Introduction to Artificial Intelligence\" course has excellent reviews and matches your learning profile. Would you like more information about it?",
            Intent::Progress => "You're making excellent progress! You've completed 65% of your current course and your quiz scores are above average. Keep up the good work!",
            Intent::Assessment => "Would you like me to generate a practice quiz on your recent learning topics? This can help reinforce your knowledge and identify areas for improvement.",
            Intent::Help => "I'm here to help! Could you tell me which specific concept or topic you're having trouble with? I can provide explanations, examples, or additional resources.",
            Intent::Gratitude => "You're welcome! Is there anything else I can help you with in your learning journey?",
            Intent::Greeting => "Hello! How can I assist with your learning today?",
        }
    }

    /// Whether an already-normalized message contains any of this intent's keywords.
    pub fn matches(self, normalized: &str) -> bool {
        self.keywords().iter().any(|kw| normalized.contains(kw))
    }

    /// First intent, in priority order, matching the raw input.
    pub fn classify(input: &str) -> Option<Intent> {
        let normalized = normalize_input(input);
        Self::PRIORITY
            .into_iter()
            .find(|intent| intent.matches(&normalized))
    }
}

/// Pick one of the default replies uniformly at random.
pub fn pick_default<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DEFAULT_RESPONSES
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_RESPONSES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize_input("Hello, World!"), "hello world");
        assert_eq!(normalize_input("a.b/c#d$e%f^g&h*i;j:k{l}m=n-o_p`q~r(s)t"), "abcdefghijklmnopqrst");
    }

    #[test]
    fn test_normalize_keeps_question_mark_and_apostrophe() {
        assert_eq!(normalize_input("How's it going?"), "how's it going?");
    }

    #[test]
    fn test_priority_order_is_fixed() {
        assert_eq!(Intent::PRIORITY[0], Intent::LearningPath);
        assert_eq!(Intent::PRIORITY[6], Intent::Greeting);
    }

    #[test]
    fn test_learning_path_beats_recommendation() {
        let intent = Intent::classify("can you recommend a course for my learning path");
        assert_eq!(intent, Some(Intent::LearningPath));
    }

    #[test]
    fn test_roadmap_keyword() {
        assert_eq!(Intent::classify("Show me a ROADMAP"), Some(Intent::LearningPath));
    }

    #[test]
    fn test_each_category() {
        let cases = [
            ("Any suggestion?", Intent::Recommendation),
            ("What course should I take", Intent::Recommendation),
            ("How am I doing?", Intent::Progress),
            ("show my progress", Intent::Progress),
            ("give me a quiz", Intent::Assessment),
            ("I have an assessment tomorrow", Intent::Assessment),
            ("I'm confused", Intent::Help),
            ("i don't understand recursion", Intent::Help),
            ("Thanks!", Intent::Gratitude),
            ("thank you so much", Intent::Gratitude),
            ("Hey", Intent::Greeting),
            ("hello there", Intent::Greeting),
        ];
        for (input, expected) in cases {
            assert_eq!(Intent::classify(input), Some(expected), "input: {}", input);
        }
    }

    #[test]
    fn test_progress_beats_assessment() {
        assert_eq!(
            Intent::classify("what's my progress on the quiz"),
            Some(Intent::Progress)
        );
    }

    #[test]
    fn test_substring_matching_inside_words() {
        // "this" contains "hi"
        assert_eq!(Intent::classify("what is this"), Some(Intent::Greeting));
        // "latest" contains "test"
        assert_eq!(Intent::classify("the latest news"), Some(Intent::Assessment));
    }

    #[test]
    fn test_punctuation_split_keyword_still_matches() {
        // "road-map" normalizes to "roadmap"
        assert_eq!(Intent::classify("road-map please"), Some(Intent::LearningPath));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(Intent::classify("what about neural nets"), None);
        assert_eq!(Intent::classify(""), None);
    }

    #[test]
    fn test_responses_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for intent in Intent::PRIORITY {
            assert!(seen.insert(intent.response()));
        }
    }

    #[test]
    fn test_pick_default_returns_member() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let reply = pick_default(&mut rng);
            assert!(DEFAULT_RESPONSES.contains(&reply));
        }
    }

    #[test]
    fn test_pick_default_covers_all_entries() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(pick_default(&mut rng));
        }
        assert_eq!(seen.len(), DEFAULT_RESPONSES.len());
    }
}
