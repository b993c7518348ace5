//! Finance-news lexicon scorer.

/// Word weights for market headlines.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("soar", 0.5),
    ("soars", 0.5),
    ("soared", 0.5),
    ("surge", 0.4),
    ("surges", 0.4),
    ("surged", 0.4),
    ("rally", 0.4),
    ("rallies", 0.4),
    ("jump", 0.3),
    ("jumps", 0.3),
    ("gain", 0.3),
    ("gains", 0.3),
    ("rise", 0.3),
    ("rises", 0.3),
    ("record", 0.3),
    ("beat", 0.4),
    ("beats", 0.4),
    ("profit", 0.3),
    ("growth", 0.3),
    ("strong", 0.3),
    ("upgrade", 0.4),
    ("upgraded", 0.4),
    ("bullish", 0.5),
    ("outperform", 0.4),
    ("breakthrough", 0.4),
    ("approval", 0.4),
    ("approved", 0.4),
    ("wins", 0.4),
    ("win", 0.4),
    ("boost", 0.3),
    ("boosts", 0.3),
    ("expands", 0.2),
    ("launch", 0.2),
    ("launches", 0.2),
    ("partnership", 0.2),
    ("best", 0.4),
    ("great", 0.4),
    // Negative signals
    ("crash", -0.6),
    ("crashes", -0.6),
    ("plunge", -0.5),
    ("plunges", -0.5),
    ("plunged", -0.5),
    ("slump", -0.4),
    ("slumps", -0.4),
    ("fall", -0.3),
    ("falls", -0.3),
    ("drop", -0.3),
    ("drops", -0.3),
    ("loss", -0.4),
    ("losses", -0.4),
    ("miss", -0.4),
    ("misses", -0.4),
    ("downgrade", -0.4),
    ("downgraded", -0.4),
    ("bearish", -0.5),
    ("lawsuit", -0.5),
    ("sued", -0.5),
    ("subpoena", -0.4),
    ("investigation", -0.4),
    ("recall", -0.6),
    ("recalls", -0.6),
    ("fraud", -0.7),
    ("layoffs", -0.5),
    ("cuts", -0.3),
    ("bankruptcy", -0.8),
    ("fine", -0.3),
    ("fined", -0.4),
    ("faces", -0.2),
    ("warning", -0.4),
    ("weak", -0.3),
    ("concern", -0.3),
    ("concerns", -0.3),
    ("worst", -0.5),
];

/// Score a text string using the lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}
