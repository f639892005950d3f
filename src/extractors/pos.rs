// src/extractors/pos.rs

// --- Imports ---
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::vocabulary::VocabularyRecord;

// --- Override Tables ---
// Function words and words whose suffixes mislead the heuristics below.
const CONJUNCTIONS: &[&str] = &[
    "albeit", "furthermore", "hence", "henceforth", "moreover", "nevertheless",
    "nonetheless", "notwithstanding", "otherwise", "therefore", "thus",
    "whereas", "whereby",
];

const PREPOSITIONS: &[&str] = &[
    "amid", "despite", "per", "throughout", "versus", "via",
];

const ADVERBS: &[&str] = &[
    "chiefly", "conversely", "correspondingly", "farther", "formerly",
    "hitherto", "likewise", "merely", "namely", "notably", "precisely",
    "presumably", "scarcely", "seemingly", "seldom", "solely", "subsequently",
    "thereby", "virtually",
];

const ADJECTIVES: &[&str] = &[
    "abrupt", "akin", "avid", "benign", "bleak", "candid", "chronic",
    "contradictory", "contrary", "dire", "dormant", "elusive", "exempt",
    "fierce", "frugal", "futile", "grave", "harsh", "hostile", "immune",
    "intact", "keen", "lavish", "lethal", "mediocre", "mundane", "obscure",
    "obsolete", "overt", "prone", "reckless", "rigid", "robust", "scarce",
    "secluded", "sheer", "solemn", "sparse", "stern", "subtle", "supreme",
    "vague", "vivid", "wary",
];

const NOUNS: &[&str] = &[
    "aftermath", "apparatus", "backlash", "breach", "brink", "census",
    "clause", "clue", "consensus", "crux", "deficit", "dilemma", "drawback",
    "drought", "feat", "fiasco", "flaw", "fraud", "gist", "hallmark",
    "hazard", "jargon", "loophole", "morale", "niche", "nuance", "paradox",
    "peer", "plight", "ploy", "premise", "pretext", "quota", "realm", "rift",
    "setback", "stake", "stance", "stigma", "threshold", "toll", "trait",
    "turmoil", "upheaval", "verdict", "verge", "welfare", "yield",
];

const VERBS: &[&str] = &[
    "abhor", "abstain", "amass", "amend", "avert", "coerce", "coincide",
    "compel", "comply", "concede", "condone", "curtail", "deceive", "deem",
    "defer", "defy", "depict", "deter", "dwell", "embark", "emit", "endorse",
    "ensue", "entail", "erode", "evade", "exert", "fathom", "feign", "forge",
    "forsake", "foster", "glean", "grapple", "hamper", "harness", "hinder",
    "hoard", "impede", "impose", "incur", "infer", "linger", "loom", "omit",
    "opt", "oust", "plead", "pledge", "plummet", "ponder", "quell", "reap",
    "reckon", "refrain", "refute", "retain", "revoke", "salvage", "seize",
    "sever", "shun", "squander", "stem", "succumb", "suppress", "sustain",
    "sway", "tamper", "thrive", "traverse", "undermine", "undertake", "wane",
    "wield", "withhold", "wreak",
];

// Dotted abbreviations that ABBREVIATION_RE cannot catch ("etc." has no
// inner dot) are listed here alongside the common ones.
const ABBREVIATIONS: &[&str] = &["e.g.", "i.e.", "etc."];

/// Curated per-word overrides. Checked before every heuristic.
static EXPLICIT_POS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let groups: &[(&[&'static str], &'static str)] = &[
        (CONJUNCTIONS, "conj"),
        (PREPOSITIONS, "prep"),
        (ADVERBS, "adv"),
        (ADJECTIVES, "adj"),
        (NOUNS, "noun"),
        (VERBS, "verb"),
        (ABBREVIATIONS, "abbr"),
    ];

    let mut table = HashMap::new();
    for (words, pos) in groups {
        for word in *words {
            table.insert(*word, *pos);
        }
    }
    table
});

// --- Regex Patterns (Lazy Static) ---
/// Dotted abbreviations like "e.g." or "i.e.".
static ABBREVIATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]\.([a-z]\.)+$").expect("Failed to compile ABBREVIATION_RE")
});

// --- Suffix Heuristics ---
const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ance", "ence", "ism", "ist",
    "dom", "ship", "hood", "ure", "age", "ry",
];

const ADJ_SUFFIXES: &[&str] = &[
    "ful", "ous", "ive", "ible", "able", "ent", "ant", "ial", "ical", "al",
    "less", "like", "ish", "ory", "ary", "ic",
];

const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify", "ate", "en"];

/// Guesses a part-of-speech tag for one vocabulary entry.
///
/// Priority: explicit overrides, inline annotations in the term, multi-word
/// detection, dotted abbreviations, suffix heuristics, Hebrew gloss hints,
/// then `noun`.
pub fn guess_pos(english: &str, hebrew: &str) -> &'static str {
    let word = english.trim().to_lowercase();

    if let Some(pos) = EXPLICIT_POS.get(word.as_str()).copied() {
        return pos;
    }

    // Terms may annotate themselves, e.g. "content (adj)"
    if word.contains("(adj)") {
        return "adj";
    }
    if word.contains("(v)") {
        return "verb";
    }
    if word.contains("(n)") {
        return "noun";
    }

    if word.contains(' ') && !word.contains('(') {
        return "phrase";
    }

    if ABBREVIATION_RE.is_match(&word) {
        return "abbr";
    }

    if NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return "noun";
    }
    if ADJ_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return "adj";
    }
    if word.ends_with("ly") {
        return "adv";
    }
    if word.len() > 4 && VERB_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return "verb";
    }
    if word.len() > 5 && word.ends_with("ing") {
        return "adj";
    }
    if word.len() > 4 && word.ends_with("ed") {
        return "adj";
    }

    // Hebrew glosses for verbs are usually infinitives (prefixed with ל)
    if hebrew.contains("פועל") || hebrew.contains("לבצע") || hebrew.starts_with('ל') {
        return "verb";
    }

    "noun"
}

/// Rewrites the `pos` field of every record in place. Returns how many
/// records changed.
pub fn retag_records(records: &mut [VocabularyRecord]) -> usize {
    let mut changed = 0;
    for record in records.iter_mut() {
        let pos = guess_pos(&record.english, &record.hebrew);
        if record.pos != pos {
            record.pos = pos.to_string();
            changed += 1;
        }
    }
    tracing::info!("Retagged {}/{} records", changed, records.len());
    changed
}

/// Tag frequency table, most common first, for the completion report.
pub fn pos_distribution(records: &[VocabularyRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.pos.as_str()).or_insert(0) += 1;
    }

    let mut distribution: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(pos, count)| (pos.to_string(), count))
        .collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    distribution
}
