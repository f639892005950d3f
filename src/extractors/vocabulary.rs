// src/extractors/vocabulary.rs

// --- Imports ---
use serde::{Deserialize, Serialize};

// --- Constants ---
/// Part-of-speech value assigned to every freshly extracted record. The
/// source document carries no part-of-speech information, so nothing can be
/// inferred at extraction time; the `tag` pass rewrites this later.
pub const PLACEHOLDER_POS: &str = "general";

/// Marker opening a level-2 header line.
const HEADER_MARKER: &str = "##";

/// Column-header word of the primary-term column. Rows repeating the table
/// header carry this word (in any casing) in their first cell.
const PRIMARY_COLUMN_HEADER: &str = "english";

/// Fragment identifying markdown separator rows (`|---|---|---|`).
const SEPARATOR_MARKER: &str = "---";

// --- Data Structures ---
/// One vocabulary entry of the emitted dataset.
///
/// Identifiers are contiguous starting at 1, in output order. Serialized
/// field names are the dataset's JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    pub id: u32,
    pub english: String,
    pub hebrew: String,
    pub example: String,
    pub category: String,
    pub pos: String,
}

// --- Main Extractor Structure ---
pub struct VocabularyExtractor;

impl VocabularyExtractor {
    pub fn new() -> Self { Self {} }

    /// Extracts vocabulary records from markdown-like document text.
    ///
    /// A single pass over the lines: a level-2 header opens a new section and
    /// fixes the category for the rows that follow; three-cell pipe rows that
    /// survive the artifact filter become records. Lines before the first
    /// header are preamble and carry no vocabulary data. Malformed lines are
    /// skipped, never reported; extraction itself cannot fail.
    pub fn extract(&self, text: &str) -> Vec<VocabularyRecord> {
        let mut records: Vec<VocabularyRecord> = Vec::new();
        let mut current_category: Option<String> = None;

        for line in text.lines() {
            if let Some(label) = header_label(line) {
                let category = derive_category(label);
                tracing::debug!("Entering section '{}' (header '{}')", category, label);
                current_category = Some(category);
                continue;
            }

            let category = match &current_category {
                Some(category) => category,
                None => continue, // preamble
            };

            let (english, hebrew, example) = match split_table_row(line) {
                Some(row) => row,
                None => continue,
            };

            if is_artifact_row(english) {
                tracing::trace!("Dropping artifact row: '{}'", line.trim());
                continue;
            }

            records.push(VocabularyRecord {
                id: records.len() as u32 + 1,
                english: english.to_string(),
                hebrew: hebrew.to_string(),
                example: example.to_string(),
                category: category.clone(),
                pos: PLACEHOLDER_POS.to_string(),
            });
        }

        tracing::info!("Extracted {} vocabulary records", records.len());
        records
    }
}

// --- Recognizer Predicates & Helpers ---

/// Recognizes a level-2 header line (`## Label`) and returns its label.
/// Deeper headings (`###`) and bare `##` markers do not open sections.
fn header_label(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(HEADER_MARKER)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let label = rest.trim();
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

/// Derives the category key from a bilingual header label.
///
/// Headers follow the "native-name (translated-name)" convention and the
/// translated form inside the innermost parentheses is the stable key.
/// Labels without a (non-empty) parenthesized part are used whole.
fn derive_category(label: &str) -> String {
    if let Some(open) = label.rfind('(') {
        if let Some(close) = label[open + 1..].find(')') {
            let inner = label[open + 1..open + 1 + close].trim();
            if !inner.is_empty() {
                return inner.to_string();
            }
        }
    }
    label.trim().to_string()
}

/// Recognizes a three-cell pipe-delimited table line (`| a | b | c |`) and
/// returns its trimmed cells. Cells may be empty. Prose, blank lines, and
/// tables of any other width yield `None`.
fn split_table_row(line: &str) -> Option<(&str, &str, &str)> {
    let inner = line.trim().strip_prefix('|')?.strip_suffix('|')?;
    let mut cells = inner.split('|').map(str::trim);
    match (cells.next(), cells.next(), cells.next(), cells.next()) {
        (Some(english), Some(hebrew), Some(example), None) => Some((english, hebrew, example)),
        _ => None,
    }
}

/// True for rows that are table furniture rather than vocabulary: repeated
/// header rows, separator rows, and rows with an empty primary term. All
/// three checks apply to the first cell only.
fn is_artifact_row(primary: &str) -> bool {
    primary.is_empty()
        || primary.eq_ignore_ascii_case(PRIMARY_COLUMN_HEADER)
        || primary.contains(SEPARATOR_MARKER)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DOC: &str = "\
Some introductory prose that belongs to no section.

## General (General)

| English | Hebrew | Example |
|---|---|---|
| hello | שלום | hello there |
| | | |
| world | עולם | small world |
";

    #[test]
    fn sample_document_yields_two_records() {
        let records = VocabularyExtractor::new().extract(SAMPLE_DOC);

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            VocabularyRecord {
                id: 1,
                english: "hello".to_string(),
                hebrew: "שלום".to_string(),
                example: "hello there".to_string(),
                category: "General".to_string(),
                pos: "general".to_string(),
            }
        );
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].english, "world");
        assert_eq!(records[1].hebrew, "עולם");
        assert_eq!(records[1].example, "small world");
    }

    #[test]
    fn document_without_headers_yields_nothing() {
        // Rows in the preamble carry no category and are dropped with it.
        let records = VocabularyExtractor::new().extract("prose only\n| a | b | c |\n");
        assert!(records.is_empty());

        let records = VocabularyExtractor::new().extract("");
        assert!(records.is_empty());
    }

    #[test]
    fn ids_are_contiguous_across_sections() {
        let doc = "\
## קישורים (Connectors)
| albeit | אם כי | He accepted, albeit reluctantly. |
| amid | בתוך | She stayed calm amid the chaos. |

## Miscellaneous
| verdict | פסק דין | The jury reached a verdict. |
";
        let records = VocabularyExtractor::new().extract(doc);

        let ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[0].category, "Connectors");
        assert_eq!(records[1].category, "Connectors");
        assert_eq!(records[2].category, "Miscellaneous");
    }

    #[test]
    fn order_follows_the_document() {
        let doc = "\
## B (Second)
| bravo | ב | b |
## A (First)
| alpha | א | a |
";
        let records = VocabularyExtractor::new().extract(doc);
        let terms: Vec<&str> = records.iter().map(|r| r.english.as_str()).collect();
        assert_eq!(terms, vec!["bravo", "alpha"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = VocabularyExtractor::new();
        assert_eq!(extractor.extract(SAMPLE_DOC), extractor.extract(SAMPLE_DOC));
    }

    #[test]
    fn header_and_separator_rows_are_excluded() {
        assert!(is_artifact_row("English"));
        assert!(is_artifact_row("ENGLISH"));
        assert!(is_artifact_row("---"));
        assert!(is_artifact_row("------"));
        assert!(is_artifact_row(""));
        assert!(!is_artifact_row("hello"));
        assert!(!is_artifact_row("well-known")); // hyphens below the separator threshold
    }

    #[test]
    fn bilingual_labels_use_the_translated_form() {
        assert_eq!(derive_category("קישורים (Connectors)"), "Connectors");
        assert_eq!(derive_category("Miscellaneous"), "Miscellaneous");
        assert_eq!(derive_category("פעלים ( Verbs )"), "Verbs");
    }

    #[test]
    fn innermost_parentheses_win() {
        assert_eq!(derive_category("Outer (inner (deepest) rest)"), "deepest");
        // Unbalanced or empty parentheses fall back to the full label
        assert_eq!(derive_category("Broken (label"), "Broken (label");
        assert_eq!(derive_category("Empty ()"), "Empty ()");
    }

    #[test]
    fn non_table_lines_are_ignored() {
        let doc = "\
## General (General)
Some prose inside the section.
| two | cells |
| one | two | three | four |
| kept | נשמר | a kept row |
";
        let records = VocabularyExtractor::new().extract(doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].english, "kept");
    }

    #[test]
    fn deeper_headings_do_not_open_sections() {
        assert!(header_label("### Subsection (Nope)").is_none());
        assert!(header_label("##").is_none());
        assert!(header_label("##NoSpace").is_none());
        assert_eq!(header_label("## Verbs (Verbs)"), Some("Verbs (Verbs)"));
    }

    #[test]
    fn table_rows_keep_empty_trailing_cells() {
        // An entry without a usage example still becomes a record.
        let doc = "## General (General)\n| lone | בודד | |\n";
        let records = VocabularyExtractor::new().extract(doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].example, "");
    }
}
