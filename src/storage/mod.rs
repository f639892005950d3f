// src/storage/mod.rs
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::vocabulary::VocabularyRecord;
use crate::utils::error::StorageError;

/// Matches the `export const NAME = [...];` wrapper of a dataset module and
/// captures the constant name and the JSON array body.
static DATASET_WRAPPER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^export const ([A-Za-z_][A-Za-z0-9_]*) = (\[.*\]);?\s*$")
        .expect("Failed to compile DATASET_WRAPPER_RE")
});

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes the dataset module into the base directory, overwriting any
    /// existing file. Returns the path written.
    pub fn save_dataset(
        &self,
        records: &[VocabularyRecord],
        file_name: &str,
        const_name: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name);
        write_dataset(&file_path, records, const_name)?;

        tracing::info!("Saved dataset to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about the extraction in JSON format, next to the
    /// dataset module
    pub fn save_dataset_metadata(
        &self,
        records: &[VocabularyRecord],
        source: &Path,
        file_name: &str,
    ) -> Result<PathBuf, StorageError> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        let file_path = self.base_dir.join(format!("{}_meta.json", stem));

        let categories: BTreeSet<&str> =
            records.iter().map(|r| r.category.as_str()).collect();

        let metadata = serde_json::json!({
            "source": source.display().to_string(),
            "dataset_file": file_name,
            "record_count": records.len(),
            "category_count": categories.len(),
            "categories": categories,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

/// Renders records as a JavaScript module literal. serde_json emits
/// non-ASCII content literally, so Hebrew text survives unescaped.
pub fn render_dataset_module(
    records: &[VocabularyRecord],
    const_name: &str,
) -> Result<String, StorageError> {
    let body = serde_json::to_string_pretty(records)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    Ok(format!("export const {} = {};\n", const_name, body))
}

/// Writes the dataset module to `path`, overwriting any existing content.
pub fn write_dataset(
    path: &Path,
    records: &[VocabularyRecord],
    const_name: &str,
) -> Result<(), StorageError> {
    let module = render_dataset_module(records, const_name)?;
    fs::write(path, module).map_err(StorageError::IoError)
}

/// Parses the text of a dataset module back into its constant name and
/// records.
pub fn parse_dataset_module(
    content: &str,
) -> Result<(String, Vec<VocabularyRecord>), StorageError> {
    let caps = DATASET_WRAPPER_RE.captures(content.trim()).ok_or_else(|| {
        StorageError::MalformedDataset(
            "expected an `export const NAME = [...];` module".to_string(),
        )
    })?;

    let const_name = caps[1].to_string();
    let records: Vec<VocabularyRecord> = serde_json::from_str(&caps[2])
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

    Ok((const_name, records))
}

/// Loads a previously written dataset module from disk.
pub fn load_dataset(path: &Path) -> Result<(String, Vec<VocabularyRecord>), StorageError> {
    let content = fs::read_to_string(path).map_err(StorageError::IoError)?;
    let parsed = parse_dataset_module(&content)?;
    tracing::info!(
        "Loaded {} records (const {}) from {}",
        parsed.1.len(),
        parsed.0,
        path.display()
    );
    Ok(parsed)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::vocabulary::PLACEHOLDER_POS;

    fn sample_records() -> Vec<VocabularyRecord> {
        vec![
            VocabularyRecord {
                id: 1,
                english: "hello".to_string(),
                hebrew: "שלום".to_string(),
                example: "hello there".to_string(),
                category: "General".to_string(),
                pos: PLACEHOLDER_POS.to_string(),
            },
            VocabularyRecord {
                id: 2,
                english: "world".to_string(),
                hebrew: "עולם".to_string(),
                example: "small world".to_string(),
                category: "General".to_string(),
                pos: PLACEHOLDER_POS.to_string(),
            },
        ]
    }

    #[test]
    fn module_wrapper_and_literal_hebrew() {
        let module = render_dataset_module(&sample_records(), "VOCABULARY").unwrap();

        assert!(module.starts_with("export const VOCABULARY = ["));
        assert!(module.trim_end().ends_with("];"));
        // Hebrew must be emitted literally, not as \u escapes
        assert!(module.contains("שלום"));
        assert!(!module.contains("\\u"));
    }

    #[test]
    fn module_roundtrip() {
        let records = sample_records();
        let module = render_dataset_module(&records, "WORDS").unwrap();

        let (const_name, parsed) = parse_dataset_module(&module).unwrap();
        assert_eq!(const_name, "WORDS");
        assert_eq!(parsed, records);
    }

    #[test]
    fn malformed_module_is_rejected() {
        assert!(matches!(
            parse_dataset_module("const VOCABULARY = [];"),
            Err(StorageError::MalformedDataset(_))
        ));
        assert!(matches!(
            parse_dataset_module("export const VOCABULARY = {};"),
            Err(StorageError::MalformedDataset(_))
        ));
    }

    #[test]
    fn dataset_roundtrip_on_disk() {
        let dir = std::env::temp_dir()
            .join(format!("vocab_extractor_storage_test_{}", std::process::id()));
        let storage = StorageManager::new(&dir).unwrap();

        let records = sample_records();
        let path = storage
            .save_dataset(&records, "vocabulary.js", "VOCABULARY")
            .unwrap();
        let (const_name, loaded) = load_dataset(&path).unwrap();

        assert_eq!(const_name, "VOCABULARY");
        assert_eq!(loaded, records);

        std::fs::remove_dir_all(&dir).ok();
    }
}
