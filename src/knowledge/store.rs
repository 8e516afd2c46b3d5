//! Read-only knowledge store loaded from the data directory.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use super::error::{DataLoadError, KnowledgeCategory};
use super::types::{
    CareerFile, CareerRecord, FaqEntry, FaqFile, InstitutionalValue, TrainingExample,
};
use crate::config::DataConfig;

/// FAQ entry paired with its lowercased question fragment.
#[derive(Debug, Clone)]
struct IndexedFaq {
    needle: String,
    entry: FaqEntry,
}

/// Immutable lookup surface over careers, FAQs, institutional facts and
/// training examples.
///
/// Built once at startup and shared (behind an `Arc`) by every conversation.
#[derive(Debug, Default)]
pub struct KnowledgeStore {
    careers: IndexMap<String, CareerRecord>,
    faqs: Vec<IndexedFaq>,
    institution: IndexMap<String, InstitutionalValue>,
    training: Vec<TrainingExample>,
    regime_keywords: Vec<String>,
    load_errors: Vec<DataLoadError>,
}

impl KnowledgeStore {
    /// Build a store from already parsed parts.
    #[must_use]
    pub fn from_parts(
        careers: Vec<CareerRecord>,
        faqs: Vec<FaqEntry>,
        institution: IndexMap<String, InstitutionalValue>,
    ) -> Self {
        let careers: IndexMap<String, CareerRecord> = careers
            .into_iter()
            .map(|career| (career.key.clone(), career))
            .collect();
        let faqs = faqs.into_iter().filter_map(index_faq).collect();
        let regime_keywords = collect_regime_keywords(&careers);

        Self {
            careers,
            faqs,
            institution,
            training: Vec::new(),
            regime_keywords,
            load_errors: Vec::new(),
        }
    }

    /// Attach few-shot training examples.
    #[must_use]
    pub fn with_training(mut self, training: Vec<TrainingExample>) -> Self {
        self.training = training;
        self
    }

    /// Load every collection from the configured data directory.
    ///
    /// A missing or malformed source leaves its collection empty and is
    /// recorded in [`load_errors`](Self::load_errors); loading never fails.
    pub async fn load_all(config: &DataConfig) -> Self {
        let mut errors = Vec::new();

        let careers = load_careers(&config.careers_path(), &mut errors).await;

        let faqs = match read_json::<FaqFile>(KnowledgeCategory::Faqs, &config.faqs_path()).await
        {
            Ok(file) => parse_faq_entries(file),
            Err(e) => {
                tracing::warn!(error = %e, "FAQ source unavailable");
                errors.push(e);
                Vec::new()
            }
        };

        let institution = match read_json::<IndexMap<String, InstitutionalValue>>(
            KnowledgeCategory::Institution,
            &config.institution_path(),
        )
        .await
        {
            Ok(facts) => facts,
            Err(e) => {
                tracing::warn!(error = %e, "Institutional facts unavailable");
                errors.push(e);
                IndexMap::new()
            }
        };

        let training = match read_json::<Vec<TrainingExample>>(
            KnowledgeCategory::Training,
            &config.training_path(),
        )
        .await
        {
            Ok(examples) => examples,
            Err(DataLoadError::Missing { path, .. }) => {
                tracing::debug!(path = %path.display(), "No training examples found");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Training examples unavailable");
                errors.push(e);
                Vec::new()
            }
        };

        let mut store = Self::from_parts(careers, faqs, institution).with_training(training);
        store.load_errors = errors;

        tracing::info!(
            careers = store.careers.len(),
            faqs = store.faqs.len(),
            institution_facts = store.institution.len(),
            training_examples = store.training.len(),
            load_errors = store.load_errors.len(),
            "Knowledge store loaded"
        );

        store
    }

    /// Look up a career by key (case-insensitive).
    #[must_use]
    pub fn get_career(&self, key: &str) -> Option<&CareerRecord> {
        self.careers.get(&key.to_lowercase())
    }

    /// Answer of the first FAQ (in load order) whose question is contained
    /// in the already-lowercased input.
    #[must_use]
    pub fn get_faq_answer(&self, lowered_input: &str) -> Option<&str> {
        self.faqs
            .iter()
            .find(|faq| lowered_input.contains(&faq.needle))
            .map(|faq| faq.entry.answer.as_str())
    }

    #[must_use]
    pub fn get_institutional_fact(&self, key: &str) -> Option<&InstitutionalValue> {
        self.institution.get(key)
    }

    /// Plain-text institutional fact; empty strings count as absent.
    #[must_use]
    pub fn institution_text(&self, key: &str) -> Option<&str> {
        self.get_institutional_fact(key)
            .and_then(InstitutionalValue::as_text)
            .filter(|text| !text.trim().is_empty())
    }

    /// Plain-text sub-field of a nested institutional fact.
    #[must_use]
    pub fn institution_field(&self, key: &str, field: &str) -> Option<&str> {
        self.get_institutional_fact(key)
            .and_then(|fact| fact.field(field))
            .and_then(InstitutionalValue::as_text)
            .filter(|text| !text.trim().is_empty())
    }

    /// Career keys in load order.
    #[must_use]
    pub fn list_career_keys(&self) -> Vec<&str> {
        self.careers.keys().map(String::as_str).collect()
    }

    /// Career records in load order.
    pub fn careers(&self) -> impl Iterator<Item = &CareerRecord> {
        self.careers.values()
    }

    /// Lowercased names of every regime offered by any career.
    #[must_use]
    pub fn regime_keywords(&self) -> &[String] {
        &self.regime_keywords
    }

    #[must_use]
    pub fn training_examples(&self) -> &[TrainingExample] {
        &self.training
    }

    #[must_use]
    pub fn faq_count(&self) -> usize {
        self.faqs.len()
    }

    #[must_use]
    pub fn institution_keys(&self) -> Vec<&str> {
        self.institution.keys().map(String::as_str).collect()
    }

    /// Sources that failed to load.
    #[must_use]
    pub fn load_errors(&self) -> &[DataLoadError] {
        &self.load_errors
    }
}

fn index_faq(entry: FaqEntry) -> Option<IndexedFaq> {
    let needle = entry.question.trim().to_lowercase();
    if needle.is_empty() {
        tracing::warn!(answer = %entry.answer, "Skipping FAQ with empty question");
        return None;
    }
    Some(IndexedFaq { needle, entry })
}

fn parse_faq_entries(file: FaqFile) -> Vec<FaqEntry> {
    file.into_entries()
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<FaqEntry>(raw.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(entry = %raw, error = %e, "FAQ entry with unexpected format");
                None
            }
        })
        .collect()
}

fn collect_regime_keywords(careers: &IndexMap<String, CareerRecord>) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for name in careers.values().flat_map(CareerRecord::regime_names) {
        let lowered = name.to_lowercase();
        if !lowered.is_empty() && !keywords.contains(&lowered) {
            keywords.push(lowered);
        }
    }
    keywords
}

async fn read_json<T: DeserializeOwned>(
    category: KnowledgeCategory,
    path: &Path,
) -> Result<T, DataLoadError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DataLoadError::Missing {
                category,
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(DataLoadError::Read {
                category,
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    serde_json::from_str(&content).map_err(|e| DataLoadError::Parse {
        category,
        path: path.to_path_buf(),
        source: e,
    })
}

async fn load_careers(dir: &Path, errors: &mut Vec<DataLoadError>) -> Vec<CareerRecord> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            let error = if e.kind() == std::io::ErrorKind::NotFound {
                DataLoadError::Missing {
                    category: KnowledgeCategory::Careers,
                    path: dir.to_path_buf(),
                }
            } else {
                DataLoadError::Read {
                    category: KnowledgeCategory::Careers,
                    path: dir.to_path_buf(),
                    source: e,
                }
            };
            tracing::warn!(error = %error, "Career directory unavailable");
            errors.push(error);
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    paths.push(path);
                }
            }
            Ok(None) => break,
            Err(e) => {
                errors.push(DataLoadError::Read {
                    category: KnowledgeCategory::Careers,
                    path: dir.to_path_buf(),
                    source: e,
                });
                break;
            }
        }
    }
    paths.sort();

    if paths.is_empty() {
        tracing::warn!(dir = %dir.display(), "Career directory is empty");
    }

    let mut careers = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(key) = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase())
        else {
            continue;
        };

        match read_json::<CareerFile>(KnowledgeCategory::Careers, &path).await {
            Ok(file) => {
                let record = CareerRecord::from_file(key, file);
                tracing::debug!(key = %record.key, name = %record.display_name, "Loaded career");
                careers.push(record);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping career file");
                errors.push(e);
            }
        }
    }
    careers
}
