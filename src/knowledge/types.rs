//! Record types for the structured knowledge files.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping of semester label to the courses taught that semester.
pub type Curriculum = IndexMap<String, Vec<CourseEntry>>;

/// One course line in a curriculum.
///
/// The data files mix plain strings with objects carrying an `asignatura`
/// field; anything else is kept but has no name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseEntry {
    Name(String),
    Record {
        #[serde(rename = "asignatura", default)]
        name: Option<String>,
    },
    Other(serde_json::Value),
}

impl CourseEntry {
    /// Course name, if this entry has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Record { name } => name.as_deref(),
            Self::Other(_) => None,
        }
    }
}

/// A schedule track (e.g. "Diurno") with its own duration and curriculum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Regime {
    #[serde(rename = "duracion", default)]
    pub duration: Option<String>,
    #[serde(rename = "plan_estudios", default)]
    pub curriculum: Curriculum,
}

/// On-disk shape of a career file.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CareerFile {
    #[serde(rename = "carrera", default)]
    pub name: Option<String>,
    #[serde(rename = "descripcion_carrera", default)]
    pub description: Option<String>,
    #[serde(rename = "perfil_egresado_comun", default)]
    pub graduate_profile: Option<String>,
    #[serde(rename = "salidas_profesionales", default)]
    pub outcomes: Vec<String>,
    #[serde(rename = "regimenes", default)]
    pub regimes: IndexMap<String, Regime>,
}

/// A program offered by the institution.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerRecord {
    /// Normalized identifier (lowercased file stem).
    pub key: String,
    pub display_name: String,
    pub description: Option<String>,
    pub graduate_profile: Option<String>,
    pub outcomes: Vec<String>,
    /// Regime name → regime, in file order. Names are case-sensitive.
    pub regimes: IndexMap<String, Regime>,
}

impl CareerRecord {
    pub(crate) fn from_file(key: String, file: CareerFile) -> Self {
        let display_name = file
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_display_name(&key));
        Self {
            key,
            display_name,
            description: file.description,
            graduate_profile: file.graduate_profile,
            outcomes: file.outcomes,
            regimes: file.regimes,
        }
    }

    /// Parse a career record from the JSON file format.
    ///
    /// # Errors
    ///
    /// Returns the serde error if `json` is not a valid career document.
    pub fn from_json(key: &str, json: &str) -> Result<Self, serde_json::Error> {
        let file: CareerFile = serde_json::from_str(json)?;
        Ok(Self::from_file(key.to_lowercase(), file))
    }

    /// Regime names in file order.
    pub fn regime_names(&self) -> impl Iterator<Item = &str> {
        self.regimes.keys().map(String::as_str)
    }
}

/// `ingenieria_de_sistemas` → `Ingenieria de sistemas`.
fn fallback_display_name(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

/// A frequently asked question and its canned answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(rename = "pregunta")]
    pub question: String,
    #[serde(rename = "respuesta")]
    pub answer: String,
}

/// The FAQ file is either a bare list or wrapped under `preguntas_frecuentes`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FaqFile {
    List(Vec<serde_json::Value>),
    Wrapped {
        preguntas_frecuentes: Vec<serde_json::Value>,
    },
}

impl FaqFile {
    pub fn into_entries(self) -> Vec<serde_json::Value> {
        match self {
            Self::List(entries) | Self::Wrapped {
                preguntas_frecuentes: entries,
            } => entries,
        }
    }
}

/// A named institutional fact: plain text or a nested mapping (e.g. contact).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstitutionalValue {
    Text(String),
    Mapping(IndexMap<String, InstitutionalValue>),
    Other(serde_json::Value),
}

impl InstitutionalValue {
    /// Text content of a plain fact.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Sub-field of a nested fact.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&InstitutionalValue> {
        match self {
            Self::Mapping(fields) => fields.get(name),
            _ => None,
        }
    }
}

/// Prompt/completion pair used as few-shot context for the generative fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub prompt: String,
    pub completion: String,
}
