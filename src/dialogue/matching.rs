//! Keyword vocabulary and substring matching helpers.

use std::sync::OnceLock;

use regex::RegexSet;

use crate::knowledge::{CareerRecord, KnowledgeStore, Regime};

pub const CURRICULUM_KEYWORDS: &[&str] = &["pensum", "plan de estudio"];
pub const PROFILE_KEYWORDS: &[&str] = &["perfil", "egresado"];
pub const OUTCOMES_KEYWORDS: &[&str] = &["salidas profesionales", "campo laboral"];
pub const DESCRIPTION_KEYWORDS: &[&str] = &["descripcion", "descripción", "que es", "qué es"];
pub const DURATION_KEYWORDS: &[&str] = &["duracion", "duración"];

pub const MISSION_KEYWORDS: &[&str] = &["mision", "misión"];
pub const VISION_KEYWORDS: &[&str] = &["vision", "visión"];
pub const LOCATION_KEYWORDS: &[&str] = &[
    "ubicacion",
    "ubicación",
    "dirección",
    "donde esta",
    "dónde está",
];
pub const CONTACT_KEYWORDS: &[&str] = &["contacto", "teléfono", "telefono", "correo"];
pub const INSTITUTION_NAME_KEYWORDS: &[&str] = &[
    "nombre de la institucion",
    "nombre de la institución",
    "nombre de la universidad",
];
pub const GREETING_KEYWORDS: &[&str] = &["hola", "buenas", "saludos"];

/// Generic topics after which a FAQ answer also offers the career menu.
pub const FAQ_MENU_KEYWORDS: &[&str] = &["requisitos de inscripción", "ubicación", "horario"];

/// Prefixes stripped from a display name to build its short form.
const SHORT_NAME_PREFIXES: [&str; 2] = ["ingeniería de ", "ingeniería en "];

/// In-domain vocabulary; an utterance matching none of these is refused
/// without consulting the generative fallback.
fn context_vocabulary() -> &'static RegexSet {
    static VOCABULARY: OnceLock<RegexSet> = OnceLock::new();
    VOCABULARY.get_or_init(|| {
        RegexSet::new([
            r"unefa",
            r"ingenier",
            r"universidad",
            r"n[uú]cleo",
            r"los teques",
            r"carrera",
            r"pensum",
            r"plan de estudio",
            r"materia",
            r"asignatura",
            r"semestre",
            r"inscripci[oó]n",
            r"requisito",
            r"admisi[oó]n",
            r"matr[ií]cula",
            r"t[ií]tulo",
            r"egresad",
            r"horario",
            r"beca",
            r"profesor",
            r"docente",
            r"estudiant",
            r"sistemas",
            r"mec[aá]nica",
            r"el[eé]ctric",
            r"electr[oó]nica",
            r"telecomunicaci",
            r"programaci[oó]n",
            r"algoritmo",
            r"base de datos",
            r"software",
            r"circuito",
            r"ecuaci[oó]n",
            r"factoriz",
            r"c[aá]lculo",
            r"f[ií]sica",
            r"matem[aá]tica",
            r"[aá]lgebra",
            r"termodin[aá]mica",
            r"se[ñn]al",
            r"antena",
        ])
        .expect("Invalid context vocabulary regex")
    })
}

/// A user utterance, trimmed and lowercased once for matching.
#[derive(Debug, Clone)]
pub struct Utterance {
    raw: String,
    lowered: String,
}

impl Utterance {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let raw = text.trim().to_string();
        let lowered = raw.to_lowercase();
        Self { raw, lowered }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    #[must_use]
    pub fn mentions(&self, keyword: &str) -> bool {
        self.lowered.contains(keyword)
    }

    #[must_use]
    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.mentions(k))
    }

    /// Whether the utterance touches any in-domain topic.
    #[must_use]
    pub fn in_scope(&self) -> bool {
        context_vocabulary().is_match(&self.lowered)
    }
}

/// Short form of a display name: known prefixes stripped first, then every
/// space removed. `Ingeniería de Sistemas` → `sistemas`,
/// `Ingeniería Mecánica` → `ingenieríamecánica`.
#[must_use]
pub fn short_name(display_name: &str) -> String {
    let mut short = display_name.to_lowercase();
    for prefix in SHORT_NAME_PREFIXES {
        short = short.replace(prefix, "");
    }
    short.replace(' ', "")
}

/// Whether the utterance names this career, by full or short name.
#[must_use]
pub fn mentions_career(utterance: &Utterance, career: &CareerRecord) -> bool {
    let full = career.display_name.to_lowercase();
    let short = short_name(&career.display_name);
    (!full.is_empty() && utterance.mentions(&full))
        || (!short.is_empty() && utterance.mentions(&short))
}

/// First career, in store order, mentioned by the utterance.
#[must_use]
pub fn find_mentioned_career<'a>(
    store: &'a KnowledgeStore,
    utterance: &Utterance,
) -> Option<&'a CareerRecord> {
    store
        .careers()
        .find(|career| mentions_career(utterance, career))
}

/// First of the career's regimes (in file order) named by the utterance.
#[must_use]
pub fn named_regime<'a>(
    career: &'a CareerRecord,
    utterance: &Utterance,
) -> Option<(&'a str, &'a Regime)> {
    career
        .regimes
        .iter()
        .find(|(name, _)| utterance.mentions(&name.to_lowercase()))
        .map(|(name, regime)| (name.as_str(), regime))
}

/// Whether the utterance names any regime known to the store.
#[must_use]
pub fn mentions_any_regime(store: &KnowledgeStore, utterance: &Utterance) -> bool {
    store
        .regime_keywords()
        .iter()
        .any(|keyword| utterance.mentions(keyword))
}
