//! Fixed response texts and quick-reply sets.

use crate::knowledge::CareerRecord;

/// Utterance processed by a restart to produce the welcome message.
pub const GREETING_TRIGGER: &str = "hola";

pub const WELCOME: &str = "¡Hola! Soy IngeChat 360°, tu asistente virtual de la UNEFA Núcleo Miranda, Sede Los Teques. Estoy aquí para brindarte información detallada sobre las carreras de Ingeniería: Sistemas, Mecánica, Telecomunicaciones y Eléctrica.\n\n¿En qué carrera estás interesado hoy? O puedes preguntar sobre requisitos de inscripción, perfil del egresado, etc.";

pub const OUT_OF_SCOPE: &str = "Lo siento, mi función es especializada: solo puedo ayudarte con información sobre las carreras de Ingeniería (Sistemas, Mecánica, Telecomunicaciones y Eléctrica) de la UNEFA Núcleo Miranda, Sede Los Teques, y temas institucionales relacionados.";

/// Career menu offered by the greeting and general FAQs.
pub const CAREER_MENU: [&str; 5] = [
    "Ingeniería de Sistemas",
    "Ingeniería Mecánica",
    "Ingeniería Eléctrica",
    "Ingeniería de Telecomunicaciones",
    "Requisitos de Inscripción",
];

pub const MISSION_MISSING: &str = "No encontré la misión de la UNEFA.";
pub const VISION_MISSING: &str = "No encontré la visión de la UNEFA.";
pub const LOCATION_MISSING: &str = "No encontré la ubicación de la UNEFA.";
pub const CONTACT_MISSING: &str = "No encontré información de contacto de la UNEFA.";
pub const NAME_MISSING: &str = "No encontré el nombre de la institución.";

pub const MISSION_SUGGESTIONS: [&str; 3] = [
    "Visión de la UNEFA",
    "¿Qué carreras ofrecen?",
    "Ubicación de la UNEFA",
];
pub const VISION_SUGGESTIONS: [&str; 3] = [
    "Misión de la UNEFA",
    "¿Qué carreras ofrecen?",
    "Ubicación de la UNEFA",
];
pub const LOCATION_SUGGESTIONS: [&str; 3] = [
    "Requisitos de Inscripción",
    "Ingeniería de Sistemas",
    "Misión de la UNEFA",
];
pub const CONTACT_SUGGESTIONS: [&str; 2] = ["Ubicación de la UNEFA", "Requisitos de Inscripción"];
pub const NAME_SUGGESTIONS: [&str; 2] = ["Misión de la UNEFA", "Ubicación de la UNEFA"];

pub fn curriculum_suggestion(career: &CareerRecord) -> String {
    format!("Pensum de {}", career.display_name)
}

pub fn profile_suggestion(career: &CareerRecord) -> String {
    format!("Perfil del Egresado de {}", career.display_name)
}

pub fn outcomes_suggestion(career: &CareerRecord) -> String {
    format!("Salidas Profesionales de {}", career.display_name)
}

pub fn duration_suggestion(career: &CareerRecord) -> String {
    format!("Duración de {}", career.display_name)
}

/// Clarification asked when a curriculum request does not name a regime.
pub fn regime_clarification(career: &CareerRecord) -> String {
    let regimes: Vec<&str> = career.regime_names().collect();
    format!(
        "La carrera de {} tiene planes de estudio para los regímenes {}. ¿Cuál te gustaría consultar?",
        career.display_name,
        regimes.join(" y ")
    )
}

pub fn curriculum_unavailable(display_name: &str) -> String {
    format!(
        "No encontré información del plan de estudios para {display_name} o no se especificó un régimen válido."
    )
}

pub fn profile_unavailable(career: &CareerRecord) -> String {
    format!(
        "Perfil del egresado para {} no disponible.",
        career.display_name
    )
}

pub fn outcomes_list(career: &CareerRecord) -> String {
    format!(
        "Algunas salidas profesionales para {} incluyen: {}.",
        career.display_name,
        career.outcomes.join(", ")
    )
}

pub fn outcomes_unavailable(career: &CareerRecord) -> String {
    format!(
        "Salidas profesionales para {} no disponibles.",
        career.display_name
    )
}

pub fn description_unavailable(career: &CareerRecord) -> String {
    format!("Descripción para {} no disponible.", career.display_name)
}

pub fn duration_single(career: &CareerRecord, duration: &str) -> String {
    format!(
        "La duración de la carrera de {} es: {duration}.",
        career.display_name
    )
}

pub fn duration_multiple(career: &CareerRecord, durations: &[String]) -> String {
    format!(
        "La duración de la carrera de {} es la siguiente: {}.",
        career.display_name,
        durations.join("; ")
    )
}

pub fn duration_unavailable(career: &CareerRecord) -> String {
    format!("Duración para {} no disponible.", career.display_name)
}

pub fn career_overview(career: &CareerRecord) -> String {
    format!(
        "{}: {} Puedes preguntar sobre su perfil de egresado, plan de estudios o salidas profesionales.",
        career.display_name,
        career
            .description
            .as_deref()
            .unwrap_or("Descripción no disponible.")
    )
}

pub fn location(place: &str, address: Option<&str>) -> String {
    let mut text = format!("La UNEFA Núcleo Miranda, Sede Los Teques, está ubicada en {place}.");
    if let Some(address) = address {
        text.push_str(&format!(" Dirección física: {address}."));
    }
    text
}

/// Contact text from whichever contact sub-fields are present.
pub fn contact(address: Option<&str>, phone: Option<&str>, email: Option<&str>) -> String {
    let mut text = String::from("Puedes contactar a la UNEFA Núcleo Miranda, Sede Los Teques.");
    for (label, value) in [
        ("Dirección física", address),
        ("Teléfono", phone),
        ("Correo", email),
    ] {
        if let Some(value) = value {
            text.push_str(&format!(" {label}: {value}."));
        }
    }
    text
}
