//! Regime slot filling across turns.

use ingechat::dialogue::{ConversationState, DialogueEngine, DialogueState};

use super::{engine_with, ScriptedAnswerer};

const MULTI_REGIME: [(&str, &str); 3] = [
    ("sistemas", "Ingeniería de Sistemas"),
    ("mecanica", "Ingeniería Mecánica"),
    ("electrica", "Ingeniería Eléctrica"),
];

fn clarification(display_name: &str) -> String {
    format!(
        "La carrera de {display_name} tiene planes de estudio para los regímenes Diurno y Nocturno. ¿Cuál te gustaría consultar?"
    )
}

#[tokio::test]
async fn test_pensum_without_regime_then_regime_fills_slot() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    for (key, display_name) in MULTI_REGIME {
        let (state, ask) = engine
            .process_message(
                DialogueEngine::reset_session(),
                &format!("Pensum de {display_name}"),
            )
            .await;
        assert_eq!(state.conversation.awaiting_regime(), Some(key));
        assert_eq!(ask.response, clarification(display_name));
        assert_eq!(ask.quick_replies, vec!["Diurno", "Nocturno"]);

        let (state, plan) = engine.process_message(state, "Diurno").await;
        assert!(state.conversation.is_free());
        assert!(plan
            .response
            .starts_with(&format!("El plan de estudios de {display_name} (Diurno) es:\n")));
        assert!(plan.quick_replies.is_empty());
    }
}

#[tokio::test]
async fn test_single_regime_career_skips_clarification() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (state, reply) = engine
        .process_message(DialogueEngine::reset_session(), "pensum de telecomunicaciones")
        .await;
    assert!(state.conversation.is_free());
    assert!(reply.response.starts_with(
        "El plan de estudios de Ingeniería de Telecomunicaciones (Diurno) es:\n"
    ));
    assert!(reply
        .response
        .contains("Semestre IV: Señales y Sistemas, Electrónica I, Probabilidad y Estadística.\n"));
}

#[tokio::test]
async fn test_regime_named_up_front() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (state, reply) = engine
        .process_message(
            DialogueEngine::reset_session(),
            "plan de estudio de sistemas nocturno",
        )
        .await;
    assert!(state.conversation.is_free());
    assert!(reply
        .response
        .contains("Semestre I: Matemática I, Introducción a la Ingeniería de Sistemas, Inglés I.\n"));
}

#[tokio::test]
async fn test_curriculum_lines_follow_semester_order() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (_, reply) = engine
        .process_message(DialogueEngine::reset_session(), "pensum de sistemas diurno")
        .await;
    let lines: Vec<&str> = reply.response.lines().collect();
    assert_eq!(
        lines,
        vec![
            "El plan de estudios de Ingeniería de Sistemas (Diurno) es:",
            "Semestre I: Matemática I, Geometría Analítica, Introducción a la Ingeniería de Sistemas, Inglés I, Educación Ambiental.",
            "Semestre II: Matemática II, Física I, Álgebra Lineal, Programación I, Inglés II.",
            "Semestre III: Matemática III, Física II, Programación II, Estructuras Discretas.",
            "Semestre IV: Estadística, Estructuras de Datos, Circuitos Lógicos, Teoría de Sistemas.",
        ]
    );
}

#[tokio::test]
async fn test_topic_change_mid_slot() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (state, _) = engine
        .process_message(DialogueEngine::reset_session(), "pensum de sistemas")
        .await;
    assert_eq!(state.conversation.awaiting_regime(), Some("sistemas"));

    let (state, reply) = engine
        .process_message(state, "háblame de ingeniería mecánica")
        .await;
    assert!(state.conversation.is_free());
    assert!(reply
        .response
        .starts_with("Ingeniería Mecánica: Forma profesionales dedicados"));
    assert_ne!(reply.response, clarification("Ingeniería de Sistemas"));
}

#[tokio::test]
async fn test_topic_change_can_open_a_new_slot() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (state, _) = engine
        .process_message(DialogueEngine::reset_session(), "pensum de sistemas")
        .await;
    let (state, reply) = engine
        .process_message(state, "mejor el pensum de ingeniería eléctrica")
        .await;
    assert_eq!(state.conversation.awaiting_regime(), Some("electrica"));
    assert_eq!(reply.response, clarification("Ingeniería Eléctrica"));

    let (state, reply) = engine.process_message(state, "nocturno").await;
    assert!(state.conversation.is_free());
    assert!(reply
        .response
        .starts_with("El plan de estudios de Ingeniería Eléctrica (Nocturno) es:"));
}

#[tokio::test]
async fn test_unrelated_reply_reprompts_and_keeps_slot() {
    let answerer = ScriptedAnswerer::replying("no debería usarse");
    let engine = engine_with(answerer.clone()).await;

    let (state, first) = engine
        .process_message(DialogueEngine::reset_session(), "pensum de sistemas")
        .await;

    let (state, again) = engine.process_message(state, "no estoy seguro").await;
    assert_eq!(state.conversation.awaiting_regime(), Some("sistemas"));
    assert_eq!(again, first);

    let (state, again) = engine.process_message(state, "¿y la misión?").await;
    assert_eq!(state.conversation.awaiting_regime(), Some("sistemas"));
    assert_eq!(again, first);
    assert_eq!(answerer.calls(), 0);
}

#[tokio::test]
async fn test_stale_slot_degrades_to_unavailable() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;
    let state = DialogueState {
        conversation: ConversationState::awaiting("astronautica"),
        ..DialogueState::default()
    };

    let (state, reply) = engine.process_message(state, "diurno").await;
    assert!(state.conversation.is_free());
    assert_eq!(
        reply.response,
        "No encontré información del plan de estudios para astronautica o no se especificó un régimen válido."
    );
}

#[tokio::test]
async fn test_same_career_request_reopens_slot() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (state, first) = engine
        .process_message(DialogueEngine::reset_session(), "pensum de sistemas")
        .await;
    let (state, again) = engine.process_message(state, "pensum de sistemas").await;

    assert_eq!(state.conversation.awaiting_regime(), Some("sistemas"));
    assert_eq!(again, first);
    assert_eq!(state.transcript.len(), 5);
    let asked = state
        .transcript
        .turns()
        .iter()
        .filter(|turn| turn.text == "pensum de sistemas")
        .count();
    assert_eq!(asked, 2);
}

#[tokio::test]
async fn test_first_career_in_store_order_wins() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (state, reply) = engine
        .process_message(
            DialogueEngine::reset_session(),
            "pensum de sistemas o de ingeniería mecánica",
        )
        .await;
    assert_eq!(state.conversation.awaiting_regime(), Some("mecanica"));
    assert_eq!(reply.response, clarification("Ingeniería Mecánica"));
}

#[tokio::test]
async fn test_single_regime_career_ignores_unoffered_regime() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (state, reply) = engine
        .process_message(
            DialogueEngine::reset_session(),
            "pensum de telecomunicaciones nocturno",
        )
        .await;
    assert!(state.conversation.is_free());
    assert!(reply.response.starts_with(
        "El plan de estudios de Ingeniería de Telecomunicaciones (Diurno) es:\n"
    ));
}
