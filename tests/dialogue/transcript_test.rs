//! Transcript bookkeeping across conversations.

use ingechat::ai::SYSTEM_INSTRUCTION;
use ingechat::dialogue::{DialogueEngine, Role, Transcript};

use super::{engine_with, ScriptedAnswerer};

const CONVERSATION: [&str; 9] = [
    "hola",
    "pensum de sistemas",
    "no sé",
    "  nocturno  ",
    "¿cómo resuelvo una ecuación cuadrática?",
    "¿cuál es la capital de Francia?",
    "pensum de sistemas",
    "háblame de ingeniería mecánica",
    "Requisitos de Inscripción",
];

#[tokio::test]
async fn test_each_message_appends_one_pair() {
    let engine = engine_with(ScriptedAnswerer::replying("respuesta generada")).await;
    let mut state = DialogueEngine::reset_session();
    assert_eq!(state.transcript.len(), 1);

    for (n, input) in CONVERSATION.iter().enumerate() {
        let (next, reply) = engine.process_message(state, input).await;
        state = next;

        assert_eq!(state.transcript.len(), 1 + 2 * (n + 1), "after {input:?}");
        let turns = state.transcript.turns();
        let user = &turns[turns.len() - 2];
        let model = &turns[turns.len() - 1];
        assert_eq!(user.role, Role::User);
        assert_eq!(user.text, input.trim());
        assert_eq!(model.role, Role::Model);
        assert_eq!(model.text, reply.response);
    }

    let system_turns = state
        .transcript
        .turns()
        .iter()
        .filter(|turn| turn.text == SYSTEM_INSTRUCTION)
        .count();
    assert_eq!(system_turns, 1);
    assert_eq!(state.transcript.turns()[0].text, SYSTEM_INSTRUCTION);
}

#[tokio::test]
async fn test_topic_change_records_user_turn_once() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (state, _) = engine
        .process_message(DialogueEngine::reset_session(), "pensum de sistemas")
        .await;
    let (state, _) = engine
        .process_message(state, "háblame de ingeniería mecánica")
        .await;

    let occurrences = state
        .transcript
        .turns()
        .iter()
        .filter(|turn| turn.text == "háblame de ingeniería mecánica")
        .count();
    assert_eq!(occurrences, 1);
    assert_eq!(state.transcript.len(), 5);
}

#[tokio::test]
async fn test_transcript_survives_serialization() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;
    let (state, _) = engine.restart().await;
    let (state, _) = engine.process_message(state, "pensum de sistemas").await;

    let json = serde_json::to_string(&state).unwrap();
    let restored: ingechat::dialogue::DialogueState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);

    let (restored, reply) = engine.process_message(restored, "diurno").await;
    assert!(reply.response.starts_with("El plan de estudios de Ingeniería de Sistemas (Diurno)"));
    assert_eq!(restored.transcript.len(), 7);

    let rebuilt = Transcript::restore(restored.transcript.turns().to_vec());
    assert_eq!(rebuilt, restored.transcript);
}
