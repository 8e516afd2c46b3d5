//! Pipeline behavior through `process_message`.

use ingechat::ai::{APOLOGY, SYSTEM_INSTRUCTION};
use ingechat::dialogue::replies::{CAREER_MENU, OUT_OF_SCOPE, WELCOME};
use ingechat::dialogue::{DialogueEngine, Role};

use super::{engine_with, ScriptedAnswerer};

const FAQS: [(&str, &str); 3] = [
    (
        "Requisitos de inscripción",
        "Para inscribirte en la UNEFA necesitas",
    ),
    ("¿Qué carreras ofrecen?", "En la UNEFA Núcleo Miranda"),
    ("pasantías", "Las pasantías se realizan"),
];

#[tokio::test]
async fn test_faq_fragment_returns_answer_without_answerer() {
    let answerer = ScriptedAnswerer::replying("no debería usarse");
    let engine = engine_with(answerer.clone()).await;

    for (question, answer_prefix) in FAQS {
        for input in [
            question.to_string(),
            question.to_uppercase(),
            format!("Hola, quisiera saber: {question} por favor"),
        ] {
            let (_, reply) = engine
                .process_message(DialogueEngine::reset_session(), &input)
                .await;
            assert!(
                reply.response.starts_with(answer_prefix),
                "input {input:?} got {:?}",
                reply.response
            );
        }
    }
    assert_eq!(answerer.calls(), 0);
}

#[tokio::test]
async fn test_faq_on_generic_topic_offers_career_menu() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (_, reply) = engine
        .process_message(DialogueEngine::reset_session(), "Requisitos de Inscripción")
        .await;
    assert_eq!(reply.quick_replies, CAREER_MENU.to_vec());

    let (_, reply) = engine
        .process_message(DialogueEngine::reset_session(), "¿Qué carreras ofrecen?")
        .await;
    assert!(reply.quick_replies.is_empty());
}

#[tokio::test]
async fn test_out_of_scope_is_refused_without_answerer() {
    let answerer = ScriptedAnswerer::replying("París");
    let engine = engine_with(answerer.clone()).await;

    for input in [
        "¿cuál es la capital de Francia?",
        "recomiéndame una película",
        "¿quién ganó el partido de ayer?",
    ] {
        let (_, reply) = engine
            .process_message(DialogueEngine::reset_session(), input)
            .await;
        assert_eq!(reply.response, OUT_OF_SCOPE);
        assert!(reply.quick_replies.is_empty());
    }
    assert_eq!(answerer.calls(), 0);
}

#[tokio::test]
async fn test_in_scope_question_consults_answerer_with_full_transcript() {
    let answerer = ScriptedAnswerer::replying("Para factorizar un polinomio...");
    let engine = engine_with(answerer.clone()).await;

    let (state, _) = engine.restart().await;
    let (state, reply) = engine
        .process_message(state, "¿Cómo factorizo un polinomio de grado 3?")
        .await;

    assert_eq!(reply.response, "Para factorizar un polinomio...");
    assert!(reply.quick_replies.is_empty());
    assert_eq!(answerer.calls(), 1);

    let sent = answerer.last_transcript().unwrap();
    assert_eq!(sent.len(), 4);
    assert_eq!(sent[0].text, SYSTEM_INSTRUCTION);
    assert_eq!(sent[3].role, Role::User);
    assert_eq!(sent[3].text, "¿Cómo factorizo un polinomio de grado 3?");

    let last = state.transcript.last().unwrap();
    assert_eq!(last.role, Role::Model);
    assert_eq!(last.text, "Para factorizar un polinomio...");
}

#[tokio::test]
async fn test_answerer_failure_becomes_apology() {
    let answerer = ScriptedAnswerer::failing();
    let engine = engine_with(answerer.clone()).await;

    let (state, reply) = engine
        .process_message(
            DialogueEngine::reset_session(),
            "Explícame la ecuación de Bernoulli",
        )
        .await;

    assert_eq!(reply.response, APOLOGY);
    assert_eq!(answerer.calls(), 1);
    assert_eq!(state.transcript.len(), 3);
    assert!(state.conversation.is_free());
}

#[tokio::test]
async fn test_restart_is_idempotent() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;

    let (first_state, first) = engine.restart().await;
    let (second_state, second) = engine.restart().await;

    assert_eq!(first, second);
    assert_eq!(first.response, WELCOME);
    assert_eq!(first.quick_replies, CAREER_MENU.to_vec());
    assert_eq!(first_state.transcript.len(), 3);
    assert_eq!(second_state.transcript.len(), 3);
    assert!(second_state.conversation.is_free());
}

#[tokio::test]
async fn test_career_topics_and_quick_replies() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;
    let fresh = DialogueEngine::reset_session;

    let (_, profile) = engine
        .process_message(fresh(), "Perfil del Egresado de Ingeniería de Sistemas")
        .await;
    assert!(profile.response.starts_with("El Ingeniero de Sistemas de la UNEFA"));
    assert_eq!(
        profile.quick_replies,
        vec![
            "Pensum de Ingeniería de Sistemas",
            "Salidas Profesionales de Ingeniería de Sistemas",
            "Duración de Ingeniería de Sistemas",
        ]
    );

    let (_, duration) = engine
        .process_message(fresh(), "Duración de Ingeniería de Telecomunicaciones")
        .await;
    assert_eq!(
        duration.response,
        "La duración de la carrera de Ingeniería de Telecomunicaciones es: Diurno: 10 semestres."
    );

    let (_, outcomes) = engine
        .process_message(fresh(), "campo laboral de ingeniería eléctrica")
        .await;
    assert!(outcomes
        .response
        .starts_with("Algunas salidas profesionales para Ingeniería Eléctrica incluyen: "));

    let (_, description) = engine
        .process_message(fresh(), "¿qué es ingeniería mecánica?")
        .await;
    assert!(description.response.starts_with("Forma profesionales dedicados"));
    assert_eq!(description.quick_replies.len(), 4);
}

#[tokio::test]
async fn test_institutional_facts() {
    let engine = engine_with(ScriptedAnswerer::failing()).await;
    let fresh = DialogueEngine::reset_session;

    let (_, mission) = engine.process_message(fresh(), "Misión de la UNEFA").await;
    assert!(mission.response.starts_with("Formar profesionales integrales"));
    assert_eq!(mission.quick_replies[0], "Visión de la UNEFA");

    let (_, location) = engine
        .process_message(fresh(), "Ubicación de la UNEFA")
        .await;
    assert_eq!(
        location.response,
        "La UNEFA Núcleo Miranda, Sede Los Teques, está ubicada en Los Teques, estado Miranda. Dirección física: Av. La Hacienda, sector El Tambor, Los Teques, estado Miranda."
    );

    let (_, contact) = engine
        .process_message(fresh(), "¿Cuál es el correo de contacto?")
        .await;
    assert!(contact.response.contains("Teléfono: (0212) 555-0000."));
    assert!(contact.response.contains("Correo: info.losteques@unefa.edu.ve."));

    let (_, name) = engine
        .process_message(fresh(), "¿Cuál es el nombre de la institución?")
        .await;
    assert!(name.response.starts_with("Universidad Nacional Experimental"));
}
