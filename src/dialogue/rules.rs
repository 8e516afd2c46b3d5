//! Ordered matching rules.
//!
//! Each rule inspects the utterance against the knowledge store and either
//! produces an [`Outcome`] or passes. [`PIPELINE`] fixes the evaluation order;
//! the first rule that answers wins.

use crate::knowledge::{CareerRecord, InstitutionalValue, KnowledgeStore, Regime};

use super::formatter::format_curriculum;
use super::matching::{
    find_mentioned_career, mentions_any_regime, named_regime, Utterance, CONTACT_KEYWORDS,
    CURRICULUM_KEYWORDS, DESCRIPTION_KEYWORDS, DURATION_KEYWORDS, FAQ_MENU_KEYWORDS,
    GREETING_KEYWORDS, INSTITUTION_NAME_KEYWORDS, LOCATION_KEYWORDS, MISSION_KEYWORDS,
    OUTCOMES_KEYWORDS, PROFILE_KEYWORDS, VISION_KEYWORDS,
};
use super::replies;
use super::BotReply;

/// Result of a rule that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: BotReply,
    /// Career key to wait on for a regime choice, when the rule opened a slot.
    pub await_regime: Option<String>,
}

impl Outcome {
    fn reply(reply: BotReply) -> Self {
        Self {
            reply,
            await_regime: None,
        }
    }

    fn awaiting(reply: BotReply, career_key: &str) -> Self {
        Self {
            reply,
            await_regime: Some(career_key.to_string()),
        }
    }
}

/// A named predicate/handler pair in the pipeline.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&KnowledgeStore, &Utterance) -> Option<Outcome>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Matching rules in priority order.
pub const PIPELINE: &[Rule] = &[
    Rule {
        name: "faq",
        apply: faq,
    },
    Rule {
        name: "career",
        apply: career,
    },
    Rule {
        name: "mission",
        apply: mission,
    },
    Rule {
        name: "vision",
        apply: vision,
    },
    Rule {
        name: "location",
        apply: location,
    },
    Rule {
        name: "contact",
        apply: contact,
    },
    Rule {
        name: "institution_name",
        apply: institution_name,
    },
    Rule {
        name: "greeting",
        apply: greeting,
    },
];

/// Run `rules` in order and return the first outcome with the rule's name.
pub fn first_match(
    rules: &[Rule],
    store: &KnowledgeStore,
    utterance: &Utterance,
) -> Option<(&'static str, Outcome)> {
    rules
        .iter()
        .find_map(|rule| (rule.apply)(store, utterance).map(|outcome| (rule.name, outcome)))
}

fn faq(store: &KnowledgeStore, utterance: &Utterance) -> Option<Outcome> {
    let answer = store.get_faq_answer(utterance.lowered())?;
    let mut reply = BotReply::text(answer);
    if utterance.mentions_any(FAQ_MENU_KEYWORDS) {
        reply = reply.with_quick_replies(replies::CAREER_MENU);
    }
    Some(Outcome::reply(reply))
}

fn career(store: &KnowledgeStore, utterance: &Utterance) -> Option<Outcome> {
    let career = find_mentioned_career(store, utterance)?;
    tracing::debug!(career = %career.key, "Career mentioned");

    let outcome = if utterance.mentions_any(CURRICULUM_KEYWORDS) {
        curriculum_request(store, career, utterance)
    } else if utterance.mentions_any(PROFILE_KEYWORDS) {
        Outcome::reply(profile(career))
    } else if utterance.mentions_any(OUTCOMES_KEYWORDS) {
        Outcome::reply(outcomes(career))
    } else if utterance.mentions_any(DESCRIPTION_KEYWORDS) {
        Outcome::reply(description(career))
    } else if utterance.mentions_any(DURATION_KEYWORDS) {
        Outcome::reply(duration(career))
    } else {
        Outcome::reply(
            BotReply::text(replies::career_overview(career))
                .with_quick_replies(all_topic_suggestions(career)),
        )
    };
    Some(outcome)
}

fn curriculum_request(
    store: &KnowledgeStore,
    career: &CareerRecord,
    utterance: &Utterance,
) -> Outcome {
    if let Some((name, regime)) = named_regime(career, utterance) {
        return Outcome::reply(curriculum_reply(career, name, regime));
    }
    if career.regimes.len() > 1 {
        if mentions_any_regime(store, utterance) {
            // A regime was named but this career does not offer it.
            return Outcome::reply(BotReply::text(replies::curriculum_unavailable(
                &career.display_name,
            )));
        }
        return Outcome::awaiting(regime_clarification(career), &career.key);
    }
    match career.regimes.first() {
        Some((name, regime)) => Outcome::reply(curriculum_reply(career, name, regime)),
        None => Outcome::reply(BotReply::text(replies::curriculum_unavailable(
            &career.display_name,
        ))),
    }
}

/// Clarification listing the career's regimes, offered as quick replies.
pub fn regime_clarification(career: &CareerRecord) -> BotReply {
    BotReply::text(replies::regime_clarification(career)).with_quick_replies(career.regime_names())
}

/// Formatted curriculum for one regime, or the unavailable text when it is empty.
pub fn curriculum_reply(career: &CareerRecord, regime_name: &str, regime: &Regime) -> BotReply {
    if regime.curriculum.is_empty() {
        return BotReply::text(replies::curriculum_unavailable(&career.display_name));
    }
    BotReply::text(format_curriculum(
        &regime.curriculum,
        &career.display_name,
        regime_name,
    ))
}

fn profile(career: &CareerRecord) -> BotReply {
    let text = career
        .graduate_profile
        .clone()
        .unwrap_or_else(|| replies::profile_unavailable(career));
    BotReply::text(text).with_quick_replies([
        replies::curriculum_suggestion(career),
        replies::outcomes_suggestion(career),
        replies::duration_suggestion(career),
    ])
}

fn outcomes(career: &CareerRecord) -> BotReply {
    let text = if career.outcomes.is_empty() {
        replies::outcomes_unavailable(career)
    } else {
        replies::outcomes_list(career)
    };
    BotReply::text(text).with_quick_replies([
        replies::curriculum_suggestion(career),
        replies::profile_suggestion(career),
        replies::duration_suggestion(career),
    ])
}

fn description(career: &CareerRecord) -> BotReply {
    let text = career
        .description
        .clone()
        .unwrap_or_else(|| replies::description_unavailable(career));
    BotReply::text(text).with_quick_replies(all_topic_suggestions(career))
}

fn duration(career: &CareerRecord) -> BotReply {
    let durations: Vec<String> = career
        .regimes
        .iter()
        .filter_map(|(name, regime)| {
            regime
                .duration
                .as_deref()
                .map(|duration| format!("{name}: {duration}"))
        })
        .collect();

    let text = match durations.as_slice() {
        [] => replies::duration_unavailable(career),
        [single] => replies::duration_single(career, single),
        many => replies::duration_multiple(career, many),
    };
    BotReply::text(text).with_quick_replies([
        replies::curriculum_suggestion(career),
        replies::profile_suggestion(career),
        replies::outcomes_suggestion(career),
    ])
}

fn all_topic_suggestions(career: &CareerRecord) -> [String; 4] {
    [
        replies::curriculum_suggestion(career),
        replies::profile_suggestion(career),
        replies::outcomes_suggestion(career),
        replies::duration_suggestion(career),
    ]
}

fn mission(store: &KnowledgeStore, utterance: &Utterance) -> Option<Outcome> {
    utterance.mentions_any(MISSION_KEYWORDS).then(|| {
        fact_reply(
            store.institution_text("mision"),
            replies::MISSION_MISSING,
            &replies::MISSION_SUGGESTIONS,
        )
    })
}

fn vision(store: &KnowledgeStore, utterance: &Utterance) -> Option<Outcome> {
    utterance.mentions_any(VISION_KEYWORDS).then(|| {
        fact_reply(
            store.institution_text("vision"),
            replies::VISION_MISSING,
            &replies::VISION_SUGGESTIONS,
        )
    })
}

fn location(store: &KnowledgeStore, utterance: &Utterance) -> Option<Outcome> {
    if !utterance.mentions_any(LOCATION_KEYWORDS) {
        return None;
    }
    let text = store.institution_text("ubicacion").map_or_else(
        || replies::LOCATION_MISSING.to_string(),
        |place| {
            replies::location(
                place,
                store.institution_field("contacto", "direccion_fisica"),
            )
        },
    );
    Some(Outcome::reply(
        BotReply::text(text).with_quick_replies(replies::LOCATION_SUGGESTIONS),
    ))
}

fn contact(store: &KnowledgeStore, utterance: &Utterance) -> Option<Outcome> {
    if !utterance.mentions_any(CONTACT_KEYWORDS) {
        return None;
    }
    let text = match store.get_institutional_fact("contacto") {
        Some(InstitutionalValue::Text(text)) => text.clone(),
        Some(InstitutionalValue::Mapping(_)) => replies::contact(
            store.institution_field("contacto", "direccion_fisica"),
            store.institution_field("contacto", "telefono"),
            store.institution_field("contacto", "correo"),
        ),
        Some(InstitutionalValue::Other(_)) | None => replies::CONTACT_MISSING.to_string(),
    };
    Some(Outcome::reply(
        BotReply::text(text).with_quick_replies(replies::CONTACT_SUGGESTIONS),
    ))
}

fn institution_name(store: &KnowledgeStore, utterance: &Utterance) -> Option<Outcome> {
    utterance.mentions_any(INSTITUTION_NAME_KEYWORDS).then(|| {
        fact_reply(
            store.institution_text("nombre_institucion"),
            replies::NAME_MISSING,
            &replies::NAME_SUGGESTIONS,
        )
    })
}

fn greeting(_store: &KnowledgeStore, utterance: &Utterance) -> Option<Outcome> {
    utterance.mentions_any(GREETING_KEYWORDS).then(|| {
        Outcome::reply(BotReply::text(replies::WELCOME).with_quick_replies(replies::CAREER_MENU))
    })
}

fn fact_reply(fact: Option<&str>, missing: &str, suggestions: &[&str]) -> Outcome {
    Outcome::reply(
        BotReply::text(fact.unwrap_or(missing)).with_quick_replies(suggestions.iter().copied()),
    )
}
