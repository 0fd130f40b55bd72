//! Integration tests for the full survey conversation.
//!
//! These tests drive the public API the way a chat host would:
//! 1. Hold an opaque `ConversationState` per user
//! 2. Feed each message through `ConversationEngine::respond`
//! 3. Show the single reply and keep the returned state
//!
//! A rule-based classifier stands in for the trained model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use energy_sherpa::adapters::MockClassifier;
use energy_sherpa::config::AssistantConfig;
use energy_sherpa::domain::assessment::{
    CategoryPolicy, EfficiencyLabel, EncodingError, FeatureRecord, ModelContractError,
    ModelHandle,
};
use energy_sherpa::domain::conversation::{
    CompletionError, ConversationEngine, ConversationState, TurnOutcome, RESTART_HINT,
};
use energy_sherpa::domain::questionnaire::ValidationError;
use energy_sherpa::ports::{
    ClassProbabilities, Classifier, ClassifierError, ClassifierSchema, UnknownCategoryPolicy,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Flags buildings with a poor certificate letter as inefficient.
struct LetterRuleClassifier {
    calls: AtomicUsize,
}

impl LetterRuleClassifier {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl Classifier for LetterRuleClassifier {
    fn schema(&self) -> ClassifierSchema {
        ClassifierSchema::new(FeatureRecord::schema(), UnknownCategoryPolicy::Ignore)
    }

    fn predict(&self, record: &FeatureRecord) -> Result<u8, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(record.consumption_class)
    }

    fn predict_probability(
        &self,
        record: &FeatureRecord,
    ) -> Result<Option<ClassProbabilities>, ClassifierError> {
        Ok(Some(if record.consumption_class == 1 {
            ClassProbabilities::new(0.2, 0.8)
        } else {
            ClassProbabilities::new(0.75, 0.25)
        }))
    }
}

const GREETING: &str = "hola";

const SURVEY: [&str; 8] = [
    "Vivienda individual",
    "120",
    "1990",
    "ZARAGOZA",
    "E",
    "150.5",
    "35",
    "2020",
];

fn engine_with(classifier: Arc<dyn Classifier>) -> ConversationEngine {
    ConversationEngine::new(Some(ModelHandle::new(classifier).unwrap()))
}

/// Plays every message and returns the replies plus the final state.
fn play(
    engine: &ConversationEngine,
    messages: &[&str],
) -> (Vec<String>, ConversationState, Vec<TurnOutcome>) {
    let mut state = ConversationState::new();
    let mut replies = Vec::new();
    let mut outcomes = Vec::new();
    for message in messages {
        let turn = engine.respond(state, message);
        replies.push(turn.reply);
        outcomes.push(turn.outcome);
        state = turn.state;
    }
    (replies, state, outcomes)
}

fn full_survey() -> Vec<&'static str> {
    let mut messages = vec![GREETING];
    messages.extend_from_slice(&SURVEY);
    messages
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn complete_survey_yields_efficient_verdict() {
    let engine = engine_with(Arc::new(LetterRuleClassifier::new()));

    let (replies, state, outcomes) = play(&engine, &full_survey());

    assert_eq!(replies.len(), 9);
    assert_eq!(state, ConversationState::new());
    let last = replies.last().unwrap();
    assert!(last.starts_with("### 🟢 RESULTADO: EFICIENTE"));
    assert!(last.contains("- Antigüedad: 35 años"));
    assert!(last.contains("- Consumo: 150.5 kWh/m²"));
    assert!(last.contains("**75.0%**"));
    assert!(last.ends_with(RESTART_HINT));
    match outcomes.last().unwrap() {
        TurnOutcome::Completed(verdict) => {
            assert_eq!(verdict.label, EfficiencyLabel::Efficient);
            assert_eq!(verdict.derived_age, 35);
        }
        other => panic!("expected verdict, got {:?}", other),
    }
}

#[test]
fn poor_letter_yields_inefficient_verdict() {
    let engine = engine_with(Arc::new(LetterRuleClassifier::new()));
    let mut messages = full_survey();
    messages[5] = "g";

    let (replies, _, _) = play(&engine, &messages);

    let last = replies.last().unwrap();
    assert!(last.starts_with("### 🔴 RESULTADO: INEFICIENTE"));
    assert!(last.contains("La probabilidad de ineficiencia es del **80.0%**."));
    assert!(last.contains("- Emisiones: 35.0 kgCO₂/m²"));
}

#[test]
fn every_step_prompts_until_the_last() {
    let engine = engine_with(Arc::new(LetterRuleClassifier::new()));

    let (replies, _, outcomes) = play(&engine, &full_survey());

    for (reply, outcome) in replies.iter().zip(&outcomes).take(8) {
        assert_eq!(outcome, &TurnOutcome::Prompted);
        assert!(!reply.is_empty());
    }
    assert!(replies[0].starts_with("1️⃣"));
    assert!(replies[7].starts_with("8️⃣"));
}

#[test]
fn invalid_answers_are_retried_without_losing_progress() {
    let classifier = Arc::new(LetterRuleClassifier::new());
    let engine = engine_with(classifier.clone());
    let messages = [
        GREETING,
        "Vivienda individual",
        "mucho",
        "120",
        "1700",
        "1990",
        "MADRID",
        "zaragoza",
        "E",
        "150.5",
        "35",
        "2020",
    ];

    let (replies, state, outcomes) = play(&engine, &messages);

    assert_eq!(
        outcomes[2],
        TurnOutcome::Rejected(ValidationError::NotANumber)
    );
    assert_eq!(
        outcomes[4],
        TurnOutcome::Rejected(ValidationError::YearOutOfRange)
    );
    assert!(matches!(
        outcomes[6],
        TurnOutcome::Rejected(ValidationError::UnknownChoice { .. })
    ));
    assert!(replies[6].contains("ZARAGOZA, HUESCA, TERUEL"));
    assert!(replies[6].ends_with("Intenta de nuevo."));
    assert!(matches!(outcomes.last(), Some(TurnOutcome::Completed(_))));
    assert_eq!(state, ConversationState::new());
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn finished_conversation_can_start_again() {
    let engine = engine_with(Arc::new(LetterRuleClassifier::new()));
    let (_, state, _) = play(&engine, &full_survey());

    let turn = engine.respond(state, "empezar");

    assert_eq!(turn.state.step_index(), 1);
    assert!(turn.state.answers().is_empty());
    assert!(turn.reply.starts_with("1️⃣"));
}

#[test]
fn conversations_do_not_share_answers() {
    let engine = engine_with(Arc::new(LetterRuleClassifier::new()));
    let mut alice = engine.respond(ConversationState::new(), GREETING).state;
    let mut bob = engine.respond(ConversationState::new(), GREETING).state;

    alice = engine.respond(alice, "Local").state;
    bob = engine.respond(bob, "Unifamiliar").state;
    alice = engine.respond(alice, "80").state;

    assert_eq!(alice.step_index(), 3);
    assert_eq!(bob.step_index(), 2);
    assert_ne!(alice.answers(), bob.answers());
}

#[test]
fn one_engine_serves_many_threads() {
    let classifier = Arc::new(LetterRuleClassifier::new());
    let engine = engine_with(classifier.clone());

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let (_, state, outcomes) = play(&engine, &full_survey());
                assert_eq!(state, ConversationState::new());
                assert!(matches!(outcomes.last(), Some(TurnOutcome::Completed(_))));
            });
        }
    });

    assert_eq!(classifier.calls.load(Ordering::SeqCst), 4);
}

#[test]
fn state_survives_serialization_between_turns() {
    let engine = engine_with(Arc::new(LetterRuleClassifier::new()));
    let mut state = ConversationState::new();

    for message in full_survey() {
        let stored = serde_json::to_string(&state).unwrap();
        let restored: ConversationState = serde_json::from_str(&stored).unwrap();
        state = engine.respond(restored, message).state;
    }

    assert_eq!(state, ConversationState::new());
}

#[test]
fn missing_model_still_runs_the_survey() {
    let engine = ConversationEngine::new(None);

    let (replies, state, outcomes) = play(&engine, &full_survey());

    assert_eq!(state, ConversationState::new());
    assert_eq!(
        replies.last().unwrap(),
        &format!("❌ Error: El modelo no está cargado.{RESTART_HINT}")
    );
    assert!(matches!(outcomes.last(), Some(TurnOutcome::Failed(_))));
}

#[test]
fn incompatible_model_is_refused_up_front() {
    let mut columns = FeatureRecord::schema();
    columns.swap(0, 1);
    let mock = MockClassifier::new()
        .with_schema(ClassifierSchema::new(columns, UnknownCategoryPolicy::Ignore));

    let result = ModelHandle::new(Arc::new(mock));

    assert!(matches!(
        result,
        Err(ModelContractError::ColumnMismatch { .. })
    ));
}

#[test]
fn configured_engine_follows_settings() {
    let config = AssistantConfig {
        reference_year: 2030,
        unknown_category: CategoryPolicy::Reject,
    };
    let mock = MockClassifier::new().with_prediction(0, None);
    let engine = config.build_engine(Some(ModelHandle::new(Arc::new(mock.clone())).unwrap()));

    let (replies, _, outcomes) = play(&engine, &full_survey());

    assert!(replies.last().unwrap().contains("- Antigüedad: 40 años"));
    assert!(!replies.last().unwrap().contains("confianza"));
    assert!(matches!(outcomes.last(), Some(TurnOutcome::Completed(_))));
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.get_calls()[0].province, 0);
    assert_eq!(mock.get_calls()[0].surface_m2, "120");
}

#[test]
fn completion_error_messages_are_user_facing() {
    let err = CompletionError::from(EncodingError::MissingField("provincia".to_string()));

    assert!(err
        .user_message()
        .starts_with("❌ Ocurrió un error interno al calcular:"));
}
