//! Conversation engine.
//!
//! A deterministic state machine over [`ConversationState`]:
//!
//! - at the entry step any input opens the survey and the first question is
//!   asked
//! - on later steps the input is validated; a rejected answer repeats the
//!   step with the reason, an accepted one is stored and the next question
//!   is asked
//! - once the last answer is accepted the building is assessed and the state
//!   returns to the entry step, whether or not the assessment succeeded
//!
//! Every turn yields exactly one reply and one new state. The engine itself
//! is immutable, so one instance can serve any number of conversations.

use tracing::{debug, error, info, warn};

use crate::domain::assessment::{
    CategoryPolicy, EncodingError, FeatureEncoder, ModelHandle, PredictionError, ResultComposer,
    Verdict,
};
use crate::domain::questionnaire::{validate, Answers, QuestionRegistry, ValidationError};

use super::state::ConversationState;

/// Appended to every rejected answer.
pub const RETRY_SUFFIX: &str = "\n\nIntenta de nuevo.";

/// Appended to every reply that ends a survey.
pub const RESTART_HINT: &str = "\n\n🔄 **Escribe 'empezar' si quieres analizar otro edificio.**";

/// Result of one conversational turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    /// The single message to show the user.
    pub reply: String,
    /// State to hand back with the next input.
    pub state: ConversationState,
    pub outcome: TurnOutcome,
}

/// What happened during a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// A question was asked.
    Prompted,
    /// The answer was rejected; the step is unchanged.
    Rejected(ValidationError),
    /// The survey finished with a verdict.
    Completed(Verdict),
    /// The survey finished but the building could not be assessed.
    Failed(CompletionError),
}

/// Why a finished survey produced no verdict.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompletionError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl CompletionError {
    /// Text shown to the user in place of a verdict.
    pub fn user_message(&self) -> String {
        match self {
            CompletionError::Prediction(PredictionError::ModelUnavailable) => {
                "❌ Error: El modelo no está cargado.".to_string()
            }
            other => format!("❌ Ocurrió un error interno al calcular: {other}"),
        }
    }
}

/// Drives conversations through the building survey.
#[derive(Debug, Clone)]
pub struct ConversationEngine {
    registry: &'static QuestionRegistry,
    encoder: FeatureEncoder,
    composer: ResultComposer,
    model: Option<ModelHandle>,
}

impl ConversationEngine {
    /// Creates an engine over the building survey.
    ///
    /// `None` for the model is allowed: the survey still runs, and every
    /// completion reports that the model is not loaded.
    pub fn new(model: Option<ModelHandle>) -> Self {
        Self {
            registry: QuestionRegistry::global(),
            encoder: FeatureEncoder::default(),
            composer: ResultComposer::default(),
            model,
        }
    }

    /// Sets the year building age is measured against.
    pub fn with_reference_year(mut self, reference_year: i32) -> Self {
        self.composer = ResultComposer::new(reference_year);
        self
    }

    /// Sets how unknown categorical answers are encoded.
    pub fn with_category_policy(mut self, policy: CategoryPolicy) -> Self {
        self.encoder = FeatureEncoder::new(policy);
        self
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// The greeting shown before the first input.
    pub fn opening_message(&self) -> &str {
        self.registry.entry_step().prompt()
    }

    /// Abandons any conversation in progress.
    pub fn reset(&self) -> Turn {
        Turn {
            reply: self.opening_message().to_string(),
            state: ConversationState::new(),
            outcome: TurnOutcome::Prompted,
        }
    }

    /// Processes one user message.
    pub fn respond(&self, state: ConversationState, input: &str) -> Turn {
        if state.is_at_entry() {
            debug!("survey started");
            return self.prompt_or_complete(ConversationState::started());
        }

        let step = match self.registry.get(state.step_index()) {
            Ok(step) => step,
            Err(err) => {
                warn!(error = %err, "discarding conversation state");
                return self.reset();
            }
        };

        match validate(input, step) {
            Ok(value) => {
                debug!(step = step.key(), "answer accepted");
                self.prompt_or_complete(state.record(step.key(), value))
            }
            Err(rejection) => {
                debug!(step = step.key(), reason = %rejection, "answer rejected");
                Turn {
                    reply: format!("{rejection}{RETRY_SUFFIX}"),
                    state,
                    outcome: TurnOutcome::Rejected(rejection),
                }
            }
        }
    }

    fn prompt_or_complete(&self, state: ConversationState) -> Turn {
        match self.registry.get(state.step_index()) {
            Ok(next) => Turn {
                reply: next.prompt().to_string(),
                state,
                outcome: TurnOutcome::Prompted,
            },
            Err(_) => self.complete(state.into_answers()),
        }
    }

    fn complete(&self, answers: Answers) -> Turn {
        let (reply, outcome) = match self.assess(&answers) {
            Ok(verdict) => {
                info!(
                    label = ?verdict.label,
                    needs_inspection = verdict.label.needs_inspection(),
                    age = verdict.derived_age,
                    confidence = ?verdict.confidence,
                    "building assessed"
                );
                (self.composer.compose(&verdict), TurnOutcome::Completed(verdict))
            }
            Err(err) => {
                error!(error = %err, "building assessment failed");
                (err.user_message(), TurnOutcome::Failed(err))
            }
        };

        Turn {
            reply: format!("{reply}{RESTART_HINT}"),
            state: ConversationState::new(),
            outcome,
        }
    }

    fn assess(&self, answers: &Answers) -> Result<Verdict, CompletionError> {
        let model = self
            .model
            .as_ref()
            .ok_or(PredictionError::ModelUnavailable)?;
        let record = self.encoder.encode(answers)?;
        let classification = model.classify(&record)?;

        Ok(self.composer.verdict(classification, answers)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::MockClassifier;
    use crate::domain::questionnaire::{keys, ValidatedValue};
    use crate::ports::ClassProbabilities;
    use std::sync::Arc;

    const ANSWERS: [&str; 8] = [
        "Vivienda individual",
        "120",
        "1990",
        "ZARAGOZA",
        "E",
        "150.5",
        "35",
        "2020",
    ];

    fn engine_with(mock: MockClassifier) -> ConversationEngine {
        ConversationEngine::new(Some(ModelHandle::new(Arc::new(mock)).unwrap()))
    }

    /// Plays the greeting and all answers but the last.
    fn almost_done(engine: &ConversationEngine) -> ConversationState {
        let mut state = engine.respond(ConversationState::new(), "hola").state;
        for answer in &ANSWERS[..ANSWERS.len() - 1] {
            state = engine.respond(state, answer).state;
        }
        state
    }

    #[test]
    fn entry_input_asks_first_question() {
        let engine = engine_with(MockClassifier::new());

        let turn = engine.respond(ConversationState::new(), "hola");

        assert_eq!(turn.state, ConversationState::started());
        assert!(turn.reply.starts_with("1️⃣ ¿Qué **tipo de edificio** es?"));
        assert_eq!(turn.outcome, TurnOutcome::Prompted);
    }

    #[test]
    fn entry_ignores_what_was_typed() {
        let engine = engine_with(MockClassifier::new());

        let a = engine.respond(ConversationState::new(), "hola");
        let b = engine.respond(ConversationState::new(), "empezar");

        assert_eq!(a, b);
    }

    #[test]
    fn accepted_answer_advances_and_asks_next() {
        let engine = engine_with(MockClassifier::new());
        let state = ConversationState::started();

        let turn = engine.respond(state, "local");

        assert_eq!(turn.state.step_index(), 2);
        assert_eq!(
            turn.state.answers().get(keys::BUILDING_TYPE),
            Some(&ValidatedValue::Text("Local".to_string()))
        );
        assert!(turn.reply.starts_with("2️⃣"));
    }

    #[test]
    fn rejected_answer_keeps_state_exactly() {
        let engine = engine_with(MockClassifier::new());
        let state = engine.respond(ConversationState::started(), "Local").state;

        let turn = engine.respond(state.clone(), "-1");

        assert_eq!(turn.state, state);
        assert_eq!(turn.outcome, TurnOutcome::Rejected(ValidationError::Negative));
        assert_eq!(
            turn.reply,
            "⚠️ El número no puede ser negativo.\n\nIntenta de nuevo."
        );
    }

    #[test]
    fn completion_produces_verdict_and_resets() {
        let mock = MockClassifier::new().with_prediction(1, Some(ClassProbabilities::new(0.1, 0.9)));
        let engine = engine_with(mock.clone());

        let turn = engine.respond(almost_done(&engine), "2020");

        assert_eq!(turn.state, ConversationState::new());
        assert!(turn.reply.contains("RESULTADO: INEFICIENTE"));
        assert!(turn.reply.contains("**90.0%**"));
        assert!(turn.reply.ends_with(RESTART_HINT));
        match turn.outcome {
            TurnOutcome::Completed(verdict) => assert_eq!(verdict.derived_age, 35),
            other => panic!("expected verdict, got {:?}", other),
        }
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn missing_model_reports_unavailable_and_resets() {
        let engine = ConversationEngine::new(None);

        let turn = engine.respond(almost_done(&engine), "2020");

        assert_eq!(turn.state, ConversationState::new());
        assert_eq!(
            turn.reply,
            format!("❌ Error: El modelo no está cargado.{RESTART_HINT}")
        );
        assert_eq!(
            turn.outcome,
            TurnOutcome::Failed(CompletionError::Prediction(PredictionError::ModelUnavailable))
        );
    }

    #[test]
    fn inference_failure_is_reported_and_resets() {
        let engine = engine_with(MockClassifier::new().with_error("model exploded"));

        let turn = engine.respond(almost_done(&engine), "2020");

        assert_eq!(turn.state, ConversationState::new());
        assert!(turn
            .reply
            .starts_with("❌ Ocurrió un error interno al calcular: Inference failed: model exploded"));
        assert!(matches!(turn.outcome, TurnOutcome::Failed(_)));
    }

    #[test]
    fn incomplete_answers_fail_encoding_instead_of_guessing() {
        let engine = engine_with(MockClassifier::new());
        let state: ConversationState =
            serde_json::from_str(r#"{"step_index":8,"answers":{"tipo_edificio":"Local"}}"#).unwrap();

        let turn = engine.respond(state, "2020");

        assert_eq!(turn.state, ConversationState::new());
        assert!(matches!(
            turn.outcome,
            TurnOutcome::Failed(CompletionError::Encoding(EncodingError::MissingField(_)))
        ));
    }

    #[test]
    fn out_of_range_state_is_discarded() {
        let engine = engine_with(MockClassifier::new());
        let state: ConversationState =
            serde_json::from_str(r#"{"step_index":42,"answers":{}}"#).unwrap();

        assert_eq!(engine.respond(state, "hola"), engine.reset());
    }

    #[test]
    fn reset_returns_greeting_and_entry_state() {
        let engine = ConversationEngine::new(None);

        let turn = engine.reset();

        assert_eq!(turn.state, ConversationState::new());
        assert_eq!(turn.reply, engine.opening_message());
        assert!(turn.reply.starts_with("¡Hola! 👋"));
    }

    #[test]
    fn reference_year_is_configurable() {
        let engine = engine_with(MockClassifier::new()).with_reference_year(2030);

        let turn = engine.respond(almost_done(&engine), "2020");

        match turn.outcome {
            TurnOutcome::Completed(verdict) => assert_eq!(verdict.derived_age, 40),
            other => panic!("expected verdict, got {:?}", other),
        }
    }

    #[test]
    fn user_message_wraps_encoding_errors() {
        let err = CompletionError::from(EncodingError::MissingField("provincia".to_string()));

        assert_eq!(
            err.user_message(),
            "❌ Ocurrió un error interno al calcular: Missing required answer: provincia"
        );
    }
}
