//! Respond use case.
//!
//! Runs one user message through the conversational RAG pipeline:
//!
//! 1. validate the request (session id and text)
//! 2. lock the session history
//! 3. classifier gate (fail-closed)
//! 4. retrieval with a query built from recent turns plus the new text
//! 5. answer generation and strict parsing
//! 6. append the user/agent pair and release the lock
//!
//! Every failure past validation becomes a canned [`GaneshResponse`], so
//! [`RespondUseCase::execute`] only errors on invalid input.

use crate::config::{ModelConfig, RagParams};
use crate::ports::context_retriever::ContextRetriever;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::StageNotifier;
use crate::ports::session_store::SessionStore;
use ganesha_domain::{
    ClassifierOutcome, DomainError, GaneshResponse, PromptTemplate, Question, SessionHistory,
    SessionId, Stage, parse_classifier_reply, truncate, validate_and_parse,
};
use serde_json::json;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors returned by [`RespondUseCase::execute`].
#[derive(Error, Debug)]
pub enum RespondError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),
}

/// What the user sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMessage {
    /// Typed text
    Text(String),
    /// Output of a speech-to-text step; may legitimately come back empty
    Transcription(String),
}

impl UserMessage {
    pub fn text(&self) -> &str {
        match self {
            UserMessage::Text(text) | UserMessage::Transcription(text) => text,
        }
    }

    pub fn is_transcription(&self) -> bool {
        matches!(self, UserMessage::Transcription(_))
    }

    fn into_text(self) -> String {
        match self {
            UserMessage::Text(text) | UserMessage::Transcription(text) => text,
        }
    }
}

/// Input for the [`RespondUseCase`].
#[derive(Debug, Clone)]
pub struct RespondInput {
    /// Caller-supplied session identity. Validated by the use case.
    pub session_id: String,
    pub message: UserMessage,
    /// Cancels whichever outbound call is in flight. The request still
    /// completes with a fallback response.
    pub cancellation: Option<CancellationToken>,
}

impl RespondInput {
    pub fn text(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: UserMessage::Text(text.into()),
            cancellation: None,
        }
    }

    pub fn transcription(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: UserMessage::Transcription(text.into()),
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Result of a respond request.
#[derive(Debug, Clone)]
pub struct RespondOutput {
    pub response: GaneshResponse,
    /// Terminal stage the request ended in
    pub stage: Stage,
}

/// Why a bounded outbound call did not produce a value.
#[derive(Debug)]
enum CallError<E> {
    Failed(E),
    TimedOut(Duration),
    Cancelled,
}

impl<E: fmt::Display> fmt::Display for CallError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Failed(e) => write!(f, "{}", e),
            CallError::TimedOut(limit) => write!(f, "timed out after {:?}", limit),
            CallError::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Await `call`, bounded by `limit` and raced against `cancellation`.
async fn bounded<T, E, F>(
    call: F,
    limit: Option<Duration>,
    cancellation: Option<&CancellationToken>,
) -> Result<T, CallError<E>>
where
    F: Future<Output = Result<T, E>>,
{
    let timed = async move {
        match limit {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result.map_err(CallError::Failed),
                Err(_) => Err(CallError::TimedOut(limit)),
            },
            None => call.await.map_err(CallError::Failed),
        }
    };

    match cancellation {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(CallError::Cancelled),
                result = timed => result,
            }
        }
        None => timed.await,
    }
}

/// Use case answering one user message in the context of its session.
#[derive(Clone)]
pub struct RespondUseCase {
    gateway: Arc<dyn LlmGateway>,
    retriever: Arc<dyn ContextRetriever>,
    sessions: Arc<dyn SessionStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
    models: ModelConfig,
    params: RagParams,
}

impl RespondUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        retriever: Arc<dyn ContextRetriever>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            gateway,
            retriever,
            sessions,
            conversation_logger: Arc::new(NoConversationLogger),
            models: ModelConfig::default(),
            params: RagParams::default(),
        }
    }

    pub fn with_models(mut self, models: ModelConfig) -> Self {
        self.models = models;
        self
    }

    pub fn with_params(mut self, params: RagParams) -> Self {
        self.params = params;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn models(&self) -> &ModelConfig {
        &self.models
    }

    /// Copy of a session's history, or `None` if the session was never used.
    ///
    /// Waits for any in-flight request on that session to finish.
    pub async fn history(&self, session_id: &SessionId) -> Option<SessionHistory> {
        let handle = self.sessions.existing(session_id)?;
        let history = handle.lock().await;
        Some(history.clone())
    }

    /// Answer one message.
    ///
    /// Returns [`RespondError::InvalidRequest`] without touching any session
    /// when the session id or the text is blank. An empty transcription gets
    /// a fixed apology and is not recorded. Every other request appends
    /// exactly one user turn and one agent turn to its session.
    pub async fn execute(
        &self,
        input: RespondInput,
        progress: &dyn StageNotifier,
    ) -> Result<RespondOutput, RespondError> {
        let RespondInput {
            session_id,
            message,
            cancellation,
        } = input;

        let session_id = SessionId::try_new(session_id).ok_or(DomainError::MissingSessionId)?;

        if let UserMessage::Transcription(text) = &message
            && text.trim().is_empty()
        {
            info!("Session {}: empty transcription, nothing to answer", session_id);
            self.conversation_logger.log(ConversationEvent::new(
                "fallback",
                json!({
                    "session_id": session_id.as_str(),
                    "step": "transcription",
                    "error": "empty transcription",
                }),
            ));
            progress.on_stage(Stage::Rejected);
            return Ok(RespondOutput {
                response: GaneshResponse::empty_transcription(),
                stage: Stage::Rejected,
            });
        }

        let question = Question::try_new(message.into_text()).ok_or(DomainError::EmptyQuestion)?;
        progress.on_stage(Stage::Received);
        info!(
            "Session {}: received '{}'",
            session_id,
            truncate(question.content(), 100)
        );

        let handle = self.sessions.session(&session_id);
        let mut history = handle.lock().await;

        progress.on_stage(Stage::Classifying);
        let outcome = self.classify(&question, cancellation.as_ref()).await;
        self.conversation_logger.log(ConversationEvent::new(
            "classification",
            json!({
                "session_id": session_id.as_str(),
                "question": question.content(),
                "outcome": outcome.as_str(),
                "detail": outcome.to_string(),
                "allowed": outcome.verdict().is_allowed(),
            }),
        ));

        let (response, stage) = if outcome.verdict().is_allowed() {
            self.answer(
                &session_id,
                &history,
                &question,
                cancellation.as_ref(),
                progress,
            )
            .await
        } else {
            if outcome.is_defaulted() {
                warn!("Classifier outcome {}, defaulting to refusal", outcome);
            } else {
                info!("Question classified as out of scope");
            }
            (GaneshResponse::router_rejection(), Stage::Rejected)
        };

        history.push_exchange(question.into_content(), &response);
        let turns = history.len();
        drop(history);

        progress.on_stage(stage);
        info!(
            "Session {}: finished in stage {} ({} turns)",
            session_id, stage, turns
        );

        Ok(RespondOutput { response, stage })
    }

    async fn classify(
        &self,
        question: &Question,
        cancellation: Option<&CancellationToken>,
    ) -> ClassifierOutcome {
        let prompt = PromptTemplate::classifier(question.content());
        debug!("Classifier prompt: {} bytes", prompt.len());

        match bounded(
            self.gateway.generate(&self.models.classifier, &prompt),
            self.params.llm_timeout,
            cancellation,
        )
        .await
        {
            Ok(reply) => {
                debug!("Classifier reply: '{}'", truncate(&reply, 40));
                parse_classifier_reply(&reply)
            }
            Err(e) => ClassifierOutcome::Failed {
                error: e.to_string(),
            },
        }
    }

    async fn answer(
        &self,
        session_id: &SessionId,
        history: &SessionHistory,
        question: &Question,
        cancellation: Option<&CancellationToken>,
        progress: &dyn StageNotifier,
    ) -> (GaneshResponse, Stage) {
        progress.on_stage(Stage::Retrieving);
        let query = PromptTemplate::retrieval_query(
            &history.render_recent(self.params.retrieval_history_turns),
            question.content(),
        );

        let context = match bounded(
            self.retriever.retrieve(&query, self.params.top_k),
            self.params.retrieval_timeout,
            cancellation,
        )
        .await
        {
            Ok(context) => context,
            Err(e) => return self.fallback(session_id, "retrieval", e),
        };
        info!("Retrieved {} context chunks", context.len());
        self.conversation_logger.log(ConversationEvent::new(
            "retrieval",
            json!({
                "session_id": session_id.as_str(),
                "query": query,
                "chunks": context.len(),
                "sources": context.sources(),
            }),
        ));

        progress.on_stage(Stage::Generating);
        let prompt = PromptTemplate::answer(
            &context.joined(),
            &history.render_recent(self.params.prompt_history_turns),
            question.content(),
        );
        debug!("Answer prompt: {} bytes", prompt.len());

        let raw = match bounded(
            self.gateway.generate(&self.models.answer, &prompt),
            self.params.llm_timeout,
            cancellation,
        )
        .await
        {
            Ok(raw) => raw,
            Err(e) => return self.fallback(session_id, "generation", e),
        };

        match validate_and_parse(&raw) {
            Ok(response) => {
                self.conversation_logger.log(ConversationEvent::new(
                    "generation",
                    json!({
                        "session_id": session_id.as_str(),
                        "model": self.models.answer.to_string(),
                        "raw": raw,
                        "lang": response.lang.code(),
                        "refusal": response.refusal,
                    }),
                ));
                (response, Stage::Parsed)
            }
            Err(e) => {
                debug!("Unparseable answer: {}", truncate(&raw, 200));
                self.fallback(session_id, "parsing", e)
            }
        }
    }

    fn fallback(
        &self,
        session_id: &SessionId,
        step: &'static str,
        error: impl fmt::Display,
    ) -> (GaneshResponse, Stage) {
        warn!("{} failed, answering with an apology: {}", step, error);
        self.conversation_logger.log(ConversationEvent::new(
            "fallback",
            json!({
                "session_id": session_id.as_str(),
                "step": step,
                "error": error.to_string(),
            }),
        ));
        (
            GaneshResponse::generation_failure(error),
            Stage::GenerationFailed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::context_retriever::RetrievalError;
    use crate::ports::llm_gateway::GatewayError;
    use crate::ports::progress::NoProgress;
    use crate::ports::session_store::SessionHandle;
    use async_trait::async_trait;
    use ganesha_domain::{ContextChunk, Model, RetrievedContext, Role};
    use serde_json::Value;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    const CLASSIFIER_MARKER: &str = "Reply with exactly one word";

    /// Answers classifier prompts from a queue (default `YES`) and answer
    /// prompts from a queue (default: a valid reply echoing the question).
    struct MockGateway {
        classifier_replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        answer_replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        delay: Option<Duration>,
        answer_delay: Option<Duration>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn new() -> Self {
            Self {
                classifier_replies: Mutex::new(VecDeque::new()),
                answer_replies: Mutex::new(VecDeque::new()),
                delay: None,
                answer_delay: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn with_classifier_reply(self, reply: Result<String, GatewayError>) -> Self {
            self.classifier_replies.lock().unwrap().push_back(reply);
            self
        }

        fn with_answer_reply(self, reply: Result<String, GatewayError>) -> Self {
            self.answer_replies.lock().unwrap().push_back(reply);
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Delay only answer prompts; the classifier still replies at once
        fn with_answer_delay(mut self, delay: Duration) -> Self {
            self.answer_delay = Some(delay);
            self
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        fn answer_calls(&self) -> usize {
            self.prompts()
                .iter()
                .filter(|p| !p.contains(CLASSIFIER_MARKER))
                .count()
        }
    }

    fn echo_answer(prompt: &str) -> String {
        let question = prompt
            .split("USER'S NEW QUESTION:\n")
            .nth(1)
            .and_then(|rest| rest.split("\n---").next())
            .unwrap_or_default();
        json!({
            "lang": "en",
            "blessing_open": "Blessings, my child.",
            "answer": format!("You asked: {}", question),
            "blessing_close": "Go with my grace.",
        })
        .to_string()
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn generate(&self, _model: &Model, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if prompt.contains(CLASSIFIER_MARKER) {
                let next = self.classifier_replies.lock().unwrap().pop_front();
                next.unwrap_or_else(|| Ok("YES".to_string()))
            } else {
                if let Some(delay) = self.answer_delay {
                    tokio::time::sleep(delay).await;
                }
                let next = self.answer_replies.lock().unwrap().pop_front();
                next.unwrap_or_else(|| Ok(echo_answer(prompt)))
            }
        }
    }

    struct MockRetriever {
        chunks: Vec<ContextChunk>,
        fail: bool,
        delay: Option<Duration>,
        queries: Mutex<Vec<(String, usize)>>,
    }

    impl MockRetriever {
        fn new() -> Self {
            Self {
                chunks: vec![
                    ContextChunk::new("The mouse Mushika carries Ganesha.").with_source("vahana.md"),
                    ContextChunk::new("Modak is his favourite sweet.").with_source("modak.md"),
                ],
                fail: false,
                delay: None,
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::new()
            }
        }

        fn queries(&self) -> Vec<(String, usize)> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContextRetriever for MockRetriever {
        async fn retrieve(&self, query: &str, k: usize) -> Result<RetrievedContext, RetrievalError> {
            self.queries.lock().unwrap().push((query.to_string(), k));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(RetrievalError::Unavailable("index offline".to_string()));
            }
            Ok(self.chunks.iter().take(k).cloned().collect())
        }
    }

    #[derive(Default)]
    struct MockSessionStore {
        sessions: Mutex<HashMap<SessionId, SessionHandle>>,
    }

    impl SessionStore for MockSessionStore {
        fn session(&self, id: &SessionId) -> SessionHandle {
            self.sessions
                .lock()
                .unwrap()
                .entry(id.clone())
                .or_default()
                .clone()
        }

        fn existing(&self, id: &SessionId) -> Option<SessionHandle> {
            self.sessions.lock().unwrap().get(id).cloned()
        }

        fn len(&self) -> usize {
            self.sessions.lock().unwrap().len()
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, Value)>>,
    }

    impl RecordingLogger {
        fn types(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
        }
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        stages: Mutex<Vec<Stage>>,
    }

    impl StageNotifier for RecordingNotifier {
        fn on_stage(&self, stage: Stage) {
            self.stages.lock().unwrap().push(stage);
        }
    }

    struct Fixture {
        gateway: Arc<MockGateway>,
        retriever: Arc<MockRetriever>,
        store: Arc<MockSessionStore>,
        logger: Arc<RecordingLogger>,
        use_case: RespondUseCase,
    }

    fn fixture_with(gateway: MockGateway, retriever: MockRetriever, params: RagParams) -> Fixture {
        let gateway = Arc::new(gateway);
        let retriever = Arc::new(retriever);
        let store = Arc::new(MockSessionStore::default());
        let logger = Arc::new(RecordingLogger::default());
        let use_case = RespondUseCase::new(gateway.clone(), retriever.clone(), store.clone())
            .with_params(params)
            .with_conversation_logger(logger.clone());
        Fixture {
            gateway,
            retriever,
            store,
            logger,
            use_case,
        }
    }

    fn fixture(gateway: MockGateway) -> Fixture {
        fixture_with(gateway, MockRetriever::new(), RagParams::default())
    }

    async fn history_of(f: &Fixture, session: &str) -> SessionHistory {
        let id = SessionId::try_new(session).unwrap();
        f.use_case.history(&id).await.unwrap_or_default()
    }

    // ==================== Request validation ====================

    #[tokio::test]
    async fn test_missing_session_id_is_invalid_and_mutates_nothing() {
        let f = fixture(MockGateway::new());

        let err = f
            .use_case
            .execute(RespondInput::text("  ", "What is a modak?"), &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RespondError::InvalidRequest(DomainError::MissingSessionId)
        ));
        assert!(f.store.is_empty());
        assert!(f.gateway.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_is_invalid_and_mutates_nothing() {
        let f = fixture(MockGateway::new());

        let err = f
            .use_case
            .execute(RespondInput::text("s1", "   "), &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RespondError::InvalidRequest(DomainError::EmptyQuestion)
        ));
        assert!(f.store.is_empty());
        assert!(f.gateway.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_empty_transcription_returns_apology_without_llm_call() {
        let f = fixture(MockGateway::new());

        let output = f
            .use_case
            .execute(RespondInput::transcription("s1", " \n"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.response, GaneshResponse::empty_transcription());
        assert_eq!(output.stage, Stage::Rejected);
        assert!(f.gateway.prompts().is_empty());
        assert!(f.retriever.queries().is_empty());
        assert!(f.store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_transcription_still_requires_session_id() {
        let f = fixture(MockGateway::new());

        let result = f
            .use_case
            .execute(RespondInput::transcription("", ""), &NoProgress)
            .await;

        assert!(result.is_err());
    }

    // ==================== Happy path ====================

    #[tokio::test]
    async fn test_allowed_question_is_answered_and_recorded() {
        let f = fixture(MockGateway::new());
        let notifier = RecordingNotifier::default();

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "What is a modak?"), &notifier)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::Parsed);
        assert!(!output.response.refusal);
        assert_eq!(output.response.answer, "You asked: What is a modak?");
        assert_eq!(
            *notifier.stages.lock().unwrap(),
            vec![
                Stage::Received,
                Stage::Classifying,
                Stage::Retrieving,
                Stage::Generating,
                Stage::Parsed,
            ]
        );

        let history = history_of(&f, "s1").await;
        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role(), Role::User);
        assert_eq!(history.turns()[0].content(), "What is a modak?");
        assert_eq!(history.turns()[1].role(), Role::Agent);
        assert_eq!(history.turns()[1].content(), output.response.to_json_string());
    }

    #[tokio::test]
    async fn test_transcription_with_text_runs_full_pipeline() {
        let f = fixture(MockGateway::new());

        let output = f
            .use_case
            .execute(RespondInput::transcription("s1", "Why the broken tusk?"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::Parsed);
        assert_eq!(history_of(&f, "s1").await.len(), 2);
    }

    #[tokio::test]
    async fn test_answer_prompt_contains_context_and_history() {
        let f = fixture(MockGateway::new());

        f.use_case
            .execute(RespondInput::text("s1", "Who is your vehicle?"), &NoProgress)
            .await
            .unwrap();
        f.use_case
            .execute(RespondInput::text("s1", "Tell me more"), &NoProgress)
            .await
            .unwrap();

        let prompts = f.gateway.prompts();
        let last_answer_prompt = prompts
            .iter()
            .rev()
            .find(|p| !p.contains(CLASSIFIER_MARKER))
            .unwrap();
        assert!(last_answer_prompt.contains("The mouse Mushika carries Ganesha."));
        assert!(last_answer_prompt.contains("Modak is his favourite sweet."));
        assert!(last_answer_prompt.contains("user: Who is your vehicle?"));
        assert!(last_answer_prompt.contains("ganesha: {"));
    }

    #[tokio::test]
    async fn test_prose_wrapped_answer_is_parsed() {
        let raw = r#"Sure! {"lang":"en","blessing_open":"","answer":"hi","blessing_close":""} Hope that helps."#;
        let f = fixture(MockGateway::new().with_answer_reply(Ok(raw.to_string())));

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Hello"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::Parsed);
        assert_eq!(output.response.answer, "hi");
    }

    // ==================== Classifier gate ====================

    #[tokio::test]
    async fn test_classifier_no_rejects_without_retrieval() {
        let f = fixture(MockGateway::new().with_classifier_reply(Ok("NO".to_string())));

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Write me a for-loop"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::Rejected);
        assert_eq!(output.response, GaneshResponse::router_rejection());
        assert!(f.retriever.queries().is_empty());
        assert_eq!(f.gateway.answer_calls(), 0);
        assert_eq!(history_of(&f, "s1").await.len(), 2);
    }

    #[tokio::test]
    async fn test_classifier_fails_closed_on_unexpected_replies() {
        for reply in ["", "MAYBE", "Yes, of course"] {
            let f = fixture(MockGateway::new().with_classifier_reply(Ok(reply.to_string())));

            let output = f
                .use_case
                .execute(RespondInput::text("s1", "Hello"), &NoProgress)
                .await
                .unwrap();

            assert_eq!(output.stage, Stage::Rejected, "reply {:?}", reply);
            assert!(output.response.is_router_rejection());
            assert_eq!(f.gateway.answer_calls(), 0);
            assert_eq!(history_of(&f, "s1").await.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_classifier_accepts_lowercase_padded_yes() {
        let f = fixture(MockGateway::new().with_classifier_reply(Ok(" yes \n".to_string())));

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Hello"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::Parsed);
    }

    #[tokio::test]
    async fn test_classifier_error_fails_closed() {
        let f = fixture(
            MockGateway::new()
                .with_classifier_reply(Err(GatewayError::ConnectionError("refused".to_string()))),
        );

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Hello"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::Rejected);
        assert!(output.response.is_router_rejection());
        assert_eq!(history_of(&f, "s1").await.len(), 2);

        let events = f.logger.events.lock().unwrap();
        let (_, payload) = &events[0];
        assert_eq!(payload["outcome"], "failed");
        assert_eq!(payload["allowed"], false);
    }

    #[tokio::test]
    async fn test_classifier_timeout_fails_closed() {
        let f = fixture_with(
            MockGateway::new().with_delay(Duration::from_millis(500)),
            MockRetriever::new(),
            RagParams::default().with_llm_timeout(Some(Duration::from_millis(20))),
        );

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Hello"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::Rejected);
        assert_eq!(history_of(&f, "s1").await.len(), 2);
    }

    #[tokio::test]
    async fn test_answer_timeout_falls_back() {
        let f = fixture_with(
            MockGateway::new().with_answer_delay(Duration::from_millis(500)),
            MockRetriever::new(),
            RagParams::default().with_llm_timeout(Some(Duration::from_millis(50))),
        );

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Why a mouse?"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::GenerationFailed);
        assert!(output.response.is_generation_failure());
        assert!(
            output
                .response
                .refusal_reason
                .as_deref()
                .unwrap()
                .contains("timed out")
        );
        assert_eq!(f.gateway.answer_calls(), 1);
        assert_eq!(history_of(&f, "s1").await.len(), 2);
    }

    #[tokio::test]
    async fn test_retrieval_timeout_falls_back() {
        let f = fixture_with(
            MockGateway::new(),
            MockRetriever::slow(Duration::from_millis(500)),
            RagParams::default().with_retrieval_timeout(Some(Duration::from_millis(50))),
        );

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Tell me about Modak"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::GenerationFailed);
        assert!(output.response.is_generation_failure());
        assert_eq!(f.retriever.queries().len(), 1);
        assert_eq!(f.gateway.answer_calls(), 0);
        assert_eq!(history_of(&f, "s1").await.len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_request_still_completes_and_records_pair() {
        let f = fixture(MockGateway::new().with_delay(Duration::from_millis(500)));
        let token = CancellationToken::new();
        token.cancel();

        let output = f
            .use_case
            .execute(
                RespondInput::text("s1", "Hello").with_cancellation(token),
                &NoProgress,
            )
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::Rejected);
        assert_eq!(history_of(&f, "s1").await.len(), 2);
    }

    // ==================== Retrieval ====================

    #[tokio::test]
    async fn test_retrieval_query_includes_recent_turns_and_new_text() {
        let f = fixture(MockGateway::new());

        f.use_case
            .execute(RespondInput::text("s1", "What is a modak?"), &NoProgress)
            .await
            .unwrap();
        f.use_case
            .execute(RespondInput::text("s1", "Tell me more"), &NoProgress)
            .await
            .unwrap();

        let queries = f.retriever.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].0, "\n\nuser: What is a modak?");
        assert_eq!(queries[0].1, 3);

        let (second, _) = &queries[1];
        assert!(second.starts_with("user: What is a modak?\nganesha: "));
        assert!(second.ends_with("\n\nuser: Tell me more"));
    }

    #[tokio::test]
    async fn test_retrieval_window_is_independent_of_prompt_window() {
        let f = fixture_with(
            MockGateway::new(),
            MockRetriever::new(),
            RagParams::default()
                .with_retrieval_history_turns(2)
                .with_prompt_history_turns(6),
        );

        for text in ["first question", "second question", "third question"] {
            f.use_case
                .execute(RespondInput::text("s1", text), &NoProgress)
                .await
                .unwrap();
        }

        let (last_query, _) = f.retriever.queries().pop().unwrap();
        assert!(!last_query.contains("first question"));
        assert!(last_query.contains("user: second question"));

        let last_prompt = f.gateway.prompts().pop().unwrap();
        assert!(last_prompt.contains("user: first question"));
        assert!(last_prompt.contains("user: second question"));
    }

    #[tokio::test]
    async fn test_retrieval_failure_falls_back_to_generation_failure() {
        let f = fixture_with(
            MockGateway::new(),
            MockRetriever::failing(),
            RagParams::default(),
        );

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Hello"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::GenerationFailed);
        assert!(output.response.is_generation_failure());
        assert!(
            output
                .response
                .refusal_reason
                .as_deref()
                .unwrap()
                .contains("index offline")
        );
        assert_eq!(f.gateway.answer_calls(), 0);
        assert_eq!(history_of(&f, "s1").await.len(), 2);
        assert_eq!(f.logger.types(), vec!["classification", "fallback"]);
    }

    // ==================== Generation ====================

    #[tokio::test]
    async fn test_malformed_answer_falls_back() {
        let f = fixture(MockGateway::new().with_answer_reply(Ok("I cannot answer that".to_string())));

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Hello"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::GenerationFailed);
        assert!(output.response.refusal);
        assert!(!output.response.answer.is_empty());
        assert!(
            output
                .response
                .refusal_reason
                .as_deref()
                .unwrap()
                .starts_with("LLM call or JSON parsing failed: ")
        );
        assert_eq!(history_of(&f, "s1").await.len(), 2);
    }

    #[tokio::test]
    async fn test_schema_violation_falls_back() {
        let raw = r#"{"lang":"fr","blessing_open":"","answer":"Bonjour","blessing_close":""}"#;
        let f = fixture(MockGateway::new().with_answer_reply(Ok(raw.to_string())));

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Hello"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::GenerationFailed);
    }

    #[tokio::test]
    async fn test_generation_error_falls_back() {
        let f = fixture(
            MockGateway::new().with_answer_reply(Err(GatewayError::RequestFailed("503".to_string()))),
        );

        let output = f
            .use_case
            .execute(RespondInput::text("s1", "Hello"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.stage, Stage::GenerationFailed);
        assert!(
            output
                .response
                .refusal_reason
                .as_deref()
                .unwrap()
                .contains("503")
        );
    }

    #[tokio::test]
    async fn test_conversation_events_for_answered_request() {
        let f = fixture(MockGateway::new());

        f.use_case
            .execute(RespondInput::text("s1", "Hello"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(
            f.logger.types(),
            vec!["classification", "retrieval", "generation"]
        );
        let events = f.logger.events.lock().unwrap();
        assert_eq!(events[1].1["chunks"], 2);
        assert_eq!(events[1].1["sources"], json!(["vahana.md", "modak.md"]));
    }

    // ==================== Sessions ====================

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let f = fixture(MockGateway::new());

        f.use_case
            .execute(RespondInput::text("alice", "Hello"), &NoProgress)
            .await
            .unwrap();
        f.use_case
            .execute(RespondInput::text("bob", "Namaste"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(history_of(&f, "alice").await.len(), 2);
        assert_eq!(history_of(&f, "bob").await.len(), 2);
        assert_eq!(f.store.len(), 2);
        let queries = f.retriever.queries();
        assert!(!queries[1].0.contains("Hello"));
    }

    #[tokio::test]
    async fn test_concurrent_requests_on_one_session_keep_pairs_together() {
        let f = fixture(MockGateway::new().with_delay(Duration::from_millis(20)));

        let (a, b) = tokio::join!(
            f.use_case
                .execute(RespondInput::text("s1", "first question"), &NoProgress),
            f.use_case
                .execute(RespondInput::text("s1", "second question"), &NoProgress),
        );
        assert_eq!(a.unwrap().stage, Stage::Parsed);
        assert_eq!(b.unwrap().stage, Stage::Parsed);

        let history = history_of(&f, "s1").await;
        assert_eq!(history.len(), 4);
        for pair in history.turns().chunks(2) {
            assert_eq!(pair[0].role(), Role::User);
            assert_eq!(pair[1].role(), Role::Agent);
            assert!(pair[1].content().contains(pair[0].content()));
        }

        // the second request saw the first exchange
        let queries = f.retriever.queries();
        assert!(queries[1].0.contains("user: first question"));
    }

    #[tokio::test]
    async fn test_history_of_unknown_session_is_none() {
        let f = fixture(MockGateway::new());
        let id = SessionId::try_new("nobody").unwrap();
        assert!(f.use_case.history(&id).await.is_none());
    }
}
