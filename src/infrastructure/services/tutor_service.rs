//! Tutor service - grade gate, strict search, single relaxation and answer composition

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::curriculum::{Board, Curriculum, GateDecision, LearnerState, LearningPath};
use crate::domain::llm::FinishReason;
use crate::domain::prompt::{TutorPrompt, TutorPromptContext};
use crate::domain::retrieval::{RetrievalFilter, ScoredChunk, VectorQuery, VectorStore};
use crate::domain::tutor::{
    fallback_answer, AdaptiveOutcome, AdaptiveRequest, BlockedTopic, NoContent, RetrievalState,
    TutorAnswer, TutorOutcome, TutorQuestion, NO_RESULTS_ANSWER,
};
use crate::domain::{
    DomainError, EmbeddingProvider, LlmProvider, LlmRequest, VectorStoreRegistry,
};

const ADAPTIVE_SELECTION: usize = 5;
const DEFAULT_DIFFICULTY: f32 = 3.0;

/// Generation and retrieval parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TutorServiceConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_k: usize,
    pub adaptive_top_k: usize,
}

impl Default for TutorServiceConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            top_k: 5,
            adaptive_top_k: 10,
        }
    }
}

/// Collaborators the tutor needs
#[derive(Debug, Clone)]
pub struct TutorServiceDeps {
    pub curriculum: Arc<Curriculum>,
    pub embedding: Arc<dyn EmbeddingProvider>,
    pub llm: Arc<dyn LlmProvider>,
    pub stores: VectorStoreRegistry,
}

/// Where a topic's content lives
struct TopicTarget {
    store: Arc<dyn VectorStore>,
    namespace: String,
}

/// Answers student questions against the curriculum index
#[derive(Debug)]
pub struct TutorService {
    curriculum: Arc<Curriculum>,
    embedding: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    stores: VectorStoreRegistry,
    config: TutorServiceConfig,
}

impl TutorService {
    pub fn new(deps: TutorServiceDeps, config: TutorServiceConfig) -> Self {
        Self {
            curriculum: deps.curriculum,
            embedding: deps.embedding,
            llm: deps.llm,
            stores: deps.stores,
            config,
        }
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn stores(&self) -> &VectorStoreRegistry {
        &self.stores
    }

    /// Run the retrieval protocol for one question
    #[instrument(skip(self, question), fields(topic = %question.topic, grade = question.grade, board = %question.board))]
    pub async fn answer(&self, question: &TutorQuestion) -> Result<TutorOutcome, DomainError> {
        debug!(state = %RetrievalState::GateCheck, "Checking grade gate");
        let advisory = match self.gate(&question.topic, question.grade) {
            Err(blocked) => {
                info!(state = %RetrievalState::Blocked, min_grade = blocked.min_grade, "Topic blocked for grade");
                return Ok(TutorOutcome::Blocked(blocked));
            }
            Ok(advisory) => advisory,
        };

        let strict = question.strict_filter();
        let Some(target) = self.target(&question.topic) else {
            info!(state = %RetrievalState::NoResults, "No vector index for topic");
            return Ok(TutorOutcome::NoResults(
                self.no_content(question, strict, advisory),
            ));
        };

        let embedding = self.embedding.embed(&question.message).await?;

        debug!(state = %RetrievalState::StrictSearch, filter = ?strict.keys(), "Searching with strict filter");
        let chunks = self.search(&target, &embedding, &strict, self.config.top_k).await?;
        if !chunks.is_empty() {
            return self
                .compose(question, strict, false, chunks, advisory)
                .await
                .map(TutorOutcome::Answered);
        }

        let relaxed = strict.relaxed();
        debug!(state = %RetrievalState::RelaxedSearch, filter = ?relaxed.keys(), "Strict search empty, relaxing filter");
        let chunks = self.search(&target, &embedding, &relaxed, self.config.top_k).await?;
        if !chunks.is_empty() {
            return self
                .compose(question, relaxed, true, chunks, advisory)
                .await
                .map(TutorOutcome::Answered);
        }

        info!(state = %RetrievalState::NoResults, "No content for strict or relaxed filter");
        Ok(TutorOutcome::NoResults(
            self.no_content(question, strict, advisory),
        ))
    }

    /// Easiest-first practice content for a student; no relaxation step
    #[instrument(skip(self, request), fields(topic = %request.topic, grade = request.grade))]
    pub async fn adaptive_content(
        &self,
        request: &AdaptiveRequest,
    ) -> Result<AdaptiveOutcome, DomainError> {
        let advisory = match self.gate(&request.topic, request.grade) {
            Err(blocked) => return Ok(AdaptiveOutcome::Blocked(blocked)),
            Ok(advisory) => advisory,
        };

        let Some(target) = self.target(&request.topic) else {
            return Ok(AdaptiveOutcome::Content {
                chunks: Vec::new(),
                content_types: Vec::new(),
                advisory,
            });
        };

        let embedding = self.embedding.embed(&request.query()).await?;
        let mut chunks = self
            .search(&target, &embedding, &request.filter(), self.config.adaptive_top_k)
            .await?;

        // stable, so equal difficulties keep their similarity order
        let difficulty =
            |chunk: &ScoredChunk| chunk.metadata.difficulty_level.unwrap_or(DEFAULT_DIFFICULTY);
        chunks.sort_by(|a, b| difficulty(a).total_cmp(&difficulty(b)));
        chunks.truncate(ADAPTIVE_SELECTION);

        let mut content_types = Vec::new();
        for chunk in &chunks {
            let content_type = chunk
                .metadata
                .content_type
                .clone()
                .unwrap_or_else(|| "general".to_string());
            if !content_types.contains(&content_type) {
                content_types.push(content_type);
            }
        }

        Ok(AdaptiveOutcome::Content {
            chunks,
            content_types,
            advisory,
        })
    }

    /// Next-step recommendation along the topic's progression
    pub fn learning_path(
        &self,
        topic: &str,
        learner: &LearnerState,
    ) -> Result<Result<LearningPath, BlockedTopic>, DomainError> {
        if let Err(blocked) = self.gate(topic, learner.grade) {
            return Ok(Err(blocked));
        }
        self.curriculum.learning_path(topic, learner).map(Ok)
    }

    /// `Ok(advisory)` when retrieval may proceed
    fn gate(&self, topic: &str, grade: u32) -> Result<Option<String>, BlockedTopic> {
        match self.curriculum.gate(topic, grade) {
            GateDecision::Blocked {
                min_grade,
                advisory,
            } => Err(BlockedTopic::new(topic, min_grade, grade, advisory)),
            decision => Ok(decision.advisory().map(str::to_string)),
        }
    }

    fn target(&self, topic: &str) -> Option<TopicTarget> {
        let config = self.curriculum.topic(topic)?;
        let store = self.stores.get(&config.index);
        if store.is_none() {
            warn!(index = %config.index, "No vector store registered for index");
        }
        Some(TopicTarget {
            store: store?,
            namespace: config.namespace.clone(),
        })
    }

    async fn search(
        &self,
        target: &TopicTarget,
        embedding: &[f32],
        filter: &RetrievalFilter,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, DomainError> {
        let query = VectorQuery::new(embedding.to_vec(), &target.namespace, top_k)
            .with_filter(filter.to_metadata_filter());
        target.store.similarity_search(query).await
    }

    async fn compose(
        &self,
        question: &TutorQuestion,
        filter: RetrievalFilter,
        relaxed_filter_used: bool,
        chunks: Vec<ScoredChunk>,
        advisory: Option<String>,
    ) -> Result<TutorAnswer, DomainError> {
        let context = prompt_context(question, &chunks);
        let prompt = TutorPrompt::build(&question.message, &context)
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let request = LlmRequest::builder()
            .system(prompt.system)
            .user(prompt.user)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self.llm.chat(&self.config.model, request).await?;
        if response.finish_reason == Some(FinishReason::Length) {
            warn!(model = %response.model, "Answer truncated at max_tokens");
        }
        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "LLM usage"
            );
        }

        let text = response.content().trim();
        let answer = if text.is_empty() {
            warn!(provider = self.llm.provider_name(), "Model returned empty text, using fallback answer");
            fallback_answer(&question.topic, question.grade, &question.board, &question.message)
        } else {
            text.to_string()
        };

        info!(
            state = %RetrievalState::Answered,
            results = chunks.len(),
            relaxed = relaxed_filter_used,
            "Answer composed"
        );

        Ok(TutorAnswer {
            answer,
            advisory,
            filter_applied: filter,
            relaxed_filter_used,
            chunks,
        })
    }

    fn no_content(
        &self,
        question: &TutorQuestion,
        strict: RetrievalFilter,
        advisory: Option<String>,
    ) -> NoContent {
        let suggestions = self.curriculum.suggestions(
            &question.topic,
            strict.subtopic.as_deref(),
            question.grade,
            &question.board,
        );

        NoContent {
            answer: NO_RESULTS_ANSWER.to_string(),
            advisory,
            filter_applied: strict,
            suggestions,
        }
    }
}

fn prompt_context(question: &TutorQuestion, chunks: &[ScoredChunk]) -> TutorPromptContext {
    let mut method_tags = BTreeSet::new();
    let mut content_types = BTreeSet::new();
    for chunk in chunks {
        method_tags.extend(chunk.metadata.method_tags.iter().cloned());
        content_types.insert(
            chunk
                .metadata
                .content_type
                .clone()
                .unwrap_or_else(|| "general".to_string()),
        );
    }

    TutorPromptContext {
        grade: question.grade,
        board: Some(question.board.clone()),
        language: question.language.clone(),
        method_tags,
        content_types,
        exclude_methods: question.exclude_methods.clone(),
        context: chunks
            .iter()
            .map(|chunk| chunk.metadata.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

/// Lesson prompt used when the student did not ask anything specific
pub fn default_lesson_message(topic: &str, grade: u32, board: &Board) -> String {
    format!(
        "Provide a comprehensive lesson on {} for grade {} {} board students",
        topic.replace('_', " "),
        grade,
        board
    )
}
