//! Run Pipeline use case
//!
//! Orchestrates one full run: understand task → generate → validate existing
//! → score both → three-way decision → adapt thresholds → report.
//!
//! Banks and thresholds are shared across runs and guarded by a single
//! mutex held for the whole run (single-writer discipline). They are only
//! mutated after every fallible collaborator call has finished, so a fatal
//! failure leaves no partial state behind.

use crate::config::PipelineSettings;
use crate::ports::knowledge_store::{KnowledgeStore, RetrievalError};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, PipelinePhase, ProgressNotifier};
use crate::telemetry::RunTelemetry;
use crate::use_cases::generate_items::ItemGenerator;
use crate::use_cases::score_items::ItemScorer;
use crate::use_cases::validate_items::ItemValidator;
use examforge_domain::{
    DecisionThresholds, Item, ItemBank, ItemBanks, MarkerReviewPolicy, Model, Provenance,
    PromptTemplate, RandomPerturbationAdapter, RunOutcomes, ScoredItem, ThreeWayDecisionEngine,
    ThresholdAdapter,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Errors that abort a pipeline run
///
/// Both variants leave the banks and thresholds exactly as they were before
/// the run started. Recoverable degradations never surface here; they are
/// reported through [`RunTelemetry`].
#[derive(Error, Debug)]
pub enum RunPipelineError {
    #[error("Task understanding failed: {0}")]
    TaskUnderstandingFailed(String),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

/// Input for one pipeline run
#[derive(Debug, Clone)]
pub struct RunPipelineInput {
    /// Free-form teacher instructions
    pub teacher_prompt: String,
    /// Previously accepted items to re-validate
    pub old_items: Vec<Item>,
}

impl RunPipelineInput {
    pub fn new(teacher_prompt: impl Into<String>) -> Self {
        Self {
            teacher_prompt: teacher_prompt.into(),
            old_items: vec![],
        }
    }

    pub fn with_old_items(mut self, old_items: Vec<Item>) -> Self {
        self.old_items = old_items;
        self
    }
}

/// Output of one pipeline run
#[derive(Debug, Clone)]
pub struct RunPipelineOutput {
    /// Full accepted bank after this run's appends
    pub accepted_bank: ItemBank,
    /// Full rejected bank after this run's appends
    pub rejected_bank: ItemBank,
    /// Raw newly generated items, pre-decision, for caller visibility
    pub newly_generated: Vec<Item>,
    /// Thresholds that the *next* run will start from
    pub thresholds: DecisionThresholds,
    /// Degradation and outcome counters for this run
    pub telemetry: RunTelemetry,
}

/// Shared mutable state: the critical section between runs
struct PipelineState {
    banks: ItemBanks,
    thresholds: DecisionThresholds,
    adapter: Box<dyn ThresholdAdapter>,
}

/// Use case for running the full generation/validation/decision pipeline
pub struct RunPipelineUseCase<G: LlmGateway + 'static, S: KnowledgeStore + 'static> {
    gateway: Arc<G>,
    generator: ItemGenerator<G, S>,
    validator: ItemValidator<G, S>,
    scorer: ItemScorer<G>,
    engine: ThreeWayDecisionEngine,
    generator_model: Model,
    state: Mutex<PipelineState>,
}

impl<G: LlmGateway + 'static, S: KnowledgeStore + 'static> RunPipelineUseCase<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>, settings: PipelineSettings) -> Self {
        let generator = ItemGenerator::new(
            Arc::clone(&gateway),
            Arc::clone(&store),
            settings.generator.clone(),
            settings.retrieval_k,
        );
        let validator = ItemValidator::new(
            Arc::clone(&gateway),
            Arc::clone(&store),
            settings.generator.clone(),
            settings.retrieval_k,
        );
        let scorer = ItemScorer::new(Arc::clone(&gateway), settings.evaluator.clone());

        Self {
            gateway,
            generator,
            validator,
            scorer,
            engine: ThreeWayDecisionEngine::new(Box::new(MarkerReviewPolicy::new(
                settings.review_marker,
            ))),
            generator_model: settings.generator,
            state: Mutex::new(PipelineState {
                banks: ItemBanks::new(),
                thresholds: settings.thresholds,
                adapter: Box::new(RandomPerturbationAdapter::new(settings.jitter)),
            }),
        }
    }

    /// Replace the decision engine (custom review policy)
    pub fn with_engine(mut self, engine: ThreeWayDecisionEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the threshold adaptation strategy
    pub fn with_adapter(self, adapter: Box<dyn ThresholdAdapter>) -> Self {
        self.state
            .try_lock()
            .expect("no runs before construction finishes")
            .adapter = adapter;
        self
    }

    /// Seed the banks, e.g. from persistent storage
    pub fn with_banks(self, banks: ItemBanks) -> Self {
        self.state
            .try_lock()
            .expect("no runs before construction finishes")
            .banks = banks;
        self
    }

    /// Snapshot of the current banks
    pub async fn banks(&self) -> ItemBanks {
        self.state.lock().await.banks.clone()
    }

    /// Snapshot of the current thresholds
    pub async fn thresholds(&self) -> DecisionThresholds {
        self.state.lock().await.thresholds
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunPipelineInput,
    ) -> Result<RunPipelineOutput, RunPipelineError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute one full run with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunPipelineInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunPipelineOutput, RunPipelineError> {
        // Single-writer discipline: hold the state lock for the whole run
        let mut state = self.state.lock().await;
        let thresholds = state.thresholds;
        let mut telemetry = RunTelemetry::default();

        info!(thresholds = %thresholds, old_items = input.old_items.len(), "Starting pipeline run");

        // Step 1: Task understanding — the only fatal LLM failure
        progress.on_phase_start(&PipelinePhase::Understanding, 1);
        let task_description = self.understand_task(&input.teacher_prompt).await?;
        progress.on_task_complete(&PipelinePhase::Understanding, true);
        progress.on_phase_complete(&PipelinePhase::Understanding);

        // Step 2: Generate new candidates (degrades to empty on bad output)
        progress.on_phase_start(&PipelinePhase::Generation, 1);
        let generation = self.generator.generate(&task_description).await?;
        telemetry.generation_parse_failures += generation.parse_failures;
        progress.on_task_complete(&PipelinePhase::Generation, generation.parse_failures == 0);
        progress.on_phase_complete(&PipelinePhase::Generation);

        // Step 3: Validate previously accepted items
        progress.on_phase_start(&PipelinePhase::Validation, input.old_items.len());
        let validation = self.validator.validate(&input.old_items).await?;
        telemetry.validated_kept = validation.retained.len();
        telemetry.validated_dropped = validation.dropped;
        progress.on_phase_complete(&PipelinePhase::Validation);

        // Step 4: Score everything that survived, tagging provenance
        let total_to_score = generation.items.len() + validation.retained.len();
        progress.on_phase_start(&PipelinePhase::Scoring, total_to_score);
        let new_scores = self
            .scorer
            .score_batch(&generation.items, Provenance::New)
            .await;
        let existing_scores = self
            .scorer
            .score_batch(&validation.retained, Provenance::Existing)
            .await;
        telemetry.scoring_fallbacks = new_scores.fallbacks + existing_scores.fallbacks;
        progress.on_phase_complete(&PipelinePhase::Scoring);

        // Stable decision order: new items first, then validated existing
        let mut scored: Vec<ScoredItem> = new_scores.scored;
        scored.extend(existing_scores.scored);

        // Step 5: Three-way decision, appending to the banks
        progress.on_phase_start(&PipelinePhase::Decision, scored.len());
        let partition = self.engine.decide(&scored, &thresholds);
        telemetry.accepted = partition.accepted.len();
        telemetry.rejected = partition.rejected.len();
        telemetry.review_resolved = partition.review_resolved;
        state.banks.accepted.extend(partition.accepted.iter().cloned());
        state.banks.rejected.extend(partition.rejected.iter().cloned());
        progress.on_phase_complete(&PipelinePhase::Decision);

        // Step 6: Adapt thresholds for the next run
        progress.on_phase_start(&PipelinePhase::Adaptation, 1);
        let outcomes = RunOutcomes {
            accepted: partition.accepted.len(),
            rejected: partition.rejected.len(),
            review_resolved: partition.review_resolved,
        };
        state.thresholds = state.adapter.adapt(&thresholds, &outcomes);
        progress.on_phase_complete(&PipelinePhase::Adaptation);

        if telemetry.degraded() {
            warn!(
                parse_failures = telemetry.generation_parse_failures,
                fallbacks = telemetry.scoring_fallbacks,
                "Run completed with degraded collaborator output"
            );
        }
        info!(
            accepted = telemetry.accepted,
            rejected = telemetry.rejected,
            review = telemetry.review_resolved,
            next_thresholds = %state.thresholds,
            "Pipeline run complete"
        );

        // Step 7: Report
        Ok(RunPipelineOutput {
            accepted_bank: state.banks.accepted.clone(),
            rejected_bank: state.banks.rejected.clone(),
            newly_generated: generation.items,
            thresholds: state.thresholds,
            telemetry,
        })
    }

    /// Step 1: turn the free-form teacher prompt into a task description
    async fn understand_task(&self, teacher_prompt: &str) -> Result<String, RunPipelineError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(
                &self.generator_model,
                PromptTemplate::task_understanding_system(),
            )
            .await
            .map_err(|e| RunPipelineError::TaskUnderstandingFailed(e.to_string()))?;

        let description = session
            .send(&PromptTemplate::task_understanding(teacher_prompt))
            .await
            .map_err(|e| RunPipelineError::TaskUnderstandingFailed(e.to_string()))?;

        if description.trim().is_empty() {
            return Err(RunPipelineError::TaskUnderstandingFailed(
                "empty task description".to_string(),
            ));
        }
        Ok(description)
    }
}
