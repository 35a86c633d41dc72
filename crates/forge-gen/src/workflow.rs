//! Generic generation workflow: a live draft layered over committed history
//!
//! Edits only ever touch the [`LiveDraft`]. A successful generation merges
//! the config that was sent with the returned output into one immutable
//! [`Snapshot`] and commits it to the [`HistoryStore`]. Every change of the
//! committed present (commit, undo, redo, reset) re-synchronises the draft
//! through a single function, so the two never drift apart silently.

use crate::client::GenerationClient;
use crate::export::{file_stem, ExportedFile, Exporter};
use crate::history::HistoryStore;
use crate::options::ConfigFields;
use crate::preview::RenderSettings;
use forge_core::{ForgeError, Result};
use image::RgbaImage;
use serde::Serialize;
use std::fmt;

/// Access to the candidate artifacts carried by a generated output
pub trait Candidates {
    /// Candidate artifact URIs, in the order the backend returned them
    fn candidates(&self) -> &[String];

    /// Selection stored with the output when it was committed
    fn recorded_selection(&self) -> Option<&str> {
        None
    }
}

/// One asset kind (card, map tile, map) plugged into the generic engine
pub trait WorkflowKind: Sized {
    /// Short name used in logs and CLI output
    const NAME: &'static str;
    /// File stem used when the suggested export name is empty
    const EXPORT_FALLBACK: &'static str;

    type Config: Clone + PartialEq + fmt::Debug + Serialize + ConfigFields;
    type Output: Clone + PartialEq + fmt::Debug + Serialize + Candidates;

    /// Configuration every new timeline starts from
    fn default_config() -> Self::Config;

    /// Preconditions checked before any network call
    fn validate(config: &Self::Config) -> Result<()>;

    /// Call the backend for this kind
    fn request(client: &dyn GenerationClient, config: &Self::Config) -> Result<Self::Output>;

    /// Suggested export file name for the committed snapshot
    fn export_base_name(snapshot: &Snapshot<Self::Config, Self::Output>) -> String;

    /// Rasterise the current view for export
    fn render(view: &WorkflowView<'_, Self>, settings: &RenderSettings) -> Result<RgbaImage>;
}

/// An immutable (config, result) pair. `result` is `None` until the first
/// successful generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<C, R> {
    config: C,
    result: Option<R>,
}

impl<C, R> Snapshot<C, R> {
    /// A snapshot that has never been generated
    pub fn seed(config: C) -> Self {
        Self {
            config,
            result: None,
        }
    }

    pub fn generated(config: C, result: R) -> Self {
        Self {
            config,
            result: Some(result),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }
}

/// The mutable working copy the user edits
#[derive(Debug, Clone, PartialEq)]
pub struct LiveDraft<C> {
    pub config: C,
    /// Picked candidate artifact, if the committed result has any
    pub selected: Option<String>,
}

impl<C: Clone> LiveDraft<C> {
    fn mirror<R: Candidates>(snapshot: &Snapshot<C, R>) -> Self {
        Self {
            config: snapshot.config.clone(),
            selected: snapshot
                .result()
                .and_then(default_selection)
                .map(str::to_string),
        }
    }
}

fn default_selection<R: Candidates>(result: &R) -> Option<&str> {
    result
        .recorded_selection()
        .or_else(|| result.candidates().first().map(String::as_str))
}

/// Sequence number of one generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GenerateTicket(u64);

impl GenerateTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Generating(GenerateTicket),
}

/// A request that has been started but not yet applied
#[derive(Debug, Clone)]
pub struct PendingGeneration<C> {
    ticket: GenerateTicket,
    config: C,
}

impl<C> PendingGeneration<C> {
    pub fn ticket(&self) -> GenerateTicket {
        self.ticket
    }

    /// The config that will be recorded with the result
    pub fn config(&self) -> &C {
        &self.config
    }
}

/// What happened to a generation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// A new snapshot was committed
    Committed,
    /// The result equalled the present snapshot; history is unchanged
    Unchanged,
    /// The result belonged to a request that is no longer in flight
    Discarded,
}

/// Read-only projection for front-ends.
///
/// Editable fields come from the live draft; generated fields come from the
/// committed present, even while further edits are pending.
pub struct WorkflowView<'a, K: WorkflowKind> {
    pub config: &'a K::Config,
    pub artifact_for_display: Option<&'a str>,
    pub generated: Option<&'a K::Output>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub is_generating: bool,
    pub last_error: Option<&'a str>,
}

impl<K: WorkflowKind> WorkflowView<'_, K> {
    /// Candidates of the committed result, empty before the first generation
    pub fn candidates(&self) -> &[String] {
        self.generated.map(|g| g.candidates()).unwrap_or(&[])
    }
}

/// The generation state machine for one asset kind
pub struct GenerationWorkflow<K: WorkflowKind> {
    history: HistoryStore<Snapshot<K::Config, K::Output>>,
    draft: LiveDraft<K::Config>,
    state: WorkflowState,
    last_error: Option<String>,
    seed: K::Config,
    issued: u64,
}

impl<K: WorkflowKind> Default for GenerationWorkflow<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: WorkflowKind> GenerationWorkflow<K> {
    pub fn new() -> Self {
        Self::with_seed(K::default_config(), None)
    }

    /// Start from a custom seed config, optionally bounding undo depth
    pub fn with_seed(seed: K::Config, history_limit: Option<usize>) -> Self {
        let first = Snapshot::seed(seed.clone());
        let history = match history_limit {
            Some(limit) => HistoryStore::with_limit(first, limit),
            None => HistoryStore::new(first),
        };
        let draft = LiveDraft::mirror(history.present());
        Self {
            history,
            draft,
            state: WorkflowState::Idle,
            last_error: None,
            seed,
            issued: 0,
        }
    }

    pub fn history(&self) -> &HistoryStore<Snapshot<K::Config, K::Output>> {
        &self.history
    }

    pub fn draft(&self) -> &LiveDraft<K::Config> {
        &self.draft
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.state, WorkflowState::Generating(_))
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Mutate the draft config. Never touches history.
    pub fn edit_config<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut K::Config),
    {
        edit(&mut self.draft.config);
    }

    /// Set a draft field by name through the config's field manifest
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        self.draft.config.set_field(name, value)
    }

    /// Pick one of the committed result's candidates for display
    pub fn select_artifact(&mut self, uri: &str) -> Result<()> {
        let known = self
            .history
            .present()
            .result()
            .map(|r| r.candidates().iter().any(|c| c == uri))
            .unwrap_or(false);
        if !known {
            return Err(ForgeError::ValidationError(format!(
                "'{}' is not one of the generated candidates",
                uri
            )));
        }
        self.draft.selected = Some(uri.to_string());
        Ok(())
    }

    /// Validate the draft and mark a request as in flight.
    ///
    /// Rejected with `GenerateInFlight` while another request is pending.
    pub fn begin_generate(&mut self) -> Result<PendingGeneration<K::Config>> {
        if let WorkflowState::Generating(ticket) = self.state {
            tracing::debug!(
                kind = K::NAME,
                ticket = ticket.value(),
                "ignoring generate while a request is in flight"
            );
            return Err(ForgeError::GenerateInFlight);
        }

        if let Err(e) = K::validate(&self.draft.config) {
            self.last_error = Some(e.to_string());
            return Err(e);
        }

        self.issued += 1;
        let ticket = GenerateTicket(self.issued);
        self.state = WorkflowState::Generating(ticket);
        self.last_error = None;
        tracing::info!(kind = K::NAME, ticket = ticket.value(), "generation started");

        Ok(PendingGeneration {
            ticket,
            config: self.draft.config.clone(),
        })
    }

    /// Apply the outcome of a request started with [`begin_generate`].
    ///
    /// Outcomes for a ticket that is no longer in flight are dropped.
    /// Failures leave history and draft untouched and are recorded as the
    /// last error.
    ///
    /// [`begin_generate`]: GenerationWorkflow::begin_generate
    pub fn complete_generate(
        &mut self,
        pending: PendingGeneration<K::Config>,
        outcome: Result<K::Output>,
    ) -> Result<GenerateOutcome> {
        if self.state != WorkflowState::Generating(pending.ticket) {
            tracing::debug!(
                kind = K::NAME,
                ticket = pending.ticket.value(),
                "discarding stale generation result"
            );
            return Ok(GenerateOutcome::Discarded);
        }
        self.state = WorkflowState::Idle;

        match outcome {
            Ok(output) => {
                let committed = self
                    .history
                    .commit(Snapshot::generated(pending.config, output));
                self.resync_draft();
                tracing::info!(
                    kind = K::NAME,
                    ticket = pending.ticket.value(),
                    committed,
                    depth = self.history.undo_depth(),
                    "generation finished"
                );
                Ok(if committed {
                    GenerateOutcome::Committed
                } else {
                    GenerateOutcome::Unchanged
                })
            }
            Err(e) => {
                tracing::warn!(kind = K::NAME, error = %e, "generation failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Validate, call the backend and apply the result in one step
    pub fn generate(&mut self, client: &dyn GenerationClient) -> Result<GenerateOutcome> {
        let pending = self.begin_generate()?;
        let outcome = K::request(client, pending.config());
        self.complete_generate(pending, outcome)
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.resync_draft();
            tracing::debug!(kind = K::NAME, depth = self.history.undo_depth(), "undo");
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.resync_draft();
            tracing::debug!(kind = K::NAME, depth = self.history.undo_depth(), "redo");
        }
        moved
    }

    /// Drop all history and return to the seed config.
    ///
    /// Any in-flight request is abandoned; its result will be discarded.
    pub fn reset(&mut self) {
        self.history.reset(Snapshot::seed(self.seed.clone()));
        self.state = WorkflowState::Idle;
        self.last_error = None;
        self.resync_draft();
        tracing::debug!(kind = K::NAME, "history reset");
    }

    pub fn view(&self) -> WorkflowView<'_, K> {
        WorkflowView {
            config: &self.draft.config,
            artifact_for_display: self.draft.selected.as_deref(),
            generated: self.history.present().result(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            is_generating: self.is_generating(),
            last_error: self.last_error.as_deref(),
        }
    }

    /// Render the current view and hand it to `exporter`.
    ///
    /// Never mutates the workflow; failures come back as `ExportError`.
    pub fn export(&self, exporter: &dyn Exporter, settings: &RenderSettings) -> Result<ExportedFile> {
        let present = self.history.present();
        if present.result().is_none() {
            return Err(ForgeError::ExportError(
                "nothing has been generated yet".to_string(),
            ));
        }
        let view = self.view();
        if view.artifact_for_display.is_none() {
            return Err(ForgeError::ExportError(
                "no artwork is selected".to_string(),
            ));
        }

        let image = K::render(&view, settings)?;
        let stem = file_stem(&K::export_base_name(present), K::EXPORT_FALLBACK);
        exporter.export_visual(&image, &stem)
    }

    fn resync_draft(&mut self) {
        self.draft = LiveDraft::mirror(self.history.present());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MapTileRequest, TileContent};
    use crate::options::FieldSpec;
    use crate::testing::StubClient;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct SketchConfig {
        prompt: String,
        keywords: String,
    }

    impl ConfigFields for SketchConfig {
        fn fields() -> Vec<FieldSpec> {
            vec![
                FieldSpec::text("prompt", "Prompt"),
                FieldSpec::text("keywords", "Keywords"),
            ]
        }

        fn field(&self, name: &str) -> Option<String> {
            match name {
                "prompt" => Some(self.prompt.clone()),
                "keywords" => Some(self.keywords.clone()),
                _ => None,
            }
        }

        fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
            match name {
                "prompt" => self.prompt = value.to_string(),
                "keywords" => self.keywords = value.to_string(),
                _ => return Err(ForgeError::UnknownField(name.to_string())),
            }
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Sketch {
        images: Vec<String>,
    }

    impl Candidates for Sketch {
        fn candidates(&self) -> &[String] {
            &self.images
        }
    }

    struct SketchKind;

    impl WorkflowKind for SketchKind {
        const NAME: &'static str = "sketch";
        const EXPORT_FALLBACK: &'static str = "custom_sketch";
        type Config = SketchConfig;
        type Output = Sketch;

        fn default_config() -> SketchConfig {
            SketchConfig {
                prompt: "a lighthouse".to_string(),
                keywords: String::new(),
            }
        }

        fn validate(config: &SketchConfig) -> Result<()> {
            if config.prompt.trim().is_empty() {
                return Err(ForgeError::ValidationError(
                    "Please fill in the prompt.".to_string(),
                ));
            }
            Ok(())
        }

        fn request(client: &dyn GenerationClient, config: &SketchConfig) -> Result<Sketch> {
            let content = client.request_map_tile(&MapTileRequest {
                prompt: config.prompt.clone(),
                art_keywords: config.keywords.clone(),
            })?;
            Ok(Sketch {
                images: content.image_candidates,
            })
        }

        fn export_base_name(snapshot: &Snapshot<SketchConfig, Sketch>) -> String {
            snapshot.config().prompt.clone()
        }

        fn render(_view: &WorkflowView<'_, Self>, _settings: &RenderSettings) -> Result<RgbaImage> {
            Ok(RgbaImage::new(2, 2))
        }
    }

    fn tiles(images: &[&str]) -> StubClient {
        StubClient::with_tiles(TileContent {
            image_candidates: images.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn generated(images: &[&str]) -> GenerationWorkflow<SketchKind> {
        let mut wf = GenerationWorkflow::<SketchKind>::new();
        wf.generate(&tiles(images)).unwrap();
        wf
    }

    #[test]
    fn test_new_workflow_mirrors_seed() {
        let wf = GenerationWorkflow::<SketchKind>::new();
        assert_eq!(wf.draft().config, SketchKind::default_config());
        assert_eq!(wf.draft().selected, None);
        assert!(wf.history().present().result().is_none());
        assert_eq!(wf.state(), WorkflowState::Idle);
    }

    #[test]
    fn test_edits_only_touch_draft() {
        let mut wf = GenerationWorkflow::<SketchKind>::new();
        let before = wf.history().clone();

        wf.set_field("prompt", "a haunted forest").unwrap();
        wf.edit_config(|c| c.keywords = "misty".to_string());

        assert_eq!(wf.draft().config.prompt, "a haunted forest");
        assert_eq!(wf.draft().config.keywords, "misty");
        assert_eq!(*wf.history(), before);
        assert_eq!(wf.view().config.prompt, "a haunted forest");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut wf = GenerationWorkflow::<SketchKind>::new();
        let err = wf.set_field("colour", "red").unwrap_err();
        assert!(matches!(err, ForgeError::UnknownField(_)));
        assert_eq!(wf.draft().config, SketchKind::default_config());
    }

    #[test]
    fn test_generate_commits_and_resyncs() {
        let mut wf = GenerationWorkflow::<SketchKind>::new();
        wf.set_field("prompt", "a desert oasis").unwrap();
        let outcome = wf.generate(&tiles(&["a", "b"])).unwrap();

        assert_eq!(outcome, GenerateOutcome::Committed);
        assert_eq!(wf.history().undo_depth(), 1);
        assert_eq!(wf.history().present().config().prompt, "a desert oasis");
        assert_eq!(wf.draft().selected.as_deref(), Some("a"));
        assert_eq!(wf.view().candidates(), &["a".to_string(), "b".to_string()]);
        assert!(!wf.is_generating());
    }

    #[test]
    fn test_validation_error_makes_no_call() {
        let mut wf = GenerationWorkflow::<SketchKind>::new();
        wf.set_field("prompt", "   ").unwrap();
        let client = tiles(&["a"]);
        let history = wf.history().clone();
        let draft = wf.draft().clone();

        let err = wf.generate(&client).unwrap_err();
        assert!(matches!(err, ForgeError::ValidationError(_)));
        assert_eq!(client.calls(), 0);
        assert_eq!(*wf.history(), history);
        assert_eq!(*wf.draft(), draft);
        assert_eq!(wf.last_error(), Some("Please fill in the prompt."));
        assert_eq!(wf.state(), WorkflowState::Idle);
    }

    #[test]
    fn test_failure_is_non_destructive() {
        let mut wf = generated(&["a", "b", "c"]);
        wf.select_artifact("b").unwrap();
        wf.set_field("prompt", "edited but not generated").unwrap();
        let history = wf.history().clone();
        let draft = wf.draft().clone();

        let failing = StubClient::failing("backend exploded");
        let err = wf.generate(&failing).unwrap_err();

        assert!(matches!(err, ForgeError::GenerationError(_)));
        assert_eq!(*wf.history(), history);
        assert_eq!(*wf.draft(), draft);
        assert_eq!(wf.last_error(), Some("backend exploded"));
        assert!(!wf.is_generating());
    }

    #[test]
    fn test_successful_generate_clears_last_error() {
        let mut wf = GenerationWorkflow::<SketchKind>::new();
        let _ = wf.generate(&StubClient::failing("nope"));
        assert!(wf.last_error().is_some());

        wf.generate(&tiles(&["x"])).unwrap();
        assert_eq!(wf.last_error(), None);
    }

    #[test]
    fn test_select_artifact_requires_candidate() {
        let mut wf = generated(&["a", "b"]);
        let history = wf.history().clone();

        wf.select_artifact("b").unwrap();
        assert_eq!(wf.draft().selected.as_deref(), Some("b"));
        assert_eq!(*wf.history(), history);

        assert!(wf.select_artifact("zzz").is_err());
        assert_eq!(wf.draft().selected.as_deref(), Some("b"));
    }

    #[test]
    fn test_select_before_generation_fails() {
        let mut wf = GenerationWorkflow::<SketchKind>::new();
        assert!(wf.select_artifact("a").is_err());
        assert_eq!(wf.draft().selected, None);
    }

    #[test]
    fn test_undo_redo_resync_draft() {
        let mut wf = GenerationWorkflow::<SketchKind>::new();
        wf.set_field("prompt", "first").unwrap();
        wf.generate(&tiles(&["1a", "1b"])).unwrap();
        wf.set_field("prompt", "second").unwrap();
        wf.generate(&tiles(&["2a", "2b"])).unwrap();
        wf.select_artifact("2b").unwrap();
        wf.set_field("keywords", "pending edit").unwrap();

        assert!(wf.undo());
        assert_eq!(wf.draft().config, *wf.history().present().config());
        assert_eq!(wf.draft().config.prompt, "first");
        assert_eq!(wf.draft().selected.as_deref(), Some("1a"));

        assert!(wf.redo());
        assert_eq!(wf.draft().config.prompt, "second");
        assert_eq!(wf.draft().config.keywords, "");
        assert_eq!(wf.draft().selected.as_deref(), Some("2a"));
    }

    #[test]
    fn test_noop_undo_keeps_draft_edits() {
        let mut wf = GenerationWorkflow::<SketchKind>::new();
        wf.set_field("prompt", "unsaved").unwrap();
        assert!(!wf.undo());
        assert!(!wf.redo());
        assert_eq!(wf.draft().config.prompt, "unsaved");
    }

    #[test]
    fn test_identical_result_is_unchanged() {
        let mut wf = generated(&["a"]);
        let outcome = wf.generate(&tiles(&["a"])).unwrap();
        assert_eq!(outcome, GenerateOutcome::Unchanged);
        assert_eq!(wf.history().undo_depth(), 1);
    }

    #[test]
    fn test_second_begin_is_rejected_while_in_flight() {
        let mut wf = GenerationWorkflow::<SketchKind>::new();
        let pending = wf.begin_generate().unwrap();
        assert!(wf.is_generating());

        let err = wf.begin_generate().unwrap_err();
        assert!(matches!(err, ForgeError::GenerateInFlight));
        assert_eq!(wf.state(), WorkflowState::Generating(pending.ticket()));

        let outcome = wf
            .complete_generate(pending, Ok(Sketch { images: vec!["a".to_string()] }))
            .unwrap();
        assert_eq!(outcome, GenerateOutcome::Committed);
        assert_eq!(wf.history().undo_depth(), 1);
    }

    #[test]
    fn test_edits_and_undo_allowed_while_generating() {
        let mut wf = generated(&["a"]);
        let pending = wf.begin_generate().unwrap();

        wf.set_field("prompt", "changed mid-flight").unwrap();
        assert!(wf.undo());
        assert_eq!(wf.draft().config.prompt, "a lighthouse");
        assert!(wf.is_generating());

        wf.complete_generate(pending, Ok(Sketch { images: vec!["b".to_string()] }))
            .unwrap();
        assert_eq!(wf.history().undo_depth(), 1);
        assert!(!wf.history().can_redo());
    }

    #[test]
    fn test_stale_ticket_is_discarded_after_reset() {
        let mut wf = generated(&["a"]);
        let stale = wf.begin_generate().unwrap();
        wf.reset();
        assert!(!wf.is_generating());

        let fresh = wf.begin_generate().unwrap();
        assert!(fresh.ticket() > stale.ticket());

        let outcome = wf
            .complete_generate(stale, Ok(Sketch { images: vec!["late".to_string()] }))
            .unwrap();
        assert_eq!(outcome, GenerateOutcome::Discarded);
        assert!(wf.is_generating());
        assert!(wf.history().present().result().is_none());

        wf.complete_generate(fresh, Ok(Sketch { images: vec!["new".to_string()] }))
            .unwrap();
        assert_eq!(wf.draft().selected.as_deref(), Some("new"));
    }

    #[test]
    fn test_reset_returns_to_seed() {
        let mut wf = generated(&["a", "b"]);
        wf.set_field("prompt", "dirty").unwrap();
        wf.reset();
        assert_eq!(wf.draft().config, SketchKind::default_config());
        assert!(!wf.history().can_undo());
        assert!(!wf.history().can_redo());
        assert_eq!(wf.last_error(), None);
    }

    #[test]
    fn test_history_limit_applies() {
        let mut wf = GenerationWorkflow::<SketchKind>::with_seed(SketchKind::default_config(), Some(1));
        wf.generate(&tiles(&["a"])).unwrap();
        wf.generate(&tiles(&["b"])).unwrap();
        assert_eq!(wf.history().undo_depth(), 1);
        assert!(wf.undo());
        assert!(!wf.undo());
        assert_eq!(wf.draft().selected.as_deref(), Some("a"));
    }

    #[test]
    fn test_view_mixes_live_config_with_committed_output() {
        let mut wf = generated(&["a", "b"]);
        wf.set_field("prompt", "live edit").unwrap();
        wf.select_artifact("b").unwrap();

        let view = wf.view();
        assert_eq!(view.config.prompt, "live edit");
        assert_eq!(view.artifact_for_display, Some("b"));
        assert_eq!(view.generated.unwrap().images.len(), 2);
        assert!(view.can_undo);
        assert!(!view.can_redo);
        assert!(!view.is_generating);
    }

    #[test]
    fn test_export_requires_generated_result() {
        let wf = GenerationWorkflow::<SketchKind>::new();
        let exporter = crate::testing::RecordingExporter::default();
        let err = wf.export(&exporter, &RenderSettings::default()).unwrap_err();
        assert!(matches!(err, ForgeError::ExportError(_)));
        assert!(exporter.stems().is_empty());
    }

    #[test]
    fn test_export_uses_committed_name() {
        let mut wf = generated(&["a"]);
        wf.set_field("prompt", "not committed").unwrap();
        let history = wf.history().clone();
        let exporter = crate::testing::RecordingExporter::default();

        wf.export(&exporter, &RenderSettings::default()).unwrap();
        assert_eq!(exporter.stems(), vec!["a_lighthouse".to_string()]);
        assert_eq!(*wf.history(), history);
    }
}
