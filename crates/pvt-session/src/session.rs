//! Editing session
//!
//! Owns one user's [`VerbMatrix`] and drives the cell, row-label and add-verb
//! state machines on top of it. Every mutation restarts the debounced
//! save-all. Network failures never escape as errors: they are logged,
//! degraded to empty or sentinel values, and reported as notices.

use crate::config::SessionConfig;
use crate::debounce::{DebouncedAction, SaveScheduler};
use crate::error::SessionError;
use crate::keys::{CellKey, ExampleKey, InFlight};
use crate::notice::{Notice, NoticeBoard};
use crate::persist::SaveAll;
use crate::seed::seed_rows;
use crate::state::{AddVerbState, CellState, RowLabelState, UiState};
use futures::future::join_all;
use moka::future::Cache;
use parking_lot::Mutex;
use pvt_gateway::{
    AuthProvider, ExampleRequest, ExampleSentences, ExampleService, GatewayError, RowStore,
    TranslationRequest, TranslationService,
};
use pvt_matrix::{
    MatrixError, MigrationDecision, PrepositionSchema, SchemaMigration, StoredRow, VerbMatrix,
    VerbRow,
};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

/// External services a session talks to
#[derive(Clone)]
pub struct Collaborators {
    /// Row persistence
    pub store: Arc<dyn RowStore>,
    /// Meaning suggestions for new verbs
    pub translator: Arc<dyn TranslationService>,
    /// Example sentences
    pub examples: Arc<dyn ExampleService>,
}

impl Collaborators {
    /// Bundle collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn RowStore>,
        translator: Arc<dyn TranslationService>,
        examples: Arc<dyn ExampleService>,
    ) -> Self {
        Self {
            store,
            translator,
            examples,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Result of [`EditingSession::fetch_example`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleFetch {
    /// Sentences, or the "could not generate" placeholder
    Ready(ExampleSentences),
    /// Another fetch for the same key is running; no call was made
    InFlight,
}

/// Resets the add-verb control when phase 2 ends or is cancelled
struct SubmitReset<'a> {
    ui: &'a Mutex<UiState>,
}

impl Drop for SubmitReset<'_> {
    fn drop(&mut self) {
        self.ui.lock().add_verb = AddVerbState::Idle;
    }
}

/// One signed-in user's editing session
pub struct EditingSession {
    user_id: String,
    schema: Arc<PrepositionSchema>,
    matrix: Arc<Mutex<VerbMatrix>>,
    ui: Mutex<UiState>,
    loading_cells: InFlight<CellKey>,
    example_fetches: InFlight<ExampleKey>,
    example_cache: Cache<(ExampleKey, String), ExampleSentences>,
    notices: Arc<NoticeBoard>,
    saver: SaveScheduler,
    collaborators: Collaborators,
}

impl std::fmt::Debug for EditingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditingSession")
            .field("user_id", &self.user_id)
            .field("schema", &self.schema.version())
            .field("rows", &self.matrix.lock().len())
            .field("saver", &self.saver)
            .finish_non_exhaustive()
    }
}

impl EditingSession {
    /// Open a session for the signed-in user
    ///
    /// Rows are loaded and normalized to `schema`. A user without rows gets
    /// the built-in verb table when seeding is enabled. Load failures leave an
    /// empty matrix and an error notice.
    ///
    /// # Errors
    /// - `SessionError::Unauthenticated` when nobody is signed in
    /// - `SessionError::Gateway` when the auth provider itself fails
    pub async fn open(
        auth: &dyn AuthProvider,
        collaborators: Collaborators,
        schema: Arc<PrepositionSchema>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let session = auth.session().await?.ok_or(SessionError::Unauthenticated)?;
        let user_id = session.user_id;
        let notices = Arc::new(NoticeBoard::new(config.notice_capacity));

        let rows = match load_rows(&*collaborators.store, &user_id, &schema, &config).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Error loading verbs for {}: {}", user_id, e);
                notices.push(Notice::error("Failed to load phrasal verbs"));
                Vec::new()
            }
        };
        let matrix = Arc::new(Mutex::new(VerbMatrix::from_rows(Arc::clone(&schema), rows)));
        info!(
            "Opened session for {} with {} verbs",
            user_id,
            matrix.lock().len()
        );

        let save: Arc<dyn DebouncedAction> = Arc::new(SaveAll {
            user_id: user_id.clone(),
            matrix: Arc::clone(&matrix),
            store: Arc::clone(&collaborators.store),
            notices: Arc::clone(&notices),
        });
        let saver = SaveScheduler::new(config.save_debounce(), save, Handle::current());

        let example_cache = Cache::builder()
            .max_capacity(config.example_cache_capacity)
            .time_to_live(config.example_cache_ttl())
            .build();

        Ok(Self {
            user_id,
            schema,
            matrix,
            ui: Mutex::new(UiState::new()),
            loading_cells: InFlight::new(),
            example_fetches: InFlight::new(),
            example_cache,
            notices,
            saver,
            collaborators,
        })
    }

    /// Signed-in user
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Active schema
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Arc<PrepositionSchema> {
        &self.schema
    }

    /// Snapshot of all rows in display order
    #[must_use]
    pub fn rows(&self) -> Vec<VerbRow> {
        self.matrix.lock().rows().to_vec()
    }

    /// Snapshot of one row
    #[must_use]
    pub fn row(&self, verb: &str) -> Option<VerbRow> {
        self.matrix.lock().get(verb).cloned()
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.lock().len()
    }

    /// Whether the matrix is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.lock().is_empty()
    }

    /// Drain pending notices, oldest first
    pub fn take_notices(&self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Whether a debounced save is waiting
    #[must_use]
    pub fn is_save_pending(&self) -> bool {
        self.saver.is_pending()
    }

    // --- cells ---------------------------------------------------------

    /// Current state of a cell
    #[must_use]
    pub fn cell_state(&self, verb: &str, column: usize) -> CellState {
        let key = CellKey::new(verb, column);
        if self.loading_cells.contains(&key) {
            CellState::Loading
        } else if self.ui.lock().editing_cell.as_ref() == Some(&key) {
            CellState::Editing
        } else {
            CellState::Viewing
        }
    }

    /// Cell whose input is open
    #[must_use]
    pub fn editing_cell(&self) -> Option<CellKey> {
        self.ui.lock().editing_cell.clone()
    }

    /// Open a cell for editing, closing any other open cell
    ///
    /// # Errors
    /// - `SessionError::CellLoading` while the cell waits for a translation
    /// - `MatrixError::UnknownVerb` or `MatrixError::ColumnOutOfRange`
    pub fn begin_cell_edit(&self, verb: &str, column: usize) -> Result<(), SessionError> {
        let key = CellKey::new(verb, column);
        if self.loading_cells.contains(&key) {
            return Err(SessionError::CellLoading {
                verb: verb.to_string(),
                column,
            });
        }
        self.check_cell(verb, column)?;

        debug!("Editing cell ({}, {})", verb, column);
        self.ui.lock().editing_cell = Some(key);
        Ok(())
    }

    /// Commit the open cell (blur or Enter)
    ///
    /// On a validation failure a notice is pushed and the cell stays open.
    ///
    /// # Errors
    /// - `SessionError::NoActiveEdit` when no cell is open
    /// - `SessionError::Matrix` when the value is rejected
    pub fn commit_cell_edit(&self, value: &str) -> Result<(), SessionError> {
        let key = self
            .ui
            .lock()
            .editing_cell
            .clone()
            .ok_or(SessionError::NoActiveEdit)?;

        let result = self.matrix.lock().set_meaning(&key.verb, key.column, value);
        match result {
            Ok(()) => {
                let mut ui = self.ui.lock();
                if ui.editing_cell.as_ref() == Some(&key) {
                    ui.editing_cell = None;
                }
                drop(ui);
                debug!("Committed cell ({}, {})", key.verb, key.column);
                self.saver.touch();
                Ok(())
            }
            Err(e) => {
                if e.is_user_facing() {
                    self.notices.push(Notice::error(e.to_string()));
                } else {
                    error!("Cell commit for ({}, {}) failed: {}", key.verb, key.column, e);
                    self.ui.lock().editing_cell = None;
                }
                Err(e.into())
            }
        }
    }

    /// Close the open cell without committing (Escape)
    pub fn cancel_cell_edit(&self) -> bool {
        self.ui.lock().editing_cell.take().is_some()
    }

    // --- row labels ----------------------------------------------------

    /// Current state of a row label
    #[must_use]
    pub fn row_label_state(&self, verb: &str) -> RowLabelState {
        if self.ui.lock().renaming.as_deref() == Some(verb) {
            RowLabelState::Renaming
        } else {
            RowLabelState::Viewing
        }
    }

    /// Open the rename input for `verb`
    ///
    /// # Errors
    /// - `MatrixError::UnknownVerb` for a verb not in the matrix
    /// - `SessionError::CellLoading` while the row's translations are fetched
    pub fn begin_rename(&self, verb: &str) -> Result<(), SessionError> {
        if self.matrix.lock().get(verb).is_none() {
            return Err(MatrixError::UnknownVerb {
                verb: verb.to_string(),
            }
            .into());
        }
        if let Some(loading) = self
            .loading_cells
            .snapshot_where(|k| k.verb == verb)
            .into_iter()
            .next()
        {
            return Err(SessionError::CellLoading {
                verb: loading.verb,
                column: loading.column,
            });
        }

        debug!("Renaming '{}'", verb);
        self.ui.lock().renaming = Some(verb.to_string());
        Ok(())
    }

    /// Commit the rename input (Enter)
    ///
    /// The old key is deleted from the row store right away; the renamed row
    /// is written by the next save. On a validation failure a notice is
    /// pushed and the input stays open.
    ///
    /// # Errors
    /// - `SessionError::NoActiveEdit` when no rename is open
    /// - `SessionError::Matrix` when the new name is rejected
    pub async fn commit_rename(&self, new_name: &str) -> Result<(), SessionError> {
        let old = self
            .ui
            .lock()
            .renaming
            .clone()
            .ok_or(SessionError::NoActiveEdit)?;

        let renamed = self
            .matrix
            .lock()
            .rename_verb(&old, new_name)
            .map(|row| row.verb.clone());
        let renamed = match renamed {
            Ok(verb) => verb,
            Err(e) => {
                self.notices.push(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        self.ui.lock().forget_verb(&old);
        info!("Renamed '{}' to '{}'", old, renamed);

        if old != renamed {
            let _saving = self.saver.exclusive().await;
            if let Err(e) = self.collaborators.store.delete(&self.user_id, &old).await {
                warn!("Failed to remove old row '{}': {}", old, e);
                self.notices.push(Notice::error("Failed to save changes"));
            }
        }
        self.notices.push(Notice::info("Updated", "Verb name changed"));
        self.saver.touch();
        Ok(())
    }

    /// Close the rename input without committing (Escape)
    pub fn cancel_rename(&self) -> bool {
        self.ui.lock().renaming.take().is_some()
    }

    // --- add / delete --------------------------------------------------

    /// State of the add-verb control
    #[must_use]
    pub fn add_verb_state(&self) -> AddVerbState {
        self.ui.lock().add_verb.clone()
    }

    /// Add a verb and fill it with suggested translations
    ///
    /// Phase 1 inserts a blank row and marks all its cells loading. Phase 2
    /// asks the translator for every column concurrently; failed columns stay
    /// empty and cells the user edited meanwhile are kept. Returns the number
    /// of translations filled in.
    ///
    /// # Errors
    /// - `SessionError::Busy` while another add is running
    /// - `SessionError::Matrix` for an invalid or duplicate name
    pub async fn add_verb(&self, name: &str) -> Result<usize, SessionError> {
        let verb = {
            let mut ui = self.ui.lock();
            if let AddVerbState::Submitting { verb } = &ui.add_verb {
                return Err(SessionError::Busy { verb: verb.clone() });
            }
            let added = self.matrix.lock().add_verb(name);
            match added {
                Ok(row) => {
                    ui.add_verb = AddVerbState::Submitting {
                        verb: row.verb.clone(),
                    };
                    row.verb
                }
                Err(e) => {
                    drop(ui);
                    self.notices.push(Notice::error(e.to_string()));
                    return Err(e.into());
                }
            }
        };
        let _reset = SubmitReset { ui: &self.ui };
        self.saver.touch();

        let guards: Vec<_> = (0..self.schema.len())
            .map(|column| self.loading_cells.begin(CellKey::new(verb.as_str(), column)))
            .collect();
        info!("Added '{}', fetching {} translations", verb, guards.len());

        let translator = &self.collaborators.translator;
        let verb_name = verb.as_str();
        let fetches = self
            .schema
            .labels()
            .iter()
            .zip(guards)
            .map(|(label, guard)| async move {
                let result = translator
                    .translate(TranslationRequest::new(verb_name, label))
                    .await;
                drop(guard);
                match result {
                    Ok(text) => text.trim().to_string(),
                    Err(e) => {
                        warn!("Error translating '{}' + '{}': {}", verb_name, label, e);
                        String::new()
                    }
                }
            });
        let fetched = join_all(fetches).await;

        let filled = self.matrix.lock().fill_empty_meanings(&verb, &fetched);
        let Some(filled) = filled else {
            debug!("'{}' was removed before its translations arrived", verb);
            return Ok(0);
        };

        self.notices
            .push(Notice::info("Success", "Verb added with translations"));
        self.saver.touch();
        Ok(filled)
    }

    /// Delete a verb; unknown verbs are ignored
    ///
    /// Returns whether a row was removed.
    pub async fn delete_verb(&self, verb: &str) -> bool {
        let removed = self.matrix.lock().delete_verb(verb);
        if removed.is_none() {
            return false;
        }
        self.ui.lock().forget_verb(verb);

        // A save that started before the removal still upserts its old
        // snapshot; the delete has to land after it.
        let saving = self.saver.exclusive().await;
        if let Err(e) = self.collaborators.store.delete(&self.user_id, verb).await {
            warn!("Error deleting verb '{}': {}", verb, e);
            self.notices.push(Notice::error("Failed to delete verb"));
        }
        drop(saving);
        info!("Deleted '{}'", verb);
        self.notices
            .push(Notice::info("Deleted", format!("{verb} has been removed")));
        self.saver.touch();
        true
    }

    // --- examples ------------------------------------------------------

    /// Example sentences for one cell
    ///
    /// Successful results are cached per cell and meaning, so editing the
    /// cell makes the next call ask again. A failed fetch yields the
    /// placeholder and is not cached.
    ///
    /// # Errors
    /// - `MatrixError::UnknownVerb` or `MatrixError::ColumnOutOfRange`
    pub async fn fetch_example(
        &self,
        verb: &str,
        column: usize,
    ) -> Result<ExampleFetch, SessionError> {
        let meaning = self.check_cell(verb, column)?;
        let preposition = self
            .schema
            .label_at(column)
            .map(str::to_string)
            .ok_or(MatrixError::ColumnOutOfRange {
                index: column,
                len: self.schema.len(),
            })?;
        let key = ExampleKey::new(verb, preposition.as_str());
        let cache_key = (key.clone(), meaning.clone());

        if let Some(cached) = self.example_cache.get(&cache_key).await {
            debug!("Example cache hit for ({}, {})", verb, preposition);
            return Ok(ExampleFetch::Ready(cached));
        }
        let Some(_guard) = self.example_fetches.begin(key) else {
            return Ok(ExampleFetch::InFlight);
        };

        let request = ExampleRequest::new(verb, &preposition, meaning);
        let sentences = match self.collaborators.examples.example(request).await {
            Ok(raw) => ExampleSentences::parse(&raw),
            Err(e) => {
                warn!("Error generating example for '{}' + '{}': {}", verb, preposition, e);
                None
            }
        };

        Ok(ExampleFetch::Ready(match sentences {
            Some(sentences) => {
                self.example_cache.insert(cache_key, sentences.clone()).await;
                sentences
            }
            None => ExampleSentences::unavailable(),
        }))
    }

    // --- persistence ---------------------------------------------------

    /// Save every row now, cancelling the pending save
    pub async fn flush(&self) {
        self.saver.flush().await;
    }

    /// Drop the pending save and stop scheduling new ones
    pub fn close(&self) {
        self.saver.close();
        info!("Closed session for {}", self.user_id);
    }

    /// Meaning of an existing cell
    fn check_cell(&self, verb: &str, column: usize) -> Result<String, MatrixError> {
        let matrix = self.matrix.lock();
        let row = matrix.get(verb).ok_or_else(|| MatrixError::UnknownVerb {
            verb: verb.to_string(),
        })?;
        row.meaning(column)
            .map(str::to_string)
            .ok_or(MatrixError::ColumnOutOfRange {
                index: column,
                len: self.schema.len(),
            })
    }
}

/// Load, upgrade and if needed seed a user's rows
async fn load_rows(
    store: &dyn RowStore,
    user_id: &str,
    schema: &PrepositionSchema,
    config: &SessionConfig,
) -> Result<Vec<VerbRow>, GatewayError> {
    let stored = store.select(user_id).await?;

    if stored.is_empty() && config.seed_new_users {
        if schema.labels() != PrepositionSchema::current().labels() {
            warn!("Not seeding {}: schema {} has a custom layout", user_id, schema.version());
            return Ok(Vec::new());
        }
        let seed = seed_rows(schema);
        let rows: Vec<StoredRow> = seed
            .iter()
            .map(|row| StoredRow::from_row(user_id, row, schema.version()))
            .collect();
        store.insert(&rows).await?;
        info!("Seeded {} verbs for {}", seed.len(), user_id);
        return Ok(seed);
    }

    let migration = SchemaMigration::up_with_and_forward();
    let upgrade = migration.to() == schema.version();
    Ok(stored
        .into_iter()
        .map(|row| {
            let meanings = match migration.plan(&row) {
                MigrationDecision::Migrate(meanings) if upgrade => {
                    debug!("Upgrading '{}' from {} layout", row.verb, migration.from());
                    meanings
                }
                _ => row.meanings,
            };
            VerbRow {
                verb: row.verb,
                meanings,
            }
        })
        .collect())
}
