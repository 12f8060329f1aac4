//! Registry mapping participants to input providers.
//!
//! Provider instances are stored once per [`ProviderKind`] and shared; each
//! participant can be bound to a kind and falls back to the default kind
//! otherwise.
//!
//! ```text
//! ProviderRegistry
//! ├── providers: HashMap<ProviderKind, Arc<dyn InputProvider>>
//! ├── bindings: HashMap<PlayerId, ProviderKind>
//! ├── questions: Option<Arc<dyn QuestionProvider>>
//! └── default_kind: ProviderKind
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use trails_core::PlayerId;

use super::{InputProvider, ProviderKind, QuestionProvider, Result, RuntimeError};

pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn InputProvider>>,
    bindings: HashMap<PlayerId, ProviderKind>,
    questions: Option<Arc<dyn QuestionProvider>>,
    default_kind: ProviderKind,
}

impl ProviderRegistry {
    /// Empty registry falling back to [`ProviderKind::Bot`].
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            bindings: HashMap::new(),
            questions: None,
            default_kind: ProviderKind::Bot,
        }
    }

    /// Register a provider for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: ProviderKind, provider: impl InputProvider + 'static) {
        self.providers.insert(kind, Arc::new(provider));
    }

    pub fn register_arc(&mut self, kind: ProviderKind, provider: Arc<dyn InputProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn set_questions(&mut self, provider: Arc<dyn QuestionProvider>) {
        self.questions = Some(provider);
    }

    pub fn bind(&mut self, player: PlayerId, kind: ProviderKind) {
        self.bindings.insert(player, kind);
    }

    /// Reverts `player` to the default kind.
    pub fn unbind(&mut self, player: PlayerId) {
        self.bindings.remove(&player);
    }

    pub fn set_default(&mut self, kind: ProviderKind) {
        self.default_kind = kind;
    }

    pub fn has(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    pub fn kind_for(&self, player: PlayerId) -> ProviderKind {
        self.bindings
            .get(&player)
            .copied()
            .unwrap_or(self.default_kind)
    }

    /// Provider answering for `player`.
    pub fn get(&self, player: PlayerId) -> Result<Arc<dyn InputProvider>> {
        let kind = self.kind_for(player);
        self.providers
            .get(&kind)
            .cloned()
            .ok_or(RuntimeError::ProviderNotSet { kind })
    }

    pub fn questions(&self) -> Result<Arc<dyn QuestionProvider>> {
        self.questions
            .clone()
            .ok_or(RuntimeError::ProviderNotSet {
                kind: ProviderKind::Questions,
            })
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
