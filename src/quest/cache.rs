//! Workspace-keyed quest cache with explicit generations.
//!
//! Every write bumps the workspace's generation counter and publishes a
//! [`CacheEvent`], so presentation code can re-read on change instead of
//! relying on an implicit observer framework. Invalidation marks a
//! collection stale without discarding it: readers may still peek at it,
//! but read-through access refetches.

use crate::quest::domain::{Quest, QuestId, WorkspaceId};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::trace;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Kind of change applied to a cached collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheEventKind {
    /// A freshly loaded collection replaced the previous one.
    Loaded,
    /// An optimistic transition patched a quest.
    Patched,
    /// A transition of a synthetic quest was confirmed locally.
    Committed,
    /// A failed transition restored its snapshot.
    RolledBack,
    /// The collection was marked stale.
    Invalidated,
}

/// Change notification published on every cache write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEvent {
    /// Workspace whose collection changed.
    pub workspace: WorkspaceId,
    /// Generation after the change.
    pub generation: u64,
    /// What changed.
    pub kind: CacheEventKind,
}

/// Point-in-time copy of a cached collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSnapshot {
    /// Generation the snapshot was taken at.
    pub generation: u64,
    /// Quests in presentation order.
    pub quests: Vec<Quest>,
    /// When the collection was loaded.
    pub fetched_at: DateTime<Utc>,
    /// Whether the collection is placeholder data.
    pub synthetic: bool,
    /// Whether the collection has been invalidated.
    pub stale: bool,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    contents: Option<Contents>,
}

#[derive(Debug)]
struct Contents {
    quests: Vec<Quest>,
    fetched_at: DateTime<Utc>,
    synthetic: bool,
    stale: bool,
}

impl Slot {
    fn bump(&mut self) -> u64 {
        self.generation = self.generation.saturating_add(1);
        self.generation
    }
}

/// Shared in-memory quest cache.
///
/// Cloning yields another handle to the same cache.
#[derive(Debug, Clone)]
pub struct QuestCache {
    slots: Arc<RwLock<HashMap<WorkspaceId, Slot>>>,
    events: broadcast::Sender<CacheEvent>,
}

impl Default for QuestCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            events,
        }
    }

    /// Subscribes to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Returns the current generation for a workspace, `0` if never written.
    #[must_use]
    pub fn generation(&self, workspace: &WorkspaceId) -> u64 {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(workspace).map_or(0, |slot| slot.generation)
    }

    /// Returns a copy of the cached collection, stale or not.
    #[must_use]
    pub fn peek(&self, workspace: &WorkspaceId) -> Option<CacheSnapshot> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.get(workspace)?;
        let contents = slot.contents.as_ref()?;
        Some(CacheSnapshot {
            generation: slot.generation,
            quests: contents.quests.clone(),
            fetched_at: contents.fetched_at,
            synthetic: contents.synthetic,
            stale: contents.stale,
        })
    }

    /// Returns the collection when it is neither stale nor older than
    /// `window` at `now`.
    #[must_use]
    pub fn fresh(
        &self,
        workspace: &WorkspaceId,
        now: DateTime<Utc>,
        window: TimeDelta,
    ) -> Option<Vec<Quest>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let contents = slots.get(workspace)?.contents.as_ref()?;
        let age = now.signed_duration_since(contents.fetched_at);
        (!contents.stale && age < window).then(|| contents.quests.clone())
    }

    /// Returns a cached quest by identifier.
    #[must_use]
    pub fn find(&self, workspace: &WorkspaceId, quest_id: &QuestId) -> Option<Quest> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots
            .get(workspace)?
            .contents
            .as_ref()?
            .quests
            .iter()
            .find(|quest| quest.id() == quest_id)
            .cloned()
    }

    /// Replaces the collection of a workspace and returns the new generation.
    pub fn store(
        &self,
        workspace: &WorkspaceId,
        quests: Vec<Quest>,
        synthetic: bool,
        fetched_at: DateTime<Utc>,
    ) -> u64 {
        let generation = {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            let slot = slots.entry(workspace.clone()).or_default();
            slot.contents = Some(Contents {
                quests,
                fetched_at,
                synthetic,
                stale: false,
            });
            slot.bump()
        };
        self.publish(workspace, generation, CacheEventKind::Loaded);
        generation
    }

    /// Replaces one quest in place, keeping presentation order.
    ///
    /// Returns the new generation, or `None` when the quest is not cached.
    pub fn patch(&self, workspace: &WorkspaceId, quest: Quest) -> Option<u64> {
        let generation = {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            let slot = slots.get_mut(workspace)?;
            let contents = slot.contents.as_mut()?;
            let entry = contents
                .quests
                .iter_mut()
                .find(|cached| cached.id() == quest.id())?;
            *entry = quest;
            slot.bump()
        };
        self.publish(workspace, generation, CacheEventKind::Patched);
        Some(generation)
    }

    /// Records that a locally confirmed transition is final.
    pub fn commit(&self, workspace: &WorkspaceId) -> u64 {
        let generation = self.bump(workspace);
        self.publish(workspace, generation, CacheEventKind::Committed);
        generation
    }

    /// Restores a pre-transition snapshot and marks the collection stale.
    ///
    /// When the quest is no longer cached (the collection was replaced in
    /// the meantime) the contents are left alone and only the generation
    /// moves.
    pub fn restore(&self, workspace: &WorkspaceId, snapshot: Quest) -> u64 {
        let generation = {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            let slot = slots.entry(workspace.clone()).or_default();
            if let Some(contents) = slot.contents.as_mut()
                && let Some(entry) = contents
                    .quests
                    .iter_mut()
                    .find(|cached| cached.id() == snapshot.id())
            {
                *entry = snapshot;
                contents.stale = true;
            }
            slot.bump()
        };
        self.publish(workspace, generation, CacheEventKind::RolledBack);
        generation
    }

    /// Marks a workspace's collection stale.
    pub fn invalidate(&self, workspace: &WorkspaceId) -> u64 {
        let generation = {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            let slot = slots.entry(workspace.clone()).or_default();
            if let Some(contents) = slot.contents.as_mut() {
                contents.stale = true;
            }
            slot.bump()
        };
        self.publish(workspace, generation, CacheEventKind::Invalidated);
        generation
    }

    /// Marks every cached collection stale.
    pub fn invalidate_all(&self) {
        let workspaces: Vec<WorkspaceId> = {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            slots.keys().cloned().collect()
        };
        for workspace in &workspaces {
            self.invalidate(workspace);
        }
    }

    fn bump(&self, workspace: &WorkspaceId) -> u64 {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.entry(workspace.clone()).or_default().bump()
    }

    fn publish(&self, workspace: &WorkspaceId, generation: u64, kind: CacheEventKind) {
        let event = CacheEvent {
            workspace: workspace.clone(),
            generation,
            kind,
        };
        if self.events.send(event).is_err() {
            trace!(%workspace, generation, ?kind, "no cache subscribers");
        }
    }
}
