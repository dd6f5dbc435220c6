//! One play session: the field, the avatar, and the reveal/capture state machine.
//! Each `update` moves the avatar, reveals capsules near it, and captures at most
//! one revealed capsule. Announcing a capture is left to the caller.

use std::collections::BTreeSet;

use serde::Serialize;
use slotmap::SlotMap;
use tracing::{debug, info};

use crate::avatar::Avatar;
use crate::config::SessionConfig;
use crate::creature::{CreatureError, CreatureRecord, CreatureSource};
use crate::field::{Capsule, CapsuleState, FieldItem, insert_item, populate};
use crate::rng::seeded;
use crate::types::{CreatureId, FieldItemId, Pos, Rect};

/// A capsule that has been spotted and is waiting to be picked up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealedPlacement {
    pub item: FieldItemId,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureEvent {
    pub item: FieldItemId,
    pub creature: CreatureId,
    pub name: String,
    /// Oldest capture pushed out of the avatar's queue, if it was full.
    pub evicted: Option<CreatureId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub revealed: Vec<FieldItemId>,
    pub captured: Option<CaptureEvent>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CapsuleSummary {
    pub creature: CreatureId,
    pub name: String,
    pub state: CapsuleState,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionReport {
    pub frame: u64,
    pub avatar: Pos,
    pub captured: Vec<CreatureId>,
    pub revealed_placements: usize,
    pub capsules: Vec<CapsuleSummary>,
}

pub struct Session {
    config: SessionConfig,
    items: SlotMap<FieldItemId, FieldItem>,
    avatar: Avatar,
    revealed: Vec<RevealedPlacement>,
    used_ids: BTreeSet<CreatureId>,
    frame: u64,
}

impl Session {
    /// Build a randomly populated field. Blocks for as long as `source` takes to
    /// answer every capsule's fetch.
    pub fn new<S: CreatureSource + ?Sized>(
        config: SessionConfig,
        seed: u64,
        source: &mut S,
    ) -> Result<Self, CreatureError> {
        let mut rng = seeded(seed);
        let mut used_ids = BTreeSet::new();
        let items = populate(&config, &mut rng, &mut used_ids, source)?;
        info!(seed, items = items.len(), creatures = used_ids.len(), "session ready");

        Ok(Self {
            avatar: Avatar::new(Pos::default(), &config),
            config,
            items,
            revealed: Vec::new(),
            used_ids,
            frame: 0,
        })
    }

    /// Build a session from a fixed layout of `(position, hidden creature)` pairs.
    pub fn with_layout(
        config: SessionConfig,
        layout: impl IntoIterator<Item = (Pos, Option<CreatureRecord>)>,
    ) -> Self {
        let mut items = SlotMap::with_key();
        let mut used_ids = BTreeSet::new();
        for (pos, record) in layout {
            if let Some(record) = &record {
                used_ids.insert(record.id);
            }
            insert_item(&mut items, pos, config.item_size, record.map(Capsule::new));
        }

        Self {
            avatar: Avatar::new(Pos::default(), &config),
            config,
            items,
            revealed: Vec::new(),
            used_ids,
            frame: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn items(&self) -> impl Iterator<Item = &FieldItem> {
        self.items.values()
    }

    pub fn item(&self, id: FieldItemId) -> Option<&FieldItem> {
        self.items.get(id)
    }

    pub fn revealed(&self) -> &[RevealedPlacement] {
        &self.revealed
    }

    pub fn used_ids(&self) -> &BTreeSet<CreatureId> {
        &self.used_ids
    }

    /// Every creature hidden on the field, captured or not.
    pub fn records(&self) -> impl Iterator<Item = &CreatureRecord> {
        self.items.values().filter_map(|item| item.capsule.as_ref().map(|c| &c.record))
    }

    pub fn record(&self, id: CreatureId) -> Option<&CreatureRecord> {
        self.records().find(|record| record.id == id)
    }

    /// Records in the avatar's queue, oldest first.
    pub fn captured_records(&self) -> impl Iterator<Item = &CreatureRecord> {
        self.avatar.captured().filter_map(|id| self.record(id))
    }

    pub fn capsule_rect(&self, placement: &RevealedPlacement) -> Rect {
        Rect::at(placement.pos, self.config.capsule_size)
    }

    pub fn set_target(&mut self, target: Pos) {
        self.avatar.set_target(target);
    }

    /// Advance one frame.
    pub fn update(&mut self) -> UpdateReport {
        self.frame += 1;
        self.avatar.move_step();
        let revealed = self.reveal_nearby();
        let captured = self.capture_overlapping();
        UpdateReport { revealed, captured }
    }

    fn reveal_nearby(&mut self) -> Vec<FieldItemId> {
        let search = self.avatar.rect().inflate(self.config.reveal_margin);
        let mut revealed = Vec::new();

        for item in self.items.values_mut() {
            if !search.intersects(&item.rect()) {
                continue;
            }
            let pos = item.capsule_placement(self.config.capsule_size, self.config.field.width);
            let Some(capsule) = item.capsule.as_mut() else {
                continue;
            };
            if capsule.reveal() {
                debug!(creature = %capsule.record.id, ?pos, "capsule revealed");
                self.revealed.push(RevealedPlacement { item: item.id, pos });
                revealed.push(item.id);
            }
        }

        revealed
    }

    fn capture_overlapping(&mut self) -> Option<CaptureEvent> {
        let avatar_rect = self.avatar.rect();
        let index = self
            .revealed
            .iter()
            .position(|placement| avatar_rect.intersects(&self.capsule_rect(placement)))?;
        let placement = self.revealed.remove(index);

        let capsule = self.items.get_mut(placement.item)?.capsule.as_mut()?;
        if !capsule.capture() {
            return None;
        }
        let creature = capsule.record.id;
        let name = capsule.record.name.clone();
        let evicted = self.avatar.push_capture(creature);
        info!(%creature, %name, frame = self.frame, "creature captured");

        Some(CaptureEvent { item: placement.item, creature, name, evicted })
    }

    /// Structural checks shared by the fuzz harnesses.
    pub fn check_invariants(&self) -> Result<(), String> {
        let frame = self.frame;
        if self.avatar.rect().bottom() > self.config.status_bar_top() {
            return Err(format!("avatar entered the status bar at frame {frame}"));
        }

        let captured: Vec<CreatureId> = self.avatar.captured().collect();
        if captured.len() > self.config.max_captured {
            return Err(format!("capture queue holds {} at frame {frame}", captured.len()));
        }
        let distinct: BTreeSet<CreatureId> = captured.iter().copied().collect();
        if distinct.len() != captured.len() {
            return Err(format!("a creature was captured twice by frame {frame}"));
        }

        for item in self.items.values() {
            let Some(capsule) = &item.capsule else {
                continue;
            };
            let placements =
                self.revealed.iter().filter(|placement| placement.item == item.id).count();
            let expected = usize::from(capsule.state() == CapsuleState::Revealed);
            if placements != expected {
                return Err(format!(
                    "creature {} is {:?} with {placements} placements at frame {frame}",
                    capsule.record.id,
                    capsule.state()
                ));
            }
        }

        Ok(())
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            frame: self.frame,
            avatar: self.avatar.pos(),
            captured: self.avatar.captured().collect(),
            revealed_placements: self.revealed.len(),
            capsules: self
                .items
                .values()
                .filter_map(|item| item.capsule.as_ref())
                .map(|capsule| CapsuleSummary {
                    creature: capsule.record.id,
                    name: capsule.record.name.clone(),
                    state: capsule.state(),
                })
                .collect(),
        }
    }
}
