//! Field items and the capsules they may conceal.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use slotmap::SlotMap;
use tracing::debug;

use crate::config::SessionConfig;
use crate::creature::{CreatureError, CreatureRecord, CreatureSource, create_creature};
use crate::rng::roll_pixel;
use crate::types::{CreatureId, FieldItemId, Pos, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CapsuleState {
    Hidden,
    Revealed,
    Captured,
}

#[derive(Clone, Debug)]
pub struct Capsule {
    pub record: CreatureRecord,
    state: CapsuleState,
}

impl Capsule {
    pub fn new(record: CreatureRecord) -> Self {
        Self { record, state: CapsuleState::Hidden }
    }

    pub fn state(&self) -> CapsuleState {
        self.state
    }

    /// Still collectible, whether or not it has been spotted yet.
    pub fn is_active(&self) -> bool {
        self.state != CapsuleState::Captured
    }

    pub(crate) fn reveal(&mut self) -> bool {
        if self.state != CapsuleState::Hidden {
            return false;
        }
        self.state = CapsuleState::Revealed;
        true
    }

    pub(crate) fn capture(&mut self) -> bool {
        if self.state != CapsuleState::Revealed {
            return false;
        }
        self.state = CapsuleState::Captured;
        true
    }
}

#[derive(Clone, Debug)]
pub struct FieldItem {
    pub id: FieldItemId,
    pub pos: Pos,
    pub size: Size,
    pub capsule: Option<Capsule>,
}

impl FieldItem {
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }

    pub fn has_capsule(&self) -> bool {
        self.capsule.is_some()
    }

    pub fn creature_id(&self) -> Option<CreatureId> {
        self.capsule.as_ref().map(|capsule| capsule.record.id)
    }

    /// Where a revealed capsule sits: flush against the item's right edge, or
    /// mirrored to its left edge when it would leave the field.
    pub fn capsule_placement(&self, capsule_size: Size, field_width: f32) -> Pos {
        let rect = self.rect();
        if rect.right() + capsule_size.width <= field_width {
            Pos::new(rect.right(), rect.top())
        } else {
            Pos::new(rect.left() - capsule_size.width, rect.top())
        }
    }
}

pub(crate) fn insert_item(
    items: &mut SlotMap<FieldItemId, FieldItem>,
    pos: Pos,
    size: Size,
    capsule: Option<Capsule>,
) -> FieldItemId {
    let id = items.insert(FieldItem { id: FieldItemId::default(), pos, size, capsule });
    items[id].id = id;
    id
}

/// Scatter `config.item_count` items over the playable area. The first
/// `config.max_capsules` items created each hide a freshly fetched creature.
pub fn populate<S: CreatureSource + ?Sized>(
    config: &SessionConfig,
    rng: &mut ChaCha8Rng,
    used_ids: &mut BTreeSet<CreatureId>,
    source: &mut S,
) -> Result<SlotMap<FieldItemId, FieldItem>, CreatureError> {
    let mut items = SlotMap::with_key();
    let max_x = config.field.width - config.item_size.width;
    let max_y = config.status_bar_top() - config.item_size.height;

    for _ in 0..config.item_count {
        let capsule = if items.len() < config.max_capsules {
            Some(Capsule::new(create_creature(rng, used_ids, source)?))
        } else {
            None
        };
        let pos = Pos::new(roll_pixel(rng, max_x), roll_pixel(rng, max_y));
        let id = insert_item(&mut items, pos, config.item_size, capsule);
        debug!(?pos, creature = ?items[id].creature_id(), "placed field item");
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::FetchError;
    use crate::fixtures::FixtureSource;
    use crate::rng::seeded;

    fn item_at(x: f32, y: f32) -> FieldItem {
        FieldItem {
            id: FieldItemId::default(),
            pos: Pos::new(x, y),
            size: Size::new(60.0, 80.0),
            capsule: None,
        }
    }

    #[test]
    fn placement_prefers_right_side() {
        let item = item_at(100.0, 200.0);
        let pos = item.capsule_placement(Size::new(30.0, 30.0), 1100.0);
        assert_eq!(pos, Pos::new(160.0, 200.0));
    }

    #[test]
    fn placement_mirrors_left_near_right_edge() {
        let item = item_at(1020.0, 50.0);
        let pos = item.capsule_placement(Size::new(30.0, 30.0), 1100.0);
        assert_eq!(pos, Pos::new(990.0, 50.0));
    }

    #[test]
    fn placement_fits_exactly_at_right_edge() {
        let item = item_at(1010.0, 0.0);
        let pos = item.capsule_placement(Size::new(30.0, 30.0), 1100.0);
        assert_eq!(pos, Pos::new(1070.0, 0.0));
    }

    #[test]
    fn capsule_moves_forward_only() {
        let mut capsule = Capsule::new(FixtureSource::record_for(CreatureId(4)));
        assert!(!capsule.capture(), "hidden capsule cannot be captured");
        assert!(capsule.reveal());
        assert!(!capsule.reveal());
        assert!(capsule.is_active());
        assert!(capsule.capture());
        assert!(!capsule.capture());
        assert!(!capsule.is_active());
        assert_eq!(capsule.state(), CapsuleState::Captured);
    }

    #[test]
    fn populate_gives_capsules_to_first_six_items() {
        let config = SessionConfig::default();
        let mut rng = seeded(21);
        let mut used = BTreeSet::new();
        let mut source = FixtureSource::default();

        let items = populate(&config, &mut rng, &mut used, &mut source).expect("populate");
        assert_eq!(items.len(), 10);

        let flags: Vec<bool> = items.values().map(FieldItem::has_capsule).collect();
        assert_eq!(flags, [true, true, true, true, true, true, false, false, false, false]);
        assert_eq!(source.requested().len(), 6);
        assert_eq!(used.len(), 6);
    }

    #[test]
    fn populate_keeps_items_above_status_bar() {
        let config = SessionConfig::default();
        let mut source = FixtureSource::default();
        for seed in 0..20 {
            let mut rng = seeded(seed);
            let mut used = BTreeSet::new();
            let items = populate(&config, &mut rng, &mut used, &mut source).expect("populate");
            for item in items.values() {
                let rect = item.rect();
                assert!(rect.left() >= 0.0 && rect.right() <= config.field.width);
                assert!(rect.top() >= 0.0 && rect.bottom() <= config.status_bar_top());
            }
        }
    }

    #[test]
    fn populate_propagates_fetch_failure() {
        let config = SessionConfig::default();
        let mut rng = seeded(2);
        let mut used = BTreeSet::new();
        let mut source = FixtureSource::failing_all();

        let err = populate(&config, &mut rng, &mut used, &mut source).expect_err("must fail");
        assert!(matches!(err, CreatureError::Fetch(_)));
        assert_eq!(source.requested().len(), 1, "no further fetches after the first failure");
    }

    #[test]
    fn populate_stops_at_a_later_failed_fetch() {
        let config = SessionConfig::default();
        let mut clean = FixtureSource::default();
        populate(&config, &mut seeded(9), &mut BTreeSet::new(), &mut clean).expect("populate");
        let drawn = clean.requested().to_vec();
        let failing_id = drawn[2];

        let mut used = BTreeSet::new();
        let mut source = FixtureSource::failing_on([failing_id]);
        let err = populate(&config, &mut seeded(9), &mut used, &mut source).expect_err("must fail");

        assert!(matches!(
            err,
            CreatureError::Fetch(FetchError::Status { id, .. }) if id == failing_id
        ));
        assert_eq!(source.requested(), &drawn[..3]);
        assert_eq!(used, drawn[..2].iter().copied().collect::<BTreeSet<_>>());
    }

    #[test]
    fn populate_is_deterministic_per_seed() {
        let config = SessionConfig::default();
        let layout = |seed| {
            let mut rng = seeded(seed);
            let mut used = BTreeSet::new();
            let items = populate(&config, &mut rng, &mut used, &mut FixtureSource::default())
                .expect("populate");
            items.values().map(|item| (item.pos, item.creature_id())).collect::<Vec<_>>()
        };
        assert_eq!(layout(77), layout(77));
        assert_ne!(layout(77), layout(78));
    }
}
