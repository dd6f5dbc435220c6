//! Offline creature source for tests and headless runs.
//! Records are synthesized from the id, so no network is touched.

use std::collections::BTreeSet;

use crate::constants::ICON_HEIGHT;
use crate::creature::{CreatureRecord, CreatureSource, CreatureStats, FetchError, Icon};
use crate::types::CreatureId;

#[derive(Default)]
pub struct FixtureSource {
    failing: BTreeSet<CreatureId>,
    fail_all: bool,
    requested: Vec<CreatureId>,
}

impl FixtureSource {
    pub fn failing_all() -> Self {
        Self { fail_all: true, ..Self::default() }
    }

    pub fn failing_on(ids: impl IntoIterator<Item = CreatureId>) -> Self {
        Self { failing: ids.into_iter().collect(), ..Self::default() }
    }

    /// Ids requested so far, in order.
    pub fn requested(&self) -> &[CreatureId] {
        &self.requested
    }

    pub fn record_for(id: CreatureId) -> CreatureRecord {
        let seed = u32::from(id.0);
        let shade = (seed * 37 % 200) as u8 + 40;
        CreatureRecord {
            id,
            name: format!("specimen-{}", id.0),
            stats: CreatureStats {
                hit_points: 20 + seed % 90,
                attack: 10 + seed * 7 % 110,
                defense: 10 + seed * 13 % 120,
            },
            icon: Icon::solid(ICON_HEIGHT, ICON_HEIGHT, [shade, 255 - shade, 128, 255]),
        }
    }
}

impl CreatureSource for FixtureSource {
    fn fetch(&mut self, id: CreatureId) -> Result<CreatureRecord, FetchError> {
        self.requested.push(id);
        if self.fail_all || self.failing.contains(&id) {
            return Err(FetchError::Status { id, status: 404 });
        }
        Ok(Self::record_for(id))
    }
}
