//! Creature records and the factory that draws unique species ids for a session.
//! Fetching is delegated to a [`CreatureSource`]; this module owns id selection only.

use std::collections::BTreeSet;
use std::fmt;

use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::constants::{CREATURE_ID_MAX, CREATURE_ID_MIN};
use crate::rng::roll_inclusive;
use crate::types::{CreatureId, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CreatureStats {
    pub hit_points: u32,
    pub attack: u32,
    pub defense: u32,
}

/// Decoded RGBA8 pixels for a creature icon.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Icon {
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let rgba = color.iter().copied().cycle().take((width * height * 4) as usize).collect();
        Self { width, height, rgba }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// Dimensions after scaling `width`x`height` to `target_height`, keeping aspect ratio.
    /// The width is truncated to whole pixels.
    pub fn scaled_dimensions(width: u32, height: u32, target_height: u32) -> (u32, u32) {
        if height == 0 {
            return (0, target_height);
        }
        let scale_factor = target_height as f32 / height as f32;
        ((width as f32 * scale_factor) as u32, target_height)
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatureRecord {
    pub id: CreatureId,
    pub name: String,
    pub stats: CreatureStats,
    pub icon: Icon,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("species service answered HTTP {status} for creature {id}")]
    Status { id: CreatureId, status: u16 },
    #[error("request for creature {id} failed: {reason}")]
    Transport { id: CreatureId, reason: String },
    #[error("malformed species record for creature {id}: {reason}")]
    Malformed { id: CreatureId, reason: String },
    #[error("icon for creature {id} could not be loaded: {reason}")]
    Icon { id: CreatureId, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreatureError {
    #[error("all {0} creature ids are already in use")]
    PoolExhausted(usize),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Capability to look up one creature by id. Implementations may block.
pub trait CreatureSource {
    fn fetch(&mut self, id: CreatureId) -> Result<CreatureRecord, FetchError>;
}

pub fn id_pool_size() -> usize {
    usize::from(CREATURE_ID_MAX - CREATURE_ID_MIN) + 1
}

/// Draw an unused id, fetch its record, and register the id in `used_ids`.
///
/// The id is only registered when the fetch succeeds, so a failed draw leaves
/// `used_ids` untouched.
pub fn create_creature<S: CreatureSource + ?Sized>(
    rng: &mut ChaCha8Rng,
    used_ids: &mut BTreeSet<CreatureId>,
    source: &mut S,
) -> Result<CreatureRecord, CreatureError> {
    let pool = id_pool_size();
    let in_use = used_ids.range(CreatureId(CREATURE_ID_MIN)..=CreatureId(CREATURE_ID_MAX)).count();
    if in_use >= pool {
        return Err(CreatureError::PoolExhausted(pool));
    }

    let id = loop {
        let candidate = CreatureId(
            roll_inclusive(rng, u32::from(CREATURE_ID_MIN), u32::from(CREATURE_ID_MAX)) as u16,
        );
        if !used_ids.contains(&candidate) {
            break candidate;
        }
    };

    debug!(%id, "fetching creature");
    let record = source.fetch(id)?;
    if record.id != id {
        return Err(FetchError::Malformed {
            id,
            reason: format!("service returned creature {}", record.id),
        }
        .into());
    }

    used_ids.insert(id);
    Ok(record)
}
