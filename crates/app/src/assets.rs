//! Sprite textures loaded from disk and creature icons uploaded from fetched pixels.

use std::collections::HashMap;

use app::game_layout::SpriteSizes;
use game_core::{CreatureId, Session, Size};
use macroquad::prelude::{FilterMode, Texture2D, load_texture};
use tracing::{debug, warn};

pub const AVATAR_SPRITE: &str = "ashe.png";
pub const ITEM_SPRITE: &str = "tree-green.png";
pub const CAPSULE_SPRITE: &str = "pokeball.png";

/// Decorations and the avatar. A missing file leaves its slot empty and the
/// renderer draws a placeholder block instead.
pub struct SpriteSet {
    pub avatar: Option<Texture2D>,
    pub item: Option<Texture2D>,
    pub capsule: Option<Texture2D>,
}

impl SpriteSet {
    pub async fn load(dir: &str) -> Self {
        Self {
            avatar: load_sprite(dir, AVATAR_SPRITE).await,
            item: load_sprite(dir, ITEM_SPRITE).await,
            capsule: load_sprite(dir, CAPSULE_SPRITE).await,
        }
    }

    pub fn sizes(&self) -> SpriteSizes {
        SpriteSizes {
            avatar: self.avatar.as_ref().map(texture_size),
            item: self.item.as_ref().map(texture_size),
            capsule: self.capsule.as_ref().map(texture_size),
        }
    }
}

async fn load_sprite(dir: &str, file: &str) -> Option<Texture2D> {
    let path = format!("{}/{file}", dir.trim_end_matches('/'));
    match load_texture(&path).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Nearest);
            debug!(%path, width = texture.width(), height = texture.height(), "sprite loaded");
            Some(texture)
        }
        Err(err) => {
            warn!(%path, error = %err, "sprite missing, drawing placeholder");
            None
        }
    }
}

fn texture_size(texture: &Texture2D) -> Size {
    Size::new(texture.width(), texture.height())
}

/// GPU copies of every creature icon in the session, uploaded once at startup.
pub struct IconCache {
    textures: HashMap<CreatureId, Texture2D>,
}

impl IconCache {
    pub fn from_session(session: &Session) -> Self {
        let textures = session
            .records()
            .map(|record| {
                let icon = &record.icon;
                let texture =
                    Texture2D::from_rgba8(icon.width as u16, icon.height as u16, &icon.rgba);
                (record.id, texture)
            })
            .collect();
        Self { textures }
    }

    pub fn get(&self, id: CreatureId) -> Option<&Texture2D> {
        self.textures.get(&id)
    }
}
