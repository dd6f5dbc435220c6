//! Screen placement for the status bar and sprite-driven session sizing.

use game_core::{CreatureId, Pos, Session, SessionConfig, Size};

pub const STATUS_BAR_BORDER: f32 = 5.0;
pub const STATUS_ICON_START_X: f32 = 10.0;
pub const STATUS_ICON_SPACING: f32 = 10.0;

/// One captured creature's icon position inside the status bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusSlot {
    pub creature: CreatureId,
    pub pos: Pos,
    pub size: Size,
}

/// Left-aligned icons, oldest capture first, each centered vertically in the bar.
pub fn status_bar_slots(session: &Session) -> Vec<StatusSlot> {
    let config = session.config();
    let bar_top = config.status_bar_top();
    let mut x = STATUS_ICON_START_X;

    session
        .captured_records()
        .map(|record| {
            let size = record.icon.size();
            let y = bar_top + ((config.status_bar_height - size.height) / 2.0).floor();
            let slot = StatusSlot { creature: record.id, pos: Pos::new(x, y), size };
            x += size.width + STATUS_ICON_SPACING;
            slot
        })
        .collect()
}

/// Texture dimensions of the loaded sprites; `None` keeps the configured default.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpriteSizes {
    pub avatar: Option<Size>,
    pub item: Option<Size>,
    pub capsule: Option<Size>,
}

pub fn config_with_sprite_sizes(base: SessionConfig, sizes: SpriteSizes) -> SessionConfig {
    SessionConfig {
        avatar_size: sizes.avatar.unwrap_or(base.avatar_size),
        item_size: sizes.item.unwrap_or(base.item_size),
        capsule_size: sizes.capsule.unwrap_or(base.capsule_size),
        ..base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::fixtures::FixtureSource;

    #[test]
    fn empty_queue_has_no_slots() {
        let session = Session::with_layout(SessionConfig::default(), []);
        assert!(status_bar_slots(&session).is_empty());
    }

    #[test]
    fn sprite_sizes_override_only_known_textures() {
        let base = SessionConfig::default();
        let config = config_with_sprite_sizes(
            base,
            SpriteSizes { avatar: Some(Size::new(30.0, 40.0)), ..SpriteSizes::default() },
        );
        assert_eq!(config.avatar_size, Size::new(30.0, 40.0));
        assert_eq!(config.item_size, base.item_size);
        assert_eq!(config.capsule_size, base.capsule_size);
        assert_eq!(config.field, base.field);
    }

    #[test]
    fn captured_icons_are_spaced_left_to_right() {
        let config = SessionConfig {
            avatar_size: Size::new(10.0, 10.0),
            item_size: Size::new(10.0, 10.0),
            capsule_size: Size::new(10.0, 10.0),
            ..SessionConfig::default()
        };
        let layout = [1_u16, 2].map(|id| {
            let record = FixtureSource::record_for(CreatureId(id));
            (Pos::new(f32::from(id) * 200.0, 300.0), Some(record))
        });
        let mut session = Session::with_layout(config, layout);
        let placements: Vec<Pos> = session
            .items()
            .map(|item| item.capsule_placement(config.capsule_size, config.field.width))
            .collect();
        for placement in placements {
            session.set_target(placement);
            for _ in 0..400 {
                if session.update().captured.is_some() {
                    break;
                }
            }
        }

        let slots = status_bar_slots(&session);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].creature, CreatureId(1));
        assert_eq!(slots[0].pos, Pos::new(10.0, 810.0));
        assert_eq!(slots[1].pos, Pos::new(100.0, 810.0));
    }
}
