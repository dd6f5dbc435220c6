use std::collections::VecDeque;

use crate::config::SessionConfig;
use crate::types::{CreatureId, Pos, Rect, Size};

/// The player's sprite: walks toward a target and carries the most recent captures.
#[derive(Clone, Debug)]
pub struct Avatar {
    pos: Pos,
    size: Size,
    target: Pos,
    speed: f32,
    bounds: Size,
    status_bar_top: f32,
    capacity: usize,
    captured: VecDeque<CreatureId>,
}

impl Avatar {
    pub fn new(pos: Pos, config: &SessionConfig) -> Self {
        Self {
            pos,
            size: config.avatar_size,
            target: pos,
            speed: config.avatar_speed,
            bounds: config.field,
            status_bar_top: config.status_bar_top(),
            capacity: config.max_captured,
            captured: VecDeque::with_capacity(config.max_captured),
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn target(&self) -> Pos {
        self.target
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }

    pub fn at_target(&self) -> bool {
        self.pos == self.target
    }

    /// Aim the avatar's top-left corner at `target`, pulled back inside the
    /// field so the sprite never needs to enter the status bar.
    pub fn set_target(&mut self, target: Pos) {
        let max_x = (self.bounds.width - self.size.width).max(0.0);
        let max_y = (self.status_bar_top - self.size.height).max(0.0);
        self.target = Pos::new(target.x.clamp(0.0, max_x), target.y.clamp(0.0, max_y));
    }

    /// Advance one frame toward the target along the straight line.
    pub fn move_step(&mut self) {
        let dx = self.target.x - self.pos.x;
        let dy = self.target.y - self.pos.y;
        let distance = dx.hypot(dy);
        if distance == 0.0 {
            return;
        }

        let new_x = self.pos.x + dx / distance * self.speed;
        let mut new_y = self.pos.y + dy / distance * self.speed;
        if new_y + self.size.height > self.status_bar_top {
            new_y = self.status_bar_top - self.size.height;
        }
        self.pos = Pos::new(new_x, new_y);

        // Within one step on both axes: land exactly instead of oscillating.
        if (self.pos.x - self.target.x).abs() < self.speed
            && (self.pos.y - self.target.y).abs() < self.speed
        {
            self.pos = self.target;
        }
    }

    /// Oldest first.
    pub fn captured(&self) -> impl ExactSizeIterator<Item = CreatureId> + '_ {
        self.captured.iter().copied()
    }

    /// Record a capture, returning the oldest id if the queue was already full.
    pub fn push_capture(&mut self, id: CreatureId) -> Option<CreatureId> {
        let evicted =
            if self.captured.len() >= self.capacity { self.captured.pop_front() } else { None };
        self.captured.push_back(id);
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avatar_at(x: f32, y: f32) -> Avatar {
        Avatar::new(Pos::new(x, y), &SessionConfig::default())
    }

    fn run_until_arrived(avatar: &mut Avatar, max_steps: usize) -> usize {
        for step in 0..max_steps {
            if avatar.at_target() {
                return step;
            }
            avatar.move_step();
        }
        panic!("avatar did not arrive within {max_steps} steps");
    }

    #[test]
    fn stationary_at_target_does_not_move() {
        let mut avatar = avatar_at(10.0, 10.0);
        avatar.move_step();
        assert_eq!(avatar.pos(), Pos::new(10.0, 10.0));
    }

    #[test]
    fn moves_speed_units_along_the_line() {
        let mut avatar = avatar_at(0.0, 0.0);
        avatar.set_target(Pos::new(30.0, 40.0));
        avatar.move_step();
        assert!((avatar.pos().x - 3.0).abs() < 1e-4);
        assert!((avatar.pos().y - 4.0).abs() < 1e-4);
    }

    #[test]
    fn snaps_onto_target_when_close() {
        let mut avatar = avatar_at(0.0, 0.0);
        avatar.set_target(Pos::new(3.0, 2.0));
        avatar.move_step();
        assert_eq!(avatar.pos(), Pos::new(3.0, 2.0));
    }

    #[test]
    fn arrives_exactly_in_bounded_steps() {
        let mut avatar = avatar_at(0.0, 0.0);
        avatar.set_target(Pos::new(600.0, 500.0));
        let distance = 600.0_f32.hypot(500.0);
        let steps = run_until_arrived(&mut avatar, 1_000);
        assert!(steps <= (distance / 5.0).ceil() as usize + 1);
        assert_eq!(avatar.pos(), Pos::new(600.0, 500.0));
    }

    #[test]
    fn target_inside_status_bar_is_pulled_up() {
        let mut avatar = avatar_at(100.0, 100.0);
        avatar.set_target(Pos::new(100.0, 880.0));
        assert_eq!(avatar.target(), Pos::new(100.0, 800.0 - 64.0));

        run_until_arrived(&mut avatar, 1_000);
        assert!(avatar.rect().bottom() <= 800.0);
    }

    #[test]
    fn target_outside_field_is_clamped() {
        let mut avatar = avatar_at(0.0, 0.0);
        avatar.set_target(Pos::new(-50.0, -3.0));
        assert_eq!(avatar.target(), Pos::new(0.0, 0.0));
        avatar.set_target(Pos::new(5_000.0, 10.0));
        assert_eq!(avatar.target(), Pos::new(1100.0 - 48.0, 10.0));
    }

    #[test]
    fn step_past_status_bar_is_clamped_onto_its_edge() {
        let mut avatar = avatar_at(0.0, 733.0);
        avatar.set_target(Pos::new(0.0, 800.0));
        assert_eq!(avatar.target(), Pos::new(0.0, 736.0));

        avatar.move_step();
        assert_eq!(avatar.pos(), Pos::new(0.0, 736.0));
        assert_eq!(avatar.rect().bottom(), 800.0);
    }

    #[test]
    fn captured_queue_evicts_oldest() {
        let mut avatar = avatar_at(0.0, 0.0);
        let ids: Vec<CreatureId> = (1..=7).map(CreatureId).collect();
        let mut evictions = Vec::new();
        for id in &ids {
            evictions.push(avatar.push_capture(*id));
        }
        assert_eq!(evictions[..6], [None; 6]);
        assert_eq!(evictions[6], Some(CreatureId(1)));
        assert_eq!(avatar.captured().collect::<Vec<_>>(), ids[1..]);
        assert_eq!(avatar.captured().len(), 6);
    }
}
