//! The player's inventory.

use serde::{Deserialize, Serialize};

use crate::id::ObjectId;

/// What the player is carrying, in the order it was picked up.
///
/// The inventory mirrors `Location::Player` on the objects themselves; only
/// [`World::move_object`](crate::World::move_object) keeps the two in step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Held objects, oldest first.
    pub inventory: Vec<ObjectId>,
}

impl Player {
    /// Check if the player holds an object directly.
    pub fn has_item(&self, item: ObjectId) -> bool {
        self.inventory.contains(&item)
    }

    pub(crate) fn add_item(&mut self, item: ObjectId) {
        if !self.inventory.contains(&item) {
            self.inventory.push(item);
        }
    }

    pub(crate) fn remove_item(&mut self, item: ObjectId) -> bool {
        if let Some(pos) = self.inventory.iter().position(|&id| id == item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// Whether the player is empty-handed.
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut player = Player::default();
        player.add_item(ObjectId(1));
        player.add_item(ObjectId(1));
        assert_eq!(player.inventory, vec![ObjectId(1)]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut player = Player::default();
        player.add_item(ObjectId(1));
        player.add_item(ObjectId(2));
        assert!(player.remove_item(ObjectId(1)));
        assert!(!player.remove_item(ObjectId(1)));
        assert_eq!(player.inventory, vec![ObjectId(2)]);
        assert!(!player.is_empty());
    }
}
