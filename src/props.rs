//! Room props: upgrade statues in shrines and markers for the boss and shop rooms.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::dungeon_gen::rooms::{RoomSummary, RoomType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropKind {
    UpgradeStatue,
    BossMarker,
    ShopMarker,
}

impl PropKind {
    /// Prop that belongs in a room of the given role, if any
    pub fn for_room(room_type: RoomType) -> Option<Self> {
        match room_type {
            RoomType::Shrine => Some(PropKind::UpgradeStatue),
            RoomType::Boss => Some(PropKind::BossMarker),
            RoomType::Shop => Some(PropKind::ShopMarker),
            RoomType::Normal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prop {
    pub kind: PropKind,
    pub position: Vec3,
    /// Index into the generation's room list
    pub room_index: usize,
}

/// Which props to place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropSettings {
    pub upgrade_statues: bool,
    pub boss_marker: bool,
    pub shop_marker: bool,
}

impl Default for PropSettings {
    fn default() -> Self {
        Self {
            upgrade_statues: true,
            boss_marker: true,
            shop_marker: true,
        }
    }
}

impl PropSettings {
    pub fn allows(&self, kind: PropKind) -> bool {
        match kind {
            PropKind::UpgradeStatue => self.upgrade_statues,
            PropKind::BossMarker => self.boss_marker,
            PropKind::ShopMarker => self.shop_marker,
        }
    }
}

/// Props of one generation pass. A fresh container is created per pass.
#[derive(Debug, Clone, Default)]
pub struct PropContainer {
    props: Vec<Prop>,
}

impl PropContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, prop: Prop) {
        self.props.push(prop);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prop> {
        self.props.iter()
    }

    pub fn of_kind(&self, kind: PropKind) -> impl Iterator<Item = &Prop> + '_ {
        self.props.iter().filter(move |p| p.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

/// Place one prop at the resolved center of every special room
pub fn place_props(container: &mut PropContainer, rooms: &[RoomSummary], settings: PropSettings) -> usize {
    puffin::profile_function!();

    let before = container.len();
    for (room_index, room) in rooms.iter().enumerate() {
        let Some(kind) = PropKind::for_room(room.room_type) else {
            continue;
        };
        if !settings.allows(kind) {
            continue;
        }
        container.push(Prop {
            kind,
            position: room.center,
            room_index,
        });
    }
    container.len() - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon_gen::rooms::Rect;

    fn summary(room_type: RoomType, x: f32) -> RoomSummary {
        RoomSummary {
            rect: Rect::new(0, 0, 4, 4),
            room_type,
            center: Vec3::new(x, 1.15, 2.5),
        }
    }

    #[test]
    fn test_props_follow_room_roles() {
        let rooms = [
            summary(RoomType::Normal, 1.5),
            summary(RoomType::Boss, 10.5),
            summary(RoomType::Shrine, 20.5),
            summary(RoomType::Shop, 30.5),
        ];
        let mut props = PropContainer::new();
        assert_eq!(place_props(&mut props, &rooms, PropSettings::default()), 3);

        let statue = props.of_kind(PropKind::UpgradeStatue).next().unwrap();
        assert_eq!(statue.room_index, 2);
        assert_eq!(statue.position, Vec3::new(20.5, 1.15, 2.5));
        assert_eq!(props.of_kind(PropKind::BossMarker).count(), 1);
        assert_eq!(props.of_kind(PropKind::ShopMarker).count(), 1);
    }

    #[test]
    fn test_disabled_props_are_skipped() {
        let rooms = [summary(RoomType::Boss, 0.5), summary(RoomType::Shop, 5.5)];
        let mut props = PropContainer::new();
        let settings = PropSettings {
            boss_marker: false,
            ..PropSettings::default()
        };
        place_props(&mut props, &rooms, settings);
        assert_eq!(props.len(), 1);
        assert_eq!(props.iter().next().unwrap().kind, PropKind::ShopMarker);
    }

    #[test]
    fn test_no_rooms_no_props() {
        let mut props = PropContainer::new();
        assert_eq!(place_props(&mut props, &[], PropSettings::default()), 0);
        assert!(props.is_empty());
    }
}
