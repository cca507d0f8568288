//! Connectivity rules.
//!
//! Each public function has the signature `fn(&World, &EventPayload) -> Vec<Event>`
//! so it can be registered directly as a `RuleFn`.

use masonry_engine::causal::event::{Event, EventPayload};
use masonry_engine::world::World;
use masonry_engine::world::position::BlockPos;

use crate::block;
use crate::notifier::WallNotifier;

/// Notify all six neighbors of `pos`, each told which of its faces saw the
/// change.
pub fn notify_neighbors(pos: BlockPos) -> Vec<Event> {
    pos.neighbors()
        .into_iter()
        .map(|(face, neighbor)| Event::notify(neighbor, Some(face.opposite())))
        .collect()
}

// ── Propagation ──────────────────────────────────────────────────────────

/// Every write that actually changes a cell notifies the cell's neighbors.
pub fn neighbor_updates(_world: &World, payload: &EventPayload) -> Vec<Event> {
    match payload {
        EventPayload::BlockSet { pos, old, new } if old != new => notify_neighbors(*pos),
        _ => Vec::new(),
    }
}

// ── Walls ────────────────────────────────────────────────────────────────

/// Wall resolution:
///   - A notified wall re-derives the face that changed.
///   - A wall just written re-derives all faces (placement, load, or its own
///     update; the last finds nothing to change).
///
/// Either way a changed wall yields one `BlockSet` for its own cell, whose
/// propagation reaches the neighbors in turn.
pub fn wall_connections(world: &World, payload: &EventPayload) -> Vec<Event> {
    let update = match payload {
        EventPayload::BlockNotify { pos, face } => {
            WallNotifier::load(world, *pos).and_then(|mut wall| wall.on_neighbor_changed(world, *face))
        }
        EventPayload::BlockSet { pos, new, .. } if block::is_wall(*new) => {
            WallNotifier::load(world, *pos).and_then(|mut wall| wall.refresh(world))
        }
        EventPayload::BlockSet { .. } => None,
    };
    update.into_iter().collect()
}
