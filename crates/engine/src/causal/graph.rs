use super::event::{Event, EventId, EventPayload};
use crate::world::block::BlockId;
use crate::world::position::BlockPos;
use slotmap::SlotMap;

/// A node in the causal DAG.
#[derive(Debug)]
pub struct EventNode {
    pub event: Event,
    pub parents: Vec<EventId>,
    pub children: Vec<EventId>,
    pub executed: bool,
    /// A write that found its cell already changed and was dropped.
    pub superseded: bool,
}

/// The causal graph: an append-only DAG of events.
///
/// Invariant: if A is a parent of B, then A's world-write is visible before
/// B executes. A notification always has the write that caused it as parent,
/// so a block resolving its connections sees the neighbor that changed.
pub struct CausalGraph {
    nodes: SlotMap<EventId, EventNode>,
}

impl CausalGraph {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub fn insert(&mut self, event: Event, parents: Vec<EventId>) -> EventId {
        let id = self.nodes.insert(EventNode {
            event,
            parents: parents.clone(),
            children: Vec::new(),
            executed: false,
            superseded: false,
        });

        for &parent_id in &parents {
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.children.push(id);
            }
        }

        id
    }

    pub fn insert_root(&mut self, event: Event) -> EventId {
        self.insert(event, Vec::new())
    }

    /// All events whose parents have all been executed but which have not
    /// been executed themselves.
    pub fn frontier(&self) -> Vec<EventId> {
        self.nodes
            .iter()
            .filter(|(_, node)| {
                !node.executed
                    && node
                        .parents
                        .iter()
                        .all(|p| self.nodes.get(*p).is_some_and(|n| n.executed))
            })
            .map(|(id, _)| id)
            .collect()
    }

    pub fn mark_executed(&mut self, id: EventId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.executed = true;
        }
    }

    /// Retire a write whose expected previous block no longer held. It
    /// leaves the frontier but never reached the world.
    pub fn mark_superseded(&mut self, id: EventId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.executed = true;
            node.superseded = true;
        }
    }

    pub fn get(&self, id: EventId) -> Option<&EventNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn executed_count(&self) -> usize {
        self.nodes.values().filter(|n| n.executed).count()
    }

    pub fn pending_count(&self) -> usize {
        self.len() - self.executed_count()
    }

    pub fn superseded_count(&self) -> usize {
        self.nodes.values().filter(|n| n.superseded).count()
    }

    pub fn all_ids(&self) -> Vec<EventId> {
        self.nodes.keys().collect()
    }

    /// Every write that reached the world as `(position, new_block)`, in
    /// insertion order. Superseded writes are left out.
    pub fn block_changes(&self) -> Vec<(BlockPos, BlockId)> {
        self.nodes
            .values()
            .filter(|node| node.executed && !node.superseded)
            .filter_map(|node| match node.event.payload {
                EventPayload::BlockSet { pos, new, .. } => Some((pos, new)),
                EventPayload::BlockNotify { .. } => None,
            })
            .collect()
    }

    /// Export the graph in Graphviz DOT format.
    pub fn to_dot(&self) -> String {
        let mut out = String::from(
            "digraph causal {\n  rankdir=BT;\n  node [shape=box, fontname=\"monospace\", fontsize=10];\n",
        );
        for (id, node) in &self.nodes {
            let (label, color) = match &node.event.payload {
                EventPayload::BlockSet { pos, new, .. } => (
                    format!("Set ({},{},{})\\n-> {:#x}", pos.x, pos.y, pos.z, new.0),
                    "#d4edda",
                ),
                EventPayload::BlockNotify { pos, face } => (
                    format!(
                        "Notify ({},{},{})\\nfrom {}",
                        pos.x,
                        pos.y,
                        pos.z,
                        face.map_or("?", |f| f.name())
                    ),
                    "#fff3cd",
                ),
            };
            let fill = match (node.executed, node.superseded) {
                (_, true) => "#f8d7da",
                (true, false) => color,
                (false, false) => "#f8f9fa",
            };
            out.push_str(&format!(
                "  \"{id:?}\" [label=\"{label}\", style=filled, fillcolor=\"{fill}\"];\n"
            ));
            for parent in &node.parents {
                out.push_str(&format!("  \"{parent:?}\" -> \"{id:?}\";\n"));
            }
        }
        out.push_str("}\n");
        out
    }
}

impl Default for CausalGraph {
    fn default() -> Self {
        Self::new()
    }
}
