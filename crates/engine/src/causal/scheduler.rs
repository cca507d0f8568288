use super::event::{Event, EventId, EventPayload};
use super::graph::CausalGraph;
use crate::rules::RuleSet;
use crate::world::World;
use rayon::prelude::*;
use std::collections::HashMap;

/// Outcome of draining a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Events executed across all steps.
    pub executed: usize,
    /// Steps that executed at least one event.
    pub steps: usize,
    /// True when the frontier emptied before the step budget ran out.
    pub quiescent: bool,
}

/// Drains the causal frontier, applying events to the world and generating
/// consequent events via the rule set.
///
/// Provides both sequential (`step`) and parallel (`step_parallel`) execution.
pub struct Scheduler {
    pub max_events_per_step: usize,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            max_events_per_step: 10_000,
        }
    }

    // ── Sequential execution ────────────────────────────────────────────

    pub fn step(&self, world: &World, graph: &mut CausalGraph, rules: &RuleSet) -> usize {
        let frontier = graph.frontier();
        let mut executed = 0;

        for id in frontier {
            if executed >= self.max_events_per_step {
                break;
            }

            let event = match graph.get(id) {
                Some(node) => node.event.clone(),
                None => continue,
            };

            executed += 1;
            if !apply_event(world, &event.payload) {
                graph.mark_superseded(id);
                continue;
            }
            graph.mark_executed(id);

            let consequents = rules.evaluate(world, &event.payload);
            for new_event in consequents {
                graph.insert(new_event, vec![id]);
            }
        }

        executed
    }

    pub fn run_until_quiet(
        &self,
        world: &World,
        graph: &mut CausalGraph,
        rules: &RuleSet,
        max_steps: usize,
    ) -> RunStats {
        self.drain(max_steps, || self.step(world, graph, rules))
    }

    // ── Parallel execution (snapshot-scatter-gather) ────────────────────
    //
    // Only sound for rule sets whose outcome for one chunk group cannot be
    // changed by writes in another group executed in the same step.

    pub fn step_parallel(&self, world: &World, graph: &mut CausalGraph, rules: &RuleSet) -> usize {
        let frontier = graph.frontier();
        if frontier.is_empty() {
            return 0;
        }

        let events: Vec<(EventId, Event)> = frontier
            .iter()
            .filter_map(|&id| graph.get(id).map(|node| (id, node.event.clone())))
            .take(self.max_events_per_step)
            .collect();

        let mut chunk_groups: HashMap<_, Vec<(EventId, Event)>> = HashMap::new();
        for (id, event) in events {
            chunk_groups
                .entry(event.chunk())
                .or_default()
                .push((id, event));
        }
        let groups: Vec<Vec<(EventId, Event)>> = chunk_groups.into_values().collect();

        let results: Vec<Vec<(EventId, Option<Vec<Event>>)>> = groups
            .into_par_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|(id, event)| {
                        let consequents = apply_event(world, &event.payload)
                            .then(|| rules.evaluate(world, &event.payload));
                        (id, consequents)
                    })
                    .collect()
            })
            .collect();

        let mut executed = 0;
        for group_results in results {
            for (id, consequents) in group_results {
                executed += 1;
                let Some(consequents) = consequents else {
                    graph.mark_superseded(id);
                    continue;
                };
                graph.mark_executed(id);
                for new_event in consequents {
                    graph.insert(new_event, vec![id]);
                }
            }
        }

        executed
    }

    pub fn run_until_quiet_parallel(
        &self,
        world: &World,
        graph: &mut CausalGraph,
        rules: &RuleSet,
        max_steps: usize,
    ) -> RunStats {
        self.drain(max_steps, || self.step_parallel(world, graph, rules))
    }

    fn drain(&self, max_steps: usize, mut step: impl FnMut() -> usize) -> RunStats {
        let mut stats = RunStats::default();
        for _ in 0..max_steps {
            let n = step();
            if n == 0 {
                stats.quiescent = true;
                break;
            }
            stats.executed += n;
            stats.steps += 1;
            tracing::trace!("step {}: {} events", stats.steps, n);
        }
        if !stats.quiescent {
            tracing::debug!(
                "step budget of {} exhausted after {} events",
                max_steps,
                stats.executed
            );
        }
        stats
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns false when a write is superseded: its cell no longer holds `old`,
/// so a later write already replaced the state this one was computed from.
/// Rules never see superseded writes.
fn apply_event(world: &World, payload: &EventPayload) -> bool {
    match payload {
        EventPayload::BlockSet { pos, old, new } => match world.compare_and_set(*pos, *old, *new) {
            Ok(_) => true,
            Err(found) => {
                tracing::trace!("write at {:?} superseded: expected {:?}, found {:?}", pos, old, found);
                false
            }
        },
        EventPayload::BlockNotify { .. } => true,
    }
}
