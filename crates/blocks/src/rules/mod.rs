pub mod connectivity;

use masonry_engine::rules::RuleSet;

/// The standard rule set: change propagation + wall connectivity.
pub fn standard() -> RuleSet {
    RuleSet::new()
        .with(connectivity::neighbor_updates)
        .with(connectivity::wall_connections)
}
