use anyhow::{Context, Result, ensure};
use masonry_blocks::block::{self, BlockKind};
use masonry_blocks::crop::WheatAge;
use masonry_blocks::wall::Wall;
use masonry_engine::causal::event::Event;
use masonry_engine::causal::graph::CausalGraph;
use masonry_engine::causal::scheduler::Scheduler;
use masonry_engine::state::ConnectionSet;
use masonry_engine::world::World;
use masonry_engine::world::position::BlockPos;
use masonry_engine::world::shape::Aabb;
use serde::Serialize;

/// Step budget for one settling run. Wall cascades settle in a handful of
/// steps; hitting this means a rule stopped being idempotent.
const MAX_STEPS: usize = 1000;

/// Floor surface height; everything is built on y = FLOOR_Y + 1.
const FLOOR_Y: i64 = 0;

#[derive(Serialize)]
struct WallReport {
    pos: BlockPos,
    kind: &'static str,
    connections: ConnectionSet,
    post: bool,
    state_bits: u32,
    collision_box: Aabb,
}

fn main() -> Result<()> {
    let use_parallel = std::env::args().any(|a| a == "--parallel");
    let dump_dot = std::env::args().any(|a| a == "--dot");
    let dump_json = std::env::args().any(|a| a == "--json");
    let length: i64 = match std::env::args().skip_while(|a| a != "--length").nth(1) {
        Some(raw) => raw.parse::<i64>().with_context(|| format!("--length expects an integer, got {raw:?}"))?,
        None => 8,
    };
    ensure!(length >= 2, "--length must be at least 2");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("masonry -- wall connectivity demo");

    let world = World::new();
    world.fill(
        BlockPos::new(-4, FLOOR_Y, -4),
        BlockPos::new(length + 4, FLOOR_Y, 4),
        block::STONE,
    );
    tracing::info!("Floor ready: {} blocks", world.block_count());

    let mut graph = CausalGraph::new();
    for event in build_scene(&world, length)? {
        graph.insert_root(event);
    }

    let rules = masonry_blocks::rules::standard();
    let scheduler = Scheduler::new();
    let stats = if use_parallel {
        tracing::info!("Running PARALLEL scheduler...");
        scheduler.run_until_quiet_parallel(&world, &mut graph, &rules, MAX_STEPS)
    } else {
        tracing::info!("Running sequential scheduler...");
        scheduler.run_until_quiet(&world, &mut graph, &rules, MAX_STEPS)
    };
    ensure!(
        stats.quiescent,
        "no quiescence after {} steps ({} events)",
        stats.steps,
        stats.executed
    );
    tracing::info!(
        "Quiescence after {} events in {} steps ({} writes)",
        stats.executed,
        stats.steps,
        graph.block_changes().len()
    );

    let reports = wall_reports(&world)?;
    if dump_json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for r in &reports {
            let faces: Vec<_> = r.connections.iter().map(|(face, _)| face.name()).collect();
            tracing::info!(
                "{:>22} ({:>3},{:>3},{:>3}) post={:<5} bits={:#011b} connects {:?}",
                r.kind,
                r.pos.x,
                r.pos.y,
                r.pos.z,
                r.post,
                r.state_bits,
                faces
            );
        }
    }

    if dump_dot {
        print!("{}", graph.to_dot());
    }
    Ok(())
}

/// A straight wall along +X, with a stone pillar at its far end, a branch
/// running south, a cap block and a crop on top, and a pane and a gate on
/// the side.
fn build_scene(world: &World, length: i64) -> Result<Vec<Event>> {
    let y = FLOOR_Y + 1;
    let mut placements = Vec::new();

    for x in 0..length {
        let kind = if x % 3 == 2 { block::MOSSY_COBBLESTONE_WALL } else { block::COBBLESTONE_WALL };
        placements.push((BlockPos::new(x, y, 0), kind));
    }
    for z in 1..=2 {
        placements.push((BlockPos::new(2, y, z), block::BRICK_WALL));
    }
    placements.push((BlockPos::new(length, y, 0), block::STONE));
    placements.push((BlockPos::new(1, y + 1, 0), block::OAK_PLANKS));
    placements.push((BlockPos::new(-1, y, 0), block::OAK_FENCE_GATE));
    placements.push((BlockPos::new(4, y, -1), block::GLASS_PANE));

    let ripe = WheatAge::with_age(WheatAge::MAX_AGE)?;
    placements.push((BlockPos::new(length - 1, y + 1, 0), block::pack(BlockKind::Wheat, &ripe)?));

    Ok(placements
        .into_iter()
        .map(|(pos, new)| Event::block_set(pos, world.get_block(pos), new))
        .collect())
}

fn wall_reports(world: &World) -> Result<Vec<WallReport>> {
    let mut reports = Vec::new();
    for (pos, id) in world.blocks() {
        let Some(wall) = Wall::from_block(id) else {
            continue;
        };
        let wall = wall.with_context(|| format!("decoding wall at {pos:?}"))?;
        reports.push(WallReport {
            pos,
            kind: block::kind_of(id).map_or("?", BlockKind::name),
            connections: *wall.connections(),
            post: wall.is_post(),
            state_bits: block::state_data(id),
            collision_box: wall.collision_box().offset(pos),
        });
    }
    Ok(reports)
}
