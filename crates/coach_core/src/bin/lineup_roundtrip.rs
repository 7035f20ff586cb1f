use anyhow::{bail, Context};
use coach_core::config::CompositionConfig;
use coach_core::lineup::{LineupBoard, LineupSnapshot};
use coach_core::models::{Formation, PlanBundle, PlayerRef};
use coach_core::save::{FileStore, SnapshotStore};
use coach_core::training::{SessionTimeline, TimelineSnapshot};

fn main() -> anyhow::Result<()> {
    println!("Testing snapshot save/load round trip...");

    let config = CompositionConfig::from_env().context("loading composition config")?;
    let dir = std::env::temp_dir().join("coach_core_roundtrip");
    println!("Using {}", dir.display());

    // Timeline
    println!("\nTest 1: session timeline");
    let catalog = vec![
        PlanBundle::new("warmup", "Activation"),
        PlanBundle::new("press", "Pressing triggers"),
        PlanBundle::new("finish", "Finishing"),
    ];

    let mut timeline = SessionTimeline::with_config(config.clone());
    timeline.append(catalog[0].clone(), 15);
    timeline.append_default(catalog[1].clone());
    timeline.append(catalog[2].clone(), 25);
    timeline.reorder(2, 1)?;
    println!("Built timeline: {} entries, {} min", timeline.len(), timeline.total_duration_minutes());

    let mut timeline_store: FileStore<TimelineSnapshot> = FileStore::new(dir.join("timeline.dat"));
    timeline.save_to(&mut timeline_store)?;
    println!("Saved to {}", timeline_store.path().display());

    let mut reloaded = SessionTimeline::with_config(config.clone());
    if !reloaded.load_from(&timeline_store, &catalog)? {
        bail!("timeline store should not be empty");
    }
    if reloaded.snapshot() != timeline.snapshot() {
        bail!("timeline mismatch after reload");
    }
    println!("Timeline verified");

    // Lineup
    println!("\nTest 2: lineup board");
    let roster: Vec<PlayerRef> =
        (1..=16).map(|n| PlayerRef::new(format!("p{}", n), format!("Player {}", n), n)).collect();

    let slots = Formation::F433.slots();
    let mut board = LineupBoard::with_config(slots.clone(), &config)?;
    for (slot, player) in slots.iter().zip(&roster) {
        board.assign(player.clone(), &slot.slot_id)?;
    }
    board.add_to_bench(roster[11].clone())?;
    println!("Built lineup {} with {} on the bench", board.progress_label(), board.bench().len());

    let mut lineup_store: FileStore<LineupSnapshot> = FileStore::new(dir.join("lineup.dat"));
    board.save_complete_to(&mut lineup_store)?;

    let saved = lineup_store.load()?.context("lineup store should not be empty")?;
    let restored = LineupBoard::from_snapshot(slots, &saved, &roster, &config)?;
    if !restored.is_complete() || restored.snapshot() != board.snapshot() {
        bail!("lineup mismatch after reload");
    }
    println!("Lineup verified");

    timeline_store.delete()?;
    lineup_store.delete()?;
    println!("\nAll round trips passed");
    Ok(())
}
