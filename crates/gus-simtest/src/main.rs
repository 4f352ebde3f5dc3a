//! Gus Must Eat Headless Simulation Harness
//!
//! Validates race and economy logic and catalog data without a renderer.
//! Runs entirely in-process — no browser, no audio, no input.
//!
//! Usage:
//!   cargo run -p gus-simtest
//!   cargo run -p gus-simtest -- --verbose
//!   cargo run -p gus-simtest -- --config tuning.json --seed 7
//!   cargo run -p gus-simtest -- --save-dir ./saves --dump

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;
use gus_logic::config::{validate_config, GameConfig};
use gus_logic::ingredients::{self, random_ingredient, IngredientId, Rarity, INGREDIENTS};
use gus_logic::persistence::{
    deserialize_state, serialize_state, write_snapshot, FileStore, MemoryStore, SaveStore,
};
use gus_logic::race::RaceStatus;
use gus_logic::recipes::{self, find_matching_recipe, Bundle, RecipeId, FAILURE_RECIPE, RECIPES};
use gus_logic::session::{GameSession, HarvestReport};
use gus_logic::state::{GameState, ShipLocation};
use gus_logic::upgrades::{available_upgrades, upgrade, UpgradeId, UPGRADES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Logging ─────────────────────────────────────────────────────────────

struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            println!("    [{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

/// Headless validation run for the race and economy logic.
#[derive(Debug, Parser)]
#[command(name = "gus-simtest")]
struct Options {
    /// Print every check and the logic's debug log.
    #[arg(long)]
    verbose: bool,

    /// Print the playthrough's final state as a JSON snapshot.
    #[arg(long)]
    dump: bool,

    /// Seed for the random playthrough.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON file with config overrides.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also check resuming through a file store in this directory.
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,
}

fn load_config(opts: &Options) -> Result<GameConfig, String> {
    let Some(path) = &opts.config else {
        return Ok(GameConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    GameConfig::from_json(&json).map_err(|e| format!("cannot parse {}: {}", path.display(), e))
}

fn main() {
    let opts = Options::parse();
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(if opts.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });

    println!("=== Gus Must Eat Simulation Harness ===\n");

    let mut results = Vec::new();

    // 0. Config
    let config = match load_config(&opts) {
        Ok(c) => c,
        Err(e) => {
            println!("  ✗ config_load: {}", e);
            std::process::exit(1);
        }
    };
    results.extend(validate_game_config(&config));

    // 1. Catalog data
    results.extend(validate_catalogs());

    // 2. Ledger & cargo
    results.extend(validate_ledger(&config));

    // 3. Race engine
    results.extend(validate_race(&config));

    // 4. Galley
    results.extend(validate_galley(&config));

    // 5. Shop & upgrades
    results.extend(validate_shop(&config));

    // 6. Persistence
    results.extend(validate_persistence(&config, opts.save_dir.clone()));

    // 7. Seeded playthrough
    let (playthrough, final_state) = run_playthrough(&config, opts.seed, opts.verbose);
    results.extend(playthrough);

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    if opts.dump {
        println!("\n--- Final State ---");
        if let Err(e) = write_snapshot(std::io::stdout().lock(), &final_state) {
            println!("  snapshot dump failed: {}", e);
        }
        println!();
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 0. Config ───────────────────────────────────────────────────────────

fn validate_game_config(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Config ---");
    let problems = validate_config(config);
    vec![check(
        "config_valid",
        problems.is_empty(),
        if problems.is_empty() {
            format!(
                "track {} earth@{} gus@{} speeds {}/{}",
                config.race.track_length,
                config.race.earth_start,
                config.race.gus_start,
                config.race.earth_speed,
                config.race.gus_speed
            )
        } else {
            problems.join("; ")
        },
    )]
}

// ── 1. Catalogs ─────────────────────────────────────────────────────────

fn validate_catalogs() -> Vec<TestResult> {
    println!("--- Catalogs ---");
    let mut results = Vec::new();

    let weight = ingredients::total_spawn_weight();
    results.push(check(
        "ingredient_weights",
        weight > 0 && INGREDIENTS.iter().all(|i| i.spawn_weight > 0),
        format!("{} ingredients, total weight {}", INGREDIENTS.len(), weight),
    ));

    let rarities = [Rarity::Common, Rarity::Uncommon, Rarity::Rare];
    let covered = rarities
        .iter()
        .all(|&r| !ingredients::ingredients_by_rarity(r).is_empty());
    results.push(check(
        "ingredient_rarity_coverage",
        covered,
        "every rarity has at least one ingredient",
    ));

    // Every non-failure recipe needs ingredients and is unique as a bundle
    let mut seen = BTreeSet::new();
    let mut dupes = Vec::new();
    let mut empty = Vec::new();
    for r in RECIPES.iter().filter(|r| r.id != FAILURE_RECIPE) {
        let key: Vec<_> = r.requirements().into_iter().collect();
        if key.is_empty() {
            empty.push(r.id.as_str());
        }
        if !seen.insert(key) {
            dupes.push(r.id.as_str());
        }
    }
    results.push(check(
        "recipe_bundles_unique",
        dupes.is_empty() && empty.is_empty(),
        if dupes.is_empty() && empty.is_empty() {
            format!("{} craftable recipes", seen.len())
        } else {
            format!("duplicates: {:?}, empty: {:?}", dupes, empty)
        },
    ));

    let self_match = RECIPES
        .iter()
        .filter(|r| r.id != FAILURE_RECIPE)
        .all(|r| find_matching_recipe(&r.requirements()).map(|m| m.id) == Some(r.id));
    results.push(check(
        "recipe_self_match",
        self_match,
        "each recipe matches its own requirements",
    ));

    let tiers_present = (1..=3).all(|t| !recipes::recipes_by_tier(t).is_empty());
    results.push(check(
        "recipe_research_tiers",
        tiers_present,
        "tiers 1-3 each unlock something",
    ));

    let bad_prereq: Vec<_> = UPGRADES
        .iter()
        .filter(|u| {
            u.requires
                .map_or(false, |req| upgrade(req).category != u.category)
        })
        .map(|u| u.id.as_str())
        .collect();
    results.push(check(
        "upgrade_prereqs_same_category",
        bad_prereq.is_empty(),
        if bad_prereq.is_empty() {
            format!("{} upgrades", UPGRADES.len())
        } else {
            format!("cross-category prerequisites: {:?}", bad_prereq)
        },
    ));

    let roots = available_upgrades(&BTreeSet::new());
    results.push(check(
        "upgrade_roots",
        !roots.is_empty() && roots.iter().all(|u| u.requires.is_none()),
        format!("{} upgrades available at start", roots.len()),
    ));

    results
}

// ── 2. Ledger ───────────────────────────────────────────────────────────

fn validate_ledger(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Ledger ---");
    let mut results = Vec::new();
    let capacity = config.ship.cargo_capacity;

    let mut state = GameState::new(config);
    let filled = state.add_ingredient(IngredientId::Stardust, capacity);
    let overflow = state.add_ingredient(IngredientId::VoidSalt, 1);
    results.push(check(
        "cargo_capacity_enforced",
        filled && !overflow && state.ship.current_cargo == capacity,
        format!("cargo {}/{}", state.ship.current_cargo, capacity),
    ));

    let short = state.remove_ingredient(IngredientId::CometTail, 1);
    results.push(check(
        "remove_short_stock_rejected",
        !short && state.ingredient_count(IngredientId::CometTail) == 0,
        "removing absent ingredient fails",
    ));

    let mut mission = GameState::new(config);
    let out = mission.deploy_clones(u32::MAX);
    let earned = mission.return_clones();
    results.push(check(
        "clone_science",
        out == config.clones.slots && earned == out * config.clones.efficiency,
        format!("{} clones earned {} science", out, earned),
    ));

    results
}

// ── 3. Race ─────────────────────────────────────────────────────────────

fn validate_race(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Race ---");
    let mut results = Vec::new();

    // Idle race
    let mut state = GameState::new(config);
    let mut last_gus = state.race.gus_position;
    let mut monotone = true;
    while !state.tick().game_over {
        monotone &= state.race.gus_position >= last_gus;
        last_gus = state.race.gus_position;
        if state.race.tick > 10_000 {
            break;
        }
    }
    results.push(check(
        "idle_race_terminates",
        state.game_over,
        format!(
            "{:?} at tick {} (earth {}, gus {})",
            state.race_status(),
            state.race.tick,
            state.race.earth_position,
            state.race.gus_position
        ),
    ));
    results.push(check(
        "gus_never_retreats",
        monotone,
        "gus position is non-decreasing",
    ));

    if *config == GameConfig::default() {
        results.push(check(
            "default_race_won_at_25",
            state.race_status() == RaceStatus::Victory
                && state.race.tick == 25
                && state.race.gus_position == 75,
            format!("tick {}", state.race.tick),
        ));
    }

    let frozen = state.clone();
    let outcome = state.tick();
    results.push(check(
        "terminal_tick_noop",
        outcome.game_over && state == frozen,
        "ticking a finished race changes nothing",
    ));

    results
}

// ── 4. Galley ───────────────────────────────────────────────────────────

fn validate_galley(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Galley ---");
    let mut results = Vec::new();

    let mut state = GameState::new(config);
    state.add_ingredient(IngredientId::Stardust, 1);
    let before = state.clone();
    let cooked = state.cook(RecipeId::DustSoup);
    results.push(check(
        "cook_short_stock_noop",
        !cooked && state == before,
        "dust soup with one stardust fails cleanly",
    ));

    state.add_ingredient(IngredientId::Stardust, 1);
    let cooked = state.cook(RecipeId::DustSoup);
    let duration = state.race.modifier_duration;
    let mut expired_after = 0;
    while !state.race.gus_modifier.is_none() && !state.game_over {
        state.tick();
        expired_after += 1;
    }
    results.push(check(
        "modifier_expires_on_time",
        cooked && expired_after == duration,
        format!("duration {} expired after {} ticks", duration, expired_after),
    ));

    let mut state = GameState::new(config);
    state.add_ingredient(IngredientId::Stardust, 1);
    state.add_ingredient(IngredientId::CometTail, 1);
    let mush: Bundle = [(IngredientId::Stardust, 1), (IngredientId::CometTail, 1)]
        .into_iter()
        .collect();
    let dish = state.cook_bundle(&mush);
    results.push(check(
        "unknown_bundle_is_mush",
        dish == Some(FAILURE_RECIPE) && state.ship.current_cargo == 0,
        format!("cooked {:?}", dish),
    ));

    results
}

// ── 5. Shop ─────────────────────────────────────────────────────────────

fn validate_shop(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Shop ---");
    let mut results = Vec::new();

    let mut state = GameState::new(config);
    state.add_science(100);
    let before = state.clone();
    let skipped = state.purchase(UpgradeId::Cargo2);
    results.push(check(
        "prerequisite_enforced",
        !skipped && state == before,
        "cargo_2 before cargo_1 rejected",
    ));

    let mut bought = Vec::new();
    let mut total_cost = 0;
    let mut rich = GameState::new(config);
    rich.add_science(10_000);
    loop {
        let next = available_upgrades(&rich.purchased_upgrades)
            .first()
            .map(|u| (u.id, u.cost));
        let Some((id, cost)) = next else { break };
        if !rich.purchase(id) {
            break;
        }
        bought.push(id);
        total_cost += cost;
    }
    results.push(check(
        "full_tree_purchasable",
        bought.len() == UPGRADES.len() && rich.science == 10_000 - total_cost,
        format!("{} upgrades for {} science", bought.len(), total_cost),
    ));
    results.push(check(
        "all_recipes_unlocked",
        rich.unlocked_recipes.len() == RECIPES.len(),
        format!("{}/{} recipes", rich.unlocked_recipes.len(), RECIPES.len()),
    ));

    results
}

// ── 6. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(config: &GameConfig, save_dir: Option<PathBuf>) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut state = GameState::new(config);
    state.add_science(50);
    state.purchase(UpgradeId::Cookbook1);
    state.add_ingredient(IngredientId::SingularitySeed, 1);
    state.set_location(ShipLocation::Engineering);
    state.tick();

    let roundtrip = serialize_state(&state).and_then(|json| deserialize_state(&json));
    results.push(check(
        "snapshot_roundtrip",
        matches!(&roundtrip, Ok(s) if *s == state),
        match &roundtrip {
            Ok(_) => "state survives serialize/deserialize".to_string(),
            Err(e) => e.to_string(),
        },
    ));

    results.push(resume_check("memory_resume", config, MemoryStore::default()));
    if let Some(dir) = save_dir {
        let label = format!("file_resume ({})", dir.display());
        results.push(resume_check(&label, config, FileStore::new(dir)));
    }

    results
}

fn resume_check<S: SaveStore>(name: &str, config: &GameConfig, store: S) -> TestResult {
    let mut session = GameSession::new(config.clone(), store);
    session.add_science(20);
    session.purchase(UpgradeId::Weapons1);
    session.tick();
    let expected = session.state().clone();

    let mut resumed = GameSession::new(config.clone(), session.into_store());
    let loaded = resumed.load();
    let same = resumed.state() == &expected;
    resumed.reset();
    check(
        name,
        loaded && same,
        format!("loaded={} identical={}", loaded, same),
    )
}

// ── 7. Playthrough ──────────────────────────────────────────────────────

/// Greedy player: harvest, cook whatever slows Gus most, run missions,
/// buy the cheapest available upgrade.
fn run_playthrough(config: &GameConfig, seed: u64, verbose: bool) -> (Vec<TestResult>, GameState) {
    println!("--- Playthrough (seed {}) ---", seed);
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = GameSession::new(config.clone(), MemoryStore::default());
    let mut invariant_ok = true;
    let mut cooked = 0;
    let mut purchased = 0;
    let mut last = session.state().clone();

    while !session.state().game_over && session.state().race.tick < 10_000 {
        let outcome = if rng.gen_bool(0.5) {
            session.set_location(ShipLocation::Cargo);
            let mut collected = Bundle::new();
            for _ in 0..rng.gen_range(1..=5) {
                *collected.entry(random_ingredient(&mut rng)).or_insert(0) += 1;
            }
            let aborted = rng.gen_bool(0.2);
            if aborted {
                session.take_damage();
            }
            session
                .complete_harvest(&HarvestReport { collected, aborted })
                .tick
        } else {
            session.set_location(ShipLocation::CloneBay);
            let mission = session.run_science_mission();
            match mission.tick {
                Some(tick) => tick,
                None => session.tick(),
            }
        };
        if outcome.game_over {
            break;
        }

        session.set_location(ShipLocation::Galley);
        let best = session
            .state()
            .unlocked_recipes()
            .into_iter()
            .filter(|r| r.id != FAILURE_RECIPE && session.state().has_ingredients(&r.requirements()))
            .max_by_key(|r| r.effect.duration)
            .map(|r| r.id);
        if let Some(id) = best {
            if session.cook(id) {
                cooked += 1;
            }
        }

        session.set_location(ShipLocation::Engineering);
        let cheapest = available_upgrades(&session.state().purchased_upgrades)
            .into_iter()
            .min_by_key(|u| u.cost)
            .map(|u| u.id);
        if let Some(id) = cheapest {
            if session.purchase(id) {
                purchased += 1;
            }
        }
        session.repair_shields();
        session.set_location(ShipLocation::Bridge);

        let state = session.state();
        let held: u32 = state.inventory.values().sum();
        invariant_ok &= held == state.ship.current_cargo
            && state.ship.current_cargo <= state.ship.cargo_capacity
            && state.race.gus_position >= last.race.gus_position
            && state.clones.deployed_count <= state.clones.total_slots;
        last = state.clone();

        if verbose {
            println!(
                "    tick {:>3}: earth {:>3} gus {:>3} science {:>3} cargo {}/{}",
                state.race.tick,
                state.race.earth_position,
                state.race.gus_position,
                state.science,
                state.ship.current_cargo,
                state.ship.cargo_capacity
            );
        }
    }

    let state = session.state().clone();
    results.push(check(
        "playthrough_finishes",
        state.game_over,
        format!(
            "{:?} at tick {} ({} dishes, {} upgrades)",
            state.race_status(),
            state.race.tick,
            cooked,
            purchased
        ),
    ));
    results.push(check(
        "playthrough_invariants",
        invariant_ok,
        "cargo accounting, gus monotonicity, clone slots",
    ));
    results.push(check(
        "playthrough_save_cleared",
        !session.store().contains(&config.save_key),
        "finished game leaves no save behind",
    ));

    (results, state)
}
