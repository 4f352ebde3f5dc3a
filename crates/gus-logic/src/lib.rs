//! Pure race and economy logic for Gus Must Eat.
//!
//! This crate contains all game logic that is independent of rendering,
//! audio, or input. Operations take a [`state::GameState`] by reference and
//! report success through their return values, making them unit-testable
//! and portable to any front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`clones`] | Clone bay: deploy workers, convert returns into science |
//! | [`config`] | Tunable starting values, JSON loading and validation |
//! | [`galley`] | Recipe unlocks, cooking, free-form bundle cooking |
//! | [`ingredients`] | Ingredient catalog and weighted random draws |
//! | [`ledger`] | Inventory counts, cargo usage, science currency |
//! | [`persistence`] | Snapshot format, key-value save stores |
//! | [`race`] | Earth vs. Gus tick state machine |
//! | [`recipes`] | Recipe catalog and exact-bundle matching |
//! | [`session`] | Game session owning state + save store |
//! | [`ship`] | Cargo capacity, weapons, shields |
//! | [`shop`] | Upgrade purchase gating and effect application |
//! | [`state`] | The aggregate `GameState` |
//! | [`upgrades`] | Upgrade catalog and prerequisite queries |
//!
//! ```
//! use gus_logic::config::GameConfig;
//! use gus_logic::persistence::MemoryStore;
//! use gus_logic::session::GameSession;
//!
//! let mut session = GameSession::new(GameConfig::default(), MemoryStore::default());
//! let outcome = session.tick();
//! assert!(!outcome.game_over);
//! ```

pub mod clones;
pub mod config;
pub mod galley;
pub mod ingredients;
pub mod ledger;
pub mod persistence;
pub mod race;
pub mod recipes;
pub mod session;
pub mod ship;
pub mod shop;
pub mod state;
pub mod upgrades;
