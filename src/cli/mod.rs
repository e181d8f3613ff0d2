//! CLI command implementations

pub mod bonds;
pub mod business;
pub mod daily;
pub mod profile;
pub mod reset;
pub mod shop;
pub mod skill;
pub mod status;
pub mod study;

use std::path::PathBuf;

use anyhow::Result;

use grindstone::clock::SystemClock;
use grindstone::settings::Settings;
use grindstone::{Engine, EngineEvent, ProfileStore};

/// Shared command state: where the profile lives plus loaded settings.
pub struct Context {
    store: ProfileStore,
    settings: Settings,
}

impl Context {
    pub fn new(profile_path: Option<PathBuf>, settings: Settings) -> Result<Self> {
        let path = profile_path.unwrap_or_else(|| settings.data_dir().join("profile.json"));
        Ok(Self {
            store: ProfileStore::new(path),
            settings,
        })
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Load the profile into an engine. Every command starts here, and
    /// loading immediately settles anything that became due while the
    /// process was closed.
    pub fn engine(&self) -> Result<Engine<SystemClock>> {
        let profile = self.store.load()?;
        let mut engine = match self.settings.rng_seed {
            Some(seed) => Engine::with_seed(profile, SystemClock, seed),
            None => Engine::new(profile, SystemClock),
        };
        print_events(&engine.poll());
        Ok(engine)
    }

    pub fn save(&self, engine: &Engine<SystemClock>) -> Result<()> {
        self.store.save(engine.profile())
    }
}

/// Announce engine events to the user, one line each.
pub fn print_events(events: &[EngineEvent]) {
    for event in events {
        match event {
            EngineEvent::HardResetExecuted => println!("Hard reset executed. Fresh start."),
            EngineEvent::DayRotated => println!("A new day: fresh challenges and offers."),
            EngineEvent::BondBatchGenerated => println!("New bonds are on the market."),
            EngineEvent::BondMatured { risk, delta } => {
                if *delta >= 0.0 {
                    println!("A {} bond matured: +${:.2}", risk.as_str(), delta);
                } else {
                    println!("A {} bond went bad: -${:.2}", risk.as_str(), -delta);
                }
            }
            EngineEvent::OfferExpired => println!("Your active offer has expired."),
            EngineEvent::LevelUp {
                old_level,
                new_level,
            } => println!("Level up! {} -> {}", old_level, new_level),
            EngineEvent::StreakExtended { days } => println!("Streak extended: {} days", days),
            EngineEvent::AchievementUnlocked(id) => {
                let achievement = grindstone::achievements::Achievement::get(*id);
                println!(
                    "Achievement unlocked: {} (+${:.0})",
                    achievement.name, achievement.cash_reward
                );
            }
        }
    }
}
