//! Best score, medals, and achievements
//!
//! Persisted to LocalStorage as a single JSON blob.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A score-threshold medal tier
#[derive(Debug, Clone, Copy)]
pub struct Medal {
    pub name: &'static str,
    pub min_score: u32,
}

/// Medal tiers, ascending by threshold
pub const MEDALS: [Medal; 5] = [
    Medal { name: "Bronze", min_score: 10 },
    Medal { name: "Silver", min_score: 25 },
    Medal { name: "Gold", min_score: 50 },
    Medal { name: "Platinum", min_score: 80 },
    Medal { name: "Obsidian", min_score: 120 },
];

/// Highest medal earned at this score, if any
pub fn medal_for(score: u32) -> Option<&'static Medal> {
    MEDALS.iter().take_while(|m| score >= m.min_score).last()
}

/// One-time unlockable achievements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    Score10,
    Score25,
    Score50,
    Glide3s,
}

/// All achievements, in display order
pub const ACHIEVEMENTS: [Achievement; 4] = [
    Achievement::Score10,
    Achievement::Score25,
    Achievement::Score50,
    Achievement::Glide3s,
];

impl Achievement {
    /// Stable id used as the storage key
    pub fn id(&self) -> &'static str {
        match self {
            Achievement::Score10 => "first10",
            Achievement::Score25 => "streak25",
            Achievement::Score50 => "streak50",
            Achievement::Glide3s => "noFlap3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Achievement::Score10 => "Score 10",
            Achievement::Score25 => "Score 25",
            Achievement::Score50 => "Score 50",
            Achievement::Glide3s => "3s Glide",
        }
    }

    /// Whether a finished run earns this achievement
    pub fn earned(&self, score: u32, longest_glide: f32) -> bool {
        match self {
            Achievement::Score10 => score >= 10,
            Achievement::Score25 => score >= 25,
            Achievement::Score50 => score >= 50,
            Achievement::Glide3s => longest_glide >= 3.0,
        }
    }
}

/// The best run recorded on this device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestRun {
    /// Final score
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Persistent player progress
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Progress {
    /// Best run so far, if any
    pub best: Option<BestRun>,
    /// Achievement id -> unlocked flag
    pub unlocked: BTreeMap<String, bool>,
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "skyflap_progress";

    /// Best score so far (0 if no runs recorded)
    pub fn high_score(&self) -> u32 {
        self.best.as_ref().map(|b| b.score).unwrap_or(0)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.get(id).copied().unwrap_or(false)
    }

    /// Record a finished run. Returns the newly unlocked achievements and
    /// whether the best score improved. Safe to call repeatedly with the
    /// same run.
    pub fn record_run(&mut self, score: u32, longest_glide: f32) -> (Vec<Achievement>, bool) {
        let mut newly = Vec::new();
        for achievement in ACHIEVEMENTS {
            if achievement.earned(score, longest_glide) && !self.is_unlocked(achievement.id()) {
                self.unlocked.insert(achievement.id().to_string(), true);
                newly.push(achievement);
            }
        }

        let improved = score > self.high_score();
        if improved {
            self.best = Some(BestRun {
                score,
                timestamp: crate::platform::now_ms(),
            });
        }

        (newly, improved)
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(progress) = serde_json::from_str::<Progress>(&json) {
                    log::info!("Loaded progress (best {})", progress.high_score());
                    return progress;
                }
            }
        }

        log::info!("No saved progress, starting fresh");
        Self::default()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Progress saved (best {})", self.high_score());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
