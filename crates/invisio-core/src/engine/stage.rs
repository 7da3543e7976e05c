use std::fmt;

use crate::InvisioError;

/// Steps of a hide or unveil run, in the order they are entered.
///
/// Hide: `Packing`, `Encrypting` (only with a password), `CapacityCheck`,
/// `Embedding`, `Done`.
/// Unveil: `HeaderRead`, `BodyRead`, `Decrypting` (only for encrypted
/// streams), `Unpacking`, `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Packing,
    Encrypting,
    CapacityCheck,
    Embedding,
    HeaderRead,
    BodyRead,
    Decrypting,
    Unpacking,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Packing => "packing",
            Stage::Encrypting => "encrypting",
            Stage::CapacityCheck => "capacity check",
            Stage::Embedding => "embedding",
            Stage::HeaderRead => "header read",
            Stage::BodyRead => "body read",
            Stage::Decrypting => "decrypting",
            Stage::Unpacking => "unpacking",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Gets notified about every stage transition of an [`Engine`](super::Engine).
///
/// A run ends either with [`Stage::Done`] or exactly one call of `on_failure`.
pub trait StageObserver: Send + Sync {
    fn on_stage(&self, stage: Stage);

    fn on_failure(&self, _error: &InvisioError) {}
}

/// default observer, writes transitions to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl StageObserver for LogObserver {
    fn on_stage(&self, stage: Stage) {
        log::debug!("stage: {stage}");
    }

    fn on_failure(&self, error: &InvisioError) {
        log::debug!("failed: {error}");
    }
}
