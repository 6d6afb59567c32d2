//! Ошибки симуляции
//!
//! Per-tick системы ошибок не возвращают: отсутствующий collaborator
//! пропускается, неизвестная категория еды - no-op, нулевой cap даёт нулевые
//! ratios. `Result` есть только у загрузки конфигов и save/load.

use bevy::prelude::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VitalsError {
    #[error("invalid vitals configuration: {0}")]
    Config(#[source] serde_json::Error),

    #[error("vitals snapshot (de)serialization failed: {0}")]
    Persistence(#[source] serde_json::Error),

    #[error("entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },
}
