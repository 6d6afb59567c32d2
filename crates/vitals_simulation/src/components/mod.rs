//! ECS компоненты survivor'а
//!
//! Организация по доменам:
//! - actor: маркер Survivor, Health, GameMode, Intoxication
//! - nutrition: NutrientPools (пять категорий → saturation)
//! - stamina: Stamina (exhaustion, grounding, tool-use ticker)
//! - stats: EntityStats (layered stat blending)
//! - body: BodyState, Controls, Surroundings (пишет host)

pub mod actor;
pub mod body;
pub mod nutrition;
pub mod stamina;
pub mod stats;

// Re-exports для удобного импорта
pub use actor::*;
pub use body::*;
pub use nutrition::*;
pub use stamina::*;
pub use stats::*;
