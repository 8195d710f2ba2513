/// Wound healing.
pub mod cure;
/// Light-source burn-down.
pub mod light;
/// The sword's warning glow.
pub mod sword;

pub use cure::{CURE_INTERVAL, CureDaemon};
pub use light::{LAMP_STAGES, LightDaemon};
pub use sword::{SwordGlowDaemon, glow_level};
