pub mod avatar;
pub mod config;
pub mod constants;
pub mod creature;
pub mod field;
pub mod fixtures;
pub mod rng;
pub mod session;
pub mod types;

pub use avatar::Avatar;
pub use config::SessionConfig;
pub use creature::{
    CreatureError, CreatureRecord, CreatureSource, CreatureStats, FetchError, Icon,
    create_creature,
};
pub use field::{Capsule, CapsuleState, FieldItem, populate};
pub use session::{CaptureEvent, RevealedPlacement, Session, SessionReport, UpdateReport};
pub use types::*;
