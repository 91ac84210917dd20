pub mod error;
pub mod config;
pub mod reference;
pub mod history;
pub mod session;
pub mod tlb;
pub mod working_set;
pub mod comparison;
pub mod autoplay;

pub use error::SimulationError;
pub use config::{ConfigError, SimulationConfig};
pub use history::StepRecord;
pub use session::SimulationSession;
pub use tlb::{tlb_check, TlbModel};
pub use working_set::working_set;
pub use comparison::{compare_all, ComparisonResult};
pub use autoplay::{AutoPlayer, PlaybackEvent, SharedSession};
