//! Roster core: incremental list collection over lazily-rendered lists.
mod collector;
mod item;
mod paired;
mod settings;
mod source;
mod state;
mod window;

pub use collector::{CollectionRun, Collector, Termination};
pub use item::{normalize_identity_key, ListItem};
pub use paired::PairedNodes;
pub use settings::CollectorSettings;
pub use source::{ListSource, Pacer, ReadMiss, SleepPacer, VisibleItem};
pub use state::{CollectionState, DetailLedger, FrontierUpdate};
pub use window::{TargetWindow, WindowError};
