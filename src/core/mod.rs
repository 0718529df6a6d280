pub mod backup;
pub mod clock;
pub mod config;
pub mod due;
pub mod events;
pub mod log;
pub mod notes;
pub mod plants;
pub mod reference;

pub use clock::{Clock, FixedClock, SystemClock};
pub use events::{CareEventLogic, SavedEvent};
pub use notes::NoteLogic;
pub use plants::PlantLogic;
pub use reference::ReferenceLogic;
