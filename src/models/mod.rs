pub mod affliction;
pub mod care_event;
pub mod care_kind;
pub mod locale;
pub mod note;
pub mod plant;
pub mod reference_plant;

pub use affliction::{Affliction, AfflictionKind, AfflictionRecord};
pub use care_event::CareEvent;
pub use care_kind::CareKind;
pub use locale::Locale;
pub use note::Note;
pub use plant::Plant;
pub use reference_plant::{ReferencePlant, ReferencePlantRecord};
