pub mod exhibition;
pub mod exhibitor;
pub mod industry;
pub mod organizer;
pub mod pavilion;
pub mod record;
pub mod series;

pub use exhibition::Exhibition;
pub use exhibitor::{Exhibitor, ExpoEdition};
pub use industry::{IndustryCategory, MAX_INDUSTRY_DEPTH};
pub use organizer::Organizer;
pub use pavilion::Pavilion;
pub use record::{Location, Record, WeakRef};
pub use series::Series;
