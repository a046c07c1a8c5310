//! Segment lookup, pagination and page arbitration

pub mod gate;
pub mod paginator;
pub mod segment_index;
pub mod sync;

pub use gate::{Direction, NavigationGate};
pub use paginator::{Page, Paginator, COVER_PAGE};
pub use segment_index::SegmentIndex;
pub use sync::{PlaybackSyncController, SyncOutcome};
