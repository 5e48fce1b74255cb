pub mod band;
pub mod ids;
pub mod live;
pub mod setlist;
pub mod share;
pub mod song;

pub use band::Band;
pub use ids::{BandId, LiveId, SetlistItemId, SongId};
pub use live::{Live, LiveFormData, LivePatch};
pub use setlist::SetlistItem;
pub use share::{ShareEntry, ShareMetadata, ShareMetrics, ShareSnapshot, SharedLive};
pub use song::{Song, SongFormData, SongPatch, SongSummary};
