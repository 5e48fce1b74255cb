pub mod share;
pub mod slug;

pub use share::{ShareLookup, ShareOptions, ShareRequest, ShareService};
pub use slug::{SlugGenerator, SlugOutcome, SlugRequest};
