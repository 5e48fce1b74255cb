pub mod lives;
pub mod mutation;
pub mod resource;
pub mod setlist;
pub mod songs;

pub use lives::{LivesState, LivesStore};
pub use mutation::{Mutation, MutationPhase};
pub use resource::{FetchTicket, Resource, ResourceState};
pub use setlist::{MoveDirection, SetlistState, SetlistStore};
pub use songs::{SongsState, SongsStore};
