pub mod live_gateway;
pub mod response;
pub mod setlist_gateway;
pub mod share_gateway;
pub mod song_gateway;

pub use live_gateway::LiveGateway;
pub use response::ApiResponse;
pub use setlist_gateway::SetlistGateway;
pub use share_gateway::ShareGateway;
pub use song_gateway::SongGateway;
