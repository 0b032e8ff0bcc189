pub mod channel;
pub mod player;

pub use channel::ChannelPath;
pub use player::ActingPlayer;
