mod channels;
mod state_store;

pub use channels::Channel;
pub use state_store::store_prelude;
pub use state_store::{ProfileStore, ProgressStore, StageStore, StateStore, TurnCommit};
