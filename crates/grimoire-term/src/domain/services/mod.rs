pub mod actions;
mod app_state;
pub mod events;

pub use actions::{dispatch, send, ActionsService};
pub use app_state::SessionState;
pub use events::EventsService;
