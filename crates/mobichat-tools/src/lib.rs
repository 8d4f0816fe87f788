//! Tools the assistant can call during a conversation
//!
//! Two wrap the mapping service (place lookup and transit routing); the
//! third reports the current wall-clock time so the model can anchor
//! departure times.

pub mod place_tools;
pub mod route_tools;
pub mod time_tools;

pub use place_tools::GetCoordinatesTool;
pub use route_tools::GetRouteTool;
pub use time_tools::GetCurrentTimeTool;
