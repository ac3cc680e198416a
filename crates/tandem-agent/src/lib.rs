pub mod agent;
pub mod builder;
pub mod router;
pub mod state;

pub use agent::{Agent, AgentConfig, AgentRun};
pub use builder::AgentBuilder;
pub use router::NextStep;
pub use state::AgentState;
