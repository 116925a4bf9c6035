mod load;
mod record;

pub use load::load_session;
pub use record::{PrepareOptions, PreparedSession, SessionDuration, SessionRecord};
