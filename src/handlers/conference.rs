//! Supervisor conference bridge.

use crate::twiml::{Dial, TwimlDocument};

/// Conference room live calls are escalated into
pub const SUPERVISOR_CONFERENCE: &str = "boss";

/// /boss: drop the caller into the supervisor conference
///
/// Answers GET and POST. Live-call redirects instruct the platform to
/// fetch the new markup with POST.
pub async fn boss_conference() -> TwimlDocument {
    TwimlDocument::new().dial(Dial::conference(SUPERVISOR_CONFERENCE))
}
