//! Queue entry, agent dequeue, hold status, and recording consent.

use axum::extract::{Query, State};
use serde::Deserialize;
use std::sync::Arc;

use crate::routing::Department;
use crate::state::AppState;
use crate::twiml::{Dial, DialQueue, Enqueue, HttpMethod, TwimlDocument};

/// Query parameters selecting a department queue
#[derive(Debug, Deserialize)]
pub struct QueueQuery {
    queue: Option<String>,
}

impl QueueQuery {
    fn department(&self) -> Department {
        self.queue
            .as_deref()
            .map(Department::from_queue_name)
            .unwrap_or_default()
    }
}

/// GET /enqueue: place the caller in a department queue
///
/// The caller holds against `/wait` and receives a satisfaction text after
/// the call wraps up.
pub async fn enqueue_caller(Query(query): Query<QueueQuery>) -> TwimlDocument {
    let department = query.department();
    tracing::info!(queue = %department, "Enqueuing caller");

    TwimlDocument::new()
        .say("You are being enqueued now.")
        .enqueue(
            Enqueue::new(department.as_str())
                .wait_url("/wait")
                .wait_url_method(HttpMethod::Get),
        )
        .sms("Thanks for calling into today. How was your call?")
}

/// GET /dequeue: connect an agent to the next caller in a queue
///
/// The bridged leg is recorded and the queued caller hears the consent
/// notice as the bridge connects. When no caller is waiting the dial falls
/// through, so the pause plus self-redirect keeps the agent polling the
/// same queue.
pub async fn dequeue_caller(Query(query): Query<QueueQuery>) -> TwimlDocument {
    let department = query.department();
    tracing::info!(queue = %department, "Agent polling queue");

    TwimlDocument::new()
        .say("Looking for a caller")
        .dial(
            Dial::queue(DialQueue::new(department.as_str()).url("/record-consent")).record(true),
        )
        .pause(10)
        .redirect_with_method(format!("/dequeue?queue={department}"), HttpMethod::Get)
}

/// Hold-status parameters supplied by the queue on each wait-URL fetch
#[derive(Debug, Deserialize)]
pub struct WaitQuery {
    #[serde(rename = "QueuePosition")]
    queue_position: Option<String>,
    #[serde(rename = "QueueTime")]
    queue_time: Option<String>,
    #[serde(rename = "AverageQueueTime")]
    average_queue_time: Option<String>,
}

/// GET /wait: announce queue position and wait times, then hold music
///
/// The values are platform-supplied opaque strings; missing ones read as
/// blanks rather than failing the hold loop.
pub async fn wait_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WaitQuery>,
) -> TwimlDocument {
    let position = query.queue_position.unwrap_or_default();
    let elapsed = query.queue_time.unwrap_or_default();
    let average = query.average_queue_time.unwrap_or_default();

    TwimlDocument::new()
        .say(format!("You are number {position} in line."))
        .say(format!("You've been in line for {elapsed} seconds."))
        .say(format!("Average wait time is {average} seconds."))
        .play(state.config.hold_music_url.as_str())
}

/// /record-consent: played to a queued caller as the bridge connects
///
/// Answers GET and POST. The `<Queue>` url is fetched with the
/// platform's POST default.
pub async fn record_consent() -> TwimlDocument {
    TwimlDocument::new().say("This call may be recorded for quality purposes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(queue: Option<&str>) -> QueueQuery {
        QueueQuery {
            queue: queue.map(str::to_string),
        }
    }

    #[test]
    fn test_department_defaults_to_support() {
        assert_eq!(query(None).department(), Department::Support);
        assert_eq!(query(Some("")).department(), Department::Support);
        assert_eq!(query(Some("billing")).department(), Department::Support);
    }

    #[test]
    fn test_department_parses_known_queues() {
        assert_eq!(query(Some("sales")).department(), Department::Sales);
        assert_eq!(query(Some("Marketing")).department(), Department::Marketing);
    }

    #[tokio::test]
    async fn test_dequeue_pairs_dial_with_retry_redirect() {
        let xml = dequeue_caller(Query(query(Some("sales")))).await.to_xml();
        assert!(xml.contains("<Dial record=\"record-from-answer\">"));
        assert!(xml.contains("<Queue url=\"/record-consent\">sales</Queue>"));
        assert!(xml.contains("<Pause length=\"10\"/>"));
        assert!(xml.contains("<Redirect method=\"GET\">/dequeue?queue=sales</Redirect>"));
    }
}
