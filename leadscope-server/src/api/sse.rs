//! Progress Stream API Handler
//!
//! Server-sent events feed mirroring the job queue's broadcast channel.
//! Every subscriber gets a `connected` event first, then job lifecycle
//! events interleaved with periodic heartbeats. Events are data-only JSON
//! payloads discriminated by a `type` field. Dropping the connection
//! drops the broadcast receiver, which unsubscribes it from the queue.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tokio_stream::wrappers::{BroadcastStream, IntervalStream};

use leadscope_core::domain::job::{JobEvent, ResearchProgress};

use crate::api::AppState;
use crate::queue::JobQueue;

/// One event on the progress stream
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    Connected { timestamp: String },
    Queued { data: ResearchProgress },
    Progress { data: ResearchProgress },
    Completed { data: ResearchProgress },
    Failed { data: ResearchProgress },
    Heartbeat { timestamp: String },
}

impl From<JobEvent> for StreamEvent {
    fn from(event: JobEvent) -> Self {
        match event {
            JobEvent::Queued { data } => StreamEvent::Queued { data },
            JobEvent::Progress { data } => StreamEvent::Progress { data },
            JobEvent::Completed { data } => StreamEvent::Completed { data },
            JobEvent::Failed { data } => StreamEvent::Failed { data },
        }
    }
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// One `connected` event, then queue events merged with heartbeats
///
/// Subscribes to the queue immediately, so no event published after the
/// call can be missed.
fn event_stream(
    queue: Arc<JobQueue>,
    heartbeat_interval: Duration,
) -> impl Stream<Item = StreamEvent> {
    let receiver = queue.subscribe();

    let connected = stream::once(async {
        StreamEvent::Connected {
            timestamp: timestamp(),
        }
    });

    // Lagged subscribers skip missed events instead of erroring out
    let jobs = BroadcastStream::new(receiver)
        .filter_map(|event| async move { event.ok().map(StreamEvent::from) });

    let first_beat = tokio::time::Instant::now() + heartbeat_interval;
    let heartbeats = IntervalStream::new(tokio::time::interval_at(first_beat, heartbeat_interval))
        .map(|_| StreamEvent::Heartbeat {
            timestamp: timestamp(),
        });

    connected.chain(stream::select(jobs, heartbeats))
}

/// GET /api/progress-stream
/// Subscribe to the live job progress feed
pub async fn progress_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    tracing::debug!("Progress stream subscriber connected");

    let events = event_stream(Arc::clone(&state.queue), state.heartbeat_interval)
        .map(|event| Event::default().json_data(&event));

    Sse::new(events)
}
