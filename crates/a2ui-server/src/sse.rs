//! Server-sent event stream of store events.
//!
//! On connect: an immediate heartbeat, then a snapshot of all live
//! components and the current activity list, then every store event
//! verbatim, with a heartbeat every 30 seconds to keep intermediaries from
//! closing the connection. The broadcast subscription and the heartbeat
//! interval both live inside the body stream, so a client disconnect drops
//! them together.

use std::convert::Infallible;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::Stream;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use a2ui_protocol::{now_millis, ActivitySnapshot, EventPayload, StoreEvent};

use crate::service::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

pub async fn events(State(st): State<AppState>) -> Response {
    // Subscribe before snapshotting so nothing emitted in between is lost;
    // a duplicated render frame is harmless, a missed one is not.
    let mut rx = st.store.subscribe();
    let components = st.store.get_all().await;
    let activities = st.store.get_activities().await;

    let stream = async_stream::stream! {
        if let Some(chunk) = frame(&StoreEvent::heartbeat()) {
            yield Ok::<Bytes, Infallible>(chunk);
        }
        for component in components {
            if let Some(chunk) = frame(&StoreEvent::now(EventPayload::ComponentRender(component))) {
                yield Ok(chunk);
            }
        }
        if !activities.is_empty() {
            let snapshot = ActivitySnapshot {
                activities,
                timestamp: now_millis(),
            };
            if let Some(chunk) = frame(&StoreEvent::now(EventPayload::ActivityUpdate(snapshot))) {
                yield Ok(chunk);
            }
        }

        let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
        // The first tick of an interval fires immediately; the connect
        // heartbeat already went out above.
        heartbeat.tick().await;

        loop {
            tokio::select! {
                _ = heartbeat.tick() => {
                    if let Some(chunk) = frame(&StoreEvent::heartbeat()) {
                        yield Ok(chunk);
                    }
                }
                event = rx.recv() => match event {
                    Ok(event) => {
                        if let Some(chunk) = frame(&event) {
                            yield Ok(chunk);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event stream subscriber lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    };

    sse_response(stream)
}

fn frame(event: &StoreEvent) -> Option<Bytes> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Bytes::from(format!("data: {json}\n\n"))),
        Err(err) => {
            warn!(error = %err, "failed to serialize stream event");
            None
        }
    }
}

pub fn sse_response<S>(stream: S) -> Response
where
    S: Stream<Item = Result<Bytes, Infallible>> + Send + 'static,
{
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/event-stream"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    (headers, Body::from_stream(stream)).into_response()
}
