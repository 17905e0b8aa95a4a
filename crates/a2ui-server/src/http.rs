//! HTTP routes translating requests into store operations.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use a2ui_protocol::{
    now_millis, validate_form_data, validate_props, ActionEvent, ActionKind, Activity,
    ActivityPatch, ComponentProps, Location, RenderRequest, SubAgent, SubAgentPatch,
};

use crate::service::{ApiError, AppState};

/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";
/// Component render/query/remove endpoint path.
pub const RENDER_PATH: &str = "/v1/a2ui/render";
/// Action submit/poll endpoint path.
pub const ACTION_PATH: &str = "/v1/a2ui/action";
/// Activity CRUD endpoint path.
pub const ACTIVITIES_PATH: &str = "/v1/a2ui/activities";
/// Sub-agent upsert/patch endpoint path.
pub const SUB_AGENTS_PATH: &str = "/v1/a2ui/sub-agents";
/// SSE event stream endpoint path.
pub const EVENTS_PATH: &str = "/v1/a2ui/events";
/// Demo seeding endpoint path.
pub const DEMO_PATH: &str = "/v1/a2ui/demo";

/// Build health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route(HEALTH_PATH, get(health))
}

/// Build the A2UI API routes.
pub fn a2ui_routes() -> Router<AppState> {
    Router::new()
        .route(
            RENDER_PATH,
            post(render).get(get_components).delete(remove_component),
        )
        .route(ACTION_PATH, post(submit_action).get(poll_actions))
        .route(
            ACTIVITIES_PATH,
            get(list_activities)
                .post(add_activities)
                .patch(patch_activity)
                .delete(clear_activities),
        )
        .route(
            SUB_AGENTS_PATH,
            post(upsert_sub_agent).patch(patch_sub_agent),
        )
        .route(EVENTS_PATH, get(crate::sse::events))
        .route(DEMO_PATH, post(crate::demo::seed))
}

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(a2ui_routes())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

// ============================================================================
// Components
// ============================================================================

async fn render(
    State(st): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let request: RenderRequest =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let report = validate_props(&request.props);
    if !report.valid {
        return Err(ApiError::Validation(report));
    }

    let component = st.store.render(request).await;
    Ok(Json(json!({
        "success": true,
        "rendered": true,
        "data": component,
    })))
}

#[derive(Debug, Deserialize)]
struct ComponentQuery {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

async fn get_components(
    State(st): State<AppState>,
    Query(params): Query<ComponentQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(id) = params.id {
        let Some(component) = st.store.get(&id).await else {
            return Err(ApiError::ComponentNotFound(id));
        };
        return Ok(Json(json!({ "success": true, "data": component })));
    }

    // An unknown location string falls through to the unfiltered listing.
    let components = match params.location.as_deref().and_then(Location::parse) {
        Some(location) => st.store.get_by_location(location).await,
        None => st.store.get_all().await,
    };
    let count = components.len();
    Ok(Json(json!({
        "success": true,
        "data": { "components": components, "count": count },
    })))
}

async fn remove_component(
    State(st): State<AppState>,
    Query(params): Query<ComponentQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = params.id.filter(|id| !id.is_empty()) else {
        return Err(ApiError::MissingId("Component id is required"));
    };
    if !st.store.remove(&id).await {
        return Err(ApiError::ComponentNotFound(id));
    }
    Ok(Json(json!({
        "success": true,
        "data": { "id": id, "removed": true },
    })))
}

// ============================================================================
// Actions
// ============================================================================

async fn submit_action(
    State(st): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(object) = body.as_object() else {
        return Err(ApiError::BadRequest(
            "request body must be an object".to_string(),
        ));
    };

    let Some(component_id) = object
        .get("componentId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
    else {
        return Err(ApiError::BadRequest(
            "componentId is required and must be a string".to_string(),
        ));
    };

    // An unrecognized type degrades to a plain action instead of rejecting.
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(ActionKind::parse)
        .unwrap_or_default();

    let event = ActionEvent {
        kind,
        component_id: component_id.to_string(),
        action: object
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_string),
        data: object.get("data").and_then(Value::as_object).cloned(),
        timestamp: now_millis(),
    };

    // Form submissions against a live form are checked against its fields.
    // A dangling component ID still enqueues: there is nothing to check.
    if event.kind == ActionKind::Submit {
        if let Some(component) = st.store.get(&event.component_id).await {
            if let ComponentProps::Form(form) = &component.props {
                let empty = serde_json::Map::new();
                let data = event.data.as_ref().unwrap_or(&empty);
                let report = validate_form_data(&form.fields, data);
                if !report.valid {
                    return Err(ApiError::Validation(report));
                }
            }
        }
    }

    st.store.queue_action(event.clone()).await;
    st.actions.dispatch(&event).await;

    Ok(Json(json!({
        "success": true,
        "acknowledged": true,
        "data": event,
    })))
}

fn default_poll_count() -> usize {
    10
}

#[derive(Debug, Deserialize)]
struct ActionPollQuery {
    #[serde(default = "default_poll_count")]
    count: usize,
    #[serde(default)]
    consume: bool,
}

async fn poll_actions(
    State(st): State<AppState>,
    Query(params): Query<ActionPollQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if params.consume {
        let mut actions = Vec::new();
        for _ in 0..params.count {
            match st.store.dequeue_action().await {
                Some(action) => actions.push(action),
                None => break,
            }
        }
        let remaining = st.store.action_count().await;
        let count = actions.len();
        return Ok(Json(json!({
            "success": true,
            "data": { "actions": actions, "count": count, "remaining": remaining },
        })));
    }

    let actions = st.store.peek_actions(params.count).await;
    let total = st.store.action_count().await;
    let count = actions.len();
    Ok(Json(json!({
        "success": true,
        "data": { "actions": actions, "count": count, "total": total },
    })))
}

// ============================================================================
// Activities
// ============================================================================

async fn list_activities(State(st): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let activities = st.store.get_activities().await;
    let sub_agents = st.store.sub_agent_tree().await;
    let stats = st.store.stats().await;
    Ok(Json(json!({
        "success": true,
        "data": { "activities": activities, "subAgents": sub_agents, "stats": stats },
    })))
}

fn parse_activity(value: &Value) -> Result<Activity, String> {
    let mut activity: Activity =
        serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
    if activity.timestamp == 0 {
        activity.timestamp = now_millis();
    }
    Ok(activity)
}

async fn add_activities(
    State(st): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    // Batch mode reports per-item outcomes without failing the whole batch.
    if let Some(batch) = body.get("activities").and_then(Value::as_array) {
        let mut results = Vec::with_capacity(batch.len());
        for item in batch {
            match parse_activity(item) {
                Ok(activity) => {
                    let id = activity.id.clone();
                    st.store.add_activity(activity).await;
                    results.push(json!({ "success": true, "id": id }));
                }
                Err(error) => {
                    let id = item
                        .get("id")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown");
                    results.push(json!({ "success": false, "id": id, "error": error }));
                }
            }
        }
        let succeeded = results
            .iter()
            .filter(|r| r["success"] == Value::Bool(true))
            .count();
        let all_ok = succeeded == results.len();
        return Ok(Json(json!({
            "success": all_ok,
            "data": { "results": results, "count": succeeded },
        })));
    }

    let activity = parse_activity(&body).map_err(ApiError::BadRequest)?;
    st.store.add_activity(activity.clone()).await;
    Ok(Json(json!({ "success": true, "data": activity })))
}

async fn patch_activity(
    State(st): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = body.get("id").and_then(Value::as_str).filter(|id| !id.is_empty()) else {
        return Err(ApiError::MissingId("Activity id is required"));
    };

    // Field-lenient: mistyped patch fields are ignored rather than rejected,
    // and a missing ID is a silent no-op.
    let patch = ActivityPatch {
        status: body
            .get("status")
            .and_then(|v| serde_json::from_value(v.clone()).ok()),
        title: body.get("title").and_then(Value::as_str).map(str::to_string),
        description: body
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        progress: body.get("progress").and_then(Value::as_f64),
    };
    st.store.update_activity(id, &patch).await;

    Ok(Json(json!({
        "success": true,
        "data": { "id": id, "updated": true },
    })))
}

async fn clear_activities(State(st): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    st.store.clear_activities().await;
    Ok(Json(json!({
        "success": true,
        "data": { "cleared": true },
    })))
}

// ============================================================================
// Sub-agents
// ============================================================================

async fn upsert_sub_agent(
    State(st): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let agent: SubAgent =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let stored = st.store.add_sub_agent(agent).await;
    Ok(Json(json!({ "success": true, "data": stored })))
}

async fn patch_sub_agent(
    State(st): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = body.get("id").and_then(Value::as_str).filter(|id| !id.is_empty()) else {
        return Err(ApiError::MissingId("Sub-agent id is required"));
    };

    let patch = SubAgentPatch {
        label: body.get("label").and_then(Value::as_str).map(str::to_string),
        status: body
            .get("status")
            .and_then(|v| serde_json::from_value(v.clone()).ok()),
        completed_at: body.get("completedAt").and_then(Value::as_u64),
        task: body.get("task").and_then(Value::as_str).map(str::to_string),
    };
    st.store.update_sub_agent(id, &patch).await;

    Ok(Json(json!({
        "success": true,
        "data": { "id": id, "updated": true },
    })))
}
