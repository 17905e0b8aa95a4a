//! Demo seeding: populates the store with canned scenarios through the
//! public render/activity/sub-agent paths.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use a2ui_protocol::{
    now_millis, AccordionProps, AccordionSection, ActionButton, Activity, ActivityKind,
    AlertProps, ButtonGroupProps, CardProps, ChartData, ChartDataset, ChartKind, ChartProps,
    CodeLanguage, CodeProps, ComponentProps, FieldKind, FieldOption, FormField, FormProps,
    ListItem, ListProps, ListStyle, Location, ProgressProps, ProgressStep, RenderRequest, Status,
    SubAgent, TableProps, Variant,
};

use a2ui_store::actions::common;

use crate::service::{ApiError, AppState};

pub async fn seed(
    State(st): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let scenario = body
        .get("scenario")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match scenario.as_str() {
        "deployment" => deployment(&st).await,
        "form" => form(&st).await,
        "analytics" => analytics(&st).await,
        "all" => all_components(&st).await,
        _ => {
            return Err(ApiError::BadRequest(
                "unknown scenario; try: deployment, form, analytics, all".to_string(),
            ))
        }
    }

    Ok(Json(json!({ "success": true, "scenario": scenario })))
}

async fn deployment(st: &AppState) {
    st.store
        .render(RenderRequest::new(ComponentProps::Card(CardProps {
            title: Some("Production Deployment".into()),
            subtitle: Some("main branch".into()),
            content: Some("12 files changed, +728 additions, -39 deletions".into()),
            variant: Some(Variant::Warning),
            actions: Some(vec![
                ActionButton::new("Deploy Now", "deploy").with_variant(Variant::Success),
                ActionButton::new("Review", "review").with_variant(Variant::Secondary),
                ActionButton::new("Cancel", common::CANCEL).with_variant(Variant::Danger),
            ]),
            ..Default::default()
        })))
        .await;

    st.store
        .render(
            RenderRequest::new(ComponentProps::Progress(ProgressProps {
                title: Some("Build Pipeline".into()),
                current: Some(3.0),
                total: Some(5.0),
                variant: Some(Variant::Info),
                steps: Some(vec![
                    ProgressStep {
                        label: Some("Lint".into()),
                        completed: Some(true),
                    },
                    ProgressStep {
                        label: Some("Test".into()),
                        completed: Some(true),
                    },
                    ProgressStep {
                        label: Some("Build".into()),
                        completed: Some(false),
                    },
                ]),
                ..Default::default()
            }))
            .with_location(Location::Sidebar),
        )
        .await;

    st.store
        .add_activity(Activity {
            id: "deploy-pipeline".into(),
            kind: ActivityKind::Progress,
            status: Status::Active,
            title: "Deploying to production".into(),
            description: Some("waiting for approval".into()),
            progress: Some(60.0),
            timestamp: now_millis(),
            parent_id: None,
        })
        .await;
}

async fn form(st: &AppState) {
    st.store
        .render(
            RenderRequest::new(ComponentProps::Form(FormProps {
                title: Some("Deployment Settings".into()),
                fields: vec![
                    FormField {
                        label: Some("Branch".into()),
                        required: Some(true),
                        options: Some(vec![
                            FieldOption::Plain("main".into()),
                            FieldOption::Plain("develop".into()),
                            FieldOption::Plain("staging".into()),
                        ]),
                        ..FormField::new("branch", FieldKind::Select)
                    },
                    FormField {
                        label: Some("Notifications".into()),
                        options: Some(vec![
                            FieldOption::Plain("Slack".into()),
                            FieldOption::Plain("Email".into()),
                        ]),
                        ..FormField::new("notifications", FieldKind::Checkbox)
                    },
                    FormField {
                        label: Some("Deployment Notes".into()),
                        placeholder: Some("Any notes about this deployment...".into()),
                        rows: Some(3),
                        ..FormField::new("notes", FieldKind::Textarea)
                    },
                ],
                submit_label: Some("Deploy".into()),
                cancel_label: Some("Cancel".into()),
                ..Default::default()
            }))
            .with_id("demo-deploy-form"),
        )
        .await;
}

async fn analytics(st: &AppState) {
    st.store
        .render(
            RenderRequest::new(ComponentProps::Chart(ChartProps {
                title: Some("Token Usage".into()),
                kind: Some(ChartKind::Line),
                data: Some(ChartData {
                    labels: Some(vec![
                        "10:00".into(),
                        "10:30".into(),
                        "11:00".into(),
                        "11:30".into(),
                    ]),
                    datasets: Some(vec![ChartDataset {
                        label: Some("Tokens".into()),
                        data: vec![1200.0, 1900.0, 2800.0, 2500.0],
                        color: Some("#3b82f6".into()),
                        ..Default::default()
                    }]),
                }),
                height: Some(150),
                show_legend: Some(false),
                ..Default::default()
            }))
            .with_location(Location::Sidebar),
        )
        .await;

    st.store
        .render(RenderRequest::new(ComponentProps::Table(TableProps {
            title: Some("Tool Usage Statistics".into()),
            headers: Some(vec![
                "Tool".into(),
                "Calls".into(),
                "Success Rate".into(),
            ]),
            rows: vec![
                json!(["web_search", "15", "93%"]),
                json!(["exec", "12", "100%"]),
                json!(["read", "45", "100%"]),
            ],
            sortable: Some(true),
            striped: Some(true),
            ..Default::default()
        })))
        .await;

    let now = now_millis();
    st.store
        .add_sub_agent(SubAgent {
            id: "researcher".into(),
            label: "Researcher".into(),
            status: Status::Active,
            parent_id: None,
            created_at: now,
            completed_at: None,
            task: Some("gather deployment history".into()),
            children: Vec::new(),
        })
        .await;
    st.store
        .add_sub_agent(SubAgent {
            id: "summarizer".into(),
            label: "Summarizer".into(),
            status: Status::Pending,
            parent_id: Some("researcher".into()),
            created_at: now,
            completed_at: None,
            task: None,
            children: Vec::new(),
        })
        .await;
}

async fn all_components(st: &AppState) {
    st.store
        .render(
            RenderRequest::new(ComponentProps::Card(CardProps {
                title: Some("Card Component".into()),
                content: Some("A card with action buttons and variants.".into()),
                variant: Some(Variant::Info),
                actions: Some(vec![
                    ActionButton::new("Primary", "primary").with_variant(Variant::Primary),
                ]),
                ..Default::default()
            }))
            .with_id("demo-card"),
        )
        .await;

    st.store
        .render(
            RenderRequest::new(ComponentProps::ButtonGroup(ButtonGroupProps {
                title: Some("Button Group".into()),
                buttons: vec![
                    ActionButton::new("Approve", "approve").with_variant(Variant::Success),
                    ActionButton::new("Reject", "reject").with_variant(Variant::Danger),
                ],
                ..Default::default()
            }))
            .with_id("demo-buttons"),
        )
        .await;

    st.store
        .render(
            RenderRequest::new(ComponentProps::Form(FormProps {
                title: Some("Quick Form".into()),
                fields: vec![FormField {
                    label: Some("Email".into()),
                    required: Some(true),
                    ..FormField::new("email", FieldKind::Email)
                }],
                ..Default::default()
            }))
            .with_id("demo-form"),
        )
        .await;

    st.store
        .render(
            RenderRequest::new(ComponentProps::Table(TableProps {
                title: Some("Table".into()),
                headers: Some(vec!["Name".into(), "Value".into()]),
                rows: vec![json!(["uptime", "99.9%"])],
                ..Default::default()
            }))
            .with_id("demo-table"),
        )
        .await;

    st.store
        .render(
            RenderRequest::new(ComponentProps::Progress(ProgressProps {
                title: Some("Progress".into()),
                current: Some(7.0),
                total: Some(10.0),
                ..Default::default()
            }))
            .with_id("demo-progress"),
        )
        .await;

    st.store
        .render(
            RenderRequest::new(ComponentProps::List(ListProps {
                title: Some("Checklist".into()),
                items: vec![
                    ListItem {
                        text: Some("Write code".into()),
                        status: Some(Status::Completed),
                        ..Default::default()
                    },
                    ListItem {
                        text: Some("Ship it".into()),
                        status: Some(Status::Pending),
                        ..Default::default()
                    },
                ],
                variant: Some(ListStyle::Checklist),
                ..Default::default()
            }))
            .with_id("demo-list"),
        )
        .await;

    st.store
        .render(
            RenderRequest::new(ComponentProps::Chart(ChartProps {
                title: Some("Chart".into()),
                kind: Some(ChartKind::Bar),
                data: Some(ChartData {
                    labels: Some(vec!["a".into(), "b".into()]),
                    datasets: Some(vec![ChartDataset {
                        label: Some("series".into()),
                        data: vec![1.0, 2.0],
                        ..Default::default()
                    }]),
                }),
                ..Default::default()
            }))
            .with_id("demo-chart"),
        )
        .await;

    st.store
        .render(
            RenderRequest::new(ComponentProps::Accordion(AccordionProps {
                title: Some("Accordion".into()),
                sections: vec![AccordionSection {
                    title: Some("Details".into()),
                    content: Some("Collapsible content.".into()),
                    default_open: Some(true),
                    ..Default::default()
                }],
                ..Default::default()
            }))
            .with_id("demo-accordion"),
        )
        .await;

    st.store
        .render(
            RenderRequest::new(ComponentProps::Alert(AlertProps {
                message: Some("All systems nominal.".into()),
                variant: Some(Variant::Success),
                dismissible: Some(true),
                ..Default::default()
            }))
            .with_id("demo-alert"),
        )
        .await;

    st.store
        .render(
            RenderRequest::new(ComponentProps::Code(CodeProps {
                title: Some("Code".into()),
                code: Some("curl -X POST /v1/a2ui/demo -d '{\"scenario\":\"all\"}'".into()),
                language: Some(CodeLanguage::Bash),
                copyable: Some(true),
                ..Default::default()
            }))
            .with_id("demo-code"),
        )
        .await;
}
