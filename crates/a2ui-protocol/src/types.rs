//! Core types for A2UI components, actions, activities, and sub-agents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The closed set of renderable component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Card,
    ButtonGroup,
    Form,
    Table,
    Progress,
    List,
    Chart,
    Accordion,
    Alert,
    Code,
}

impl ComponentKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Card => "Card",
            ComponentKind::ButtonGroup => "ButtonGroup",
            ComponentKind::Form => "Form",
            ComponentKind::Table => "Table",
            ComponentKind::Progress => "Progress",
            ComponentKind::List => "List",
            ComponentKind::Chart => "Chart",
            ComponentKind::Accordion => "Accordion",
            ComponentKind::Alert => "Alert",
            ComponentKind::Code => "Code",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual variant shared by several component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Success,
    Warning,
    Error,
    Info,
    Primary,
    Secondary,
    Danger,
}

/// Logical placement zone for a rendered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Chat,
    Sidebar,
    Floating,
}

impl Location {
    /// Parse a wire location name; `None` for anything outside the known set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "chat" => Some(Location::Chat),
            "sidebar" => Some(Location::Sidebar),
            "floating" => Some(Location::Floating),
            _ => None,
        }
    }
}

/// Position hint inside a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionKeyword {
    Top,
    Bottom,
    Inline,
    Replace,
}

/// Position: either a keyword slot or explicit coordinates (floating overlays).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Keyword(PositionKeyword),
    Coords { x: String, y: String },
}

impl Default for Position {
    fn default() -> Self {
        Position::Keyword(PositionKeyword::Inline)
    }
}

/// Status shared by activities, list items, and sub-agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Completed,
    Failed,
    Pending,
}

/// A clickable action button rendered inside a component.
///
/// `label` and `action` are required; the validation layer enforces their
/// presence so that all problems in a payload can be reported together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ActionButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl ActionButton {
    /// Create a button with the two required fields set.
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            action: Some(action.into()),
            ..Default::default()
        }
    }

    /// Set the visual variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }
}

// ============================================================================
// Per-kind props
// ============================================================================

/// Card props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CardProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionButton>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    #[serde(rename = "defaultCollapsed", skip_serializing_if = "Option::is_none")]
    pub default_collapsed: Option<bool>,
}

/// Button group layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupLayout {
    Horizontal,
    Vertical,
}

/// Button group props. `buttons` must be non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ButtonGroupProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub buttons: Vec<ActionButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<GroupLayout>,
    #[serde(rename = "fullWidth", skip_serializing_if = "Option::is_none")]
    pub full_width: Option<bool>,
}

/// Form field input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Number,
    Date,
    Password,
    Email,
    Url,
    Hidden,
}

impl FieldKind {
    /// Kinds whose rendering requires an `options` list.
    pub fn requires_options(&self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Checkbox | FieldKind::Radio)
    }
}

/// A selectable option: either a bare value or a labeled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOption {
    Plain(String),
    Labeled { label: String, value: String },
}

impl FieldOption {
    /// The submitted value for this option.
    pub fn value(&self) -> &str {
        match self {
            FieldOption::Plain(v) => v,
            FieldOption::Labeled { value, .. } => value,
        }
    }
}

/// Caller-supplied pattern rule for a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FieldRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One field of a form component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldRule>,
    #[serde(rename = "showIf", skip_serializing_if = "Option::is_none")]
    pub show_if: Option<Value>,
}

impl FormField {
    /// Create a field with the two required pieces set.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(kind),
            ..Default::default()
        }
    }
}

/// Form props. `fields` must be non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(rename = "submitLabel", skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
    #[serde(rename = "cancelLabel", skip_serializing_if = "Option::is_none")]
    pub cancel_label: Option<String>,
    #[serde(rename = "showCancel", skip_serializing_if = "Option::is_none")]
    pub show_cancel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Column alignment for tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

/// Column width: pixels or a CSS length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnWidth {
    Px(f64),
    Css(String),
}

/// Table column descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableColumn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<ColumnWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<ColumnAlign>,
}

/// Table props. Rows stay opaque (cell arrays or keyed objects); either
/// `headers` or `columns` must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<TableColumn>>,
    #[serde(default)]
    pub rows: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<bool>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionButton>>,
    #[serde(rename = "emptyMessage", skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub striped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact: Option<bool>,
}

/// A labeled step of a stepped progress bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProgressStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Progress props. `current` and `total` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProgressProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(rename = "showPercentage", skip_serializing_if = "Option::is_none")]
    pub show_percentage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<ProgressStep>>,
}

/// List rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Simple,
    Checklist,
    Timeline,
    Tree,
}

/// One list entry, optionally nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ListItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionButton>>,
}

/// List props. `items` must be non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub items: Vec<ListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<ListStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
}

/// Chart families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Doughnut,
    Area,
    Radar,
}

/// One chart dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartDataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "backgroundColor", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(rename = "borderColor", skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

/// Chart data: labels plus one or more datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Vec<ChartDataset>>,
}

/// Chart props. `type` and `data` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ChartData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(rename = "showLegend", skip_serializing_if = "Option::is_none")]
    pub show_legend: Option<bool>,
    #[serde(rename = "showGrid", skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// One accordion section. `title` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AccordionSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "defaultOpen", skip_serializing_if = "Option::is_none")]
    pub default_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Accordion props. `sections` must be non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AccordionProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub sections: Vec<AccordionSection>,
    #[serde(rename = "allowMultiple", skip_serializing_if = "Option::is_none")]
    pub allow_multiple: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
}

/// Alert props. `message` and `variant` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AlertProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionButton>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "autoHide", skip_serializing_if = "Option::is_none")]
    pub auto_hide: Option<f64>,
}

/// Syntax highlighting languages for code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    Typescript,
    Javascript,
    Python,
    Bash,
    Json,
    Yaml,
    Html,
    Css,
    Sql,
    Markdown,
    Plaintext,
}

/// Code props. `code` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CodeProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<CodeLanguage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runnable: Option<bool>,
    #[serde(rename = "lineNumbers", skip_serializing_if = "Option::is_none")]
    pub line_numbers: Option<bool>,
    #[serde(rename = "highlightLines", skip_serializing_if = "Option::is_none")]
    pub highlight_lines: Option<Vec<u32>>,
    #[serde(rename = "maxHeight", skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionButton>>,
}

// ============================================================================
// Props union
// ============================================================================

/// The component payload as it travels on the wire:
/// `{"component": "<kind>", "props": {…}}`.
///
/// One variant per kind; an unknown kind fails deserialization at the
/// boundary, so the store never sees one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component", content = "props")]
pub enum ComponentProps {
    Card(CardProps),
    ButtonGroup(ButtonGroupProps),
    Form(FormProps),
    Table(TableProps),
    Progress(ProgressProps),
    List(ListProps),
    Chart(ChartProps),
    Accordion(AccordionProps),
    Alert(AlertProps),
    Code(CodeProps),
}

impl ComponentProps {
    /// The kind tag of the active variant.
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentProps::Card(_) => ComponentKind::Card,
            ComponentProps::ButtonGroup(_) => ComponentKind::ButtonGroup,
            ComponentProps::Form(_) => ComponentKind::Form,
            ComponentProps::Table(_) => ComponentKind::Table,
            ComponentProps::Progress(_) => ComponentKind::Progress,
            ComponentProps::List(_) => ComponentKind::List,
            ComponentProps::Chart(_) => ComponentKind::Chart,
            ComponentProps::Accordion(_) => ComponentKind::Accordion,
            ComponentProps::Alert(_) => ComponentKind::Alert,
            ComponentProps::Code(_) => ComponentKind::Code,
        }
    }
}

// ============================================================================
// Requests and store state
// ============================================================================

/// Render request from the agent side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Explicit component ID; generated from the kind when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub props: ComponentProps,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Time-to-live in milliseconds; the store default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

impl RenderRequest {
    /// Create a request with just the props payload.
    pub fn new(props: ComponentProps) -> Self {
        Self {
            id: None,
            props,
            location: None,
            position: None,
            ttl: None,
        }
    }

    /// Set an explicit component ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the rendering location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the time-to-live in milliseconds.
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// A component snapshot as held by the store and sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentState {
    pub id: String,
    #[serde(flatten)]
    pub props: ComponentProps,
    pub location: Location,
    pub position: Position,
    /// Render timestamp in milliseconds since epoch.
    pub timestamp: u64,
    #[serde(rename = "expiresAt")]
    pub expires_at: u64,
    #[serde(rename = "createdAt")]
    pub created_at: u64,
    #[serde(rename = "updatedAt")]
    pub updated_at: u64,
    /// Starts at 1 and increments by exactly 1 per mutation of this ID.
    pub version: u64,
}

// ============================================================================
// Actions
// ============================================================================

/// Discriminator for user-originated action events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    #[default]
    Action,
    Submit,
    Dismiss,
    Change,
}

impl ActionKind {
    /// Parse a wire kind; `None` for anything outside the known set.
    /// Callers at the boundary fall back to [`ActionKind::Action`].
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "action" => Some(ActionKind::Action),
            "submit" => Some(ActionKind::Submit),
            "dismiss" => Some(ActionKind::Dismiss),
            "change" => Some(ActionKind::Change),
            _ => None,
        }
    }
}

/// A user interaction with a rendered component.
///
/// `component_id` is a non-owning reference and may point at a component
/// that has already been removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    #[serde(rename = "type", default)]
    pub kind: ActionKind,
    #[serde(rename = "componentId")]
    pub component_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, Value>>,
    pub timestamp: u64,
}

impl ActionEvent {
    /// Create a named action against a component, stamped now.
    pub fn named(component_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Action,
            component_id: component_id.into(),
            action: Some(action.into()),
            data: None,
            timestamp: now_millis(),
        }
    }
}

// ============================================================================
// Activities and sub-agents
// ============================================================================

/// Kind tag for activity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ToolCall,
    Thinking,
    Progress,
    Status,
    Component,
}

/// A progress/status record for sidebar display, independent of components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub status: Status,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Percent complete, 0–100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Partial patch applied to a stored activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ActivityPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

/// A hierarchical status node for delegated agent work.
///
/// Stored flat; the forest is derived on read from `parent_id` links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAgent {
    pub id: String,
    pub label: String,
    pub status: Status,
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: u64,
    #[serde(rename = "completedAt", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SubAgent>,
}

/// Partial patch applied to a stored sub-agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SubAgentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "completedAt", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

// ============================================================================
// Helpers
// ============================================================================

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Generate a component ID as `<lowercased-kind>-<suffix>`, where the suffix
/// is the tail of a UUIDv7.
pub fn component_id(kind: ComponentKind) -> String {
    let uuid = uuid::Uuid::now_v7().simple().to_string();
    let suffix = &uuid[uuid.len() - 12..];
    format!("{}-{}", kind.as_str().to_ascii_lowercase(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_request_wire_shape_round_trips() {
        let raw = json!({
            "component": "Card",
            "props": { "title": "X", "variant": "success" },
            "location": "sidebar",
            "ttl": 5000
        });
        let req: RenderRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(req.props.kind(), ComponentKind::Card);
        assert_eq!(req.location, Some(Location::Sidebar));
        assert_eq!(req.ttl, Some(5000));

        let back = serde_json::to_value(&req).unwrap();
        assert_eq!(back["component"], "Card");
        assert_eq!(back["props"]["title"], "X");
        assert_eq!(back["props"]["variant"], "success");
    }

    #[test]
    fn unknown_component_kind_is_rejected() {
        let raw = json!({ "component": "Gauge", "props": {} });
        assert!(serde_json::from_value::<RenderRequest>(raw).is_err());
    }

    #[test]
    fn unknown_location_is_rejected() {
        let raw = json!({ "component": "Card", "props": {}, "location": "modal" });
        assert!(serde_json::from_value::<RenderRequest>(raw).is_err());
    }

    #[test]
    fn position_accepts_keywords_and_coords() {
        let kw: Position = serde_json::from_value(json!("top")).unwrap();
        assert_eq!(kw, Position::Keyword(PositionKeyword::Top));

        let xy: Position = serde_json::from_value(json!({ "x": "10px", "y": "20px" })).unwrap();
        assert!(matches!(xy, Position::Coords { .. }));
    }

    #[test]
    fn field_option_accepts_both_shapes() {
        let plain: FieldOption = serde_json::from_value(json!("main")).unwrap();
        assert_eq!(plain.value(), "main");

        let labeled: FieldOption =
            serde_json::from_value(json!({ "label": "Main", "value": "main" })).unwrap();
        assert_eq!(labeled.value(), "main");
    }

    #[test]
    fn action_kind_parses_lossy() {
        assert_eq!(ActionKind::parse("submit"), Some(ActionKind::Submit));
        assert_eq!(ActionKind::parse("bogus"), None);
    }

    #[test]
    fn component_id_uses_lowercased_kind_prefix() {
        let id = component_id(ComponentKind::ButtonGroup);
        assert!(id.starts_with("buttongroup-"), "unexpected id: {id}");
        assert_ne!(component_id(ComponentKind::Card), component_id(ComponentKind::Card));
    }

    #[test]
    fn action_event_wire_names() {
        let event = ActionEvent {
            kind: ActionKind::Submit,
            component_id: "form-1".into(),
            action: Some("deploy".into()),
            data: None,
            timestamp: 42,
        };
        let v = serde_json::to_value(&event).unwrap();
        assert_eq!(v["type"], "submit");
        assert_eq!(v["componentId"], "form-1");
        assert_eq!(v["timestamp"], 42);
    }
}
