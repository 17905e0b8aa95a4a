//! Wire types, store events, and validation for the A2UI component protocol.
#![allow(missing_docs)]

pub mod events;
pub mod types;
pub mod validation;

pub use events::{ActivitySnapshot, EventPayload, StoreEvent};
pub use types::{
    component_id, now_millis, AccordionProps, AccordionSection, ActionButton, ActionEvent,
    ActionKind, Activity, ActivityKind, ActivityPatch, AlertProps, ButtonGroupProps, CardProps,
    ChartData, ChartDataset, ChartKind, ChartProps, CodeLanguage, CodeProps, ColumnAlign,
    ColumnWidth, ComponentKind, ComponentProps, ComponentState, FieldKind, FieldOption,
    FieldRule, FormField, FormProps, GroupLayout, ListItem, ListProps, ListStyle, Location,
    Position, PositionKeyword, ProgressProps, ProgressStep, RenderRequest, Status, SubAgent,
    SubAgentPatch, TableColumn, TableProps, Variant,
};
pub use validation::{validate_form_data, validate_props, ValidationError, ValidationReport};
