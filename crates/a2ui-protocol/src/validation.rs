//! Semantic validation of component props and submitted form data.
//!
//! The props sum type already rejects shape errors (wrong scalar types,
//! out-of-set enum values) at deserialization. What remains here are the
//! rules the type system does not express: required-field presence,
//! non-empty required arrays, structural alternatives, and numeric bounds.
//! Errors accumulate; nothing short-circuits and nothing panics.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::types::{
    AccordionProps, ActionButton, AlertProps, ButtonGroupProps, CardProps, ChartProps, CodeProps,
    ComponentProps, FieldKind, FormField, FormProps, ListProps, ProgressProps, TableProps,
};

/// One validation problem: field path, human message, machine code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }

    fn required(field: &str) -> Self {
        Self::new(field, format!("{field} is required"), "REQUIRED")
    }

    fn required_array(field: &str) -> Self {
        Self::new(
            field,
            format!("{field} is required and must be a non-empty array"),
            "REQUIRED",
        )
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Build a report from collected errors; valid iff none.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

// ============================================================================
// Component props validation
// ============================================================================

/// Validate a component payload against the rules of its kind.
pub fn validate_props(props: &ComponentProps) -> ValidationReport {
    let errors = match props {
        ComponentProps::Card(p) => card_errors(p),
        ComponentProps::ButtonGroup(p) => button_group_errors(p),
        ComponentProps::Form(p) => form_errors(p),
        ComponentProps::Table(p) => table_errors(p),
        ComponentProps::Progress(p) => progress_errors(p),
        ComponentProps::List(p) => list_errors(p),
        ComponentProps::Chart(p) => chart_errors(p),
        ComponentProps::Accordion(p) => accordion_errors(p),
        ComponentProps::Alert(p) => alert_errors(p),
        ComponentProps::Code(p) => code_errors(p),
    };
    ValidationReport::from_errors(errors)
}

fn button_errors(buttons: &[ActionButton], field: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, button) in buttons.iter().enumerate() {
        if is_blank(&button.label) {
            errors.push(ValidationError::required(&format!("{field}[{index}].label")));
        }
        if is_blank(&button.action) {
            errors.push(ValidationError::required(&format!("{field}[{index}].action")));
        }
    }
    errors
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.is_empty())
}

fn card_errors(p: &CardProps) -> Vec<ValidationError> {
    p.actions
        .as_deref()
        .map(|actions| button_errors(actions, "actions"))
        .unwrap_or_default()
}

fn button_group_errors(p: &ButtonGroupProps) -> Vec<ValidationError> {
    if p.buttons.is_empty() {
        return vec![ValidationError::required_array("buttons")];
    }
    button_errors(&p.buttons, "buttons")
}

fn form_field_errors(field: &FormField, index: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let prefix = format!("fields[{index}]");

    if is_blank(&field.name) {
        errors.push(ValidationError::required(&format!("{prefix}.name")));
    }
    match field.kind {
        None => errors.push(ValidationError::new(
            format!("{prefix}.type"),
            "type must be one of: text, textarea, select, checkbox, radio, number, date, \
             password, email, url, hidden",
            "INVALID_FIELD_TYPE",
        )),
        Some(kind) if kind.requires_options() && field.options.is_none() => {
            errors.push(ValidationError::new(
                format!("{prefix}.options"),
                "options is required for select, checkbox, and radio fields",
                "REQUIRED",
            ));
        }
        Some(_) => {}
    }
    errors
}

fn form_errors(p: &FormProps) -> Vec<ValidationError> {
    if p.fields.is_empty() {
        return vec![ValidationError::required_array("fields")];
    }
    p.fields
        .iter()
        .enumerate()
        .flat_map(|(index, field)| form_field_errors(field, index))
        .collect()
}

fn table_errors(p: &TableProps) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if p.rows.is_empty() {
        errors.push(ValidationError::required_array("rows"));
    }
    if p.headers.is_none() && p.columns.is_none() {
        errors.push(ValidationError::new(
            "headers",
            "Either headers or columns is required",
            "REQUIRED",
        ));
    }
    errors
}

fn number_errors(
    value: Option<f64>,
    field: &str,
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    match value {
        None if required => errors.push(ValidationError::required(field)),
        None => {}
        Some(v) => {
            if let Some(min) = min {
                if v < min {
                    errors.push(ValidationError::new(
                        field,
                        format!("{field} must be at least {min}"),
                        "MIN_VALUE",
                    ));
                }
            }
            if let Some(max) = max {
                if v > max {
                    errors.push(ValidationError::new(
                        field,
                        format!("{field} must be at most {max}"),
                        "MAX_VALUE",
                    ));
                }
            }
        }
    }
    errors
}

fn progress_errors(p: &ProgressProps) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(number_errors(p.current, "current", true, Some(0.0), None));
    errors.extend(number_errors(p.total, "total", true, Some(1.0), None));
    errors.extend(number_errors(
        p.percentage,
        "percentage",
        false,
        Some(0.0),
        Some(100.0),
    ));
    errors
}

fn list_errors(p: &ListProps) -> Vec<ValidationError> {
    if p.items.is_empty() {
        return vec![ValidationError::required_array("items")];
    }
    Vec::new()
}

fn chart_errors(p: &ChartProps) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if p.kind.is_none() {
        errors.push(ValidationError::new(
            "type",
            "type must be one of: line, bar, pie, doughnut, area, radar",
            "INVALID_CHART_TYPE",
        ));
    }
    match &p.data {
        None => errors.push(ValidationError::new("data", "data is required", "REQUIRED")),
        Some(data) => {
            if data.labels.is_none() {
                errors.push(ValidationError::new(
                    "data.labels",
                    "data.labels is required and must be an array",
                    "REQUIRED",
                ));
            }
            if data.datasets.is_none() {
                errors.push(ValidationError::new(
                    "data.datasets",
                    "data.datasets is required and must be an array",
                    "REQUIRED",
                ));
            }
        }
    }
    errors
}

fn accordion_errors(p: &AccordionProps) -> Vec<ValidationError> {
    if p.sections.is_empty() {
        return vec![ValidationError::required_array("sections")];
    }
    p.sections
        .iter()
        .enumerate()
        .filter(|(_, section)| is_blank(&section.title))
        .map(|(index, _)| ValidationError::required(&format!("sections[{index}].title")))
        .collect()
}

fn alert_errors(p: &AlertProps) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if is_blank(&p.message) {
        errors.push(ValidationError::required("message"));
    }
    if p.variant.is_none() {
        errors.push(ValidationError::required("variant"));
    }
    errors
}

fn code_errors(p: &CodeProps) -> Vec<ValidationError> {
    if is_blank(&p.code) {
        return vec![ValidationError::required("code")];
    }
    Vec::new()
}

// ============================================================================
// Form data validation
// ============================================================================

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Validate submitted form data against a form component's field definitions.
///
/// Enforces required presence, numeric bounds, email shape, URL
/// parseability, option membership, and an optional caller-supplied regex
/// pattern. A pattern that does not compile is skipped with a warning.
pub fn validate_form_data(
    fields: &[FormField],
    data: &serde_json::Map<String, Value>,
) -> ValidationReport {
    let mut errors = Vec::new();

    for field in fields {
        let Some(name) = field.name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        let display = field.label.as_deref().unwrap_or(name);
        let value = data.get(name);
        let required = field.required.unwrap_or(false);

        if is_empty_value(value) {
            if required {
                errors.push(ValidationError::new(
                    name,
                    format!("{display} is required"),
                    "REQUIRED",
                ));
            }
            continue;
        }
        let Some(value) = value else { continue };

        match field.kind {
            Some(FieldKind::Number) => match as_number(value) {
                None => errors.push(ValidationError::new(
                    name,
                    format!("{display} must be a number"),
                    "INVALID_TYPE",
                )),
                Some(number) => {
                    if let Some(min) = field.min {
                        if number < min {
                            errors.push(ValidationError::new(
                                name,
                                format!("{display} must be at least {min}"),
                                "MIN_VALUE",
                            ));
                        }
                    }
                    if let Some(max) = field.max {
                        if number > max {
                            errors.push(ValidationError::new(
                                name,
                                format!("{display} must be at most {max}"),
                                "MAX_VALUE",
                            ));
                        }
                    }
                }
            },
            Some(FieldKind::Email) => {
                if let Value::String(s) = value {
                    if !email_pattern().is_match(s) {
                        errors.push(ValidationError::new(
                            name,
                            format!("{display} must be a valid email"),
                            "INVALID_EMAIL",
                        ));
                    }
                }
            }
            Some(FieldKind::Url) => {
                if let Value::String(s) = value {
                    if url::Url::parse(s).is_err() {
                        errors.push(ValidationError::new(
                            name,
                            format!("{display} must be a valid URL"),
                            "INVALID_URL",
                        ));
                    }
                }
            }
            Some(FieldKind::Select) | Some(FieldKind::Radio) => {
                if let Some(options) = &field.options {
                    let submitted = value.as_str().unwrap_or_default();
                    if !options.iter().any(|opt| opt.value() == submitted) {
                        errors.push(ValidationError::new(
                            name,
                            format!("{display} must be one of the available options"),
                            "INVALID_OPTION",
                        ));
                    }
                }
            }
            _ => {}
        }

        if let Some(rule) = &field.validation {
            if let (Some(pattern), Value::String(s)) = (rule.pattern.as_deref(), value) {
                match Regex::new(pattern) {
                    Ok(re) => {
                        if !re.is_match(s) {
                            let message = rule
                                .message
                                .clone()
                                .unwrap_or_else(|| format!("{display} is invalid"));
                            errors.push(ValidationError::new(name, message, "PATTERN_MISMATCH"));
                        }
                    }
                    Err(err) => {
                        warn!(field = name, error = %err, "skipping uncompilable field pattern");
                    }
                }
            }
        }
    }

    ValidationReport::from_errors(errors)
}
