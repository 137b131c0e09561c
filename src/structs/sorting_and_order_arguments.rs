use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;
use validator::{Validate, ValidationError, ValidationErrors};

const SORT_VALUES: [&str; 2] = ["id", "name"];
const ORDER_VALUES: [&str; 4] = ["asc", "ASC", "desc", "DESC"];

/// Kind of rule a query argument broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    Range,
    Pattern,
    Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldConstraintViolation {
    pub field: &'static str,
    pub constraint: ConstraintKind,
    pub message: String,
    pub rejected_value: String,
}

impl FieldConstraintViolation {
    pub fn new(
        field: &'static str,
        constraint: ConstraintKind,
        message: impl Into<String>,
        rejected_value: impl Into<String>,
    ) -> Self {
        Self {
            field,
            constraint,
            message: message.into(),
            rejected_value: rejected_value.into(),
        }
    }
}

impl fmt::Display for FieldConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (rejected value `{}`)",
            self.field, self.message, self.rejected_value
        )
    }
}

/// Property the list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    Id,
    Name,
}

/// The optional `offset`, `max`, `sort` and `order` query arguments.
///
/// Every field is independent: an absent field is never a violation, and a
/// present one only has to satisfy its own constraint. Fields are read-only
/// once the value is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct SortingAndOrderArguments {
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    offset: Option<i32>,
    #[validate(range(min = 1, message = "must be greater than 0"))]
    max: Option<i32>,
    #[validate(custom(function = "validate_sort"))]
    sort: Option<String>,
    #[validate(custom(function = "validate_order"))]
    order: Option<String>,
}

impl SortingAndOrderArguments {
    pub fn new(
        offset: Option<i32>,
        max: Option<i32>,
        sort: Option<String>,
        order: Option<String>,
    ) -> Self {
        Self {
            offset,
            max,
            sort,
            order,
        }
    }

    /// Builds the arguments and rejects them as a whole if any field is invalid
    pub fn try_new(
        offset: Option<i32>,
        max: Option<i32>,
        sort: Option<String>,
        order: Option<String>,
    ) -> Result<Self, Vec<FieldConstraintViolation>> {
        let arguments = Self::new(offset, max, sort, order);
        arguments
            .validate()
            .map_err(|errors| arguments.violations(&errors))?;
        Ok(arguments)
    }

    /// Populates the arguments from raw request parameters.
    ///
    /// Unknown keys are ignored. An empty `offset` or `max` counts as absent,
    /// while an empty `sort` or `order` is checked like any other value.
    /// Integers that fail to parse are reported next to the constraint
    /// violations of the other fields, so a rejection always lists every bad
    /// argument.
    pub fn from_params(
        params: &HashMap<String, String>,
    ) -> Result<Self, Vec<FieldConstraintViolation>> {
        let mut violations = Vec::new();

        let offset = parse_integer(params, "offset", &mut violations);
        let max = parse_integer(params, "max", &mut violations);
        let sort = params.get("sort").cloned();
        let order = params.get("order").cloned();

        let arguments = Self::try_new(offset, max, sort, order);
        if let Err(constraint_violations) = &arguments {
            violations.extend(constraint_violations.iter().cloned());
        }

        if !violations.is_empty() {
            violations.sort_by_key(|violation| violation.field);
            for violation in &violations {
                warn!("Rejected query argument {violation}");
            }
            return Err(violations);
        }

        arguments
    }

    pub fn offset(&self) -> Option<i32> {
        self.offset
    }

    pub fn max(&self) -> Option<i32> {
        self.max
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    pub fn sort_property(&self) -> Option<SortProperty> {
        match self.sort.as_deref() {
            Some("id") => Some(SortProperty::Id),
            Some("name") => Some(SortProperty::Name),
            _ => None,
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self.order.as_deref(), Some("desc") | Some("DESC"))
    }

    /// Flattens validator errors into violations ordered by field name
    fn violations(&self, errors: &ValidationErrors) -> Vec<FieldConstraintViolation> {
        let mut violations = Vec::new();

        for (field, field_errors) in errors.field_errors() {
            let name: &str = &field;
            let Some((field, rejected_value)) = self.raw_field(name) else {
                continue;
            };

            for error in field_errors.iter() {
                let constraint = if error.code == "range" {
                    ConstraintKind::Range
                } else {
                    ConstraintKind::Pattern
                };
                let message = error.message.as_deref().unwrap_or("is invalid");
                violations.push(FieldConstraintViolation::new(
                    field,
                    constraint,
                    message,
                    rejected_value.clone(),
                ));
            }
        }

        violations.sort_by_key(|violation| violation.field);
        violations
    }

    fn raw_field(&self, name: &str) -> Option<(&'static str, String)> {
        let value = match name {
            "offset" => ("offset", self.offset.map(|offset| offset.to_string())),
            "max" => ("max", self.max.map(|max| max.to_string())),
            "sort" => ("sort", self.sort.clone()),
            "order" => ("order", self.order.clone()),
            _ => return None,
        };
        Some((value.0, value.1.unwrap_or_default()))
    }
}

fn validate_sort(sort: &str) -> Result<(), ValidationError> {
    if SORT_VALUES.contains(&sort) {
        return Ok(());
    }
    Err(pattern_error("must match \"id|name\""))
}

fn validate_order(order: &str) -> Result<(), ValidationError> {
    if ORDER_VALUES.contains(&order) {
        return Ok(());
    }
    Err(pattern_error("must match \"asc|ASC|desc|DESC\""))
}

fn pattern_error(message: &'static str) -> ValidationError {
    let mut error = ValidationError::new("pattern");
    error.message = Some(Cow::Borrowed(message));
    error
}

fn parse_integer(
    params: &HashMap<String, String>,
    field: &'static str,
    violations: &mut Vec<FieldConstraintViolation>,
) -> Option<i32> {
    let raw = params
        .get(field)
        .map(String::as_str)
        .filter(|value| !value.is_empty())?;
    match raw.trim().parse::<i32>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Cannot parse `{field}` value `{raw}` as an integer : {e}");
            violations.push(FieldConstraintViolation::new(
                field,
                ConstraintKind::Type,
                "must be an integer",
                raw,
            ));
            None
        }
    }
}
