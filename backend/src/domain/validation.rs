//! Declarative object schemas for request payloads.
//!
//! An [`ObjectSchema`] lists the fields a resource accepts, each with a
//! [`FieldKind`], a required flag and an ordered list of [`Check`]s.
//! Validation walks every declared field and collects *all* violations as
//! [`FieldIssue`]s instead of stopping at the first one. Keys the schema does
//! not declare are ignored.
//!
//! Issues serialise in the `{code, path, message, ...}` shape clients of the
//! API already consume, for example:
//!
//! ```json
//! {"code":"too_small","minimum":3,"type":"string","inclusive":true,
//!  "exact":false,"path":["name"],"message":"String must contain at least 3 character(s)"}
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use chrono::DateTime;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// JSON type a field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    /// An RFC 3339 timestamp encoded as a string.
    Date,
}

impl FieldKind {
    fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

/// Constraint applied once a field has the expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Minimum length in characters.
    MinLength(usize),
    /// Must look like an email address.
    Email,
    /// Numeric value without a fractional part, within the safe integer
    /// range. Integral floats such as `1.0` are accepted.
    Integer,
}

/// Largest magnitude an integer field may carry (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

impl Check {
    fn evaluate(self, value: &Value) -> Option<(IssueKind, String)> {
        match self {
            Self::MinLength(minimum) => {
                let length = value.as_str()?.chars().count();
                (length < minimum).then(|| {
                    (
                        IssueKind::TooSmall { minimum },
                        format!("String must contain at least {minimum} character(s)"),
                    )
                })
            }
            Self::Email => {
                let text = value.as_str()?;
                (!is_email(text)).then(|| {
                    (
                        IssueKind::InvalidString { validation: "email" },
                        "Invalid email".to_owned(),
                    )
                })
            }
            Self::Integer => integer_issue(value.as_f64()?),
        }
    }
}

// Range bounds are compared as f64; both are exactly representable.
#[allow(
    clippy::cast_precision_loss,
    reason = "the safe integer bound is exactly representable as f64"
)]
const MAX_SAFE_INTEGER_F64: f64 = MAX_SAFE_INTEGER as f64;

fn integer_issue(number: f64) -> Option<(IssueKind, String)> {
    if number.fract() != 0.0 {
        return Some((
            IssueKind::InvalidType {
                expected: "integer",
                received: "float",
            },
            "Expected integer, received float".to_owned(),
        ));
    }
    if number > MAX_SAFE_INTEGER_F64 {
        return Some((
            IssueKind::TooBig {
                maximum: MAX_SAFE_INTEGER,
            },
            format!("Number must be less than or equal to {MAX_SAFE_INTEGER}"),
        ));
    }
    if number < -MAX_SAFE_INTEGER_F64 {
        return Some((
            IssueKind::NumberTooSmall {
                minimum: -MAX_SAFE_INTEGER,
            },
            format!("Number must be greater than or equal to -{MAX_SAFE_INTEGER}"),
        ));
    }
    None
}

/// Declaration of a single object field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    checks: Vec<Check>,
}

impl FieldSchema {
    fn of(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            checks: Vec::new(),
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::of(name, FieldKind::String)
    }

    pub fn number(name: &'static str) -> Self {
        Self::of(name, FieldKind::Number)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::of(name, FieldKind::Boolean)
    }

    pub fn date(name: &'static str) -> Self {
        Self::of(name, FieldKind::Date)
    }

    /// Allow the field to be absent. Explicit `null` is still rejected.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub fn min_length(mut self, minimum: usize) -> Self {
        self.checks.push(Check::MinLength(minimum));
        self
    }

    #[must_use]
    pub fn email(mut self) -> Self {
        self.checks.push(Check::Email);
        self
    }

    #[must_use]
    pub fn integer(mut self) -> Self {
        self.checks.push(Check::Integer);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn validate(&self, object: &Map<String, Value>, issues: &mut Vec<FieldIssue>) {
        let expected = self.kind.name();
        let value = match object.get(self.name) {
            None if self.required => {
                issues.push(FieldIssue::new(
                    IssueKind::InvalidType {
                        expected,
                        received: "undefined",
                    },
                    [self.name],
                    "Required",
                ));
                return;
            }
            None => return,
            Some(value) => value,
        };

        if !self.kind_matches(value) {
            let received = received_type(value);
            issues.push(FieldIssue::new(
                IssueKind::InvalidType { expected, received },
                [self.name],
                format!("Expected {expected}, received {received}"),
            ));
            return;
        }

        if self.kind == FieldKind::Date
            && value
                .as_str()
                .is_some_and(|text| DateTime::parse_from_rfc3339(text).is_err())
        {
            issues.push(FieldIssue::new(
                IssueKind::InvalidDate,
                [self.name],
                "Invalid date",
            ));
            return;
        }

        for check in &self.checks {
            if let Some((kind, message)) = check.evaluate(value) {
                issues.push(FieldIssue::new(kind, [self.name], message));
            }
        }
    }

    fn is_integer(&self) -> bool {
        self.checks.contains(&Check::Integer)
    }

    fn kind_matches(&self, value: &Value) -> bool {
        match self.kind {
            FieldKind::String | FieldKind::Date => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

/// Schema describing a JSON object payload.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use storefront::domain::validation::{FieldSchema, ObjectSchema};
///
/// let schema = ObjectSchema::new(vec![
///     FieldSchema::string("name").min_length(2),
///     FieldSchema::number("price"),
/// ]);
/// assert!(schema.validate(&json!({"name": "Milk", "price": 5})).is_ok());
/// let issues = schema.validate(&json!({"name": "M"})).unwrap_err();
/// assert_eq!(issues.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSchema {
    fields: Vec<FieldSchema>,
}

impl ObjectSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Check `input` against every declared field, collecting all issues.
    pub fn validate(&self, input: &Value) -> Result<(), ValidationIssues> {
        let Some(object) = input.as_object() else {
            let received = received_type(input);
            return Err(ValidationIssues::from(vec![FieldIssue::new(
                IssueKind::InvalidType {
                    expected: "object",
                    received,
                },
                Vec::<String>::new(),
                format!("Expected object, received {received}"),
            )]));
        };

        let mut issues = Vec::new();
        for field in &self.fields {
            field.validate(object, &mut issues);
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationIssues(issues))
        }
    }

    /// Validate `input` and decode it into `T`.
    ///
    /// Integral floats in integer fields (`1.0`) are decoded as integers.
    /// Decoding failures that slip past the declared checks are reported as a
    /// single `custom` issue.
    pub fn parse<T: DeserializeOwned>(&self, input: &Value) -> Result<T, ValidationIssues> {
        self.validate(input)?;
        let normalised = self.normalise_integers(input);
        T::deserialize(normalised.as_ref()).map_err(|error| {
            ValidationIssues::from(vec![FieldIssue::new(
                IssueKind::Custom,
                Vec::<String>::new(),
                error.to_string(),
            )])
        })
    }

    /// Rewrite integral floats held by integer fields as JSON integers.
    ///
    /// Only called on validated input, so every such value lies within
    /// `±MAX_SAFE_INTEGER` and converts to `i64` exactly.
    fn normalise_integers<'a>(&self, input: &'a Value) -> Cow<'a, Value> {
        let Some(object) = input.as_object() else {
            return Cow::Borrowed(input);
        };
        let floats: Vec<(&'static str, f64)> = self
            .fields
            .iter()
            .filter(|field| field.is_integer())
            .filter_map(|field| {
                let value = object.get(field.name)?;
                if value.is_i64() {
                    return None;
                }
                value.as_f64().map(|number| (field.name, number))
            })
            .collect();
        if floats.is_empty() {
            return Cow::Borrowed(input);
        }

        let mut object = object.clone();
        for (name, number) in floats {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "validated integral and within the safe integer range"
            )]
            let whole = number as i64;
            object.insert(name.to_owned(), Value::from(whole));
        }
        Cow::Owned(Value::Object(object))
    }
}

/// Category of a single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    InvalidType {
        expected: &'static str,
        received: &'static str,
    },
    /// String shorter than `minimum` characters.
    TooSmall {
        minimum: usize,
    },
    /// Integer above `maximum`.
    TooBig {
        maximum: i64,
    },
    /// Integer below `minimum`.
    NumberTooSmall {
        minimum: i64,
    },
    InvalidString {
        validation: &'static str,
    },
    InvalidDate,
    Custom,
}

impl IssueKind {
    /// Wire code for this issue kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidType { .. } => "invalid_type",
            Self::TooSmall { .. } | Self::NumberTooSmall { .. } => "too_small",
            Self::TooBig { .. } => "too_big",
            Self::InvalidString { .. } => "invalid_string",
            Self::InvalidDate => "invalid_date",
            Self::Custom => "custom",
        }
    }
}

/// One violated constraint, located by its path within the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    kind: IssueKind,
    path: Vec<String>,
    message: String,
}

impl FieldIssue {
    pub fn new<P, S>(kind: IssueKind, path: P, message: impl Into<String>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            path: path.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &IssueKind {
        &self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Serialize)]
struct FieldIssueDto<'a> {
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    received: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    value_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inclusive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exact: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<&'static str>,
    path: &'a [String],
    message: &'a str,
}

impl Serialize for FieldIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut dto = FieldIssueDto {
            code: self.code(),
            expected: None,
            received: None,
            minimum: None,
            maximum: None,
            value_type: None,
            inclusive: None,
            exact: None,
            validation: None,
            path: &self.path,
            message: &self.message,
        };
        match &self.kind {
            IssueKind::InvalidType { expected, received } => {
                dto.expected = Some(*expected);
                dto.received = Some(*received);
            }
            IssueKind::TooSmall { minimum } => {
                dto.minimum = Some(i64::try_from(*minimum).unwrap_or(i64::MAX));
                dto.value_type = Some("string");
                dto.inclusive = Some(true);
                dto.exact = Some(false);
            }
            IssueKind::InvalidString { validation } => dto.validation = Some(*validation),
            IssueKind::TooBig { maximum } => {
                dto.maximum = Some(*maximum);
                dto.value_type = Some("number");
                dto.inclusive = Some(true);
                dto.exact = Some(false);
            }
            IssueKind::NumberTooSmall { minimum } => {
                dto.minimum = Some(*minimum);
                dto.value_type = Some("number");
                dto.inclusive = Some(true);
                dto.exact = Some(false);
            }
            IssueKind::InvalidDate | IssueKind::Custom => {}
        }
        dto.serialize(serializer)
    }
}

/// Non-empty, ordered collection of [`FieldIssue`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationIssues(Vec<FieldIssue>);

impl ValidationIssues {
    pub fn iter(&self) -> std::slice::Iter<'_, FieldIssue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<FieldIssue> {
        self.0
    }
}

impl From<Vec<FieldIssue>> for ValidationIssues {
    fn from(issues: Vec<FieldIssue>) -> Self {
        Self(issues)
    }
}

impl<'a> IntoIterator for &'a ValidationIssues {
    type Item = &'a FieldIssue;
    type IntoIter = std::slice::Iter<'a, FieldIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, issue) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            if issue.path.is_empty() {
                write!(f, "{}", issue.message)?;
            } else {
                write!(f, "{}: {}", issue.path.join("."), issue.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationIssues {}

fn received_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn is_email(text: &str) -> bool {
    // The regex crate has no look-ahead; the dot rules are checked by hand.
    !text.starts_with('.') && !text.contains("..") && email_regex().is_match(text)
}
