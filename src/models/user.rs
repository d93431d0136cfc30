use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// The slice of a backend user record that role validation reads.
///
/// Reference fields are kept as raw JSON values because the backend sends
/// numeric ids for some records and string ids for others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CandidateUser {
    #[serde(default)]
    #[schema(example = "SBA")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object, example = 1)]
    pub branch_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object, example = 5)]
    pub sales_manager_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object, example = 12)]
    pub tl_id: Option<Value>,
}

impl CandidateUser {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            ..Self::default()
        }
    }

    pub fn with_branch(mut self, branch_id: impl Into<Value>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    pub fn with_sales_manager(mut self, sales_manager_id: impl Into<Value>) -> Self {
        self.sales_manager_id = Some(sales_manager_id.into());
        self
    }

    pub fn with_tl(mut self, tl_id: impl Into<Value>) -> Self {
        self.tl_id = Some(tl_id.into());
        self
    }

    pub fn has_branch(&self) -> bool {
        is_set(self.branch_id.as_ref())
    }

    pub fn has_sales_manager(&self) -> bool {
        is_set(self.sales_manager_id.as_ref())
    }

    pub fn has_tl(&self) -> bool {
        is_set(self.tl_id.as_ref())
    }
}

/// A reference counts as set unless it is missing or falsy
/// (null, false, 0, or an empty string).
fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}
