//! Tool descriptors - names, generated input schemas and argument validation.
//!
//! The input schema of a tool is generated from its params struct, so the
//! advertised shape and the deserialized shape cannot drift apart.

use std::sync::Arc;

use rmcp::handler::server::tool::schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde_json::Value;

use super::handlers::Arguments;
use super::error::{ToolError, ToolResult};
use crate::domains::ads::codec::parse_date;
use crate::domains::ads::query::DateRange;
use crate::domains::ads::types::{ChannelType, CustomerId, EntityId, EntityStatus, MatchType};

/// Semantic type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    Integer,
    /// Account id, digits with optional dashes.
    CustomerId,
    /// Numeric entity id, as string or number.
    EntityId,
    Status,
    MatchType,
    ChannelType,
    /// `YYYY-MM-DD`.
    Date,
    /// Relative token or `start,end` pair.
    DateRange,
}

impl ParamKind {
    /// Check a JSON value against this kind.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        let as_str = || {
            value
                .as_str()
                .ok_or_else(|| format!("expected a string, got {value}"))
        };

        match self {
            Self::String => as_str().map(|_| ()),
            Self::Number => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(format!("expected a number, got {value}"))
                }
            }
            Self::Integer => {
                if value.is_i64() || value.is_u64() {
                    Ok(())
                } else {
                    Err(format!("expected an integer, got {value}"))
                }
            }
            Self::CustomerId => serde_json::from_value::<CustomerId>(value.clone())
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Self::EntityId => serde_json::from_value::<EntityId>(value.clone())
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Self::Status => as_str()?
                .parse::<EntityStatus>()
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Self::MatchType => as_str()?
                .parse::<MatchType>()
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Self::ChannelType => as_str()?
                .parse::<ChannelType>()
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Self::Date => parse_date(as_str()?).map(|_| ()).map_err(|e| e.to_string()),
            Self::DateRange => as_str()?
                .parse::<DateRange>()
                .map(|_| ())
                .map_err(|e| e.to_string()),
        }
    }
}

/// Semantic check and default of one input property.
///
/// The property's JSON shape, description and required flag come from the
/// params struct schema; this only adds what the schema cannot express.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn new(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            default: None,
        }
    }

    /// Value filled in when the caller omits the parameter.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Name, description, input schema and parameter checks of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    /// Descriptor whose input schema is generated from the params type `P`.
    pub fn new<P: JsonSchema>(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            params: Vec::new(),
            schema: Arc::new(schema_for_type::<P>()),
        }
    }

    /// Attach a parameter check; its default is also advertised in the schema.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        if let Some(default) = &spec.default {
            let schema = Arc::make_mut(&mut self.schema);
            if let Some(property) = schema
                .get_mut("properties")
                .and_then(|p| p.get_mut(spec.name))
                .and_then(Value::as_object_mut)
            {
                property.insert("default".to_string(), default.clone());
            }
        }
        self.params.push(spec);
        self
    }

    /// JSON Schema of the tool input.
    pub fn input_schema(&self) -> &JsonObject {
        &self.schema
    }

    /// Shared handle on the input schema, as MCP tool listings take it.
    pub fn shared_schema(&self) -> Arc<JsonObject> {
        Arc::clone(&self.schema)
    }

    /// Whether the schema lists `name` as required.
    pub fn is_required(&self, name: &str) -> bool {
        self.schema
            .get("required")
            .and_then(Value::as_array)
            .is_some_and(|required| required.iter().any(|r| r.as_str() == Some(name)))
    }

    /// Property names declared by the schema.
    pub fn property_names(&self) -> Vec<&str> {
        self.schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| properties.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Validate caller arguments and fill defaults.
    ///
    /// Missing required parameters and values failing their kind are
    /// `InvalidArguments`. `null` counts as absent. Undeclared arguments are
    /// dropped.
    pub fn validate_arguments(&self, mut arguments: Arguments) -> ToolResult<Arguments> {
        let mut normalized = Arguments::new();

        for param in &self.params {
            let value = arguments.remove(param.name).filter(|v| !v.is_null());
            match value {
                Some(value) => {
                    param.kind.check(&value).map_err(|reason| {
                        ToolError::invalid_arguments(format!("{}: {}", param.name, reason))
                    })?;
                    normalized.insert(param.name.to_string(), value);
                }
                None if self.is_required(param.name) => {
                    return Err(ToolError::invalid_arguments(format!(
                        "missing required parameter '{}'",
                        param.name
                    )));
                }
                None => {
                    if let Some(default) = &param.default {
                        normalized.insert(param.name.to_string(), default.clone());
                    }
                }
            }
        }

        Ok(normalized)
    }
}
