//! Identifiers and closed enumerations shared by queries and mutations.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domains::tools::{ToolError, ToolResult};

/// Raw id as it may arrive from a caller: JSON string or number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Text(String),
    Number(u64),
}

impl IdInput {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Google Ads customer (account) id, digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "IdInput")]
pub struct CustomerId(String);

impl CustomerId {
    /// Parse a customer id, stripping dashes (`123-456-7890`).
    pub fn parse(input: &str) -> ToolResult<Self> {
        let digits: String = input.trim().chars().filter(|c| *c != '-').collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ToolError::invalid_arguments(format!(
                "'{}' is not a customer id (expected digits, dashes allowed)",
                input.trim()
            )));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<IdInput> for CustomerId {
    type Error = ToolError;

    fn try_from(value: IdInput) -> ToolResult<Self> {
        Self::parse(&value.into_text())
    }
}

impl JsonSchema for CustomerId {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        "CustomerId".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": ["string", "integer"],
            "examples": ["123-456-7890"]
        })
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric id of a campaign, ad group, ad or criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "IdInput")]
pub struct EntityId(u64);

impl EntityId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Parse an entity id; only ASCII digits are accepted.
    pub fn parse(input: &str) -> ToolResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ToolError::invalid_arguments(format!(
                "'{trimmed}' is not a numeric id"
            )));
        }
        trimmed
            .parse()
            .map(Self)
            .map_err(|_| ToolError::invalid_arguments(format!("id '{trimmed}' is out of range")))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<IdInput> for EntityId {
    type Error = ToolError;

    fn try_from(value: IdInput) -> ToolResult<Self> {
        match value {
            IdInput::Number(n) => Ok(Self(n)),
            IdInput::Text(text) => Self::parse(&text),
        }
    }
}

/// Ids travel as JSON strings or numbers; both are advertised.
impl JsonSchema for EntityId {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        "EntityId".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": ["string", "integer"],
            "minimum": 0
        })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declares a closed set of platform enum names.
///
/// Parsing is case-insensitive and normalizes to the upper-case platform name;
/// anything outside the set is `InvalidArguments`.
macro_rules! platform_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Platform name of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Names of every accepted value.
            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl FromStr for $name {
            type Err = ToolError;

            fn from_str(input: &str) -> ToolResult<Self> {
                let normalized = input.trim().to_ascii_uppercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == normalized)
                    .ok_or_else(|| {
                        ToolError::invalid_arguments(format!(
                            "invalid {} '{}': use {}",
                            $label,
                            input.trim(),
                            Self::names().join(", ")
                        ))
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        impl JsonSchema for $name {
            fn inline_schema() -> bool {
                true
            }

            fn schema_name() -> Cow<'static, str> {
                stringify!($name).into()
            }

            fn json_schema(_: &mut SchemaGenerator) -> Schema {
                json_schema!({
                    "type": "string",
                    "enum": Self::names()
                })
            }
        }
    };
}

platform_enum! {
    /// Status shared by campaigns, ad groups, ads and criteria.
    EntityStatus, "status" {
        Enabled => "ENABLED",
        Paused => "PAUSED",
        Removed => "REMOVED",
    }
}

platform_enum! {
    /// Keyword match type.
    MatchType, "match type" {
        Exact => "EXACT",
        Phrase => "PHRASE",
        Broad => "BROAD",
    }
}

platform_enum! {
    /// Advertising channel of a campaign.
    ChannelType, "channel type" {
        Search => "SEARCH",
        Display => "DISPLAY",
        Discovery => "DISCOVERY",
    }
}

platform_enum! {
    BudgetDeliveryMethod, "delivery method" {
        Standard => "STANDARD",
        Accelerated => "ACCELERATED",
    }
}

platform_enum! {
    AdGroupType, "ad group type" {
        SearchStandard => "SEARCH_STANDARD",
    }
}
