//! GAQL query builder.
//!
//! Field lists and sources are `'static` constants chosen by each tool. Caller
//! input only ever reaches a query as a typed [`Literal`], so a predicate can
//! never carry quotes or extra clauses.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer};

use super::codec::{ensure_ordered, parse_date};
use super::types::{EntityId, EntityStatus};
use crate::domains::tools::{ToolError, ToolResult};

/// Field every date-segmented report filters on.
pub const DATE_SEGMENT: &str = "segments.date";

/// Relative date ranges understood by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeRange {
    Last7Days,
    Last30Days,
    ThisMonth,
    LastMonth,
}

impl RelativeRange {
    pub const ALL: &'static [RelativeRange] = &[
        Self::Last7Days,
        Self::Last30Days,
        Self::ThisMonth,
        Self::LastMonth,
    ];

    /// GAQL token for this range.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last7Days => "LAST_7_DAYS",
            Self::Last30Days => "LAST_30_DAYS",
            Self::ThisMonth => "THIS_MONTH",
            Self::LastMonth => "LAST_MONTH",
        }
    }
}

/// Date range filter: a relative token or an inclusive literal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Relative(RelativeRange),
    Between { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    /// Predicates bounding `segments.date` to this range.
    pub fn predicates(&self) -> Vec<Predicate> {
        match *self {
            Self::Relative(range) => vec![Predicate::during(DATE_SEGMENT, range)],
            Self::Between { start, end } => vec![
                Predicate::new(DATE_SEGMENT, Comparison::Gte, Literal::Date(start)),
                Predicate::new(DATE_SEGMENT, Comparison::Lte, Literal::Date(end)),
            ],
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::Relative(RelativeRange::Last30Days)
    }
}

impl FromStr for DateRange {
    type Err = ToolError;

    /// Accepts `last-30-days`, `LAST_30_DAYS` (any case) or `start,end`.
    fn from_str(input: &str) -> ToolResult<Self> {
        let input = input.trim();

        if let Some((start, end)) = input.split_once(',') {
            if end.contains(',') {
                return Err(ToolError::invalid_arguments(format!(
                    "date range '{input}' must be exactly two dates: YYYY-MM-DD,YYYY-MM-DD"
                )));
            }
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            ensure_ordered(start, end)?;
            return Ok(Self::Between { start, end });
        }

        let token = input.to_ascii_uppercase().replace('-', "_");
        RelativeRange::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == token)
            .map(Self::Relative)
            .ok_or_else(|| {
                ToolError::invalid_arguments(format!(
                    "invalid date range '{input}': use last-7-days, last-30-days, this-month, \
                     last-month or YYYY-MM-DD,YYYY-MM-DD"
                ))
            })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative(range) => f.write_str(range.as_str()),
            Self::Between { start, end } => write!(f, "{start} to {end}"),
        }
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for DateRange {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        "DateRange".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        let tokens: Vec<&str> = RelativeRange::ALL.iter().map(|r| r.as_str()).collect();
        json_schema!({
            "type": "string",
            "examples": [tokens.join(" | "), "2024-01-01,2024-01-31"]
        })
    }
}

/// Comparison operators used in predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    NotEq,
    Gte,
    Lte,
    During,
}

impl Comparison {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::During => "DURING",
        }
    }
}

/// A typed predicate value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Id(EntityId),
    Int(i64),
    /// Platform enum name from a closed set.
    Enum(&'static str),
    Date(NaiveDate),
    Range(RelativeRange),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Enum(name) => write!(f, "'{name}'"),
            Self::Date(date) => write!(f, "'{}'", date.format("%Y-%m-%d")),
            Self::Range(range) => f.write_str(range.as_str()),
        }
    }
}

/// `field <op> value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: &'static str,
    pub comparison: Comparison,
    pub value: Literal,
}

impl Predicate {
    pub fn new(field: &'static str, comparison: Comparison, value: Literal) -> Self {
        Self {
            field,
            comparison,
            value,
        }
    }

    pub fn id_eq(field: &'static str, id: EntityId) -> Self {
        Self::new(field, Comparison::Eq, Literal::Id(id))
    }

    pub fn status_eq(field: &'static str, status: EntityStatus) -> Self {
        Self::new(field, Comparison::Eq, Literal::Enum(status.as_str()))
    }

    pub fn status_not(field: &'static str, status: EntityStatus) -> Self {
        Self::new(field, Comparison::NotEq, Literal::Enum(status.as_str()))
    }

    pub fn during(field: &'static str, range: RelativeRange) -> Self {
        Self::new(field, Comparison::During, Literal::Range(range))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.comparison.as_str(), self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// A read-only GAQL query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    fields: &'static [&'static str],
    resource: &'static str,
    predicates: Vec<Predicate>,
    order_by: Option<(&'static str, Direction)>,
    limit: Option<u32>,
}

impl Query {
    /// Start a query selecting a fixed field list.
    pub fn select(fields: &'static [&'static str]) -> QueryBuilder {
        QueryBuilder { fields }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn row_limit(&self) -> Option<u32> {
        self.limit
    }

    /// Render the GAQL text. Predicates are joined with `AND` in insertion order.
    pub fn render(&self) -> String {
        let mut gaql = format!(
            "SELECT {} FROM {}",
            self.fields.join(", "),
            self.resource
        );

        if !self.predicates.is_empty() {
            let clauses: Vec<String> = self.predicates.iter().map(|p| p.to_string()).collect();
            gaql.push_str(" WHERE ");
            gaql.push_str(&clauses.join(" AND "));
        }

        if let Some((field, direction)) = self.order_by {
            gaql.push_str(" ORDER BY ");
            gaql.push_str(field);
            if direction == Direction::Desc {
                gaql.push_str(" DESC");
            }
        }

        if let Some(limit) = self.limit {
            gaql.push_str(&format!(" LIMIT {limit}"));
        }

        gaql
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Intermediate step holding the selected fields until a source is chosen.
pub struct QueryBuilder {
    fields: &'static [&'static str],
}

impl QueryBuilder {
    pub fn from(self, resource: &'static str) -> Query {
        Query {
            fields: self.fields,
            resource,
            predicates: Vec::new(),
            order_by: None,
            limit: None,
        }
    }
}

impl Query {
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn filter_opt(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(p) => self.filter(p),
            None => self,
        }
    }

    pub fn date_range(mut self, range: &DateRange) -> Self {
        self.predicates.extend(range.predicates());
        self
    }

    pub fn order_by(mut self, field: &'static str, direction: Direction) -> Self {
        self.order_by = Some((field, direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[&str] = &["campaign.id", "campaign.name", "metrics.clicks"];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_render_minimal_query() {
        let query = Query::select(FIELDS).from("campaign");
        assert_eq!(
            query.render(),
            "SELECT campaign.id, campaign.name, metrics.clicks FROM campaign"
        );
    }

    #[test]
    fn test_render_full_query() {
        let query = Query::select(FIELDS)
            .from("keyword_view")
            .filter(Predicate::id_eq("campaign.id", EntityId::new(42)))
            .filter(Predicate::status_not("campaign.status", EntityStatus::Removed))
            .date_range(&DateRange::Relative(RelativeRange::Last7Days))
            .filter(Predicate::new(
                "metrics.impressions",
                Comparison::Gte,
                Literal::Int(10),
            ))
            .order_by("metrics.cost_micros", Direction::Desc)
            .limit(50);

        assert_eq!(
            query.render(),
            "SELECT campaign.id, campaign.name, metrics.clicks FROM keyword_view \
             WHERE campaign.id = 42 AND campaign.status != 'REMOVED' \
             AND segments.date DURING LAST_7_DAYS AND metrics.impressions >= 10 \
             ORDER BY metrics.cost_micros DESC LIMIT 50"
        );
        assert_eq!(query.row_limit(), Some(50));
    }

    #[test]
    fn test_ascending_order_has_no_suffix() {
        let query = Query::select(FIELDS)
            .from("campaign")
            .order_by("campaign.name", Direction::Asc);
        assert!(query.render().ends_with("ORDER BY campaign.name"));
    }

    #[test]
    fn test_date_range_tokens() {
        for (input, expected) in [
            ("last-7-days", RelativeRange::Last7Days),
            ("last-30-days", RelativeRange::Last30Days),
            ("LAST_30_DAYS", RelativeRange::Last30Days),
            ("This-Month", RelativeRange::ThisMonth),
            ("last_month", RelativeRange::LastMonth),
        ] {
            assert_eq!(
                input.parse::<DateRange>().unwrap(),
                DateRange::Relative(expected),
                "failed for {input}"
            );
        }
    }

    #[test]
    fn test_literal_date_range_is_inclusive_and_distinct_from_token() {
        let literal: DateRange = "2024-01-01,2024-01-31".parse().unwrap();
        assert_eq!(
            literal,
            DateRange::Between {
                start: date(2024, 1, 1),
                end: date(2024, 1, 31)
            }
        );

        let query = Query::select(FIELDS).from("campaign").date_range(&literal);
        assert_eq!(
            query.render(),
            "SELECT campaign.id, campaign.name, metrics.clicks FROM campaign \
             WHERE segments.date >= '2024-01-01' AND segments.date <= '2024-01-31'"
        );

        let token: DateRange = "last-30-days".parse().unwrap();
        assert_ne!(literal, token);
        let token_query = Query::select(FIELDS).from("campaign").date_range(&token);
        assert!(token_query.render().ends_with("WHERE segments.date DURING LAST_30_DAYS"));
    }

    #[test]
    fn test_literal_date_range_allows_spaces_and_single_day() {
        let range: DateRange = " 2024-03-05 , 2024-03-05 ".parse().unwrap();
        assert_eq!(
            range,
            DateRange::Between {
                start: date(2024, 3, 5),
                end: date(2024, 3, 5)
            }
        );
    }

    #[test]
    fn test_invalid_date_ranges() {
        for input in [
            "",
            "yesterday",
            "LAST_90_DAYS",
            "2024-01-31,2024-01-01",
            "2024-01-01",
            "2024-01-01,",
            "2024-01-01,2024-01-31,2024-02-01",
            "2024-01-01,2024-13-01",
            "LAST_30_DAYS AND campaign.id > 0",
        ] {
            assert!(
                matches!(input.parse::<DateRange>(), Err(ToolError::InvalidArguments(_))),
                "expected rejection for {input:?}"
            );
        }
    }

    #[test]
    fn test_date_range_display() {
        assert_eq!(DateRange::default().to_string(), "LAST_30_DAYS");
        let range: DateRange = "2024-01-01,2024-01-31".parse().unwrap();
        assert_eq!(range.to_string(), "2024-01-01 to 2024-01-31");
    }

    #[test]
    fn test_date_range_schema_is_a_string_with_examples() {
        let schema = schemars::schema_for!(DateRange);
        assert_eq!(schema.get("type"), Some(&serde_json::json!("string")));
        assert_eq!(
            schema.get("examples"),
            Some(&serde_json::json!([
                "LAST_7_DAYS | LAST_30_DAYS | THIS_MONTH | LAST_MONTH",
                "2024-01-01,2024-01-31"
            ]))
        );
    }
}
