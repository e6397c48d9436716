//! Typed input model of one load-test run.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use perfkit_io_xlsx::EnumCellValue;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

////////////////////////////////////////////////////////////////////////////////
// #region Scalars

/// Value kept exactly as the upstream tool supplied it.
///
/// Used for fields without a fixed representation (error rates, HTTP status).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumReportScalar {
    /// JSON integer.
    Integer(i64),
    /// JSON decimal.
    Number(f64),
    /// JSON string.
    Text(String),
}

impl From<&EnumReportScalar> for EnumCellValue {
    fn from(value: &EnumReportScalar) -> Self {
        match value {
            EnumReportScalar::Integer(n) => EnumCellValue::Integer(*n),
            EnumReportScalar::Number(n) => EnumCellValue::Number(*n),
            EnumReportScalar::Text(s) => EnumCellValue::String(s.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SummaryDocument

/// Per-scenario metrics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpecScenarioSummary {
    /// Iterations started in the steady-state window.
    pub iter_started: u64,
    /// Iterations completed in the steady-state window.
    pub iter_completed: u64,
    /// Completed iterations per second.
    pub throughput: f64,
    /// Journeys started over the entire test.
    pub total_started: u64,
    /// Journeys completed over the entire test.
    pub total_completed: u64,
    /// Journeys failed over the entire test.
    pub failed: u64,
    /// Error rate as supplied.
    pub error_rate: EnumReportScalar,
}

/// Aggregates across all scenarios, as supplied upstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpecRunTotals {
    pub started: u64,
    pub completed: u64,
    pub failed: u64,
    pub error_rate: EnumReportScalar,
}

/// One percentile line for a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpecPercentileRow {
    /// Transaction name.
    pub transaction: String,
    /// 95th percentile in milliseconds.
    pub p95: f64,
    /// 99th percentile in milliseconds.
    pub p99: f64,
    /// Sample count.
    pub count: u64,
}

/// Request count for one group/status pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpecHttpRequestRow {
    /// Request group name.
    pub group: String,
    /// HTTP status as supplied (code or text).
    pub status: EnumReportScalar,
    /// Request count.
    pub count: u64,
}

/// Parsed summary document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpecRunSummary {
    /// Run timestamp; names the companion CSV files.
    pub timestamp: String,
    /// Scenarios in document order.
    #[serde(deserialize_with = "deserialize_ordered_entries")]
    pub scenarios: Vec<(String, SpecScenarioSummary)>,
    /// Aggregate totals.
    pub total: SpecRunTotals,
    /// Full-duration percentiles by scenario name.
    #[serde(default)]
    pub full_duration_percentiles: BTreeMap<String, Vec<SpecPercentileRow>>,
    /// HTTP request counts by scenario name.
    #[serde(default)]
    pub http_requests: BTreeMap<String, Vec<SpecHttpRequestRow>>,
}

impl SpecRunSummary {
    /// Scenario names in document order.
    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|(name, _)| name.as_str())
    }

    /// Full-duration rows of `scenario`; empty when absent.
    pub fn full_duration_rows(&self, scenario: &str) -> &[SpecPercentileRow] {
        self.full_duration_percentiles
            .get(scenario)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// HTTP request rows of `scenario`; empty when absent.
    pub fn http_request_rows(&self, scenario: &str) -> &[SpecHttpRequestRow] {
        self.http_requests
            .get(scenario)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Deserialize a JSON object into `(key, value)` pairs in document order.
///
/// A repeated key keeps its first position and its last value.
fn deserialize_ordered_entries<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct VisitorOrderedEntries<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for VisitorOrderedEntries<T>
    where
        T: Deserialize<'de>,
    {
        type Value = Vec<(String, T)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map keyed by scenario name")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut l_entries: Vec<(String, T)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, T>()? {
                match l_entries.iter_mut().find(|(name, _)| *name == key) {
                    Some(entry) => entry.1 = value,
                    None => l_entries.push((key, value)),
                }
            }
            Ok(l_entries)
        }
    }

    deserializer.deserialize_map(VisitorOrderedEntries(PhantomData))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LoadedRun

/// Steady-state percentile source of one scenario, resolved once at load.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumSteadyStateSource {
    /// No companion CSV on disk.
    Missing,
    /// Rows read from the companion CSV.
    Loaded(Vec<SpecPercentileRow>),
}

impl EnumSteadyStateSource {
    /// Rows to render; empty when the companion file is missing.
    pub fn rows(&self) -> &[SpecPercentileRow] {
        match self {
            Self::Missing => &[],
            Self::Loaded(l_rows) => l_rows,
        }
    }
}

/// Everything the sheet builders read.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecRunData {
    /// Parsed summary document.
    pub summary: SpecRunSummary,
    /// Steady-state source per scenario, keyed by scenario name.
    pub steady_state: BTreeMap<String, EnumSteadyStateSource>,
}

impl SpecRunData {
    /// Steady-state rows of `scenario`; empty when not resolved or missing.
    pub fn steady_state_rows(&self, scenario: &str) -> &[SpecPercentileRow] {
        self.steady_state
            .get(scenario)
            .map(EnumSteadyStateSource::rows)
            .unwrap_or_default()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
