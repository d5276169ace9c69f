//! Cohort selection over the historical dataset.
//!
//! Factor comparisons and the policy outlook both describe "people like this
//! applicant". They share the same predicate type and, where a minimum sample
//! size matters, the same [`RelaxationLadder`].

use super::domain::NONE_LABEL;
use super::history::{HistoricalDataset, HistoricalRecord};
use super::normalizer::condition_count;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Numeric columns that support window filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    Age,
    Bmi,
    SystolicPressure,
    TotalCholesterol,
}

impl NumericColumn {
    fn value(self, record: &HistoricalRecord) -> Option<f64> {
        match self {
            NumericColumn::Age => record.age,
            NumericColumn::Bmi => record.bmi,
            NumericColumn::SystolicPressure => record.blood_pressure_systolic,
            NumericColumn::TotalCholesterol => record.total_cholesterol,
        }
    }
}

/// Categorical columns that support equality filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
    Gender,
    OccupationClass,
    SmokingStatus,
    AlcoholConsumption,
    ExerciseFrequency,
    ChronicConditions,
    FamilyHistory,
}

impl CategoryColumn {
    fn value(self, record: &HistoricalRecord) -> &str {
        match self {
            CategoryColumn::Gender => &record.gender,
            CategoryColumn::OccupationClass => &record.occupation_class,
            CategoryColumn::SmokingStatus => &record.smoking_status,
            CategoryColumn::AlcoholConsumption => &record.alcohol_consumption,
            CategoryColumn::ExerciseFrequency => &record.exercise_frequency,
            CategoryColumn::ChronicConditions => &record.chronic_conditions,
            CategoryColumn::FamilyHistory => &record.family_history,
        }
    }
}

/// A single similarity predicate. Cohorts are the conjunction of a filter list.
#[derive(Debug, Clone, PartialEq)]
pub enum CohortFilter {
    /// Inclusive `[center - radius, center + radius]`; rows without the column never match.
    Window {
        column: NumericColumn,
        center: f64,
        radius: f64,
    },
    Equals {
        column: CategoryColumn,
        value: String,
    },
    ConditionCount {
        column: CategoryColumn,
        count: usize,
    },
    HasDangerousHobby(bool),
}

impl CohortFilter {
    pub fn window(column: NumericColumn, center: f64, radius: f64) -> Self {
        CohortFilter::Window {
            column,
            center,
            radius,
        }
    }

    pub fn equals(column: CategoryColumn, value: impl Into<String>) -> Self {
        CohortFilter::Equals {
            column,
            value: value.into(),
        }
    }

    pub fn matches(&self, record: &HistoricalRecord) -> bool {
        match self {
            CohortFilter::Window {
                column,
                center,
                radius,
            } => column
                .value(record)
                .map(|value| value >= center - radius && value <= center + radius)
                .unwrap_or(false),
            CohortFilter::Equals { column, value } => column.value(record) == value,
            CohortFilter::ConditionCount { column, count } => {
                condition_count(column.value(record)) == *count
            }
            CohortFilter::HasDangerousHobby(present) => {
                (record.dangerous_hobbies != NONE_LABEL) == *present
            }
        }
    }
}

/// Borrowed view of the rows matching a filter list.
#[derive(Debug, Clone)]
pub struct Cohort<'a> {
    members: Vec<&'a HistoricalRecord>,
}

impl<'a> Cohort<'a> {
    pub fn select(dataset: &'a HistoricalDataset, filters: &[CohortFilter]) -> Self {
        let members = dataset
            .records()
            .iter()
            .filter(|record| filters.iter().all(|filter| filter.matches(record)))
            .collect();
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members whose policy was issued.
    pub fn accepted(&self) -> Vec<&'a HistoricalRecord> {
        self.members
            .iter()
            .copied()
            .filter(|record| record.policy_accepted == Some(true))
            .collect()
    }

    fn mean_of(&self, value: impl Fn(&HistoricalRecord) -> Option<f64>) -> Option<f64> {
        mean(self.members.iter().filter_map(|record| value(record)))
    }

    fn share_of(&self, value: impl Fn(&HistoricalRecord) -> Option<bool>) -> Option<f64> {
        mean(
            self.members
                .iter()
                .filter_map(|record| value(record))
                .map(|flag| if flag { 1.0 } else { 0.0 }),
        )
    }
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Comparison statistics attached to a scoring step.
///
/// `cohort_size` and `avg_risk_score` are always present; the remaining
/// figures depend on which columns the dataset carries and which factor
/// requested the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub cohort_size: usize,
    pub avg_risk_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_premium: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chronic_condition_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_bmi: Option<f64>,
}

/// Extra statistics a factor wants reported alongside the base figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMetric {
    ClaimRate,
    AvgPremium,
    ChronicConditionRate,
    AvgBmi,
}

impl CohortSummary {
    /// Summarises `cohort`, or `None` when it is empty or nobody in it has an
    /// assigned risk score.
    pub fn from_cohort(cohort: &Cohort<'_>, metrics: &[SummaryMetric]) -> Option<Self> {
        if cohort.is_empty() {
            return None;
        }
        let avg_risk_score = cohort.mean_of(|record| record.risk_score_assigned)?;

        let wants = |metric: SummaryMetric| metrics.contains(&metric);
        let claim_rate = wants(SummaryMetric::ClaimRate)
            .then(|| cohort.share_of(|record| record.claim_filed))
            .flatten()
            .map(|share| share * 100.0);
        let avg_premium = wants(SummaryMetric::AvgPremium)
            .then(|| cohort.mean_of(|record| record.annual_premium_assigned))
            .flatten();
        let chronic_condition_rate = wants(SummaryMetric::ChronicConditionRate)
            .then(|| cohort.share_of(|record| Some(record.chronic_conditions != NONE_LABEL)))
            .flatten()
            .map(|share| share * 100.0);
        let avg_bmi = wants(SummaryMetric::AvgBmi)
            .then(|| cohort.mean_of(|record| record.bmi))
            .flatten();

        Some(Self {
            cohort_size: cohort.len(),
            avg_risk_score,
            claim_rate,
            avg_premium,
            chronic_condition_rate,
            avg_bmi,
        })
    }
}

/// Which rung of a relaxation ladder produced a cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortTier {
    /// Age ±5, same occupation class, same smoking status.
    Primary,
    /// Age ±10, same smoking status.
    WidenedAge,
    /// Age ±10 only.
    AgeOnly,
}

impl CohortTier {
    pub const fn label(self) -> &'static str {
        match self {
            CohortTier::Primary => "age ±5, occupation class, smoking status",
            CohortTier::WidenedAge => "age ±10, smoking status",
            CohortTier::AgeOnly => "age ±10",
        }
    }
}

#[derive(Debug, Clone)]
struct Rung {
    tier: CohortTier,
    filters: Vec<CohortFilter>,
    min_size: usize,
}

/// Ordered filter attempts, loosest last.
///
/// The first rung whose cohort reaches its minimum size wins. The final rung
/// is accepted whatever its size.
#[derive(Debug, Clone, Default)]
pub struct RelaxationLadder {
    rungs: Vec<Rung>,
}

impl RelaxationLadder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rung(mut self, tier: CohortTier, filters: Vec<CohortFilter>, min_size: usize) -> Self {
        self.rungs.push(Rung {
            tier,
            filters,
            min_size,
        });
        self
    }

    pub fn resolve<'a>(&self, dataset: &'a HistoricalDataset) -> Option<(CohortTier, Cohort<'a>)> {
        let last = self.rungs.len().checked_sub(1)?;
        for (index, rung) in self.rungs.iter().enumerate() {
            let cohort = Cohort::select(dataset, &rung.filters);
            if cohort.len() >= rung.min_size || index == last {
                return Some((rung.tier, cohort));
            }
            debug!(
                tier = rung.tier.label(),
                size = cohort.len(),
                min_size = rung.min_size,
                "cohort below minimum size, relaxing filters"
            );
        }
        None
    }
}
