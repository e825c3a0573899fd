use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Required,
    Elective,
    GeneralEd,
    PhysicalEd,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Required,
        Category::Elective,
        Category::GeneralEd,
        Category::PhysicalEd,
        Category::Other,
    ];

    /// Stable identifier used in snapshots and on the command line.
    pub fn code(&self) -> &'static str {
        match self {
            Category::Required => "required",
            Category::Elective => "elective",
            Category::GeneralEd => "general_ed",
            Category::PhysicalEd => "physical_ed",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Required => "Required",
            Category::Elective => "Elective",
            Category::GeneralEd => "General Education",
            Category::PhysicalEd => "Physical Education",
            Category::Other => "Other",
        }
    }

    /// Accepts the snapshot codes, the variant names in any case and the
    /// labels written by the browser version of the calculator.
    pub fn parse(value: &str) -> Option<Category> {
        let normalized = value.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "required" | "必修" => Some(Category::Required),
            "elective" | "選修" => Some(Category::Elective),
            "general_ed" | "generaled" | "general_education" | "通識" => {
                Some(Category::GeneralEd)
            }
            "physical_ed" | "physicaled" | "physical_education" | "體育" => {
                Some(Category::PhysicalEd)
            }
            "other" | "其他" => Some(Category::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value).unwrap_or(Category::Other)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.code().to_string()
    }
}

/// A credit or score exactly as it was entered. Snapshots written by the
/// browser store these as strings, hand-written ones often use numbers.
/// Anything else (`null`, booleans, nested values) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Raw(serde_json::Value),
}

impl FieldValue {
    pub fn value(&self) -> Option<f64> {
        let parsed = match self {
            FieldValue::Number(number) => *number,
            FieldValue::Text(text) => text.trim().parse::<f64>().ok()?,
            FieldValue::Raw(_) => return None,
        };
        parsed.is_finite().then_some(parsed)
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Raw(serde_json::Value::Null) => Ok(()),
            FieldValue::Raw(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// One course row as entered and persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub credit: FieldValue,
    #[serde(default)]
    pub score: FieldValue,
}

impl CourseEntry {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        credit: impl Into<FieldValue>,
        score: impl Into<FieldValue>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            credit: credit.into(),
            score: score.into(),
        }
    }

    /// `None` when either credit or score does not parse; such rows take
    /// no part in any aggregate.
    pub fn to_record(&self) -> Option<CourseRecord> {
        Some(CourseRecord {
            name: self.name.clone(),
            category: self.category,
            credit: self.credit.value()?,
            score: self.score.value()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    pub name: String,
    pub category: Category,
    pub credit: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryStats {
    pub total_credits: f64,
    pub weighted_score_sum: f64,
    pub weighted_gpa_sum: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySummary {
    pub total_credits: f64,
    pub average_score: f64,
    pub average_gpa: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub total_credits: f64,
    pub weighted_score_sum: f64,
    pub weighted_gpa_sum: f64,
    pub average_score: f64,
    pub average_gpa: f64,
    pub letter_grade: &'static str,
    pub per_category: BTreeMap<Category, CategorySummary>,
}

/// Credits already earned and their GPA-weighted sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub credits: f64,
    pub weighted_gpa_sum: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlannedStatus {
    Feasible,
    Unreachable,
    AlreadyAchieved,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedOutcome {
    pub planned_credits: f64,
    pub required_gpa: f64,
    pub status: PlannedStatus,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Climb {
    MathematicallyUnreachable,
    AdditionalCreditsAtMaxGpa(u64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetProjection {
    pub current_gpa: f64,
    pub target_gpa: f64,
    pub planned: Option<PlannedOutcome>,
    pub climb: Option<Climb>,
    pub already_above: bool,
}
