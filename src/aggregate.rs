use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::{GradeError, GradeResult};
use crate::grading::{gpa_from_score, letter_grade};
use crate::models::{
    AggregateResult, Baseline, Category, CategoryStats, CategorySummary, CourseEntry,
};

pub fn aggregate(entries: &[CourseEntry]) -> GradeResult<AggregateResult> {
    let mut overall = CategoryStats::default();
    let mut stats: BTreeMap<Category, CategoryStats> = BTreeMap::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(record) = entry.to_record() else {
            debug!(index, name = %entry.name, "skipping course without numeric credit and score");
            continue;
        };

        let gpa = gpa_from_score(record.score);
        trace!(
            name = %record.name,
            credit = record.credit,
            score = record.score,
            gpa,
            "counting course"
        );
        let category = stats.entry(record.category).or_default();
        for target in [&mut overall, category] {
            target.total_credits += record.credit;
            target.weighted_score_sum += record.score * record.credit;
            target.weighted_gpa_sum += gpa * record.credit;
        }
    }

    if !overall.total_credits.is_finite() || overall.total_credits <= 0.0 {
        return Err(GradeError::EmptyInput);
    }

    let average_score = overall.weighted_score_sum / overall.total_credits;
    let average_gpa = overall.weighted_gpa_sum / overall.total_credits;

    let per_category = stats
        .into_iter()
        .filter(|(_, stats)| stats.total_credits > 0.0)
        .map(|(category, stats)| {
            (
                category,
                CategorySummary {
                    total_credits: stats.total_credits,
                    average_score: stats.weighted_score_sum / stats.total_credits,
                    average_gpa: stats.weighted_gpa_sum / stats.total_credits,
                },
            )
        })
        .collect();

    Ok(AggregateResult {
        total_credits: overall.total_credits,
        weighted_score_sum: overall.weighted_score_sum,
        weighted_gpa_sum: overall.weighted_gpa_sum,
        average_score,
        average_gpa,
        letter_grade: letter_grade(average_score),
        per_category,
    })
}

impl AggregateResult {
    pub fn baseline(&self) -> Baseline {
        Baseline {
            credits: self.total_credits,
            weighted_gpa_sum: self.weighted_gpa_sum,
        }
    }
}

pub fn skipped_count(entries: &[CourseEntry]) -> usize {
    entries.iter().filter(|entry| entry.to_record().is_none()).count()
}
