use std::fmt::Write;

use chrono::NaiveDate;

use crate::aggregate;
use crate::models::{
    AggregateResult, Category, Climb, CourseEntry, PlannedStatus, TargetProjection,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CreditShare {
    pub category: Category,
    pub credits: f64,
    pub share: f64,
}

/// Credits per category and their share of the total, the data behind the
/// credit pie chart.
pub fn credit_distribution(result: &AggregateResult) -> Vec<CreditShare> {
    result
        .per_category
        .iter()
        .map(|(category, summary)| CreditShare {
            category: *category,
            credits: summary.total_credits,
            share: summary.total_credits / result.total_credits,
        })
        .collect()
}

pub fn build_report(
    entries: &[CourseEntry],
    result: &AggregateResult,
    generated_on: NaiveDate,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# GPA Report");
    let _ = writeln!(output, "Generated on {}", generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "- Total credits: {}", result.total_credits);
    let _ = writeln!(output, "- Average score: {:.2}", result.average_score);
    let _ = writeln!(output, "- GPA: {:.2}", result.average_gpa);
    let _ = writeln!(output, "- Grade: {}", result.letter_grade);

    let skipped = aggregate::skipped_count(entries);
    if skipped > 0 {
        let _ = writeln!(
            output,
            "- Skipped {} course(s) without a numeric credit and score",
            skipped
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## By Category");
    for (category, summary) in result.per_category.iter() {
        let _ = writeln!(
            output,
            "- {}: average {:.2} / GPA {:.2}",
            category.label(),
            summary.average_score,
            summary.average_gpa
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Credit Distribution");
    for share in credit_distribution(result) {
        let _ = writeln!(
            output,
            "- {}: {} credits ({:.1}%)",
            share.category.label(),
            share.credits,
            share.share * 100.0
        );
    }

    output
}

pub fn build_projection_report(projection: &TargetProjection) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "## Target GPA {:.2}", projection.target_gpa);
    let _ = writeln!(output, "Current GPA: {:.2}", projection.current_gpa);

    if let Some(planned) = projection.planned {
        let _ = writeln!(
            output,
            "Taking {} credits next term, you need an average GPA of {:.2} to reach the target.",
            planned.planned_credits, planned.required_gpa
        );
        match planned.status {
            PlannedStatus::Unreachable => {
                let _ = writeln!(
                    output,
                    "That is above the 4.0 cap; the target cannot be reached without retaking earlier courses."
                );
            }
            PlannedStatus::AlreadyAchieved => {
                let _ = writeln!(output, "You have already reached this target.");
            }
            PlannedStatus::Feasible => {}
        }
    }

    match projection.climb {
        Some(Climb::MathematicallyUnreachable) => {
            let _ = writeln!(
                output,
                "An average of 4.0 is a limit: new courses can approach it but never reach it."
            );
        }
        Some(Climb::AdditionalCreditsAtMaxGpa(credits)) => {
            let _ = writeln!(
                output,
                "Scoring 4.0 in every course from now on, you need about {} more credits.",
                credits
            );
        }
        None => {}
    }

    if projection.already_above {
        let _ = writeln!(
            output,
            "Your current GPA ({:.2}) is already above the target.",
            projection.current_gpa
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::models::Baseline;
    use crate::projection::project_target;

    fn sample_entries() -> Vec<CourseEntry> {
        vec![
            CourseEntry::new("Linear Algebra", Category::Required, "3", "85"),
            CourseEntry::new("Film Studies", Category::Elective, "2", "70"),
            CourseEntry::new("Swimming", Category::PhysicalEd, "", "90"),
        ]
    }

    #[test]
    fn distribution_shares_sum_to_one() {
        let result = aggregate(&sample_entries()).expect("valid input");
        let shares = credit_distribution(&result);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, Category::Required);
        assert!((shares[0].share - 0.6).abs() < 1e-9);
        let total: f64 = shares.iter().map(|share| share.share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn report_lists_summary_and_categories() {
        let entries = sample_entries();
        let result = aggregate(&entries).expect("valid input");
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
        let report = build_report(&entries, &result, date);

        assert!(report.contains("Generated on 2026-01-15"));
        assert!(report.contains("- Total credits: 5"));
        assert!(report.contains("- Average score: 79.00"));
        assert!(report.contains("- GPA: 3.60"));
        assert!(report.contains("- Grade: B+"));
        assert!(report.contains("- Skipped 1 course(s)"));
        assert!(report.contains("- Required: average 85.00 / GPA 4.00"));
        assert!(report.contains("- Elective: 2 credits (40.0%)"));
    }

    #[test]
    fn projection_report_covers_each_branch() {
        let baseline = Baseline {
            credits: 5.0,
            weighted_gpa_sum: 18.0,
        };
        let projection = project_target(baseline, 3.8, Some(3.0)).expect("baseline");
        let text = build_projection_report(&projection);
        assert!(text.contains("average GPA of 4.13"));
        assert!(text.contains("above the 4.0 cap"));
        assert!(text.contains("about 5 more credits"));

        let projection = project_target(baseline, 4.0, None).expect("baseline");
        assert!(build_projection_report(&projection).contains("is a limit"));

        let projection = project_target(baseline, 2.0, None).expect("baseline");
        assert!(build_projection_report(&projection).contains("(3.60) is already above"));
    }
}
