use crate::error::{GradeError, GradeResult};
use crate::models::{Baseline, Climb, PlannedOutcome, PlannedStatus, TargetProjection};

pub const MAX_GPA: f64 = 4.0;

// Quotients that should be whole numbers often land a few ulps above them.
const CEIL_SLACK: f64 = 4.0 * f64::EPSILON;

/// Whole credits covering `needed`, ignoring rounding noise in the last bits.
fn ceil_credits(needed: f64) -> u64 {
    (needed * (1.0 - CEIL_SLACK)).ceil().max(0.0) as u64
}

/// Works out what it takes to move from `baseline` to `target_gpa`.
///
/// The planned-credits answer, the credits-at-4.0 answer and the
/// already-above notice are computed independently; any of them may be set.
pub fn project_target(
    baseline: Baseline,
    target_gpa: f64,
    planned_credits: Option<f64>,
) -> GradeResult<TargetProjection> {
    if baseline.credits.is_nan() || baseline.credits <= 0.0 {
        return Err(GradeError::NoBaseline);
    }
    if !target_gpa.is_finite() {
        return Err(GradeError::InvalidTarget(target_gpa));
    }

    let current_gpa = baseline.weighted_gpa_sum / baseline.credits;
    // A plan that is not a finite number counts as no plan at all.
    let planned_credits = planned_credits.filter(|credits| credits.is_finite());

    let planned = planned_credits
        .filter(|credits| *credits > 0.0)
        .map(|credits| {
            let required_gpa = (target_gpa * (baseline.credits + credits)
                - baseline.weighted_gpa_sum)
                / credits;
            let status = if required_gpa > MAX_GPA {
                PlannedStatus::Unreachable
            } else if required_gpa < 0.0 {
                PlannedStatus::AlreadyAchieved
            } else {
                PlannedStatus::Feasible
            };
            PlannedOutcome {
                planned_credits: credits,
                required_gpa,
                status,
            }
        });

    let climb = (target_gpa > current_gpa).then(|| {
        if target_gpa >= MAX_GPA {
            Climb::MathematicallyUnreachable
        } else {
            let needed = (target_gpa * baseline.credits - baseline.weighted_gpa_sum)
                / (MAX_GPA - target_gpa);
            Climb::AdditionalCreditsAtMaxGpa(ceil_credits(needed))
        }
    });

    let already_above = target_gpa < current_gpa && planned_credits.is_none();

    Ok(TargetProjection {
        current_gpa,
        target_gpa,
        planned,
        climb,
        already_above,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline(credits: f64, weighted_gpa_sum: f64) -> Baseline {
        Baseline {
            credits,
            weighted_gpa_sum,
        }
    }

    #[test]
    fn planned_credits_above_cap_are_unreachable() {
        let projection = project_target(baseline(5.0, 18.0), 3.8, Some(3.0)).expect("baseline");
        let planned = projection.planned.expect("planned outcome");
        assert!((planned.required_gpa - 4.1333).abs() < 0.001);
        assert_eq!(planned.status, PlannedStatus::Unreachable);
        assert_eq!(projection.climb, Some(Climb::AdditionalCreditsAtMaxGpa(5)));
        assert!(!projection.already_above);
    }

    #[test]
    fn credits_needed_at_max_gpa() {
        let projection = project_target(baseline(10.0, 30.0), 3.5, None).expect("baseline");
        assert_eq!(projection.current_gpa, 3.0);
        assert_eq!(projection.climb, Some(Climb::AdditionalCreditsAtMaxGpa(10)));
        assert!(projection.planned.is_none());
    }

    #[test]
    fn needed_credits_round_up() {
        let projection = project_target(baseline(10.0, 30.0), 3.3, None).expect("baseline");
        // (33 - 30) / 0.7 = 4.28...
        assert_eq!(projection.climb, Some(Climb::AdditionalCreditsAtMaxGpa(5)));
    }

    #[test]
    fn four_point_target_is_a_limit() {
        let projection = project_target(baseline(10.0, 30.0), 4.0, Some(5.0)).expect("baseline");
        assert_eq!(projection.climb, Some(Climb::MathematicallyUnreachable));
        let planned = projection.planned.expect("planned outcome");
        assert_eq!(planned.required_gpa, 6.0);
        assert_eq!(planned.status, PlannedStatus::Unreachable);
    }

    #[test]
    fn feasible_plan() {
        let projection = project_target(baseline(10.0, 30.0), 3.2, Some(10.0)).expect("baseline");
        let planned = projection.planned.expect("planned outcome");
        assert!((planned.required_gpa - 3.4).abs() < 1e-9);
        assert_eq!(planned.status, PlannedStatus::Feasible);
    }

    #[test]
    fn target_below_current_without_plan_is_already_above() {
        let projection = project_target(baseline(10.0, 35.0), 3.0, None).expect("baseline");
        assert!(projection.already_above);
        assert!(projection.climb.is_none());
        assert!(projection.planned.is_none());
    }

    #[test]
    fn target_below_current_with_plan_reports_plan_only() {
        let projection = project_target(baseline(10.0, 40.0), 1.0, Some(2.0)).expect("baseline");
        let planned = projection.planned.expect("planned outcome");
        assert_eq!(planned.status, PlannedStatus::AlreadyAchieved);
        assert!(!projection.already_above);
        assert!(projection.climb.is_none());
    }

    #[test]
    fn non_positive_plan_is_ignored() {
        let projection = project_target(baseline(10.0, 30.0), 3.5, Some(0.0)).expect("baseline");
        assert!(projection.planned.is_none());
        assert!(!projection.already_above);
    }

    #[test]
    fn infinite_plan_is_treated_as_absent() {
        let projection =
            project_target(baseline(10.0, 35.0), 3.0, Some(f64::INFINITY)).expect("baseline");
        assert!(projection.planned.is_none());
        assert!(projection.already_above);
    }

    #[test]
    fn nan_plan_is_treated_as_absent() {
        let projection =
            project_target(baseline(10.0, 35.0), 3.0, Some(f64::NAN)).expect("baseline");
        assert!(projection.planned.is_none());
        assert!(projection.already_above);
    }

    #[test]
    fn target_equal_to_current_reports_nothing() {
        let projection = project_target(baseline(10.0, 30.0), 3.0, None).expect("baseline");
        assert_eq!(projection.current_gpa, 3.0);
        assert!(projection.planned.is_none());
        assert!(projection.climb.is_none());
        assert!(!projection.already_above);
    }

    #[test]
    fn ceiling_ignores_only_rounding_noise() {
        assert_eq!(ceil_credits(10.0), 10);
        assert_eq!(ceil_credits(5.000000000000001), 5);
        assert_eq!(ceil_credits(5.0000000001), 6);
        assert_eq!(ceil_credits(4.2), 5);
        assert_eq!(ceil_credits(0.0), 0);
    }

    #[test]
    fn missing_baseline_is_an_error() {
        assert_eq!(
            project_target(baseline(0.0, 0.0), 3.0, None),
            Err(GradeError::NoBaseline)
        );
    }

    #[test]
    fn nan_target_is_rejected() {
        let result = project_target(baseline(3.0, 9.0), f64::NAN, None);
        assert!(matches!(result, Err(GradeError::InvalidTarget(_))));
    }
}
