/// Grade points on the 4.0 scale. Each tier includes its lower bound.
pub fn gpa_from_score(score: f64) -> f64 {
    match score {
        s if s >= 80.0 => 4.0,
        s if s >= 70.0 => 3.0,
        s if s >= 60.0 => 2.0,
        s if s >= 50.0 => 1.0,
        _ => 0.0,
    }
}

/// Letter grade for an overall average score.
///
/// | Range  | Grade |
/// |--------|-------|
/// | >= 90  | A+    |
/// | >= 85  | A     |
/// | >= 80  | A-    |
/// | >= 77  | B+    |
/// | >= 73  | B     |
/// | >= 70  | B-    |
/// | >= 67  | C+    |
/// | >= 63  | C     |
/// | >= 60  | C-    |
/// | >= 50  | D     |
/// | < 50   | F     |
pub fn letter_grade(average_score: f64) -> &'static str {
    match average_score {
        s if s >= 90.0 => "A+",
        s if s >= 85.0 => "A",
        s if s >= 80.0 => "A-",
        s if s >= 77.0 => "B+",
        s if s >= 73.0 => "B",
        s if s >= 70.0 => "B-",
        s if s >= 67.0 => "C+",
        s if s >= 63.0 => "C",
        s if s >= 60.0 => "C-",
        s if s >= 50.0 => "D",
        _ => "F",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpa_tiers_are_closed_on_lower_bound() {
        assert_eq!(gpa_from_score(100.0), 4.0);
        assert_eq!(gpa_from_score(80.0), 4.0);
        assert_eq!(gpa_from_score(79.999), 3.0);
        assert_eq!(gpa_from_score(70.0), 3.0);
        assert_eq!(gpa_from_score(69.5), 2.0);
        assert_eq!(gpa_from_score(60.0), 2.0);
        assert_eq!(gpa_from_score(59.0), 1.0);
        assert_eq!(gpa_from_score(50.0), 1.0);
        assert_eq!(gpa_from_score(49.9), 0.0);
        assert_eq!(gpa_from_score(0.0), 0.0);
    }

    #[test]
    fn gpa_is_defined_outside_score_range() {
        assert_eq!(gpa_from_score(130.0), 4.0);
        assert_eq!(gpa_from_score(-5.0), 0.0);
        assert_eq!(gpa_from_score(f64::NAN), 0.0);
    }

    #[test]
    fn every_score_in_top_tier_maps_to_four() {
        for tenth in 800..=1000 {
            assert_eq!(gpa_from_score(tenth as f64 / 10.0), 4.0);
        }
    }

    #[test]
    fn letter_grade_boundaries() {
        assert_eq!(letter_grade(95.0), "A+");
        assert_eq!(letter_grade(90.0), "A+");
        assert_eq!(letter_grade(89.99), "A");
        assert_eq!(letter_grade(85.0), "A");
        assert_eq!(letter_grade(80.0), "A-");
        assert_eq!(letter_grade(79.0), "B+");
        assert_eq!(letter_grade(77.0), "B+");
        assert_eq!(letter_grade(73.0), "B");
        assert_eq!(letter_grade(70.0), "B-");
        assert_eq!(letter_grade(67.0), "C+");
        assert_eq!(letter_grade(63.0), "C");
        assert_eq!(letter_grade(60.0), "C-");
        assert_eq!(letter_grade(50.0), "D");
        assert_eq!(letter_grade(49.0), "F");
    }
}
