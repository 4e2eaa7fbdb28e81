use super::*;

fn assignment(score: f64, max_score: f64, weight: Option<f64>) -> Assignment {
    Assignment { name: None, score, max_score, weight }
}

#[test]
fn letter_boundaries() {
    assert_eq!(letter(97.0), ("A+", 4.0));
    assert_eq!(letter(92.99), ("A-", 3.7));
    assert_eq!(letter(80.0), ("B-", 2.7));
    assert_eq!(letter(60.0), ("D-", 0.7));
    assert_eq!(letter(59.99), ("F", 0.0));
}

#[test]
fn equal_weights_average_percentages() {
    let out = grade(GradeRequest { assignments: vec![assignment(45.0, 50.0, None), assignment(80.0, 100.0, None)] }).unwrap();
    assert!((out.percent - 85.0).abs() < 1e-9);
    assert_eq!(out.letter, "B");
    assert!((out.points_earned - 125.0).abs() < 1e-9);
    assert!((out.points_possible - 150.0).abs() < 1e-9);
    assert_eq!(out.assignments[0].name, "Assignment 1");
    assert_eq!(out.assignments[0].letter, "A-");
}

#[test]
fn explicit_weights_shift_the_average() {
    let out = grade(GradeRequest {
        assignments: vec![assignment(100.0, 100.0, Some(3.0)), assignment(60.0, 100.0, Some(1.0))],
    })
    .unwrap();
    assert!((out.percent - 90.0).abs() < 1e-9);
    assert_eq!(out.letter, "A-");
}

#[test]
fn rejects_empty_and_zero_max() {
    assert!(grade(GradeRequest { assignments: vec![] }).is_err());
    let err = grade(GradeRequest { assignments: vec![assignment(5.0, 0.0, None)] }).unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput { field: "max_score", .. }));
}

#[test]
fn rejects_all_zero_weights() {
    let err = grade(GradeRequest { assignments: vec![assignment(5.0, 10.0, Some(0.0))] }).unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput { field: "weight", .. }));
}
