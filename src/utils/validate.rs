use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::grade_entries::requests::{
    RecordAssignmentGradeRequest, RecordExamGradeRequest,
};

static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("Invalid course code regex"));

/// 其他成绩说明的最大长度（字符）
pub const MAX_REASON_CHARS: usize = 500;
/// 单条其他成绩的分值上限（绝对值）
pub const MAX_OTHER_POINTS: i64 = 1_000;

pub fn validate_course_code(code: &str) -> Result<(), &'static str> {
    // 课程代码长度校验：2 <= x <= 32
    let code = code.trim();
    if code.len() < 2 || code.len() > 32 {
        return Err("Course code length must be between 2 and 32 characters");
    }
    if !COURSE_CODE_RE.is_match(code) {
        return Err("Course code must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_course_name(name: &str) -> Result<(), &'static str> {
    let len = name.trim().chars().count();
    if len == 0 || len > 100 {
        return Err("Course name length must be between 1 and 100 characters");
    }
    Ok(())
}

pub fn validate_reason(reason: &str) -> Result<(), &'static str> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err("Reason must not be empty");
    }
    if reason.chars().count() > MAX_REASON_CHARS {
        return Err("Reason must be at most 500 characters");
    }
    Ok(())
}

pub fn validate_other_points(points: i64) -> Result<(), &'static str> {
    if !(-MAX_OTHER_POINTS..=MAX_OTHER_POINTS).contains(&points) {
        return Err("points must be between -1000 and 1000");
    }
    Ok(())
}

/// 作业成绩：满分为正数，得分在 [0, 满分] 内；未评分时得分为空
pub fn validate_assignment_grade(req: &RecordAssignmentGradeRequest) -> Result<(), &'static str> {
    if !req.points_possible.is_finite() || req.points_possible <= 0.0 {
        return Err("points_possible must be a positive number");
    }
    if let Some(earned) = req.points_earned {
        if !earned.is_finite() || earned < 0.0 {
            return Err("points_earned must be a non-negative number");
        }
        if earned > req.points_possible {
            return Err("points_earned must not exceed points_possible");
        }
    }
    Ok(())
}

/// 考试成绩：客观题与主观题得分非负，合计不超过满分
pub fn validate_exam_grade(req: &RecordExamGradeRequest) -> Result<(), &'static str> {
    if !req.points_possible.is_finite() || req.points_possible <= 0.0 {
        return Err("points_possible must be a positive number");
    }
    if !req.auto_score.is_finite() || req.auto_score < 0.0 {
        return Err("auto_score must be a non-negative number");
    }
    let manual = req.manual_score.unwrap_or(0.0);
    if !manual.is_finite() || manual < 0.0 {
        return Err("manual_score must be a non-negative number");
    }
    if req.auto_score + manual > req.points_possible {
        return Err("auto_score + manual_score must not exceed points_possible");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(earned: Option<f64>, possible: f64) -> RecordAssignmentGradeRequest {
        RecordAssignmentGradeRequest {
            student_id: 1,
            assignment_id: 1,
            points_earned: earned,
            points_possible: possible,
        }
    }

    fn exam(auto: f64, manual: Option<f64>, possible: f64) -> RecordExamGradeRequest {
        RecordExamGradeRequest {
            student_id: 1,
            exam_id: 1,
            auto_score: auto,
            manual_score: manual,
            points_possible: possible,
            graded: true,
        }
    }

    #[test]
    fn test_course_code() {
        assert!(validate_course_code("CS101").is_ok());
        assert!(validate_course_code("math-2.1_a").is_ok());
        assert!(validate_course_code("A").is_err());
        assert!(validate_course_code("-CS").is_err());
        assert!(validate_course_code("CS 101").is_err());
    }

    #[test]
    fn test_course_name() {
        assert!(validate_course_name("数据结构").is_ok());
        assert!(validate_course_name("   ").is_err());
        assert!(validate_course_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_reason() {
        assert!(validate_reason("课堂表现").is_ok());
        assert!(validate_reason("").is_err());
        assert!(validate_reason(&"加".repeat(500)).is_ok());
        assert!(validate_reason(&"加".repeat(501)).is_err());
    }

    #[test]
    fn test_other_points() {
        assert!(validate_other_points(-5).is_ok());
        assert!(validate_other_points(MAX_OTHER_POINTS).is_ok());
        assert!(validate_other_points(-MAX_OTHER_POINTS).is_ok());
        assert!(validate_other_points(MAX_OTHER_POINTS + 1).is_err());
        assert!(validate_other_points(i64::MAX).is_err());
        assert!(validate_other_points(i64::MIN).is_err());
    }

    #[test]
    fn test_assignment_grade() {
        assert!(validate_assignment_grade(&assignment(Some(8.5), 10.0)).is_ok());
        assert!(validate_assignment_grade(&assignment(None, 10.0)).is_ok());
        assert!(validate_assignment_grade(&assignment(Some(0.0), 0.0)).is_err());
        assert!(validate_assignment_grade(&assignment(Some(-1.0), 10.0)).is_err());
        assert!(validate_assignment_grade(&assignment(Some(11.0), 10.0)).is_err());
        assert!(validate_assignment_grade(&assignment(Some(f64::NAN), 10.0)).is_err());
    }

    #[test]
    fn test_exam_grade() {
        assert!(validate_exam_grade(&exam(40.0, Some(50.0), 100.0)).is_ok());
        assert!(validate_exam_grade(&exam(40.0, None, 40.0)).is_ok());
        assert!(validate_exam_grade(&exam(60.0, Some(50.0), 100.0)).is_err());
        assert!(validate_exam_grade(&exam(-1.0, None, 100.0)).is_err());
        assert!(validate_exam_grade(&exam(10.0, Some(f64::INFINITY), 100.0)).is_err());
    }
}
