//! 成绩条目
//!
//! 存储层返回完整的行（`AssignmentGrade` / `ExamGrade` / `OtherGrade`），
//! 成绩结算只消费已评分的精简条目（`*Entry`）。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 作业成绩行，`points_earned` 为空表示尚未评分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct AssignmentGrade {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub assignment_id: i64,
    pub points_earned: Option<f64>,
    pub points_possible: f64,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl AssignmentGrade {
    /// 已评分时返回结算条目
    pub fn graded_entry(&self) -> Option<AssignmentGradeEntry> {
        self.points_earned.map(|points_earned| AssignmentGradeEntry {
            student_id: self.student_id,
            assignment_id: self.assignment_id,
            points_earned,
            points_possible: self.points_possible,
        })
    }
}

/// 考试成绩行（客观题自动评分 + 主观题人工评分）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct ExamGrade {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub exam_id: i64,
    pub auto_score: f64,
    pub manual_score: Option<f64>,
    pub points_possible: f64,
    pub is_graded: bool,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ExamGrade {
    /// 已评分时返回结算条目，未批改的主观题按 0 分计
    pub fn graded_entry(&self) -> Option<ExamGradeEntry> {
        if !self.is_graded {
            return None;
        }
        Some(ExamGradeEntry {
            student_id: self.student_id,
            exam_id: self.exam_id,
            auto_score: self.auto_score,
            manual_score: self.manual_score.unwrap_or(0.0),
            points_possible: self.points_possible,
        })
    }
}

/// 其他成绩（加分、扣分、考勤等），分值可为负
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct OtherGrade {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub reason: String,
    pub points: i64,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl OtherGrade {
    pub fn entry(&self) -> OtherGradeEntry {
        OtherGradeEntry {
            student_id: self.student_id,
            course_id: self.course_id,
            reason: self.reason.clone(),
            points: self.points,
        }
    }
}

/// 已评分的作业条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentGradeEntry {
    pub student_id: i64,
    pub assignment_id: i64,
    pub points_earned: f64,
    pub points_possible: f64,
}

/// 已评分的考试条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamGradeEntry {
    pub student_id: i64,
    pub exam_id: i64,
    pub auto_score: f64,
    pub manual_score: f64,
    pub points_possible: f64,
}

impl ExamGradeEntry {
    pub fn score(&self) -> f64 {
        self.auto_score + self.manual_score
    }
}

/// 其他成绩条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherGradeEntry {
    pub student_id: i64,
    pub course_id: i64,
    pub reason: String,
    pub points: i64,
}
