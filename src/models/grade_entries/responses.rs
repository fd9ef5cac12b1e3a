use serde::Serialize;
use ts_rs::TS;

use super::entities::{AssignmentGrade, ExamGrade, OtherGrade};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct AssignmentGradeListResponse {
    pub course_id: i64,
    pub items: Vec<AssignmentGrade>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct ExamGradeListResponse {
    pub course_id: i64,
    pub items: Vec<ExamGrade>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct OtherGradeListResponse {
    pub course_id: i64,
    pub total_points: i64,
    pub items: Vec<OtherGrade>,
}
