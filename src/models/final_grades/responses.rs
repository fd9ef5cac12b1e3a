use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::FinalGradeRecord;

// 课程最终成绩列表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/final_grade.ts")]
pub struct FinalGradeListResponse {
    pub course_id: i64,
    pub items: Vec<FinalGradeRecord>,
}

// 单个学生写入失败信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/final_grade.ts")]
pub struct StudentFailure {
    pub student_id: i64,
    pub message: String,
}

// 一次结算的结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/final_grade.ts")]
pub struct FinalizeReport {
    pub run_id: uuid::Uuid,
    pub course_id: i64,
    pub finalized: usize,
    pub failures: Vec<StudentFailure>,
    pub records: Vec<FinalGradeRecord>,
}

impl FinalizeReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// 发布结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/final_grade.ts")]
pub struct PublishFinalGradesResponse {
    pub course_id: i64,
    pub published: bool,
    pub updated: u64,
}
