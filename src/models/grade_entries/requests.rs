use serde::Deserialize;
use ts_rs::TS;

// 登记作业成绩（按 课程+学生+作业 覆盖写入）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct RecordAssignmentGradeRequest {
    pub student_id: i64,
    pub assignment_id: i64,
    pub points_earned: Option<f64>, // 为空表示已提交但尚未评分
    pub points_possible: f64,
}

// 登记考试成绩（按 课程+学生+考试 覆盖写入）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct RecordExamGradeRequest {
    pub student_id: i64,
    pub exam_id: i64,
    pub auto_score: f64,
    pub manual_score: Option<f64>,
    pub points_possible: f64,
    #[serde(default)]
    pub graded: bool,
}

// 新增其他成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct CreateOtherGradeRequest {
    pub student_id: i64,
    pub reason: String,
    pub points: i64,
}

// 修改其他成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct UpdateOtherGradeRequest {
    pub reason: Option<String>,
    pub points: Option<i64>,
}

// 成绩条目查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_entry.ts")]
pub struct GradeEntryQuery {
    pub student_id: Option<i64>,
}
