use serde::Deserialize;
use ts_rs::TS;

// 发布/撤回课程最终成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/final_grade.ts")]
pub struct PublishFinalGradesRequest {
    pub published: bool,
}
