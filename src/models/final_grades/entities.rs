use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 最终成绩计算方式
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/final_grade.ts")]
pub enum CalculationMethod {
    AutomaticSum, // 作业 + 考试 + 其他成绩直接累加
}

impl CalculationMethod {
    pub const AUTOMATIC_SUM: &'static str = "automatic_sum";
}

impl<'de> Deserialize<'de> for CalculationMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationMethod::AutomaticSum => write!(f, "{}", CalculationMethod::AUTOMATIC_SUM),
        }
    }
}

impl std::str::FromStr for CalculationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CalculationMethod::AUTOMATIC_SUM => Ok(CalculationMethod::AutomaticSum),
            _ => Err(format!("无效的计算方式: '{s}'. 支持的方式: automatic_sum")),
        }
    }
}

/// 最终成绩记录
///
/// 每个 (course_id, student_id) 只保留一条，重新结算时整体覆盖。
/// `final_grade` 是未封顶的四舍五入总分，`letter_grade` / `grade_points`
/// 由封顶到 100 之后的分数得出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/final_grade.ts")]
pub struct FinalGradeRecord {
    pub course_id: i64,
    pub student_id: i64,
    pub final_grade: i64,
    pub letter_grade: String,
    pub grade_points: f64,
    pub assignments_total: f64,
    pub assignments_max: f64,
    pub exams_total: f64,
    pub exams_max: f64,
    pub other_total: i64,
    pub calculation_method: CalculationMethod,
    pub is_published: bool,
    pub calculated_at: chrono::DateTime<chrono::Utc>,
}

impl FinalGradeRecord {
    /// 复合主键
    pub fn key(&self) -> (i64, i64) {
        (self.course_id, self.student_id)
    }
}
