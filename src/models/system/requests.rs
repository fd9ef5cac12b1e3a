use serde::Deserialize;
use ts_rs::TS;

use crate::grading::GradeRange;

/// 更新等级分数段请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct UpdateGradeRangesRequest {
    pub ranges: Vec<GradeRange>,
}

/// 更新普通配置请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct UpdateSettingRequest {
    pub value: String,
}

/// 审计日志查询参数
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SettingAuditQuery {
    pub key: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}
