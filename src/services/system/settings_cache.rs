//! 动态配置缓存
//!
//! 启动时从数据库加载全部系统设置，之后随管理员修改热更新。
//! 等级分数段在写入缓存前完成解析和校验，缓存中只保存有效的表。

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::grading::GradeRangeTable;
use crate::models::system::entities::KnownSettingKey;

/// 动态配置缓存
static DYNAMIC_CONFIG: OnceLock<RwLock<DynamicConfigCache>> = OnceLock::new();

/// 动态配置缓存内部结构
#[derive(Debug, Default)]
struct DynamicConfigCache {
    settings: HashMap<String, String>,
    grade_ranges: Option<Arc<GradeRangeTable>>,
    initialized: bool,
}

fn cache() -> &'static RwLock<DynamicConfigCache> {
    DYNAMIC_CONFIG.get_or_init(|| RwLock::new(DynamicConfigCache::default()))
}

/// 解析保存的等级分数段，无效时记录日志并返回 None
pub(crate) fn parse_grade_ranges(value: &str) -> Option<Arc<GradeRangeTable>> {
    match GradeRangeTable::from_json(value) {
        Ok(table) => Some(Arc::new(table)),
        Err(e) => {
            warn!("等级分数段配置无效，结算将被拒绝: {}", e.message());
            None
        }
    }
}

/// 动态配置访问接口
pub struct DynamicConfig;

impl DynamicConfig {
    /// 初始化动态配置缓存
    /// 在应用启动时调用，从数据库加载配置
    pub async fn init(settings: Vec<(String, String)>) {
        let mut guard = cache().write().await;
        guard.settings.clear();
        guard.grade_ranges = None;

        for (key, value) in settings {
            if key == KnownSettingKey::GradeRanges.as_str() {
                guard.grade_ranges = parse_grade_ranges(&value);
            }
            guard.settings.insert(key, value);
        }
        guard.initialized = true;

        info!(
            "动态配置缓存初始化完成，加载了 {} 个配置项，等级分数段{}",
            guard.settings.len(),
            if guard.grade_ranges.is_some() {
                "已就绪"
            } else {
                "未配置"
            }
        );
    }

    /// 更新单个配置项
    pub async fn update(key: &str, value: &str) {
        let mut guard = cache().write().await;
        if key == KnownSettingKey::GradeRanges.as_str() {
            guard.grade_ranges = parse_grade_ranges(value);
        }
        guard.settings.insert(key.to_string(), value.to_string());
        debug!("动态配置更新: {}", key);
    }

    /// 替换已校验的等级分数段
    pub async fn set_grade_ranges(table: Arc<GradeRangeTable>, raw: String) {
        let mut guard = cache().write().await;
        guard.grade_ranges = Some(table);
        guard
            .settings
            .insert(KnownSettingKey::GradeRanges.as_str().to_string(), raw);
    }

    /// 当前生效的等级分数段
    pub async fn grade_ranges() -> Option<Arc<GradeRangeTable>> {
        cache().read().await.grade_ranges.clone()
    }

    /// 获取字符串配置
    async fn get_string(key: &str) -> Option<String> {
        cache().read().await.settings.get(key).cloned()
    }

    /// 获取整数配置
    async fn get_i64(key: &str) -> Option<i64> {
        Self::get_string(key).await.and_then(|v| v.parse().ok())
    }

    /// 获取 JSON 数组配置
    async fn get_json_array(key: &str) -> Option<Vec<String>> {
        Self::get_string(key)
            .await
            .and_then(|v| serde_json::from_str(&v).ok())
    }

    /// 获取系统名称
    pub async fn system_name() -> String {
        Self::get_string(KnownSettingKey::SystemName.as_str())
            .await
            .unwrap_or_else(|| AppConfig::get().app.system_name.clone())
    }

    /// 获取允许的跨域来源
    pub async fn cors_allowed_origins() -> Vec<String> {
        Self::get_json_array(KnownSettingKey::CorsAllowedOrigins.as_str())
            .await
            .unwrap_or_else(|| AppConfig::get().cors.allowed_origins.clone())
    }

    /// 获取 CORS 预检请求缓存时间（秒）
    pub async fn cors_max_age() -> usize {
        Self::get_i64(KnownSettingKey::CorsMaxAge.as_str())
            .await
            .map(|v| v.max(0) as usize)
            .unwrap_or_else(|| AppConfig::get().cors.max_age)
    }

    /// 检查缓存是否已初始化
    pub async fn is_initialized() -> bool {
        cache().read().await.initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grade_ranges() {
        let valid = r#"[
            {"letter":"P","min":50,"max":100,"grade_points":1.0},
            {"letter":"F","min":0,"max":49,"grade_points":0.0}
        ]"#;
        let table = parse_grade_ranges(valid).unwrap();
        assert_eq!(table.highest().letter, "P");

        assert!(parse_grade_ranges(r#"[{"letter":"P","min":50,"max":100,"grade_points":1.0}]"#).is_none());
        assert!(parse_grade_ranges("not json").is_none());
    }

    #[tokio::test]
    async fn test_invalid_stored_table_left_unset() {
        DynamicConfig::init(vec![(
            KnownSettingKey::GradeRanges.as_str().to_string(),
            "[]".to_string(),
        )])
        .await;
        assert!(DynamicConfig::is_initialized().await);
        assert!(DynamicConfig::grade_ranges().await.is_none());

        let valid = r#"[{"letter":"A","min":0,"max":100,"grade_points":4.0}]"#;
        DynamicConfig::update(KnownSettingKey::GradeRanges.as_str(), valid).await;
        let table = DynamicConfig::grade_ranges().await.unwrap();
        assert_eq!(table.resolve(42).letter, "A");
    }
}
