pub mod finalize;
pub mod get_mine;
pub mod list;
pub mod publish;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::final_grades::requests::PublishFinalGradesRequest;
use crate::storage::Storage;

/// 课程最终成绩列表的缓存键
pub(crate) fn final_grades_cache_key(course_id: i64) -> String {
    format!("final_grades:course:{course_id}")
}

pub struct FinalGradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl FinalGradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 缓存未注册时直接读写存储
    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .map(|cache| cache.get_ref().clone())
    }

    /// 结算或发布后清除列表缓存
    pub(crate) async fn invalidate_list_cache(&self, request: &HttpRequest, course_id: i64) {
        if let Some(cache) = self.get_cache(request) {
            cache.remove(&final_grades_cache_key(course_id)).await;
        }
    }

    // 结算课程最终成绩
    pub async fn finalize_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        finalize::finalize_course(self, request, course_id).await
    }

    // 课程最终成绩列表
    pub async fn list_final_grades(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_final_grades(self, request, course_id).await
    }

    // 学生查看自己的最终成绩
    pub async fn get_my_final_grade(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        get_mine::get_my_final_grade(self, request, course_id).await
    }

    // 发布或撤回最终成绩
    pub async fn publish_final_grades(
        &self,
        request: &HttpRequest,
        course_id: i64,
        publish_data: PublishFinalGradesRequest,
    ) -> ActixResult<HttpResponse> {
        publish::publish_final_grades(self, request, course_id, publish_data).await
    }
}
