pub mod enroll;
pub mod list;
pub mod withdraw;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::{EnrollStudentRequest, EnrollmentQueryParams};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    // 学生加入课程
    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        course_id: i64,
        enroll_data: EnrollStudentRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_student(self, request, course_id, enroll_data).await
    }

    // 课程选课名单
    pub async fn list_enrollments(
        &self,
        request: &HttpRequest,
        course_id: i64,
        query: EnrollmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, request, course_id, query).await
    }

    // 学生退课
    pub async fn drop_student(
        &self,
        request: &HttpRequest,
        course_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        withdraw::drop_student(self, request, course_id, student_id).await
    }
}
