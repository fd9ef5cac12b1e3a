pub mod assignments;
pub mod exams;
pub mod other;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grade_entries::requests::{
    CreateOtherGradeRequest, GradeEntryQuery, RecordAssignmentGradeRequest,
    RecordExamGradeRequest, UpdateOtherGradeRequest,
};
use crate::storage::Storage;

pub struct GradeEntryService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeEntryService {
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

    pub async fn record_assignment_grade(
        &self,
        request: &HttpRequest,
        course_id: i64,
        grade: RecordAssignmentGradeRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::record_assignment_grade(self, request, course_id, grade).await
    }

    pub async fn list_assignment_grades(
        &self,
        request: &HttpRequest,
        course_id: i64,
        query: GradeEntryQuery,
    ) -> ActixResult<HttpResponse> {
        assignments::list_assignment_grades(self, request, course_id, query).await
    }

    pub async fn record_exam_grade(
        &self,
        request: &HttpRequest,
        course_id: i64,
        grade: RecordExamGradeRequest,
    ) -> ActixResult<HttpResponse> {
        exams::record_exam_grade(self, request, course_id, grade).await
    }

    pub async fn list_exam_grades(
        &self,
        request: &HttpRequest,
        course_id: i64,
        query: GradeEntryQuery,
    ) -> ActixResult<HttpResponse> {
        exams::list_exam_grades(self, request, course_id, query).await
    }

    pub async fn create_other_grade(
        &self,
        request: &HttpRequest,
        course_id: i64,
        grade: CreateOtherGradeRequest,
    ) -> ActixResult<HttpResponse> {
        other::create_other_grade(self, request, course_id, grade).await
    }

    pub async fn update_other_grade(
        &self,
        request: &HttpRequest,
        course_id: i64,
        other_grade_id: i64,
        update: UpdateOtherGradeRequest,
    ) -> ActixResult<HttpResponse> {
        other::update_other_grade(self, request, course_id, other_grade_id, update).await
    }

    pub async fn delete_other_grade(
        &self,
        request: &HttpRequest,
        course_id: i64,
        other_grade_id: i64,
    ) -> ActixResult<HttpResponse> {
        other::delete_other_grade(self, request, course_id, other_grade_id).await
    }

    pub async fn list_other_grades(
        &self,
        request: &HttpRequest,
        course_id: i64,
        query: GradeEntryQuery,
    ) -> ActixResult<HttpResponse> {
        other::list_other_grades(self, request, course_id, query).await
    }
}
