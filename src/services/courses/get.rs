use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::course_access::{
    check_course_manage_permission, current_user, fetch_course, internal_error,
};

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let course = match fetch_course(&storage, course_id).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    // 学生只能查看已选的课程
    if user.role == UserRole::Student {
        match storage.get_enrollment(course_id, user.id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::StudentNotEnrolled,
                    "You are not enrolled in this course",
                )));
            }
            Err(e) => return Ok(internal_error("Failed to get enrollment", e)),
        }
    } else if let Err(resp) = check_course_manage_permission(&user, &course) {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        course,
        "Course information retrieved successfully",
    )))
}
