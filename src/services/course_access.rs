//! 课程级权限校验
//!
//! 课程的写操作（选课、登记成绩、结算、发布）只允许授课教师和管理员执行。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::middlewares::RequireJWT;
use crate::models::courses::entities::Course;
use crate::models::users::entities::{CurrentUser, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从请求中取出当前用户
pub(crate) fn current_user(request: &HttpRequest) -> Result<CurrentUser, HttpResponse> {
    RequireJWT::extract_current_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user id",
        ))
    })
}

/// 存储层错误统一转为 500
pub(crate) fn internal_error(context: &str, e: impl std::fmt::Display) -> HttpResponse {
    error!("{}: {}", context, e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {e}"),
    ))
}

/// 按 ID 读取课程，不存在时返回 404
pub(crate) async fn fetch_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<Course, HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Err(internal_error("Failed to get course information", e)),
    }
}

/// 授课教师或管理员才能管理课程
pub(crate) fn check_course_manage_permission(
    user: &CurrentUser,
    course: &Course,
) -> Result<(), HttpResponse> {
    match user.role {
        UserRole::Admin | UserRole::SuperAdmin => Ok(()),
        UserRole::Teacher if course.is_taught_by(user.id) => Ok(()),
        UserRole::Teacher => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You do not have permission to manage another teacher's course",
        ))),
        UserRole::Student => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You do not have permission to manage this course",
        ))),
    }
}

/// 读取课程并校验管理权限
pub(crate) async fn load_managed_course(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    course_id: i64,
) -> Result<(CurrentUser, Course), HttpResponse> {
    let user = current_user(request)?;
    let course = fetch_course(storage, course_id).await?;
    check_course_manage_permission(&user, &course)?;
    Ok((user, course))
}

/// 成绩只能登记给已选课的学生
pub(crate) async fn require_enrolled(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    student_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_enrollment(course_id, student_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentNotEnrolled,
            format!("Student {student_id} is not enrolled in course {course_id}"),
        ))),
        Err(e) => Err(internal_error("Failed to get enrollment", e)),
    }
}

/// 唯一约束冲突（SQLite / PostgreSQL / MySQL 的报错文本各不相同）
pub(crate) fn is_unique_violation(message: &str) -> bool {
    message.contains("UNIQUE constraint failed")
        || message.contains("duplicate key value")
        || message.contains("Duplicate entry")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    fn course(teacher_id: i64) -> Course {
        Course {
            id: 1,
            code: "CS101".to_string(),
            name: "Intro".to_string(),
            description: None,
            teacher_id,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn user(id: i64, role: UserRole) -> CurrentUser {
        CurrentUser { id, role }
    }

    #[test]
    fn test_owner_teacher_can_manage() {
        assert!(check_course_manage_permission(&user(5, UserRole::Teacher), &course(5)).is_ok());
    }

    #[test]
    fn test_other_teacher_forbidden() {
        let resp = check_course_manage_permission(&user(6, UserRole::Teacher), &course(5))
            .unwrap_err();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_admins_can_manage_any_course() {
        assert!(check_course_manage_permission(&user(1, UserRole::Admin), &course(5)).is_ok());
        assert!(
            check_course_manage_permission(&user(1, UserRole::SuperAdmin), &course(5)).is_ok()
        );
    }

    #[test]
    fn test_student_forbidden() {
        assert!(check_course_manage_permission(&user(5, UserRole::Student), &course(5)).is_err());
    }

    #[test]
    fn test_unique_violation_detection() {
        assert!(is_unique_violation(
            "UNIQUE constraint failed: enrollments.course_id, enrollments.student_id"
        ));
        assert!(is_unique_violation(
            "duplicate key value violates unique constraint \"idx_courses_code\""
        ));
        assert!(!is_unique_violation("FOREIGN KEY constraint failed"));
    }
}
