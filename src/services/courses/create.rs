use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::users::entities::{CurrentUser, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::course_access::{current_user, internal_error, is_unique_violation};
use crate::utils::validate::{validate_course_code, validate_course_name};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 确定授课教师
    let teacher_id = match resolve_teacher_id(&user, &course_data) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_course_code(&course_data.code)
        .and_then(|_| validate_course_name(&course_data.name))
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.get_course_by_code(&course_data.code).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseAlreadyExists,
                "Course code already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check course code", e)),
    }

    match storage.create_course(teacher_id, course_data).await {
        Ok(course) => {
            info!("Course {} created successfully by {}", course.code, user.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(handle_course_create_error(&e.to_string())),
    }
}

/// 教师只能为自己创建课程，管理员必须指定教师
fn resolve_teacher_id(
    user: &CurrentUser,
    course_data: &CreateCourseRequest,
) -> Result<i64, HttpResponse> {
    match user.role {
        UserRole::Admin | UserRole::SuperAdmin => course_data.teacher_id.ok_or_else(|| {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "teacher_id is required when an admin creates a course",
            ))
        }),
        UserRole::Teacher => match course_data.teacher_id {
            Some(id) if id != user.id => Err(HttpResponse::Forbidden().json(
                ApiResponse::error_empty(
                    ErrorCode::CoursePermissionDenied,
                    "You do not have permission to create a course for another teacher",
                ),
            )),
            _ => Ok(user.id),
        },
        UserRole::Student => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You do not have permission to create a course",
        ))),
    }
}

/// 错误响应辅助函数
fn handle_course_create_error(e: &str) -> HttpResponse {
    let msg = format!("Course creation failed: {e}");
    error!("{}", msg);
    if is_unique_violation(&msg) {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseAlreadyExists,
            "Course code already exists",
        ))
    } else {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::CourseCreationFailed,
            msg,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    fn request(teacher_id: Option<i64>) -> CreateCourseRequest {
        CreateCourseRequest {
            teacher_id,
            code: "CS101".to_string(),
            name: "Intro to CS".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_teacher_defaults_to_self() {
        let user = CurrentUser {
            id: 9,
            role: UserRole::Teacher,
        };
        assert_eq!(resolve_teacher_id(&user, &request(None)).unwrap(), 9);
        assert_eq!(resolve_teacher_id(&user, &request(Some(9))).unwrap(), 9);
        let resp = resolve_teacher_id(&user, &request(Some(10))).unwrap_err();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_admin_must_name_teacher() {
        let admin = CurrentUser {
            id: 1,
            role: UserRole::Admin,
        };
        let resp = resolve_teacher_id(&admin, &request(None)).unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resolve_teacher_id(&admin, &request(Some(9))).unwrap(), 9);
    }
}
