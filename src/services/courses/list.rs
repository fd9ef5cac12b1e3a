use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::requests::{CourseListQuery, CourseQueryParams};
use crate::models::users::entities::{CurrentUser, UserRole};
use crate::models::ApiResponse;
use crate::services::course_access::{current_user, internal_error};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (page, size) = query.pagination.normalized();
    let list_query = scope_query(
        &user,
        CourseListQuery {
            page: Some(page),
            size: Some(size),
            search: query.search,
            ..Default::default()
        },
    );

    match storage.list_courses_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Course list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve course list", e)),
    }
}

/// 管理员查看全部课程，教师只看自己授课的，学生只看已选的
fn scope_query(user: &CurrentUser, mut query: CourseListQuery) -> CourseListQuery {
    match user.role {
        UserRole::Admin | UserRole::SuperAdmin => {}
        UserRole::Teacher => query.teacher_id = Some(user.id),
        UserRole::Student => query.student_id = Some(user.id),
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_by_role() {
        let teacher = CurrentUser {
            id: 3,
            role: UserRole::Teacher,
        };
        let q = scope_query(&teacher, CourseListQuery::default());
        assert_eq!(q.teacher_id, Some(3));
        assert_eq!(q.student_id, None);

        let student = CurrentUser {
            id: 4,
            role: UserRole::Student,
        };
        let q = scope_query(&student, CourseListQuery::default());
        assert_eq!(q.student_id, Some(4));
        assert_eq!(q.teacher_id, None);

        let admin = CurrentUser {
            id: 1,
            role: UserRole::SuperAdmin,
        };
        let q = scope_query(&admin, CourseListQuery::default());
        assert!(q.teacher_id.is_none() && q.student_id.is_none());
    }
}
