pub mod common;
pub mod courses;
pub mod enrollments;
pub mod final_grades;
pub mod grade_entries;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 为通用错误，3xxx 为课程与选课，4xxx 为成绩相关，6xxx 为系统设置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    ValidationFailed = 1022,
    InternalServerError = 5000,

    // 课程
    CourseNotFound = 3000,
    CourseAlreadyExists = 3001,
    CourseCreationFailed = 3002,
    CoursePermissionDenied = 3003,

    // 选课
    EnrollmentNotFound = 3100,
    EnrollmentAlreadyExists = 3101,
    StudentNotEnrolled = 3102,

    // 成绩条目
    GradeEntryNotFound = 4000,
    GradeEntryInvalid = 4001,

    // 最终成绩
    FinalGradeNotFound = 4100,
    FinalGradeNotPublished = 4101,
    FinalizationPartialFailure = 4102,

    // 等级分数段
    GradeRangeInvalid = 4200,
    GradeRangeMissing = 4201,

    // 系统设置
    SettingNotFound = 6000,
}
