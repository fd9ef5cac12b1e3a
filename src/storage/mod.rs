use std::sync::Arc;

use crate::models::{
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::{entities::Enrollment, responses::EnrollmentListResponse},
    final_grades::entities::FinalGradeRecord,
    grade_entries::{
        entities::{
            AssignmentGrade, AssignmentGradeEntry, ExamGrade, ExamGradeEntry, OtherGrade,
            OtherGradeEntry,
        },
        requests::{
            CreateOtherGradeRequest, RecordAssignmentGradeRequest, RecordExamGradeRequest,
            UpdateOtherGradeRequest,
        },
    },
    system::{
        entities::SystemSetting, requests::SettingAuditQuery, responses::SettingAuditListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 结算流程依赖的数据访问接口
///
/// 单独拆出来，方便用内存实现驱动结算流程。
#[async_trait::async_trait]
pub trait GradebookStore: Send + Sync {
    // 课程名单（学生 ID）
    async fn list_enrollments(&self, course_id: i64) -> Result<Vec<i64>>;
    // 已评分的作业成绩
    async fn list_graded_assignment_entries(
        &self,
        course_id: i64,
    ) -> Result<Vec<AssignmentGradeEntry>>;
    // 已评分的考试成绩
    async fn list_graded_exam_entries(&self, course_id: i64) -> Result<Vec<ExamGradeEntry>>;
    // 其他成绩（加减分）
    async fn list_other_grade_entries(&self, course_id: i64) -> Result<Vec<OtherGradeEntry>>;
    // 课程已有的最终成绩
    async fn list_final_grade_records(&self, course_id: i64) -> Result<Vec<FinalGradeRecord>>;
    // 按 (course_id, student_id) 覆盖写入最终成绩；已有记录的发布状态保持不变
    async fn upsert_final_grade_record(&self, record: &FinalGradeRecord) -> Result<()>;
}

#[async_trait::async_trait]
pub trait Storage: GradebookStore {
    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过课程代码获取课程信息
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程（级联删除选课、成绩条目与最终成绩）
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 选课管理方法
    // 学生加入课程
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment>;
    // 获取选课记录
    async fn get_enrollment(&self, course_id: i64, student_id: i64)
    -> Result<Option<Enrollment>>;
    // 分页列出课程选课记录
    async fn list_enrollments_with_pagination(
        &self,
        course_id: i64,
        page: i64,
        size: i64,
    ) -> Result<EnrollmentListResponse>;
    // 学生退课
    async fn drop_student(&self, course_id: i64, student_id: i64) -> Result<bool>;

    /// 成绩条目管理方法
    // 登记作业成绩
    async fn upsert_assignment_grade(
        &self,
        course_id: i64,
        grade: RecordAssignmentGradeRequest,
        graded_by: i64,
    ) -> Result<AssignmentGrade>;
    // 列出作业成绩
    async fn list_assignment_grades(
        &self,
        course_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<AssignmentGrade>>;
    // 登记考试成绩
    async fn upsert_exam_grade(
        &self,
        course_id: i64,
        grade: RecordExamGradeRequest,
        graded_by: i64,
    ) -> Result<ExamGrade>;
    // 列出考试成绩
    async fn list_exam_grades(
        &self,
        course_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<ExamGrade>>;
    // 新增其他成绩
    async fn create_other_grade(
        &self,
        course_id: i64,
        grade: CreateOtherGradeRequest,
        created_by: i64,
    ) -> Result<OtherGrade>;
    // 通过ID获取其他成绩
    async fn get_other_grade_by_id(&self, id: i64) -> Result<Option<OtherGrade>>;
    // 修改其他成绩
    async fn update_other_grade(
        &self,
        id: i64,
        update: UpdateOtherGradeRequest,
    ) -> Result<Option<OtherGrade>>;
    // 删除其他成绩
    async fn delete_other_grade(&self, id: i64) -> Result<bool>;
    // 列出其他成绩
    async fn list_other_grades(
        &self,
        course_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<OtherGrade>>;

    /// 最终成绩方法
    // 获取单个学生的最终成绩
    async fn get_final_grade(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<FinalGradeRecord>>;
    // 批量设置发布状态，返回受影响的记录数
    async fn set_final_grades_published(&self, course_id: i64, published: bool) -> Result<u64>;

    /// 系统设置方法
    // 获取所有设置
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>>;
    // 通过 key 获取设置
    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>>;
    // 更新设置并记录审计日志
    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting>;
    // 获取审计日志
    async fn list_setting_audits(
        &self,
        query: SettingAuditQuery,
    ) -> Result<SettingAuditListResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
