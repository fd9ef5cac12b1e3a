//! 预导入模块，方便使用

pub use super::assignment_grades::{
    ActiveModel as AssignmentGradeActiveModel, Entity as AssignmentGrades,
    Model as AssignmentGradeModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::exam_grades::{
    ActiveModel as ExamGradeActiveModel, Entity as ExamGrades, Model as ExamGradeModel,
};
pub use super::final_grades::{
    ActiveModel as FinalGradeActiveModel, Entity as FinalGrades, Model as FinalGradeModel,
};
pub use super::other_grades::{
    ActiveModel as OtherGradeActiveModel, Entity as OtherGrades, Model as OtherGradeModel,
};
pub use super::system_settings::{
    ActiveModel as SystemSettingActiveModel, Entity as SystemSettings, Model as SystemSettingModel,
};
pub use super::system_settings_audit::{
    ActiveModel as SystemSettingAuditActiveModel, Entity as SystemSettingsAudit,
    Model as SystemSettingAuditModel,
};
