pub mod course_access;
pub mod courses;
pub mod enrollments;
pub mod final_grades;
pub mod grade_entries;
pub mod system;

pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use final_grades::FinalGradeService;
pub use grade_entries::GradeEntryService;
pub use system::SystemService;
