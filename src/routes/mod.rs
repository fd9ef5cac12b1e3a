pub mod courses;

pub mod enrollments;

pub mod grade_entries;

pub mod final_grades;

pub mod system;

pub use courses::configure_courses_routes;
pub use enrollments::configure_enrollments_routes;
pub use final_grades::configure_final_grades_routes;
pub use grade_entries::configure_grade_entries_routes;
pub use system::configure_system_routes;
