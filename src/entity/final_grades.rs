//! 最终成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "final_grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub final_grade: i64,
    pub letter_grade: String,
    pub grade_points: f64,
    pub assignments_total: f64,
    pub assignments_max: f64,
    pub exams_total: f64,
    pub exams_max: f64,
    pub other_total: i64,
    pub calculation_method: String,
    pub is_published: bool,
    pub calculated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_record(self) -> crate::models::final_grades::entities::FinalGradeRecord {
        use crate::models::final_grades::entities::{CalculationMethod, FinalGradeRecord};
        use chrono::{DateTime, Utc};

        FinalGradeRecord {
            course_id: self.course_id,
            student_id: self.student_id,
            final_grade: self.final_grade,
            letter_grade: self.letter_grade,
            grade_points: self.grade_points,
            assignments_total: self.assignments_total,
            assignments_max: self.assignments_max,
            exams_total: self.exams_total,
            exams_max: self.exams_max,
            other_total: self.other_total,
            calculation_method: self
                .calculation_method
                .parse::<CalculationMethod>()
                .unwrap_or(CalculationMethod::AutomaticSum),
            is_published: self.is_published,
            calculated_at: DateTime::<Utc>::from_timestamp(self.calculated_at, 0)
                .unwrap_or_default(),
        }
    }
}
