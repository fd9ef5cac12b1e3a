//! 考试成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub exam_id: i64,
    pub auto_score: f64,
    pub manual_score: Option<f64>,
    pub points_possible: f64,
    pub is_graded: bool,
    pub graded_by: Option<i64>,
    pub graded_at: Option<i64>,
    pub updated_at: i64,
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
    pub fn into_exam_grade(self) -> crate::models::grade_entries::entities::ExamGrade {
        use crate::models::grade_entries::entities::ExamGrade;
        use chrono::{DateTime, Utc};

        ExamGrade {
            id: self.id,
            course_id: self.course_id,
            student_id: self.student_id,
            exam_id: self.exam_id,
            auto_score: self.auto_score,
            manual_score: self.manual_score,
            points_possible: self.points_possible,
            is_graded: self.is_graded,
            graded_by: self.graded_by,
            graded_at: self
                .graded_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
