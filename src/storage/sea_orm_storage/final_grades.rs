//! 最终成绩存储操作

use super::SeaOrmStorage;
use crate::entity::final_grades::{ActiveModel, Column, Entity as FinalGrades};
use crate::errors::{LmsError, Result};
use crate::models::final_grades::entities::FinalGradeRecord;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 按 (course_id, student_id) 覆盖写入最终成绩
    ///
    /// 已有记录只覆盖分数相关列，`is_published` 保持数据库中的值，
    /// 结算期间发生的发布操作不会被覆盖。
    pub async fn upsert_final_grade_record_impl(&self, record: &FinalGradeRecord) -> Result<()> {
        let model = ActiveModel {
            course_id: Set(record.course_id),
            student_id: Set(record.student_id),
            final_grade: Set(record.final_grade),
            letter_grade: Set(record.letter_grade.clone()),
            grade_points: Set(record.grade_points),
            assignments_total: Set(record.assignments_total),
            assignments_max: Set(record.assignments_max),
            exams_total: Set(record.exams_total),
            exams_max: Set(record.exams_max),
            other_total: Set(record.other_total),
            calculation_method: Set(record.calculation_method.to_string()),
            is_published: Set(record.is_published),
            calculated_at: Set(record.calculated_at.timestamp()),
            ..Default::default()
        };

        FinalGrades::insert(model)
            .on_conflict(
                OnConflict::columns([Column::CourseId, Column::StudentId])
                    .update_columns([
                        Column::FinalGrade,
                        Column::LetterGrade,
                        Column::GradePoints,
                        Column::AssignmentsTotal,
                        Column::AssignmentsMax,
                        Column::ExamsTotal,
                        Column::ExamsMax,
                        Column::OtherTotal,
                        Column::CalculationMethod,
                        Column::CalculatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                LmsError::database_operation(format!(
                    "写入学生 {} 的最终成绩失败: {e}",
                    record.student_id
                ))
            })?;

        Ok(())
    }

    /// 课程全部最终成绩，按学生 ID 升序
    pub async fn list_final_grade_records_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<FinalGradeRecord>> {
        let rows = FinalGrades::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询最终成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_record()).collect())
    }

    /// 单个学生的最终成绩
    pub async fn get_final_grade_impl(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<FinalGradeRecord>> {
        let result = FinalGrades::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询最终成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_record()))
    }

    /// 设置课程全部最终成绩的发布状态，不修改分数
    pub async fn set_final_grades_published_impl(
        &self,
        course_id: i64,
        published: bool,
    ) -> Result<u64> {
        let result = FinalGrades::update_many()
            .col_expr(Column::IsPublished, Expr::value(published))
            .filter(Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新发布状态失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
