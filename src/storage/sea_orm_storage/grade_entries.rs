//! 成绩条目存储操作（作业、考试、其他成绩）

use super::SeaOrmStorage;
use crate::entity::assignment_grades::{
    ActiveModel as AssignmentActiveModel, Column as AssignmentColumn,
    Entity as AssignmentGrades,
};
use crate::entity::exam_grades::{
    ActiveModel as ExamActiveModel, Column as ExamColumn, Entity as ExamGrades,
};
use crate::entity::other_grades::{
    ActiveModel as OtherActiveModel, Column as OtherColumn, Entity as OtherGrades,
};
use crate::errors::{LmsError, Result};
use crate::models::grade_entries::{
    entities::{
        AssignmentGrade, AssignmentGradeEntry, ExamGrade, ExamGradeEntry, OtherGrade,
        OtherGradeEntry,
    },
    requests::{
        CreateOtherGradeRequest, RecordAssignmentGradeRequest, RecordExamGradeRequest,
        UpdateOtherGradeRequest,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TryIntoModel,
};

impl SeaOrmStorage {
    /// 登记作业成绩，已存在则覆盖
    pub async fn upsert_assignment_grade_impl(
        &self,
        course_id: i64,
        req: RecordAssignmentGradeRequest,
        graded_by: i64,
    ) -> Result<AssignmentGrade> {
        let now = chrono::Utc::now().timestamp();
        let graded = req.points_earned.is_some();

        let existing = AssignmentGrades::find()
            .filter(
                Condition::all()
                    .add(AssignmentColumn::CourseId.eq(course_id))
                    .add(AssignmentColumn::StudentId.eq(req.student_id))
                    .add(AssignmentColumn::AssignmentId.eq(req.assignment_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询作业成绩失败: {e}")))?;

        let mut model: AssignmentActiveModel = match existing {
            Some(m) => m.into(),
            None => AssignmentActiveModel {
                course_id: Set(course_id),
                student_id: Set(req.student_id),
                assignment_id: Set(req.assignment_id),
                ..Default::default()
            },
        };

        model.points_earned = Set(req.points_earned);
        model.points_possible = Set(req.points_possible);
        model.graded_by = Set(graded.then_some(graded_by));
        model.graded_at = Set(graded.then_some(now));
        model.updated_at = Set(now);

        let result = model
            .save(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("保存作业成绩失败: {e}")))?;

        let saved = result
            .try_into_model()
            .map_err(|e| LmsError::database_operation(format!("保存作业成绩失败: {e}")))?;

        Ok(saved.into_assignment_grade())
    }

    /// 列出课程作业成绩
    pub async fn list_assignment_grades_impl(
        &self,
        course_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<AssignmentGrade>> {
        let mut select = AssignmentGrades::find().filter(AssignmentColumn::CourseId.eq(course_id));
        if let Some(student_id) = student_id {
            select = select.filter(AssignmentColumn::StudentId.eq(student_id));
        }

        let rows = select
            .order_by_asc(AssignmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询作业成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_assignment_grade()).collect())
    }

    /// 已评分的作业成绩（结算用）
    pub async fn list_graded_assignment_entries_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<AssignmentGradeEntry>> {
        let rows = AssignmentGrades::find()
            .filter(AssignmentColumn::CourseId.eq(course_id))
            .filter(AssignmentColumn::PointsEarned.is_not_null())
            .order_by_asc(AssignmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询作业成绩失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|m| m.into_assignment_grade().graded_entry())
            .collect())
    }

    /// 登记考试成绩，已存在则覆盖
    pub async fn upsert_exam_grade_impl(
        &self,
        course_id: i64,
        req: RecordExamGradeRequest,
        graded_by: i64,
    ) -> Result<ExamGrade> {
        let now = chrono::Utc::now().timestamp();

        let existing = ExamGrades::find()
            .filter(
                Condition::all()
                    .add(ExamColumn::CourseId.eq(course_id))
                    .add(ExamColumn::StudentId.eq(req.student_id))
                    .add(ExamColumn::ExamId.eq(req.exam_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询考试成绩失败: {e}")))?;

        let mut model: ExamActiveModel = match existing {
            Some(m) => m.into(),
            None => ExamActiveModel {
                course_id: Set(course_id),
                student_id: Set(req.student_id),
                exam_id: Set(req.exam_id),
                ..Default::default()
            },
        };

        model.auto_score = Set(req.auto_score);
        model.manual_score = Set(req.manual_score);
        model.points_possible = Set(req.points_possible);
        model.is_graded = Set(req.graded);
        model.graded_by = Set(req.graded.then_some(graded_by));
        model.graded_at = Set(req.graded.then_some(now));
        model.updated_at = Set(now);

        let result = model
            .save(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("保存考试成绩失败: {e}")))?;

        let saved = result
            .try_into_model()
            .map_err(|e| LmsError::database_operation(format!("保存考试成绩失败: {e}")))?;

        Ok(saved.into_exam_grade())
    }

    /// 列出课程考试成绩
    pub async fn list_exam_grades_impl(
        &self,
        course_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<ExamGrade>> {
        let mut select = ExamGrades::find().filter(ExamColumn::CourseId.eq(course_id));
        if let Some(student_id) = student_id {
            select = select.filter(ExamColumn::StudentId.eq(student_id));
        }

        let rows = select
            .order_by_asc(ExamColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询考试成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_exam_grade()).collect())
    }

    /// 已评分的考试成绩（结算用）
    pub async fn list_graded_exam_entries_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<ExamGradeEntry>> {
        let rows = ExamGrades::find()
            .filter(ExamColumn::CourseId.eq(course_id))
            .filter(ExamColumn::IsGraded.eq(true))
            .order_by_asc(ExamColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询考试成绩失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|m| m.into_exam_grade().graded_entry())
            .collect())
    }

    /// 新增其他成绩
    pub async fn create_other_grade_impl(
        &self,
        course_id: i64,
        req: CreateOtherGradeRequest,
        created_by: i64,
    ) -> Result<OtherGrade> {
        let now = chrono::Utc::now().timestamp();

        let model = OtherActiveModel {
            course_id: Set(course_id),
            student_id: Set(req.student_id),
            reason: Set(req.reason.trim().to_string()),
            points: Set(req.points),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建其他成绩失败: {e}")))?;

        Ok(result.into_other_grade())
    }

    /// 通过 ID 获取其他成绩
    pub async fn get_other_grade_by_id_impl(&self, id: i64) -> Result<Option<OtherGrade>> {
        let result = OtherGrades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询其他成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_other_grade()))
    }

    /// 修改其他成绩
    pub async fn update_other_grade_impl(
        &self,
        id: i64,
        update: UpdateOtherGradeRequest,
    ) -> Result<Option<OtherGrade>> {
        if self.get_other_grade_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = OtherActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(reason) = update.reason {
            model.reason = Set(reason.trim().to_string());
        }

        if let Some(points) = update.points {
            model.points = Set(points);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新其他成绩失败: {e}")))?;

        Ok(Some(result.into_other_grade()))
    }

    /// 删除其他成绩
    pub async fn delete_other_grade_impl(&self, id: i64) -> Result<bool> {
        let result = OtherGrades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除其他成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出课程其他成绩
    pub async fn list_other_grades_impl(
        &self,
        course_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<OtherGrade>> {
        let mut select = OtherGrades::find().filter(OtherColumn::CourseId.eq(course_id));
        if let Some(student_id) = student_id {
            select = select.filter(OtherColumn::StudentId.eq(student_id));
        }

        let rows = select
            .order_by_asc(OtherColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询其他成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_other_grade()).collect())
    }

    /// 其他成绩条目（结算用）
    pub async fn list_other_grade_entries_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<OtherGradeEntry>> {
        let grades = self.list_other_grades_impl(course_id, None).await?;
        Ok(grades.iter().map(|g| g.entry()).collect())
    }
}
