use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(ColumnDef::new(Courses::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建选课表
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业成绩表（points_earned 为空表示尚未评分）
        manager
            .create_table(
                Table::create()
                    .table(AssignmentGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentGrades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGrades::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGrades::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGrades::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssignmentGrades::PointsEarned).double().null())
                    .col(
                        ColumnDef::new(AssignmentGrades::PointsPossible)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssignmentGrades::GradedBy).big_integer().null())
                    .col(ColumnDef::new(AssignmentGrades::GradedAt).big_integer().null())
                    .col(
                        ColumnDef::new(AssignmentGrades::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssignmentGrades::Table, AssignmentGrades::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考试成绩表
        manager
            .create_table(
                Table::create()
                    .table(ExamGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamGrades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamGrades::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(ExamGrades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(ExamGrades::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(ExamGrades::AutoScore).double().not_null())
                    .col(ColumnDef::new(ExamGrades::ManualScore).double().null())
                    .col(
                        ColumnDef::new(ExamGrades::PointsPossible)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamGrades::IsGraded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ExamGrades::GradedBy).big_integer().null())
                    .col(ColumnDef::new(ExamGrades::GradedAt).big_integer().null())
                    .col(ColumnDef::new(ExamGrades::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamGrades::Table, ExamGrades::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建其他成绩（加分/扣分）表
        manager
            .create_table(
                Table::create()
                    .table(OtherGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OtherGrades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OtherGrades::CourseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(OtherGrades::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OtherGrades::Reason).text().not_null())
                    .col(ColumnDef::new(OtherGrades::Points).big_integer().not_null())
                    .col(
                        ColumnDef::new(OtherGrades::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtherGrades::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtherGrades::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OtherGrades::Table, OtherGrades::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建最终成绩表
        manager
            .create_table(
                Table::create()
                    .table(FinalGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinalGrades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FinalGrades::CourseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(FinalGrades::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinalGrades::FinalGrade)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinalGrades::LetterGrade).string().not_null())
                    .col(ColumnDef::new(FinalGrades::GradePoints).double().not_null())
                    .col(
                        ColumnDef::new(FinalGrades::AssignmentsTotal)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinalGrades::AssignmentsMax)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinalGrades::ExamsTotal).double().not_null())
                    .col(ColumnDef::new(FinalGrades::ExamsMax).double().not_null())
                    .col(
                        ColumnDef::new(FinalGrades::OtherTotal)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinalGrades::CalculationMethod)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinalGrades::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(FinalGrades::CalculatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FinalGrades::Table, FinalGrades::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================

        // 课程表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_teacher_id")
                    .table(Courses::Table)
                    .col(Courses::TeacherId)
                    .to_owned(),
            )
            .await?;

        // 选课唯一约束：同一学生在同一课程中只能有一条记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_enrollments_course_student")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_assignment_grades_course_student_assignment")
                    .table(AssignmentGrades::Table)
                    .col(AssignmentGrades::CourseId)
                    .col(AssignmentGrades::StudentId)
                    .col(AssignmentGrades::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_exam_grades_course_student_exam")
                    .table(ExamGrades::Table)
                    .col(ExamGrades::CourseId)
                    .col(ExamGrades::StudentId)
                    .col(ExamGrades::ExamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_other_grades_course_student")
                    .table(OtherGrades::Table)
                    .col(OtherGrades::CourseId)
                    .col(OtherGrades::StudentId)
                    .to_owned(),
            )
            .await?;

        // 最终成绩按 (course_id, student_id) 唯一，作为 upsert 的冲突键
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_final_grades_course_student")
                    .table(FinalGrades::Table)
                    .col(FinalGrades::CourseId)
                    .col(FinalGrades::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(FinalGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OtherGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Code,
    Name,
    Description,
    TeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
    CourseId,
    StudentId,
    EnrolledAt,
}

#[derive(DeriveIden)]
enum AssignmentGrades {
    #[sea_orm(iden = "assignment_grades")]
    Table,
    Id,
    CourseId,
    StudentId,
    AssignmentId,
    PointsEarned,
    PointsPossible,
    GradedBy,
    GradedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamGrades {
    #[sea_orm(iden = "exam_grades")]
    Table,
    Id,
    CourseId,
    StudentId,
    ExamId,
    AutoScore,
    ManualScore,
    PointsPossible,
    IsGraded,
    GradedBy,
    GradedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OtherGrades {
    #[sea_orm(iden = "other_grades")]
    Table,
    Id,
    CourseId,
    StudentId,
    Reason,
    Points,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FinalGrades {
    #[sea_orm(iden = "final_grades")]
    Table,
    Id,
    CourseId,
    StudentId,
    FinalGrade,
    LetterGrade,
    GradePoints,
    AssignmentsTotal,
    AssignmentsMax,
    ExamsTotal,
    ExamsMax,
    OtherTotal,
    CalculationMethod,
    IsPublished,
    CalculatedAt,
}
