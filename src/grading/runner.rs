//! 课程结算流程
//!
//! 一次结算：并发读取名单与成绩条目，计算全部学生的记录，再逐个写入。
//! 单个学生写入失败只记录在报告里，不影响其他学生，也不回滚已写入的记录。
//! 同一课程的并发结算以最后一次写入为准；结算期间的发布操作不会被覆盖。

use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::finalizer::{FinalizationInputs, compute_records};
use super::ranges::GradeRangeTable;
use crate::errors::{LmsError, Result};
use crate::models::final_grades::responses::{FinalizeReport, StudentFailure};
use crate::storage::GradebookStore;

/// 等级换算失败时的统一提示
pub const LETTER_ASSIGNMENT_FAILED: &str = "failed to assign letters";

/// 结算一门课程
///
/// `table` 为空时直接返回配置错误，不读取也不写入任何数据。
pub async fn finalize_course<S>(
    store: &S,
    course_id: i64,
    table: Option<&GradeRangeTable>,
) -> Result<FinalizeReport>
where
    S: GradebookStore + ?Sized,
{
    let run_id = Uuid::new_v4();

    let Some(table) = table else {
        warn!(%run_id, course_id, "等级分数段未配置，结算中止");
        return Err(LmsError::configuration(format!(
            "{LETTER_ASSIGNMENT_FAILED}: grade range table is not configured"
        )));
    };

    let (roster, assignments, exams, others, existing) = tokio::try_join!(
        store.list_enrollments(course_id),
        store.list_graded_assignment_entries(course_id),
        store.list_graded_exam_entries(course_id),
        store.list_other_grade_entries(course_id),
        store.list_final_grade_records(course_id),
    )?;

    debug!(
        %run_id,
        course_id,
        students = roster.len(),
        assignments = assignments.len(),
        exams = exams.len(),
        others = others.len(),
        "结算输入读取完成"
    );

    let published: HashSet<i64> = existing
        .iter()
        .filter(|r| r.is_published)
        .map(|r| r.student_id)
        .collect();

    let inputs = FinalizationInputs {
        roster,
        assignments,
        exams,
        others,
    };
    let records = compute_records(course_id, &inputs, table, &published, Utc::now());

    let mut written = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for record in records {
        match store.upsert_final_grade_record(&record).await {
            Ok(()) => written.push(record),
            Err(e) => {
                warn!(
                    %run_id,
                    course_id,
                    student_id = record.student_id,
                    "写入最终成绩失败: {}",
                    e
                );
                failures.push(StudentFailure {
                    student_id: record.student_id,
                    message: e.message().to_string(),
                });
            }
        }
    }

    info!(
        %run_id,
        course_id,
        finalized = written.len(),
        failed = failures.len(),
        "课程结算完成"
    );

    Ok(FinalizeReport {
        run_id,
        course_id,
        finalized: written.len(),
        failures,
        records: written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::ranges::tests::standard_table;
    use crate::models::final_grades::entities::FinalGradeRecord;
    use crate::models::grade_entries::entities::{
        AssignmentGradeEntry, ExamGradeEntry, OtherGradeEntry,
    };
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryGradebook {
        roster: Vec<i64>,
        assignments: Vec<AssignmentGradeEntry>,
        exams: Vec<ExamGradeEntry>,
        others: Vec<OtherGradeEntry>,
        records: Mutex<BTreeMap<(i64, i64), FinalGradeRecord>>,
        failing_students: HashSet<i64>,
    }

    impl MemoryGradebook {
        fn record(&self, course_id: i64, student_id: i64) -> Option<FinalGradeRecord> {
            self.records
                .lock()
                .unwrap()
                .get(&(course_id, student_id))
                .cloned()
        }

        fn record_count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl GradebookStore for MemoryGradebook {
        async fn list_enrollments(&self, _course_id: i64) -> Result<Vec<i64>> {
            Ok(self.roster.clone())
        }

        async fn list_graded_assignment_entries(
            &self,
            _course_id: i64,
        ) -> Result<Vec<AssignmentGradeEntry>> {
            Ok(self.assignments.clone())
        }

        async fn list_graded_exam_entries(&self, _course_id: i64) -> Result<Vec<ExamGradeEntry>> {
            Ok(self.exams.clone())
        }

        async fn list_other_grade_entries(
            &self,
            _course_id: i64,
        ) -> Result<Vec<OtherGradeEntry>> {
            Ok(self.others.clone())
        }

        async fn list_final_grade_records(
            &self,
            course_id: i64,
        ) -> Result<Vec<FinalGradeRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.course_id == course_id)
                .cloned()
                .collect())
        }

        async fn upsert_final_grade_record(&self, record: &FinalGradeRecord) -> Result<()> {
            if self.failing_students.contains(&record.student_id) {
                return Err(LmsError::database_operation("写入最终成绩失败: disk full"));
            }
            let mut records = self.records.lock().unwrap();
            let mut record = record.clone();
            if let Some(stored) = records.get(&record.key()) {
                record.is_published = stored.is_published;
            }
            records.insert(record.key(), record);
            Ok(())
        }
    }

    fn assignment(student_id: i64, earned: f64) -> AssignmentGradeEntry {
        AssignmentGradeEntry {
            student_id,
            assignment_id: 1,
            points_earned: earned,
            points_possible: 100.0,
        }
    }

    fn exam(student_id: i64, auto: f64) -> ExamGradeEntry {
        ExamGradeEntry {
            student_id,
            exam_id: 1,
            auto_score: auto,
            manual_score: 0.0,
            points_possible: 20.0,
        }
    }

    #[tokio::test]
    async fn test_two_student_course() {
        let store = MemoryGradebook {
            roster: vec![1, 2],
            assignments: vec![assignment(1, 70.0)],
            exams: vec![exam(1, 20.0)],
            ..Default::default()
        };
        let table = standard_table();

        let report = finalize_course(&store, 10, Some(&table)).await.unwrap();
        assert!(report.is_complete());
        assert_eq!(report.finalized, 2);
        assert_eq!(report.course_id, 10);

        let s1 = store.record(10, 1).unwrap();
        assert_eq!(s1.final_grade, 90);
        assert_eq!(s1.letter_grade, "A");
        assert_eq!(s1.grade_points, 4.0);

        let s2 = store.record(10, 2).unwrap();
        assert_eq!(s2.final_grade, 0);
        assert_eq!(s2.letter_grade, "F");
        assert_eq!(s2.grade_points, 0.0);
    }

    #[tokio::test]
    async fn test_missing_table_writes_nothing() {
        let store = MemoryGradebook {
            roster: vec![1, 2],
            assignments: vec![assignment(1, 70.0)],
            ..Default::default()
        };

        let err = finalize_course(&store, 10, None).await.unwrap_err();
        assert_eq!(err.code(), "E013");
        assert!(err.message().starts_with(LETTER_ASSIGNMENT_FAILED));
        assert_eq!(store.record_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_student_does_not_block_others() {
        let store = MemoryGradebook {
            roster: vec![1, 2, 3],
            assignments: vec![assignment(1, 95.0), assignment(2, 85.0), assignment(3, 75.0)],
            failing_students: [1].into_iter().collect(),
            ..Default::default()
        };
        let table = standard_table();

        let report = finalize_course(&store, 10, Some(&table)).await.unwrap();
        assert!(!report.is_complete());
        assert_eq!(report.finalized, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].student_id, 1);
        assert!(report.failures[0].message.contains("disk full"));

        assert!(store.record(10, 1).is_none());
        assert_eq!(store.record(10, 2).unwrap().letter_grade, "B");
        assert_eq!(store.record(10, 3).unwrap().letter_grade, "C");
    }

    #[tokio::test]
    async fn test_rerun_produces_same_records() {
        let store = MemoryGradebook {
            roster: vec![1, 2],
            assignments: vec![assignment(1, 61.5), assignment(2, 99.0)],
            exams: vec![exam(2, 20.0)],
            others: vec![OtherGradeEntry {
                student_id: 1,
                course_id: 10,
                reason: "迟交扣分".to_string(),
                points: -2,
            }],
            ..Default::default()
        };
        let table = standard_table();

        let first = finalize_course(&store, 10, Some(&table)).await.unwrap();
        let second = finalize_course(&store, 10, Some(&table)).await.unwrap();
        assert_eq!(store.record_count(), 2);
        assert_ne!(first.run_id, second.run_id);

        for (a, b) in first.records.iter().zip(second.records.iter()) {
            assert_eq!(a.key(), b.key());
            assert_eq!(a.final_grade, b.final_grade);
            assert_eq!(a.letter_grade, b.letter_grade);
            assert_eq!(a.grade_points, b.grade_points);
            assert_eq!(a.assignments_total, b.assignments_total);
            assert_eq!(a.other_total, b.other_total);
        }
    }

    #[tokio::test]
    async fn test_rerun_keeps_published_flag() {
        let store = MemoryGradebook {
            roster: vec![1],
            assignments: vec![assignment(1, 80.0)],
            ..Default::default()
        };
        let table = standard_table();

        finalize_course(&store, 10, Some(&table)).await.unwrap();
        store
            .records
            .lock()
            .unwrap()
            .values_mut()
            .for_each(|r| r.is_published = true);

        finalize_course(&store, 10, Some(&table)).await.unwrap();
        assert!(store.record(10, 1).unwrap().is_published);
    }

    #[tokio::test]
    async fn test_empty_roster_is_complete() {
        let store = MemoryGradebook::default();
        let table = standard_table();

        let report = finalize_course(&store, 10, Some(&table)).await.unwrap();
        assert!(report.is_complete());
        assert_eq!(report.finalized, 0);
        assert!(report.records.is_empty());
    }
}
