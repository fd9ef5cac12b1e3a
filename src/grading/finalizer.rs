//! 最终成绩计算
//!
//! 这里只做纯计算：输入是课程名单和已评分的成绩条目，输出是每个学生的
//! `FinalGradeRecord`。读取与写入由 `runner` 负责。

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};

use super::ranges::{GradeRangeTable, SCORE_CEILING};
use crate::models::final_grades::entities::{CalculationMethod, FinalGradeRecord};
use crate::models::grade_entries::entities::{
    AssignmentGradeEntry, ExamGradeEntry, OtherGradeEntry,
};

/// 一次结算所需的全部输入
#[derive(Debug, Clone, Default)]
pub struct FinalizationInputs {
    pub roster: Vec<i64>,
    pub assignments: Vec<AssignmentGradeEntry>,
    pub exams: Vec<ExamGradeEntry>,
    pub others: Vec<OtherGradeEntry>,
}

/// 单个学生的成绩汇总
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StudentTotals {
    pub assignments_total: f64,
    pub assignments_max: f64,
    pub exams_total: f64,
    pub exams_max: f64,
    pub other_total: i64,
}

impl StudentTotals {
    /// 原始总分（未封顶）
    pub fn points(&self) -> f64 {
        self.assignments_total + self.exams_total + self.other_total as f64
    }

    /// 四舍五入后的总分，写入 `final_grade`
    pub fn rounded_points(&self) -> i64 {
        self.points().round() as i64
    }

    /// 封顶到 100 的分数，仅用于等级换算
    pub fn capped_points(&self) -> i64 {
        self.rounded_points().min(SCORE_CEILING)
    }
}

/// 按名单汇总成绩
///
/// 名单中重复的学生只算一次；不在名单中的成绩条目被忽略。
/// 没有任何成绩的学生得到全零汇总。
pub fn aggregate(inputs: &FinalizationInputs) -> BTreeMap<i64, StudentTotals> {
    let mut totals: BTreeMap<i64, StudentTotals> = inputs
        .roster
        .iter()
        .map(|&student_id| (student_id, StudentTotals::default()))
        .collect();

    for entry in &inputs.assignments {
        if let Some(t) = totals.get_mut(&entry.student_id) {
            t.assignments_total += entry.points_earned;
            t.assignments_max += entry.points_possible;
        }
    }

    for entry in &inputs.exams {
        if let Some(t) = totals.get_mut(&entry.student_id) {
            t.exams_total += entry.score();
            t.exams_max += entry.points_possible;
        }
    }

    for entry in &inputs.others {
        if let Some(t) = totals.get_mut(&entry.student_id) {
            t.other_total = t.other_total.saturating_add(entry.points);
        }
    }

    totals
}

/// 由汇总结果生成一条最终成绩记录
pub fn finalize_student(
    course_id: i64,
    student_id: i64,
    totals: &StudentTotals,
    table: &GradeRangeTable,
    is_published: bool,
    calculated_at: DateTime<Utc>,
) -> FinalGradeRecord {
    let range = table.resolve(totals.capped_points());

    FinalGradeRecord {
        course_id,
        student_id,
        final_grade: totals.rounded_points(),
        letter_grade: range.letter.clone(),
        grade_points: range.grade_points,
        assignments_total: totals.assignments_total,
        assignments_max: totals.assignments_max,
        exams_total: totals.exams_total,
        exams_max: totals.exams_max,
        other_total: totals.other_total,
        calculation_method: CalculationMethod::AutomaticSum,
        is_published,
        calculated_at,
    }
}

/// 计算整门课程的最终成绩，结果按学生 ID 升序
///
/// `published` 中的学生沿用已发布状态。
pub fn compute_records(
    course_id: i64,
    inputs: &FinalizationInputs,
    table: &GradeRangeTable,
    published: &HashSet<i64>,
    calculated_at: DateTime<Utc>,
) -> Vec<FinalGradeRecord> {
    aggregate(inputs)
        .iter()
        .map(|(&student_id, totals)| {
            finalize_student(
                course_id,
                student_id,
                totals,
                table,
                published.contains(&student_id),
                calculated_at,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::ranges::tests::standard_table;

    fn assignment(student_id: i64, earned: f64, possible: f64) -> AssignmentGradeEntry {
        AssignmentGradeEntry {
            student_id,
            assignment_id: 1,
            points_earned: earned,
            points_possible: possible,
        }
    }

    fn exam(student_id: i64, auto: f64, manual: f64, possible: f64) -> ExamGradeEntry {
        ExamGradeEntry {
            student_id,
            exam_id: 1,
            auto_score: auto,
            manual_score: manual,
            points_possible: possible,
        }
    }

    fn other(student_id: i64, points: i64) -> OtherGradeEntry {
        OtherGradeEntry {
            student_id,
            course_id: 1,
            reason: "课堂表现".to_string(),
            points,
        }
    }

    fn compute(inputs: &FinalizationInputs) -> Vec<FinalGradeRecord> {
        compute_records(1, inputs, &standard_table(), &HashSet::new(), Utc::now())
    }

    #[test]
    fn test_student_without_entries_gets_zero() {
        let inputs = FinalizationInputs {
            roster: vec![7],
            ..Default::default()
        };
        let records = compute(&inputs);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.final_grade, 0);
        assert_eq!(r.letter_grade, "F");
        assert_eq!(r.grade_points, 0.0);
        assert_eq!(r.assignments_max, 0.0);
        assert_eq!(r.exams_max, 0.0);
        assert_eq!(r.other_total, 0);
    }

    #[test]
    fn test_sum_of_all_sources() {
        let inputs = FinalizationInputs {
            roster: vec![1],
            assignments: vec![assignment(1, 40.0, 50.0), assignment(1, 20.0, 25.0)],
            exams: vec![exam(1, 15.0, 10.0, 30.0)],
            others: vec![other(1, 3), other(1, -1)],
        };
        let r = &compute(&inputs)[0];
        assert_eq!(r.assignments_total, 60.0);
        assert_eq!(r.assignments_max, 75.0);
        assert_eq!(r.exams_total, 25.0);
        assert_eq!(r.exams_max, 30.0);
        assert_eq!(r.other_total, 2);
        assert_eq!(r.final_grade, 87);
        assert_eq!(r.letter_grade, "B");
        assert_eq!(r.calculation_method, CalculationMethod::AutomaticSum);
    }

    #[test]
    fn test_score_above_ceiling_keeps_raw_total() {
        let inputs = FinalizationInputs {
            roster: vec![1],
            assignments: vec![assignment(1, 95.0, 100.0)],
            exams: vec![exam(1, 20.0, 0.0, 20.0)],
            others: vec![other(1, 10)],
        };
        let r = &compute(&inputs)[0];
        assert_eq!(r.final_grade, 125);
        assert_eq!(r.letter_grade, "A");
        assert_eq!(r.grade_points, 4.0);
    }

    #[test]
    fn test_negative_total() {
        let inputs = FinalizationInputs {
            roster: vec![1],
            assignments: vec![assignment(1, 10.0, 100.0)],
            others: vec![other(1, -20)],
            ..Default::default()
        };
        let r = &compute(&inputs)[0];
        assert_eq!(r.final_grade, -10);
        assert_eq!(r.letter_grade, "F");
        assert_eq!(r.grade_points, 0.0);
    }

    #[test]
    fn test_extreme_other_points_saturate() {
        let inputs = FinalizationInputs {
            roster: vec![1],
            others: vec![other(1, i64::MAX), other(1, 1)],
            ..Default::default()
        };
        let r = &compute(&inputs)[0];
        assert_eq!(r.other_total, i64::MAX);
        assert_eq!(r.letter_grade, "A");
    }

    #[test]
    fn test_boundary_scores() {
        let inputs = FinalizationInputs {
            roster: vec![1, 2],
            assignments: vec![assignment(1, 90.0, 100.0), assignment(2, 89.0, 100.0)],
            ..Default::default()
        };
        let records = compute(&inputs);
        assert_eq!(records[0].letter_grade, "A");
        assert_eq!(records[0].grade_points, 4.0);
        assert_eq!(records[1].letter_grade, "B");
        assert_eq!(records[1].grade_points, 3.0);
    }

    #[test]
    fn test_fractional_total_rounds_before_lookup() {
        let inputs = FinalizationInputs {
            roster: vec![1, 2],
            assignments: vec![assignment(1, 89.5, 100.0), assignment(2, 89.4, 100.0)],
            ..Default::default()
        };
        let records = compute(&inputs);
        assert_eq!(records[0].final_grade, 90);
        assert_eq!(records[0].letter_grade, "A");
        assert_eq!(records[1].final_grade, 89);
        assert_eq!(records[1].letter_grade, "B");
    }

    #[test]
    fn test_entries_outside_roster_ignored() {
        let inputs = FinalizationInputs {
            roster: vec![1],
            assignments: vec![assignment(1, 50.0, 100.0), assignment(99, 100.0, 100.0)],
            others: vec![other(99, 5)],
            ..Default::default()
        };
        let records = compute(&inputs);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].student_id, 1);
        assert_eq!(records[0].final_grade, 50);
    }

    #[test]
    fn test_duplicate_roster_entries_collapse() {
        let inputs = FinalizationInputs {
            roster: vec![3, 1, 3],
            assignments: vec![assignment(3, 70.0, 100.0)],
            ..Default::default()
        };
        let records = compute(&inputs);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].student_id, 1);
        assert_eq!(records[1].student_id, 3);
        assert_eq!(records[1].final_grade, 70);
    }

    #[test]
    fn test_published_flag_carried_over() {
        let inputs = FinalizationInputs {
            roster: vec![1, 2],
            ..Default::default()
        };
        let published: HashSet<i64> = [2].into_iter().collect();
        let records = compute_records(1, &inputs, &standard_table(), &published, Utc::now());
        assert!(!records[0].is_published);
        assert!(records[1].is_published);
    }

    #[test]
    fn test_same_inputs_same_records() {
        let inputs = FinalizationInputs {
            roster: vec![1, 2],
            assignments: vec![assignment(1, 33.3, 40.0), assignment(2, 12.0, 40.0)],
            exams: vec![exam(1, 40.0, 5.5, 50.0)],
            others: vec![other(2, 4)],
        };
        let at = Utc::now();
        let table = standard_table();
        let first = compute_records(1, &inputs, &table, &HashSet::new(), at);
        let second = compute_records(1, &inputs, &table, &HashSet::new(), at);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_roster() {
        let inputs = FinalizationInputs {
            assignments: vec![assignment(1, 50.0, 100.0)],
            ..Default::default()
        };
        assert!(compute(&inputs).is_empty());
    }
}
