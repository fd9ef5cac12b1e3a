//! 等级分数段表
//!
//! 分数段只在管理员保存配置时校验一次，校验通过后以不可变的
//! `GradeRangeTable` 形式缓存并传入结算流程，结算过程中不再校验。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use ts_rs::TS;

use crate::errors::{LmsError, Result};

/// 分数段覆盖的下界
pub const SCORE_FLOOR: i64 = 0;
/// 分数段覆盖的上界，同时也是等级换算时的封顶分数
pub const SCORE_CEILING: i64 = 100;

/// 单个等级分数段，`min` / `max` 均为闭区间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradeRange {
    pub letter: String,
    pub min: i64,
    pub max: i64,
    pub grade_points: f64,
}

impl GradeRange {
    pub fn contains(&self, score: i64) -> bool {
        self.min <= score && score <= self.max
    }
}

/// 分数段配置错误
#[derive(Debug, Clone, PartialEq)]
pub enum RangeViolation {
    Empty,
    BlankLetter {
        index: usize,
    },
    DuplicateLetter {
        letter: String,
    },
    Inverted {
        letter: String,
        min: i64,
        max: i64,
    },
    InvalidGradePoints {
        letter: String,
    },
    OutOfBounds {
        letter: String,
        min: i64,
        max: i64,
    },
    FloorNotCovered {
        lowest_min: i64,
    },
    CeilingNotCovered {
        highest_max: i64,
    },
    NotContiguous {
        lower: String,
        upper: String,
        lower_max: i64,
        upper_min: i64,
    },
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeViolation::Empty => write!(f, "grade range table is empty"),
            RangeViolation::BlankLetter { index } => {
                write!(f, "range #{index} has an empty letter")
            }
            RangeViolation::DuplicateLetter { letter } => {
                write!(f, "letter '{letter}' appears more than once")
            }
            RangeViolation::Inverted { letter, min, max } => {
                write!(f, "range '{letter}' has min {min} greater than max {max}")
            }
            RangeViolation::InvalidGradePoints { letter } => {
                write!(
                    f,
                    "range '{letter}' must have finite, non-negative grade points"
                )
            }
            RangeViolation::OutOfBounds { letter, min, max } => write!(
                f,
                "range '{letter}' [{min}, {max}] lies outside [{SCORE_FLOOR}, {SCORE_CEILING}]"
            ),
            RangeViolation::FloorNotCovered { lowest_min } => write!(
                f,
                "lowest range starts at {lowest_min}, expected {SCORE_FLOOR}"
            ),
            RangeViolation::CeilingNotCovered { highest_max } => write!(
                f,
                "highest range ends at {highest_max}, expected {SCORE_CEILING}"
            ),
            RangeViolation::NotContiguous {
                lower,
                upper,
                lower_max,
                upper_min,
            } => write!(
                f,
                "ranges '{lower}' (max {lower_max}) and '{upper}' (min {upper_min}) are not contiguous"
            ),
        }
    }
}

/// 校验分数段：字母非空且唯一，区间有效且落在 [0,100] 内，首尾覆盖 [0,100]，相邻区间满足 max + 1 == min
pub fn validate_ranges(ranges: &[GradeRange]) -> Vec<RangeViolation> {
    let mut violations = Vec::new();

    if ranges.is_empty() {
        violations.push(RangeViolation::Empty);
        return violations;
    }

    let mut seen = HashSet::new();
    for (index, range) in ranges.iter().enumerate() {
        let letter = range.letter.trim();
        if letter.is_empty() {
            violations.push(RangeViolation::BlankLetter { index });
        } else if !seen.insert(letter.to_string()) {
            violations.push(RangeViolation::DuplicateLetter {
                letter: letter.to_string(),
            });
        }

        if range.min > range.max {
            violations.push(RangeViolation::Inverted {
                letter: letter.to_string(),
                min: range.min,
                max: range.max,
            });
        }

        if range.min < SCORE_FLOOR || range.max > SCORE_CEILING {
            violations.push(RangeViolation::OutOfBounds {
                letter: letter.to_string(),
                min: range.min,
                max: range.max,
            });
        }

        if !range.grade_points.is_finite() || range.grade_points < 0.0 {
            violations.push(RangeViolation::InvalidGradePoints {
                letter: letter.to_string(),
            });
        }
    }

    let mut sorted: Vec<&GradeRange> = ranges.iter().collect();
    sorted.sort_by_key(|r| (r.min, r.max));

    if let Some(lowest) = sorted.first()
        && lowest.min != SCORE_FLOOR
    {
        violations.push(RangeViolation::FloorNotCovered {
            lowest_min: lowest.min,
        });
    }

    if let Some(highest) = sorted.last()
        && highest.max != SCORE_CEILING
    {
        violations.push(RangeViolation::CeilingNotCovered {
            highest_max: highest.max,
        });
    }

    for pair in sorted.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if lower.max.checked_add(1) != Some(upper.min) {
            violations.push(RangeViolation::NotContiguous {
                lower: lower.letter.trim().to_string(),
                upper: upper.letter.trim().to_string(),
                lower_max: lower.max,
                upper_min: upper.min,
            });
        }
    }

    violations
}

/// 把多条错误拼成一条提示
pub fn violations_message(violations: &[RangeViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// 已校验的等级分数段表，按 `min` 从高到低排列
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRangeTable {
    ranges: Vec<GradeRange>,
}

impl GradeRangeTable {
    /// 校验并构建分数段表
    pub fn new(ranges: Vec<GradeRange>) -> std::result::Result<Self, Vec<RangeViolation>> {
        let violations = validate_ranges(&ranges);
        if !violations.is_empty() {
            return Err(violations);
        }

        let mut ranges: Vec<GradeRange> = ranges
            .into_iter()
            .map(|mut r| {
                r.letter = r.letter.trim().to_string();
                r
            })
            .collect();
        ranges.sort_by(|a, b| b.min.cmp(&a.min).then(b.max.cmp(&a.max)));

        Ok(Self { ranges })
    }

    /// 从系统设置中保存的 JSON 解析
    pub fn from_json(value: &str) -> Result<Self> {
        let ranges: Vec<GradeRange> = serde_json::from_str(value).map_err(|e| {
            LmsError::configuration(format!("grade range table is not valid JSON: {e}"))
        })?;
        Self::new(ranges).map_err(|v| LmsError::configuration(violations_message(&v)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.ranges)?)
    }

    pub fn ranges(&self) -> &[GradeRange] {
        &self.ranges
    }

    pub fn highest(&self) -> &GradeRange {
        // 构造时保证非空
        &self.ranges[0]
    }

    pub fn lowest(&self) -> &GradeRange {
        &self.ranges[self.ranges.len() - 1]
    }

    /// 按闭区间查找分数所属等级
    ///
    /// 从高到低匹配，边界值落在多个区间时取较高等级；
    /// 低于所有区间时返回最低等级，高于所有区间时返回最高等级。
    pub fn resolve(&self, score: i64) -> &GradeRange {
        if let Some(range) = self.ranges.iter().find(|r| r.contains(score)) {
            return range;
        }
        let highest = self.highest();
        if score > highest.max {
            highest
        } else {
            self.lowest()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn range(letter: &str, min: i64, max: i64, grade_points: f64) -> GradeRange {
        GradeRange {
            letter: letter.to_string(),
            min,
            max,
            grade_points,
        }
    }

    pub(crate) fn standard_ranges() -> Vec<GradeRange> {
        vec![
            range("A", 90, 100, 4.0),
            range("B", 80, 89, 3.0),
            range("C", 70, 79, 2.0),
            range("D", 60, 69, 1.0),
            range("F", 0, 59, 0.0),
        ]
    }

    pub(crate) fn standard_table() -> GradeRangeTable {
        GradeRangeTable::new(standard_ranges()).unwrap()
    }

    #[test]
    fn test_standard_table_is_valid() {
        assert!(validate_ranges(&standard_ranges()).is_empty());
    }

    #[test]
    fn test_table_sorted_highest_first() {
        let mut shuffled = standard_ranges();
        shuffled.reverse();
        let table = GradeRangeTable::new(shuffled).unwrap();
        assert_eq!(table.highest().letter, "A");
        assert_eq!(table.lowest().letter, "F");
    }

    #[test]
    fn test_boundary_resolution() {
        let table = standard_table();
        assert_eq!(table.resolve(90).letter, "A");
        assert_eq!(table.resolve(89).letter, "B");
        assert_eq!(table.resolve(100).letter, "A");
        assert_eq!(table.resolve(0).letter, "F");
        assert_eq!(table.resolve(60).letter, "D");
        assert_eq!(table.resolve(59).letter, "F");
    }

    #[test]
    fn test_below_floor_resolves_to_lowest() {
        let table = standard_table();
        let resolved = table.resolve(-10);
        assert_eq!(resolved.letter, "F");
        assert_eq!(resolved.grade_points, 0.0);
    }

    #[test]
    fn test_above_ceiling_resolves_to_highest() {
        let table = standard_table();
        assert_eq!(table.resolve(125).letter, "A");
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(validate_ranges(&[]), vec![RangeViolation::Empty]);
        assert!(GradeRangeTable::new(vec![]).is_err());
    }

    #[test]
    fn test_gap_detected() {
        let mut ranges = standard_ranges();
        ranges[1].max = 88; // B: 80..=88，与 A 之间缺 89
        let violations = validate_ranges(&ranges);
        assert_eq!(
            violations,
            vec![RangeViolation::NotContiguous {
                lower: "B".to_string(),
                upper: "A".to_string(),
                lower_max: 88,
                upper_min: 90,
            }]
        );
    }

    #[test]
    fn test_overlap_detected() {
        let mut ranges = standard_ranges();
        ranges[1].max = 90;
        let violations = validate_ranges(&ranges);
        assert!(matches!(
            violations.as_slice(),
            [RangeViolation::NotContiguous { .. }]
        ));
    }

    #[test]
    fn test_coverage_checked() {
        let ranges = vec![range("A", 50, 99, 4.0), range("F", 10, 49, 0.0)];
        let violations = validate_ranges(&ranges);
        assert!(violations.contains(&RangeViolation::FloorNotCovered { lowest_min: 10 }));
        assert!(violations.contains(&RangeViolation::CeilingNotCovered { highest_max: 99 }));
    }

    #[test]
    fn test_bounds_checked_without_overflow() {
        let ranges = vec![range("A", 0, i64::MAX, 4.0), range("B", 50, 100, 3.0)];
        let violations = validate_ranges(&ranges);
        assert!(violations.contains(&RangeViolation::OutOfBounds {
            letter: "A".to_string(),
            min: 0,
            max: i64::MAX,
        }));
        assert!(violations.iter().any(|v| matches!(v, RangeViolation::NotContiguous { .. })));

        let ranges = vec![range("A", 50, 100, 4.0), range("F", i64::MIN, 49, 0.0)];
        let violations = validate_ranges(&ranges);
        assert!(violations.contains(&RangeViolation::OutOfBounds {
            letter: "F".to_string(),
            min: i64::MIN,
            max: 49,
        }));
    }

    #[test]
    fn test_letters_checked() {
        let ranges = vec![
            range("A", 50, 100, 4.0),
            range(" A ", 1, 49, 2.0),
            range("", 0, 0, 0.0),
        ];
        let violations = validate_ranges(&ranges);
        assert!(violations.contains(&RangeViolation::DuplicateLetter {
            letter: "A".to_string()
        }));
        assert!(violations.contains(&RangeViolation::BlankLetter { index: 2 }));
    }

    #[test]
    fn test_grade_points_checked() {
        let mut ranges = standard_ranges();
        ranges[0].grade_points = f64::NAN;
        ranges[4].grade_points = -1.0;
        let violations = validate_ranges(&ranges);
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_invalid_table() {
        let err = GradeRangeTable::from_json(r#"[{"letter":"A","min":0,"max":90,"grade_points":4.0}]"#)
            .unwrap_err();
        assert_eq!(err.code(), "E013");
        assert!(err.message().contains("expected 100"));

        let err = GradeRangeTable::from_json("{").unwrap_err();
        assert_eq!(err.code(), "E013");
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let table = standard_table();
        let json = table.to_json().unwrap();
        let parsed = GradeRangeTable::from_json(&json).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_violation_message_joins() {
        let msg = violations_message(&[
            RangeViolation::Empty,
            RangeViolation::FloorNotCovered { lowest_min: 5 },
        ]);
        assert_eq!(
            msg,
            "grade range table is empty; lowest range starts at 5, expected 0"
        );
    }
}
