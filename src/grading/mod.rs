//! 成绩结算核心
//!
//! - `ranges`: 等级分数段表及其校验
//! - `finalizer`: 纯计算，汇总成绩并映射为等级
//! - `runner`: 驱动一次课程结算（读取输入、计算、逐个学生写入）

pub mod finalizer;
pub mod ranges;
pub mod runner;

pub use finalizer::{FinalizationInputs, StudentTotals, aggregate, compute_records};
pub use ranges::{GradeRange, GradeRangeTable, RangeViolation, validate_ranges};
pub use runner::finalize_course;
