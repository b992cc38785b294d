use chrono::NaiveDate;

/// 祝日などの特別日
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialDay {
    pub date: NaiveDate,
    pub name: String,
}
