use chrono::NaiveDate;
use kernel::model::special_day::SpecialDay;

#[derive(sqlx::FromRow)]
pub struct SpecialDayRow {
    pub special_day_date: NaiveDate,
    pub name: String,
}

impl From<SpecialDayRow> for SpecialDay {
    fn from(value: SpecialDayRow) -> Self {
        SpecialDay {
            date: value.special_day_date,
            name: value.name,
        }
    }
}
