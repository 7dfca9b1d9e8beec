use chrono::{NaiveDate, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    /// 未指定日期时取当天（UTC）
    pub fn resolve(&self) -> Result<NaiveDate, String> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(Utc::now().date_naive()),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| format!("invalid date {:?}, expected YYYY-MM-DD", raw)),
        }
    }
}
