use serde::ser::Error as SerError;
use serde::{Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// One point of a synthetic price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    /// 1-based position in the series.
    pub index: usize,
    pub price: f64,
    #[serde(serialize_with = "serialize_iso_date")]
    pub date: Date,
}

fn serialize_iso_date<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = date.format(ISO_DATE).map_err(S::Error::custom)?;
    serializer.serialize_str(&formatted)
}
