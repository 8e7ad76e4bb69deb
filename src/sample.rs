//! Built-in sample day, used by `sample` and `GET /sample`.

use chrono::{Local, NaiveDate};

use crate::constants::DATE_FORMAT;
use crate::models::{CategoryRecord, InstrumentRecord, Snapshot};

pub fn sample_snapshot(date: NaiveDate) -> Snapshot {
    let category = |name: &str, future: i64, calls: i64, puts: i64| {
        CategoryRecord::new(
            name,
            vec![
                InstrumentRecord::new("Future", future),
                InstrumentRecord::new("CE", calls),
                InstrumentRecord::new("PE", puts),
            ],
        )
    };

    Snapshot {
        date: date.format(DATE_FORMAT).to_string(),
        categories: vec![
            category("FII", -8384, -14952, 4664),
            category("PRO", 4380, -37748, 67757),
            category("DII", 366, 0, 0),
            category("RETAIL", 3638, 52701, -72421),
        ],
    }
}

/// Sample day dated with the local calendar date.
pub fn sample_snapshot_today() -> Snapshot {
    sample_snapshot(Local::now().date_naive())
}
