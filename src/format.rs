use chrono::{DateTime, SubsecRound, Utc};
use serde::{Serialize, Serializer};

use crate::parse::{SectionRecord, Sections};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tags {
    pub college: String,
    pub course: String,
    pub section: String,
    pub level: String,
}

/// Both values are text, as downstream dashboards expect.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fields {
    #[serde(rename = "Int_value")]
    pub open: String,
    #[serde(rename = "Float_value")]
    pub fill: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub measurement: String,
    pub tags: Tags,
    #[serde(serialize_with = "serialize_time")]
    pub time: DateTime<Utc>,
    pub fields: Fields,
}

fn serialize_time<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(TIME_FORMAT))
}

/// `"0"` for a seatless section, otherwise the shortest decimal that reads
/// back as the same `f64`, always with a fractional part (`0.0`, `0.25`).
pub fn render_fill(fill: Option<f64>) -> String {
    match fill {
        Some(fill) => format!("{:?}", fill),
        None => "0".to_owned(),
    }
}

impl TimeSeriesPoint {
    pub fn from_record(key: &str, record: &SectionRecord, time: DateTime<Utc>) -> Self {
        TimeSeriesPoint {
            measurement: key.to_owned(),
            tags: Tags {
                college: record.college.clone(),
                course: record.course.clone(),
                section: record.section.clone(),
                level: record.level.clone(),
            },
            time,
            fields: Fields {
                open: record.open.to_string(),
                fill: render_fill(record.fill),
            },
        }
    }
}

/// One point per section, stamped with `now` truncated to whole seconds.
pub fn format(sections: &Sections, now: DateTime<Utc>) -> Vec<TimeSeriesPoint> {
    let time = now.trunc_subsecs(0);
    sections
        .iter()
        .map(|(key, record)| TimeSeriesPoint::from_record(key, record, time))
        .collect()
}
