use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Url};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::TimeSeriesPoint;

#[async_trait]
pub trait PointSink: Send + Sync {
    async fn write_points(&self, points: &[TimeSeriesPoint]) -> Result<()>;
}

/// An InfluxDB 1.x database, written through its `/write` HTTP endpoint.
pub struct Influx {
    client: Client,
    endpoint: Url,
}

impl Influx {
    pub fn new(client: Client, config: &Config) -> Result<Self> {
        let base = format!("http://{}:{}/write", config.host, config.port);
        let mut endpoint = Url::parse(&base).map_err(|e| Error::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;

        {
            let mut query = endpoint.query_pairs_mut();
            query.append_pair("db", &config.db);
            query.append_pair("precision", "s");
            if let Some(user) = &config.user {
                query.append_pair("u", user);
            }
            if let Some(pass) = &config.pass {
                query.append_pair("p", pass);
            }
        }

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl PointSink for Influx {
    async fn write_points(&self, points: &[TimeSeriesPoint]) -> Result<()> {
        if points.is_empty() {
            debug!("nothing to write");
            return Ok(());
        }

        self.client
            .post(self.endpoint.clone())
            .body(line_protocol(points))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(Error::Storage)?;

        info!(
            "wrote {} points to {}",
            points.len(),
            self.endpoint.host_str().unwrap_or_default()
        );
        Ok(())
    }
}

fn escape(s: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\n' {
            escaped.push_str("\\n");
            continue;
        }
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn measurement(s: &str) -> String {
    escape(s, &[',', ' '])
}

fn tag(s: &str) -> String {
    escape(s, &[',', '=', ' '])
}

fn string_field(s: &str) -> String {
    format!("\"{}\"", escape(s, &['"', '\\']))
}

fn line(point: &TimeSeriesPoint) -> String {
    let tags = &point.tags;
    let mut line = measurement(&point.measurement);

    // Sorted by key. InfluxDB rejects an empty tag value, so those are left out.
    for (key, value) in [
        ("college", &tags.college),
        ("course", &tags.course),
        ("level", &tags.level),
        ("section", &tags.section),
    ] {
        if !value.is_empty() {
            line.push_str(&format!(",{}={}", key, tag(value)));
        }
    }

    format!(
        "{} Float_value={},Int_value={} {}\n",
        line,
        string_field(&point.fields.fill),
        string_field(&point.fields.open),
        point.time.timestamp(),
    )
}

/// Renders points as InfluxDB line protocol, one line each, with second timestamps.
pub fn line_protocol(points: &[TimeSeriesPoint]) -> String {
    points.iter().map(line).collect()
}
