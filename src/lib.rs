use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::{Client, Url};
use select::document::Document;

pub mod config;
mod error;
pub mod format;
pub mod markup;
pub mod parse;
pub mod store;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::format::TimeSeriesPoint;
pub use crate::markup::{Element, Markup};
pub use crate::parse::{SectionRecord, Sections};
pub use crate::store::{Influx, PointSink};

#[async_trait]
pub trait Fetch: Send + Sync {
    /// Body of a successful GET of `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub struct Http {
    client: Client,
}

impl Http {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for Http {
    async fn fetch(&self, url: &str) -> Result<String> {
        let fetch_error = |source| Error::Fetch {
            url: url.to_owned(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(fetch_error)?;

        response.text().await.map_err(fetch_error)
    }
}

/// One term of the course catalog, reached through `fetcher`.
pub struct Catalog<F> {
    fetcher: F,
    term: String,
    seats_url: String,
}

impl<F: Fetch> Catalog<F> {
    pub fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher,
            term: config.term.clone(),
            seats_url: config.seats_url.clone(),
        }
    }

    /// Seat-count page for `course_ids`, one `courseIds` parameter each.
    pub fn seats_url(&self, course_ids: &[String]) -> Result<Url> {
        let base = format!(
            "{}/{}/sections",
            self.seats_url.trim_end_matches('/'),
            self.term
        );
        let mut url = Url::parse(&base).map_err(|e| Error::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .extend_pairs(course_ids.iter().map(|id| ("courseIds", id)));

        Ok(url)
    }

    pub async fn listing(&self, page_link: &str) -> Result<Document> {
        let contents = self.fetcher.fetch(page_link).await?;
        Ok(Document::from(contents.as_str()))
    }

    /// Sections of every course listed on `listing`, read from the seat-count
    /// page. A listing without courses yields no sections and no request.
    pub async fn extract<M: Markup>(&self, listing: &M) -> Result<Sections> {
        let course_ids = parse::course_ids_from_html(listing);
        info!("{} courses listed", course_ids.len());

        if course_ids.is_empty() {
            return Ok(Sections::default());
        }

        let url = self.seats_url(&course_ids)?;
        debug!("fetching seats from {}", url);
        let contents = self.fetcher.fetch(url.as_str()).await?;

        let document = Document::from(contents.as_str());
        let sections = parse::sections_from_html(&&document)?;
        info!("{} sections parsed", sections.len());

        Ok(sections)
    }

    /// Listing page to points, all stamped with `now`.
    pub async fn scrape(
        &self,
        page_link: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let listing = self.listing(page_link).await?;
        let sections = self.extract(&&listing).await?;
        Ok(format::format(&sections, now))
    }
}

/// Scrapes `page_link` at the current time and writes the points to `sink`,
/// returning how many were written.
pub async fn record<F: Fetch>(
    catalog: &Catalog<F>,
    sink: &impl PointSink,
    page_link: &str,
) -> Result<usize> {
    let points = catalog.scrape(page_link, Utc::now()).await?;
    sink.write_points(&points).await?;
    Ok(points.len())
}
