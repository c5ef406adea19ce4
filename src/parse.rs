use std::collections::HashMap;

use log::warn;

use crate::error::{Error, Result};
use crate::markup::{Element, Markup};

/// Length of the department prefix of a course name, as in `CMSC` of `CMSC131`.
const COLLEGE_LEN: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct SectionRecord {
    pub college: String,
    pub course: String,
    pub section: String,
    /// First character of the section id.
    pub level: String,
    pub open: u32,
    /// `open / total`, or `None` when the section has no seats at all.
    pub fill: Option<f64>,
}

/// Section records keyed by `"<course>-<section>"`, in the order they were first seen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sections {
    entries: Vec<(String, SectionRecord)>,
    index: HashMap<String, usize>,
}

impl Sections {
    /// Inserts a record, replacing (in place) and returning any previous one under `key`.
    pub fn insert(&mut self, key: String, record: SectionRecord) -> Option<SectionRecord> {
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, record)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&SectionRecord> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionRecord)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

fn seat_count(key: &str, value: String) -> Result<u32> {
    value.parse().map_err(|source| Error::Format {
        key: key.to_owned(),
        value,
        source,
    })
}

fn split_course(name: &str) -> (String, String) {
    let cut = name
        .char_indices()
        .nth(COLLEGE_LEN)
        .map_or(name.len(), |(i, _)| i);
    let (college, course) = name.split_at(cut);
    (college.to_owned(), course.to_owned())
}

impl SectionRecord {
    fn from_html<E: Element>(course_name: &str, node: &E) -> Result<(String, Self)> {
        let missing = |key: String, what| Error::Parse { key, what };

        let section = node
            .first_class(Some("span"), "section-id")
            .ok_or_else(|| missing(format!("{}-", course_name), "section-id"))?
            .trimmed_text();
        let key = format!("{}-{}", course_name, section);

        let level = section
            .chars()
            .next()
            .ok_or_else(|| missing(key.clone(), "section level"))?
            .to_string();

        let total = node
            .first_class(None, "total-seats-count")
            .ok_or_else(|| missing(key.clone(), "total-seats-count"))?
            .trimmed_text();
        let open = node
            .first_class(None, "open-seats-count")
            .ok_or_else(|| missing(key.clone(), "open-seats-count"))?
            .trimmed_text();

        let total = seat_count(&key, total)?;
        let open = seat_count(&key, open)?;

        let fill = if total == 0 {
            None
        } else {
            Some(f64::from(open) / f64::from(total))
        };

        let (college, course) = split_course(course_name);

        Ok((
            key,
            SectionRecord {
                college,
                course,
                section,
                level,
                open,
                fill,
            },
        ))
    }
}

/// Course ids listed on a department page, in page order, repeats included.
pub fn course_ids_from_html<M: Markup>(page: &M) -> Vec<String> {
    page.find_class(Some("div"), "course-id")
        .iter()
        .map(Element::trimmed_text)
        .collect()
}

/// Every section of every course group on a seat-count page.
///
/// Fails on the first malformed section; nothing is skipped. A key seen twice
/// keeps its first position and takes the later record.
pub fn sections_from_html<M: Markup>(page: &M) -> Result<Sections> {
    let mut sections = Sections::default();

    for (position, group) in page
        .find_class(Some("div"), "course-sections")
        .into_iter()
        .enumerate()
    {
        let course_name = group.attr("id").ok_or_else(|| Error::Parse {
            key: format!("course group #{}", position),
            what: "course id attribute",
        })?;
        let course_name = course_name.to_owned();

        for node in group.find_class(Some("div"), "section") {
            let (key, record) = SectionRecord::from_html(&course_name, &node)?;
            if sections.insert(key.clone(), record).is_some() {
                warn!("section {} listed twice, keeping the last one", key);
            }
        }
    }

    Ok(sections)
}
