// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Date-window resolution.
//!
//! An issue is published in one month but features the content of the
//! month before it: the January 2026 issue covers December 2025. All
//! instants are UTC.

use crate::clock::Clock;
use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, Month, NaiveDate, TimeDelta, Utc};
use regex::Regex;
use std::sync::LazyLock;

static MONTH_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("static regex"));

/// Publication month plus the content window it features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMonth {
    pub publication_year: i32,
    pub publication_month: Month,
    pub content_year: i32,
    pub content_month: Month,
    /// Day 1, 00:00:00.000 of the content month.
    pub content_start: DateTime<Utc>,
    /// Last day, 23:59:59.999 of the content month.
    pub content_end: DateTime<Utc>,
}

impl TargetMonth {
    /// Build the target for a publication month given as `1..=12`.
    pub fn new(publication_year: i32, month_number: u32) -> Result<Self> {
        let publication_month = u8::try_from(month_number)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "month {:02} is out of range (expected 01-12)",
                    month_number
                ))
            })?;

        let content_month = publication_month.pred();
        let content_year = if publication_month == Month::January {
            publication_year - 1
        } else {
            publication_year
        };

        let content_start = first_instant(content_year, content_month)?;
        let content_end = first_instant(publication_year, publication_month)?
            - TimeDelta::milliseconds(1);

        Ok(Self {
            publication_year,
            publication_month,
            content_year,
            content_month,
            content_start,
            content_end,
        })
    }

    /// Zero-based publication month (January = 0).
    pub fn publication_month_index(&self) -> u32 {
        self.publication_month.number_from_month() - 1
    }

    /// Zero-based content month (January = 0).
    pub fn content_month_index(&self) -> u32 {
        self.content_month.number_from_month() - 1
    }

    pub fn publication_month_name(&self) -> &'static str {
        self.publication_month.name()
    }

    pub fn content_month_name(&self) -> &'static str {
        self.content_month.name()
    }

    /// Inclusive membership test on the content window.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.content_start && *instant <= self.content_end
    }

    /// A calendar date is treated as its midnight UTC.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.and_hms_opt(0, 0, 0)
            .map(|dt| self.contains(&dt.and_utc()))
            .unwrap_or(false)
    }

    /// Issue slug: `{year}-{MM}-{lowercased month name}`, e.g. `2026-01-january`.
    pub fn slug(&self) -> String {
        format!(
            "{}-{:02}-{}",
            self.publication_year,
            self.publication_month.number_from_month(),
            self.publication_month.name().to_lowercase()
        )
    }

    /// Recover the publication month from an issue slug.
    ///
    /// Only the leading `YYYY-MM` is significant; the month-name suffix is
    /// for humans and is not checked against the number.
    pub fn from_slug(slug: &str) -> Result<Self> {
        let prefix = slug.get(..7).unwrap_or(slug);
        let rest = slug.get(7..).unwrap_or("");
        let suffix_ok = rest.is_empty()
            || rest.strip_prefix('-').is_some_and(|name| {
                !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase())
            });
        if !suffix_ok {
            return Err(Error::InvalidArgument(format!(
                "slug '{}' must look like YYYY-MM-monthname",
                slug
            )));
        }
        parse_month_arg(prefix).map_err(|_| {
            Error::InvalidArgument(format!(
                "slug '{}' must look like YYYY-MM-monthname",
                slug
            ))
        })
    }
}

/// Resolve the target month from an optional `YYYY-MM` argument,
/// defaulting to the clock's current month.
pub fn resolve_target_month(month_arg: Option<&str>, clock: &dyn Clock) -> Result<TargetMonth> {
    match month_arg {
        Some(arg) => parse_month_arg(arg),
        None => {
            let now = clock.now();
            TargetMonth::new(now.year(), now.month())
        }
    }
}

fn parse_month_arg(arg: &str) -> Result<TargetMonth> {
    let caps = MONTH_ARG.captures(arg).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "month '{}' must use the format YYYY-MM (e.g. 2026-01)",
            arg
        ))
    })?;
    // The regex guarantees digits, so these parses cannot fail.
    let year: i32 = caps[1]
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("bad year in '{}'", arg)))?;
    let month: u32 = caps[2]
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("bad month in '{}'", arg)))?;
    TargetMonth::new(year, month)
}

fn first_instant(year: i32, month: Month) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            Error::InvalidArgument(format!("{} {} is not a representable date", month.name(), year))
        })
}
