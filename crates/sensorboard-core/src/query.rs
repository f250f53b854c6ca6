//! Query builder
//!
//! Turns the raw URL parameters of a list page into a normalized [`PageRequest`]
//! and from there into the query parameters understood by the remote API.
//! Normalization never fails: malformed values fall back to their defaults.

use std::fmt;

/// Page used when the parameter is missing or malformed
pub const DEFAULT_PAGE: u64 = 0;

/// Page size used when the parameter is missing or malformed
pub const DEFAULT_SIZE: u64 = 10;

/// Page sizes offered by the list pages
pub const SIZE_OPTIONS: [u64; 5] = [2, 5, 10, 50, 100];

/// Predefined date range filter
///
/// Values outside the known set are kept verbatim in [`DateRange::Other`] and
/// forwarded unchanged; the remote API decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Yesterday,
    Week,
    Month,
    Year,
    Other(String),
}

impl DateRange {
    /// Known ranges in display order, with their labels
    pub const KNOWN: [(DateRange, &'static str); 6] = [
        (DateRange::All, "Semua"),
        (DateRange::Today, "Hari ini"),
        (DateRange::Yesterday, "Kemarin"),
        (DateRange::Week, "Minggu ini"),
        (DateRange::Month, "Bulan ini"),
        (DateRange::Year, "Tahun ini"),
    ];

    pub fn parse(value: &str) -> Self {
        match value {
            "" | "all" => DateRange::All,
            "today" => DateRange::Today,
            "yesterday" => DateRange::Yesterday,
            "week" => DateRange::Week,
            "month" => DateRange::Month,
            "year" => DateRange::Year,
            other => DateRange::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DateRange::All => "all",
            DateRange::Today => "today",
            DateRange::Yesterday => "yesterday",
            DateRange::Week => "week",
            DateRange::Month => "month",
            DateRange::Year => "year",
            DateRange::Other(value) => value,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw list page parameters as they arrive in the URL
///
/// Every field is kept as an optional string so that malformed input never
/// rejects the request.
#[derive(Debug, Clone, Default)]
pub struct RawPageQuery {
    pub search: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
    pub range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RawPageQuery {
    /// Collect decoded query pairs; the first occurrence of a key wins and
    /// unknown keys are ignored
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key {
                "search" => &mut query.search,
                "page" => &mut query.page,
                "size" => &mut query.size,
                "range" => &mut query.range,
                "start" => &mut query.start,
                "end" => &mut query.end,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        query
    }
}

/// Normalized filter and pagination parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub search: String,
    /// Zero-based page index
    pub page: u64,
    /// Page size, always positive
    pub size: u64,
    pub date_range: DateRange,
    /// Explicit lower bound (ISO-8601); takes precedence over `date_range`
    pub start: Option<String>,
    /// Explicit upper bound (ISO-8601); takes precedence over `date_range`
    pub end: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
            date_range: DateRange::All,
            start: None,
            end: None,
        }
    }
}

impl PageRequest {
    /// Whether explicit bounds were given
    pub fn has_bounds(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Query parameters for the remote list endpoint
    ///
    /// When explicit bounds are present they replace the `range` parameter.
    pub fn remote_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("search", self.search.clone()),
            ("size", self.size.to_string()),
            ("page", self.page.to_string()),
        ];

        if self.has_bounds() {
            if let Some(start) = &self.start {
                params.push(("start", start.clone()));
            }
            if let Some(end) = &self.end {
                params.push(("end", end.clone()));
            }
        } else {
            params.push(("range", self.date_range.to_string()));
        }

        params
    }

    /// Parameters that reproduce this request in a dashboard link
    pub fn link_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("search", self.search.clone()),
            ("size", self.size.to_string()),
            ("page", self.page.to_string()),
            ("range", self.date_range.to_string()),
        ];
        if let Some(start) = &self.start {
            params.push(("start", start.clone()));
        }
        if let Some(end) = &self.end {
            params.push(("end", end.clone()));
        }
        params
    }

    /// Same filters, different page
    pub fn with_page(&self, page: u64) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// Normalize raw URL parameters into a [`PageRequest`]
pub fn build_query(raw: &RawPageQuery) -> PageRequest {
    PageRequest {
        search: raw.search.clone().unwrap_or_default(),
        page: coerce(raw.page.as_deref(), DEFAULT_PAGE, false),
        size: coerce(raw.size.as_deref(), DEFAULT_SIZE, true),
        date_range: DateRange::parse(raw.range.as_deref().unwrap_or_default()),
        start: non_blank(raw.start.as_deref()),
        end: non_blank(raw.end.as_deref()),
    }
}

fn coerce(value: Option<&str>, default: u64, positive: bool) -> u64 {
    match value.map(str::trim).and_then(|v| v.parse::<u64>().ok()) {
        Some(0) if positive => default,
        Some(parsed) => parsed,
        None => default,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
