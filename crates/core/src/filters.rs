//! List-filter state and its URL query-string codec.
//!
//! One vocabulary is shared by the browser URL and the outgoing HTTP query
//! string: `severity`/`category`/`source` (repeatable), `startDate` +
//! `endDate` (both or neither), `search`, `sortBy`, `page`, `perPage`.
//! Absent dimensions stay absent: the codec never produces an
//! empty-but-present collection, and serialization omits keys whose value
//! is missing or at its default.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Default page size for list requests.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Upper bound the server enforces on page size.
pub const MAX_PER_PAGE: u32 = 100;

/// Date format used by `startDate` / `endDate` parameters.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Sort keys
// ---------------------------------------------------------------------------

/// Server-defined sort orders. The client never re-sorts results locally;
/// each token maps to a stable ordering applied by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    LatestViewed,
    Newest,
    Oldest,
    SeverityDesc,
    SeverityAsc,
    TitleAsc,
    TitleDesc,
    CveCountDesc,
    SourceAsc,
}

impl SortBy {
    /// Return the sort token as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LatestViewed => "latest_viewed",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::SeverityDesc => "severity_desc",
            Self::SeverityAsc => "severity_asc",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
            Self::CveCountDesc => "cve_count_desc",
            Self::SourceAsc => "source_asc",
        }
    }

    /// Parse a sort token. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "latest_viewed" => Some(Self::LatestViewed),
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "severity_desc" => Some(Self::SeverityDesc),
            "severity_asc" => Some(Self::SeverityAsc),
            "title_asc" => Some(Self::TitleAsc),
            "title_desc" => Some(Self::TitleDesc),
            "cve_count_desc" => Some(Self::CveCountDesc),
            "source_asc" => Some(Self::SourceAsc),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Inclusive publication-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Query parameters for the article list views.
///
/// Multi-select dimensions use union semantics: an article matches when any
/// selected value matches. `page` is 1-indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleFilters {
    pub severity: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub source: Option<Vec<String>>,
    pub date_range: Option<DateRange>,
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for ArticleFilters {
    fn default() -> Self {
        Self {
            severity: None,
            category: None,
            source: None,
            date_range: None,
            search: None,
            sort_by: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl ArticleFilters {
    /// Parse filters from a URL query string (with or without a leading
    /// `?`).
    ///
    /// Unknown keys and unknown sort tokens are ignored. Empty values are
    /// dropped. A date range requires both `startDate` and `endDate` to be
    /// present and well-formed, otherwise the range is absent. `page` falls
    /// back to 1 on anything non-numeric or below 1; `perPage` is clamped
    /// into `1..=MAX_PER_PAGE`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut filters = Self::default();
        let mut start_date = None;
        let mut end_date = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "severity" => push_value(&mut filters.severity, value.into_owned()),
                "category" => push_value(&mut filters.category, value.into_owned()),
                "source" => push_value(&mut filters.source, value.into_owned()),
                "startDate" => {
                    start_date = NaiveDate::parse_from_str(&value, DATE_FORMAT).ok();
                }
                "endDate" => {
                    end_date = NaiveDate::parse_from_str(&value, DATE_FORMAT).ok();
                }
                "search" => filters.search = Some(value.into_owned()),
                "sortBy" => filters.sort_by = SortBy::parse(&value),
                "page" => {
                    filters.page = value.parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1);
                }
                "perPage" => {
                    filters.per_page = value
                        .parse::<u32>()
                        .ok()
                        .map(|p| p.clamp(1, MAX_PER_PAGE))
                        .unwrap_or(DEFAULT_PER_PAGE);
                }
                _ => {}
            }
        }

        if let (Some(start), Some(end)) = (start_date, end_date) {
            filters.date_range = Some(DateRange { start, end });
        }

        filters
    }

    /// Serialize to a URL query string (no leading `?`).
    ///
    /// The inverse of [`parse`](Self::parse): absent dimensions produce no
    /// key at all, multi-value dimensions emit one `key=value` pair per
    /// selected value in selection order, and `page`/`perPage` are omitted
    /// at their defaults.
    pub fn to_query(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());

        for value in self.severity.iter().flatten() {
            ser.append_pair("severity", value);
        }
        for value in self.category.iter().flatten() {
            ser.append_pair("category", value);
        }
        for value in self.source.iter().flatten() {
            ser.append_pair("source", value);
        }
        if let Some(range) = &self.date_range {
            ser.append_pair("startDate", &range.start.format(DATE_FORMAT).to_string());
            ser.append_pair("endDate", &range.end.format(DATE_FORMAT).to_string());
        }
        if let Some(search) = &self.search {
            ser.append_pair("search", search);
        }
        if let Some(sort) = self.sort_by {
            ser.append_pair("sortBy", sort.as_str());
        }
        if self.page > 1 {
            ser.append_pair("page", &self.page.to_string());
        }
        if self.per_page != DEFAULT_PER_PAGE {
            ser.append_pair("perPage", &self.per_page.to_string());
        }

        ser.finish()
    }

    /// True when any filter dimension is set. Sort order and pagination do
    /// not count as filters.
    pub fn has_active_filters(&self) -> bool {
        self.severity.as_ref().is_some_and(|v| !v.is_empty())
            || self.category.as_ref().is_some_and(|v| !v.is_empty())
            || self.source.as_ref().is_some_and(|v| !v.is_empty())
            || self.date_range.is_some()
            || self.search.is_some()
    }
}

/// Append to a multi-value dimension, materializing it on first use so an
/// untouched dimension stays `None` rather than becoming an empty vec.
fn push_value(slot: &mut Option<Vec<String>>, value: String) {
    slot.get_or_insert_with(Vec::new).push(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_severity_and_date_range() {
        // Scenario: two severities plus a January window.
        let f = ArticleFilters::parse(
            "?severity=critical&severity=high&startDate=2024-01-01&endDate=2024-01-31",
        );
        assert_eq!(
            f.severity,
            Some(vec!["critical".to_string(), "high".to_string()])
        );
        let range = f.date_range.unwrap();
        assert_eq!(range.start.to_string(), "2024-01-01");
        assert_eq!(range.end.to_string(), "2024-01-31");
        assert_eq!(f.page, 1);
    }

    #[test]
    fn date_range_requires_both_ends() {
        let f = ArticleFilters::parse("startDate=2024-01-01");
        assert_eq!(f.date_range, None);
        let f = ArticleFilters::parse("endDate=2024-01-31");
        assert_eq!(f.date_range, None);
    }

    #[test]
    fn malformed_date_drops_the_range() {
        let f = ArticleFilters::parse("startDate=garbage&endDate=2024-01-31");
        assert_eq!(f.date_range, None);
    }

    #[test]
    fn empty_params_never_create_empty_collections() {
        let f = ArticleFilters::parse("severity=&category=&search=");
        assert_eq!(f.severity, None);
        assert_eq!(f.category, None);
        assert_eq!(f.search, None);
    }

    #[test]
    fn page_falls_back_to_one_on_invalid_input() {
        assert_eq!(ArticleFilters::parse("page=abc").page, 1);
        assert_eq!(ArticleFilters::parse("page=0").page, 1);
        assert_eq!(ArticleFilters::parse("page=-3").page, 1);
        assert_eq!(ArticleFilters::parse("page=5").page, 5);
    }

    #[test]
    fn per_page_is_clamped_to_server_bounds() {
        assert_eq!(ArticleFilters::parse("perPage=500").per_page, MAX_PER_PAGE);
        assert_eq!(ArticleFilters::parse("perPage=0").per_page, 1);
        assert_eq!(ArticleFilters::parse("perPage=nope").per_page, DEFAULT_PER_PAGE);
        assert_eq!(ArticleFilters::parse("perPage=50").per_page, 50);
    }

    #[test]
    fn unknown_sort_tokens_are_ignored() {
        assert_eq!(ArticleFilters::parse("sortBy=shuffled").sort_by, None);
        assert_eq!(
            ArticleFilters::parse("sortBy=cve_count_desc").sort_by,
            Some(SortBy::CveCountDesc)
        );
    }

    #[test]
    fn serialization_omits_absent_keys_and_defaults() {
        let f = ArticleFilters::default();
        assert_eq!(f.to_query(), "");

        let f = ArticleFilters {
            search: Some("ransomware".to_string()),
            ..Default::default()
        };
        assert_eq!(f.to_query(), "search=ransomware");
    }

    #[test]
    fn multi_value_dimensions_serialize_one_pair_per_value() {
        let f = ArticleFilters {
            severity: Some(vec!["critical".to_string(), "high".to_string()]),
            ..Default::default()
        };
        assert_eq!(f.to_query(), "severity=critical&severity=high");
    }

    #[test]
    fn query_round_trip_reproduces_filters() {
        let f = ArticleFilters {
            severity: Some(vec!["critical".to_string(), "high".to_string()]),
            category: Some(vec!["malware".to_string()]),
            source: Some(vec!["nvd".to_string()]),
            date_range: Some(DateRange {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            }),
            search: Some("zero day".to_string()),
            sort_by: Some(SortBy::SeverityDesc),
            page: 3,
            per_page: 50,
        };
        assert_eq!(ArticleFilters::parse(&f.to_query()), f);
    }

    #[test]
    fn search_terms_survive_percent_encoding() {
        let f = ArticleFilters {
            search: Some("remote code execution & more".to_string()),
            ..Default::default()
        };
        assert_eq!(ArticleFilters::parse(&f.to_query()), f);
    }

    #[test]
    fn has_active_filters_ignores_sort_and_pagination() {
        let mut f = ArticleFilters::default();
        assert!(!f.has_active_filters());

        f.sort_by = Some(SortBy::Newest);
        f.page = 4;
        assert!(!f.has_active_filters());

        f.search = Some("apt".to_string());
        assert!(f.has_active_filters());
    }

    #[test]
    fn sort_tokens_round_trip() {
        let all = [
            SortBy::LatestViewed,
            SortBy::Newest,
            SortBy::Oldest,
            SortBy::SeverityDesc,
            SortBy::SeverityAsc,
            SortBy::TitleAsc,
            SortBy::TitleDesc,
            SortBy::CveCountDesc,
            SortBy::SourceAsc,
        ];
        for sort in all {
            assert_eq!(SortBy::parse(sort.as_str()), Some(sort));
        }
    }
}
