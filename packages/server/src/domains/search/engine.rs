//! Filtering, faceting, sorting and paging over an in-order document set.
//!
//! The engine is pure: callers load documents (in insertion order) and pass
//! today's date, so results depend only on the inputs.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::document::Searchable;
use super::query::{DateStatus, SearchQuery, SortField, SortOrder, SortSpec, DATE_FORMAT};

/// One page of results plus the facets of the whole candidate set.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage<T> {
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: u32,
    pub page_size: u32,
    pub results: Vec<T>,
    pub available_countries: Vec<String>,
    pub available_dates: Vec<String>,
}

impl<T> SearchPage<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchPage<U> {
        SearchPage {
            total_count: self.total_count,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
            results: self.results.into_iter().map(f).collect(),
            available_countries: self.available_countries,
            available_dates: self.available_dates,
        }
    }
}

/// Filter dimensions, named so a facet can leave its own one out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Predicate {
    Name,
    Organizer,
    Fair,
    Country,
    FairDate,
    DateStatus,
}

impl Predicate {
    const ALL: [Predicate; 6] = [
        Predicate::Name,
        Predicate::Organizer,
        Predicate::Fair,
        Predicate::Country,
        Predicate::FairDate,
        Predicate::DateStatus,
    ];
}

fn holds<D: Searchable>(
    predicate: Predicate,
    doc: &D,
    query: &SearchQuery,
    today: NaiveDate,
) -> bool {
    match predicate {
        Predicate::Name => query.name.as_ref().map_or(true, |needle| {
            doc.names()
                .iter()
                .any(|name| name.to_lowercase().contains(needle.as_str()))
        }),
        Predicate::Organizer => query
            .organizer_id
            .map_or(true, |wanted| doc.organizer_id() == Some(wanted)),
        Predicate::Fair => query
            .fair_id
            .map_or(true, |wanted| doc.fair_id() == Some(wanted)),
        Predicate::Country => query
            .country
            .as_deref()
            .map_or(true, |wanted| doc.countries().contains(&wanted)),
        Predicate::FairDate => query
            .fair_date
            .map_or(true, |wanted| doc.start_dates().contains(&wanted)),
        Predicate::DateStatus => query
            .date_status
            .map_or(true, |status| date_status_holds(status, &doc.date_ranges(), today)),
    }
}

fn date_status_holds(
    status: DateStatus,
    ranges: &[(NaiveDate, NaiveDate)],
    today: NaiveDate,
) -> bool {
    match status {
        DateStatus::Ongoing => ranges
            .iter()
            .any(|(start, end)| *start <= today && today <= *end),
        DateStatus::Expired => !ranges.is_empty() && ranges.iter().all(|(_, end)| *end < today),
    }
}

fn matches_except<D: Searchable>(
    doc: &D,
    query: &SearchQuery,
    today: NaiveDate,
    skip: Option<Predicate>,
) -> bool {
    Predicate::ALL
        .into_iter()
        .filter(|predicate| Some(*predicate) != skip)
        .all(|predicate| holds(predicate, doc, query, today))
}

/// Missing values sort last whatever the direction.
fn compare_present<T: Ord>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.cmp(&b),
            SortOrder::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_documents<D: Searchable>(docs: &mut [D], sort: SortSpec) {
    // `sort_by` is stable, so ties keep insertion order
    match sort.field {
        SortField::Country => {
            docs.sort_by(|a, b| compare_present(a.sort_country(), b.sort_country(), sort.order))
        }
        SortField::StartDate => docs.sort_by(|a, b| {
            compare_present(a.sort_start_date(), b.sort_start_date(), sort.order)
        }),
    }
}

/// Run `query` over `documents`, which must be in insertion order.
pub fn search<D: Searchable>(
    documents: Vec<D>,
    query: &SearchQuery,
    today: NaiveDate,
) -> SearchPage<D> {
    let available_countries: Vec<String> = documents
        .iter()
        .filter(|doc| matches_except(*doc, query, today, Some(Predicate::Country)))
        .flat_map(|doc| doc.countries().into_iter().map(str::to_string).collect::<Vec<_>>())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let available_dates: Vec<String> = documents
        .iter()
        .filter(|doc| matches_except(*doc, query, today, Some(Predicate::FairDate)))
        .flat_map(|doc| doc.start_dates())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|date| date.format(DATE_FORMAT).to_string())
        .collect();

    let mut hits: Vec<D> = documents
        .into_iter()
        .filter(|doc| matches_except(doc, query, today, None))
        .collect();

    if let Some(sort) = query.sort {
        sort_documents(&mut hits, sort);
    }

    let total_count = hits.len();
    let page = query.page;

    SearchPage {
        total_count,
        total_pages: page.total_pages(total_count),
        current_page: page.page,
        page_size: page.page_size,
        results: page.slice(hits),
        available_countries,
        available_dates,
    }
}
