//! Field-merge policy.
//!
//! Scalars: the keep record's value wins unless it is null or blank, in which
//! case the first usable value among the duplicates (in caller order) is
//! adopted. Lists: keep's values first, then values new to the list in
//! duplicate order. Identity and bookkeeping columns are never merged.

use std::hash::Hash;

use chrono::NaiveDate;
use indexmap::IndexSet;

use crate::common::{DirectoryError, DirectoryResult, Id};
use crate::domains::catalog::{
    Exhibition, Exhibitor, ExpoEdition, Organizer, Pavilion, Record, Series,
};

/// A value that a merge may replace.
trait Vacant {
    fn is_vacant(&self) -> bool;
}

impl Vacant for String {
    fn is_vacant(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Vacant for NaiveDate {
    fn is_vacant(&self) -> bool {
        false
    }
}

impl Vacant for i32 {
    fn is_vacant(&self) -> bool {
        false
    }
}

impl<T> Vacant for Id<T> {
    fn is_vacant(&self) -> bool {
        self.is_unassigned()
    }
}

impl<T: Vacant> Vacant for Option<T> {
    fn is_vacant(&self) -> bool {
        self.as_ref().map_or(true, Vacant::is_vacant)
    }
}

fn fill<T: Vacant + Clone>(slot: &mut T, candidate: &T) {
    if slot.is_vacant() && !candidate.is_vacant() {
        *slot = candidate.clone();
    }
}

fn union<T: Clone + Eq + Hash>(slot: &mut Vec<T>, candidates: &[T]) {
    if candidates.iter().all(|candidate| slot.contains(candidate)) {
        return;
    }
    let mut merged: IndexSet<T> = slot.drain(..).collect();
    merged.extend(candidates.iter().cloned());
    *slot = merged.into_iter().collect();
}

fn union_text(slot: &mut Vec<String>, candidates: &[String]) {
    let usable: Vec<String> = candidates
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    union(slot, &usable);
}

/// Records whose fields can absorb a duplicate's.
pub trait Mergeable {
    /// Fold `duplicate` into `self`. Call once per duplicate, in order.
    fn absorb(&mut self, duplicate: &Self);
}

impl Mergeable for Exhibition {
    fn absorb(&mut self, d: &Self) {
        fill(&mut self.fair_name, &d.fair_name);
        fill(&mut self.fair_name_trans, &d.fair_name_trans);
        fill(&mut self.fair_label, &d.fair_label);
        fill(&mut self.event_format, &d.event_format);
        fill(&mut self.website, &d.website);
        fill(&mut self.fair_start_date, &d.fair_start_date);
        fill(&mut self.fair_end_date, &d.fair_end_date);
        fill(&mut self.period, &d.period);
        fill(&mut self.open_hour, &d.open_hour);
        fill(&mut self.intro, &d.intro);
        fill(&mut self.exhibition_items, &d.exhibition_items);
        union_text(&mut self.industry_field, &d.industry_field);
        fill(&mut self.country, &d.country);
        fill(&mut self.province, &d.province);
        fill(&mut self.city, &d.city);
        fill(&mut self.pavilion, &d.pavilion);
        fill(&mut self.pavilion_id, &d.pavilion_id);
        fill(&mut self.organizer_name, &d.organizer_name);
        fill(&mut self.organizer_id, &d.organizer_id);
        fill(&mut self.fair_series_id, &d.fair_series_id);
        fill(&mut self.contact, &d.contact);
        union_text(&mut self.phone, &d.phone);
        union_text(&mut self.email, &d.email);
        fill(&mut self.logo_url, &d.logo_url);
        fill(&mut self.banner_url, &d.banner_url);
    }
}

impl Mergeable for Organizer {
    fn absorb(&mut self, d: &Self) {
        fill(&mut self.organizer_name, &d.organizer_name);
        fill(&mut self.organizer_name_trans, &d.organizer_name_trans);
        fill(&mut self.found_year, &d.found_year);
        fill(&mut self.organizer_type, &d.organizer_type);
        fill(&mut self.website, &d.website);
        fill(&mut self.country, &d.country);
        fill(&mut self.province, &d.province);
        fill(&mut self.city, &d.city);
        fill(&mut self.address, &d.address);
        union_text(&mut self.phone, &d.phone);
        union_text(&mut self.email, &d.email);
        fill(&mut self.postal_code, &d.postal_code);
        fill(&mut self.logo_url, &d.logo_url);
        fill(&mut self.social_media_url, &d.social_media_url);
        fill(&mut self.intro, &d.intro);
    }
}

impl Mergeable for Pavilion {
    fn absorb(&mut self, d: &Self) {
        fill(&mut self.pavilion_name, &d.pavilion_name);
        fill(&mut self.pavilion_name_trans, &d.pavilion_name_trans);
        fill(&mut self.country, &d.country);
        fill(&mut self.province, &d.province);
        fill(&mut self.city, &d.city);
        fill(&mut self.space, &d.space);
        fill(&mut self.address, &d.address);
        fill(&mut self.intro, &d.intro);
        fill(&mut self.website, &d.website);
        union_text(&mut self.phone, &d.phone);
    }
}

impl Mergeable for Exhibitor {
    fn absorb(&mut self, d: &Self) {
        // fair_id is required, so the keep record's always stands
        fill(&mut self.exhibitor_name, &d.exhibitor_name);
        fill(&mut self.company_name, &d.company_name);
        fill(&mut self.uni_code, &d.uni_code);
        fill(&mut self.legal_person, &d.legal_person);
        fill(&mut self.register_date, &d.register_date);
        fill(&mut self.registered_capital, &d.registered_capital);
        union_text(&mut self.website, &d.website);
        fill(&mut self.intro, &d.intro);
        fill(&mut self.country, &d.country);
        fill(&mut self.province, &d.province);
        fill(&mut self.city, &d.city);
        fill(&mut self.logo_url, &d.logo_url);
        union_text(&mut self.category, &d.category);
        fill(&mut self.products, &d.products);
        fill(&mut self.brands, &d.brands);
        union_text(&mut self.email, &d.email);
        union_text(&mut self.phone, &d.phone);
        fill(&mut self.booth_number, &d.booth_number);
        let editions: Vec<ExpoEdition> = d
            .expo_info
            .iter()
            .filter(|edition| **edition != ExpoEdition::default())
            .cloned()
            .collect();
        union(&mut self.expo_info, &editions);
    }
}

impl Mergeable for Series {
    fn absorb(&mut self, d: &Self) {
        fill(&mut self.name, &d.name);
    }
}

/// Fold `duplicate` into `keep`. Both must be the same kind.
pub fn absorb_record(keep: &mut Record, duplicate: &Record) -> DirectoryResult<()> {
    match (keep, duplicate) {
        (Record::Exhibition(k), Record::Exhibition(d)) => k.absorb(d),
        (Record::Organizer(k), Record::Organizer(d)) => k.absorb(d),
        (Record::Pavilion(k), Record::Pavilion(d)) => k.absorb(d),
        (Record::Exhibitor(k), Record::Exhibitor(d)) => k.absorb(d),
        (Record::Series(k), Record::Series(d)) => k.absorb(d),
        (keep, duplicate) => {
            return Err(DirectoryError::integrity(format!(
                "cannot merge {} {} into {} {}",
                duplicate.kind(),
                duplicate.raw_id(),
                keep.kind(),
                keep.raw_id()
            )))
        }
    }
    Ok(())
}
