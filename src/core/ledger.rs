use crate::domain::model::{SwimId, SwimRecord};
use crate::utils::error::Result;
use crate::utils::validation::validate_one_of;
use std::collections::HashSet;
use std::io::Write;

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub fn total_distance(swims: &[SwimRecord]) -> f64 {
    swims.iter().map(|s| s.distance_meters).sum()
}

/// Drops exactly the selected rows and keeps the order of the rest.
pub fn remove_selected(swims: &[SwimRecord], ids: &[SwimId]) -> Vec<SwimRecord> {
    let selected: HashSet<&SwimId> = ids.iter().collect();
    swims
        .iter()
        .filter(|s| !selected.contains(&s.id))
        .cloned()
        .collect()
}

/// Counter text: kilometres, three decimals, comma as decimal separator.
pub fn format_km(meters: f64) -> String {
    format!("{:.3}", meters / 1000.0).replace('.', ",")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub rows: &'a [SwimRecord],
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
}

/// Pages are 1-based. A page past the end yields no rows.
pub fn paginate(swims: &[SwimRecord], page: usize, page_size: usize) -> Result<Page<'_>> {
    validate_one_of("page_size", page_size, &PAGE_SIZE_OPTIONS)?;

    let page = page.max(1);
    let page_count = swims.len().div_ceil(page_size).max(1);
    let start = (page - 1).saturating_mul(page_size).min(swims.len());
    let end = start.saturating_add(page_size).min(swims.len());

    Ok(Page {
        rows: &swims[start..end],
        page,
        page_count,
        total_rows: swims.len(),
    })
}

pub fn write_csv<W: Write>(swims: &[SwimRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["id", "datum", "strecke", "name", "kommentar"])?;
    for swim in swims {
        csv_writer.write_record([
            swim.id.to_string(),
            swim.date.clone(),
            swim.distance_meters.to_string(),
            swim.name.clone(),
            swim.comment.clone(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
