// Reference String Handling
//
// Conversion between the comma-separated text form of a reference string and
// the page sequence the engine runs on.

use rand::Rng;

use crate::common::types::PageId;
use crate::simulation::config::ConfigError;

/// Parse comma-separated page numbers, e.g. `"7, 0, 1"`
pub fn parse_reference(text: &str) -> Result<Vec<PageId>, ConfigError> {
    if text.trim().is_empty() {
        return Err(ConfigError::EmptyReferenceString);
    }

    text.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<PageId>()
                .map_err(|_| ConfigError::InvalidPageToken(token.to_string()))
        })
        .collect()
}

/// Render a page sequence in the comma-separated form
pub fn format_reference(pages: &[PageId]) -> String {
    pages
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Draw `length` pages uniformly from `0..=max_page`
pub fn generate_reference<R: Rng + ?Sized>(rng: &mut R, length: usize, max_page: PageId) -> Vec<PageId> {
    (0..length).map(|_| rng.gen_range(0..=max_page)).collect()
}
