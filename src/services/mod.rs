pub mod enrichment;
pub mod export;

pub use enrichment::{EnrichmentError, EnrichmentService, RefreshStats};
pub use export::render_workbook;
