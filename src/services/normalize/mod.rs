//! Normalization Pipeline
//!
//! Turns a loosely-typed payload of manufacturing records into the fixed
//! `DashboardData` view-model.
//!
//! ## Flow
//!
//! payload -> `LotGrouper` (via `FieldExtractor`) -> `LotSummarizer` per lot
//! -> trend, timeline, insights, summary -> `DashboardAssembler`

mod assembler;
mod context;
mod extractor;
mod fallback;
mod fields;
mod grouper;
mod insights;
mod jitter;
mod summarizer;
mod summary;
mod timeline;
mod trend;

pub use assembler::*;
pub use context::NormalizeContext;
pub use extractor::{ExtractionStrategy, FieldExtractor};
pub use fallback::fallback_dashboard;
pub use grouper::{LotGrouper, LotGroups};
pub use insights::{InsightGenerator, CYCLE_TIME_TOLERANCE};
pub use jitter::SeededJitter;
pub use summarizer::{product_name, LotSummarizer, LOT_TREND_POINTS, UNKNOWN_PRODUCT};
pub use summary::calculate_summary;
pub use timeline::extract_timeline;
pub use trend::TrendAggregator;
