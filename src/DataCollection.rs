/// the per-compound collection loop, synthetic top-up and run-level fallback
pub mod collector;
/// error type of a collection run
pub mod errors;
/// static molecular descriptors and compound id encoding
pub mod molecular_properties;
/// dataset overview printed after a run
pub mod summary;
/// JSON snapshots and the CSV training table
pub mod storage;
/// closed-form synthetic rows
pub mod synthetic;
/// training rows and the aggregation of scraped data
pub mod training_data;
