/// fetching of WebBook pages and compound identification
pub mod NIST_parser;
/// HTML tables -> thermodynamic records and phase-change data
pub mod NIST_tables;
/// free-text cell -> number
pub mod number_parsing;

#[cfg(test)]
pub mod mock_client;
