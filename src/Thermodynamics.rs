#[allow(non_snake_case)]
/// handlers for the NIST Chemistry WebBook: page retrieval and table parsing
pub mod DBhandlers;
