#[allow(non_snake_case)]
pub mod DataCollection;
#[allow(non_snake_case)]
pub mod Thermodynamics;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod settings;
