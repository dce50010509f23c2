/// simplelog setup for the command line tool
pub mod logger;
