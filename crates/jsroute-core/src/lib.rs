pub mod config;
pub mod logging;

pub mod discovery;
pub mod fetch;
pub mod links;
pub mod normalize;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod scan;
pub mod storage;
pub mod url_model;
