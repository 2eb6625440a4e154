//! Presentation layer: side panel widgets and the Data, Charts and Map pages.

pub mod map;
pub mod panels;
pub mod plot;
pub mod tables;
