pub mod address;
pub mod config;
pub mod normalization;
pub mod pdf_reader;
pub mod project;
pub mod row_mapping;
