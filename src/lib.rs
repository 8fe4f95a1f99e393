pub mod api;
pub mod config;
pub mod data_models;
pub mod document;
pub mod extractor;
pub mod fetcher;
pub mod presentation;
pub mod service;
