pub mod config;
pub mod mesh;
pub mod observation;
pub mod pose;
pub mod scoring;
