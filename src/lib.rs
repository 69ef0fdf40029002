//! Selection capture and write-back core for an AI text-correction assistant.

pub mod app;
