//! The middleware stages composed into every derived client.
//!
//! Stage order is fixed by the pipeline assembler and is load-bearing; see
//! `pipeline.rs` for the ordering contract. No stage
//! swallows a transport failure: errors from the stage below propagate
//! unchanged, at most after being logged.

pub mod augment;
pub(crate) mod bypass;
pub mod cache;
pub(crate) mod debug;
pub mod pagination;

mod clamp;

pub(crate) use augment::RequestAugmenter;
pub(crate) use bypass::CacheBypass;
pub(crate) use cache::HttpCache;
pub(crate) use clamp::FreshnessClamp;
pub(crate) use debug::{CacheStatusLogger, RequestLogger};
pub(crate) use pagination::Pagination;
