//! Service layer for business logic
//!
//! The allocation and resolution engine, shared between the HTTP API and
//! the CLI.

mod allocator;
mod code_source;
mod link_service;
mod resolver;

pub use allocator::CodeAllocator;
pub use code_source::{
    CodeSource, GENERATED_CODE_LENGTH, SeededSource, SequenceSource, ThreadRngSource,
};
pub use link_service::*;
pub use resolver::LinkResolver;
