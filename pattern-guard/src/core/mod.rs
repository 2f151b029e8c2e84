//! Core runtime types shared by analyzers.

pub mod validation_context;

pub use validation_context::{
    current_validation_context, with_validation_context, ValidationContext, CURRENT_CONTEXT,
};
