//! # Loading Store
//!
//! Tracks one global busy flag and any number of named operations, each with
//! a display message. Operations are reported in by callers doing the actual
//! work; the store never runs or cancels anything itself.

pub mod selectors;
mod store;

pub use store::{
    LoadingContext, LoadingEvent, LoadingReducer, LoadingStore, DEFAULT_LOADING_MESSAGE,
    GLOBAL_MESSAGE_KEY,
};
