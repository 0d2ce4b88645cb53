//! Outbound HTTP adapters

pub mod icon_source_impl;

pub use icon_source_impl::HttpIconSource;
