//! Integration tests for mapping, paging and staging.

mod acquire;
mod mapped_file;
