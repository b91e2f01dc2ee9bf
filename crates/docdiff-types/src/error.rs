use thiserror::Error;

/// Errors produced when checking document invariants.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error(
        "positional block {index} breaks reading order: (page {page}, y {y}) follows (page {prev_page}, y {prev_y})"
    )]
    ReadingOrder {
        index: usize,
        page: u32,
        y: f64,
        prev_page: u32,
        prev_y: f64,
    },

    #[error("positional block {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}
