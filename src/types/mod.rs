//! Shared types for DRY compliance.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginatedMarks, PaginationMeta, PaginationParams};
pub use response::{ApiResponse, MarksRecordedResponse};
