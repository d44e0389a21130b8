//! Text artifacts derived from project metadata.
//!
//! - [`CommentStamper`]: license header comments prepended to CSS/JS outputs
//! - [`examples_index_page`]: the HTML index listing every example page

mod examples;
mod header;

pub use examples::examples_index_page;
pub use header::{CommentStamper, prepend};
