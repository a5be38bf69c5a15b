mod traits;
mod file_excerpt;
mod web_search;
mod image_gen;
mod pipeline;

pub use traits::*;
pub use file_excerpt::{excerpt, FileUpload};
pub use web_search::{search_fragment, SerpApiSearch};
pub use image_gen::{image_fragment, OpenAIImageClient};
pub use pipeline::{AugmentRequest, Augmentation, ToolPipeline};
