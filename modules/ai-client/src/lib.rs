pub mod error;
pub mod gemini;
pub mod openai;
pub mod traits;
pub mod util;

pub use error::{Result, UpstreamError};
pub use gemini::Gemini;
pub use openai::OpenAi;
pub use traits::{TextGenerator, Unconfigured};
