//! Converters from files on disk into [`NormalizedDocument`]s.
//!
//! Every format is handled by a [`Converter`]; the [`ConverterRegistry`]
//! picks one by file extension. Plain text is decoded directly. Binary
//! formats (PDF, office documents, images) are expected to arrive as `.ndoc`
//! files, a serialized normalized document written by an external extractor.
//!
//! [`NormalizedDocument`]: docdiff_types::NormalizedDocument

pub mod error;
pub mod external;
pub mod json;
pub mod registry;
pub mod text;
pub mod traits;

pub use error::{ConvertError, ConvertResult};
pub use external::ExternalFormatConverter;
pub use json::NormalizedJsonConverter;
pub use registry::ConverterRegistry;
pub use text::TextConverter;
pub use traits::{extension_of, Converter};
