//! Panel engine: content location, Markdown/plain-text extraction and file output.
mod convert;
mod decode;
mod exporter;
mod extract;
mod filename;
mod node;
mod passes;
mod persist;
mod types;

pub use convert::{collapse_blank_lines, ContentExtractor, OutputFormat};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use exporter::{Clock, ExportConfig, PanelExporter};
pub use extract::{ContentLocator, Document, CONTAINER_SELECTOR, CONTENT_SELECTOR};
pub use filename::{download_filename, format_timestamp, sanitize_title};
pub use node::{Element, Node};
pub use persist::{ensure_output_dir, DirectorySink, FileSink};
pub use types::{ExportError, ExtractError, PersistError, SavedFile};
