pub mod html;
pub mod records;
pub mod sink;

pub use html::{HtmlRenderer, MarkupRenderer};
pub use records::{GridCard, OverviewItem};
pub use sink::{render_presentation, PageFragments, RenderSummary, RenderTarget};
