use analysis::Presentation;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::html::MarkupRenderer;
use crate::records::{GridCard, OverviewItem};

/// Where rendered fragments end up: a page mount point with a grid, an
/// overview list and a repository counter.
pub trait RenderTarget {
    fn append_card(&mut self, markup: String);
    fn append_overview(&mut self, markup: String);
    fn set_repo_count(&mut self, count: usize);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub cards: usize,
    pub overview: usize,
    pub total: usize,
}

pub fn render_presentation<R, T>(
    presentation: &Presentation<'_>,
    now: DateTime<Utc>,
    renderer: &R,
    target: &mut T,
) -> RenderSummary
where
    R: MarkupRenderer + ?Sized,
    T: RenderTarget + ?Sized,
{
    target.set_repo_count(presentation.total);

    for ranked in &presentation.grid {
        debug!(repo = %ranked.name(), hotness = ranked.hotness, "rendering grid card");
        target.append_card(renderer.card(&GridCard::from_ranked(ranked)));
    }

    for ranked in &presentation.overview {
        target.append_overview(renderer.overview_item(&OverviewItem::from_ranked(ranked, now)));
    }

    RenderSummary {
        cards: presentation.grid.len(),
        overview: presentation.overview.len(),
        total: presentation.total,
    }
}

/// In-memory render target that can be written out as one HTML section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFragments {
    pub cards: Vec<String>,
    pub overview: Vec<String>,
    pub repo_count: Option<usize>,
}

impl PageFragments {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<section class="repo-showcase">"#);
        out.push('\n');
        if let Some(count) = self.repo_count {
            out.push_str(&format!(r#"<p>Public repositories: <span id="num-repos">{count}</span></p>"#));
            out.push('\n');
        }
        out.push_str(r#"<ul id="updated-repos">"#);
        out.push('\n');
        for item in &self.overview {
            out.push_str(item);
            out.push('\n');
        }
        out.push_str("</ul>\n");
        out.push_str(r#"<div class="grid">"#);
        out.push('\n');
        for card in &self.cards {
            out.push_str(card);
            out.push('\n');
        }
        out.push_str("</div>\n</section>\n");
        out
    }
}

impl RenderTarget for PageFragments {
    fn append_card(&mut self, markup: String) {
        self.cards.push(markup);
    }

    fn append_overview(&mut self, markup: String) {
        self.overview.push(markup);
    }

    fn set_repo_count(&mut self, count: usize) {
        self.repo_count = Some(count);
    }
}
