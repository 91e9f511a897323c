use common::text::escape_html;

use crate::records::{GridCard, OverviewItem};

/// Turns display records into markup. Implementations decide the template;
/// the records carry no markup of their own.
pub trait MarkupRenderer {
    fn card(&self, card: &GridCard) -> String;
    fn overview_item(&self, item: &OverviewItem) -> String;
}

/// Default renderer: the portfolio page's card and list-item markup, with all
/// text and attribute values escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl MarkupRenderer for HtmlRenderer {
    fn card(&self, card: &GridCard) -> String {
        let mut info = escape_html(&card.stargazers).into_owned();
        if let Some(language) = &card.language {
            info.push_str(" &middot; ");
            info.push_str(&escape_html(language));
        }

        let mut icons = String::new();
        if let Some(homepage) = &card.homepage {
            icons.push_str(&icon_link("genericon-home", homepage));
        }
        icons.push_str(&icon_link("genericon-star", &card.stargazers_url));
        icons.push_str(&icon_link("genericon-sitemap", &card.network_url));

        format!(
            concat!(
                r#"<a class="box repo" href="{url}">"#,
                r#"<h2 class="repo-name">{name}</h2>"#,
                r#"<p class="repo-info">{info}</p>"#,
                r#"<p class="repo-desc">{description}</p>"#,
                r#"<p class="repo-icons">{icons}</p>"#,
                "</a>"
            ),
            url = escape_html(&card.url),
            name = escape_html(&card.name),
            info = info,
            description = escape_html(card.description.as_deref().unwrap_or_default()),
            icons = icons,
        )
    }

    fn overview_item(&self, item: &OverviewItem) -> String {
        format!(
            concat!(
                "<li>",
                r#"<span class="name"><a href="{url}">{name}</a></span>"#,
                r#" &middot; <span class="time"><a href="{commits_url}">{pushed}</a></span>"#,
                "</li>"
            ),
            url = escape_html(&item.url),
            name = escape_html(&item.name),
            commits_url = escape_html(&item.commits_url),
            pushed = escape_html(&item.pushed),
        )
    }
}

fn icon_link(icon: &str, href: &str) -> String {
    format!(
        r#"<a class="genericon {icon}" href="{href}"></a>"#,
        href = escape_html(href)
    )
}
