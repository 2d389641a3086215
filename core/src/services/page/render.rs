//! HTML serialization of composed pages

use std::fmt::Write;

use agro_shared::html::escape_html;
use agro_shared::{Locale, SiteConfig};
use chrono::{Datelike, Utc};

use crate::domain::entities::ImageRef;
use crate::domain::Dictionary;
use crate::i18n::localized_path;

use super::document::{Card, FieldKind, FormField, Link, PageDocument, Section};

const NAV_ITEMS: [(&str, &str); 5] = [
    ("nav.home", "/"),
    ("nav.about", "/about"),
    ("nav.products", "/products"),
    ("nav.blog", "/blog"),
    ("nav.contact", "/contact"),
];

/// Serializes [`PageDocument`]s into complete HTML5 documents.
///
/// Every dynamic string is escaped; the layout chrome (navigation, language
/// switcher, footer) comes from the dictionary.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    site: SiteConfig,
}

impl HtmlRenderer {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn render(&self, doc: &PageDocument, dictionary: &Dictionary) -> String {
        let mut html = String::with_capacity(8 * 1024);
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n",
            doc.locale.code()
        );
        self.write_head(&mut html, doc);
        html.push_str("</head>\n<body>\n");
        self.write_header(&mut html, doc, dictionary);
        html.push_str("<main>\n");
        for section in &doc.sections {
            write_section(&mut html, section);
        }
        html.push_str("</main>\n");
        self.write_footer(&mut html, doc.locale, dictionary);
        html.push_str("</body>\n</html>\n");
        html
    }

    fn page_url(&self, locale: Locale, path: &str) -> String {
        self.site.absolute_url(&localized_path(locale, path))
    }

    fn write_head(&self, html: &mut String, doc: &PageDocument) {
        let title = if doc.title.is_empty() {
            self.site.name.clone()
        } else {
            format!("{} | {}", doc.title, self.site.name)
        };
        let _ = write!(
            html,
            "<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{title}</title>\n\
             <meta name=\"description\" content=\"{description}\">\n",
            title = escape_html(&title),
            description = escape_html(&doc.description),
        );
        if doc.noindex {
            html.push_str("<meta name=\"robots\" content=\"noindex\">\n");
        } else {
            let _ = writeln!(
                html,
                "<link rel=\"canonical\" href=\"{}\">",
                escape_html(&self.page_url(doc.locale, &doc.path))
            );
            for locale in Locale::all() {
                let _ = writeln!(
                    html,
                    "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">",
                    locale.code(),
                    escape_html(&self.page_url(*locale, &doc.path))
                );
            }
            let _ = writeln!(
                html,
                "<link rel=\"alternate\" hreflang=\"x-default\" href=\"{}\">",
                escape_html(&self.page_url(Locale::DEFAULT, &doc.path))
            );
        }
        let _ = write!(
            html,
            "<meta property=\"og:title\" content=\"{}\">\n\
             <meta property=\"og:description\" content=\"{}\">\n\
             <meta property=\"og:site_name\" content=\"{}\">\n\
             <meta property=\"og:locale\" content=\"{}\">\n",
            escape_html(&title),
            escape_html(&doc.description),
            escape_html(&self.site.name),
            doc.locale.og_locale(),
        );
        if let Some(image) = &doc.image {
            let _ = writeln!(
                html,
                "<meta property=\"og:image\" content=\"{}\">",
                escape_html(&image.url)
            );
        }
    }

    fn write_header(&self, html: &mut String, doc: &PageDocument, dictionary: &Dictionary) {
        let _ = write!(
            html,
            "<header>\n<a class=\"brand\" href=\"{}\">{}</a>\n<nav>\n<ul>\n",
            localized_path(doc.locale, "/"),
            escape_html(&self.site.name)
        );
        for (key, path) in NAV_ITEMS {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a></li>",
                escape_html(&localized_path(doc.locale, path)),
                escape_html(&dictionary.t(key))
            );
        }
        let _ = write!(
            html,
            "</ul>\n</nav>\n<div class=\"language\" aria-label=\"{}\">\n",
            escape_html(&dictionary.t("nav.language"))
        );
        for locale in Locale::all() {
            if *locale == doc.locale {
                let _ = writeln!(
                    html,
                    "<span lang=\"{}\" aria-current=\"true\">{}</span>",
                    locale.code(),
                    locale.native_name()
                );
            } else {
                let _ = writeln!(
                    html,
                    "<a lang=\"{}\" hreflang=\"{}\" href=\"{}\">{}</a>",
                    locale.code(),
                    locale.code(),
                    escape_html(&localized_path(*locale, &doc.path)),
                    locale.native_name()
                );
            }
        }
        html.push_str("</div>\n</header>\n");
    }

    fn write_footer(&self, html: &mut String, locale: Locale, dictionary: &Dictionary) {
        let year = Utc::now().year().to_string();
        let rights = dictionary.t_fmt(
            "footer.rights",
            &[("year", year.as_str()), ("site", self.site.name.as_str())],
        );
        let _ = write!(
            html,
            "<footer>\n<p>{}</p>\n<p><a href=\"{}\">{}</a></p>\n<p>{}</p>\n</footer>\n",
            escape_html(&dictionary.t("footer.tagline")),
            escape_html(&localized_path(locale, "/contact")),
            escape_html(&dictionary.t("nav.contact")),
            escape_html(&rights)
        );
    }
}

fn write_section(html: &mut String, section: &Section) {
    match section {
        Section::Hero {
            heading,
            subheading,
            cta,
        } => {
            let _ = writeln!(html, "<section class=\"hero\">\n<h1>{}</h1>", escape_html(heading));
            if let Some(sub) = subheading {
                let _ = writeln!(html, "<p class=\"lead\">{}</p>", escape_html(sub));
            }
            if let Some(cta) = cta {
                write_link(html, cta, Some("button"));
            }
            html.push_str("</section>\n");
        }
        Section::Text {
            heading,
            paragraphs,
        } => {
            html.push_str("<section class=\"text\">\n");
            if let Some(heading) = heading {
                let _ = writeln!(html, "<h2>{}</h2>", escape_html(heading));
            }
            write_paragraphs(html, paragraphs);
            html.push_str("</section>\n");
        }
        Section::Bullets { heading, items } => {
            let _ = writeln!(html, "<section class=\"bullets\">\n<h2>{}</h2>\n<ul>", escape_html(heading));
            for item in items {
                let _ = writeln!(html, "<li>{}</li>", escape_html(item));
            }
            html.push_str("</ul>\n</section>\n");
        }
        Section::CategoryFilter {
            label,
            options,
            active,
        } => {
            let _ = writeln!(
                html,
                "<nav class=\"category-filter\" aria-label=\"{}\">\n<ul>",
                escape_html(label)
            );
            for option in options {
                let current = if &option.href == active {
                    " aria-current=\"page\""
                } else {
                    ""
                };
                let _ = writeln!(
                    html,
                    "<li><a href=\"{}\"{}>{}</a></li>",
                    escape_html(&option.href),
                    current,
                    escape_html(&option.label)
                );
            }
            html.push_str("</ul>\n</nav>\n");
        }
        Section::ProductGrid {
            heading,
            cards,
            empty_message,
            more,
        } => write_cards(html, "product-grid", heading, cards, empty_message, more),
        Section::ArticleList {
            heading,
            cards,
            empty_message,
            more,
        } => write_cards(html, "article-list", heading, cards, empty_message, more),
        Section::ProductDetail {
            name,
            summary,
            paragraphs,
            image,
            gallery,
            facts,
            inquiry,
            back,
        } => {
            html.push_str("<article class=\"product\">\n");
            write_link(html, back, Some("back"));
            let _ = writeln!(html, "<h1>{}</h1>", escape_html(name));
            if let Some(image) = image {
                write_image(html, image, name);
            }
            if let Some(summary) = summary {
                let _ = writeln!(html, "<p class=\"lead\">{}</p>", escape_html(summary));
            }
            write_paragraphs(html, paragraphs);
            if !facts.is_empty() {
                html.push_str("<dl class=\"specifications\">\n");
                for (label, value) in facts {
                    let _ = writeln!(
                        html,
                        "<dt>{}</dt><dd>{}</dd>",
                        escape_html(label),
                        escape_html(value)
                    );
                }
                html.push_str("</dl>\n");
            }
            if !gallery.is_empty() {
                html.push_str("<div class=\"gallery\">\n");
                for image in gallery {
                    write_image(html, image, name);
                }
                html.push_str("</div>\n");
            }
            write_link(html, inquiry, Some("button"));
            html.push_str("</article>\n");
        }
        Section::ArticleBody {
            title,
            meta,
            image,
            paragraphs,
            tags,
            back,
        } => {
            html.push_str("<article class=\"post\">\n");
            write_link(html, back, Some("back"));
            let _ = writeln!(html, "<h1>{}</h1>", escape_html(title));
            if let Some(meta) = meta {
                let _ = writeln!(html, "<p class=\"meta\">{}</p>", escape_html(meta));
            }
            if let Some(image) = image {
                write_image(html, image, title);
            }
            write_paragraphs(html, paragraphs);
            if !tags.is_empty() {
                html.push_str("<ul class=\"tags\">\n");
                for tag in tags {
                    let _ = writeln!(html, "<li>{}</li>", escape_html(tag));
                }
                html.push_str("</ul>\n");
            }
            html.push_str("</article>\n");
        }
        Section::ContactForm {
            action,
            fields,
            submit,
        } => {
            let _ = writeln!(
                html,
                "<form class=\"contact\" method=\"post\" action=\"{}\">",
                escape_html(action)
            );
            for field in fields {
                write_field(html, field);
            }
            let _ = writeln!(html, "<button type=\"submit\">{}</button>\n</form>", escape_html(submit));
        }
        Section::NotFound {
            heading,
            message,
            home,
        } => {
            let _ = writeln!(
                html,
                "<section class=\"not-found\">\n<h1>{}</h1>\n<p>{}</p>",
                escape_html(heading),
                escape_html(message)
            );
            write_link(html, home, Some("button"));
            html.push_str("</section>\n");
        }
    }
}

fn write_cards(
    html: &mut String,
    class: &str,
    heading: &str,
    cards: &[Card],
    empty_message: &Option<String>,
    more: &Option<Link>,
) {
    let _ = writeln!(html, "<section class=\"{}\">\n<h2>{}</h2>", class, escape_html(heading));
    if cards.is_empty() {
        if let Some(message) = empty_message {
            let _ = writeln!(html, "<p class=\"empty\">{}</p>", escape_html(message));
        }
    } else {
        html.push_str("<ul>\n");
        for card in cards {
            html.push_str("<li class=\"card\">\n");
            if let Some(image) = &card.image {
                write_image(html, image, &card.title);
            }
            let _ = writeln!(
                html,
                "<h3><a href=\"{}\">{}</a></h3>",
                escape_html(&card.href),
                escape_html(&card.title)
            );
            if let Some(meta) = &card.meta {
                let _ = writeln!(html, "<p class=\"meta\">{}</p>", escape_html(meta));
            }
            if let Some(summary) = &card.summary {
                let _ = writeln!(html, "<p>{}</p>", escape_html(summary));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }
    if let Some(more) = more {
        write_link(html, more, Some("more"));
    }
    html.push_str("</section>\n");
}

fn write_paragraphs(html: &mut String, paragraphs: &[String]) {
    for paragraph in paragraphs {
        let _ = writeln!(html, "<p>{}</p>", escape_html(paragraph));
    }
}

fn write_link(html: &mut String, link: &Link, class: Option<&str>) {
    let class = class
        .map(|c| format!(" class=\"{}\"", c))
        .unwrap_or_default();
    let _ = writeln!(
        html,
        "<a{} href=\"{}\">{}</a>",
        class,
        escape_html(&link.href),
        escape_html(&link.label)
    );
}

fn write_image(html: &mut String, image: &ImageRef, fallback_alt: &str) {
    let _ = writeln!(
        html,
        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
        escape_html(&image.url),
        escape_html(image.alt_or(fallback_alt))
    );
}

fn write_field(html: &mut String, field: &FormField) {
    let required = if field.required { " required" } else { "" };
    let _ = writeln!(
        html,
        "<label for=\"{name}\">{label}</label>",
        name = field.name,
        label = escape_html(&field.label)
    );
    match &field.kind {
        FieldKind::TextArea => {
            let _ = writeln!(
                html,
                "<textarea id=\"{name}\" name=\"{name}\" rows=\"6\"{required}></textarea>",
                name = field.name,
                required = required
            );
        }
        FieldKind::Select {
            placeholder,
            options,
        } => {
            let _ = writeln!(
                html,
                "<select id=\"{name}\" name=\"{name}\"{required}>\n<option value=\"\">{placeholder}</option>",
                name = field.name,
                required = required,
                placeholder = escape_html(placeholder)
            );
            for option in options {
                let option = escape_html(option);
                let _ = writeln!(html, "<option value=\"{0}\">{0}</option>", option);
            }
            html.push_str("</select>\n");
        }
        input => {
            let kind = match input {
                FieldKind::Email => "email",
                FieldKind::Tel => "tel",
                _ => "text",
            };
            let _ = writeln!(
                html,
                "<input id=\"{name}\" name=\"{name}\" type=\"{kind}\"{required}>",
                name = field.name,
                kind = kind,
                required = required
            );
        }
    }
}
