//! Page composition: dictionary strings and entities into a document

use agro_shared::validation::is_valid_slug;
use agro_shared::{Locale, SiteConfig};

use crate::domain::entities::{Article, Category, Product};
use crate::domain::Dictionary;
use crate::errors::{DomainError, DomainResult};
use crate::i18n::localized_path;

use super::content::PageContent;
use super::document::{Card, FieldKind, FormField, Link, PageDocument, Section};
use super::render::HtmlRenderer;
use super::state::{RenderLifecycle, RenderState};
use super::template::PageTemplate;

/// A serialized page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub locale: Locale,
    pub title: String,
    pub html: String,
}

/// Terminal outcome of a page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Rendered(RenderedPage),
    /// A required entity is missing; carries the localized not-found page
    NotFound(RenderedPage),
}

impl PageOutcome {
    pub fn page(&self) -> &RenderedPage {
        match self {
            PageOutcome::Rendered(page) | PageOutcome::NotFound(page) => page,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PageOutcome::NotFound(_))
    }
}

/// Builds documents for each template and renders them.
///
/// A missing required entity short-circuits to the not-found page. Empty
/// listings render their section empty or leave it out.
#[derive(Debug, Clone)]
pub struct PageComposer {
    renderer: HtmlRenderer,
}

impl PageComposer {
    pub fn new(site: SiteConfig) -> Self {
        Self {
            renderer: HtmlRenderer::new(site),
        }
    }

    /// Compose fetched content; the lifecycle must be in `ContentFetched`
    /// and ends in `Rendered` or `NotFound`.
    pub fn compose(
        &self,
        lifecycle: &mut RenderLifecycle,
        locale: Locale,
        template: &PageTemplate,
        dictionary: &Dictionary,
        content: PageContent,
    ) -> DomainResult<PageOutcome> {
        if lifecycle.state() != RenderState::ContentFetched {
            return Err(DomainError::InvalidTransition {
                from: lifecycle.state().to_string(),
                to: "compose".to_string(),
            });
        }
        if !content.fits(template) {
            return Err(DomainError::Internal {
                message: format!("content does not match template {:?}", template),
            });
        }

        if content.is_missing_required() {
            lifecycle.advance(RenderState::NotFound)?;
            tracing::info!(
                locale = %locale,
                path = %template.path(),
                event = "page_not_found",
                "Required content missing, rendering not-found page"
            );
            return Ok(PageOutcome::NotFound(self.not_found(locale, dictionary, &template.path())));
        }

        let doc = self.document(locale, template, dictionary, content);
        lifecycle.advance(RenderState::Rendered)?;
        Ok(PageOutcome::Rendered(self.finish(doc, dictionary)))
    }

    /// The localized not-found page for any path
    pub fn not_found(&self, locale: Locale, dictionary: &Dictionary, path: &str) -> RenderedPage {
        let doc = PageDocument {
            locale,
            path: path.to_string(),
            title: dictionary.t("notFound.title"),
            description: dictionary.t("notFound.message"),
            image: None,
            sections: vec![Section::NotFound {
                heading: dictionary.t("notFound.heading"),
                message: dictionary.t("notFound.message"),
                home: Link::new(dictionary.t("notFound.backHome"), localized_path(locale, "/")),
            }],
            noindex: true,
        };
        self.finish(doc, dictionary)
    }

    fn finish(&self, doc: PageDocument, dictionary: &Dictionary) -> RenderedPage {
        RenderedPage {
            locale: doc.locale,
            html: self.renderer.render(&doc, dictionary),
            title: doc.title,
        }
    }

    fn document(
        &self,
        locale: Locale,
        template: &PageTemplate,
        d: &Dictionary,
        content: PageContent,
    ) -> PageDocument {
        let ns = template.namespace();
        let mut doc = PageDocument {
            locale,
            path: template.path(),
            title: d.t(&format!("{}.title", ns)),
            description: d.t(&format!("{}.description", ns)),
            image: None,
            sections: Vec::new(),
            noindex: false,
        };
        let link = |label_key: &str, path: &str| Link::new(d.t(label_key), localized_path(locale, path));

        match content {
            PageContent::Home {
                featured_products,
                latest_articles,
            } => {
                doc.title = String::new();
                doc.description = d.t("meta.siteDescription");
                doc.sections.push(Section::Hero {
                    heading: d.t("home.heroTitle"),
                    subheading: d.get("home.heroSubtitle").map(str::to_string),
                    cta: Some(link("home.heroCta", "/products")),
                });
                if !featured_products.is_empty() {
                    doc.sections.push(Section::ProductGrid {
                        heading: d.t("home.featuredTitle"),
                        cards: product_cards(locale, &featured_products),
                        empty_message: None,
                        more: Some(link("home.viewAllProducts", "/products")),
                    });
                }
                if !latest_articles.is_empty() {
                    doc.sections.push(Section::ArticleList {
                        heading: d.t("home.latestTitle"),
                        cards: article_cards(locale, &latest_articles),
                        empty_message: None,
                        more: Some(link("home.viewAllArticles", "/blog")),
                    });
                }
            }
            PageContent::About => {
                doc.sections.push(Section::Hero {
                    heading: d.t("about.heading"),
                    subheading: d.get("about.subheading").map(str::to_string),
                    cta: None,
                });
                doc.sections.push(Section::Text {
                    heading: None,
                    paragraphs: owned(d.strings("about.intro")),
                });
                let values = d.strings("about.values");
                if !values.is_empty() {
                    doc.sections.push(Section::Bullets {
                        heading: d.t("about.valuesTitle"),
                        items: owned(values),
                    });
                }
                doc.sections.push(Section::Hero {
                    heading: d.t("about.ctaTitle"),
                    subheading: None,
                    cta: Some(link("nav.contact", "/contact")),
                });
            }
            PageContent::Products {
                products,
                categories,
            } => {
                let active_category = match template {
                    PageTemplate::Products { category } => category.clone(),
                    _ => None,
                };
                if let Some(active) = active_category
                    .as_deref()
                    .and_then(|slug| categories.iter().find(|c| c.slug == slug))
                {
                    doc.title = format!("{} - {}", active.name, doc.title);
                    if let Some(description) = &active.description {
                        doc.description = description.clone();
                    }
                }
                doc.sections.push(Section::Hero {
                    heading: d.t("products.heading"),
                    subheading: d.get("products.subheading").map(str::to_string),
                    cta: None,
                });
                if !categories.is_empty() {
                    doc.sections.push(category_filter(locale, d, &categories, active_category.as_deref()));
                }
                doc.sections.push(Section::ProductGrid {
                    heading: d.t("products.listTitle"),
                    cards: product_cards(locale, &products),
                    empty_message: Some(d.t("products.empty")),
                    more: None,
                });
            }
            PageContent::ProductDetail {
                product: Some(product),
                related,
            } => {
                doc.title = product.name.clone();
                if let Some(summary) = product.summary() {
                    doc.description = summary.to_string();
                }
                doc.image = product.image.clone();
                doc.sections.push(product_detail(locale, d, &product));
                if !related.is_empty() {
                    doc.sections.push(Section::ProductGrid {
                        heading: d.t("products.relatedTitle"),
                        cards: product_cards(locale, &related),
                        empty_message: None,
                        more: None,
                    });
                }
            }
            PageContent::Blog { articles } => {
                doc.sections.push(Section::Hero {
                    heading: d.t("blog.heading"),
                    subheading: d.get("blog.subheading").map(str::to_string),
                    cta: None,
                });
                doc.sections.push(Section::ArticleList {
                    heading: d.t("blog.listTitle"),
                    cards: article_cards(locale, &articles),
                    empty_message: Some(d.t("blog.empty")),
                    more: None,
                });
            }
            PageContent::ArticleDetail {
                article: Some(article),
                related,
            } => {
                doc.title = article.title.clone();
                if let Some(excerpt) = article.excerpt.as_deref().filter(|e| !e.trim().is_empty()) {
                    doc.description = excerpt.to_string();
                }
                doc.image = article.image.clone();
                doc.sections.push(Section::ArticleBody {
                    title: article.title.clone(),
                    meta: article_meta(d, &article),
                    image: article.image.clone(),
                    paragraphs: article.paragraphs().into_iter().map(str::to_string).collect(),
                    tags: article.tags.clone(),
                    back: link("blog.backToBlog", "/blog"),
                });
                if !related.is_empty() {
                    doc.sections.push(Section::ArticleList {
                        heading: d.t("blog.relatedTitle"),
                        cards: article_cards(locale, &related),
                        empty_message: None,
                        more: None,
                    });
                }
            }
            PageContent::Contact { products } => {
                doc.sections.push(Section::Hero {
                    heading: d.t("contact.heading"),
                    subheading: d.get("contact.intro").map(str::to_string),
                    cta: None,
                });
                doc.sections.push(contact_form(d, &products));
            }
            // Missing required entities were handled before composition
            PageContent::ProductDetail { product: None, .. }
            | PageContent::ArticleDetail { article: None, .. } => {}
        }
        doc
    }
}

fn owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

fn product_cards(locale: Locale, products: &[Product]) -> Vec<Card> {
    products
        .iter()
        .map(|p| Card {
            title: p.name.clone(),
            href: localized_path(locale, &format!("/products/{}", p.slug)),
            summary: p.summary().map(str::to_string),
            image: p.image.clone(),
            meta: p.category.as_ref().and_then(|c| c.name.clone()),
        })
        .collect()
}

fn article_cards(locale: Locale, articles: &[Article]) -> Vec<Card> {
    articles
        .iter()
        .map(|a| Card {
            title: a.title.clone(),
            href: localized_path(locale, &format!("/blog/{}", a.slug)),
            summary: a.excerpt.clone().filter(|e| !e.trim().is_empty()),
            image: a.image.clone(),
            meta: a.display_date().map(|date| date.format("%Y-%m-%d").to_string()),
        })
        .collect()
}

fn category_filter(
    locale: Locale,
    d: &Dictionary,
    categories: &[Category],
    active: Option<&str>,
) -> Section {
    let all = localized_path(locale, "/products");
    let mut options = vec![Link::new(d.t("products.allCategories"), all.clone())];
    options.extend(
        categories
            .iter()
            .filter(|c| c.is_top_level() && is_valid_slug(&c.slug))
            .map(|c| Link::new(c.name.clone(), format!("{}?category={}", all, c.slug))),
    );
    let active = match active {
        Some(slug) => format!("{}?category={}", all, slug),
        None => all,
    };
    Section::CategoryFilter {
        label: d.t("products.filterLabel"),
        options,
        active,
    }
}

fn product_detail(locale: Locale, d: &Dictionary, product: &Product) -> Section {
    let mut facts: Vec<(String, String)> = Vec::new();
    if let Some(category) = product.category.as_ref().and_then(|c| c.name.clone()) {
        let category = match product.sub_category.as_ref().and_then(|c| c.name.as_deref()) {
            Some(sub) => format!("{} / {}", category, sub),
            None => category,
        };
        facts.push((d.t("products.category"), category));
    }
    if let Some(origin) = product.origin.as_deref().filter(|o| !o.trim().is_empty()) {
        facts.push((d.t("products.origin"), origin.to_string()));
    }
    facts.extend(
        product
            .specifications
            .iter()
            .map(|s| (s.label.clone(), s.value.clone())),
    );

    let paragraphs = product
        .description
        .as_deref()
        .unwrap_or_default()
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    Section::ProductDetail {
        name: product.name.clone(),
        summary: product.short_description.clone().filter(|s| !s.trim().is_empty()),
        paragraphs,
        image: product.image.clone(),
        gallery: product.gallery.clone(),
        facts,
        inquiry: Link::new(
            d.t("products.inquire"),
            localized_path(locale, "/contact"),
        ),
        back: Link::new(d.t("products.backToCatalog"), localized_path(locale, "/products")),
    }
}

fn article_meta(d: &Dictionary, article: &Article) -> Option<String> {
    let date = article.display_date().map(|date| {
        let formatted = date.format("%Y-%m-%d").to_string();
        d.t_fmt("blog.publishedOn", &[("date", formatted.as_str())])
    });
    let author = article
        .author
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .map(|author| d.t_fmt("blog.by", &[("author", author)]));
    match (date, author) {
        (Some(date), Some(author)) => Some(format!("{} · {}", date, author)),
        (date, author) => date.or(author),
    }
}

fn contact_form(d: &Dictionary, products: &[Product]) -> Section {
    let field = |name: &'static str, kind: FieldKind, required: bool| FormField {
        name,
        label: d.t(&format!("contact.form.{}", name)),
        kind,
        required,
    };
    let mut fields = vec![
        field("name", FieldKind::Text, true),
        field("email", FieldKind::Email, true),
        field("company", FieldKind::Text, false),
        field("phone", FieldKind::Tel, false),
    ];
    if !products.is_empty() {
        fields.push(field(
            "product",
            FieldKind::Select {
                placeholder: d.t("contact.form.productPlaceholder"),
                options: products.iter().map(|p| p.name.clone()).collect(),
            },
            false,
        ));
    }
    fields.push(field("message", FieldKind::TextArea, true));

    Section::ContactForm {
        action: "/api/contact".to_string(),
        fields,
        submit: d.t("contact.form.submit"),
    }
}
