//! Page service: fetch, then compose, for one request

use std::sync::Arc;

use agro_shared::Locale;

use crate::domain::entities::{Article, Category, EntityKind, Product};
use crate::errors::DomainResult;
use crate::services::content::{ContentGateway, ContentQuery, Filter, OrderBy, OrderKey};
use crate::services::dictionary::DictionaryLoader;

use super::composer::{PageComposer, PageOutcome, RenderedPage};
use super::content::PageContent;
use super::state::{RenderLifecycle, RenderState};
use super::template::PageTemplate;

/// How many items each listing shows
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageLimits {
    pub featured_products: usize,
    pub latest_articles: usize,
    pub related: usize,
    pub catalog: usize,
    pub blog: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            featured_products: 6,
            latest_articles: 3,
            related: 4,
            catalog: 100,
            blog: 50,
        }
    }
}

/// Page service orchestrating dictionary, content and composition
pub struct PageService {
    dictionaries: Arc<DictionaryLoader>,
    gateway: Arc<ContentGateway>,
    composer: PageComposer,
    limits: PageLimits,
}

impl PageService {
    pub fn new(
        dictionaries: Arc<DictionaryLoader>,
        gateway: Arc<ContentGateway>,
        composer: PageComposer,
    ) -> Self {
        Self {
            dictionaries,
            gateway,
            composer,
            limits: PageLimits::default(),
        }
    }

    /// Render a page for a resolved locale.
    ///
    /// The dictionary and all content queries are fetched concurrently.
    /// Fails only when the default dictionary is unavailable.
    pub async fn render(&self, locale: Locale, template: PageTemplate) -> DomainResult<PageOutcome> {
        let mut lifecycle = RenderLifecycle::new();
        lifecycle.advance(RenderState::LocaleResolved)?;

        let (dictionary, content) =
            tokio::join!(self.dictionaries.load(locale), self.fetch(locale, &template));
        let dictionary = dictionary?;
        lifecycle.advance(RenderState::ContentFetched)?;

        let outcome = self
            .composer
            .compose(&mut lifecycle, locale, &template, &dictionary, content)?;
        tracing::debug!(
            locale = %locale,
            path = %template.path(),
            state = %lifecycle.state(),
            "Page composed"
        );
        Ok(outcome)
    }

    /// Not-found page for a path no template matches
    pub async fn render_not_found(&self, locale: Locale, path: &str) -> DomainResult<RenderedPage> {
        let dictionary = self.dictionaries.load(locale).await?;
        Ok(self.composer.not_found(locale, &dictionary, path))
    }

    async fn fetch(&self, locale: Locale, template: &PageTemplate) -> PageContent {
        let gw = &self.gateway;
        let limits = &self.limits;

        match template {
            PageTemplate::Home => {
                let featured = ContentQuery::list(EntityKind::Product)
                    .filter(Filter::Featured)
                    .order_by(OrderBy::desc(OrderKey::PublishedAt))
                    .order_by(OrderBy::asc(OrderKey::Name))
                    .limit(limits.featured_products);
                let latest = latest_articles().limit(limits.latest_articles);
                let (featured_products, latest_articles) = tokio::join!(
                    gw.fetch_list::<Product>(&featured, locale),
                    gw.fetch_list::<Article>(&latest, locale)
                );
                PageContent::Home {
                    featured_products,
                    latest_articles,
                }
            }
            PageTemplate::About => PageContent::About,
            PageTemplate::Products { category } => {
                let mut catalog = catalog_order(ContentQuery::list(EntityKind::Product)).limit(limits.catalog);
                if let Some(slug) = category {
                    catalog = catalog.filter(Filter::CategorySlugEquals(slug.clone()));
                }
                let categories = ContentQuery::list(EntityKind::Category).order_by(OrderBy::asc(OrderKey::Name));
                let (products, categories) = tokio::join!(
                    gw.fetch_list::<Product>(&catalog, locale),
                    gw.fetch_list::<Category>(&categories, locale)
                );
                PageContent::Products {
                    products,
                    categories,
                }
            }
            PageTemplate::ProductDetail { slug } => {
                let primary = ContentQuery::by_slug(EntityKind::Product, slug.clone());
                let related = catalog_order(related_to(EntityKind::Product, slug)).limit(limits.related);
                let (product, related) = tokio::join!(
                    gw.fetch_one::<Product>(&primary, locale),
                    gw.fetch_list::<Product>(&related, locale)
                );
                PageContent::ProductDetail { product, related }
            }
            PageTemplate::Blog => PageContent::Blog {
                articles: gw
                    .fetch_list::<Article>(&latest_articles().limit(limits.blog), locale)
                    .await,
            },
            PageTemplate::ArticleDetail { slug } => {
                let primary = ContentQuery::by_slug(EntityKind::Article, slug.clone());
                let related = related_to(EntityKind::Article, slug)
                    .order_by(OrderBy::desc(OrderKey::PublishedAt))
                    .limit(limits.related);
                let (article, related) = tokio::join!(
                    gw.fetch_one::<Article>(&primary, locale),
                    gw.fetch_list::<Article>(&related, locale)
                );
                PageContent::ArticleDetail { article, related }
            }
            PageTemplate::Contact => {
                let products = ContentQuery::list(EntityKind::Product)
                    .order_by(OrderBy::asc(OrderKey::Name))
                    .limit(limits.catalog);
                PageContent::Contact {
                    products: gw.fetch_list::<Product>(&products, locale).await,
                }
            }
        }
    }
}

/// Featured first, then newest, then alphabetical
fn catalog_order(query: ContentQuery) -> ContentQuery {
    query
        .order_by(OrderBy::desc(OrderKey::Featured))
        .order_by(OrderBy::desc(OrderKey::PublishedAt))
        .order_by(OrderBy::asc(OrderKey::Name))
}

fn latest_articles() -> ContentQuery {
    ContentQuery::list(EntityKind::Article)
        .order_by(OrderBy::desc(OrderKey::PublishedAt))
        .order_by(OrderBy::desc(OrderKey::CreatedAt))
}

/// Other documents of the kind sharing the slug's category
fn related_to(kind: EntityKind, slug: &str) -> ContentQuery {
    ContentQuery::list(kind)
        .filter(Filter::SharesCategoryWith(slug.to_string()))
        .filter(Filter::SlugNotEquals(slug.to_string()))
}
