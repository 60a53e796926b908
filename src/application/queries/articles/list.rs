use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser, OffsetPage},
        error::ApplicationResult,
    },
    domain::{
        article::{ArticleFilter, ArticleId, Pagination, TagName},
        user::UserId,
    },
};

#[derive(Debug, Default)]
pub struct ListArticlesQuery {
    pub author: Option<String>,
    pub tag: Option<String>,
    pub favorited_by: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        actor: &AuthenticatedUser,
        query: ListArticlesQuery,
    ) -> ApplicationResult<OffsetPage<ArticleDto>> {
        let filter = Self::build_filter(&query)?;
        let page = Pagination::new(query.limit, query.offset);

        let articles = self.read_repo.list(&filter, page).await?;

        let ids: Vec<ArticleId> = articles.iter().map(|article| article.id).collect();
        let favorited = self.favorite_repo.favorited_among(&actor.id, &ids).await?;

        let items = articles
            .into_iter()
            .map(|article| {
                let is_favorited = favorited.contains(&article.id);
                ArticleDto::from_article(article, is_favorited)
            })
            .collect();

        Ok(OffsetPage::new(items, page.limit(), page.offset()))
    }

    fn build_filter(query: &ListArticlesQuery) -> ApplicationResult<ArticleFilter> {
        let mut filter = ArticleFilter::default();
        if let Some(author) = non_blank(query.author.as_deref()) {
            filter = filter.by_author(UserId::new(author)?);
        }
        if let Some(tag) = non_blank(query.tag.as_deref()) {
            filter = filter.with_tag(TagName::new(tag)?);
        }
        if let Some(user) = non_blank(query.favorited_by.as_deref()) {
            filter = filter.favorited_by(UserId::new(user)?);
        }
        Ok(filter)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
