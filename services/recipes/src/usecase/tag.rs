use crate::domain::repository::TagRepository;
use crate::domain::types::{NewTag, Tag};
use crate::error::RecipesServiceError;

pub struct ListTagsUseCase<T: TagRepository> {
    pub tags: T,
}

impl<T: TagRepository> ListTagsUseCase<T> {
    pub async fn execute(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        self.tags.list().await
    }
}

pub struct GetTagUseCase<T: TagRepository> {
    pub tags: T,
}

impl<T: TagRepository> GetTagUseCase<T> {
    pub async fn execute(&self, id: i32) -> Result<Tag, RecipesServiceError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::TagNotFound)
    }
}

pub struct CreateTagUseCase<T: TagRepository> {
    pub tags: T,
}

impl<T: TagRepository> CreateTagUseCase<T> {
    pub async fn execute(&self, input: NewTag) -> Result<Tag, RecipesServiceError> {
        input.validate()?;
        let tag = self.tags.create(&input).await?;
        tracing::info!(tag_id = tag.id, slug = %tag.slug, "tag created");
        Ok(tag)
    }
}
