use mongodb::bson::doc;

use crate::database::{Collection, DocumentStore};
use crate::models::{Blog, Category};
use crate::services::documents::find_all;
use crate::utils::error::AppResult;

pub async fn list_categories(store: &dyn DocumentStore) -> AppResult<Vec<Category>> {
    find_all(store, Collection::Categories, doc! {}).await
}

pub async fn list_blogs(store: &dyn DocumentStore) -> AppResult<Vec<Blog>> {
    find_all(store, Collection::Blogs, doc! {}).await
}
