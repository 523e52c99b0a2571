use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::{error::AppResult, routes::views::BikeView, services::catalog_service, state::AppState};

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "contacts.html")]
pub struct ContactsTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "catalogue.html")]
pub struct CatalogueTemplate {
    pub bikes: Vec<BikeView>,
}

pub async fn index() -> IndexTemplate {
    IndexTemplate
}

pub async fn contacts() -> ContactsTemplate {
    ContactsTemplate
}

pub async fn catalogue(State(state): State<AppState>) -> AppResult<CatalogueTemplate> {
    let bikes = catalog_service::list_bikes(&state)
        .await?
        .into_iter()
        .map(BikeView::from)
        .collect();
    Ok(CatalogueTemplate { bikes })
}
