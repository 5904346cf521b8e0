use crate::{dto::products::ProductList, error::AppResult, state::AppState};

pub async fn list_products(state: &AppState) -> AppResult<ProductList> {
    let items = state.store.list_products().await?;
    Ok(ProductList { items })
}
