pub mod orders;

use utoipa::OpenApi;

use crate::application::view_model::{ItemViewModel, OrderViewModel};
use crate::errors::ErrorResponse;
use orders::{ItemRequest, OrderRequest, ResultResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order,
        orders::delete_order,
    ),
    components(schemas(
        OrderRequest,
        ItemRequest,
        OrderViewModel,
        ItemViewModel,
        ResultResponse,
        ErrorResponse,
    )),
    tags((name = "orders", description = "Orders and their items"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_every_order_route() {
        let doc = ApiDoc::openapi();

        let orders = doc.paths.paths.get("/orders").expect("/orders documented");
        assert!(orders.post.is_some());
        assert!(orders.get.is_some());

        let by_id = doc
            .paths
            .paths
            .get("/orders/{id}")
            .expect("/orders/{id} documented");
        assert!(by_id.get.is_some());
        assert!(by_id.put.is_some());
        assert!(by_id.delete.is_some());
    }
}
