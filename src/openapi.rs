//! OpenAPI document for the testes resource, served at `/openapi.json`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Testes API",
        version = env!("CARGO_PKG_VERSION"),
        description = "CRUD over testes records keyed by uniqueValue"
    ),
    paths(
        crate::handlers::testes::create,
        crate::handlers::testes::list,
        crate::handlers::testes::read,
        crate::handlers::testes::update,
        crate::handlers::testes::delete,
    ),
    components(
        schemas(
            crate::model::Teste,
            crate::model::CreateTeste,
            crate::model::UpdateTeste,
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
        )
    ),
    tags((name = "testes", description = "Testes records")),
)]
pub struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_testes_route() {
        let doc = openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/testes"));
        assert!(paths.iter().any(|p| p.as_str() == "/testes/{uniqueValue}"));
    }
}
