use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::error::AppError;
use actix_web::web::Html;
use actix_web::{get, HttpRequest, Responder};
use askama::Template;

#[get("/")]
async fn index(req: HttpRequest) -> Result<impl Responder, AppError> {
    render_home_page(&req)
}

/// Render the home page, including all pending flash messages
pub fn render_home_page(req: &HttpRequest) -> Result<Html, AppError> {
    let tmpl = IndexTemplate {
        base: BaseTemplateContext {
            request: req,
            page_title: "Home",
        },
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    base: BaseTemplateContext<'a>,
}
