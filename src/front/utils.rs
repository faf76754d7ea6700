use ntex::web;

use crate::front::{errors, templates};

/// Renders `template_name` as an html response
pub fn render_html(
    template_name: &str,
    context: &tera::Context,
    endpoint: &str,
) -> Result<web::HttpResponse, web::Error> {
    let content = templates::WEB_TEMPLATES
        .render(template_name, context)
        .map_err(|e| {
            errors::ServerError::TemplateError(format!(
                "at {endpoint} endpoint the template couldnt be rendered: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}
