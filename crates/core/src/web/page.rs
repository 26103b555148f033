//! HTML rendering
//!
//! The whole page is rebuilt from fresh query results on every request.
//! All user text goes through [`escape_html`].

use std::collections::HashMap;

use url::form_urlencoded;

use crate::{
    commands::prompts::PromptForm,
    db::{prompts::MAX_TITLE_CHARS, Prompt, PromptFilter},
    template,
    util::escape_html,
};

const STYLE: &str = "
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #222; }
main { max-width: 760px; margin: 0 auto; padding: 2rem 1rem; }
h1 { margin-bottom: 0; }
.subtitle { color: #666; margin-top: .25rem; }
section { margin: 1.5rem 0; }
label { display: block; margin: .5rem 0 .25rem; font-weight: 600; }
input[type=text], textarea { width: 100%; box-sizing: border-box; padding: .4rem; font: inherit; }
.checks label { display: inline-block; font-weight: normal; margin-right: 1rem; }
.notice { background: #e6f4ea; border: 1px solid #9bd3ae; padding: .6rem; border-radius: 4px; }
.error { background: #fdecea; border: 1px solid #f3a59d; padding: .6rem; border-radius: 4px; }
details.prompt { background: #fff; border: 1px solid #ddd; border-radius: 4px; margin: .5rem 0; padding: .5rem .8rem; }
details.prompt summary { cursor: pointer; font-weight: 600; }
pre { background: #f3f3f3; padding: .6rem; white-space: pre-wrap; word-break: break-word; }
pre.rendered { background: #eef4ff; }
.actions form, .actions a { display: inline-block; margin-right: .4rem; }
.meta { color: #888; font-size: .85em; }
.empty { color: #666; font-style: italic; }
";

/// Everything one page render needs
#[derive(Debug, Default)]
pub struct Page {
    pub prompts:     Vec<Prompt>,
    pub filter:      PromptFilter,
    /// Panel shown as an edit form
    pub editing:     Option<i32>,
    pub notice:      Option<String>,
    pub error:       Option<String>,
    /// Input kept in the create form after a rejected submit
    pub create_form: PromptForm,
    /// Input kept in the edit form after a rejected save
    pub edit_form:   Option<PromptForm>,
    pub rendered:    Option<RenderedView>,
}

/// Output of a template render, shown inside its panel
#[derive(Debug, Default)]
pub struct RenderedView {
    pub id:     i32,
    pub values: HashMap<String, String>,
    pub text:   String,
}

/// Query string carrying the active filters, without a leading `?`
pub fn filter_query(filter: &PromptFilter) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !filter.search.is_empty() {
        query.append_pair("search", &filter.search);
    }
    if filter.in_title {
        query.append_pair("in_title", "on");
    }
    if filter.in_prompt {
        query.append_pair("in_prompt", "on");
    }
    if filter.favorites_only {
        query.append_pair("favorites_only", "on");
    }
    query.finish()
}

/// `path` with the query appended, if there is one
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// Home URL keeping the filters, plus an optional one-shot notice
pub fn home_url(filter: &PromptFilter, notice: Option<&str>) -> String {
    let mut query = filter_query(filter);
    if let Some(notice) = notice {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .append_pair("notice", notice)
            .finish();
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&encoded);
    }
    with_query("/", &query)
}

fn edit_url(filter: &PromptFilter, id: i32) -> String {
    let mut query = filter_query(filter);
    if !query.is_empty() {
        query.push('&');
    }
    query.push_str(&format!("edit={}", id));
    with_query("/", &query)
}

fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Promptbase</title>\n<style>{}</style>\n</head>\n<body>\n<main>\n{}</main>\n</body>\n</html>\n",
        STYLE, body
    )
}

/// Render the full page
pub fn render(page: &Page) -> String {
    let query = filter_query(&page.filter);
    let mut body = String::new();

    body.push_str("<h1>Promptbase</h1>\n");
    body.push_str("<p class=\"subtitle\">A simple app to store and retrieve prompts</p>\n");

    if let Some(notice) = &page.notice {
        body.push_str(&format!("<div class=\"notice\">{}</div>\n", escape_html(notice)));
    }
    if let Some(error) = &page.error {
        body.push_str(&format!("<div class=\"error\">{}</div>\n", escape_html(error)));
    }

    body.push_str(&create_section(&page.create_form, &query));
    body.push_str(&filter_section(&page.filter));

    body.push_str("<section class=\"prompts\">\n");
    if page.prompts.is_empty() {
        body.push_str("<p class=\"empty\">No prompts found.</p>\n");
    }
    for prompt in &page.prompts {
        body.push_str(&panel(prompt, page, &query));
    }
    body.push_str("</section>\n");

    document(&body)
}

fn create_section(form: &PromptForm, query: &str) -> String {
    format!(
        "<section class=\"create\">\n<h2>New prompt</h2>\n\
         <form method=\"post\" action=\"{action}\">\n\
         <label for=\"title\">Title</label>\n\
         <input type=\"text\" id=\"title\" name=\"title\" maxlength=\"{max}\" value=\"{title}\">\n\
         <label for=\"prompt\">Prompt</label>\n\
         <textarea id=\"prompt\" name=\"prompt\" rows=\"8\">{prompt}</textarea>\n\
         <button type=\"submit\">Submit</button>\n\
         </form>\n</section>\n",
        action = escape_html(&with_query("/prompts", query)),
        max = MAX_TITLE_CHARS,
        title = escape_html(&form.title),
        prompt = escape_html(&form.prompt),
    )
}

fn filter_section(filter: &PromptFilter) -> String {
    format!(
        "<section class=\"filters\">\n\
         <form method=\"get\" action=\"/\">\n\
         <label for=\"search\">Search prompts</label>\n\
         <input type=\"text\" id=\"search\" name=\"search\" value=\"{search}\">\n\
         <div class=\"checks\">\n\
         <label><input type=\"checkbox\" name=\"in_title\"{in_title}> Title</label>\n\
         <label><input type=\"checkbox\" name=\"in_prompt\"{in_prompt}> Prompt</label>\n\
         <label><input type=\"checkbox\" name=\"favorites_only\"{favorites}> Favorites only</label>\n\
         </div>\n\
         <button type=\"submit\">Search</button>\n\
         </form>\n</section>\n",
        search = escape_html(&filter.search),
        in_title = checked(filter.in_title),
        in_prompt = checked(filter.in_prompt),
        favorites = checked(filter.favorites_only),
    )
}

fn panel(prompt: &Prompt, page: &Page, query: &str) -> String {
    let id = prompt.id;
    let editing = page.editing == Some(id);
    let rendered = page.rendered.as_ref().filter(|r| r.id == id);
    let open = if editing || rendered.is_some() { " open" } else { "" };
    let star = if prompt.is_favorite { "\u{2605} " } else { "" };

    let mut html = format!(
        "<details class=\"prompt\" id=\"prompt-{id}\"{open}>\n<summary>{star}{title}</summary>\n",
        title = escape_html(&prompt.title),
    );

    if editing {
        html.push_str(&edit_form(prompt, page.edit_form.as_ref(), page, query));
    } else {
        html.push_str(&format!(
            "<pre><code>{}</code></pre>\n",
            escape_html(&prompt.prompt)
        ));
        html.push_str(&format!(
            "<p class=\"meta\">Created {} \u{b7} Updated {}</p>\n",
            prompt.created_at.format("%Y-%m-%d %H:%M"),
            prompt.updated_at.format("%Y-%m-%d %H:%M"),
        ));
        html.push_str(&actions(prompt, &page.filter, query));
        html.push_str(&render_form(prompt, rendered, query));
    }

    html.push_str("</details>\n");
    html
}

fn actions(prompt: &Prompt, filter: &PromptFilter, query: &str) -> String {
    let id = prompt.id;
    let favorite_label = if prompt.is_favorite { "Unfavorite" } else { "Favorite" };

    format!(
        "<div class=\"actions\">\n\
         <form method=\"post\" action=\"{favorite}\"><button type=\"submit\">{favorite_label}</button></form>\n\
         <a class=\"button\" href=\"{edit}\">Edit</a>\n\
         <form method=\"post\" action=\"{delete}\"><button type=\"submit\">Delete</button></form>\n\
         </div>\n",
        favorite = escape_html(&with_query(&format!("/prompts/{}/favorite", id), query)),
        edit = escape_html(&format!("{}#prompt-{}", edit_url(filter, id), id)),
        delete = escape_html(&with_query(&format!("/prompts/{}/delete", id), query)),
    )
}

fn edit_form(prompt: &Prompt, kept: Option<&PromptForm>, page: &Page, query: &str) -> String {
    let (title, text) = match kept {
        Some(form) => (form.title.as_str(), form.prompt.as_str()),
        None => (prompt.title.as_str(), prompt.prompt.as_str()),
    };

    format!(
        "<form method=\"post\" action=\"{action}\" class=\"edit\">\n\
         <label for=\"edit-title-{id}\">Title</label>\n\
         <input type=\"text\" id=\"edit-title-{id}\" name=\"title\" maxlength=\"{max}\" value=\"{title}\">\n\
         <label for=\"edit-prompt-{id}\">Prompt</label>\n\
         <textarea id=\"edit-prompt-{id}\" name=\"prompt\" rows=\"8\">{text}</textarea>\n\
         <button type=\"submit\">Save</button>\n\
         <a href=\"{cancel}\">Cancel</a>\n\
         </form>\n",
        id = prompt.id,
        action = escape_html(&with_query(&format!("/prompts/{}", prompt.id), query)),
        max = MAX_TITLE_CHARS,
        title = escape_html(title),
        text = escape_html(text),
        cancel = escape_html(&home_url(&page.filter, None)),
    )
}

fn render_form(prompt: &Prompt, rendered: Option<&RenderedView>, query: &str) -> String {
    let variables = template::variables(&prompt.prompt);
    if variables.is_empty() {
        return String::new();
    }

    let mut html = format!(
        "<form method=\"post\" action=\"{}\" class=\"render\">\n",
        escape_html(&with_query(&format!("/prompts/{}/render", prompt.id), query))
    );
    for name in &variables {
        let value = rendered
            .and_then(|r| r.values.get(name))
            .map(String::as_str)
            .unwrap_or("");
        html.push_str(&format!(
            "<label>{name}<input type=\"text\" name=\"{name}\" value=\"{value}\"></label>\n",
            name = escape_html(name),
            value = escape_html(value),
        ));
    }
    html.push_str("<button type=\"submit\">Render</button>\n</form>\n");

    if let Some(rendered) = rendered {
        html.push_str(&format!(
            "<pre class=\"rendered\"><code>{}</code></pre>\n",
            escape_html(&rendered.text)
        ));
    }
    html
}

/// Stand-alone page for errors that escape a handler
pub fn error_page(message: &str) -> String {
    document(&format!(
        "<h1>Promptbase</h1>\n<div class=\"error\">{}</div>\n<p><a href=\"/\">Back to prompts</a></p>\n",
        escape_html(message)
    ))
}
