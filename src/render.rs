//! HTML rendering for the gallery.
//!
//! Pages are assembled with plain string building. Every piece of record
//! text goes through [`escape_html`] before it lands in markup.

use std::fmt::Write;

use crate::config::SiteConfig;
use crate::detail::{ProjectAction, ProjectDetail};
use crate::models::ProjectRecord;
use crate::search::NO_RESULTS;

const SEARCH_PLACEHOLDER: &str = "Search projects by name, author, or tag...";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }
.container { max-width: 72rem; margin: 0 auto; padding: 1rem; }
h1 { font-size: 1.875rem; margin-bottom: 1.5rem; }
.toolbar { display: flex; gap: 1rem; margin-bottom: 1.5rem; }
.toolbar form { flex-grow: 1; }
.toolbar input { width: 100%; box-sizing: border-box; padding: .5rem .75rem; font-size: 1rem; }
.grid { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); }
.card { background: #fff; border: 1px solid #e2e8f0; border-radius: .5rem; padding: 1rem; display: flex; flex-direction: column; }
.card h2 { font-size: 1.25rem; margin: 0; }
.author { color: #64748b; margin: .25rem 0 1rem; }
.card img, .detail img { width: 100%; max-height: 16rem; object-fit: cover; border-radius: .375rem; }
.clamp { display: -webkit-box; -webkit-line-clamp: 3; -webkit-box-orient: vertical; overflow: hidden; }
.tags { display: flex; flex-wrap: wrap; gap: .5rem; margin-top: .5rem; }
.badge { background: #f1f5f9; border-radius: 9999px; padding: .125rem .625rem; font-size: .75rem; }
.button { display: inline-block; padding: .5rem 1rem; border-radius: .375rem; border: 1px solid #0f172a; background: #0f172a; color: #fff; text-decoration: none; font-size: .875rem; cursor: pointer; }
.button.outline { background: #fff; color: #0f172a; }
.button[disabled] { opacity: .5; cursor: not-allowed; }
.actions { display: flex; gap: .5rem; margin-top: 1rem; }
.muted { color: #64748b; font-size: .875rem; }
.empty { text-align: center; color: #64748b; margin-top: 2rem; }
details { margin-top: auto; padding-top: 1rem; }
summary { list-style: none; }
"#;

// Re-submits the search form shortly after the user stops typing.
const SEARCH_SCRIPT: &str = r#"
(function () {
  var input = document.getElementById("q");
  var timer;
  input.addEventListener("input", function () {
    clearTimeout(timer);
    timer = setTimeout(function () { input.form.submit(); }, 250);
  });
  input.focus();
  input.setSelectionRange(input.value.length, input.value.length);
})();
"#;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(site: &SiteConfig, title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<meta name=\"description\" content=\"{}\">\n<style>{}</style>\n\
         </head>\n<body>\n<div class=\"container\">\n{}</div>\n</body>\n</html>\n",
        escape_html(title),
        escape_html(&site.description),
        STYLE,
        body
    )
}

/// The searchable gallery, or the empty-state message when nothing matches.
pub fn render_gallery(site: &SiteConfig, term: &str, projects: &[&ProjectRecord]) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape_html(&site.title));

    let _ = writeln!(
        body,
        "<div class=\"toolbar\">\n\
         <a class=\"button\" href=\"/submit\" target=\"_blank\" rel=\"noopener\">+ Submit New Project</a>\n\
         <form method=\"get\" action=\"/\">\
         <input id=\"q\" type=\"search\" name=\"q\" value=\"{}\" placeholder=\"{}\" autocomplete=\"off\">\
         </form>\n</div>",
        escape_html(term),
        SEARCH_PLACEHOLDER
    );

    if projects.is_empty() {
        let _ = writeln!(body, "<p class=\"empty\">{}</p>", NO_RESULTS);
    } else {
        body.push_str("<div class=\"grid\">\n");
        for project in projects {
            body.push_str(&render_card(project));
        }
        body.push_str("</div>\n");
    }

    let _ = writeln!(body, "<script>{}</script>", SEARCH_SCRIPT);
    page(site, &site.title, &body)
}

fn render_card(project: &ProjectRecord) -> String {
    let mut card = String::new();
    let _ = writeln!(card, "<article class=\"card\" id=\"project-{}\">", project.id);
    let _ = writeln!(card, "<h2>{}</h2>", escape_html(&project.title));
    let _ = writeln!(card, "<p class=\"author\">By {}</p>", escape_html(&project.author));
    if let Some(ref url) = project.image_url {
        card.push_str(&render_image(url, &project.title));
    }
    let _ = writeln!(card, "<p class=\"clamp\">{}</p>", escape_html(&project.description));
    card.push_str(&render_tags(&project.tags));

    let _ = writeln!(
        card,
        "<details>\n<summary class=\"button outline\">View Details</summary>\n{}</details>",
        render_detail(&ProjectDetail::new(project))
    );
    card.push_str("</article>\n");
    card
}

fn render_image(url: &str, alt: &str) -> String {
    format!(
        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">\n",
        escape_html(url),
        escape_html(alt)
    )
}

fn render_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"tags\">");
    for tag in tags {
        let _ = write!(out, "<span class=\"badge\">{}</span>", escape_html(tag));
    }
    out.push_str("</div>\n");
    out
}

/// The expanded view of one project: full text, timestamp and actions.
pub fn render_detail(detail: &ProjectDetail) -> String {
    let project = &detail.project;
    let mut out = String::from("<section class=\"detail\">\n");
    let _ = writeln!(out, "<h3>{}</h3>", escape_html(&project.title));
    let _ = writeln!(out, "<p class=\"author\">By {}</p>", escape_html(&project.author));
    if let Some(ref url) = project.image_url {
        out.push_str(&render_image(url, &project.title));
    }
    let _ = writeln!(out, "<p>{}</p>", escape_html(&project.description));
    out.push_str(&render_tags(&project.tags));
    let _ = writeln!(
        out,
        "<p class=\"muted\">Submitted on: {}</p>",
        escape_html(&detail.submitted_on)
    );

    out.push_str("<div class=\"actions\">\n");
    for action in [ProjectAction::Feedback, ProjectAction::Repository] {
        out.push_str(&render_action(detail, action));
    }
    out.push_str("</div>\n</section>\n");
    out
}

fn render_action(detail: &ProjectDetail, action: ProjectAction) -> String {
    if detail.is_enabled(action) {
        format!(
            "<a class=\"button\" href=\"/projects/{}/{}\" target=\"_blank\" rel=\"noopener\">{}</a>\n",
            detail.project.id,
            action.slug(),
            action.label()
        )
    } else {
        format!(
            "<button class=\"button\" type=\"button\" disabled>{}</button>\n",
            action.label()
        )
    }
}

pub fn render_detail_page(site: &SiteConfig, detail: &ProjectDetail) -> String {
    let body = format!(
        "<p><a href=\"/\">&larr; All projects</a></p>\n{}",
        render_detail(detail)
    );
    page(
        site,
        &format!("{} | {}", detail.project.title, site.title),
        &body,
    )
}

/// A blocking notice with a way back to the gallery.
pub fn render_notice_page(site: &SiteConfig, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p class=\"empty\">{}</p>\n<p class=\"empty\"><a href=\"/\">Back to all projects</a></p>\n",
        escape_html(&site.title),
        escape_html(message)
    );
    page(site, &site.title, &body)
}
