use html_escape::{encode_double_quoted_attribute, encode_safe, encode_text};

use crate::models::{Note, NoteId};

/// When a page's data is fetched relative to the request that views it.
/// Both list and detail pages render through the same functions; the mode
/// only picks headings, route prefixes, and the action set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Fetched once when the site is built, served as-is afterwards.
    Static,
    /// Fetched fresh on every request.
    PerRequest,
}

impl RenderMode {
    pub const fn list_route(self) -> &'static str {
        match self {
            Self::Static => "/notes",
            Self::PerRequest => "/notes-ssr",
        }
    }

    pub fn detail_route(self, id: &NoteId) -> String {
        format!("{}/{}", self.list_route(), id)
    }

    const fn list_heading(self) -> &'static str {
        match self {
            Self::Static => "All Notes (SSG)",
            Self::PerRequest => "My Notes (SSR Version)",
        }
    }

    const fn list_title(self) -> &'static str {
        match self {
            Self::Static => "All Notes (SSG) - Notes App",
            Self::PerRequest => "All Notes (SSR) - Notes App",
        }
    }

    const fn badge(self) -> &'static str {
        match self {
            Self::Static => "",
            Self::PerRequest => r#" <span class="badge">(SSR Version)</span>"#,
        }
    }

    const fn back_label(self) -> &'static str {
        match self {
            Self::Static => "Back to Notes List",
            Self::PerRequest => "Back to SSR Notes List",
        }
    }
}

/// Format an API timestamp for display. Missing input yields "N/A", an
/// unparsable value yields "Invalid Date"; this never panics.
pub fn format_date(value: Option<&str>) -> String {
    match value {
        None | Some("") => "N/A".to_string(),
        Some(raw) => chrono::DateTime::parse_from_rfc3339(raw).map_or_else(
            |_| "Invalid Date".to_string(),
            |date| date.format("%d %B %Y, %H:%M").to_string(),
        ),
    }
}

const STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; line-height: 1.6; max-width: 800px; margin: 2rem auto; padding: 0 1rem; background-color: #f5f5f5; color: #333; }
        .card { background: white; border-radius: 8px; padding: 2rem; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .card a { color: #4338ca; }
        .note-list { list-style: none; padding: 0; }
        .note-list li { border: 1px solid #e0e0e0; border-radius: 6px; margin-bottom: 1rem; padding: 1rem; }
        .note-list a { text-decoration: none; }
        .note-list p { color: #666; margin: 0; }
        .note-content { white-space: pre-wrap; background-color: #f8f9fa; border: 1px solid #e0e0e0; border-radius: 4px; padding: 1rem; margin-bottom: 1.5rem; }
        .timestamps { color: #666; font-size: 0.85em; margin-bottom: 1.5rem; }
        .badge { color: #7c3aed; font-size: 0.6em; vertical-align: middle; }
        .error { background: #fdecea; color: #b71c1c; border: 1px solid #f5c6cb; border-radius: 4px; padding: 1rem; margin-bottom: 1rem; }
        .actions { display: flex; gap: 1rem; align-items: center; margin-bottom: 1.5rem; }
        .actions form { margin: 0; }
        button { background: #4338ca; color: white; border: none; border-radius: 4px; padding: 0.5rem 1.25rem; cursor: pointer; }
        button:disabled { opacity: 0.5; cursor: not-allowed; }
        label { display: block; margin-bottom: 0.25rem; font-size: 0.9em; }
        input, textarea { width: 100%; box-sizing: border-box; padding: 0.5rem; margin-bottom: 1rem; border: 1px solid #ccc; border-radius: 4px; font: inherit; }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <div class="card">
{body}    </div>
</body>
</html>
"#,
        title = encode_text(title),
    )
}

/// Escape a value for embedding inside a single-quoted JS string literal
/// that itself sits in a double-quoted HTML attribute. Quotes are
/// backslash-escaped for JS first; the entity encoding keeps the markup
/// free of raw `<`/`"` regardless of the note's title.
fn js_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    encode_safe(&escaped).into_owned()
}

/// Entry page: explains the two rendering strategies and links to both lists.
pub fn home_page() -> String {
    layout(
        "Notes App Home",
        r#"        <h1>Notes App Demo</h1>
        <p>Choose a rendering strategy to view notes:</p>
        <h2>SSG</h2>
        <p>Pages generated at build time. Fast initial load, might need revalidation for updates.</p>
        <p><a href="/notes">View SSG Notes</a></p>
        <h2>SSR</h2>
        <p>Pages generated on every request. Always shows the latest data, slightly slower initial load.</p>
        <p><a href="/notes-ssr">View SSR Notes</a></p>
"#,
    )
}

pub fn list_page(notes: &[Note], mode: RenderMode) -> String {
    let heading = mode.list_heading();

    if notes.is_empty() {
        return layout(
            mode.list_title(),
            &format!(
                "        <h1>{heading}</h1>\n        \
                 <p>No notes found. Maybe the API is down or has no data?</p>\n        \
                 <a href=\"/\">Go Home</a>\n"
            ),
        );
    }

    let entries: String = notes
        .iter()
        .map(|note| {
            format!(
                "            <li>\n                \
                 <a href=\"{href}\">\n                    \
                 <h2>{title}</h2>\n                    \
                 <p>{preview}</p>\n                \
                 </a>\n            \
                 </li>\n",
                href = encode_double_quoted_attribute(&mode.detail_route(&note.id)),
                title = encode_text(&note.display_title()),
                preview = encode_text(&note.preview()),
            )
        })
        .collect();

    layout(
        mode.list_title(),
        &format!(
            "        <h1>{heading}</h1>\n        \
             <ul class=\"note-list\">\n{entries}        </ul>\n        \
             <a href=\"/\">Go Home</a>\n"
        ),
    )
}

/// Detail page for one note. The per-request variant carries the Edit and
/// Delete actions; `error` renders an inline banner after a failed delete.
pub fn detail_page(note: &Note, mode: RenderMode, error: Option<&str>) -> String {
    let display_title = note.display_title();

    let banner = error.map_or_else(String::new, |message| {
        format!(
            "        <div class=\"error\" role=\"alert\">{}</div>\n",
            encode_text(message)
        )
    });

    let updated = if note.show_updated() {
        format!(
            " <span>| Updated: {}</span>",
            format_date(note.updated_at.as_deref())
        )
    } else {
        String::new()
    };

    let actions = match mode {
        RenderMode::Static => String::new(),
        RenderMode::PerRequest => format!(
            "        <div class=\"actions\">\n            \
             <a href=\"/notes/edit/{id}\">Edit Note</a>\n            \
             <form method=\"post\" action=\"/notes-ssr/{id}/delete\" \
             onsubmit=\"return confirm('Are you sure you want to delete note &quot;{confirm_title}&quot;?');\">\n                \
             <button type=\"submit\">Delete Note</button>\n            \
             </form>\n        \
             </div>\n",
            id = encode_double_quoted_attribute(&note.id.to_string()),
            confirm_title = js_string(&display_title),
        ),
    };

    let body = format!(
        "{banner}        <h1>{title}{badge}</h1>\n        \
         <div class=\"timestamps\">\n            \
         <span>Created: {created}</span>{updated}\n        \
         </div>\n        \
         <div class=\"note-content\">{content}</div>\n{actions}        \
         <a href=\"{back_href}\">&larr; {back_label}</a>\n",
        title = encode_text(&display_title),
        badge = mode.badge(),
        created = format_date(note.created_at.as_deref()),
        content = encode_text(note.content_or_placeholder()),
        back_href = mode.list_route(),
        back_label = mode.back_label(),
    );

    let page_title = match mode {
        RenderMode::Static => format!("{display_title} - Notes App"),
        RenderMode::PerRequest => format!("{display_title} (SSR) - Notes App"),
    };

    layout(&page_title, &body)
}

/// Edit form, pre-populated with the given field values so a failed
/// submission can hand the user's input back unchanged. The submit handler
/// locks the form against duplicate submission while the request is in
/// flight.
pub fn edit_page(id: &NoteId, title: &str, content: &str, error: Option<&str>) -> String {
    let banner = error.map_or_else(String::new, |message| {
        format!(
            "        <div class=\"error\" role=\"alert\">{}</div>\n",
            encode_text(message)
        )
    });

    let body = format!(
        "        <h1>Edit Note</h1>\n{banner}        \
         <form method=\"post\" action=\"/notes/edit/{id}\" \
         onsubmit=\"this.querySelector('button[type=submit]').disabled = true; \
         this.elements.title.readOnly = true; this.elements.content.readOnly = true;\">\n            \
         <label for=\"title\">Title</label>\n            \
         <input type=\"text\" id=\"title\" name=\"title\" value=\"{title_attr}\" required>\n            \
         <label for=\"content\">Content</label>\n            \
         <textarea id=\"content\" name=\"content\" rows=\"12\" required>{content_text}</textarea>\n            \
         <div class=\"actions\">\n                \
         <a href=\"{cancel}\">Cancel</a>\n                \
         <button type=\"submit\">Save Changes</button>\n            \
         </div>\n        \
         </form>\n",
        id = encode_double_quoted_attribute(&id.to_string()),
        title_attr = encode_double_quoted_attribute(title),
        content_text = encode_text(content),
        cancel = encode_double_quoted_attribute(&format!("/notes/{id}")),
    );

    layout(&format!("Edit: {title}"), &body)
}

pub fn not_found_page(mode: RenderMode) -> String {
    layout(
        "Note Not Found",
        &format!(
            "        <p class=\"error\">Note not found. It might have been deleted or the ID is incorrect.</p>\n        \
             <a href=\"{}\">{}</a>\n",
            mode.list_route(),
            mode.back_label(),
        ),
    )
}
