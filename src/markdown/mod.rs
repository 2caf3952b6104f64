use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

/// Schemes a link or image may point at; anything else is dropped.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// True for relative and fragment destinations and for allowed schemes.
fn is_safe_destination(url: &str) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme.
    let url: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();

    match url.find([':', '/', '?', '#']) {
        Some(i) if url[i..].starts_with(':') => ALLOWED_SCHEMES
            .iter()
            .any(|scheme| url[..i].eq_ignore_ascii_case(scheme)),
        _ => true,
    }
}

fn sanitize(dest_url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_destination(&dest_url) {
        dest_url
    } else {
        tracing::debug!(url = %dest_url, "dropping link destination");
        CowStr::Borrowed("")
    }
}

/// Renders note content to HTML for `inner_html`.
///
/// Raw HTML in the source is emitted as escaped text and link or image
/// destinations with a script-capable scheme are emptied; note content comes
/// from other users.
pub fn render(source: &str) -> String {
    let parser = Parser::new_ext(source, options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: sanitize(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
