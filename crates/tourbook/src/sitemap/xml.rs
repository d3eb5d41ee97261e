use url::Url;

/// Cache directive sent with the static sitemap document.
pub const SITEMAP_CACHE_CONTROL: &str = "public, s-maxage=86400, stale-while-revalidate";

/// Minimal `urlset` advertising the site root. Rendered once at startup.
pub fn static_sitemap(base: &Url) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n  \
         <url>\n    <loc>{}</loc>\n  </url>\n\
         </urlset>\n",
        escape(base.as_str())
    )
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
