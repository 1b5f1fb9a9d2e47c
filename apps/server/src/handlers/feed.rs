//! RSS feed - a thin read-only view over the published listing.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{TimeZone, Utc};

use papyr_core::domain::Post;
use papyr_store::content::ListQuery;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// How many posts the feed carries.
const FEED_LEN: i64 = 20;

/// GET /rss.xml
pub async fn rss(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let page = state
        .content
        .list(ListQuery {
            page: 1,
            page_size: FEED_LEN,
            include_drafts: false,
        })
        .await?;

    let info = req.connection_info();
    let site_url = format!("{}://{}", info.scheme(), info.host());

    let items: String = page
        .posts
        .iter()
        .map(|post| feed_item(&site_url, post))
        .collect();

    let feed = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>{title}</title>
    <link>{site_url}</link>
    <description>Latest posts</description>
    <lastBuildDate>{build_date}</lastBuildDate>
{items}  </channel>
</rss>"#,
        title = xml_escape(&state.site_name),
        site_url = site_url,
        build_date = Utc::now().to_rfc2822(),
        items = items,
    );

    Ok(HttpResponse::Ok()
        .content_type("application/xml")
        .insert_header(("Cache-Control", "public, max-age=3600"))
        .body(feed))
}

fn feed_item(site_url: &str, post: &Post) -> String {
    let pub_date = Utc
        .timestamp_millis_opt(post.created_at)
        .single()
        .unwrap_or_else(Utc::now)
        .to_rfc2822();

    format!(
        r#"    <item>
      <title><![CDATA[{title}]]></title>
      <link>{site_url}/post/{slug}</link>
      <description><![CDATA[{excerpt}]]></description>
      <pubDate>{pub_date}</pubDate>
      <guid>{site_url}/post/{slug}</guid>
    </item>
"#,
        title = cdata(&post.title),
        slug = post.slug,
        excerpt = cdata(&post.excerpt),
        pub_date = pub_date,
    )
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Neutralize `]]>` inside a CDATA payload by splitting the section.
fn cdata(raw: &str) -> String {
    raw.replace("]]>", "]]]]><![CDATA[>")
}
