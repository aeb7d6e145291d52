use std::io::Cursor;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use spdlog::warn;

use crate::config::Site;
use crate::document::{LinkGenerator, PostDocument};
use crate::shortcode::full_url;

pub const RSS_FILE_NAME: &str = "rss.xml";
pub const ATOM_FILE_NAME: &str = "feed.xml";
const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
<channel>
  <title>Patrik Svensson</title>
  <link>https://patriksvensson.se/</link>
  <description>Patrik Svensson's blog</description>
  <copyright>2024</copyright>
  <item>
    <title>Hello World</title>
    <link>https://patriksvensson.se/2024/02/hello-world</link>
    <guid isPermaLink="true">https://patriksvensson.se/2024/02/hello-world</guid>
    <dc:creator>Patrik Svensson</dc:creator>
    <description><![CDATA[<p>First post</p>]]></description>
    <pubDate>Tue, 27 Feb 2024 00:00:00 +0100</pubDate>
  </item>
</channel>
</rss>
*/

/// Published posts only, newest first.
pub fn feed_posts(posts: &[PostDocument]) -> Vec<&PostDocument> {
    let mut selected: Vec<&PostDocument> = posts.iter()
        .filter(|p| !p.draft)
        .filter(|p| {
            if p.blog_post_path().is_err() {
                warn!("Leaving {} out of the feed: it has no published date or slug", p.file_name.display());
                return false;
            }
            true
        })
        .collect();
    selected.sort_by(|a, b| b.published.cmp(&a.published));
    selected
}

pub struct RssChannel<'a> {
    pub site: &'a Site,
    pub links: LinkGenerator,
}

impl<'a> RssChannel<'a> {
    pub fn new(site: &'a Site) -> Self {
        RssChannel { site, links: LinkGenerator::new(site) }
    }

    pub fn render(&self, posts: &[&PostDocument]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:dc", DC_NAMESPACE));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", &self.site.title)?;
        push_text(&mut writer, "link", &full_url(&self.site.host, "/"))?;
        push_text(&mut writer, "description", &self.site.description)?;
        push_text(&mut writer, "copyright", &self.site.copyright())?;

        let author = self.site.author();
        for post in posts {
            let (Ok(path), Ok(published)) = (post.blog_post_path(), post.published()) else {
                continue;
            };

            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", &post.title)?;

            let link = full_url(&self.site.host, &self.links.link(&path));
            push_text(&mut writer, "link", &link)?;

            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(&link)))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_text(&mut writer, "dc:creator", &author)?;

            let description = markdown::to_html(&post.excerpt);
            push_cdata(&mut writer, "description", &description)?;

            push_text(&mut writer, "pubDate", &local_time(&published).to_rfc2822())?;

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Patrik Svensson</title>
  <subtitle>Patrik Svensson's blog</subtitle>
  <id>https://patriksvensson.se/</id>
  <link rel="alternate" href="https://patriksvensson.se/"/>
  <link rel="self" href="https://patriksvensson.se/feed.xml"/>
  <updated>2024-02-27T00:00:00+01:00</updated>
  <rights>2024</rights>
  <author><name>Patrik Svensson</name></author>
  <entry>
    <title>Hello World</title>
    <id>https://patriksvensson.se/2024/02/hello-world</id>
    <link rel="alternate" href="https://patriksvensson.se/2024/02/hello-world"/>
    <published>2024-02-27T00:00:00+01:00</published>
    <updated>2024-02-27T00:00:00+01:00</updated>
    <summary type="html"><![CDATA[<p>First post</p>]]></summary>
  </entry>
</feed>
*/

pub struct AtomFeed<'a> {
    pub site: &'a Site,
    pub links: LinkGenerator,
}

impl<'a> AtomFeed<'a> {
    pub fn new(site: &'a Site) -> Self {
        AtomFeed { site, links: LinkGenerator::new(site) }
    }

    /// `updated` is the newest post date, or now for an empty feed.
    pub fn render(&self, posts: &[&PostDocument]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut feed = BytesStart::new("feed");
        feed.push_attribute(("xmlns", ATOM_NAMESPACE));
        writer.write_event(Event::Start(feed))?;

        let home = full_url(&self.site.host, "/");
        push_text(&mut writer, "title", &self.site.title)?;
        push_text(&mut writer, "subtitle", &self.site.description)?;
        push_text(&mut writer, "id", &home)?;
        push_link(&mut writer, "alternate", &home)?;
        push_link(&mut writer, "self", &full_url(&self.site.host, ATOM_FILE_NAME))?;

        let updated = posts.iter()
            .filter_map(|p| p.published)
            .max()
            .map(|p| local_time(&p))
            .unwrap_or_else(|| Utc::now().fixed_offset());
        push_text(&mut writer, "updated", &updated.to_rfc3339())?;
        push_text(&mut writer, "rights", &self.site.copyright())?;

        writer.write_event(Event::Start(BytesStart::new("author")))?;
        push_text(&mut writer, "name", &self.site.author())?;
        writer.write_event(Event::End(BytesEnd::new("author")))?;

        for post in posts {
            let (Ok(path), Ok(published)) = (post.blog_post_path(), post.published()) else {
                continue;
            };

            writer.write_event(Event::Start(BytesStart::new("entry")))?;

            push_text(&mut writer, "title", &post.title)?;

            let link = full_url(&self.site.host, &self.links.link(&path));
            push_text(&mut writer, "id", &link)?;
            push_link(&mut writer, "alternate", &link)?;

            let published = local_time(&published).to_rfc3339();
            push_text(&mut writer, "published", &published)?;
            push_text(&mut writer, "updated", &published)?;

            let mut summary = BytesStart::new("summary");
            summary.push_attribute(("type", "html"));
            writer.write_event(Event::Start(summary))?;
            writer.write_event(Event::CData(BytesCData::new(escape_cdata(&markdown::to_html(&post.excerpt)))))?;
            writer.write_event(Event::End(BytesEnd::new("summary")))?;

            writer.write_event(Event::End(BytesEnd::new("entry")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("feed")))?;

        Ok(writer.into_inner().into_inner())
    }
}

/// Front matter dates carry no offset; they are read as local time.
fn local_time(date_time: &NaiveDateTime) -> DateTime<FixedOffset> {
    match Local.from_local_datetime(date_time).earliest() {
        Some(dt) => dt.fixed_offset(),
        None => date_time.and_utc().fixed_offset(),
    }
}

fn escape_cdata(text: &str) -> String {
    text.replace("]]>", "]] >")
}

fn push_link(writer: &mut Writer<Cursor<Vec<u8>>>, rel: &str, href: &str) -> quick_xml::Result<()> {
    let mut link = BytesStart::new("link");
    link.push_attribute(("rel", rel));
    link.push_attribute(("href", href));
    writer.write_event(Event::Empty(link))?;
    Ok(())
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::CData(BytesCData::new(escape_cdata(text))))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
