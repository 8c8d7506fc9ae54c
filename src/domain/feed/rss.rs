use super::model::{Feed, FeedChannel, FeedItem};
use crate::domain::episode::EpisodeHistory;
use chrono::{DateTime, Utc};
use std::fmt::Write;

const RFC822_GMT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Project the history onto a feed. Pure: the output depends only on the
/// arguments.
pub fn derive_feed(
    history: &EpisodeHistory,
    channel: &FeedChannel,
    base_url: &str,
    build_date: DateTime<Utc>,
) -> Feed {
    let base_url = base_url.trim_end_matches('/');

    let items = history
        .iter()
        .map(|episode| FeedItem {
            guid: episode.id.clone(),
            title: episode.title.clone(),
            pub_date: episode.date,
            enclosure_url: episode.audio_url.clone(),
            headlines: episode.main_stories.clone(),
            duration_secs: episode.duration_secs,
        })
        .collect();

    Feed {
        channel: channel.clone(),
        link: base_url.to_string(),
        image_url: format!("{}/cover.jpg", base_url),
        last_build_date: build_date,
        items,
    }
}

impl Feed {
    /// RSS 2.0 with the iTunes podcast namespace
    pub fn to_xml(&self) -> String {
        let channel = &self.channel;
        let mut xml = String::with_capacity(2048 + self.items.len() * 768);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(
            "<rss version=\"2.0\" xmlns:itunes=\"http://www.itunes.com/dtds/podcast-1.0.dtd\" \
             xmlns:content=\"http://purl.org/rss/1.0/modules/content/\">\n",
        );
        xml.push_str("  <channel>\n");
        element(&mut xml, 4, "title", &channel.title);
        element(&mut xml, 4, "link", &self.link);
        element(&mut xml, 4, "language", &channel.language);
        element(&mut xml, 4, "itunes:author", &channel.author);
        element(&mut xml, 4, "itunes:summary", &channel.summary);
        element(&mut xml, 4, "description", &channel.description);
        xml.push_str("    <itunes:owner>\n");
        element(&mut xml, 6, "itunes:name", &channel.owner_name);
        element(&mut xml, 6, "itunes:email", &channel.owner_email);
        xml.push_str("    </itunes:owner>\n");
        element(&mut xml, 4, "itunes:explicit", "no");
        let _ = writeln!(
            xml,
            "    <itunes:category text=\"{}\"/>",
            escape(&channel.category)
        );
        let _ = writeln!(xml, "    <itunes:image href=\"{}\"/>", escape(&self.image_url));
        element(
            &mut xml,
            4,
            "lastBuildDate",
            &self.last_build_date.format(RFC822_GMT).to_string(),
        );

        for item in &self.items {
            xml.push_str("    <item>\n");
            element(&mut xml, 6, "title", &item.title);
            let _ = writeln!(
                xml,
                "      <description><![CDATA[{}]]></description>",
                cdata(&item_description(item))
            );
            element(
                &mut xml,
                6,
                "pubDate",
                &item.pub_date.format(RFC822_GMT).to_string(),
            );
            let _ = writeln!(
                xml,
                "      <guid isPermaLink=\"false\">{}</guid>",
                escape(&item.guid)
            );
            let _ = writeln!(
                xml,
                "      <enclosure url=\"{}\" length=\"0\" type=\"audio/mpeg\"/>",
                escape(&item.enclosure_url)
            );
            element(&mut xml, 6, "itunes:author", &channel.author);
            if let Some(secs) = item.duration_secs {
                element(&mut xml, 6, "itunes:duration", &itunes_duration(secs));
            }
            element(&mut xml, 6, "itunes:explicit", "no");
            xml.push_str("    </item>\n");
        }

        xml.push_str("  </channel>\n");
        xml.push_str("</rss>\n");
        xml
    }
}

fn item_description(item: &FeedItem) -> String {
    if item.headlines.is_empty() {
        return escape(&item.title);
    }

    let mut html = String::from("<p><strong>Top Stories:</strong></p><ul>");
    for headline in &item.headlines {
        let _ = write!(html, "<li>{}</li>", escape(headline));
    }
    html.push_str("</ul>");
    html
}

/// `HH:MM:SS`, as podcast directories expect
fn itunes_duration(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

fn element(xml: &mut String, indent: usize, name: &str, text: &str) {
    let _ = writeln!(
        xml,
        "{:indent$}<{name}>{}</{name}>",
        "",
        escape(text),
        indent = indent,
        name = name
    );
}

pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `]]>` cannot appear inside a CDATA section
fn cdata(text: &str) -> String {
    text.replace("]]>", "]]]]><![CDATA[>")
}
