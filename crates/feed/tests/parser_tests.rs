// ABOUTME: Integration tests for RSS feed parsing and normalization.
// ABOUTME: Covers channel mapping, episode filtering, duration/number handling, and fatal cases.

use podsift_feed::{parse_feed_bytes, FeedError};
use pretty_assertions::assert_eq;

const TWO_EPISODE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
    <channel>
        <title>Tech Talk Weekly</title>
        <link>https://techtalk.example.com</link>
        <description><![CDATA[<p>A show about &amp; for engineers.</p>]]></description>
        <language>en-US</language>
        <itunes:author>Jordan Rivers</itunes:author>
        <itunes:owner>
            <itunes:name>Tech Talk Media</itunes:name>
            <itunes:email>studio@techtalk.example.com</itunes:email>
        </itunes:owner>
        <itunes:category text="Technology"/>
        <itunes:category text="News"/>
        <itunes:explicit>no</itunes:explicit>
        <itunes:image href="https://cdn.example.com/cover.jpg"/>
        <image>
            <url>https://cdn.example.com/rss-cover.png</url>
            <title>Tech Talk Weekly</title>
            <link>https://techtalk.example.com</link>
        </image>
        <item>
            <title>Episode One</title>
            <description>The pilot.</description>
            <enclosure url="https://cdn.example.com/ep1.mp3" type="audio/mpeg" length="12345678"/>
            <itunes:duration>01:02:03</itunes:duration>
            <itunes:episode>1</itunes:episode>
            <itunes:season>1</itunes:season>
            <pubDate>Mon, 15 Jan 2024 10:00:00 +0000</pubDate>
        </item>
        <item>
            <title>Episode Two</title>
            <description>The follow-up.</description>
            <enclosure url="https://cdn.example.com/ep2.mp3" type="audio/mpeg" length="23456789"/>
            <itunes:duration>05:30</itunes:duration>
            <itunes:episode>2</itunes:episode>
            <pubDate>Mon, 22 Jan 2024 10:00:00 +0000</pubDate>
        </item>
    </channel>
</rss>"#;

#[test]
fn well_formed_feed_round_trip() {
    let feed = parse_feed_bytes(TWO_EPISODE_FEED.as_bytes()).unwrap();

    assert_eq!(feed.podcast.title, "Tech Talk Weekly");
    assert_eq!(feed.podcast.description, "A show about & for engineers.");
    assert_eq!(feed.podcast.language, "en-US");
    assert_eq!(feed.podcast.author_name, "Jordan Rivers");
    assert_eq!(feed.podcast.author_email, "studio@techtalk.example.com");
    assert_eq!(feed.podcast.website_url, "https://techtalk.example.com");
    assert_eq!(feed.podcast.category, "Technology");
    assert!(!feed.podcast.is_explicit);
    assert_eq!(feed.podcast.cover_image_url, "https://cdn.example.com/cover.jpg");

    assert_eq!(feed.episodes.len(), 2);
    assert_eq!(feed.items_seen, 2);
    assert_eq!(feed.items_imported, 2);

    let ep1 = &feed.episodes[0];
    assert_eq!(ep1.title, "Episode One");
    assert_eq!(ep1.audio_url, "https://cdn.example.com/ep1.mp3");
    assert_eq!(ep1.file_size_bytes, 12345678);
    assert_eq!(ep1.duration_seconds, 3723);
    assert_eq!(ep1.publish_date, "Mon, 15 Jan 2024 10:00:00 +0000");
    assert!(ep1.published_at.is_some());
    assert_eq!(ep1.episode_number, Some(1));
    assert_eq!(ep1.season_number, Some(1));

    let ep2 = &feed.episodes[1];
    assert_eq!(ep2.duration_seconds, 330);
    assert_eq!(ep2.season_number, None);
}

#[test]
fn episodes_preserve_document_order() {
    let feed = parse_feed_bytes(TWO_EPISODE_FEED.as_bytes()).unwrap();
    let titles: Vec<&str> = feed.episodes.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Episode One", "Episode Two"]);
}

#[test]
fn parsing_is_deterministic() {
    let first = parse_feed_bytes(TWO_EPISODE_FEED.as_bytes()).unwrap();
    let second = parse_feed_bytes(TWO_EPISODE_FEED.as_bytes()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_channel_is_fatal() {
    let doc = r#"<?xml version="1.0"?><html><body>not a feed</body></html>"#;
    let err = parse_feed_bytes(doc.as_bytes()).unwrap_err();
    assert!(matches!(err, FeedError::MissingChannel));
    assert!(err.to_string().contains("channel"));
}

#[test]
fn item_without_enclosure_is_excluded_not_fatal() {
    let rss = r#"<?xml version="1.0"?>
<rss version="2.0">
    <channel>
        <title>Mixed Feed</title>
        <item>
            <title>Blog post, no audio</title>
            <description>Text only.</description>
        </item>
        <item>
            <title>Real episode</title>
            <enclosure url="https://cdn.example.com/ep.mp3" type="audio/mpeg" length="100"/>
        </item>
    </channel>
</rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.items_seen, 2);
    assert_eq!(feed.items_imported, 1);
    assert_eq!(feed.episodes.len(), 1);
    assert_eq!(feed.episodes[0].title, "Real episode");
}

#[test]
fn empty_channel_yields_zero_episodes() {
    let rss = r#"<rss version="2.0"><channel><title>Quiet Show</title></channel></rss>"#;
    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.podcast.title, "Quiet Show");
    assert!(feed.episodes.is_empty());
    assert_eq!(feed.items_seen, 0);
}

#[test]
fn duration_shapes_normalize_per_policy() {
    let rss = r#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
    <channel>
        <title>Durations</title>
        <item>
            <enclosure url="https://cdn/a.mp3" type="audio/mpeg"/>
            <itunes:duration>01:02:03</itunes:duration>
        </item>
        <item>
            <enclosure url="https://cdn/b.mp3" type="audio/mpeg"/>
            <itunes:duration>05:30</itunes:duration>
        </item>
        <item>
            <enclosure url="https://cdn/c.mp3" type="audio/mpeg"/>
            <itunes:duration>45</itunes:duration>
        </item>
        <item>
            <enclosure url="https://cdn/d.mp3" type="audio/mpeg"/>
            <itunes:duration>notanumber</itunes:duration>
        </item>
    </channel>
</rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    let durations: Vec<u32> = feed.episodes.iter().map(|e| e.duration_seconds).collect();
    assert_eq!(durations, vec![3723, 330, 45, 0]);
}

#[test]
fn episode_zero_is_distinct_from_absent() {
    let rss = r#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
    <channel>
        <title>Numbering</title>
        <item>
            <enclosure url="https://cdn/zero.mp3" type="audio/mpeg"/>
            <itunes:episode>0</itunes:episode>
        </item>
        <item>
            <enclosure url="https://cdn/none.mp3" type="audio/mpeg"/>
        </item>
        <item>
            <enclosure url="https://cdn/bad.mp3" type="audio/mpeg"/>
            <itunes:episode>next</itunes:episode>
        </item>
    </channel>
</rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.episodes[0].episode_number, Some(0));
    assert_eq!(feed.episodes[1].episode_number, None);
    assert_eq!(feed.episodes[2].episode_number, None);
}

#[test]
fn defaults_for_sparse_channel() {
    let rss = r#"<rss version="2.0"><channel>
        <title>Bare Minimum</title>
        <item><enclosure url="https://cdn/only.mp3"/></item>
    </channel></rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.podcast.language, "en");
    assert_eq!(feed.podcast.author_name, "");
    assert_eq!(feed.podcast.author_email, "");
    assert_eq!(feed.podcast.category, "");
    assert_eq!(feed.podcast.cover_image_url, "");
    assert!(!feed.podcast.is_explicit);

    let ep = &feed.episodes[0];
    assert_eq!(ep.file_size_bytes, 0);
    assert_eq!(ep.duration_seconds, 0);
    assert_eq!(ep.publish_date, "");
    assert_eq!(ep.published_at, None);
    assert_eq!(ep.episode_number, None);
}

#[test]
fn channel_image_url_is_cover_fallback() {
    let rss = r#"<rss version="2.0"><channel>
        <title>No iTunes Art</title>
        <image>
            <url>https://cdn.example.com/rss-cover.png</url>
            <title>No iTunes Art</title>
        </image>
    </channel></rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.podcast.cover_image_url, "https://cdn.example.com/rss-cover.png");
    // The image block's own title must not clobber the channel title
    assert_eq!(feed.podcast.title, "No iTunes Art");
}

#[test]
fn explicit_yes_only() {
    let template = |value: &str| {
        format!(
            r#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
            <channel><title>E</title><itunes:explicit>{value}</itunes:explicit></channel></rss>"#
        )
    };

    for (value, expected) in [("yes", true), ("YES", true), ("true", false), ("no", false)] {
        let feed = parse_feed_bytes(template(value).as_bytes()).unwrap();
        assert_eq!(feed.podcast.is_explicit, expected, "explicit value {value:?}");
    }
}

#[test]
fn tag_matching_is_case_insensitive() {
    let rss = r#"<rss version="2.0"><Channel>
        <Title>Shouty Feed</Title>
        <Item>
            <Title>Loud Episode</Title>
            <Enclosure URL="https://cdn/loud.mp3" Type="audio/mpeg" Length="42"/>
            <PubDate>Mon, 15 Jan 2024 10:00:00 +0000</PubDate>
        </Item>
    </Channel></rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.podcast.title, "Shouty Feed");
    assert_eq!(feed.episodes.len(), 1);
    assert_eq!(feed.episodes[0].audio_url, "https://cdn/loud.mp3");
    assert_eq!(feed.episodes[0].file_size_bytes, 42);
}

#[test]
fn owner_name_backfills_missing_author() {
    let rss = r#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
    <channel>
        <title>Ownerly</title>
        <itunes:owner>
            <itunes:name>The Owner</itunes:name>
            <itunes:email>owner@example.com</itunes:email>
        </itunes:owner>
    </channel></rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.podcast.author_name, "The Owner");
    assert_eq!(feed.podcast.author_email, "owner@example.com");
}

#[test]
fn video_only_item_keeps_its_enclosure() {
    // An item whose only enclosure is non-audio still resolves that URL
    let rss = r#"<rss version="2.0"><channel>
        <title>Video Feed</title>
        <item><enclosure url="https://cdn/ep.mp4" type="video/mp4"/></item>
    </channel></rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.episodes.len(), 1);
    assert_eq!(feed.episodes[0].audio_url, "https://cdn/ep.mp4");
}

#[test]
fn entities_in_plain_text_are_resolved() {
    let rss = r#"<rss version="2.0"><channel>
        <title>Hello &amp; Welcome</title>
        <link>https://ex.com/feed?a=1&amp;b=2</link>
        <description>Dawn &#8212; dusk &lt;daily&gt;</description>
    </channel></rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    // The space on each side of the reference must survive
    assert_eq!(feed.podcast.title, "Hello & Welcome");
    assert_eq!(feed.podcast.website_url, "https://ex.com/feed?a=1&b=2");
    assert_eq!(feed.podcast.description, "Dawn \u{2014} dusk");
}

#[test]
fn non_predefined_entities_still_decode() {
    let rss = r#"<rss version="2.0"><channel>
        <title>Tea&nbsp;Time &copy; 2024</title>
    </channel></rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.podcast.title, "Tea Time © 2024");
}

#[test]
fn attribute_values_are_unescaped() {
    let rss = r#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
    <channel>
        <title>Escaped</title>
        <itunes:image href="https://cdn.example.com/art.jpg?w=600&amp;h=600"/>
        <item>
            <enclosure url="https://cdn/ep.mp3?a=1&amp;b=2" type="audio/mpeg" length="9"/>
        </item>
    </channel></rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.episodes[0].audio_url, "https://cdn/ep.mp3?a=1&b=2");
    assert_eq!(
        feed.podcast.cover_image_url,
        "https://cdn.example.com/art.jpg?w=600&h=600"
    );
}

#[test]
fn url_fields_get_the_normalization_pass() {
    let rss = r#"<rss version="2.0"><channel>
        <title>Wrapped</title>
        <link><![CDATA[https://ex.com/show]]></link>
        <image><url>  https://cdn.example.com/rss-cover.png  </url></image>
    </channel></rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.podcast.website_url, "https://ex.com/show");
    assert_eq!(feed.podcast.cover_image_url, "https://cdn.example.com/rss-cover.png");
}

#[test]
fn serializes_with_camel_case_contract() {
    let feed = parse_feed_bytes(TWO_EPISODE_FEED.as_bytes()).unwrap();
    let json = serde_json::to_value(&feed).unwrap();

    assert_eq!(json["podcast"]["authorName"], "Jordan Rivers");
    assert_eq!(json["podcast"]["coverImageUrl"], "https://cdn.example.com/cover.jpg");
    assert_eq!(json["episodes"][0]["audioUrl"], "https://cdn.example.com/ep1.mp3");
    assert_eq!(json["episodes"][0]["fileSizeBytes"], 12345678);
    assert_eq!(json["itemsSeen"], 2);
    assert_eq!(json["itemsImported"], 2);
}
