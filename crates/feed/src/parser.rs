// ABOUTME: Streaming RSS parser building the podcast/episode model from raw bytes.
// ABOUTME: Single quick-xml pass; tag and attribute names match case-insensitively.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::duration::parse_duration_seconds;
use crate::error::FeedError;
use crate::models::{Episode, ParsedFeed, Podcast};
use crate::text::clean_text;
use crate::time_parse::parse_flexible_time;

/// Text-bearing elements whose content we accumulate between start and end tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    Title,
    Description,
    Language,
    Link,
    Author,
    OwnerName,
    OwnerEmail,
    Explicit,
    ImageUrl,
    Duration,
    PubDate,
    EpisodeNumber,
    SeasonNumber,
}

#[derive(Debug, Default)]
struct ChannelFields {
    title: Option<String>,
    description: Option<String>,
    language: Option<String>,
    link: Option<String>,
    author: Option<String>,
    owner_name: Option<String>,
    owner_email: Option<String>,
    category: Option<String>,
    explicit: Option<String>,
    itunes_image: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct RawEnclosure {
    url: String,
    mime_type: Option<String>,
    length: Option<String>,
}

#[derive(Debug, Default)]
struct ItemFields {
    title: Option<String>,
    description: Option<String>,
    enclosures: Vec<RawEnclosure>,
    duration: Option<String>,
    pub_date: Option<String>,
    episode: Option<String>,
    season: Option<String>,
}

/// Parser position and partially-built output, threaded through the event loop.
#[derive(Default)]
struct ParserState {
    channel: ChannelFields,
    items: Vec<ItemFields>,
    current_item: ItemFields,
    saw_channel: bool,
    in_channel: bool,
    in_item: bool,
    in_owner: bool,
    in_channel_image: bool,
    // Element currently accumulating text, with the tag name that opened it
    text_field: Option<(TextField, String)>,
    text_buf: String,
}

impl ParserState {
    fn handle_open(&mut self, e: &BytesStart, is_empty: bool) {
        let name = lowercase_name(e.name().as_ref());

        match name.as_str() {
            "channel" => {
                self.saw_channel = true;
                if !is_empty {
                    self.in_channel = true;
                }
                return;
            }
            "item" if self.in_channel => {
                if is_empty {
                    // A self-closing item still counts as seen
                    self.items.push(ItemFields::default());
                } else {
                    self.in_item = true;
                    self.current_item = ItemFields::default();
                }
                return;
            }
            "itunes:owner" if self.in_channel && !self.in_item && !is_empty => {
                self.in_owner = true;
                return;
            }
            "image" if self.in_channel && !self.in_item && !is_empty => {
                self.in_channel_image = true;
                return;
            }
            "enclosure" if self.in_item => {
                self.current_item.enclosures.push(RawEnclosure {
                    url: get_attribute(e, "url").unwrap_or_default(),
                    mime_type: get_attribute(e, "type"),
                    length: get_attribute(e, "length"),
                });
                return;
            }
            "itunes:image" if self.in_channel && !self.in_item => {
                if let Some(href) = get_attribute(e, "href") {
                    self.channel.itunes_image.get_or_insert(href);
                }
                return;
            }
            // The primary category is the first one in the document
            "itunes:category" if self.in_channel && !self.in_item => {
                if self.channel.category.is_none() {
                    self.channel.category = get_attribute(e, "text");
                }
                return;
            }
            _ => {}
        }

        // Self-closing text elements carry no content; nothing to accumulate.
        if is_empty {
            return;
        }

        if let Some(field) = self.classify_text_field(&name) {
            self.text_field = Some((field, name));
            self.text_buf.clear();
        }
    }

    /// Maps a tag name onto a text slot, given the current position.
    fn classify_text_field(&self, name: &str) -> Option<TextField> {
        let in_scope = self.in_channel;
        match name {
            "title" if in_scope && !self.in_channel_image => Some(TextField::Title),
            "description" if in_scope && !self.in_channel_image => Some(TextField::Description),
            "language" if in_scope && !self.in_item => Some(TextField::Language),
            "link" if in_scope && !self.in_item && !self.in_channel_image => {
                Some(TextField::Link)
            }
            "itunes:author" if in_scope && !self.in_item => Some(TextField::Author),
            "itunes:name" if self.in_owner => Some(TextField::OwnerName),
            "itunes:email" if self.in_owner => Some(TextField::OwnerEmail),
            "itunes:explicit" if in_scope && !self.in_item => Some(TextField::Explicit),
            "url" if self.in_channel_image => Some(TextField::ImageUrl),
            "itunes:duration" if self.in_item => Some(TextField::Duration),
            "pubdate" if self.in_item => Some(TextField::PubDate),
            "itunes:episode" if self.in_item => Some(TextField::EpisodeNumber),
            "itunes:season" if self.in_item => Some(TextField::SeasonNumber),
            _ => None,
        }
    }

    fn handle_text(&mut self, text: &str) {
        if self.text_field.is_some() {
            self.text_buf.push_str(text);
        }
    }

    fn handle_end(&mut self, raw_name: &[u8]) {
        let name = lowercase_name(raw_name);

        match name.as_str() {
            "channel" => self.in_channel = false,
            "item" if self.in_item => {
                self.items.push(std::mem::take(&mut self.current_item));
                self.in_item = false;
            }
            "itunes:owner" => self.in_owner = false,
            "image" if !self.in_item => self.in_channel_image = false,
            _ => {}
        }

        // Commit accumulated text when the element that opened it closes.
        // Other end tags (embedded markup inside a description, say) are
        // ignored so the accumulation continues across them.
        let Some((field, ref open_tag)) = self.text_field else {
            return;
        };
        if *open_tag != name {
            return;
        }
        let text = std::mem::take(&mut self.text_buf);
        self.commit_text(field, text);
        self.text_field = None;
    }

    fn commit_text(&mut self, field: TextField, text: String) {
        let slot = if self.in_item {
            match field {
                TextField::Title => &mut self.current_item.title,
                TextField::Description => &mut self.current_item.description,
                TextField::Duration => &mut self.current_item.duration,
                TextField::PubDate => &mut self.current_item.pub_date,
                TextField::EpisodeNumber => &mut self.current_item.episode,
                TextField::SeasonNumber => &mut self.current_item.season,
                _ => return,
            }
        } else {
            match field {
                TextField::Title => &mut self.channel.title,
                TextField::Description => &mut self.channel.description,
                TextField::Language => &mut self.channel.language,
                TextField::Link => &mut self.channel.link,
                TextField::Author => &mut self.channel.author,
                TextField::OwnerName => &mut self.channel.owner_name,
                TextField::OwnerEmail => &mut self.channel.owner_email,
                TextField::Explicit => &mut self.channel.explicit,
                TextField::ImageUrl => &mut self.channel.image_url,
                _ => return,
            }
        };
        slot.get_or_insert(text);
    }
}

/// Parses feed bytes into a normalized podcast/episode record set.
///
/// The only fatal condition is a document with no `<channel>` element.
/// Individual items degrade field-by-field to documented defaults, and items
/// without an enclosure URL are excluded from the output (visible through the
/// `items_seen`/`items_imported` counts) rather than failing the import.
pub fn parse_feed_bytes(data: &[u8]) -> Result<ParsedFeed, FeedError> {
    // Text events are NOT trimmed at the reader: an entity reference splits
    // its surrounding text into separate fragments, and trimming each one
    // would eat the spaces next to the reference. Cleanup trims later.
    let mut reader = Reader::from_reader(data);

    let mut state = ParserState::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => state.handle_open(e, false),
            Ok(Event::Empty(ref e)) => state.handle_open(e, true),
            Ok(Event::Text(ref e)) => {
                if let Ok(text) = e.decode() {
                    state.handle_text(&text);
                }
            }
            // Entity references in element text arrive as their own events.
            // Character refs and the five predefined entities resolve here;
            // anything else is re-emitted literally for clean_text to decode.
            Ok(Event::GeneralRef(ref e)) => {
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    let mut utf8 = [0u8; 4];
                    state.handle_text(ch.encode_utf8(&mut utf8));
                } else if let Ok(name) = e.decode() {
                    match resolve_predefined_entity(&name) {
                        Some(resolved) => state.handle_text(resolved),
                        None => state.handle_text(&format!("&{name};")),
                    }
                }
            }
            Ok(Event::CData(ref e)) => {
                state.handle_text(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::End(ref e)) => state.handle_end(e.name().as_ref()),
            Ok(Event::Eof) => break,
            // A reader error after the channel was found keeps what was read;
            // before that there is nothing to import anyway.
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    if !state.saw_channel {
        return Err(FeedError::MissingChannel);
    }

    Ok(build_feed(state.channel, state.items))
}

fn build_feed(channel: ChannelFields, items: Vec<ItemFields>) -> ParsedFeed {
    let podcast = Podcast {
        title: clean_text(channel.title.as_deref().unwrap_or_default()),
        description: clean_text(channel.description.as_deref().unwrap_or_default()),
        language: non_empty(channel.language.map(|s| clean_text(&s)))
            .unwrap_or_else(|| "en".to_string()),
        author_name: channel
            .author
            .or(channel.owner_name)
            .map(|s| clean_text(&s))
            .unwrap_or_default(),
        author_email: channel
            .owner_email
            .map(|s| clean_text(&s))
            .unwrap_or_default(),
        website_url: channel
            .link
            .map(|s| clean_text(&s))
            .unwrap_or_default(),
        category: channel
            .category
            .map(|s| clean_text(&s))
            .unwrap_or_default(),
        is_explicit: is_explicit(channel.explicit.as_deref()),
        cover_image_url: non_empty(channel.itunes_image)
            .or_else(|| non_empty(channel.image_url))
            .map(|s| clean_text(&s))
            .unwrap_or_default(),
    };

    let items_seen = items.len();
    let mut episodes = Vec::with_capacity(items_seen);
    for item in items {
        // Filtering policy, not an error: no enclosure URL means no episode.
        let Some(enclosure) = select_audio_enclosure(&item.enclosures) else {
            continue;
        };
        let publish_date = item.pub_date.map(|s| s.trim().to_string()).unwrap_or_default();
        episodes.push(Episode {
            title: clean_text(item.title.as_deref().unwrap_or_default()),
            description: clean_text(item.description.as_deref().unwrap_or_default()),
            audio_url: enclosure.url.clone(),
            file_size_bytes: enclosure
                .length
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0),
            duration_seconds: item
                .duration
                .as_deref()
                .map(parse_duration_seconds)
                .unwrap_or(0),
            published_at: parse_flexible_time(&publish_date),
            publish_date,
            episode_number: parse_optional_number(item.episode.as_deref()),
            season_number: parse_optional_number(item.season.as_deref()),
        });
    }

    let items_imported = episodes.len();
    ParsedFeed {
        podcast,
        episodes,
        items_seen,
        items_imported,
    }
}

/// Resolves the audio enclosure for an item: the first enclosure with an
/// audio mime type, else the first one with a URL at all.
fn select_audio_enclosure(enclosures: &[RawEnclosure]) -> Option<&RawEnclosure> {
    enclosures
        .iter()
        .find(|enc| {
            !enc.url.is_empty()
                && enc
                    .mime_type
                    .as_deref()
                    .is_some_and(|m| m.to_ascii_lowercase().starts_with("audio/"))
        })
        .or_else(|| enclosures.iter().find(|enc| !enc.url.is_empty()))
}

/// `Some(n)` only when the tag was present and parses as an integer.
/// Presence is checked explicitly so an episode numbered 0 stays `Some(0)`
/// instead of collapsing into "not provided".
fn parse_optional_number(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// True only when the explicit marker text equals "yes", case-insensitively.
fn is_explicit(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn lowercase_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

/// Case-insensitive attribute lookup on an element, with standard XML
/// escapes resolved. A value that fails to unescape (an unknown entity,
/// say) is kept raw rather than dropped.
fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        if key == name {
            return Some(match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            });
        }
    }
    None
}
