//! WebVTT subtitle flattening.
//!
//! YouTube auto-captions repeat each line while it scrolls and wrap words in
//! `<00:00:01.000><c>` timing tags; both are stripped so the result reads as
//! plain speech.

/// Flatten a WebVTT document into space-separated caption text
pub fn vtt_to_text(vtt: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut previous: Option<String> = None;
    let mut in_note = false;

    let vtt = vtt.strip_prefix('\u{feff}').unwrap_or(vtt);
    let mut lines = vtt.lines().map(str::trim).enumerate().peekable();

    while let Some((i, line)) = lines.next() {
        if line.is_empty() {
            in_note = false;
            continue;
        }
        if in_note {
            continue;
        }
        if i == 0 && line.starts_with("WEBVTT") {
            continue;
        }
        if line.starts_with("NOTE") || line.starts_with("STYLE") || line.starts_with("REGION") {
            in_note = true;
            continue;
        }
        if is_header_field(line) || line.contains("-->") {
            continue;
        }
        // a cue identifier is whatever sits directly above a timing line
        if lines.peek().is_some_and(|(_, next)| next.contains("-->")) {
            continue;
        }

        let text = decode_entities(&strip_tags(line));
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() || previous.as_deref() == Some(text.as_str()) {
            continue;
        }

        words.push(text.clone());
        previous = Some(text);
    }

    words.join(" ")
}

fn is_header_field(line: &str) -> bool {
    ["Kind:", "Language:"]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

fn strip_tags(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_tag = false;
    for c in line.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_header_and_timings() {
        let vtt = "WEBVTT
Kind: captions
Language: en

1
00:00:00.000 --> 00:00:01.000
Hello   world

2
00:00:01.000 --> 00:00:02.000
Second line
";
        assert_eq!(vtt_to_text(vtt), "Hello world Second line");
    }

    #[test]
    fn collapses_rolling_auto_captions() {
        let vtt = "WEBVTT

00:00:00.000 --> 00:00:02.000 align:start position:0%
so<00:00:00.400><c> today</c><00:00:00.800><c> we</c>

00:00:02.000 --> 00:00:02.010 align:start position:0%
so today we

00:00:02.010 --> 00:00:04.000 align:start position:0%
so today we
talk about tokens
";
        assert_eq!(vtt_to_text(vtt), "so today we talk about tokens");
    }

    #[test]
    fn decodes_entities_and_skips_notes() {
        let vtt = "WEBVTT

NOTE this block
spans lines

00:00:00.000 --> 00:00:01.000
rock &amp; roll &gt; jazz
";
        assert_eq!(vtt_to_text(vtt), "rock & roll > jazz");
    }

    #[test]
    fn numeric_caption_lines_are_speech() {
        let vtt = "WEBVTT

00:00:00.000 --> 00:00:01.000
the year was

00:00:01.000 --> 00:00:02.000
1969
";
        assert_eq!(vtt_to_text(vtt), "the year was 1969");
    }

    #[test]
    fn text_cue_ids_are_dropped() {
        let vtt = "WEBVTT

intro-1
00:00:00.000 --> 00:00:01.000
welcome back

42
00:00:01.000 --> 00:00:02.000
to the show
";
        assert_eq!(vtt_to_text(vtt), "welcome back to the show");
    }

    #[test]
    fn byte_order_mark_before_header() {
        let vtt = "\u{feff}WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nhello\n";
        assert_eq!(vtt_to_text(vtt), "hello");
    }
}
