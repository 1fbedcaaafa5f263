//! HTML fragments and rewriting for per-game pages

use super::{GameMeta, PagesConfig};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_SRC_INDEX: Regex = Regex::new(r#"src="(index\.[^"]+)""#).unwrap();
    static ref RE_QUOTED_INDEX: Regex =
        Regex::new(r#""(index\.(?:wasm|pck|worker\.js|audio\.worklet\.js))""#).unwrap();
    static ref RE_FAVICON: Regex = Regex::new(r#"href="(favicon[^"]*)""#).unwrap();
    static ref RE_ICON: Regex = Regex::new(r#"href="(icon\.[^"]+)""#).unwrap();
}

/// Escape text for an HTML attribute value (`& < > " '`)
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Primary, Open Graph and Twitter meta tags for one game
pub fn meta_tags(game_id: &str, meta: &GameMeta, config: &PagesConfig) -> String {
    let base_url = config.base_url();
    let game_url = format!("{base_url}/{game_id}/");
    let image_url = if meta.has_og_image() {
        format!("{base_url}/{game_id}/og_image.png")
    } else {
        format!("{base_url}/og_image.png")
    };

    let title = escape(&meta.title);
    let description = escape(&meta.description);
    let site_name = escape(&config.site_name);
    let full_title = format!("{title} - {site_name}");

    format!(
        r#"
    <!-- Primary Meta Tags -->
    <title>{full_title}</title>
    <meta name="title" content="{full_title}">
    <meta name="description" content="{description}">

    <!-- Open Graph / Facebook -->
    <meta property="og:type" content="website">
    <meta property="og:url" content="{game_url}">
    <meta property="og:title" content="{title}">
    <meta property="og:description" content="{description}">
    <meta property="og:image" content="{image_url}">
    <meta property="og:site_name" content="{site_name}">

    <!-- Twitter -->
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:url" content="{game_url}">
    <meta name="twitter:title" content="{title}">
    <meta name="twitter:description" content="{description}">
    <meta name="twitter:image" content="{image_url}">
"#
    )
}

/// Inline script that selects the game through `?game=<id>` unless the URL already has one
pub fn game_script(game_id: &str) -> String {
    format!(
        r#"
    <script type="text/javascript">
        // Pre-set game parameter for this permalink
        (function() {{
            if (!window.location.search.includes('game=')) {{
                var url = new URL(window.location);
                url.searchParams.set('game', '{game_id}');
                window.history.replaceState({{}}, '', url);
            }}
        }})();
    </script>
"#
    )
}

/// Build a game page from the shared export page.
///
/// Meta tags go right after the first `<head>`, the game script right before
/// the first `</head>`, then asset paths are pointed one directory up.
pub fn render_page(
    base_html: &str,
    game_id: &str,
    meta: &GameMeta,
    config: &PagesConfig,
) -> String {
    let tags = meta_tags(game_id, meta, config);
    let with_meta = base_html.replacen("<head>", &format!("<head>{tags}"), 1);
    let script = game_script(game_id);
    let with_script = with_meta.replacen("</head>", &format!("{script}</head>"), 1);
    rewrite_asset_paths(&with_script)
}

/// Point shared export assets (`index.*`, favicons, icons) at the parent directory
pub fn rewrite_asset_paths(html: &str) -> String {
    let html = RE_SRC_INDEX.replace_all(html, r#"src="../$1""#);
    // Already-prefixed `src="../index.*"` no longer starts with a quote, so it is skipped
    let html = RE_QUOTED_INDEX.replace_all(&html, r#""../$1""#);
    let html = RE_FAVICON.replace_all(&html, r#"href="../$1""#);
    let html = RE_ICON.replace_all(&html, r#"href="../$1""#);
    html.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> PagesConfig {
        PagesConfig {
            base_url: "https://example.com/games/".to_string(),
            site_name: "Microgames".to_string(),
            ..PagesConfig::default()
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"Tom & "Jerry's" <game>"#),
            "Tom &amp; &quot;Jerry&#x27;s&quot; &lt;game&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_meta_tags_default_image() {
        let meta = GameMeta {
            title: "Loop <Connect>".to_string(),
            ..GameMeta::default()
        };
        let tags = meta_tags("loop_connect", &meta, &config());

        assert!(tags.contains("<title>Loop &lt;Connect&gt; - Microgames</title>"));
        assert!(tags.contains(
            r#"<meta property="og:url" content="https://example.com/games/loop_connect/">"#
        ));
        assert!(tags.contains(
            r#"<meta property="og:image" content="https://example.com/games/og_image.png">"#
        ));
        assert!(tags.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
    }

    #[test]
    fn test_meta_tags_game_image() {
        let meta = GameMeta {
            og_image: Some(json!("assets/og_image.png")),
            ..GameMeta::default()
        };
        let tags = meta_tags("minesweeper", &meta, &config());
        let image = "https://example.com/games/minesweeper/og_image.png";
        assert!(tags.contains(&format!(
            r#"<meta name="twitter:image" content="{image}">"#
        )));
    }

    #[test]
    fn test_game_script_sets_param() {
        let script = game_script("micro_sokoban");
        assert!(script.contains("url.searchParams.set('game', 'micro_sokoban');"));
        assert!(script.contains("window.history.replaceState({}, '', url);"));
    }

    #[test]
    fn test_rewrite_asset_paths() {
        let html = r#"<script src="index.js"></script>
<link rel="icon" href="favicon.ico">
<link rel="apple-touch-icon" href="icon.png">
<script>const GODOT_CONFIG = {"executable":"index","mainPack":"index.pck",
"wasm":"index.wasm"};</script>
<script src="index.wasm"></script>"#;
        let out = rewrite_asset_paths(html);

        assert!(out.contains(r#"src="../index.js""#));
        assert!(out.contains(r#"href="../favicon.ico""#));
        assert!(out.contains(r#"href="../icon.png""#));
        assert!(out.contains(r#""mainPack":"../index.pck""#));
        assert!(out.contains(r#""wasm":"../index.wasm""#));
        assert!(out.contains(r#"src="../index.wasm""#));
        assert!(!out.contains("../../"));
        // Bare executable name is not a file reference
        assert!(out.contains(r#""executable":"index""#));
    }

    #[test]
    fn test_render_page_order() {
        let base = concat!(
            r#"<html><head><meta charset="utf-8"></head>"#,
            r#"<body><script src="index.js"></script></body></html>"#
        );
        let page = render_page(base, "loop_connect", &GameMeta::default(), &config());

        let head = page.find("<head>").unwrap();
        let title = page.find("<title>").unwrap();
        let charset = page.find("charset").unwrap();
        let script = page.find("searchParams").unwrap();
        let close = page.find("</head>").unwrap();
        assert!(head < title && title < charset && charset < script && script < close);
        assert!(page.contains(r#"src="../index.js""#));
    }
}
