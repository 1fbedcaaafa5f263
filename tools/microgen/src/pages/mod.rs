//! Per-game landing pages for the web build
//!
//! The web export ships a single `index.html` that boots the whole collection.
//! For link sharing every game gets its own `<build_dir>/<game>/index.html`
//! with game-specific Open Graph / Twitter tags and a script that preselects
//! the game, while still loading the shared bundle from the parent directory.

mod html;

pub use html::{escape, game_script, meta_tags, render_page, rewrite_asset_paths};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://tombarr.github.io/ai-microgames";
pub const DEFAULT_GAMES_DIR: &str = "games";
pub const DEFAULT_BUILD_DIR: &str = "builds/web";
pub const DEFAULT_SITE_NAME: &str = "Microgames";

/// A directory under `games_dir` is a game when it contains this file
const GAME_MARKER: &str = "main.tscn";
const METADATA_FILE: &str = "metadata.json";
const OG_IMAGE: &str = "og_image.png";

/// Page generation errors
#[derive(Debug, thiserror::Error)]
pub enum PagesError {
    #[error("games directory not found: {0}")]
    MissingGamesDir(PathBuf),

    #[error("base HTML not found: {0}")]
    MissingBaseHtml(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Page generation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagesConfig {
    /// Deployed site root; a trailing `/` is ignored
    pub base_url: String,
    pub games_dir: PathBuf,
    pub build_dir: PathBuf,
    pub site_name: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            games_dir: PathBuf::from(DEFAULT_GAMES_DIR),
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

impl PagesConfig {
    /// Base URL without trailing slashes
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The shared web export page every game page is derived from
    pub fn base_html_path(&self) -> PathBuf {
        self.build_dir.join("index.html")
    }
}

/// Contents of a game's `metadata.json`. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameMeta {
    pub title: String,
    pub description: String,
    /// Any non-empty value marks the game as shipping its own OG image
    pub og_image: Option<serde_json::Value>,
    pub tags: Vec<String>,
}

impl Default for GameMeta {
    fn default() -> Self {
        Self {
            title: "Microgame".to_string(),
            description:
                "A fast-paced 5-second microgame challenge! Test your reflexes and skills."
                    .to_string(),
            og_image: None,
            tags: vec!["microgame".into(), "arcade".into(), "quick".into()],
        }
    }
}

impl GameMeta {
    /// Build from a parsed JSON object field by field.
    ///
    /// A field with the wrong type is logged and keeps its default, so one
    /// bad value does not discard the rest of the file.
    fn from_fields(mut fields: serde_json::Map<String, serde_json::Value>, path: &Path) -> Self {
        fn field<T: serde::de::DeserializeOwned>(
            fields: &mut serde_json::Map<String, serde_json::Value>,
            key: &str,
            path: &Path,
        ) -> Option<T> {
            let value = fields.remove(key)?;
            match serde_json::from_value(value) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Ignoring \"{key}\" in {}: {}", path.display(), e);
                    None
                }
            }
        }

        let mut meta = Self::default();
        if let Some(title) = field(&mut fields, "title", path) {
            meta.title = title;
        }
        if let Some(description) = field(&mut fields, "description", path) {
            meta.description = description;
        }
        if let Some(og_image) = field(&mut fields, "og_image", path) {
            meta.og_image = og_image;
        }
        if let Some(tags) = field(&mut fields, "tags", path) {
            meta.tags = tags;
        }
        meta
    }

    /// Whether `og_image` holds a truthy value (not null, false, 0, "" or empty)
    pub fn has_og_image(&self) -> bool {
        use serde_json::Value;
        match &self.og_image {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }
}

/// Result of a page generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagesReport {
    /// Game ids a page was written for
    pub generated: Vec<String>,
    /// Game ids without `assets/og_image.png`
    pub missing_images: Vec<String>,
}

/// Title from a game id: underscores become spaces, each word capitalized
///
/// A word starts after any non-letter, so `loop_connect` gives `Loop Connect`
/// and `game2go` gives `Game2Go`.
pub fn title_from_id(game_id: &str) -> String {
    let mut title = String::with_capacity(game_id.len());
    let mut prev_letter = false;
    for c in game_id.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_letter {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            title.push(c);
            prev_letter = false;
        }
    }
    title
}

fn read_metadata(path: &Path) -> Result<GameMeta, PagesError> {
    let text = fs::read_to_string(path)?;
    let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)?;
    Ok(GameMeta::from_fields(fields, path))
}

/// Load a game's metadata, falling back to defaults.
///
/// Without a `metadata.json` the title is derived from the id. A file that
/// cannot be read or parsed is logged and the defaults are kept.
pub fn load_metadata(games_dir: &Path, game_id: &str) -> GameMeta {
    let path = games_dir.join(game_id).join(METADATA_FILE);
    if !path.exists() {
        return GameMeta {
            title: title_from_id(game_id),
            ..GameMeta::default()
        };
    }

    match read_metadata(&path) {
        Ok(meta) => meta,
        Err(e) => {
            tracing::warn!("Could not load {}: {}", path.display(), e);
            GameMeta::default()
        }
    }
}

/// Sorted ids of every game directory under `games_dir`.
///
/// A missing directory has no games.
pub fn discover_games(games_dir: &Path) -> Result<Vec<String>, PagesError> {
    if !games_dir.exists() {
        return Ok(Vec::new());
    }

    let mut games = Vec::new();
    for entry in fs::read_dir(games_dir)? {
        let path = entry?.path();
        if path.is_dir() && path.join(GAME_MARKER).exists() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                games.push(name.to_string());
            }
        }
    }
    games.sort();
    Ok(games)
}

/// Write a landing page for every discovered game.
///
/// Each page lands in `<build_dir>/<game>/index.html`; the game's
/// `assets/og_image.png` is copied next to it when present.
pub fn generate_pages(config: &PagesConfig) -> Result<PagesReport, PagesError> {
    if !config.games_dir.exists() {
        return Err(PagesError::MissingGamesDir(config.games_dir.clone()));
    }
    let base_html_path = config.base_html_path();
    if !base_html_path.exists() {
        return Err(PagesError::MissingBaseHtml(base_html_path));
    }

    tracing::info!("Reading base HTML from: {}", base_html_path.display());
    let base_html = fs::read_to_string(&base_html_path)?;

    let games = discover_games(&config.games_dir)?;
    let mut report = PagesReport::default();
    if games.is_empty() {
        tracing::warn!("No games found in {}", config.games_dir.display());
        return Ok(report);
    }

    tracing::info!("Found {} games: {}", games.len(), games.join(", "));
    tracing::info!("Base URL: {}", config.base_url());

    for game_id in games {
        let game_build_dir = config.build_dir.join(&game_id);
        fs::create_dir_all(&game_build_dir)?;

        let meta = load_metadata(&config.games_dir, &game_id);
        let page = render_page(&base_html, &game_id, &meta, config);
        let html_path = game_build_dir.join("index.html");
        fs::write(&html_path, page)?;
        tracing::info!("Created: {}", html_path.display());

        let image_src = config.games_dir.join(&game_id).join("assets").join(OG_IMAGE);
        if image_src.exists() {
            fs::copy(&image_src, game_build_dir.join(OG_IMAGE))?;
            tracing::debug!("Copied: {}", image_src.display());
        } else {
            tracing::warn!("No {OG_IMAGE} found for {game_id}");
            report.missing_images.push(game_id.clone());
        }

        report.generated.push(game_id);
    }

    tracing::info!("Generated {} game pages", report.generated.len());
    for game_id in &report.missing_images {
        tracing::warn!("Missing games/{game_id}/assets/{OG_IMAGE}, default OG image will be used");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn add_game(games_dir: &Path, id: &str) -> PathBuf {
        let dir = games_dir.join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(GAME_MARKER), "[gd_scene]").unwrap();
        dir
    }

    #[test]
    fn test_title_from_id() {
        assert_eq!(title_from_id("loop_connect"), "Loop Connect");
        assert_eq!(title_from_id("micro_sokoban"), "Micro Sokoban");
        assert_eq!(title_from_id("BIG_game"), "Big Game");
        assert_eq!(title_from_id("game2go"), "Game2Go");
    }

    #[test]
    fn test_base_url_trims_slash() {
        let config = PagesConfig {
            base_url: "https://example.com//".to_string(),
            ..PagesConfig::default()
        };
        assert_eq!(config.base_url(), "https://example.com");
    }

    #[test]
    fn test_og_image_truthiness() {
        let with = |v| GameMeta {
            og_image: Some(v),
            ..GameMeta::default()
        };
        assert!(!GameMeta::default().has_og_image());
        assert!(!with(json!(null)).has_og_image());
        assert!(!with(json!("")).has_og_image());
        assert!(!with(json!(false)).has_og_image());
        assert!(!with(json!(0)).has_og_image());
        assert!(with(json!("assets/og_image.png")).has_og_image());
        assert!(with(json!(true)).has_og_image());
    }

    #[test]
    fn test_load_metadata_variants() {
        let temp = TempDir::new().unwrap();
        let games = temp.path();

        // No file: derived title, default description
        let meta = load_metadata(games, "loop_connect");
        assert_eq!(meta.title, "Loop Connect");
        assert_eq!(meta.tags, ["microgame", "arcade", "quick"]);

        // Partial file overrides only what it names
        let dir = add_game(games, "minesweeper");
        fs::write(dir.join(METADATA_FILE), r#"{"title": "Mine Sweep", "extra": 1}"#).unwrap();
        let meta = load_metadata(games, "minesweeper");
        assert_eq!(meta.title, "Mine Sweep");
        assert_eq!(meta.description, GameMeta::default().description);

        // A mistyped field falls back alone
        let dir = add_game(games, "typo_game");
        fs::write(dir.join(METADATA_FILE), r#"{"title": "X", "tags": [1, "a"]}"#).unwrap();
        let meta = load_metadata(games, "typo_game");
        assert_eq!(meta.title, "X");
        assert_eq!(meta.tags, GameMeta::default().tags);

        // Broken file keeps defaults without deriving a title
        let dir = add_game(games, "broken_game");
        fs::write(dir.join(METADATA_FILE), "{not json").unwrap();
        assert_eq!(load_metadata(games, "broken_game"), GameMeta::default());

        // Valid JSON that is not an object is rejected as a whole
        fs::write(dir.join(METADATA_FILE), r#"["title"]"#).unwrap();
        assert_eq!(load_metadata(games, "broken_game"), GameMeta::default());
    }

    #[test]
    fn test_discover_games() {
        let temp = TempDir::new().unwrap();
        add_game(temp.path(), "zeta");
        add_game(temp.path(), "alpha");
        fs::create_dir_all(temp.path().join("not_a_game")).unwrap();
        fs::write(temp.path().join("README.md"), "docs").unwrap();

        assert_eq!(discover_games(temp.path()).unwrap(), ["alpha", "zeta"]);
        assert!(discover_games(&temp.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_generate_pages_requires_inputs() {
        let temp = TempDir::new().unwrap();
        let config = PagesConfig {
            games_dir: temp.path().join("games"),
            build_dir: temp.path().join("build"),
            ..PagesConfig::default()
        };
        assert!(matches!(generate_pages(&config), Err(PagesError::MissingGamesDir(_))));

        fs::create_dir_all(&config.games_dir).unwrap();
        assert!(matches!(generate_pages(&config), Err(PagesError::MissingBaseHtml(_))));
    }
}
