//! End-to-end asset generation into a scratch directory.
//!
//! Covers the flows the `gen-assets` tool drives:
//! 1. Sprite sets written as PNG and decoded back
//! 2. Sound library and bundles written as WAV and read back
//! 3. Landing pages generated from a fake web export

use std::fs;
use std::path::Path;

use microgen::audio::dsp::sample_count;
use microgen::audio::{self, AudioError, SAMPLE_RATE};
use microgen::pages::{self, PagesConfig};
use microgen::sprite::{SpriteGame, generate_sprites};
use tempfile::tempdir;

fn decode_size(path: &Path) -> (u32, u32) {
    let file = fs::File::open(path).expect("Failed to open PNG");
    let reader = png::Decoder::new(file).read_info().expect("Failed to read PNG header");
    let info = reader.info();
    (info.width, info.height)
}

fn read_wav(path: &Path) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::open(path).expect("Failed to open WAV");
    let samples = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    (reader.spec(), samples)
}

// ============================================================================
// Sprites
// ============================================================================

#[test]
fn test_sokoban_sprites_written() {
    let dir = tempdir().unwrap();
    let written = generate_sprites(SpriteGame::MicroSokoban, dir.path()).unwrap();

    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["floor.png", "wall.png", "target.png", "box.png", "player.png"]);

    for path in &written {
        assert_eq!(decode_size(path), (64, 64), "{}", path.display());
    }
}

#[test]
fn test_pipe_sprites_written() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("nested").join("assets");
    let written = generate_sprites(SpriteGame::LoopConnect, &out).unwrap();

    assert_eq!(written.len(), 5);
    for path in &written {
        assert!(path.starts_with(&out));
        assert_eq!(decode_size(path), (32, 32));
    }
}

// ============================================================================
// Sounds
// ============================================================================

#[test]
fn test_generate_all_sounds() {
    let dir = tempdir().unwrap();
    let written = audio::generate_all(dir.path()).unwrap();

    assert_eq!(written.len(), audio::LIBRARY.len() + 2);
    assert!(dir.path().join("sfx_game_start.wav").exists());
    assert!(dir.path().join("sfx_game_over.wav").exists());

    for path in &written {
        let (spec, samples) = read_wav(path);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, SAMPLE_RATE);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        assert!(!samples.is_empty(), "{} is empty", path.display());

        // Peak limited to 0.98 of full scale
        let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(peak <= (0.98 * i16::MAX as f32) as u16 + 1, "{} peak {peak}", path.display());
    }
}

#[test]
fn test_wav_length_matches_duration() {
    let dir = tempdir().unwrap();
    let written = audio::generate_sounds(&["button", "win"], dir.path()).unwrap();

    let (_, button) = read_wav(&written[0]);
    let (_, win) = read_wav(&written[1]);
    assert_eq!(button.len(), sample_count(0.05, SAMPLE_RATE));
    assert_eq!(win.len(), sample_count(1.2, SAMPLE_RATE));
}

#[test]
fn test_bundles_written() {
    let dir = tempdir().unwrap();

    let mines = audio::generate_bundle("minesweeper", &dir.path().join("minesweeper")).unwrap();
    assert_eq!(mines.len(), 3);
    assert!(dir.path().join("minesweeper/sfx_explode.wav").exists());

    let sokoban = audio::generate_bundle("micro_sokoban", &dir.path().join("sokoban")).unwrap();
    assert_eq!(sokoban.len(), 4);
    let (_, push) = read_wav(&dir.path().join("sokoban/sfx_push.wav"));
    assert_eq!(push.len(), sample_count(0.4, SAMPLE_RATE));

    let loop_dir = dir.path().join("loop_connect");
    let pipes = audio::generate_bundle("loop_connect", &loop_dir).unwrap();
    assert_eq!(pipes.len(), 3);
    let (_, rotate) = read_wav(&loop_dir.join("sfx_rotate.wav"));
    assert_eq!(rotate.len(), sample_count(0.15, SAMPLE_RATE));
    // Normalized to half scale, below the 0.98 limit
    let peak = rotate.iter().map(|s| s.unsigned_abs()).max().unwrap();
    assert!(peak.abs_diff((0.5 * i16::MAX as f32) as u16) <= 1, "peak {peak}");

    for game in ["flappy_bird", "money_grabber", "sample_ai_game"] {
        let written = audio::generate_bundle(game, &dir.path().join(game)).unwrap();
        assert!(!written.is_empty());
    }
    assert!(dir.path().join("money_grabber/sfx_collect_high.wav").exists());

    assert!(matches!(
        audio::generate_bundle("pong", dir.path()),
        Err(AudioError::UnknownBundle(_))
    ));
}

#[test]
fn test_sounds_are_reproducible() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    audio::generate_sounds(&["explosion"], a.path()).unwrap();
    audio::generate_sounds(&["explosion"], b.path()).unwrap();

    let bytes_a = fs::read(a.path().join("sfx_explosion.wav")).unwrap();
    let bytes_b = fs::read(b.path().join("sfx_explosion.wav")).unwrap();
    assert_eq!(bytes_a, bytes_b);
}

// ============================================================================
// Pages
// ============================================================================

const BASE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<link id="-gd-engine-icon" rel="icon" type="image/png" href="index.icon.png" />
<link rel="apple-touch-icon" href="index.apple-touch-icon.png"/>
</head>
<body>
<script src="index.js"></script>
<script>
const GODOT_CONFIG = {"executable":"index","mainPack":"index.pck"};
</script>
</body>
</html>
"#;

fn add_game(games_dir: &Path, id: &str) -> std::path::PathBuf {
    let dir = games_dir.join(id);
    fs::create_dir_all(dir.join("assets")).unwrap();
    fs::write(dir.join("main.tscn"), "[gd_scene format=3]").unwrap();
    dir
}

#[test]
fn test_generate_pages_end_to_end() {
    let root = tempdir().unwrap();
    let games_dir = root.path().join("games");
    let build_dir = root.path().join("builds/web");
    fs::create_dir_all(&build_dir).unwrap();
    fs::write(build_dir.join("index.html"), BASE_HTML).unwrap();

    let sokoban = add_game(&games_dir, "micro_sokoban");
    fs::write(
        sokoban.join("metadata.json"),
        r#"{
            "title": "Micro Sokoban",
            "description": "Push the crate & escape!",
            "og_image": "assets/og_image.png"
        }"#,
    )
    .unwrap();
    fs::write(sokoban.join("assets/og_image.png"), b"fake image").unwrap();
    add_game(&games_dir, "loop_connect");
    fs::create_dir_all(games_dir.join("_shared")).unwrap();

    let config = PagesConfig {
        base_url: "https://example.org/play/".to_string(),
        games_dir,
        build_dir: build_dir.clone(),
        site_name: "Microgames".to_string(),
    };
    let report = pages::generate_pages(&config).unwrap();

    assert_eq!(report.generated, ["loop_connect", "micro_sokoban"]);
    assert_eq!(report.missing_images, ["loop_connect"]);

    let sokoban_page = fs::read_to_string(build_dir.join("micro_sokoban/index.html")).unwrap();
    assert!(sokoban_page.contains("<title>Micro Sokoban - Microgames</title>"));
    assert!(sokoban_page.contains("Push the crate &amp; escape!"));
    assert!(
        sokoban_page.contains(r#"content="https://example.org/play/micro_sokoban/og_image.png""#)
    );
    assert!(sokoban_page.contains("url.searchParams.set('game', 'micro_sokoban');"));
    assert!(sokoban_page.contains(r#"<script src="../index.js"></script>"#));
    assert!(sokoban_page.contains(r#""mainPack":"../index.pck""#));
    assert!(!sokoban_page.contains("../../"));
    assert_eq!(
        fs::read(build_dir.join("micro_sokoban/og_image.png")).unwrap(),
        b"fake image"
    );

    let loop_page = fs::read_to_string(build_dir.join("loop_connect/index.html")).unwrap();
    assert!(loop_page.contains("<title>Loop Connect - Microgames</title>"));
    assert!(loop_page.contains(r#"content="https://example.org/play/og_image.png""#));
    assert!(!build_dir.join("loop_connect/og_image.png").exists());

    // The shared page is left alone
    assert_eq!(fs::read_to_string(build_dir.join("index.html")).unwrap(), BASE_HTML);
}

#[test]
fn test_generate_pages_no_games() {
    let root = tempdir().unwrap();
    let config = PagesConfig {
        games_dir: root.path().join("games"),
        build_dir: root.path().to_path_buf(),
        ..PagesConfig::default()
    };
    fs::create_dir_all(&config.games_dir).unwrap();
    fs::write(config.build_dir.join("index.html"), BASE_HTML).unwrap();

    let report = pages::generate_pages(&config).unwrap();
    assert!(report.generated.is_empty());
    assert!(report.missing_images.is_empty());
}
