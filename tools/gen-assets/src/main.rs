//! Unified asset generator for the microgames collection
//!
//! Generates the offline assets the games ship with:
//! - Sprites (PNG, via the built-in encoder)
//! - Sound effects (16-bit mono WAV)
//! - Per-game landing pages for the web build (HTML with OG/Twitter tags)
//!
//! ## Output Layout
//!
//! - `games/{game}/assets/{sprite}.png` - Sprite sets
//! - `shared/assets/sfx_{name}.wav` - Shared sound library and announcer cues
//! - `games/{game}/assets/sfx_{name}.wav` - Per-game sounds
//! - `builds/web/{game}/index.html` - Landing pages

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use microgen::audio;
use microgen::pages::{self, PagesConfig};
use microgen::png::{IDAT, IEND, IHDR, chunk_types};
use microgen::sprite::{self, SpriteGame};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gen-assets")]
#[command(about = "Generate procedural assets for the microgames collection")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sprite sets (micro_sokoban tiles, loop_connect pipes)
    Sprites {
        /// Only this game (default: every game with a sprite set)
        #[arg(short, long)]
        game: Option<SpriteGame>,

        /// Output directory (default: games/GAME/assets); with several games,
        /// each set goes in its own DIR/GAME subdirectory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate sound effects
    Sounds {
        /// Generate the whole shared library and announcer cues
        #[arg(long)]
        all: bool,

        /// Game name (e.g. "flappy_bird"); alone, writes that game's sound bundle
        #[arg(short, long)]
        game: Option<String>,

        /// Library sounds to generate for --game (e.g. jump hit win)
        #[arg(short, long, num_args = 1.., requires = "game")]
        sounds: Vec<String>,

        /// Output directory (default: shared/assets or games/GAME/assets)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate per-game landing pages for the web build
    Pages {
        /// Base URL of the deployed site
        #[arg(long, env = "BASE_URL", default_value = pages::DEFAULT_BASE_URL)]
        base_url: String,

        /// Directory containing games
        #[arg(long, env = "GAMES_DIR", default_value = pages::DEFAULT_GAMES_DIR)]
        games_dir: PathBuf,

        /// Web build output directory
        #[arg(long, env = "BUILD_DIR", default_value = pages::DEFAULT_BUILD_DIR)]
        build_dir: PathBuf,

        /// Site name for meta tags
        #[arg(long, env = "SITE_NAME", default_value = pages::DEFAULT_SITE_NAME)]
        site_name: String,
    },

    /// Generate all sprites and sounds
    All {
        /// Project root
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sprites { game, output } => {
            let games = match game {
                Some(game) => vec![game],
                None => SpriteGame::ALL.to_vec(),
            };
            let single = games.len() == 1;
            for game in games {
                let dir = sprite_output_dir(output.as_deref(), game, single);
                generate_sprites(game, &dir)?;
            }
        }
        Commands::Sounds {
            all,
            game,
            sounds,
            output,
        } => generate_sounds(all, game.as_deref(), &sounds, output)?,
        Commands::Pages {
            base_url,
            games_dir,
            build_dir,
            site_name,
        } => {
            let config = PagesConfig {
                base_url,
                games_dir,
                build_dir,
                site_name,
            };
            let report =
                pages::generate_pages(&config).context("Failed to generate game pages")?;
            if !report.missing_images.is_empty() {
                tracing::warn!(
                    "{} games will use the default OG image",
                    report.missing_images.len()
                );
            }
        }
        Commands::All { output } => {
            tracing::info!("=== Generating ALL Assets ===");

            for game in SpriteGame::ALL {
                generate_sprites(game, &game_assets(&output, game.id()))?;
            }

            let shared = output.join("shared").join("assets");
            audio::generate_all(&shared)
                .with_context(|| format!("Failed to generate sounds in {}", shared.display()))?;

            for bundle in audio::BUNDLES {
                let dir = game_assets(&output, bundle.game);
                audio::generate_bundle(bundle.game, &dir)
                    .with_context(|| format!("Failed to generate {} sounds", bundle.game))?;
            }

            tracing::info!("=== All assets generated successfully ===");
        }
    }

    Ok(())
}

fn game_assets(root: &Path, game: &str) -> PathBuf {
    root.join("games").join(game).join("assets")
}

/// Sprite set destination. A shared `-o` gets one subdirectory per game.
fn sprite_output_dir(output: Option<&Path>, game: SpriteGame, single: bool) -> PathBuf {
    match output {
        Some(dir) if single => dir.to_path_buf(),
        Some(dir) => dir.join(game.id()),
        None => game_assets(Path::new("."), game.id()),
    }
}

fn generate_sprites(game: SpriteGame, dir: &Path) -> Result<()> {
    tracing::info!("Generating {} sprites -> {}", game.id(), dir.display());
    let written = sprite::generate_sprites(game, dir)
        .with_context(|| format!("Failed to generate {} sprites", game.id()))?;
    for path in &written {
        let chunks = verify_png(path)?;
        tracing::info!("  {}: {}", path.display(), chunks.join(" "));
    }
    tracing::info!("Generated {} sprites", written.len());
    Ok(())
}

/// Read a written PNG back and check its chunk sequence
fn verify_png(path: &Path) -> Result<Vec<String>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read back {}", path.display()))?;
    let chunks = chunk_types(&bytes)
        .with_context(|| format!("Malformed PNG written to {}", path.display()))?;
    ensure!(
        chunks == [IHDR, IDAT, IEND].map(|t| String::from_utf8_lossy(&t).into_owned()),
        "Unexpected chunks in {}: {}",
        path.display(),
        chunks.join(" ")
    );
    Ok(chunks)
}

fn generate_sounds(
    all: bool,
    game: Option<&str>,
    sounds: &[String],
    output: Option<PathBuf>,
) -> Result<()> {
    let written = match game {
        Some(game) if !all => {
            let dir = output.unwrap_or_else(|| game_assets(Path::new("."), game));
            if sounds.is_empty() {
                audio::generate_bundle(game, &dir)
                    .with_context(|| format!("Failed to generate sounds for {game}"))?
            } else {
                tracing::info!(
                    "Generating {} sounds for {game} -> {}",
                    sounds.len(),
                    dir.display()
                );
                audio::generate_sounds(sounds, &dir)
                    .with_context(|| format!("Failed to generate sounds for {game}"))?
            }
        }
        _ => {
            let dir = output.unwrap_or_else(|| PathBuf::from("shared").join("assets"));
            audio::generate_all(&dir)
                .with_context(|| format!("Failed to generate sounds in {}", dir.display()))?
        }
    };

    tracing::info!("Generated {} sounds", written.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sprite_output_dir() {
        let out = Path::new("out");
        assert_eq!(
            sprite_output_dir(Some(out), SpriteGame::LoopConnect, true),
            PathBuf::from("out")
        );
        assert_eq!(
            sprite_output_dir(Some(out), SpriteGame::LoopConnect, false),
            PathBuf::from("out/loop_connect")
        );
        assert_eq!(
            sprite_output_dir(None, SpriteGame::MicroSokoban, false),
            PathBuf::from("./games/micro_sokoban/assets")
        );
    }

    #[test]
    fn test_every_game_gets_its_own_dir() {
        let temp = TempDir::new().unwrap();
        for game in SpriteGame::ALL {
            generate_sprites(game, &sprite_output_dir(Some(temp.path()), game, false)).unwrap();
        }
        assert!(temp.path().join("micro_sokoban/floor.png").exists());
        assert_eq!(std::fs::read_dir(temp.path().join("loop_connect")).unwrap().count(), 5);
    }

    #[test]
    fn test_verify_png() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good.png");
        microgen::png::write_png(&good, 2, 2, &[[1, 2, 3, 255]; 4]).unwrap();
        assert_eq!(verify_png(&good).unwrap(), ["IHDR", "IDAT", "IEND"]);

        let bad = temp.path().join("bad.png");
        std::fs::write(&bad, b"not a png").unwrap();
        assert!(verify_png(&bad).is_err());
        assert!(verify_png(&temp.path().join("missing.png")).is_err());
    }
}
