//! Sprite sets for individual microgames
//!
//! Naming convention: each entry `{id}` is written as `{id}.png` into the
//! game's asset directory.

use super::{Palette, Rgba, Sprite, SpriteError};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Micro Sokoban tiles are drawn at 16x16 and shipped at 64x64
const SOKOBAN_SCALE: u32 = 4;

/// Loop Connect pipe canvas
const PIPE_SIZE: u32 = 32;
const PIPE_CENTER: i32 = (PIPE_SIZE / 2) as i32;
const PIPE_LINE_WIDTH: i32 = 8;
const JUNCTION_RADIUS: i32 = 3;
const TERMINAL_RADIUS: i32 = 8;
const PIPE_COLOR: Rgba = [0, 0, 0, 255];

/// Games with a generated sprite set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteGame {
    MicroSokoban,
    LoopConnect,
}

impl SpriteGame {
    pub const ALL: [SpriteGame; 2] = [SpriteGame::MicroSokoban, SpriteGame::LoopConnect];

    /// Directory name under `games/`
    pub fn id(self) -> &'static str {
        match self {
            SpriteGame::MicroSokoban => "micro_sokoban",
            SpriteGame::LoopConnect => "loop_connect",
        }
    }

    /// Build every sprite for this game, paired with its file stem
    pub fn sprites(self) -> Result<Vec<(&'static str, Sprite)>, SpriteError> {
        match self {
            SpriteGame::MicroSokoban => sokoban_sprites(),
            SpriteGame::LoopConnect => Ok(pipe_sprites()),
        }
    }
}

impl FromStr for SpriteGame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpriteGame::ALL
            .into_iter()
            .find(|game| game.id() == s)
            .ok_or_else(|| format!("no sprite set for game '{s}'"))
    }
}

/// Write every sprite of `game` into `output_dir` (created if missing).
///
/// Returns the written paths in catalogue order.
pub fn generate_sprites(game: SpriteGame, output_dir: &Path) -> Result<Vec<PathBuf>, SpriteError> {
    std::fs::create_dir_all(output_dir)?;

    let sprites = game.sprites()?;
    let mut written = Vec::with_capacity(sprites.len());
    for (id, sprite) in sprites {
        let path = output_dir.join(format!("{id}.png"));
        sprite.write_png(&path)?;
        tracing::info!(
            "  -> {} ({}x{})",
            path.display(),
            sprite.width(),
            sprite.height()
        );
        written.push(path);
    }

    Ok(written)
}

// ============================================================================
// MICRO SOKOBAN
// ============================================================================

/// Grated metal floor
const FLOOR_ART: &str = "
D D D K D D D K D D D K D D D K
D D D K D D D K D D D K D D D K
D D D K D D D K D D D K D D D K
K K K K K K K K K K K K K K K K
D D D K D D D K D D D K D D D K
D D D K D D D K D D D K D D D K
D D D K D D D K D D D K D D D K
K K K K K K K K K K K K K K K K
D D D K D D D K D D D K D D D K
D D D K D D D K D D D K D D D K
D D D K D D D K D D D K D D D K
K K K K K K K K K K K K K K K K
D D D K D D D K D D D K D D D K
D D D K D D D K D D D K D D D K
D D D K D D D K D D D K D D D K
K K K K K K K K K K K K K K K K
";

/// Metal plate with a hazard-striped top edge
const WALL_ART: &str = "
K Y Y K Y Y K Y Y K Y Y K Y Y K
Y Y K Y Y K Y Y K Y Y K Y Y K Y
K K K K K K K K K K K K K K K K
G G G G G G K K G G G G G G G G
G G G G G G K K G G G G G G G G
G G G G G G G G G G G G G G G G
G K G G G G G G G G G G G K G G
G K G G G G G G G G G G G K G G
G G G G G G G G G G G G G G G G
G G G G G G G G G G G G G G G G
G G G G G G G G G G G G G G G G
G G G G G G G G G G G G G G G G
G K G G G G G G G G G G G K G G
G K G G G G G G G G G G G K G G
G G G G G G G G G G G G G G G G
K K K K K K K K K K K K K K K K
";

/// Containment zone: neon outline with corner markers
const TARGET_ART: &str = "
N N N N N N N N N N N N N N N N
N . . . . . . . . . . . . . . N
N . . . . . . . . . . . . . . N
N . . N N . . . . . . N N . . N
N . . N N . . . . . . N N . . N
N . . . . . . . . . . . . . . N
N . . . . . . . . . . . . . . N
N . . . . . . . . . . . . . . N
N . . . . . . . . . . . . . . N
N . . . . . . . . . . . . . . N
N . . . . . . . . . . . . . . N
N . . N N . . . . . . N N . . N
N . . N N . . . . . . N N . . N
N . . . . . . . . . . . . . . N
N . . . . . . . . . . . . . . N
N N N N N N N N N N N N N N N N
";

/// Radioactive core crate
const BOX_ART: &str = "
K K K K K K K K K K K K K K K K
K G G G G G G G G G G G G G G K
K G N N N N N N N N N N N N G K
K G N W N N N N N N N N N N G K
K G N N N N K K K K N N N N G K
K G N N N K N N N N K N N N G K
K G N N N K N N N N K N N N G K
K G N N N K N N N N K N N N G K
K G N N N N K K K K N N N N G K
K G N N N K N N N N K N N N G K
K G N N N K N N N N K N N N G K
K G N N N K N N N N K N N N G K
K G N N N N K K K K N N N N G K
K G N N N N N N N N N N N N G K
K G G G G G G G G G G G G G G K
K K K K K K K K K K K K K K K K
";

/// Hazmat bot
const PLAYER_ART: &str = "
. . . . . K K K K K K . . . . .
. . . . K Y Y Y Y Y Y K . . . .
. . . . K Y Y Y Y Y Y K . . . .
. . . . K K K K K K K K . . . .
. . . . K N N N N N N K . . . .
. . . . K N N W W N N K . . . .
. . . . K K K K K K K K . . . .
. . K K K Y Y Y Y Y Y K K K . .
. . K Y Y Y Y Y Y Y Y Y Y K . .
. . K Y Y Y K K K K Y Y Y K . .
. . K Y Y Y K Y Y K Y Y Y K . .
. . K Y Y Y K Y Y K Y Y Y K . .
. . K K K K K Y Y K K K K K . .
. . K D D K K K K K K D D K . .
. . K D D K . . . . K D D K . .
. . K K K K . . . . K K K K . .
";

const SOKOBAN_ART: &[(&str, &str)] = &[
    ("floor", FLOOR_ART),
    ("wall", WALL_ART),
    ("target", TARGET_ART),
    ("box", BOX_ART),
    ("player", PLAYER_ART),
];

/// Micro Sokoban tiles, 64x64 each
pub fn sokoban_sprites() -> Result<Vec<(&'static str, Sprite)>, SpriteError> {
    let palette = Palette::hazard();
    SOKOBAN_ART
        .iter()
        .map(|&(id, art)| {
            let sprite = Sprite::from_ascii(art, &palette)?.upscale(SOKOBAN_SCALE)?;
            Ok((id, sprite))
        })
        .collect()
}

// ============================================================================
// LOOP CONNECT
// ============================================================================

fn pipe_canvas() -> Sprite {
    Sprite::new(PIPE_SIZE, PIPE_SIZE)
}

/// West-east straight pipe
fn pipe_straight() -> Sprite {
    let mut img = pipe_canvas();
    img.thick_hline(0, PIPE_SIZE as i32, PIPE_CENTER, PIPE_LINE_WIDTH, PIPE_COLOR);
    img
}

/// South-east bend with a rounded joint
fn pipe_l_bend() -> Sprite {
    let mut img = pipe_canvas();
    let end = PIPE_SIZE as i32;
    img.thick_vline(PIPE_CENTER, PIPE_CENTER, end, PIPE_LINE_WIDTH, PIPE_COLOR);
    img.thick_hline(PIPE_CENTER, end, PIPE_CENTER, PIPE_LINE_WIDTH, PIPE_COLOR);
    img.fill_circle(PIPE_CENTER, PIPE_CENTER, PIPE_LINE_WIDTH / 2, PIPE_COLOR);
    img
}

/// West, north and east connections
fn pipe_t_junction() -> Sprite {
    let mut img = pipe_canvas();
    img.thick_hline(0, PIPE_SIZE as i32, PIPE_CENTER, PIPE_LINE_WIDTH, PIPE_COLOR);
    img.thick_vline(PIPE_CENTER, 0, PIPE_CENTER, PIPE_LINE_WIDTH, PIPE_COLOR);
    img.fill_circle(PIPE_CENTER, PIPE_CENTER, JUNCTION_RADIUS, PIPE_COLOR);
    img
}

/// Four-way cross
fn pipe_cross() -> Sprite {
    let mut img = pipe_canvas();
    let end = PIPE_SIZE as i32;
    img.thick_hline(0, end, PIPE_CENTER, PIPE_LINE_WIDTH, PIPE_COLOR);
    img.thick_vline(PIPE_CENTER, 0, end, PIPE_LINE_WIDTH, PIPE_COLOR);
    img.fill_circle(PIPE_CENTER, PIPE_CENTER, JUNCTION_RADIUS, PIPE_COLOR);
    img
}

/// Large endpoint disc with a stub to the north edge
fn pipe_terminal() -> Sprite {
    let mut img = pipe_canvas();
    img.thick_vline(PIPE_CENTER, 0, PIPE_CENTER, PIPE_LINE_WIDTH, PIPE_COLOR);
    img.fill_circle(PIPE_CENTER, PIPE_CENTER, TERMINAL_RADIUS, PIPE_COLOR);
    img
}

/// Loop Connect pipe pieces, 32x32 black on transparent
pub fn pipe_sprites() -> Vec<(&'static str, Sprite)> {
    vec![
        ("pipe_straight", pipe_straight()),
        ("pipe_l_bend", pipe_l_bend()),
        ("pipe_t_junction", pipe_t_junction()),
        ("pipe_cross", pipe_cross()),
        ("pipe_terminal", pipe_terminal()),
    ]
}
