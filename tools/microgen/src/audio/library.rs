//! Named sound registry and batch generation
//!
//! The shared library covers the generic arcade sounds every microgame can
//! ask for by name. Bundles map a game's own file names onto presets.

use super::{
    AudioBuffer, AudioError, PEAK_LIMIT, announcer, arcade, export, loop_connect, presets, sokoban,
};
use std::fs;
use std::path::{Path, PathBuf};

/// A named sound in the shared library
#[derive(Debug, Clone, Copy)]
pub struct SoundDef {
    /// Name used on the command line, written as `sfx_<id>.wav`
    pub id: &'static str,
    /// Short human readable description
    pub description: &'static str,
    /// Renders the sound
    pub generate: fn() -> AudioBuffer,
}

/// Shared sound library
pub const LIBRARY: &[SoundDef] = &[
    SoundDef {
        id: "jump",
        description: "Rising chirp with a puff of air",
        generate: presets::jump,
    },
    SoundDef {
        id: "collect_low",
        description: "Coin pickup, low tier",
        generate: presets::collect_low,
    },
    SoundDef {
        id: "collect_mid",
        description: "Coin pickup, mid tier",
        generate: presets::collect_mid,
    },
    SoundDef {
        id: "collect_high",
        description: "Coin pickup, high tier",
        generate: presets::collect_high,
    },
    SoundDef {
        id: "hit",
        description: "Impact thud",
        generate: presets::hit,
    },
    SoundDef {
        id: "win",
        description: "Major arpeggio fanfare",
        generate: presets::win,
    },
    SoundDef {
        id: "lose",
        description: "Descending minor phrase",
        generate: presets::lose,
    },
    SoundDef {
        id: "move",
        description: "Short UI tick",
        generate: presets::step,
    },
    SoundDef {
        id: "pass",
        description: "Two-tone success blip",
        generate: presets::pass,
    },
    SoundDef {
        id: "countdown",
        description: "Countdown beep",
        generate: presets::countdown,
    },
    SoundDef {
        id: "shoot",
        description: "Laser zap",
        generate: presets::shoot,
    },
    SoundDef {
        id: "explosion",
        description: "Noise burst with low rumble",
        generate: presets::explosion,
    },
    SoundDef {
        id: "button",
        description: "UI click",
        generate: presets::button,
    },
];

/// Announcer cues written alongside the library by [`generate_all`]
const ANNOUNCER: &[(&str, fn() -> AudioBuffer)] = &[
    ("sfx_game_start", announcer::game_start),
    ("sfx_game_over", announcer::game_over),
];

/// Alternative names accepted by [`lookup`]
const ALIASES: &[(&str, &str)] = &[("flap", "jump")];

/// Per-game sound set: output file stem and the sound written under it
#[derive(Debug, Clone, Copy)]
pub struct GameBundle {
    pub game: &'static str,
    pub sounds: &'static [(&'static str, fn() -> AudioBuffer)],
}

/// Game bundles
pub const BUNDLES: &[GameBundle] = &[
    GameBundle {
        game: "minesweeper",
        sounds: &[
            ("sfx_reveal", presets::button),
            ("sfx_goal", presets::collect_mid),
            ("sfx_explode", presets::explosion),
        ],
    },
    GameBundle {
        game: "micro_sokoban",
        sounds: &[
            ("sfx_move", sokoban::servo_move),
            ("sfx_push", sokoban::push),
            ("sfx_win", sokoban::airlock_win),
            ("sfx_lose", sokoban::alarm_lose),
        ],
    },
    GameBundle {
        game: "loop_connect",
        sounds: &[
            ("sfx_rotate", loop_connect::rotate),
            ("sfx_win", loop_connect::win),
            ("sfx_lose", loop_connect::lose),
        ],
    },
    GameBundle {
        game: "flappy_bird",
        sounds: &[("sfx_flap", arcade::flap), ("sfx_pass", arcade::pipe_pass)],
    },
    GameBundle {
        game: "money_grabber",
        sounds: &[
            ("sfx_collect_low", arcade::coin_low),
            ("sfx_collect_mid", arcade::coin_mid),
            ("sfx_collect_high", arcade::coin_high),
        ],
    },
    GameBundle {
        game: "sample_ai_game",
        sounds: &[("sfx_hit", arcade::punch)],
    },
];

/// Look up a library sound by name or alias
pub fn lookup(name: &str) -> Option<&'static SoundDef> {
    let id = ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, target)| *target);
    LIBRARY.iter().find(|def| def.id == id)
}

/// Look up a game bundle by game id
pub fn find_bundle(game: &str) -> Option<&'static GameBundle> {
    BUNDLES.iter().find(|bundle| bundle.game == game)
}

/// Peak-limit a buffer and write it to `dir/<stem>.wav`
///
/// Returns the written path.
pub fn write_sound(dir: &Path, stem: &str, buffer: &AudioBuffer) -> Result<PathBuf, AudioError> {
    let mut limited = buffer.clone();
    export::peak_limit(&mut limited.samples, PEAK_LIMIT);

    let path = dir.join(format!("{stem}.wav"));
    export::write_wav(&limited, &path)?;

    tracing::info!(
        "{stem}.wav ({:.2}s, {} samples)",
        limited.duration(),
        limited.len()
    );
    Ok(path)
}

/// Generate one library sound by name into `dir` as `sfx_<name>.wav`
pub fn generate_sound(name: &str, dir: &Path) -> Result<PathBuf, AudioError> {
    let def = lookup(name).ok_or_else(|| AudioError::UnknownSound(name.to_string()))?;
    fs::create_dir_all(dir)?;
    write_sound(dir, &format!("sfx_{name}"), &(def.generate)())
}

/// Generate the named library sounds into `dir`
///
/// Unknown names are logged and skipped; any other failure aborts.
pub fn generate_sounds<S: AsRef<str>>(
    names: &[S],
    dir: &Path,
) -> Result<Vec<PathBuf>, AudioError> {
    let mut written = Vec::with_capacity(names.len());
    for name in names {
        match generate_sound(name.as_ref(), dir) {
            Ok(path) => written.push(path),
            Err(AudioError::UnknownSound(name)) => {
                tracing::warn!("Unknown sound type: {name}");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}

/// Generate the whole library plus announcer cues into `dir`
pub fn generate_all(dir: &Path) -> Result<Vec<PathBuf>, AudioError> {
    fs::create_dir_all(dir)?;
    tracing::info!("Generating shared sound library -> {}", dir.display());

    let mut written = Vec::with_capacity(LIBRARY.len() + ANNOUNCER.len());
    for def in LIBRARY {
        written.push(write_sound(dir, &format!("sfx_{}", def.id), &(def.generate)())?);
    }
    for (stem, generate) in ANNOUNCER {
        written.push(write_sound(dir, stem, &generate())?);
    }
    Ok(written)
}

/// Generate a game's bundle into `dir`
pub fn generate_bundle(game: &str, dir: &Path) -> Result<Vec<PathBuf>, AudioError> {
    let bundle = find_bundle(game).ok_or_else(|| AudioError::UnknownBundle(game.to_string()))?;
    fs::create_dir_all(dir)?;
    tracing::info!(
        "Generating {} sounds for {game} -> {}",
        bundle.sounds.len(),
        dir.display()
    );

    bundle
        .sounds
        .iter()
        .map(|(stem, generate)| write_sound(dir, stem, &generate()))
        .collect()
}
