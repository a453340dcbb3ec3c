//! Texture loading
//!
//! Every entity is built with an opaque texture handle. Decoding happens
//! once at startup; a missing or unreadable image is fatal to the caller.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sprite sheet for the player (2 rows x 10 columns)
pub const WHALE_FILE: &str = "whale.png";
pub const FLOOR_FILE: &str = "floor.png";
pub const CEILING_FILE: &str = "ceiling.png";
pub const LEFT_WALL_FILE: &str = "leftwall.png";
pub const RIGHT_WALL_FILE: &str = "rightwall.png";
pub const BACKGROUND_FILE: &str = "background.png";
pub const MIDGROUND_FILE: &str = "midground.png";
pub const FOOD_FILE: &str = "krill.png";
pub const AIR_FILE: &str = "air.png";
pub const WIN_FILE: &str = "win.png";
pub const LOSE_FILE: &str = "lose.png";
pub const FIRE_FILE: &str = "fire.png";
pub const ESCAPE_FILE: &str = "escape.png";

/// Failure to turn an image file into a texture
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("unable to load image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Opaque texture reference, valid for the whole process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

/// Hands out texture ids in load order
#[derive(Debug)]
pub struct TextureLoader {
    next_id: u32,
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl TextureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an image file and register it under a fresh handle
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<TextureHandle, AssetError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;

        let handle = TextureHandle {
            id: self.next_id,
            width: image.width(),
            height: image.height(),
        };
        self.next_id += 1;

        log::debug!(
            "Loaded texture {} ({}x{}) as #{}",
            path.display(),
            handle.width,
            handle.height,
            handle.id
        );
        Ok(handle)
    }
}

/// All textures the arena needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Textures {
    pub whale: TextureHandle,
    pub floor: TextureHandle,
    pub ceiling: TextureHandle,
    pub left_wall: TextureHandle,
    pub right_wall: TextureHandle,
    pub background: TextureHandle,
    pub midground: TextureHandle,
    pub food: TextureHandle,
    pub air: TextureHandle,
    pub win: TextureHandle,
    pub lose: TextureHandle,
    pub fire: TextureHandle,
    pub escape: TextureHandle,
}

impl Textures {
    /// Load every texture from `dir`, stopping at the first failure
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let mut loader = TextureLoader::new();
        let mut load = |file: &str| loader.load(dir.join(file));

        let textures = Self {
            whale: load(WHALE_FILE)?,
            floor: load(FLOOR_FILE)?,
            ceiling: load(CEILING_FILE)?,
            left_wall: load(LEFT_WALL_FILE)?,
            right_wall: load(RIGHT_WALL_FILE)?,
            background: load(BACKGROUND_FILE)?,
            midground: load(MIDGROUND_FILE)?,
            food: load(FOOD_FILE)?,
            air: load(AIR_FILE)?,
            win: load(WIN_FILE)?,
            lose: load(LOSE_FILE)?,
            fire: load(FIRE_FILE)?,
            escape: load(ESCAPE_FILE)?,
        };

        log::info!("Loaded textures from {}", dir.display());
        Ok(textures)
    }

    /// Every slot bound to one placeholder handle (headless runs, tests)
    pub fn blank() -> Self {
        let handle = TextureHandle {
            id: 0,
            width: 1,
            height: 1,
        };
        Self {
            whale: handle,
            floor: handle,
            ceiling: handle,
            left_wall: handle,
            right_wall: handle,
            background: handle,
            midground: handle,
            food: handle,
            air: handle,
            win: handle,
            lose: handle,
            fire: handle,
            escape: handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_FILES: [&str; 13] = [
        WHALE_FILE,
        FLOOR_FILE,
        CEILING_FILE,
        LEFT_WALL_FILE,
        RIGHT_WALL_FILE,
        BACKGROUND_FILE,
        MIDGROUND_FILE,
        FOOD_FILE,
        AIR_FILE,
        WIN_FILE,
        LOSE_FILE,
        FIRE_FILE,
        ESCAPE_FILE,
    ];

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbaImage::new(width, height).save(path).unwrap();
    }

    #[test]
    fn test_load_texture_reports_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        write_png(&path, 20, 4);

        let mut loader = TextureLoader::new();
        let first = loader.load(&path).unwrap();
        let second = loader.load(&path).unwrap();

        assert_eq!((first.width, first.height), (20, 4));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = TextureLoader::new();
        let err = loader.load(dir.path().join("nope.png")).unwrap_err();
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn test_load_all_textures() {
        let dir = tempfile::tempdir().unwrap();
        for file in ALL_FILES {
            write_png(&dir.path().join(file), 2, 2);
        }

        let textures = Textures::load(dir.path()).unwrap();
        assert_ne!(textures.whale.id, textures.escape.id);
    }

    #[test]
    fn test_load_stops_at_first_missing_texture() {
        let dir = tempfile::tempdir().unwrap();
        for file in ALL_FILES.iter().filter(|f| **f != FIRE_FILE) {
            write_png(&dir.path().join(file), 2, 2);
        }

        let err = Textures::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(FIRE_FILE));
    }
}
