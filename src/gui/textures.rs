use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use image::{DynamicImage, GenericImageView};

use super::skybox::SkyFace;
use crate::error::TextureError;
use crate::model::BodyID;

/// What a texture is going to be put on once it shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    Body(BodyID),
    Sky(SkyFace),
}

/// A decoded image, already in the RGBA8 layout the GPU upload accepts.
pub struct LoadedTexture {
    pub path: PathBuf,
    pub image: DynamicImage,
    pub dimensions: (u32, u32),
}

impl fmt::Debug for LoadedTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedTexture")
            .field("path", &self.path)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

#[derive(Debug)]
pub struct TextureOutcome {
    pub target: TextureTarget,
    pub result: Result<LoadedTexture, TextureError>,
}

/// Loads textures on background threads. Nothing waits on a load: meshes are
/// drawn without a texture until [`drain`](Self::drain) hands the result back
/// on the main thread.
pub struct TextureLoader {
    sender: Sender<TextureOutcome>,
    receiver: Receiver<TextureOutcome>,
    pending: usize,
}

impl TextureLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        TextureLoader {
            sender,
            receiver,
            pending: 0,
        }
    }

    pub fn request(&mut self, target: TextureTarget, path: PathBuf) {
        tracing::debug!("Requesting texture {} for {:?}", path.display(), target);
        self.pending += 1;

        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let result = load_texture(&path);
            // The loader may be gone by the time we finish; that's fine
            let _ = sender.send(TextureOutcome { target, result });
        });
    }

    /// Collects everything that finished since the last call. Never blocks.
    pub fn drain(&mut self) -> Vec<TextureOutcome> {
        let outcomes: Vec<_> = self.receiver.try_iter().collect();
        self.pending -= outcomes.len();
        outcomes
    }

    /// Number of requests that haven't been drained yet.
    pub fn pending(&self) -> usize {
        self.pending
    }
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_texture(path: &Path) -> Result<LoadedTexture, TextureError> {
    let bytes = std::fs::read(path).map_err(|source| TextureError::Read {
        path: path.to_owned(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
        path: path.to_owned(),
        source,
    })?;

    // Grayscale, 16-bit and LumaA images can't be uploaded as they are
    let image = DynamicImage::ImageRgba8(image.to_rgba8());
    Ok(LoadedTexture {
        path: path.to_owned(),
        dimensions: image.dimensions(),
        image,
    })
}
