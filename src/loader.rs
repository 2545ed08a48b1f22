use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{LandingError, Result};

/// How a fetched bitmap is prepared before upload.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadOptions {
    /// Flatten every opaque pixel to white, keeping alpha (used for the logo).
    pub silhouette: bool,
}

/// Outcome of one non-blocking [`ImageLoader::poll`].
pub enum LoadPoll {
    Pending,
    Ready(Texture2D),
    Failed,
}

/// Fetches one image file on a background thread; the render thread decodes and uploads it.
///
/// The fetch is fire-and-forget: dropping the loader only drops the receiving
/// end, and a late result from the worker is discarded.
pub struct ImageLoader {
    path: PathBuf,
    options: LoadOptions,
    receiver: Receiver<Result<Vec<u8>>>,
}

impl ImageLoader {
    pub fn spawn(path: impl Into<PathBuf>, options: LoadOptions) -> Self {
        let path = path.into();
        let (sender, receiver) = mpsc::channel();
        let worker_path = path.clone();
        thread::spawn(move || {
            let bytes = fs::read(&worker_path).map_err(|source| LandingError::Io {
                path: worker_path.clone(),
                source,
            });
            // The loader may be gone already
            let _ = sender.send(bytes);
        });
        debug!(path = ?path, "image fetch started");
        Self { path, options, receiver }
    }

    pub fn poll(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> LoadPoll {
        let fetched = match self.receiver.try_recv() {
            Ok(fetched) => fetched,
            Err(TryRecvError::Empty) => return LoadPoll::Pending,
            Err(TryRecvError::Disconnected) => {
                warn!(path = ?self.path, "image fetch worker vanished");
                return LoadPoll::Failed;
            }
        };

        match fetched.and_then(|bytes| texture_from_bytes(rl, thread, &self.path, &bytes, self.options)) {
            Ok(texture) => {
                info!(path = ?self.path, width = texture.width(), height = texture.height(), "image ready");
                LoadPoll::Ready(texture)
            }
            Err(e) => {
                warn!("{}", e);
                LoadPoll::Failed
            }
        }
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png")
        .to_lowercase()
}

/// EXIF orientation tag of a JPEG, 1 (upright) when absent or unreadable.
pub fn exif_orientation(bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) => values.first().copied().unwrap_or(1),
            _ => 1,
        },
        Err(e) => {
            debug!("no usable EXIF data: {}", e);
            1
        }
    }
}

fn texture_from_bytes(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    path: &Path,
    bytes: &[u8],
    options: LoadOptions,
) -> Result<Texture2D> {
    let extension = extension_of(path);
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{}", extension), bytes).map_err(|e| {
        LandingError::Decode { path: path.to_path_buf(), reason: e.to_string() }
    })?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise; flips are ignored
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!(orientation, "applied EXIF rotation");
    }

    if options.silhouette {
        image.color_brightness(-255);
        image.color_invert();
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| LandingError::Texture { path: path.to_path_buf(), reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_jpeg_bytes_are_upright() {
        assert_eq!(exif_orientation(b"\x89PNG\r\n\x1a\n not really"), 1);
        assert_eq!(exif_orientation(&[]), 1);
    }

    #[test]
    fn extension_is_lowercased_with_png_fallback() {
        assert_eq!(extension_of(Path::new("assets/Logo.PNG")), "png");
        assert_eq!(extension_of(Path::new("photo.JPeG")), "jpeg");
        assert_eq!(extension_of(Path::new("noext")), "png");
    }
}
