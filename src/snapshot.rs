use std::io::Cursor;
use std::sync::Arc;

use futures::channel::oneshot;
use image::{ImageFormat, RgbaImage};

use crate::error::SnapshotError;
use crate::surface::Surface;

/// Immutable PNG encoding of a whole surface at one instant.
///
/// Cloning shares the encoded bytes. Two snapshots are equal when their
/// dimensions and encoded content match.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    encoded: Arc<[u8]>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("encoded_len", &self.encoded.len())
            .finish()
    }
}

impl Snapshot {
    /// Encodes the surface's current pixels
    pub fn capture(surface: &Surface) -> Result<Self, SnapshotError> {
        Self::encode(surface.pixels())
    }

    /// Encodes an arbitrary pixel buffer
    pub fn encode(pixels: &RgbaImage) -> Result<Self, SnapshotError> {
        let mut bytes = Vec::new();
        pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(SnapshotError::Encode)?;
        Ok(Self {
            width: pixels.width(),
            height: pixels.height(),
            encoded: bytes.into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Decodes on the calling thread
    pub fn decode(&self) -> Result<RgbaImage, SnapshotError> {
        decode_png(&self.encoded)
    }

    /// Starts decoding on a worker thread. The caller does not block.
    pub fn decode_async(&self) -> PendingDecode {
        let (sender, receiver) = oneshot::channel();
        let encoded = Arc::clone(&self.encoded);

        let spawned = std::thread::Builder::new()
            .name("snapshot-decode".to_owned())
            .spawn(move || {
                // The receiver may already be gone if the restore was superseded
                let _ = sender.send(decode_png(&encoded));
            });

        if let Err(err) = spawned {
            log::warn!("Could not spawn decode worker ({}), decoding inline", err);
            let (sender, receiver) = oneshot::channel();
            let _ = sender.send(self.decode());
            return PendingDecode { receiver };
        }

        PendingDecode { receiver }
    }
}

fn decode_png(bytes: &[u8]) -> Result<RgbaImage, SnapshotError> {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map(|image| image.into_rgba8())
        .map_err(SnapshotError::Decode)
}

/// A snapshot decode that has been issued but not yet collected
#[derive(Debug)]
pub struct PendingDecode {
    receiver: oneshot::Receiver<Result<RgbaImage, SnapshotError>>,
}

impl PendingDecode {
    /// Returns the decoded pixels if the worker has finished, without blocking
    pub fn try_complete(&mut self) -> Option<Result<RgbaImage, SnapshotError>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(SnapshotError::DecodeCanceled)),
        }
    }

    /// Blocks until the worker reports a result
    pub fn wait(self) -> Result<RgbaImage, SnapshotError> {
        futures::executor::block_on(self.receiver).unwrap_or(Err(SnapshotError::DecodeCanceled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checkered_surface() -> Surface {
        let mut surface = Surface::new(8, 6).unwrap();
        for (x, y, pixel) in surface.pixels_mut().enumerate_pixels_mut() {
            if (x + y) % 2 == 0 {
                *pixel = Rgba([200, 10, 10, 128]);
            }
        }
        surface
    }

    #[test]
    fn test_decode_is_lossless() {
        let surface = checkered_surface();
        let snapshot = Snapshot::capture(&surface).unwrap();
        assert_eq!((snapshot.width(), snapshot.height()), (8, 6));
        assert_eq!(&snapshot.decode().unwrap(), surface.pixels());
    }

    #[test]
    fn test_async_decode_matches_sync_decode() {
        let snapshot = Snapshot::capture(&checkered_surface()).unwrap();
        let pending = snapshot.decode_async();
        assert_eq!(pending.wait().unwrap(), snapshot.decode().unwrap());
    }

    #[test]
    fn test_try_complete_eventually_yields() {
        let snapshot = Snapshot::capture(&checkered_surface()).unwrap();
        let mut pending = snapshot.decode_async();
        let result = loop {
            if let Some(result) = pending.try_complete() {
                break result;
            }
            std::thread::yield_now();
        };
        assert_eq!(result.unwrap(), snapshot.decode().unwrap());
    }

    #[test]
    fn test_equality_follows_content() {
        let blank = Surface::new(8, 6).unwrap();
        let a = Snapshot::capture(&blank).unwrap();
        let b = Snapshot::capture(&blank).unwrap();
        let c = Snapshot::capture(&checkered_surface()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
