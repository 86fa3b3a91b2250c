//! Looping background audio, played with kira.

use std::path::{Path, PathBuf};

use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, AudioManagerSettings, DefaultBackend, Tween};

use crate::error::AudioError;

/// Plays one file on repeat until dropped.
pub struct BackgroundLoop {
    // Keeps the output stream alive for as long as the handle plays.
    _manager: AudioManager,
    handle: StaticSoundHandle,
    path: PathBuf,
}

impl BackgroundLoop {
    pub fn start(path: &Path) -> Result<Self, AudioError> {
        let mut manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::Device(e.to_string()))?;
        let sound = StaticSoundData::from_file(path)
            .map_err(|e| AudioError::Load {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .loop_region(..);
        let handle = manager
            .play(sound)
            .map_err(|e| AudioError::Play(e.to_string()))?;
        tracing::info!("looping background audio from {}", path.display());
        Ok(Self {
            _manager: manager,
            handle,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BackgroundLoop {
    fn drop(&mut self) {
        self.handle.stop(Tween::default());
    }
}
