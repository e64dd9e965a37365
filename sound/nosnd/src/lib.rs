//! A sound server that plays nothing. Every started effect is logged and
//! counted so a headless run can still report what it would have heard.

use std::{
    collections::HashMap,
    error::Error,
    fmt::Display,
    sync::mpsc::{channel, Receiver},
};

use log::{debug, info};

use sound_traits::{
    InitResult, SfxName, SndServerTx, SoundAction, SoundServer, SoundServerTic,
};

pub type SndServerRx = Receiver<SoundAction<SfxName>>;

pub struct Snd {
    rx: SndServerRx,
    tx: SndServerTx,
    volume: i32,
    started: HashMap<SfxName, usize>,
}

impl Snd {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let (tx, rx) = channel();
        Ok(Self {
            rx,
            tx,
            volume: 0,
            started: HashMap::new(),
        })
    }

    /// Drain everything currently queued without blocking
    pub fn drain(&mut self) {
        while let Ok(sound) = self.rx.try_recv() {
            if let SoundAction::StartSfx { uid, sfx, x, y } = sound {
                self.start_sound(uid, sfx, x, y);
            }
        }
    }

    /// How many times `sfx` was started since the server was created
    pub fn started(&self, sfx: SfxName) -> usize {
        self.started.get(&sfx).copied().unwrap_or_default()
    }
}

#[derive(Debug)]
pub enum SndError {
    None,
}

impl Display for SndError {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl std::error::Error for SndError {}

impl SoundServer<SfxName, SndError> for Snd {
    fn init(&mut self) -> InitResult<SfxName, SndError> {
        Ok(self.tx.clone())
    }

    fn start_sound(&mut self, uid: usize, sfx: SfxName, x: f32, y: f32) {
        debug!("sfx {sfx} from {uid} at ({x}, {y})");
        *self.started.entry(sfx).or_default() += 1;
    }

    fn stop_sound(&mut self, _: usize) {}

    fn stop_sound_all(&mut self) {}

    fn set_sfx_volume(&mut self, volume: i32) {
        self.volume = volume;
    }

    fn get_sfx_volume(&mut self) -> i32 {
        self.volume
    }

    fn update_self(&mut self) {}

    fn get_rx(&mut self) -> &mut SndServerRx {
        &mut self.rx
    }

    fn shutdown_sound(&mut self) {
        info!("Shutdown sound server");
        self.stop_sound_all();
    }
}

impl SoundServerTic<SfxName, SndError> for Snd {}
