//! The emulator session: one board plus the host-facing state around it.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use format_neon_image::{StateImage, encode_image, read_image};
use log::{debug, info, warn};
use neon_vdp::{SCREEN_HEIGHT, SCREEN_WIDTH, Vdp};

use crate::board::Board;
use crate::config::{FLOPPY_SLOTS, NeonConfig};
use crate::error::EmulatorError;
use crate::keyboard::{KeyOutcome, KeyboardMatrix};
use crate::uptime::Uptime;

/// A running NEON machine.
pub struct Emulator<B: Board> {
    board: B,
    config: NeonConfig,
    vdp: Vdp,
    /// ARGB32, 832×300, allocated once.
    frame: Vec<u32>,
    keyboard: KeyboardMatrix,
    uptime: Uptime,
    running: bool,
}

impl<B: Board> Emulator<B> {
    /// Configure the board, install the ROM and reset it. The session
    /// starts stopped.
    pub fn new(mut board: B, config: NeonConfig) -> Self {
        board.set_configuration(config.memory.config_word());
        board.reset();
        board.load_rom(&config.rom);
        board.reset();

        info!(
            "NEON initialized: {} KB RAM, {} byte ROM",
            config.memory.config_word(),
            config.rom.len()
        );

        Self {
            board,
            config,
            vdp: Vdp::new(),
            frame: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            keyboard: KeyboardMatrix::new(),
            uptime: Uptime::default(),
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        info!("NEON started");
    }

    pub fn stop(&mut self) {
        self.running = false;
        info!("NEON stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reset the board. Uptime carries on.
    pub fn reset(&mut self) {
        self.board.reset();
        info!("NEON reset");
    }

    /// Run one frame. Returns whether the board completed it; only
    /// completed frames count towards uptime.
    pub fn run_frame(&mut self) -> bool {
        self.board.set_breakpoints(&[]);
        if !self.board.run_frame() {
            return false;
        }
        self.uptime.frame_completed();
        true
    }

    /// Decode video memory into the frame buffer and return it.
    pub fn prepare_screen(&mut self) -> &[u32] {
        let rendered = self.vdp.render(&self.board, &mut self.frame);
        debug_assert!(rendered, "frame buffer is sized for one frame");
        &self.frame
    }

    /// Apply a host key event and latch the matrix into the board.
    pub fn key_event(&mut self, scan: u16, pressed: bool) -> KeyOutcome {
        let outcome = self.keyboard.apply(scan, pressed);
        if outcome == KeyOutcome::Applied {
            if pressed {
                debug!("key {scan:#05x} down");
            }
            self.board.update_keyboard_matrix(self.keyboard.rows());
        }
        outcome
    }

    #[must_use]
    pub fn keyboard(&self) -> &KeyboardMatrix {
        &self.keyboard
    }

    /// Attach the media file for `slot` to the board.
    pub fn attach_media(&mut self, slot: usize) -> Result<(), EmulatorError> {
        check_slot(slot)?;
        let path = self.config.media_path(slot);
        if !self.board.attach_floppy(slot, &path) {
            warn!("attach {} to slot {slot} failed", path.display());
            return Err(EmulatorError::Attach { slot, path });
        }
        info!("attached {} to slot {slot}", path.display());
        Ok(())
    }

    /// Detach `slot` and delete its media file. A file that is already
    /// gone is not an error.
    pub fn detach_media(&mut self, slot: usize) -> Result<(), EmulatorError> {
        check_slot(slot)?;
        let path = self.config.media_path(slot);
        self.board.detach_floppy(slot);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                warn!("cannot remove {}: {source}", path.display());
                return Err(EmulatorError::Remove { path, source });
            }
        }
        info!("detached slot {slot}");
        Ok(())
    }

    /// Load the snapshot at the configured image path.
    pub fn load_image(&mut self) -> Result<(), EmulatorError> {
        let path = self.config.image_path.clone();
        self.load_image_from(&path)
    }

    /// Load the snapshot at `path`, stopping the session first.
    ///
    /// The file is removed whether or not the load succeeds. On success the
    /// recorded whole seconds replace the uptime's; frames into the current
    /// second carry over. On failure the board state and uptime are left as
    /// they were.
    pub fn load_image_from(&mut self, path: &Path) -> Result<(), EmulatorError> {
        self.stop();

        let image = match read_image_file(path) {
            Ok(image) => image,
            Err(e) => {
                warn!("loading {} failed: {e}", path.display());
                return Err(e);
            }
        };

        self.board.install_state_image(&image.state);
        self.uptime.set_seconds(image.uptime());
        info!(
            "loaded {} ({} bytes, uptime {} s)",
            path.display(),
            image.state.len(),
            image.uptime()
        );
        Ok(())
    }

    /// Write the board's state to `path` as a snapshot.
    pub fn save_image(&self, path: &Path) -> Result<(), EmulatorError> {
        let state = self.board.save_state_image();
        let image = encode_image(&state, self.uptime.seconds())?;
        fs::write(path, &image).map_err(|source| EmulatorError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("saved {} ({} bytes)", path.display(), image.len());
        Ok(())
    }

    /// Uptime in seconds, including the current partial second.
    #[must_use]
    pub fn uptime(&self) -> f64 {
        self.uptime.as_secs_f64()
    }

    #[must_use]
    pub fn pc(&self) -> u16 {
        self.board.pc()
    }

    #[must_use]
    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }
}

fn check_slot(slot: usize) -> Result<(), EmulatorError> {
    if slot < FLOPPY_SLOTS {
        Ok(())
    } else {
        Err(EmulatorError::InvalidSlot(slot))
    }
}

fn read_image_file(path: &Path) -> Result<StateImage, EmulatorError> {
    let _cleanup = RemoveOnDrop(path.to_path_buf());
    let file = File::open(path).map_err(|source| EmulatorError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(read_image(&mut BufReader::new(file))?)
}

/// Deletes a file when dropped.
struct RemoveOnDrop(PathBuf);

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        match fs::remove_file(&self.0) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("cannot remove {}: {e}", self.0.display()),
        }
    }
}
