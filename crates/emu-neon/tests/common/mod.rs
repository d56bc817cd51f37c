//! Test board shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use emu_core::{FlatMemory, MemoryView};
use emu_neon::{Board, FLOPPY_SLOTS, NeonConfig};

/// Board calls that matter for ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Configure(u16),
    Reset,
    LoadRom(usize),
}

/// A board that records what the session asks of it.
pub struct TestBoard {
    pub memory: FlatMemory,
    pub calls: Vec<Call>,
    /// Results for upcoming `run_frame` calls; completes when empty.
    pub frame_results: VecDeque<bool>,
    pub frames_run: usize,
    pub breakpoint_clears: usize,
    pub installed: Option<Vec<u8>>,
    /// Returned from `save_state_image`.
    pub state: Vec<u8>,
    pub matrices: Vec<[u8; 8]>,
    pub attached: [Option<PathBuf>; FLOPPY_SLOTS],
    pub reject_attach: bool,
    pub pc: u16,
}

impl TestBoard {
    pub fn new() -> Self {
        Self {
            memory: FlatMemory::new(),
            calls: Vec::new(),
            frame_results: VecDeque::new(),
            frames_run: 0,
            breakpoint_clears: 0,
            installed: None,
            state: Vec::new(),
            matrices: Vec::new(),
            attached: Default::default(),
            reject_attach: false,
            pc: 0,
        }
    }
}

impl MemoryView for TestBoard {
    fn byte_at(&self, address: u32) -> u8 {
        self.memory.byte_at(address)
    }

    fn word_at(&self, address: u32) -> u16 {
        self.memory.word_at(address)
    }
}

impl Board for TestBoard {
    fn set_configuration(&mut self, word: u16) {
        self.calls.push(Call::Configure(word));
    }

    fn load_rom(&mut self, rom: &[u8]) {
        self.calls.push(Call::LoadRom(rom.len()));
    }

    fn reset(&mut self) {
        self.calls.push(Call::Reset);
    }

    fn run_frame(&mut self) -> bool {
        self.frames_run += 1;
        self.frame_results.pop_front().unwrap_or(true)
    }

    fn set_breakpoints(&mut self, breakpoints: &[u32]) {
        if breakpoints.is_empty() {
            self.breakpoint_clears += 1;
        }
    }

    fn install_state_image(&mut self, image: &[u8]) {
        self.installed = Some(image.to_vec());
    }

    fn save_state_image(&self) -> Vec<u8> {
        self.state.clone()
    }

    fn update_keyboard_matrix(&mut self, matrix: &[u8; 8]) {
        self.matrices.push(*matrix);
    }

    fn attach_floppy(&mut self, slot: usize, path: &Path) -> bool {
        if self.reject_attach {
            return false;
        }
        self.attached[slot] = Some(path.to_path_buf());
        true
    }

    fn detach_floppy(&mut self, slot: usize) {
        self.attached[slot] = None;
    }

    fn pc(&self) -> u16 {
        self.pc
    }
}

pub const ROM: &[u8] = &[0xA5; 64];

pub fn config() -> NeonConfig {
    NeonConfig::new(ROM.to_vec())
}

/// A per-test path under the system temp directory.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("emu-neon-{}-{name}", std::process::id()))
}

/// A state image with a recognisable header and body.
pub fn sample_state(len: usize) -> Vec<u8> {
    let mut state: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    state[..4].copy_from_slice(b"NEON");
    state
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
