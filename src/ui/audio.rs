use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gtk4 as gtk;
use gtk4::prelude::*;

const SAMPLE_RATE: u32 = 44_100;
const TONE_SECS: f64 = 0.11;
const SWEEP_SECS: f64 = 0.09;
const START_HZ: f64 = 620.0;
const END_HZ: f64 = 420.0;
const PEAK_GAIN: f64 = 0.07;
const FLOOR_GAIN: f64 = 0.0001;
const ATTACK_SECS: f64 = 0.01;
const RELEASE_END_SECS: f64 = 0.1;
const TONE_FILE: &str = "flip.wav";

fn exp_ramp(from: f64, to: f64, progress: f64) -> f64 {
    from * (to / from).powf(progress.clamp(0.0, 1.0))
}

fn envelope(t: f64) -> f64 {
    if t < ATTACK_SECS {
        exp_ramp(FLOOR_GAIN, PEAK_GAIN, t / ATTACK_SECS)
    } else {
        exp_ramp(
            PEAK_GAIN,
            FLOOR_GAIN,
            (t - ATTACK_SECS) / (RELEASE_END_SECS - ATTACK_SECS),
        )
    }
}

/// Short downward triangle chirp as a 16-bit mono PCM WAV file.
pub(super) fn flip_tone_wav() -> Vec<u8> {
    let sample_count = (SAMPLE_RATE as f64 * TONE_SECS) as usize;
    let mut samples = Vec::with_capacity(sample_count);
    let mut phase = 0.0f64;
    for i in 0..sample_count {
        let t = i as f64 / SAMPLE_RATE as f64;
        let freq = exp_ramp(START_HZ, END_HZ, t / SWEEP_SECS);
        let centered = phase - (phase + 0.5).floor();
        let triangle = 4.0 * centered.abs() - 1.0;
        let value = triangle * envelope(t) * i16::MAX as f64;
        samples.push(value.round() as i16);
        phase = (phase + freq / SAMPLE_RATE as f64).fract();
    }

    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

/// Writes the reveal tone into `dir` and returns the file's path. The media
/// backend only opens file-backed media, so the tone has to live on disk.
pub(super) fn write_tone_file(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(TONE_FILE);
    fs::write(&path, flip_tone_wav())?;
    Ok(path)
}

/// Something the reveal cue can replay from the start.
pub trait CueMedia {
    fn failure(&self) -> Option<glib::Error>;
    fn restart(&self);
}

impl CueMedia for gtk::MediaFile {
    fn failure(&self) -> Option<glib::Error> {
        self.error()
    }

    fn restart(&self) {
        self.seek(0);
        self.play();
    }
}

/// Plays the reveal tone through one media handle for the whole run. Turns
/// itself off for good the first time the media reports an error.
pub struct FlipCue<M = gtk::MediaFile> {
    media: Option<M>,
}

impl FlipCue {
    pub fn new() -> Self {
        let dir = glib::user_cache_dir().join("pairs");
        match write_tone_file(&dir) {
            Ok(path) => FlipCue::with_media(gtk::MediaFile::for_filename(&path)),
            Err(err) => {
                glib::g_warning!(
                    pairs::LOG_DOMAIN,
                    "reveal sound disabled, could not write {}: {}",
                    dir.join(TONE_FILE).display(),
                    err
                );
                FlipCue { media: None }
            }
        }
    }
}

impl<M: CueMedia> FlipCue<M> {
    pub(super) fn with_media(media: M) -> Self {
        FlipCue { media: Some(media) }
    }

    pub fn is_enabled(&self) -> bool {
        self.media.is_some()
    }

    pub fn play(&mut self) {
        let Some(media) = &self.media else {
            return;
        };
        if let Some(err) = media.failure() {
            glib::g_debug!(pairs::LOG_DOMAIN, "reveal sound disabled: {}", err);
            self.media = None;
            return;
        }
        media.restart();
    }
}
