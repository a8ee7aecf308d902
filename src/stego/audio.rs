//! LSB steganography over WAV audio carriers.
//!
//! Wraps decoded 16-bit PCM samples and feeds them to the shared bitstream
//! codec, one bit per sample in file order (channels stay interleaved
//! exactly as the container stores them). Other sample formats are rejected
//! as unsupported rather than silently re-quantized.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use thiserror::Error;

use super::codec::{self, CapacityError};

/// Errors that can occur while handling an audio carrier.
#[derive(Error, Debug)]
pub enum AudioCarrierError {
    #[error("message does not fit: {0}")]
    Capacity(#[from] CapacityError),

    #[error("audio load error: {0}")]
    Load(String),

    #[error("audio save error: {0}")]
    Save(String),

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
}

/// A WAV audio carrier for LSB embedding.
pub struct AudioCarrier {
    spec: WavSpec,
    samples: Vec<i16>,
}

impl AudioCarrier {
    /// Loads a carrier from a WAV file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AudioCarrierError> {
        let reader =
            WavReader::open(path).map_err(|e| AudioCarrierError::Load(e.to_string()))?;
        Self::from_reader(reader)
    }

    /// Loads a carrier from WAV bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AudioCarrierError> {
        let reader = WavReader::new(Cursor::new(bytes))
            .map_err(|e| AudioCarrierError::Load(e.to_string()))?;
        Self::from_reader(reader)
    }

    fn from_reader<R: Read + Seek>(reader: WavReader<R>) -> Result<Self, AudioCarrierError> {
        let spec = reader.spec();

        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(AudioCarrierError::UnsupportedFormat(format!(
                "only 16-bit integer PCM WAV is supported, got {} bits {:?}",
                spec.bits_per_sample, spec.sample_format
            )));
        }

        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AudioCarrierError::Load(e.to_string()))?;

        Ok(Self { spec, samples })
    }

    /// Builds a carrier from raw samples and a spec (used by tests and by
    /// callers that already hold decoded PCM).
    pub fn from_samples(spec: WavSpec, samples: Vec<i16>) -> Self {
        Self { spec, samples }
    }

    /// Usable payload capacity in bytes (end-marker overhead subtracted).
    pub fn capacity(&self) -> usize {
        codec::capacity_bytes(self.samples.len())
    }

    /// Returns the number of samples.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Returns the audio specification.
    pub fn spec(&self) -> &WavSpec {
        &self.spec
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        let frames = self.samples.len() / self.spec.channels as usize;
        frames as f64 / self.spec.sample_rate as f64
    }

    /// Embeds `frame` into the sample LSBs.
    ///
    /// Works on a private copy of the sample buffer and returns a new
    /// carrier; fails with a capacity error before any sample is written.
    pub fn embed(&self, frame: &[u8]) -> Result<Self, AudioCarrierError> {
        let mut samples = self.samples.clone();
        codec::embed(&mut samples, frame)?;

        Ok(Self {
            spec: self.spec,
            samples,
        })
    }

    /// Extracts an embedded frame, or `None` when the audio carries nothing.
    pub fn extract(&self) -> Option<Vec<u8>> {
        codec::extract(&self.samples)
    }

    /// Saves the carrier as a WAV file with the original spec.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AudioCarrierError> {
        let writer = WavWriter::create(path, self.spec)
            .map_err(|e| AudioCarrierError::Save(e.to_string()))?;
        self.write_samples(writer)
    }

    /// Returns the carrier encoded as WAV bytes.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, AudioCarrierError> {
        let mut bytes = Vec::new();
        let writer = WavWriter::new(Cursor::new(&mut bytes), self.spec)
            .map_err(|e| AudioCarrierError::Save(e.to_string()))?;
        self.write_samples(writer)?;
        Ok(bytes)
    }

    fn write_samples<W: std::io::Write + Seek>(
        &self,
        mut writer: WavWriter<W>,
    ) -> Result<(), AudioCarrierError> {
        for &sample in &self.samples {
            writer
                .write_sample(sample)
                .map_err(|e| AudioCarrierError::Save(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| AudioCarrierError::Save(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_audio(sample_count: usize) -> AudioCarrier {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        // 440 Hz sine, quantized; LSB content is irrelevant since embed
        // overwrites it.
        let samples: Vec<i16> = (0..sample_count)
            .map(|i| {
                let t = i as f64 / 44100.0;
                (f64::sin(2.0 * std::f64::consts::PI * 440.0 * t) * 16000.0) as i16
            })
            .collect();

        AudioCarrier::from_samples(spec, samples)
    }

    fn create_silent_audio(sample_count: usize) -> AudioCarrier {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        AudioCarrier::from_samples(spec, vec![0i16; sample_count])
    }

    #[test]
    fn test_capacity() {
        let audio = create_test_audio(10000);
        // (10000 - 16 marker bits) / 8 = 1248 bytes.
        assert_eq!(audio.capacity(), 1248);
    }

    #[test]
    fn test_embed_and_extract() {
        let audio = create_test_audio(10000);
        let frame = b"Hello, audio steganography!";

        let stego = audio.embed(frame).unwrap();
        assert_eq!(stego.extract().unwrap(), frame);
    }

    #[test]
    fn test_embed_and_extract_larger() {
        let audio = create_test_audio(100000);
        let frame: Vec<u8> = (0..5000).map(|i| (i % 256) as u8).collect();

        let stego = audio.embed(&frame).unwrap();
        assert_eq!(stego.extract().unwrap(), frame);
    }

    #[test]
    fn test_audio_too_short() {
        let audio = create_test_audio(100);
        let frame = vec![0u8; 1000];

        let result = audio.embed(&frame);
        assert!(matches!(result, Err(AudioCarrierError::Capacity(_))));
    }

    #[test]
    fn test_embed_does_not_mutate_original() {
        let audio = create_test_audio(1000);
        let before = audio.samples.clone();

        let _stego = audio.embed(b"copy semantics").unwrap();
        assert_eq!(audio.samples, before);
    }

    #[test]
    fn test_extract_from_silence_is_none() {
        let audio = create_silent_audio(10000);
        assert_eq!(audio.extract(), None);
    }

    #[test]
    fn test_wav_bytes_roundtrip() {
        let audio = create_test_audio(10000);
        let frame = b"survives WAV encode";

        let stego = audio.embed(frame).unwrap();
        let wav_bytes = stego.to_wav_bytes().unwrap();

        let reloaded = AudioCarrier::from_bytes(&wav_bytes).unwrap();
        assert_eq!(reloaded.extract().unwrap(), frame);
    }
}
