use std::io::Cursor;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use super::error::GenAiError;

/// Format of the raw samples the speech model emits.
pub const SAMPLE_RATE: u32 = 24_000;
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;

/// Wraps 16-bit little-endian mono PCM in a WAV container.
pub fn pcm_to_wav(pcm: &[u8]) -> Result<Vec<u8>, GenAiError> {
    if pcm.is_empty() {
        return Err(GenAiError::MissingAudio);
    }
    if pcm.len() % 2 != 0 {
        return Err(GenAiError::AudioEncoding(format!(
            "PCM payload has odd length {}",
            pcm.len()
        )));
    }

    let spec = hound::WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(pcm.len() + 44));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| GenAiError::AudioEncoding(e.to_string()))?;
        for frame in pcm.chunks_exact(2) {
            writer
                .write_sample(i16::from_le_bytes([frame[0], frame[1]]))
                .map_err(|e| GenAiError::AudioEncoding(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| GenAiError::AudioEncoding(e.to_string()))?;
    }
    Ok(cursor.into_inner())
}

pub fn wav_data_uri(wav: &[u8]) -> String {
    format!("data:audio/wav;base64,{}", STANDARD.encode(wav))
}

/// Base64 PCM, as found in the model response, to a playable data URI.
pub fn pcm_base64_to_data_uri(encoded: &str) -> Result<String, GenAiError> {
    let pcm = STANDARD
        .decode(encoded.trim())
        .map_err(|e| GenAiError::MalformedResponse(format!("audio payload is not base64: {}", e)))?;
    let wav = pcm_to_wav(&pcm)?;
    Ok(wav_data_uri(&wav))
}
