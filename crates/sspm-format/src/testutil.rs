//! Test fixture builder producing complete SSPM buffers.

use crate::Position;

fn push_string(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u16).to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

fn push_pointer(out: &mut Vec<u8>, offset: u64, length: u64) {
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&length.to_le_bytes());
}

/// Builds a version 2 map with one position-only note definition.
pub(crate) struct MapBuilder {
    notes: Vec<(u32, Position)>,
    custom_fields: Vec<(String, u8, Option<u8>, Vec<u8>)>,
    audio: Option<Vec<u8>>,
    cover: Option<Vec<u8>>,
    has_audio: Option<bool>,
    definition_id: String,
    pub custom_count_override: Option<u16>,
    pub custom_offset_override: Option<u64>,
    pub audio_length_override: Option<u64>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            custom_fields: Vec::new(),
            audio: None,
            cover: None,
            has_audio: None,
            definition_id: "ssp_note".to_string(),
            custom_count_override: None,
            custom_offset_override: None,
            audio_length_override: None,
        }
    }

    pub fn note(mut self, time: u32, position: Position) -> Self {
        self.notes.push((time, position));
        self
    }

    pub fn custom_field(mut self, id: &str, tag: u8, array_tag: Option<u8>, value: &[u8]) -> Self {
        self.custom_fields
            .push((id.to_string(), tag, array_tag, value.to_vec()));
        self
    }

    pub fn audio(mut self, bytes: &[u8]) -> Self {
        self.audio = Some(bytes.to_vec());
        self
    }

    pub fn cover(mut self, bytes: &[u8]) -> Self {
        self.cover = Some(bytes.to_vec());
        self
    }

    pub fn has_audio(mut self, flag: bool) -> Self {
        self.has_audio = Some(flag);
        self
    }

    pub fn definition_id(mut self, id: &str) -> Self {
        self.definition_id = id.to_string();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut strings = Vec::new();
        push_string(&mut strings, "test_map");
        push_string(&mut strings, "Test Map");
        push_string(&mut strings, "Test Song");
        strings.extend_from_slice(&1u16.to_le_bytes());
        push_string(&mut strings, "mapper");

        let body_start = (10 + 38 + 80 + strings.len()) as u64;
        let mut body = Vec::new();

        let mut custom = (0u64, 0u64);
        if !self.custom_fields.is_empty() {
            let offset = body_start + body.len() as u64;
            let count = self
                .custom_count_override
                .unwrap_or(self.custom_fields.len() as u16);
            body.extend_from_slice(&count.to_le_bytes());
            for (id, tag, array_tag, value) in &self.custom_fields {
                push_string(&mut body, id);
                body.push(*tag);
                if let Some(array_tag) = array_tag {
                    body.push(*array_tag);
                }
                body.extend_from_slice(&(value.len() as u32).to_le_bytes());
                body.extend_from_slice(value);
            }
            let length = body_start + body.len() as u64 - offset;
            custom = (self.custom_offset_override.unwrap_or(offset), length);
        }

        let mut audio = (0u64, 0u64);
        if let Some(bytes) = &self.audio {
            audio.0 = body_start + body.len() as u64;
            audio.1 = self.audio_length_override.unwrap_or(bytes.len() as u64);
            body.extend_from_slice(bytes);
        }

        let mut cover = (0u64, 0u64);
        if let Some(bytes) = &self.cover {
            cover.0 = body_start + body.len() as u64;
            cover.1 = bytes.len() as u64;
            body.extend_from_slice(bytes);
        }

        let definitions_offset = body_start + body.len() as u64;
        body.push(1);
        push_string(&mut body, &self.definition_id);
        body.push(1);
        body.push(0x07);
        let definitions = (definitions_offset, body_start + body.len() as u64 - definitions_offset);

        let markers_offset = body_start + body.len() as u64;
        for (time, position) in &self.notes {
            body.extend_from_slice(&time.to_le_bytes());
            body.push(0);
            match *position {
                Position::Int { x, y } => body.extend_from_slice(&[0x00, x, y]),
                Position::Quantum { x, y } => {
                    body.push(0x01);
                    body.extend_from_slice(&x.to_le_bytes());
                    body.extend_from_slice(&y.to_le_bytes());
                }
            }
        }
        let markers = (markers_offset, body_start + body.len() as u64 - markers_offset);

        let mut data = Vec::new();

        // Header
        data.extend_from_slice(b"SS+m");
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]);

        // Static metadata
        let last_position = self.notes.iter().map(|(t, _)| *t).max().unwrap_or(0);
        data.extend_from_slice(&[0x11; 20]);
        data.extend_from_slice(&last_position.to_le_bytes());
        data.extend_from_slice(&(self.notes.len() as u32).to_le_bytes());
        data.extend_from_slice(&(self.notes.len() as u32).to_le_bytes());
        data.push(1);
        data.extend_from_slice(&0u16.to_le_bytes());
        data.push(self.has_audio.unwrap_or(self.audio.is_some()) as u8);
        data.push(self.cover.is_some() as u8);
        data.push(0);

        // Pointers
        push_pointer(&mut data, custom.0, custom.1);
        push_pointer(&mut data, audio.0, audio.1);
        push_pointer(&mut data, cover.0, cover.1);
        push_pointer(&mut data, definitions.0, definitions.1);
        push_pointer(&mut data, markers.0, markers.1);

        data.extend_from_slice(&strings);
        debug_assert_eq!(data.len() as u64, body_start);
        data.extend_from_slice(&body);
        data
    }
}
