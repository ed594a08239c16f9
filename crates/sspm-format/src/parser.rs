//! SSPM map parser.

use sspm_common::BinaryReader;

use crate::rating::{extract_notes, Note};
use crate::{
    CustomData, CustomField, DecodeOptions, Header, MapStrings, Marker, MarkerDefinition,
    Pointers, Result, SectionPointer, StaticMetadata,
};

/// A fully decoded SSPM map.
///
/// Every byte span is copied out of the input, so the map does not borrow
/// from the buffer it was decoded from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedMap {
    pub header: Header,
    pub metadata: StaticMetadata,
    pub pointers: Pointers,
    pub strings: MapStrings,
    /// Custom fields. Empty if the section is absent or corrupt.
    pub custom_data: CustomData,
    /// Embedded audio bytes, if flagged and present.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub audio: Option<Vec<u8>>,
    /// Embedded cover image bytes, if flagged and present.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cover: Option<Vec<u8>>,
    /// Marker definitions, in file order.
    pub marker_definitions: Vec<MarkerDefinition>,
    /// Markers in stream order, which is not guaranteed to be time order.
    pub markers: Vec<Marker>,
}

impl ParsedMap {
    /// Check if data starts with the SSPM signature.
    pub fn is_sspm(data: &[u8]) -> bool {
        data.len() >= Header::SIGNATURE.len() && &data[..Header::SIGNATURE.len()] == Header::SIGNATURE
    }

    /// Parse an SSPM map from bytes with default options.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, &DecodeOptions::default())
    }

    /// Parse an SSPM map from bytes.
    ///
    /// # Arguments
    ///
    /// * `data` - The complete file contents
    /// * `options` - Decoder configuration
    ///
    /// # Returns
    ///
    /// The decoded map, or the first error from a mandatory section. Errors
    /// inside the custom data section only empty that section.
    pub fn parse_with(data: &[u8], options: &DecodeOptions) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        // Fixed, file-leading blocks
        let header = Header::read(&mut reader)?;
        let metadata = StaticMetadata::read(&mut reader)?;
        let pointers = Pointers::read(&mut reader)?;
        let strings = MapStrings::read(&mut reader)?;

        log::debug!(
            "Read {:?} v{}: {} markers, {} notes",
            strings.map_id,
            header.version,
            metadata.marker_count,
            metadata.note_count
        );

        log::debug!(
            "Reading custom data, offset: {}, length: {}",
            pointers.custom_data.offset,
            pointers.custom_data.length
        );
        let custom_data = CustomData::read_or_empty(&mut reader, &pointers.custom_data);

        let audio = read_blob(&mut reader, "audio", metadata.has_audio, &pointers.audio)?;
        let cover = read_blob(&mut reader, "cover", metadata.has_cover, &pointers.cover)?;

        log::debug!(
            "Reading marker definitions, offset: {}, length: {}",
            pointers.marker_definitions.offset,
            pointers.marker_definitions.length
        );
        let marker_definitions = MarkerDefinition::read_all(&mut reader, &pointers.marker_definitions)?;

        log::debug!(
            "Reading markers, offset: {}, length: {}",
            pointers.markers.offset,
            pointers.markers.length
        );
        let markers = Marker::read_all(
            &mut reader,
            &pointers.markers,
            &marker_definitions,
            &options.definition_lookup,
        )?;

        Ok(Self {
            header,
            metadata,
            pointers,
            strings,
            custom_data,
            audio,
            cover,
            marker_definitions,
            markers,
        })
    }

    /// Markers sorted by position. Markers at the same time keep stream order.
    pub fn sorted_markers(&self) -> Vec<&Marker> {
        let mut markers: Vec<&Marker> = self.markers.iter().collect();
        markers.sort_by_key(|m| m.position);
        markers
    }

    /// Sort the markers in place by position.
    pub fn sort_markers(&mut self) {
        self.markers.sort_by_key(|m| m.position);
    }

    /// Find a marker definition by id.
    pub fn marker_definition(&self, id: &str) -> Option<&MarkerDefinition> {
        self.marker_definitions.iter().find(|d| d.id == id)
    }

    /// Find a custom field by id.
    pub fn custom_field(&self, id: &str) -> Option<&CustomField> {
        self.custom_data.get(id)
    }

    /// Notes for difficulty rating, sorted by time.
    pub fn notes(&self) -> Vec<Note> {
        extract_notes(&self.markers)
    }

    /// Duration from the first to the last marker, in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        let min = self.markers.iter().map(|m| m.position).min();
        let max = self.markers.iter().map(|m| m.position).max();
        match (min, max) {
            (Some(min), Some(max)) => max - min,
            _ => 0,
        }
    }
}

/// Read an optional embedded blob (audio or cover).
///
/// The blob is read only if the metadata flag is set and the pointer is
/// present. Once read, bounds errors are fatal.
fn read_blob(
    reader: &mut BinaryReader<'_>,
    section: &'static str,
    flagged: bool,
    pointer: &SectionPointer,
) -> Result<Option<Vec<u8>>> {
    if !flagged || !pointer.is_present() {
        return Ok(None);
    }

    log::debug!(
        "Reading {}, offset: {}, length: {}",
        section,
        pointer.offset,
        pointer.length
    );
    reader.seek(pointer.start(section)?);
    let bytes = reader.read_bytes(pointer.byte_len(section)?)?;
    Ok(Some(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MapBuilder;
    use crate::{DefinitionLookup, Error, Position, Value};
    use sspm_common::Error as CommonError;

    #[test]
    fn test_is_sspm() {
        assert!(ParsedMap::is_sspm(b"SS+m\x02\x00"));
        assert!(!ParsedMap::is_sspm(b"SS+"));
        assert!(!ParsedMap::is_sspm(b"osu file format"));
    }

    #[test]
    fn test_parse_valid_map() {
        let data = MapBuilder::new()
            .note(1000, Position::Int { x: 1, y: 2 })
            .note(500, Position::Quantum { x: 0.5, y: 1.25 })
            .build();

        let map = ParsedMap::parse(&data).unwrap();
        assert_eq!(&map.header.signature, b"SS+m");
        assert_eq!(map.header.version, 2);
        assert_eq!(map.strings.map_id, "test_map");
        assert_eq!(map.strings.mappers, vec!["mapper"]);
        assert_eq!(map.metadata.note_count, 2);
        assert!(map.custom_data.is_empty());
        assert!(map.audio.is_none());
        assert!(map.cover.is_none());
        assert_eq!(map.marker_definitions.len(), 1);

        // Stream order is preserved.
        assert_eq!(map.markers.len(), 2);
        assert_eq!(map.markers[0].position, 1000);
        assert_eq!(
            map.markers[1].fields,
            vec![Value::Position(Position::Quantum { x: 0.5, y: 1.25 })]
        );

        let sorted: Vec<u32> = map.sorted_markers().iter().map(|m| m.position).collect();
        assert_eq!(sorted, vec![500, 1000]);
        assert_eq!(map.duration_ms(), 500);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let data = MapBuilder::new()
            .note(10, Position::Int { x: 0, y: 0 })
            .custom_field("author_note", 0x09, None, &[0x01, 0x00, b'x'])
            .audio(&[1, 2, 3])
            .build();

        assert_eq!(ParsedMap::parse(&data).unwrap(), ParsedMap::parse(&data).unwrap());
    }

    #[test]
    fn test_audio_and_cover() {
        let data = MapBuilder::new()
            .note(10, Position::Int { x: 0, y: 0 })
            .audio(&[0xAA; 16])
            .cover(&[0xBB; 8])
            .build();

        let map = ParsedMap::parse(&data).unwrap();
        assert_eq!(map.audio.as_deref(), Some(&[0xAA; 16][..]));
        assert_eq!(map.cover.as_deref(), Some(&[0xBB; 8][..]));
    }

    #[test]
    fn test_audio_flag_gates_read() {
        let data = MapBuilder::new()
            .note(10, Position::Int { x: 0, y: 0 })
            .audio(&[0xAA; 16])
            .has_audio(false)
            .build();

        let map = ParsedMap::parse(&data).unwrap();
        assert!(map.audio.is_none());
    }

    #[test]
    fn test_flagged_audio_out_of_bounds_is_fatal() {
        let mut builder = MapBuilder::new()
            .note(10, Position::Int { x: 0, y: 0 })
            .audio(&[0xAA; 4]);
        builder.audio_length_override = Some(4096);
        let data = builder.build();

        let err = ParsedMap::parse(&data).unwrap_err();
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn test_custom_data_fields() {
        let data = MapBuilder::new()
            .note(10, Position::Int { x: 0, y: 0 })
            .custom_field("difficulty_name", 0x09, None, &[0x04, 0x00, b'h', b'a', b'r', b'd'])
            .custom_field("offsets", 0x0c, Some(0x02), &[0x01, 0x00, 0x02, 0x00])
            .build();

        let map = ParsedMap::parse(&data).unwrap();
        assert_eq!(map.custom_data.len(), 2);
        let offsets = map.custom_field("offsets").unwrap();
        assert_eq!(offsets.array_tag, Some(0x02));
        assert_eq!(offsets.value, vec![0x01, 0x00, 0x02, 0x00]);
        assert_eq!(
            map.custom_field("difficulty_name").unwrap().decode_value().unwrap(),
            Value::String("hard".into())
        );
    }

    #[test]
    fn test_corrupt_custom_data_is_isolated() {
        let mut builder = MapBuilder::new()
            .note(10, Position::Int { x: 3, y: 4 })
            .custom_field("a", 0x01, None, &[0x01]);
        builder.custom_count_override = Some(500);
        let data = builder.build();

        let map = ParsedMap::parse(&data).unwrap();
        assert!(map.custom_data.is_empty());
        assert_eq!(map.strings.map_name, "Test Map");
        assert_eq!(map.markers.len(), 1);
        assert_eq!(
            map.markers[0].field(0),
            Some(&Value::Position(Position::Int { x: 3, y: 4 }))
        );
    }

    #[test]
    fn test_custom_data_past_end_is_isolated() {
        let mut builder = MapBuilder::new()
            .note(10, Position::Int { x: 0, y: 0 })
            .custom_field("a", 0x01, None, &[0x01]);
        builder.custom_offset_override = Some(1 << 40);
        let data = builder.build();

        let map = ParsedMap::parse(&data).unwrap();
        assert!(map.custom_data.is_empty());
        assert_eq!(map.markers.len(), 1);
    }

    #[test]
    fn test_truncated_header() {
        let data = MapBuilder::new().note(10, Position::Int { x: 0, y: 0 }).build();

        let err = ParsedMap::parse(&data[..6]).unwrap_err();
        assert_eq!(
            err,
            Error::Common(CommonError::OutOfBounds {
                offset: 0,
                length: 10,
                buffer_len: 6
            })
        );
    }

    #[test]
    fn test_truncated_pointers() {
        let data = MapBuilder::new().note(10, Position::Int { x: 0, y: 0 }).build();

        // Header (10) + metadata (38) + 3 u64 values.
        let cut = 10 + 38 + 24 + 4;
        let err = ParsedMap::parse(&data[..cut]).unwrap_err();
        assert_eq!(
            err,
            Error::Common(CommonError::OutOfBounds {
                offset: 72,
                length: 8,
                buffer_len: cut
            })
        );
    }

    #[test]
    fn test_truncated_markers() {
        let data = MapBuilder::new()
            .note(10, Position::Int { x: 0, y: 0 })
            .note(20, Position::Quantum { x: 1.0, y: 1.0 })
            .build();

        // The last note's quantum coordinates are cut off. They start after
        // the discriminant byte, 8 bytes before the end of the file.
        let cut = data.len() - 3;
        let err = ParsedMap::parse(&data[..cut]).unwrap_err();
        assert_eq!(
            err,
            Error::Common(CommonError::OutOfBounds {
                offset: data.len() - 8,
                length: 8,
                buffer_len: cut
            })
        );
    }

    #[test]
    fn test_truncated_definitions() {
        // With no markers, the definitions section ends the file: its last
        // two bytes are the field count and the single position tag.
        let data = MapBuilder::new().build();

        let cut = data.len() - 2;
        let err = ParsedMap::parse(&data[..cut]).unwrap_err();
        assert_eq!(
            err,
            Error::Common(CommonError::OutOfBounds {
                offset: cut,
                length: 1,
                buffer_len: cut
            })
        );
    }

    #[test]
    fn test_missing_note_definition_is_fatal() {
        let data = MapBuilder::new()
            .definition_id("not_a_note")
            .note(10, Position::Int { x: 0, y: 0 })
            .build();

        let err = ParsedMap::parse(&data).unwrap_err();
        assert!(matches!(err, Error::MalformedSection { section: "markers", .. }));

        let options =
            DecodeOptions::new().with_definition_lookup(DefinitionLookup::Fixed("not_a_note".into()));
        let map = ParsedMap::parse_with(&data, &options).unwrap();
        assert_eq!(map.markers.len(), 1);
        assert!(map.marker_definition("not_a_note").is_some());
    }

    #[test]
    fn test_notes_for_rating() {
        let data = MapBuilder::new()
            .note(300, Position::Int { x: 2, y: 2 })
            .note(100, Position::Int { x: 0, y: 1 })
            .build();

        let map = ParsedMap::parse(&data).unwrap();
        let times: Vec<u32> = map.notes().iter().map(|n| n.time).collect();
        assert_eq!(times, vec![100, 300]);
    }
}
