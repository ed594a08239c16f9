//! Identifying strings block.

use sspm_common::BinaryReader;

use crate::Result;

/// Map identification strings, read right after the pointer table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapStrings {
    /// Unique map identifier.
    pub map_id: String,
    /// Display name of the map.
    pub map_name: String,
    /// Name of the song.
    pub song_name: String,
    /// Mapper names, in file order.
    pub mappers: Vec<String>,
}

impl MapStrings {
    /// Read the strings block from the current reader position.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let map_id = reader.read_string()?.into_owned();
        let map_name = reader.read_string()?.into_owned();
        let song_name = reader.read_string()?.into_owned();

        let mapper_count = reader.read_u16()? as usize;
        let mut mappers = Vec::with_capacity(mapper_count.min(reader.remaining() / 2));
        for _ in 0..mapper_count {
            mappers.push(reader.read_string()?.into_owned());
        }

        Ok(Self {
            map_id,
            map_name,
            song_name,
            mappers,
        })
    }
}
