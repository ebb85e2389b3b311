//! Rom loading from raw bytes, files and zip archives.
use std::{
    fs,
    io::{Read, Seek},
    path::Path,
};

use zip::read::ZipArchive;

use crate::{definitions::cpu, RomError};

/// Represents an archive of roms
pub struct RomArchives<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> RomArchives<R> {
    /// Opens the archive, failing if the reader doesn't contain a zip archive.
    pub fn new(reader: R) -> Result<Self, RomError> {
        Ok(RomArchives {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Will return all the rom names available to be chosen
    pub fn file_names(&self) -> Vec<&'_ str> {
        self.archive.file_names().collect()
    }

    /// Will decompress the rom with the given name from the zip archive
    pub fn get_file_data(&mut self, name: &str) -> Result<Rom, RomError> {
        let mut file = self.archive.by_name(name)?;
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        Rom::new(name, data)
    }
}

impl RomArchives<fs::File> {
    /// Opens the zip archive at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RomError> {
        Self::new(fs::File::open(path)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The program, guaranteed to fit between `0x200` and the end of memory
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data
    pub fn new<D: Into<Vec<u8>>>(name: &str, data: D) -> Result<Self, RomError> {
        let data = data.into();
        if data.is_empty() {
            return Err(RomError::Empty(name.to_string()));
        }
        if data.len() > cpu::PROGRAM_SIZE {
            return Err(RomError::TooLarge {
                name: name.to_string(),
                len: data.len(),
                max: cpu::PROGRAM_SIZE,
            });
        }
        log::info!("Loaded rom '{}' with {} bytes", name, data.len());
        Ok(Rom {
            name: name.to_string(),
            data: data.into_boxed_slice(),
        })
    }

    /// Will read the rom from the given file, the name of the rom is the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RomError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(&name, data)
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::{build_opcode, Opcode};
    use std::io::{Cursor, Write};
    use zip::{write::FileOptions, CompressionMethod, ZipWriter};

    const RAW_ROM_DATA: [Opcode; 8] = [
        0x00E0, 0x6C00, 0x4C00, 0x6E0F, 0xA203, 0x6020, 0xF055, 0x00E0,
    ];

    fn raw_rom() -> Vec<u8> {
        RAW_ROM_DATA.iter().flat_map(|op| op.to_be_bytes()).collect()
    }

    fn archive(files: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in files {
            let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_rom_new() {
        let rom = Rom::new("TEST", raw_rom()).unwrap();
        assert_eq!(rom.get_name(), "TEST");
        for i in (0..rom.get_data().len()).step_by(2) {
            assert_eq!(Ok(RAW_ROM_DATA[i / 2]), build_opcode(rom.get_data(), i));
        }
    }

    #[test]
    fn test_rom_size_limits() {
        assert!(Rom::new("MAX", vec![0xAu8; cpu::PROGRAM_SIZE]).is_ok());

        let err = Rom::new("LARGE", vec![0xAu8; cpu::PROGRAM_SIZE + 1]).unwrap_err();
        assert!(matches!(
            err,
            RomError::TooLarge { len, max, .. } if len == cpu::PROGRAM_SIZE + 1 && max == 0xE00
        ));

        let err = Rom::new("EMPTY", Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, RomError::Empty(name) if name == "EMPTY"));
    }

    #[test]
    fn test_rom_missing_file() {
        let err = Rom::from_file("this/rom/does/not/exist.ch8").unwrap_err();
        assert!(matches!(err, RomError::Io(_)));
    }

    #[test]
    fn test_rom_extract() {
        let data = raw_rom();
        let mut ra = RomArchives::new(archive(&[("PUZZLE", &data[..])])).unwrap();
        let rom = ra.get_file_data("PUZZLE").unwrap();

        assert_eq!(rom.get_name(), "PUZZLE");
        assert_eq!(rom.get_data(), &data[..]);
    }

    #[test]
    fn test_file_names() {
        let ra = RomArchives::new(archive(&[
            ("PONG", &[0x00, 0xE0][..]),
            ("BRIX", &[0x12, 0x00][..]),
        ]))
        .unwrap();
        let mut files = ra.file_names();
        files.sort();

        assert_eq!(&["BRIX", "PONG"], &files[..]);
    }

    #[test]
    fn test_archive_errors() {
        assert!(matches!(
            RomArchives::new(Cursor::new(vec![0u8; 16])),
            Err(RomError::Archive(_))
        ));

        let mut ra = RomArchives::new(archive(&[("PONG", &[0x00, 0xE0][..])])).unwrap();
        assert!(matches!(
            ra.get_file_data("TETRIS"),
            Err(RomError::Archive(_))
        ));
    }
}
